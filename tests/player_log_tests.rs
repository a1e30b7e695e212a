//! Player logging tests

use sfx_player::hal::{LineId, SimHal};
use sfx_player::logging::{LogLevel, LogStream};
use sfx_player::{SfxError, SoundPlayer};

fn drain_all(stream: &LogStream) -> Vec<(LogLevel, String)> {
    let mut out = Vec::new();
    stream.drain_each(|e| out.push((e.level, e.message().to_string())));
    out
}

#[test]
fn test_session_logged() {
    static LOG: LogStream = LogStream::new();
    let mut p = SoundPlayer::new(SimHal::<32>::new(), LineId(5), LineId(25)).with_log(&LOG);

    p.init().unwrap();
    p.play_sound(1000, 2, &[0, 255]).unwrap();

    let entries = drain_all(&LOG);
    assert_eq!(
        entries,
        vec![
            (LogLevel::Info, "init amp=5 spk=25".to_string()),
            (LogLevel::Debug, "play n=2 interval=1000us".to_string()),
            (LogLevel::Debug, "done n=2 in 2100us".to_string()),
        ]
    );
}

#[test]
fn test_overruns_logged_as_warning() {
    static LOG: LogStream = LogStream::new();
    let hal = SimHal::<32>::new().with_read_cost(500);
    let mut p = SoundPlayer::new(hal, LineId(5), LineId(25)).with_log(&LOG);

    let report = p.play_sound(100, 3, &[1, 2, 3]).unwrap();
    assert_eq!(report.overruns, 3);

    let entries = drain_all(&LOG);
    assert!(entries.contains(&(LogLevel::Warn, "overruns=3 of 3".to_string())));
}

#[test]
fn test_errors_logged_with_code() {
    static LOG: LogStream = LogStream::new();
    let mut p = SoundPlayer::new(SimHal::<8>::new(), LineId(5), LineId(25)).with_log(&LOG);

    assert_eq!(p.play_sound(0, 0, &[]), Err(SfxError::ZeroInterval));

    let entries = drain_all(&LOG);
    assert_eq!(
        entries,
        vec![(LogLevel::Error, "E01: interval must be non-zero".to_string())]
    );
}

#[test]
fn test_no_log_without_stream() {
    static LOG: LogStream = LogStream::new();
    let mut p = SoundPlayer::new(SimHal::<8>::new(), LineId(5), LineId(25));

    p.play_sound(100, 1, &[1]).unwrap();

    assert_eq!(LOG.pending(), 0);
}
