//! Sound player: amplifier gating and the sample playback loop.
//!
//! # Session (one play call)
//!
//! ```text
//! Idle ──▶ Priming ──────▶ Streaming ──────▶ Draining ──▶ Idle
//! amp off  amp on, guard   N samples,        guard,       amp off
//!                          interval spacing  amp off
//! ```
//!
//! # Rules
//!
//! - Playback blocks the caller until the amplifier is off again.
//! - Every sample is written, in order. Late samples are written
//!   immediately; the loop never skips and never catches up.
//! - The amplifier is driven low on every exit path, errors included.
//! - No cancellation: once the amplifier is on, the session runs out.

use crate::config::{PlayerConfig, OUTPUT_MAX, SAMPLE_MAX};
use crate::error::SfxError;
use crate::hal::{Level, LineId, SpeakerHal};
use crate::logging::LogStream;
use crate::sound::{Sound, SoundTable};
use crate::{rt_debug, rt_error, rt_info, rt_warn};

/// Rescale an 8-bit table sample to the 12-bit output range.
///
/// `round(sample * 4095 / 255)`: 0 → 0, 128 → 2056, 255 → 4095.
#[inline]
pub const fn rescale(sample: u8) -> u16 {
    let max_out = OUTPUT_MAX as u32;
    let max_in = SAMPLE_MAX as u32;
    ((sample as u32 * max_out + max_in / 2) / max_in) as u16
}

/// Time to wait before the next write, given the time already elapsed
/// since the previous one. Zero once the interval has passed.
#[inline]
pub const fn spacing_wait(interval_us: u32, elapsed_us: u32) -> u32 {
    interval_us.saturating_sub(elapsed_us)
}

/// Outcome of a completed session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackReport {
    /// Samples written to the speaker line.
    pub samples_written: usize,
    /// Samples written late (interval already exceeded, no wait).
    pub overruns: u32,
    /// From the amplifier-on write to the amplifier-off write, on the HAL clock.
    pub duration_us: u32,
}

/// Table-driven sound player bound to an amplifier and a speaker line.
///
/// # Example
///
/// ```ignore
/// let hal = EspSpeakerHal::new(LineId(25))?;
/// let mut player = SoundPlayer::new(hal, LineId(5), LineId(25)).with_log(&SFX_LOG_STREAM);
///
/// player.init()?;
/// player.play(Sound::Beeps)?;
/// ```
pub struct SoundPlayer<H: SpeakerHal> {
    hal: H,
    amp: LineId,
    speaker: LineId,
    guard_us: u32,
    log: Option<&'static LogStream>,
}

impl<H: SpeakerHal> SoundPlayer<H> {
    /// Bind a player to its lines. No validation; bad identifiers surface
    /// as HAL errors on first use.
    pub fn new(hal: H, amp: LineId, speaker: LineId) -> Self {
        Self {
            hal,
            amp,
            speaker,
            guard_us: PlayerConfig::default().guard_us,
            log: None,
        }
    }

    /// Bind a player using pin numbers and guard delay from `config`.
    pub fn from_config(hal: H, config: &PlayerConfig) -> Self {
        Self {
            guard_us: config.guard_us,
            ..Self::new(
                hal,
                LineId(config.amp_enable_pin),
                LineId(config.speaker_pin),
            )
        }
    }

    /// Attach a log stream for session events.
    pub fn with_log(mut self, log: &'static LogStream) -> Self {
        self.log = Some(log);
        self
    }

    #[inline]
    pub fn amp_line(&self) -> LineId {
        self.amp
    }

    #[inline]
    pub fn speaker_line(&self) -> LineId {
        self.speaker
    }

    #[inline]
    pub fn guard_us(&self) -> u32 {
        self.guard_us
    }

    #[inline]
    pub fn hal(&self) -> &H {
        &self.hal
    }

    /// Configure both lines as outputs and power the amplifier down.
    pub fn init(&mut self) -> Result<(), SfxError> {
        let configured = self
            .hal
            .configure_output(self.amp)
            .and_then(|()| self.hal.configure_output(self.speaker))
            .and_then(|()| self.hal.write_digital(self.amp, Level::Low));

        match configured {
            Ok(()) => {
                if let Some(log) = self.log {
                    rt_info!(
                        log,
                        self.hal.now_us(),
                        "init amp={} spk={}",
                        self.amp.raw(),
                        self.speaker.raw()
                    );
                }
                Ok(())
            }
            Err(e) => Err(self.report_error(e.into())),
        }
    }

    /// Play a built-in sound.
    #[inline]
    pub fn play(&mut self, sound: Sound) -> Result<PlaybackReport, SfxError> {
        self.play_table(sound.table())
    }

    /// Play the three-beep confirmation sound.
    pub fn play_beeps(&mut self) -> Result<PlaybackReport, SfxError> {
        self.play(Sound::Beeps)
    }

    /// Play the two-tone alert.
    pub fn play_alert(&mut self) -> Result<PlaybackReport, SfxError> {
        self.play(Sound::Alert)
    }

    /// Play a caller-supplied table.
    #[inline]
    pub fn play_table(&mut self, table: &SoundTable) -> Result<PlaybackReport, SfxError> {
        self.play_sound(table.interval_us(), table.len(), table.samples())
    }

    /// Play the first `sample_count` samples of `samples`, one every
    /// `interval_us`, framed by the amplifier guard delays.
    ///
    /// Blocks for roughly `2 * guard + sample_count * interval_us`.
    /// Arguments are checked before the amplifier is touched.
    ///
    /// # Errors
    ///
    /// - [`SfxError::ZeroInterval`] if `interval_us == 0`
    /// - [`SfxError::TableTooShort`] if `sample_count > samples.len()`
    /// - [`SfxError::Hardware`] if a line write fails; the amplifier is
    ///   still driven low before returning
    pub fn play_sound(
        &mut self,
        interval_us: u32,
        sample_count: usize,
        samples: &[u8],
    ) -> Result<PlaybackReport, SfxError> {
        if interval_us == 0 {
            return Err(self.report_error(SfxError::ZeroInterval));
        }
        if sample_count > samples.len() {
            return Err(self.report_error(SfxError::TableTooShort {
                count: sample_count,
                len: samples.len(),
            }));
        }
        let samples = &samples[..sample_count];

        if let Some(log) = self.log {
            rt_debug!(
                log,
                self.hal.now_us(),
                "play n={} interval={}us",
                sample_count,
                interval_us
            );
        }

        // Priming
        let started = self.hal.now_us();
        let streamed = match self.hal.write_digital(self.amp, Level::High) {
            Ok(()) => {
                self.hal.delay_us(self.guard_us);
                self.stream(interval_us, samples)
            }
            Err(e) => Err(e.into()),
        };

        // Draining
        self.hal.delay_us(self.guard_us);
        let finished = self.hal.now_us();
        let powered_down = self.hal.write_digital(self.amp, Level::Low);

        let mut report = match (streamed, powered_down) {
            (Ok(report), Ok(())) => report,
            (Err(e), _) => return Err(self.report_error(e)),
            (Ok(_), Err(e)) => return Err(self.report_error(e.into())),
        };
        report.duration_us = finished.wrapping_sub(started);

        if let Some(log) = self.log {
            if report.overruns > 0 {
                rt_warn!(
                    log,
                    finished,
                    "overruns={} of {}",
                    report.overruns,
                    report.samples_written
                );
            }
            rt_debug!(
                log,
                finished,
                "done n={} in {}us",
                report.samples_written,
                report.duration_us
            );
        }
        Ok(report)
    }

    /// Streaming phase: spacing wait then write, one sample at a time.
    fn stream(&mut self, interval_us: u32, samples: &[u8]) -> Result<PlaybackReport, SfxError> {
        let mut report = PlaybackReport::default();
        let mut last_write = self.hal.now_us();

        for &sample in samples {
            let value = rescale(sample);

            let elapsed = self.hal.now_us().wrapping_sub(last_write);
            let wait = spacing_wait(interval_us, elapsed);
            if wait > 0 {
                self.hal.delay_us(wait);
            } else if elapsed > interval_us {
                report.overruns += 1;
            }

            self.hal.write_analog(self.speaker, value)?;
            last_write = self.hal.now_us();
            report.samples_written += 1;
        }

        Ok(report)
    }

    fn report_error(&self, e: SfxError) -> SfxError {
        if let Some(log) = self.log {
            rt_error!(log, self.hal.now_us(), "{}", e);
        }
        e
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::SimHal;

    #[test]
    fn test_rescale_endpoints() {
        assert_eq!(rescale(0), 0);
        assert_eq!(rescale(255), 4095);
        assert_eq!(rescale(128), 2056);
        assert_eq!(rescale(1), 16);
    }

    #[test]
    fn test_rescale_matches_rounded_ratio() {
        for s in 0..=255u8 {
            let exact = s as f64 * 4095.0 / 255.0;
            assert_eq!(rescale(s), exact.round() as u16, "sample {}", s);
        }
    }

    #[test]
    fn test_spacing_wait_never_negative() {
        assert_eq!(spacing_wait(1000, 0), 1000);
        assert_eq!(spacing_wait(1000, 999), 1);
        assert_eq!(spacing_wait(1000, 1000), 0);
        assert_eq!(spacing_wait(1000, 5000), 0);
    }

    #[test]
    fn test_from_config_uses_pins_and_guard() {
        let cfg = PlayerConfig {
            amp_enable_pin: 12,
            speaker_pin: 26,
            guard_us: 80,
        };
        let player = SoundPlayer::from_config(SimHal::<4>::new(), &cfg);
        assert_eq!(player.amp_line(), LineId(12));
        assert_eq!(player.speaker_line(), LineId(26));
        assert_eq!(player.guard_us(), 80);
    }

    #[test]
    fn test_exact_interval_is_not_an_overrun() {
        // Each clock read costs the full interval: elapsed == interval every time
        let hal = SimHal::<64>::new().with_read_cost(100);
        let mut player = SoundPlayer::new(hal, LineId(5), LineId(25));

        let report = player.play_sound(100, 3, &[1, 2, 3]).unwrap();
        assert_eq!(report.overruns, 0);
        assert_eq!(report.samples_written, 3);
    }
}
