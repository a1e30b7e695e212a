//! sfx-player - Main entry point
//!
//! On ESP-IDF targets: bring up the speaker lines, play the beeps once at
//! boot, then drain the player log between alerts.
//!
//! On the host: dry run on the simulated HAL. Plays the sounds named on the
//! command line (default: all) and prints each session report and the log.

#![cfg_attr(target_os = "espidf", no_std)]
#![cfg_attr(target_os = "espidf", no_main)]

use sfx_player::logging::{format_entry, MAX_MSG_LEN};
use sfx_player::{PlayerConfig, Sound, SoundPlayer, SFX_LOG_STREAM};

/// Room for the `[timestamp] LEVEL: ` prefix plus the message.
const LINE_BUF_LEN: usize = MAX_MSG_LEN + 32;

#[cfg(target_os = "espidf")]
mod firmware {
    use super::*;
    use esp_idf_svc::sys as esp_idf_sys;
    use sfx_player::hal::EspSpeakerHal;
    use sfx_player::LineId;

    /// FreeRTOS ticks between alerts in the idle loop.
    const ALERT_PERIOD_TICKS: u32 = 1000;

    #[no_mangle]
    fn main() {
        // Initialize ESP-IDF
        esp_idf_sys::link_patches();

        let config = PlayerConfig::default();
        let hal = match EspSpeakerHal::new(LineId(config.speaker_pin)) {
            Ok(hal) => hal,
            Err(e) => {
                sfx_player::rt_error!(SFX_LOG_STREAM, 0, "speaker setup failed: {}", e);
                loop {
                    drain_log();
                    unsafe { esp_idf_sys::vTaskDelay(ALERT_PERIOD_TICKS) };
                }
            }
        };

        let mut player = SoundPlayer::from_config(hal, &config).with_log(&SFX_LOG_STREAM);
        sfx_player::rt_info!(SFX_LOG_STREAM, 0, "{}", env!("VERSION_STRING"));

        if player.init().is_ok() {
            let _ = player.play(Sound::Beeps);
        }
        drain_log();

        loop {
            unsafe {
                esp_idf_sys::vTaskDelay(ALERT_PERIOD_TICKS);
            }
            let _ = player.play(Sound::Alert);
            drain_log();
        }
    }

    fn drain_log() {
        let mut buf = [0u8; LINE_BUF_LEN];
        SFX_LOG_STREAM.drain_each(|entry| {
            let len = format_entry(entry, &mut buf);
            // SAFETY: "%.*s" reads exactly len bytes from buf
            unsafe {
                esp_idf_sys::esp_rom_printf(c"%.*s".as_ptr(), len as i32, buf.as_ptr());
            }
        });
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    use sfx_player::SimHal;

    let sounds: Vec<Sound> = {
        let names: Vec<String> = std::env::args().skip(1).collect();
        if names.is_empty() {
            Sound::ALL.to_vec()
        } else {
            let mut sounds = Vec::with_capacity(names.len());
            for name in &names {
                match Sound::from_name(name) {
                    Some(sound) => sounds.push(sound),
                    None => {
                        eprintln!("unknown sound '{}' (expected: beeps, alert)", name);
                        std::process::exit(2);
                    }
                }
            }
            sounds
        }
    };

    let hal = SimHal::<8>::new();
    let mut player =
        SoundPlayer::from_config(hal, &PlayerConfig::default()).with_log(&SFX_LOG_STREAM);

    println!("{} (simulated hardware)", env!("VERSION_STRING"));

    let mut failed = player.init().is_err();
    for sound in sounds {
        match player.play(sound) {
            Ok(report) => println!(
                "{}: {} samples, {} us, {} overruns",
                sound.name(),
                report.samples_written,
                report.duration_us,
                report.overruns
            ),
            Err(e) => {
                println!("{}: {}", sound.name(), e);
                failed = true;
            }
        }
    }

    let mut buf = [0u8; LINE_BUF_LEN];
    SFX_LOG_STREAM.drain_each(|entry| {
        let len = format_entry(entry, &mut buf);
        print!("{}", String::from_utf8_lossy(&buf[..len]));
    });

    if failed {
        std::process::exit(1);
    }
}
