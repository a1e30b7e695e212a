//! # sfx-player
//!
//! Table-driven sound effects through an amplifier-gated analog speaker.
//!
//! ## Architecture
//!
//! A single [`SoundPlayer`] owns two lines and a [`SpeakerHal`]:
//! - amplifier enable (digital): high only while a sound plays
//! - speaker output (analog, 12-bit): one write per table sample
//!
//! Playback is synchronous. A play call returns once the last sample has
//! been written and the amplifier is powered down again.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod error;
pub mod hal;
pub mod log_globals;
pub mod logging;
pub mod player;
pub mod sound;

pub use config::{PlayerConfig, GUARD_DELAY_US, OUTPUT_MAX};
pub use error::{HalError, SfxError};
pub use hal::{Level, LineId, SimHal, SpeakerHal};
pub use log_globals::SFX_LOG_STREAM;
pub use player::{rescale, PlaybackReport, SoundPlayer};
pub use sound::{Sound, SoundTable};
