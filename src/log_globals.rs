//! Global log stream instance.
//!
//! The player is the only producer; the firmware main loop drains it
//! between sounds.

use crate::logging::LogStream;

/// Log stream for the sound player.
pub static SFX_LOG_STREAM: LogStream = LogStream::new();
