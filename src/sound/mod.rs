//! Sound tables for the speaker player
//!
//! Architecture:
//! - `SoundTable`: interval + static 8-bit samples
//! - `Sound`: built-in effects, mapped to tables as data
//! - `bank`: the built-in tables, rendered at compile time

pub mod bank;
pub mod table;

pub use bank::{ALERT, ALERT_INTERVAL_US, ALERT_LEN, BEEPS, BEEPS_INTERVAL_US, BEEPS_LEN, MIDPOINT};
pub use table::{Sound, SoundTable};
