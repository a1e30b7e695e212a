//! Module: config
//!
//! Purpose: Static configuration for the sound player.
//!
//! Architecture:
//! - Output resolution is fixed (12-bit); tables are always 8-bit
//! - Pin numbers and the guard delay live in `PlayerConfig`
//! - Defaults match the reference board wiring
//!
//! Safety: Safe. Plain data, no interior mutability.

/// Output resolution of the speaker line in bits.
pub const OUTPUT_BITS: u32 = 12;

/// Largest value written to the speaker line.
pub const OUTPUT_MAX: u16 = (1 << OUTPUT_BITS) - 1;

/// Largest value stored in a sound table.
pub const SAMPLE_MAX: u8 = u8::MAX;

/// Amplifier settle time before the first and after the last sample.
pub const GUARD_DELAY_US: u32 = 50;

/// Player wiring and timing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerConfig {
    /// GPIO driving the amplifier enable (shutdown) input.
    pub amp_enable_pin: i32,
    /// GPIO carrying the analog speaker signal.
    pub speaker_pin: i32,
    /// Guard delay around a session in microseconds.
    pub guard_us: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            amp_enable_pin: 5,
            speaker_pin: 25,
            guard_us: GUARD_DELAY_US,
        }
    }
}
