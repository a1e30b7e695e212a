//! Hardware Abstraction Layer for sfx-player.
//!
//! Thin capability interface over the two speaker lines and the clock.
//! Playback logic stays in [`crate::player`], HAL is just I/O.
//!
//! Implementations:
//! - [`SimHal`]: simulated clock and event recorder (host, tests)
//! - `EspSpeakerHal`: GPIO + LEDC on ESP-IDF targets

use crate::error::HalError;

pub mod sim;

#[cfg(target_os = "espidf")]
pub mod esp;

pub use sim::{HalEvent, HalEventKind, SimHal};

#[cfg(target_os = "espidf")]
pub use esp::EspSpeakerHal;

/// Opaque platform line identifier (GPIO number on ESP-IDF).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineId(pub i32);

impl LineId {
    /// Raw platform identifier.
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }
}

/// Digital line level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    #[inline]
    pub fn is_high(self) -> bool {
        self == Level::High
    }
}

/// How a line is prepared by `configure_output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSetup {
    /// Plain GPIO: reset the pin, then set it as an output.
    Gpio,
    /// Already routed to a peripheral output (PWM). Any GPIO direction or
    /// reset call re-routes the pin to the GPIO signal and detaches it.
    Peripheral,
}

/// Decide how to configure `line` when `peripheral_line` is bound to a
/// peripheral output signal.
pub fn output_setup(line: LineId, peripheral_line: LineId) -> Result<OutputSetup, HalError> {
    if line.raw() < 0 {
        return Err(HalError::InvalidLine(line.raw()));
    }
    if line == peripheral_line {
        Ok(OutputSetup::Peripheral)
    } else {
        Ok(OutputSetup::Gpio)
    }
}

/// Hardware capabilities needed by the playback loop.
///
/// # Contract
///
/// - `now_us` is monotonic and wraps at `u32::MAX` like a free-running
///   microsecond counter; callers compare with `wrapping_sub`.
/// - `delay_us` blocks for at least the requested time and cannot fail.
/// - Writes are applied in call order.
pub trait SpeakerHal {
    /// Configure a line as an output.
    fn configure_output(&mut self, line: LineId) -> Result<(), HalError>;

    /// Drive a digital level on a line.
    fn write_digital(&mut self, line: LineId, level: Level) -> Result<(), HalError>;

    /// Write a 12-bit value (0..=4095) to an analog line.
    fn write_analog(&mut self, line: LineId, value: u16) -> Result<(), HalError>;

    /// Current time in microseconds.
    fn now_us(&self) -> u32;

    /// Busy-wait for `us` microseconds.
    fn delay_us(&mut self, us: u32);
}

impl<H: SpeakerHal + ?Sized> SpeakerHal for &mut H {
    #[inline]
    fn configure_output(&mut self, line: LineId) -> Result<(), HalError> {
        (**self).configure_output(line)
    }

    #[inline]
    fn write_digital(&mut self, line: LineId, level: Level) -> Result<(), HalError> {
        (**self).write_digital(line, level)
    }

    #[inline]
    fn write_analog(&mut self, line: LineId, value: u16) -> Result<(), HalError> {
        (**self).write_analog(line, value)
    }

    #[inline]
    fn now_us(&self) -> u32 {
        (**self).now_us()
    }

    #[inline]
    fn delay_us(&mut self, us: u32) {
        (**self).delay_us(us)
    }
}
