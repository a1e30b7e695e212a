//! ESP-IDF speaker HAL.
//!
//! - Amplifier enable: plain GPIO output
//! - Speaker: LEDC PWM at 12-bit duty resolution (RC-filtered on the board)
//! - Clock: `esp_timer_get_time`, truncated to a wrapping u32
//! - Delay: ROM busy-wait, never yields to the scheduler

use esp_idf_svc::sys;

use super::{output_setup, Level, LineId, OutputSetup, SpeakerHal};
use crate::error::HalError;

/// LEDC carrier frequency: APB 80 MHz / 4096 steps.
const LEDC_FREQ_HZ: u32 = 19_531;

const LEDC_MODE: sys::ledc_mode_t = sys::ledc_mode_t_LEDC_LOW_SPEED_MODE;
const LEDC_TIMER: sys::ledc_timer_t = sys::ledc_timer_t_LEDC_TIMER_0;
const LEDC_CHANNEL: sys::ledc_channel_t = sys::ledc_channel_t_LEDC_CHANNEL_0;

#[inline]
fn check(code: sys::esp_err_t, err: fn(i32) -> HalError) -> Result<(), HalError> {
    if code == sys::ESP_OK as sys::esp_err_t {
        Ok(())
    } else {
        Err(err(code))
    }
}

/// Speaker HAL backed by ESP-IDF drivers.
pub struct EspSpeakerHal {
    analog_line: LineId,
}

impl EspSpeakerHal {
    /// Bind the LEDC channel to `analog_line`, duty 0.
    pub fn new(analog_line: LineId) -> Result<Self, HalError> {
        if analog_line.raw() < 0 {
            return Err(HalError::InvalidLine(analog_line.raw()));
        }

        let timer = sys::ledc_timer_config_t {
            speed_mode: LEDC_MODE,
            duty_resolution: sys::ledc_timer_bit_t_LEDC_TIMER_12_BIT,
            timer_num: LEDC_TIMER,
            freq_hz: LEDC_FREQ_HZ,
            ..Default::default()
        };
        // SAFETY: config struct is fully initialized and outlives the call.
        check(unsafe { sys::ledc_timer_config(&timer) }, HalError::Analog)?;

        let channel = sys::ledc_channel_config_t {
            gpio_num: analog_line.raw(),
            speed_mode: LEDC_MODE,
            channel: LEDC_CHANNEL,
            intr_type: sys::ledc_intr_type_t_LEDC_INTR_DISABLE,
            timer_sel: LEDC_TIMER,
            duty: 0,
            hpoint: 0,
            ..Default::default()
        };
        // SAFETY: as above.
        check(unsafe { sys::ledc_channel_config(&channel) }, HalError::Analog)?;

        Ok(Self { analog_line })
    }
}

impl SpeakerHal for EspSpeakerHal {
    fn configure_output(&mut self, line: LineId) -> Result<(), HalError> {
        match output_setup(line, self.analog_line)? {
            // ledc_channel_config in new() already made the pin an output
            OutputSetup::Peripheral => Ok(()),
            OutputSetup::Gpio => {
                // SAFETY: pin number validated by output_setup; driver checks range.
                check(unsafe { sys::gpio_reset_pin(line.raw()) }, HalError::Gpio)?;
                // SAFETY: as above.
                check(
                    unsafe {
                        sys::gpio_set_direction(line.raw(), sys::gpio_mode_t_GPIO_MODE_OUTPUT)
                    },
                    HalError::Gpio,
                )
            }
        }
    }

    #[inline]
    fn write_digital(&mut self, line: LineId, level: Level) -> Result<(), HalError> {
        // SAFETY: gpio_set_level is ISR-safe and range-checked by the driver.
        check(
            unsafe { sys::gpio_set_level(line.raw(), level.is_high() as u32) },
            HalError::Gpio,
        )
    }

    #[inline]
    fn write_analog(&mut self, line: LineId, value: u16) -> Result<(), HalError> {
        if line != self.analog_line {
            return Err(HalError::InvalidLine(line.raw()));
        }
        // SAFETY: channel configured in new().
        unsafe {
            check(sys::ledc_set_duty(LEDC_MODE, LEDC_CHANNEL, value as u32), HalError::Analog)?;
            check(sys::ledc_update_duty(LEDC_MODE, LEDC_CHANNEL), HalError::Analog)
        }
    }

    #[inline]
    fn now_us(&self) -> u32 {
        // SAFETY: esp_timer_get_time is always safe to call
        unsafe { sys::esp_timer_get_time() as u32 }
    }

    #[inline]
    fn delay_us(&mut self, us: u32) {
        // SAFETY: ROM busy-wait, no preconditions
        unsafe { sys::esp_rom_delay_us(us) }
    }
}
