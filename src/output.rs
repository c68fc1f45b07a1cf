//! LED output driver with on/off, toggle and PWM brightness control.
//!
//! Each LED is a [`LedChannel`] pairing a GPIO output (for on/off/toggle)
//! with a PWM channel (for brightness). The driver owns its four channels
//! for the life of the program. LEDs are named by identifier `0..LED_COUNT`;
//! anything else is rejected with `InvalidChannel` before any hardware is
//! touched.
//!
//! The PWM peripheral must have compare-register preload enabled so a new
//! duty cycle takes effect at the next period boundary rather than mid-cycle.
//! That is part of the board's start-up configuration, not of this driver.

use crate::config::BrightnessPolicy;
use crate::error::BspError;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::StatefulOutputPin;
use embedded_hal::pwm::SetDutyCycle;

/// Number of LEDs on the board.
pub const LED_COUNT: usize = 4;

/// Maximum brightness in percent.
pub const FULL_BRIGHTNESS: u8 = 100;

/// Maps a percentage to a duty cycle: `period * percent / 100`, floored.
///
/// `percent` must already be within `0..=100`.
#[inline]
pub fn duty_for(period: u16, percent: u8) -> u16 {
    debug_assert!(percent <= FULL_BRIGHTNESS);
    // Fits: period * 100 / 100 <= u16::MAX.
    (u32::from(period) * u32::from(percent) / u32::from(FULL_BRIGHTNESS)) as u16
}

/// Hardware bindings of one LED.
pub struct LedChannel<P, D> {
    pin: P,
    pwm: D,
}

impl<P, D> LedChannel<P, D> {
    /// Binds an output pin and a PWM channel.
    pub fn new(pin: P, pwm: D) -> Self {
        Self { pin, pwm }
    }

    /// The bound output pin.
    pub fn pin(&self) -> &P {
        &self.pin
    }

    /// The bound PWM channel.
    pub fn pwm(&self) -> &D {
        &self.pwm
    }

    /// Splits the channel back into its pin and PWM channel.
    pub fn release(self) -> (P, D) {
        (self.pin, self.pwm)
    }
}

/// Drives the board's LEDs.
///
/// # Type Parameters
/// * `P` - Output pin type (all four LEDs share one type, e.g. an erased pin)
/// * `D` - PWM channel type
pub struct OutputDriver<P, D> {
    channels: [LedChannel<P, D>; LED_COUNT],
    levels: [u8; LED_COUNT],
    policy: BrightnessPolicy,
}

impl<P, D> OutputDriver<P, D>
where
    P: StatefulOutputPin,
    D: SetDutyCycle,
{
    /// Creates a driver over already-configured channels.
    ///
    /// Hardware is left as configured. The cached brightness of every LED
    /// starts at zero.
    pub fn new(channels: [LedChannel<P, D>; LED_COUNT], policy: BrightnessPolicy) -> Self {
        Self {
            channels,
            levels: [0; LED_COUNT],
            policy,
        }
    }

    /// Drives the LED's pin high.
    pub fn turn_on(&mut self, led: u8) -> Result<(), BspError> {
        self.channel(led)?
            .pin
            .set_high()
            .map_err(|_| BspError::OutputFault)
    }

    /// Drives the LED's pin low.
    pub fn turn_off(&mut self, led: u8) -> Result<(), BspError> {
        self.channel(led)?
            .pin
            .set_low()
            .map_err(|_| BspError::OutputFault)
    }

    /// Inverts the LED's pin.
    pub fn toggle(&mut self, led: u8) -> Result<(), BspError> {
        self.channel(led)?
            .pin
            .toggle()
            .map_err(|_| BspError::OutputFault)
    }

    /// Returns true if the LED's pin is latched high.
    pub fn is_on(&mut self, led: u8) -> Result<bool, BspError> {
        self.channel(led)?
            .pin
            .is_set_high()
            .map_err(|_| BspError::OutputFault)
    }

    /// Drives every LED's pin low.
    pub fn all_off(&mut self) -> Result<(), BspError> {
        for channel in &mut self.channels {
            channel.pin.set_low().map_err(|_| BspError::OutputFault)?;
        }
        Ok(())
    }

    /// Turns the LED on, waits `ms` milliseconds, and turns it off.
    pub fn pulse(
        &mut self,
        led: u8,
        delay: &mut impl DelayNs,
        ms: u32,
    ) -> Result<(), BspError> {
        self.turn_on(led)?;
        delay.delay_ms(ms);
        self.turn_off(led)
    }

    /// Sets the LED's brightness in percent.
    ///
    /// Writes `period * percent / 100` to the LED's PWM channel, where
    /// `period` is the channel's maximum duty cycle. Values above 100 are
    /// saturated or rejected according to the driver's [`BrightnessPolicy`];
    /// a rejected request leaves the hardware untouched.
    ///
    /// # Errors
    /// * `InvalidChannel` - `led` does not name an LED
    /// * `BrightnessOutOfRange` - `percent > 100` under `Reject`
    /// * `OutputFault` - the PWM channel refused the write
    pub fn set_brightness(&mut self, led: u8, percent: u8) -> Result<(), BspError> {
        let index = Self::index(led)?;
        let percent = self.admit(percent)?;
        let channel = &mut self.channels[index];

        let duty = duty_for(channel.pwm.max_duty_cycle(), percent);
        channel
            .pwm
            .set_duty_cycle(duty)
            .map_err(|_| BspError::OutputFault)?;

        self.levels[index] = percent;
        Ok(())
    }

    /// Last brightness applied to the LED, after saturation.
    pub fn brightness(&self, led: u8) -> Result<u8, BspError> {
        let index = Self::index(led)?;
        Ok(self.levels[index])
    }

    /// The policy applied to out-of-range brightness.
    pub fn policy(&self) -> BrightnessPolicy {
        self.policy
    }

    /// The LED channels, in identifier order.
    pub fn channels(&self) -> &[LedChannel<P, D>; LED_COUNT] {
        &self.channels
    }

    /// Consumes the driver and returns its channels.
    pub fn release(self) -> [LedChannel<P, D>; LED_COUNT] {
        self.channels
    }

    fn admit(&self, percent: u8) -> Result<u8, BspError> {
        if percent <= FULL_BRIGHTNESS {
            return Ok(percent);
        }
        match self.policy {
            BrightnessPolicy::Saturate => Ok(FULL_BRIGHTNESS),
            BrightnessPolicy::Reject => {
                #[cfg(feature = "defmt")]
                defmt::warn!("brightness {}% rejected", percent);
                Err(BspError::BrightnessOutOfRange(percent))
            }
        }
    }

    fn channel(&mut self, led: u8) -> Result<&mut LedChannel<P, D>, BspError> {
        let index = Self::index(led)?;
        Ok(&mut self.channels[index])
    }

    fn index(led: u8) -> Result<usize, BspError> {
        let index = usize::from(led);
        if index < LED_COUNT {
            Ok(index)
        } else {
            #[cfg(feature = "defmt")]
            defmt::warn!("invalid LED identifier {}", led);
            Err(BspError::InvalidChannel)
        }
    }
}
