//! Board configuration contract.
//!
//! The register-level start-up sequence (clock enables, pin muxing, NVIC
//! setup) is done by the HAL before the core is used. These types describe
//! what that sequence must produce so it can be checked once in
//! [`Board::new`](crate::board::Board::new). Defaults match the
//! STM32F4-Discovery wiring.

use crate::error::BspError;
use crate::time::TICK_HZ;

/// What to do with a brightness request above 100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BrightnessPolicy {
    /// Treat anything above 100% as 100%.
    #[default]
    Saturate,
    /// Refuse the request with `BrightnessOutOfRange`.
    Reject,
}

/// Tick timer time base: `timer_clock_hz / (prescaler + 1) / period`.
///
/// `prescaler` is the register value, so the clock is divided by
/// `prescaler + 1`. The update interrupt fires once per `period` counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickTimerConfig {
    pub timer_clock_hz: u32,
    pub prescaler: u16,
    pub period: u32,
}

impl TickTimerConfig {
    /// TIM2 on the Discovery: 16 MHz clock, divided to 1 MHz, 1000 counts.
    pub const DISCOVERY: Self = Self {
        timer_clock_hz: 16_000_000,
        prescaler: 15,
        period: 1_000,
    };

    /// Derives a configuration with a 1 MHz counter clock for `tick_hz`.
    ///
    /// Returns `None` if the clock is not a whole multiple of 1 MHz, or the
    /// resulting prescaler or period does not fit the registers.
    pub fn for_tick_rate(timer_clock_hz: u32, tick_hz: u32) -> Option<Self> {
        const COUNTER_HZ: u32 = 1_000_000;

        if tick_hz == 0 || timer_clock_hz % COUNTER_HZ != 0 || COUNTER_HZ % tick_hz != 0 {
            return None;
        }

        let divider = timer_clock_hz / COUNTER_HZ;
        let prescaler = u16::try_from(divider.checked_sub(1)?).ok()?;

        Some(Self {
            timer_clock_hz,
            prescaler,
            period: COUNTER_HZ / tick_hz,
        })
    }

    /// Update-interrupt rate, or `None` if the time base does not divide
    /// evenly.
    pub fn tick_hz(&self) -> Option<u32> {
        let counter_hz = self.timer_clock_hz / (u32::from(self.prescaler) + 1);
        if self.period == 0 || counter_hz % self.period != 0 {
            return None;
        }
        Some(counter_hz / self.period)
    }

    /// Checks that the time base yields exactly one tick per millisecond.
    pub fn validate(&self) -> Result<(), BspError> {
        match self.tick_hz() {
            Some(TICK_HZ) => Ok(()),
            _ => Err(BspError::ConfigurationPrecondition),
        }
    }
}

impl Default for TickTimerConfig {
    fn default() -> Self {
        Self::DISCOVERY
    }
}

/// NVIC preemption priorities. Lower numbers are more urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptPriorities {
    pub tick: u8,
    pub button: u8,
}

impl InterruptPriorities {
    /// The tick must preempt the button handler, or a button hook that
    /// waits would hang and the time base would drift.
    pub fn validate(&self) -> Result<(), BspError> {
        if self.tick < self.button {
            Ok(())
        } else {
            Err(BspError::ConfigurationPrecondition)
        }
    }
}

impl Default for InterruptPriorities {
    fn default() -> Self {
        Self { tick: 0, button: 1 }
    }
}

/// GPIO port letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    A,
    B,
    C,
    D,
    E,
}

/// A port/pin pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId {
    pub port: Port,
    pub pin: u8,
}

impl PinId {
    pub const fn new(port: Port, pin: u8) -> Self {
        Self { port, pin }
    }
}

/// Input line pull resistor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    None,
    Up,
    Down,
}

/// Board wiring. Identifier `n` of the output driver is `leds[n]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinMap {
    pub leds: [PinId; 4],
    pub button: PinId,
    pub button_pull: Pull,
}

impl PinMap {
    pub const GREEN: PinId = PinId::new(Port::D, 12);
    pub const ORANGE: PinId = PinId::new(Port::D, 13);
    pub const RED: PinId = PinId::new(Port::D, 14);
    pub const BLUE: PinId = PinId::new(Port::D, 15);
    pub const USER_BUTTON: PinId = PinId::new(Port::A, 0);

    /// Discovery board: LED 0 green, 1 red, 2 orange, 3 blue; user button on
    /// PA0, active high with pull-down.
    pub const DISCOVERY: Self = Self {
        leds: [Self::GREEN, Self::RED, Self::ORANGE, Self::BLUE],
        button: Self::USER_BUTTON,
        button_pull: Pull::Down,
    };

    /// Rejects wiring that binds two LEDs, or an LED and the button, to the
    /// same pin.
    pub fn validate(&self) -> Result<(), BspError> {
        for (i, led) in self.leds.iter().enumerate() {
            if *led == self.button || self.leds[i + 1..].contains(led) {
                return Err(BspError::ConfigurationPrecondition);
            }
        }
        Ok(())
    }
}

impl Default for PinMap {
    fn default() -> Self {
        Self::DISCOVERY
    }
}

/// Everything the core assumes about the board's start-up configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardConfig {
    pub tick_timer: TickTimerConfig,
    pub priorities: InterruptPriorities,
    pub pins: PinMap,
    pub brightness_policy: BrightnessPolicy,
}

impl BoardConfig {
    /// Checks every part of the configuration.
    ///
    /// # Errors
    /// * `ConfigurationPrecondition` - the first violated requirement
    pub fn validate(&self) -> Result<(), BspError> {
        self.tick_timer.validate()?;
        self.priorities.validate()?;
        self.pins.validate()
    }
}
