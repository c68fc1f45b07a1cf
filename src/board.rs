//! Board bring-up: validates the configuration, registers the application
//! hooks and starts the time base.
//!
//! [`Board::new`] is called once, after the HAL has run the register-level
//! start-up for the LEDs, button, tick timer and accelerometer bus.

use crate::accel::{Accelerometer, FullScale, RawAxisSource};
use crate::config::BoardConfig;
use crate::delay::{self, TickDelay};
use crate::error::BspError;
use crate::hooks::{AppHooks, Hook, HookSlot};
use crate::input::{Button, EdgeHandler};
use crate::output::{LED_COUNT, LedChannel, OutputDriver};
use crate::tick::TickSource;
use crate::time::Instant;
use embedded_hal::digital::{InputPin, StatefulOutputPin};
use embedded_hal::pwm::SetDutyCycle;

/// Configured peripherals handed to [`Board::new`].
pub struct Peripherals<P, D, B, S> {
    /// LED channels in identifier order.
    pub leds: [LedChannel<P, D>; LED_COUNT],
    /// User button input pin.
    pub button: B,
    /// Accelerometer raw-axis source.
    pub accel: S,
    /// Range the accelerometer is set to.
    pub accel_scale: FullScale,
}

/// The board: drivers for main-line code plus the shared interrupt state.
///
/// # Type Parameters
/// * `'t` - Lifetime of the interrupt-shared state (usually `'static`)
/// * `P` - LED output pin type
/// * `D` - LED PWM channel type
/// * `B` - Button input pin type
/// * `S` - Accelerometer raw-axis source type
pub struct Board<'t, P, D, B, S> {
    pub leds: OutputDriver<P, D>,
    pub button: Button<B>,
    pub accel: Accelerometer<S>,
    ticks: &'t TickSource,
    edges: &'t EdgeHandler,
    config: BoardConfig,
}

impl<'t, P, D, B, S> Board<'t, P, D, B, S>
where
    P: StatefulOutputPin,
    D: SetDutyCycle,
    B: InputPin,
    S: RawAxisSource,
{
    /// Brings the board up.
    ///
    /// Validates `config`, installs `hooks` on the tick source and edge
    /// handler, then marks the tick source as running. Hooks are installed
    /// before the tick starts so the first tick already sees them. A `None`
    /// hook clears any earlier registration in that slot.
    ///
    /// # Errors
    /// * `ConfigurationPrecondition` - `config` fails validation; nothing is
    ///   registered or started
    pub fn new(
        config: BoardConfig,
        ticks: &'t TickSource,
        edges: &'t EdgeHandler,
        hooks: AppHooks,
        peripherals: Peripherals<P, D, B, S>,
    ) -> Result<Self, BspError> {
        if let Err(err) = config.validate() {
            #[cfg(feature = "defmt")]
            defmt::error!("board configuration rejected: {}", config);
            return Err(err);
        }

        install(ticks.on_tick(), hooks.on_tick);
        install(edges.on_edge(), hooks.on_button_edge);
        ticks.start();

        #[cfg(feature = "defmt")]
        defmt::info!(
            "board up: tick {} Hz, priorities tick={} button={}",
            config.tick_timer.tick_hz(),
            config.priorities.tick,
            config.priorities.button
        );

        Ok(Self {
            leds: OutputDriver::new(peripherals.leds, config.brightness_policy),
            button: Button::new(peripherals.button),
            accel: Accelerometer::new(peripherals.accel, peripherals.accel_scale),
            ticks,
            edges,
            config,
        })
    }

    /// Busy-waits `ms` milliseconds on the tick countdown.
    pub fn delay_ms(&self, ms: u32) -> Result<(), BspError> {
        delay::delay_ms(self.ticks, ms)
    }

    /// A [`DelayNs`](embedded_hal::delay::DelayNs) provider on the board's
    /// tick, for drivers that take one.
    pub fn delay(&self) -> TickDelay<'t> {
        TickDelay::started(self.ticks)
    }

    /// Current time since start-up.
    pub fn now(&self) -> Instant {
        self.ticks.now()
    }

    /// The shared time base.
    pub fn ticks(&self) -> &'t TickSource {
        self.ticks
    }

    /// The shared button edge state.
    pub fn edges(&self) -> &'t EdgeHandler {
        self.edges
    }

    /// The configuration the board was brought up with.
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }
}

fn install(slot: &HookSlot, hook: Option<Hook>) {
    match hook {
        Some(hook) => slot.register(hook),
        None => slot.clear(),
    }
}
