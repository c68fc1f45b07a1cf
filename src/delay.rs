//! Blocking delays built on the tick countdown.
//!
//! There is one countdown, so only one delay can be outstanding. A second
//! caller (say, an interrupt handler calling [`delay_ms`] while main-line code
//! is already waiting) overwrites the first caller's remaining ticks; the
//! delay is not reentrant. Delays cannot be cancelled.
//!
//! Never wait from an interrupt handler at or above the tick's priority: the
//! tick could not fire and the spin would never end.

use crate::error::BspError;
use crate::tick::TickSource;
use embedded_hal::delay::DelayNs;

const NANOS_PER_MILLI: u32 = 1_000_000;
const MICROS_PER_MILLI: u32 = 1_000;

/// Busy-waits for `ms` ticks of `ticks`.
///
/// Arms the countdown and spins until the tick interrupt has brought it to
/// zero. Interrupts stay enabled throughout. `ms == 0` returns at once.
///
/// # Errors
/// * `ConfigurationPrecondition` - the tick source was never started, so no
///   interrupt exists to end the wait
pub fn delay_ms(ticks: &TickSource, ms: u32) -> Result<(), BspError> {
    if !ticks.is_running() {
        #[cfg(feature = "defmt")]
        defmt::error!("delay_ms({}) before tick source started", ms);
        return Err(BspError::ConfigurationPrecondition);
    }

    if ms == 0 {
        return Ok(());
    }

    ticks.arm(ms);
    // Exit condition is a single atomic load per iteration.
    while ticks.remaining() != 0 {
        core::hint::spin_loop();
    }

    Ok(())
}

/// [`DelayNs`] provider backed by a running [`TickSource`].
///
/// Resolution is one tick. Sub-millisecond requests round up to the next
/// whole tick, so a wait is never shorter than asked.
pub struct TickDelay<'t> {
    ticks: &'t TickSource,
}

impl<'t> TickDelay<'t> {
    /// Creates a delay provider.
    ///
    /// # Errors
    /// * `ConfigurationPrecondition` - the tick source is not running
    pub fn new(ticks: &'t TickSource) -> Result<Self, BspError> {
        if !ticks.is_running() {
            return Err(BspError::ConfigurationPrecondition);
        }
        Ok(Self { ticks })
    }

    pub(crate) fn started(ticks: &'t TickSource) -> Self {
        debug_assert!(ticks.is_running());
        Self { ticks }
    }

    fn wait(&mut self, ms: u32) {
        // Cannot fail: `new` checked the source is running and it never stops.
        let _ = delay_ms(self.ticks, ms);
    }
}

impl DelayNs for TickDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.wait(ns.div_ceil(NANOS_PER_MILLI));
    }

    fn delay_us(&mut self, us: u32) {
        self.wait(us.div_ceil(MICROS_PER_MILLI));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.wait(ms);
    }
}
