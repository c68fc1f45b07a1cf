//! The 1 ms time base.
//!
//! Provides [`TickSource`], the state shared between the periodic timer
//! interrupt and main-line code: a free-running millisecond counter, the
//! countdown used by [`delay`](crate::delay), and the on-tick hook slot.
//!
//! # Sharing discipline
//!
//! Both cells are `AtomicU32` and are only ever accessed with plain `load`
//! and `store`, never read-modify-write, so the same code runs on ARMv6-M
//! parts that lack atomic RMW instructions. The counter width must not exceed
//! the platform's tear-free access width; 32 bits is tear-free on every
//! Cortex-M.
//!
//! - `millis` has exactly one writer: [`TickSource::on_interrupt`].
//! - `countdown` is written by [`TickSource::arm`] from main-line code and
//!   then by the interrupt. On a single core the interrupt's load/store pair
//!   cannot be interleaved by main-line code. A second writer in another
//!   interrupt or core would need explicit synchronization.

use crate::hooks::HookSlot;
use crate::interrupt::{PendingFlag, acknowledge};
use crate::time::{Duration, Instant, elapsed};
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Whether a blocking delay is currently counting down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickState {
    /// Countdown is zero. No delay outstanding.
    Idle,
    /// Countdown is non-zero. A delay is waiting on it.
    Counting,
}

/// Millisecond time base driven by a periodic timer interrupt.
///
/// Place one in a `static` and call [`on_interrupt`](Self::on_interrupt) (or
/// [`service`](Self::service)) from the timer's interrupt handler:
///
/// ```ignore
/// static TICKS: TickSource = TickSource::new();
///
/// #[interrupt]
/// fn TIM2() {
///     TICKS.service(&mut Tim2Update);
/// }
/// ```
pub struct TickSource {
    millis: AtomicU32,
    countdown: AtomicU32,
    running: AtomicBool,
    on_tick: HookSlot,
}

impl TickSource {
    /// Creates a stopped time base with the counter at zero.
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    /// Creates a stopped time base with the counter at `millis`.
    pub const fn starting_at(millis: u32) -> Self {
        Self {
            millis: AtomicU32::new(millis),
            countdown: AtomicU32::new(0),
            running: AtomicBool::new(false),
            on_tick: HookSlot::new(),
        }
    }

    /// Records that the timer peripheral has been configured and its
    /// interrupt enabled. Blocking delays are refused until this is called.
    pub fn start(&self) {
        self.running.store(true, Ordering::Release);
    }

    /// Returns true once [`start`](Self::start) has been called.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Advances the time base by one tick. Call once per timer interrupt.
    ///
    /// Increments the counter (wrapping), decrements a non-zero countdown,
    /// then invokes the on-tick hook. The hook always runs, and always after
    /// both updates for this tick are visible.
    #[inline]
    pub fn on_interrupt(&self) {
        let now = self.millis.load(Ordering::Relaxed);
        self.millis.store(now.wrapping_add(1), Ordering::Relaxed);

        let remaining = self.countdown.load(Ordering::Acquire);
        if remaining != 0 {
            self.countdown.store(remaining - 1, Ordering::Release);
        }

        self.on_tick.invoke();
    }

    /// Interrupt entry point that checks and clears the timer's update flag
    /// before ticking. Returns true if a tick was taken.
    #[inline]
    pub fn service<F: PendingFlag + ?Sized>(&self, update: &mut F) -> bool {
        if acknowledge(update) {
            self.on_interrupt();
            true
        } else {
            false
        }
    }

    /// Raw counter value: milliseconds since boot, modulo 2^32.
    #[inline]
    pub fn millis(&self) -> u32 {
        self.millis.load(Ordering::Relaxed)
    }

    /// Current reading of the counter as an [`Instant`].
    #[inline]
    pub fn now(&self) -> Instant {
        Instant::from_ticks(self.millis())
    }

    /// Time since `earlier`, correct across a counter wrap.
    pub fn elapsed_since(&self, earlier: Instant) -> Duration {
        elapsed(earlier, self.now())
    }

    /// Ticks left on the outstanding delay, zero when idle.
    #[inline]
    pub fn remaining(&self) -> u32 {
        self.countdown.load(Ordering::Acquire)
    }

    /// Whether a delay is counting down.
    pub fn state(&self) -> TickState {
        if self.remaining() == 0 {
            TickState::Idle
        } else {
            TickState::Counting
        }
    }

    /// Loads the countdown with `ticks`, overwriting any outstanding value.
    #[inline]
    pub(crate) fn arm(&self, ticks: u32) {
        self.countdown.store(ticks, Ordering::Release);
    }

    /// The slot invoked once per tick from interrupt context.
    pub fn on_tick(&self) -> &HookSlot {
        &self.on_tick
    }
}

impl Default for TickSource {
    fn default() -> Self {
        Self::new()
    }
}
