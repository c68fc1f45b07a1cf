//! Millisecond time types for the tick counter.
//!
//! The counter is a wrapping `u32`, so instants are only meaningful relative
//! to each other. Use [`elapsed`] rather than `Instant - Instant` when the two
//! readings may straddle a wrap.

/// Tick rate of the time base in hertz.
pub const TICK_HZ: u32 = 1_000;

/// A reading of the millisecond counter.
pub type Instant = fugit::TimerInstantU32<TICK_HZ>;

/// A span of whole milliseconds.
pub type Duration = fugit::TimerDurationU32<TICK_HZ>;

/// Time from `earlier` to `later`, correct across one counter wrap.
#[inline]
pub fn elapsed(earlier: Instant, later: Instant) -> Duration {
    Duration::from_ticks(later.ticks().wrapping_sub(earlier.ticks()))
}

/// Returns true once `now` is at or past `start + timeout`.
#[inline]
pub fn has_elapsed(start: Instant, now: Instant, timeout: Duration) -> bool {
    elapsed(start, now).ticks() >= timeout.ticks()
}
