//! Pending-flag abstraction for the board's interrupt lines.

/// A peripheral interrupt line with a software-visible pending flag.
///
/// Implement this for the timer update flag and the EXTI line the button is
/// wired to. Handlers check the flag, clear it exactly once, then do their
/// work, so an entry without the flag set (spurious or shared vector) has no
/// effect.
pub trait PendingFlag {
    /// Returns true if the line has a pending, unacknowledged event.
    fn is_pending(&mut self) -> bool;

    /// Acknowledges the pending event.
    fn clear_pending(&mut self);
}

/// Checks and acknowledges `line`, returning true if an event was pending.
#[inline]
pub(crate) fn acknowledge<F: PendingFlag + ?Sized>(line: &mut F) -> bool {
    if line.is_pending() {
        line.clear_pending();
        true
    } else {
        false
    }
}
