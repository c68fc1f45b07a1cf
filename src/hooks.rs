//! Application callback slots invoked from interrupt context.
//!
//! A [`HookSlot`] holds an optional plain function pointer. The board
//! registers the application's handlers once during start-up; the interrupt
//! handlers then call [`HookSlot::invoke`] on every event.
//!
//! # Hook contract
//!
//! A hook runs inside an interrupt handler. It must return quickly, must not
//! block or busy-wait (a hook that waits on the tick would never see it
//! advance), and must not allocate. It takes no arguments and returns nothing,
//! so any error it meets is its own to handle or suppress.

use core::cell::Cell;
use critical_section::Mutex;

/// Signature of an application hook.
pub type Hook = fn();

/// A single registered-callback slot shared between main-line code and an
/// interrupt handler.
pub struct HookSlot {
    hook: Mutex<Cell<Option<Hook>>>,
}

impl HookSlot {
    /// Creates an empty slot. Usable in `static` initializers.
    pub const fn new() -> Self {
        Self {
            hook: Mutex::new(Cell::new(None)),
        }
    }

    /// Registers `hook`, replacing any previously registered one.
    pub fn register(&self, hook: Hook) {
        critical_section::with(|cs| self.hook.borrow(cs).set(Some(hook)));
    }

    /// Removes the registered hook, if any.
    pub fn clear(&self) {
        critical_section::with(|cs| self.hook.borrow(cs).set(None));
    }

    /// Returns true if a hook is registered.
    pub fn is_registered(&self) -> bool {
        critical_section::with(|cs| self.hook.borrow(cs).get().is_some())
    }

    /// Calls the registered hook once. Does nothing when the slot is empty.
    ///
    /// The hook is copied out under a critical section and then called with
    /// interrupts in their prior state, so a long hook does not extend the
    /// critical section.
    #[inline]
    pub fn invoke(&self) {
        let hook = critical_section::with(|cs| self.hook.borrow(cs).get());
        if let Some(hook) = hook {
            hook();
        }
    }
}

impl Default for HookSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// The application's two interrupt-context handlers, registered together at
/// start-up.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppHooks {
    /// Called once per millisecond tick.
    pub on_tick: Option<Hook>,
    /// Called once per serviced button edge.
    pub on_button_edge: Option<Hook>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicU32, Ordering};

    static CALLS: AtomicU32 = AtomicU32::new(0);

    fn count_call() {
        CALLS.fetch_add(1, Ordering::Relaxed);
    }

    #[test]
    fn empty_slot_invokes_nothing() {
        let slot = HookSlot::new();
        assert!(!slot.is_registered());
        slot.invoke();
    }

    #[test]
    fn registered_hook_runs_once_per_invoke_until_cleared() {
        let slot = HookSlot::new();
        slot.register(count_call);
        assert!(slot.is_registered());

        slot.invoke();
        slot.invoke();
        assert_eq!(CALLS.load(Ordering::Relaxed), 2);

        slot.clear();
        slot.invoke();
        assert_eq!(CALLS.load(Ordering::Relaxed), 2);
    }
}
