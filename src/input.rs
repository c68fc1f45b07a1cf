//! Push-button input: level reads and the rising-edge interrupt.
//!
//! The button line raises an interrupt on each rising edge. The handler
//! acknowledges the line's pending flag exactly once and then calls the
//! on-edge hook. There is no debouncing: a bouncing contact produces several
//! edges and the hook runs for each of them. Hooks that need a single event
//! per press must filter by time themselves.

use crate::error::BspError;
use crate::hooks::HookSlot;
use crate::interrupt::{PendingFlag, acknowledge};
use core::sync::atomic::{AtomicU32, Ordering};
use embedded_hal::digital::InputPin;

/// The user push-button line.
pub struct Button<P> {
    pin: P,
}

impl<P: InputPin> Button<P> {
    /// Wraps an already-configured input pin.
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Instantaneous level of the line: true while the button is pressed on
    /// an active-high wiring.
    ///
    /// # Errors
    /// * `SensorReadFailure` - the pin driver could not read the line
    pub fn current_level(&mut self) -> Result<bool, BspError> {
        self.pin.is_high().map_err(|_| BspError::SensorReadFailure)
    }

    /// Consumes the button and returns its pin.
    pub fn release(self) -> P {
        self.pin
    }
}

/// Rising-edge interrupt state for the button line.
///
/// Lives in a `static` shared with the EXTI handler:
///
/// ```ignore
/// static BUTTON_EDGE: EdgeHandler = EdgeHandler::new();
///
/// #[interrupt]
/// fn EXTI0() {
///     BUTTON_EDGE.on_interrupt(&mut Exti0);
/// }
/// ```
pub struct EdgeHandler {
    on_edge: HookSlot,
    // Written only by `on_interrupt`.
    edges: AtomicU32,
}

impl EdgeHandler {
    /// Creates a handler with no hook and a zero edge count.
    pub const fn new() -> Self {
        Self {
            on_edge: HookSlot::new(),
            edges: AtomicU32::new(0),
        }
    }

    /// Services one entry of the edge interrupt.
    ///
    /// If `line` has a pending edge, clears it, counts it and invokes the
    /// on-edge hook, in that order, and returns true. Otherwise touches
    /// nothing and returns false.
    pub fn on_interrupt<F: PendingFlag + ?Sized>(&self, line: &mut F) -> bool {
        if !acknowledge(line) {
            return false;
        }

        let count = self.edges.load(Ordering::Relaxed);
        self.edges.store(count.wrapping_add(1), Ordering::Relaxed);

        self.on_edge.invoke();
        true
    }

    /// Number of edges serviced since start-up, modulo 2^32.
    pub fn edge_count(&self) -> u32 {
        self.edges.load(Ordering::Relaxed)
    }

    /// The slot invoked once per serviced edge from interrupt context.
    pub fn on_edge(&self) -> &HookSlot {
        &self.on_edge
    }
}

impl Default for EdgeHandler {
    fn default() -> Self {
        Self::new()
    }
}
