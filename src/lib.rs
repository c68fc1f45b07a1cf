#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`TickSource`**: 1 ms time base shared with the timer interrupt (counter, countdown, hook)
//! - **`delay_ms` / `TickDelay`**: Busy-wait delays on the tick countdown
//! - **`OutputDriver`**: On/off/toggle and PWM brightness for the four LEDs
//! - **`Button` / `EdgeHandler`**: Button level reads and the rising-edge interrupt
//! - **`Accelerometer`**: Axis reads in g from any `RawAxisSource` (e.g. `Lis3dsh`)
//! - **`HookSlot` / `AppHooks`**: Application callbacks run from interrupt context
//! - **`BoardConfig`**: The start-up configuration the core relies on
//! - **`Board`**: Brings everything up and bundles the drivers
//!
//! Hardware is reached only through `embedded-hal` 1.0 traits, so the core
//! runs unchanged on the host against mock pins and buses.

pub mod accel;
pub mod board;
pub mod config;
pub mod delay;
pub mod error;
pub mod hooks;
pub mod input;
pub mod interrupt;
pub mod lis3dsh;
pub mod output;
pub mod tick;
pub mod time;

pub use accel::{Accelerometer, Axis, FullScale, RawAxisSource};
pub use board::{Board, Peripherals};
pub use config::{BoardConfig, BrightnessPolicy, InterruptPriorities, PinMap, TickTimerConfig};
pub use delay::{TickDelay, delay_ms};
pub use error::BspError;
pub use hooks::{AppHooks, Hook, HookSlot};
pub use input::{Button, EdgeHandler};
pub use interrupt::PendingFlag;
pub use lis3dsh::Lis3dsh;
pub use output::{FULL_BRIGHTNESS, LED_COUNT, LedChannel, OutputDriver};
pub use tick::{TickSource, TickState};
pub use time::{Duration, Instant, TICK_HZ};
