//! Animation module
//!
//! The self-rescheduling, frame-rate capped render loop.

mod driver;

pub use driver::{AnimationDriver, DriverState, DriverStats, TickOutcome};
