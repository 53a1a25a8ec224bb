//! Host module
//!
//! The environment the backdrop runs in: draw surface, per-frame scheduling,
//! event listeners, timers and clock. `SimulatedHost` is a deterministic
//! implementation; `winit_adapter` turns window events into `HostEvent`s.

mod host;
mod simulated_host;
pub mod winit_adapter;

pub use host::*;
pub use simulated_host::{HostCounters, SimulatedHost};
