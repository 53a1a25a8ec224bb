//! Interaction module
//!
//! Pointer sampling: device pixels in, camera steering target out.

mod pointer;

pub use pointer::{PointerSampler, PointerState, SamplerStats};
