//! Lifecycle module
//!
//! `SceneHandle` owns the GPU side of one mount; `Backdrop` drives the
//! Unmounted -> Mounting -> Active -> Unmounting -> Unmounted cycle and owns
//! every host registration.

mod scene_handle;
mod backdrop;

pub use scene_handle::SceneHandle;
pub use backdrop::{Backdrop, BackdropStats, LifecycleState, MountStatus, SkipReason, TeardownReport};
