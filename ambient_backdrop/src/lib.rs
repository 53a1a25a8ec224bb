/*!
# Ambient Backdrop

An animated 3D background: a small population of translucent shapes floating
in front of a wireframe grid, with a camera that drifts toward the pointer.

The crate owns the scene and its animation loop. Everything platform specific
sits behind two seams:

- **Renderer** / **RendererFactory**: the graphics backend. `HeadlessRenderer`
  is a backend that draws nothing and keeps an exact resource ledger.
- **Host**: draw surface, per-frame scheduling, listeners, timers and clock.
  `SimulatedHost` is a deterministic implementation; `winit_adapter`
  translates window events.

`Backdrop` ties them together: mount builds the scene and registers with the
host, unmount releases every registration and every GPU resource exactly once.
*/

pub mod error;
pub mod log;
pub mod config;
pub mod renderer;
pub mod resource;
pub mod scene;
pub mod interaction;
pub mod animation;
pub mod host;
pub mod lifecycle;

// Main ambient namespace module
pub mod ambient {
    // Error types
    pub use crate::error::{Error, Result};

    // Configuration
    pub use crate::config::{BackdropConfig, GridConfig, PaletteConfig, RendererConfig, ThemeTone};

    // Lifecycle manager
    pub use crate::lifecycle::{Backdrop, LifecycleState, MountStatus, SkipReason, TeardownReport};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger, set_logger, reset_logger};
    }

    // Render sub-module
    pub mod render {
        pub use crate::renderer::*;
    }

    // Host sub-module
    pub mod host {
        pub use crate::host::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
        pub use crate::resource::{Color, Geometry, GeometryPool, Material, MaterialPool, ShapeKind};
    }
}

// Re-export math library at crate root
pub use glam;
