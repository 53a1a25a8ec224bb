/// Renderer module - the graphics backend seam and the headless backend

// Module declarations
pub mod renderer;
pub mod headless_renderer;

// Re-export everything from renderer.rs
pub use renderer::*;

pub use headless_renderer::{
    HeadlessRenderer, HeadlessFactory, HeadlessLedger, LedgerCounts, RenderSnapshot,
};
