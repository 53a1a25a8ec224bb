/// Renderer trait - the graphics backend seam
///
/// The backdrop talks to the GPU exclusively through this trait. A backend
/// owns every GPU object it hands out a handle for; handles are plain keys
/// and carry no ownership. Whoever created a resource through the trait is
/// responsible for disposing it through the trait, exactly once.

use bitflags::bitflags;
use slotmap::new_key_type;

use crate::config::RendererConfig;
use crate::error::Result;
use crate::host::SurfaceInfo;
use crate::resource::{Color, Geometry};
use crate::scene::{PerspectiveCamera, SceneGraph};

// ============================================================================
// Resource handles and descriptors
// ============================================================================

new_key_type! {
    /// Backend material handle
    pub struct MaterialHandle;
    /// Backend geometry handle (per-scene geometry only, pooled shapes are not uploaded through handles)
    pub struct GeometryHandle;
}

bitflags! {
    /// Material render state flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MaterialFlags: u32 {
        /// Alpha blended
        const TRANSPARENT  = 0b0001;
        /// Draw edges only
        const WIREFRAME    = 0b0010;
        /// Disable back-face culling
        const DOUBLE_SIDED = 0b0100;
    }
}

/// Primitive family a material shades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialKind {
    /// Unlit triangle meshes
    Mesh,
    /// Unlit line segments
    Line,
}

/// Material descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialDesc {
    pub kind: MaterialKind,
    pub color: Color,
    pub opacity: f32,
    pub flags: MaterialFlags,
}

/// Renderer statistics
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RendererStats {
    /// Number of draw calls issued by the last frame
    pub draw_calls: u32,
    /// Frames rendered since creation
    pub frames_rendered: u64,
    /// Materials currently alive in the backend
    pub live_materials: usize,
    /// Geometries currently alive in the backend
    pub live_geometries: usize,
    /// Drawing buffer size in physical pixels
    pub width: u32,
    pub height: u32,
}

// ============================================================================
// Renderer trait
// ============================================================================

/// Main renderer trait
///
/// Single-threaded: the backdrop runs on the host event loop, so backends are
/// not required to be `Send`.
pub trait Renderer {
    /// Create a material
    fn create_material(&mut self, desc: &MaterialDesc) -> Result<MaterialHandle>;

    /// Overwrite the colour state of a live material in place
    fn update_material(&mut self, handle: MaterialHandle, desc: &MaterialDesc) -> Result<()>;

    /// Release a material. Disposing an unknown handle is an error.
    fn dispose_material(&mut self, handle: MaterialHandle) -> Result<()>;

    /// Upload a geometry
    fn create_geometry(&mut self, geometry: &Geometry) -> Result<GeometryHandle>;

    /// Release a geometry. Disposing an unknown handle is an error.
    fn dispose_geometry(&mut self, handle: GeometryHandle) -> Result<()>;

    /// Resize the drawing buffer
    ///
    /// # Arguments
    ///
    /// * `width` - Width in logical pixels
    /// * `height` - Height in logical pixels
    /// * `pixel_ratio` - Device pixel ratio, already capped by the caller
    fn resize(&mut self, width: u32, height: u32, pixel_ratio: f32);

    /// Draw the scene as seen from the camera
    fn render(&mut self, scene: &SceneGraph, camera: &PerspectiveCamera) -> Result<()>;

    /// Release the context itself. Must be the last call on a renderer.
    fn dispose(&mut self);

    /// Get statistics about the renderer
    fn stats(&self) -> RendererStats;
}

// ============================================================================
// Renderer factory
// ============================================================================

/// Creates a renderer bound to a draw surface
pub trait RendererFactory {
    fn create_renderer(
        &self,
        surface: &SurfaceInfo,
        config: &RendererConfig,
    ) -> Result<Box<dyn Renderer>>;
}

impl<F> RendererFactory for F
where
    F: Fn(&SurfaceInfo, &RendererConfig) -> Result<Box<dyn Renderer>>,
{
    fn create_renderer(
        &self,
        surface: &SurfaceInfo,
        config: &RendererConfig,
    ) -> Result<Box<dyn Renderer>> {
        self(surface, config)
    }
}
