/// Scene handle
///
/// Everything GPU-visible that one mount allocates: the renderer, the shape
/// material pool, the scene graph (with the grid group) and the camera.
/// `dispose` releases it all exactly once; if a handle is dropped without
/// `dispose`, `Drop` does it and logs the leak it prevented.

use rand::Rng;

use crate::config::BackdropConfig;
use crate::error::Result;
use crate::host::{SurfaceInfo, Viewport};
use crate::renderer::Renderer;
use crate::resource::{DisposalCount, MaterialPool};
use crate::scene::{PerspectiveCamera, SceneBuilder, SceneGraph};
use crate::{backdrop_debug, backdrop_error};

pub struct SceneHandle {
    surface: SurfaceInfo,
    renderer: Box<dyn Renderer>,
    camera: PerspectiveCamera,
    scene: SceneGraph,
    materials: MaterialPool,
    is_dark: bool,
    released: bool,
}

impl SceneHandle {
    /// Build the scene on a fresh renderer
    ///
    /// On error everything allocated so far, the renderer included, is
    /// released before returning.
    pub fn create<R: Rng + ?Sized>(
        surface: SurfaceInfo,
        mut renderer: Box<dyn Renderer>,
        config: &BackdropConfig,
        rng: &mut R,
        is_dark: bool,
    ) -> Result<Self> {
        let pixel_ratio = config.renderer.pixel_ratio(surface.pixel_ratio);
        renderer.resize(surface.width, surface.height, pixel_ratio);

        let mut materials = match MaterialPool::create(renderer.as_mut(), &config.palette, is_dark) {
            Ok(materials) => materials,
            Err(err) => {
                renderer.dispose();
                return Err(err);
            }
        };

        let scene = match SceneBuilder::new(config).build(renderer.as_mut(), rng, &materials, is_dark) {
            Ok(scene) => scene,
            Err(err) => {
                materials.dispose(renderer.as_mut());
                renderer.dispose();
                return Err(err);
            }
        };

        let aspect = Viewport::new(surface.width, surface.height).aspect().unwrap_or(1.0);
        let camera = PerspectiveCamera::new(
            config.field_of_view,
            aspect,
            config.near,
            config.far,
            config.camera_position,
        );

        Ok(Self {
            surface,
            renderer,
            camera,
            scene,
            materials,
            is_dark,
            released: false,
        })
    }

    pub fn surface(&self) -> &SurfaceInfo {
        &self.surface
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn materials(&self) -> &MaterialPool {
        &self.materials
    }

    pub fn renderer(&self) -> &dyn Renderer {
        self.renderer.as_ref()
    }

    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    /// Split borrows for one animation tick
    pub fn frame_parts(&mut self) -> (&mut dyn Renderer, &mut SceneGraph, &mut PerspectiveCamera) {
        (self.renderer.as_mut(), &mut self.scene, &mut self.camera)
    }

    /// Recolour shape and grid materials in place
    pub fn apply_theme(&mut self, config: &BackdropConfig, is_dark: bool) -> Result<()> {
        self.materials.update(self.renderer.as_mut(), is_dark)?;
        if let Some(grid) = self.scene.grid_mut() {
            grid.recolor(self.renderer.as_mut(), &config.grid, is_dark)?;
        }
        self.is_dark = is_dark;
        Ok(())
    }

    /// Fit camera and drawing buffer to a viewport
    ///
    /// Returns false, changing nothing, for an empty viewport.
    pub fn resize(&mut self, viewport: Viewport, config: &BackdropConfig) -> bool {
        let Some(aspect) = viewport.aspect() else {
            return false;
        };
        self.camera.set_aspect(aspect);
        let pixel_ratio = config.renderer.pixel_ratio(self.surface.pixel_ratio);
        self.renderer.resize(viewport.width, viewport.height, pixel_ratio);
        self.surface.width = viewport.width;
        self.surface.height = viewport.height;
        true
    }

    /// Release every GPU resource of the mount
    pub fn dispose(mut self) -> DisposalCount {
        self.release()
    }

    fn release(&mut self) -> DisposalCount {
        if self.released {
            return DisposalCount::default();
        }
        self.released = true;

        let renderer = self.renderer.as_mut();
        let mut released = DisposalCount {
            materials: self.materials.dispose(renderer),
            geometries: 0,
        };
        if let Some(grid) = self.scene.take_grid() {
            released += grid.dispose(renderer);
        }
        self.scene.clear_shapes();
        renderer.dispose();

        backdrop_debug!(
            "backdrop::SceneHandle",
            "released {} material(s), {} geometr(ies)",
            released.materials, released.geometries
        );
        released
    }
}

impl Drop for SceneHandle {
    fn drop(&mut self) {
        if !self.released {
            backdrop_error!(
                "backdrop::SceneHandle",
                "scene handle dropped without dispose, releasing GPU resources"
            );
            self.release();
        }
    }
}

#[cfg(test)]
#[path = "scene_handle_tests.rs"]
mod tests;
