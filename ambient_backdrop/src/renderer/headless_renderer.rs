/// Headless renderer - a backend that performs no GPU work
///
/// Every resource it hands out is tracked in a `SlotMap`, and every event is
/// mirrored into a `HeadlessLedger` that outlives the renderer. The ledger is
/// what tests (and hosts without a GPU) use to check the disposal contract.

use std::cell::RefCell;
use std::rc::Rc;
use glam::Vec3;
use slotmap::SlotMap;

use crate::backdrop_bail;
use crate::config::RendererConfig;
use crate::error::{Error, Result};
use crate::host::SurfaceInfo;
use crate::renderer::{
    GeometryHandle, MaterialDesc, MaterialHandle, Renderer, RendererFactory, RendererStats,
};
use crate::resource::{Geometry, GeometryPool, Topology};
use crate::scene::{PerspectiveCamera, SceneGraph};

const SOURCE: &str = "backdrop::HeadlessRenderer";

// ============================================================================
// Ledger
// ============================================================================

/// Counters accumulated by every renderer sharing a ledger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerCounts {
    pub renderers_created: usize,
    pub renderers_disposed: usize,
    pub materials_created: usize,
    pub materials_disposed: usize,
    pub material_updates: usize,
    pub geometries_created: usize,
    pub geometries_disposed: usize,
    /// Vertex plus index bytes handed to `create_geometry`
    pub bytes_uploaded: usize,
    pub render_calls: usize,
    /// Render calls received after `dispose()`
    pub renders_after_dispose: usize,
    /// Double or unknown disposals, and updates of dead materials
    pub invalid_operations: usize,
}

impl LedgerCounts {
    /// Materials created but not yet disposed
    pub fn live_materials(&self) -> usize {
        self.materials_created - self.materials_disposed
    }

    /// Geometries created but not yet disposed
    pub fn live_geometries(&self) -> usize {
        self.geometries_created - self.geometries_disposed
    }

    /// Renderers created but not yet disposed
    pub fn live_renderers(&self) -> usize {
        self.renderers_created - self.renderers_disposed
    }

    /// Whether nothing created through the ledger is still alive
    pub fn is_balanced(&self) -> bool {
        self.live_materials() == 0 && self.live_geometries() == 0 && self.live_renderers() == 0
    }
}

/// What the last rendered frame looked like
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSnapshot {
    pub camera_position: Vec3,
    pub shape_count: usize,
    pub line_count: usize,
    pub draw_calls: u32,
    /// Rotation of the first shape, if any
    pub first_shape_rotation: Option<Vec3>,
    /// Rotation of the grid group, if attached
    pub grid_rotation: Option<Vec3>,
}

#[derive(Debug, Default)]
struct LedgerState {
    counts: LedgerCounts,
    last_render: Option<RenderSnapshot>,
    /// Successful material updates left before one is rejected
    update_failure_in: Option<usize>,
}

/// Shared, cloneable record of everything headless renderers did
#[derive(Debug, Clone, Default)]
pub struct HeadlessLedger {
    inner: Rc<RefCell<LedgerState>>,
}

impl HeadlessLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the counters
    pub fn counts(&self) -> LedgerCounts {
        self.inner.borrow().counts
    }

    /// Last frame rendered through this ledger
    pub fn last_render(&self) -> Option<RenderSnapshot> {
        self.inner.borrow().last_render
    }

    /// Let `successes` more material updates through, then reject the next one
    pub fn fail_material_update_after(&self, successes: usize) {
        self.inner.borrow_mut().update_failure_in = Some(successes);
    }

    fn take_update_failure(&self) -> bool {
        let mut state = self.inner.borrow_mut();
        match state.update_failure_in {
            Some(0) => {
                state.update_failure_in = None;
                true
            }
            Some(left) => {
                state.update_failure_in = Some(left - 1);
                false
            }
            None => false,
        }
    }

    fn record(&self, f: impl FnOnce(&mut LedgerCounts)) {
        f(&mut self.inner.borrow_mut().counts);
    }

    fn record_render(&self, snapshot: RenderSnapshot) {
        let mut state = self.inner.borrow_mut();
        state.counts.render_calls += 1;
        state.last_render = Some(snapshot);
    }
}

// ============================================================================
// Renderer
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct GeometryRecord {
    vertex_count: usize,
    topology: Topology,
}

/// Renderer that keeps exact resource bookkeeping and draws nothing
pub struct HeadlessRenderer {
    ledger: HeadlessLedger,
    materials: SlotMap<MaterialHandle, MaterialDesc>,
    geometries: SlotMap<GeometryHandle, GeometryRecord>,
    material_limit: Option<usize>,
    width: u32,
    height: u32,
    pixel_ratio: f32,
    frames_rendered: u64,
    last_draw_calls: u32,
    disposed: bool,
}

impl HeadlessRenderer {
    /// Create a renderer bound to a surface
    pub fn new(ledger: HeadlessLedger, surface: &SurfaceInfo, config: &RendererConfig) -> Self {
        ledger.record(|c| c.renderers_created += 1);
        Self {
            ledger,
            materials: SlotMap::with_key(),
            geometries: SlotMap::with_key(),
            material_limit: None,
            width: surface.width,
            height: surface.height,
            pixel_ratio: config.pixel_ratio(surface.pixel_ratio),
            frames_rendered: 0,
            last_draw_calls: 0,
            disposed: false,
        }
    }

    /// Fail material creation with `OutOfMemory` once `limit` materials are alive
    pub fn with_material_limit(mut self, limit: usize) -> Self {
        self.material_limit = Some(limit);
        self
    }

    /// Current state of a live material
    pub fn material(&self, handle: MaterialHandle) -> Option<&MaterialDesc> {
        self.materials.get(handle)
    }

    /// Effective pixel ratio
    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Whether `dispose()` has been called
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn ensure_alive(&self) -> Result<()> {
        if self.disposed {
            return Err(Error::InvalidResource("renderer already disposed".to_string()));
        }
        Ok(())
    }
}

impl Renderer for HeadlessRenderer {
    fn create_material(&mut self, desc: &MaterialDesc) -> Result<MaterialHandle> {
        self.ensure_alive()?;
        if let Some(limit) = self.material_limit {
            if self.materials.len() >= limit {
                return Err(Error::OutOfMemory);
            }
        }
        self.ledger.record(|c| c.materials_created += 1);
        Ok(self.materials.insert(desc.clone()))
    }

    fn update_material(&mut self, handle: MaterialHandle, desc: &MaterialDesc) -> Result<()> {
        if self.materials.contains_key(handle) && self.ledger.take_update_failure() {
            return Err(Error::BackendError(format!("update of material {:?} rejected", handle)));
        }
        match self.materials.get_mut(handle) {
            Some(slot) => {
                *slot = desc.clone();
                self.ledger.record(|c| c.material_updates += 1);
                Ok(())
            }
            None => {
                self.ledger.record(|c| c.invalid_operations += 1);
                Err(Error::InvalidResource(format!("material {:?} is not alive", handle)))
            }
        }
    }

    fn dispose_material(&mut self, handle: MaterialHandle) -> Result<()> {
        match self.materials.remove(handle) {
            Some(_) => {
                self.ledger.record(|c| c.materials_disposed += 1);
                Ok(())
            }
            None => {
                self.ledger.record(|c| c.invalid_operations += 1);
                Err(Error::InvalidResource(format!("material {:?} disposed twice", handle)))
            }
        }
    }

    fn create_geometry(&mut self, geometry: &Geometry) -> Result<GeometryHandle> {
        self.ensure_alive()?;
        if geometry.vertex_count() == 0 {
            return Err(Error::InvalidResource(format!(
                "geometry '{}' has no vertices", geometry.name()
            )));
        }
        let bytes = geometry.vertex_bytes().len() + geometry.index_bytes().len();
        self.ledger.record(|c| {
            c.geometries_created += 1;
            c.bytes_uploaded += bytes;
        });
        Ok(self.geometries.insert(GeometryRecord {
            vertex_count: geometry.vertex_count(),
            topology: geometry.topology(),
        }))
    }

    fn dispose_geometry(&mut self, handle: GeometryHandle) -> Result<()> {
        match self.geometries.remove(handle) {
            Some(_) => {
                self.ledger.record(|c| c.geometries_disposed += 1);
                Ok(())
            }
            None => {
                self.ledger.record(|c| c.invalid_operations += 1);
                Err(Error::InvalidResource(format!("geometry {:?} disposed twice", handle)))
            }
        }
    }

    fn resize(&mut self, width: u32, height: u32, pixel_ratio: f32) {
        self.width = width;
        self.height = height;
        self.pixel_ratio = pixel_ratio;
    }

    fn render(&mut self, scene: &SceneGraph, camera: &PerspectiveCamera) -> Result<()> {
        if self.disposed {
            self.ledger.record(|c| c.renders_after_dispose += 1);
            return Err(Error::InvalidResource("render on a disposed renderer".to_string()));
        }

        let pool = GeometryPool::shared();
        let mut draw_calls = 0u32;

        for shape in scene.shapes() {
            if !self.materials.contains_key(shape.material()) {
                backdrop_bail!(SOURCE, "shape material {:?} is not alive", shape.material());
            }
            debug_assert!(pool.geometry(shape.kind()).vertex_count() > 0);
            draw_calls += 1;
        }

        let mut line_count = 0;
        if let Some(grid) = scene.grid() {
            for line in grid.lines() {
                let Some(record) = self.geometries.get(line.geometry()) else {
                    backdrop_bail!(SOURCE, "grid geometry {:?} is not alive", line.geometry());
                };
                debug_assert!(record.topology == Topology::LineList && record.vertex_count >= 2);
                let material = grid.line_material(line);
                if !self.materials.contains_key(material) {
                    backdrop_bail!(SOURCE, "grid material {:?} is not alive", material);
                }
                line_count += 1;
                draw_calls += 1;
            }
        }

        self.frames_rendered += 1;
        self.last_draw_calls = draw_calls;
        self.ledger.record_render(RenderSnapshot {
            camera_position: camera.position(),
            shape_count: scene.shapes().len(),
            line_count,
            draw_calls,
            first_shape_rotation: scene.shapes().first().map(|s| s.rotation()),
            grid_rotation: scene.grid().map(|g| g.rotation()),
        });
        Ok(())
    }

    fn dispose(&mut self) {
        if self.disposed {
            self.ledger.record(|c| c.invalid_operations += 1);
            return;
        }
        self.disposed = true;
        self.ledger.record(|c| c.renderers_disposed += 1);
    }

    fn stats(&self) -> RendererStats {
        RendererStats {
            draw_calls: self.last_draw_calls,
            frames_rendered: self.frames_rendered,
            live_materials: self.materials.len(),
            live_geometries: self.geometries.len(),
            width: (self.width as f32 * self.pixel_ratio) as u32,
            height: (self.height as f32 * self.pixel_ratio) as u32,
        }
    }
}

// ============================================================================
// Factory
// ============================================================================

/// Factory producing `HeadlessRenderer`s that share one ledger
#[derive(Debug, Clone, Default)]
pub struct HeadlessFactory {
    ledger: HeadlessLedger,
    material_limit: Option<usize>,
    unavailable: bool,
}

impl HeadlessFactory {
    pub fn new(ledger: HeadlessLedger) -> Self {
        Self { ledger, material_limit: None, unavailable: false }
    }

    /// Renderers created by this factory run out of memory after `limit` materials
    pub fn with_material_limit(mut self, limit: usize) -> Self {
        self.material_limit = Some(limit);
        self
    }

    /// Every creation attempt fails, as when the context cannot be acquired
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    pub fn ledger(&self) -> &HeadlessLedger {
        &self.ledger
    }
}

impl RendererFactory for HeadlessFactory {
    fn create_renderer(
        &self,
        surface: &SurfaceInfo,
        config: &RendererConfig,
    ) -> Result<Box<dyn Renderer>> {
        if self.unavailable {
            return Err(Error::InitializationFailed("graphics context unavailable".to_string()));
        }
        let mut renderer = HeadlessRenderer::new(self.ledger.clone(), surface, config);
        if let Some(limit) = self.material_limit {
            renderer = renderer.with_material_limit(limit);
        }
        Ok(Box::new(renderer))
    }
}

#[cfg(test)]
#[path = "headless_renderer_tests.rs"]
mod tests;
