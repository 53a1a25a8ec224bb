/// Scene builder
///
/// Populates a `SceneGraph` with randomly posed shapes and the grid group.
/// Randomness comes from the caller's RNG so a seeded RNG reproduces a scene
/// exactly.

use std::f32::consts::TAU;
use glam::Vec3;
use rand::Rng;

use crate::backdrop_debug;
use crate::config::BackdropConfig;
use crate::error::Result;
use crate::renderer::Renderer;
use crate::resource::{GeometryPool, MaterialPool};
use super::grid::GridGroup;
use super::scene_graph::SceneGraph;
use super::shape::ShapeInstance;

pub struct SceneBuilder<'a> {
    config: &'a BackdropConfig,
}

impl<'a> SceneBuilder<'a> {
    pub fn new(config: &'a BackdropConfig) -> Self {
        Self { config }
    }

    /// Create `shape_count` shape instances
    ///
    /// Each instance gets a uniformly random kind from the pool, material
    /// `index % materials.len()`, a uniform position inside the spawn box, a
    /// uniform initial rotation and a per-axis speed of
    /// `base_rotation_speed * factor`. Returns nothing when the material pool
    /// is empty.
    pub fn build_shapes<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        pool: &GeometryPool,
        materials: &MaterialPool,
    ) -> Vec<ShapeInstance> {
        let config = self.config;
        let kinds = pool.kinds();
        let extent = config.spawn_extent;
        let mut shapes = Vec::with_capacity(config.shape_count);

        for index in 0..config.shape_count {
            let (Some(material_index), Some(material)) =
                (materials.index_for_shape(index), materials.for_shape(index))
            else {
                break;
            };

            let kind = kinds[rng.random_range(0..kinds.len())];
            let position = Vec3::new(
                (rng.random::<f32>() - 0.5) * extent.x,
                (rng.random::<f32>() - 0.5) * extent.y,
                (rng.random::<f32>() - 0.5) * extent.z,
            );
            let rotation = Vec3::new(
                rng.random::<f32>() * TAU,
                rng.random::<f32>() * TAU,
                rng.random::<f32>() * TAU,
            );
            let factor = Vec3::new(
                rng.random_range(config.rotation_speed_factor.clone()),
                rng.random_range(config.rotation_speed_factor.clone()),
                rng.random_range(config.rotation_speed_factor.clone()),
            );

            shapes.push(ShapeInstance::new(
                kind,
                material_index,
                material.handle(),
                position,
                rotation,
                config.base_rotation_speed * factor,
                index as f32,
            ));
        }

        shapes
    }

    /// Build the wireframe grid for a theme
    pub fn build_grid(&self, renderer: &mut dyn Renderer, is_dark: bool) -> Result<GridGroup> {
        GridGroup::build(renderer, &self.config.grid, is_dark)
    }

    /// Build the full scene graph: shapes plus grid
    ///
    /// The material pool stays with the caller. On failure nothing created
    /// here is left alive.
    pub fn build<R: Rng + ?Sized>(
        &self,
        renderer: &mut dyn Renderer,
        rng: &mut R,
        materials: &MaterialPool,
        is_dark: bool,
    ) -> Result<SceneGraph> {
        let mut scene = SceneGraph::new();
        for shape in self.build_shapes(rng, GeometryPool::shared(), materials) {
            scene.add_shape(shape);
        }
        scene.set_grid(self.build_grid(renderer, is_dark)?);

        backdrop_debug!(
            "backdrop::SceneBuilder",
            "scene built: {} shapes, {} grid lines",
            scene.shapes().len(),
            scene.grid().map_or(0, |g| g.lines().len())
        );
        Ok(scene)
    }
}

#[cfg(test)]
#[path = "scene_builder_tests.rs"]
mod tests;
