/// Process-wide pool of shape geometries.
///
/// The pool is built once, on first use, and lives for the rest of the
/// process. Every scene references these geometries by `ShapeKind`; they are
/// never disposed.

use std::sync::OnceLock;
use super::geometry::Geometry;

/// Global geometry pool storage
static SHARED_POOL: OnceLock<GeometryPool> = OnceLock::new();

/// Shapes available to the scene builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Ring,
    Disc,
    Quad,
}

impl ShapeKind {
    /// Every kind, in pool order
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Ring, ShapeKind::Disc, ShapeKind::Quad];
}

/// Immutable set of shared shape geometries
#[derive(Debug)]
pub struct GeometryPool {
    ring: Geometry,
    disc: Geometry,
    quad: Geometry,
}

impl GeometryPool {
    fn new() -> Self {
        Self {
            ring: Geometry::ring(0.5, 1.0, 32),
            disc: Geometry::disc(1.0, 32),
            quad: Geometry::quad(1.5, 1.5),
        }
    }

    /// The process-wide pool, created on first access
    pub fn shared() -> &'static GeometryPool {
        SHARED_POOL.get_or_init(GeometryPool::new)
    }

    /// Geometry for a shape kind
    pub fn geometry(&self, kind: ShapeKind) -> &Geometry {
        match kind {
            ShapeKind::Ring => &self.ring,
            ShapeKind::Disc => &self.disc,
            ShapeKind::Quad => &self.quad,
        }
    }

    /// Shape kinds the pool holds
    pub fn kinds(&self) -> &'static [ShapeKind] {
        &ShapeKind::ALL
    }

    pub fn len(&self) -> usize {
        ShapeKind::ALL.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
#[path = "geometry_pool_tests.rs"]
mod tests;
