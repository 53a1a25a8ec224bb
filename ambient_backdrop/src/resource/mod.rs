//! Resource module
//!
//! CPU-side geometry data, the process-wide geometry pool, colour math and
//! the per-scene material pool.

pub mod geometry;
mod geometry_pool;
mod color;
mod material;

pub use geometry::{Geometry, Topology};
pub use geometry_pool::{GeometryPool, ShapeKind};
pub use color::Color;
pub use material::{Material, MaterialPool};

/// Number of GPU resources released by a disposal pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisposalCount {
    pub materials: usize,
    pub geometries: usize,
}

impl std::ops::Add for DisposalCount {
    type Output = DisposalCount;

    fn add(self, rhs: DisposalCount) -> DisposalCount {
        DisposalCount {
            materials: self.materials + rhs.materials,
            geometries: self.geometries + rhs.geometries,
        }
    }
}

impl std::ops::AddAssign for DisposalCount {
    fn add_assign(&mut self, rhs: DisposalCount) {
        *self = *self + rhs;
    }
}
