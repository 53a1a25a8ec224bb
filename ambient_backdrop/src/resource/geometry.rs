//! Resource-level geometry data.
//!
//! A `Geometry` is immutable CPU-side vertex/index data in the XY plane.
//! Backends upload it through `Renderer::create_geometry`, reading the raw
//! bytes exposed by `vertex_bytes` / `index_bytes`.
//!
//! # Shapes
//!
//! - **ring**: annulus, two vertices per segment
//! - **disc**: triangle fan around a centre vertex
//! - **quad**: two triangles
//! - **line**: a single two-vertex segment

use std::f32::consts::TAU;
use glam::Vec3;

/// Minimum segment count for round shapes
const MIN_SEGMENTS: u32 = 3;

/// Primitive topology of a geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    TriangleList,
    LineList,
}

/// Immutable vertex/index data
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    name: String,
    positions: Vec<Vec3>,
    indices: Vec<u32>,
    topology: Topology,
}

impl Geometry {
    /// Flat ring between `inner_radius` and `outer_radius`
    pub fn ring(inner_radius: f32, outer_radius: f32, segments: u32) -> Self {
        let segments = segments.max(MIN_SEGMENTS);
        let mut positions = Vec::with_capacity(segments as usize * 2);
        for i in 0..segments {
            let (sin, cos) = (i as f32 / segments as f32 * TAU).sin_cos();
            positions.push(Vec3::new(cos * inner_radius, sin * inner_radius, 0.0));
            positions.push(Vec3::new(cos * outer_radius, sin * outer_radius, 0.0));
        }

        let mut indices = Vec::with_capacity(segments as usize * 6);
        for i in 0..segments {
            let j = (i + 1) % segments;
            let (inner_a, outer_a) = (2 * i, 2 * i + 1);
            let (inner_b, outer_b) = (2 * j, 2 * j + 1);
            indices.extend_from_slice(&[inner_a, outer_a, outer_b, inner_a, outer_b, inner_b]);
        }

        Self {
            name: "ring".to_string(),
            positions,
            indices,
            topology: Topology::TriangleList,
        }
    }

    /// Filled disc of `radius`
    pub fn disc(radius: f32, segments: u32) -> Self {
        let segments = segments.max(MIN_SEGMENTS);
        let mut positions = Vec::with_capacity(segments as usize + 1);
        positions.push(Vec3::ZERO);
        for i in 0..segments {
            let (sin, cos) = (i as f32 / segments as f32 * TAU).sin_cos();
            positions.push(Vec3::new(cos * radius, sin * radius, 0.0));
        }

        let mut indices = Vec::with_capacity(segments as usize * 3);
        for i in 0..segments {
            let j = (i + 1) % segments;
            indices.extend_from_slice(&[0, 1 + i, 1 + j]);
        }

        Self {
            name: "disc".to_string(),
            positions,
            indices,
            topology: Topology::TriangleList,
        }
    }

    /// Axis-aligned rectangle centred on the origin
    pub fn quad(width: f32, height: f32) -> Self {
        let (hw, hh) = (width * 0.5, height * 0.5);
        Self {
            name: "quad".to_string(),
            positions: vec![
                Vec3::new(-hw, -hh, 0.0),
                Vec3::new(hw, -hh, 0.0),
                Vec3::new(hw, hh, 0.0),
                Vec3::new(-hw, hh, 0.0),
            ],
            indices: vec![0, 1, 2, 0, 2, 3],
            topology: Topology::TriangleList,
        }
    }

    /// Single line segment
    pub fn line(start: Vec3, end: Vec3) -> Self {
        Self {
            name: "line".to_string(),
            positions: vec![start, end],
            indices: vec![0, 1],
            topology: Topology::LineList,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Vertex positions as tightly packed `f32x3` bytes
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Indices as `u32` bytes
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Distance of the farthest vertex from the origin
    pub fn bounding_radius(&self) -> f32 {
        self.positions.iter().map(|p| p.length()).fold(0.0, f32::max)
    }
}

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod tests;
