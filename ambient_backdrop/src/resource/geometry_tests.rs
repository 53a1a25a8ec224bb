use super::*;

// ============================================================================
// Shape builders
// ============================================================================

#[test]
fn test_ring_counts() {
    let ring = Geometry::ring(0.5, 1.0, 32);
    assert_eq!(ring.vertex_count(), 64);
    assert_eq!(ring.index_count(), 32 * 6);
    assert_eq!(ring.topology(), Topology::TriangleList);
    assert_eq!(ring.name(), "ring");
}

#[test]
fn test_ring_radii() {
    let ring = Geometry::ring(0.5, 1.0, 16);
    for (i, p) in ring.positions().iter().enumerate() {
        let expected = if i % 2 == 0 { 0.5 } else { 1.0 };
        assert!((p.length() - expected).abs() < 1e-5);
        assert_eq!(p.z, 0.0);
    }
}

#[test]
fn test_disc_counts() {
    let disc = Geometry::disc(1.0, 32);
    assert_eq!(disc.vertex_count(), 33);
    assert_eq!(disc.index_count(), 32 * 3);
    assert_eq!(disc.positions()[0], Vec3::ZERO);
}

#[test]
fn test_segments_are_clamped() {
    assert_eq!(Geometry::disc(1.0, 0).vertex_count(), 4);
    assert_eq!(Geometry::ring(0.5, 1.0, 1).vertex_count(), 6);
}

#[test]
fn test_indices_in_range() {
    for geometry in [Geometry::ring(0.5, 1.0, 8), Geometry::disc(1.0, 8), Geometry::quad(1.0, 1.0)] {
        let count = geometry.vertex_count() as u32;
        assert!(geometry.indices().iter().all(|&i| i < count), "{}", geometry.name());
        assert_eq!(geometry.index_count() % 3, 0);
    }
}

#[test]
fn test_quad_extent() {
    let quad = Geometry::quad(1.5, 1.5);
    assert_eq!(quad.vertex_count(), 4);
    assert_eq!(quad.index_count(), 6);
    assert!((quad.bounding_radius() - (0.75f32 * 2.0f32.sqrt())).abs() < 1e-5);
}

#[test]
fn test_line_segment() {
    let line = Geometry::line(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(line.topology(), Topology::LineList);
    assert_eq!(line.vertex_count(), 2);
    assert_eq!(line.indices(), &[0, 1]);
}

// ============================================================================
// Byte views
// ============================================================================

#[test]
fn test_byte_views() {
    let quad = Geometry::quad(1.0, 1.0);
    assert_eq!(quad.vertex_bytes().len(), 4 * 3 * 4);
    assert_eq!(quad.index_bytes().len(), 6 * 4);
}
