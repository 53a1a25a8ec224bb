use super::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::RendererConfig;
use crate::host::{SurfaceId, SurfaceInfo};
use crate::renderer::{HeadlessLedger, HeadlessRenderer};

fn headless() -> (HeadlessLedger, HeadlessRenderer) {
    let ledger = HeadlessLedger::new();
    let surface = SurfaceInfo { id: SurfaceId(1), width: 800, height: 600, pixel_ratio: 1.0 };
    let renderer = HeadlessRenderer::new(ledger.clone(), &surface, &RendererConfig::default());
    (ledger, renderer)
}

// ============================================================================
// SHAPES
// ============================================================================

#[test]
fn test_build_shapes_count_and_bounds() {
    let config = BackdropConfig::default();
    let (_ledger, mut renderer) = headless();
    let materials = MaterialPool::create(&mut renderer, &config.palette, true).unwrap();
    let mut rng = StdRng::seed_from_u64(7);

    let shapes = SceneBuilder::new(&config).build_shapes(&mut rng, GeometryPool::shared(), &materials);

    assert_eq!(shapes.len(), 12);
    let half = config.spawn_extent * 0.5;
    for shape in &shapes {
        let p = shape.position();
        assert!(p.x.abs() <= half.x && p.y.abs() <= half.y && p.z.abs() <= half.z);
        let r = shape.rotation();
        assert!(r.min_element() >= 0.0 && r.max_element() <= TAU);
    }
}

#[test]
fn test_build_shapes_reuses_materials_round_robin() {
    let config = BackdropConfig::default();
    let (_ledger, mut renderer) = headless();
    let materials = MaterialPool::create(&mut renderer, &config.palette, true).unwrap();
    let mut rng = StdRng::seed_from_u64(1);

    let shapes = SceneBuilder::new(&config).build_shapes(&mut rng, GeometryPool::shared(), &materials);

    for (index, shape) in shapes.iter().enumerate() {
        assert_eq!(shape.material_index(), index % 5);
        assert_eq!(shape.material(), materials.get(index % 5).unwrap().handle());
        assert_eq!(shape.phase(), index as f32);
    }
}

#[test]
fn test_rotation_speed_within_factor_range() {
    let config = BackdropConfig::default();
    let (_ledger, mut renderer) = headless();
    let materials = MaterialPool::create(&mut renderer, &config.palette, true).unwrap();
    let mut rng = StdRng::seed_from_u64(99);

    let shapes = SceneBuilder::new(&config).build_shapes(&mut rng, GeometryPool::shared(), &materials);

    let base = config.base_rotation_speed;
    for shape in &shapes {
        let speed = shape.rotation_speed();
        for (s, b) in [(speed.x, base.x), (speed.y, base.y), (speed.z, base.z)] {
            assert!(s >= b * 0.5 - 1e-9 && s <= b * 1.0 + 1e-9, "speed {} outside [{}, {}]", s, b * 0.5, b);
        }
    }
}

#[test]
fn test_same_seed_same_scene() {
    let config = BackdropConfig::default();
    let (_ledger, mut renderer) = headless();
    let materials = MaterialPool::create(&mut renderer, &config.palette, true).unwrap();
    let builder = SceneBuilder::new(&config);

    let a = builder.build_shapes(&mut StdRng::seed_from_u64(42), GeometryPool::shared(), &materials);
    let b = builder.build_shapes(&mut StdRng::seed_from_u64(42), GeometryPool::shared(), &materials);

    for (x, y) in a.iter().zip(b.iter()) {
        assert_eq!(x.kind(), y.kind());
        assert_eq!(x.position(), y.position());
        assert_eq!(x.rotation_speed(), y.rotation_speed());
    }
}

#[test]
fn test_empty_material_pool_yields_no_shapes() {
    let mut config = BackdropConfig::default();
    config.palette.material_count = 0;
    let (_ledger, mut renderer) = headless();
    let materials = MaterialPool::create(&mut renderer, &config.palette, true).unwrap();

    let shapes = SceneBuilder::new(&config)
        .build_shapes(&mut StdRng::seed_from_u64(3), GeometryPool::shared(), &materials);

    assert!(shapes.is_empty());
}

// ============================================================================
// FULL BUILD
// ============================================================================

#[test]
fn test_build_attaches_shapes_and_grid() {
    let config = BackdropConfig::default();
    let (ledger, mut renderer) = headless();
    let materials = MaterialPool::create(&mut renderer, &config.palette, true).unwrap();

    let scene = SceneBuilder::new(&config)
        .build(&mut renderer, &mut StdRng::seed_from_u64(5), &materials, true)
        .unwrap();

    assert_eq!(scene.shapes().len(), 12);
    assert_eq!(scene.grid().map(|g| g.lines().len()), Some(14));
    assert_eq!(ledger.counts().materials_created, 5 + 8);
    assert_eq!(ledger.counts().geometries_created, 14);
}
