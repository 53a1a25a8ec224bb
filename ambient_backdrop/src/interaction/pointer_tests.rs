use super::*;

fn sampler() -> PointerSampler {
    PointerSampler::new(Duration::from_millis(50), Vec2::new(5.0, 3.0))
}

const VIEWPORT: Viewport = Viewport { width: 800, height: 600 };

// ============================================================================
// NORMALIZATION
// ============================================================================

#[test]
fn test_normalize_corners_and_centre() {
    assert_eq!(PointerSampler::normalize(0.0, 0.0, VIEWPORT), Some(Vec2::new(-1.0, 1.0)));
    assert_eq!(PointerSampler::normalize(800.0, 600.0, VIEWPORT), Some(Vec2::new(1.0, -1.0)));
    assert_eq!(PointerSampler::normalize(400.0, 300.0, VIEWPORT), Some(Vec2::ZERO));
}

#[test]
fn test_normalize_clamps_outside_viewport() {
    assert_eq!(PointerSampler::normalize(-50.0, 900.0, VIEWPORT), Some(Vec2::new(-1.0, -1.0)));
}

#[test]
fn test_normalize_empty_viewport() {
    assert_eq!(PointerSampler::normalize(10.0, 10.0, Viewport::new(0, 600)), None);
}

// ============================================================================
// STEERING TARGET
// ============================================================================

#[test]
fn test_target_is_scaled_pointer() {
    let mut s = sampler();
    assert!(s.on_pointer_move(800.0, 0.0, VIEWPORT, Duration::ZERO));
    assert_eq!(s.state().pointer, Vec2::new(1.0, 1.0));
    assert_eq!(s.state().target, Vec2::new(5.0, 3.0));
}

#[test]
fn test_empty_viewport_drops_event() {
    let mut s = sampler();
    assert!(!s.on_pointer_move(10.0, 10.0, Viewport::default(), Duration::ZERO));
    assert_eq!(*s.state(), PointerState::default());
    assert_eq!(s.stats().dropped, 1);
    // The dropped event does not start the interval
    assert!(s.on_pointer_move(10.0, 10.0, VIEWPORT, Duration::from_millis(1)));
}

// ============================================================================
// THROTTLING
// ============================================================================

#[test]
fn test_burst_within_interval_updates_once() {
    let mut s = sampler();
    let mut accepted = 0;
    for i in 0..100u64 {
        // 100 events spread over 0..50ms (exclusive)
        let now = Duration::from_micros(i * 495);
        if s.on_pointer_move(i as f32 * 8.0, 300.0, VIEWPORT, now) {
            accepted += 1;
        }
    }
    assert_eq!(accepted, 1);
    assert_eq!(s.stats(), SamplerStats { accepted: 1, dropped: 99 });
    assert_eq!(s.state().target, Vec2::new(-5.0, 0.0));
}

#[test]
fn test_accepts_again_after_interval() {
    let mut s = sampler();
    assert!(s.on_pointer_move(0.0, 0.0, VIEWPORT, Duration::from_millis(100)));
    assert!(!s.on_pointer_move(400.0, 300.0, VIEWPORT, Duration::from_millis(149)));
    assert!(s.on_pointer_move(400.0, 300.0, VIEWPORT, Duration::from_millis(150)));
    assert_eq!(s.state().target, Vec2::ZERO);
}

#[test]
fn test_reset_clears_state() {
    let mut s = sampler();
    s.on_pointer_move(0.0, 0.0, VIEWPORT, Duration::ZERO);
    s.reset();
    assert_eq!(*s.state(), PointerState::default());
    assert!(s.on_pointer_move(0.0, 0.0, VIEWPORT, Duration::from_millis(1)));
}
