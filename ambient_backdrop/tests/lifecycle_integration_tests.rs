//! Integration tests for the backdrop lifecycle
//!
//! Drives a `Backdrop` through `SimulatedHost` and the headless renderer.
//! No GPU required.
//!
//! Run with: cargo test --test lifecycle_integration_tests

use std::time::Duration;

use ambient_backdrop::ambient::host::{ListenerKind, SimulatedHost};
use ambient_backdrop::ambient::render::{HeadlessFactory, HeadlessLedger};
use ambient_backdrop::ambient::{Backdrop, BackdropConfig, LifecycleState, MountStatus};
use ambient_backdrop::animation::TickOutcome;
use ambient_backdrop::glam::Vec2;

// ============================================================================
// HELPERS
// ============================================================================

fn seeded(seed: u64) -> BackdropConfig {
    BackdropConfig { seed: Some(seed), ..BackdropConfig::default() }
}

fn run_frames(host: &mut SimulatedHost, backdrop: &mut Backdrop, frames: usize, spacing: Duration) {
    for _ in 0..frames {
        host.step(backdrop, spacing);
    }
}

// ============================================================================
// DISPOSAL COMPLETENESS
// ============================================================================

#[test]
fn test_integration_repeated_mount_cycles_do_not_leak() {
    let ledger = HeadlessLedger::new();
    let factory = HeadlessFactory::new(ledger.clone());
    let mut host = SimulatedHost::new(1280, 720);
    let mut backdrop = Backdrop::new(seeded(1));

    for cycle in 0..25 {
        assert_eq!(backdrop.mount(&mut host, &factory, cycle % 2 == 0), MountStatus::Mounted);
        run_frames(&mut host, &mut backdrop, 10, Duration::from_millis(16));
        backdrop.set_dark(cycle % 2 != 0);
        host.dispatch_pointer(&mut backdrop, 100.0, 100.0);
        host.dispatch_resize(&mut backdrop, 1280 - cycle, 720);

        let report = backdrop.unmount(&mut host).expect("mounted backdrop must unmount");
        assert_eq!(report.materials_disposed, 13);
        assert_eq!(report.geometries_disposed, 14);

        let counts = ledger.counts();
        assert!(counts.is_balanced(), "cycle {}: {:?}", cycle, counts);
        assert_eq!(counts.invalid_operations, 0);
        assert!(host.is_quiescent(), "cycle {}: host registrations left", cycle);
    }

    let counts = ledger.counts();
    assert_eq!(counts.renderers_created, 25);
    assert_eq!(counts.materials_created, 25 * 13);
    assert_eq!(counts.renders_after_dispose, 0);
}

// ============================================================================
// FRAME-RATE CAP
// ============================================================================

#[test]
fn test_integration_frame_cap_1ms_steps() {
    let factory = HeadlessFactory::new(HeadlessLedger::new());
    let mut host = SimulatedHost::new(800, 600);
    let mut backdrop = Backdrop::new(seeded(2));
    backdrop.mount(&mut host, &factory, true);

    run_frames(&mut host, &mut backdrop, 1000, Duration::from_millis(1));

    let renders = factory.ledger().counts().render_calls;
    assert!(renders <= 31, "{} renders in 1000ms", renders);
    assert_eq!(backdrop.stats().driver.ticks, 1000);
    backdrop.unmount(&mut host);
}

#[test]
fn test_integration_scenario_600_ticks_at_16ms() {
    let factory = HeadlessFactory::new(HeadlessLedger::new());
    let mut host = SimulatedHost::new(1920, 1080);
    let mut backdrop = Backdrop::new(seeded(3));
    assert_eq!(backdrop.mount(&mut host, &factory, true), MountStatus::Mounted);

    run_frames(&mut host, &mut backdrop, 600, Duration::from_millis(16));

    let renders = factory.ledger().counts().render_calls;
    assert!((299..=301).contains(&renders), "{} renders", renders);

    backdrop.unmount(&mut host);
    let counts = factory.ledger().counts();
    assert!(counts.is_balanced());
    assert_eq!(counts.live_materials(), 0);
    assert_eq!(counts.live_geometries(), 0);
    assert!(host.is_quiescent());
}

// ============================================================================
// POINTER THROTTLING AND CAMERA EASING
// ============================================================================

#[test]
fn test_integration_pointer_burst_updates_target_once() {
    let factory = HeadlessFactory::new(HeadlessLedger::new());
    let mut host = SimulatedHost::new(1000, 500);
    let mut backdrop = Backdrop::new(seeded(4));
    backdrop.mount(&mut host, &factory, true);

    for i in 0..100 {
        host.dispatch_pointer(&mut backdrop, i as f32 * 10.0, 250.0);
        host.advance(Duration::from_micros(490));
    }

    let stats = backdrop.stats().pointer;
    assert_eq!(stats.accepted, 1);
    assert_eq!(stats.dropped, 99);
    assert_eq!(backdrop.pointer_state().target, Vec2::new(-5.0, 0.0));
    backdrop.unmount(&mut host);
}

#[test]
fn test_integration_camera_converges_on_target() {
    let factory = HeadlessFactory::new(HeadlessLedger::new());
    let mut host = SimulatedHost::new(1000, 500);
    let mut backdrop = Backdrop::new(seeded(5));
    backdrop.mount(&mut host, &factory, true);

    host.dispatch_pointer(&mut backdrop, 1000.0, 0.0);
    let target = backdrop.pointer_state().target;
    assert_eq!(target, Vec2::new(5.0, 3.0));

    let distance = |b: &Backdrop| b.scene().unwrap().camera().planar_distance_to(target);
    let mut last = distance(&backdrop);
    let mut work_ticks = 0;
    while last > 0.1 {
        let before = backdrop.stats().driver.work_ticks;
        host.step(&mut backdrop, Duration::from_millis(33));
        if backdrop.stats().driver.work_ticks > before {
            let now = distance(&backdrop);
            assert!(now < last);
            last = now;
            work_ticks += 1;
        }
        assert!(work_ticks < 500, "camera did not converge");
    }

    let camera = backdrop.scene().unwrap().camera();
    assert_eq!(camera.position().z, 15.0);
    backdrop.unmount(&mut host);
}

// ============================================================================
// POST-TEARDOWN SILENCE
// ============================================================================

#[test]
fn test_integration_tick_after_teardown_is_noop() {
    let ledger = HeadlessLedger::new();
    let factory = HeadlessFactory::new(ledger.clone());
    let mut host = SimulatedHost::new(800, 600).with_unreliable_frame_cancel();
    let mut backdrop = Backdrop::new(seeded(6));
    backdrop.mount(&mut host, &factory, true);
    run_frames(&mut host, &mut backdrop, 20, Duration::from_millis(16));

    let request = host.last_frame_request().expect("running loop has a request");
    backdrop.unmount(&mut host);
    assert_eq!(host.pending_frames(), 1);
    let before = ledger.counts();

    host.advance(Duration::from_millis(100));
    host.force_frame(&mut backdrop, request);
    host.pump_frames(&mut backdrop);

    assert_eq!(ledger.counts(), before);
    assert_eq!(ledger.counts().renders_after_dispose, 0);
    assert_eq!(host.pending_frames(), 0);
    assert_eq!(backdrop.state(), LifecycleState::Unmounted);
    assert_eq!(backdrop.on_frame(&mut host, request), TickOutcome::Stale);
}

#[test]
fn test_integration_listeners_removed_on_unmount() {
    let factory = HeadlessFactory::new(HeadlessLedger::new());
    let mut host = SimulatedHost::new(800, 600);
    let mut backdrop = Backdrop::new(seeded(7));
    backdrop.mount(&mut host, &factory, false);
    assert_eq!(host.listener_count_of(ListenerKind::PointerMove), 1);

    backdrop.unmount(&mut host);

    assert!(!host.dispatch_pointer(&mut backdrop, 10.0, 10.0));
    assert!(!host.dispatch_resize(&mut backdrop, 10, 10));
    assert_eq!(host.listener_count(), 0);
}

// ============================================================================
// THEME
// ============================================================================

#[test]
fn test_integration_theme_toggle_is_idempotent() {
    let ledger = HeadlessLedger::new();
    let factory = HeadlessFactory::new(ledger.clone());
    let mut host = SimulatedHost::new(800, 600);
    let mut backdrop = Backdrop::new(seeded(8));
    backdrop.mount(&mut host, &factory, true);

    let snapshot = |b: &Backdrop| -> Vec<_> {
        b.scene().unwrap().materials().iter().map(|m| m.desc().clone()).collect()
    };

    backdrop.set_dark(false);
    let first = snapshot(&backdrop);
    backdrop.set_dark(true);
    backdrop.set_dark(false);
    let second = snapshot(&backdrop);

    assert_eq!(first, second);
    assert_eq!(ledger.counts().materials_created, 13);
    backdrop.unmount(&mut host);
}
