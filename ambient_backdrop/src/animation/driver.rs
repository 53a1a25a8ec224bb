/// Animation driver
///
/// Two states. While `Running` exactly one frame request is pending with the
/// host; every delivered callback first requests the next one, then decides
/// from the frame budget whether this tick does work. A work tick moves the
/// shapes, sways the grid, eases the camera and renders once, in that order.
///
/// Callbacks whose request id is not the pending one (cancelled, or delivered
/// after `stop`) are stale and touch nothing.

use std::time::Duration;
use glam::{Vec2, Vec3};

use crate::backdrop_warn;
use crate::config::BackdropConfig;
use crate::host::{FrameRequestId, Host};
use crate::interaction::PointerState;
use crate::lifecycle::SceneHandle;
use crate::scene::{PerspectiveCamera, SceneGraph};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// No frame request pending
    Stopped,
    /// One frame request pending
    Running,
}

/// What a frame callback did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not the pending request; ignored
    Stale,
    /// Rescheduled only, inside the frame budget
    Skipped,
    /// Work tick, render succeeded
    Rendered,
    /// Work tick, render returned an error
    RenderFailed,
}

/// Tick counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverStats {
    /// Live callbacks (work or skipped)
    pub ticks: u64,
    pub work_ticks: u64,
    pub skipped_ticks: u64,
    pub stale_ticks: u64,
    pub failed_renders: u64,
}

#[derive(Debug)]
pub struct AnimationDriver {
    state: DriverState,
    pending: Option<FrameRequestId>,
    started_at: Duration,
    last_accepted: Duration,
    frame_budget: Duration,
    timer_resolution: Duration,
    float_amplitude: f32,
    float_frequency: f32,
    grid_sway_amplitude: f32,
    grid_sway_frequency: f32,
    camera_ease: f32,
    consecutive_failures: u32,
    stats: DriverStats,
}

impl AnimationDriver {
    pub fn new(config: &BackdropConfig) -> Self {
        Self {
            state: DriverState::Stopped,
            pending: None,
            started_at: Duration::ZERO,
            last_accepted: Duration::ZERO,
            frame_budget: config.frame_budget,
            timer_resolution: config.timer_resolution,
            float_amplitude: config.float_amplitude,
            float_frequency: config.float_frequency,
            grid_sway_amplitude: config.grid_sway_amplitude,
            grid_sway_frequency: config.grid_sway_frequency,
            camera_ease: config.camera_ease,
            consecutive_failures: 0,
            stats: DriverStats::default(),
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    /// The frame request currently pending with the host
    pub fn pending(&self) -> Option<FrameRequestId> {
        self.pending
    }

    pub fn stats(&self) -> DriverStats {
        self.stats
    }

    /// Stopped -> Running. The first work tick comes one frame budget later.
    pub fn start(&mut self, host: &mut dyn Host) {
        if self.is_running() {
            return;
        }
        let now = host.now();
        self.started_at = now;
        self.last_accepted = now;
        self.consecutive_failures = 0;
        self.pending = Some(host.request_frame());
        self.state = DriverState::Running;
    }

    /// Running -> Stopped, cancelling the pending request
    ///
    /// Returns whether a request was cancelled.
    pub fn stop(&mut self, host: &mut dyn Host) -> bool {
        self.state = DriverState::Stopped;
        match self.pending.take() {
            Some(request) => {
                host.cancel_frame(request);
                true
            }
            None => false,
        }
    }

    /// Whether a tick at `now` is past the frame budget
    pub fn is_work_tick(&self, now: Duration) -> bool {
        now.saturating_sub(self.last_accepted) >= self.frame_budget.saturating_sub(self.timer_resolution)
    }

    /// Count a callback that arrived with no scene to drive
    pub fn discard(&mut self, _request: FrameRequestId) -> TickOutcome {
        self.stats.stale_ticks += 1;
        TickOutcome::Stale
    }

    /// Handle a frame callback
    pub fn on_frame(
        &mut self,
        host: &mut dyn Host,
        request: FrameRequestId,
        scene: &mut SceneHandle,
        pointer: &PointerState,
    ) -> TickOutcome {
        if self.state != DriverState::Running || self.pending != Some(request) {
            self.stats.stale_ticks += 1;
            return TickOutcome::Stale;
        }

        self.pending = Some(host.request_frame());
        self.stats.ticks += 1;

        let now = host.now();
        if !self.is_work_tick(now) {
            self.stats.skipped_ticks += 1;
            return TickOutcome::Skipped;
        }
        self.last_accepted = now;
        self.stats.work_ticks += 1;

        let time = now.saturating_sub(self.started_at).as_secs_f32();
        let (renderer, graph, camera) = scene.frame_parts();
        self.advance(time, graph, camera, pointer.target);

        match renderer.render(graph, camera) {
            Ok(()) => {
                self.consecutive_failures = 0;
                TickOutcome::Rendered
            }
            Err(err) => {
                self.stats.failed_renders += 1;
                self.consecutive_failures += 1;
                if self.consecutive_failures == 1 {
                    backdrop_warn!("backdrop::Animation", "render failed: {}", err);
                }
                TickOutcome::RenderFailed
            }
        }
    }

    /// Motion of one work tick at global time `time` (seconds)
    pub fn advance(&self, time: f32, scene: &mut SceneGraph, camera: &mut PerspectiveCamera, target: Vec2) {
        for shape in scene.shapes_mut() {
            shape.advance(time, self.float_amplitude, self.float_frequency);
        }
        if let Some(grid) = scene.grid_mut() {
            grid.set_sway(time, self.grid_sway_amplitude, self.grid_sway_frequency);
        }
        camera.ease_toward(target, self.camera_ease);
        camera.look_at(Vec3::ZERO);
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
