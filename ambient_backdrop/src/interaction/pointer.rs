/// Throttled pointer sampler
///
/// Converts pointer positions to normalized device coordinates and a camera
/// steering target. At most one sample is accepted per interval; events in
/// between are dropped, not queued.

use std::time::Duration;
use glam::Vec2;

use crate::config::BackdropConfig;
use crate::host::Viewport;

/// Last accepted pointer sample and the steering target derived from it
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    /// Normalized device coordinates, both axes in [-1, 1], +Y up
    pub pointer: Vec2,
    /// Point the camera eases toward
    pub target: Vec2,
}

/// Sampler counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SamplerStats {
    pub accepted: u64,
    pub dropped: u64,
}

#[derive(Debug, Clone)]
pub struct PointerSampler {
    interval: Duration,
    scale: Vec2,
    last_accepted: Option<Duration>,
    state: PointerState,
    stats: SamplerStats,
}

impl PointerSampler {
    pub fn new(interval: Duration, scale: Vec2) -> Self {
        Self {
            interval,
            scale,
            last_accepted: None,
            state: PointerState::default(),
            stats: SamplerStats::default(),
        }
    }

    pub fn from_config(config: &BackdropConfig) -> Self {
        Self::new(config.pointer_sample_interval, config.steering_scale)
    }

    /// Device pixels (origin top-left, +Y down) to normalized device coordinates
    ///
    /// Positions outside the viewport are clamped. `None` for an empty viewport.
    pub fn normalize(x: f32, y: f32, viewport: Viewport) -> Option<Vec2> {
        if viewport.is_empty() {
            return None;
        }
        let nx = x / viewport.width as f32 * 2.0 - 1.0;
        let ny = -(y / viewport.height as f32 * 2.0 - 1.0);
        Some(Vec2::new(nx, ny).clamp(Vec2::NEG_ONE, Vec2::ONE))
    }

    /// Offer a pointer event; returns whether it was accepted
    pub fn on_pointer_move(&mut self, x: f32, y: f32, viewport: Viewport, now: Duration) -> bool {
        if let Some(last) = self.last_accepted {
            if now.saturating_sub(last) < self.interval {
                self.stats.dropped += 1;
                return false;
            }
        }

        let Some(pointer) = Self::normalize(x, y, viewport) else {
            self.stats.dropped += 1;
            return false;
        };

        self.state = PointerState { pointer, target: pointer * self.scale };
        self.last_accepted = Some(now);
        self.stats.accepted += 1;
        true
    }

    pub fn state(&self) -> &PointerState {
        &self.state
    }

    pub fn stats(&self) -> SamplerStats {
        self.stats
    }

    /// Forget the last sample and return the target to the origin
    pub fn reset(&mut self) {
        self.last_accepted = None;
        self.state = PointerState::default();
    }
}

#[cfg(test)]
#[path = "pointer_tests.rs"]
mod tests;
