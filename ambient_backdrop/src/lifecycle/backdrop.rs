/// Backdrop lifecycle manager
///
/// Owns the configuration, the theme flag, the scene handle of the current
/// mount and every registration made with the host. Host callbacks are routed
/// through the `on_*` methods; none of them return errors. Failures are
/// logged and contained.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::animation::{AnimationDriver, DriverState, DriverStats, TickOutcome};
use crate::config::BackdropConfig;
use crate::host::{FrameRequestId, Host, HostEvent, ListenerId, ListenerKind, TimerId};
use crate::interaction::{PointerSampler, PointerState, SamplerStats};
use crate::renderer::RendererFactory;
use crate::{backdrop_debug, backdrop_error, backdrop_info, backdrop_warn};
use super::scene_handle::SceneHandle;

const SOURCE: &str = "backdrop::Lifecycle";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Unmounted,
    Mounting,
    Active,
    Unmounting,
}

/// Why `mount` did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    AlreadyMounted,
    InvalidConfig,
    /// The host had no draw surface to give
    NoDrawContext,
    /// The renderer factory failed
    RendererUnavailable,
    /// Materials or grid could not be allocated
    SceneBuildFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountStatus {
    Mounted,
    Skipped(SkipReason),
}

/// What `unmount` released
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeardownReport {
    pub materials_disposed: usize,
    pub geometries_disposed: usize,
    pub listeners_removed: usize,
    pub frame_cancelled: bool,
    pub timer_cleared: bool,
    pub surface_detached: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackdropStats {
    pub driver: DriverStats,
    pub pointer: SamplerStats,
    pub mounts: u64,
    pub unmounts: u64,
    pub skipped_mounts: u64,
    pub theme_updates: u64,
    pub resizes_applied: u64,
}

pub struct Backdrop {
    config: BackdropConfig,
    state: LifecycleState,
    is_dark: bool,
    rng: StdRng,
    scene: Option<SceneHandle>,
    driver: AnimationDriver,
    sampler: PointerSampler,
    pointer_listener: Option<ListenerId>,
    resize_listener: Option<ListenerId>,
    resize_timer: Option<TimerId>,
    mounts: u64,
    unmounts: u64,
    skipped_mounts: u64,
    theme_updates: u64,
    resizes_applied: u64,
}

impl Backdrop {
    /// Create an unmounted backdrop
    pub fn new(config: BackdropConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            driver: AnimationDriver::new(&config),
            sampler: PointerSampler::from_config(&config),
            config,
            state: LifecycleState::Unmounted,
            is_dark: false,
            rng,
            scene: None,
            pointer_listener: None,
            resize_listener: None,
            resize_timer: None,
            mounts: 0,
            unmounts: 0,
            skipped_mounts: 0,
            theme_updates: 0,
            resizes_applied: 0,
        }
    }

    // ===== GETTERS =====

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == LifecycleState::Active
    }

    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    pub fn config(&self) -> &BackdropConfig {
        &self.config
    }

    /// Scene of the current mount
    pub fn scene(&self) -> Option<&SceneHandle> {
        self.scene.as_ref()
    }

    pub fn pointer_state(&self) -> &PointerState {
        self.sampler.state()
    }

    pub fn driver_state(&self) -> DriverState {
        self.driver.state()
    }

    pub fn stats(&self) -> BackdropStats {
        BackdropStats {
            driver: self.driver.stats(),
            pointer: self.sampler.stats(),
            mounts: self.mounts,
            unmounts: self.unmounts,
            skipped_mounts: self.skipped_mounts,
            theme_updates: self.theme_updates,
            resizes_applied: self.resizes_applied,
        }
    }

    // ===== MOUNT =====

    /// Acquire a surface, build the scene, register listeners and start the loop
    ///
    /// Any skip leaves the backdrop unmounted with nothing acquired.
    pub fn mount(&mut self, host: &mut dyn Host, factory: &dyn RendererFactory, is_dark: bool) -> MountStatus {
        if self.state != LifecycleState::Unmounted {
            backdrop_warn!(SOURCE, "mount ignored: already {:?}", self.state);
            return self.skip(SkipReason::AlreadyMounted);
        }
        if let Err(err) = self.config.validate() {
            backdrop_warn!(SOURCE, "mount skipped: {}", err);
            return self.skip(SkipReason::InvalidConfig);
        }

        self.state = LifecycleState::Mounting;
        self.is_dark = is_dark;

        let Some(surface) = host.attach_surface() else {
            backdrop_info!(SOURCE, "mount skipped: no draw context available");
            self.state = LifecycleState::Unmounted;
            return self.skip(SkipReason::NoDrawContext);
        };

        let renderer = match factory.create_renderer(&surface, &self.config.renderer) {
            Ok(renderer) => renderer,
            Err(err) => {
                backdrop_warn!(SOURCE, "mount skipped: renderer unavailable: {}", err);
                host.detach_surface(surface.id);
                self.state = LifecycleState::Unmounted;
                return self.skip(SkipReason::RendererUnavailable);
            }
        };

        let handle = match SceneHandle::create(surface, renderer, &self.config, &mut self.rng, is_dark) {
            Ok(handle) => handle,
            Err(err) => {
                backdrop_warn!(SOURCE, "mount skipped: scene build failed: {}", err);
                host.detach_surface(surface.id);
                self.state = LifecycleState::Unmounted;
                return self.skip(SkipReason::SceneBuildFailed);
            }
        };
        self.scene = Some(handle);

        self.pointer_listener = Some(host.add_listener(ListenerKind::PointerMove));
        self.resize_listener = Some(host.add_listener(ListenerKind::Resize));
        self.sampler.reset();
        self.driver.start(host);

        self.state = LifecycleState::Active;
        self.mounts += 1;
        backdrop_info!(
            SOURCE,
            "mounted on surface {} ({}x{}, dark={})",
            surface.id.0, surface.width, surface.height, is_dark
        );
        MountStatus::Mounted
    }

    fn skip(&mut self, reason: SkipReason) -> MountStatus {
        self.skipped_mounts += 1;
        MountStatus::Skipped(reason)
    }

    // ===== HOST CALLBACKS =====

    /// Frame callback
    pub fn on_frame(&mut self, host: &mut dyn Host, request: FrameRequestId) -> TickOutcome {
        let Some(scene) = self.scene.as_mut() else {
            return self.driver.discard(request);
        };
        self.driver.on_frame(host, request, scene, self.sampler.state())
    }

    /// Pointer listener; returns whether the sample was accepted
    pub fn on_pointer_move(&mut self, host: &mut dyn Host, x: f32, y: f32) -> bool {
        if !self.is_active() {
            return false;
        }
        self.sampler.on_pointer_move(x, y, host.viewport(), host.now())
    }

    /// Resize listener: (re)arm the debounce timer
    pub fn on_resize(&mut self, host: &mut dyn Host) {
        if !self.is_active() {
            return;
        }
        if let Some(timer) = self.resize_timer.take() {
            host.clear_timeout(timer);
        }
        self.resize_timer = Some(host.set_timeout(self.config.resize_debounce));
    }

    /// Timer callback; returns whether the timer was ours
    pub fn on_timer(&mut self, host: &mut dyn Host, timer: TimerId) -> bool {
        if self.resize_timer != Some(timer) {
            return false;
        }
        self.resize_timer = None;

        let viewport = host.viewport();
        if let Some(scene) = self.scene.as_mut() {
            if scene.resize(viewport, &self.config) {
                self.resizes_applied += 1;
                backdrop_debug!(SOURCE, "resized to {}x{}", viewport.width, viewport.height);
            } else {
                backdrop_debug!(SOURCE, "resize to empty viewport ignored");
            }
        }
        true
    }

    /// Route a host event to its listener
    pub fn handle_event(&mut self, host: &mut dyn Host, event: HostEvent) {
        match event {
            HostEvent::PointerMoved { x, y } => {
                self.on_pointer_move(host, x, y);
            }
            HostEvent::Resized { .. } => self.on_resize(host),
        }
    }

    // ===== THEME =====

    /// Store the theme flag; while active, recolour materials in place first
    ///
    /// A failed pass keeps the previous flag, so the same call can be repeated.
    pub fn set_dark(&mut self, is_dark: bool) {
        if self.is_dark == is_dark {
            return;
        }

        let scene = match (self.state, self.scene.as_mut()) {
            (LifecycleState::Active, Some(scene)) => scene,
            _ => {
                self.is_dark = is_dark;
                return;
            }
        };
        // flag moves only after the whole pass succeeded
        match scene.apply_theme(&self.config, is_dark) {
            Ok(()) => {
                self.is_dark = is_dark;
                self.theme_updates += 1;
                backdrop_debug!(SOURCE, "theme switched to dark={}", is_dark);
            }
            Err(err) => backdrop_warn!(SOURCE, "theme update failed, keeping dark={}: {}", self.is_dark, err),
        }
    }

    // ===== UNMOUNT =====

    /// Stop the loop, drop every host registration, then release GPU resources
    ///
    /// `None` when not mounted.
    pub fn unmount(&mut self, host: &mut dyn Host) -> Option<TeardownReport> {
        if self.state != LifecycleState::Active {
            return None;
        }
        self.state = LifecycleState::Unmounting;

        let mut report = TeardownReport {
            frame_cancelled: self.driver.stop(host),
            ..TeardownReport::default()
        };

        for listener in [self.pointer_listener.take(), self.resize_listener.take()].into_iter().flatten() {
            host.remove_listener(listener);
            report.listeners_removed += 1;
        }

        if let Some(timer) = self.resize_timer.take() {
            host.clear_timeout(timer);
            report.timer_cleared = true;
        }

        if let Some(scene) = self.scene.take() {
            host.detach_surface(scene.surface().id);
            report.surface_detached = true;

            let released = scene.dispose();
            report.materials_disposed = released.materials;
            report.geometries_disposed = released.geometries;
        }

        self.state = LifecycleState::Unmounted;
        self.unmounts += 1;
        backdrop_info!(
            SOURCE,
            "unmounted: released {} material(s), {} geometr(ies), {} listener(s)",
            report.materials_disposed, report.geometries_disposed, report.listeners_removed
        );
        Some(report)
    }
}

impl Drop for Backdrop {
    fn drop(&mut self) {
        if self.state == LifecycleState::Active {
            backdrop_error!(
                SOURCE,
                "backdrop dropped while mounted: frame request, listeners and surface leak in the host"
            );
        }
    }
}

#[cfg(test)]
#[path = "backdrop_tests.rs"]
mod tests;
