/// Simulated host
///
/// A deterministic `Host` with a manual clock. Frame callbacks, listeners and
/// timers are plain tables; the `pump_frames`, `dispatch_*` and
/// `fire_due_timers` helpers deliver them to a `Backdrop` the way a browser
/// event loop would, one callback at a time.

use std::time::Duration;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::lifecycle::Backdrop;
use super::host::{
    FrameRequestId, Host, HostEvent, ListenerId, ListenerKind, SurfaceId, SurfaceInfo, TimerId, Viewport,
};

/// Registration counters, cumulative since creation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostCounters {
    pub surfaces_attached: usize,
    pub surfaces_detached: usize,
    pub frames_requested: usize,
    pub frames_cancelled: usize,
    pub frames_dispatched: usize,
    pub listeners_added: usize,
    pub listeners_removed: usize,
    pub timers_set: usize,
    pub timers_cleared: usize,
    pub timers_fired: usize,
}

pub struct SimulatedHost {
    clock: Duration,
    viewport: Viewport,
    pixel_ratio: f32,
    draw_context_available: bool,
    /// When set, `cancel_frame` is recorded but the callback still fires
    ignore_frame_cancel: bool,
    next_id: u64,
    surfaces: FxHashSet<SurfaceId>,
    pending_frames: Vec<FrameRequestId>,
    last_frame_request: Option<FrameRequestId>,
    listeners: FxHashMap<ListenerId, ListenerKind>,
    timers: FxHashMap<TimerId, Duration>,
    counters: HostCounters,
}

impl SimulatedHost {
    /// Host with a `width` x `height` viewport, pixel ratio 1 and a draw context
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            clock: Duration::ZERO,
            viewport: Viewport::new(width, height),
            pixel_ratio: 1.0,
            draw_context_available: true,
            ignore_frame_cancel: false,
            next_id: 1,
            surfaces: FxHashSet::default(),
            pending_frames: Vec::new(),
            last_frame_request: None,
            listeners: FxHashMap::default(),
            timers: FxHashMap::default(),
            counters: HostCounters::default(),
        }
    }

    pub fn with_pixel_ratio(mut self, pixel_ratio: f32) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }

    /// `attach_surface` returns `None`
    pub fn without_draw_context(mut self) -> Self {
        self.draw_context_available = false;
        self
    }

    /// Frame cancellation is not honoured, as on hosts without a reliable cancel
    pub fn with_unreliable_frame_cancel(mut self) -> Self {
        self.ignore_frame_cancel = true;
        self
    }

    pub fn set_draw_context_available(&mut self, available: bool) {
        self.draw_context_available = available;
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // ===== CLOCK =====

    pub fn advance(&mut self, delta: Duration) {
        self.clock += delta;
    }

    pub fn set_time(&mut self, time: Duration) {
        self.clock = time;
    }

    // ===== DISPATCH =====

    /// Deliver every pending frame callback
    ///
    /// Callbacks requested during delivery wait for the next pump, like a
    /// display refresh. Returns the number delivered.
    pub fn pump_frames(&mut self, backdrop: &mut Backdrop) -> usize {
        let due = std::mem::take(&mut self.pending_frames);
        let delivered = due.len();
        for request in due {
            self.counters.frames_dispatched += 1;
            backdrop.on_frame(self, request);
        }
        delivered
    }

    /// Advance the clock, fire due timers, then deliver pending frames
    pub fn step(&mut self, backdrop: &mut Backdrop, delta: Duration) -> usize {
        self.advance(delta);
        self.fire_due_timers(backdrop);
        self.pump_frames(backdrop)
    }

    /// Deliver a specific frame callback, pending or not
    ///
    /// Models a callback that was already dispatched when it was cancelled.
    pub fn force_frame(&mut self, backdrop: &mut Backdrop, request: FrameRequestId) {
        self.pending_frames.retain(|&r| r != request);
        self.counters.frames_dispatched += 1;
        backdrop.on_frame(self, request);
    }

    /// Deliver a pointer move if a pointer listener is registered
    pub fn dispatch_pointer(&mut self, backdrop: &mut Backdrop, x: f32, y: f32) -> bool {
        if self.listener_count_of(ListenerKind::PointerMove) == 0 {
            return false;
        }
        backdrop.handle_event(self, HostEvent::PointerMoved { x, y });
        true
    }

    /// Change the viewport and deliver a resize if a resize listener is registered
    pub fn dispatch_resize(&mut self, backdrop: &mut Backdrop, width: u32, height: u32) -> bool {
        self.viewport = Viewport::new(width, height);
        if self.listener_count_of(ListenerKind::Resize) == 0 {
            return false;
        }
        backdrop.handle_event(self, HostEvent::Resized { width, height });
        true
    }

    /// Fire every timer whose deadline has passed, in deadline order
    pub fn fire_due_timers(&mut self, backdrop: &mut Backdrop) -> usize {
        let mut due: Vec<(Duration, TimerId)> = self
            .timers
            .iter()
            .filter(|(_, deadline)| **deadline <= self.clock)
            .map(|(&id, &deadline)| (deadline, id))
            .collect();
        due.sort_by_key(|&(deadline, id)| (deadline, id.0));

        for &(_, id) in &due {
            self.timers.remove(&id);
            self.counters.timers_fired += 1;
            backdrop.on_timer(self, id);
        }
        due.len()
    }

    // ===== INSPECTION =====

    pub fn counters(&self) -> HostCounters {
        self.counters
    }

    pub fn pending_frames(&self) -> usize {
        self.pending_frames.len()
    }

    /// Most recent frame request, cancelled or not
    pub fn last_frame_request(&self) -> Option<FrameRequestId> {
        self.last_frame_request
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn listener_count_of(&self, kind: ListenerKind) -> usize {
        self.listeners.values().filter(|&&k| k == kind).count()
    }

    pub fn timer_count(&self) -> usize {
        self.timers.len()
    }

    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    /// No surface, frame, listener or timer is registered
    pub fn is_quiescent(&self) -> bool {
        self.surfaces.is_empty()
            && self.pending_frames.is_empty()
            && self.listeners.is_empty()
            && self.timers.is_empty()
    }
}

impl Host for SimulatedHost {
    fn attach_surface(&mut self) -> Option<SurfaceInfo> {
        if !self.draw_context_available {
            return None;
        }
        let id = SurfaceId(self.next_id());
        self.surfaces.insert(id);
        self.counters.surfaces_attached += 1;
        Some(SurfaceInfo {
            id,
            width: self.viewport.width,
            height: self.viewport.height,
            pixel_ratio: self.pixel_ratio,
        })
    }

    fn detach_surface(&mut self, surface: SurfaceId) {
        if self.surfaces.remove(&surface) {
            self.counters.surfaces_detached += 1;
        }
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn request_frame(&mut self) -> FrameRequestId {
        let id = FrameRequestId(self.next_id());
        self.pending_frames.push(id);
        self.last_frame_request = Some(id);
        self.counters.frames_requested += 1;
        id
    }

    fn cancel_frame(&mut self, request: FrameRequestId) {
        self.counters.frames_cancelled += 1;
        if !self.ignore_frame_cancel {
            self.pending_frames.retain(|&r| r != request);
        }
    }

    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId {
        let id = ListenerId(self.next_id());
        self.listeners.insert(id, kind);
        self.counters.listeners_added += 1;
        id
    }

    fn remove_listener(&mut self, listener: ListenerId) {
        if self.listeners.remove(&listener).is_some() {
            self.counters.listeners_removed += 1;
        }
    }

    fn set_timeout(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id());
        self.timers.insert(id, self.clock + delay);
        self.counters.timers_set += 1;
        id
    }

    fn clear_timeout(&mut self, timer: TimerId) {
        if self.timers.remove(&timer).is_some() {
            self.counters.timers_cleared += 1;
        }
    }

    fn now(&self) -> Duration {
        self.clock
    }
}

#[cfg(test)]
#[path = "simulated_host_tests.rs"]
mod tests;
