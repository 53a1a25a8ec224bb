/// Host trait - the environment seam
///
/// Everything the backdrop registers with the host (surface, frame request,
/// listeners, timers) is identified by an id and must be released through
/// the same trait.

use std::time::Duration;

/// Pending per-frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameRequestId(pub u64);

/// Registered event listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Armed one-shot timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

/// Attached draw surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

/// Event families the backdrop listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    PointerMove,
    Resize,
}

/// Visible area in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width / height, `None` for an empty viewport
    pub fn aspect(&self) -> Option<f32> {
        if self.is_empty() {
            None
        } else {
            Some(self.width as f32 / self.height as f32)
        }
    }
}

/// Draw surface handed out by `Host::attach_surface`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceInfo {
    pub id: SurfaceId,
    /// Logical size
    pub width: u32,
    pub height: u32,
    /// Device pixel ratio of the display
    pub pixel_ratio: f32,
}

/// Input event delivered by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// Pointer position in device pixels, origin top-left
    PointerMoved { x: f32, y: f32 },
    /// Viewport changed size
    Resized { width: u32, height: u32 },
}

/// Host environment
///
/// Single-threaded: callbacks for frames, listeners and timers are delivered
/// between other calls, never re-entrantly.
pub trait Host {
    /// Create a draw surface and attach it to the container
    ///
    /// Returns `None` when no draw context is available.
    fn attach_surface(&mut self) -> Option<SurfaceInfo>;

    /// Detach and remove a draw surface
    fn detach_surface(&mut self, surface: SurfaceId);

    /// Current viewport
    fn viewport(&self) -> Viewport;

    /// Schedule one frame callback
    fn request_frame(&mut self) -> FrameRequestId;

    /// Cancel a pending frame callback
    fn cancel_frame(&mut self, request: FrameRequestId);

    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId;

    fn remove_listener(&mut self, listener: ListenerId);

    /// Arm a one-shot timer
    fn set_timeout(&mut self, delay: Duration) -> TimerId;

    fn clear_timeout(&mut self, timer: TimerId);

    /// Monotonic time since the host started
    fn now(&self) -> Duration;
}
