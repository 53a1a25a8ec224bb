/// Adapter that bridges winit window events to `HostEvent`s

use glam::Vec2;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::WindowEvent;

use super::host::{HostEvent, Viewport};

/// Translate a window event, `None` for events the backdrop ignores
pub fn translate_window_event(event: &WindowEvent) -> Option<HostEvent> {
    match event {
        WindowEvent::CursorMoved { position, .. } => {
            let p = pointer_position(*position);
            Some(HostEvent::PointerMoved { x: p.x, y: p.y })
        }
        WindowEvent::Resized(size) => {
            let viewport = viewport_from_size(*size);
            Some(HostEvent::Resized { width: viewport.width, height: viewport.height })
        }
        _ => None,
    }
}

pub fn pointer_position(position: PhysicalPosition<f64>) -> Vec2 {
    Vec2::new(position.x as f32, position.y as f32)
}

pub fn viewport_from_size(size: PhysicalSize<u32>) -> Viewport {
    Viewport::new(size.width, size.height)
}
