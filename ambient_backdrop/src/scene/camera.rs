/// Perspective camera
///
/// Keeps position, aim point and lens parameters, and recomputes its view and
/// projection matrices whenever one of them changes.

use glam::{Mat4, Vec2, Vec3};

#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    position: Vec3,
    target: Vec3,
    /// Vertical field of view in degrees
    field_of_view: f32,
    aspect: f32,
    near: f32,
    far: f32,
    view_matrix: Mat4,
    projection_matrix: Mat4,
}

impl PerspectiveCamera {
    /// Create a camera at `position` aimed at the origin
    pub fn new(field_of_view: f32, aspect: f32, near: f32, far: f32, position: Vec3) -> Self {
        let mut camera = Self {
            position,
            target: Vec3::ZERO,
            field_of_view,
            aspect: sanitize_aspect(aspect),
            near,
            far,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
        };
        camera.update_view_matrix();
        camera.update_projection_matrix();
        camera
    }

    // ===== GETTERS =====

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Point the camera is aimed at
    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn field_of_view(&self) -> f32 {
        self.field_of_view
    }

    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Combined view-projection matrix (projection * view)
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    // ===== SETTERS =====

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_view_matrix();
    }

    /// Aim the camera at a world-space point
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
        self.update_view_matrix();
    }

    /// Set the aspect ratio and recompute the projection
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = sanitize_aspect(aspect);
        self.update_projection_matrix();
    }

    /// Move a fraction of the remaining distance toward `target` on X and Y
    ///
    /// Z is left alone. The view matrix is not refreshed; call `look_at`
    /// afterwards to re-aim.
    pub fn ease_toward(&mut self, target: Vec2, factor: f32) {
        self.position.x += (target.x - self.position.x) * factor;
        self.position.y += (target.y - self.position.y) * factor;
    }

    /// Planar (X/Y) distance between the camera and a steering target
    pub fn planar_distance_to(&self, target: Vec2) -> f32 {
        Vec2::new(self.position.x, self.position.y).distance(target)
    }

    fn update_view_matrix(&mut self) {
        self.view_matrix = Mat4::look_at_rh(self.position, self.target, Vec3::Y);
    }

    fn update_projection_matrix(&mut self) {
        self.projection_matrix = Mat4::perspective_rh(
            self.field_of_view.to_radians(),
            self.aspect,
            self.near,
            self.far,
        );
    }
}

fn sanitize_aspect(aspect: f32) -> f32 {
    if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
