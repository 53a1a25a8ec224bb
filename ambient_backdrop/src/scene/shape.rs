/// Floating shape instance
///
/// A pose plus the per-instance motion parameters. Geometry comes from the
/// shared `GeometryPool` by kind; the material is a handle borrowed from the
/// scene's `MaterialPool`.

use glam::{EulerRot, Mat4, Quat, Vec3};
use crate::renderer::MaterialHandle;
use crate::resource::ShapeKind;

#[derive(Debug, Clone)]
pub struct ShapeInstance {
    kind: ShapeKind,
    material_index: usize,
    material: MaterialHandle,
    position: Vec3,
    /// Euler angles (XYZ order), radians
    rotation: Vec3,
    /// Rotation added per work tick
    rotation_speed: Vec3,
    /// Float phase offset, the instance index
    phase: f32,
}

impl ShapeInstance {
    pub fn new(
        kind: ShapeKind,
        material_index: usize,
        material: MaterialHandle,
        position: Vec3,
        rotation: Vec3,
        rotation_speed: Vec3,
        phase: f32,
    ) -> Self {
        Self { kind, material_index, material, position, rotation, rotation_speed, phase }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Index into the scene's material pool
    pub fn material_index(&self) -> usize {
        self.material_index
    }

    pub fn material(&self) -> MaterialHandle {
        self.material
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn rotation_speed(&self) -> Vec3 {
        self.rotation_speed
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Apply one work tick of motion
    ///
    /// Rotation advances by the stored speed; the vertical position is nudged
    /// by `sin(time * frequency + phase) * amplitude`.
    pub fn advance(&mut self, time: f32, amplitude: f32, frequency: f32) {
        self.rotation += self.rotation_speed;
        self.position.y += (time * frequency + self.phase).sin() * amplitude;
    }

    /// Model matrix
    pub fn world_matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_rotation_translation(rotation, self.position)
    }
}
