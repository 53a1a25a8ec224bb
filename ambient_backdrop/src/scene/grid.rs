/// Wireframe grid group
///
/// `lines_per_axis` horizontal and `lines_per_axis` vertical line segments in
/// a plane behind the shapes. Horizontal lines share the base material;
/// every vertical line owns a duplicate of it so each can be released on its
/// own. The group owns all of its geometry and materials and releases them in
/// `dispose`.

use glam::Vec3;

use crate::config::GridConfig;
use crate::error::Result;
use crate::renderer::{GeometryHandle, MaterialDesc, MaterialFlags, MaterialHandle, MaterialKind, Renderer};
use crate::resource::{Color, DisposalCount, Geometry, Material};
use crate::{backdrop_debug, backdrop_warn};

/// Direction of a grid line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineOrientation {
    /// Parallel to X
    Horizontal,
    /// Parallel to Y
    Vertical,
}

#[derive(Debug)]
enum LineMaterial {
    Shared,
    Own(Material),
}

/// One line segment of the grid
#[derive(Debug)]
pub struct GridLine {
    orientation: LineOrientation,
    offset: f32,
    geometry: GeometryHandle,
    material: LineMaterial,
}

impl GridLine {
    pub fn orientation(&self) -> LineOrientation {
        self.orientation
    }

    /// Distance from the grid centre, across the line
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn geometry(&self) -> GeometryHandle {
        self.geometry
    }

    /// Whether this line owns its material
    pub fn owns_material(&self) -> bool {
        matches!(self.material, LineMaterial::Own(_))
    }
}

#[derive(Debug)]
pub struct GridGroup {
    base_material: Material,
    lines: Vec<GridLine>,
    rotation: Vec3,
}

impl GridGroup {
    /// Line material descriptor for a theme
    ///
    /// Used both when the grid is built and when it is recoloured.
    pub fn line_desc(config: &GridConfig, is_dark: bool) -> MaterialDesc {
        let tone = config.tone(is_dark);
        MaterialDesc {
            kind: MaterialKind::Line,
            color: Color::from_hsl(config.hue, config.saturation, tone.lightness),
            opacity: tone.opacity,
            flags: MaterialFlags::TRANSPARENT,
        }
    }

    /// Offsets of the lines along one axis, symmetric around zero
    pub fn line_offsets(config: &GridConfig) -> Vec<f32> {
        let count = config.lines_per_axis;
        if count <= 1 {
            return vec![0.0; count];
        }
        let half = config.extent * 0.5;
        let step = config.extent / (count - 1) as f32;
        (0..count).map(|i| -half + i as f32 * step).collect()
    }

    /// Build the grid
    ///
    /// On failure every resource created so far is released before the
    /// error is returned.
    pub fn build(renderer: &mut dyn Renderer, config: &GridConfig, is_dark: bool) -> Result<Self> {
        let base_material = Material::create(renderer, Self::line_desc(config, is_dark))?;
        let mut group = Self {
            base_material,
            lines: Vec::with_capacity(config.lines_per_axis * 2),
            rotation: Vec3::ZERO,
        };

        if let Err(err) = group.push_lines(renderer, config) {
            let released = group.dispose(renderer);
            backdrop_warn!(
                "backdrop::Grid",
                "grid build failed ({}), released {} material(s) and {} geometr(ies)",
                err, released.materials, released.geometries
            );
            return Err(err);
        }

        backdrop_debug!("backdrop::Grid", "built grid with {} lines", group.lines.len());
        Ok(group)
    }

    fn push_lines(&mut self, renderer: &mut dyn Renderer, config: &GridConfig) -> Result<()> {
        let half = config.extent * 0.5;
        let z = config.depth;

        for offset in Self::line_offsets(config) {
            let segment = Geometry::line(Vec3::new(-half, offset, z), Vec3::new(half, offset, z));
            let geometry = renderer.create_geometry(&segment)?;
            self.lines.push(GridLine {
                orientation: LineOrientation::Horizontal,
                offset,
                geometry,
                material: LineMaterial::Shared,
            });
        }

        for offset in Self::line_offsets(config) {
            let segment = Geometry::line(Vec3::new(offset, -half, z), Vec3::new(offset, half, z));
            let geometry = renderer.create_geometry(&segment)?;
            let material = match self.base_material.duplicate(renderer) {
                Ok(material) => material,
                Err(err) => {
                    if let Err(dispose_err) = renderer.dispose_geometry(geometry) {
                        backdrop_warn!("backdrop::Grid", "failed to release line geometry: {}", dispose_err);
                    }
                    return Err(err);
                }
            };
            self.lines.push(GridLine {
                orientation: LineOrientation::Vertical,
                offset,
                geometry,
                material: LineMaterial::Own(material),
            });
        }

        Ok(())
    }

    pub fn lines(&self) -> &[GridLine] {
        &self.lines
    }

    /// Material a line is drawn with
    pub fn line_material(&self, line: &GridLine) -> MaterialHandle {
        match &line.material {
            LineMaterial::Shared => self.base_material.handle(),
            LineMaterial::Own(material) => material.handle(),
        }
    }

    pub fn base_material(&self) -> &Material {
        &self.base_material
    }

    /// Number of backend materials owned by the group
    pub fn material_count(&self) -> usize {
        1 + self.lines.iter().filter(|l| l.owns_material()).count()
    }

    /// Number of backend geometries owned by the group
    pub fn geometry_count(&self) -> usize {
        self.lines.len()
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Set the group rotation from global time
    pub fn set_sway(&mut self, time: f32, amplitude: f32, frequency: f32) {
        let phase = time * frequency;
        self.rotation.x = phase.sin() * amplitude;
        self.rotation.y = phase.cos() * amplitude * 0.5;
    }

    /// Recolour every line material in place
    pub fn recolor(&mut self, renderer: &mut dyn Renderer, config: &GridConfig, is_dark: bool) -> Result<()> {
        let desc = Self::line_desc(config, is_dark);
        self.base_material.set_appearance(renderer, desc.color, desc.opacity)?;
        for line in &mut self.lines {
            if let LineMaterial::Own(material) = &mut line.material {
                material.set_appearance(renderer, desc.color, desc.opacity)?;
            }
        }
        Ok(())
    }

    /// Release every geometry and material of the group
    pub fn dispose(self, renderer: &mut dyn Renderer) -> DisposalCount {
        let mut released = DisposalCount::default();

        for line in self.lines {
            match renderer.dispose_geometry(line.geometry) {
                Ok(()) => released.geometries += 1,
                Err(err) => backdrop_warn!("backdrop::Grid", "failed to release line geometry: {}", err),
            }
            if let LineMaterial::Own(material) = line.material {
                match material.dispose(renderer) {
                    Ok(()) => released.materials += 1,
                    Err(err) => backdrop_warn!("backdrop::Grid", "failed to release line material: {}", err),
                }
            }
        }

        match self.base_material.dispose(renderer) {
            Ok(()) => released.materials += 1,
            Err(err) => backdrop_warn!("backdrop::Grid", "failed to release base line material: {}", err),
        }

        released
    }
}

#[cfg(test)]
#[path = "grid_tests.rs"]
mod tests;
