/// Materials owned by a scene
///
/// A `Material` is the CPU mirror of one backend material. It is not `Clone`:
/// copying one would alias a backend handle and break exactly-once disposal.
/// Use `duplicate` to get an independent backend material with the same look.

use crate::config::PaletteConfig;
use crate::error::Result;
use crate::renderer::{MaterialDesc, MaterialFlags, MaterialHandle, MaterialKind, Renderer};
use crate::{backdrop_debug, backdrop_warn};
use super::color::Color;

/// One backend material plus its current descriptor
#[derive(Debug)]
pub struct Material {
    handle: MaterialHandle,
    desc: MaterialDesc,
}

impl Material {
    /// Create a backend material from a descriptor
    pub fn create(renderer: &mut dyn Renderer, desc: MaterialDesc) -> Result<Self> {
        let handle = renderer.create_material(&desc)?;
        Ok(Self { handle, desc })
    }

    pub fn handle(&self) -> MaterialHandle {
        self.handle
    }

    pub fn desc(&self) -> &MaterialDesc {
        &self.desc
    }

    /// Change colour and opacity in place. The handle is kept.
    pub fn set_appearance(
        &mut self,
        renderer: &mut dyn Renderer,
        color: Color,
        opacity: f32,
    ) -> Result<()> {
        let desc = MaterialDesc { color, opacity, ..self.desc.clone() };
        renderer.update_material(self.handle, &desc)?;
        self.desc = desc;
        Ok(())
    }

    /// Create a second backend material with the same descriptor
    pub fn duplicate(&self, renderer: &mut dyn Renderer) -> Result<Self> {
        Self::create(renderer, self.desc.clone())
    }

    /// Release the backend material. Consumes `self`, so it runs at most once.
    pub fn dispose(self, renderer: &mut dyn Renderer) -> Result<()> {
        renderer.dispose_material(self.handle)
    }
}

/// The translucent shape materials of one scene
///
/// Shapes reference these by index; the pool is smaller than the shape count
/// and materials are reused round-robin.
#[derive(Debug)]
pub struct MaterialPool {
    materials: Vec<Material>,
    palette: PaletteConfig,
}

impl MaterialPool {
    /// Descriptor of material `index` for a theme
    pub fn shape_material_desc(palette: &PaletteConfig, index: usize, is_dark: bool) -> MaterialDesc {
        let tone = palette.tone(is_dark);
        let hue = palette.base_hue + index as f32 * palette.hue_step;
        MaterialDesc {
            kind: MaterialKind::Mesh,
            color: Color::from_hsl(hue, palette.saturation, tone.lightness),
            opacity: tone.opacity,
            flags: MaterialFlags::TRANSPARENT | MaterialFlags::DOUBLE_SIDED,
        }
    }

    /// Create `palette.material_count` materials for a theme
    ///
    /// On failure every material created so far is released before the
    /// error is returned.
    pub fn create(renderer: &mut dyn Renderer, palette: &PaletteConfig, is_dark: bool) -> Result<Self> {
        let mut materials = Vec::with_capacity(palette.material_count);

        for index in 0..palette.material_count {
            let desc = Self::shape_material_desc(palette, index, is_dark);
            match Material::create(renderer, desc) {
                Ok(material) => materials.push(material),
                Err(err) => {
                    let mut partial = Self { materials, palette: palette.clone() };
                    let released = partial.dispose(renderer);
                    backdrop_warn!(
                        "backdrop::MaterialPool",
                        "material {} failed ({}), released {} partial material(s)",
                        index, err, released
                    );
                    return Err(err);
                }
            }
        }

        backdrop_debug!(
            "backdrop::MaterialPool",
            "created {} materials (dark={})", materials.len(), is_dark
        );
        Ok(Self { materials, palette: palette.clone() })
    }

    /// Recompute colour and opacity of every material in place
    pub fn update(&mut self, renderer: &mut dyn Renderer, is_dark: bool) -> Result<()> {
        for (index, material) in self.materials.iter_mut().enumerate() {
            let desc = Self::shape_material_desc(&self.palette, index, is_dark);
            material.set_appearance(renderer, desc.color, desc.opacity)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Material> {
        self.materials.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }

    /// Material index used by shape `shape_index`
    pub fn index_for_shape(&self, shape_index: usize) -> Option<usize> {
        if self.materials.is_empty() {
            None
        } else {
            Some(shape_index % self.materials.len())
        }
    }

    /// Material used by shape `shape_index`
    pub fn for_shape(&self, shape_index: usize) -> Option<&Material> {
        self.index_for_shape(shape_index).and_then(|i| self.materials.get(i))
    }

    /// Release every material and empty the pool
    ///
    /// Returns the number of materials released. Failures are logged; the
    /// material is dropped either way so it can never be released twice.
    pub fn dispose(&mut self, renderer: &mut dyn Renderer) -> usize {
        let mut released = 0;
        for material in self.materials.drain(..) {
            let handle = material.handle();
            match material.dispose(renderer) {
                Ok(()) => released += 1,
                Err(err) => backdrop_warn!(
                    "backdrop::MaterialPool",
                    "failed to release material {:?}: {}", handle, err
                ),
            }
        }
        released
    }
}

#[cfg(test)]
#[path = "material_tests.rs"]
mod tests;
