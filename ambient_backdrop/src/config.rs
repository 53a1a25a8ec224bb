/// Backdrop configuration
///
/// Every tunable constant of the backdrop lives here. All structs are plain
/// data with public fields and a `Default` carrying the stock values.

use std::ops::RangeInclusive;
use std::time::Duration;
use glam::{Vec2, Vec3};
use crate::error::{Error, Result};

/// Lightness/opacity pair used for one theme
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeTone {
    pub lightness: f32,
    pub opacity: f32,
}

/// Shape material palette
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteConfig {
    /// Number of materials shared by all shapes
    pub material_count: usize,
    /// Hue of material 0, in turns ([0, 1))
    pub base_hue: f32,
    /// Hue offset added per material index
    pub hue_step: f32,
    pub saturation: f32,
    pub dark: ThemeTone,
    pub light: ThemeTone,
}

impl PaletteConfig {
    /// Tone for the given theme flag
    pub fn tone(&self, is_dark: bool) -> ThemeTone {
        if is_dark { self.dark } else { self.light }
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            material_count: 5,
            base_hue: 0.55,
            hue_step: 0.05,
            saturation: 0.6,
            dark: ThemeTone { lightness: 0.6, opacity: 0.15 },
            light: ThemeTone { lightness: 0.45, opacity: 0.12 },
        }
    }
}

/// Wireframe grid layout and colour
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    /// Number of lines per axis (horizontal and vertical)
    pub lines_per_axis: usize,
    /// Length of every line, also the spacing span
    pub extent: f32,
    /// Z of the grid plane
    pub depth: f32,
    pub hue: f32,
    pub saturation: f32,
    pub dark: ThemeTone,
    pub light: ThemeTone,
}

impl GridConfig {
    /// Tone for the given theme flag
    pub fn tone(&self, is_dark: bool) -> ThemeTone {
        if is_dark { self.dark } else { self.light }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            lines_per_axis: 7,
            extent: 30.0,
            depth: -10.0,
            hue: 0.6,
            saturation: 0.3,
            dark: ThemeTone { lightness: 0.35, opacity: 0.12 },
            light: ThemeTone { lightness: 0.75, opacity: 0.25 },
        }
    }
}

/// Renderer configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RendererConfig {
    /// Request multisampling from the backend
    pub antialias: bool,
    /// Clear to a transparent background so the page shows through
    pub transparent_background: bool,
    /// Upper bound applied to the surface device pixel ratio
    pub max_pixel_ratio: f32,
}

impl RendererConfig {
    /// Effective pixel ratio for a surface
    pub fn pixel_ratio(&self, surface_ratio: f32) -> f32 {
        surface_ratio.min(self.max_pixel_ratio)
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            antialias: true,
            transparent_background: true,
            max_pixel_ratio: 2.0,
        }
    }
}

/// Top-level backdrop configuration
#[derive(Debug, Clone, PartialEq)]
pub struct BackdropConfig {
    /// Number of floating shapes
    pub shape_count: usize,
    /// Size of the box shapes are spawned in, centred on the origin
    pub spawn_extent: Vec3,
    /// Per-axis rotation per work tick, before the random factor
    pub base_rotation_speed: Vec3,
    /// Random factor applied to the base rotation speed
    pub rotation_speed_factor: RangeInclusive<f32>,
    /// Vertical nudge per work tick
    pub float_amplitude: f32,
    /// Angular frequency of the float motion (rad/s)
    pub float_frequency: f32,
    /// Amplitude of the grid sway (radians)
    pub grid_sway_amplitude: f32,
    /// Angular frequency of the grid sway (rad/s)
    pub grid_sway_frequency: f32,

    /// Minimum time between work ticks
    pub frame_budget: Duration,
    /// Host timestamp quantisation tolerated by the frame budget check
    pub timer_resolution: Duration,
    /// Minimum time between accepted pointer samples
    pub pointer_sample_interval: Duration,
    /// Quiet period before a resize is applied
    pub resize_debounce: Duration,

    /// Fraction of the remaining distance covered per work tick
    pub camera_ease: f32,
    /// Normalized pointer → steering target scale
    pub steering_scale: Vec2,
    pub camera_position: Vec3,
    /// Vertical field of view in degrees
    pub field_of_view: f32,
    pub near: f32,
    pub far: f32,

    /// Scene RNG seed; `None` draws one from the OS
    pub seed: Option<u64>,

    pub palette: PaletteConfig,
    pub grid: GridConfig,
    pub renderer: RendererConfig,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            shape_count: 12,
            spawn_extent: Vec3::new(20.0, 20.0, 10.0),
            base_rotation_speed: Vec3::new(0.002, 0.001, 0.0005),
            rotation_speed_factor: 0.5..=1.0,
            float_amplitude: 0.002,
            float_frequency: 1.0,
            grid_sway_amplitude: 0.05,
            grid_sway_frequency: 0.1,
            frame_budget: Duration::from_millis(33),
            timer_resolution: Duration::from_millis(1),
            pointer_sample_interval: Duration::from_millis(50),
            resize_debounce: Duration::from_millis(200),
            camera_ease: 0.01,
            steering_scale: Vec2::new(5.0, 3.0),
            camera_position: Vec3::new(0.0, 0.0, 15.0),
            field_of_view: 75.0,
            near: 0.1,
            far: 1000.0,
            seed: None,
            palette: PaletteConfig::default(),
            grid: GridConfig::default(),
            renderer: RendererConfig::default(),
        }
    }
}

impl BackdropConfig {
    /// Check the configuration for values the backdrop cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.palette.material_count == 0 {
            return Err(Error::InvalidConfig("palette.material_count must be > 0".to_string()));
        }
        if self.grid.lines_per_axis == 0 {
            return Err(Error::InvalidConfig("grid.lines_per_axis must be > 0".to_string()));
        }
        let extents_positive = self.grid.extent.is_finite()
            && self.grid.extent > 0.0
            && self.spawn_extent.is_finite()
            && self.spawn_extent.min_element() > 0.0;
        if !extents_positive {
            return Err(Error::InvalidConfig("extents must be finite and positive".to_string()));
        }
        if !(self.camera_ease > 0.0 && self.camera_ease <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "camera_ease must be in (0, 1], got {}", self.camera_ease
            )));
        }
        if self.frame_budget <= self.timer_resolution {
            return Err(Error::InvalidConfig(
                "frame_budget must exceed timer_resolution".to_string(),
            ));
        }
        let (low, high) = (*self.rotation_speed_factor.start(), *self.rotation_speed_factor.end());
        if !(low.is_finite() && high.is_finite() && low <= high) {
            return Err(Error::InvalidConfig(format!(
                "rotation_speed_factor must be a finite, ordered range, got {}..={}", low, high
            )));
        }
        if !(self.near > 0.0 && self.far > self.near && self.far.is_finite()) {
            return Err(Error::InvalidConfig("clip planes must satisfy 0 < near < far".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
