use std::fs;
use std::path::{Path, PathBuf};

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::{CanvasError, CanvasResult};

/// Spacing rules for filling gaps between pointer samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeSettings {
    /// Target distance in pixels between interpolated samples
    pub spacing: f32,
    /// Motion at or below this distance is treated as stationary
    pub min_distance: f32,
}

impl Default for StrokeSettings {
    fn default() -> Self {
        Self {
            spacing: 10.0,
            min_distance: 1.0,
        }
    }
}

/// World-space extent of the painting surface, identical on both mapped axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceExtent {
    pub world_min: f32,
    pub world_max: f32,
}

impl Default for SurfaceExtent {
    fn default() -> Self {
        Self {
            world_min: -5.0,
            world_max: 5.0,
        }
    }
}

/// Everything needed to set up a canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing keys fall back to the defaults below
pub struct CanvasConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub background: Color32,
    pub brush_size: u32,
    /// Samples written per spray application
    pub spray_density: usize,
    pub stroke: StrokeSettings,
    pub surface: SurfaceExtent,
    /// PNG stamp for the Ball tool. When unset a disc is generated.
    pub splash_template_path: Option<PathBuf>,
    pub builtin_splash_diameter: u32,
    /// Fixed seed for the spray tool; random when unset
    pub rng_seed: Option<u64>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            canvas_width: 512,
            canvas_height: 512,
            background: Color32::WHITE,
            brush_size: 5,
            spray_density: 50,
            stroke: StrokeSettings::default(),
            surface: SurfaceExtent::default(),
            splash_template_path: None,
            builtin_splash_diameter: 48,
            rng_seed: None,
        }
    }
}

impl CanvasConfig {
    /// Square canvas with otherwise default settings
    pub fn with_size(size: u32) -> Self {
        Self {
            canvas_width: size,
            canvas_height: size,
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> CanvasResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> CanvasResult<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        log::info!("Loading canvas config from {}", path.as_ref().display());
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> CanvasResult<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(CanvasError::InvalidCanvasSize {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        let SurfaceExtent { world_min, world_max } = self.surface;
        if !world_min.is_finite() || !world_max.is_finite() || world_max <= world_min {
            return Err(CanvasError::InvalidSurfaceExtent {
                min: world_min,
                max: world_max,
            });
        }
        if self.builtin_splash_diameter == 0 && self.splash_template_path.is_none() {
            return Err(CanvasError::InvalidSplashTemplate { width: 0, height: 0 });
        }
        Ok(())
    }
}
