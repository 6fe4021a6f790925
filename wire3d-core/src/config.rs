/// Viewer configuration
///
/// Every projection and input constant lives here so front ends can size the
/// canvas to their surface and tune input response. Loaded from JSON with
/// missing fields falling back to the defaults.
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::projection::PixelSnap;

pub const DEFAULT_CANVAS_SIZE: u32 = 600;
pub const DEFAULT_FOCAL_LENGTH: f64 = 500.0;
pub const DEFAULT_DRAG_SENSITIVITY: f64 = 0.5;
pub const DEFAULT_ZOOM_STEP: f64 = 1.1;
pub const DEFAULT_PAN_STEP: f64 = 10.0;
pub const DEFAULT_MIN_ZOOM: f64 = 1e-3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Projection center in canvas pixels; the canvas midpoint when unset
    pub center: Option<[f64; 2]>,
    /// Camera distance in the perspective divide `f / (f + z)`
    pub focal_length: f64,
    /// Degrees of rotation per pixel of drag
    pub drag_sensitivity: f64,
    /// Multiplicative zoom factor per zoom step
    pub zoom_step: f64,
    /// Pan offset per step, in pixels
    pub pan_step: f64,
    /// Zoom is clamped to this floor
    pub min_zoom: f64,
    pub pixel_snap: PixelSnap,
}

impl ViewerConfig {
    /// Config for a canvas of the given size, everything else default
    pub fn with_canvas(width: u32, height: u32) -> Self {
        Self {
            canvas_width: width,
            canvas_height: height,
            ..Self::default()
        }
    }

    /// Projection center, defaulting to the middle of the canvas
    pub fn center(&self) -> (f64, f64) {
        match self.center {
            Some([x, y]) => (x, y),
            None => (
                f64::from(self.canvas_width) / 2.0,
                f64::from(self.canvas_height) / 2.0,
            ),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ConfigError::EmptyCanvas {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }

        positive("focal_length", self.focal_length)?;
        positive("zoom_step", self.zoom_step)?;
        positive("min_zoom", self.min_zoom)?;
        finite("drag_sensitivity", self.drag_sensitivity)?;
        finite("pan_step", self.pan_step)?;

        if let Some([x, y]) = self.center {
            finite("center", x)?;
            finite("center", y)?;
        }

        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        let config = Self::from_json_str(&text)?;
        log::info!("loaded viewer config from {}", path.display());
        Ok(config)
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_SIZE,
            canvas_height: DEFAULT_CANVAS_SIZE,
            center: None,
            focal_length: DEFAULT_FOCAL_LENGTH,
            drag_sensitivity: DEFAULT_DRAG_SENSITIVITY,
            zoom_step: DEFAULT_ZOOM_STEP,
            pan_step: DEFAULT_PAN_STEP,
            min_zoom: DEFAULT_MIN_ZOOM,
            pixel_snap: PixelSnap::default(),
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field })
    }
}
