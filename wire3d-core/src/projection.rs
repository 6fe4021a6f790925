/// Perspective projection from shape space to canvas pixels
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::config::ViewerConfig;
use crate::error::ProjectionError;

/// Denominators closer to zero than this are treated as the camera plane
pub const DEPTH_EPSILON: f64 = 1e-9;

/// How projected coordinates are snapped to whole pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelSnap {
    /// Toward zero. On-canvas positions are biased by up to one pixel
    /// toward the top-left corner.
    #[default]
    Truncate,
    /// To the nearest pixel, halves away from zero
    Round,
}

impl PixelSnap {
    /// Snapped pixel coordinate, or `None` when it does not fit an `i32`
    fn apply(self, value: f64) -> Option<i32> {
        let snapped = match self {
            PixelSnap::Truncate => value.trunc(),
            PixelSnap::Round => value.round(),
        };
        (f64::from(i32::MIN)..=f64::from(i32::MAX))
            .contains(&snapped)
            .then_some(snapped as i32)
    }
}

/// A projected point in canvas pixels, y growing downward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Camera configuration for the perspective divide
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub focal_length: f64,
    pub center: (f64, f64),
    pub snap: PixelSnap,
}

impl Camera {
    pub fn new(focal_length: f64, center: (f64, f64)) -> Self {
        Self {
            focal_length,
            center,
            snap: PixelSnap::default(),
        }
    }

    pub fn from_config(config: &ViewerConfig) -> Self {
        Self {
            focal_length: config.focal_length,
            center: config.center(),
            snap: config.pixel_snap,
        }
    }

    /// Project one point. `index` is only used to label errors.
    ///
    /// x, y and z are scaled by `zoom`; x and y are then shifted by the pan
    /// offset, z is not. The perspective factor is `f / (f + z)`.
    pub fn project_point(
        &self,
        point: &Point3<f64>,
        zoom: f64,
        pan_x: f64,
        pan_y: f64,
        index: usize,
    ) -> Result<ScreenPoint, ProjectionError> {
        let x = point.x * zoom + pan_x;
        let y = point.y * zoom + pan_y;
        let z = point.z * zoom;

        let denominator = self.focal_length + z;
        if denominator.abs() < DEPTH_EPSILON {
            return Err(ProjectionError::DegenerateDepth { index, z });
        }
        let factor = self.focal_length / denominator;

        let screen_x = self.center.0 + x * factor;
        let screen_y = self.center.1 - y * factor;
        if !screen_x.is_finite() || !screen_y.is_finite() {
            return Err(ProjectionError::NonFinite { index });
        }

        match (self.snap.apply(screen_x), self.snap.apply(screen_y)) {
            (Some(x), Some(y)) => Ok(ScreenPoint::new(x, y)),
            _ => Err(ProjectionError::OutOfRange { index }),
        }
    }

    /// Project a whole point set. Fails on the first degenerate point so a
    /// frame is never drawn with missing or infinite vertices.
    pub fn project(
        &self,
        points: &[Point3<f64>],
        zoom: f64,
        pan_x: f64,
        pan_y: f64,
    ) -> Result<Vec<ScreenPoint>, ProjectionError> {
        points
            .iter()
            .enumerate()
            .map(|(index, point)| self.project_point(point, zoom, pan_x, pan_y, index))
            .collect()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&ViewerConfig::default())
    }
}
