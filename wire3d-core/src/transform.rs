/// Rotation matrices and the interactive view state
use nalgebra::{Matrix3, Point3};

use crate::config::ViewerConfig;

/// Camera parameters for the current viewing session.
///
/// Angles are in degrees and accumulate without bound; the rotation matrices
/// are periodic so no wrapping is needed. `zoom` stays strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub angle_x: f64,
    pub angle_y: f64,
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            angle_x: 0.0,
            angle_y: 0.0,
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }

    /// Back to zero rotation, unit zoom and no pan
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Rotate by a drag delta (screen pixels) scaled by `sensitivity`.
    /// Horizontal motion spins around Y, vertical motion around X.
    pub fn apply_drag(&mut self, dx: f64, dy: f64, sensitivity: f64) {
        self.angle_y += dx * sensitivity;
        self.angle_x += dy * sensitivity;
    }

    pub fn zoom_in(&mut self, step: f64, min_zoom: f64) {
        self.zoom_by(step, min_zoom);
    }

    pub fn zoom_out(&mut self, step: f64, min_zoom: f64) {
        self.zoom_by(step.recip(), min_zoom);
    }

    /// Multiply zoom by `factor`, clamping to `min_zoom`.
    ///
    /// Factors that are not positive and finite are ignored, as is any
    /// result that would overflow.
    pub fn zoom_by(&mut self, factor: f64, min_zoom: f64) {
        if !(factor.is_finite() && factor > 0.0) {
            log::debug!("ignoring zoom factor {factor}");
            return;
        }
        let zoomed = self.zoom * factor;
        if zoomed.is_finite() {
            self.zoom = zoomed.max(min_zoom);
        }
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Wrap both angles into [0, 360) without changing the rotation
    pub fn normalize_angles(&mut self) {
        self.angle_x = self.angle_x.rem_euclid(360.0);
        self.angle_y = self.angle_y.rem_euclid(360.0);
    }

    /// Apply one input command using the steps from `config`
    pub fn apply(&mut self, command: ViewCommand, config: &ViewerConfig) {
        match command {
            ViewCommand::Drag { dx, dy } => self.apply_drag(dx, dy, config.drag_sensitivity),
            ViewCommand::ZoomIn => self.zoom_in(config.zoom_step, config.min_zoom),
            ViewCommand::ZoomOut => self.zoom_out(config.zoom_step, config.min_zoom),
            ViewCommand::Pan(direction) => {
                let (dx, dy) = direction.unit();
                self.pan(dx * config.pan_step, dy * config.pan_step);
            }
            ViewCommand::Reset => self.reset(),
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

/// Screen direction for a pan step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    Left,
    Right,
    /// Raises the shape on screen by adding to `pan_y`. Earlier versions of
    /// the viewer subtracted here, which moved the shape down.
    Up,
    Down,
}

impl PanDirection {
    /// Unit offset in projection space (y grows upward on screen)
    pub fn unit(self) -> (f64, f64) {
        match self {
            PanDirection::Left => (-1.0, 0.0),
            PanDirection::Right => (1.0, 0.0),
            PanDirection::Up => (0.0, 1.0),
            PanDirection::Down => (0.0, -1.0),
        }
    }
}

/// Discrete input event translated by the front end
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewCommand {
    Drag { dx: f64, dy: f64 },
    ZoomIn,
    ZoomOut,
    Pan(PanDirection),
    Reset,
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Rotation about X by `angle_x_deg`, then about Y by `angle_y_deg`.
    ///
    /// Points are treated as row vectors (`p' = p · Rx · Ry`); the returned
    /// matrix is the column-vector equivalent, `(Rx · Ry)ᵀ`.
    pub fn rotation_matrix(angle_x_deg: f64, angle_y_deg: f64) -> Matrix3<f64> {
        let (sin_x, cos_x) = angle_x_deg.to_radians().sin_cos();
        let (sin_y, cos_y) = angle_y_deg.to_radians().sin_cos();

        #[rustfmt::skip]
        let rx = Matrix3::new(
            1.0, 0.0, 0.0,
            0.0, cos_x, -sin_x,
            0.0, sin_x, cos_x,
        );
        #[rustfmt::skip]
        let ry = Matrix3::new(
            cos_y, 0.0, sin_y,
            0.0, 1.0, 0.0,
            -sin_y, 0.0, cos_y,
        );

        (rx * ry).transpose()
    }

    /// Rotate every point; output has the same length and order as input
    pub fn rotate(points: &[Point3<f64>], angle_x_deg: f64, angle_y_deg: f64) -> Vec<Point3<f64>> {
        let matrix = Self::rotation_matrix(angle_x_deg, angle_y_deg);
        points
            .iter()
            .map(|p| Point3::from(matrix * p.coords))
            .collect()
    }
}
