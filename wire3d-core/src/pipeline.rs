/// Per-frame rotate-then-project pipeline
use crate::config::ViewerConfig;
use crate::error::{ConfigError, ProjectionError};
use crate::geometry::{Connectivity, Edge, Shape};
use crate::projection::{Camera, ScreenPoint};
use crate::transform::{Transform, ViewState};

/// Everything a front end needs to draw one frame
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    /// Projected points, same order as the shape's points
    pub points: Vec<ScreenPoint>,
    /// Line segments to draw, one per connected pair
    pub segments: Vec<(ScreenPoint, ScreenPoint)>,
}

/// Validated configuration plus the camera derived from it
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: ViewerConfig,
    camera: Camera,
}

impl Pipeline {
    pub fn new(config: ViewerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let camera = Camera::from_config(&config);
        Ok(Self { config, camera })
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Rotate and project `shape` under `view`.
    ///
    /// A point on the camera plane rejects the whole frame; the caller
    /// decides whether to keep the previous frame or adjust the view.
    pub fn frame(
        &self,
        shape: &Shape,
        view: &ViewState,
        connectivity: Connectivity,
    ) -> Result<Frame, ProjectionError> {
        let rotated = Transform::rotate(shape.points(), view.angle_x, view.angle_y);
        let points = self
            .camera
            .project(&rotated, view.zoom, view.pan_x, view.pan_y)?;

        let segments = shape
            .segments(connectivity)
            .into_iter()
            .map(|Edge(a, b)| (points[a], points[b]))
            .collect();

        Ok(Frame { points, segments })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        let config = ViewerConfig::default();
        let camera = Camera::from_config(&config);
        Self { config, camera }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ShapeSpec;
    use crate::transform::{PanDirection, ViewCommand};
    use nalgebra::Point3;

    #[test]
    fn test_single_point_at_baseline() {
        let pipeline = Pipeline::default();
        let shape = Shape::from_points(vec![Point3::origin()]);
        let frame = pipeline
            .frame(&shape, &ViewState::new(), Connectivity::Edges)
            .unwrap();
        assert_eq!(frame.points, vec![ScreenPoint::new(300, 300)]);
        assert!(frame.segments.is_empty());
    }

    #[test]
    fn test_camera_plane_point_fails_frame() {
        let pipeline = Pipeline::default();
        let shape = Shape::from_points(vec![Point3::new(0.0, 0.0, -500.0)]);
        let result = pipeline.frame(&shape, &ViewState::new(), Connectivity::Edges);
        assert!(matches!(
            result,
            Err(ProjectionError::DegenerateDepth { index: 0, .. })
        ));
    }

    #[test]
    fn test_empty_shape_projects_to_empty_frame() {
        let pipeline = Pipeline::default();
        let frame = pipeline
            .frame(
                &Shape::from_points(Vec::new()),
                &ViewState::new(),
                Connectivity::AllPairs,
            )
            .unwrap();
        assert_eq!(frame, Frame::default());
    }

    #[test]
    fn test_cube_frame_segments() {
        let pipeline = Pipeline::default();
        let cube = ShapeSpec::Cube { side: 100.0 }.build().unwrap();
        let view = ViewState::new();

        let frame = pipeline.frame(&cube, &view, Connectivity::Edges).unwrap();
        assert_eq!(frame.points.len(), 8);
        assert_eq!(frame.segments.len(), 12);

        let dense = pipeline.frame(&cube, &view, Connectivity::AllPairs).unwrap();
        assert_eq!(dense.segments.len(), 28);
    }

    #[test]
    fn test_canvas_size_moves_center() {
        let pipeline = Pipeline::new(ViewerConfig::with_canvas(200, 100)).unwrap();
        let shape = Shape::from_points(vec![Point3::new(10.0, 10.0, 0.0)]);
        let frame = pipeline
            .frame(&shape, &ViewState::new(), Connectivity::Edges)
            .unwrap();
        assert_eq!(frame.points, vec![ScreenPoint::new(110, 40)]);
    }

    #[test]
    fn test_view_commands_drive_frame() {
        let pipeline = Pipeline::default();
        let shape = Shape::from_points(vec![Point3::new(50.0, 0.0, 0.0)]);
        let mut view = ViewState::new();

        view.apply(ViewCommand::Pan(PanDirection::Up), pipeline.config());
        let panned = pipeline.frame(&shape, &view, Connectivity::Edges).unwrap();
        assert_eq!(panned.points, vec![ScreenPoint::new(350, 290)]);

        // 360 drag pixels at 0.5 deg/pixel is a half turn about Y
        view.apply(ViewCommand::Reset, pipeline.config());
        view.apply(ViewCommand::Drag { dx: 360.0, dy: 0.0 }, pipeline.config());
        assert_eq!(view.angle_y, 180.0);
        let flipped = pipeline.frame(&shape, &view, Connectivity::Edges).unwrap();
        assert_eq!(flipped.points, vec![ScreenPoint::new(250, 300)]);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ViewerConfig {
            zoom_step: f64::NAN,
            ..ViewerConfig::default()
        };
        assert!(Pipeline::new(config).is_err());
    }
}
