/// wire3d Core Library - Wireframe transform and projection pipeline
///
/// Holds the caller-owned view state, the rotation and perspective
/// projection applied every frame, and the shape factory that feeds it.

pub mod config;
pub mod descriptor;
pub mod error;
pub mod geometry;
pub mod pipeline;
pub mod projection;
pub mod transform;

// Re-export commonly used types
pub use config::ViewerConfig;
pub use descriptor::{load_shape, parse_shape};
pub use error::{ConfigError, DescriptorError, Error, ProjectionError, Result, ShapeError};
pub use geometry::{Connectivity, Edge, Shape, ShapeKind, ShapeSpec};
pub use pipeline::{Frame, Pipeline};
pub use projection::{Camera, PixelSnap, ScreenPoint};
pub use transform::{PanDirection, Transform, ViewCommand, ViewState};
