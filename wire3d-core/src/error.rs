/// Error types for the wire3d pipeline
use thiserror::Error;

/// Failure while projecting a frame
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error("point {index} sits on the camera plane (z = {z}), perspective divide is undefined")]
    DegenerateDepth { index: usize, z: f64 },
    #[error("point {index} projected to a non-finite screen position")]
    NonFinite { index: usize },
    #[error("point {index} projected outside the addressable pixel range")]
    OutOfRange { index: usize },
}

/// Rejected viewer configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must be finite")]
    NotFinite { field: &'static str },
    #[error("canvas must be at least 1x1, got {width}x{height}")]
    EmptyCanvas { width: u32, height: u32 },
    #[error("failed to read config: {0}")]
    Io(String),
    #[error("failed to parse config: {0}")]
    Parse(String),
}

/// Rejected shape parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("{kind} {param} must be a positive finite number, got {value}")]
    InvalidDimension {
        kind: &'static str,
        param: &'static str,
        value: f64,
    },
    #[error("{kind} needs at least {min} {param}, got {value}")]
    TooCoarse {
        kind: &'static str,
        param: &'static str,
        min: usize,
        value: usize,
    },
    #[error("{kind} allows at most {max} {param}, got {value}")]
    TooFine {
        kind: &'static str,
        param: &'static str,
        max: usize,
        value: usize,
    },
}

/// Unparseable shape descriptor text
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DescriptorError {
    #[error("empty shape descriptor")]
    Empty,
    #[error("unknown shape kind '{0}' (expected cube, cuboid, pyramid, cylinder or sphere)")]
    UnknownKind(String),
    #[error("unknown parameter '{key}' for {kind}")]
    UnknownParameter { kind: &'static str, key: String },
    #[error("{kind} takes at most {max} values")]
    TooManyValues { kind: &'static str, max: usize },
    #[error("missing parameter '{param}' for {kind}")]
    MissingParameter {
        kind: &'static str,
        param: &'static str,
    },
    #[error("{param} must be a whole number, got {value}")]
    NotAnInteger { param: &'static str, value: f64 },
    #[error("cannot parse shape descriptor near '{0}'")]
    Syntax(String),
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// Any failure surfaced by the core crate
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Projection(#[from] ProjectionError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
