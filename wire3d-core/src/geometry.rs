/// Wireframe shapes: point sets with explicit edge topology
use nalgebra::Point3;
use std::f64::consts::{PI, TAU};
use std::fmt;

use crate::error::ShapeError;

pub const DEFAULT_CYLINDER_SEGMENTS: usize = 30;
pub const DEFAULT_SPHERE_RINGS: usize = 15;
pub const DEFAULT_SPHERE_SEGMENTS: usize = 30;

/// Finest sampling accepted for ring segments
pub const MAX_SEGMENTS: usize = 1024;
/// Finest sampling accepted for sphere rings
pub const MAX_RINGS: usize = 512;

/// A line between two points of a shape, by index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge(pub usize, pub usize);

/// How a frame connects projected points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    /// Only the shape's own edges
    #[default]
    Edges,
    /// Every pair of points, O(n²) segments. A dense demo look, not the
    /// shape's real outline.
    AllPairs,
}

impl Connectivity {
    pub fn toggled(self) -> Self {
        match self {
            Connectivity::Edges => Connectivity::AllPairs,
            Connectivity::AllPairs => Connectivity::Edges,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Cube,
    Cuboid,
    Pyramid,
    Cylinder,
    Sphere,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Cube,
        ShapeKind::Cuboid,
        ShapeKind::Pyramid,
        ShapeKind::Cylinder,
        ShapeKind::Sphere,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Cube => "cube",
            ShapeKind::Cuboid => "cuboid",
            ShapeKind::Pyramid => "pyramid",
            ShapeKind::Cylinder => "cylinder",
            ShapeKind::Sphere => "sphere",
        }
    }

    /// Case-insensitive lookup by name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A shape kind with its parameters, validated before any points are built
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeSpec {
    /// Corners at ±side on every axis
    Cube { side: f64 },
    /// Corners at (±width, ±height, ±depth)
    Cuboid { width: f64, height: f64, depth: f64 },
    /// Square base at z = 0 with corners at ±base, apex at (0, 0, height)
    Pyramid { base: f64, height: f64 },
    /// Rings at z = 0 and z = height
    Cylinder {
        radius: f64,
        height: f64,
        segments: usize,
    },
    /// `rings` latitude samples from pole to pole, poles included
    Sphere {
        radius: f64,
        rings: usize,
        segments: usize,
    },
}

impl ShapeSpec {
    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeSpec::Cube { .. } => ShapeKind::Cube,
            ShapeSpec::Cuboid { .. } => ShapeKind::Cuboid,
            ShapeSpec::Pyramid { .. } => ShapeKind::Pyramid,
            ShapeSpec::Cylinder { .. } => ShapeKind::Cylinder,
            ShapeSpec::Sphere { .. } => ShapeKind::Sphere,
        }
    }

    pub fn validate(&self) -> Result<(), ShapeError> {
        let kind = self.kind().as_str();
        match *self {
            ShapeSpec::Cube { side } => dimension(kind, "side", side),
            ShapeSpec::Cuboid {
                width,
                height,
                depth,
            } => {
                dimension(kind, "width", width)?;
                dimension(kind, "height", height)?;
                dimension(kind, "depth", depth)
            }
            ShapeSpec::Pyramid { base, height } => {
                dimension(kind, "base", base)?;
                dimension(kind, "height", height)
            }
            ShapeSpec::Cylinder {
                radius,
                height,
                segments,
            } => {
                dimension(kind, "radius", radius)?;
                dimension(kind, "height", height)?;
                resolution(kind, "segments", 3, MAX_SEGMENTS, segments)
            }
            ShapeSpec::Sphere {
                radius,
                rings,
                segments,
            } => {
                dimension(kind, "radius", radius)?;
                resolution(kind, "rings", 3, MAX_RINGS, rings)?;
                resolution(kind, "segments", 3, MAX_SEGMENTS, segments)
            }
        }
    }

    pub fn build(&self) -> Result<Shape, ShapeError> {
        self.validate()?;
        let shape = match *self {
            ShapeSpec::Cube { side } => Shape::cuboid(ShapeKind::Cube, side, side, side),
            ShapeSpec::Cuboid {
                width,
                height,
                depth,
            } => Shape::cuboid(ShapeKind::Cuboid, width, height, depth),
            ShapeSpec::Pyramid { base, height } => Shape::pyramid(base, height),
            ShapeSpec::Cylinder {
                radius,
                height,
                segments,
            } => Shape::cylinder(radius, height, segments),
            ShapeSpec::Sphere {
                radius,
                rings,
                segments,
            } => Shape::sphere(radius, rings, segments),
        };
        log::debug!(
            "built {}: {} points, {} edges",
            self,
            shape.points.len(),
            shape.edges.len()
        );
        Ok(shape)
    }
}

impl fmt::Display for ShapeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeSpec::Cube { side } => write!(f, "cube side={side}"),
            ShapeSpec::Cuboid {
                width,
                height,
                depth,
            } => write!(f, "cuboid width={width} height={height} depth={depth}"),
            ShapeSpec::Pyramid { base, height } => {
                write!(f, "pyramid base={base} height={height}")
            }
            ShapeSpec::Cylinder {
                radius,
                height,
                segments,
            } => write!(
                f,
                "cylinder radius={radius} height={height} segments={segments}"
            ),
            ShapeSpec::Sphere {
                radius,
                rings,
                segments,
            } => write!(f, "sphere radius={radius} rings={rings} segments={segments}"),
        }
    }
}

fn dimension(kind: &'static str, param: &'static str, value: f64) -> Result<(), ShapeError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ShapeError::InvalidDimension { kind, param, value })
    }
}

fn resolution(
    kind: &'static str,
    param: &'static str,
    min: usize,
    max: usize,
    value: usize,
) -> Result<(), ShapeError> {
    if value < min {
        Err(ShapeError::TooCoarse {
            kind,
            param,
            min,
            value,
        })
    } else if value > max {
        Err(ShapeError::TooFine {
            kind,
            param,
            max,
            value,
        })
    } else {
        Ok(())
    }
}

/// An ordered point set and the edges between its points.
///
/// Edges always index into `points`; shapes are only built by the factory
/// methods, never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    kind: Option<ShapeKind>,
    points: Vec<Point3<f64>>,
    edges: Vec<Edge>,
}

impl Shape {
    /// Bare points with no edges; drawn as dots unless all-pairs is on
    pub fn from_points(points: Vec<Point3<f64>>) -> Self {
        Self {
            kind: None,
            points,
            edges: Vec::new(),
        }
    }

    pub fn kind(&self) -> Option<ShapeKind> {
        self.kind
    }

    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The index pairs to draw under `connectivity`
    pub fn segments(&self, connectivity: Connectivity) -> Vec<Edge> {
        match connectivity {
            Connectivity::Edges => self.edges.clone(),
            Connectivity::AllPairs => {
                let n = self.points.len();
                (0..n)
                    .flat_map(|i| (i + 1..n).map(move |j| Edge(i, j)))
                    .collect()
            }
        }
    }

    fn cuboid(kind: ShapeKind, w: f64, h: f64, d: f64) -> Self {
        let points = vec![
            Point3::new(-w, -h, -d),
            Point3::new(w, -h, -d),
            Point3::new(w, h, -d),
            Point3::new(-w, h, -d),
            Point3::new(-w, -h, d),
            Point3::new(w, -h, d),
            Point3::new(w, h, d),
            Point3::new(-w, h, d),
        ];

        let mut edges = Vec::with_capacity(12);
        for i in 0..4 {
            let next = (i + 1) % 4;
            edges.push(Edge(i, next)); // back face
            edges.push(Edge(i + 4, next + 4)); // front face
            edges.push(Edge(i, i + 4)); // connecting struts
        }

        Self {
            kind: Some(kind),
            points,
            edges,
        }
    }

    fn pyramid(base: f64, height: f64) -> Self {
        let points = vec![
            Point3::new(-base, -base, 0.0),
            Point3::new(base, -base, 0.0),
            Point3::new(base, base, 0.0),
            Point3::new(-base, base, 0.0),
            Point3::new(0.0, 0.0, height),
        ];

        let mut edges = Vec::with_capacity(8);
        for i in 0..4 {
            edges.push(Edge(i, (i + 1) % 4));
            edges.push(Edge(i, 4));
        }

        Self {
            kind: Some(ShapeKind::Pyramid),
            points,
            edges,
        }
    }

    fn cylinder(radius: f64, height: f64, segments: usize) -> Self {
        let ring = |z: f64| {
            (0..segments).map(move |i| {
                let theta = TAU * i as f64 / segments as f64;
                Point3::new(radius * theta.cos(), radius * theta.sin(), z)
            })
        };
        let points: Vec<_> = ring(0.0).chain(ring(height)).collect();

        let mut edges = Vec::with_capacity(segments * 3);
        for i in 0..segments {
            let next = (i + 1) % segments;
            edges.push(Edge(i, next));
            edges.push(Edge(segments + i, segments + next));
            edges.push(Edge(i, segments + i));
        }

        Self {
            kind: Some(ShapeKind::Cylinder),
            points,
            edges,
        }
    }

    fn sphere(radius: f64, rings: usize, segments: usize) -> Self {
        let bands = rings - 2;
        let mut points = Vec::with_capacity(2 + bands * segments);

        points.push(Point3::new(0.0, 0.0, radius));
        for band in 1..=bands {
            let phi = PI * band as f64 / (rings - 1) as f64;
            let (sin_phi, cos_phi) = phi.sin_cos();
            for i in 0..segments {
                let theta = TAU * i as f64 / segments as f64;
                points.push(Point3::new(
                    radius * sin_phi * theta.cos(),
                    radius * sin_phi * theta.sin(),
                    radius * cos_phi,
                ));
            }
        }
        points.push(Point3::new(0.0, 0.0, -radius));

        let north = 0;
        let south = points.len() - 1;
        let at = |band: usize, i: usize| 1 + (band - 1) * segments + i % segments;

        let mut edges = Vec::with_capacity(bands * segments + (bands + 1) * segments);
        for band in 1..=bands {
            for i in 0..segments {
                edges.push(Edge(at(band, i), at(band, i + 1)));
            }
        }
        for i in 0..segments {
            edges.push(Edge(north, at(1, i)));
            for band in 1..bands {
                edges.push(Edge(at(band, i), at(band + 1, i)));
            }
            edges.push(Edge(at(bands, i), south));
        }

        Self {
            kind: Some(ShapeKind::Sphere),
            points,
            edges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_edges_in_range(shape: &Shape) {
        let n = shape.points().len();
        for edge in shape.edges() {
            assert!(edge.0 < n && edge.1 < n, "{edge:?} out of range for {n}");
            assert_ne!(edge.0, edge.1);
        }
    }

    #[test]
    fn test_cube() {
        let cube = ShapeSpec::Cube { side: 3.0 }.build().unwrap();
        assert_eq!(cube.kind(), Some(ShapeKind::Cube));
        assert_eq!(cube.points().len(), 8);
        assert_eq!(cube.edges().len(), 12);
        assert_eq!(cube.points()[0], Point3::new(-3.0, -3.0, -3.0));
        assert_eq!(cube.points()[6], Point3::new(3.0, 3.0, 3.0));
        assert_edges_in_range(&cube);

        // Every cube edge spans exactly one axis
        for Edge(a, b) in cube.edges() {
            let delta = cube.points()[*b] - cube.points()[*a];
            let moved = delta.iter().filter(|c| c.abs() > 0.0).count();
            assert_eq!(moved, 1);
        }
    }

    #[test]
    fn test_cuboid_extents() {
        let cuboid = ShapeSpec::Cuboid {
            width: 1.0,
            height: 2.0,
            depth: 3.0,
        }
        .build()
        .unwrap();
        assert_eq!(cuboid.kind(), Some(ShapeKind::Cuboid));
        assert_eq!(cuboid.points()[6], Point3::new(1.0, 2.0, 3.0));
        assert_eq!(cuboid.edges().len(), 12);
    }

    #[test]
    fn test_pyramid() {
        let pyramid = ShapeSpec::Pyramid {
            base: 2.0,
            height: 5.0,
        }
        .build()
        .unwrap();
        assert_eq!(pyramid.points().len(), 5);
        assert_eq!(pyramid.points()[4], Point3::new(0.0, 0.0, 5.0));
        assert_eq!(pyramid.edges().len(), 8);
        assert_eq!(
            pyramid.edges().iter().filter(|e| e.1 == 4).count(),
            4,
            "every base corner connects to the apex"
        );
        assert_edges_in_range(&pyramid);
    }

    #[test]
    fn test_cylinder() {
        let cylinder = ShapeSpec::Cylinder {
            radius: 2.0,
            height: 4.0,
            segments: 30,
        }
        .build()
        .unwrap();
        assert_eq!(cylinder.points().len(), 60);
        assert_eq!(cylinder.edges().len(), 90);
        assert_edges_in_range(&cylinder);

        for point in &cylinder.points()[..30] {
            assert!((point.coords.xy().norm() - 2.0).abs() < 1e-12);
            assert_eq!(point.z, 0.0);
        }
        for point in &cylinder.points()[30..] {
            assert_eq!(point.z, 4.0);
        }
    }

    #[test]
    fn test_sphere() {
        let sphere = ShapeSpec::Sphere {
            radius: 3.0,
            rings: 15,
            segments: 30,
        }
        .build()
        .unwrap();
        assert_eq!(sphere.points().len(), 2 + 13 * 30);
        assert_eq!(sphere.edges().len(), 13 * 30 + 14 * 30);
        assert_eq!(sphere.points()[0], Point3::new(0.0, 0.0, 3.0));
        assert_eq!(
            sphere.points().last(),
            Some(&Point3::new(0.0, 0.0, -3.0))
        );
        for point in sphere.points() {
            assert!((point.coords.norm() - 3.0).abs() < 1e-12);
        }
        assert_edges_in_range(&sphere);
    }

    #[test]
    fn test_smallest_sphere() {
        let sphere = ShapeSpec::Sphere {
            radius: 1.0,
            rings: 3,
            segments: 3,
        }
        .build()
        .unwrap();
        assert_eq!(sphere.points().len(), 5);
        // equator loop plus one meridian per segment through both poles
        assert_eq!(sphere.edges().len(), 3 + 6);
        assert_edges_in_range(&sphere);
    }

    #[test]
    fn test_invalid_parameters() {
        assert_eq!(
            ShapeSpec::Cube { side: 0.0 }.build(),
            Err(ShapeError::InvalidDimension {
                kind: "cube",
                param: "side",
                value: 0.0
            })
        );
        assert!(matches!(
            ShapeSpec::Cuboid {
                width: 1.0,
                height: f64::NAN,
                depth: 1.0
            }
            .validate(),
            Err(ShapeError::InvalidDimension { param: "height", .. })
        ));
        assert_eq!(
            ShapeSpec::Cylinder {
                radius: 1.0,
                height: 1.0,
                segments: 2
            }
            .validate(),
            Err(ShapeError::TooCoarse {
                kind: "cylinder",
                param: "segments",
                min: 3,
                value: 2
            })
        );
        assert!(ShapeSpec::Sphere {
            radius: 1.0,
            rings: 2,
            segments: 8
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_resolution_upper_bound() {
        // u32::MAX on both axes would overflow the point count
        assert_eq!(
            ShapeSpec::Sphere {
                radius: 1.0,
                rings: 4_294_967_295,
                segments: 4_294_967_295
            }
            .build(),
            Err(ShapeError::TooFine {
                kind: "sphere",
                param: "rings",
                max: MAX_RINGS,
                value: 4_294_967_295
            })
        );
        assert_eq!(
            ShapeSpec::Cylinder {
                radius: 1.0,
                height: 1.0,
                segments: MAX_SEGMENTS + 1
            }
            .validate(),
            Err(ShapeError::TooFine {
                kind: "cylinder",
                param: "segments",
                max: MAX_SEGMENTS,
                value: MAX_SEGMENTS + 1
            })
        );

        let finest = ShapeSpec::Sphere {
            radius: 1.0,
            rings: MAX_RINGS,
            segments: MAX_SEGMENTS,
        }
        .build()
        .unwrap();
        assert_eq!(finest.points().len(), 2 + (MAX_RINGS - 2) * MAX_SEGMENTS);
    }

    #[test]
    fn test_all_pairs_segments() {
        let pyramid = ShapeSpec::Pyramid {
            base: 1.0,
            height: 1.0,
        }
        .build()
        .unwrap();
        let all = pyramid.segments(Connectivity::AllPairs);
        assert_eq!(all.len(), 10);
        assert!(all.iter().all(|Edge(a, b)| a < b));
        assert_eq!(pyramid.segments(Connectivity::Edges), pyramid.edges());
    }

    #[test]
    fn test_point_cloud_has_no_edges() {
        let shape = Shape::from_points(vec![Point3::origin()]);
        assert_eq!(shape.kind(), None);
        assert!(shape.edges().is_empty());
        assert!(shape.segments(Connectivity::AllPairs).is_empty());
        assert!(Shape::from_points(Vec::new()).is_empty());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ShapeKind::from_name("Sphere"), Some(ShapeKind::Sphere));
        assert_eq!(ShapeKind::from_name("CUBOID"), Some(ShapeKind::Cuboid));
        assert_eq!(ShapeKind::from_name("torus"), None);
        assert_eq!(Connectivity::Edges.toggled(), Connectivity::AllPairs);
    }
}
