/// Parser for one-line shape descriptors such as `cylinder radius=2 height=4`
///
/// A descriptor is a shape kind followed by values, each either positional
/// (filling the kind's parameters in order) or `key=value`.
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, multispace0, multispace1},
    combinator::{all_consuming, map},
    multi::many0,
    number::complete::double,
    sequence::{pair, preceded, separated_pair, terminated},
    IResult,
};
use std::str::FromStr;

use crate::error::{DescriptorError, Result};
use crate::geometry::{
    Shape, ShapeKind, ShapeSpec, DEFAULT_CYLINDER_SEGMENTS, DEFAULT_SPHERE_RINGS,
    DEFAULT_SPHERE_SEGMENTS,
};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Value<'a> {
    Named(&'a str, f64),
    Positional(f64),
}

/// Parse and validate a shape descriptor
pub fn parse_shape(input: &str) -> Result<ShapeSpec, DescriptorError> {
    if input.trim().is_empty() {
        return Err(DescriptorError::Empty);
    }

    let (name, values) = match parse_descriptor(input) {
        Ok((_, parsed)) => parsed,
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            return Err(DescriptorError::Syntax(e.input.trim().to_string()))
        }
        Err(nom::Err::Incomplete(_)) => return Err(DescriptorError::Syntax(input.to_string())),
    };

    let kind =
        ShapeKind::from_name(name).ok_or_else(|| DescriptorError::UnknownKind(name.to_string()))?;
    let spec = resolve(kind, &values)?;
    spec.validate()?;
    Ok(spec)
}

/// Parse a descriptor and build its shape in one step
pub fn load_shape(input: &str) -> Result<(ShapeSpec, Shape)> {
    let spec = parse_shape(input)?;
    let shape = spec.build()?;
    Ok((spec, shape))
}

impl FromStr for ShapeSpec {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_shape(s)
    }
}

fn parse_descriptor(input: &str) -> IResult<&str, (&str, Vec<Value<'_>>)> {
    all_consuming(terminated(
        pair(
            preceded(multispace0, alpha1),
            many0(preceded(multispace1, parse_value)),
        ),
        multispace0,
    ))(input)
}

fn parse_value(input: &str) -> IResult<&str, Value<'_>> {
    alt((
        map(separated_pair(alpha1, tag("="), double), |(key, value)| {
            Value::Named(key, value)
        }),
        map(double, Value::Positional),
    ))(input)
}

fn parameter_names(kind: ShapeKind) -> &'static [&'static str] {
    match kind {
        ShapeKind::Cube => &["side"],
        ShapeKind::Cuboid => &["width", "height", "depth"],
        ShapeKind::Pyramid => &["base", "height"],
        ShapeKind::Cylinder => &["radius", "height", "segments"],
        ShapeKind::Sphere => &["radius", "rings", "segments"],
    }
}

fn canonical_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    match key.as_str() {
        "r" => "radius".to_string(),
        "h" => "height".to_string(),
        "w" => "width".to_string(),
        "d" => "depth".to_string(),
        "b" => "base".to_string(),
        "length" => "side".to_string(),
        _ => key,
    }
}

fn resolve(kind: ShapeKind, values: &[Value<'_>]) -> Result<ShapeSpec, DescriptorError> {
    let names = parameter_names(kind);
    let mut slots: Vec<Option<f64>> = vec![None; names.len()];
    let mut position = 0;

    for value in values {
        match *value {
            Value::Positional(v) => {
                let slot = slots
                    .get_mut(position)
                    .ok_or(DescriptorError::TooManyValues {
                        kind: kind.as_str(),
                        max: names.len(),
                    })?;
                *slot = Some(v);
                position += 1;
            }
            Value::Named(key, v) => {
                let key = canonical_key(key);
                let index = names.iter().position(|name| *name == key).ok_or(
                    DescriptorError::UnknownParameter {
                        kind: kind.as_str(),
                        key,
                    },
                )?;
                slots[index] = Some(v);
            }
        }
    }

    let required = |index: usize| {
        slots[index].ok_or(DescriptorError::MissingParameter {
            kind: kind.as_str(),
            param: names[index],
        })
    };
    let count = |index: usize, default: usize| match slots[index] {
        Some(v) => whole(names[index], v),
        None => Ok(default),
    };

    let spec = match kind {
        ShapeKind::Cube => ShapeSpec::Cube { side: required(0)? },
        ShapeKind::Cuboid => ShapeSpec::Cuboid {
            width: required(0)?,
            height: required(1)?,
            depth: required(2)?,
        },
        ShapeKind::Pyramid => ShapeSpec::Pyramid {
            base: required(0)?,
            height: required(1)?,
        },
        ShapeKind::Cylinder => ShapeSpec::Cylinder {
            radius: required(0)?,
            height: required(1)?,
            segments: count(2, DEFAULT_CYLINDER_SEGMENTS)?,
        },
        ShapeKind::Sphere => ShapeSpec::Sphere {
            radius: required(0)?,
            rings: count(1, DEFAULT_SPHERE_RINGS)?,
            segments: count(2, DEFAULT_SPHERE_SEGMENTS)?,
        },
    };
    Ok(spec)
}

fn whole(param: &'static str, value: f64) -> Result<usize, DescriptorError> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
        Ok(value as usize)
    } else {
        Err(DescriptorError::NotAnInteger { param, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShapeError;

    #[test]
    fn test_positional_values() {
        assert_eq!(parse_shape("cube 3"), Ok(ShapeSpec::Cube { side: 3.0 }));
        assert_eq!(
            parse_shape("cuboid 1 2.5 3"),
            Ok(ShapeSpec::Cuboid {
                width: 1.0,
                height: 2.5,
                depth: 3.0
            })
        );
    }

    #[test]
    fn test_named_values_and_aliases() {
        assert_eq!(
            parse_shape("  Cylinder r=2 height=4 segments=12  "),
            Ok(ShapeSpec::Cylinder {
                radius: 2.0,
                height: 4.0,
                segments: 12
            })
        );
        assert_eq!(
            parse_shape("pyramid h=5 b=2"),
            Ok(ShapeSpec::Pyramid {
                base: 2.0,
                height: 5.0
            })
        );
    }

    #[test]
    fn test_resolution_defaults() {
        assert_eq!(
            parse_shape("sphere 3"),
            Ok(ShapeSpec::Sphere {
                radius: 3.0,
                rings: 15,
                segments: 30
            })
        );
        assert_eq!(
            parse_shape("cylinder 1 2"),
            Ok(ShapeSpec::Cylinder {
                radius: 1.0,
                height: 2.0,
                segments: 30
            })
        );
    }

    #[test]
    fn test_display_round_trips() {
        let spec = ShapeSpec::Sphere {
            radius: 2.5,
            rings: 8,
            segments: 16,
        };
        assert_eq!(spec.to_string().parse::<ShapeSpec>(), Ok(spec));
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_shape("   "), Err(DescriptorError::Empty));
        assert_eq!(
            parse_shape("torus 1 2"),
            Err(DescriptorError::UnknownKind("torus".to_string()))
        );
        assert_eq!(
            parse_shape("cube"),
            Err(DescriptorError::MissingParameter {
                kind: "cube",
                param: "side"
            })
        );
        assert_eq!(
            parse_shape("cube 1 2"),
            Err(DescriptorError::TooManyValues {
                kind: "cube",
                max: 1
            })
        );
        assert_eq!(
            parse_shape("cube radius=2"),
            Err(DescriptorError::UnknownParameter {
                kind: "cube",
                key: "radius".to_string()
            })
        );
        assert_eq!(
            parse_shape("sphere 1 rings=2.5"),
            Err(DescriptorError::NotAnInteger {
                param: "rings",
                value: 2.5
            })
        );
        assert!(matches!(
            parse_shape("cube 3x"),
            Err(DescriptorError::Syntax(_))
        ));
    }

    #[test]
    fn test_load_shape() {
        let (spec, shape) = load_shape("pyramid 2 3").unwrap();
        assert_eq!(spec.kind(), ShapeKind::Pyramid);
        assert_eq!(shape.points().len(), 5);

        assert!(matches!(
            load_shape("pyramid 2"),
            Err(crate::error::Error::Descriptor(
                DescriptorError::MissingParameter { .. }
            ))
        ));
    }

    #[test]
    fn test_parameters_are_validated() {
        assert_eq!(
            parse_shape("cube -1"),
            Err(DescriptorError::Shape(ShapeError::InvalidDimension {
                kind: "cube",
                param: "side",
                value: -1.0
            }))
        );
        assert_eq!(
            parse_shape("sphere 1 rings=4294967295 segments=4294967295"),
            Err(DescriptorError::Shape(ShapeError::TooFine {
                kind: "sphere",
                param: "rings",
                max: crate::geometry::MAX_RINGS,
                value: 4_294_967_295
            }))
        );
        assert!(matches!(
            load_shape("cylinder 1 1 segments=1000000000"),
            Err(crate::error::Error::Descriptor(DescriptorError::Shape(
                ShapeError::TooFine { .. }
            )))
        ));
    }
}
