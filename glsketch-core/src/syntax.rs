/// Textual form of transform options: `"z=-5 rx=0.7 ry=-0.8"`
use std::str::FromStr;

use nom::{
    character::complete::{alphanumeric1, char, multispace0, multispace1, space0},
    multi::separated_list0,
    number::complete::float,
    sequence::{delimited, separated_pair},
    IResult,
};

use crate::error::OptionsError;
use crate::transform::TransformOptions;

/// Parse whitespace-separated `key=value` pairs.
///
/// Keys are `x y z rx ry rz sx sy sz`; unset keys keep their defaults and a
/// repeated key overrides the earlier value.
pub fn parse_options(input: &str) -> Result<TransformOptions, OptionsError> {
    let (rest, pairs) = parse_assignments(input)
        .map_err(|_| OptionsError::Malformed(input.trim().to_string()))?;

    if !rest.is_empty() {
        return Err(OptionsError::Malformed(rest.to_string()));
    }

    let mut options = TransformOptions::new();
    for (key, value) in pairs {
        match key {
            "x" => options.x = value,
            "y" => options.y = value,
            "z" => options.z = value,
            "rx" => options.rx = Some(value),
            "ry" => options.ry = Some(value),
            "rz" => options.rz = Some(value),
            "sx" => options.sx = value,
            "sy" => options.sy = value,
            "sz" => options.sz = value,
            other => return Err(OptionsError::UnknownKey(other.to_string())),
        }
    }

    Ok(options)
}

fn parse_assignments(input: &str) -> IResult<&str, Vec<(&str, f32)>> {
    delimited(
        multispace0,
        separated_list0(multispace1, parse_assignment),
        multispace0,
    )(input)
}

fn parse_assignment(input: &str) -> IResult<&str, (&str, f32)> {
    separated_pair(alphanumeric1, delimited(space0, char('='), space0), float)(input)
}

impl FromStr for TransformOptions {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_options(s)
    }
}
