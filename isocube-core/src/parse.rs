/// Parser for rotation angles typed on the console or passed as flags
use nom::{
    branch::alt,
    character::complete::{char, multispace0, multispace1},
    combinator::{all_consuming, map},
    number::complete::double,
    sequence::{delimited, tuple},
    IResult,
};

use crate::error::InputError;
use crate::transform::RotationAngles;

const TRIPLE: &str = "three numbers separated by spaces or commas";
const SINGLE: &str = "a single number of degrees";

/// Parse an angle triple such as `"10 20 30"` or `"10, -2.5, 0"`
pub fn parse_angles(input: &str) -> Result<RotationAngles, InputError> {
    match all_consuming(delimited(multispace0, angle_triple, multispace0))(input) {
        Ok((_, (x, y, z))) => RotationAngles::try_new(x, y, z),
        Err(_) => Err(InputError::Malformed {
            input: input.to_string(),
            expected: TRIPLE,
        }),
    }
}

/// Parse one angle, as entered at a per-axis prompt
pub fn parse_angle(input: &str) -> Result<f64, InputError> {
    match all_consuming(padded_angle)(input) {
        Ok((_, value)) if value.is_finite() => Ok(value),
        Ok((_, value)) => Err(InputError::NonFinite(value)),
        Err(_) => Err(InputError::Malformed {
            input: input.to_string(),
            expected: SINGLE,
        }),
    }
}

fn padded_angle(input: &str) -> IResult<&str, f64> {
    delimited(multispace0, double, multispace0)(input)
}

fn angle_triple(input: &str) -> IResult<&str, (f64, f64, f64)> {
    map(
        tuple((double, separator, double, separator, double)),
        |(x, _, y, _, z)| (x, y, z),
    )(input)
}

fn separator(input: &str) -> IResult<&str, ()> {
    alt((
        map(delimited(multispace0, char(','), multispace0), |_| ()),
        map(multispace1, |_| ()),
    ))(input)
}
