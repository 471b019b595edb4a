use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::char,
    combinator::{all_consuming, map_opt, opt, recognize, verify},
    sequence::{pair, terminated, tuple},
    IResult, Parser,
};

use crate::Moment;

pub(crate) fn digits(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_digit()).parse(input)
}

fn two_digits(input: &str) -> IResult<&str, i64> {
    map_opt(verify(digits, |s: &str| s.len() == 2), |s: &str| {
        s.parse().ok()
    })
    .parse(input)
}

fn three_digits(input: &str) -> IResult<&str, i64> {
    map_opt(verify(digits, |s: &str| s.len() == 3), |s: &str| {
        s.parse().ok()
    })
    .parse(input)
}

/// WebVTT timestamp: `hh:mm:ss.fff` or `mm:ss.fff`, with two-digit minute and
/// second components no greater than 59 and an exactly three-digit fraction
pub(crate) fn timestamp(input: &str) -> IResult<&str, Moment> {
    alt((
        map_opt(
            tuple((
                digits,
                char(':'),
                two_digits,
                char(':'),
                two_digits,
                char('.'),
                three_digits,
            )),
            |(hours, _, minutes, _, seconds, _, millis)| {
                let hours: i64 = hours.parse().ok()?;
                (minutes <= 59 && seconds <= 59)
                    .then(|| Moment::from_timestamp(hours, minutes, seconds, millis))
            },
        ),
        map_opt(
            tuple((two_digits, char(':'), two_digits, char('.'), three_digits)),
            |(minutes, _, seconds, _, millis)| {
                (minutes <= 59 && seconds <= 59)
                    .then(|| Moment::from_timestamp(0, minutes, seconds, millis))
            },
        ),
    ))
    .parse(input)
}

/// Numeric part of a WebVTT percentage: digits with an optional fraction
pub(crate) fn percentage(input: &str) -> IResult<&str, f64> {
    map_opt(
        recognize(pair(digits, opt(pair(char('.'), digits)))),
        |s: &str| s.parse().ok(),
    )
    .parse(input)
}

/// Parse a complete setting value as a percentage within `[0, 100]`
pub(crate) fn percentage_value(value: &str) -> Option<f64> {
    let (_, number) = all_consuming(terminated(percentage, char('%')))
        .parse(value)
        .ok()?;
    (0.0..=100.0).contains(&number).then_some(number)
}

/// Parse a complete timestamp value with nothing trailing
pub(crate) fn timestamp_value(value: &str) -> Option<Moment> {
    all_consuming(timestamp)
        .parse(value)
        .ok()
        .map(|(_, moment)| moment)
}

/// Split a `name:value` setting; both sides must be non-empty
pub(crate) fn setting(input: &str) -> Option<(&str, &str)> {
    input
        .split_once(':')
        .filter(|(name, value)| !name.is_empty() && !value.is_empty())
}

/// Parse an `x%,y%` coordinate pair, both components within `[0, 100]`
pub(crate) fn coordinates(value: &str) -> Option<(f64, f64)> {
    let (x, y) = value.split_once(',')?;
    Some((percentage_value(x)?, percentage_value(y)?))
}
