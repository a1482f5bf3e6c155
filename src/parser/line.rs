use nom::{
    character::complete::{char as nom_char, digit1, space0},
    combinator::{all_consuming, opt, recognize},
    multi::{many0, separated_list1},
    sequence::{pair, preceded, separated_pair, terminated},
    InputTake,
};

use super::common::{escaped_token, expect, quoted_string, KEY_SPECIALS, MEASUREMENT_SPECIALS};
use super::result::{IResult, ParseError, Span};
use crate::error::Result;
use crate::model::{FieldValue, Metric, MetricKind, Timestamp};

/// Decodes a single line of the line protocol:
///
///   measurement[,tag=value...] field=value[,field=value...] [timestamp]
///
/// `default_timestamp` is used when the line carries no timestamp.
pub fn parse_line(line: &str, default_timestamp: Timestamp) -> Result<Metric> {
    let (_, (name, tags, fields, timestamp)) =
        all_consuming(terminated(metric_line, space0))(Span::new(line.trim_end()))
            .map_err(ParseError::from)?;

    Metric::new(
        name,
        tags.into_iter().collect(),
        fields.into_iter().collect(),
        timestamp.unwrap_or(default_timestamp),
        MetricKind::Untyped,
    )
}

type MetricLine = (
    String,
    Vec<(String, String)>,
    Vec<(String, FieldValue)>,
    Option<Timestamp>,
);

fn metric_line(input: Span) -> IResult<MetricLine> {
    // measurement tag_set? ' ' field_set (' ' timestamp)?
    let (rest, name) = expect(
        escaped_token(MEASUREMENT_SPECIALS, "measurement"),
        "measurement",
    )(input)?;
    let (rest, tags) = many0(preceded(nom_char(','), expect(tag_pair, "tag")))(rest)?;
    let (rest, _) = expect(nom_char(' '), "field set")(rest)?;
    let (rest, fields) = expect(separated_list1(nom_char(','), field_pair), "field")(rest)?;
    let (rest, timestamp) = opt(preceded(nom_char(' '), timestamp))(rest)?;
    Ok((rest, (name, tags, fields, timestamp)))
}

fn tag_pair(input: Span) -> IResult<(String, String)> {
    separated_pair(
        escaped_token(KEY_SPECIALS, "tag key"),
        nom_char('='),
        escaped_token(KEY_SPECIALS, "tag value"),
    )(input)
}

fn field_pair(input: Span) -> IResult<(String, FieldValue)> {
    let (rest, key) = escaped_token(KEY_SPECIALS, "field key")(input)?;
    let (rest, _) = expect(nom_char('='), "'='")(rest)?;
    let (rest, value) = expect(field_value, "field value")(rest)?;
    Ok((rest, (key, value)))
}

fn field_value(input: Span) -> IResult<FieldValue> {
    match quoted_string(input) {
        Ok((rest, s)) => return Ok((rest, FieldValue::Str(s))),
        Err(nom::Err::Error(_)) => (),
        Err(e) => return Err(e),
    }

    let fragment: &str = input.fragment();
    let end = fragment.find(|c: char| c == ',' || c == ' ').unwrap_or(fragment.len());
    if end == 0 {
        return Err(nom::Err::Error(ParseError::expected("field value", input)));
    }

    let (rest, raw) = input.take_split(end);
    match scalar(raw.fragment()) {
        Some(value) => Ok((rest, value)),
        None => Err(nom::Err::Failure(ParseError::new(
            format!("invalid field value '{}'", raw.fragment()),
            raw,
        ))),
    }
}

fn scalar(raw: &str) -> Option<FieldValue> {
    match raw {
        "t" | "T" | "true" | "True" | "TRUE" => return Some(FieldValue::Bool(true)),
        "f" | "F" | "false" | "False" | "FALSE" => return Some(FieldValue::Bool(false)),
        _ => (),
    }

    if let Some(digits) = raw.strip_suffix('i') {
        return digits.parse::<i64>().ok().map(FieldValue::I64);
    }
    if let Some(digits) = raw.strip_suffix('u') {
        return digits.parse::<u64>().ok().map(FieldValue::U64);
    }

    // Rust accepts "inf" and "NaN" here, the line protocol does not.
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(FieldValue::F64(v)),
        _ => None,
    }
}

fn timestamp(input: Span) -> IResult<Timestamp> {
    let (rest, digits) = recognize(pair(opt(nom_char('-')), digit1))(input)?;
    match digits.fragment().parse::<Timestamp>() {
        Ok(ts) => Ok((rest, ts)),
        Err(_) => Err(nom::Err::Failure(ParseError::new(
            format!("timestamp '{}' out of range", digits.fragment()),
            digits,
        ))),
    }
}
