use nom::InputTake;

use super::result::{IResult, ParseError, Span};

pub const MEASUREMENT_SPECIALS: &str = ", ";

pub const KEY_SPECIALS: &str = ",= ";

/// Consumes a non-empty token up to the first unescaped char from `stop`.
///
/// `\` followed by a stop char or by another `\` yields that char; any other
/// escape sequence is kept as is.
pub fn escaped_token<'a>(
    stop: &'static str,
    what: &'static str,
) -> impl FnMut(Span<'a>) -> IResult<'a, String> {
    move |input: Span<'a>| {
        let fragment: &str = input.fragment();
        let mut token = String::new();
        let mut end = fragment.len();
        let mut chars = fragment.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            if c == '\\' {
                match chars.peek() {
                    Some(&(_, n)) if n == '\\' || stop.contains(n) => {
                        token.push(n);
                        chars.next();
                    }
                    _ => token.push(c),
                }
                continue;
            }
            if stop.contains(c) {
                end = i;
                break;
            }
            token.push(c);
        }

        if end == 0 {
            return Err(nom::Err::Error(ParseError::expected(what, input)));
        }

        let (rest, _) = input.take_split(end);
        Ok((rest, token))
    }
}

/// Consumes a double-quoted string with `\"` and `\\` escapes.
pub fn quoted_string(input: Span) -> IResult<String> {
    let fragment: &str = input.fragment();
    if !fragment.starts_with('"') {
        return Err(nom::Err::Error(ParseError::expected("string", input)));
    }

    let mut value = String::new();
    let mut chars = fragment.char_indices().skip(1).peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '"' => {
                let (rest, _) = input.take_split(i + 1);
                return Ok((rest, value));
            }
            '\\' => match chars.peek() {
                Some(&(_, n)) if n == '"' || n == '\\' => {
                    value.push(n);
                    chars.next();
                }
                _ => value.push(c),
            },
            _ => value.push(c),
        }
    }

    Err(nom::Err::Failure(ParseError::expected(
        "closing quote",
        input.take_split(fragment.len()).0,
    )))
}

/// Turns a recoverable error of `f` into a failure that names `what`.
pub fn expect<'a, F, O>(mut f: F, what: &'static str) -> impl FnMut(Span<'a>) -> IResult<'a, O>
where
    F: FnMut(Span<'a>) -> IResult<'a, O>,
{
    move |input: Span<'a>| match f(input) {
        Err(nom::Err::Error(_)) => Err(nom::Err::Failure(ParseError::expected(what, input))),
        other => other,
    }
}
