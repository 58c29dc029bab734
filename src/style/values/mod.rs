//! Property value kinds.
//!
//! Each kind implements [`PropertyValue`](super::prop::PropertyValue): how
//! it reads CSS text, how it writes itself back, how it compares and how it
//! takes part in the cascade. Keyword enums and flag sets are defined in
//! [`properties`](super::properties); their slot behaviour lives in
//! [`font`] and [`text`].

mod color;
mod font;
mod length;
mod number;
mod paint;
mod text;

use cssparser::{ParseError, Parser, ParserInput, Token};

pub use color::{ColorValue, IccColor, Rgb, parse_color, parse_color_text};
pub use font::{Keyword, Quoting, StringValue, VariationSettings};
pub use length::{
    BaselineShift, BaselineShiftLiteral, BaselineShiftValue, DashArray, FontSize,
    FontSizeLiteral, FontSizeValue, Length, LengthOrNormal, LengthUnit, size_px_to_units,
    size_units_to_px,
};
pub use number::{Float, Scale24};
pub use paint::{
    Filter, Paint, PaintKind, PaintOrder, PaintServer, PaintServerKind, PaintServerRef,
    StrokeExtensions,
};
pub use text::{FontShorthand, TextDecoration, TextDecorationData};

/// Run a cssparser closure over `text`, requiring it to consume everything
/// but surrounding whitespace.
pub(crate) fn parse_with<T>(
    text: &str,
    f: impl for<'i, 't> FnOnce(&mut Parser<'i, 't>) -> Result<T, ParseError<'i, ()>>,
) -> Option<T> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    parser.parse_entirely(f).ok()
}

/// Parse a number with an optional unit suffix.
///
/// Percentages are returned as fractions (`50%` is `0.5`).
pub(crate) fn parse_length_token<'i>(
    input: &mut Parser<'i, '_>,
) -> Result<(f64, LengthUnit), ParseError<'i, ()>> {
    let location = input.current_source_location();
    let (value, unit) = match input.next()? {
        Token::Number { value, .. } => (f64::from(*value), LengthUnit::None),
        Token::Percentage { unit_value, .. } => (f64::from(*unit_value), LengthUnit::Percent),
        Token::Dimension { value, unit, .. } => match LengthUnit::from_suffix(unit) {
            Some(unit) => (f64::from(*value), unit),
            None => return Err(location.new_custom_error(())),
        },
        _ => return Err(location.new_custom_error(())),
    };
    if !value.is_finite() {
        return Err(location.new_custom_error(()));
    }
    Ok((value, unit))
}

/// Parse a plain number.
pub(crate) fn parse_number<'i>(input: &mut Parser<'i, '_>) -> Result<f64, ParseError<'i, ()>> {
    let value = f64::from(input.expect_number()?);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(input.new_custom_error(()))
    }
}

/// Split a list on commas and whitespace, dropping empty pieces.
pub(crate) fn split_list(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c == ',' || c.is_ascii_whitespace())
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_length_token_units() {
        assert_eq!(parse_with("12", parse_length_token), Some((12.0, LengthUnit::None)));
        assert_eq!(parse_with(" 3px ", parse_length_token), Some((3.0, LengthUnit::Px)));
        assert_eq!(parse_with("50%", parse_length_token), Some((0.5, LengthUnit::Percent)));
        assert_eq!(parse_with("2ex", parse_length_token), Some((2.0, LengthUnit::Ex)));
        assert_eq!(parse_with("2rem", parse_length_token), None);
        assert_eq!(parse_with("2px 3px", parse_length_token), None);
    }

    #[test]
    fn test_split_list() {
        let tokens: Vec<_> = split_list("0, 1  2,3").collect();
        assert_eq!(tokens, ["0", "1", "2", "3"]);
    }
}
