//! Small text helpers shared by the style readers and writers.

/// Format a number the way C's `%g` does with six significant digits.
///
/// Trailing zeros are dropped, and very large or very small magnitudes
/// switch to exponent notation (`1e+07`, `1e-05`).
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let sci = format!("{value:.5e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return sci;
    };

    if !(-4..6).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exp.abs())
    } else {
        let decimals = (5 - exp) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Quote a CSS identifier if it contains anything beyond `[A-Za-z0-9_-]`.
///
/// Single quotes inside the value are backslash-escaped. A value that does
/// not start with an ASCII letter is always quoted.
pub fn css_quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    let mut quote = false;

    for (i, c) in value.chars().enumerate() {
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' || u32::from(c) > 0xA0 {
            out.push(c);
        } else if c == '\'' {
            out.push('\\');
            out.push(c);
            quote = true;
        } else {
            out.push(c);
            quote = true;
        }
        if i == 0 && !c.is_ascii_alphabetic() {
            quote = true;
        }
    }

    if quote { format!("'{out}'") } else { out }
}

/// Remove one pair of matching single or double quotes.
pub fn css_unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() > 1
        && ((bytes[0] == b'"' && bytes[bytes.len() - 1] == b'"')
            || (bytes[0] == b'\'' && bytes[bytes.len() - 1] == b'\''))
    {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Quote every family name of a comma separated font list as needed.
pub fn font_family_quote(value: &str) -> String {
    value
        .split(',')
        .map(|family| css_quote(family.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Unquote every family name of a comma separated font list.
pub fn font_family_unquote(value: &str) -> String {
    value
        .split(',')
        .map(|family| css_unquote(family.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Split a trailing `!important` off a declaration value.
///
/// Returns the value with the marker and any whitespace before it removed,
/// and whether the marker was present.
pub fn strip_important(value: &str) -> (&str, bool) {
    match value.strip_suffix("!important") {
        Some(rest) => (rest.trim_end(), true),
        None => (value, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.3), "0.3");
        assert_eq!(format_number(12.0), "12");
        assert_eq!(format_number(-1.5), "-1.5");
        assert_eq!(format_number(1.0 / 3.0), "0.333333");
        assert_eq!(format_number(123456.0), "123456");
        assert_eq!(format_number(1234567.0), "1.23457e+06");
        assert_eq!(format_number(0.00001), "1e-05");
        assert_eq!(format_number(0.0001), "0.0001");
        assert_eq!(format_number(16.000001), "16");
    }

    #[test]
    fn test_css_quote() {
        assert_eq!(css_quote("Arial"), "Arial");
        assert_eq!(css_quote("sans-serif"), "sans-serif");
        assert_eq!(css_quote("Times New Roman"), "'Times New Roman'");
        assert_eq!(css_quote("O'Reilly"), "'O\\'Reilly'");
        assert_eq!(css_quote("3Dumb"), "'3Dumb'");
    }

    #[test]
    fn test_css_unquote() {
        assert_eq!(css_unquote("'Foo Bar'"), "Foo Bar");
        assert_eq!(css_unquote("\"Foo\""), "Foo");
        assert_eq!(css_unquote("'Foo\""), "'Foo\"");
        assert_eq!(css_unquote("'"), "'");
    }

    #[test]
    fn test_font_family_lists() {
        assert_eq!(
            font_family_unquote("'Georgia' , \"Minion Web\",serif"),
            "Georgia, Minion Web, serif"
        );
        assert_eq!(
            font_family_quote("Georgia, Minion Web, serif"),
            "Georgia, 'Minion Web', serif"
        );
    }

    #[test]
    fn test_strip_important() {
        assert_eq!(strip_important("red !important"), ("red", true));
        assert_eq!(strip_important("red!important"), ("red", true));
        assert_eq!(strip_important("red"), ("red", false));
        assert_eq!(strip_important("!important"), ("", true));
    }

    proptest! {
        #[test]
        fn prop_format_number_parses_back(v in -1.0e5f64..1.0e5) {
            let s = format_number(v);
            let back: f64 = s.parse().unwrap();
            let tolerance = v.abs().max(1.0) * 1e-5;
            prop_assert!((back - v).abs() <= tolerance, "{v} -> {s}");
        }

        #[test]
        fn prop_quote_unquote_simple(name in "[A-Za-z][A-Za-z0-9 ]{0,12}") {
            let quoted = css_quote(&name);
            prop_assert_eq!(css_unquote(&quoted), name.as_str());
        }
    }
}
