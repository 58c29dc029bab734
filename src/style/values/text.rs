//! Text decoration values and the shorthand placeholders.

use super::split_list;
use crate::style::ToCss;
use crate::style::prop::{PropertyValue, ReadContext};
use crate::style::properties::{DecorationLine, DecorationStyle, VectorEffect};

impl ToCss for DecorationLine {
    fn to_css(&self, buf: &mut String) {
        write_tokens(*self, &DecorationLine::TOKENS, buf);
    }
}

impl PropertyValue for DecorationLine {
    fn parse_into(&mut self, text: &str, _ctx: &ReadContext<'_>) -> bool {
        let mut value = DecorationLine::empty();
        let mut matched = false;
        for token in split_list(text) {
            if token == "none" {
                value = DecorationLine::empty();
                matched = true;
            } else if let Some((_, flag)) = DecorationLine::TOKENS.iter().find(|(t, _)| *t == token)
            {
                value.insert(*flag);
                matched = true;
            }
        }
        if matched {
            *self = value;
        }
        matched
    }

    fn same(&self, other: &Self) -> bool {
        self == other
    }
}

/// `text-decoration-style` takes the first style keyword in the text, so the
/// full shorthand can be handed to it unchanged.
impl PropertyValue for DecorationStyle {
    fn parse_into(&mut self, text: &str, _ctx: &ReadContext<'_>) -> bool {
        match split_list(text).find_map(DecorationStyle::from_css) {
            Some(style) => {
                *self = style;
                true
            }
            None => false,
        }
    }

    fn same(&self, other: &Self) -> bool {
        self == other
    }
}

impl ToCss for VectorEffect {
    fn to_css(&self, buf: &mut String) {
        write_tokens(*self, &VectorEffect::TOKENS, buf);
    }
}

impl PropertyValue for VectorEffect {
    fn parse_into(&mut self, text: &str, _ctx: &ReadContext<'_>) -> bool {
        if text == "none" {
            *self = VectorEffect::empty();
            return true;
        }
        let mut value = VectorEffect::empty();
        for token in text.split_ascii_whitespace() {
            match VectorEffect::TOKENS.iter().find(|(t, _)| *t == token) {
                Some((_, flag)) => value.insert(*flag),
                None => return false,
            }
        }
        *self = value;
        !value.is_empty()
    }

    fn same(&self, other: &Self) -> bool {
        self == other
    }
}

/// Space separated tokens of the set flags, or `none`.
fn write_tokens<F: bitflags::Flags + Copy>(value: F, tokens: &[(&'static str, F)], buf: &mut String) {
    if value.is_empty() {
        buf.push_str("none");
        return;
    }
    let mut first = true;
    for (token, flag) in tokens {
        if value.contains(*flag) {
            if !first {
                buf.push(' ');
            }
            buf.push_str(token);
            first = false;
        }
    }
}

/// The `text-decoration` shorthand slot.
///
/// It carries no value of its own; reading it fills the longhands and
/// writing it emits the line value for CSS 2 readers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextDecoration;

impl ToCss for TextDecoration {
    fn to_css(&self, _buf: &mut String) {}
}

impl PropertyValue for TextDecoration {
    fn parse_into(&mut self, _text: &str, _ctx: &ReadContext<'_>) -> bool {
        false
    }

    fn same(&self, _other: &Self) -> bool {
        true
    }
}

/// The `font` shorthand slot. Only its longhands are ever written.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FontShorthand;

impl ToCss for FontShorthand {
    fn to_css(&self, _buf: &mut String) {}
}

impl PropertyValue for FontShorthand {
    fn parse_into(&mut self, _text: &str, _ctx: &ReadContext<'_>) -> bool {
        false
    }

    fn same(&self, _other: &Self) -> bool {
        true
    }
}

/// Font metrics used to place decoration lines, in font units of the
/// element that originates the decoration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextDecorationData {
    pub ascender: f32,
    pub descender: f32,
    pub underline_thickness: f32,
    pub underline_position: f32,
    pub line_through_thickness: f32,
    pub line_through_position: f32,
    /// Phase offset of dashed or wavy patterns along the text.
    pub phase_length: f32,
    pub tspan_line_start: bool,
    pub tspan_line_end: bool,
    pub tspan_width: f32,
}
