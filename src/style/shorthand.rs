//! The `font` and `text-decoration` shorthands.
//!
//! A shorthand never overrides a longhand that already holds a value of
//! equal or higher priority. Declarations are read last to first, so this
//! makes the textually last of a shorthand and its longhand win.

use cssparser::{Parser, ParserInput, Token};

use super::prop::{Prop, PropertyValue, ReadContext, StyleSource, WriteFlags};
use super::types::{INITIAL, PropertyId, Style};
use super::values::ColorValue;
use crate::config::CascadeConfig;

/// Longhands set by `font`, in the order the shorthand resets them.
const FONT_LONGHANDS: [PropertyId; 7] = [
    PropertyId::FontStyle,
    PropertyId::FontVariant,
    PropertyId::FontWeight,
    PropertyId::FontStretch,
    PropertyId::FontSize,
    PropertyId::LineHeight,
    PropertyId::FontFamily,
];

/// Read `text` into a scratch slot and move it into `slot` when it parses and
/// `slot` does not already hold a value of higher priority.
///
/// Returns whether `text` was a valid value.
fn try_keyword<V: PropertyValue>(
    slot: &mut Prop<V>,
    initial: &Prop<V>,
    ctx: &ReadContext<'_>,
    text: &str,
    important: bool,
) -> bool {
    let mut scratch = Prop::new(initial.value.clone());
    V::read(&mut scratch, text, ctx);
    if !scratch.set {
        return false;
    }
    if !slot.set || (important && !slot.important) {
        scratch.source = ctx.source;
        scratch.important = important;
        *slot = scratch;
    }
    true
}

macro_rules! try_slot {
    ($style:ident . $field:ident, $id:expr, $text:expr, $important:expr, $source:expr, $config:expr) => {{
        let ctx = $style.read_context($id, $source, $config);
        try_keyword(&mut $style.$field, &INITIAL.$field, &ctx, $text, $important)
    }};
}

// ============================================================================
// font
// ============================================================================

/// Expand `font: [style] [variant] [weight] [stretch] size[/line-height] family`.
///
/// Longhands the shorthand leaves out are reset to their initial values;
/// all seven are marked set.
pub(crate) fn read_font(
    style: &mut Style,
    text: &str,
    important: bool,
    source: StyleSource,
    config: &CascadeConfig,
) {
    if text == "inherit" {
        for id in FONT_LONGHANDS {
            style.read_slot(id, "inherit", important, source, config);
        }
    } else {
        read_font_tokens(style, text, important, source, config);
        for id in FONT_LONGHANDS {
            if !style.is_set(id) {
                style.clear_slot(id);
                style.mark_set(id, important, source);
            }
        }
    }

    style.mark_set(PropertyId::Font, important, source);
    style.font.inherit = text == "inherit";
}

fn read_font_tokens(
    style: &mut Style,
    text: &str,
    important: bool,
    source: StyleSource,
    config: &CascadeConfig,
) {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let mut line_height_next = false;

    loop {
        let start = parser.position();
        let token = match parser.next() {
            Ok(token) => token.clone(),
            Err(_) => return,
        };
        // Token boundaries exclude the whitespace skipped before them.
        let raw = parser.slice_from(start);
        let token_start = start.byte_index() + (raw.len() - raw.trim_start().len());
        let token_text = raw.trim().to_ascii_lowercase();

        if let Token::Delim('/') = token {
            line_height_next = true;
            continue;
        }
        if line_height_next {
            line_height_next = false;
            style.read_slot(PropertyId::LineHeight, &token_text, important, source, config);
            continue;
        }

        let (t, imp) = (token_text.as_str(), important);
        let matched = try_slot!(style.font_style, PropertyId::FontStyle, t, imp, source, config)
            || try_slot!(style.font_variant, PropertyId::FontVariant, t, imp, source, config)
            || try_slot!(style.font_weight, PropertyId::FontWeight, t, imp, source, config)
            || try_slot!(style.font_stretch, PropertyId::FontStretch, t, imp, source, config)
            || try_slot!(style.font_size, PropertyId::FontSize, t, imp, source, config);
        if !matched {
            let family = text[token_start..].trim();
            style.read_slot(PropertyId::FontFamily, family, important, source, config);
            return;
        }
    }
}

// ============================================================================
// text-decoration
// ============================================================================

/// Expand `text-decoration`.
///
/// A CSS 2 value only names lines. A CSS 3 value that also gives a style or
/// a color sets all three longhands, the missing ones at their initial values.
pub(crate) fn read_text_decoration(
    style: &mut Style,
    text: &str,
    important: bool,
    source: StyleSource,
    config: &CascadeConfig,
) {
    if text == "inherit" {
        style.read_slot(PropertyId::TextDecorationLine, "inherit", important, source, config);
        style.mark_set(PropertyId::TextDecoration, important, source);
        style.text_decoration.inherit = true;
        return;
    }

    let line = try_slot!(
        style.text_decoration_line,
        PropertyId::TextDecorationLine,
        text,
        important,
        source,
        config
    );
    let mut css3 = try_slot!(
        style.text_decoration_style,
        PropertyId::TextDecorationStyle,
        text,
        important,
        source,
        config
    );

    let color = text
        .split_ascii_whitespace()
        .filter(|token| {
            let ctx = style.read_context(PropertyId::TextDecorationColor, source, config);
            *token == "currentColor" || ColorValue::default().parse_into(token, &ctx)
        })
        .last();
    if let Some(color) = color {
        css3 |= try_slot!(
            style.text_decoration_color,
            PropertyId::TextDecorationColor,
            color,
            important,
            source,
            config
        );
    }

    if css3 {
        for id in [
            PropertyId::TextDecorationLine,
            PropertyId::TextDecorationStyle,
            PropertyId::TextDecorationColor,
        ] {
            if !style.is_set(id) {
                style.mark_set(id, important, source);
            }
        }
    }
    if line || css3 {
        style.mark_set(PropertyId::TextDecoration, important, source);
    } else {
        tracing::debug!(value = text, "rejected text-decoration");
    }
}

/// Write the `text-decoration` shorthand as its line value, for CSS 2 readers.
pub(crate) fn write_text_decoration(
    style: &Style,
    buf: &mut String,
    flags: WriteFlags,
    source: StyleSource,
    base: Option<&Style>,
) {
    let slot = &style.text_decoration;
    if !slot.shall_write(flags, source, None, true) {
        return;
    }
    if let Some(base) = base
        && base.text_decoration_line.same(&style.text_decoration_line)
    {
        return;
    }

    let value = if slot.inherit {
        "inherit".to_string()
    } else {
        style.text_decoration_line.value_string()
    };
    buf.push_str("text-decoration:");
    buf.push_str(&value);
    if slot.important {
        buf.push_str(" !important");
    }
    buf.push(';');
}
