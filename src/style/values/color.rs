//! Colors: sRGB triples, the CSS named colors, ICC color suffixes and the
//! `color`-like property slot.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::LazyLock;

use cssparser::{ParseError, Parser, Token};

use super::{parse_number, parse_with};
use crate::style::ToCss;
use crate::style::prop::{CascadeContext, Prop, PropertyValue, ReadContext};
use crate::style::types::PropertyId;
use crate::util::format_number;

/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    pub const fn from_u32(rgb: u32) -> Self {
        Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    pub const fn to_u32(self) -> u32 {
        ((self.0 as u32) << 16) | ((self.1 as u32) << 8) | self.2 as u32
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl ToCss for Rgb {
    fn to_css(&self, buf: &mut String) {
        write!(buf, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2).unwrap();
    }
}

/// CSS named colors.
static NAMED_COLORS: &[(&str, u32)] = &[
    ("aliceblue", 0xf0f8ff),
    ("antiquewhite", 0xfaebd7),
    ("aqua", 0x00ffff),
    ("aquamarine", 0x7fffd4),
    ("azure", 0xf0ffff),
    ("beige", 0xf5f5dc),
    ("bisque", 0xffe4c4),
    ("black", 0x000000),
    ("blanchedalmond", 0xffebcd),
    ("blue", 0x0000ff),
    ("blueviolet", 0x8a2be2),
    ("brown", 0xa52a2a),
    ("burlywood", 0xdeb887),
    ("cadetblue", 0x5f9ea0),
    ("chartreuse", 0x7fff00),
    ("chocolate", 0xd2691e),
    ("coral", 0xff7f50),
    ("cornflowerblue", 0x6495ed),
    ("cornsilk", 0xfff8dc),
    ("crimson", 0xdc143c),
    ("cyan", 0x00ffff),
    ("darkblue", 0x00008b),
    ("darkcyan", 0x008b8b),
    ("darkgoldenrod", 0xb8860b),
    ("darkgray", 0xa9a9a9),
    ("darkgrey", 0xa9a9a9),
    ("darkgreen", 0x006400),
    ("darkkhaki", 0xbdb76b),
    ("darkmagenta", 0x8b008b),
    ("darkolivegreen", 0x556b2f),
    ("darkorange", 0xff8c00),
    ("darkorchid", 0x9932cc),
    ("darkred", 0x8b0000),
    ("darksalmon", 0xe9967a),
    ("darkseagreen", 0x8fbc8f),
    ("darkslateblue", 0x483d8b),
    ("darkslategray", 0x2f4f4f),
    ("darkslategrey", 0x2f4f4f),
    ("darkturquoise", 0x00ced1),
    ("darkviolet", 0x9400d3),
    ("deeppink", 0xff1493),
    ("deepskyblue", 0x00bfff),
    ("dimgray", 0x696969),
    ("dimgrey", 0x696969),
    ("dodgerblue", 0x1e90ff),
    ("firebrick", 0xb22222),
    ("floralwhite", 0xfffaf0),
    ("forestgreen", 0x228b22),
    ("fuchsia", 0xff00ff),
    ("gainsboro", 0xdcdcdc),
    ("ghostwhite", 0xf8f8ff),
    ("gold", 0xffd700),
    ("goldenrod", 0xdaa520),
    ("gray", 0x808080),
    ("grey", 0x808080),
    ("green", 0x008000),
    ("greenyellow", 0xadff2f),
    ("honeydew", 0xf0fff0),
    ("hotpink", 0xff69b4),
    ("indianred", 0xcd5c5c),
    ("indigo", 0x4b0082),
    ("ivory", 0xfffff0),
    ("khaki", 0xf0e68c),
    ("lavender", 0xe6e6fa),
    ("lavenderblush", 0xfff0f5),
    ("lawngreen", 0x7cfc00),
    ("lemonchiffon", 0xfffacd),
    ("lightblue", 0xadd8e6),
    ("lightcoral", 0xf08080),
    ("lightcyan", 0xe0ffff),
    ("lightgoldenrodyellow", 0xfafad2),
    ("lightgray", 0xd3d3d3),
    ("lightgrey", 0xd3d3d3),
    ("lightgreen", 0x90ee90),
    ("lightpink", 0xffb6c1),
    ("lightsalmon", 0xffa07a),
    ("lightseagreen", 0x20b2aa),
    ("lightskyblue", 0x87cefa),
    ("lightslategray", 0x778899),
    ("lightslategrey", 0x778899),
    ("lightsteelblue", 0xb0c4de),
    ("lightyellow", 0xffffe0),
    ("lime", 0x00ff00),
    ("limegreen", 0x32cd32),
    ("linen", 0xfaf0e6),
    ("magenta", 0xff00ff),
    ("maroon", 0x800000),
    ("mediumaquamarine", 0x66cdaa),
    ("mediumblue", 0x0000cd),
    ("mediumorchid", 0xba55d3),
    ("mediumpurple", 0x9370db),
    ("mediumseagreen", 0x3cb371),
    ("mediumslateblue", 0x7b68ee),
    ("mediumspringgreen", 0x00fa9a),
    ("mediumturquoise", 0x48d1cc),
    ("mediumvioletred", 0xc71585),
    ("midnightblue", 0x191970),
    ("mintcream", 0xf5fffa),
    ("mistyrose", 0xffe4e1),
    ("moccasin", 0xffe4b5),
    ("navajowhite", 0xffdead),
    ("navy", 0x000080),
    ("oldlace", 0xfdf5e6),
    ("olive", 0x808000),
    ("olivedrab", 0x6b8e23),
    ("orange", 0xffa500),
    ("orangered", 0xff4500),
    ("orchid", 0xda70d6),
    ("palegoldenrod", 0xeee8aa),
    ("palegreen", 0x98fb98),
    ("paleturquoise", 0xafeeee),
    ("palevioletred", 0xdb7093),
    ("papayawhip", 0xffefd5),
    ("peachpuff", 0xffdab9),
    ("peru", 0xcd853f),
    ("pink", 0xffc0cb),
    ("plum", 0xdda0dd),
    ("powderblue", 0xb0e0e6),
    ("purple", 0x800080),
    ("rebeccapurple", 0x663399),
    ("red", 0xff0000),
    ("rosybrown", 0xbc8f8f),
    ("royalblue", 0x4169e1),
    ("saddlebrown", 0x8b4513),
    ("salmon", 0xfa8072),
    ("sandybrown", 0xf4a460),
    ("seagreen", 0x2e8b57),
    ("seashell", 0xfff5ee),
    ("sienna", 0xa0522d),
    ("silver", 0xc0c0c0),
    ("skyblue", 0x87ceeb),
    ("slateblue", 0x6a5acd),
    ("slategray", 0x708090),
    ("slategrey", 0x708090),
    ("snow", 0xfffafa),
    ("springgreen", 0x00ff7f),
    ("steelblue", 0x4682b4),
    ("tan", 0xd2b48c),
    ("teal", 0x008080),
    ("thistle", 0xd8bfd8),
    ("tomato", 0xff6347),
    ("turquoise", 0x40e0d0),
    ("violet", 0xee82ee),
    ("wheat", 0xf5deb3),
    ("white", 0xffffff),
    ("whitesmoke", 0xf5f5f5),
    ("yellow", 0xffff00),
    ("yellowgreen", 0x9acd32),
];

static NAMED_COLOR_MAP: LazyLock<HashMap<&'static str, Rgb>> = LazyLock::new(|| {
    NAMED_COLORS
        .iter()
        .map(|&(name, rgb)| (name, Rgb::from_u32(rgb)))
        .collect()
});

/// Look up a named color, ignoring ASCII case.
pub fn named_color(name: &str) -> Option<Rgb> {
    NAMED_COLOR_MAP.get(name.to_ascii_lowercase().as_str()).copied()
}

/// Parse a color: a name, `#rgb`, `#rrggbb` or `rgb()` with integer or
/// percentage components.
pub fn parse_color<'i>(input: &mut Parser<'i, '_>) -> Result<Rgb, ParseError<'i, ()>> {
    if let Ok(name) = input.try_parse(|i| i.expect_ident_cloned()) {
        return named_color(&name).ok_or_else(|| input.new_custom_error(()));
    }

    // Hex colors starting with a digit tokenize as Hash, the rest as IDHash.
    if let Ok(hash) = input.try_parse(|i| -> Result<_, ParseError<'_, ()>> {
        match i.next()? {
            Token::IDHash(h) | Token::Hash(h) => Ok(h.clone()),
            _ => Err(i.new_custom_error(())),
        }
    }) {
        return parse_hex(&hash).ok_or_else(|| input.new_custom_error(()));
    }

    input.expect_function_matching("rgb")?;
    input.parse_nested_block(|input| {
        let r = parse_component(input)?;
        input.expect_comma()?;
        let g = parse_component(input)?;
        input.expect_comma()?;
        let b = parse_component(input)?;
        Ok(Rgb(r, g, b))
    })
}

/// Parse a complete color string.
pub fn parse_color_text(text: &str) -> Option<Rgb> {
    parse_with(text, parse_color)
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    let digit = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok();
    let pair = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        3 => Some(Rgb(digit(0)? * 17, digit(1)? * 17, digit(2)? * 17)),
        6 => Some(Rgb(pair(0)?, pair(2)?, pair(4)?)),
        _ => None,
    }
}

fn parse_component<'i>(input: &mut Parser<'i, '_>) -> Result<u8, ParseError<'i, ()>> {
    let location = input.current_source_location();
    match input.next()? {
        Token::Number {
            int_value: Some(v), ..
        } => Ok((*v).clamp(0, 255) as u8),
        Token::Percentage { unit_value, .. } => {
            Ok((unit_value * 255.0).round().clamp(0.0, 255.0) as u8)
        }
        _ => Err(location.new_custom_error(())),
    }
}

// ============================================================================
// ICC colors
// ============================================================================

/// An `icc-color(profile, c1, c2, ...)` suffix.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IccColor {
    pub profile: String,
    pub colors: Vec<f64>,
}

impl IccColor {
    pub(crate) fn parse<'i>(input: &mut Parser<'i, '_>) -> Result<Self, ParseError<'i, ()>> {
        input.expect_function_matching("icc-color")?;
        input.parse_nested_block(|input| {
            let profile = input.expect_ident_cloned()?.to_string();
            let mut colors = Vec::new();
            while !input.is_exhausted() {
                input.expect_comma()?;
                colors.push(parse_number(input)?);
            }
            Ok(IccColor { profile, colors })
        })
    }
}

impl ToCss for IccColor {
    fn to_css(&self, buf: &mut String) {
        buf.push_str("icc-color(");
        buf.push_str(&self.profile);
        for color in &self.colors {
            buf.push_str(", ");
            buf.push_str(&format_number(*color));
        }
        buf.push(')');
    }
}

// ============================================================================
// Color slot
// ============================================================================

/// Value of `color` and the other plain color properties.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColorValue {
    pub rgb: Rgb,
    /// The value is `currentColor`; `rgb` tracks the element's `color`.
    pub current: bool,
    pub icc: Option<IccColor>,
}

impl ColorValue {
    pub const fn rgb(rgb: Rgb) -> Self {
        Self {
            rgb,
            current: false,
            icc: None,
        }
    }

    pub const fn current_color() -> Self {
        Self {
            rgb: Rgb::BLACK,
            current: true,
            icc: None,
        }
    }
}

impl ToCss for ColorValue {
    fn to_css(&self, buf: &mut String) {
        if self.current {
            buf.push_str("currentColor");
            return;
        }
        self.rgb.to_css(buf);
        if let Some(icc) = &self.icc {
            buf.push(' ');
            icc.to_css(buf);
        }
    }
}

impl PropertyValue for ColorValue {
    fn parse_into(&mut self, text: &str, _ctx: &ReadContext<'_>) -> bool {
        let parsed = parse_with(text, |input| {
            let rgb = parse_color(input)?;
            let icc = input.try_parse(IccColor::parse).ok();
            Ok((rgb, icc))
        });
        match parsed {
            Some((rgb, icc)) => {
                *self = ColorValue {
                    rgb,
                    current: false,
                    icc,
                };
                true
            }
            None => false,
        }
    }

    fn same(&self, other: &Self) -> bool {
        self == other
    }

    /// `color: currentColor` is written as such but behaves as `inherit`.
    fn inherit_keyword(&self) -> &'static str {
        if self.current { "currentColor" } else { "inherit" }
    }

    fn read(slot: &mut Prop<Self>, text: &str, ctx: &ReadContext<'_>) {
        if text == "currentColor" {
            slot.set = true;
            slot.value.current = true;
            slot.value.icc = None;
            if ctx.id == PropertyId::Color {
                slot.inherit = true;
            } else {
                slot.inherit = false;
                slot.value.rgb = ctx.color;
            }
        } else if text == "inherit" {
            slot.set = true;
            slot.inherit = true;
            slot.value.current = false;
        } else if slot.value.parse_into(text, ctx) {
            slot.set = true;
            slot.inherit = false;
        } else {
            tracing::debug!(property = ctx.id.name(), value = text, "rejected color");
        }
    }

    fn cascade(slot: &mut Prop<Self>, parent: &Prop<Self>, ctx: &CascadeContext<'_>) {
        if (ctx.inherits && !slot.set) || slot.inherit {
            if !(slot.inherit && slot.value.current) {
                slot.value.current = parent.value.current;
            }
            slot.value.rgb = parent.value.rgb;
            slot.value.icc = parent.value.icc.clone();
        }
        if slot.value.current && ctx.id != PropertyId::Color {
            slot.value.rgb = ctx.color;
            slot.value.icc = None;
        }
    }
}
