//! CSS declaration lists.
//!
//! A [`DeclarationBlock`] is the raw `name: value` list of a `style`
//! attribute or a matched rule, kept as text so each property can parse its
//! own value later. A [`CssAttr`] is the same list used as an editable map.

use cssparser::{
    AtRuleParser, DeclarationParser, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, Token,
};

use super::ToCss;
use super::prop::WriteFlags;
use super::types::Style;
use super::values::{parse_with, split_list};
use crate::util::format_number;

// ============================================================================
// Declaration
// ============================================================================

/// One `name: value` pair. The value is kept as written, minus `!important`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
    pub important: bool,
}

impl Declaration {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            important: false,
        }
    }
}

impl ToCss for Declaration {
    fn to_css(&self, buf: &mut String) {
        buf.push_str(&self.name);
        buf.push(':');
        buf.push_str(&self.value);
        if self.important {
            buf.push_str(" !important");
        }
    }
}

/// An ordered declaration list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationBlock {
    pub declarations: Vec<Declaration>,
}

impl DeclarationBlock {
    /// Parse a `;` separated declaration list. Malformed declarations are skipped.
    pub fn parse(css: &str) -> Self {
        let mut declarations = Vec::new();
        let mut input = ParserInput::new(css);
        let mut parser = Parser::new(&mut input);
        let mut body = DeclarationListParser {
            declarations: &mut declarations,
        };
        for result in RuleBodyParser::new(&mut parser, &mut body) {
            if let Err((error, text)) = result {
                tracing::debug!(?error.kind, declaration = text, "skipped malformed declaration");
            }
        }
        Self { declarations }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Declaration> {
        self.declarations.iter()
    }
}

impl ToCss for DeclarationBlock {
    fn to_css(&self, buf: &mut String) {
        for (i, decl) in self.declarations.iter().enumerate() {
            if i > 0 {
                buf.push(';');
            }
            decl.to_css(buf);
        }
    }
}

struct DeclarationListParser<'a> {
    declarations: &'a mut Vec<Declaration>,
}

impl<'i> AtRuleParser<'i> for DeclarationListParser<'_> {
    type Prelude = ();
    type AtRule = ();
    type Error = ();
}

impl<'i> QualifiedRuleParser<'i> for DeclarationListParser<'_> {
    type Prelude = ();
    type QualifiedRule = ();
    type Error = ();
}

impl<'i> DeclarationParser<'i> for DeclarationListParser<'_> {
    type Declaration = ();
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: cssparser::CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        _start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let start = input.position();
        let mut important = false;
        let mut end = start;
        loop {
            if input.try_parse(cssparser::parse_important).is_ok() {
                important = true;
                break;
            }
            let token = match input.next_including_whitespace() {
                Ok(token) => token.clone(),
                Err(_) => break,
            };
            match token {
                Token::WhiteSpace(_) => continue,
                Token::Function(_)
                | Token::ParenthesisBlock
                | Token::SquareBracketBlock
                | Token::CurlyBracketBlock => {
                    input.parse_nested_block(|nested| -> Result<(), ParseError<'i, ()>> {
                        while nested.next().is_ok() {}
                        Ok(())
                    })?;
                }
                _ => {}
            }
            end = input.position();
        }
        if !input.is_exhausted() {
            return Err(input.new_custom_error(()));
        }

        let value = input.slice(start..end).trim();
        if value.is_empty() {
            return Err(input.new_custom_error(()));
        }
        self.declarations.push(Declaration {
            name: name.to_string(),
            value: value.to_string(),
            important,
        });
        Ok(())
    }
}

impl<'i> RuleBodyItemParser<'i, (), ()> for DeclarationListParser<'_> {
    fn parse_declarations(&self) -> bool {
        true
    }

    fn parse_qualified(&self) -> bool {
        false
    }
}

// ============================================================================
// CssAttr
// ============================================================================

const TEXT_PROPERTIES: &[&str] = &[
    "font",
    "-inkscape-font-specification",
    "font-size",
    "font-size-adjust",
    "font-stretch",
    "font-style",
    "font-variant",
    "font-weight",
    "font-family",
    "font-variant-ligatures",
    "font-variant-position",
    "font-variant-caps",
    "font-variant-numeric",
    "font-variant-alternates",
    "font-variant-east-asian",
    "font-feature-settings",
    "font-variation-settings",
    "text-indent",
    "text-align",
    "line-height",
    "letter-spacing",
    "word-spacing",
    "text-transform",
    "direction",
    "writing-mode",
    "text-orientation",
    "text-anchor",
    "white-space",
    "shape-inside",
    "shape-subtract",
    "shape-padding",
    "shape-margin",
    "inline-size",
    "kerning",
    "dominant-baseline",
    "alignment-baseline",
    "baseline-shift",
    "text-decoration",
    "text-decoration-line",
    "text-decoration-color",
    "text-decoration-style",
    "text-decoration-fill",
    "text-decoration-stroke",
];

const BLACKLIST_PROPERTIES: &[&str] = &[
    "color",
    "clip-rule",
    "d",
    "display",
    "overflow",
    "visibility",
    "isolation",
    "mix-blend-mode",
    "color-interpolation",
    "color-interpolation-filters",
    "solid-color",
    "solid-opacity",
    "fill-rule",
    "color-rendering",
    "image-rendering",
    "shape-rendering",
    "text-rendering",
    "enable-background",
];

const URI_PROPERTIES: &[&str] = &[
    "clip-path",
    "color-profile",
    "cursor",
    "filter",
    "marker",
    "marker-start",
    "marker-mid",
    "marker-end",
    "mask",
    "fill",
    "stroke",
];

/// An ordered property map, as stored in a `style` attribute.
///
/// Values are plain text; `!important` stays part of the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CssAttr {
    entries: Vec<(String, String)>,
}

impl CssAttr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(css: &str) -> Self {
        let mut attr = CssAttr::new();
        for decl in DeclarationBlock::parse(css).declarations {
            let value = if decl.important {
                format!("{} !important", decl.value)
            } else {
                decl.value
            };
            attr.set(decl.name, value);
        }
        attr
    }

    /// The declarations a style write with `flags` would produce.
    pub fn from_style(style: &Style, flags: WriteFlags) -> Self {
        Self::parse(&style.write(flags))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set a property, keeping its position when it already exists.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(index).1)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Remove every text and font property.
    pub fn unset_text(&mut self) -> &mut Self {
        self.retain_unlisted(TEXT_PROPERTIES)
    }

    /// Remove properties that make no sense in a reusable tool style.
    pub fn unset_blacklist(&mut self) -> &mut Self {
        self.retain_unlisted(BLACKLIST_PROPERTIES)
    }

    /// Remove properties whose value is a `url(...)` reference.
    pub fn unset_uris(&mut self) -> &mut Self {
        self.entries
            .retain(|(n, v)| !(URI_PROPERTIES.contains(&n.as_str()) && v.starts_with("url(")));
        self
    }

    fn retain_unlisted(&mut self, names: &[&str]) -> &mut Self {
        self.entries.retain(|(n, _)| !names.contains(&n.as_str()));
        self
    }

    /// Scale the size-like properties, as when the styled object is
    /// transformed by a uniform `factor`.
    pub fn scale(&mut self, factor: f64) -> &mut Self {
        const ANY_UNIT: &[&str] = &[
            "baseline-shift",
            "stroke-width",
            "stroke-dashoffset",
            "kerning",
            "letter-spacing",
            "word-spacing",
        ];
        const ABSOLUTE_ONLY: &[&str] = &["font-size", "line-height"];

        for (name, value) in &mut self.entries {
            let scaled = if ANY_UNIT.contains(&name.as_str()) {
                scale_length(value, factor, false)
            } else if ABSOLUTE_ONLY.contains(&name.as_str()) {
                scale_length(value, factor, true)
            } else if name == "stroke-dasharray" {
                scale_dasharray(value, factor)
            } else {
                None
            };
            if let Some(scaled) = scaled {
                *value = scaled;
            }
        }
        self
    }
}

impl ToCss for CssAttr {
    fn to_css(&self, buf: &mut String) {
        for (i, (name, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                buf.push(';');
            }
            buf.push_str(name);
            buf.push(':');
            buf.push_str(value);
        }
    }
}

/// Multiply the number of a single length, keeping its unit.
///
/// With `absolute_only`, unitless, percentage and em/ex values are left alone.
fn scale_length(text: &str, factor: f64, absolute_only: bool) -> Option<String> {
    let (value, unit) = parse_with(text, |input| {
        let location = input.current_source_location();
        match input.next()? {
            Token::Number { value, .. } => Ok((f64::from(*value), String::new())),
            Token::Percentage { unit_value, .. } => {
                Ok((f64::from(*unit_value) * 100.0, "%".to_string()))
            }
            Token::Dimension { value, unit, .. } => Ok((f64::from(*value), unit.to_string())),
            _ => Err(location.new_custom_error(())),
        }
    })?;
    if absolute_only && (unit.is_empty() || unit == "%" || unit.starts_with('e')) {
        return None;
    }
    Some(format!("{}{}", format_number(value * factor), unit))
}

fn scale_dasharray(text: &str, factor: f64) -> Option<String> {
    if text == "none" {
        return None;
    }
    let scaled: Option<Vec<String>> = split_list(text)
        .map(|entry| scale_length(entry, factor, false))
        .collect();
    Some(scaled?.join(", "))
}
