//! Fill and stroke paint, paint order, filters and stroke extensions.

use std::sync::Arc;

use cssparser::{ParseError, Parser};

use super::color::{IccColor, Rgb, parse_color};
use super::parse_with;
use crate::style::ToCss;
use crate::style::prop::{CascadeContext, Prop, PropertyValue, ReadContext};
use crate::style::properties::{PaintLayer, enum_property};

enum_property! {
    /// Element kinds that can act as a paint server, by tag name.
    pub enum PaintServerKind {
        #[default]
        LinearGradient => "linearGradient",
        RadialGradient => "radialGradient",
        Pattern => "pattern",
        SolidColor => "solidColor" | "solidcolor",
        MeshGradient => "meshgradient" | "mesh" | "meshGradient",
    }
}

/// A gradient, pattern or other paint server living in a document.
///
/// The style core only needs to know what it is and which color to use
/// when it cannot be rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintServer {
    pub id: String,
    pub kind: PaintServerKind,
    pub fallback: Option<Rgb>,
}

/// A `url(...)` reference, bound to its target once the document resolves it.
#[derive(Debug, Clone)]
pub struct PaintServerRef {
    pub url: String,
    pub target: Option<Arc<PaintServer>>,
}

impl PaintServerRef {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            target: None,
        }
    }

    /// The referenced element id for same-document references (`#id`).
    pub fn fragment(&self) -> Option<&str> {
        self.url.strip_prefix('#')
    }
}

impl PartialEq for PaintServerRef {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

// ============================================================================
// Paint
// ============================================================================

/// What a paint draws, apart from a paint server.
///
/// With a server present this is the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaintKind {
    /// Nothing given (a bare url, or an unset paint).
    #[default]
    Unset,
    None,
    Color,
    CurrentColor,
    ContextFill,
    ContextStroke,
}

/// `fill`, `stroke` and the text decoration paints.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paint {
    pub server: Option<PaintServerRef>,
    pub kind: PaintKind,
    pub color: Rgb,
    pub icc: Option<IccColor>,
}

impl Paint {
    pub const fn unset() -> Self {
        Self {
            server: None,
            kind: PaintKind::Unset,
            color: Rgb::BLACK,
            icc: None,
        }
    }

    pub const fn none() -> Self {
        Self {
            server: None,
            kind: PaintKind::None,
            color: Rgb::BLACK,
            icc: None,
        }
    }

    pub const fn color(color: Rgb) -> Self {
        Self {
            server: None,
            kind: PaintKind::Color,
            color,
            icc: None,
        }
    }

    /// Paints with a plain color (including `currentColor`).
    #[inline]
    pub fn is_color(&self) -> bool {
        self.server.is_none() && matches!(self.kind, PaintKind::Color | PaintKind::CurrentColor)
    }

    #[inline]
    pub fn is_paint_server(&self) -> bool {
        self.server.is_some()
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        self.server.is_none() && self.kind == PaintKind::None
    }

    #[inline]
    pub fn is_context(&self) -> bool {
        matches!(self.kind, PaintKind::ContextFill | PaintKind::ContextStroke)
    }

    /// The bound paint server, if the reference resolved.
    pub fn server_target(&self) -> Option<&Arc<PaintServer>> {
        self.server.as_ref()?.target.as_ref()
    }

    fn parse<'i>(
        input: &mut Parser<'i, '_>,
        ctx: &ReadContext<'_>,
    ) -> Result<Self, ParseError<'i, ()>> {
        let mut paint = Paint::unset();
        if let Ok(url) = input.try_parse(|i| i.expect_url()) {
            paint.server = Some(PaintServerRef::new(url.as_ref()));
            if input.is_exhausted() {
                return Ok(paint);
            }
        }

        let keyword = input.try_parse(|i| -> Result<_, ParseError<'_, ()>> {
            let ident = i.expect_ident()?;
            match ident.as_ref() {
                "currentColor" => Ok(PaintKind::CurrentColor),
                "context-fill" => Ok(PaintKind::ContextFill),
                "context-stroke" => Ok(PaintKind::ContextStroke),
                "none" => Ok(PaintKind::None),
                _ => Err(i.new_custom_error(())),
            }
        });
        match keyword {
            Ok(kind) => {
                paint.kind = kind;
                if kind == PaintKind::CurrentColor {
                    paint.color = ctx.color;
                }
            }
            Err(_) => {
                paint.color = parse_color(input)?;
                paint.kind = PaintKind::Color;
                paint.icc = input.try_parse(IccColor::parse).ok();
            }
        }
        Ok(paint)
    }
}

impl ToCss for Paint {
    fn to_css(&self, buf: &mut String) {
        if let Some(server) = &self.server {
            buf.push_str("url(");
            buf.push_str(&server.url);
            buf.push(')');
            if self.kind != PaintKind::Unset {
                buf.push(' ');
            }
        }
        match self.kind {
            PaintKind::Unset => {}
            PaintKind::None => buf.push_str("none"),
            PaintKind::CurrentColor => buf.push_str("currentColor"),
            PaintKind::ContextFill => buf.push_str("context-fill"),
            PaintKind::ContextStroke => buf.push_str("context-stroke"),
            PaintKind::Color => {
                self.color.to_css(buf);
                if let Some(icc) = &self.icc {
                    buf.push(' ');
                    icc.to_css(buf);
                }
            }
        }
    }
}

impl PropertyValue for Paint {
    fn parse_into(&mut self, text: &str, ctx: &ReadContext<'_>) -> bool {
        match parse_with(text, |input| Paint::parse(input, ctx)) {
            Some(paint) => {
                *self = paint;
                true
            }
            None => false,
        }
    }

    fn same(&self, other: &Self) -> bool {
        if self.kind != other.kind || self.server != other.server {
            return false;
        }
        match self.kind {
            PaintKind::Color | PaintKind::CurrentColor => {
                self.color == other.color && self.icc == other.icc
            }
            _ => true,
        }
    }

    fn cascade(slot: &mut Prop<Self>, parent: &Prop<Self>, ctx: &CascadeContext<'_>) {
        if !slot.set || slot.inherit {
            slot.value = parent.value.clone();
        }
        if slot.value.kind == PaintKind::CurrentColor {
            slot.value.color = ctx.color;
        }
    }

    fn merge(slot: &mut Prop<Self>, parent: &Prop<Self>, ctx: &CascadeContext<'_>) {
        if slot.takes_parent(parent) {
            slot.adopt(parent);
            if slot.value.kind == PaintKind::CurrentColor {
                slot.value.color = ctx.color;
            }
        }
    }
}

// ============================================================================
// Paint order
// ============================================================================

/// `paint-order`: up to three layers, in drawing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaintOrder {
    pub layers: [PaintLayer; 3],
    /// Which layers were written out rather than filled in.
    pub explicit: [bool; 3],
}

impl PaintOrder {
    const DEFAULT_ORDER: [PaintLayer; 3] = [PaintLayer::Fill, PaintLayer::Stroke, PaintLayer::Markers];

    pub const fn normal() -> Self {
        Self {
            layers: [PaintLayer::Normal; 3],
            explicit: [true, false, false],
        }
    }

    #[inline]
    pub fn is_normal(&self) -> bool {
        self.layers[0] == PaintLayer::Normal
    }

    /// The drawing order with `normal` expanded.
    pub fn effective(&self) -> [PaintLayer; 3] {
        if self.is_normal() {
            Self::DEFAULT_ORDER
        } else {
            self.layers
        }
    }
}

impl Default for PaintOrder {
    fn default() -> Self {
        Self::normal()
    }
}

impl ToCss for PaintOrder {
    fn to_css(&self, buf: &mut String) {
        let mut first = true;
        for (layer, explicit) in self.layers.iter().zip(self.explicit) {
            if !explicit {
                continue;
            }
            if !first {
                buf.push(' ');
            }
            layer.to_css(buf);
            first = false;
        }
    }
}

impl PropertyValue for PaintOrder {
    fn parse_into(&mut self, text: &str, _ctx: &ReadContext<'_>) -> bool {
        if text == "normal" {
            *self = PaintOrder::normal();
            return true;
        }

        let mut layers = Vec::with_capacity(3);
        for token in text.split_ascii_whitespace().take(3) {
            match PaintLayer::from_css(token) {
                Some(layer) if layer != PaintLayer::Normal && !layers.contains(&layer) => {
                    layers.push(layer)
                }
                _ => break,
            }
        }
        if layers.is_empty() {
            return false;
        }

        let mut order = PaintOrder {
            layers: [PaintLayer::Normal; 3],
            explicit: [false; 3],
        };
        for (i, layer) in layers.iter().enumerate() {
            order.layers[i] = *layer;
            order.explicit[i] = true;
        }
        let missing = Self::DEFAULT_ORDER.into_iter().filter(|layer| !layers.contains(layer));
        for (i, layer) in (layers.len()..3).zip(missing) {
            order.layers[i] = layer;
        }
        *self = order;
        true
    }

    fn same(&self, other: &Self) -> bool {
        (self.is_normal() && other.is_normal()) || self.layers == other.layers
    }
}

// ============================================================================
// Filter
// ============================================================================

/// `filter`: `none` or a reference to a filter element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Filter {
    pub url: Option<String>,
}

impl ToCss for Filter {
    fn to_css(&self, buf: &mut String) {
        match &self.url {
            Some(url) => {
                buf.push_str("url(");
                buf.push_str(url);
                buf.push(')');
            }
            None => buf.push_str("none"),
        }
    }
}

impl PropertyValue for Filter {
    fn parse_into(&mut self, text: &str, _ctx: &ReadContext<'_>) -> bool {
        if text == "none" {
            self.url = None;
            return true;
        }
        match parse_with(text, |input| Ok(input.expect_url()?.to_string())) {
            Some(url) => {
                self.url = Some(url);
                true
            }
            None => false,
        }
    }

    /// References are resolved by the renderer, so they never make styles differ.
    fn same(&self, _other: &Self) -> bool {
        true
    }

    fn merge(slot: &mut Prop<Self>, parent: &Prop<Self>, _ctx: &CascadeContext<'_>) {
        if (!slot.set || slot.inherit) && parent.value.url.is_some() {
            slot.set = true;
            slot.inherit = false;
            slot.value.url = parent.value.url.clone();
        }
    }
}

// ============================================================================
// Stroke extensions
// ============================================================================

/// `-inkscape-stroke`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StrokeExtensions {
    pub hairline: bool,
}

impl ToCss for StrokeExtensions {
    fn to_css(&self, buf: &mut String) {
        buf.push_str(if self.hairline { "hairline" } else { "none" });
    }
}

impl PropertyValue for StrokeExtensions {
    fn parse_into(&mut self, text: &str, _ctx: &ReadContext<'_>) -> bool {
        match text {
            "none" => self.hairline = false,
            "hairline" => self.hairline = true,
            _ => return false,
        }
        true
    }

    fn same(&self, other: &Self) -> bool {
        self == other
    }
}
