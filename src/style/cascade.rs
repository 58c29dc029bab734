//! Reading declarations into a style and resolving it against its parent.
//!
//! A style is filled from its inputs in decreasing priority: the `style`
//! attribute, matched stylesheet rules, then presentation attributes. Each
//! slot keeps the first value it receives (unless a later one is
//! `!important`), so the order of these calls is the cascade order.
//! [`Style::cascade`] then fills the slots that were not set from the
//! parent's resolved style.

use super::declaration::DeclarationBlock;
use super::prop::StyleSource;
use super::properties::{
    ColorInterpolation, EastAsianVariant, FontVariantCaps, FontVariantPosition, Ligatures,
    NumericVariant,
};
use super::shorthand::{read_font, read_text_decoration};
use super::types::{INITIAL, PropertyId, Style};
use super::values::{Paint, PaintKind, TextDecorationData};
use crate::config::{CascadeConfig, DEFAULT_CONFIG};
use crate::error::{Error, Result};
use crate::util::strip_important;

/// Where along a path a marker is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerLocation {
    Start,
    Mid,
    End,
}

/// Which paint of an element is being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaintTarget {
    Fill,
    Stroke,
}

impl Default for Style {
    fn default() -> Self {
        Self::new()
    }
}

/// Styles compare by value; how a value was written or whether it was set
/// does not matter.
impl PartialEq for Style {
    fn eq(&self, other: &Self) -> bool {
        self.slots_equal(other)
    }
}

impl Style {
    /// A style with every property unset, at its initial value.
    pub fn new() -> Self {
        INITIAL.clone()
    }

    /// A style read from a declaration list.
    pub fn from_css(css: &str) -> Self {
        let mut style = Style::new();
        style.merge_string(css);
        style
    }

    /// Reset every property to its initial value.
    pub fn clear(&mut self) {
        *self = INITIAL.clone();
    }

    pub fn clear_property(&mut self, id: PropertyId) {
        self.clear_slot(id);
    }

    // ------------------------------------------------------------------------
    // Reading
    // ------------------------------------------------------------------------

    /// Merge the declarations of a `style` attribute.
    ///
    /// Within the list the last declaration of a property wins, unless an
    /// earlier one is `!important`.
    pub fn merge_string(&mut self, css: &str) {
        self.merge_declarations(&DeclarationBlock::parse(css), StyleSource::StyleProperty);
    }

    /// Merge an already parsed declaration list.
    pub fn merge_declarations(&mut self, block: &DeclarationBlock, source: StyleSource) {
        for decl in block.iter().rev() {
            self.read_if_unset(&decl.name, &decl.value, decl.important, source);
        }
    }

    /// Merge matched stylesheet rules, given in increasing priority order.
    pub fn merge_stylesheet(&mut self, blocks: &[DeclarationBlock]) {
        for block in blocks.iter().rev() {
            self.merge_declarations(block, StyleSource::StyleSheet);
        }
    }

    /// Read a presentation attribute such as `fill="red"`.
    ///
    /// Attributes that are not style properties are ignored, as are the
    /// `font` and `marker` shorthands, which are not valid attributes.
    pub fn read_attribute(&mut self, name: &str, value: &str) {
        if matches!(name, "font" | "marker") {
            return;
        }
        if PropertyId::from_name(name).is_some() {
            self.read_if_unset(name, value, false, StyleSource::Attribute);
        }
    }

    /// Read everything that styles one element and resolve it against its parent.
    pub fn read<'a>(
        &mut self,
        style_attribute: Option<&str>,
        matched: &[DeclarationBlock],
        attributes: impl IntoIterator<Item = (&'a str, &'a str)>,
        parent: Option<&Style>,
    ) {
        self.clear();
        if let Some(css) = style_attribute {
            self.merge_string(css);
        }
        self.merge_stylesheet(matched);
        for (name, value) in attributes {
            self.read_attribute(name, value);
        }
        if let Some(parent) = parent {
            self.cascade(parent);
        }
    }

    /// Read one declaration unless the property already holds a value of
    /// equal or higher priority. Unknown properties are ignored.
    pub fn read_if_unset(&mut self, name: &str, value: &str, important: bool, source: StyleSource) {
        let Some(id) = PropertyId::from_name(name) else {
            tracing::debug!(property = name, "ignored unknown property");
            return;
        };
        let config = &DEFAULT_CONFIG;
        match id {
            PropertyId::Font => {
                if !self.font.set || (important && !self.font.important) {
                    read_font(self, value, important, source, config);
                }
            }
            PropertyId::TextDecoration => {
                if !self.text_decoration.set || (important && !self.text_decoration.important) {
                    read_text_decoration(self, value, important, source, config);
                }
            }
            PropertyId::Filter => {
                if !self.filter.inherit {
                    self.read_slot(id, value, important, source, config);
                }
            }
            PropertyId::ColorInterpolation => {
                self.read_slot(id, value, important, source, config);
                let slot = &self.color_interpolation;
                if slot.set && !slot.inherit && slot.value.computed != ColorInterpolation::SRgb {
                    tracing::warn!(value, "color-interpolation other than sRGB is not supported");
                }
            }
            _ => self.read_slot(id, value, important, source, config),
        }
    }

    /// Set a property, replacing whatever it held.
    ///
    /// A trailing `!important` in `value` is honoured.
    pub fn set_property(&mut self, name: &str, value: &str) -> Result<()> {
        let id = PropertyId::from_name(name).ok_or_else(|| Error::UnknownProperty(name.into()))?;
        let (value, important) = strip_important(value.trim());

        self.clear_slot(id);
        match id {
            PropertyId::Font => {
                for longhand in [
                    PropertyId::FontStyle,
                    PropertyId::FontVariant,
                    PropertyId::FontWeight,
                    PropertyId::FontStretch,
                    PropertyId::FontSize,
                    PropertyId::LineHeight,
                    PropertyId::FontFamily,
                ] {
                    self.clear_slot(longhand);
                }
            }
            PropertyId::TextDecoration => {
                self.clear_slot(PropertyId::TextDecorationLine);
                self.clear_slot(PropertyId::TextDecorationStyle);
                self.clear_slot(PropertyId::TextDecorationColor);
            }
            _ => {}
        }
        self.read_if_unset(name, value, important, StyleSource::StyleProperty);
        Ok(())
    }

    /// The value of a property as it would be written, or `None` for
    /// unknown names.
    pub fn get(&self, name: &str) -> Option<String> {
        let id = PropertyId::from_name(name)?;
        if id == PropertyId::TextDecoration && !self.text_decoration.inherit {
            return Some(self.text_decoration_line.value_string());
        }
        Some(self.value_string(id))
    }

    // ------------------------------------------------------------------------
    // Cascade
    // ------------------------------------------------------------------------

    /// Resolve this style against its parent's resolved style.
    pub fn cascade(&mut self, parent: &Style) {
        self.cascade_with(parent, &DEFAULT_CONFIG);
    }

    pub fn cascade_with(&mut self, parent: &Style, config: &CascadeConfig) {
        self.cascade_slots(parent, config);
        if self.decoration_data.is_none() {
            self.decoration_data = parent.decoration_data;
        }
    }

    /// Fold the explicitly set values of a parent that is about to be
    /// removed into this style, so the element keeps its appearance.
    pub fn merge_from_parent(&mut self, parent: &Style) {
        self.merge_slots(parent, &DEFAULT_CONFIG);
    }

    // ------------------------------------------------------------------------
    // Derived values
    // ------------------------------------------------------------------------

    /// OpenType feature settings implied by the `font-variant-*` properties
    /// and `font-feature-settings`, as a comma separated list.
    pub fn font_feature_string(&self) -> String {
        let mut features: Vec<&str> = Vec::new();

        let ligatures = self.font_variant_ligatures.value;
        if !ligatures.contains(Ligatures::COMMON) {
            features.extend(["liga 0", "clig 0"]);
        }
        if ligatures.contains(Ligatures::DISCRETIONARY) {
            features.push("dlig");
        }
        if ligatures.contains(Ligatures::HISTORICAL) {
            features.push("hlig");
        }
        if !ligatures.contains(Ligatures::CONTEXTUAL) {
            features.push("calt 0");
        }

        match self.font_variant_position.value.computed {
            FontVariantPosition::Sub => features.push("subs"),
            FontVariantPosition::Super => features.push("sups"),
            FontVariantPosition::Normal => {}
        }

        match self.font_variant_caps.value.computed {
            FontVariantCaps::SmallCaps => features.push("smcp"),
            FontVariantCaps::AllSmallCaps => features.extend(["smcp", "c2sc"]),
            FontVariantCaps::PetiteCaps => features.push("pcap"),
            FontVariantCaps::AllPetiteCaps => features.extend(["pcap", "c2pc"]),
            FontVariantCaps::Unicase => features.push("unic"),
            FontVariantCaps::TitlingCaps => features.push("titl"),
            FontVariantCaps::Normal => {}
        }

        const NUMERIC: [&str; 8] = ["lnum", "onum", "pnum", "tnum", "frac", "afrc", "ordn", "zero"];
        let numeric = self.font_variant_numeric.value;
        for ((_, flag), tag) in NumericVariant::TOKENS.iter().zip(NUMERIC) {
            if numeric.contains(*flag) {
                features.push(tag);
            }
        }

        const EAST_ASIAN: [&str; 9] = [
            "jp78", "jp83", "jp90", "jp04", "smpl", "trad", "fwid", "pwid", "ruby",
        ];
        let east_asian = self.font_variant_east_asian.value;
        for ((_, flag), tag) in EastAsianVariant::TOKENS.iter().zip(EAST_ASIAN) {
            if east_asian.contains(*flag) {
                features.push(tag);
            }
        }

        if let Some(settings) = &self.font_feature_settings.value.value {
            features.push(settings);
        }

        if features.is_empty() {
            "normal".to_string()
        } else {
            features.join(", ")
        }
    }

    /// The marker drawn at `location`, falling back to the `marker` shorthand.
    ///
    /// `None` when no marker is drawn there, including an explicit `none`.
    pub fn marker_for(&self, location: MarkerLocation) -> Option<&str> {
        let slot = match location {
            MarkerLocation::Start => &self.marker_start,
            MarkerLocation::Mid => &self.marker_mid,
            MarkerLocation::End => &self.marker_end,
        };
        let specific = slot.value.value.as_deref().filter(|value| !value.is_empty());
        specific
            .or(self.marker.value.value.as_deref())
            .filter(|value| !value.is_empty() && *value != "none")
    }

    /// The paint used for `target`, with `context-fill` and `context-stroke`
    /// taken from the style of the element that provides the context (the
    /// shape a marker is drawn on, say).
    ///
    /// Without a context the paint is cleared.
    pub fn resolved_paint(&self, target: PaintTarget, context: Option<&Style>) -> Paint {
        let paint = match target {
            PaintTarget::Fill => &self.fill.value,
            PaintTarget::Stroke => &self.stroke.value,
        };
        let context_target = match paint.kind {
            PaintKind::ContextFill => PaintTarget::Fill,
            PaintKind::ContextStroke => PaintTarget::Stroke,
            _ => return paint.clone(),
        };
        match context {
            Some(context) => match context_target {
                PaintTarget::Fill => context.fill.value.clone(),
                PaintTarget::Stroke => context.stroke.value.clone(),
            },
            None => {
                tracing::trace!(?target, "context paint without a context element");
                Paint::unset()
            }
        }
    }

    /// The paint for text decoration lines of this text, where `origin` is
    /// the style of the element that declared the decoration.
    ///
    /// Explicit `text-decoration-fill`/`-stroke` on the origin win. When the
    /// origin sets `text-decoration-color`, this text's resolved decoration
    /// color is used if the text is painted with that paint at all; an
    /// unpainted text leaves the decoration paint unset. Failing both the
    /// text's own paint is used.
    pub fn text_decoration_paint(&self, origin: &Style, target: PaintTarget) -> Paint {
        let (decoration, own) = match target {
            PaintTarget::Fill => (&origin.text_decoration_fill, &self.fill.value),
            PaintTarget::Stroke => (&origin.text_decoration_stroke, &self.stroke.value),
        };
        if decoration.set {
            return decoration.value.clone();
        }
        if origin.text_decoration_color.set {
            return if own.is_color() || own.is_paint_server() {
                Paint::color(self.text_decoration_color.value.rgb)
            } else {
                Paint::unset()
            };
        }
        own.clone()
    }

    /// Font metrics for decoration lines, once the renderer has set them.
    pub fn decoration_data(&self) -> Option<&TextDecorationData> {
        self.decoration_data.as_ref()
    }

    pub fn set_decoration_data(&mut self, data: TextDecorationData) {
        self.decoration_data = Some(data);
    }

    /// Dash lengths in px; empty for a solid stroke.
    pub fn dash_pattern(&self) -> Vec<f64> {
        self.stroke_dasharray.value.pattern()
    }

    /// Dash offset in px. A solid stroke has no offset.
    pub fn dash_offset(&self) -> f64 {
        if self.stroke_dasharray.value.is_empty() {
            0.0
        } else {
            self.stroke_dashoffset.value.computed
        }
    }
}
