//! The property registry: `PropertyId` and the `Style` slot table.
//!
//! Every property is declared once in the `style_properties!` table below.
//! The table order is the serialization order.

use std::sync::LazyLock;

use super::prop::{CascadeContext, Prop, PropertyValue, ReadContext, StyleSource, WriteFlags};
use super::properties::*;
use super::values::*;
use crate::config::CascadeConfig;

macro_rules! style_properties {
    (
        $(
            $variant:ident, $field:ident, $name:literal, $ty:ty, inherits: $inherits:literal, $init:expr;
        )*
    ) => {
        /// Identifies one property slot of a [`Style`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum PropertyId {
            $($variant,)*
        }

        impl PropertyId {
            /// Every property, in serialization order.
            pub const ALL: &'static [PropertyId] = &[$(PropertyId::$variant,)*];

            /// The CSS property name.
            pub fn name(self) -> &'static str {
                match self {
                    $(PropertyId::$variant => $name,)*
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(PropertyId::$variant),)*
                    _ => None,
                }
            }

            /// Whether an unset value takes the parent's computed value.
            pub fn inherits(self) -> bool {
                match self {
                    $(PropertyId::$variant => $inherits,)*
                }
            }
        }

        /// The style of one element: a slot per property.
        #[derive(Debug, Clone)]
        pub struct Style {
            $(pub $field: Prop<$ty>,)*
            /// Font metrics for text decorations, injected by the renderer.
            pub(crate) decoration_data: Option<TextDecorationData>,
        }

        impl Style {
            pub(crate) fn initial() -> Self {
                Style {
                    $($field: Prop::new($init),)*
                    decoration_data: None,
                }
            }

            /// Read one longhand, honouring `!important` priority.
            pub(crate) fn read_slot(
                &mut self,
                id: PropertyId,
                text: &str,
                important: bool,
                source: StyleSource,
                config: &CascadeConfig,
            ) {
                let ctx = self.read_context(id, source, config);
                match id {
                    $(PropertyId::$variant => self.$field.read_if_unset(text, important, &ctx),)*
                }
            }

            pub(crate) fn write_slot(
                &self,
                id: PropertyId,
                buf: &mut String,
                flags: WriteFlags,
                source: StyleSource,
                base: Option<&Style>,
            ) {
                match id {
                    $(PropertyId::$variant => self.$field.write(
                        $name,
                        buf,
                        flags,
                        source,
                        base.map(|b| &b.$field),
                        $inherits,
                    ),)*
                }
            }

            pub(crate) fn cascade_slots(&mut self, parent: &Style, config: &CascadeConfig) {
                $(
                    let ctx = self.cascade_context(PropertyId::$variant, parent, config);
                    <$ty as PropertyValue>::cascade(&mut self.$field, &parent.$field, &ctx);
                )*
            }

            pub(crate) fn merge_slots(&mut self, parent: &Style, config: &CascadeConfig) {
                $(
                    let ctx = self.cascade_context(PropertyId::$variant, parent, config);
                    <$ty as PropertyValue>::merge(&mut self.$field, &parent.$field, &ctx);
                )*
            }

            pub(crate) fn clear_slot(&mut self, id: PropertyId) {
                match id {
                    $(PropertyId::$variant => self.$field = INITIAL.$field.clone(),)*
                }
            }

            pub(crate) fn slots_equal(&self, other: &Style) -> bool {
                true $(&& self.$field.same(&other.$field))*
            }

            /// The written value of one slot, without its name.
            pub fn value_string(&self, id: PropertyId) -> String {
                match id {
                    $(PropertyId::$variant => self.$field.value_string(),)*
                }
            }

            /// Whether the property was explicitly assigned on this style.
            pub fn is_set(&self, id: PropertyId) -> bool {
                match id {
                    $(PropertyId::$variant => self.$field.set,)*
                }
            }

            pub fn is_important(&self, id: PropertyId) -> bool {
                match id {
                    $(PropertyId::$variant => self.$field.important,)*
                }
            }

            /// Which input last assigned the property.
            pub fn source(&self, id: PropertyId) -> StyleSource {
                match id {
                    $(PropertyId::$variant => self.$field.source,)*
                }
            }

            /// Mark a slot set without reading a value, keeping its current value.
            pub(crate) fn mark_set(&mut self, id: PropertyId, important: bool, source: StyleSource) {
                match id {
                    $(PropertyId::$variant => {
                        self.$field.set = true;
                        self.$field.inherit = false;
                        self.$field.important |= important;
                        self.$field.source = source;
                    })*
                }
            }
        }
    };
}

style_properties! {
    D, d, "d", StringValue, inherits: false, StringValue::new("", Quoting::Plain);
    Color, color, "color", ColorValue, inherits: true, ColorValue::rgb(Rgb::BLACK);

    FontStyle, font_style, "font-style", Keyword<FontStyle>, inherits: true, Keyword::default();
    FontVariant, font_variant, "font-variant", Keyword<FontVariant>, inherits: true, Keyword::default();
    FontWeight, font_weight, "font-weight", Keyword<FontWeight>, inherits: true, Keyword::default();
    FontStretch, font_stretch, "font-stretch", Keyword<FontStretch>, inherits: true, Keyword::default();
    FontSize, font_size, "font-size", FontSize, inherits: true, FontSize::default();
    LineHeight, line_height, "line-height", LengthOrNormal, inherits: true, LengthOrNormal::normal();
    FontFamily, font_family, "font-family", StringValue, inherits: true,
        StringValue::new("sans-serif", Quoting::FontFamily);
    Font, font, "font", FontShorthand, inherits: true, FontShorthand;
    FontSpecification, font_specification, "-inkscape-font-specification", StringValue, inherits: true,
        StringValue::new("", Quoting::Css);

    FontVariantLigatures, font_variant_ligatures, "font-variant-ligatures", Ligatures, inherits: true,
        Ligatures::NORMAL;
    FontVariantPosition, font_variant_position, "font-variant-position", Keyword<FontVariantPosition>,
        inherits: true, Keyword::default();
    FontVariantCaps, font_variant_caps, "font-variant-caps", Keyword<FontVariantCaps>, inherits: true,
        Keyword::default();
    FontVariantNumeric, font_variant_numeric, "font-variant-numeric", NumericVariant, inherits: true,
        NumericVariant::empty();
    FontVariantAlternates, font_variant_alternates, "font-variant-alternates",
        Keyword<FontVariantAlternates>, inherits: true, Keyword::default();
    FontVariantEastAsian, font_variant_east_asian, "font-variant-east-asian", EastAsianVariant,
        inherits: true, EastAsianVariant::empty();
    FontFeatureSettings, font_feature_settings, "font-feature-settings", StringValue, inherits: true,
        StringValue::new("normal", Quoting::Plain);
    FontVariationSettings, font_variation_settings, "font-variation-settings", VariationSettings,
        inherits: true, VariationSettings::default();

    TextIndent, text_indent, "text-indent", Length, inherits: true, Length::new(0.0);
    TextAlign, text_align, "text-align", Keyword<TextAlign>, inherits: true, Keyword::default();
    TextDecoration, text_decoration, "text-decoration", TextDecoration, inherits: true, TextDecoration;
    TextDecorationLine, text_decoration_line, "text-decoration-line", DecorationLine, inherits: true,
        DecorationLine::empty();
    TextDecorationStyle, text_decoration_style, "text-decoration-style", DecorationStyle,
        inherits: true, DecorationStyle::Solid;
    TextDecorationColor, text_decoration_color, "text-decoration-color", ColorValue, inherits: true,
        ColorValue::current_color();
    TextDecorationFill, text_decoration_fill, "text-decoration-fill", Paint, inherits: true,
        Paint::unset();
    TextDecorationStroke, text_decoration_stroke, "text-decoration-stroke", Paint, inherits: true,
        Paint::unset();
    LetterSpacing, letter_spacing, "letter-spacing", LengthOrNormal, inherits: true,
        LengthOrNormal::normal();
    WordSpacing, word_spacing, "word-spacing", LengthOrNormal, inherits: true, LengthOrNormal::normal();
    TextTransform, text_transform, "text-transform", Keyword<TextTransform>, inherits: true,
        Keyword::default();

    WritingMode, writing_mode, "writing-mode", Keyword<WritingMode>, inherits: true, Keyword::default();
    Direction, direction, "direction", Keyword<Direction>, inherits: true, Keyword::default();
    TextOrientation, text_orientation, "text-orientation", Keyword<TextOrientation>, inherits: true,
        Keyword::default();
    DominantBaseline, dominant_baseline, "dominant-baseline", Keyword<DominantBaseline>,
        inherits: true, Keyword::default();
    BaselineShift, baseline_shift, "baseline-shift", BaselineShift, inherits: false,
        BaselineShift::default();
    TextAnchor, text_anchor, "text-anchor", Keyword<TextAnchor>, inherits: true, Keyword::default();
    WhiteSpace, white_space, "white-space", Keyword<WhiteSpace>, inherits: true, Keyword::default();

    ShapeInside, shape_inside, "shape-inside", StringValue, inherits: false,
        StringValue::new("", Quoting::Plain);
    ShapeSubtract, shape_subtract, "shape-subtract", StringValue, inherits: false,
        StringValue::new("", Quoting::Plain);
    ShapePadding, shape_padding, "shape-padding", Length, inherits: false, Length::new(0.0);
    ShapeMargin, shape_margin, "shape-margin", Length, inherits: false, Length::new(0.0);
    InlineSize, inline_size, "inline-size", Length, inherits: false, Length::new(0.0);

    ClipRule, clip_rule, "clip-rule", Keyword<FillRule>, inherits: true, Keyword::default();
    Display, display, "display", Keyword<Display>, inherits: false, Keyword::default();
    Overflow, overflow, "overflow", Keyword<Overflow>, inherits: false, Keyword::default();
    Visibility, visibility, "visibility", Keyword<Visibility>, inherits: true, Keyword::default();
    Opacity, opacity, "opacity", Scale24, inherits: false, Scale24::ONE;
    Isolation, isolation, "isolation", Keyword<Isolation>, inherits: false, Keyword::default();
    MixBlendMode, mix_blend_mode, "mix-blend-mode", Keyword<BlendMode>, inherits: false,
        Keyword::default();
    ColorInterpolation, color_interpolation, "color-interpolation", Keyword<ColorInterpolation>,
        inherits: true, Keyword::new(ColorInterpolation::SRgb);
    ColorInterpolationFilters, color_interpolation_filters, "color-interpolation-filters",
        Keyword<ColorInterpolation>, inherits: true, Keyword::new(ColorInterpolation::LinearRgb);
    SolidColor, solid_color, "solid-color", ColorValue, inherits: false, ColorValue::rgb(Rgb::BLACK);
    SolidOpacity, solid_opacity, "solid-opacity", Scale24, inherits: false, Scale24::ONE;
    VectorEffect, vector_effect, "vector-effect", VectorEffect, inherits: false, VectorEffect::empty();

    Fill, fill, "fill", Paint, inherits: true, Paint::color(Rgb::BLACK);
    FillOpacity, fill_opacity, "fill-opacity", Scale24, inherits: true, Scale24::ONE;
    FillRule, fill_rule, "fill-rule", Keyword<FillRule>, inherits: true, Keyword::default();
    Stroke, stroke, "stroke", Paint, inherits: true, Paint::none();
    StrokeWidth, stroke_width, "stroke-width", Length, inherits: true, Length::new(1.0);
    StrokeLinecap, stroke_linecap, "stroke-linecap", Keyword<StrokeLinecap>, inherits: true,
        Keyword::default();
    StrokeLinejoin, stroke_linejoin, "stroke-linejoin", Keyword<StrokeLinejoin>, inherits: true,
        Keyword::default();
    StrokeMiterlimit, stroke_miterlimit, "stroke-miterlimit", Float, inherits: true, Float(4.0);
    StrokeDasharray, stroke_dasharray, "stroke-dasharray", DashArray, inherits: true,
        DashArray::default();
    StrokeDashoffset, stroke_dashoffset, "stroke-dashoffset", Length, inherits: true, Length::new(0.0);
    StrokeOpacity, stroke_opacity, "stroke-opacity", Scale24, inherits: true, Scale24::ONE;
    StrokeExtensions, stroke_extensions, "-inkscape-stroke", StrokeExtensions, inherits: false,
        StrokeExtensions::default();

    Marker, marker, "marker", StringValue, inherits: true, StringValue::new("", Quoting::Plain);
    MarkerStart, marker_start, "marker-start", StringValue, inherits: true,
        StringValue::new("", Quoting::Plain);
    MarkerMid, marker_mid, "marker-mid", StringValue, inherits: true,
        StringValue::new("", Quoting::Plain);
    MarkerEnd, marker_end, "marker-end", StringValue, inherits: true,
        StringValue::new("", Quoting::Plain);
    PaintOrder, paint_order, "paint-order", PaintOrder, inherits: true, PaintOrder::normal();
    Filter, filter, "filter", Filter, inherits: false, Filter::default();

    ColorRendering, color_rendering, "color-rendering", Keyword<ColorRendering>, inherits: true,
        Keyword::default();
    ImageRendering, image_rendering, "image-rendering", Keyword<ImageRendering>, inherits: true,
        Keyword::default();
    ShapeRendering, shape_rendering, "shape-rendering", Keyword<ShapeRendering>, inherits: true,
        Keyword::default();
    TextRendering, text_rendering, "text-rendering", Keyword<TextRendering>, inherits: true,
        Keyword::default();
    EnableBackground, enable_background, "enable-background", Keyword<EnableBackground>,
        inherits: false, Keyword::default();

    StopColor, stop_color, "stop-color", ColorValue, inherits: false, ColorValue::rgb(Rgb::BLACK);
    StopOpacity, stop_opacity, "stop-opacity", Scale24, inherits: false, Scale24::ONE;
}

/// CSS initial values. Unset slots of a fresh style hold these.
pub static INITIAL: LazyLock<Style> = LazyLock::new(Style::initial);

impl Style {
    /// What a value parser sees of this style.
    pub(crate) fn read_context<'a>(
        &self,
        id: PropertyId,
        source: StyleSource,
        config: &'a CascadeConfig,
    ) -> ReadContext<'a> {
        ReadContext {
            id,
            source,
            font_size: self.font_size.value.computed,
            color: self.color.value.rgb,
            config,
        }
    }

    /// What a slot's value hooks see during a cascade or merge against `parent`.
    fn cascade_context<'a>(
        &self,
        id: PropertyId,
        parent: &Style,
        config: &'a CascadeConfig,
    ) -> CascadeContext<'a> {
        CascadeContext {
            id,
            inherits: id.inherits(),
            font_size: self.font_size.value.computed,
            parent_font_size: parent.font_size.value.computed,
            color: self.color.value.rgb,
            config,
        }
    }
}
