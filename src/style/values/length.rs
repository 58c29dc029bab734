//! Lengths and the properties built from them.

use cssparser::Parser;

use super::{parse_length_token, parse_with};
use crate::config::{CascadeConfig, DEFAULT_CONFIG};
use crate::style::ToCss;
use crate::style::prop::{CascadeContext, Prop, PropertyValue, ReadContext};
use crate::style::properties::enum_property;
use crate::style::types::PropertyId;
use crate::util::format_number;

/// Unit of a CSS length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LengthUnit {
    /// Unitless user units.
    #[default]
    None,
    Px,
    Pt,
    Pc,
    Mm,
    Cm,
    In,
    Em,
    Ex,
    Percent,
}

impl LengthUnit {
    pub fn suffix(self) -> &'static str {
        match self {
            LengthUnit::None => "",
            LengthUnit::Px => "px",
            LengthUnit::Pt => "pt",
            LengthUnit::Pc => "pc",
            LengthUnit::Mm => "mm",
            LengthUnit::Cm => "cm",
            LengthUnit::In => "in",
            LengthUnit::Em => "em",
            LengthUnit::Ex => "ex",
            LengthUnit::Percent => "%",
        }
    }

    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Some(match suffix {
            "" => LengthUnit::None,
            "px" => LengthUnit::Px,
            "pt" => LengthUnit::Pt,
            "pc" => LengthUnit::Pc,
            "mm" => LengthUnit::Mm,
            "cm" => LengthUnit::Cm,
            "in" => LengthUnit::In,
            "em" => LengthUnit::Em,
            "ex" => LengthUnit::Ex,
            "%" => LengthUnit::Percent,
            _ => return None,
        })
    }

    /// Pixels per unit for units that do not depend on the font.
    pub fn px_factor(self) -> Option<f64> {
        match self {
            LengthUnit::None | LengthUnit::Px => Some(1.0),
            LengthUnit::Pt => Some(96.0 / 72.0),
            LengthUnit::Pc => Some(16.0),
            LengthUnit::Mm => Some(96.0 / 25.4),
            LengthUnit::Cm => Some(96.0 / 2.54),
            LengthUnit::In => Some(96.0),
            LengthUnit::Em | LengthUnit::Ex | LengthUnit::Percent => None,
        }
    }

    #[inline]
    pub fn is_font_relative(self) -> bool {
        matches!(self, LengthUnit::Em | LengthUnit::Ex)
    }
}

/// Convert a size in px to `unit`, using `font_size` for relative units.
///
/// A zero font size falls back to the default font size.
pub fn size_px_to_units(size: f64, unit: LengthUnit, font_size: f64) -> f64 {
    let font_size = effective_font_size(font_size);
    match unit {
        LengthUnit::Em => size / font_size,
        LengthUnit::Ex => size / DEFAULT_CONFIG.ex_size(font_size),
        LengthUnit::Percent => size * 100.0 / font_size,
        _ => size / unit.px_factor().unwrap_or(1.0),
    }
}

/// Convert a size in `unit` to px, using `font_size` for relative units.
pub fn size_units_to_px(size: f64, unit: LengthUnit, font_size: f64) -> f64 {
    let font_size = effective_font_size(font_size);
    match unit {
        LengthUnit::Em => size * font_size,
        LengthUnit::Ex => size * DEFAULT_CONFIG.ex_size(font_size),
        LengthUnit::Percent => size * font_size / 100.0,
        _ => size * unit.px_factor().unwrap_or(1.0),
    }
}

fn effective_font_size(font_size: f64) -> f64 {
    if font_size == 0.0 {
        DEFAULT_CONFIG.default_font_size
    } else {
        font_size
    }
}

// ============================================================================
// Length
// ============================================================================

/// A length as written plus its computed value in px.
///
/// Percentages store the fraction (`50%` has value `0.5`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Length {
    pub unit: LengthUnit,
    pub value: f64,
    pub computed: f64,
}

impl Length {
    /// A unitless length.
    pub const fn new(value: f64) -> Self {
        Self {
            unit: LengthUnit::None,
            value,
            computed: value,
        }
    }

    pub const fn px(value: f64) -> Self {
        Self {
            unit: LengthUnit::Px,
            value,
            computed: value,
        }
    }

    /// Build a length from a parsed number and unit.
    pub fn with_unit(
        value: f64,
        unit: LengthUnit,
        id: PropertyId,
        font_size: f64,
        config: &CascadeConfig,
    ) -> Self {
        let mut length = Length {
            unit,
            value,
            computed: 0.0,
        };
        length.compute(id, font_size, config);
        length
    }

    /// Recompute `computed` from the unit and value.
    ///
    /// Percentages only compute against the font for `line-height`; other
    /// percentages keep whatever computed value the renderer assigned.
    pub fn compute(&mut self, id: PropertyId, font_size: f64, config: &CascadeConfig) {
        match self.unit {
            LengthUnit::Em => self.computed = self.value * font_size,
            LengthUnit::Ex => self.computed = self.value * config.ex_size(font_size),
            LengthUnit::Percent => {
                if id == PropertyId::LineHeight {
                    self.computed = self.value * font_size;
                }
            }
            unit => self.computed = self.value * unit.px_factor().unwrap_or(1.0),
        }
    }

    pub(crate) fn parse<'i>(
        input: &mut Parser<'i, '_>,
        ctx: &ReadContext<'_>,
    ) -> Result<Self, cssparser::ParseError<'i, ()>> {
        let (value, unit) = parse_length_token(input)?;
        Ok(Length::with_unit(value, unit, ctx.id, ctx.font_size, ctx.config))
    }
}

impl ToCss for Length {
    fn to_css(&self, buf: &mut String) {
        match self.unit {
            LengthUnit::None => buf.push_str(&format_number(self.computed)),
            LengthUnit::Em | LengthUnit::Ex => {
                buf.push_str(&format_number(self.value));
                buf.push_str(self.unit.suffix());
            }
            LengthUnit::Percent => {
                buf.push_str(&format_number(self.value * 100.0));
                buf.push('%');
            }
            unit => {
                let factor = unit.px_factor().unwrap_or(1.0);
                buf.push_str(&format_number(self.computed / factor));
                buf.push_str(unit.suffix());
            }
        }
    }
}

impl PropertyValue for Length {
    fn parse_into(&mut self, text: &str, ctx: &ReadContext<'_>) -> bool {
        match parse_with(text, |input| Length::parse(input, ctx)) {
            Some(length) => {
                *self = length;
                true
            }
            None => false,
        }
    }

    /// Lengths that depend on the font never compare equal.
    fn same(&self, other: &Self) -> bool {
        if self.unit != other.unit {
            return false;
        }
        if matches!(
            self.unit,
            LengthUnit::Em | LengthUnit::Ex | LengthUnit::Percent
        ) {
            return false;
        }
        self.computed == other.computed
    }

    fn resolve(&mut self, _parent: &Self, ctx: &CascadeContext<'_>) {
        if self.unit.is_font_relative()
            || (self.unit == LengthUnit::Percent && ctx.id == PropertyId::LineHeight)
        {
            self.compute(ctx.id, ctx.font_size, ctx.config);
        }
    }

    fn merge(slot: &mut Prop<Self>, parent: &Prop<Self>, ctx: &CascadeContext<'_>) {
        if ctx.inherits && slot.takes_parent(parent) {
            slot.adopt(parent);
            rebase_font_relative(&mut slot.value, ctx);
        }
    }
}

/// Re-express an em/ex length taken from a parent against this style's font size.
fn rebase_font_relative(length: &mut Length, ctx: &CascadeContext<'_>) {
    if length.unit.is_font_relative() {
        length.value *= ctx.parent_font_size / ctx.font_size;
        if !length.value.is_finite() {
            length.value = length.computed;
            length.unit = LengthUnit::None;
        }
    }
}

// ============================================================================
// LengthOrNormal
// ============================================================================

/// A length or the keyword `normal` (line-height, letter-spacing, word-spacing).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthOrNormal {
    pub normal: bool,
    pub length: Length,
}

impl LengthOrNormal {
    pub const fn normal() -> Self {
        Self {
            normal: true,
            length: Length::new(0.0),
        }
    }

    /// Computed value, substituting `normal_value` for `normal`.
    pub fn computed_or(&self, normal_value: f64) -> f64 {
        if self.normal {
            normal_value
        } else {
            self.length.computed
        }
    }
}

impl Default for LengthOrNormal {
    fn default() -> Self {
        Self::normal()
    }
}

impl ToCss for LengthOrNormal {
    fn to_css(&self, buf: &mut String) {
        if self.normal {
            buf.push_str("normal");
        } else {
            self.length.to_css(buf);
        }
    }
}

impl PropertyValue for LengthOrNormal {
    fn parse_into(&mut self, text: &str, ctx: &ReadContext<'_>) -> bool {
        if text == "normal" {
            *self = LengthOrNormal::normal();
            return true;
        }
        if self.length.parse_into(text, ctx) {
            self.normal = false;
            true
        } else {
            false
        }
    }

    fn same(&self, other: &Self) -> bool {
        match (self.normal, other.normal) {
            (true, true) => true,
            (false, false) => self.length.same(&other.length),
            _ => false,
        }
    }

    fn resolve(&mut self, parent: &Self, ctx: &CascadeContext<'_>) {
        self.length.resolve(&parent.length, ctx);
    }

    fn merge(slot: &mut Prop<Self>, parent: &Prop<Self>, ctx: &CascadeContext<'_>) {
        if ctx.inherits && slot.takes_parent(parent) {
            slot.adopt(parent);
            rebase_font_relative(&mut slot.value.length, ctx);
        }
    }
}

// ============================================================================
// Font size
// ============================================================================

enum_property! {
    /// Font size keywords.
    pub enum FontSizeLiteral {
        XxSmall => "xx-small",
        XSmall => "x-small",
        Small => "small",
        #[default]
        Medium => "medium",
        Large => "large",
        XLarge => "x-large",
        XxLarge => "xx-large",
        Smaller => "smaller",
        Larger => "larger",
    }
}

impl FontSizeLiteral {
    /// Size in px of an absolute keyword.
    pub fn px(self) -> Option<f64> {
        match self {
            FontSizeLiteral::XxSmall => Some(6.0),
            FontSizeLiteral::XSmall => Some(8.0),
            FontSizeLiteral::Small => Some(10.0),
            FontSizeLiteral::Medium => Some(12.0),
            FontSizeLiteral::Large => Some(14.0),
            FontSizeLiteral::XLarge => Some(18.0),
            FontSizeLiteral::XxLarge => Some(24.0),
            FontSizeLiteral::Smaller | FontSizeLiteral::Larger => None,
        }
    }
}

/// How a font size was specified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FontSizeValue {
    Literal(FontSizeLiteral),
    Length { unit: LengthUnit, value: f64 },
    /// Fraction of the parent size.
    Percent(f64),
}

/// `font-size`: the specified form plus the computed size in px.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSize {
    pub specified: FontSizeValue,
    pub computed: f64,
}

impl FontSize {
    const MIN: f64 = 1.0e-32;

    /// True when the size does not depend on the parent.
    pub fn is_absolute(&self) -> bool {
        match self.specified {
            FontSizeValue::Literal(literal) => literal.px().is_some(),
            FontSizeValue::Length { unit, .. } => !unit.is_font_relative(),
            FontSizeValue::Percent(_) => false,
        }
    }

    /// Ratio to the parent size of a relative size.
    pub fn relative_fraction(&self, config: &CascadeConfig) -> f64 {
        match self.specified {
            FontSizeValue::Literal(FontSizeLiteral::Smaller) => 1.0 / config.font_size_step,
            FontSizeValue::Literal(FontSizeLiteral::Larger) => config.font_size_step,
            FontSizeValue::Percent(value) => value,
            FontSizeValue::Length {
                unit: LengthUnit::Em,
                value,
            } => value,
            FontSizeValue::Length {
                unit: LengthUnit::Ex,
                value,
            } => value * config.ex_ratio,
            _ => 1.0,
        }
    }

    /// Computed size given the parent's computed size.
    fn compute(&mut self, parent: f64, config: &CascadeConfig) {
        match self.specified {
            FontSizeValue::Literal(literal) => {
                self.computed = match literal {
                    FontSizeLiteral::Smaller => parent / config.font_size_step,
                    FontSizeLiteral::Larger => parent * config.font_size_step,
                    absolute => absolute.px().unwrap_or(config.default_font_size),
                };
            }
            FontSizeValue::Percent(value) => self.computed = parent * value,
            FontSizeValue::Length { unit, value } => match unit {
                LengthUnit::Em => self.computed = parent * value,
                LengthUnit::Ex => self.computed = parent * value * config.ex_ratio,
                _ => {}
            },
        }
        self.clamp();
    }

    fn clamp(&mut self) {
        if self.computed <= Self::MIN {
            self.computed = Self::MIN;
        }
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self {
            specified: FontSizeValue::Literal(FontSizeLiteral::Medium),
            computed: 12.0,
        }
    }
}

impl ToCss for FontSize {
    fn to_css(&self, buf: &mut String) {
        match self.specified {
            FontSizeValue::Literal(literal) => literal.to_css(buf),
            FontSizeValue::Length { unit, value } if unit.is_font_relative() => {
                buf.push_str(&format_number(value));
                buf.push_str(unit.suffix());
            }
            FontSizeValue::Length { .. } => {
                buf.push_str(&format_number(self.computed));
                buf.push_str("px");
            }
            FontSizeValue::Percent(value) => {
                buf.push_str(&format_number(value * 100.0));
                buf.push('%');
            }
        }
    }
}

impl PropertyValue for FontSize {
    fn parse_into(&mut self, text: &str, ctx: &ReadContext<'_>) -> bool {
        if let Some(literal) = FontSizeLiteral::from_css(text) {
            self.specified = FontSizeValue::Literal(literal);
            if let Some(px) = literal.px() {
                self.computed = px;
            }
            return true;
        }

        let Some((value, unit)) = parse_with(text, parse_length_token) else {
            return false;
        };
        self.specified = if unit == LengthUnit::Percent {
            FontSizeValue::Percent(value)
        } else {
            FontSizeValue::Length { unit, value }
        };
        self.computed = match unit {
            LengthUnit::Percent => value * ctx.config.default_font_size,
            LengthUnit::Em => value * ctx.config.default_font_size,
            LengthUnit::Ex => value * ctx.config.ex_size(ctx.config.default_font_size),
            unit => value * unit.px_factor().unwrap_or(1.0),
        };
        self.clamp();
        true
    }

    fn same(&self, other: &Self) -> bool {
        match (self.specified, other.specified) {
            (FontSizeValue::Length { .. }, FontSizeValue::Length { .. }) => {
                self.computed == other.computed
            }
            (FontSizeValue::Literal(a), FontSizeValue::Literal(b)) => a == b,
            (FontSizeValue::Percent(a), FontSizeValue::Percent(b)) => a == b,
            _ => false,
        }
    }

    fn resolve(&mut self, parent: &Self, ctx: &CascadeContext<'_>) {
        self.compute(parent.computed, ctx.config);
    }

    /// Fold an explicit parent size into this one, re-expressing relative
    /// sizes so the computed size stays the same once the parent is gone.
    fn merge(slot: &mut Prop<Self>, parent: &Prop<Self>, ctx: &CascadeContext<'_>) {
        if !parent.set || parent.inherit {
            return;
        }

        if !slot.set || slot.inherit {
            slot.adopt(parent);
        } else if !slot.value.is_absolute() {
            let child_frac = slot.value.relative_fraction(ctx.config);
            slot.set = true;
            slot.inherit = false;
            slot.value.computed = parent.value.computed * child_frac;

            if parent.value.is_absolute() {
                slot.value.specified = FontSizeValue::Length {
                    unit: LengthUnit::Px,
                    value: slot.value.computed,
                };
            } else {
                let parent_frac = parent.value.relative_fraction(ctx.config);
                slot.value.specified = match slot.value.specified {
                    FontSizeValue::Length { unit, value } => FontSizeValue::Length {
                        unit,
                        value: value * parent_frac,
                    },
                    _ => FontSizeValue::Percent(parent_frac * child_frac),
                };
            }
        }
        slot.value.clamp();
    }
}

// ============================================================================
// Baseline shift
// ============================================================================

enum_property! {
    pub enum BaselineShiftLiteral {
        #[default]
        Baseline => "baseline",
        Sub => "sub",
        Super => "super",
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BaselineShiftValue {
    Literal(BaselineShiftLiteral),
    Length(Length),
    /// Fraction of the parent font size.
    Percent(f64),
}

/// `baseline-shift`. The computed shift is relative to the root baseline,
/// so it includes every ancestor's shift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaselineShift {
    pub specified: BaselineShiftValue,
    pub computed: f64,
}

impl BaselineShift {
    /// This element's own shift in px, relative to its parent's baseline.
    pub fn own_shift(&self, parent_font_size: f64, config: &CascadeConfig) -> f64 {
        match self.specified {
            BaselineShiftValue::Literal(BaselineShiftLiteral::Baseline) => 0.0,
            BaselineShiftValue::Literal(BaselineShiftLiteral::Sub) => {
                config.subscript_shift * parent_font_size
            }
            BaselineShiftValue::Literal(BaselineShiftLiteral::Super) => {
                config.superscript_shift * parent_font_size
            }
            BaselineShiftValue::Percent(value) => value * parent_font_size,
            BaselineShiftValue::Length(length) => match length.unit {
                LengthUnit::Em => length.value * parent_font_size,
                LengthUnit::Ex => length.value * config.ex_size(parent_font_size),
                _ => length.computed,
            },
        }
    }

    pub fn is_zero(&self) -> bool {
        match self.specified {
            BaselineShiftValue::Literal(literal) => literal == BaselineShiftLiteral::Baseline,
            BaselineShiftValue::Length(length) => length.value == 0.0,
            BaselineShiftValue::Percent(value) => value == 0.0,
        }
    }
}

impl Default for BaselineShift {
    fn default() -> Self {
        Self {
            specified: BaselineShiftValue::Literal(BaselineShiftLiteral::Baseline),
            computed: 0.0,
        }
    }
}

impl ToCss for BaselineShift {
    fn to_css(&self, buf: &mut String) {
        match self.specified {
            BaselineShiftValue::Literal(literal) => literal.to_css(buf),
            BaselineShiftValue::Length(length) if length.unit.is_font_relative() => {
                length.to_css(buf);
            }
            BaselineShiftValue::Length(length) => {
                buf.push_str(&format_number(length.computed));
                buf.push_str("px");
            }
            BaselineShiftValue::Percent(value) => {
                buf.push_str(&format_number(value * 100.0));
                buf.push('%');
            }
        }
    }
}

impl PropertyValue for BaselineShift {
    fn parse_into(&mut self, text: &str, ctx: &ReadContext<'_>) -> bool {
        if let Some(literal) = BaselineShiftLiteral::from_css(text) {
            self.specified = BaselineShiftValue::Literal(literal);
            return true;
        }
        let Some(length) = parse_with(text, |input| Length::parse(input, ctx)) else {
            return false;
        };
        self.specified = if length.unit == LengthUnit::Percent {
            BaselineShiftValue::Percent(length.value)
        } else {
            BaselineShiftValue::Length(length)
        };
        self.computed = self.own_shift(ctx.font_size, ctx.config);
        true
    }

    fn same(&self, other: &Self) -> bool {
        match (self.specified, other.specified) {
            (BaselineShiftValue::Length(a), BaselineShiftValue::Length(b)) => {
                a.computed == b.computed
            }
            (BaselineShiftValue::Literal(a), BaselineShiftValue::Literal(b)) => a == b,
            (BaselineShiftValue::Percent(a), BaselineShiftValue::Percent(b)) => a == b,
            _ => false,
        }
    }

    /// Shifts accumulate down the tree whether or not the property is set.
    fn cascade(slot: &mut Prop<Self>, parent: &Prop<Self>, ctx: &CascadeContext<'_>) {
        if !slot.set || slot.inherit {
            slot.value.computed = parent.value.computed;
        } else {
            slot.value.computed =
                slot.value.own_shift(ctx.parent_font_size, ctx.config) + parent.value.computed;
        }
    }

    fn merge(slot: &mut Prop<Self>, parent: &Prop<Self>, _ctx: &CascadeContext<'_>) {
        if slot.takes_parent(parent) {
            slot.adopt(parent);
        }
    }
}

// ============================================================================
// Dash array
// ============================================================================

/// `stroke-dasharray`. An empty array means a solid stroke.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashArray(pub Vec<Length>);

impl DashArray {
    const ZERO_LIMIT: f64 = 1.0e-8;

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Dash and gap lengths in px.
    pub fn pattern(&self) -> Vec<f64> {
        self.0.iter().map(|length| length.computed).collect()
    }
}

impl ToCss for DashArray {
    fn to_css(&self, buf: &mut String) {
        if self.0.is_empty() {
            buf.push_str("none");
            return;
        }
        for (i, length) in self.0.iter().enumerate() {
            if i > 0 {
                buf.push_str(", ");
            }
            length.to_css(buf);
        }
    }
}

impl PropertyValue for DashArray {
    fn parse_into(&mut self, text: &str, ctx: &ReadContext<'_>) -> bool {
        if text == "none" {
            self.0.clear();
            return true;
        }

        let tokens = text
            .split(|c: char| matches!(c, '(' | ')' | ',' | '|') || c.is_ascii_whitespace())
            .filter(|token| !token.is_empty());
        let mut lengths = Vec::new();
        for token in tokens {
            match parse_with(token, |input| Length::parse(input, ctx)) {
                Some(length) => lengths.push(length),
                None => return false,
            }
        }
        if lengths.is_empty() {
            return false;
        }
        if lengths.iter().all(|length| length.computed <= Self::ZERO_LIMIT) {
            lengths.clear();
        }
        self.0 = lengths;
        true
    }

    fn same(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().zip(&other.0).all(|(a, b)| a.same(b))
    }
}
