//! Keyword, string and OpenType feature property values.

use std::collections::BTreeMap;

use super::{parse_number, parse_with};
use crate::style::ToCss;
use crate::style::prop::{CascadeContext, Prop, PropertyValue, ReadContext, StyleSource};
use crate::style::properties::{EastAsianVariant, KeywordEnum, Ligatures, NumericVariant};
use crate::style::types::PropertyId;
use crate::util::{css_quote, css_unquote, font_family_quote, font_family_unquote, format_number};

// ============================================================================
// Keywords
// ============================================================================

/// A keyword property. `computed` differs from `value` for `font-weight`
/// (`bold` computes to 700) and for the relative keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keyword<T> {
    pub value: T,
    pub computed: T,
}

impl<T: KeywordEnum> Keyword<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            computed: value.absolute(),
        }
    }
}

impl<T: KeywordEnum> Default for Keyword<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: KeywordEnum> ToCss for Keyword<T> {
    fn to_css(&self, buf: &mut String) {
        buf.push_str(self.value.keyword());
    }
}

impl<T: KeywordEnum> PropertyValue for Keyword<T> {
    fn parse_into(&mut self, text: &str, _ctx: &ReadContext<'_>) -> bool {
        let Some(value) = T::parse_keyword(text) else {
            return false;
        };
        self.value = value;
        if value.step().is_none() {
            self.computed = value.absolute();
        }
        true
    }

    fn same(&self, other: &Self) -> bool {
        self.computed == other.computed
    }

    fn inherit_from(&mut self, parent: &Self, _ctx: &CascadeContext<'_>) {
        self.value = parent.computed;
        self.computed = parent.computed;
    }

    fn resolve(&mut self, parent: &Self, _ctx: &CascadeContext<'_>) {
        self.computed = match self.value.step() {
            Some(step) => T::apply_step(step, parent.computed),
            None => self.value.absolute(),
        };
    }

    /// Relative keywords are folded into the parent's value: opposite steps
    /// cancel, other steps are replaced by their computed result.
    fn merge(slot: &mut Prop<Self>, parent: &Prop<Self>, ctx: &CascadeContext<'_>) {
        if !ctx.inherits || !parent.set || parent.inherit {
            return;
        }
        if !slot.set || slot.inherit {
            slot.adopt(parent);
            return;
        }

        let own = slot.value.value;
        if own == parent.value.value {
            return;
        }
        match (own.step(), parent.value.value.step()) {
            (Some(a), Some(b)) if a != b => slot.set = false,
            (Some(_), _) => {
                slot.value.value = slot.value.computed;
                slot.inherit = false;
            }
            _ => {}
        }
    }
}

// ============================================================================
// Strings
// ============================================================================

/// How a string property is quoted when written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quoting {
    /// Written verbatim.
    #[default]
    Plain,
    /// Quoted as one CSS string when needed.
    Css,
    /// A comma separated font family list, each family quoted as needed.
    FontFamily,
}

/// A string property. `None` means the property's default text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StringValue {
    pub value: Option<String>,
    pub default: &'static str,
    pub quoting: Quoting,
}

impl StringValue {
    pub const fn new(default: &'static str, quoting: Quoting) -> Self {
        Self {
            value: None,
            default,
            quoting,
        }
    }

    /// The unquoted text, falling back to the default.
    pub fn as_str(&self) -> &str {
        self.value.as_deref().unwrap_or(self.default)
    }
}

impl ToCss for StringValue {
    fn to_css(&self, buf: &mut String) {
        let text = self.as_str();
        match self.quoting {
            Quoting::Plain => buf.push_str(text),
            Quoting::Css if !text.is_empty() => buf.push_str(&css_quote(text)),
            Quoting::Css => {}
            Quoting::FontFamily => buf.push_str(&font_family_quote(text)),
        }
    }
}

impl PropertyValue for StringValue {
    fn parse_into(&mut self, text: &str, _ctx: &ReadContext<'_>) -> bool {
        if !self.default.is_empty() && text == self.default {
            self.value = None;
            return true;
        }
        self.value = Some(match self.quoting {
            Quoting::Plain => text.to_string(),
            Quoting::Css => css_unquote(text).to_string(),
            Quoting::FontFamily => font_family_unquote(text),
        });
        true
    }

    fn same(&self, other: &Self) -> bool {
        self.value == other.value
    }

    /// Reading always starts from a cleared slot. Path data given as a
    /// presentation attribute is geometry, not style, and is ignored.
    fn read(slot: &mut Prop<Self>, text: &str, ctx: &ReadContext<'_>) {
        slot.set = false;
        slot.inherit = false;
        slot.value.value = None;

        if ctx.source == StyleSource::Attribute && ctx.id == PropertyId::D {
            return;
        }
        if text == "inherit" {
            slot.set = true;
            slot.inherit = true;
        } else {
            slot.set = slot.value.parse_into(text, ctx);
        }
    }
}

// ============================================================================
// font-variation-settings
// ============================================================================

/// Variable font axis values keyed by their four letter tag.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VariationSettings {
    pub axes: BTreeMap<String, f64>,
}

impl VariationSettings {
    fn is_tag(tag: &str) -> bool {
        tag.chars().count() == 4 && tag.chars().all(|c| c.is_alphanumeric() || c == '_')
    }
}

impl ToCss for VariationSettings {
    fn to_css(&self, buf: &mut String) {
        if self.axes.is_empty() {
            buf.push_str("normal");
            return;
        }
        for (i, (tag, value)) in self.axes.iter().enumerate() {
            if i > 0 {
                buf.push_str(", ");
            }
            buf.push('\'');
            buf.push_str(tag);
            buf.push_str("' ");
            buf.push_str(&format_number(*value));
        }
    }
}

impl PropertyValue for VariationSettings {
    fn parse_into(&mut self, text: &str, _ctx: &ReadContext<'_>) -> bool {
        if text == "normal" {
            self.axes.clear();
            return true;
        }

        let parsed = parse_with(text, |input| {
            input.parse_comma_separated(|input| {
                let location = input.current_source_location();
                let tag = input.expect_string_cloned()?;
                if !Self::is_tag(&tag) {
                    return Err(location.new_custom_error(()));
                }
                Ok((tag.to_string(), parse_number(input)?))
            })
        });
        let Some(entries) = parsed else {
            return false;
        };

        let mut axes = BTreeMap::new();
        for (tag, value) in entries {
            axes.entry(tag).or_insert(value);
        }
        self.axes = axes;
        true
    }

    fn same(&self, other: &Self) -> bool {
        self.axes == other.axes
    }
}

// ============================================================================
// font-variant-* flag sets
// ============================================================================

const LIGATURE_TOKENS: [(&str, Ligatures, bool); 8] = [
    ("common-ligatures", Ligatures::COMMON, true),
    ("no-common-ligatures", Ligatures::COMMON, false),
    ("discretionary-ligatures", Ligatures::DISCRETIONARY, true),
    ("no-discretionary-ligatures", Ligatures::DISCRETIONARY, false),
    ("historical-ligatures", Ligatures::HISTORICAL, true),
    ("no-historical-ligatures", Ligatures::HISTORICAL, false),
    ("contextual", Ligatures::CONTEXTUAL, true),
    ("no-contextual", Ligatures::CONTEXTUAL, false),
];

impl ToCss for Ligatures {
    fn to_css(&self, buf: &mut String) {
        if self.is_empty() {
            buf.push_str("none");
            return;
        }
        if *self == Ligatures::NORMAL {
            buf.push_str("normal");
            return;
        }
        let mut tokens = Vec::with_capacity(4);
        if !self.contains(Ligatures::COMMON) {
            tokens.push("no-common-ligatures");
        }
        if self.contains(Ligatures::DISCRETIONARY) {
            tokens.push("discretionary-ligatures");
        }
        if self.contains(Ligatures::HISTORICAL) {
            tokens.push("historical-ligatures");
        }
        if !self.contains(Ligatures::CONTEXTUAL) {
            tokens.push("no-contextual");
        }
        buf.push_str(&tokens.join(" "));
    }
}

impl PropertyValue for Ligatures {
    fn parse_into(&mut self, text: &str, _ctx: &ReadContext<'_>) -> bool {
        match text {
            "normal" => *self = Ligatures::NORMAL,
            "none" => *self = Ligatures::empty(),
            _ => {
                let mut value = Ligatures::NORMAL;
                let mut matched = false;
                for token in text.split_ascii_whitespace() {
                    if let Some((_, flag, on)) = LIGATURE_TOKENS.iter().find(|(t, ..)| *t == token) {
                        value.set(*flag, *on);
                        matched = true;
                    }
                }
                if !matched {
                    return false;
                }
                *self = value;
            }
        }
        true
    }

    fn same(&self, other: &Self) -> bool {
        self == other
    }
}

/// Write the set flags of a token table, or `normal` when none are set.
fn write_flag_tokens<F: bitflags::Flags + Copy>(
    value: F,
    tokens: &[(&'static str, F)],
    buf: &mut String,
) {
    if value.is_empty() {
        buf.push_str("normal");
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

impl ToCss for NumericVariant {
    fn to_css(&self, buf: &mut String) {
        write_flag_tokens(*self, &NumericVariant::TOKENS, buf);
    }
}

impl PropertyValue for NumericVariant {
    fn parse_into(&mut self, text: &str, _ctx: &ReadContext<'_>) -> bool {
        if text == "normal" {
            *self = NumericVariant::empty();
            return true;
        }
        let mut value = NumericVariant::empty();
        let mut matched = false;
        for token in text.split_ascii_whitespace() {
            if let Some((_, flag)) = NumericVariant::TOKENS.iter().find(|(t, _)| *t == token) {
                value.remove(flag.partner());
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

impl ToCss for EastAsianVariant {
    fn to_css(&self, buf: &mut String) {
        write_flag_tokens(*self, &EastAsianVariant::TOKENS, buf);
    }
}

impl PropertyValue for EastAsianVariant {
    fn parse_into(&mut self, text: &str, _ctx: &ReadContext<'_>) -> bool {
        if text == "normal" {
            *self = EastAsianVariant::empty();
            return true;
        }
        let mut value = EastAsianVariant::empty();
        let mut matched = false;
        for token in text.split_ascii_whitespace() {
            if let Some((_, flag)) = EastAsianVariant::TOKENS.iter().find(|(t, _)| *t == token) {
                if EastAsianVariant::VARIANTS.contains(*flag) {
                    value.remove(EastAsianVariant::VARIANTS);
                } else if EastAsianVariant::WIDTHS.contains(*flag) {
                    value.remove(EastAsianVariant::WIDTHS);
                }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_CONFIG;
    use crate::style::properties::{FontStretch, FontWeight, TextAnchor};
    use crate::style::values::Rgb;

    fn ctx(id: PropertyId, source: StyleSource) -> ReadContext<'static> {
        ReadContext {
            id,
            source,
            font_size: 12.0,
            color: Rgb::BLACK,
            config: &DEFAULT_CONFIG,
        }
    }

    fn cascade_ctx(id: PropertyId) -> CascadeContext<'static> {
        CascadeContext {
            id,
            inherits: id.inherits(),
            font_size: 12.0,
            parent_font_size: 12.0,
            color: Rgb::BLACK,
            config: &DEFAULT_CONFIG,
        }
    }

    fn read<V: PropertyValue>(initial: V, id: PropertyId, text: &str) -> Prop<V> {
        let mut slot = Prop::new(initial);
        slot.read_if_unset(text, false, &ctx(id, StyleSource::StyleProperty));
        slot
    }

    #[test]
    fn test_keyword_read_and_compare() {
        let id = PropertyId::FontWeight;
        let normal = read(Keyword::<FontWeight>::default(), id, "normal");
        let four = read(Keyword::<FontWeight>::default(), id, "400");
        assert_eq!(normal.value_string(), "normal");
        assert!(normal.same(&four));

        let junk = read(Keyword::<TextAnchor>::default(), PropertyId::TextAnchor, "junk");
        assert!(!junk.set);
    }

    #[test]
    fn test_keyword_relative_cascade() {
        let id = PropertyId::FontWeight;
        let cases = [
            ("400", "bolder", FontWeight::W700),
            ("700", "bolder", FontWeight::W900),
            ("400", "lighter", FontWeight::W100),
            ("200", "lighter", FontWeight::W100),
        ];
        for (parent, child, expected) in cases {
            let parent = read(Keyword::<FontWeight>::default(), id, parent);
            let mut child = read(Keyword::<FontWeight>::default(), id, child);
            Keyword::cascade(&mut child, &parent, &cascade_ctx(id));
            assert_eq!(child.value.computed, expected);
            assert!(child.value.value.step().is_some());
        }

        let id = PropertyId::FontStretch;
        let parent = read(Keyword::<FontStretch>::default(), id, "condensed");
        let mut child = read(Keyword::<FontStretch>::default(), id, "wider");
        Keyword::cascade(&mut child, &parent, &cascade_ctx(id));
        assert_eq!(child.value.computed, FontStretch::SemiCondensed);
    }

    #[test]
    fn test_keyword_merge_relative() {
        let id = PropertyId::FontWeight;
        let ctx = cascade_ctx(id);

        let parent = read(Keyword::<FontWeight>::default(), id, "lighter");
        let mut child = read(Keyword::<FontWeight>::default(), id, "bolder");
        Keyword::merge(&mut child, &parent, &ctx);
        assert!(!child.set);

        let parent = read(Keyword::<FontWeight>::default(), id, "700");
        let mut child = read(Keyword::<FontWeight>::default(), id, "bolder");
        Keyword::cascade(&mut child, &parent, &ctx);
        Keyword::merge(&mut child, &parent, &ctx);
        assert!(child.set);
        assert_eq!(child.value.value, FontWeight::W900);
        assert_eq!(child.value_string(), "900");
    }

    #[test]
    fn test_font_family_quoting() {
        let id = PropertyId::FontFamily;
        let initial = StringValue::new("sans-serif", Quoting::FontFamily);
        let slot = read(initial.clone(), id, "Georgia, 'Minion Web'");
        assert_eq!(slot.value.as_str(), "Georgia, Minion Web");
        assert_eq!(slot.value_string(), "Georgia, 'Minion Web'");

        let default = read(initial.clone(), id, "sans-serif");
        assert!(default.set);
        assert_eq!(default.value.value, None);
        assert_eq!(default.value_string(), "sans-serif");

        assert!(read(initial.clone(), id, "A B").same(&read(initial.clone(), id, "A B")));
        assert!(!read(initial.clone(), id, "A B").same(&read(initial, id, "A C")));
    }

    #[test]
    fn test_font_specification_quoting() {
        let id = PropertyId::FontSpecification;
        let slot = read(StringValue::new("", Quoting::Css), id, "'Nimbus Roman Bold'");
        assert_eq!(slot.value.as_str(), "Nimbus Roman Bold");
        assert_eq!(slot.value_string(), "'Nimbus Roman Bold'");
    }

    #[test]
    fn test_path_data_attribute_ignored() {
        let mut slot = Prop::new(StringValue::new("", Quoting::Plain));
        slot.read_if_unset("M 0 0 L 1 1", false, &ctx(PropertyId::D, StyleSource::Attribute));
        assert!(!slot.set);
        slot.read_if_unset("path('M 0 0')", false, &ctx(PropertyId::D, StyleSource::StyleProperty));
        assert!(slot.set);
    }

    #[test]
    fn test_variation_settings() {
        let id = PropertyId::FontVariationSettings;
        let read_settings = |text| read(VariationSettings::default(), id, text);
        assert_eq!(read_settings("'wght'  400").value_string(), "'wght' 400");
        assert_eq!(
            read_settings("'wght' 400, 'slnt' 0.5").value_string(),
            "'slnt' 0.5, 'wght' 400"
        );
        assert_eq!(read_settings("\"wght\" 400").value_string(), "'wght' 400");
        assert_eq!(read_settings("'wght' 400, 'wght' 700").value_string(), "'wght' 400");
        assert!(!read_settings("'weight' 400").set);
        assert!(!read_settings("wght 400").set);
        assert_eq!(read_settings("normal").value_string(), "normal");
    }

    #[test]
    fn test_ligatures() {
        let id = PropertyId::FontVariantLigatures;
        let read_lig = |text| read(Ligatures::NORMAL, id, text).value_string();
        assert_eq!(read_lig("none"), "none");
        assert_eq!(read_lig("common-ligatures"), "normal");
        assert_eq!(read_lig("contextual"), "normal");
        assert_eq!(
            read_lig("no-common-ligatures historical-ligatures"),
            "no-common-ligatures historical-ligatures"
        );
        assert_eq!(read_lig("historical-ligatures no-contextual"), "historical-ligatures no-contextual");
        assert!(!read(Ligatures::NORMAL, id, "bogus").set);
    }

    #[test]
    fn test_numeric_partners_clear() {
        let id = PropertyId::FontVariantNumeric;
        let read_num = |text| read(NumericVariant::empty(), id, text).value_string();
        assert_eq!(read_num("tabular-nums slashed-zero"), "tabular-nums slashed-zero");
        assert_eq!(read_num("tabular-nums proportional-nums"), "proportional-nums");
        assert_eq!(read_num("normal"), "normal");
    }

    #[test]
    fn test_east_asian_exclusive_groups() {
        let id = PropertyId::FontVariantEastAsian;
        let read_ea = |text| read(EastAsianVariant::empty(), id, text).value_string();
        assert_eq!(read_ea("jis78 simplified"), "simplified");
        assert_eq!(read_ea("full-width ruby proportional-width"), "proportional-width ruby");
        assert_eq!(read_ea("traditional full-width"), "traditional full-width");
    }
}
