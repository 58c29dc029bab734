//! Keyword and flag types used by style properties, and the `enum_property!` macro.

use bitflags::bitflags;

use super::ToCss;

/// Macro for defining CSS keyword enums with automatic ToCss implementation.
///
/// Each variant maps to one canonical keyword, optionally followed by
/// aliases that parse to the same variant. Writing always produces the
/// canonical keyword.
///
/// # Example
///
/// ```ignore
/// enum_property! {
///     /// Writing mode.
///     pub enum WritingMode {
///         #[default]
///         LrTb => "lr-tb" | "lr" | "horizontal-tb",
///         TbRl => "tb-rl" | "tb" | "vertical-rl",
///     }
/// }
/// ```
macro_rules! enum_property {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $css:literal $(| $alias:literal)*
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $name {
            /// Returns the CSS keyword for this value.
            #[inline]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $css,)*
                }
            }

            /// Parse a CSS keyword into this enum.
            #[inline]
            pub fn from_css(s: &str) -> Option<Self> {
                match s {
                    $($css $(| $alias)* => Some($name::$variant),)*
                    _ => None,
                }
            }
        }

        impl ToCss for $name {
            fn to_css(&self, buf: &mut String) {
                buf.push_str(self.as_str());
            }
        }
    };
}

pub(crate) use enum_property;

// ============================================================================
// Keyword trait
// ============================================================================

/// Direction of a relative keyword such as `bolder` or `narrower`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Up,
    Down,
}

/// A keyword property value.
///
/// Most keywords are absolute. `font-weight` and `font-stretch` also have
/// relative keywords that only get a computed value during the cascade.
pub trait KeywordEnum: Copy + Eq + Default + std::fmt::Debug + 'static {
    fn parse_keyword(s: &str) -> Option<Self>;

    fn keyword(self) -> &'static str;

    /// The step a relative keyword takes, `None` for absolute keywords.
    fn step(self) -> Option<Step> {
        None
    }

    /// Computed form of an absolute keyword.
    fn absolute(self) -> Self {
        self
    }

    /// Apply a relative step to the parent's computed value.
    fn apply_step(_step: Step, parent: Self) -> Self {
        parent
    }
}

/// Implement [`KeywordEnum`] for plain keyword enums.
macro_rules! keyword_enum {
    ($($name:ident),* $(,)?) => {
        $(
            impl KeywordEnum for $name {
                #[inline]
                fn parse_keyword(s: &str) -> Option<Self> {
                    Self::from_css(s)
                }

                #[inline]
                fn keyword(self) -> &'static str {
                    self.as_str()
                }
            }
        )*
    };
}

// ============================================================================
// Font keywords
// ============================================================================

enum_property! {
    /// Font style (normal, italic, oblique).
    pub enum FontStyle {
        #[default]
        Normal => "normal",
        Italic => "italic",
        Oblique => "oblique",
    }
}

enum_property! {
    /// CSS 2 font-variant.
    pub enum FontVariant {
        #[default]
        Normal => "normal",
        SmallCaps => "small-caps",
    }
}

enum_property! {
    /// Font weight, including the relative `lighter`/`bolder` keywords.
    pub enum FontWeight {
        W100 => "100",
        W200 => "200",
        W300 => "300",
        W400 => "400",
        W500 => "500",
        W600 => "600",
        W700 => "700",
        W800 => "800",
        W900 => "900",
        #[default]
        Normal => "normal",
        Bold => "bold",
        Lighter => "lighter",
        Bolder => "bolder",
    }
}

impl FontWeight {
    /// Numeric weight of an absolute keyword.
    pub fn number(self) -> u16 {
        match self.absolute() {
            FontWeight::W100 => 100,
            FontWeight::W200 => 200,
            FontWeight::W300 => 300,
            FontWeight::W500 => 500,
            FontWeight::W600 => 600,
            FontWeight::W700 => 700,
            FontWeight::W800 => 800,
            FontWeight::W900 => 900,
            _ => 400,
        }
    }
}

impl KeywordEnum for FontWeight {
    fn parse_keyword(s: &str) -> Option<Self> {
        Self::from_css(s)
    }

    fn keyword(self) -> &'static str {
        self.as_str()
    }

    fn step(self) -> Option<Step> {
        match self {
            FontWeight::Bolder => Some(Step::Up),
            FontWeight::Lighter => Some(Step::Down),
            _ => None,
        }
    }

    fn absolute(self) -> Self {
        match self {
            FontWeight::Normal => FontWeight::W400,
            FontWeight::Bold => FontWeight::W700,
            other => other,
        }
    }

    fn apply_step(step: Step, parent: Self) -> Self {
        use FontWeight::*;
        match (step, parent.absolute()) {
            (Step::Up, W100 | W200 | W300) => W400,
            (Step::Up, W400 | W500) => W700,
            (Step::Up, _) => W900,
            (Step::Down, W900 | W800) => W700,
            (Step::Down, W700 | W600) => W400,
            (Step::Down, _) => W100,
        }
    }
}

enum_property! {
    /// Font stretch, including the relative `narrower`/`wider` keywords.
    pub enum FontStretch {
        UltraCondensed => "ultra-condensed",
        ExtraCondensed => "extra-condensed",
        Condensed => "condensed",
        SemiCondensed => "semi-condensed",
        #[default]
        Normal => "normal",
        SemiExpanded => "semi-expanded",
        Expanded => "expanded",
        ExtraExpanded => "extra-expanded",
        UltraExpanded => "ultra-expanded",
        Narrower => "narrower",
        Wider => "wider",
    }
}

impl FontStretch {
    const SCALE: [FontStretch; 9] = [
        FontStretch::UltraCondensed,
        FontStretch::ExtraCondensed,
        FontStretch::Condensed,
        FontStretch::SemiCondensed,
        FontStretch::Normal,
        FontStretch::SemiExpanded,
        FontStretch::Expanded,
        FontStretch::ExtraExpanded,
        FontStretch::UltraExpanded,
    ];
}

impl KeywordEnum for FontStretch {
    fn parse_keyword(s: &str) -> Option<Self> {
        Self::from_css(s)
    }

    fn keyword(self) -> &'static str {
        self.as_str()
    }

    fn step(self) -> Option<Step> {
        match self {
            FontStretch::Wider => Some(Step::Up),
            FontStretch::Narrower => Some(Step::Down),
            _ => None,
        }
    }

    fn apply_step(step: Step, parent: Self) -> Self {
        let index = Self::SCALE.iter().position(|s| *s == parent).unwrap_or(4);
        let index = match step {
            Step::Up => (index + 1).min(Self::SCALE.len() - 1),
            Step::Down => index.saturating_sub(1),
        };
        Self::SCALE[index]
    }
}

enum_property! {
    pub enum FontVariantPosition {
        #[default]
        Normal => "normal",
        Sub => "sub",
        Super => "super",
    }
}

enum_property! {
    pub enum FontVariantCaps {
        #[default]
        Normal => "normal",
        SmallCaps => "small-caps",
        AllSmallCaps => "all-small-caps",
        PetiteCaps => "petite-caps",
        AllPetiteCaps => "all-petite-caps",
        Unicase => "unicase",
        TitlingCaps => "titling-caps",
    }
}

enum_property! {
    pub enum FontVariantAlternates {
        #[default]
        Normal => "normal",
        HistoricalForms => "historical-forms",
        Stylistic => "stylistic",
        Styleset => "styleset",
        CharacterVariant => "character-variant",
        Swash => "swash",
        Ornaments => "ornaments",
        Annotation => "annotation",
    }
}

// ============================================================================
// Text keywords
// ============================================================================

enum_property! {
    /// Text alignment.
    pub enum TextAlign {
        #[default]
        Start => "start",
        End => "end",
        Left => "left",
        Right => "right",
        Center => "center",
        Justify => "justify",
    }
}

enum_property! {
    pub enum TextTransform {
        Capitalize => "capitalize",
        Uppercase => "uppercase",
        Lowercase => "lowercase",
        #[default]
        None => "none",
    }
}

enum_property! {
    /// Writing mode. SVG 1.1 and CSS 3 keywords map onto the same modes.
    pub enum WritingMode {
        #[default]
        LrTb => "lr-tb" | "lr" | "horizontal-tb",
        RlTb => "rl-tb" | "rl",
        TbRl => "tb-rl" | "tb" | "vertical-rl",
        TbLr => "tb-lr" | "vertical-lr",
    }
}

enum_property! {
    pub enum Direction {
        #[default]
        Ltr => "ltr",
        Rtl => "rtl",
    }
}

enum_property! {
    pub enum TextOrientation {
        #[default]
        Mixed => "mixed",
        Upright => "upright",
        Sideways => "sideways" | "sideways-right",
    }
}

enum_property! {
    pub enum DominantBaseline {
        #[default]
        Auto => "auto",
        Alphabetic => "alphabetic",
        Ideographic => "ideographic",
        Hanging => "hanging",
        Mathematical => "mathematical",
        Central => "central",
        Middle => "middle",
        TextAfterEdge => "text-after-edge",
        TextBeforeEdge => "text-before-edge",
    }
}

enum_property! {
    /// SVG text anchor.
    pub enum TextAnchor {
        #[default]
        Start => "start",
        Middle => "middle",
        End => "end",
    }
}

enum_property! {
    pub enum WhiteSpace {
        #[default]
        Normal => "normal",
        Pre => "pre",
        Nowrap => "nowrap",
        PreWrap => "pre-wrap",
        PreLine => "pre-line",
    }
}

enum_property! {
    /// Decoration line style (text-decoration-style).
    pub enum DecorationStyle {
        #[default]
        Solid => "solid",
        Double => "double",
        Dotted => "dotted",
        Dashed => "dashed",
        Wavy => "wavy",
    }
}

// ============================================================================
// Box, compositing and rendering keywords
// ============================================================================

enum_property! {
    /// Fill and clip rule.
    pub enum FillRule {
        #[default]
        Nonzero => "nonzero",
        Evenodd => "evenodd",
    }
}

enum_property! {
    pub enum Display {
        #[default]
        Inline => "inline",
        Block => "block",
        ListItem => "list-item",
        RunIn => "run-in",
        Compact => "compact",
        Marker => "marker",
        Table => "table",
        InlineTable => "inline-table",
        TableRowGroup => "table-row-group",
        TableHeaderGroup => "table-header-group",
        TableFooterGroup => "table-footer-group",
        TableRow => "table-row",
        TableColumnGroup => "table-column-group",
        TableColumn => "table-column",
        TableCell => "table-cell",
        TableCaption => "table-caption",
        None => "none",
        InlineBlock => "inline-block",
        Flex => "flex",
        InlineFlex => "inline-flex",
        Grid => "grid",
        InlineGrid => "inline-grid",
    }
}

enum_property! {
    pub enum Overflow {
        #[default]
        Visible => "visible",
        Hidden => "hidden",
        Scroll => "scroll",
        Auto => "auto",
    }
}

enum_property! {
    pub enum Visibility {
        #[default]
        Visible => "visible",
        Hidden => "hidden",
        Collapse => "collapse",
    }
}

enum_property! {
    pub enum Isolation {
        #[default]
        Auto => "auto",
        Isolate => "isolate",
    }
}

enum_property! {
    pub enum BlendMode {
        #[default]
        Normal => "normal",
        Multiply => "multiply",
        Screen => "screen",
        Darken => "darken",
        Lighten => "lighten",
        Overlay => "overlay",
        ColorDodge => "color-dodge",
        ColorBurn => "color-burn",
        HardLight => "hard-light",
        SoftLight => "soft-light",
        Difference => "difference",
        Exclusion => "exclusion",
        Hue => "hue",
        Saturation => "saturation",
        Color => "color",
        Luminosity => "luminosity",
    }
}

enum_property! {
    pub enum ColorInterpolation {
        Auto => "auto",
        #[default]
        SRgb => "sRGB",
        LinearRgb => "linearRGB",
    }
}

enum_property! {
    pub enum ColorRendering {
        #[default]
        Auto => "auto",
        OptimizeSpeed => "optimizeSpeed",
        OptimizeQuality => "optimizeQuality",
    }
}

enum_property! {
    pub enum ImageRendering {
        #[default]
        Auto => "auto",
        OptimizeSpeed => "optimizeSpeed",
        OptimizeQuality => "optimizeQuality",
        CrispEdges => "crisp-edges",
        Pixelated => "pixelated",
    }
}

enum_property! {
    pub enum ShapeRendering {
        #[default]
        Auto => "auto",
        OptimizeSpeed => "optimizeSpeed",
        CrispEdges => "crispEdges",
        GeometricPrecision => "geometricPrecision",
    }
}

enum_property! {
    pub enum TextRendering {
        #[default]
        Auto => "auto",
        OptimizeSpeed => "optimizeSpeed",
        OptimizeLegibility => "optimizeLegibility",
        GeometricPrecision => "geometricPrecision",
    }
}

enum_property! {
    pub enum EnableBackground {
        #[default]
        Accumulate => "accumulate",
        New => "new",
    }
}

enum_property! {
    pub enum StrokeLinecap {
        #[default]
        Butt => "butt",
        Round => "round",
        Square => "square",
    }
}

enum_property! {
    pub enum StrokeLinejoin {
        #[default]
        Miter => "miter",
        Round => "round",
        Bevel => "bevel",
    }
}

enum_property! {
    /// One layer of `paint-order`.
    pub enum PaintLayer {
        #[default]
        Normal => "normal",
        Fill => "fill",
        Stroke => "stroke",
        Markers => "markers",
    }
}

keyword_enum!(
    FontStyle,
    FontVariant,
    FontVariantPosition,
    FontVariantCaps,
    FontVariantAlternates,
    TextAlign,
    TextTransform,
    WritingMode,
    Direction,
    TextOrientation,
    DominantBaseline,
    TextAnchor,
    WhiteSpace,
    FillRule,
    Display,
    Overflow,
    Visibility,
    Isolation,
    BlendMode,
    ColorInterpolation,
    ColorRendering,
    ImageRendering,
    ShapeRendering,
    TextRendering,
    EnableBackground,
    StrokeLinecap,
    StrokeLinejoin,
);

// ============================================================================
// Flag sets
// ============================================================================

bitflags! {
    /// font-variant-ligatures.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Ligatures: u8 {
        const COMMON = 0b0001;
        const DISCRETIONARY = 0b0010;
        const HISTORICAL = 0b0100;
        const CONTEXTUAL = 0b1000;
    }
}

impl Ligatures {
    /// The `normal` value.
    pub const NORMAL: Ligatures = Ligatures::COMMON.union(Ligatures::CONTEXTUAL);
}

impl Default for Ligatures {
    fn default() -> Self {
        Ligatures::NORMAL
    }
}

bitflags! {
    /// font-variant-numeric.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NumericVariant: u8 {
        const LINING_NUMS = 0b0000_0001;
        const OLDSTYLE_NUMS = 0b0000_0010;
        const PROPORTIONAL_NUMS = 0b0000_0100;
        const TABULAR_NUMS = 0b0000_1000;
        const DIAGONAL_FRACTIONS = 0b0001_0000;
        const STACKED_FRACTIONS = 0b0010_0000;
        const ORDINAL = 0b0100_0000;
        const SLASHED_ZERO = 0b1000_0000;
    }
}

impl NumericVariant {
    /// Tokens in canonical write order.
    pub const TOKENS: [(&'static str, NumericVariant); 8] = [
        ("lining-nums", NumericVariant::LINING_NUMS),
        ("oldstyle-nums", NumericVariant::OLDSTYLE_NUMS),
        ("proportional-nums", NumericVariant::PROPORTIONAL_NUMS),
        ("tabular-nums", NumericVariant::TABULAR_NUMS),
        ("diagonal-fractions", NumericVariant::DIAGONAL_FRACTIONS),
        ("stacked-fractions", NumericVariant::STACKED_FRACTIONS),
        ("ordinal", NumericVariant::ORDINAL),
        ("slashed-zero", NumericVariant::SLASHED_ZERO),
    ];

    /// The flag a token excludes when it is turned on.
    pub fn partner(self) -> NumericVariant {
        match self {
            NumericVariant::LINING_NUMS => NumericVariant::OLDSTYLE_NUMS,
            NumericVariant::OLDSTYLE_NUMS => NumericVariant::LINING_NUMS,
            NumericVariant::PROPORTIONAL_NUMS => NumericVariant::TABULAR_NUMS,
            NumericVariant::TABULAR_NUMS => NumericVariant::PROPORTIONAL_NUMS,
            NumericVariant::DIAGONAL_FRACTIONS => NumericVariant::STACKED_FRACTIONS,
            NumericVariant::STACKED_FRACTIONS => NumericVariant::DIAGONAL_FRACTIONS,
            _ => NumericVariant::empty(),
        }
    }
}

bitflags! {
    /// font-variant-east-asian.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EastAsianVariant: u16 {
        const JIS78 = 0b0_0000_0001;
        const JIS83 = 0b0_0000_0010;
        const JIS90 = 0b0_0000_0100;
        const JIS04 = 0b0_0000_1000;
        const SIMPLIFIED = 0b0_0001_0000;
        const TRADITIONAL = 0b0_0010_0000;
        const FULL_WIDTH = 0b0_0100_0000;
        const PROPORTIONAL_WIDTH = 0b0_1000_0000;
        const RUBY = 0b1_0000_0000;
    }
}

impl EastAsianVariant {
    /// Glyph variants; at most one may be on.
    pub const VARIANTS: EastAsianVariant = EastAsianVariant::JIS78
        .union(EastAsianVariant::JIS83)
        .union(EastAsianVariant::JIS90)
        .union(EastAsianVariant::JIS04)
        .union(EastAsianVariant::SIMPLIFIED)
        .union(EastAsianVariant::TRADITIONAL);

    /// Glyph widths; at most one may be on.
    pub const WIDTHS: EastAsianVariant =
        EastAsianVariant::FULL_WIDTH.union(EastAsianVariant::PROPORTIONAL_WIDTH);

    /// Tokens in canonical write order.
    pub const TOKENS: [(&'static str, EastAsianVariant); 9] = [
        ("jis78", EastAsianVariant::JIS78),
        ("jis83", EastAsianVariant::JIS83),
        ("jis90", EastAsianVariant::JIS90),
        ("jis04", EastAsianVariant::JIS04),
        ("simplified", EastAsianVariant::SIMPLIFIED),
        ("traditional", EastAsianVariant::TRADITIONAL),
        ("full-width", EastAsianVariant::FULL_WIDTH),
        ("proportional-width", EastAsianVariant::PROPORTIONAL_WIDTH),
        ("ruby", EastAsianVariant::RUBY),
    ];
}

bitflags! {
    /// text-decoration-line.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DecorationLine: u8 {
        const UNDERLINE = 0b0001;
        const OVERLINE = 0b0010;
        const LINE_THROUGH = 0b0100;
        const BLINK = 0b1000;
    }
}

impl DecorationLine {
    /// Tokens in canonical write order.
    pub const TOKENS: [(&'static str, DecorationLine); 4] = [
        ("underline", DecorationLine::UNDERLINE),
        ("overline", DecorationLine::OVERLINE),
        ("line-through", DecorationLine::LINE_THROUGH),
        ("blink", DecorationLine::BLINK),
    ];

    #[inline]
    pub fn is_underline(&self) -> bool {
        self.contains(DecorationLine::UNDERLINE)
    }

    #[inline]
    pub fn is_overline(&self) -> bool {
        self.contains(DecorationLine::OVERLINE)
    }

    #[inline]
    pub fn is_line_through(&self) -> bool {
        self.contains(DecorationLine::LINE_THROUGH)
    }
}

bitflags! {
    /// vector-effect.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct VectorEffect: u8 {
        const NON_SCALING_STROKE = 0b0001;
        const NON_SCALING_SIZE = 0b0010;
        const NON_ROTATION = 0b0100;
        const FIXED_POSITION = 0b1000;
    }
}

impl VectorEffect {
    /// Tokens in canonical write order.
    pub const TOKENS: [(&'static str, VectorEffect); 4] = [
        ("non-scaling-stroke", VectorEffect::NON_SCALING_STROKE),
        ("non-scaling-size", VectorEffect::NON_SCALING_SIZE),
        ("non-rotation", VectorEffect::NON_ROTATION),
        ("fixed-position", VectorEffect::FIXED_POSITION),
    ];
}
