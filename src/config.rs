//! Cascade configuration.
//!
//! The constants that drive relative value resolution (the default font
//! size, the ex/em ratio, sub/superscript shifts and the keyword step for
//! `smaller`/`larger`) live here so callers can tune them. All fields have
//! defaults, so a partial JSON object is a valid configuration.

use serde::Deserialize;

/// Tunable constants used while reading and cascading styles.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CascadeConfig {
    /// Font size in px used when nothing else is known.
    pub default_font_size: f64,
    /// Size of one `ex` as a fraction of the font size.
    pub ex_ratio: f64,
    /// Multiplier for `line-height: normal`.
    pub line_height_normal: f64,
    /// Baseline shift for `sub`, as a fraction of the parent font size.
    pub subscript_shift: f64,
    /// Baseline shift for `super`, as a fraction of the parent font size.
    pub superscript_shift: f64,
    /// Ratio applied by `font-size: larger` (and inverted for `smaller`).
    pub font_size_step: f64,
}

impl CascadeConfig {
    /// Font size of `ex` for the given font size.
    #[inline]
    pub fn ex_size(&self, font_size: f64) -> f64 {
        font_size * self.ex_ratio
    }
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            default_font_size: 12.0,
            ex_ratio: 0.5,
            line_height_normal: 1.25,
            subscript_shift: -0.2,
            superscript_shift: 0.4,
            font_size_step: 1.2,
        }
    }
}

/// Configuration used by [`crate::style::Style::cascade`].
pub static DEFAULT_CONFIG: CascadeConfig = CascadeConfig {
    default_font_size: 12.0,
    ex_ratio: 0.5,
    line_height_normal: 1.25,
    subscript_shift: -0.2,
    superscript_shift: 0.4,
    font_size_step: 1.2,
};
