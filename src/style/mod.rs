//! Style system: property values, the per-element style record and the cascade.
//!
//! This module contains:
//! - Keyword enums and flag sets for every property ([`properties`])
//! - Value kinds and their parsing, comparison and cascade rules ([`values`])
//! - [`Style`], one slot per registered property, and [`PropertyId`]
//! - Declaration list parsing and the `style` attribute editor ([`CssAttr`])
//! - The cascade itself and serialization back to CSS
//! - [`StylePool`] for sharing identical resolved styles

mod cascade;
mod declaration;
pub mod prop;
pub mod properties;
mod shorthand;
mod style_pool;
mod to_css;
mod types;
pub mod values;

#[cfg(test)]
mod tests;

pub trait ToCss {
    /// Write this value as CSS to the buffer.
    fn to_css(&self, buf: &mut String);

    /// Convert to a CSS string (convenience method).
    fn to_css_string(&self) -> String {
        let mut buf = String::new();
        self.to_css(&mut buf);
        buf
    }
}

pub use cascade::{MarkerLocation, PaintTarget};
pub use declaration::{CssAttr, Declaration, DeclarationBlock};
pub use prop::{Prop, PropertyValue, StyleSource, WriteFlags};
pub use style_pool::{StyleId, StylePool};
pub use types::{INITIAL, PropertyId, Style};
pub use values::{
    ColorValue, Length, LengthUnit, Paint, PaintKind, PaintServer, PaintServerKind, Rgb,
    TextDecorationData,
};
