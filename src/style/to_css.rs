//! Serializing a style back to a declaration list.
//!
//! Properties are written in registry order, `name:value` pairs joined by
//! `;` with no trailing separator.

use super::ToCss;
use super::prop::{StyleSource, WriteFlags};
use super::shorthand::write_text_decoration;
use super::types::{PropertyId, Style};

impl Style {
    /// Write the properties selected by `flags`.
    pub fn write(&self, flags: WriteFlags) -> String {
        self.write_with_base(flags, StyleSource::Unset, None)
    }

    /// Write the properties selected by `flags`, leaving out inherited
    /// properties that have the same value in `base`.
    ///
    /// With [`WriteFlags::IF_SOURCE`] only properties read from `source`
    /// are written.
    pub fn write_with_base(&self, flags: WriteFlags, source: StyleSource, base: Option<&Style>) -> String {
        let mut buf = String::new();
        for &id in PropertyId::ALL {
            if id == PropertyId::TextDecoration {
                write_text_decoration(self, &mut buf, flags, source, base);
            } else {
                self.write_slot(id, &mut buf, flags, source, base);
            }
        }
        if buf.ends_with(';') {
            buf.pop();
        }
        buf
    }

    /// Write the set properties that a child of `base` would not already
    /// inherit from it. Without a base every set property is written.
    pub fn write_if_diff(&self, base: Option<&Style>) -> String {
        self.write_with_base(WriteFlags::IF_DIFF, StyleSource::Unset, base)
    }
}

impl ToCss for Style {
    fn to_css(&self, buf: &mut String) {
        buf.push_str(&self.write(WriteFlags::IF_SET));
    }
}
