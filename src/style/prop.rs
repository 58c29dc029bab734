//! Property slots.
//!
//! Every property of a [`Style`](super::Style) is a [`Prop`]: a value plus
//! the bookkeeping CSS needs (`set`, `inherit`, `!important`, and which input
//! assigned it). The value kind decides how text is parsed, how the value
//! cascades and how two values compare; those hooks live on
//! [`PropertyValue`].

use bitflags::bitflags;

use super::ToCss;
use super::types::PropertyId;
use super::values::Rgb;
use crate::config::CascadeConfig;

/// Which input last assigned a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StyleSource {
    #[default]
    Unset,
    /// A presentation attribute such as `fill="red"`.
    Attribute,
    /// The element's `style` attribute.
    StyleProperty,
    /// A matched stylesheet rule.
    StyleSheet,
}

bitflags! {
    /// Selects which properties a write emits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WriteFlags: u8 {
        /// Only properties that were explicitly set.
        const IF_SET = 0b0001;
        /// Only properties that differ from a base style.
        const IF_DIFF = 0b0010;
        /// Every property, set or not.
        const ALWAYS = 0b0100;
        /// Only properties assigned by the requested source.
        const IF_SOURCE = 0b1000;
    }
}

impl Default for WriteFlags {
    fn default() -> Self {
        WriteFlags::IF_SET
    }
}

/// What a value parser can see of the style it is reading into.
#[derive(Debug, Clone, Copy)]
pub struct ReadContext<'a> {
    pub id: PropertyId,
    pub source: StyleSource,
    /// Current computed font size, for em/ex lengths.
    pub font_size: f64,
    /// Current value of `color`, for `currentColor`.
    pub color: Rgb,
    pub config: &'a CascadeConfig,
}

/// What a value sees of the styles involved in a cascade or merge.
#[derive(Debug, Clone, Copy)]
pub struct CascadeContext<'a> {
    pub id: PropertyId,
    pub inherits: bool,
    /// This style's computed font size (already cascaded).
    pub font_size: f64,
    pub parent_font_size: f64,
    /// This style's resolved `color` (already cascaded).
    pub color: Rgb,
    pub config: &'a CascadeConfig,
}

/// Behaviour of one kind of property value.
pub trait PropertyValue: Clone + std::fmt::Debug + ToCss {
    /// Parse `text` into this value in place.
    ///
    /// Returns false, leaving the value untouched, when the text is not a
    /// valid value for the property.
    fn parse_into(&mut self, text: &str, ctx: &ReadContext<'_>) -> bool;

    /// Semantic equality used by style comparison.
    fn same(&self, other: &Self) -> bool;

    /// Text written when the slot holds the `inherit` keyword.
    fn inherit_keyword(&self) -> &'static str {
        "inherit"
    }

    fn read(slot: &mut Prop<Self>, text: &str, ctx: &ReadContext<'_>) {
        if text == "inherit" {
            slot.set = true;
            slot.inherit = true;
        } else if slot.value.parse_into(text, ctx) {
            slot.set = true;
            slot.inherit = false;
        } else {
            tracing::debug!(property = ctx.id.name(), value = text, "rejected property value");
        }
    }

    /// Take the parent's value.
    fn inherit_from(&mut self, parent: &Self, _ctx: &CascadeContext<'_>) {
        *self = parent.clone();
    }

    /// Recompute a value that does not inherit (relative units and keywords).
    fn resolve(&mut self, _parent: &Self, _ctx: &CascadeContext<'_>) {}

    fn cascade(slot: &mut Prop<Self>, parent: &Prop<Self>, ctx: &CascadeContext<'_>) {
        if (ctx.inherits && !slot.set) || slot.inherit {
            slot.value.inherit_from(&parent.value, ctx);
        } else {
            slot.value.resolve(&parent.value, ctx);
        }
    }

    /// Fold an explicitly set parent value into this slot, used when the
    /// parent element is removed and the child keeps its appearance.
    fn merge(slot: &mut Prop<Self>, parent: &Prop<Self>, ctx: &CascadeContext<'_>) {
        if ctx.inherits && slot.takes_parent(parent) {
            slot.adopt(parent);
        }
    }
}

/// One property slot.
#[derive(Debug, Clone)]
pub struct Prop<V> {
    pub set: bool,
    pub inherit: bool,
    pub important: bool,
    pub source: StyleSource,
    pub value: V,
}

impl<V: PropertyValue> Prop<V> {
    /// An unset slot holding an initial value.
    pub fn new(value: V) -> Self {
        Self {
            set: false,
            inherit: false,
            important: false,
            source: StyleSource::Unset,
            value,
        }
    }

    /// Read `text` unless the slot already holds a value of equal or higher priority.
    pub fn read_if_unset(&mut self, text: &str, important: bool, ctx: &ReadContext<'_>) {
        if !self.set || (important && !self.important) {
            let (was_set, source) = (self.set, self.source);
            self.set = false;
            self.source = ctx.source;
            V::read(self, text, ctx);
            if self.set {
                self.important |= important;
            } else {
                self.set = was_set;
                self.source = source;
            }
        }
    }

    /// True when the child slot should take an explicit parent value in a merge.
    pub fn takes_parent(&self, parent: &Self) -> bool {
        (!self.set || self.inherit) && parent.set && !parent.inherit
    }

    /// Copy the parent's flags and value.
    pub fn adopt(&mut self, parent: &Self) {
        self.set = parent.set;
        self.inherit = parent.inherit;
        self.value = parent.value.clone();
    }

    #[inline]
    pub fn same(&self, other: &Self) -> bool {
        self.value.same(&other.value)
    }

    /// Whether a write with these flags emits this slot.
    pub fn shall_write(
        &self,
        flags: WriteFlags,
        source: StyleSource,
        base: Option<&Self>,
        inherits: bool,
    ) -> bool {
        if flags.contains(WriteFlags::ALWAYS) {
            return true;
        }
        if !self.set {
            return false;
        }
        if flags.contains(WriteFlags::IF_SOURCE) && source != self.source {
            return false;
        }
        if let Some(base) = base
            && inherits
            && base.same(self)
        {
            return false;
        }
        true
    }

    /// The value as written in a declaration, without the name.
    pub fn value_string(&self) -> String {
        if self.inherit {
            self.value.inherit_keyword().to_string()
        } else {
            self.value.to_css_string()
        }
    }

    /// Append `name:value;` when the flags select this slot and the value is not empty.
    pub fn write(
        &self,
        name: &str,
        buf: &mut String,
        flags: WriteFlags,
        source: StyleSource,
        base: Option<&Self>,
        inherits: bool,
    ) {
        if !self.shall_write(flags, source, base, inherits) {
            return;
        }
        let value = self.value_string();
        if value.is_empty() {
            return;
        }
        buf.push_str(name);
        buf.push(':');
        buf.push_str(&value);
        if self.important {
            buf.push_str(" !important");
        }
        buf.push(';');
    }
}
