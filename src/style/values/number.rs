//! Plain numbers and 24-bit fixed point fractions.

use super::{parse_number, parse_with};
use crate::style::ToCss;
use crate::style::prop::{CascadeContext, Prop, PropertyValue, ReadContext};
use crate::util::format_number;

/// A plain number such as `stroke-miterlimit`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Float(pub f64);

impl ToCss for Float {
    fn to_css(&self, buf: &mut String) {
        buf.push_str(&format_number(self.0));
    }
}

impl PropertyValue for Float {
    fn parse_into(&mut self, text: &str, _ctx: &ReadContext<'_>) -> bool {
        match parse_with(text, parse_number) {
            Some(value) => {
                self.0 = value;
                true
            }
            None => false,
        }
    }

    fn same(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

/// A fraction in `[0, 1]` stored with 24 bits of precision.
///
/// Used for the opacities. Storing an integer keeps repeated
/// read/write cycles and multiplications exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scale24(u32);

impl Scale24 {
    pub const MAX: u32 = 0xff_0000;

    /// Fully opaque.
    pub const ONE: Scale24 = Scale24(Self::MAX);

    pub const ZERO: Scale24 = Scale24(0);

    /// Convert a float, clamping it to `[0, 1]`.
    pub fn from_f64(value: f64) -> Self {
        let value = value.clamp(0.0, 1.0);
        Scale24((value * f64::from(Self::MAX) + 0.5) as u32)
    }

    #[inline]
    pub fn to_f64(self) -> f64 {
        f64::from(self.0) / f64::from(Self::MAX)
    }

    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn is_one(self) -> bool {
        self.0 == Self::MAX
    }

    /// Product of two fractions.
    pub fn mul(self, other: Scale24) -> Scale24 {
        let product = f64::from(self.0) * f64::from(other.0) / f64::from(Self::MAX);
        Scale24((product + 0.5) as u32)
    }
}

impl Default for Scale24 {
    fn default() -> Self {
        Scale24::ONE
    }
}

impl ToCss for Scale24 {
    fn to_css(&self, buf: &mut String) {
        buf.push_str(&format_number(self.to_f64()));
    }
}

impl PropertyValue for Scale24 {
    fn parse_into(&mut self, text: &str, _ctx: &ReadContext<'_>) -> bool {
        match parse_with(text, parse_number) {
            Some(value) => {
                *self = Scale24::from_f64(value);
                true
            }
            None => false,
        }
    }

    fn same(&self, other: &Self) -> bool {
        self == other
    }

    /// Opacities that do not inherit multiply into the child so the
    /// composited result stays the same.
    fn merge(slot: &mut Prop<Self>, parent: &Prop<Self>, ctx: &CascadeContext<'_>) {
        if ctx.inherits {
            if slot.takes_parent(parent) {
                slot.adopt(parent);
            }
            return;
        }

        if !slot.set || (!slot.inherit && slot.value.is_one()) {
            slot.value = parent.value;
            slot.set = !slot.value.is_one();
        } else {
            if slot.inherit {
                slot.value = parent.value;
            }
            slot.value = slot.value.mul(parent.value);
            slot.inherit = slot.inherit
                && parent.inherit
                && (parent.value == Scale24::ZERO || parent.value.is_one());
            slot.set = slot.inherit || !slot.value.is_one();
        }
    }
}
