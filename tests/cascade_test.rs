//! Style API tests.
//!
//! Reading declaration lists, cascading through several generations,
//! serializing, and editing `style` attributes through `CssAttr`.

use proptest::prelude::*;
use svgcascade::style::values::{LengthUnit, Rgb, size_px_to_units, size_units_to_px};
use svgcascade::style::{PaintKind, StyleSource, ToCss, WriteFlags};
use svgcascade::{CssAttr, DeclarationBlock, Error, MarkerLocation, PaintTarget, PropertyId, Style};

// ============================================================================
// Reading
// ============================================================================

#[test]
fn test_round_trip_normalizes_once() {
    let first = Style::from_css("fill:rgb(255, 0, 255)").write(WriteFlags::IF_SET);
    assert_eq!(first, "fill:#ff00ff");
    let second = Style::from_css(&first).write(WriteFlags::IF_SET);
    assert_eq!(first, second);
}

#[test]
fn test_malformed_declarations_are_skipped() {
    let style = Style::from_css("fill:;stroke red;opacity:0.5;;color:nonsense;margin:0");
    assert_eq!(style.write(WriteFlags::IF_SET), "opacity:0.5");
}

#[test]
fn test_bad_value_keeps_prior_value() {
    let mut style = Style::from_css("stroke-width:3");
    style.read_if_unset("stroke-width", "thick", true, StyleSource::StyleProperty);
    assert_eq!(style.get("stroke-width").as_deref(), Some("3"));
}

#[test]
fn test_equality_is_semantic() {
    assert_eq!(Style::from_css("color:red"), Style::from_css("color:#ff0000"));
    assert_eq!(Style::from_css("font-weight:normal"), Style::from_css("font-weight:400"));
    assert_ne!(Style::from_css("text-indent:6px"), Style::from_css("text-indent:3"));
}

#[test]
fn test_presentation_attributes_lose_to_style() {
    let mut style = Style::new();
    style.read(
        Some("fill:red"),
        &[],
        [("fill", "blue"), ("stroke-width", "2"), ("font", "12px serif")],
        None,
    );
    assert_eq!(style.write(WriteFlags::IF_SET), "fill:#ff0000;stroke-width:2");
}

// ============================================================================
// Cascade
// ============================================================================

#[test]
fn test_opacity_does_not_inherit() {
    let parent = Style::from_css("opacity:0.3");
    let mut child = Style::new();
    child.cascade(&parent);
    assert_eq!(child.opacity.value.to_f64(), 1.0);
}

#[test]
fn test_text_indent_inherits() {
    let parent = Style::from_css("text-indent:3");
    let mut child = Style::new();
    child.cascade(&parent);
    assert_eq!(child.text_indent.value.computed, 3.0);
}

#[test]
fn test_relative_weights_across_generations() {
    let root = Style::from_css("font-weight:300");
    let mut middle = Style::from_css("font-weight:bolder");
    middle.cascade(&root);
    let mut leaf = Style::from_css("font-weight:bolder");
    leaf.cascade(&middle);

    assert_eq!(middle.get("font-weight").as_deref(), Some("bolder"));
    assert_eq!(middle, Style::from_css("font-weight:400"));
    assert_eq!(leaf, Style::from_css("font-weight:700"));
}

#[test]
fn test_em_font_size_resolves_against_parent() {
    let parent = Style::from_css("font-size:20px");
    let mut child = Style::from_css("font-size:1.5em;stroke-width:0.5em");
    child.cascade(&parent);
    assert_eq!(child.font_size.value.computed, 30.0);
    assert_eq!(child.stroke_width.value.computed, 15.0);
}

#[test]
fn test_current_color_follows_color() {
    let parent = Style::from_css("color:red;fill:currentColor");
    let mut child = Style::from_css("color:blue");
    child.cascade(&parent);
    assert_eq!(child.fill.value.kind, PaintKind::CurrentColor);
    assert_eq!(child.fill.value.color, Rgb(0, 0, 255));
}

#[test]
fn test_merge_from_parent_keeps_appearance() {
    let group = Style::from_css("fill:red;opacity:0.5");
    let mut child = Style::from_css("stroke:blue;opacity:0.5");
    child.merge_from_parent(&group);
    assert_eq!(child.get("fill").as_deref(), Some("#ff0000"));
    assert_eq!(child.opacity.value.to_f64(), 0.25);
}

#[test]
fn test_diff_against_parent() {
    let parent = Style::from_css("opacity:0.3");
    assert_eq!(Style::from_css("opacity:0.6").write_if_diff(Some(&parent)), "opacity:0.6");

    let parent = Style::from_css("fill:red;stroke-width:2");
    let child = Style::from_css("fill:red;stroke-width:3");
    assert_eq!(child.write_if_diff(Some(&parent)), "stroke-width:3");
}

// ============================================================================
// Markers, paints, features
// ============================================================================

#[test]
fn test_marker_shorthand_and_longhands() {
    let style = Style::from_css("marker:url(#dot);marker-mid:none");
    assert_eq!(style.marker_for(MarkerLocation::Start), Some("url(#dot)"));
    assert_eq!(style.marker_for(MarkerLocation::Mid), None);
    assert_eq!(style.marker_for(MarkerLocation::End), Some("url(#dot)"));
}

#[test]
fn test_context_paint_without_host_is_cleared() {
    let style = Style::from_css("stroke:context-stroke");
    assert_eq!(style.resolved_paint(PaintTarget::Stroke, None).kind, PaintKind::Unset);
}

#[test]
fn test_font_feature_string_defaults() {
    let style = Style::from_css("font-variant-ligatures:none");
    assert_eq!(style.font_feature_string(), "liga 0, clig 0, calt 0");
    let style = Style::from_css("font-variant-position:super;font-variant-east-asian:jis78 ruby");
    assert_eq!(style.font_feature_string(), "sups, jp78, ruby");
}

#[test]
fn test_set_property_unknown() {
    let mut style = Style::new();
    match style.set_property("not-a-property", "1") {
        Err(Error::UnknownProperty(name)) => assert_eq!(name, "not-a-property"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_property_registry() {
    assert_eq!(PropertyId::ALL.len(), 79);
    assert_eq!(PropertyId::from_name("-inkscape-stroke"), Some(PropertyId::StrokeExtensions));
    assert!(PropertyId::Fill.inherits());
    assert!(!PropertyId::Opacity.inherits());
}

// ============================================================================
// Declaration blocks and CssAttr
// ============================================================================

#[test]
fn test_stylesheet_blocks_rank_by_order() {
    let mut style = Style::from_css("stroke:red");
    style.merge_stylesheet(&[
        DeclarationBlock::parse("fill:blue;stroke:blue"),
        DeclarationBlock::parse("fill:green !important"),
    ]);
    assert_eq!(style.write(WriteFlags::IF_SET), "fill:#008000 !important;stroke:#ff0000");
}

#[test]
fn test_css_attr_scale_and_unset() {
    let mut attr = CssAttr::parse(
        "font-size:12px;line-height:1.25;stroke-width:2;stroke:url(#g);fill:red;text-anchor:middle",
    );
    attr.scale(2.0);
    attr.unset_uris().unset_text();
    assert_eq!(attr.to_css_string(), "stroke-width:4;fill:red");
}

#[test]
fn test_css_attr_from_style() {
    let style = Style::from_css("stroke-dasharray:1 2;fill:blue");
    let attr = CssAttr::from_style(&style, WriteFlags::IF_SET);
    assert_eq!(attr.get("stroke-dasharray"), Some("1, 2"));
    assert_eq!(attr.get("fill"), Some("#0000ff"));
}

// ============================================================================
// Unit conversion
// ============================================================================

#[test]
fn test_unit_conversion() {
    assert_eq!(size_units_to_px(72.0, LengthUnit::Pt, 12.0), 96.0);
    assert_eq!(size_px_to_units(96.0, LengthUnit::Pt, 12.0), 72.0);
    assert_eq!(size_units_to_px(2.0, LengthUnit::Em, 10.0), 20.0);
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_opacity_round_trip_is_stable(value in 0.0f64..=1.0) {
        let css = format!("opacity:{value}");
        let once = Style::from_css(&css).write(WriteFlags::IF_SET);
        let twice = Style::from_css(&once).write(WriteFlags::IF_SET);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_stroke_width_round_trip_is_stable(value in 0.0f64..1000.0) {
        let css = format!("stroke-width:{value}px");
        let once = Style::from_css(&css);
        let twice = Style::from_css(&once.write(WriteFlags::IF_SET));
        prop_assert_eq!(once.write(WriteFlags::IF_SET), twice.write(WriteFlags::IF_SET));
    }

    #[test]
    fn prop_colors_write_as_hex(r in 0u8.., g in 0u8.., b in 0u8..) {
        let style = Style::from_css(&format!("fill:rgb({r}, {g}, {b})"));
        prop_assert_eq!(
            style.write(WriteFlags::IF_SET),
            format!("fill:#{r:02x}{g:02x}{b:02x}")
        );
    }

    #[test]
    fn prop_reading_never_panics(css in "[a-z:;!# ()0-9.,-]{0,40}") {
        let style = Style::from_css(&css);
        let _ = style.write(WriteFlags::ALWAYS);
    }
}
