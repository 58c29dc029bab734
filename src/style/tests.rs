//! Behaviour tables for reading, comparing and cascading whole styles.

use super::prop::WriteFlags;
use super::types::Style;

/// `(input, expected output)`; an empty expectation means the input is
/// already canonical.
const READ: &[(&str, &str)] = &[
    // Paint
    ("fill:none", ""),
    ("fill:currentColor", ""),
    ("fill:#ff00ff", ""),
    ("fill:rgb(100%, 0%, 100%)", "fill:#ff00ff"),
    ("fill:rgb(255, 0, 255)", "fill:#ff00ff"),
    ("fill:#ff00ff icc-color(colorChange, 0.1, 0.5, 0.1)", ""),
    ("fill:inherit", ""),
    // Keywords
    ("visibility:hidden", ""),
    ("visibility:collapse", ""),
    ("visibility:visible", ""),
    ("display:none", ""),
    ("overflow:visible", ""),
    ("overflow:auto", ""),
    ("color:#ff0000", ""),
    ("color:blue", "color:#0000ff"),
    // font shorthand
    (
        "font:bold 12px Arial",
        "font-style:normal;font-variant:normal;font-weight:bold;font-stretch:normal;\
         font-size:12px;line-height:normal;font-family:Arial",
    ),
    (
        "font:bold 12px/24px 'Times New Roman'",
        "font-style:normal;font-variant:normal;font-weight:bold;font-stretch:normal;\
         font-size:12px;line-height:24px;font-family:'Times New Roman'",
    ),
    (
        "font: 12pt/15pt sans-serif",
        "font-style:normal;font-variant:normal;font-weight:normal;font-stretch:normal;\
         font-size:16px;line-height:15pt;font-family:sans-serif",
    ),
    (
        "font: bold italic large Palatino, serif",
        "font-style:italic;font-variant:normal;font-weight:bold;font-stretch:normal;\
         font-size:large;line-height:normal;font-family:Palatino, serif",
    ),
    (
        "font: condensed oblique 12pt 'Helvetica Neue', serif;",
        "font-style:oblique;font-variant:normal;font-weight:normal;font-stretch:condensed;\
         font-size:16px;line-height:normal;font-family:'Helvetica Neue', serif",
    ),
    // Font longhands
    ("font-family:sans-serif", ""),
    ("font-family:Arial", ""),
    ("font-family:Georgia, 'Minion Web'", "font-family:Georgia, 'Minion Web'"),
    ("font-size:12", "font-size:12px"),
    ("font-size:12px", ""),
    ("font-size:12pt", "font-size:16px"),
    ("font-size:medium", ""),
    ("font-size:smaller", ""),
    ("font-style:italic", ""),
    ("font-variant:small-caps", ""),
    ("font-weight:100", ""),
    ("font-weight:normal", ""),
    ("font-weight:bolder", ""),
    ("font-stretch:condensed", ""),
    // OpenType feature groups
    ("font-variant-ligatures:none", ""),
    ("font-variant-ligatures:normal", ""),
    ("font-variant-ligatures:no-common-ligatures", ""),
    ("font-variant-ligatures:discretionary-ligatures", ""),
    ("font-variant-ligatures:historical-ligatures", ""),
    ("font-variant-ligatures:no-contextual", ""),
    ("font-variant-ligatures:common-ligatures", "font-variant-ligatures:normal"),
    ("font-variant-ligatures:contextual", "font-variant-ligatures:normal"),
    ("font-variant-ligatures:no-common-ligatures historical-ligatures", ""),
    ("font-variant-ligatures:historical-ligatures no-contextual", ""),
    ("font-variant-position:normal", ""),
    ("font-variant-position:sub", ""),
    ("font-variant-position:super", ""),
    ("font-variant-caps:normal", ""),
    ("font-variant-caps:small-caps", ""),
    ("font-variant-caps:all-small-caps", ""),
    ("font-variant-numeric:normal", ""),
    ("font-variant-numeric:lining-nums", ""),
    ("font-variant-numeric:oldstyle-nums", ""),
    ("font-variant-numeric:proportional-nums", ""),
    ("font-variant-numeric:tabular-nums", ""),
    ("font-variant-numeric:diagonal-fractions", ""),
    ("font-variant-numeric:stacked-fractions", ""),
    ("font-variant-numeric:ordinal", ""),
    ("font-variant-numeric:slashed-zero", ""),
    ("font-variant-numeric:tabular-nums slashed-zero", ""),
    (
        "font-variant-numeric:tabular-nums proportional-nums",
        "font-variant-numeric:proportional-nums",
    ),
    ("font-variation-settings:'wght' 400", ""),
    ("font-variation-settings:'wght'  400", "font-variation-settings:'wght' 400"),
    (
        "font-variation-settings:'wght' 400, 'slnt' 0.5",
        "font-variation-settings:'slnt' 0.5, 'wght' 400",
    ),
    ("font-variation-settings:\"wght\" 400", "font-variation-settings:'wght' 400"),
    // Text
    ("text-indent:12em", ""),
    ("text-align:center", ""),
    (
        "text-decoration: underline wavy #0000ff",
        "text-decoration:underline;text-decoration-line:underline;\
         text-decoration-style:wavy;text-decoration-color:#0000ff",
    ),
    (
        "text-decoration: double overline underline #ff0000",
        "text-decoration:underline overline;text-decoration-line:underline overline;\
         text-decoration-style:double;text-decoration-color:#ff0000",
    ),
    ("text-decoration-line:underline", ""),
    (
        "text-decoration-line:overline;text-decoration:underline",
        "text-decoration:underline;text-decoration-line:underline",
    ),
    (
        "text-decoration:underline;text-decoration-line:overline",
        "text-decoration:overline;text-decoration-line:overline",
    ),
    ("text-decoration-style:solid", ""),
    ("text-decoration-style:dotted", ""),
    ("text-decoration-color:#ff00ff", ""),
    ("line-height:24px", ""),
    ("line-height:1.5", ""),
    ("letter-spacing:2px", ""),
    ("word-spacing:2px", ""),
    ("word-spacing:normal", ""),
    ("text-transform:lowercase", ""),
    ("baseline-shift:baseline", ""),
    ("baseline-shift:sub", ""),
    ("baseline-shift:12.5%", ""),
    ("baseline-shift:2px", ""),
    // Painting
    ("opacity:0.1", ""),
    ("stroke-width:2px", ""),
    ("stroke-linecap:round", ""),
    ("stroke-linejoin:round", ""),
    ("stroke-miterlimit:4", ""),
    ("marker:url(#Arrow)", ""),
    ("marker-start:url(#Arrow)", ""),
    ("marker-mid:url(#Arrow)", ""),
    ("marker-end:url(#Arrow)", ""),
    ("stroke-opacity:0.5", ""),
    ("stroke-dasharray:0, 1, 0, 1", ""),
    ("stroke-dasharray:0 1 0 1", "stroke-dasharray:0, 1, 0, 1"),
    ("stroke-dasharray:0  1  2  3", "stroke-dasharray:0, 1, 2, 3"),
    ("stroke-dashoffset:13", ""),
    ("stroke-dashoffset:10px", ""),
    ("filter:inherit", ""),
    ("opacity:0.1;fill:#ff0000;stroke:#0000ff;stroke-width:2px", ""),
    (
        "opacity:0.1;fill:#ff0000;stroke:#0000ff;stroke-width:2px;\
         stroke-dasharray:1, 2, 3, 4;stroke-dashoffset:15",
        "",
    ),
    ("paint-order:stroke", ""),
    ("paint-order:normal", ""),
    ("paint-order: markers stroke   fill", "paint-order:markers stroke fill"),
    // !important
    ("stroke-miterlimit:4 !important", ""),
    ("stroke-opacity:0.5 !important", ""),
    ("stroke-width:2px !important", ""),
    ("line-height:24px !important", ""),
    ("line-height:normal !important", ""),
    ("font-stretch:condensed !important", ""),
    ("marker:url(#Arrow) !important", ""),
    ("color:#0000ff !important", ""),
    ("fill:none !important", ""),
    ("fill:currentColor !important", ""),
    ("fill:#ff00ff !important", ""),
    ("paint-order:stroke !important", ""),
    ("paint-order:normal !important", ""),
    ("stroke-dasharray:0, 1, 0, 1 !important", ""),
    ("font-size:12px !important", ""),
    ("baseline-shift:baseline !important", ""),
    ("baseline-shift:sub !important", ""),
];

/// `(a, b, equal)`.
const MATCH: &[(&str, &str, bool)] = &[
    ("stroke-miterlimit:4", "stroke-miterlimit:4", true),
    ("stroke-miterlimit:4", "stroke-miterlimit:2", false),
    ("stroke-miterlimit:4", "", true),
    ("opacity:0.3", "opacity:0.3", true),
    ("opacity:0.3", "opacity:0.6", false),
    ("opacity:1.0", "", true),
    ("text-indent:3", "text-indent:3", true),
    ("text-indent:6", "text-indent:3", false),
    ("text-indent:6px", "text-indent:3", false),
    ("text-indent:1px", "text-indent:12pc", false),
    // Font relative lengths depend on the element, so never compare equal.
    ("text-indent:2ex", "text-indent:2ex", false),
    ("letter-spacing:normal", "letter-spacing:normal", true),
    ("letter-spacing:2", "letter-spacing:normal", false),
    ("letter-spacing:normal", "letter-spacing:2", false),
    ("letter-spacing:5px", "letter-spacing:5px", true),
    ("letter-spacing:10px", "letter-spacing:5px", false),
    ("letter-spacing:10em", "letter-spacing:10em", false),
    ("text-anchor:start", "text-anchor:start", true),
    ("text-anchor:start", "text-anchor:middle", false),
    ("text-anchor:start", "", true),
    ("text-anchor:start", "text-anchor:junk", true),
    ("font-weight:normal", "font-weight:400", true),
    ("font-weight:bold", "font-weight:700", true),
    ("font-family:Arial", "font-family:Arial", true),
    ("font-family:A B", "font-family:A B", true),
    ("font-family:A B", "font-family:A C", false),
    ("color:blue", "color:blue", true),
    ("color:blue", "color:red", false),
    ("color:red", "color:#ff0000", true),
    ("fill:blue", "fill:blue", true),
    ("fill:blue", "fill:red", false),
    ("fill:currentColor", "fill:currentColor", true),
    ("fill:url(#xxx)", "fill:url(#xxx)", true),
    ("paint-order:markers", "paint-order:markers", true),
    ("paint-order:markers", "paint-order:stroke", false),
    ("paint-order:normal", "paint-order:normal", true),
    ("stroke-dasharray:0 1 2 3", "stroke-dasharray:0 1 2 3", true),
    ("stroke-dasharray:0 1", "stroke-dasharray:0 2", false),
    ("font-size:12px", "font-size:12px", true),
    ("font-size:12px", "font-size:24px", false),
    ("font-size:12ex", "font-size:24ex", false),
    ("font-size:medium", "font-size:medium", true),
    ("font-size:medium", "font-size:large", false),
    ("baseline-shift:baseline", "baseline-shift:baseline", true),
    ("baseline-shift:sub", "baseline-shift:sub", true),
    ("baseline-shift:sub", "baseline-shift:super", false),
    ("baseline-shift:baseline", "baseline-shift:sub", false),
    ("baseline-shift:10px", "baseline-shift:10px", true),
    ("baseline-shift:10px", "baseline-shift:12px", false),
    ("text-decoration-line:underline", "text-decoration-line:underline", true),
    ("text-decoration-line:underline", "text-decoration-line:overline", false),
    (
        "text-decoration-line:underline overline",
        "text-decoration-line:underline overline",
        true,
    ),
    ("text-decoration-line:none", "", true),
    ("text-decoration-style:solid", "text-decoration-style:solid", true),
    ("text-decoration-style:dotted", "text-decoration-style:solid", false),
    ("text-decoration-style:solid", "", true),
    ("text-decoration:underline", "text-decoration:underline", true),
    ("text-decoration:underline", "text-decoration:overline", false),
    ("text-decoration:underline overline", "text-decoration:underline overline", true),
    ("text-decoration:overline underline", "text-decoration:underline overline", true),
];

/// `(parent, child, result, diff)`. A `None` diff means the empty string when
/// the result equals the parent, else the result itself.
const CASCADE: &[(&str, &str, &str, Option<&str>)] = &[
    ("stroke-miterlimit:6", "stroke-miterlimit:2", "stroke-miterlimit:2", None),
    ("stroke-miterlimit:6", "", "stroke-miterlimit:6", None),
    ("", "stroke-miterlimit:2", "stroke-miterlimit:2", None),
    // Non-inherited properties are written even when they match the parent.
    ("opacity:0.3", "opacity:0.3", "opacity:0.3", Some("opacity:0.3")),
    ("opacity:0.3", "opacity:0.6", "opacity:0.6", None),
    ("opacity:0.3", "", "opacity:1", None),
    ("", "opacity:0.3", "opacity:0.3", None),
    ("opacity:0.5", "opacity:inherit", "opacity:0.5", Some("opacity:0.5")),
    ("", "", "opacity:1", None),
    ("text-indent:3", "text-indent:3", "text-indent:3", None),
    ("text-indent:6", "text-indent:3", "text-indent:3", None),
    ("text-indent:6px", "text-indent:3", "text-indent:3", None),
    ("text-indent:1px", "text-indent:12pc", "text-indent:12pc", None),
    ("text-indent:3", "", "text-indent:3", None),
    ("text-indent:3", "text-indent:inherit", "text-indent:3", None),
    ("letter-spacing:normal", "letter-spacing:normal", "letter-spacing:normal", None),
    ("letter-spacing:2", "letter-spacing:normal", "letter-spacing:normal", None),
    ("letter-spacing:normal", "letter-spacing:2", "letter-spacing:2", None),
    ("letter-spacing:5px", "letter-spacing:5px", "letter-spacing:5px", None),
    ("letter-spacing:10px", "letter-spacing:5px", "letter-spacing:5px", None),
    ("text-anchor:start", "text-anchor:start", "text-anchor:start", None),
    ("text-anchor:start", "text-anchor:middle", "text-anchor:middle", None),
    ("text-anchor:start", "", "text-anchor:start", None),
    ("text-anchor:start", "text-anchor:junk", "text-anchor:start", None),
    ("text-anchor:end", "text-anchor:inherit", "text-anchor:end", None),
    ("font-weight:400", "font-weight:400", "font-weight:400", None),
    ("font-weight:400", "font-weight:700", "font-weight:700", None),
    ("font-weight:400", "font-weight:bolder", "font-weight:700", None),
    ("font-weight:700", "font-weight:bolder", "font-weight:900", None),
    ("font-weight:400", "font-weight:lighter", "font-weight:100", None),
    ("font-weight:200", "font-weight:lighter", "font-weight:100", None),
    ("font-stretch:condensed", "font-stretch:expanded", "font-stretch:expanded", None),
    ("font-stretch:condensed", "font-stretch:wider", "font-stretch:semi-condensed", None),
    (
        "font-variation-settings:'wght' 400",
        "",
        "font-variation-settings:'wght' 400",
        None,
    ),
    (
        "font-variation-settings:'wght' 100",
        "font-variation-settings:'wght' 400",
        "font-variation-settings:'wght' 400",
        None,
    ),
    (
        "font-variant-ligatures:no-common-ligatures",
        "",
        "font-variant-ligatures:no-common-ligatures",
        None,
    ),
    (
        "font-variant-ligatures:no-common-ligatures",
        "inherit",
        "font-variant-ligatures:no-common-ligatures",
        None,
    ),
    (
        "font-variant-ligatures:normal",
        "font-variant-ligatures:no-common-ligatures",
        "font-variant-ligatures:no-common-ligatures",
        None,
    ),
    (
        "",
        "font-variant-ligatures:no-common-ligatures",
        "font-variant-ligatures:no-common-ligatures",
        None,
    ),
    (
        "text-decoration-line:overline",
        "text-decoration-line:underline",
        "text-decoration-line:underline",
        None,
    ),
    (
        "text-decoration:overline",
        "text-decoration:underline",
        "text-decoration:underline;text-decoration-line:underline",
        None,
    ),
    (
        "text-decoration:underline",
        "text-decoration:underline",
        "text-decoration:underline;text-decoration-line:underline",
        Some(""),
    ),
    (
        "text-decoration:overline;text-decoration-line:underline",
        "text-decoration:overline",
        "text-decoration:overline;text-decoration-line:overline",
        None,
    ),
    (
        "text-decoration:overline;text-decoration-line:underline",
        "text-decoration:underline",
        "text-decoration:underline;text-decoration-line:underline",
        Some(""),
    ),
];

#[test]
fn test_read_table() {
    for &(src, expected) in READ {
        let expected = if expected.is_empty() { src } else { expected };
        let style = Style::from_css(src);
        assert_eq!(style.write(WriteFlags::IF_SET), expected, "reading {src:?}");
    }
}

#[test]
fn test_read_is_idempotent() {
    for &(src, _) in READ {
        let once = Style::from_css(src).write(WriteFlags::IF_SET);
        let twice = Style::from_css(&once).write(WriteFlags::IF_SET);
        assert_eq!(once, twice, "rewriting {src:?}");
    }
}

#[test]
fn test_match_table() {
    for &(a, b, equal) in MATCH {
        let left = Style::from_css(a);
        let right = Style::from_css(b);
        assert_eq!(left == right, equal, "comparing {a:?} with {b:?}");
    }
}

#[test]
fn test_cascade_table() {
    for &(parent_css, child_css, result_css, diff) in CASCADE {
        let parent = Style::from_css(parent_css);
        let mut child = Style::from_css(child_css);
        let result = Style::from_css(result_css);

        child.cascade(&parent);
        assert!(child == result, "cascading {child_css:?} under {parent_css:?}");

        let diff = diff.unwrap_or(if result_css == parent_css { "" } else { result_css });
        assert_eq!(result.write_if_diff(None), result_css, "writing {result_css:?}");
        assert_eq!(
            result.write_if_diff(Some(&parent)),
            diff,
            "writing {result_css:?} against {parent_css:?}"
        );
    }
}

#[test]
fn test_shorthand_resets_earlier_longhand() {
    let style = Style::from_css("font-style:italic;font:bold 12px Arial");
    assert_eq!(style.get("font-style").as_deref(), Some("normal"));

    let style = Style::from_css("font:bold 12px Arial;font-style:italic");
    assert_eq!(style.get("font-style").as_deref(), Some("italic"));
}

#[test]
fn test_diff_write_examples() {
    let base = Style::from_css("opacity:0.3");
    // Non-inherited properties always show up in a diff.
    assert_eq!(Style::from_css("opacity:0.6").write_if_diff(Some(&base)), "opacity:0.6");

    let base = Style::from_css("fill:red");
    assert_eq!(Style::from_css("fill:red").write_if_diff(Some(&base)), "");
}

#[test]
fn test_paint_opacities_inherit() {
    // Only `opacity` and `stop-opacity` stay per element.
    let parent = Style::from_css("fill-opacity:0.5;stroke-opacity:0.25;opacity:0.5");
    let mut child = Style::new();
    child.cascade(&parent);
    assert_eq!(child.fill_opacity.value.to_f64(), 0.5);
    assert_eq!(child.stroke_opacity.value.to_f64(), 0.25);
    assert_eq!(child.opacity.value.to_f64(), 1.0);
    assert_eq!(child.write_if_diff(Some(&parent)), "");
}
