//! Style resolution over the tree, paint binding and the lookups that need
//! more than one element (decoration origin, text alignment).

use std::sync::Arc;

use super::{Document, NodeId, ResolveState};
use crate::style::properties::{Direction, TextAlign, TextAnchor};
use crate::style::{
    INITIAL, Paint, PaintKind, PaintServer, PaintServerKind, PaintTarget, Style,
};

/// Which property decided an element's alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlignmentSource {
    TextAlign,
    TextAnchor,
    /// Neither was set anywhere up the tree.
    Direction,
}

/// Effective horizontal alignment of a text element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Alignment {
    pub anchor: TextAnchor,
    pub source: AlignmentSource,
}

impl Alignment {
    fn from_text_align(align: TextAlign, direction: Direction) -> Self {
        let ltr = direction == Direction::Ltr;
        let anchor = match align {
            TextAlign::Start | TextAlign::Justify => TextAnchor::Start,
            TextAlign::End => TextAnchor::End,
            TextAlign::Center => TextAnchor::Middle,
            TextAlign::Left if ltr => TextAnchor::Start,
            TextAlign::Left => TextAnchor::End,
            TextAlign::Right if ltr => TextAnchor::End,
            TextAlign::Right => TextAnchor::Start,
        };
        Self {
            anchor,
            source: AlignmentSource::TextAlign,
        }
    }
}

impl Document {
    /// Resolve every element that is not already resolved, parents before
    /// children. Returns how many elements were recomputed.
    pub fn resolve_all(&mut self) -> usize {
        let mut resolved = 0;
        for id in self.descendants(NodeId::ROOT) {
            let index = id.0 as usize;
            if self.nodes[index].state == ResolveState::Resolved {
                continue;
            }
            self.nodes[index].state = ResolveState::Cascading;
            let style = self.compute_style(id);
            let style = self.styles.share(style);
            let node = &mut self.nodes[index];
            node.style = style;
            node.state = ResolveState::Resolved;
            resolved += 1;
        }
        let pruned = self.styles.prune();
        tracing::debug!(resolved, pruned, total = self.nodes.len(), "resolved styles");
        resolved
    }

    fn compute_style(&self, id: NodeId) -> Style {
        let node = &self.nodes[id.0 as usize];
        let mut style = Style::new();
        if let Some(css) = node.attribute("style") {
            style.merge_string(css);
        }
        style.merge_stylesheet(&node.matched);
        for (name, value) in node.attributes() {
            if name != "style" {
                style.read_attribute(name, value);
            }
        }

        match node.parent {
            Some(parent) => {
                let parent = Arc::clone(&self.nodes[parent.0 as usize].style);
                style.cascade_with(&parent, &self.config);
            }
            None => style.cascade_with(&INITIAL, &self.config),
        }

        self.bind_paint(&mut style.fill.value);
        self.bind_paint(&mut style.stroke.value);
        self.bind_paint(&mut style.text_decoration_fill.value);
        self.bind_paint(&mut style.text_decoration_stroke.value);
        style
    }

    /// Bind a `url(...)` paint to its server. An unknown server leaves the
    /// paint's own fallback in charge, or `none` without one.
    fn bind_paint(&self, paint: &mut Paint) {
        let Some(reference) = paint.server.as_mut() else {
            return;
        };
        let target = reference
            .fragment()
            .and_then(|id| self.servers.get(id))
            .cloned();
        match target {
            Some(server) => reference.target = Some(server),
            None => {
                reference.target = None;
                tracing::debug!(url = %reference.url, "paint server not found");
                if paint.kind == PaintKind::Unset {
                    paint.kind = PaintKind::None;
                }
            }
        }
    }

    /// Register `id` as a paint server when its tag names one.
    pub(super) fn register_if_paint_server(&mut self, id: NodeId) {
        let node = &self.nodes[id.0 as usize];
        let Some(kind) = PaintServerKind::from_css(&node.tag) else {
            return;
        };
        let Some(server_id) = node.attribute("id") else {
            return;
        };

        let mut own = Style::new();
        if let Some(css) = node.attribute("style") {
            own.merge_string(css);
        }
        if let Some(color) = node.attribute("solid-color") {
            own.read_attribute("solid-color", color);
        }
        let fallback = own.solid_color.set.then_some(own.solid_color.value.rgb);

        let server = PaintServer {
            id: server_id.to_string(),
            kind,
            fallback,
        };
        tracing::trace!(id = %server.id, ?kind, "registered paint server");
        let server_id = server.id.clone();
        self.register_paint_server(server);
        self.server_owners.insert(server_id, id);
    }

    /// The nearest element, starting at `id`, that declares a text
    /// decoration.
    pub fn text_decoration_origin(&self, id: NodeId) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id)?;
            if node.style.text_decoration.set || node.style.text_decoration_line.set {
                return Some(node_id);
            }
            current = node.parent;
        }
        None
    }

    /// The paint for the decoration lines drawn over the text of `id`, or
    /// `None` when no decoration applies.
    pub fn decoration_paint(&self, id: NodeId, target: PaintTarget) -> Option<Paint> {
        let origin = self.text_decoration_origin(id)?;
        let style = self.style(id)?;
        let origin_style = self.style(origin)?;
        Some(style.text_decoration_paint(origin_style, target))
    }

    /// Alignment of the text of `id`.
    ///
    /// The nearest element that sets `text-align` or `text-anchor` decides;
    /// when one element sets both, `text-align` wins.
    pub fn effective_alignment(&self, id: NodeId) -> Option<Alignment> {
        let direction = self.style(id)?.direction.value.computed;
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id)?;
            let style = &node.style;
            if style.text_align.set && !style.text_align.inherit {
                return Some(Alignment::from_text_align(
                    style.text_align.value.computed,
                    direction,
                ));
            }
            if style.text_anchor.set && !style.text_anchor.inherit {
                return Some(Alignment {
                    anchor: style.text_anchor.value.computed,
                    source: AlignmentSource::TextAnchor,
                });
            }
            current = node.parent;
        }
        Some(Alignment {
            anchor: TextAnchor::Start,
            source: AlignmentSource::Direction,
        })
    }

    /// Paint servers referenced from the resolved style of `id`.
    pub fn bound_servers(&self, id: NodeId) -> Vec<Arc<PaintServer>> {
        let Some(style) = self.style(id) else {
            return Vec::new();
        };
        [&style.fill.value, &style.stroke.value]
            .into_iter()
            .filter_map(|paint| paint.server_target().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{DeclarationBlock, Rgb};

    fn attrs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_resolve_inherits_top_down() {
        let mut doc = Document::new("svg");
        let group = doc
            .append_child(doc.root(), "g", attrs(&[("style", "fill:red;opacity:0.5")]))
            .unwrap();
        let rect = doc.append_child(group, "rect", attrs(&[("stroke", "blue")])).unwrap();

        assert_eq!(doc.resolve_all(), 3);
        let style = doc.style(rect).unwrap();
        assert_eq!(style.fill.value.color, Rgb(255, 0, 0));
        assert_eq!(style.opacity.value.to_f64(), 1.0);
        assert_eq!(style.stroke.value.color, Rgb(0, 0, 255));
    }

    #[test]
    fn test_resolve_is_incremental() {
        let mut doc = Document::new("svg");
        let a = doc.append_child(doc.root(), "g", Vec::new()).unwrap();
        let b = doc.append_child(a, "rect", Vec::new()).unwrap();
        let c = doc.append_child(doc.root(), "rect", Vec::new()).unwrap();
        doc.resolve_all();
        assert_eq!(doc.resolve_all(), 0);

        doc.set_attribute(a, "fill", "green").unwrap();
        assert_eq!(doc.state(b), Some(ResolveState::Unresolved));
        assert_eq!(doc.state(c), Some(ResolveState::Resolved));
        assert_eq!(doc.resolve_all(), 2);
        assert_eq!(doc.style(b).unwrap().fill.value.color, Rgb(0, 128, 0));
    }

    #[test]
    fn test_matched_rules_between_style_and_attributes() {
        let mut doc = Document::new("svg");
        let rect = doc
            .append_child(
                doc.root(),
                "rect",
                attrs(&[("style", "fill:red"), ("fill", "blue"), ("stroke", "blue")]),
            )
            .unwrap();
        doc.set_matched_rules(rect, vec![DeclarationBlock::parse("fill:green;stroke:green")])
            .unwrap();
        doc.resolve_all();
        let style = doc.style(rect).unwrap();
        assert_eq!(style.fill.value.color, Rgb(255, 0, 0));
        assert_eq!(style.stroke.value.color, Rgb(0, 128, 0));
    }

    #[test]
    fn test_paint_server_binding() {
        let mut doc = Document::new("svg");
        doc.append_child(doc.root(), "linearGradient", attrs(&[("id", "grad")]))
            .unwrap();
        let bound = doc
            .append_child(doc.root(), "rect", attrs(&[("fill", "url(#grad)")]))
            .unwrap();
        let missing = doc
            .append_child(doc.root(), "rect", attrs(&[("fill", "url(#nope)")]))
            .unwrap();
        let fallback = doc
            .append_child(doc.root(), "rect", attrs(&[("fill", "url(#nope) red")]))
            .unwrap();
        doc.resolve_all();

        let servers = doc.bound_servers(bound);
        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0].kind, PaintServerKind::LinearGradient);
        assert!(Arc::ptr_eq(&servers[0], doc.paint_server("grad").unwrap()));

        let paint = &doc.style(missing).unwrap().fill.value;
        assert_eq!(paint.kind, PaintKind::None);
        assert!(paint.server_target().is_none());
        let paint = &doc.style(fallback).unwrap().fill.value;
        assert_eq!(paint.kind, PaintKind::Color);
        assert_eq!(paint.color, Rgb(255, 0, 0));
        assert!(paint.server_target().is_none());
    }

    #[test]
    fn test_solid_color_fallback() {
        let mut doc = Document::new("svg");
        doc.append_child(
            doc.root(),
            "solidColor",
            attrs(&[("id", "sc"), ("style", "solid-color:#00ff00")]),
        )
        .unwrap();
        let server = doc.paint_server("sc").unwrap();
        assert_eq!(server.kind, PaintServerKind::SolidColor);
        assert_eq!(server.fallback, Some(Rgb(0, 255, 0)));
    }

    #[test]
    fn test_decoration_origin_and_paint() {
        let mut doc = Document::new("svg");
        let text = doc
            .append_child(
                doc.root(),
                "text",
                attrs(&[("style", "text-decoration:underline;text-decoration-stroke:blue")]),
            )
            .unwrap();
        let tspan = doc
            .append_child(text, "tspan", attrs(&[("fill", "red")]))
            .unwrap();
        doc.resolve_all();

        assert_eq!(doc.text_decoration_origin(tspan), Some(text));
        let fill = doc.decoration_paint(tspan, PaintTarget::Fill).unwrap();
        assert_eq!(fill.color, Rgb(255, 0, 0));
        let stroke = doc.decoration_paint(tspan, PaintTarget::Stroke).unwrap();
        assert_eq!(stroke.color, Rgb(0, 0, 255));
        assert_eq!(doc.text_decoration_origin(doc.root()), None);
    }

    #[test]
    fn test_effective_alignment() {
        let mut doc = Document::new("svg");
        let both = doc
            .append_child(
                doc.root(),
                "text",
                attrs(&[("style", "text-align:center;text-anchor:end")]),
            )
            .unwrap();
        let anchored = doc
            .append_child(both, "tspan", attrs(&[("text-anchor", "end")]))
            .unwrap();
        let plain = doc.append_child(doc.root(), "text", Vec::new()).unwrap();
        let rtl = doc
            .append_child(
                doc.root(),
                "text",
                attrs(&[("style", "direction:rtl;text-align:left")]),
            )
            .unwrap();
        doc.resolve_all();

        assert_eq!(
            doc.effective_alignment(both),
            Some(Alignment {
                anchor: TextAnchor::Middle,
                source: AlignmentSource::TextAlign
            })
        );
        assert_eq!(
            doc.effective_alignment(anchored),
            Some(Alignment {
                anchor: TextAnchor::End,
                source: AlignmentSource::TextAnchor
            })
        );
        assert_eq!(
            doc.effective_alignment(plain).map(|a| a.source),
            Some(AlignmentSource::Direction)
        );
        assert_eq!(doc.effective_alignment(rtl).map(|a| a.anchor), Some(TextAnchor::End));
    }

    #[test]
    fn test_replaced_server_rebinds() {
        let mut doc = Document::new("svg");
        doc.append_child(doc.root(), "linearGradient", attrs(&[("id", "g")]))
            .unwrap();
        let rect = doc
            .append_child(doc.root(), "rect", attrs(&[("fill", "url(#g)")]))
            .unwrap();
        doc.resolve_all();

        doc.register_paint_server(PaintServer {
            id: "g".to_string(),
            kind: PaintServerKind::Pattern,
            fallback: None,
        });
        assert_eq!(doc.state(rect), Some(ResolveState::Unresolved));
        doc.resolve_all();

        let servers = doc.bound_servers(rect);
        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0].kind, PaintServerKind::Pattern);
        assert!(Arc::ptr_eq(&servers[0], doc.paint_server("g").unwrap()));
    }

    #[test]
    fn test_equal_declarations_under_different_parents() {
        let mut doc = Document::new("svg");
        let raised = doc
            .append_child(doc.root(), "g", attrs(&[("style", "baseline-shift:super")]))
            .unwrap();
        let plain = doc.append_child(doc.root(), "g", Vec::new()).unwrap();
        let first = doc
            .append_child(raised, "tspan", attrs(&[("style", "baseline-shift:sub")]))
            .unwrap();
        let second = doc
            .append_child(plain, "tspan", attrs(&[("style", "baseline-shift:sub")]))
            .unwrap();
        doc.resolve_all();

        let first = doc.style(first).unwrap();
        let second = doc.style(second).unwrap();
        assert!(!Arc::ptr_eq(first, second));
        assert!((second.baseline_shift.value.computed + 2.4).abs() < 1e-9);
        assert!((first.baseline_shift.value.computed - 2.4).abs() < 1e-9);
    }

    #[test]
    fn test_edits_do_not_grow_pool() {
        let mut doc = Document::new("svg");
        let rect = doc.append_child(doc.root(), "rect", Vec::new()).unwrap();
        doc.resolve_all();
        let settled = doc.styles.len();

        for width in 1..20 {
            doc.set_attribute(rect, "stroke-width", &width.to_string()).unwrap();
            doc.resolve_all();
        }
        assert_eq!(doc.styles.len(), settled + 1);
    }

    #[test]
    fn test_server_id_change_releases_old_id() {
        let mut doc = Document::new("svg");
        let gradient = doc
            .append_child(doc.root(), "radialGradient", attrs(&[("id", "old")]))
            .unwrap();
        let rect = doc
            .append_child(doc.root(), "rect", attrs(&[("fill", "url(#old)")]))
            .unwrap();
        doc.resolve_all();
        assert_eq!(doc.bound_servers(rect).len(), 1);

        doc.set_attribute(gradient, "id", "new").unwrap();
        assert!(doc.paint_server("old").is_none());
        assert_eq!(
            doc.paint_server("new").map(|server| server.kind),
            Some(PaintServerKind::RadialGradient)
        );
        doc.resolve_all();
        assert!(doc.bound_servers(rect).is_empty());
        assert_eq!(doc.style(rect).unwrap().fill.value.kind, PaintKind::None);
    }
}
