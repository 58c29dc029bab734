//! Loading a [`Document`] from SVG markup.
//!
//! Only elements and their attributes matter for styling; text, comments
//! and processing instructions are skipped.

use std::path::Path;

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};

use super::{Document, NodeId};
use crate::config::CascadeConfig;
use crate::error::{Error, Result};

/// Strip a namespace prefix (`svg:rect` -> `rect`).
fn local_name(name: &[u8]) -> &[u8] {
    match name.iter().rposition(|&b| b == b':') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

fn element(e: &BytesStart<'_>) -> Result<(String, Vec<(String, String)>)> {
    let tag = String::from_utf8(local_name(e.name().as_ref()).to_vec())?;
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8(attr.key.as_ref().to_vec())?;
        let raw = String::from_utf8(attr.value.to_vec())?;
        let value = unescape(&raw)?.into_owned();
        attributes.push((key, value));
    }
    Ok((tag, attributes))
}

impl Document {
    /// Parse SVG markup.
    pub fn from_svg(content: &str) -> Result<Self> {
        Self::from_svg_with_config(content, CascadeConfig::default())
    }

    pub fn from_svg_with_config(content: &str, config: CascadeConfig) -> Result<Self> {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(true);

        let mut doc: Option<Document> = None;
        let mut stack: Vec<NodeId> = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let id = open_element(&mut doc, &stack, &e, config)?;
                    stack.push(id);
                }
                Event::Empty(e) => {
                    open_element(&mut doc, &stack, &e, config)?;
                }
                Event::End(_) => {
                    stack.pop();
                }
                Event::Eof => break,
                _ => {}
            }
        }

        let doc = doc.ok_or(Error::EmptyDocument)?;
        tracing::debug!(nodes = doc.node_count(), "loaded document");
        Ok(doc)
    }

    /// Read and parse an SVG file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_svg(&content)
    }
}

/// Add an element under the innermost open element, creating the document
/// on the first one.
fn open_element(
    doc: &mut Option<Document>,
    stack: &[NodeId],
    e: &BytesStart<'_>,
    config: CascadeConfig,
) -> Result<NodeId> {
    let (tag, attributes) = element(e)?;
    match (doc.as_mut(), stack.last()) {
        (Some(doc), Some(&parent)) => doc.append_child(parent, &tag, attributes),
        (Some(_), None) => {
            tracing::debug!(tag, "ignored element after the root");
            Ok(NodeId::ROOT)
        }
        (None, _) => {
            let mut root = Document::with_config(&tag, config);
            for (name, value) in &attributes {
                root.set_attribute(NodeId::ROOT, name, value)?;
            }
            *doc = Some(root);
            Ok(NodeId::ROOT)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_svg_builds_tree() {
        let doc = Document::from_svg(
            r#"<?xml version="1.0"?>
            <svg xmlns="http://www.w3.org/2000/svg" style="fill:red">
                <!-- comment -->
                <g id="layer" fill="blue">
                    <rect width="10" height="10"/>
                    <text>Hello</text>
                </g>
                <svg:circle r="4"/>
            </svg>"#,
        )
        .unwrap();

        assert_eq!(doc.node_count(), 5);
        let root = doc.node(doc.root()).unwrap();
        assert_eq!(root.tag, "svg");
        assert_eq!(root.attribute("style"), Some("fill:red"));
        assert_eq!(root.children.len(), 2);

        let group = doc.node(root.children[0]).unwrap();
        assert_eq!(group.tag, "g");
        assert_eq!(group.attribute("fill"), Some("blue"));
        let names: Vec<_> = group
            .children
            .iter()
            .map(|&id| doc.node(id).unwrap().tag.as_str())
            .collect();
        assert_eq!(names, ["rect", "text"]);
        assert_eq!(doc.node(root.children[1]).unwrap().tag, "circle");
    }

    #[test]
    fn test_attribute_entities() {
        let doc = Document::from_svg(r#"<svg font-family="&quot;A&amp;B&quot;"/>"#).unwrap();
        assert_eq!(doc.attribute(NodeId::ROOT, "font-family"), Some("\"A&B\""));
    }

    #[test]
    fn test_empty_document() {
        assert!(matches!(Document::from_svg("  "), Err(Error::EmptyDocument)));
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"svg:rect"), b"rect");
        assert_eq!(local_name(b"rect"), b"rect");
    }
}
