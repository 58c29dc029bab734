//! # svgcascade
//!
//! The CSS presentation style engine of an SVG editor: per-element style
//! declarations are parsed into typed property slots, cascaded down the
//! element tree and written back as canonical CSS.
//!
//! ## Quick Start
//!
//! ```
//! use svgcascade::style::{Style, WriteFlags};
//!
//! let parent = Style::from_css("font-weight:700;fill:rgb(255, 0, 0)");
//! let mut child = Style::from_css("font-weight:bolder;opacity:0.5");
//! child.cascade(&parent);
//!
//! assert_eq!(child.get("font-weight").as_deref(), Some("bolder"));
//! assert_eq!(child.write(WriteFlags::IF_SET), "font-weight:bolder;opacity:0.5");
//! assert_eq!(parent.write_if_diff(None), "font-weight:700;fill:#ff0000");
//! ```
//!
//! ## Documents
//!
//! A [`Document`] holds an element tree loaded from SVG and resolves every
//! element's style, parents first, binding `url(...)` paints to the paint
//! servers it contains:
//!
//! ```
//! use svgcascade::Document;
//!
//! let mut doc = Document::from_svg(
//!     r#"<svg style="fill:blue"><g opacity="0.5"><rect/></g></svg>"#,
//! ).unwrap();
//! doc.resolve_all();
//!
//! let group = doc.node(doc.root()).unwrap().children[0];
//! let rect = doc.node(group).unwrap().children[0];
//! assert_eq!(doc.style(rect).unwrap().fill.value_string(), "#0000ff");
//! ```

pub mod config;
pub mod dom;
pub mod error;
pub mod style;
pub(crate) mod util;

pub use config::{CascadeConfig, DEFAULT_CONFIG};
pub use dom::{Alignment, AlignmentSource, Document, Node, NodeId, ResolveState};
pub use error::{Error, Result};
pub use style::{CssAttr, DeclarationBlock, MarkerLocation, PaintTarget, PropertyId, Style};
