//! Error types for svgcascade operations.

use thiserror::Error;

/// Errors that can occur while loading documents or manipulating styles.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    #[error("XML escape error: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Unknown style property: {0}")]
    UnknownProperty(String),

    #[error("Invalid node id: {0}")]
    InvalidNode(usize),

    #[error("Empty document: no root element")]
    EmptyDocument,
}

pub type Result<T> = std::result::Result<T, Error>;
