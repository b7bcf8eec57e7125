//! Error types for documentation parsing.

/// Error while reading an XML documentation export.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DocumentError {
    /// XML parsing error.
    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    /// Encoding error during XML parsing.
    #[error("encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// The document contains no root element.
    #[error("document has no root element")]
    Empty,

    /// The root element has no `<members>` child.
    #[error("document has no <members> element")]
    MissingMembers,
}
