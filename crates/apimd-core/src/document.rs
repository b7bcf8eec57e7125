//! XML documentation export model.
//!
//! Compilers emit documentation as:
//!
//! ```text
//! <doc>
//!   <assembly><name>Acme</name></assembly>
//!   <members>
//!     <member name="T:Acme.Widget"><summary>A widget.</summary></member>
//!   </members>
//! </doc>
//! ```

use crate::error::DocumentError;
use crate::xml::{self, XmlNode};

/// One raw `<member>` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    /// Scheme-prefixed identifier from the `name` attribute, if present.
    pub name: Option<String>,
    /// The `<member>` element with its documentation children.
    pub element: XmlNode,
}

impl RawEntry {
    /// Create an entry from a `<member>` element.
    #[must_use]
    pub fn from_element(element: XmlNode) -> Self {
        Self {
            name: element.attr("name").map(str::to_owned),
            element,
        }
    }
}

/// Parsed documentation export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiDocument {
    /// Member entries in document order.
    pub entries: Vec<RawEntry>,
}

impl ApiDocument {
    /// Parse a documentation export from its XML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the XML is malformed or has no `<members>` element.
    pub fn parse(xml: &str) -> Result<Self, DocumentError> {
        let root = xml::parse(xml)?;
        let members = root.child("members").ok_or(DocumentError::MissingMembers)?;

        let entries = members
            .children_named("member")
            .cloned()
            .map(RawEntry::from_element)
            .collect();

        Ok(Self { entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document() {
        let xml = r#"<?xml version="1.0"?>
<doc>
    <assembly><name>Acme</name></assembly>
    <members>
        <member name="T:Acme.Widget"><summary>A widget.</summary></member>
        <member name="M:Acme.Widget.Do"/>
    </members>
</doc>"#;

        let doc = ApiDocument::parse(xml).unwrap();

        assert_eq!(doc.entries.len(), 2);
        assert_eq!(doc.entries[0].name.as_deref(), Some("T:Acme.Widget"));
        assert_eq!(doc.entries[1].name.as_deref(), Some("M:Acme.Widget.Do"));
    }

    #[test]
    fn test_parse_member_without_name() {
        let xml = "<doc><members><member><summary>x</summary></member></members></doc>";

        let doc = ApiDocument::parse(xml).unwrap();

        assert_eq!(doc.entries.len(), 1);
        assert!(doc.entries[0].name.is_none());
    }

    #[test]
    fn test_parse_missing_members_is_error() {
        let result = ApiDocument::parse("<doc><assembly/></doc>");

        assert!(matches!(result, Err(DocumentError::MissingMembers)));
    }

    #[test]
    fn test_parse_malformed_xml_is_error() {
        let result = ApiDocument::parse("<doc><members></doc>");

        assert!(result.is_err());
    }
}
