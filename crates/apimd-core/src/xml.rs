//! Minimal XML element tree.
//!
//! Documentation exports and project descriptors are small, so both are read
//! fully into an [`XmlNode`] tree. Mixed content is kept ElementTree-style:
//! text before the first child lives in `text`, text after a child lives in
//! that child's `tail`.

use std::collections::HashMap;
use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::DocumentError;

/// Element in a parsed XML tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    /// Element tag name.
    pub tag: String,
    /// Text before the first child element.
    pub text: String,
    /// Text after this element's end tag, up to the next sibling.
    pub tail: String,
    /// Element attributes.
    pub attrs: HashMap<String, String>,
    /// Child elements.
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    /// Attribute value by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// First child element with the given tag.
    #[must_use]
    pub fn child(&self, tag: &str) -> Option<&XmlNode> {
        self.children.iter().find(|child| child.tag == tag)
    }

    /// All child elements with the given tag, in document order.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a XmlNode> + 'a {
        self.children.iter().filter(move |child| child.tag == tag)
    }

    /// Concatenated text of this element and its descendants, excluding own tail.
    #[must_use]
    pub fn inner_text(&self) -> String {
        let mut out = self.text.clone();
        for child in &self.children {
            out.push_str(&child.inner_text());
            out.push_str(&child.tail);
        }
        out
    }
}

#[cfg(test)]
impl XmlNode {
    /// Create a new node with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Set text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set tail content.
    #[must_use]
    pub fn with_tail(mut self, tail: impl Into<String>) -> Self {
        self.tail = tail.into();
        self
    }

    /// Add an attribute.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Set children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<XmlNode>) -> Self {
        self.children = children;
        self
    }
}

/// Parse an XML document into its root element.
///
/// A leading byte-order mark is ignored. Comments, processing instructions
/// and the XML declaration are dropped.
///
/// # Errors
///
/// Returns an error if the input is not well-formed XML or has no root element.
pub fn parse(xml: &str) -> Result<XmlNode, DocumentError> {
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let tag = decode_tag(&reader, e.name().as_ref());
                let attrs = decode_attrs(&reader, &e);
                let mut root = parse_children(&mut reader, &tag)?;
                root.tag = tag;
                root.attrs = attrs;
                return Ok(root);
            }
            Event::Empty(e) => {
                return Ok(XmlNode {
                    tag: decode_tag(&reader, e.name().as_ref()),
                    attrs: decode_attrs(&reader, &e),
                    ..Default::default()
                });
            }
            Event::Eof => return Err(DocumentError::Empty),
            _ => {}
        }
        buf.clear();
    }
}

fn parse_children<R: BufRead>(
    reader: &mut Reader<R>,
    parent_tag: &str,
) -> Result<XmlNode, DocumentError> {
    let mut buf = Vec::new();
    let mut node = XmlNode::default();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let child_tag = decode_tag(reader, e.name().as_ref());
                let child_attrs = decode_attrs(reader, &e);
                let mut child = parse_children(reader, &child_tag)?;
                child.tag = child_tag;
                child.attrs = child_attrs;
                node.children.push(child);
            }
            Event::Empty(e) => {
                node.children.push(XmlNode {
                    tag: decode_tag(reader, e.name().as_ref()),
                    attrs: decode_attrs(reader, &e),
                    ..Default::default()
                });
            }
            Event::Text(e) => {
                let text = reader.decoder().decode(&e)?.into_owned();
                append_text(&mut node, &text);
            }
            Event::GeneralRef(e) => {
                let entity = reader.decoder().decode(&e)?.into_owned();
                append_text(&mut node, &decode_entity(&entity));
            }
            Event::CData(e) => {
                append_text(&mut node, &String::from_utf8_lossy(&e));
            }
            Event::End(e) => {
                if decode_tag(reader, e.name().as_ref()) == parent_tag {
                    return Ok(node);
                }
            }
            Event::Eof => return Ok(node),
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
        buf.clear();
    }
}

fn decode_tag<R: BufRead>(reader: &Reader<R>, name: &[u8]) -> String {
    reader.decoder().decode(name).map_or_else(
        |_| String::from_utf8_lossy(name).into_owned(),
        std::borrow::Cow::into_owned,
    )
}

fn decode_attrs<R: BufRead>(reader: &Reader<R>, e: &BytesStart) -> HashMap<String, String> {
    let mut attrs = HashMap::new();
    for attr in e.attributes().flatten() {
        let key = decode_tag(reader, attr.key.as_ref());
        if key.starts_with("xmlns") {
            continue;
        }
        let value = attr.unescape_value().map_or_else(
            |_| String::from_utf8_lossy(&attr.value).into_owned(),
            std::borrow::Cow::into_owned,
        );
        attrs.insert(key, value);
    }
    attrs
}

/// Append text to node's text or last child's tail.
fn append_text(node: &mut XmlNode, text: &str) {
    if let Some(last_child) = node.children.last_mut() {
        last_child.tail.push_str(text);
    } else {
        node.text.push_str(text);
    }
}

/// Decode XML entity references to their character values.
fn decode_entity(entity: &str) -> String {
    match entity {
        "lt" => "<".to_owned(),
        "gt" => ">".to_owned(),
        "amp" => "&".to_owned(),
        "apos" => "'".to_owned(),
        "quot" => "\"".to_owned(),
        s if s.starts_with('#') => {
            let code = if s.starts_with("#x") || s.starts_with("#X") {
                u32::from_str_radix(&s[2..], 16).ok()
            } else {
                s[1..].parse::<u32>().ok()
            };
            code.and_then(char::from_u32)
                .map_or_else(|| format!("&{entity};"), |c| c.to_string())
        }
        _ => format!("&{entity};"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_element() {
        let root = parse("<doc><name>Acme</name></doc>").unwrap();

        assert_eq!(root.tag, "doc");
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].tag, "name");
        assert_eq!(root.children[0].text, "Acme");
    }

    #[test]
    fn test_parse_mixed_content_keeps_tails() {
        let root = parse(r#"<summary>See <see cref="T:A"/> for more.</summary>"#).unwrap();

        assert_eq!(root.text, "See ");
        assert_eq!(root.children[0].tag, "see");
        assert_eq!(root.children[0].attr("cref"), Some("T:A"));
        assert_eq!(root.children[0].tail, " for more.");
    }

    #[test]
    fn test_parse_entities() {
        let root = parse("<c>a &lt; b &amp;&amp; c &#x41;</c>").unwrap();

        assert_eq!(root.text, "a < b && c A");
    }

    #[test]
    fn test_parse_skips_declaration_and_bom() {
        let xml = "\u{feff}<?xml version=\"1.0\"?>\n<!-- generated -->\n<doc/>";
        let root = parse(xml).unwrap();

        assert_eq!(root.tag, "doc");
        assert!(root.children.is_empty());
    }

    #[test]
    fn test_parse_empty_input_is_error() {
        let result = parse("   ");

        assert!(matches!(result, Err(DocumentError::Empty)));
    }

    #[test]
    fn test_parse_namespace_declarations_dropped() {
        let root = parse(r#"<Project xmlns="http://schemas.microsoft.com/developer/msbuild/2003" Sdk="x"/>"#)
            .unwrap();

        assert_eq!(root.attr("Sdk"), Some("x"));
        assert_eq!(root.attrs.len(), 1);
    }

    #[test]
    fn test_inner_text_includes_descendants() {
        let node = XmlNode::new("summary")
            .with_text("A ")
            .with_children(vec![XmlNode::new("c").with_text("b").with_tail(" c")]);

        assert_eq!(node.inner_text(), "A b c");
    }

    #[test]
    fn test_children_named() {
        let node = XmlNode::new("member").with_children(vec![
            XmlNode::new("param").with_attr("name", "a"),
            XmlNode::new("summary"),
            XmlNode::new("param").with_attr("name", "b"),
        ]);

        let names: Vec<_> = node
            .children_named("param")
            .filter_map(|p| p.attr("name"))
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
