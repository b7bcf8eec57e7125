//! Documentation entries normalized into [`Member`] records.
//!
//! Identifiers follow the compiler's documentation-id format:
//! `M:Acme.Widget.Resize(System.Int32,System.Int32)` is the `Resize`
//! method of type `Acme.Widget`. Parsing never fails; entries that cannot
//! be decomposed are classified [`Kind::Unsupported`] and dropped.

use crate::document::{ApiDocument, RawEntry};
use crate::kind::{Kind, classify};
use crate::labels::Labels;
use crate::markup::{self, code_span, display_name, escape_html};
use crate::xml::XmlNode;

/// Decomposed documentation identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberName {
    kind: Kind,
    /// Dotted path without prefix and parameter list.
    path: String,
    /// Raw parameter list between the parentheses, if any.
    params: Option<String>,
    /// Byte offset of the member segment within `path`.
    split: usize,
}

impl MemberName {
    /// Parse a scheme-prefixed identifier.
    ///
    /// Returns `None` for unsupported prefixes and for identifiers without
    /// a usable dotted path.
    #[must_use]
    pub fn parse(identifier: &str) -> Option<Self> {
        let kind = classify(identifier);
        if kind == Kind::Unsupported {
            return None;
        }

        let body = identifier[2..].trim();
        let (path, params) = match body.split_once('(') {
            Some((head, rest)) => {
                let params = rest.rsplit_once(')').map_or(rest, |(inner, _)| inner);
                (head, Some(params.to_owned()))
            }
            None => (body, None),
        };
        if path.is_empty() || path.split('.').any(str::is_empty) {
            return None;
        }

        let split = match kind {
            Kind::Type => 0,
            _ => path.rfind('.')? + 1,
        };

        Some(Self {
            kind,
            path: path.to_owned(),
            params,
            split,
        })
    }

    /// Member kind.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Raw parameter list, if the identifier has one.
    #[must_use]
    pub fn params(&self) -> Option<&str> {
        self.params.as_deref()
    }

    /// Identifier of the owning type; a type owns itself.
    #[must_use]
    pub fn owning_type(&self) -> &str {
        match self.kind {
            Kind::Type => &self.path,
            _ => &self.path[..self.split - 1],
        }
    }

    /// Last segment of the path (`Resize`, `#ctor`, or the type name).
    #[must_use]
    pub fn segment(&self) -> &str {
        self.path.rsplit('.').next().unwrap_or(&self.path)
    }

    /// Last segment of the owning type (`Widget`).
    #[must_use]
    pub fn type_short_name(&self) -> &str {
        let owner = self.owning_type();
        owner.rsplit('.').next().unwrap_or(owner)
    }

    /// Raw short name of the member: the type name for types and
    /// constructors, the member segment otherwise.
    #[must_use]
    pub fn short_name(&self) -> &str {
        match self.kind {
            Kind::Type | Kind::Constructor => self.type_short_name(),
            _ => self.segment(),
        }
    }

    /// Raw label for cross-references (`Widget`, `Widget.Resize`).
    #[must_use]
    pub fn reference_label(&self) -> String {
        match self.kind {
            Kind::Type | Kind::Constructor => self.type_short_name().to_owned(),
            _ => format!("{}.{}", self.type_short_name(), self.segment()),
        }
    }
}

/// A documented item with a description (`<param>`, `<exception>`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedDoc {
    /// Parameter name or exception `cref`.
    pub name: String,
    /// Single-line Markdown description.
    pub text: String,
}

/// One normalized documentation entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    name: MemberName,
    /// Display short name (`List<T>`, `Resize`).
    pub short_name: String,
    /// Rewritten summary lines.
    pub summary: Vec<String>,
    pub params: Vec<NamedDoc>,
    pub type_params: Vec<NamedDoc>,
    pub exceptions: Vec<NamedDoc>,
    pub returns: Vec<String>,
    pub value: Vec<String>,
    pub remarks: Vec<String>,
    pub example: Vec<String>,
}

impl Member {
    /// Parse one raw entry.
    ///
    /// Returns `None` when the entry has no identifier or the identifier is
    /// unsupported; this is the only way parsing "fails".
    #[must_use]
    pub fn parse(entry: &RawEntry) -> Option<Self> {
        let name = MemberName::parse(entry.name.as_deref()?)?;
        let element = &entry.element;

        Some(Self {
            short_name: display_name(name.short_name()),
            summary: section(element, "summary"),
            params: named_docs(element, "param", "name"),
            type_params: named_docs(element, "typeparam", "name"),
            exceptions: named_docs(element, "exception", "cref"),
            returns: section(element, "returns"),
            value: section(element, "value"),
            remarks: section(element, "remarks"),
            example: section(element, "example"),
            name,
        })
    }

    /// Member kind.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.name.kind()
    }

    /// Raw identifier of the owning type (`` Acme.List`1 ``).
    #[must_use]
    pub fn owning_type(&self) -> &str {
        self.name.owning_type()
    }

    /// Decomposed identifier.
    #[must_use]
    pub fn name(&self) -> &MemberName {
        &self.name
    }

    /// Whether this is a type entry standing in for a namespace summary.
    #[must_use]
    pub fn is_namespace_marker(&self) -> bool {
        self.kind() == Kind::Type && self.short_name.to_lowercase().contains("namespace")
    }

    /// Heading caption: `Resize(width, height)` for callables, the short
    /// name otherwise. Parameter names come from `<param>` docs, falling
    /// back to the identifier's raw parameter list.
    #[must_use]
    pub fn caption(&self) -> String {
        match self.kind() {
            Kind::Constructor | Kind::Method => {
                let params = if self.params.is_empty() {
                    self.name.params().unwrap_or_default().to_owned()
                } else {
                    self.params
                        .iter()
                        .map(|p| p.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                format!("{}({params})", self.short_name)
            }
            _ => self.short_name.clone(),
        }
    }

    /// Markdown fragment for this member: signature heading followed by
    /// the description and every documented detail.
    #[must_use]
    pub fn rendered_lines(&self, labels: &Labels) -> Vec<String> {
        let mut lines = vec![format!("### {}", escape_html(&self.caption())), String::new()];

        push_block(&mut lines, &self.summary);
        push_table(&mut lines, &labels.parameters, &labels.name, &labels.description, &self.params);
        push_table(
            &mut lines,
            &labels.type_parameters,
            &labels.name,
            &labels.description,
            &self.type_params,
        );
        push_titled(&mut lines, &labels.returns, &self.returns);
        push_titled(&mut lines, &labels.value, &self.value);
        push_table(
            &mut lines,
            &labels.exceptions,
            &labels.exception,
            &labels.description,
            &self.exceptions,
        );
        push_titled(&mut lines, &labels.remarks, &self.remarks);
        push_titled(&mut lines, &labels.example, &self.example);

        lines
    }
}

/// Parse every entry, dropping unsupported ones.
#[must_use]
pub fn parse_members(document: &ApiDocument) -> Vec<Member> {
    document.entries.iter().filter_map(Member::parse).collect()
}

fn section(element: &XmlNode, tag: &str) -> Vec<String> {
    element.child(tag).map(markup::rewrite).unwrap_or_default()
}

fn named_docs(element: &XmlNode, tag: &str, key: &str) -> Vec<NamedDoc> {
    element
        .children_named(tag)
        .map(|child| NamedDoc {
            name: child.attr(key).unwrap_or_default().to_owned(),
            text: markup::rewrite_inline(child),
        })
        .collect()
}

fn push_block(lines: &mut Vec<String>, block: &[String]) {
    if !block.is_empty() {
        lines.extend(block.iter().cloned());
        lines.push(String::new());
    }
}

fn push_titled(lines: &mut Vec<String>, title: &str, block: &[String]) {
    if !block.is_empty() {
        lines.push(format!("#### {title}"));
        lines.push(String::new());
        push_block(lines, block);
    }
}

fn push_table(lines: &mut Vec<String>, title: &str, left: &str, right: &str, rows: &[NamedDoc]) {
    if rows.is_empty() {
        return;
    }
    lines.push(format!("#### {title}"));
    lines.push(String::new());
    lines.push(format!("| {left} | {right} |"));
    lines.push("|---|---|".to_owned());
    for row in rows {
        let name = if row.name.contains(':') {
            markup::cref_link(&row.name)
        } else {
            code_span(&row.name)
        };
        lines.push(format!("| {} | {} |", table_cell(&name), table_cell(&row.text)));
    }
    lines.push(String::new());
}

/// Escape `|` so cell text cannot split a table row.
fn table_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
