//! Inline documentation markup to Markdown.
//!
//! Converts doc-comment elements (`<see>`, `<paramref>`, `<c>`, `<code>`,
//! `<para>`, ...) into Markdown text, and provides the generic-arity name
//! forms used across the renderer:
//!
//! - raw: `` Acme.List`1 `` (as emitted by the compiler)
//! - display: `Acme.List<T>` (titles and headings)
//! - escaped: `Acme.List_T` (directory names and manifest keys)

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::member::MemberName;
use crate::xml::XmlNode;

/// Display form of a single type parameter.
pub const DISPLAY_MARKER: &str = "<T>";

/// Filesystem-safe form of a single type parameter.
pub const ESCAPED_MARKER: &str = "_T";

/// Fence language for `<code>` blocks.
const CODE_LANGUAGE: &str = "csharp";

/// Type (`` `1 ``) or method (``` ``1 ```) single-parameter arity marker.
static RAW_ARITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"``?1\b").expect("invalid arity regex"));

/// Escaped marker at the end of a dotted segment.
static ESCAPED_ARITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_T(\.|$)").expect("invalid escaped arity regex"));

/// Display marker at the end of a dotted segment.
static DISPLAY_ARITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<T>(\.|$)").expect("invalid display arity regex"));

/// Raw name to display form (`` List`1 `` → `List<T>`).
#[must_use]
pub fn display_name(raw: &str) -> String {
    RAW_ARITY.replace_all(raw, DISPLAY_MARKER).into_owned()
}

/// Raw name to escaped form (`` List`1 `` → `List_T`).
///
/// Higher arities (`` Map`2 ``) are left raw.
#[must_use]
pub fn escaped_name(raw: &str) -> String {
    RAW_ARITY.replace_all(raw, ESCAPED_MARKER).into_owned()
}

/// Escaped form to display form (`List_T` → `List<T>`).
///
/// Only markers closing a dotted segment are converted, so names such as
/// `My_Type` are left alone.
#[must_use]
pub fn escaped_to_display(escaped: &str) -> String {
    ESCAPED_ARITY
        .replace_all(escaped, "<T>${1}")
        .into_owned()
}

/// Display form back to escaped form (`List<T>` → `List_T`).
#[must_use]
pub fn display_to_escaped(display: &str) -> String {
    DISPLAY_ARITY
        .replace_all(display, "_T${1}")
        .into_owned()
}

/// Entity-escape HTML-sensitive characters for headings and front matter.
#[must_use]
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Trim every line and drop leading and trailing blank lines.
///
/// Interior blank lines are kept and lines are never reordered. Lines inside
/// fenced code blocks keep their indentation.
#[must_use]
pub fn normalize_lines(text: &str) -> Vec<String> {
    let mut in_fence = false;
    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| {
            let trimmed = line.trim();
            let is_fence = trimmed.starts_with("```");
            let kept = if in_fence && !is_fence { line.trim_end() } else { trimmed };
            if is_fence {
                in_fence = !in_fence;
            }
            kept
        })
        .collect();
    let start = lines.iter().position(|l| !l.is_empty());
    let end = lines.iter().rposition(|l| !l.is_empty());
    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].iter().map(|l| (*l).to_owned()).collect(),
        _ => Vec::new(),
    }
}

/// Trim every line of a plain-text block and rejoin with `\n`.
///
/// Blank lines, including leading and trailing ones, are kept.
#[must_use]
pub fn summary_text(text: &str) -> String {
    text.split('\n').map(str::trim).collect::<Vec<_>>().join("\n")
}

/// Remove the indentation shared by all non-blank lines, along with
/// surrounding blank lines and trailing whitespace.
fn dedent(code: &str) -> String {
    let lines: Vec<&str> = code.lines().map(str::trim_end).collect();
    let start = lines.iter().position(|l| !l.is_empty()).unwrap_or(lines.len());
    let end = lines.iter().rposition(|l| !l.is_empty()).map_or(start, |end| end + 1);
    let lines = &lines[start..end];
    let indent = lines
        .iter()
        .filter(|l| !l.is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .map(|l| l.get(indent..).unwrap_or_default())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rewrite the content of a documentation element into Markdown lines.
#[must_use]
pub fn rewrite(node: &XmlNode) -> Vec<String> {
    normalize_lines(&render_content(node))
}

/// Rewrite element content into a single line, joining wrapped lines with spaces.
///
/// Used for table cells, where a newline would break the row.
#[must_use]
pub fn rewrite_inline(node: &XmlNode) -> String {
    rewrite(node)
        .into_iter()
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a code span, widening the fence when the content has backticks.
#[must_use]
pub fn code_span(code: &str) -> String {
    let code = code.trim();
    if code.is_empty() {
        String::new()
    } else if code.contains('`') {
        format!("`` {code} ``")
    } else {
        format!("`{code}`")
    }
}

/// Markdown link for a `cref` target.
///
/// Links point at the owning type's page relative to the current page.
/// Targets that are not valid member identifiers render as code spans.
#[must_use]
pub fn cref_link(cref: &str) -> String {
    match MemberName::parse(cref) {
        Some(name) => format!(
            "[{}](../{}/)",
            escape_html(&display_name(&name.reference_label())),
            escaped_name(name.owning_type())
        ),
        None => code_span(cref.split_once(':').map_or(cref, |(_, rest)| rest)),
    }
}

fn render_content(node: &XmlNode) -> String {
    let mut out = escape_text(&node.text);
    for child in &node.children {
        render_element(child, &mut out);
        out.push_str(&escape_text(&child.tail));
    }
    out
}

fn render_element(node: &XmlNode, out: &mut String) {
    match node.tag.as_str() {
        "see" | "seealso" => render_reference(node, out),
        "paramref" | "typeparamref" => {
            out.push_str(&code_span(node.attr("name").unwrap_or_default()));
        }
        "c" => out.push_str(&code_span(&node.inner_text())),
        "code" => {
            out.push_str("\n```");
            out.push_str(CODE_LANGUAGE);
            out.push('\n');
            out.push_str(&dedent(&node.inner_text()));
            out.push_str("\n```\n");
        }
        "para" => {
            out.push('\n');
            out.push_str(&render_content(node));
            out.push('\n');
        }
        "br" => out.push('\n'),
        "b" | "strong" => wrap(out, "**", &render_content(node)),
        "i" | "em" => wrap(out, "*", &render_content(node)),
        "list" => render_list(node, out),
        _ => out.push_str(&render_content(node)),
    }
}

fn render_reference(node: &XmlNode, out: &mut String) {
    let label = render_content(node);
    let label = label.trim();

    if let Some(word) = node.attr("langword") {
        out.push_str(&code_span(word));
    } else if let Some(href) = node.attr("href") {
        let text = if label.is_empty() { href } else { label };
        let _ = write!(out, "[{text}]({href})");
    } else if let Some(cref) = node.attr("cref") {
        if label.is_empty() {
            out.push_str(&cref_link(cref));
        } else {
            let target = MemberName::parse(cref)
                .map(|name| escaped_name(name.owning_type()));
            match target {
                Some(target) => {
                    let _ = write!(out, "[{label}](../{target}/)");
                }
                None => out.push_str(label),
            }
        }
    } else {
        out.push_str(label);
    }
}

fn render_list(node: &XmlNode, out: &mut String) {
    let numbered = node.attr("type") == Some("number");
    out.push('\n');
    for (index, item) in node.children_named("item").enumerate() {
        let term = item.child("term").map(render_content);
        let description = item
            .child("description")
            .map_or_else(|| render_content(item), render_content);
        let text = match term {
            Some(term) if !term.trim().is_empty() => {
                format!("**{}**: {}", term.trim(), description.trim())
            }
            _ => description.trim().to_owned(),
        };
        if numbered {
            let _ = writeln!(out, "{}. {text}", index + 1);
        } else {
            let _ = writeln!(out, "- {text}");
        }
    }
}

fn wrap(out: &mut String, marker: &str, content: &str) {
    let content = content.trim();
    if !content.is_empty() {
        out.push_str(marker);
        out.push_str(content);
        out.push_str(marker);
    }
}

fn escape_text(text: &str) -> String {
    text.replace('`', "\\`")
}
