//! Markdown page rendering.
//!
//! Every renderer here is a pure function from model to page text; writing
//! pages to disk is left to the caller.

use std::fmt::Write;

use crate::group::Group;
use crate::kind::Kind;
use crate::labels::Labels;
use crate::markup::{display_name, escape_html, escaped_name, summary_text};
use crate::member::Member;
use crate::navigation::namespace_id;

const NUGET_LOGO: &str = "https://logos.trifenix.io/nuget.24x24.png";
const GITHUB_LOGO: &str = "https://logos.trifenix.io/github.24x24.png";

/// One rendered Markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Logical id: output folder name and navigation key. Empty for the
    /// package root page.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Markdown body.
    pub body: String,
}

/// Package information shown on the root page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Package {
    pub title: String,
    pub id: String,
    pub description: String,
    pub summary: String,
    pub icon_url: Option<String>,
    pub nuget_url: Option<String>,
    pub devops_url: Option<String>,
    pub repository_url: Option<String>,
    pub release_badge_url: Option<String>,
}

/// Rendering options shared by all pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Language list passed to the code-block component.
    pub code_language: String,
    pub labels: Labels,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            code_language: "C#".to_owned(),
            labels: Labels::default(),
        }
    }
}

/// Render the page for a type group.
///
/// Returns `None` when the group has no page member (see
/// [`Group::page_member`]). Sections without members show their
/// placeholder instead of being omitted.
#[must_use]
pub fn render_type_page(group: &Group, options: &RenderOptions) -> Option<Page> {
    let ty = group.page_member()?;
    let labels = &options.labels;
    let signature = &ty.short_name;
    let heading = escape_html(signature);

    let mut body = front_matter(&heading, &escape_html(&display_name(ty.owning_type())));
    let _ = write!(
        body,
        "# {heading}\n\n\
         <CodeBlock slots = 'heading, code' repeat = '1' languages = '{}' />\n\n\
         #### {}\n```\n{signature}\n```\n\n",
        options.code_language, labels.class
    );
    push_section(&mut body, &labels.description, &ty.summary.join("\n"), "");

    let sections = [
        (Kind::Constructor, &labels.constructors, &labels.no_constructors),
        (Kind::Method, &labels.functions, &labels.no_functions),
        (Kind::Property, &labels.properties, &labels.no_properties),
        (Kind::Constant, &labels.constants, &labels.no_constants),
    ];
    for (kind, title, placeholder) in sections {
        let content = render_members(group.members_of(kind), labels);
        push_section(&mut body, title, &content, placeholder);
    }

    Some(Page {
        id: escaped_name(ty.owning_type()),
        title: signature.clone(),
        body,
    })
}

/// Render the summary page of a namespace marker entry.
#[must_use]
pub fn render_namespace_page(marker: &Member, options: &RenderOptions) -> Page {
    let id = namespace_id(marker.owning_type());
    let title = id.rsplit('.').next().unwrap_or(&id).to_owned();

    let mut body = front_matter(&escape_html(&title), &escape_html(&id));
    let _ = write!(
        body,
        "# {}\n\n{}\n",
        options.labels.namespace_description,
        marker.summary.join("\n")
    );

    Page { id, title, body }
}

/// Render the package root page.
#[must_use]
pub fn render_package_page(package: &Package, options: &RenderOptions) -> Page {
    let labels = &options.labels;
    let title = escape_html(&package.title);

    let mut body = front_matter(&format!("package {title}"), &package.description);
    match &package.icon_url {
        Some(icon) => {
            let _ = writeln!(body, "# ![icon_package]({icon}){title}");
        }
        None => {
            let _ = writeln!(body, "# {title}");
        }
    }
    let _ = write!(
        body,
        "\n{}\n\n## {}\n\n### {title}\n\n{}\n\n",
        package.description.trim(),
        labels.description,
        summary_text(&package.summary)
    );

    let sources = [
        ("nuget", NUGET_LOGO, &labels.nuget_package, &package.nuget_url),
        ("nuget", NUGET_LOGO, &labels.devops_package, &package.devops_url),
        ("github", GITHUB_LOGO, &labels.source_code, &package.repository_url),
    ];
    if sources.iter().any(|(.., url)| url.is_some()) {
        let _ = write!(body, "| {} | {} |\n|---|---|\n", labels.source_kind, labels.source);
        for (alt, logo, label, url) in sources {
            if let Some(url) = url {
                let _ = writeln!(body, "|![{alt}]({logo}) | [{label}]({url})|");
            }
        }
    }
    if let Some(badge) = package.release_badge_url.as_deref().filter(|b| !b.trim().is_empty()) {
        let _ = write!(body, "\n![release badge]({badge})\n");
    }

    Page {
        id: String::new(),
        title: package.title.clone(),
        body,
    }
}

fn front_matter(title: &str, description: &str) -> String {
    format!("---\ntitle : {title}\ndescription: {description}\n---\n\n\n")
}

fn render_members<'a>(members: impl Iterator<Item = &'a Member>, labels: &Labels) -> String {
    members
        .flat_map(|m| m.rendered_lines(labels))
        .collect::<Vec<_>>()
        .join("\n")
}

fn push_section(body: &mut String, title: &str, content: &str, placeholder: &str) {
    let content = content.trim_end();
    let content = if content.trim().is_empty() { placeholder } else { content };
    let _ = write!(body, "## {title}\n\n{content}\n\n");
}
