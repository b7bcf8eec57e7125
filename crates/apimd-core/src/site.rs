//! Whole-site generation from a documentation export.

use rayon::prelude::*;

use crate::document::ApiDocument;
use crate::group::group_by_owning_type;
use crate::member::parse_members;
use crate::navigation::{Menu, Navigation};
use crate::page::{
    Package, Page, RenderOptions, render_namespace_page, render_package_page, render_type_page,
};

/// Options for site generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOptions {
    /// Destination folder, used as the first route segment.
    pub destination: String,
    pub render: RenderOptions,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            destination: "docs".to_owned(),
            render: RenderOptions::default(),
        }
    }
}

/// Generated pages and navigation manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    pub package_page: Page,
    pub namespace_pages: Vec<Page>,
    pub type_pages: Vec<Page>,
    pub menu: Menu,
}

impl Site {
    /// All pages: package root, namespaces, then types.
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        std::iter::once(&self.package_page)
            .chain(&self.namespace_pages)
            .chain(&self.type_pages)
    }
}

/// Generate every page of a package.
///
/// Type groups are rendered in parallel; each produces its own
/// [`Navigation`] which is merged afterwards, so page order and manifest
/// order are deterministic.
#[must_use]
pub fn generate_site(document: &ApiDocument, package: &Package, options: &SiteOptions) -> Site {
    let render = &options.render;
    let mut navigation = Navigation::new(&options.destination, &package.id);

    let package_page = render_package_page(package, render);
    navigation.add_root(&render.labels.description);

    let members = parse_members(document);
    tracing::debug!(
        entries = document.entries.len(),
        members = members.len(),
        "Parsed documentation entries"
    );

    let namespace_pages: Vec<Page> = members
        .iter()
        .filter(|m| m.is_namespace_marker())
        .map(|m| render_namespace_page(m, render))
        .collect();
    for page in &namespace_pages {
        navigation.add_namespace(&page.id);
    }

    let groups = group_by_owning_type(members);
    let rendered: Vec<(Page, Navigation)> = groups
        .par_iter()
        .filter_map(|group| {
            let Some(page) = render_type_page(group, render) else {
                tracing::debug!(group = %group.key, "Skipping group without type entry");
                return None;
            };
            let mut nav = Navigation::new(&options.destination, &package.id);
            nav.add_type(&page.id);
            Some((page, nav))
        })
        .collect();

    let mut type_pages = Vec::with_capacity(rendered.len());
    for (page, nav) in rendered {
        navigation.merge(nav);
        type_pages.push(page);
    }

    tracing::info!(
        package = %package.id,
        namespaces = namespace_pages.len(),
        types = type_pages.len(),
        "Generated documentation site"
    );

    Site {
        package_page,
        namespace_pages,
        type_pages,
        menu: navigation.into_menu(&package.title),
    }
}
