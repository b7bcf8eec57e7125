//! Navigation manifest (`menu.json`) assembly.
//!
//! Pages register `(logical id, route)` pairs with a [`Navigation`]
//! accumulator. Accumulators built independently (one per rendered group)
//! are merged, and the final [`Menu`] is ordered by route, so the result
//! never depends on the order in which pages were produced.
//!
//! # Example
//!
//! ```
//! use apimd_core::navigation::Navigation;
//!
//! let mut nav = Navigation::new("docs", "acme");
//! nav.add_root("Descripción");
//! nav.add_type("Acme.Widget");
//!
//! let menu = nav.into_menu("Acme");
//! assert_eq!(menu.path, "/docs/acme/");
//! assert_eq!(menu.pages[1].path, "/docs/acme/Acme.Widget/");
//! ```

use serde::Serialize;

use crate::markup::escaped_to_display;

/// Trailing segment marking a namespace summary entry.
const NAMESPACE_SEGMENT: &str = "namespace";

/// One manifest entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    /// Display title.
    pub title: String,
    /// Root-relative route.
    pub path: String,
}

/// Manifest root serialized to `menu.json`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Menu {
    /// Package title.
    pub title: String,
    /// Package root route.
    pub path: String,
    /// Entries ordered by `path`.
    pub pages: Vec<NavEntry>,
}

/// Accumulator of navigation entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    base: String,
    entries: Vec<NavEntry>,
}

impl Navigation {
    /// Create an empty accumulator for pages published under
    /// `/<destination>/<package_id>/`.
    #[must_use]
    pub fn new(destination: &str, package_id: &str) -> Self {
        Self {
            base: base_route(destination, package_id),
            entries: Vec::new(),
        }
    }

    /// Register the package root page.
    pub fn add_root(&mut self, title: &str) {
        self.entries.push(NavEntry {
            title: title.to_owned(),
            path: self.base.clone(),
        });
    }

    /// Register a namespace page by its [`namespace_id`].
    pub fn add_namespace(&mut self, id: &str) {
        self.add_page(id);
    }

    /// Register a type page by its escaped logical id.
    pub fn add_type(&mut self, logical_id: &str) {
        self.add_page(logical_id);
    }

    fn add_page(&mut self, id: &str) {
        self.entries.push(NavEntry {
            title: entry_title(id),
            path: format!("{}{id}/", self.base),
        });
    }

    /// Move all entries of `other` into this accumulator.
    pub fn merge(&mut self, other: Navigation) {
        self.entries.extend(other.entries);
    }

    /// Build the manifest, ordering entries by route.
    ///
    /// Entries registered twice under the same route are kept once.
    #[must_use]
    pub fn into_menu(self, title: &str) -> Menu {
        let mut pages = self.entries;
        pages.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.title.cmp(&b.title)));
        pages.dedup_by(|a, b| a.path == b.path);

        Menu {
            title: title.to_owned(),
            path: self.base,
            pages,
        }
    }
}

/// Root route for a destination folder and package id.
///
/// Slashes around the destination are normalized, so `docs`, `/docs/` and
/// `docs/` all give `/docs/<package_id>/`.
#[must_use]
pub fn base_route(destination: &str, package_id: &str) -> String {
    let destination = destination.trim_matches('/');
    if destination.is_empty() {
        format!("/{package_id}/")
    } else {
        format!("/{destination}/{package_id}/")
    }
}

/// Route segment for a namespace marker's owning type.
///
/// Strips a trailing `namespace` segment (case-insensitive) and lower-cases
/// the rest: `Acme.Tools.Namespace` → `acme.tools`.
#[must_use]
pub fn namespace_id(owning_type: &str) -> String {
    let id = match owning_type.rsplit_once('.') {
        Some((head, last)) if last.eq_ignore_ascii_case(NAMESPACE_SEGMENT) => head,
        _ => owning_type,
    };
    id.to_lowercase()
}

/// Manifest title: last dotted segment in display form.
#[must_use]
pub fn entry_title(logical_id: &str) -> String {
    let last = logical_id.rsplit('.').next().unwrap_or(logical_id);
    escaped_to_display(last)
}
