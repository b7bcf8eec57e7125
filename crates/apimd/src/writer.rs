//! Filesystem output for a generated site.

use std::path::{Path, PathBuf};

use apimd_core::{Page, Site};

use crate::error::CliError;

/// Manifest filename, written at the package root.
const MENU_FILENAME: &str = "menu.json";

/// Page filename inside each page directory.
const PAGE_FILENAME: &str = "index.md";

/// Writes pages and the navigation manifest below a package directory.
///
/// Layout:
/// - `<base>/index.md` for the package root page
/// - `<base>/<id>/index.md` for namespace and type pages
/// - `<base>/menu.json` for the manifest
pub(crate) struct SiteWriter {
    base: PathBuf,
}

impl SiteWriter {
    /// Create a writer for `<input_dir>/<destination>/<package_id>`.
    pub(crate) fn new(input_dir: &Path, destination: &str, package_id: &str) -> Self {
        Self {
            base: input_dir.join(destination).join(package_id),
        }
    }

    /// Package directory receiving the output.
    pub(crate) fn base(&self) -> &Path {
        &self.base
    }

    /// Write every page and the manifest. Returns the number of pages written.
    ///
    /// Existing files are overwritten. Files already written stay in place
    /// when a later write fails.
    pub(crate) fn write(&self, site: &Site) -> Result<usize, CliError> {
        let mut count = 0;
        for page in site.pages() {
            self.write_page(page)?;
            count += 1;
        }

        let manifest = serde_json::to_string_pretty(&site.menu)?;
        let path = self.base.join(MENU_FILENAME);
        write_file(&path, &manifest)?;
        tracing::debug!(path = %path.display(), entries = site.menu.pages.len(), "Wrote manifest");

        Ok(count)
    }

    fn write_page(&self, page: &Page) -> Result<(), CliError> {
        let dir = if page.id.is_empty() {
            self.base.clone()
        } else {
            self.base.join(&page.id)
        };
        create_dir(&dir)?;
        let path = dir.join(PAGE_FILENAME);
        write_file(&path, &page.body)?;
        tracing::debug!(path = %path.display(), "Wrote page");
        Ok(())
    }
}

fn create_dir(path: &Path) -> Result<(), CliError> {
    std::fs::create_dir_all(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, content: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        create_dir(parent)?;
    }
    std::fs::write(path, content).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}
