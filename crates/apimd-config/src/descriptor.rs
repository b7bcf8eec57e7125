//! Project descriptor loading.
//!
//! The package title, id and links come from the `.csproj` that sits next to
//! the documentation export and shares its file stem.

use std::path::{Path, PathBuf};

use apimd_core::Package;
use apimd_core::xml::{self, XmlNode};

use crate::{ConfigError, read_file, require_http_url, require_non_empty};

/// Path of the project descriptor for a documentation export.
///
/// `bin/Acme.Widgets.xml` maps to `bin/Acme.Widgets.csproj`.
#[must_use]
pub fn descriptor_path(xml_path: &Path) -> PathBuf {
    xml_path.with_extension("csproj")
}

/// Read and parse the project descriptor at `path`.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` when the file is missing, and the errors
/// of [`parse_descriptor`] otherwise.
pub fn load_descriptor(path: &Path) -> Result<Package, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let content = read_file(path)?;
    let package = parse_descriptor(&content)?;
    tracing::debug!(path = %path.display(), id = %package.id, "Loaded project descriptor");
    Ok(package)
}

/// Parse package metadata from project descriptor XML.
///
/// Fields are read from the `PropertyGroup` children of the root element.
/// When a field appears in several groups the first one wins.
///
/// # Errors
///
/// Returns `ConfigError::Descriptor` for malformed XML and
/// `ConfigError::Validation` when `title` or `id` is missing, the id is not
/// a single path segment, or a link is not an http(s) URL.
pub fn parse_descriptor(xml: &str) -> Result<Package, ConfigError> {
    let root = xml::parse(xml)?;
    let groups: Vec<&XmlNode> = root.children_named("PropertyGroup").collect();
    let field = |name: &str| -> Option<String> {
        groups
            .iter()
            .find_map(|group| group.child(name))
            .map(|node| node.inner_text().trim().to_owned())
            .filter(|value| !value.is_empty())
    };

    let title = field("title").unwrap_or_default();
    require_non_empty(&title, "title")?;
    let id = field("id").unwrap_or_default();
    require_non_empty(&id, "id")?;
    if id.contains(['/', '\\']) || id == "." || id == ".." {
        return Err(ConfigError::Validation(format!(
            "id must be a single path segment, got {id:?}"
        )));
    }

    let url = |name: &str| -> Result<Option<String>, ConfigError> {
        let value = field(name);
        if let Some(url) = &value {
            require_http_url(url, name)?;
        }
        Ok(value)
    };

    Ok(Package {
        description: field("description").unwrap_or_default(),
        summary: field("summary").unwrap_or_default(),
        icon_url: url("iconUrl")?,
        nuget_url: url("nugetUrl")?,
        devops_url: url("devopsUrl")?,
        repository_url: url("RepositoryUrl")?,
        release_badge_url: url("releaseBadgeUrl")?,
        title,
        id,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const PROJECT: &str = r#"<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup>
    <TargetFramework>net8.0</TargetFramework>
    <title>Acme Widgets</title>
    <id>acme-widgets</id>
    <description>Widgets for everyone.</description>
    <summary>
      Widgets, gadgets
      and gizmos.
    </summary>
    <iconUrl>https://example.com/icon.png</iconUrl>
    <nugetUrl>https://www.nuget.org/packages/Acme.Widgets</nugetUrl>
    <RepositoryUrl>https://github.com/acme/widgets</RepositoryUrl>
  </PropertyGroup>
</Project>"#;

    #[test]
    fn test_descriptor_path() {
        assert_eq!(
            descriptor_path(Path::new("bin/Release/Acme.Widgets.xml")),
            PathBuf::from("bin/Release/Acme.Widgets.csproj")
        );
    }

    #[test]
    fn test_parse_descriptor() {
        let package = parse_descriptor(PROJECT).unwrap();

        assert_eq!(
            package,
            Package {
                title: "Acme Widgets".to_owned(),
                id: "acme-widgets".to_owned(),
                description: "Widgets for everyone.".to_owned(),
                summary: "Widgets, gadgets\n      and gizmos.".to_owned(),
                icon_url: Some("https://example.com/icon.png".to_owned()),
                nuget_url: Some("https://www.nuget.org/packages/Acme.Widgets".to_owned()),
                devops_url: None,
                repository_url: Some("https://github.com/acme/widgets".to_owned()),
                release_badge_url: None,
            }
        );
    }

    #[test]
    fn test_first_property_group_wins() {
        let xml = r"<Project>
  <PropertyGroup><title>First</title></PropertyGroup>
  <PropertyGroup><title>Second</title><id>pkg</id></PropertyGroup>
</Project>";

        let package = parse_descriptor(xml).unwrap();

        assert_eq!(package.title, "First");
        assert_eq!(package.id, "pkg");
    }

    #[test]
    fn test_missing_title() {
        let xml = "<Project><PropertyGroup><id>pkg</id></PropertyGroup></Project>";

        let err = parse_descriptor(xml).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn test_blank_id() {
        let xml = "<Project><PropertyGroup><title>T</title><id>  </id></PropertyGroup></Project>";

        assert!(parse_descriptor(xml).is_err());
    }

    #[test]
    fn test_id_with_separator_rejected() {
        let xml = "<Project><PropertyGroup><title>T</title><id>a/b</id></PropertyGroup></Project>";

        let err = parse_descriptor(xml).unwrap_err();

        assert!(err.to_string().contains("single path segment"));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let xml = "<Project><PropertyGroup><title>T</title><id>p</id>\
                   <nugetUrl>nuget.org/p</nugetUrl></PropertyGroup></Project>";

        let err = parse_descriptor(xml).unwrap_err();

        assert!(err.to_string().contains("nugetUrl"));
    }

    #[test]
    fn test_empty_url_is_absent() {
        let xml = "<Project><PropertyGroup><title>T</title><id>p</id>\
                   <devopsUrl></devopsUrl></PropertyGroup></Project>";

        let package = parse_descriptor(xml).unwrap();

        assert_eq!(package.devops_url, None);
    }

    #[test]
    fn test_malformed_xml() {
        let err = parse_descriptor("<Project><PropertyGroup></Project>").unwrap_err();

        assert!(matches!(err, ConfigError::Descriptor(_)));
    }

    #[test]
    fn test_load_descriptor_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        let err = load_descriptor(&dir.path().join("Acme.csproj")).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_descriptor_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Acme.Widgets.csproj");
        std::fs::write(&path, PROJECT).unwrap();

        let package = load_descriptor(&path).unwrap();

        assert_eq!(package.id, "acme-widgets");
    }
}
