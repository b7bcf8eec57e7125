//! Configuration management for apimd.
//!
//! Parses optional `apimd.toml` configuration files with serde and provides
//! auto-discovery of config files in the input file's directory and its
//! parents. CLI settings can be applied during load via [`CliSettings`].
//!
//! The project descriptor (package title, id, URLs) is read separately from
//! the `.csproj` next to the documentation export; see [`load_descriptor`].

mod descriptor;

use std::path::{Path, PathBuf};

use apimd_core::{Labels, RenderOptions, SiteOptions};
use serde::Deserialize;

pub use descriptor::{descriptor_path, load_descriptor, parse_descriptor};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override destination folder.
    pub destination: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "apimd.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output configuration.
    pub output: OutputConfig,
    /// Localized page strings.
    pub labels: Labels,
}

/// Output configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Folder, relative to the input file, that receives the generated site.
    /// Also the first segment of every route.
    pub destination: String,
    /// Language list passed to the code-block component on type pages.
    pub code_language: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            destination: "docs".to_owned(),
            code_language: "C#".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Project descriptor is not well-formed XML.
    #[error("Project descriptor error: {0}")]
    Descriptor(#[from] apimd_core::DocumentError),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
pub(crate) fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
pub(crate) fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

/// Read a file, attaching its path to I/O errors.
pub(crate) fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl Config {
    /// Load configuration with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `apimd.toml` in `search_from` and its parents, falling back to
    /// defaults when none is found.
    ///
    /// CLI settings are applied after loading, so CLI arguments take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        search_from: &Path,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config(search_from) {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(destination) = &settings.destination {
            self.output.destination.clone_from(destination);
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = if start.as_os_str().is_empty() {
            std::env::current_dir().ok()?
        } else {
            start.to_path_buf()
        };
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = read_file(path)?;
        let config: Self = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.output.destination, "output.destination")?;
        require_non_empty(&self.output.code_language, "output.code_language")?;

        let escapes = Path::new(&self.output.destination)
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir));
        if escapes || Path::new(&self.output.destination).is_absolute() {
            return Err(ConfigError::Validation(
                "output.destination must be a relative path inside the input directory"
                    .to_owned(),
            ));
        }

        Ok(())
    }

    /// Site generation options for this configuration.
    #[must_use]
    pub fn site_options(&self) -> SiteOptions {
        SiteOptions {
            destination: self.output.destination.clone(),
            render: RenderOptions {
                code_language: self.output.code_language.clone(),
                labels: self.labels.clone(),
            },
        }
    }
}
