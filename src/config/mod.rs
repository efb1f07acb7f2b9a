//! Configuration for `notegraph.toml`.
//!
//! | Section     | Purpose                                        |
//! |-------------|------------------------------------------------|
//! | `[content]` | Content directory and indexed file extensions  |
//! | `[links]`   | Link resolution options                        |

mod error;
mod util;

pub use error::ConfigError;
use util::find_config_file;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::graph::DEFAULT_EXTENSIONS;
use crate::log;

/// Default config file name.
pub const CONFIG_FILE: &str = "notegraph.toml";

/// Root configuration structure representing notegraph.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Directory relative paths are resolved against: the config file's parent
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub content: ContentConfig,

    #[serde(default)]
    pub links: LinksConfig,
}

/// `[content]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Content directory, relative to the config file.
    pub dir: PathBuf,
    /// File extensions indexed as documents and stripped from routes.
    pub extensions: Vec<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("content"),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// `[links]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// Keep links from a document to itself as edges.
    pub self_links: bool,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self { self_links: true }
    }
}

impl Config {
    /// Load configuration, searching upward from the working directory.
    ///
    /// A missing file yields defaults rooted at the working directory.
    /// `content_dir` overrides `[content].dir` and is taken relative to the
    /// working directory.
    pub fn load(config_name: &Path, content_dir: Option<&Path>) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(config_name, &cwd) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or_else(|| cwd.clone());
                config.config_path = path;
                config
            }
            None => {
                crate::debug!("config"; "{} not found, using defaults", config_name.display());
                Self {
                    config_path: cwd.join(config_name),
                    root: cwd.clone(),
                    ..Self::default()
                }
            }
        };

        if let Some(dir) = content_dir {
            config.content.dir = cwd.join(dir);
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.content.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "[content].extensions must list at least one extension".into(),
            ));
        }
        if let Some(ext) = self
            .content
            .extensions
            .iter()
            .find(|ext| ext.is_empty() || ext.contains(['.', '/', '\\']))
        {
            return Err(ConfigError::Validation(format!(
                "[content].extensions: `{ext}` is not a bare extension (write `md`, not `.md`)"
            )));
        }
        Ok(())
    }

    /// Absolute content directory.
    pub fn content_dir(&self) -> PathBuf {
        self.root.join(&self.content.dir)
    }
}

/// Parse a test config, failing on unknown fields.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> Config {
    let (parsed, ignored) = Config::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.content.dir, PathBuf::from("content"));
        assert_eq!(config.content.extensions, ["md", "mdx"]);
        assert!(config.links.self_links);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_config() {
        let config = test_parse_config(
            r#"
[content]
dir = "notes"
extensions = ["md"]

[links]
self_links = false
"#,
        );
        assert_eq!(config.content.dir, PathBuf::from("notes"));
        assert_eq!(config.content.extensions, ["md"]);
        assert!(!config.links.self_links);
    }

    #[test]
    fn test_from_str_invalid_toml() {
        assert!(Config::from_str("[content\ndir = ").is_err());
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[content]\ndir = \"x\"\nunknown_key = 1\n\n[unknown_section]\na = 1\n";
        let (config, ignored) = Config::parse_with_ignored(content).unwrap();
        assert_eq!(config.content.dir, PathBuf::from("x"));
        assert!(ignored.iter().any(|f| f.contains("unknown_key")));
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_validation() {
        let mut config = test_parse_config("[content]\nextensions = []\n");
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        config.content.extensions = vec![".md".into()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_content_dir_relative_to_root() {
        let mut config = test_parse_config("");
        config.root = PathBuf::from("/site");
        assert_eq!(config.content_dir(), PathBuf::from("/site/content"));

        config.content.dir = PathBuf::from("/elsewhere");
        assert_eq!(config.content_dir(), PathBuf::from("/elsewhere"));
    }
}
