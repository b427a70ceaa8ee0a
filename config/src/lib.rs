//! Configuration loading for CleverDict.
//!
//! The config file is TOML with a single `[dict]` table:
//!
//! ```toml
//! [dict]
//! identifiers = "unicode"   # or "ascii"
//! aliases = "explicit"      # or "normalise"
//! ```
//!
//! Every field is optional. Missing fields fall back to [`DictOptions`]
//! defaults.

use std::path::{Path, PathBuf};

use cleverdict_types::{AliasPolicy, DictOptions, IdentifierPolicy};
use serde::Deserialize;
use thiserror::Error;

/// Environment variable that overrides the default config path.
pub const CONFIG_ENV: &str = "CLEVERDICT_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown {field} policy {value:?}")]
    UnknownPolicy { field: &'static str, value: String },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigError::Read { path, .. } => Some(path),
            ConfigError::Parse(_) | ConfigError::UnknownPolicy { .. } => None,
        }
    }
}

/// Raw config file contents.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DictConfig {
    pub dict: Option<DictSection>,
}

/// The `[dict]` table.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DictSection {
    pub identifiers: Option<String>,
    pub aliases: Option<String>,
}

impl DictConfig {
    /// Parse and validate config text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.options()?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load the config from [`DictConfig::path`].
    #[must_use]
    pub fn load() -> Option<Self> {
        Self::load_at(&Self::path()?)
    }

    /// Load the config at `path`.
    ///
    /// Returns `None` when there is no file there. A file that cannot be
    /// read or parsed is logged and also treated as absent.
    #[must_use]
    pub fn load_at(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        match Self::load_from(path) {
            Ok(config) => Some(config),
            Err(err) => {
                tracing::warn!("Ignoring config at {:?}: {}", path, err);
                None
            }
        }
    }

    /// `$CLEVERDICT_CONFIG` if set, else `~/.cleverdict/config.toml`.
    #[must_use]
    pub fn path() -> Option<PathBuf> {
        resolve_path(std::env::var_os(CONFIG_ENV).map(PathBuf::from))
    }

    /// Resolve the raw fields into options.
    pub fn options(&self) -> Result<DictOptions, ConfigError> {
        let Some(section) = &self.dict else {
            return Ok(DictOptions::default());
        };
        let mut options = DictOptions::default();
        if let Some(value) = &section.identifiers {
            let policy =
                IdentifierPolicy::parse(value).ok_or_else(|| ConfigError::UnknownPolicy {
                    field: "identifiers",
                    value: value.clone(),
                })?;
            options = options.with_identifiers(policy);
        }
        if let Some(value) = &section.aliases {
            let policy = AliasPolicy::parse(value).ok_or_else(|| ConfigError::UnknownPolicy {
                field: "aliases",
                value: value.clone(),
            })?;
            options = options.with_aliases(policy);
        }
        Ok(options)
    }
}

/// Options from the user's config file, or defaults when there is none.
#[must_use]
pub fn load_options() -> DictOptions {
    DictConfig::path()
        .map(|path| load_options_at(&path))
        .unwrap_or_default()
}

/// Options from the config at `path`, or defaults when it is missing or
/// unusable.
#[must_use]
pub fn load_options_at(path: &Path) -> DictOptions {
    DictConfig::load_at(path)
        .and_then(|config| config.options().ok())
        .unwrap_or_default()
}

fn resolve_path(override_path: Option<PathBuf>) -> Option<PathBuf> {
    override_path
        .filter(|path| !path.as_os_str().is_empty())
        .or_else(|| dirs::home_dir().map(|home| home.join(".cleverdict").join("config.toml")))
}
