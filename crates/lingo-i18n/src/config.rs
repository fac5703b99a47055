//! Declarative registry configuration
//!
//! ```toml
//! default_language = "en-US"
//!
//! [[locales]]
//! language = "en-US"
//! path = "locales/en-US.toml"
//! ```

use crate::error::{I18nError, I18nResult};
use crate::registry::LocaleRegistry;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// One catalog to register
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleEntry {
    /// Language identifier, matched exactly at lookup time
    pub language: String,
    /// Catalog file, relative to the config's base directory unless absolute
    pub path: PathBuf,
}

/// Which catalogs to load and which language to fall back to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct I18nConfig {
    /// Language consulted when a translation misses
    #[serde(default)]
    pub default_language: Option<String>,
    /// Catalogs, registered in this order
    #[serde(default)]
    pub locales: Vec<LocaleEntry>,
    /// Directory relative catalog paths resolve against
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl I18nConfig {
    /// Parse a configuration document
    pub fn from_toml_str(text: &str) -> I18nResult<Self> {
        toml::from_str(text).map_err(|e| I18nError::ConfigError {
            message: e.to_string(),
        })
    }

    /// Read a configuration file. Relative catalog paths resolve against the
    /// file's directory.
    pub fn load<P: AsRef<Path>>(path: P) -> I18nResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| I18nError::ResourceLoadError {
            path: path.to_string_lossy().to_string(),
            source,
        })?;

        let mut config = Self::from_toml_str(&content)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Check for empty or duplicate language identifiers
    pub fn validate(&self) -> I18nResult<()> {
        if self.default_language.as_deref().is_some_and(str::is_empty) {
            return Err(I18nError::ConfigError {
                message: "default_language must not be empty".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for entry in &self.locales {
            if entry.language.is_empty() {
                return Err(I18nError::ConfigError {
                    message: format!("locale entry for {} has an empty language", entry.path.display()),
                });
            }
            if !seen.insert(entry.language.as_str()) {
                return Err(I18nError::ConfigError {
                    message: format!("language {} is listed more than once", entry.language),
                });
            }
        }

        if let Some(default) = &self.default_language {
            if !seen.contains(default.as_str()) {
                warn!("Default language {} has no configured catalog", default);
            }
        }
        Ok(())
    }

    /// Where `entry`'s catalog file lives
    pub fn resolve_path(&self, entry: &LocaleEntry) -> PathBuf {
        match &self.base_dir {
            Some(base) if entry.path.is_relative() => base.join(&entry.path),
            _ => entry.path.clone(),
        }
    }
}

impl LocaleRegistry {
    /// Build a registry from `config`, registering catalogs in order.
    ///
    /// The first catalog that fails to load aborts construction.
    pub fn from_config(config: &I18nConfig) -> I18nResult<Self> {
        config.validate()?;

        let registry = Self::new();
        for entry in &config.locales {
            registry.register_file(&entry.language, config.resolve_path(entry))?;
        }
        registry.set_default_language(config.default_language.as_deref());

        info!(
            "Initialized registry with {} languages, default {:?}",
            config.locales.len(),
            config.default_language
        );
        Ok(registry)
    }
}
