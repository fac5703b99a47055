//! Error types for catalog loading and registry operations

use thiserror::Error;

/// Errors that can occur while loading, registering, or reloading catalogs.
///
/// Lookups and translations never produce these; a miss degrades to the key.
#[derive(Error, Debug)]
pub enum I18nError {
    /// Failed to read a catalog source
    #[error("Failed to load resource file: {path}")]
    ResourceLoadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The catalog source was read but could not be parsed
    #[error("Failed to parse catalog {path}: {message}")]
    CatalogParseError { path: String, message: String },

    /// A catalog entry holds a value that cannot be used as a template
    #[error("Unsupported {kind} value for '{key}' in section [{section}] of {path}")]
    UnsupportedValue {
        path: String,
        section: String,
        key: String,
        kind: &'static str,
    },

    /// A catalog is already registered under this language
    #[error("Language {language} is already registered")]
    AlreadyRegistered { language: String },

    /// Reloading a registered catalog failed
    #[error("Failed to reload catalog for {language}: {source}")]
    ReloadError {
        language: String,
        #[source]
        source: Box<I18nError>,
    },

    /// Invalid registry configuration
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Error raised by a caller-provided catalog source
    #[error("{message}")]
    Custom { message: String },
}

impl I18nError {
    /// Create an error for a caller-provided source
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom {
            message: message.into(),
        }
    }

    /// Whether this error reports a duplicate registration
    pub fn is_already_registered(&self) -> bool {
        matches!(self, Self::AlreadyRegistered { .. })
    }
}

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;
