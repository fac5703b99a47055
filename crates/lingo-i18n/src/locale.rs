//! Language-bound translation handle

use crate::args::Arg;
use crate::registry::LocaleRegistry;

/// A registry view fixed to one language.
///
/// Holds no catalog data of its own; every call resolves through the registry,
/// so registrations and reloads made later are visible immediately.
#[derive(Debug, Clone)]
pub struct Locale<'a> {
    registry: &'a LocaleRegistry,
    language: String,
}

impl<'a> Locale<'a> {
    /// Bind `language` to `registry`
    pub fn new(registry: &'a LocaleRegistry, language: impl Into<String>) -> Self {
        Self {
            registry,
            language: language.into(),
        }
    }

    /// The bound language identifier
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Whether the bound language currently has a catalog
    pub fn is_registered(&self) -> bool {
        self.registry.is_registered(&self.language)
    }

    /// Same as [`LocaleRegistry::translate`] with the bound language
    pub fn translate(&self, key: &str, args: &[Arg]) -> String {
        self.registry.translate(&self.language, key, args)
    }

    /// Same as [`LocaleRegistry::translate_section`] with the bound language
    pub fn translate_section(&self, section: &str, key: &str, args: &[Arg]) -> String {
        self.registry.translate_section(&self.language, section, key, args)
    }
}
