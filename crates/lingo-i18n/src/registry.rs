//! Registry of loaded catalogs and the translation entry points

use crate::args::{flatten, Arg};
use crate::catalog::{Catalog, CatalogSource, FileSource};
use crate::error::{I18nError, I18nResult};
use crate::format::format_params;
use crate::locale::Locale;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct RegistryState {
    /// Registration order
    languages: Vec<String>,
    catalogs: HashMap<String, Catalog>,
    default_language: Option<String>,
}

impl RegistryState {
    fn get(&self, language: &str, section: &str, key: &str) -> Option<&str> {
        self.catalogs.get(language)?.get(section, key)
    }
}

/// Holds one catalog per language and translates keys against them.
///
/// Reads (lookups, translations, listings) share a read lock; registration,
/// reloads and default-language changes take the write lock.
#[derive(Debug, Default)]
pub struct LocaleRegistry {
    state: RwLock<RegistryState>,
}

/// Split `section.key` at the first `.`; keys without one use the default section.
fn split_key(key: &str) -> (&str, &str) {
    key.split_once('.').unwrap_or(("", key))
}

impl LocaleRegistry {
    /// Create an empty registry without a default language
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry that falls back to `language` on misses
    pub fn with_default_language(language: impl Into<String>) -> Self {
        let registry = Self::new();
        registry.state.write().default_language = Some(language.into());
        registry
    }

    /// Set or clear the language consulted when a translation misses.
    ///
    /// The language does not have to be registered yet.
    pub fn set_default_language(&self, language: Option<&str>) {
        let mut state = self.state.write();
        state.default_language = language.map(str::to_string);
        debug!("Default language set to {:?}", state.default_language);
    }

    /// The configured default language, if any
    pub fn default_language(&self) -> Option<String> {
        self.state.read().default_language.clone()
    }

    /// Load a catalog from `source` and register it under `language`.
    ///
    /// Load errors are returned as-is. A language can only be registered
    /// once; later attempts fail with [`I18nError::AlreadyRegistered`] and
    /// leave the existing catalog untouched.
    pub fn register<S>(&self, language: &str, source: S) -> I18nResult<()>
    where
        S: CatalogSource + 'static,
    {
        let catalog = Catalog::load(language, Box::new(source))?;

        let mut state = self.state.write();
        if state.catalogs.contains_key(language) {
            warn!("Language {} is already registered, keeping the existing catalog", language);
            return Err(I18nError::AlreadyRegistered {
                language: language.to_string(),
            });
        }
        state.languages.push(language.to_string());
        state.catalogs.insert(language.to_string(), catalog);

        info!("Registered language: {}", language);
        Ok(())
    }

    /// Register a TOML catalog file under `language`
    pub fn register_file<P: AsRef<Path>>(&self, language: &str, path: P) -> I18nResult<()> {
        self.register(language, FileSource::new(path))
    }

    /// Whether a catalog is registered under `language`
    pub fn is_registered(&self, language: &str) -> bool {
        self.state.read().catalogs.contains_key(language)
    }

    /// Registered languages in registration order
    pub fn languages(&self) -> Vec<String> {
        self.state.read().languages.clone()
    }

    /// Reload the named languages, or every registered one when `languages`
    /// is empty.
    ///
    /// Unknown names are skipped. The first failure stops the pass; catalogs
    /// reloaded before it keep their new contents and the failing one keeps
    /// its previous contents.
    pub fn reload(&self, languages: &[&str]) -> I18nResult<()> {
        let mut state = self.state.write();
        let RegistryState {
            languages: registered,
            catalogs,
            ..
        } = &mut *state;

        let targets: Vec<&str> = if languages.is_empty() {
            registered.iter().map(String::as_str).collect()
        } else {
            languages.to_vec()
        };

        for language in targets {
            let Some(catalog) = catalogs.get_mut(language) else {
                debug!("Skipping reload of unregistered language: {}", language);
                continue;
            };
            if let Err(e) = catalog.reload() {
                warn!("Failed to reload catalog for {}: {}", language, e);
                return Err(I18nError::ReloadError {
                    language: language.to_string(),
                    source: Box::new(e),
                });
            }
        }
        Ok(())
    }

    /// Reload every registered language
    pub fn reload_all(&self) -> I18nResult<()> {
        self.reload(&[])
    }

    /// Exact lookup of `section`/`key` in `language`'s catalog.
    ///
    /// An empty `section` means the default section. No fallback of any kind
    /// is applied here.
    pub fn lookup(&self, language: &str, section: &str, key: &str) -> Option<String> {
        self.state.read().get(language, section, key).map(str::to_string)
    }

    fn resolve(&self, language: &str, section: &str, key: &str) -> Option<String> {
        let state = self.state.read();
        if let Some(value) = state.get(language, section, key) {
            return Some(value.to_string());
        }

        let default = state.default_language.as_deref().filter(|d| *d != language)?;
        let value = state.get(default, section, key)?;
        debug!(
            "Message [{}] {} not found for {}, using default language {}",
            section, key, language, default
        );
        Some(value.to_string())
    }

    /// Translate `key` into `language`.
    ///
    /// `key` may carry a section prefix (`"greeting.hello"`). A miss yields
    /// the whole `key` as passed, section prefix included, not just the part
    /// after the first dot. With no `args` the template is returned untouched;
    /// otherwise the arguments are flattened (nil dropped, lists spread) and
    /// substituted printf-style.
    pub fn translate(&self, language: &str, key: &str, args: &[Arg]) -> String {
        let (section, name) = split_key(key);
        let template = self.resolve(language, section, name);
        Self::render(template, key, args)
    }

    /// Translate `key` from an explicit `section`, without splitting the key
    pub fn translate_section(&self, language: &str, section: &str, key: &str, args: &[Arg]) -> String {
        let template = self.resolve(language, section, key);
        Self::render(template, key, args)
    }

    fn render(template: Option<String>, fallback: &str, args: &[Arg]) -> String {
        let template = template.unwrap_or_else(|| fallback.to_string());
        if args.is_empty() {
            return template;
        }
        format_params(&template, &flatten(args))
    }

    /// A view bound to `language`
    pub fn locale(&self, language: impl Into<String>) -> Locale<'_> {
        Locale::new(self, language)
    }
}
