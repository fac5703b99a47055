//! Message catalogs and the sources they are loaded from

use crate::error::{I18nError, I18nResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use toml::Value;
use tracing::{debug, info};

/// Name of the section holding keys that are not inside any named section.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Two-level message table: section → key → template.
///
/// The default section always exists, even when it is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTable {
    sections: HashMap<String, HashMap<String, String>>,
}

impl Default for MessageTable {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageTable {
    /// Create a table containing only an empty default section
    pub fn new() -> Self {
        let mut sections = HashMap::new();
        sections.insert(DEFAULT_SECTION.to_string(), HashMap::new());
        Self { sections }
    }

    fn section_name(section: &str) -> &str {
        if section.is_empty() {
            DEFAULT_SECTION
        } else {
            section
        }
    }

    /// Insert a template. An empty section name targets the default section.
    pub fn insert(&mut self, section: &str, key: impl Into<String>, value: impl Into<String>) {
        self.sections
            .entry(Self::section_name(section).to_string())
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Look up a template. An empty section name targets the default section.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(Self::section_name(section))
            .and_then(|entries| entries.get(key))
            .map(String::as_str)
    }

    /// Whether a section with this name exists
    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(Self::section_name(section))
    }

    /// All section names, default section included, sorted
    pub fn section_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sections.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Total number of templates across all sections
    pub fn len(&self) -> usize {
        self.sections.values().map(HashMap::len).sum()
    }

    /// Whether the table holds no templates at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parse a TOML document into a table.
    ///
    /// Top-level scalars go to the default section (as does a top-level
    /// `[DEFAULT]` table), every other top-level table is a section, and
    /// tables nested inside a section flatten into dotted keys.
    ///
    /// `origin` only labels errors.
    pub fn from_toml_str(text: &str, origin: &str) -> I18nResult<Self> {
        let root: toml::Table = toml::from_str(text).map_err(|e| I18nError::CatalogParseError {
            path: origin.to_string(),
            message: e.to_string(),
        })?;

        let mut table = Self::new();
        for (name, value) in &root {
            match value {
                Value::Table(entries) => table.insert_flattened(origin, name, "", entries)?,
                scalar => {
                    let text = scalar_text(scalar).ok_or_else(|| unsupported(origin, DEFAULT_SECTION, name, scalar))?;
                    table.insert(DEFAULT_SECTION, name.as_str(), text);
                }
            }
        }
        Ok(table)
    }

    fn insert_flattened(
        &mut self,
        origin: &str,
        section: &str,
        prefix: &str,
        entries: &toml::Table,
    ) -> I18nResult<()> {
        // Named sections are created even when they hold no scalars.
        self.sections.entry(section.to_string()).or_default();

        for (name, value) in entries {
            let key = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}.{name}")
            };
            match value {
                Value::Table(nested) => self.insert_flattened(origin, section, &key, nested)?,
                scalar => {
                    let text = scalar_text(scalar).ok_or_else(|| unsupported(origin, section, &key, scalar))?;
                    self.insert(section, key, text);
                }
            }
        }
        Ok(())
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Integer(number) => Some(number.to_string()),
        Value::Float(number) => Some(float_text(*number)),
        Value::Boolean(flag) => Some(flag.to_string()),
        Value::Datetime(_) | Value::Array(_) | Value::Table(_) => None,
    }
}

/// TOML spelling of a float: whole numbers keep their `.0`
fn float_text(number: f64) -> String {
    if number.is_nan() {
        "nan".to_string()
    } else if number.is_infinite() {
        if number.is_sign_negative() { "-inf" } else { "inf" }.to_string()
    } else {
        format!("{number:?}")
    }
}

fn unsupported(origin: &str, section: &str, key: &str, value: &Value) -> I18nError {
    I18nError::UnsupportedValue {
        path: origin.to_string(),
        section: section.to_string(),
        key: key.to_string(),
        kind: value.type_str(),
    }
}

/// Where a catalog's messages come from.
///
/// Reloading a catalog calls [`CatalogSource::load`] again.
pub trait CatalogSource: Send + Sync + fmt::Debug {
    /// Read and parse the full message table
    fn load(&self) -> I18nResult<MessageTable>;

    /// Human-readable origin used in logs
    fn describe(&self) -> String;
}

/// A TOML catalog file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for the given file. Nothing is read until `load`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for FileSource {
    fn load(&self) -> I18nResult<MessageTable> {
        debug!("Loading catalog file: {:?}", self.path);

        let content = fs::read_to_string(&self.path).map_err(|source| I18nError::ResourceLoadError {
            path: self.path.to_string_lossy().to_string(),
            source,
        })?;

        MessageTable::from_toml_str(&content, &self.path.to_string_lossy())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// An in-memory catalog.
///
/// Clones share the same table, so a handle kept by the caller can change
/// what the next reload picks up.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    table: Arc<RwLock<MessageTable>>,
}

impl MemorySource {
    /// Create a source serving `table`
    pub fn new(table: MessageTable) -> Self {
        Self {
            table: Arc::new(RwLock::new(table)),
        }
    }

    /// Build a source from `(section, key, value)` triples
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str, &'a str)>,
    {
        let mut table = MessageTable::new();
        for (section, key, value) in entries {
            table.insert(section, key, value);
        }
        Self::new(table)
    }

    /// Insert or overwrite a template; visible after the next reload
    pub fn insert(&self, section: &str, key: &str, value: &str) {
        self.table.write().insert(section, key, value);
    }

    /// Replace the whole table; visible after the next reload
    pub fn replace(&self, table: MessageTable) {
        *self.table.write() = table;
    }
}

impl CatalogSource for MemorySource {
    fn load(&self) -> I18nResult<MessageTable> {
        Ok(self.table.read().clone())
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}

/// One language's loaded messages together with the source they came from.
#[derive(Debug)]
pub struct Catalog {
    language: String,
    source: Box<dyn CatalogSource>,
    messages: MessageTable,
}

impl Catalog {
    /// Load a catalog from `source`
    pub fn load(language: impl Into<String>, source: Box<dyn CatalogSource>) -> I18nResult<Self> {
        let language = language.into();
        let messages = source.load()?;
        debug!(
            "Loaded {} messages for {} from {}",
            messages.len(),
            language,
            source.describe()
        );
        Ok(Self {
            language,
            source,
            messages,
        })
    }

    /// Re-read the source. On failure the previous messages are kept.
    pub fn reload(&mut self) -> I18nResult<()> {
        self.messages = self.source.load()?;
        info!("Reloaded catalog for {} from {}", self.language, self.source.describe());
        Ok(())
    }

    /// Look up a template; empty `section` means the default section
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.messages.get(section, key)
    }

    /// Language identifier this catalog is registered under
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The loaded message table
    pub fn messages(&self) -> &MessageTable {
        &self.messages
    }
}
