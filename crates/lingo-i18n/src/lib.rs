//! # Lingo I18n
//!
//! Sectioned message catalogs with printf-style translation.
//!
//! Catalogs are loaded per language from a [`CatalogSource`] (TOML files via
//! [`FileSource`] out of the box) into a [`LocaleRegistry`]. Keys of the form
//! `section.key` resolve inside that section, plain keys in the default
//! section, and a missing translation degrades to the key itself.
//!
//! # Example
//!
//! ```rust
//! use lingo_i18n::{spread, tr_args, LocaleRegistry, MemorySource};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = LocaleRegistry::new();
//! registry.register(
//!     "fr",
//!     MemorySource::from_entries([
//!         ("greeting", "hello_name", "Bonjour %s"),
//!         ("list", "items", "%s,%s"),
//!     ]),
//! )?;
//!
//! assert_eq!(registry.translate("fr", "greeting.hello_name", &tr_args!["Ana"]), "Bonjour Ana");
//! assert_eq!(registry.translate("fr", "list.items", &[spread(["a", "b"])]), "a,b");
//! assert_eq!(registry.translate("fr", "missing.key", &[]), "missing.key");
//!
//! let fr = registry.locale("fr");
//! assert_eq!(fr.translate("greeting.hello_name", &tr_args!["Léa"]), "Bonjour Léa");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod args;
pub mod catalog;
pub mod config;
pub mod error;
pub mod format;
pub mod locale;
pub mod registry;

pub use args::{spread, Arg};
pub use catalog::{Catalog, CatalogSource, FileSource, MemorySource, MessageTable, DEFAULT_SECTION};
pub use config::{I18nConfig, LocaleEntry};
pub use error::{I18nError, I18nResult};
pub use locale::Locale;
pub use registry::LocaleRegistry;
