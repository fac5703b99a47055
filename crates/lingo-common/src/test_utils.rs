//! Test utilities and shared fixtures for the lingo workspace.
//!
//! Enabled for dependents through the `testing` feature.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Write `contents` to `dir/name`, creating parent directories as needed.
pub fn write_catalog(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create catalog directory");
    }
    fs::write(&path, contents).expect("Failed to write catalog file");
    path
}

/// Sample catalogs shared by the integration suites.
pub mod catalog_fixtures {
    /// English catalog with a default section and two named sections.
    pub fn english_catalog() -> &'static str {
        r#"
app_name = "Lingo"
welcome = "Welcome, %s!"

[greeting]
hello = "Hello"
hello_name = "Hello %s"

[list]
items = "%s,%s"

[greeting.formal]
hello = "Good day"
"#
    }

    /// French catalog mirroring [`english_catalog`].
    pub fn french_catalog() -> &'static str {
        r#"
app_name = "Lingo"
welcome = "Bienvenue, %s !"

[greeting]
hello = "Bonjour"
hello_name = "Bonjour %s"

[list]
items = "%s,%s"

[greeting.formal]
hello = "Bonjour madame"
"#
    }

    /// A catalog that fails to parse.
    pub fn broken_catalog() -> &'static str {
        "[greeting\nhello = \"unterminated\n"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_catalog_creates_parents() {
        let dir = create_temp_dir();
        let path = write_catalog(dir.path(), "nested/en.toml", catalog_fixtures::english_catalog());
        assert!(path.exists());
        assert!(fs::read_to_string(path).unwrap().contains("[greeting]"));
    }

    #[test]
    fn test_init_test_logging_is_idempotent() {
        init_test_logging();
        init_test_logging();
    }
}
