//! Integration tests for file-backed catalogs and the registry

use lingo_common::test_utils::{catalog_fixtures, create_temp_dir, init_test_logging, write_catalog};
use lingo_i18n::{spread, tr_args, Arg, I18nConfig, I18nError, LocaleRegistry};
use std::path::Path;
use tempfile::TempDir;

/// Create a temporary directory with English and French catalogs
fn create_test_locales() -> TempDir {
    let temp_dir = create_temp_dir();
    write_catalog(temp_dir.path(), "en.toml", catalog_fixtures::english_catalog());
    write_catalog(temp_dir.path(), "fr.toml", catalog_fixtures::french_catalog());
    temp_dir
}

fn registry_with(dir: &Path, languages: &[&str]) -> LocaleRegistry {
    let registry = LocaleRegistry::new();
    for language in languages {
        registry
            .register_file(language, dir.join(format!("{language}.toml")))
            .unwrap();
    }
    registry
}

#[test]
fn test_basic_translation() {
    init_test_logging();
    let temp_dir = create_test_locales();
    let registry = registry_with(temp_dir.path(), &["en", "fr"]);

    assert_eq!(registry.translate("fr", "greeting.hello", &[]), "Bonjour");
    assert_eq!(registry.translate("en", "greeting.hello", &[]), "Hello");
    assert_eq!(registry.translate("fr", "app_name", &[]), "Lingo");
    assert_eq!(registry.translate("fr", "greeting.formal.hello", &[]), "Bonjour madame");
}

#[test]
fn test_missing_translation_falls_back_to_key() {
    let temp_dir = create_test_locales();
    let registry = registry_with(temp_dir.path(), &["fr"]);

    assert_eq!(registry.translate("fr", "missing.key", &[]), "missing.key");
    assert_eq!(registry.translate("fr", "greeting.missing", &[]), "greeting.missing");
    assert_eq!(registry.translate("de", "greeting.hello", &[]), "greeting.hello");
    assert_eq!(registry.translate("fr", "Just some text", &[]), "Just some text");
}

#[test]
fn test_translation_with_arguments() {
    let temp_dir = create_test_locales();
    let registry = registry_with(temp_dir.path(), &["fr"]);

    assert_eq!(
        registry.translate("fr", "greeting.hello_name", &tr_args!["Ana"]),
        "Bonjour Ana"
    );
    assert_eq!(registry.translate("fr", "welcome", &tr_args!["Ana"]), "Bienvenue, Ana !");
}

#[test]
fn test_sequence_argument_is_spread() {
    let temp_dir = create_test_locales();
    let registry = registry_with(temp_dir.path(), &["fr"]);

    assert_eq!(registry.translate("fr", "list.items", &[spread(["a", "b"])]), "a,b");
    assert_eq!(
        registry.translate("fr", "list.items", &[spread(["a"]), Arg::from("b")]),
        "a,b"
    );
}

#[test]
fn test_nil_argument_is_dropped() {
    let registry = LocaleRegistry::new();
    let temp_dir = create_temp_dir();
    let path = write_catalog(temp_dir.path(), "en.toml", "k = \"%s\"\n");
    registry.register_file("en", path).unwrap();

    assert_eq!(registry.translate("en", "k", &[Arg::Nil, Arg::from("x")]), "x");
    assert_eq!(registry.translate("en", "k", &tr_args![None::<&str>, "x"]), "x");
}

#[test]
fn test_translate_section() {
    let temp_dir = create_test_locales();
    let registry = registry_with(temp_dir.path(), &["fr"]);

    assert_eq!(registry.translate_section("fr", "greeting", "hello", &[]), "Bonjour");
    assert_eq!(registry.translate_section("fr", "greeting", "formal.hello", &[]), "Bonjour madame");
    assert_eq!(registry.translate_section("fr", "", "app_name", &[]), "Lingo");
    assert_eq!(registry.translate_section("fr", "greeting", "nope", &[]), "nope");
}

#[test]
fn test_duplicate_registration_keeps_first() {
    let temp_dir = create_test_locales();
    let registry = registry_with(temp_dir.path(), &["fr"]);

    let err = registry
        .register_file("fr", temp_dir.path().join("en.toml"))
        .unwrap_err();
    assert!(matches!(err, I18nError::AlreadyRegistered { ref language } if language == "fr"));
    assert_eq!(registry.translate("fr", "greeting.hello", &[]), "Bonjour");
    assert_eq!(registry.languages(), vec!["fr".to_string()]);
}

#[test]
fn test_register_load_errors() {
    let temp_dir = create_temp_dir();
    let broken = write_catalog(temp_dir.path(), "broken.toml", catalog_fixtures::broken_catalog());
    let registry = LocaleRegistry::new();

    let err = registry.register_file("xx", temp_dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, I18nError::ResourceLoadError { .. }));

    let err = registry.register_file("xx", broken).unwrap_err();
    assert!(matches!(err, I18nError::CatalogParseError { .. }));

    assert!(!registry.is_registered("xx"));
    assert!(registry.languages().is_empty());
}

#[test]
fn test_list_languages_order_and_copy() {
    let temp_dir = create_test_locales();
    let registry = registry_with(temp_dir.path(), &["en", "fr"]);

    let mut languages = registry.languages();
    assert_eq!(languages, vec!["en", "fr"]);

    languages.push("de".to_string());
    languages.swap(0, 1);
    assert_eq!(registry.languages(), vec!["en", "fr"]);
    assert!(registry.is_registered("en"));
    assert!(!registry.is_registered("de"));
}

#[test]
fn test_reload_all_stops_at_first_failure() {
    init_test_logging();
    let temp_dir = create_temp_dir();
    let languages = ["l1", "l2", "l3", "l4", "l5"];
    for language in languages {
        write_catalog(
            temp_dir.path(),
            &format!("{language}.toml"),
            "[greeting]\nhello = \"old\"\n",
        );
    }
    let registry = registry_with(temp_dir.path(), &languages);

    for language in languages {
        let contents = if language == "l3" {
            catalog_fixtures::broken_catalog()
        } else {
            "[greeting]\nhello = \"new\"\n"
        };
        write_catalog(temp_dir.path(), &format!("{language}.toml"), contents);
    }

    let err = registry.reload_all().unwrap_err();
    match err {
        I18nError::ReloadError { language, source } => {
            assert_eq!(language, "l3");
            assert!(matches!(*source, I18nError::CatalogParseError { .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    assert_eq!(registry.translate("l1", "greeting.hello", &[]), "new");
    assert_eq!(registry.translate("l2", "greeting.hello", &[]), "new");
    assert_eq!(registry.translate("l3", "greeting.hello", &[]), "old");
    assert_eq!(registry.translate("l4", "greeting.hello", &[]), "old");
    assert_eq!(registry.translate("l5", "greeting.hello", &[]), "old");
}

#[test]
fn test_reload_named_languages() {
    let temp_dir = create_test_locales();
    let registry = registry_with(temp_dir.path(), &["en", "fr"]);

    write_catalog(temp_dir.path(), "en.toml", "[greeting]\nhello = \"Hi\"\n");
    write_catalog(temp_dir.path(), "fr.toml", "[greeting]\nhello = \"Salut\"\n");

    registry.reload(&["fr", "xx"]).unwrap();
    assert_eq!(registry.translate("fr", "greeting.hello", &[]), "Salut");
    assert_eq!(registry.translate("en", "greeting.hello", &[]), "Hello");

    assert!(registry.reload(&["xx"]).is_ok());
}

#[test]
fn test_registry_from_config_file() {
    let temp_dir = create_test_locales();
    let config_path = write_catalog(
        temp_dir.path(),
        "i18n.toml",
        r#"
default_language = "en"

[[locales]]
language = "fr"
path = "fr.toml"

[[locales]]
language = "en"
path = "en.toml"
"#,
    );

    let config = I18nConfig::load(&config_path).unwrap();
    let registry = LocaleRegistry::from_config(&config).unwrap();

    assert_eq!(registry.languages(), vec!["fr", "en"]);
    assert_eq!(registry.default_language().as_deref(), Some("en"));
    assert_eq!(registry.translate("fr", "greeting.hello", &[]), "Bonjour");
}

#[test]
fn test_from_config_propagates_load_error() {
    let temp_dir = create_temp_dir();
    let config_path = write_catalog(
        temp_dir.path(),
        "i18n.toml",
        "[[locales]]\nlanguage = \"fr\"\npath = \"missing.toml\"\n",
    );

    let config = I18nConfig::load(&config_path).unwrap();
    let err = LocaleRegistry::from_config(&config).unwrap_err();
    assert!(matches!(err, I18nError::ResourceLoadError { .. }));
}

#[test]
fn test_default_language_fallback_from_files() {
    let temp_dir = create_test_locales();
    write_catalog(temp_dir.path(), "de.toml", "[greeting]\nhello = \"Hallo\"\n");
    let registry = registry_with(temp_dir.path(), &["en", "de"]);
    registry.set_default_language(Some("en"));

    assert_eq!(registry.translate("de", "greeting.hello", &[]), "Hallo");
    assert_eq!(registry.translate("de", "greeting.hello_name", &tr_args!["Ana"]), "Hello Ana");
    assert_eq!(registry.translate("de", "greeting.nope", &[]), "greeting.nope");
}

#[test]
fn test_concurrent_reads_during_reload() {
    let temp_dir = create_test_locales();
    let registry = registry_with(temp_dir.path(), &["en", "fr"]);

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..200 {
                    let hello = registry.translate("fr", "greeting.hello", &[]);
                    assert_eq!(hello, "Bonjour");
                }
            });
        }
        scope.spawn(|| {
            for _ in 0..20 {
                registry.reload_all().unwrap();
            }
        });
    });
}
