//! Integration tests for armature-translator against on-disk message files.

use armature_translator::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    global: std::path::PathBuf,
    modules: std::path::PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let global = dir.path().join("i18n");
        let modules = dir.path().join("modules");

        write(
            &modules,
            "blog/messages/en_US/post-controller.json",
            r#"{
                "title": "Post %s",
                "greeting": "Hello %s",
                "shared": "from base",
                "form": { "submit": "Publish" }
            }"#,
        );
        write(
            &modules,
            "system/messages/en_US/index-controller.toml",
            "home = \"Home\"\n",
        );
        write(
            &modules,
            "system/messages/pt_BR/index-controller.json",
            r#"{"home": "Início"}"#,
        );
        write(&modules, "blog/messages/es_ES/post-controller.json", "{}");
        write(
            &global,
            "en_US/overrides.json",
            r#"{"shared": "from custom", "banner": "Welcome, %s"}"#,
        );
        write(
            &global,
            "en_US/campaign.toml",
            "banner = \"Sale ends %s\"\npromo = \"%d%% off\"\n",
        );

        Self {
            _dir: dir,
            global,
            modules,
        }
    }

    fn resolver(&self, path: &str) -> MessageResolver {
        let mut resolver = MessageResolver::new(&self.global, &self.modules);
        resolver.set_request_path(path);
        resolver
    }
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn args(values: &[&str]) -> Vec<FormatArg> {
    values.iter().map(|v| FormatArg::from(*v)).collect()
}

#[test]
fn test_route_scenario() {
    let fixture = Fixture::new();
    let mut resolver = fixture.resolver("/blog/post/42?x=1");

    resolver.set_language("en_US").unwrap();

    assert_eq!(resolver.language(), Some("en_US"));
    assert_eq!(resolver.translate("title", &args(&["42"])), "Post 42");
    assert_eq!(resolver.translate("form.submit", &[]), "Publish");
}

#[test]
fn test_empty_path_uses_defaults() {
    let fixture = Fixture::new();
    let mut resolver = fixture.resolver("");

    resolver.set_language("en_US").unwrap();
    assert_eq!(resolver.translate("home", &[]), "Home");
}

#[test]
fn test_placeholder_left_literal_without_params() {
    let fixture = Fixture::new();
    let mut resolver = fixture.resolver("/blog/post");

    resolver.set_language("en_US").unwrap();
    assert_eq!(resolver.translate("greeting", &[]), "Hello %s");
}

#[test]
fn test_missing_key_fallback() {
    let fixture = Fixture::new();
    let mut resolver = fixture.resolver("/blog/post");
    resolver.set_language("en_US").unwrap();

    for params in [vec![], args(&["a"]), args(&["a", "b"])] {
        assert_eq!(resolver.translate("no.such.key", &params), "[no.such.key]");
    }
    assert_eq!(resolver.translation_pattern("no.such.key"), None);
    assert!(!resolver.exists("no.such.key"));
}

#[test]
fn test_failed_language_change_keeps_state() {
    let fixture = Fixture::new();
    let mut resolver = fixture.resolver("/blog/post");
    resolver.set_language("en_US").unwrap();

    let err = resolver.set_language("ja_JP").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(
        err.to_string(),
        format!(
            "Could not find the translation file \"blog/messages/ja_JP/post-controller\" at \"{}\"",
            fixture.global.display()
        )
    );

    assert_eq!(resolver.language(), Some("en_US"));
    assert!(resolver.exists("title"));
}

#[test]
fn test_empty_resource_keeps_state() {
    let fixture = Fixture::new();
    let mut resolver = fixture.resolver("/blog/post");

    resolver.set_language("es_ES").unwrap();
    assert_eq!(resolver.language(), None);

    resolver.set_language("en_US").unwrap();
    resolver.set_language("es_ES").unwrap();
    assert_eq!(resolver.language(), Some("en_US"));
}

#[test]
fn test_custom_overrides_and_merge() {
    let fixture = Fixture::new();
    let mut resolver = fixture.resolver("/blog/post");
    resolver.set_language("en_US").unwrap();

    resolver.add_custom_language_file("overrides").unwrap();
    assert_eq!(resolver.translate("shared", &[]), "from custom");
    assert_eq!(resolver.translate("banner", &args(&["Ana"])), "Welcome, Ana");

    resolver.add_custom_language_file("campaign").unwrap();
    assert_eq!(resolver.translate("banner", &args(&["Friday"])), "Sale ends Friday");
    assert_eq!(resolver.translate("promo", &[FormatArg::from(20)]), "20% off");
    assert_eq!(resolver.translate("shared", &[]), "from custom");

    resolver.clear_custom_language_messages();
    assert!(!resolver.exists("banner"));
    assert!(!resolver.exists("promo"));
    assert_eq!(resolver.translate("shared", &[]), "from base");
}

#[test]
fn test_custom_file_not_found() {
    let fixture = Fixture::new();
    let mut resolver = fixture.resolver("/blog/post");
    resolver.set_language("en_US").unwrap();

    match resolver.add_custom_language_file("absent") {
        Err(TranslatorError::TranslationFileNotFound { resource, root }) => {
            assert_eq!(resource, "en_US/absent");
            assert_eq!(root, fixture.global);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_documented_fallback() {
    let fixture = Fixture::new();
    let mut resolver = fixture.resolver("/");

    resolver.set_language_or("de_DE", DEFAULT_LANGUAGE).unwrap();
    assert_eq!(resolver.language(), Some("pt_BR"));
    assert_eq!(resolver.translate("home", &[]), "Início");
}

#[test]
fn test_bootstrap_from_config_file() {
    let fixture = Fixture::new();
    let config_path = fixture.global.join("translator.toml");
    fs::write(
        &config_path,
        format!(
            "global_dir = {:?}\nmodules_dir = {:?}\ndefault_language = \"en_US\"\n",
            fixture.global.to_string_lossy(),
            fixture.modules.to_string_lossy()
        ),
    )
    .unwrap();

    let config = TranslatorConfig::from_file(&config_path).unwrap();
    let mut resolver = MessageResolver::from_config(&config).with_path_provider(StaticPath::new(""));

    resolver.set_language(&config.default_language).unwrap();
    assert_eq!(resolver.translate("home", &[]), "Home");
}
