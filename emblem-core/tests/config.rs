use emblem_core::config::{ConfigError, EmblemConfig};
use std::io::Write;

#[test]
fn test_empty_config() {
    let config = EmblemConfig::empty();
    assert!(matches!(
        config.get::<String>("nonexistent"),
        Err(ConfigError::NotFound(_))
    ));
}

#[test]
fn test_set_and_get() {
    let mut config = EmblemConfig::empty();
    config.set("openapi.title", "Pets");
    assert_eq!(config.get::<String>("openapi.title").unwrap(), "Pets");
}

#[test]
fn test_get_or_default() {
    let config = EmblemConfig::empty();
    assert_eq!(config.get_or("missing", 42i64), 42);
}

#[test]
fn test_nested_lookup() {
    let yaml = r#"
openapi:
  title: Pet Store
  version: "2.1.0"
  docs_ui: true
  servers:
    - http://localhost:8080
    - https://api.example.com
"#;
    let config = EmblemConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.get::<String>("openapi.title").unwrap(), "Pet Store");
    assert_eq!(config.get::<String>("openapi.version").unwrap(), "2.1.0");
    assert!(config.get::<bool>("openapi.docs_ui").unwrap());
    assert_eq!(
        config.get::<Vec<String>>("openapi.servers").unwrap(),
        vec!["http://localhost:8080", "https://api.example.com"]
    );
    assert_eq!(
        config.get::<String>("openapi.servers.1").unwrap(),
        "https://api.example.com"
    );
}

#[test]
fn test_type_mismatch() {
    let config = EmblemConfig::from_yaml_str("openapi:\n  docs_ui: maybe\n").unwrap();
    match config.get::<bool>("openapi.docs_ui") {
        Err(ConfigError::TypeMismatch { key, expected }) => {
            assert_eq!(key, "openapi.docs_ui");
            assert_eq!(expected, "bool");
        }
        other => panic!("expected type mismatch, got {other:?}"),
    }
}

#[test]
fn test_scalar_coercion() {
    let config = EmblemConfig::from_yaml_str("openapi:\n  version: 2\n")
        .unwrap()
        .with_vars(vec![("EMBLEM_FEATURE_ENABLED".to_string(), "true".to_string())]);
    assert_eq!(config.get::<String>("openapi.version").unwrap(), "2");
    assert!(config.get::<bool>("feature.enabled").unwrap());
}

#[test]
fn test_subtree_deserialize() {
    #[derive(serde::Deserialize)]
    struct Server {
        url: String,
        port: u16,
    }

    let yaml = "server:\n  url: http://localhost\n  port: 8080\n";
    let config = EmblemConfig::from_yaml_str(yaml).unwrap();
    let server: Server = config.get("server").unwrap();
    assert_eq!(server.url, "http://localhost");
    assert_eq!(server.port, 8080);
}

#[test]
fn test_null_as_option() {
    let config = EmblemConfig::from_yaml_str("openapi:\n  description: ~\n").unwrap();
    assert!(config
        .get::<Option<String>>("openapi.description")
        .unwrap()
        .is_none());
}

#[test]
fn test_invalid_yaml() {
    let err = EmblemConfig::from_yaml_str("openapi: [unclosed").unwrap_err();
    assert!(matches!(err, ConfigError::Load(_)));
    assert!(err.to_string().starts_with("Config load error"));
}

#[test]
fn test_vars_overlay() {
    let config = EmblemConfig::from_yaml_str("openapi:\n  title: From file\n")
        .unwrap()
        .with_vars(vec![
            ("EMBLEM_OPENAPI_TITLE".to_string(), "From env".to_string()),
            ("OTHER_OPENAPI_TITLE".to_string(), "Ignored".to_string()),
        ]);
    assert_eq!(config.get::<String>("openapi.title").unwrap(), "From env");
    assert!(!config.contains_key("other"));
}

#[test]
#[serial_test::serial]
fn test_env_overlay() {
    std::env::set_var("EMBLEM_OPENAPI_VERSION", "9.9.9");
    let config = EmblemConfig::empty().with_env_overlay();
    std::env::remove_var("EMBLEM_OPENAPI_VERSION");
    assert_eq!(config.get::<String>("openapi.version").unwrap(), "9.9.9");
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "openapi:\n  title: File API").unwrap();
    let config = EmblemConfig::from_file(file.path()).unwrap();
    assert_eq!(config.get::<String>("openapi.title").unwrap(), "File API");
}

#[test]
fn test_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let config = EmblemConfig::from_file(dir.path().join("absent.yaml")).unwrap();
    assert!(!config.contains_key("openapi.title"));
}
