use emblem_core::config::{ConfigError, EmblemConfig};
use emblem_openapi::OpenApiConfig;

#[test]
fn config_new() {
    let config = OpenApiConfig::new("My API", "1.0.0");
    assert_eq!(config.title, "My API");
    assert_eq!(config.version, "1.0.0");
    assert!(config.description.is_none());
    assert!(config.servers.is_empty());
}

#[test]
fn config_with_description() {
    let config = OpenApiConfig::new("My API", "1.0.0").with_description("A great API");
    assert_eq!(config.description.as_deref(), Some("A great API"));
}

#[test]
fn config_with_servers() {
    let config = OpenApiConfig::new("My API", "1.0.0")
        .with_server("http://localhost:3000")
        .with_server("https://api.example.com");
    assert_eq!(
        config.servers,
        vec!["http://localhost:3000", "https://api.example.com"]
    );
}

#[test]
fn config_from_yaml() {
    let yaml = r#"
openapi:
  title: Pets
  version: 1.2.3
  description: Pet store
  servers:
    - https://pets.example.com
"#;
    let config = OpenApiConfig::from_config(&EmblemConfig::from_yaml_str(yaml).unwrap()).unwrap();
    assert_eq!(config.title, "Pets");
    assert_eq!(config.version, "1.2.3");
    assert_eq!(config.description.as_deref(), Some("Pet store"));
    assert_eq!(config.servers, vec!["https://pets.example.com"]);
}

#[test]
fn config_from_yaml_optional_keys() {
    let yaml = "openapi:\n  title: Bare\n  version: \"0.1\"\n";
    let config = OpenApiConfig::from_config(&EmblemConfig::from_yaml_str(yaml).unwrap()).unwrap();
    assert!(config.description.is_none());
    assert!(config.servers.is_empty());
}

#[test]
fn config_from_yaml_missing_title() {
    let yaml = "openapi:\n  version: \"0.1\"\n";
    let err = OpenApiConfig::from_config(&EmblemConfig::from_yaml_str(yaml).unwrap()).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(key) if key == "openapi.title"));
}
