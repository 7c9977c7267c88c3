use emblem_core::config::{ConfigError, EmblemConfig};

/// Configuration for the generated OpenAPI document.
#[derive(Debug, Clone)]
pub struct OpenApiConfig {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
    pub servers: Vec<String>,
}

impl OpenApiConfig {
    pub fn new(title: &str, version: &str) -> Self {
        Self {
            title: title.to_string(),
            version: version.to_string(),
            description: None,
            servers: Vec::new(),
        }
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    pub fn with_server(mut self, url: &str) -> Self {
        self.servers.push(url.to_string());
        self
    }

    /// Read the `openapi.*` keys. `title` and `version` are required.
    pub fn from_config(config: &EmblemConfig) -> Result<Self, ConfigError> {
        let title: String = config.get("openapi.title")?;
        let version: String = config.get("openapi.version")?;
        let description: Option<String> = config.get_or("openapi.description", None);
        let servers: Vec<String> = config.get_or("openapi.servers", Vec::new());
        Ok(Self {
            title,
            version,
            description,
            servers,
        })
    }
}
