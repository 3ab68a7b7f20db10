use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const DATABASE_NAME_VAR: &str = "DATABASE_NAME";
pub const PORT_VAR: &str = "PORT";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub name: Option<String>,
    pub max_connections: u32,
    pub connection_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allow_credentials: bool,
    pub max_age_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            name: None,
            max_connections: 10,
            connection_timeout_seconds: 30,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_credentials: true,
            max_age_seconds: 600,
        }
    }
}

impl DatabaseConfig {
    /// Both the store location and the logical database name are known.
    pub fn is_configured(&self) -> bool {
        self.url.is_some() && self.name.is_some()
    }

    fn normalize(&mut self) {
        self.url = self.url.take().filter(|v| !v.trim().is_empty());
        self.name = self.name.take().filter(|v| !v.trim().is_empty());
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Layers defaults, `config.toml`, `APP__*` variables and finally the
    /// well-known `DATABASE_URL`, `DATABASE_NAME` and `PORT` values looked up
    /// through `lookup`.
    pub fn load_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?);

        if std::path::Path::new("config.toml").exists() {
            builder = builder.add_source(File::with_name("config"));
        }

        builder = builder.add_source(
            Environment::with_prefix("APP")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let port = lookup(PORT_VAR)
            .map(|raw| {
                raw.trim().parse::<u16>().map_err(|e| {
                    ConfigError::Message(format!("Invalid {} value '{}': {}", PORT_VAR, raw, e))
                })
            })
            .transpose()?;

        builder = builder
            .set_override_option("database.url", lookup(DATABASE_URL_VAR))?
            .set_override_option("database.name", lookup(DATABASE_NAME_VAR))?
            .set_override_option("server.port", port.map(i64::from))?;

        let mut app_config: AppConfig = builder.build()?.try_deserialize()?;
        app_config.database.normalize();

        app_config.validate()?;

        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("Server port cannot be 0".to_string()));
        }

        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Message("Server host cannot be empty".to_string()));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Message(
                "Database max connections must be greater than 0".to_string(),
            ));
        }

        if !self.database.is_configured() {
            tracing::warn!(
                "{} or {} not set - the document store will be unavailable",
                DATABASE_URL_VAR,
                DATABASE_NAME_VAR
            );
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
