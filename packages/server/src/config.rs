use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// Allowed origins. Empty allows any origin.
    #[serde(default)]
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding the photo files.
    pub photos_dir: PathBuf,
    /// Upper bound for one decoded photo, in bytes.
    pub max_photo_size: u64,
    /// Upper bound for a create request body, in bytes. Both photos travel
    /// base64-encoded inside the JSON body.
    pub max_request_size: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("MISTAKEMATE_CONFIG").unwrap_or_else(|_| "config/config".to_string());

        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("database.url", "sqlite://App_Data/mistakes.db?mode=rwc")?
            .set_default("database.max_connections", 5)?
            .set_default("storage.photos_dir", "App_Data/photos")?
            .set_default("storage.max_photo_size", 20 * 1024 * 1024)?
            .set_default("storage.max_request_size", 64 * 1024 * 1024)?
            .add_source(File::with_name(&config_path).required(false))
            // Override from environment (e.g., MISTAKEMATE__SERVER__PORT)
            .add_source(
                Environment::with_prefix("MISTAKEMATE")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors.allow_origins")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }
}
