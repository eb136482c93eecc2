//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Object storage configuration.
    pub storage: StorageSettings,
    /// Email configuration.
    #[serde(default)]
    pub email: EmailConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_body_bytes() -> usize {
    64 * 1024 * 1024
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Which object storage backend to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    /// S3-compatible endpoint (Supabase Storage, R2, AWS).
    #[default]
    S3,
    /// Local filesystem, one directory per bucket.
    LocalFs,
    /// In-process memory, lost on restart.
    Memory,
}

/// Raw object storage settings as read from the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Backend selector.
    #[serde(default)]
    pub provider: StorageKind,
    /// S3 endpoint URL.
    pub endpoint: Option<String>,
    /// S3 region.
    #[serde(default = "default_region")]
    pub region: String,
    /// S3 access key ID.
    pub access_key_id: Option<String>,
    /// S3 secret access key.
    pub secret_access_key: Option<String>,
    /// Root directory for the local filesystem backend.
    pub root: Option<String>,
    /// Base URL under which stored objects are publicly reachable.
    pub public_base_url: String,
    /// Maximum size of a single uploaded file in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

fn default_region() -> String {
    "auto".to_string()
}

fn default_max_file_size() -> u64 {
    10 * 1024 * 1024
}

/// Email configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// SMTP relay host.
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    /// SMTP relay port.
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// SMTP username.
    #[serde(default = "default_smtp_username")]
    pub smtp_username: String,
    /// Provider API key, used as the SMTP password. Sending is disabled without it.
    pub api_key: Option<String>,
    /// Sender address.
    #[serde(default = "default_from_email")]
    pub from_email: String,
    /// Sender display name.
    #[serde(default = "default_from_name")]
    pub from_name: String,
    /// Public site the continuation links point to.
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
}

impl EmailConfig {
    /// Whether an API key is present, i.e. email can actually be sent.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: default_smtp_username(),
            api_key: None,
            from_email: default_from_email(),
            from_name: default_from_name(),
            frontend_url: default_frontend_url(),
        }
    }
}

fn default_smtp_host() -> String {
    "smtp.resend.com".to_string()
}

fn default_smtp_port() -> u16 {
    465
}

fn default_smtp_username() -> String {
    "resend".to_string()
}

fn default_from_email() -> String {
    "no-reply@registra.app".to_string()
}

fn default_from_name() -> String {
    "Registra".to_string()
}

fn default_frontend_url() -> String {
    "http://localhost:3000".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// A bare `PORT` variable wins over `server.port`, which is what most
    /// container platforms inject.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("REGISTRA").separator("__"))
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [(&str, Option<&str>); 2] = [
        ("REGISTRA__DATABASE__URL", Some("postgres://localhost/registra")),
        (
            "REGISTRA__STORAGE__PUBLIC_BASE_URL",
            Some("https://example.supabase.co/storage/v1/object/public"),
        ),
    ];

    #[test]
    fn test_load_with_defaults() {
        temp_env::with_vars(REQUIRED, || {
            temp_env::with_var_unset("PORT", || {
                let config = AppConfig::load().expect("config should load");
                assert_eq!(config.server.port, 8080);
                assert_eq!(config.server.host, "0.0.0.0");
                assert_eq!(config.database.max_connections, 10);
                assert_eq!(config.storage.provider, StorageKind::S3);
                assert_eq!(config.storage.max_file_size, 10 * 1024 * 1024);
                assert!(!config.email.is_enabled());
            });
        });
    }

    #[test]
    fn test_port_variable_overrides_server_port() {
        temp_env::with_vars(REQUIRED, || {
            temp_env::with_vars(
                [("PORT", Some("3001")), ("REGISTRA__SERVER__PORT", Some("9000"))],
                || {
                    let config = AppConfig::load().expect("config should load");
                    assert_eq!(config.server.port, 3001);
                },
            );
        });
    }

    #[test]
    fn test_storage_provider_from_env() {
        temp_env::with_vars(REQUIRED, || {
            temp_env::with_vars(
                [
                    ("REGISTRA__STORAGE__PROVIDER", Some("local_fs")),
                    ("REGISTRA__STORAGE__ROOT", Some("./uploads")),
                ],
                || {
                    let config = AppConfig::load().expect("config should load");
                    assert_eq!(config.storage.provider, StorageKind::LocalFs);
                    assert_eq!(config.storage.root.as_deref(), Some("./uploads"));
                },
            );
        });
    }

    #[test]
    fn test_missing_database_url_fails() {
        temp_env::with_vars(
            [
                ("REGISTRA__DATABASE__URL", None::<&str>),
                ("REGISTRA__STORAGE__PUBLIC_BASE_URL", Some("http://localhost/files")),
            ],
            || {
                assert!(AppConfig::load().is_err());
            },
        );
    }

    #[test]
    fn test_email_enabled_requires_non_blank_key() {
        let mut email = EmailConfig::default();
        assert!(!email.is_enabled());
        email.api_key = Some("   ".to_string());
        assert!(!email.is_enabled());
        email.api_key = Some("re_123".to_string());
        assert!(email.is_enabled());
    }
}
