//! Storage configuration types.

use std::path::PathBuf;

use registra_shared::config::{StorageKind, StorageSettings};
use serde::{Deserialize, Serialize};

use super::error::StorageError;

/// Storage provider configuration.
///
/// Buckets are not part of the provider: every form type names its own
/// bucket and the service builds one operator per bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageProvider {
    /// S3-compatible storage: Supabase Storage, Cloudflare R2, AWS S3
    S3 {
        /// S3 endpoint URL.
        endpoint: String,
        /// Access key ID.
        access_key_id: String,
        /// Secret access key.
        secret_access_key: String,
        /// Region.
        region: String,
    },
    /// Local filesystem, one sub-directory per bucket (development only)
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
    /// In-process memory (tests)
    Memory,
}

impl StorageProvider {
    /// Create S3-compatible provider (Supabase Storage, Cloudflare R2, AWS S3).
    #[must_use]
    pub fn s3(
        endpoint: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self::S3 {
            endpoint: endpoint.into(),
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: region.into(),
        }
    }

    /// Create local filesystem provider (development only).
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Get the provider name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::S3 { .. } => "s3",
            Self::LocalFs { .. } => "local",
            Self::Memory => "memory",
        }
    }
}

/// Storage service configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage provider configuration.
    pub provider: StorageProvider,
    /// Base URL that public object URLs are built from.
    pub public_base_url: String,
    /// Maximum size of a single file in bytes.
    pub max_file_size: u64,
}

impl StorageConfig {
    /// Default max file size: 10MB.
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

    /// Create a new storage config with default settings.
    #[must_use]
    pub fn new(provider: StorageProvider, public_base_url: impl Into<String>) -> Self {
        Self {
            provider,
            public_base_url: public_base_url.into(),
            max_file_size: Self::DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// Set maximum file size.
    #[must_use]
    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }
}

impl TryFrom<&StorageSettings> for StorageConfig {
    type Error = StorageError;

    fn try_from(settings: &StorageSettings) -> Result<Self, Self::Error> {
        let provider = match settings.provider {
            StorageKind::S3 => {
                let field = |value: &Option<String>, name: &str| {
                    value
                        .clone()
                        .filter(|v| !v.trim().is_empty())
                        .ok_or_else(|| {
                            StorageError::configuration(format!(
                                "storage.{name} is required for s3"
                            ))
                        })
                };
                StorageProvider::s3(
                    field(&settings.endpoint, "endpoint")?,
                    field(&settings.access_key_id, "access_key_id")?,
                    field(&settings.secret_access_key, "secret_access_key")?,
                    settings.region.clone(),
                )
            }
            StorageKind::LocalFs => StorageProvider::local_fs(
                settings.root.clone().unwrap_or_else(|| "./uploads".to_string()),
            ),
            StorageKind::Memory => StorageProvider::Memory,
        };

        if settings.public_base_url.trim().is_empty() {
            return Err(StorageError::configuration(
                "storage.public_base_url must not be empty",
            ));
        }

        Ok(Self::new(provider, settings.public_base_url.clone())
            .with_max_file_size(settings.max_file_size))
    }
}
