//! Storage service implementation using Apache OpenDAL.

use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use opendal::{Operator, services};
use tracing::debug;

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;

/// Result of a successful upload as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Path of the object inside its bucket.
    pub path: String,
}

/// Object storage client.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores `data` under `key` in `bucket`.
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<StoredObject, StorageError>;

    /// Public URL for an object previously stored at `path`.
    fn public_url(&self, bucket: &str, path: &str) -> String;

    /// Removes an object. Removing a missing object is not an error.
    async fn remove(&self, bucket: &str, key: &str) -> Result<(), StorageError>;
}

/// OpenDAL-backed object storage with one operator per bucket.
pub struct StorageService {
    operators: HashMap<String, Operator>,
    config: StorageConfig,
}

impl StorageService {
    /// Create a new storage service serving the given buckets.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config<I, B>(config: StorageConfig, buckets: I) -> Result<Self, StorageError>
    where
        I: IntoIterator<Item = B>,
        B: Into<String>,
    {
        let mut operators = HashMap::new();
        for bucket in buckets {
            let bucket = bucket.into();
            let operator = Self::create_operator(&config.provider, &bucket)?;
            operators.insert(bucket, operator);
        }
        Ok(Self { operators, config })
    }

    /// Create OpenDAL operator for one bucket.
    fn create_operator(provider: &StorageProvider, bucket: &str) -> Result<Operator, StorageError> {
        let operator = match provider {
            StorageProvider::S3 {
                endpoint,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
            StorageProvider::LocalFs { root } => {
                let dir = root.join(bucket);
                let builder = services::Fs::default().root(
                    dir.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
            StorageProvider::Memory => Operator::new(services::Memory::default())
                .map_err(|e| StorageError::configuration(e.to_string()))?
                .finish(),
        };
        Ok(operator)
    }

    fn operator(&self, bucket: &str) -> Result<&Operator, StorageError> {
        self.operators
            .get(bucket)
            .ok_or_else(|| StorageError::unknown_bucket(bucket))
    }

    /// Read an object back. Used by tests and local tooling.
    ///
    /// # Errors
    ///
    /// Returns an error if the object cannot be read.
    pub async fn read(&self, bucket: &str, key: &str) -> Result<Bytes, StorageError> {
        let buffer = self.operator(bucket)?.read(key).await?;
        Ok(buffer.to_bytes())
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }

    /// Buckets this service has operators for.
    pub fn buckets(&self) -> impl Iterator<Item = &str> {
        self.operators.keys().map(String::as_str)
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }
}

#[async_trait]
impl ObjectStore for StorageService {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<StoredObject, StorageError> {
        let operator = self.operator(bucket)?;
        let mut write = operator.write_with(key, data);
        if operator.info().full_capability().write_with_content_type {
            write = write.content_type(content_type);
        }
        write.await?;

        debug!(bucket, key, provider = self.provider_name(), "object stored");
        Ok(StoredObject {
            path: key.to_string(),
        })
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        public_url(&self.config.public_base_url, bucket, path)
    }

    async fn remove(&self, bucket: &str, key: &str) -> Result<(), StorageError> {
        self.operator(bucket)?.delete(key).await?;
        Ok(())
    }
}

/// Join base, bucket and path with exactly one slash between each part.
pub(crate) fn public_url(base: &str, bucket: &str, path: &str) -> String {
    format!(
        "{}/{}/{}",
        base.trim_end_matches('/'),
        bucket.trim_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_service() -> StorageService {
        let config = StorageConfig::new(StorageProvider::Memory, "https://cdn.example.com/public/");
        StorageService::from_config(config, ["registros-empresas", "kyc-documentos-usuarios"])
            .expect("should create service")
    }

    #[test]
    fn test_public_url_normalizes_slashes() {
        assert_eq!(
            public_url("https://x.supabase.co/storage/v1/object/public/", "logos", "/a/b.png"),
            "https://x.supabase.co/storage/v1/object/public/logos/a/b.png"
        );
        assert_eq!(
            public_url("http://localhost/files", "b", "k"),
            "http://localhost/files/b/k"
        );
    }

    #[test]
    fn test_buckets_registered() {
        let service = memory_service();
        let mut buckets: Vec<&str> = service.buckets().collect();
        buckets.sort_unstable();
        assert_eq!(buckets, vec!["kyc-documentos-usuarios", "registros-empresas"]);
        assert_eq!(service.provider_name(), "memory");
    }

    #[tokio::test]
    async fn test_upload_then_read_back() {
        let service = memory_service();
        let stored = service
            .upload(
                "registros-empresas",
                "empresas/logo/1-0-logo.png",
                Bytes::from_static(b"png-bytes"),
                "image/png",
            )
            .await
            .expect("upload should succeed");

        assert_eq!(stored.path, "empresas/logo/1-0-logo.png");
        let data = service
            .read("registros-empresas", &stored.path)
            .await
            .expect("object should exist");
        assert_eq!(&data[..], b"png-bytes");
        assert_eq!(
            service.public_url("registros-empresas", &stored.path),
            "https://cdn.example.com/public/registros-empresas/empresas/logo/1-0-logo.png"
        );
    }

    #[tokio::test]
    async fn test_upload_to_unknown_bucket_fails() {
        let service = memory_service();
        let err = service
            .upload("nope", "k", Bytes::from_static(b"x"), "text/plain")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::UnknownBucket(b) if b == "nope"));
    }

    #[tokio::test]
    async fn test_remove_object() {
        let service = memory_service();
        service
            .upload("registros-empresas", "k", Bytes::from_static(b"x"), "text/plain")
            .await
            .expect("upload should succeed");
        service
            .remove("registros-empresas", "k")
            .await
            .expect("remove should succeed");
        assert!(service.read("registros-empresas", "k").await.is_err());
    }
}
