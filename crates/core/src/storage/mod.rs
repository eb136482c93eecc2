//! Object storage for submitted files using Apache OpenDAL.
//!
//! This module provides vendor-agnostic object storage with support for:
//! - S3-compatible: Supabase Storage, Cloudflare R2, AWS S3
//! - Local filesystem (development only)
//! - In-process memory (tests)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    ObjectStore (port)                            │
//! │   upload(bucket, key, bytes, type)   public_url(bucket, path)    │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                  StorageService (OpenDAL)                        │
//! │        one Operator per bucket: op.write_with / op.delete        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod service;

pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::{ObjectStore, StorageService, StoredObject};
