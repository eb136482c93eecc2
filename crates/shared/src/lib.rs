//! Shared errors, configuration and email delivery for Registra.
//!
//! This crate provides common pieces used across all other crates:
//! - Application-wide error types
//! - Configuration management
//! - Transactional email over SMTP

pub mod config;
pub mod email;
pub mod error;

pub use config::{AppConfig, EmailConfig, StorageKind, StorageSettings};
pub use email::{EmailError, EmailService, SubmissionEmail};
pub use error::{AppError, AppResult};
