//! Core business logic for Registra.
//!
//! This crate has no web or database dependencies. Storage, persistence and
//! notification are reached through the ports in [`submission`] and
//! [`storage`].
//!
//! # Modules
//!
//! - `forms` - Form kinds, field whitelists and typed records
//! - `storage` - Object storage through Apache OpenDAL
//! - `upload` - All-or-nothing concurrent file upload
//! - `submission` - Upload, persist and notify workflow

pub mod forms;
pub mod storage;
pub mod submission;
pub mod upload;

#[cfg(test)]
mod test_support;
