//! Shared types, errors, and configuration for Contab.
//!
//! This crate provides common types used across all other crates:
//! - Cent-scale money helpers on top of `rust_decimal`
//! - Typed IDs for type-safe entity references
//! - Reporting periods (month/year) for tax declarations
//! - Pagination types for list queries
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
