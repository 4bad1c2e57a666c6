//! Shared types, errors, and configuration for Ledgerbal.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for workflow actors and batch runs
//! - Currency precision helpers
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AccountsSettings, AppConfig};
pub use error::{AppError, AppResult};
