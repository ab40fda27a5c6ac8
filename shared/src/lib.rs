//! Shared utilities and common types for the Sports Day registration server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures
//! - Utility functions (contact validation, log masking)
//! - The JSON response envelope

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CorsConfig, Environment, LoggingConfig, NotificationConfig, OtpConfig,
    ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{ApiResponse, ListResponse};
pub use utils::{contact, validation};
