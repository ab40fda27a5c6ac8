//! Shared types used across the application

pub mod response;

pub use response::{ApiResponse, ListResponse};
