//! # Sports Day Core
//!
//! Domain layer for the Sports Day registration backend.
//! This crate contains the OTP registry that gates every sensitive action,
//! the registration, deletion and admin-login flows built on top of it,
//! the repository and notifier interfaces those flows depend on, and the
//! domain error types.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    Admin, AdminRole, AdminSession, Department, Gender, OtpPayload, OtpPurpose, OtpRecord,
    Participant, ParticipantFilter, Sport,
};
pub use errors::{DomainError, DomainResult, OtpFailure};
pub use repositories::{AdminRepository, ParticipantRepository};
pub use services::*;
