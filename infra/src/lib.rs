//! # Infrastructure Layer
//!
//! Concrete collaborators for the domain layer:
//! - **Email**: demo sender that logs codes, and an SMTP sender built on lettre
//! - **SMS**: demo sender (no real provider is wired in)
//! - **Store**: in-memory participant and admin repositories
//!
//! Everything here is selected at startup from `ev_shared::AppConfig`; the
//! domain layer only sees the traits it defines.

pub mod email;
pub mod sms;
pub mod store;

pub use email::{create_email_service, DemoEmailService, SmtpEmailService};
pub use sms::DemoSmsService;
pub use store::{AdminSeed, InMemoryAdminRepository, InMemoryParticipantRepository};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Email could not be built or sent
    #[error("Email service error: {0}")]
    Email(String),

    /// SMS could not be sent
    #[error("SMS service error: {0}")]
    Sms(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
