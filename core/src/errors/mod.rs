//! Domain-specific error types and error handling.

use thiserror::Error;

use ev_shared::error_codes;

/// Why a submitted code was refused.
///
/// Each variant carries its own user-facing message; none of them leaks
/// whether another record exists for the same contact.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpFailure {
    /// No live record under the id. `expired` is set when the record existed
    /// but its lifetime had passed at verification time (it is removed then).
    #[error("{}", not_found_message(.expired))]
    NotFoundOrExpired { expired: bool },

    #[error("OTP already used")]
    AlreadyUsed,

    #[error("Invalid OTP for this action")]
    PurposeMismatch,

    #[error("Invalid OTP")]
    InvalidCode,
}

fn not_found_message(expired: &bool) -> &'static str {
    if *expired {
        "OTP has expired"
    } else {
        "OTP not found or expired"
    }
}

impl OtpFailure {
    /// Stable machine-readable code for API clients
    pub fn code(&self) -> &'static str {
        match self {
            OtpFailure::NotFoundOrExpired { expired: true } => error_codes::OTP_EXPIRED,
            OtpFailure::NotFoundOrExpired { expired: false } => {
                error_codes::OTP_NOT_FOUND_OR_EXPIRED
            }
            OtpFailure::AlreadyUsed => error_codes::OTP_ALREADY_USED,
            OtpFailure::PurposeMismatch => error_codes::OTP_PURPOSE_MISMATCH,
            OtpFailure::InvalidCode => error_codes::OTP_INVALID,
        }
    }

    /// Whether the client must request a fresh code rather than retype this one
    pub fn should_request_new_code(&self) -> bool {
        !matches!(self, OtpFailure::InvalidCode)
    }
}

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    Conflict { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error(transparent)]
    Otp(#[from] OtpFailure),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        DomainError::Conflict {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        DomainError::NotFound {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }
}

impl From<ev_shared::validation::ValidationErrors> for DomainError {
    fn from(errors: ev_shared::validation::ValidationErrors) -> Self {
        let message = errors
            .errors()
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        DomainError::Validation { message }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
