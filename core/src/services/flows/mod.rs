//! Guarded actions built on the OTP registry
//!
//! Each flow issues a code for one purpose, delivers it, and performs its
//! action only after the registry accepts the code for that same purpose:
//! - `registration` - new participant sign-up
//! - `deletion` - removal of an existing registration
//! - `admin_login` - passwordless admin session
//!
//! `review` is the read-only side used by admins after login.

mod admin_login;
mod deletion;
mod registration;
mod review;

#[cfg(test)]
mod tests;

pub use admin_login::{AdminLoginService, AdminOtpVerification};
pub use deletion::{DeletedParticipant, DeletionOtpRequest, DeletionService};
pub use registration::{ParticipantForm, RegistrationOtpRequest, RegistrationService};
pub use review::ReviewService;

use serde::Serialize;

use ev_shared::AppConfig;

use crate::domain::entities::otp_record::OtpPayload;
use crate::errors::{DomainError, DomainResult};
use crate::services::notification::DeliverySummary;

/// Settings shared by all flows
#[derive(Debug, Clone, Default)]
pub struct FlowConfig {
    /// Echo plaintext codes back to the caller when delivery ran in demo mode
    pub expose_codes: bool,
}

impl From<&AppConfig> for FlowConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            expose_codes: config.expose_codes(),
        }
    }
}

/// Result of issuing and delivering a code
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedOtp {
    pub otp_id: String,
    pub demo_mode: bool,
    #[serde(skip)]
    pub delivery: DeliverySummary,
    /// Only present when codes are exposed and nothing was really delivered
    #[serde(rename = "otp", skip_serializing_if = "Option::is_none")]
    pub demo_code: Option<String>,
}

impl IssuedOtp {
    fn new(otp_id: String, code: String, delivery: DeliverySummary, config: &FlowConfig) -> Self {
        let demo_code = (config.expose_codes && delivery.demo_mode).then_some(code);
        Self {
            otp_id,
            demo_mode: delivery.demo_mode,
            delivery,
            demo_code,
        }
    }
}

/// Read a string the issuer stored in the payload
fn payload_str(payload: &OtpPayload, key: &str) -> DomainResult<String> {
    payload
        .get(key)
        .and_then(|value| value.as_str())
        .map(str::to_string)
        .ok_or_else(|| DomainError::internal(format!("OTP payload is missing '{}'", key)))
}

fn require(value: &str) -> bool {
    !value.trim().is_empty()
}
