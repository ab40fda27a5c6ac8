//! Request and response bodies
//!
//! Field names are camelCase on the wire. Request fields default to empty so
//! a missing field reaches the flow's own "required" check instead of
//! failing JSON extraction.

pub mod admin;
pub mod otp;
pub mod participant;

pub use admin::{AdminLoginOtpRequest, VerifyAdminOtpRequest};
pub use otp::{DeletionOtpRequestDto, RegistrationOtpRequestDto};
pub use participant::{
    DeleteParticipantRequest, ParticipantResponse, RegisterParticipantRequest,
    SearchParticipantsQuery,
};

use std::collections::HashMap;
use validator::ValidationErrors;

/// Flatten validator output into `field -> messages`
pub fn field_errors(errors: &ValidationErrors) -> HashMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let messages = errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}
