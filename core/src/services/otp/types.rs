//! Types for registry requests and reports

use serde::Serialize;

use crate::domain::entities::otp_record::{OtpPayload, OtpPurpose};

/// Everything the issuer supplies for a new code
#[derive(Debug, Clone)]
pub struct IssueOtp {
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Code produced by [`OtpRegistry::generate_code`](super::OtpRegistry::generate_code)
    pub code: String,
    pub purpose: OtpPurpose,
    pub payload: OtpPayload,
}

/// Snapshot of the table, without any codes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OtpRegistryStats {
    /// Unexpired and not yet used
    pub live: usize,
    /// Unexpired and already used
    pub consumed: usize,
    /// Past expiry, waiting for the next sweep
    pub expired: usize,
}

impl OtpRegistryStats {
    pub fn total(&self) -> usize {
        self.live + self.consumed + self.expired
    }
}
