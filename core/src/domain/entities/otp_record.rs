//! One-time passcode record held by the registry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of digits in a code
pub const CODE_LENGTH: usize = 6;

/// Smallest code ever issued
pub const CODE_MIN: u32 = 100_000;

/// Largest code ever issued
pub const CODE_MAX: u32 = 999_999;

/// Default lifetime of a code
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 10;

/// Context data attached by the issuer and handed back on a successful verify
pub type OtpPayload = serde_json::Map<String, serde_json::Value>;

/// Which guarded action a code authorizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OtpPurpose {
    Registration,
    Deletion,
    AdminLogin,
}

impl OtpPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpPurpose::Registration => "registration",
            OtpPurpose::Deletion => "deletion",
            OtpPurpose::AdminLogin => "admin-login",
        }
    }

    /// Subject line used when the code is emailed
    pub fn email_subject(&self) -> &'static str {
        match self {
            OtpPurpose::Registration => "Verify your Sports Day registration",
            OtpPurpose::Deletion => "Confirm deletion of your Sports Day registration",
            OtpPurpose::AdminLogin => "Sports Day admin login code",
        }
    }
}

impl fmt::Display for OtpPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OtpPurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registration" => Ok(OtpPurpose::Registration),
            "deletion" => Ok(OtpPurpose::Deletion),
            "admin-login" => Ok(OtpPurpose::AdminLogin),
            other => Err(format!("Unknown OTP purpose: {}", other)),
        }
    }
}

/// A single issued code.
///
/// `code` and `purpose` never change after issue. `consumed` flips to true
/// exactly once, on the single successful verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Opaque identifier handed to the client (32 lowercase hex chars)
    pub id: String,

    /// The 6-digit code
    pub code: String,

    /// Lower-cased destination address, if any
    pub email: Option<String>,

    /// Destination phone number, if any
    pub phone: Option<String>,

    pub purpose: OtpPurpose,

    pub payload: OtpPayload,

    pub issued_at: DateTime<Utc>,

    pub expires_at: DateTime<Utc>,

    pub consumed: bool,
}

impl OtpRecord {
    /// A record is expired strictly after `expires_at`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Live and not yet used
    pub fn is_redeemable_at(&self, now: DateTime<Utc>) -> bool {
        !self.consumed && !self.is_expired_at(now)
    }

    /// Case-insensitive comparison against the stored address
    pub fn matches_email(&self, email: &str) -> bool {
        self.email
            .as_deref()
            .map(|stored| stored.eq_ignore_ascii_case(email.trim()))
            .unwrap_or(false)
    }
}
