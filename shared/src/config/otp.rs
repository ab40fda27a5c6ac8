//! One-time passcode configuration

use serde::{Deserialize, Serialize};

/// OTP lifetime and housekeeping configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Minutes a freshly issued code stays valid
    #[serde(default = "default_expiry_minutes")]
    pub expiry_minutes: i64,

    /// How often the background sweep removes expired codes (seconds)
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,

    /// Return plaintext codes to clients when delivery ran in demo mode.
    /// Ignored in production.
    #[serde(default = "default_expose_codes")]
    pub expose_codes_in_demo: bool,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            expiry_minutes: default_expiry_minutes(),
            sweep_interval_seconds: default_sweep_interval(),
            expose_codes_in_demo: default_expose_codes(),
        }
    }
}

fn default_expiry_minutes() -> i64 {
    10
}

fn default_sweep_interval() -> u64 {
    60
}

fn default_expose_codes() -> bool {
    true
}
