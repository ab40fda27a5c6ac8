//! Configuration for the OTP registry

use ev_shared::OtpConfig;

use crate::domain::entities::otp_record::DEFAULT_EXPIRATION_MINUTES;

/// Configuration for the OTP registry
#[derive(Debug, Clone)]
pub struct OtpRegistryConfig {
    /// Number of minutes before an issued code expires
    pub code_expiration_minutes: i64,
}

impl Default for OtpRegistryConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
        }
    }
}

impl From<&OtpConfig> for OtpRegistryConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            code_expiration_minutes: config.expiry_minutes,
        }
    }
}
