//! Email delivery configuration

use serde::{Deserialize, Serialize};

/// SMTP settings for OTP emails.
///
/// Delivery falls back to demo mode (codes logged, not mailed) unless both
/// `smtp_username` and `smtp_password` are present.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationConfig {
    /// SMTP relay host
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,

    /// SMTP submission port
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// SMTP account name
    #[serde(default)]
    pub smtp_username: Option<String>,

    /// SMTP account password
    #[serde(default)]
    pub smtp_password: Option<String>,

    /// Sender address; defaults to the SMTP username
    #[serde(default)]
    pub from_email: Option<String>,

    /// Sender display name
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: None,
            smtp_password: None,
            from_email: None,
            from_name: default_from_name(),
        }
    }
}

impl NotificationConfig {
    /// Whether real SMTP delivery is configured
    pub fn smtp_enabled(&self) -> bool {
        matches!(
            (&self.smtp_username, &self.smtp_password),
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty()
        )
    }

    /// Address used in the `From` header
    pub fn sender_address(&self) -> Option<&str> {
        self.from_email
            .as_deref()
            .or(self.smtp_username.as_deref())
    }
}

fn default_smtp_host() -> String {
    String::from("smtp.gmail.com")
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_name() -> String {
    String::from("Sports Day 2K25")
}
