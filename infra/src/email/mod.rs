//! Email Service Module
//!
//! OTP emails go out over SMTP when credentials are configured. Without them
//! the demo sender logs the code instead, and receipts are flagged
//! `demo_mode` so the API may hand the code back to the client.

use std::sync::Arc;

use ev_core::services::notification::EmailSender;
use ev_shared::NotificationConfig;

pub mod demo;
pub mod smtp;
pub mod templates;

pub use demo::DemoEmailService;
pub use smtp::SmtpEmailService;

#[cfg(test)]
mod tests;

/// Create an email sender based on configuration
///
/// Falls back to the demo sender when SMTP is not configured or the
/// transport cannot be built.
pub fn create_email_service(
    config: &NotificationConfig,
    code_lifetime_minutes: i64,
) -> Arc<dyn EmailSender> {
    if !config.smtp_enabled() {
        tracing::warn!(
            event = "email_demo_mode",
            "Email credentials not found, OTP emails will be logged instead of sent"
        );
        return Arc::new(DemoEmailService::new());
    }

    match SmtpEmailService::new(config, code_lifetime_minutes) {
        Ok(service) => {
            tracing::info!(
                host = %config.smtp_host,
                port = config.smtp_port,
                event = "email_smtp_ready",
                "SMTP email service initialized"
            );
            Arc::new(service)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize SMTP email service");
            tracing::warn!("Falling back to demo email service");
            Arc::new(DemoEmailService::new())
        }
    }
}
