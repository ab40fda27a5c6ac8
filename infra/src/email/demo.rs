//! Demo email sender for development

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};

use ev_core::domain::entities::otp_record::OtpPurpose;
use ev_core::services::notification::{DeliveryChannel, DeliveryReceipt, EmailSender};
use ev_shared::contact::mask_email;
use ev_shared::validation::validators::is_valid_email;

/// Logs OTP emails instead of sending them
#[derive(Debug, Default)]
pub struct DemoEmailService {
    counter: AtomicU64,
}

impl DemoEmailService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of emails "sent" so far
    pub fn sent_count(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmailSender for DemoEmailService {
    async fn send_otp_email(
        &self,
        to: &str,
        code: &str,
        name: &str,
        purpose: OtpPurpose,
    ) -> Result<DeliveryReceipt, String> {
        if !is_valid_email(to) {
            return Err("Invalid email address".to_string());
        }

        let count = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let masked = mask_email(to);

        tracing::info!(
            to = %masked,
            name = %name,
            purpose = %purpose,
            code = %code,
            event = "otp_email_demo",
            "DEMO: OTP email not sent"
        );

        Ok(DeliveryReceipt {
            channel: DeliveryChannel::Email,
            message_id: format!("demo-email-{}", count),
            demo_mode: true,
        })
    }
}
