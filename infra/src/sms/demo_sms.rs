//! Demo SMS sender for development

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};

use ev_core::domain::entities::otp_record::OtpPurpose;
use ev_core::services::notification::{DeliveryChannel, DeliveryReceipt, SmsSender};
use ev_shared::contact::{digits_only, mask_phone_number};

use crate::InfrastructureError;

/// Text that would be sent for a code
pub fn sms_text(code: &str, purpose: OtpPurpose) -> String {
    let action = match purpose {
        OtpPurpose::Registration => "registration",
        OtpPurpose::Deletion => "deletion",
        OtpPurpose::AdminLogin => "admin login",
    };
    format!(
        "Your Sports Day {} OTP is {}. Do not share it with anyone.",
        action, code
    )
}

/// Logs OTP text messages instead of sending them
#[derive(Debug, Default)]
pub struct DemoSmsService {
    counter: AtomicU64,
}

impl DemoSmsService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of messages "sent" so far
    pub fn message_count(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }

    fn send(&self, phone: &str, code: &str, purpose: OtpPurpose) -> Result<String, InfrastructureError> {
        let clean = digits_only(phone);
        if clean.is_empty() {
            return Err(InfrastructureError::Sms(
                "Invalid phone number: no digits".to_string(),
            ));
        }

        let count = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let text = sms_text(code, purpose);

        tracing::info!(
            phone = %mask_phone_number(&clean),
            text = %text,
            event = "otp_sms_demo",
            "DEMO: OTP SMS not sent"
        );

        Ok(format!("demo-sms-{}", count))
    }
}

#[async_trait]
impl SmsSender for DemoSmsService {
    async fn send_otp_sms(
        &self,
        phone: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<DeliveryReceipt, String> {
        let message_id = self.send(phone, code, purpose).map_err(|e| e.to_string())?;

        Ok(DeliveryReceipt {
            channel: DeliveryChannel::Sms,
            message_id,
            demo_mode: true,
        })
    }
}
