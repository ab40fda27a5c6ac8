//! Traits for email and SMS integration

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::entities::otp_record::OtpPurpose;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryChannel {
    Email,
    Sms,
}

/// Outcome of handing a code to a channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryReceipt {
    pub channel: DeliveryChannel,
    /// Provider message id, or a locally generated one in demo mode
    pub message_id: String,
    /// The code was logged instead of actually sent
    pub demo_mode: bool,
}

/// Trait for email delivery integration
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Send a code to `to`, addressing the recipient by `name`
    async fn send_otp_email(
        &self,
        to: &str,
        code: &str,
        name: &str,
        purpose: OtpPurpose,
    ) -> Result<DeliveryReceipt, String>;
}

/// Trait for SMS delivery integration
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Send a code to `phone`
    async fn send_otp_sms(
        &self,
        phone: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<DeliveryReceipt, String>;
}
