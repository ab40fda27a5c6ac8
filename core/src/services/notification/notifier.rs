//! Fan-out of a code to the configured channels

use serde::Serialize;
use std::sync::Arc;

use ev_shared::contact::{mask_email, mask_phone_number};

use crate::domain::entities::otp_record::OtpPurpose;

use super::traits::{DeliveryReceipt, EmailSender, SmsSender};

/// What happened on each channel for one issued code
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliverySummary {
    pub email: Option<DeliveryReceipt>,
    pub sms: Option<DeliveryReceipt>,
    /// True when no channel really delivered the code
    pub demo_mode: bool,
}

/// Email and SMS senders chosen at startup
#[derive(Clone)]
pub struct Notifier {
    email: Arc<dyn EmailSender>,
    sms: Arc<dyn SmsSender>,
}

impl Notifier {
    pub fn new(email: Arc<dyn EmailSender>, sms: Arc<dyn SmsSender>) -> Self {
        Self { email, sms }
    }

    /// Send `code` to every contact given.
    ///
    /// A failing channel is logged and skipped; the request that issued the
    /// code still succeeds and the summary reports demo mode.
    pub async fn deliver(
        &self,
        email: Option<&str>,
        phone: Option<&str>,
        code: &str,
        name: &str,
        purpose: OtpPurpose,
    ) -> DeliverySummary {
        let mut summary = DeliverySummary::default();
        let mut delivered = false;
        let mut attempted = false;

        if let Some(to) = email {
            attempted = true;
            match self.email.send_otp_email(to, code, name, purpose).await {
                Ok(receipt) => {
                    delivered |= !receipt.demo_mode;
                    summary.email = Some(receipt);
                }
                Err(e) => {
                    tracing::error!(
                        email = %mask_email(to),
                        purpose = %purpose,
                        error = %e,
                        event = "otp_email_failed",
                        "Failed to email OTP"
                    );
                }
            }
        }

        if let Some(phone) = phone {
            attempted = true;
            match self.sms.send_otp_sms(phone, code, purpose).await {
                Ok(receipt) => {
                    delivered |= !receipt.demo_mode;
                    summary.sms = Some(receipt);
                }
                Err(e) => {
                    tracing::error!(
                        phone = %mask_phone_number(phone),
                        purpose = %purpose,
                        error = %e,
                        event = "otp_sms_failed",
                        "Failed to send OTP by SMS"
                    );
                }
            }
        }

        summary.demo_mode = attempted && !delivered;
        summary
    }
}
