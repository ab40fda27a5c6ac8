//! SMTP email sender
//!
//! Sends OTP emails through an authenticated SMTP relay over TLS. Addresses
//! are parsed before the transport is touched, so a bad recipient fails
//! without a network round trip.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use uuid::Uuid;

use ev_core::domain::entities::otp_record::OtpPurpose;
use ev_core::services::notification::{DeliveryChannel, DeliveryReceipt, EmailSender};
use ev_shared::contact::mask_email;
use ev_shared::NotificationConfig;

use super::templates::otp_email_html;
use crate::InfrastructureError;

/// SMTP-backed email sender
pub struct SmtpEmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    event_name: String,
    code_lifetime_minutes: i64,
}

impl SmtpEmailService {
    /// Build the transport from configuration
    ///
    /// # Errors
    /// `InfrastructureError::Config` when credentials or the sender address
    /// are missing or malformed.
    pub fn new(
        config: &NotificationConfig,
        code_lifetime_minutes: i64,
    ) -> Result<Self, InfrastructureError> {
        let (username, password) = match (&config.smtp_username, &config.smtp_password) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => {
                (user.clone(), pass.clone())
            }
            _ => {
                return Err(InfrastructureError::Config(
                    "SMTP username and password are required".to_string(),
                ))
            }
        };

        let sender = config
            .sender_address()
            .ok_or_else(|| InfrastructureError::Config("Sender address not set".to_string()))?;
        let from = format!("{} <{}>", config.from_name, sender)
            .parse::<Mailbox>()
            .map_err(|e| InfrastructureError::Config(format!("Invalid from address: {}", e)))?;

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| {
                InfrastructureError::Config(format!("Failed to create SMTP transport: {}", e))
            })?
            .port(config.smtp_port)
            .credentials(Credentials::new(username, password))
            .build();

        Ok(Self {
            mailer,
            from,
            event_name: config.from_name.clone(),
            code_lifetime_minutes,
        })
    }

    pub(crate) fn build_message(
        &self,
        to: &str,
        code: &str,
        name: &str,
        purpose: OtpPurpose,
    ) -> Result<Message, InfrastructureError> {
        let recipient = to
            .trim()
            .parse::<Mailbox>()
            .map_err(|e| InfrastructureError::Email(format!("Invalid email address: {}", e)))?;

        let body = otp_email_html(
            name,
            code,
            purpose,
            self.code_lifetime_minutes,
            &self.event_name,
        );

        Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(purpose.email_subject())
            .header(ContentType::TEXT_HTML)
            .body(body)
            .map_err(|e| InfrastructureError::Email(format!("Failed to build email: {}", e)))
    }

    async fn send(
        &self,
        to: &str,
        code: &str,
        name: &str,
        purpose: OtpPurpose,
    ) -> Result<String, InfrastructureError> {
        let message = self.build_message(to, code, name, purpose)?;

        self.mailer
            .send(message)
            .await
            .map_err(|e| InfrastructureError::Email(format!("Failed to send email: {}", e)))?;

        let message_id = Uuid::new_v4().to_string();
        tracing::info!(
            to = %mask_email(to),
            purpose = %purpose,
            message_id = %message_id,
            event = "otp_email_sent",
            "OTP email sent"
        );
        Ok(message_id)
    }
}

#[async_trait]
impl EmailSender for SmtpEmailService {
    async fn send_otp_email(
        &self,
        to: &str,
        code: &str,
        name: &str,
        purpose: OtpPurpose,
    ) -> Result<DeliveryReceipt, String> {
        let message_id = self
            .send(to, code, name, purpose)
            .await
            .map_err(|e| e.to_string())?;

        Ok(DeliveryReceipt {
            channel: DeliveryChannel::Email,
            message_id,
            demo_mode: false,
        })
    }
}
