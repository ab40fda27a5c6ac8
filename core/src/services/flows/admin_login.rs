//! Passwordless admin login by emailed code

use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use ev_shared::contact::{mask_email, normalize_email};

use crate::domain::entities::admin::AdminSession;
use crate::domain::entities::otp_record::{OtpPayload, OtpPurpose};
use crate::errors::{DomainError, DomainResult, OtpFailure};
use crate::repositories::AdminRepository;
use crate::services::notification::Notifier;
use crate::services::otp::{
    Clock, IdGenerator, IssueOtp, OtpRegistry, RandomIdGenerator, SystemClock,
};

use super::{payload_str, require, FlowConfig, IssuedOtp};

/// Code submission for an admin login.
///
/// `otp_id` names the record to check. When the client lost it, `email`
/// recovers the id of the first issued, unused admin-login record for that
/// address; the code is still checked against that one record only.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminOtpVerification {
    pub otp_id: Option<String>,
    pub code: String,
    pub email: Option<String>,
}

/// Admin login flow
pub struct AdminLoginService<
    A: AdminRepository,
    C: Clock = SystemClock,
    G: IdGenerator = RandomIdGenerator,
> {
    registry: Arc<OtpRegistry<C, G>>,
    admins: Arc<A>,
    notifier: Notifier,
    clock: Arc<C>,
    config: FlowConfig,
}

impl<A: AdminRepository, C: Clock, G: IdGenerator> AdminLoginService<A, C, G> {
    pub fn new(
        registry: Arc<OtpRegistry<C, G>>,
        admins: Arc<A>,
        notifier: Notifier,
        clock: Arc<C>,
        config: FlowConfig,
    ) -> Self {
        Self {
            registry,
            admins,
            notifier,
            clock,
            config,
        }
    }

    /// Email a login code to an active admin
    pub async fn request_otp(&self, email: &str) -> DomainResult<IssuedOtp> {
        if !require(email) {
            return Err(DomainError::validation("Email is required"));
        }
        let email = normalize_email(email);

        let admin = self
            .admins
            .find_by_email(&email)
            .await?
            .filter(|admin| admin.is_active)
            .ok_or_else(|| {
                tracing::warn!(
                    email = %mask_email(&email),
                    event = "admin_otp_unknown_email",
                    "Admin login OTP requested for unknown address"
                );
                DomainError::not_found("Admin not found")
            })?;

        let mut payload = OtpPayload::new();
        payload.insert("email".to_string(), json!(admin.email));
        payload.insert("name".to_string(), json!(admin.name));
        payload.insert("admin_id".to_string(), json!(admin.id.to_string()));

        let code = self.registry.generate_code();
        let otp_id = self
            .registry
            .issue(IssueOtp {
                email: Some(admin.email.clone()),
                phone: None,
                code: code.clone(),
                purpose: OtpPurpose::AdminLogin,
                payload,
            })
            .await?;

        let delivery = self
            .notifier
            .deliver(Some(&admin.email), None, &code, &admin.name, OtpPurpose::AdminLogin)
            .await;

        tracing::info!(
            otp_id = %otp_id,
            email = %mask_email(&admin.email),
            demo_mode = delivery.demo_mode,
            event = "admin_otp_requested",
            "Admin login OTP requested"
        );

        Ok(IssuedOtp::new(otp_id, code, delivery, &self.config))
    }

    /// Check the code and open an admin session
    pub async fn verify_otp(&self, request: AdminOtpVerification) -> DomainResult<AdminSession> {
        if !require(&request.code) {
            return Err(DomainError::validation("OTP is required"));
        }

        let otp_id = match request.otp_id.as_deref().filter(|id| require(id)) {
            Some(id) => id.to_string(),
            None => {
                let email = request
                    .email
                    .as_deref()
                    .filter(|e| require(e))
                    .ok_or_else(|| DomainError::validation("OTP ID or email is required"))?;
                self.registry
                    .lookup_by_email_for(email, OtpPurpose::AdminLogin)
                    .await
                    .map(|record| record.id)
                    .ok_or(OtpFailure::NotFoundOrExpired { expired: false })?
            }
        };

        let payload = self
            .registry
            .verify(&otp_id, &request.code, Some(OtpPurpose::AdminLogin))
            .await?;
        self.registry.discard(&otp_id).await;

        let email = payload_str(&payload, "email")?;
        let admin = self
            .admins
            .find_by_email(&email)
            .await?
            .filter(|admin| admin.is_active)
            .ok_or_else(|| DomainError::not_found("Admin not found"))?;

        let now = self.clock.now();
        self.admins.update_last_login(admin.id, now).await?;

        tracing::info!(
            admin_id = %admin.id,
            email = %mask_email(&admin.email),
            event = "admin_login",
            "Admin logged in with OTP"
        );

        Ok(AdminSession::for_admin(&admin, now))
    }
}
