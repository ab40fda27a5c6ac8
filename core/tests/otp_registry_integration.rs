//! Integration tests for the OTP registry with the system clock and OS ids

#[cfg(test)]
mod tests {
    use serde_json::json;
    use std::sync::Arc;

    use ev_core::domain::entities::otp_record::{OtpPayload, OtpPurpose};
    use ev_core::errors::OtpFailure;
    use ev_core::services::otp::{
        IssueOtp, OtpCleanupConfig, OtpCleanupService, OtpRegistry, OtpRegistryConfig,
    };

    fn deletion_request(code: &str) -> IssueOtp {
        let mut payload = OtpPayload::new();
        payload.insert("roll_no".to_string(), json!("CS21042"));
        IssueOtp {
            email: Some("a@x.com".to_string()),
            phone: None,
            code: code.to_string(),
            purpose: OtpPurpose::Deletion,
            payload,
        }
    }

    #[tokio::test]
    async fn test_deletion_code_lifecycle() {
        let registry = OtpRegistry::with_system_defaults(OtpRegistryConfig::default());

        let id = registry.issue(deletion_request("482913")).await.unwrap();
        assert_eq!(id.len(), 32);

        let payload = registry
            .verify(&id, "482913", Some(OtpPurpose::Deletion))
            .await
            .unwrap();
        assert_eq!(payload.get("roll_no"), Some(&json!("CS21042")));

        assert_eq!(
            registry.verify(&id, "482913", Some(OtpPurpose::Deletion)).await,
            Err(OtpFailure::AlreadyUsed)
        );
    }

    #[tokio::test]
    async fn test_zero_lifetime_codes_expire_on_sweep() {
        let registry = Arc::new(OtpRegistry::with_system_defaults(OtpRegistryConfig {
            code_expiration_minutes: 0,
        }));
        let id = registry.issue(deletion_request("135790")).await.unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        let cleanup = OtpCleanupService::new(registry.clone(), OtpCleanupConfig::default());
        assert_eq!(cleanup.run_cleanup().await.expired_removed, 1);
        assert_eq!(
            registry.verify(&id, "135790", None).await,
            Err(OtpFailure::NotFoundOrExpired { expired: false })
        );
    }

    #[tokio::test]
    async fn test_lookup_by_email_returns_first_of_mixed_purposes() {
        let registry = OtpRegistry::with_system_defaults(OtpRegistryConfig::default());

        let first = registry.issue(deletion_request("111111")).await.unwrap();
        let mut admin = deletion_request("222222");
        admin.purpose = OtpPurpose::AdminLogin;
        registry.issue(admin).await.unwrap();

        let found = registry.lookup_by_email("A@X.COM").await.unwrap();
        assert_eq!(found.id, first);
        assert_eq!(found.purpose, OtpPurpose::Deletion);
    }

    #[test]
    fn test_root_reexports_name_entity_types() {
        let filter = ev_core::ParticipantFilter {
            sport: Some(ev_core::Sport::KhoKho.as_str().to_string()),
            ..Default::default()
        };
        assert_eq!(filter.sport.as_deref(), Some("Kho-Kho"));
        assert_eq!(ev_core::AdminRole::default(), ev_core::AdminRole::Admin);
        assert_eq!(ev_core::OtpPurpose::Registration, OtpPurpose::Registration);

        let failure: ev_core::DomainError = ev_core::OtpFailure::InvalidCode.into();
        assert!(matches!(failure, ev_core::DomainError::Otp(_)));
    }
}
