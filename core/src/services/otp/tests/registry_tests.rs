//! Unit tests for the OTP registry

use chrono::Duration;
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::entities::otp_record::{OtpPayload, OtpPurpose, CODE_LENGTH};
use crate::errors::{DomainError, OtpFailure};
use crate::services::otp::{Clock, IssueOtp, OtpRegistry, OtpRegistryConfig, OtpRegistryStats};

use super::mocks::{test_registry, ManualClock, ScriptedIdGenerator, TestRegistry};

fn request(email: &str, code: &str, purpose: OtpPurpose) -> IssueOtp {
    let mut payload = OtpPayload::new();
    payload.insert("email".to_string(), json!(email));
    IssueOtp {
        email: Some(email.to_string()),
        phone: Some("9876543210".to_string()),
        code: code.to_string(),
        purpose,
        payload,
    }
}

async fn issue(registry: &TestRegistry, email: &str, code: &str, purpose: OtpPurpose) -> String {
    registry.issue(request(email, code, purpose)).await.unwrap()
}

#[test]
fn test_generate_code_range() {
    let (registry, _) = test_registry();
    for _ in 0..500 {
        let code = registry.generate_code();
        assert_eq!(code.len(), CODE_LENGTH);
        let value: u32 = code.parse().unwrap();
        assert!((100_000..=999_999).contains(&value));
    }
}

#[tokio::test]
async fn test_issue_stores_normalized_record() {
    let (registry, clock) = test_registry();

    let id = issue(&registry, "  Student@College.EDU ", "482913", OtpPurpose::Registration).await;
    let record = registry.get(&id).await.unwrap();

    assert_eq!(record.email.as_deref(), Some("student@college.edu"));
    assert_eq!(record.phone.as_deref(), Some("9876543210"));
    assert_eq!(record.code, "482913");
    assert_eq!(record.purpose, OtpPurpose::Registration);
    assert!(!record.consumed);
    assert_eq!(record.issued_at, clock.now());
    assert_eq!(record.expires_at, record.issued_at + Duration::minutes(10));
    assert_eq!(
        record.payload.get("created"),
        Some(&json!(record.issued_at.to_rfc3339()))
    );
}

#[tokio::test]
async fn test_issue_returns_distinct_ids_and_leaves_others_untouched() {
    let (registry, _) = test_registry();

    let first = issue(&registry, "a@x.com", "111111", OtpPurpose::Registration).await;
    let before = registry.get(&first).await.unwrap();

    let mut ids = HashSet::new();
    ids.insert(first.clone());
    for _ in 0..50 {
        let id = issue(&registry, "a@x.com", "222222", OtpPurpose::Registration).await;
        assert!(ids.insert(id));
    }

    assert_eq!(registry.get(&first).await.unwrap(), before);
    assert_eq!(registry.len().await, 51);
}

#[tokio::test]
async fn test_issue_rejects_malformed_code() {
    let (registry, _) = test_registry();

    for bad in ["12345", "1234567", "12a456", ""] {
        let result = registry
            .issue(request("a@x.com", bad, OtpPurpose::Deletion))
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }
    assert!(registry.is_empty().await);
}

#[tokio::test]
async fn test_issue_retries_on_id_collision() {
    let clock = Arc::new(ManualClock::at_epoch());
    let registry = OtpRegistry::new(
        clock,
        Arc::new(ScriptedIdGenerator::new(&["dup", "dup", "fresh"])),
        OtpRegistryConfig::default(),
    );

    let first = registry
        .issue(request("a@x.com", "111111", OtpPurpose::Deletion))
        .await
        .unwrap();
    let second = registry
        .issue(request("b@x.com", "222222", OtpPurpose::Deletion))
        .await
        .unwrap();

    assert_eq!(first, "dup");
    assert_eq!(second, "fresh");
}

#[tokio::test]
async fn test_issue_fails_when_id_source_fails() {
    let registry = OtpRegistry::new(
        Arc::new(ManualClock::at_epoch()),
        Arc::new(ScriptedIdGenerator::new(&[])),
        OtpRegistryConfig::default(),
    );

    let result = registry
        .issue(request("a@x.com", "111111", OtpPurpose::Deletion))
        .await;
    assert!(matches!(result, Err(DomainError::Internal { .. })));
}

#[tokio::test]
async fn test_deletion_code_single_use() {
    let (registry, _) = test_registry();
    let id = issue(&registry, "a@x.com", "482913", OtpPurpose::Deletion).await;

    let payload = registry
        .verify(&id, "482913", Some(OtpPurpose::Deletion))
        .await
        .unwrap();
    assert_eq!(payload.get("email"), Some(&json!("a@x.com")));
    assert!(payload.contains_key("created"));

    let second = registry.verify(&id, "482913", Some(OtpPurpose::Deletion)).await;
    assert_eq!(second, Err(OtpFailure::AlreadyUsed));

    // Consumed records stay until swept or discarded
    assert!(registry.get(&id).await.unwrap().consumed);
}

#[tokio::test]
async fn test_unknown_id() {
    let (registry, _) = test_registry();
    let result = registry.verify("missing", "123456", None).await;
    assert_eq!(result, Err(OtpFailure::NotFoundOrExpired { expired: false }));
}

#[tokio::test]
async fn test_expiry_window() {
    let (registry, clock) = test_registry();
    let id = issue(&registry, "a@x.com", "654321", OtpPurpose::Registration).await;
    let late = issue(&registry, "b@x.com", "654321", OtpPurpose::Registration).await;

    // Exactly at the deadline the code still works
    clock.advance(Duration::minutes(10));
    assert!(registry.verify(&id, "654321", None).await.is_ok());

    // One second later it is gone
    clock.advance(Duration::seconds(1));
    assert_eq!(
        registry.verify(&late, "654321", None).await,
        Err(OtpFailure::NotFoundOrExpired { expired: true })
    );
    assert!(registry.get(&late).await.is_none());
    assert_eq!(
        registry.verify(&late, "654321", None).await,
        Err(OtpFailure::NotFoundOrExpired { expired: false })
    );
}

#[tokio::test]
async fn test_expiry_takes_precedence_over_consumed() {
    let (registry, clock) = test_registry();
    let id = issue(&registry, "a@x.com", "654321", OtpPurpose::Deletion).await;
    registry.verify(&id, "654321", None).await.unwrap();

    clock.advance(Duration::minutes(10) + Duration::seconds(1));
    assert_eq!(
        registry.verify(&id, "654321", None).await,
        Err(OtpFailure::NotFoundOrExpired { expired: true })
    );
}

#[tokio::test]
async fn test_wrong_code_does_not_consume() {
    let (registry, _) = test_registry();
    let id = issue(&registry, "a@x.com", "111222", OtpPurpose::Registration).await;

    for _ in 0..3 {
        assert_eq!(
            registry.verify(&id, "999999", Some(OtpPurpose::Registration)).await,
            Err(OtpFailure::InvalidCode)
        );
    }
    assert!(!registry.get(&id).await.unwrap().consumed);
    assert!(registry
        .verify(&id, "111222", Some(OtpPurpose::Registration))
        .await
        .is_ok());
}

#[tokio::test]
async fn test_padded_code_is_not_equal() {
    let (registry, _) = test_registry();
    let id = issue(&registry, "a@x.com", "482913", OtpPurpose::Deletion).await;

    assert_eq!(
        registry.verify(&id, " 482913\n", Some(OtpPurpose::Deletion)).await,
        Err(OtpFailure::InvalidCode)
    );
    assert!(!registry.get(&id).await.unwrap().consumed);
    assert!(registry
        .verify(&id, "482913", Some(OtpPurpose::Deletion))
        .await
        .is_ok());
}

#[tokio::test]
async fn test_purpose_isolation() {
    let (registry, _) = test_registry();
    let id = issue(&registry, "a@x.com", "333444", OtpPurpose::Registration).await;

    assert_eq!(
        registry.verify(&id, "333444", Some(OtpPurpose::AdminLogin)).await,
        Err(OtpFailure::PurposeMismatch)
    );
    assert!(!registry.get(&id).await.unwrap().consumed);

    // Purpose is checked before the code, so a wrong code reports the mismatch
    assert_eq!(
        registry.verify(&id, "000000", Some(OtpPurpose::Deletion)).await,
        Err(OtpFailure::PurposeMismatch)
    );

    assert!(registry
        .verify(&id, "333444", Some(OtpPurpose::Registration))
        .await
        .is_ok());
}

#[tokio::test]
async fn test_verify_without_purpose_accepts_any() {
    let (registry, _) = test_registry();
    let id = issue(&registry, "admin@x.com", "555666", OtpPurpose::AdminLogin).await;
    assert!(registry.verify(&id, "555666", None).await.is_ok());
}

#[tokio::test]
async fn test_sweep_removes_only_expired() {
    let (registry, clock) = test_registry();
    let r1 = issue(&registry, "a@x.com", "111111", OtpPurpose::Deletion).await;

    clock.advance(Duration::minutes(6));
    let r2 = issue(&registry, "b@x.com", "222222", OtpPurpose::Deletion).await;

    clock.advance(Duration::minutes(5));
    assert_eq!(registry.sweep_expired().await, 1);
    assert!(registry.get(&r1).await.is_none());
    assert!(registry.get(&r2).await.is_some());

    assert_eq!(registry.sweep_expired().await, 0);
}

#[tokio::test]
async fn test_sweep_removes_consumed_records_and_skips_discarded() {
    let (registry, clock) = test_registry();
    let consumed = issue(&registry, "a@x.com", "111111", OtpPurpose::Deletion).await;
    let discarded = issue(&registry, "b@x.com", "222222", OtpPurpose::Deletion).await;
    let _unused = issue(&registry, "c@x.com", "333333", OtpPurpose::Deletion).await;

    registry.verify(&consumed, "111111", None).await.unwrap();
    assert!(registry.discard(&discarded).await);
    assert!(!registry.discard(&discarded).await);

    clock.advance(Duration::minutes(11));
    assert_eq!(registry.sweep_expired().await, 2);
    assert!(registry.is_empty().await);
}

#[tokio::test]
async fn test_lookup_by_email_prefers_first_issued() {
    let (registry, clock) = test_registry();

    let registration = issue(&registry, "a@x.com", "111111", OtpPurpose::Registration).await;
    // Same instant, different purpose
    let admin = issue(&registry, "A@X.com", "222222", OtpPurpose::AdminLogin).await;

    let found = registry.lookup_by_email("a@X.COM").await.unwrap();
    assert_eq!(found.id, registration);

    clock.advance(Duration::minutes(1));
    issue(&registry, "a@x.com", "333333", OtpPurpose::Deletion).await;
    assert_eq!(registry.lookup_by_email("a@x.com").await.unwrap().id, registration);

    let for_admin = registry
        .lookup_by_email_for("a@x.com", OtpPurpose::AdminLogin)
        .await
        .unwrap();
    assert_eq!(for_admin.id, admin);

    assert!(registry.lookup_by_email("nobody@x.com").await.is_none());
}

#[tokio::test]
async fn test_lookup_ignores_expired_and_consumed_for_recovery() {
    let (registry, clock) = test_registry();

    let old = issue(&registry, "a@x.com", "111111", OtpPurpose::AdminLogin).await;
    clock.advance(Duration::minutes(8));
    let fresh = issue(&registry, "a@x.com", "222222", OtpPurpose::AdminLogin).await;
    clock.advance(Duration::minutes(3));

    // `old` is past its deadline but not yet swept
    assert_eq!(registry.lookup_by_email("a@x.com").await.unwrap().id, fresh);
    assert!(registry.get(&old).await.is_some());

    registry.verify(&fresh, "222222", None).await.unwrap();
    assert!(registry
        .lookup_by_email_for("a@x.com", OtpPurpose::AdminLogin)
        .await
        .is_none());
    // Plain lookup still sees the consumed record
    assert_eq!(registry.lookup_by_email("a@x.com").await.unwrap().id, fresh);
}

#[tokio::test]
async fn test_stats_counts_states() {
    let (registry, clock) = test_registry();

    let stale = issue(&registry, "a@x.com", "111111", OtpPurpose::Registration).await;
    clock.advance(Duration::minutes(11));
    let used = issue(&registry, "b@x.com", "222222", OtpPurpose::Deletion).await;
    issue(&registry, "c@x.com", "333333", OtpPurpose::AdminLogin).await;
    registry.verify(&used, "222222", None).await.unwrap();

    let stats = registry.stats().await;
    assert_eq!(
        stats,
        OtpRegistryStats {
            live: 1,
            consumed: 1,
            expired: 1
        }
    );
    assert_eq!(stats.total(), 3);
    assert!(registry.get(&stale).await.is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_verification_succeeds_once() {
    let (registry, _) = test_registry();
    let id = issue(&registry, "a@x.com", "777888", OtpPurpose::Deletion).await;

    let mut handles = Vec::new();
    for _ in 0..16 {
        let registry = registry.clone();
        let id = id.clone();
        handles.push(tokio::spawn(async move {
            registry.verify(&id, "777888", Some(OtpPurpose::Deletion)).await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(failure) => assert_eq!(failure, OtpFailure::AlreadyUsed),
        }
    }
    assert_eq!(successes, 1);
}
