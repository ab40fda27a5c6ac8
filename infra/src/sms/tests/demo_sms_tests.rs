//! Unit tests for the demo SMS sender

use ev_core::domain::entities::otp_record::OtpPurpose;
use ev_core::services::notification::{DeliveryChannel, SmsSender};

use crate::sms::{sms_text, DemoSmsService};

#[tokio::test]
async fn test_demo_sms_send_success() {
    let service = DemoSmsService::new();

    let receipt = service
        .send_otp_sms("98765 43210", "482913", OtpPurpose::Deletion)
        .await
        .unwrap();

    assert_eq!(receipt.channel, DeliveryChannel::Sms);
    assert!(receipt.demo_mode);
    assert_eq!(receipt.message_id, "demo-sms-1");
    assert_eq!(service.message_count(), 1);
}

#[tokio::test]
async fn test_demo_sms_rejects_number_without_digits() {
    let service = DemoSmsService::new();

    let err = service
        .send_otp_sms("n/a", "482913", OtpPurpose::Registration)
        .await
        .unwrap_err();

    assert!(err.contains("Invalid phone number"));
    assert_eq!(service.message_count(), 0);
}

#[test]
fn test_sms_text_names_action() {
    let text = sms_text("482913", OtpPurpose::Deletion);
    assert!(text.contains("deletion"));
    assert!(text.contains("482913"));
}
