//! Business services containing domain logic and use cases.

pub mod flows;
pub mod notification;
pub mod otp;

// Re-export commonly used types
pub use flows::{
    AdminLoginService, AdminOtpVerification, DeletedParticipant, DeletionOtpRequest,
    DeletionService, FlowConfig, IssuedOtp, ParticipantForm, RegistrationOtpRequest,
    RegistrationService, ReviewService,
};
pub use notification::{
    DeliveryChannel, DeliveryReceipt, DeliverySummary, EmailSender, Notifier, SmsSender,
};
pub use otp::{
    CleanupResult, Clock, IdGenerator, IssueOtp, OtpCleanupConfig, OtpCleanupService,
    OtpRegistry, OtpRegistryConfig, OtpRegistryStats, RandomIdGenerator, SystemClock,
};
