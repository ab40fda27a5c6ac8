//! Outbound delivery of codes by email and SMS

mod notifier;
mod traits;

pub use notifier::{DeliverySummary, Notifier};
pub use traits::{DeliveryChannel, DeliveryReceipt, EmailSender, SmsSender};
