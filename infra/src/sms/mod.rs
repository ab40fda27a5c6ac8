//! SMS Service Module
//!
//! Only a demo sender exists: it normalizes the number, logs the code with
//! the number masked, and reports `demo_mode`.

pub mod demo_sms;

pub use demo_sms::{sms_text, DemoSmsService};

#[cfg(test)]
mod tests;
