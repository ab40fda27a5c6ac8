//! OTP registry module
//!
//! This module owns every outstanding one-time passcode:
//! - Code generation and issuance under an opaque identifier
//! - Single-use verification scoped to a purpose
//! - Email-keyed lookup for clients that lost their identifier
//! - Expiry, both lazily on access and by a periodic sweep

mod cleanup;
mod config;
mod registry;
mod traits;
mod types;

#[cfg(test)]
pub(crate) mod tests;

pub use cleanup::{CleanupResult, OtpCleanupConfig, OtpCleanupService};
pub use config::OtpRegistryConfig;
pub use registry::OtpRegistry;
pub use traits::{Clock, IdGenerator, RandomIdGenerator, SystemClock};
pub use types::{IssueOtp, OtpRegistryStats};
