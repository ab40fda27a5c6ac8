//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `environment` - Environment detection and logging configuration
//! - `notification` - Email delivery (SMTP) configuration
//! - `otp` - One-time passcode lifetime and sweep configuration
//! - `server` - HTTP server and CORS configuration

pub mod environment;
pub mod notification;
pub mod otp;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use notification::NotificationConfig;
pub use otp::OtpConfig;
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// OTP registry configuration
    #[serde(default)]
    pub otp: OtpConfig,

    /// Email delivery configuration
    #[serde(default)]
    pub notification: NotificationConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Create the baseline configuration for an environment
    pub fn for_environment(environment: Environment) -> Self {
        let (server, cors) = match environment {
            Environment::Production => (ServerConfig::new("0.0.0.0", 8080), CorsConfig::default()),
            _ => (ServerConfig::default(), CorsConfig::development()),
        };

        Self {
            environment,
            server,
            otp: OtpConfig::default(),
            notification: NotificationConfig::default(),
            cors,
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Whether plaintext codes may be returned to API clients.
    ///
    /// Only ever true outside production, and only when the OTP config opts in.
    pub fn expose_codes(&self) -> bool {
        !self.environment.is_production() && self.otp.expose_codes_in_demo
    }
}
