//! Server settings
//!
//! Layers, lowest priority first:
//! 1. built-in defaults for the detected environment
//! 2. optional `config.<env>.toml` in the working directory
//! 3. `APP__SECTION__KEY` environment variables (e.g. `APP__SERVER__PORT=9090`)
//!
//! `EMAIL_USER` / `EMAIL_PASS` are still honoured for SMTP credentials, and
//! `ADMIN_EMAIL` / `ADMIN_NAME` add one admin account on top of any
//! `[[admins]]` entries in the file.

use config::{Config, ConfigError, File};
use std::env;

use ev_infra::AdminSeed;
use ev_shared::{AppConfig, Environment};

#[derive(Debug, Clone)]
pub struct Settings {
    pub app: AppConfig,
    pub admins: Vec<AdminSeed>,
}

impl Settings {
    /// Load settings from `.env`, the config file and the environment
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let environment = Environment::from_env();

        let defaults = AppConfig::for_environment(environment);
        let config = Config::builder()
            .add_source(Config::try_from(&defaults)?)
            .add_source(File::with_name(environment.config_file()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut app: AppConfig = config.clone().try_deserialize()?;
        // The detected environment wins over a stale value in the file
        app.environment = environment;
        apply_legacy_email_vars(&mut app);

        let mut admins: Vec<AdminSeed> = config.get("admins").unwrap_or_default();
        if let Some(seed) = admin_from_env() {
            admins.push(seed);
        }

        Ok(Self { app, admins })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn apply_legacy_email_vars(app: &mut AppConfig) {
    if app.notification.smtp_username.is_none() {
        app.notification.smtp_username = non_empty_var("EMAIL_USER");
    }
    if app.notification.smtp_password.is_none() {
        app.notification.smtp_password = non_empty_var("EMAIL_PASS");
    }
}

fn admin_from_env() -> Option<AdminSeed> {
    let email = non_empty_var("ADMIN_EMAIL")?;
    let name = non_empty_var("ADMIN_NAME").unwrap_or_else(|| "Administrator".to_string());
    Some(AdminSeed {
        name,
        email,
        role: Default::default(),
    })
}
