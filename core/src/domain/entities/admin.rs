//! Administrator account and the session handed out after an OTP login.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    #[default]
    Admin,
    SuperAdmin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admin {
    pub id: Uuid,
    pub name: String,
    /// Stored lower-cased
    pub email: String,
    pub role: AdminRole,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Admin {
    pub fn new(name: impl Into<String>, email: &str, role: AdminRole) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.trim().to_lowercase(),
            role,
            is_active: true,
            last_login: None,
            created_at: Utc::now(),
        }
    }
}

/// Result of a successful admin OTP login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: AdminRole,
    pub session_created: DateTime<Utc>,
    pub otp_verified: bool,
}

impl AdminSession {
    pub fn for_admin(admin: &Admin, now: DateTime<Utc>) -> Self {
        Self {
            id: admin.id,
            name: admin.name.clone(),
            email: admin.email.clone(),
            role: admin.role,
            session_created: now,
            otp_verified: true,
        }
    }
}
