//! Dashboard user profiles and access levels.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a dashboard user is allowed to manage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    /// Full access, including user management.
    Admin,
    /// Manages staff, schedules and costs.
    #[serde(alias = "gerente")]
    Manager,
    /// Read-only staff access.
    #[default]
    #[serde(alias = "funcionario")]
    Staff,
}

/// A dashboard user. Credentials live with the authentication provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Identifier assigned by the document store.
    #[serde(default)]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Login email, unique across profiles.
    pub email: String,
    /// Access level.
    #[serde(default, alias = "role")]
    pub access: AccessLevel,
    /// When the profile was created.
    #[serde(default, alias = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}
