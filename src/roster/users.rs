//! Dashboard user profiles.

use chrono::Utc;
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::UserProfile;
use crate::store::{collections, list_as, to_document};

use super::{Roster, required};

impl Roster {
    /// Every user profile.
    pub fn list_users(&self) -> EngineResult<Vec<UserProfile>> {
        list_as(self.store(), collections::USERS)
    }

    /// Creates a profile. Emails are unique, compared case-insensitively.
    pub fn create_user(&self, user: UserProfile) -> EngineResult<UserProfile> {
        let mut user = user;
        user.name = required("name", &user.name)?;
        user.email = required("email", &user.email)?.to_lowercase();
        if !user.email.contains('@') {
            return Err(EngineError::validation("email", "must be an email address"));
        }
        if self.list_users()?.iter().any(|u| u.email.to_lowercase() == user.email) {
            return Err(EngineError::EmailInUse { email: user.email });
        }
        user.created_at = Some(Utc::now());
        user.id = self
            .store()
            .add(collections::USERS, to_document(collections::USERS, &user)?)?;

        info!(user_id = %user.id, access = ?user.access, "Created user profile");
        Ok(user)
    }

    /// Removes a profile.
    pub fn delete_user(&self, id: &str) -> EngineResult<()> {
        if !self.store().delete(collections::USERS, id)? {
            return Err(EngineError::DocumentNotFound {
                collection: collections::USERS.to_string(),
                id: id.to_string(),
            });
        }
        info!(user_id = %id, "Deleted user profile");
        Ok(())
    }
}
