//! SQLite-backed implementation of the UserDirectory port.

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};
use slotbook_core::UserDirectory;
use slotbook_domain::{BookingError, Result, User, UserRole};

use super::manager::DbManager;
use crate::errors::InfraError;

/// SQLite implementation of the read-only user directory.
pub struct SqliteUserDirectory {
    db: Arc<DbManager>,
}

impl SqliteUserDirectory {
    /// Create a new user directory.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserDirectory for SqliteUserDirectory {
    async fn user_has_role(&self, user_id: i64, role: UserRole) -> Result<bool> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM users WHERE id = ?1 AND role_slug = ?2",
                    params![user_id, role.slug()],
                    |row| row.get(0),
                )
                .map_err(InfraError::from)?;
            Ok(count > 0)
        })
        .await
        .map_err(|e| BookingError::Internal(e.to_string()))?
    }

    async fn find_user(&self, user_id: i64) -> Result<Option<User>> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            let user = conn
                .query_row(
                    "SELECT id, first_name, last_name, email, phone_number, role_slug
                     FROM users WHERE id = ?1",
                    params![user_id],
                    |row| {
                        let slug: String = row.get(5)?;
                        Ok(User {
                            id: row.get(0)?,
                            first_name: row.get(1)?,
                            last_name: row.get(2)?,
                            email: row.get(3)?,
                            phone_number: row.get(4)?,
                            role: role_from_slug(&slug),
                        })
                    },
                )
                .optional()
                .map_err(InfraError::from)?;
            Ok(user)
        })
        .await
        .map_err(|e| BookingError::Internal(e.to_string()))?
    }
}

fn role_from_slug(slug: &str) -> Option<UserRole> {
    match slug {
        s if s == UserRole::Provider.slug() => Some(UserRole::Provider),
        s if s == UserRole::Customer.slug() => Some(UserRole::Customer),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_slugs_resolve_to_roles() {
        assert_eq!(role_from_slug("provider"), Some(UserRole::Provider));
        assert_eq!(role_from_slug("customer"), Some(UserRole::Customer));
    }

    #[test]
    fn unknown_slug_resolves_to_none() {
        assert_eq!(role_from_slug("admin"), None);
    }
}
