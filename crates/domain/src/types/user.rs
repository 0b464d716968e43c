//! User directory types

use serde::{Deserialize, Serialize};

use crate::constants::{ROLE_CUSTOMER, ROLE_PROVIDER};

/// Role tag for directory users referenced by appointments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Provider,
    Customer,
}

impl UserRole {
    /// Directory slug for this role.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Provider => ROLE_PROVIDER,
            Self::Customer => ROLE_CUSTOMER,
        }
    }
}

/// Directory user record (owned by an external directory, read-only here).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub role: Option<UserRole>,
}
