//! Users and authentication payloads.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{Role, UserId};

/// Snapshot of the signed-in user as returned by login/register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub uuid: Uuid,
    pub name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: Role,
}

impl User {
    /// "Name LastName".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.last_name)
    }

    /// Whether this user may manage products.
    #[must_use]
    pub fn can_manage_products(&self) -> bool {
        self.role.can_manage_products()
    }
}

/// `data` payload of `auth/login` and `auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthData {
    pub user: User,
    pub token: String,
}

/// Profile fields for self-registration.
///
/// The password travels separately so it can stay wrapped in a secret type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}
