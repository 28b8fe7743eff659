//! User roles and the product-management allow-list.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Roles allowed to create and manage their own products.
pub const PRODUCT_MANAGER_ROLES: &[&str] = &["memberships", "Admin", "Premium", "Vendedor"];

/// Role assigned to accounts created through self-registration.
pub const DEFAULT_ROLE: &str = "Cliente";

/// A user's role as reported by the backend.
///
/// Roles are open-ended strings; only membership in
/// [`PRODUCT_MANAGER_ROLES`] carries meaning on the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    /// Wrap a role string.
    #[must_use]
    pub fn new(role: impl Into<String>) -> Self {
        Self(role.into())
    }

    /// The role as sent by the backend.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this role may add, edit and delete products.
    ///
    /// Comparison ignores ASCII case.
    #[must_use]
    pub fn can_manage_products(&self) -> bool {
        PRODUCT_MANAGER_ROLES
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&self.0))
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::new(DEFAULT_ROLE)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
