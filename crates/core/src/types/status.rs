//! Status values for products and carts.
//!
//! The backend sends statuses as free-form lowercase strings. Known values
//! map to variants; anything else is preserved verbatim in `Other` so that two
//! different unknown statuses still compare unequal.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Product listing status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum ProductStatus {
    /// Listed and purchasable (subject to stock).
    #[default]
    Active,
    /// Hidden by the seller.
    Inactive,
    /// Not yet published.
    Draft,
    /// Any status this client does not know about.
    Other(String),
}

impl ProductStatus {
    /// Wire representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Draft => "draft",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for ProductStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "active" => Self::Active,
            "inactive" => Self::Inactive,
            "draft" => Self::Draft,
            _ => Self::Other(s),
        }
    }
}

impl From<ProductStatus> for String {
    fn from(status: ProductStatus) -> Self {
        match status {
            ProductStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shopping cart lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum CartStatus {
    #[default]
    Active,
    Abandoned,
    Converted,
    Other(String),
}

impl CartStatus {
    /// Wire representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Abandoned => "abandoned",
            Self::Converted => "converted",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for CartStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "active" => Self::Active,
            "abandoned" => Self::Abandoned,
            "converted" => Self::Converted,
            _ => Self::Other(s),
        }
    }
}

impl From<CartStatus> for String {
    fn from(status: CartStatus) -> Self {
        match status {
            CartStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}
