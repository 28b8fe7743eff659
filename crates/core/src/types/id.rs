//! Newtype IDs for type-safe entity references.
//!
//! The backend identifies every entity twice: a numeric `id` used in foreign
//! keys (`sellerId`, `productId`, `cartId`) and a `uuid` used in URL paths.
//! The `define_id!` macro wraps the numeric one so that a product id cannot be
//! passed where a cart item id is expected.

/// Wrap the backend's numeric id for one entity kind.
///
/// The generated type is `Copy`, serializes as a bare number, prints as the
/// number (so it can go straight into a path segment) and parses from one.
///
/// ```rust
/// # use shopfront_core::define_id;
/// define_id!(OrderId);
///
/// let id: OrderId = "12".parse().unwrap();
/// assert_eq!(id.as_i32(), 12);
/// assert_eq!(format!("orders/{id}"), "orders/12");
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(UserId);
define_id!(ProductId);
define_id!(CartId);
define_id!(CartItemId);
