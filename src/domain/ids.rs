//! Domain identifier types with validation
//!
//! Newtype wrappers for the identifiers handed around by the backend.
//! Each type ensures it can't be constructed empty and provides the usual
//! string conversions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident, $label:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier from a string
            ///
            /// # Errors
            ///
            /// Returns an error if the identifier is empty or whitespace.
            pub fn new(id: impl Into<String>) -> Result<Self, String> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(concat!($label, " cannot be empty").to_string());
                }
                Ok(Self(id))
            }

            /// Returns the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes self and returns the inner String
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Identifier of a purchasable service; unique key within a cart
    ///
    /// # Examples
    ///
    /// ```
    /// use careline::domain::ids::ServiceId;
    /// use std::str::FromStr;
    ///
    /// let id = ServiceId::from_str("general-checkup").unwrap();
    /// assert_eq!(id.as_str(), "general-checkup");
    /// ```
    ServiceId,
    "Service ID"
);

string_id!(
    /// Identifier of an order created at checkout
    OrderId,
    "Order ID"
);

string_id!(
    /// Identifier of an emergency-transport request
    RequestId,
    "Request ID"
);

string_id!(
    /// Identifier of a stored relative record
    RelativeId,
    "Relative ID"
);
