//! Patient and subject domain model
//!
//! A request subject is either the account holder (a pseudo-record
//! synthesized from the session profile) or a stored relative. The legacy
//! backend identifies the account holder with a magic `"current_user"` id;
//! internally that sentinel is replaced by the [`Subject`] tagged union and
//! only re-materialized at the wire boundary.

use super::ids::RelativeId;
use serde::{Deserialize, Serialize};

/// Reserved backend id for "the authenticated account itself"
pub const ACCOUNT_HOLDER_SENTINEL: &str = "current_user";

/// Reserved relationship label for the account holder's own record
pub const SELF_RELATIONSHIP: &str = "Bản thân";

/// Who a request is for
///
/// Replaces the legacy sentinel-string id so call sites match on a proper
/// union instead of comparing strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Subject {
    /// The authenticated account itself (ephemeral pseudo-record)
    AccountHolder,
    /// A relative record persisted server-side, owned by the account
    Relative(RelativeId),
}

impl Subject {
    /// Builds a subject from a wire-level id string
    pub fn from_wire_id(id: &str) -> Result<Self, String> {
        if id == ACCOUNT_HOLDER_SENTINEL {
            Ok(Subject::AccountHolder)
        } else {
            Ok(Subject::Relative(RelativeId::new(id)?))
        }
    }

    /// Returns the wire-level id string the backend expects
    pub fn wire_id(&self) -> &str {
        match self {
            Subject::AccountHolder => ACCOUNT_HOLDER_SENTINEL,
            Subject::Relative(id) => id.as_str(),
        }
    }

    /// True when this subject is the account holder's own pseudo-record
    pub fn is_account_holder(&self) -> bool {
        matches!(self, Subject::AccountHolder)
    }
}

/// The subject of a booking or emergency request
///
/// A Patient is **actionable** (may be submitted in a request) only when
/// `name`, `phone`, and `address` are all non-empty; see
/// [`crate::core::selector::validate_for_submission`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    /// Who this record represents
    pub subject: Subject,

    /// Full name
    pub name: String,

    /// Age in years, if known
    pub age: Option<u32>,

    /// Contact phone number
    pub phone: String,

    /// Home address
    pub address: String,

    /// Free-text relationship label; [`SELF_RELATIONSHIP`] is reserved for
    /// the account holder
    pub relationship: String,

    /// National identity number, if provided
    pub national_id: Option<String>,

    /// Health insurance number, if provided
    pub health_insurance_id: Option<String>,
}

impl Patient {
    /// Names of required fields that are empty
    ///
    /// `name` and `phone` are always required; `address` additionally when
    /// `require_address` is set (emergency flows).
    pub fn missing_required_fields(&self, require_address: bool) -> Vec<String> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name".to_string());
        }
        if self.phone.trim().is_empty() {
            missing.push("phone".to_string());
        }
        if require_address && self.address.trim().is_empty() {
            missing.push("address".to_string());
        }
        missing
    }
}

/// Raw account profile as held by the session store
///
/// Every field is optional; the selector degrades absent fields to empty
/// strings rather than failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name of the account
    pub name: Option<String>,

    /// Age in years
    pub age: Option<u32>,

    /// Contact phone number
    pub phone: Option<String>,

    /// Home address
    pub address: Option<String>,

    /// National identity number
    #[serde(default)]
    pub national_id: Option<String>,

    /// Health insurance number
    #[serde(default)]
    pub health_insurance_id: Option<String>,
}
