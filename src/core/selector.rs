//! Patient selection and submission validation
//!
//! Resolves the "subject" of a request: either the authenticated account
//! itself, synthesized into a pseudo-record, or a stored relative fetched
//! through the backend. Validation never fails hard; it reports which
//! required fields are missing so the caller can prompt for them.

use crate::domain::patient::{Patient, Subject, UserProfile, SELF_RELATIONSHIP};

/// Outcome of submission validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionCheck {
    /// Every required field is present
    Ok,
    /// Named fields are empty; the flow must halt until they are filled
    Missing(Vec<String>),
}

impl SubmissionCheck {
    /// True when the patient may be submitted
    pub fn is_ok(&self) -> bool {
        matches!(self, SubmissionCheck::Ok)
    }

    /// The missing field names, empty when validation passed
    pub fn missing_fields(&self) -> &[String] {
        match self {
            SubmissionCheck::Ok => &[],
            SubmissionCheck::Missing(fields) => fields,
        }
    }
}

/// Synthesizes a patient pseudo-record from the account holder's profile
///
/// Missing profile fields degrade to empty strings rather than failing;
/// [`validate_for_submission`] decides later whether the record is
/// complete enough to act on.
pub fn resolve_account_holder(profile: &UserProfile) -> Patient {
    Patient {
        subject: Subject::AccountHolder,
        name: profile.name.clone().unwrap_or_default(),
        age: profile.age,
        phone: profile.phone.clone().unwrap_or_default(),
        address: profile.address.clone().unwrap_or_default(),
        relationship: SELF_RELATIONSHIP.to_string(),
        national_id: profile.national_id.clone(),
        health_insurance_id: profile.health_insurance_id.clone(),
    }
}

/// Checks whether a patient may be submitted in a request
///
/// `name` and `phone` are always required; `address` additionally when
/// `require_address` is set (emergency flows). Never returns an error;
/// the caller decides how to react to missing fields.
pub fn validate_for_submission(patient: &Patient, require_address: bool) -> SubmissionCheck {
    let missing = patient.missing_required_fields(require_address);
    if missing.is_empty() {
        SubmissionCheck::Ok
    } else {
        SubmissionCheck::Missing(missing)
    }
}
