//! Session seam for authentication state
//!
//! The surrounding application owns token acquisition and storage; the
//! crate only needs a narrow read-only view of it. Aggregates receive a
//! [`Session`] by injection instead of reaching into an ambient store, so
//! tests can swap in a fixed session.

use crate::config::{SecretString, SecretValue};
use crate::domain::patient::UserProfile;
use secrecy::Secret;
use std::sync::Arc;

/// Read-only view of the authenticated session
pub trait Session: Send + Sync {
    /// Bearer token for the active session, if any
    fn token(&self) -> Option<SecretString>;

    /// The account holder's profile, if loaded
    fn profile(&self) -> Option<UserProfile>;
}

/// Session backed by fixed values
///
/// Suitable for tests and for applications that refresh the session by
/// replacing the whole object.
#[derive(Default)]
pub struct StaticSession {
    token: Option<SecretString>,
    profile: Option<UserProfile>,
}

impl StaticSession {
    /// Creates an authenticated session with the given bearer token
    pub fn authenticated(token: impl Into<String>) -> Self {
        Self {
            token: Some(Secret::new(SecretValue::from(token.into()))),
            profile: None,
        }
    }

    /// Creates a session with no token
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Attaches an account profile
    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.profile = Some(profile);
        self
    }
}

impl Session for StaticSession {
    fn token(&self) -> Option<SecretString> {
        self.token.clone()
    }

    fn profile(&self) -> Option<UserProfile> {
        self.profile.clone()
    }
}

/// Shared session handle passed to aggregates and the REST adapter
pub type SharedSession = Arc<dyn Session>;

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_anonymous_session_has_no_token() {
        let session = StaticSession::anonymous();
        assert!(session.token().is_none());
        assert!(session.profile().is_none());
    }

    #[test]
    fn test_authenticated_session_exposes_token() {
        let session = StaticSession::authenticated("jwt-abc");
        let token = session.token().unwrap();
        assert_eq!(token.expose_secret().as_ref(), "jwt-abc");
    }

    #[test]
    fn test_profile_attachment() {
        let profile = UserProfile {
            name: Some("Nguyen Van A".to_string()),
            ..Default::default()
        };
        let session = StaticSession::authenticated("jwt").with_profile(profile);
        assert_eq!(session.profile().unwrap().name.as_deref(), Some("Nguyen Van A"));
    }
}
