//! The session record and its persisted JSON form.

use serde::{Deserialize, Serialize};

use crate::Result;

/// Login status of the current user.
///
/// Persisted as `{"isLoggedIn":true,"username":"alice"}`. Fields missing
/// from persisted text take their default values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionState {
    /// Whether a user is logged in.
    pub is_logged_in: bool,
    /// Name of the logged-in user; empty when logged out.
    pub username: String,
}

impl SessionState {
    /// A logged-in state for `username`.
    pub fn logged_in(username: impl Into<String>) -> Self {
        Self {
            is_logged_in: true,
            username: username.into(),
        }
    }

    /// The logged-out state. Same as `SessionState::default()`.
    pub fn logged_out() -> Self {
        Self::default()
    }

    /// Encode as JSON text.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn default_is_logged_out() {
        let state = SessionState::default();
        assert!(!state.is_logged_in);
        assert_eq!(state.username, "");
        assert_eq!(state, SessionState::logged_out());
    }

    #[test]
    fn encodes_camel_case() {
        let json = SessionState::logged_in("alice").to_json().unwrap();
        assert_eq!(json, r#"{"isLoggedIn":true,"username":"alice"}"#);
    }

    #[test]
    fn decodes_any_field_order() {
        let state = SessionState::from_json(r#"{"username":"bob","isLoggedIn":true}"#).unwrap();
        assert_eq!(state, SessionState::logged_in("bob"));
    }

    #[test]
    fn round_trip() {
        for state in [
            SessionState::default(),
            SessionState::logged_in("alice"),
            SessionState::logged_in(""),
            SessionState::logged_in("名前 \"quoted\""),
        ] {
            let text = state.to_json().unwrap();
            assert_eq!(SessionState::from_json(&text).unwrap(), state);
        }
    }

    #[test]
    fn missing_fields_take_defaults() {
        let state = SessionState::from_json(r#"{"isLoggedIn":true}"#).unwrap();
        assert!(state.is_logged_in);
        assert_eq!(state.username, "");

        let state = SessionState::from_json("{}").unwrap();
        assert_eq!(state, SessionState::default());
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            SessionState::from_json("not-json"),
            Err(Error::MalformedState(_))
        ));
        // Valid JSON, wrong shape.
        assert!(SessionState::from_json("[1, 2]").is_err());
        assert!(SessionState::from_json(r#"{"isLoggedIn":"yes"}"#).is_err());
    }
}
