use crate::model::User;
use serde::{Deserialize, Serialize};
use sync_framework::Slice;

/// Signed-in session as returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Auth branch.
///
/// `loading` and `error` describe an in-flight login and are never serialized, so a reload
/// can only ever restore `user` and `token`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthState {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(skip)]
    pub loading: bool,
    #[serde(skip)]
    pub error: Option<String>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthEvent {
    LoginPending,
    LoginSucceeded(Session),
    LoginFailed(String),
    SessionRestored(Session),
    ProfileUpdated(User),
    ProfileUpdateFailed(String),
    LoggedOut,
}

pub struct AuthSlice;

impl Slice for AuthSlice {
    type State = AuthState;
    type Event = AuthEvent;

    fn name(&self) -> &'static str {
        "auth"
    }

    fn initial_state(&self) -> AuthState {
        AuthState::default()
    }

    fn reduce(&self, state: &mut AuthState, event: AuthEvent) {
        match event {
            AuthEvent::LoginPending => {
                state.loading = true;
                state.error = None;
            }
            AuthEvent::LoginSucceeded(session) | AuthEvent::SessionRestored(session) => {
                state.loading = false;
                state.error = None;
                state.user = Some(session.user);
                state.token = Some(session.token);
            }
            AuthEvent::LoginFailed(message) => {
                state.loading = false;
                state.error = Some(message);
            }
            AuthEvent::ProfileUpdated(user) => {
                // Only the session user's own record is adopted.
                if state.user.as_ref().is_some_and(|current| current.id == user.id) {
                    state.user = Some(user);
                }
            }
            AuthEvent::ProfileUpdateFailed(message) => {
                state.error = Some(message);
            }
            AuthEvent::LoggedOut => *state = AuthState::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn session() -> Session {
        Session {
            token: "t0k3n".into(),
            user: User::new("U1", "Ada", "ada@example.com"),
        }
    }

    #[test]
    fn test_login_lifecycle() {
        let mut state = AuthState::default();
        AuthSlice.reduce(&mut state, AuthEvent::LoginPending);
        assert!(state.loading);

        AuthSlice.reduce(&mut state, AuthEvent::LoginFailed("Invalid credentials".into()));
        assert!(!state.loading);
        assert!(!state.is_authenticated());

        AuthSlice.reduce(&mut state, AuthEvent::LoginPending);
        assert_eq!(state.error, None);
        AuthSlice.reduce(&mut state, AuthEvent::LoginSucceeded(session()));
        assert!(state.is_authenticated());

        AuthSlice.reduce(&mut state, AuthEvent::LoggedOut);
        assert_eq!(state, AuthState::default());
    }

    #[test]
    fn test_profile_update_only_for_session_user() {
        let mut state = AuthState::default();
        AuthSlice.reduce(&mut state, AuthEvent::SessionRestored(session()));

        AuthSlice.reduce(
            &mut state,
            AuthEvent::ProfileUpdated(User::new("U2", "Eve", "eve@example.com")),
        );
        assert_eq!(state.user.as_ref().unwrap().id, "U1");

        AuthSlice.reduce(
            &mut state,
            AuthEvent::ProfileUpdated(User::new("U1", "Ada L.", "ada@example.com")),
        );
        assert_eq!(state.user.unwrap().name.as_deref(), Some("Ada L."));
    }

    #[test]
    fn test_transient_fields_are_not_serialized() {
        let state = AuthState {
            token: Some("t".into()),
            loading: true,
            error: Some("boom".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value, json!({ "user": null, "token": "t" }));

        let back: AuthState = serde_json::from_value(value).unwrap();
        assert!(!back.loading);
        assert_eq!(back.error, None);
    }
}
