//! # Auth Client
use crate::auth_slice::{AuthEvent, AuthSlice, AuthState, Session, LOGIN_PATH};
use crate::clients::collection_client::encode;
use crate::model::{Credentials, User, UserUpdate};
use crate::user_slice;
use std::sync::Arc;
use sync_framework::{
    extract_record, AsyncOutcome, FrameworkError, RequestDescriptor, SliceClient, Transport,
};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// Client for the auth slice.
#[derive(Clone)]
pub struct AuthClient {
    inner: SliceClient<AuthSlice>,
    transport: Arc<dyn Transport>,
}

impl AuthClient {
    pub fn new(inner: SliceClient<AuthSlice>, transport: Arc<dyn Transport>) -> Self {
        Self { inner, transport }
    }

    pub fn inner(&self) -> &SliceClient<AuthSlice> {
        &self.inner
    }

    /// Sign in. The response is `{ token, user }`, optionally wrapped in `data`.
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, credentials: Credentials) -> AsyncOutcome<Session> {
        debug!("Sending request");
        let transport = self.transport.as_ref();
        let call = async move {
            let body = encode(&credentials)?;
            let response = transport.post(LOGIN_PATH, Some(body)).await?;
            extract_record::<Session>(response, &["data"])
        };
        RequestDescriptor::new("login", "Failed to login")
            .trigger(&self.inner, call, |signal| {
                Some(match signal.outcome {
                    AsyncOutcome::Pending => AuthEvent::LoginPending,
                    AsyncOutcome::Succeeded(session) => AuthEvent::LoginSucceeded(session),
                    AsyncOutcome::Failed(message) => AuthEvent::LoginFailed(message),
                })
            })
            .await
    }

    /// Update the signed-in user's own profile.
    #[instrument(skip(self))]
    pub async fn update_profile(&self, changes: UserUpdate) -> AsyncOutcome<User> {
        let Some(user) = self.inner.current().user else {
            warn!("Profile update without a session");
            return AsyncOutcome::Failed("Not signed in".to_string());
        };
        let transport = self.transport.as_ref();
        let call = async move {
            let body = encode(&changes)?;
            let path = user_slice::RESOURCE.item_path(&user.id);
            let response = transport.patch(&path, Some(body)).await?;
            extract_record::<User>(response, user_slice::RESOURCE.record_keys)
        };
        RequestDescriptor::new("update profile", "Failed to update profile")
            .trigger(&self.inner, call, |signal| match signal.outcome {
                AsyncOutcome::Pending => None,
                AsyncOutcome::Succeeded(user) => Some(AuthEvent::ProfileUpdated(user)),
                AsyncOutcome::Failed(message) => Some(AuthEvent::ProfileUpdateFailed(message)),
            })
            .await
    }

    /// Adopt a session obtained elsewhere (e.g. from a signup response).
    #[instrument(skip(self, session), fields(user = %session.user.id))]
    pub async fn restore_session(&self, session: Session) -> Result<AuthState, FrameworkError> {
        info!("Session restored");
        self.inner.dispatch(AuthEvent::SessionRestored(session)).await
    }

    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<AuthState, FrameworkError> {
        info!("Logged out");
        self.inner.dispatch(AuthEvent::LoggedOut).await
    }

    pub async fn state(&self) -> Result<AuthState, FrameworkError> {
        self.inner.snapshot().await
    }

    /// The last published auth state, without a round trip.
    pub fn current(&self) -> AuthState {
        self.inner.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.inner.subscribe()
    }
}
