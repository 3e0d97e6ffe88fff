use crate::{AppError, AppResult};
use std::sync::{PoisonError, RwLock};
use tracing::debug;
use trip_planner_sdk::backend::TripPlannerClient;

/// Who is signed in, as far as this page lifetime knows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// First name of the authenticated user.
    pub display_name: Option<String>,
    pub is_authenticated: bool,
}

/// In-memory session shared by every page of one application instance.
/// Never persisted; a reload starts empty.
#[derive(Debug, Default)]
pub struct SessionStore {
    session: RwLock<Session>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn auth_user(&self) -> Option<String> {
        self.snapshot().display_name
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.snapshot().is_authenticated
    }

    pub fn set_auth_user(&self, display_name: Option<String>) {
        self.write(|session| session.display_name = display_name);
    }

    pub fn set_logged_in(&self, is_authenticated: bool) {
        self.write(|session| session.is_authenticated = is_authenticated);
    }

    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.write(|session| *session = Session::default());
    }

    /// Fetch the profile for `token` and populate the session from it.
    /// On failure the session is left as it was.
    pub async fn load_profile(&self, api: &TripPlannerClient, token: &str) -> AppResult<()> {
        let profile = api.profile(token).await.map_err(AppError::Profile)?;
        debug!(first_name = %profile.first_name, "loaded profile");

        self.write(|session| {
            session.display_name = Some(profile.first_name);
            session.is_authenticated = true;
        });
        Ok(())
    }

    fn write(&self, update: impl FnOnce(&mut Session)) {
        let mut session = self
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        update(&mut session);
    }
}
