use crate::{
    itinerary_store::{ItineraryCache, ItineraryStore},
    pages::{
        DelayedRedirect, LandingView, Mount, Notice, RecentCard, Screen, SignupView, VerifyView,
        View, SIGNUP_REDIRECT_DELAY,
    },
    routes::{GuardDecision, Route, RouteGuard},
    search::SearchFlow,
    session::{Session, SessionStore},
    suggestions::{SuggestionEngine, SuggestionEngineOptions},
    timeline::TimelineView,
    token::TokenCarrier,
    AppConfig, AppError, AppParams, AppResult,
};
use std::sync::Arc;
use tracing::{debug, info, info_span, warn, Instrument};
use trip_planner_sdk::backend::{Credentials, Registration, TripPlannerClient};

/// One instance of the client: the stores shared by every page plus the
/// flows that move between pages.
///
/// The token carrier and the itinerary cache live in the persistent stores
/// handed in through [`AppParams`]. Building a second `App` over the same
/// stores behaves like reloading the page: the token and the cached
/// itinerary are still there, the session and the in-memory itinerary are
/// not.
pub struct App {
    config: AppConfig,
    api: Arc<TripPlannerClient>,
    tokens: Arc<TokenCarrier>,
    session: SessionStore,
    itineraries: Arc<ItineraryStore>,
    suggestions: SuggestionEngine,
    search: SearchFlow,
}

impl App {
    #[must_use]
    pub fn builder(config: AppConfig) -> AppParams {
        AppParams::new(config)
    }

    #[must_use]
    pub fn new(params: AppParams) -> Self {
        let parts = params.into_parts();
        let api = Arc::new(parts.api);
        let tokens = Arc::new(TokenCarrier::new(parts.cookie_store));
        let itineraries = Arc::new(ItineraryStore::new(ItineraryCache::new(
            parts.local_storage,
        )));
        let suggestions = SuggestionEngine::new(
            parts.autocomplete,
            SuggestionEngineOptions {
                debounce: parts.config.debounce,
                min_query_len: parts.config.min_query_len,
            },
        );
        let search = SearchFlow::new(api.clone(), tokens.clone(), itineraries.clone());

        Self {
            config: parts.config,
            api,
            tokens,
            session: SessionStore::new(),
            itineraries,
            suggestions,
            search,
        }
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn api(&self) -> &TripPlannerClient {
        &self.api
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenCarrier {
        &self.tokens
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    #[must_use]
    pub fn itineraries(&self) -> &ItineraryStore {
        &self.itineraries
    }

    #[must_use]
    pub fn suggestions(&self) -> &SuggestionEngine {
        &self.suggestions
    }

    #[must_use]
    pub fn search(&self) -> &SearchFlow {
        &self.search
    }

    #[must_use]
    pub fn guard(&self) -> RouteGuard<'_> {
        RouteGuard::new(&self.tokens)
    }

    /// Navigate to `path`, following redirects until a page is shown.
    /// Unknown paths land on `/`.
    pub async fn navigate(&self, path: &str) -> Screen {
        let mut route = Route::parse_or_landing(path);
        loop {
            let span = info_span!("trip_planner.navigate", route = %route);
            match self.mount(&route).instrument(span).await {
                Mount::Show(view) => return Screen { route, view },
                Mount::Redirect(next) => {
                    debug!(from = %route, to = %next, "redirecting");
                    route = next;
                }
            }
        }
    }

    async fn mount(&self, route: &Route) -> Mount {
        if let GuardDecision::Redirect(target) = self.guard().evaluate(route.clone()) {
            return Mount::Redirect(target);
        }

        match route {
            Route::Landing => match self.landing().await {
                Ok(view) => Mount::Show(View::Landing(view)),
                Err(_) => Mount::Redirect(Route::Login),
            },
            Route::Timeline => Mount::Show(View::Timeline(self.timeline())),
            Route::Login => Mount::Show(View::Login),
            Route::Signup => Mount::Show(View::Signup),
            Route::Verify(token) => match self.verify_email(token).await {
                Ok(next) => Mount::Redirect(next),
                Err(error) => Mount::Show(View::Verify(VerifyView {
                    error: error.message(),
                })),
            },
        }
    }

    /// Exchange credentials for a token, then load the profile. Returns the
    /// page to go to. A failed profile load does not undo the login.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<Route> {
        let response = self
            .api
            .obtain_token(&Credentials::new(email, password))
            .await
            .map_err(AppError::Credential)
            .inspect_err(|error| warn!(%error, "login rejected"))?;
        self.tokens.set(&response.access)?;
        info!("signed in");

        if let Err(error) = self.session.load_profile(&self.api, &response.access).await {
            warn!(%error, "signed in without a profile");
        }
        Ok(Route::Landing)
    }

    /// Register a new account. Success asks the user to check their email and
    /// moves on to login after a short delay; failure shows why.
    pub async fn signup(&self, registration: &Registration) -> SignupView {
        match self.api.register(registration).await {
            Ok(()) => {
                info!(email = %registration.email, "registered");
                SignupView {
                    notice: Notice::info("check your email"),
                    redirect: Some(DelayedRedirect {
                        route: Route::Login,
                        after: SIGNUP_REDIRECT_DELAY,
                    }),
                }
            }
            Err(error) => {
                let error = AppError::Registration(error);
                warn!(%error, "registration failed");
                SignupView {
                    notice: Notice::error(error.message()),
                    redirect: None,
                }
            }
        }
    }

    /// Confirm the emailed verification token.
    pub async fn verify_email(&self, verification_token: &str) -> AppResult<Route> {
        self.api
            .verify_email(verification_token)
            .await
            .map_err(AppError::Verification)
            .inspect_err(|error| warn!(%error, "email verification failed"))?;
        Ok(Route::Landing)
    }

    /// Load everything the landing page shows.
    ///
    /// A rejected token ends the session and returns the error. Any other
    /// profile failure is reported through `profile_error`. A failed recents
    /// fetch leaves the panel empty.
    pub async fn landing(&self) -> AppResult<LandingView> {
        let token = self.tokens.get().ok_or(AppError::Unauthenticated)?;
        let (profile, recents) = tokio::join!(
            self.session.load_profile(&self.api, &token),
            self.api.recent_itineraries(&token),
        );

        let profile_error = match profile {
            Ok(()) => None,
            Err(error) if error.is_unauthorized() => {
                warn!(%error, "access token rejected");
                self.end_session()?;
                return Err(error);
            }
            Err(error) => {
                warn!(%error, "profile unavailable");
                Some(error.message())
            }
        };

        let recents = recents
            .map_err(AppError::Recents)
            .unwrap_or_else(|error| {
                warn!(%error, "recent itineraries unavailable");
                Vec::new()
            });

        Ok(LandingView {
            session: self.session.snapshot(),
            profile_error,
            recents: recents.into_iter().map(RecentCard::from).collect(),
        })
    }

    /// Try the profile fetch again after it failed on the landing page.
    pub async fn retry_profile(&self) -> AppResult<Session> {
        let token = self.tokens.get().ok_or(AppError::Unauthenticated)?;
        if let Err(error) = self.session.load_profile(&self.api, &token).await {
            if error.is_unauthorized() {
                self.end_session()?;
            }
            return Err(error);
        }
        Ok(self.session.snapshot())
    }

    /// The itinerary to display: the one in memory, else the cached one.
    #[must_use]
    pub fn timeline(&self) -> Option<TimelineView> {
        self.itineraries
            .resolve()
            .map(|itinerary| TimelineView::new(&itinerary))
    }

    /// Load a stored itinerary, typically picked from the recents panel, and
    /// show it.
    pub async fn open_itinerary(&self, id: i64) -> AppResult<Route> {
        let token = self.tokens.get().ok_or(AppError::Unauthenticated)?;
        let itinerary = self
            .api
            .itinerary(&token, id)
            .await
            .map_err(AppError::Itinerary)
            .inspect_err(|error| warn!(%error, id, "itinerary unavailable"))?;
        self.itineraries.set(itinerary);
        Ok(Route::Timeline)
    }

    /// Forget the token and the session.
    pub fn logout(&self) -> AppResult<Route> {
        self.end_session()?;
        info!("signed out");
        Ok(Route::Login)
    }

    fn end_session(&self) -> AppResult<()> {
        self.session.clear();
        self.tokens.clear()
    }
}
