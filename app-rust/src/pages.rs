//! View models of the pages, and how one page hands over to the next.

use crate::{routes::Route, session::Session, timeline::TimelineView};
use chrono::NaiveDate;
use serde::Serialize;
use std::time::Duration;
use trip_planner_sdk::Itinerary;

/// How long the signup page shows its confirmation before moving to login.
pub const SIGNUP_REDIRECT_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Info,
    Error,
}

/// Inline message shown next to a form until dismissed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
    pub dismissed: bool,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Info,
            dismissed: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Error,
            dismissed: false,
        }
    }

    pub fn dismiss(&mut self) {
        self.dismissed = true;
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        !self.dismissed
    }
}

/// A navigation that happens on its own after a delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelayedRedirect {
    pub route: Route,
    pub after: Duration,
}

impl DelayedRedirect {
    /// Wait out the delay and return the destination.
    pub async fn wait(self) -> Route {
        tokio::time::sleep(self.after).await;
        self.route
    }
}

/// Outcome of a signup submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupView {
    pub notice: Notice,
    /// Set only when registration succeeded.
    pub redirect: Option<DelayedRedirect>,
}

/// Card for one entry of the recent itineraries panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentCard {
    pub id: Option<i64>,
    pub name: String,
    pub destination: Option<String>,
    pub image_url: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_days: i64,
}

impl From<Itinerary> for RecentCard {
    fn from(itinerary: Itinerary) -> Self {
        Self {
            id: itinerary.id,
            name: itinerary.name,
            destination: itinerary.destination,
            image_url: itinerary.image_url,
            start_date: itinerary.start_date,
            end_date: itinerary.end_date,
            total_days: itinerary.total_days,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandingView {
    pub session: Session,
    /// Set when the profile could not be loaded; the page still renders.
    pub profile_error: Option<String>,
    /// Newest first. Empty when the list could not be fetched.
    pub recents: Vec<RecentCard>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyView {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Landing(LandingView),
    /// `None` when no itinerary is in memory or in the cache.
    Timeline(Option<TimelineView>),
    Login,
    Signup,
    /// Only shown when verification failed; success moves on to landing.
    Verify(VerifyView),
}

/// What a navigation ended up showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub route: Route,
    pub view: View,
}

/// Result of mounting a single route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Mount {
    Show(View),
    Redirect(Route),
}
