use crate::{itinerary_store::ItineraryStore, routes::Route, token::TokenCarrier, AppError, AppResult};
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};
use trip_planner_sdk::{
    backend::{GenerateItineraryRequest, TripPlannerClient},
    inclusive_day_count,
};

/// Sent when no interest tag is selected.
pub const DEFAULT_TAG: &str = "Tourist Places";

/// Interest tags offered by the search form.
pub const INTEREST_TAGS: [&str; 13] = [
    "Attractions",
    "Tourist places",
    "Hidden Gems",
    "Herritage",
    "Shopping",
    "Cultural",
    "Landmarks",
    "OutdoorsWine",
    "Adventure",
    "Arts",
    "Culture",
    "Architecture",
    "Photography Spots",
];

/// Contents of the search form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    pub destination: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Selected tags, in selection order.
    tags: Vec<String>,
}

impl SearchForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = destination.into();
        self
    }

    #[must_use]
    pub fn with_dates(mut self, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self.end_date = Some(end_date);
        self
    }

    /// Select `tag`, or deselect it when already selected.
    pub fn toggle_tag(&mut self, tag: &str) {
        match self.tags.iter().position(|selected| selected == tag) {
            Some(index) => {
                self.tags.remove(index);
            }
            None => self.tags.push(tag.to_string()),
        }
    }

    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    #[must_use]
    pub fn is_selected(&self, tag: &str) -> bool {
        self.tags.iter().any(|selected| selected == tag)
    }

    /// The selected tags, or the default tag alone when none are selected.
    #[must_use]
    pub fn must_includes(&self) -> Vec<String> {
        if self.tags.is_empty() {
            vec![DEFAULT_TAG.to_string()]
        } else {
            self.tags.clone()
        }
    }

    /// Validate the form and build the generation request.
    pub fn to_request(&self) -> AppResult<GenerateItineraryRequest> {
        let destination = self.destination.trim();
        if destination.is_empty() {
            return Err(AppError::Validation("destination is required".into()));
        }
        let (Some(start_date), Some(end_date)) = (self.start_date, self.end_date) else {
            return Err(AppError::Validation(
                "start and end dates are required".into(),
            ));
        };
        if end_date < start_date {
            return Err(AppError::Validation(
                "end date is before the start date".into(),
            ));
        }

        Ok(GenerateItineraryRequest {
            start_date,
            end_date,
            num_of_days: inclusive_day_count(start_date, end_date),
            destination: destination.to_string(),
            must_includes: self.must_includes(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    /// A generation request is outstanding. There is no progress and no way
    /// to cancel it.
    Generating,
    /// The last submission failed with this user-facing message.
    Failed(String),
}

/// Turns a filled-in search form into a generated itinerary.
pub struct SearchFlow {
    api: Arc<TripPlannerClient>,
    tokens: Arc<TokenCarrier>,
    itineraries: Arc<ItineraryStore>,
    status: watch::Sender<SubmissionStatus>,
}

impl SearchFlow {
    pub fn new(
        api: Arc<TripPlannerClient>,
        tokens: Arc<TokenCarrier>,
        itineraries: Arc<ItineraryStore>,
    ) -> Self {
        let (status, _) = watch::channel(SubmissionStatus::Idle);
        Self {
            api,
            tokens,
            itineraries,
            status,
        }
    }

    #[must_use]
    pub fn status(&self) -> SubmissionStatus {
        self.status.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SubmissionStatus> {
        self.status.subscribe()
    }

    /// Submit `form`. On success the generated itinerary replaces the stored
    /// one and the timeline route is returned. On failure nothing is stored,
    /// the status carries the message and the error is returned.
    pub async fn submit(&self, form: &SearchForm) -> AppResult<Route> {
        match self.generate(form).await {
            Ok(route) => {
                self.status.send_replace(SubmissionStatus::Idle);
                Ok(route)
            }
            Err(error) => {
                warn!(%error, kind = error.kind().as_str(), "itinerary submission failed");
                self.status
                    .send_replace(SubmissionStatus::Failed(error.message()));
                Err(error)
            }
        }
    }

    async fn generate(&self, form: &SearchForm) -> AppResult<Route> {
        let request = form.to_request()?;
        let token = self.tokens.get().ok_or(AppError::Unauthenticated)?;

        self.status.send_replace(SubmissionStatus::Generating);
        let itinerary = self
            .api
            .generate_itinerary(&token, &request)
            .await
            .map_err(AppError::Generation)?;

        info!(
            name = %itinerary.name,
            days = itinerary.activities.len(),
            "itinerary generated"
        );
        self.itineraries.set(itinerary);
        Ok(Route::Timeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).expect("valid date")
    }

    #[test]
    fn empty_selection_sends_the_default_tag() {
        let form = SearchForm::new()
            .with_destination("Lisbon, Portugal")
            .with_dates(date(1), date(2));
        let request = form.to_request().expect("valid form");
        assert_eq!(request.must_includes, ["Tourist Places"]);
        assert_eq!(request.num_of_days, 2);
    }

    #[test]
    fn toggling_keeps_selection_order() {
        let mut form = SearchForm::new();
        form.toggle_tag("Hidden Gems");
        form.toggle_tag("Shopping");
        form.toggle_tag("Arts");
        form.toggle_tag("Shopping");
        assert_eq!(form.must_includes(), ["Hidden Gems", "Arts"]);
        assert!(form.is_selected("Arts"));
        assert!(!form.is_selected("Shopping"));
    }

    #[test]
    fn single_day_trips_count_one_day() {
        let form = SearchForm::new()
            .with_destination("Porto")
            .with_dates(date(5), date(5));
        assert_eq!(form.to_request().expect("valid form").num_of_days, 1);
    }

    #[test]
    fn missing_fields_are_rejected() {
        let no_destination = SearchForm::new().with_dates(date(1), date(2));
        assert!(matches!(
            no_destination.to_request(),
            Err(AppError::Validation(_))
        ));

        let no_dates = SearchForm::new().with_destination("Porto");
        assert!(matches!(no_dates.to_request(), Err(AppError::Validation(_))));

        let backwards = SearchForm::new()
            .with_destination("Porto")
            .with_dates(date(3), date(1));
        assert!(matches!(backwards.to_request(), Err(AppError::Validation(_))));
    }
}
