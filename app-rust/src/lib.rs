mod app;
mod config;
mod errors;
pub mod itinerary_store;
pub mod pages;
mod params;
pub mod routes;
pub mod search;
pub mod session;
pub mod storage;
pub mod suggestions;
pub mod timeline;
pub mod token;

pub use app::App;
pub use config::AppConfig;
pub use errors::{AppError, AppResult, ErrorKind};
pub use params::AppParams;
pub use routes::{GuardDecision, Route, RouteGuard};
pub use search::{SearchFlow, SearchForm, SubmissionStatus, DEFAULT_TAG, INTEREST_TAGS};
pub use session::{Session, SessionStore};
