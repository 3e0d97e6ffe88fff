pub mod backend;
mod client_utils;
mod errors;
pub mod geoapify;
mod opentelemetry;
mod place_autocomplete;
pub mod sdk_test;
mod trip_length;
mod types;

pub use errors::*;
pub use place_autocomplete::PlaceAutocomplete;
pub use reqwest::StatusCode;
pub use trip_length::{inclusive_day_count, inclusive_day_count_between};
pub use types::*;
