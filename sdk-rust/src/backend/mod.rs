mod api;
mod client;

pub use api::{
    Credentials, GenerateItineraryRequest, Profile, Registration, TokenResponse,
};
pub use client::{TripPlannerClient, TripPlannerClientOptions};
