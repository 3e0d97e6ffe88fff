use crate::{
    storage::{FileStore, KeyValueStore, MemoryStore},
    App, AppConfig,
};
use std::sync::Arc;
use trip_planner_sdk::{
    backend::{TripPlannerClient, TripPlannerClientOptions},
    geoapify::{GeoapifyAutocomplete, GeoapifyAutocompleteOptions},
    PlaceAutocomplete,
};

/// Parameters required to create a new app.
/// # Default Values
/// - `cookie_store`: a `FileStore` under `<storage_dir>/cookies` when
///   `storage_dir` is set, otherwise a `MemoryStore`
/// - `local_storage`: a `FileStore` under `<storage_dir>/local_storage` when
///   `storage_dir` is set, otherwise a `MemoryStore`
/// - `autocomplete`: Geoapify, configured from `config`
/// - `api`: a backend client for `config.api_url`
pub struct AppParams {
    pub config: AppConfig,
    /// Holds the access token.
    pub cookie_store: Option<Arc<dyn KeyValueStore>>,
    /// Holds the cached itinerary.
    pub local_storage: Option<Arc<dyn KeyValueStore>>,
    pub autocomplete: Option<Arc<dyn PlaceAutocomplete>>,
    pub api: Option<TripPlannerClient>,
}

impl AppParams {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            cookie_store: None,
            local_storage: None,
            autocomplete: None,
            api: None,
        }
    }

    /// Set the store holding the access token
    #[must_use]
    pub fn cookie_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.cookie_store = Some(store);
        self
    }

    /// Set the store holding the cached itinerary
    #[must_use]
    pub fn local_storage(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.local_storage = Some(store);
        self
    }

    /// Set the destination autocomplete provider
    #[must_use]
    pub fn autocomplete(mut self, autocomplete: Arc<dyn PlaceAutocomplete>) -> Self {
        self.autocomplete = Some(autocomplete);
        self
    }

    /// Set the backend client
    #[must_use]
    pub fn api(mut self, api: TripPlannerClient) -> Self {
        self.api = Some(api);
        self
    }

    #[must_use]
    pub fn build(self) -> App {
        App::new(self)
    }

    pub(crate) fn into_parts(mut self) -> AppParts {
        let config = self.config;
        let cookie_store = self
            .cookie_store
            .take()
            .unwrap_or_else(|| default_store(&config, "cookies"));
        let local_storage = self
            .local_storage
            .take()
            .unwrap_or_else(|| default_store(&config, "local_storage"));
        let autocomplete = self.autocomplete.take().unwrap_or_else(|| {
            Arc::new(GeoapifyAutocomplete::new(GeoapifyAutocompleteOptions {
                base_url: Some(config.geocoding_url.clone()),
                api_key: config.geocoding_api_key.clone(),
                client: None,
                timeout: config.request_timeout,
            }))
        });
        let api = self.api.take().unwrap_or_else(|| {
            TripPlannerClient::new(TripPlannerClientOptions {
                base_url: Some(config.api_url.clone()),
                client: None,
                timeout: config.request_timeout,
            })
        });

        AppParts {
            config,
            cookie_store,
            local_storage,
            autocomplete,
            api,
        }
    }
}

pub(crate) struct AppParts {
    pub config: AppConfig,
    pub cookie_store: Arc<dyn KeyValueStore>,
    pub local_storage: Arc<dyn KeyValueStore>,
    pub autocomplete: Arc<dyn PlaceAutocomplete>,
    pub api: TripPlannerClient,
}

fn default_store(config: &AppConfig, name: &str) -> Arc<dyn KeyValueStore> {
    match &config.storage_dir {
        Some(dir) => Arc::new(FileStore::new(dir.join(name))),
        None => Arc::new(MemoryStore::new()),
    }
}
