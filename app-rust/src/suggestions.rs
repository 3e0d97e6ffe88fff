use crate::AppError;
use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, warn};
use trip_planner_sdk::PlaceAutocomplete;

#[derive(Debug, Clone)]
pub struct SuggestionEngineOptions {
    /// Quiet period after the last input before a query is sent.
    pub debounce: Duration,
    /// Inputs of this many characters or fewer never query.
    pub min_query_len: usize,
}

impl Default for SuggestionEngineOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(150),
            min_query_len: 2,
        }
    }
}

struct Shared {
    autocomplete: Arc<dyn PlaceAutocomplete>,
    /// Sequence number of the most recent input. Held while publishing so a
    /// response and a newer input cannot interleave.
    generation: Mutex<u64>,
    suggestions: watch::Sender<Vec<String>>,
}

impl Shared {
    fn next_generation(&self) -> u64 {
        let mut generation = self.generation.lock().unwrap_or_else(PoisonError::into_inner);
        *generation += 1;
        *generation
    }

    fn is_latest(&self, generation: u64) -> bool {
        *self.generation.lock().unwrap_or_else(PoisonError::into_inner) == generation
    }

    /// Replace the list if `generation` is still current. Returns whether the
    /// list was replaced.
    fn publish(&self, generation: u64, suggestions: Vec<String>) -> bool {
        let current = self.generation.lock().unwrap_or_else(PoisonError::into_inner);
        if *current != generation {
            return false;
        }
        self.suggestions.send_replace(suggestions);
        drop(current);
        true
    }
}

/// Debounced destination autocomplete.
///
/// Every input supersedes the previous one: a pending timer is aborted and a
/// new one is scheduled. Once a timer fires its query runs to completion in
/// its own task, but the result is applied only if no newer input has arrived
/// since, so responses can never be applied out of order.
///
/// Must be driven from within a tokio runtime.
pub struct SuggestionEngine {
    shared: Arc<Shared>,
    options: SuggestionEngineOptions,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl SuggestionEngine {
    pub fn new(autocomplete: Arc<dyn PlaceAutocomplete>, options: SuggestionEngineOptions) -> Self {
        let (suggestions, _) = watch::channel(Vec::new());
        Self {
            shared: Arc::new(Shared {
                autocomplete,
                generation: Mutex::new(0),
                suggestions,
            }),
            options,
            pending: Mutex::new(None),
        }
    }

    /// Feed the current contents of the destination field.
    pub fn on_input(&self, text: &str) {
        let generation = self.shared.next_generation();
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(timer) = pending.take() {
            timer.abort();
        }

        if text.chars().count() <= self.options.min_query_len {
            self.shared.publish(generation, Vec::new());
            return;
        }

        let shared = Arc::clone(&self.shared);
        let debounce = self.options.debounce;
        let query = text.to_string();
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if shared.is_latest(generation) {
                tokio::spawn(fetch(shared, generation, query));
            }
        }));
    }

    /// The currently displayed suggestions.
    #[must_use]
    pub fn suggestions(&self) -> Vec<String> {
        self.shared.suggestions.borrow().clone()
    }

    /// Observe every replacement of the suggestion list.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<String>> {
        self.shared.suggestions.subscribe()
    }
}

impl Drop for SuggestionEngine {
    fn drop(&mut self) {
        let pending = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(timer) = pending.take() {
            timer.abort();
        }
    }
}

async fn fetch(shared: Arc<Shared>, generation: u64, query: String) {
    let suggestions = match shared.autocomplete.autocomplete(&query).await {
        Ok(suggestions) => suggestions,
        Err(error) => {
            let error = AppError::Suggestion(error);
            warn!(%error, provider = shared.autocomplete.provider(), "clearing suggestions");
            Vec::new()
        }
    };

    if !shared.publish(generation, suggestions) {
        debug!(%query, "discarding stale suggestions");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;
    use trip_planner_sdk::{
        sdk_test::{MockAutocompleteResult, MockPlaceAutocomplete},
        ApiError, StatusCode,
    };

    fn engine(mock: &Arc<MockPlaceAutocomplete>) -> SuggestionEngine {
        SuggestionEngine::new(mock.clone(), SuggestionEngineOptions::default())
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[tokio::test(start_paused = true)]
    async fn short_inputs_never_query() {
        let mock = Arc::new(MockPlaceAutocomplete::new());
        let engine = engine(&mock);

        engine.on_input("L");
        engine.on_input("Li");
        sleep(ms(1_000)).await;

        assert!(mock.tracked_inputs().is_empty());
        assert!(engine.suggestions().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn queries_once_after_the_quiet_period() {
        let mock = Arc::new(MockPlaceAutocomplete::new());
        mock.enqueue(MockAutocompleteResult::suggestions(["Paris, France"]));
        let engine = engine(&mock);
        let mut updates = engine.subscribe();

        engine.on_input("Par");
        sleep(ms(149)).await;
        assert!(mock.tracked_inputs().is_empty());

        sleep(ms(2)).await;
        assert_eq!(mock.tracked_inputs(), ["Par"]);
        assert!(updates.has_changed().expect("sender alive"));
        assert_eq!(*updates.borrow_and_update(), ["Paris, France"]);
        assert_eq!(engine.suggestions(), ["Paris, France"]);
    }

    #[tokio::test(start_paused = true)]
    async fn a_burst_of_input_sends_only_the_final_value() {
        let mock = Arc::new(MockPlaceAutocomplete::new());
        mock.enqueue(MockAutocompleteResult::suggestions(["Lisbon, Portugal"]));
        let engine = engine(&mock);

        engine.on_input("Lis");
        sleep(ms(100)).await;
        engine.on_input("Lisb");
        sleep(ms(100)).await;
        assert!(mock.tracked_inputs().is_empty());

        sleep(ms(100)).await;
        assert_eq!(mock.tracked_inputs(), ["Lisb"]);
        assert_eq!(engine.suggestions(), ["Lisbon, Portugal"]);
    }

    #[tokio::test(start_paused = true)]
    async fn late_responses_for_superseded_input_are_discarded() {
        let mock = Arc::new(MockPlaceAutocomplete::new());
        mock.enqueue_delayed(MockAutocompleteResult::suggestions(["Lisle, USA"]), ms(500))
            .enqueue_delayed(
                MockAutocompleteResult::suggestions(["Lisbon, Portugal"]),
                ms(10),
            );
        let engine = engine(&mock);

        engine.on_input("Lis");
        sleep(ms(200)).await;
        engine.on_input("Lisb");
        sleep(ms(200)).await;
        assert_eq!(engine.suggestions(), ["Lisbon, Portugal"]);

        sleep(ms(500)).await;
        assert_eq!(mock.tracked_inputs(), ["Lis", "Lisb"]);
        assert_eq!(engine.suggestions(), ["Lisbon, Portugal"]);
    }

    #[tokio::test(start_paused = true)]
    async fn shortening_the_input_clears_and_invalidates() {
        let mock = Arc::new(MockPlaceAutocomplete::new());
        mock.enqueue(MockAutocompleteResult::suggestions(["Rome, Italy"]))
            .enqueue_delayed(MockAutocompleteResult::suggestions(["Romania"]), ms(100));
        let engine = engine(&mock);

        engine.on_input("Rom");
        sleep(ms(200)).await;
        assert_eq!(engine.suggestions(), ["Rome, Italy"]);

        engine.on_input("Roma");
        sleep(ms(200)).await;
        engine.on_input("Ro");
        assert!(engine.suggestions().is_empty());

        sleep(ms(200)).await;
        assert!(engine.suggestions().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn failures_clear_the_list() {
        let mock = Arc::new(MockPlaceAutocomplete::new());
        mock.enqueue(MockAutocompleteResult::suggestions(["Oslo, Norway"]))
            .enqueue(MockAutocompleteResult::error(ApiError::StatusCode(
                StatusCode::INTERNAL_SERVER_ERROR,
                String::new(),
            )));
        let engine = engine(&mock);

        engine.on_input("Osl");
        sleep(ms(200)).await;
        assert_eq!(engine.suggestions(), ["Oslo, Norway"]);

        engine.on_input("Oslo");
        sleep(ms(200)).await;
        assert!(engine.suggestions().is_empty());
        assert_eq!(mock.tracked_inputs(), ["Osl", "Oslo"]);
    }
}
