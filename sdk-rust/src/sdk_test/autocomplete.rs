use std::{collections::VecDeque, sync::Mutex, time::Duration};

use crate::{ApiError, ApiResult, PlaceAutocomplete};

/// Result for a mocked `autocomplete` call.
/// It can either be a list of suggestions or an error to return.
pub enum MockAutocompleteResult {
    Suggestions(Vec<String>),
    Error(ApiError),
}

impl MockAutocompleteResult {
    /// Construct a result that yields the provided suggestions.
    pub fn suggestions<I, S>(suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Suggestions(suggestions.into_iter().map(Into::into).collect())
    }

    /// Construct a result that yields the provided error.
    pub fn error(error: ApiError) -> Self {
        Self::Error(error)
    }
}

impl From<Vec<String>> for MockAutocompleteResult {
    fn from(suggestions: Vec<String>) -> Self {
        Self::Suggestions(suggestions)
    }
}

impl From<ApiResult<Vec<String>>> for MockAutocompleteResult {
    fn from(result: ApiResult<Vec<String>>) -> Self {
        match result {
            Ok(suggestions) => Self::Suggestions(suggestions),
            Err(error) => Self::Error(error),
        }
    }
}

struct MockedCall {
    result: MockAutocompleteResult,
    delay: Duration,
}

#[derive(Default)]
struct MockPlaceAutocompleteState {
    mocked_results: VecDeque<MockedCall>,
    tracked_inputs: Vec<String>,
}

/// A mock autocomplete provider for testing that tracks queries and yields
/// predefined outputs, optionally after a delay.
#[derive(Default)]
pub struct MockPlaceAutocomplete {
    state: Mutex<MockPlaceAutocompleteState>,
}

impl MockPlaceAutocomplete {
    /// Construct a new mock provider instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a result returned immediately.
    pub fn enqueue<R>(&self, result: R) -> &Self
    where
        R: Into<MockAutocompleteResult>,
    {
        self.enqueue_delayed(result, Duration::ZERO)
    }

    /// Enqueue a result returned after `delay` has elapsed.
    pub fn enqueue_delayed<R>(&self, result: R, delay: Duration) -> &Self
    where
        R: Into<MockAutocompleteResult>,
    {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.mocked_results.push_back(MockedCall {
            result: result.into(),
            delay,
        });
        drop(state);
        self
    }

    /// Retrieve the queries received so far, in call order.
    pub fn tracked_inputs(&self) -> Vec<String> {
        let state = self.state.lock().expect("mock state poisoned");
        state.tracked_inputs.clone()
    }

    /// Reset tracked inputs without touching enqueued results.
    pub fn reset(&self) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.tracked_inputs.clear();
    }

    /// Clear both tracked inputs and enqueued results.
    pub fn restore(&self) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.mocked_results.clear();
        state.tracked_inputs.clear();
    }
}

#[async_trait::async_trait]
impl PlaceAutocomplete for MockPlaceAutocomplete {
    fn provider(&self) -> &'static str {
        "mock"
    }

    async fn autocomplete(&self, text: &str) -> ApiResult<Vec<String>> {
        let call = {
            let mut state = self.state.lock().expect("mock state poisoned");
            state.tracked_inputs.push(text.to_string());
            state.mocked_results.pop_front()
        };

        let MockedCall { result, delay } = call.ok_or_else(|| {
            ApiError::Invariant(
                self.provider(),
                "no mocked autocomplete results available".into(),
            )
        })?;

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match result {
            MockAutocompleteResult::Suggestions(suggestions) => Ok(suggestions),
            MockAutocompleteResult::Error(error) => Err(error),
        }
    }
}
