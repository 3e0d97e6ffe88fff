use crate::ApiResult;

/// A source of place-name suggestions for partially typed destinations.
#[async_trait::async_trait]
pub trait PlaceAutocomplete: Send + Sync {
    fn provider(&self) -> &'static str;
    /// Formatted place names matching `text`, in the order the provider
    /// ranked them.
    async fn autocomplete(&self, text: &str) -> ApiResult<Vec<String>>;
}
