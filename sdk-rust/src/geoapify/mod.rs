mod api;
mod autocomplete;

pub use autocomplete::{GeoapifyAutocomplete, GeoapifyAutocompleteOptions};
