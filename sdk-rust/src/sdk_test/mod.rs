mod autocomplete;

pub use autocomplete::{MockAutocompleteResult, MockPlaceAutocomplete};
