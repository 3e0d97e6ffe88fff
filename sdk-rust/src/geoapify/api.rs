use serde_json::Value;

/// Pull `features[].properties.formatted` out of an autocomplete response.
/// Features without a formatted name are skipped; a body without a
/// `features` array yields no suggestions.
pub fn formatted_names(body: &Value) -> Vec<String> {
    body.get("features")
        .and_then(Value::as_array)
        .map(|features| {
            features
                .iter()
                .filter_map(|feature| feature.pointer("/properties/formatted"))
                .filter_map(Value::as_str)
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_formatted_names_in_order() {
        let body = json!({
            "type": "FeatureCollection",
            "features": [
                {"properties": {"formatted": "Paris, France", "city": "Paris"}},
                {"properties": {"city": "Nameless"}},
                {"properties": {"formatted": "Paris, TX, United States of America"}}
            ]
        });

        assert_eq!(
            formatted_names(&body),
            vec!["Paris, France", "Paris, TX, United States of America"]
        );
    }

    #[test]
    fn malformed_bodies_yield_nothing() {
        assert!(formatted_names(&json!({})).is_empty());
        assert!(formatted_names(&json!({"features": {"formatted": "x"}})).is_empty());
        assert!(formatted_names(&json!([1, 2, 3])).is_empty());
    }
}
