//! WASM bindings for search utilities.

use wasm_bindgen::prelude::*;

/// Check a stored location against what the user typed.
///
/// Uses the default thresholds (length gap 3, distance 3).
#[wasm_bindgen]
pub fn fuzzy_location_match(source: &str, query: &str) -> bool {
    crate::is_fuzzy_match(source, query)
}

/// Calculate Levenshtein edit distance between two strings.
#[wasm_bindgen]
pub fn edit_distance(a: &str, b: &str) -> usize {
    crate::levenshtein_distance(a, b)
}

/// Filter items by location and return the matching IDs as JSON.
///
/// # Arguments
/// * `query` - Location typed by the user
/// * `items_json` - JSON array of items with `id` and `location` fields
///
/// # Returns
/// JSON array of matching IDs in input order (`[]` on malformed input)
#[wasm_bindgen]
pub fn filter_locations(query: &str, items_json: &str) -> String {
    let items = match crate::batch::parse_location_items(items_json) {
        Ok(items) => items,
        Err(_) => return "[]".to_string(),
    };

    let ids: Vec<&str> =
        crate::batch::filter_location_items(&crate::MatchConfig::default(), query, &items)
            .into_iter()
            .map(|item| item.id.as_str())
            .collect();

    serde_json::to_string(&ids).unwrap_or_else(|_| "[]".to_string())
}
