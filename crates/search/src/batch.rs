//! Batch matching over candidate lists with optional parallelism.
//!
//! A listing filter re-runs the matcher over every record on each keystroke.
//! The query is normalized once per pass; each candidate is independent, so
//! the `parallel` feature hands them to rayon.

use crate::fuzzy::normalize_text;
use crate::{MatchConfig, Result};
use serde::{Deserialize, Serialize};

/// Input item for location filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationItem {
    /// Record ID
    pub id: String,
    /// Free-text location of the record
    #[serde(default)]
    pub location: String,
}

/// Run the matcher for every source against one query.
///
/// # Returns
/// One flag per source, in input order.
///
/// # Example
/// ```
/// use petadopt_search::{batch::match_all, MatchConfig};
///
/// let flags = match_all(&MatchConfig::default(), "pune", &["Pune", "Delhi", "Puna"]);
/// assert_eq!(flags, vec![true, false, true]);
/// ```
pub fn match_all<S>(config: &MatchConfig, query: &str, sources: &[S]) -> Vec<bool>
where
    S: AsRef<str> + Sync,
{
    let query = normalize_text(query);
    let check = |source: &S| config.matches_normalized(&normalize_text(source.as_ref()), &query);

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        sources.par_iter().map(check).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        sources.iter().map(check).collect()
    }
}

/// Indices of the sources that match `query`, ascending.
pub fn matching_indices<S>(config: &MatchConfig, query: &str, sources: &[S]) -> Vec<usize>
where
    S: AsRef<str> + Sync,
{
    match_all(config, query, sources)
        .into_iter()
        .enumerate()
        .filter_map(|(index, matched)| matched.then_some(index))
        .collect()
}

/// Keep the items whose location matches `query`.
pub fn filter_location_items<'a>(
    config: &MatchConfig,
    query: &str,
    items: &'a [LocationItem],
) -> Vec<&'a LocationItem> {
    let locations: Vec<&str> = items.iter().map(|item| item.location.as_str()).collect();
    matching_indices(config, query, &locations)
        .into_iter()
        .map(|index| &items[index])
        .collect()
}

/// Parse a JSON array of `{ "id": ..., "location": ... }` objects.
pub fn parse_location_items(json: &str) -> Result<Vec<LocationItem>> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<LocationItem> {
        [("1", "Springfield"), ("2", "Tokyo"), ("3", "Springfeld"), ("4", "")]
            .into_iter()
            .map(|(id, location)| LocationItem {
                id: id.to_string(),
                location: location.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_match_all_keeps_order() {
        let sources = ["Tokyo", "Springfield", "", "springfeld"];
        let flags = match_all(&MatchConfig::default(), "Springfield", &sources);
        assert_eq!(flags, vec![false, true, false, true]);
    }

    #[test]
    fn test_empty_query_matches_all() {
        let sources = vec!["a".to_string(), String::new()];
        assert_eq!(
            matching_indices(&MatchConfig::default(), "  ", &sources),
            vec![0, 1]
        );
    }

    #[test]
    fn test_filter_location_items() {
        let items = items();
        let hits = filter_location_items(&MatchConfig::default(), "springfield", &items);
        let ids: Vec<&str> = hits.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_parse_location_items() {
        let parsed = parse_location_items(r#"[{"id":"a","location":"Pune"},{"id":"b"}]"#).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].location, "");
    }

    #[test]
    fn test_parse_location_items_invalid() {
        assert!(parse_location_items("not json").is_err());
    }
}
