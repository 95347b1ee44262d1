//! Adoption listing filter
//!
//! Mirrors the browse page: a free-text search over name and breed, a
//! typo-tolerant location search, and a species dropdown.

use crate::models::Animal;
use petadopt_search::MatchConfig;
use tracing::debug;

/// Species dropdown value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum KindFilter {
    #[default]
    All,
    Only(String),
}

impl KindFilter {
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            KindFilter::All
        } else {
            KindFilter::Only(value.to_lowercase())
        }
    }

    pub fn accepts(&self, kind: &str) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Only(wanted) => kind.to_lowercase() == *wanted,
        }
    }
}

impl From<Option<&str>> for KindFilter {
    fn from(value: Option<&str>) -> Self {
        value.map(KindFilter::parse).unwrap_or_default()
    }
}

/// Filters entered on the listing page.
#[derive(Debug, Clone, Default)]
pub struct ListingQuery {
    /// Matched against name and breed
    pub search: String,
    /// Matched fuzzily against location
    pub location: String,
    pub kind: KindFilter,
}

impl ListingQuery {
    fn accepts(&self, animal: &Animal, search: &str, config: &MatchConfig) -> bool {
        let text_ok = search.is_empty()
            || animal.name.to_lowercase().contains(search)
            || animal.breed.to_lowercase().contains(search);

        text_ok && config.matches(&animal.location, &self.location) && self.kind.accepts(&animal.kind)
    }
}

/// Animals passing every filter, in input order.
pub fn filter_animals<'a>(
    animals: &'a [Animal],
    query: &ListingQuery,
    config: &MatchConfig,
) -> Vec<&'a Animal> {
    let search = query.search.to_lowercase();
    let matched: Vec<&Animal> = animals
        .iter()
        .filter(|animal| query.accepts(animal, &search, config))
        .collect();

    debug!(
        total = animals.len(),
        matched = matched.len(),
        location = %query.location,
        "Filtered listings"
    );
    matched
}

/// Absolute URL for a stored image path.
///
/// Remote URLs pass through; Windows separators from uploads are fixed.
pub fn resolve_image_url(base_url: &str, path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    if path.starts_with("http") {
        return path.to_string();
    }

    let cleaned = path.replace('\\', "/");
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        cleaned.trim_start_matches('/')
    )
}
