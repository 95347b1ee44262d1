//! Fuzzy matching algorithms.
//!
//! The listing page lets adopters type a location with typos ("Springfeld",
//! "new-york"). Both sides are normalized, a contiguous hit wins outright, and
//! otherwise a bounded Levenshtein distance decides.

use serde::{Deserialize, Serialize};

use crate::{Result, SearchError};

/// Largest length difference between normalized source and query that can
/// still reach the distance computation.
pub const DEFAULT_MAX_LENGTH_GAP: usize = 3;

/// Largest edit distance still accepted as a match.
pub const DEFAULT_MAX_DISTANCE: usize = 3;

/// Upper bound for either threshold.
pub const MAX_THRESHOLD: usize = 64;

/// Thresholds used by [`MatchConfig::matches`].
///
/// Both default to 3. They are kept separate so the pre-filter can be
/// loosened without accepting more distant matches, or the other way round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Length pre-filter: a larger gap fails without computing distance.
    #[serde(default = "default_max_length_gap")]
    pub max_length_gap: usize,
    /// Accepted edit distance (inclusive).
    #[serde(default = "default_max_distance")]
    pub max_distance: usize,
}

fn default_max_length_gap() -> usize {
    DEFAULT_MAX_LENGTH_GAP
}

fn default_max_distance() -> usize {
    DEFAULT_MAX_DISTANCE
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LENGTH_GAP, DEFAULT_MAX_DISTANCE)
    }
}

impl MatchConfig {
    /// Creates a config with explicit thresholds.
    pub const fn new(max_length_gap: usize, max_distance: usize) -> Self {
        Self {
            max_length_gap,
            max_distance,
        }
    }

    /// Checks that both thresholds are within [`MAX_THRESHOLD`].
    pub fn validate(&self) -> Result<()> {
        if self.max_length_gap > MAX_THRESHOLD {
            return Err(SearchError::InvalidConfig(format!(
                "max_length_gap {} exceeds {}",
                self.max_length_gap, MAX_THRESHOLD
            )));
        }
        if self.max_distance > MAX_THRESHOLD {
            return Err(SearchError::InvalidConfig(format!(
                "max_distance {} exceeds {}",
                self.max_distance, MAX_THRESHOLD
            )));
        }
        Ok(())
    }

    /// Decide whether `query` is close enough to `source`.
    ///
    /// # Arguments
    /// * `source` - Stored field, e.g. an animal's location
    /// * `query` - User-entered text
    ///
    /// # Returns
    /// true if the query matches; an empty query matches everything
    ///
    /// # Example
    /// ```
    /// use petadopt_search::MatchConfig;
    ///
    /// let config = MatchConfig::default();
    /// assert!(config.matches("Springfield", "Springfeld"));
    /// assert!(!config.matches("Springfield", "Tokyo"));
    /// ```
    pub fn matches(&self, source: &str, query: &str) -> bool {
        self.matches_normalized(&normalize_text(source), &normalize_text(query))
    }

    /// Same decision over inputs already passed through [`normalize_text`].
    pub(crate) fn matches_normalized(&self, source: &str, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }

        if source.contains(query) {
            return true;
        }

        if source.is_empty() {
            return false;
        }

        // Normalized text is ASCII, so byte length is char count.
        if source.len().abs_diff(query.len()) > self.max_length_gap {
            return false;
        }

        levenshtein_distance(source, query) <= self.max_distance
    }
}

/// Lowercase `text` and drop everything outside `[a-z0-9]`.
///
/// Never fails; the result may be empty (e.g. for `"---"` or `"東京"`).
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Check `query` against `source` with the default thresholds.
///
/// # Example
/// ```
/// use petadopt_search::is_fuzzy_match;
///
/// assert!(is_fuzzy_match("New York", "new york"));
/// assert!(is_fuzzy_match("Springfield", ""));
/// assert!(!is_fuzzy_match("", "abc"));
/// ```
pub fn is_fuzzy_match(source: &str, query: &str) -> bool {
    MatchConfig::default().matches(source, query)
}

/// Calculate Levenshtein edit distance between two strings.
///
/// # Arguments
/// * `a` - First string
/// * `b` - Second string
///
/// # Returns
/// Number of single-character edits needed to transform a into b
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    // table[i][j]: edits turning the first i chars of a into the first j of b
    let mut table = vec![vec![0usize; n + 1]; m + 1];
    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in table[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=m {
        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            table[i][j] = (table[i - 1][j] + 1)
                .min(table[i][j - 1] + 1)
                .min(table[i - 1][j - 1] + cost);
        }
    }

    table[m][n]
}
