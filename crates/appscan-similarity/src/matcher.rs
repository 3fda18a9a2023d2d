use appscan_core::config::DEFAULT_MAX_DISTANCE;
use appscan_core::text::{fold_case, normalize_name};
use appscan_core::types::ListingComparison;

use crate::distance::{compare, distance};

/// Decides whether two store listings name the same app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameMatcher {
    max_distance: usize,
}

impl Default for NameMatcher {
    fn default() -> Self {
        Self { max_distance: DEFAULT_MAX_DISTANCE }
    }
}

impl NameMatcher {
    pub fn new(max_distance: usize) -> Self {
        Self { max_distance }
    }

    pub fn max_distance(&self) -> usize {
        self.max_distance
    }

    /// Distance between the normalized names, or `None` when either one
    /// normalizes to an empty string.
    pub fn match_distance(&self, name_a: &str, name_b: &str) -> Option<usize> {
        let a = normalize_name(name_a);
        let b = normalize_name(name_b);
        if a.is_empty() || b.is_empty() {
            return None;
        }
        Some(distance(&a, &b))
    }

    pub fn is_likely_match(&self, name_a: &str, name_b: &str) -> bool {
        let verdict = self
            .match_distance(name_a, name_b)
            .is_some_and(|d| d < self.max_distance);
        tracing::debug!(name_a, name_b, verdict, "name match");
        verdict
    }

    /// Index and distance of the closest candidate that matches `name`.
    /// Ties keep the earliest candidate.
    pub fn best_match<S: AsRef<str>>(&self, name: &str, candidates: &[S]) -> Option<(usize, usize)> {
        let mut best: Option<(usize, usize)> = None;
        for (idx, candidate) in candidates.iter().enumerate() {
            let Some(d) = self.match_distance(name, candidate.as_ref()) else { continue };
            if d >= self.max_distance {
                continue;
            }
            if best.map_or(true, |(_, best_d)| d < best_d) {
                best = Some((idx, d));
            }
        }
        best
    }
}

/// `true` iff the normalized names are fewer than `max_distance` edits apart.
pub fn is_likely_match(name_a: &str, name_b: &str, max_distance: usize) -> bool {
    NameMatcher::new(max_distance).is_likely_match(name_a, name_b)
}

/// Case-insensitive title and description metrics for one app seen in two
/// catalogs.
pub fn compare_listings(
    title_a: &str,
    description_a: &str,
    title_b: &str,
    description_b: &str,
) -> ListingComparison {
    ListingComparison {
        title: compare(&fold_case(title_a), &fold_case(title_b)),
        description: compare(&fold_case(description_a), &fold_case(description_b)),
    }
}
