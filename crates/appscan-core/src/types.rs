//! Domain types shared by the similarity and keyword engines.

use serde::{Deserialize, Serialize};

/// Two raw strings to compare. No normalization is assumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextPair<'a> {
    pub left: &'a str,
    pub right: &'a str,
}

impl<'a> TextPair<'a> {
    pub fn new(left: &'a str, right: &'a str) -> Self {
        Self { left, right }
    }
}

/// Edit distance between two strings and, when computed, their similarity
/// ratio in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceResult {
    pub distance: usize,
    pub ratio: Option<f64>,
}

/// Title and description metrics for the same app listed in two catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ListingComparison {
    pub title: DistanceResult,
    pub description: DistanceResult,
}

/// The primary text of an app listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppListing {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A single user review. Either field may be missing upstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Rounding convention applied to `weight * base_threshold`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    /// 4.5 -> 5
    #[default]
    HalfAwayFromZero,
    /// 4.5 -> 4, 5.5 -> 6
    HalfToEven,
}

impl Rounding {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Rounding::HalfAwayFromZero => value.round(),
            Rounding::HalfToEven => value.round_ties_even(),
        }
    }
}

/// Configuration shape of one canonical lexicon term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermSpec {
    pub term: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

fn default_weight() -> f64 {
    1.0
}

impl TermSpec {
    pub fn new<S: Into<String>>(term: S, weight: f64, synonyms: &[&str]) -> Self {
        Self {
            term: term.into(),
            weight,
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Unvalidated lexicon as read from configuration.
///
/// The default is the child-directed lexicon: a weight of 0.5 means half
/// the base threshold is enough for that term to count as significant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconSpec {
    pub terms: Vec<TermSpec>,
}

impl Default for LexiconSpec {
    fn default() -> Self {
        Self {
            terms: vec![
                TermSpec::new("child", 1.0, &["children", "youngster", "offspring"]),
                TermSpec::new("kid", 1.0, &["kids", "son", "daughter"]),
                TermSpec::new(
                    "toddler",
                    0.75,
                    &[
                        "toddlers",
                        "pre-k",
                        "babies",
                        "baby",
                        "infant",
                        "preschooler",
                        "kindergarten",
                        "tot",
                    ],
                ),
            ],
        }
    }
}
