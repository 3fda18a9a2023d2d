//! Two-tier child-directed content check.
//!
//! Tier one scores an app's title and description against the listing
//! threshold. Only when that is inconclusive are reviews fetched and scored
//! against the (higher) review threshold. A failed fetch counts as a
//! negative second tier.

use serde::Serialize;

use appscan_core::config::{ScoringSettings, DEFAULT_LISTING_THRESHOLD, DEFAULT_REVIEW_THRESHOLD};
use appscan_core::traits::ReviewSource;
use appscan_core::types::{AppListing, Rounding};

use crate::classify::significant_terms;
use crate::lexicon::Lexicon;
use crate::tally::{tally_fields, OccurrenceTally};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub listing: u32,
    pub reviews: u32,
    pub rounding: Rounding,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            listing: DEFAULT_LISTING_THRESHOLD,
            reviews: DEFAULT_REVIEW_THRESHOLD,
            rounding: Rounding::default(),
        }
    }
}

impl From<&ScoringSettings> for Thresholds {
    fn from(s: &ScoringSettings) -> Self {
        Self { listing: s.listing_threshold, reviews: s.review_threshold, rounding: s.rounding }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Listing,
    Reviews,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetingVerdict {
    pub targeted: bool,
    /// Tier that produced a positive verdict.
    pub decided_by: Option<Tier>,
    pub significant: Vec<String>,
    pub listing: OccurrenceTally,
    /// `None` when tier two was skipped or its source was unavailable.
    pub reviews: Option<OccurrenceTally>,
}

pub struct TargetingClassifier<'l> {
    lexicon: &'l Lexicon,
    thresholds: Thresholds,
}

impl<'l> TargetingClassifier<'l> {
    pub fn new(lexicon: &'l Lexicon, thresholds: Thresholds) -> Self {
        Self { lexicon, thresholds }
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Tier one only.
    pub fn score_listing(&self, listing: &AppListing) -> (OccurrenceTally, Vec<String>) {
        let tally = tally_fields(&[listing.title.as_deref(), listing.description.as_deref()], self.lexicon);
        let significant = self.significant(&tally, self.thresholds.listing);
        (tally, significant)
    }

    pub fn classify_listing<R>(&self, listing: &AppListing, reviews: &R) -> TargetingVerdict
    where
        R: ReviewSource + ?Sized,
    {
        let (listing_tally, significant) = self.score_listing(listing);
        tracing::debug!(app = %listing.id, total = listing_tally.total(), "listing tally");
        if !significant.is_empty() {
            return TargetingVerdict {
                targeted: true,
                decided_by: Some(Tier::Listing),
                significant,
                listing: listing_tally,
                reviews: None,
            };
        }

        let fetched = match reviews.fetch_reviews(&listing.id) {
            Ok(fetched) => fetched,
            Err(e) => {
                tracing::warn!(app = %listing.id, error = %e, "review source unavailable; treating reviews tier as negative");
                return TargetingVerdict {
                    targeted: false,
                    decided_by: None,
                    significant,
                    listing: listing_tally,
                    reviews: None,
                };
            }
        };

        let mut review_tally = OccurrenceTally::zeroed(self.lexicon);
        for review in &fetched {
            review_tally.absorb(&tally_fields(&[review.title.as_deref(), review.text.as_deref()], self.lexicon));
        }
        let significant = self.significant(&review_tally, self.thresholds.reviews);
        tracing::debug!(app = %listing.id, reviews = fetched.len(), total = review_tally.total(), "review tally");

        let targeted = !significant.is_empty();
        TargetingVerdict {
            targeted,
            decided_by: targeted.then_some(Tier::Reviews),
            significant,
            listing: listing_tally,
            reviews: Some(review_tally),
        }
    }

    fn significant(&self, tally: &OccurrenceTally, base: u32) -> Vec<String> {
        significant_terms(tally, self.lexicon, base, self.thresholds.rounding)
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}
