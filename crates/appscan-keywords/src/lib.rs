//! appscan-keywords
//!
//! Synonym-aware weighted keyword scoring: a validated [`Lexicon`], per-term
//! occurrence tallies, threshold classification and the two-tier
//! listing/review targeting protocol.
pub mod classify;
pub mod lexicon;
pub mod tally;
pub mod targeting;

pub use classify::{classify, classify_with, effective_threshold, significant_terms};
pub use lexicon::{Lexicon, LexiconEntry};
pub use tally::{tally, tally_fields, OccurrenceTally};
pub use targeting::{TargetingClassifier, TargetingVerdict, Thresholds, Tier};
