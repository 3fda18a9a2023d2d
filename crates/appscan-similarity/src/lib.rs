//! appscan-similarity
//!
//! Edit distance and similarity ratio between strings, plus the
//! cross-catalog name matcher built on top of them.
pub mod distance;
pub mod matcher;

pub use distance::{compare, distance, ratio};
pub use matcher::{compare_listings, is_likely_match, NameMatcher};
