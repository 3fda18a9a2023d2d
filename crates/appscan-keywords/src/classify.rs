use appscan_core::types::Rounding;

use crate::lexicon::Lexicon;
use crate::tally::OccurrenceTally;

/// `round(weight * base_threshold)` under the given convention.
pub fn effective_threshold(weight: f64, base_threshold: u32, rounding: Rounding) -> usize {
    let scaled = rounding.apply(weight * f64::from(base_threshold));
    if scaled <= 0.0 {
        0
    } else {
        scaled as usize
    }
}

/// Canonical terms whose tally reaches their effective threshold.
pub fn significant_terms<'l>(
    tally: &OccurrenceTally,
    lexicon: &'l Lexicon,
    base_threshold: u32,
    rounding: Rounding,
) -> Vec<&'l str> {
    lexicon
        .entries()
        .iter()
        .filter(|e| tally.get(e.term()) >= effective_threshold(e.weight(), base_threshold, rounding))
        .map(|e| e.term())
        .collect()
}

/// `true` if any canonical term is significant, rounding half away from zero.
pub fn classify(tally: &OccurrenceTally, lexicon: &Lexicon, base_threshold: u32) -> bool {
    classify_with(tally, lexicon, base_threshold, Rounding::default())
}

pub fn classify_with(tally: &OccurrenceTally, lexicon: &Lexicon, base_threshold: u32, rounding: Rounding) -> bool {
    lexicon
        .entries()
        .iter()
        .any(|e| tally.get(e.term()) >= effective_threshold(e.weight(), base_threshold, rounding))
}
