use std::collections::BTreeMap;

use serde::Serialize;

use crate::lexicon::Lexicon;

/// Occurrence counts keyed by every canonical term of the lexicon that
/// produced them. Terms that never matched are present with zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OccurrenceTally {
    counts: BTreeMap<String, usize>,
}

impl OccurrenceTally {
    /// All canonical terms of `lexicon` at zero.
    pub fn zeroed(lexicon: &Lexicon) -> Self {
        Self { counts: lexicon.terms().map(|t| (t.to_string(), 0)).collect() }
    }

    pub fn get(&self, term: &str) -> usize {
        self.counts.get(term).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(t, c)| (t.as_str(), *c))
    }

    /// Add every count of `other` into `self`.
    pub fn absorb(&mut self, other: &OccurrenceTally) {
        for (term, count) in other.iter() {
            *self.counts.entry(term.to_string()).or_insert(0) += count;
        }
    }

    fn add(&mut self, term: &str, count: usize) {
        *self.counts.entry(term.to_string()).or_insert(0) += count;
    }
}

/// Count whole-word, case-insensitive occurrences of each canonical term and
/// its synonyms across `texts`. Counts add up over all fields.
pub fn tally<I, S>(texts: I, lexicon: &Lexicon) -> OccurrenceTally
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = OccurrenceTally::zeroed(lexicon);
    for text in texts {
        let text = text.as_ref();
        if text.is_empty() {
            continue;
        }
        for entry in lexicon.entries() {
            out.add(entry.term(), entry.count_in(text));
        }
    }
    out
}

/// Like [`tally`], for fields that may be absent upstream.
pub fn tally_fields(fields: &[Option<&str>], lexicon: &Lexicon) -> OccurrenceTally {
    tally(fields.iter().flatten(), lexicon)
}
