use std::collections::HashMap;

use regex::{Regex, RegexBuilder};

use appscan_core::error::{Error, Result};
use appscan_core::types::{LexiconSpec, TermSpec};

/// One canonical term with its weight, synonyms and precompiled
/// whole-word matchers (the canonical term first, then each synonym).
#[derive(Debug, Clone)]
pub struct LexiconEntry {
    term: String,
    weight: f64,
    synonyms: Vec<String>,
    matchers: Vec<Regex>,
}

impl LexiconEntry {
    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn synonyms(&self) -> &[String] {
        &self.synonyms
    }

    /// Whole-word, case-insensitive occurrences of the term and all of its
    /// synonyms in `text`.
    pub fn count_in(&self, text: &str) -> usize {
        self.matchers.iter().map(|re| re.find_iter(text).count()).sum()
    }
}

/// Validated, read-only keyword table.
#[derive(Debug, Clone)]
pub struct Lexicon {
    entries: Vec<LexiconEntry>,
}

impl Lexicon {
    pub fn new(terms: Vec<TermSpec>) -> Result<Self> {
        // lowercased word -> canonical term that owns it
        let mut owners: HashMap<String, String> = HashMap::new();

        for spec in &terms {
            let key = spec.term.trim().to_lowercase();
            if key.is_empty() {
                return Err(Error::InvalidLexicon("empty canonical term".to_string()));
            }
            if !spec.weight.is_finite() || spec.weight <= 0.0 {
                return Err(Error::InvalidLexicon(format!(
                    "term '{}' has weight {}; weights must be positive",
                    spec.term, spec.weight
                )));
            }
            if owners.insert(key, spec.term.clone()).is_some() {
                return Err(Error::InvalidLexicon(format!("duplicate canonical term '{}'", spec.term)));
            }
        }

        for spec in &terms {
            for synonym in &spec.synonyms {
                let key = synonym.trim().to_lowercase();
                if key.is_empty() {
                    return Err(Error::InvalidLexicon(format!("term '{}' has an empty synonym", spec.term)));
                }
                if let Some(owner) = owners.get(&key) {
                    let reason = if owner == &spec.term {
                        format!("synonym '{}' repeats under term '{}'", synonym, spec.term)
                    } else if owner.to_lowercase() == key {
                        format!("synonym '{}' of '{}' is also a canonical term", synonym, spec.term)
                    } else {
                        format!("synonym '{}' is listed under both '{}' and '{}'", synonym, owner, spec.term)
                    };
                    return Err(Error::InvalidLexicon(reason));
                }
                owners.insert(key, spec.term.clone());
            }
        }

        let entries = terms
            .into_iter()
            .map(|spec| {
                let matchers = std::iter::once(&spec.term)
                    .chain(spec.synonyms.iter())
                    .map(|word| whole_word(word))
                    .collect::<Result<Vec<_>>>()?;
                Ok(LexiconEntry {
                    term: spec.term,
                    weight: spec.weight,
                    synonyms: spec.synonyms,
                    matchers,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.term.as_str())
    }

    pub fn get(&self, term: &str) -> Option<&LexiconEntry> {
        self.entries.iter().find(|e| e.term == term)
    }

    pub fn weight(&self, term: &str) -> Option<f64> {
        self.get(term).map(LexiconEntry::weight)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<LexiconSpec> for Lexicon {
    type Error = Error;

    fn try_from(spec: LexiconSpec) -> Result<Self> {
        Self::new(spec.terms)
    }
}

fn whole_word(word: &str) -> Result<Regex> {
    RegexBuilder::new(&format!(r"\b{}\b", regex::escape(word.trim())))
        .case_insensitive(true)
        .build()
        .map_err(|e| Error::InvalidLexicon(format!("cannot match '{}': {}", word, e)))
}
