//! Term store: term name → language → localized string

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::lang;

/// Translations of a single term, keyed by language code
pub type Term = BTreeMap<String, String>;

/// All terms known to a project
///
/// A name without an entry behaves exactly like an empty [`Term`]: reads
/// return `None` and never create anything. Entries are created only by the
/// write operations. Language codes are sanitized on every read and write,
/// so `sr@latin` and `sr-latin` name the same translation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermStore {
    terms: BTreeMap<String, Term>,
}

impl TermStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get every translation of a term
    pub fn get(&self, name: &str) -> Option<&Term> {
        self.terms.get(name)
    }

    /// Get the value of a term in one language
    pub fn value(&self, name: &str, language: &str) -> Option<&str> {
        self.terms
            .get(name)
            .and_then(|term| term.get(&lang::sanitize(language)))
            .map(String::as_str)
    }

    /// Make sure a term exists, returning it for modification
    ///
    /// Returns `None` for an empty name, which is never a valid term.
    pub fn ensure_term(&mut self, name: &str) -> Option<&mut Term> {
        if name.is_empty() {
            return None;
        }
        Some(self.terms.entry(name.to_string()).or_default())
    }

    /// Set the value of a term in one language, creating the term if needed
    ///
    /// Returns the previous value, if any.
    pub fn set_value(
        &mut self,
        name: &str,
        language: &str,
        value: impl Into<String>,
    ) -> Option<String> {
        self.ensure_term(name)?
            .insert(lang::sanitize(language), value.into())
    }

    /// Remove a term and all its translations
    pub fn delete_term(&mut self, name: &str) -> Option<Term> {
        self.terms.remove(name)
    }

    /// Remove one translation of a term
    pub fn delete_value(&mut self, name: &str, language: &str) -> Option<String> {
        self.terms.get_mut(name)?.remove(&lang::sanitize(language))
    }

    /// Check if a term exists
    pub fn contains(&self, name: &str) -> bool {
        self.terms.contains_key(name)
    }

    /// Term names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(String::as_str)
    }

    /// Iterate over all terms in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Term)> {
        self.terms.iter().map(|(name, term)| (name.as_str(), term))
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Sanitize the language keys of every term, e.g. after loading from disk
    ///
    /// When two keys sanitize to the same code the already sanitized one wins.
    pub(crate) fn normalize_languages(&mut self) {
        for term in self.terms.values_mut() {
            let raw: Vec<String> = term
                .keys()
                .filter(|language| lang::sanitize(language) != **language)
                .cloned()
                .collect();
            for language in raw {
                if let Some(value) = term.remove(&language) {
                    term.entry(lang::sanitize(&language)).or_insert(value);
                }
            }
        }
    }
}
