use std::collections::BTreeMap;

use super::{
    option::TermOption,
    term::{GlossaryTerm, TermError},
};

#[derive(Debug, thiserror::Error)]
pub enum TermSourceError {
    #[error("Failed to fetch glossary. (status {0})")]
    Status(u16),
    #[error("Failed to decode glossary listing: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Glossary unavailable: {0}")]
    Unavailable(String),
}

/// Supplies the terms an author can pick from.
pub trait TermSource {
    fn list_terms(&self) -> Result<Vec<TermOption>, TermSourceError>;
}

/// Resolves a shortcode `id` to a term at render time.
pub trait TermLookup {
    fn term(&self, id: &str) -> Option<&GlossaryTerm>;
}

/// In-memory glossary, keyed by id. Listings are sorted by title.
#[derive(Debug, Default, Clone)]
pub struct TermCatalog {
    terms: BTreeMap<u64, GlossaryTerm>,
}

impl TermCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog, validating every term.
    pub fn from_terms(terms: impl IntoIterator<Item = GlossaryTerm>) -> Result<Self, TermError> {
        let mut catalog = Self::new();
        for term in terms {
            catalog.insert(term)?;
        }
        Ok(catalog)
    }

    /// Adds or replaces a term. Returns the term it replaced, if any.
    pub fn insert(&mut self, term: GlossaryTerm) -> Result<Option<GlossaryTerm>, TermError> {
        term.validate()?;
        Ok(self.terms.insert(term.id, term))
    }

    /// Removes a term. Content that still mentions it keeps rendering, as
    /// plain text.
    pub fn remove(&mut self, id: u64) -> Option<GlossaryTerm> {
        self.terms.remove(&id)
    }

    pub fn get(&self, id: u64) -> Option<&GlossaryTerm> {
        self.terms.get(&id)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// All terms, sorted by title (then id, for equal titles).
    pub fn terms(&self) -> Vec<&GlossaryTerm> {
        let mut terms: Vec<_> = self.terms.values().collect();
        terms.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        terms
    }

    pub fn listing(&self) -> Vec<TermOption> {
        self.terms().into_iter().map(GlossaryTerm::to_option).collect()
    }

    /// Body served by the term listing endpoint.
    pub fn listing_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.listing())
    }
}

impl TermSource for TermCatalog {
    fn list_terms(&self) -> Result<Vec<TermOption>, TermSourceError> {
        Ok(self.listing())
    }
}

impl TermLookup for TermCatalog {
    fn term(&self, id: &str) -> Option<&GlossaryTerm> {
        let id = id.trim().parse::<u64>().ok()?;
        self.get(id)
    }
}
