use serde::{Deserialize, Serialize};

use super::option::TermOption;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TermError {
    #[error("Glossary term is missing required field: {0}")]
    MissingField(&'static str),
}

/// A glossary entry: a title and a rich-text (HTML) definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryTerm {
    pub id: u64,
    pub title: String,
    pub definition: String,
}

impl GlossaryTerm {
    pub fn new(id: u64, title: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            definition: definition.into(),
        }
    }

    /// Title and definition are both required.
    pub fn validate(&self) -> Result<(), TermError> {
        if self.title.trim().is_empty() {
            return Err(TermError::MissingField("title"));
        }
        if self.definition.trim().is_empty() {
            return Err(TermError::MissingField("definition"));
        }
        Ok(())
    }

    /// Entry for the term picker. The value is always a string.
    pub fn to_option(&self) -> TermOption {
        TermOption {
            text: self.title.clone(),
            value: self.id.to_string(),
        }
    }
}
