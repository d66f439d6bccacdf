use serde::{Deserialize, Serialize};

/// One entry of the term listing endpoint: `{"text": "...", "value": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermOption {
    /// Display text (the term title).
    pub text: String,
    /// Term id, as a string.
    pub value: String,
}

impl TermOption {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
        }
    }
}
