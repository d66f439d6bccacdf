use crate::editing::inline::InlineElement;
use crate::shortcode::ShortcodeToken;

/// What an inline mention needs: which term, and the text it wraps.
///
/// `display_text` is HTML, already in the editable form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlossaryTermRef {
    pub id: String,
    pub display_text: String,
}

impl GlossaryTermRef {
    pub fn new(id: impl Into<String>, display_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_text: display_text.into(),
        }
    }

    /// Takes the `id` property and the content of a matched shortcode.
    /// A missing `id` becomes an empty one.
    pub fn from_token(token: &ShortcodeToken) -> Self {
        Self::new(token.id().unwrap_or_default(), token.content_str())
    }

    /// Editable markup for this mention.
    pub fn to_markup(&self) -> String {
        InlineElement::markup(&self.id, &self.display_text)
    }
}
