use indexmap::IndexMap;

use super::span::Span;

/// Attribute mapping of a shortcode.
///
/// Lookups don't care about order, but insertion order is kept so a token
/// serializes its attributes in the order they were authored. Re-inserting a
/// key updates the value in place.
pub type Properties = IndexMap<String, String>;

/// One parsed occurrence of a shortcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcodeToken {
    /// Tag name, as requested by the caller (not as written in the text).
    pub name: String,
    /// `true` for `[tag]...[/tag]`, `false` for a self-closing `[tag]`.
    pub wrapped: bool,
    pub properties: Properties,
    /// Text between the opening and closing tags. `None` unless wrapped.
    pub content: Option<String>,
    /// Exact matched text. Empty for tokens built by hand.
    pub original: String,
    /// Where `original` sits in the searched text.
    pub span: Span,
}

impl ShortcodeToken {
    /// Builds a wrapped token that did not come from the matcher.
    pub fn wrapped(
        name: impl Into<String>,
        properties: Properties,
        content: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            wrapped: true,
            properties,
            content: Some(content.into()),
            original: String::new(),
            span: Span::default(),
        }
    }

    /// Builds a self-closing token that did not come from the matcher.
    pub fn single(name: impl Into<String>, properties: Properties) -> Self {
        Self {
            name: name.into(),
            wrapped: false,
            properties,
            content: None,
            original: String::new(),
            span: Span::default(),
        }
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// The `id` attribute, which every glossary shortcode carries.
    pub fn id(&self) -> Option<&str> {
        self.property("id")
    }

    /// Inner content, or an empty string for self-closing tokens.
    pub fn content_str(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}
