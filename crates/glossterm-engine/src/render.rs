//! Public-site rendering of stored glossary shortcodes.
//!
//! Terms can be deleted or edited after content mentions them, so a lookup
//! that fails never breaks the page: the mention falls back to its own text.

use crate::editing::transform::glossary_matcher;
use crate::models::TermLookup;

/// Renders one mention.
///
/// - blank `id` or empty `content`: nothing
/// - unknown term, or a term with a blank definition: `content` unchanged
/// - otherwise: `content` followed by the definition, wrapped for styling
///
/// Glossary shortcodes inside the definition are flattened to their text so
/// a definition never expands another definition.
pub fn render_term(lookup: &impl TermLookup, id: &str, content: &str) -> String {
    if id.trim().is_empty() || content.is_empty() {
        return String::new();
    }

    let Some(term) = lookup.term(id) else {
        log::debug!("glossary term {id} not found, rendering bare content");
        return content.to_string();
    };
    if term.definition.trim().is_empty() {
        return content.to_string();
    }

    let definition = flatten_shortcodes(&term.definition);
    format!(
        r#"<span class="glossary-term" tabindex="0">{content}<span class="glossary-term__definition" role="tooltip">{definition}</span></span>"#
    )
}

/// Expands every glossary shortcode in stored content for the public site.
pub fn render_shortcodes(lookup: &impl TermLookup, stored: &str) -> String {
    let (html, count) = glossary_matcher().replace_all(stored, |token| {
        render_term(lookup, token.id().unwrap_or_default(), token.content_str())
    });
    log::debug!("rendered {count} glossary shortcode(s)");
    html
}

fn flatten_shortcodes(text: &str) -> String {
    glossary_matcher()
        .replace_all(text, |token| token.content_str().to_string())
        .0
}
