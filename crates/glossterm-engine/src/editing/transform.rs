use std::sync::OnceLock;

use markup5ever_rcdom::Handle;

use super::{dom, inline::InlineElement};
use crate::models::GlossaryTermRef;
use crate::shortcode::{
    GLOSSARY_TAG, Properties, SerializeMode, ShortcodeMatcher, ShortcodeToken,
    sanitize_properties, serialize,
};

#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("Failed to serialize editable content: {0}")]
    Serialize(#[from] std::io::Error),
    #[error("Editable content has no body element")]
    MissingBody,
}

/// Matcher for wrapped glossary shortcodes, shared by every transform.
pub(crate) fn glossary_matcher() -> &'static ShortcodeMatcher {
    static MATCHER: OnceLock<ShortcodeMatcher> = OnceLock::new();
    MATCHER.get_or_init(|| {
        ShortcodeMatcher::new(GLOSSARY_TAG, true).expect("Invalid glossary shortcode regex")
    })
}

/// Stored text → editable HTML.
///
/// Every `[glossary_term id=..]content[/glossary_term]` becomes an inline
/// `<span data-shortcode="glossary_term" data-id="..">content</span>`.
/// Text with no shortcodes comes back unchanged.
pub fn load_transform(stored: &str) -> String {
    let (editable, count) = glossary_matcher()
        .replace_all(stored, |token| GlossaryTermRef::from_token(token).to_markup());
    log::debug!("load transform: {count} glossary shortcode(s) converted");
    editable
}

/// Editable HTML → stored text.
///
/// Each glossary span with a non-empty body is replaced by its shortcode,
/// nested spans included. Spans with an empty body are left untouched, so no
/// empty shortcodes are ever written.
pub fn save_transform(editable: &str) -> Result<String, TransformError> {
    let dom = dom::parse(editable);
    let body = dom::body(&dom).ok_or(TransformError::MissingBody)?;

    let mut count = 0;
    let stored = dom::serialize_children_with(&body, InlineElement::matches, |element| {
        let shortcode = element_to_shortcode(element)?;
        if shortcode.is_some() {
            count += 1;
        }
        Ok(shortcode)
    })?;

    log::debug!("save transform: {count} glossary element(s) converted");
    Ok(stored)
}

fn element_to_shortcode(element: &Handle) -> std::io::Result<Option<String>> {
    let content =
        dom::serialize_children_with(element, InlineElement::matches, element_to_shortcode)?;
    if content.is_empty() {
        return Ok(None);
    }

    let mut properties = Properties::new();
    properties.insert("id".to_string(), InlineElement::id(element));
    let token = ShortcodeToken::wrapped(GLOSSARY_TAG, sanitize_properties(properties), content);

    Ok(Some(serialize(&token, SerializeMode::Normal)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortcode::match_shortcode;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const STORED: &str =
        r#"Some <b>text</b> [glossary_term id="3"]public cloud[/glossary_term] more."#;
    const EDITABLE: &str = r#"Some <b>text</b> <span data-shortcode="glossary_term" data-id="3">public cloud</span> more."#;

    #[test]
    fn load_wraps_terms_in_spans() {
        assert_eq!(load_transform(STORED), EDITABLE);
    }

    #[test]
    fn save_restores_shortcodes() {
        assert_eq!(save_transform(EDITABLE).unwrap(), STORED);
    }

    #[rstest]
    #[case("")]
    #[case("<p>Nothing to see</p>")]
    #[case("[other_code id=1]x[/other_code]")]
    fn load_without_shortcodes_is_identity(#[case] stored: &str) {
        assert_eq!(load_transform(stored), stored);
    }

    #[test]
    fn load_handles_every_occurrence() {
        let stored = "[glossary_term id=1]a[/glossary_term], [glossary_term id='2']b[/glossary_term]";
        insta::assert_snapshot!(
            load_transform(stored),
            @r#"<span data-shortcode="glossary_term" data-id="1">a</span>, <span data-shortcode="glossary_term" data-id="2">b</span>"#
        );
    }

    #[test]
    fn load_keeps_markup_inside_content() {
        let stored = "[glossary_term id=4]<em>edge</em> node[/glossary_term]";
        assert_eq!(
            load_transform(stored),
            r#"<span data-shortcode="glossary_term" data-id="4"><em>edge</em> node</span>"#
        );
    }

    #[test]
    fn save_keeps_markup_inside_content() {
        let editable = r#"<p><span data-shortcode="glossary_term" data-id="4"><em>edge</em> node</span></p>"#;
        assert_eq!(
            save_transform(editable).unwrap(),
            "<p>[glossary_term id=\"4\"]<em>edge</em> node[/glossary_term]</p>"
        );
    }

    #[test]
    fn save_skips_empty_elements() {
        let editable = r#"a<span data-shortcode="glossary_term" data-id="5"></span>b"#;
        assert_eq!(save_transform(editable).unwrap(), editable);
    }

    #[test]
    fn save_without_elements_is_noop() {
        let editable = "<p>Plain <i>content</i></p>";
        assert_eq!(save_transform(editable).unwrap(), editable);
    }

    #[test]
    fn save_ignores_other_spans() {
        let editable = r#"<span class="x" data-id="1">a</span>"#;
        assert_eq!(save_transform(editable).unwrap(), editable);
    }

    #[test]
    fn save_sanitizes_the_id() {
        let editable =
            r#"<span data-shortcode="glossary_term" data-id="&lt;b&gt;&quot;1">x</span>"#;
        assert_eq!(
            save_transform(editable).unwrap(),
            r#"[glossary_term id="&lt;b&gt;1"]x[/glossary_term]"#
        );
    }

    #[test]
    fn save_drops_missing_id() {
        let editable = r#"<span data-shortcode="glossary_term">x</span>"#;
        assert_eq!(save_transform(editable).unwrap(), "[glossary_term]x[/glossary_term]");
    }

    #[test]
    fn load_save_load_is_stable() {
        let stored = "<p>[glossary_term id=\"1\"]alpha[/glossary_term] and [glossary_term id=\"22\"]beta gamma[/glossary_term]</p>";
        let editable = load_transform(stored);
        let saved = save_transform(&editable).unwrap();
        assert_eq!(saved, stored);
        assert_eq!(load_transform(&saved), editable);
    }

    #[test]
    fn load_is_idempotent_on_its_output() {
        let once = load_transform(STORED);
        assert_eq!(load_transform(&once), once);
    }

    #[test]
    fn nested_shortcodes_become_nested_spans() {
        let stored = "[glossary_term id=1]a [glossary_term id=2]b[/glossary_term] c[/glossary_term]";
        insta::assert_snapshot!(
            load_transform(stored),
            @r#"<span data-shortcode="glossary_term" data-id="1">a <span data-shortcode="glossary_term" data-id="2">b</span> c</span>"#
        );
    }

    #[test]
    fn nested_spans_save_as_nested_shortcodes() {
        let stored = r#"[glossary_term id="1"]a [glossary_term id="2"]b[/glossary_term] c[/glossary_term]"#;
        let editable = load_transform(stored);
        assert_eq!(save_transform(&editable).unwrap(), stored);
    }

    #[rstest]
    #[case("[glossary_term id=1][glossary_term id=2]x[/glossary_term] y [/glossary_term]")]
    #[case("[glossary_term id=1]a[/glossary_term] [/glossary_term] [glossary_term id=2]b")]
    #[case("[glossary_term id=1][glossary_term id=2][glossary_term id=3]x[/glossary_term][/glossary_term]")]
    fn load_is_idempotent_on_malformed_input(#[case] stored: &str) {
        let once = load_transform(stored);
        assert_eq!(match_shortcode(GLOSSARY_TAG, true, &once), None);
        assert_eq!(load_transform(&once), once);
    }
}
