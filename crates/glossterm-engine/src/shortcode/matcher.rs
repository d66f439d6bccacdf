use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::{
    grammar::Grammar,
    span::Span,
    token::{Properties, ShortcodeToken},
};

/// A compiled pattern for one tag name and wrapping style.
///
/// Finds one occurrence per call. To process every occurrence, callers loop
/// over the text with the previous match already replaced (see
/// [`ShortcodeMatcher::replace_all`]).
#[derive(Debug, Clone)]
pub struct ShortcodeMatcher {
    name: String,
    wrapped: bool,
    regex: Regex,
    close: Option<Regex>,
}

impl ShortcodeMatcher {
    pub fn new(name: &str, wrapped: bool) -> Result<Self, regex::Error> {
        let regex = Regex::new(&Grammar::pattern(name, wrapped))?;
        let close = wrapped
            .then(|| Regex::new(&Grammar::close_pattern(name)))
            .transpose()?;
        Ok(Self {
            name: name.to_string(),
            wrapped,
            regex,
            close,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn wrapped(&self) -> bool {
        self.wrapped
    }

    /// Finds the first occurrence in `text`.
    pub fn find(&self, text: &str) -> Option<ShortcodeToken> {
        self.find_at(text, 0)
    }

    /// Finds the first occurrence starting at or after byte `start`.
    ///
    /// The returned span is absolute within `text`.
    pub fn find_at(&self, text: &str, start: usize) -> Option<ShortcodeToken> {
        if start > text.len() || !text.is_char_boundary(start) {
            return None;
        }
        let caps = self.regex.captures_at(text, start)?;
        Some(self.token_from(&caps))
    }

    fn token_from(&self, caps: &Captures<'_>) -> ShortcodeToken {
        // Group 0 always participates in a successful match
        let full = caps.get(0).map_or((0, 0, ""), |m| (m.start(), m.end(), m.as_str()));
        let attrs = caps.get(1).map_or("", |m| m.as_str());
        let content = self
            .wrapped
            .then(|| caps.get(2).map_or("", |m| m.as_str()).to_string());

        ShortcodeToken {
            name: self.name.clone(),
            wrapped: self.wrapped,
            properties: parse_properties(attrs),
            content,
            original: full.2.to_string(),
            span: Span::new(full.0, full.1),
        }
    }

    /// Rewrites occurrences in `text` with the output of `render` until no
    /// occurrence remains.
    ///
    /// Every pass searches the whole text again, so a shortcode that only
    /// becomes complete once an enclosing one is replaced is converted too.
    /// Each match consumes one closing tag (or, for self-closing tags, one
    /// tag) and its content cannot hold another, so the loop runs at most as
    /// many times as `text` has of them. A `render` that keeps putting tags
    /// back is cut off at that bound. Returns the new text and the number of
    /// replacements.
    pub fn replace_all<F>(&self, text: &str, mut render: F) -> (String, usize)
    where
        F: FnMut(&ShortcodeToken) -> String,
    {
        let budget = match &self.close {
            Some(close) => close.find_iter(text).count(),
            None => self.regex.find_iter(text).count(),
        };
        let mut out = text.to_string();
        let mut count = 0;

        while let Some(token) = self.find(&out) {
            if count == budget {
                log::warn!(
                    "[{}] replacements keep reintroducing tags, stopping after {count}",
                    self.name
                );
                break;
            }
            let replacement = render(&token);
            log::trace!(
                "replacing [{}] at {}..{} ({} bytes)",
                self.name,
                token.span.start,
                token.span.end,
                replacement.len()
            );
            out.replace_range(token.span.range(), &replacement);
            count += 1;
        }

        (out, count)
    }
}

/// Finds the next occurrence of `[name ...]` (and, when `wrapped`, its
/// content up to the first `[/name]`) in `text`.
///
/// Returns `None` when nothing matches. That is the loop terminator for
/// callers, not a failure.
pub fn match_shortcode(name: &str, wrapped: bool, text: &str) -> Option<ShortcodeToken> {
    match ShortcodeMatcher::new(name, wrapped) {
        Ok(matcher) => matcher.find(text),
        Err(e) => {
            log::warn!("shortcode pattern for {name:?} did not compile: {e}");
            None
        }
    }
}

/// Parses the attribute list of an opening tag, e.g. ` id="42" foo=bar`.
///
/// Scans left to right, consuming one pair at a time until no further pair
/// matches. Pairs with an empty key are dropped.
pub fn parse_properties(input: &str) -> Properties {
    static ATTR_REGEX: OnceLock<Regex> = OnceLock::new();
    let attr_regex =
        ATTR_REGEX.get_or_init(|| Regex::new(Grammar::ATTR).expect("Invalid attribute regex"));

    let mut result = Properties::new();
    let mut rest = input;

    while let Some(caps) = attr_regex.captures(rest) {
        let key = caps.get(1).map_or("", |m| m.as_str());
        let value = (2..=5)
            .filter_map(|i| caps.get(i))
            .map(|m| m.as_str())
            .find(|v| !v.is_empty())
            .unwrap_or("");
        if !key.is_empty() {
            result.insert(key.to_string(), value.to_string());
        }

        let consumed = caps.get(0).map_or(rest.len(), |m| m.end());
        rest = &rest[consumed..];
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn props(pairs: &[(&str, &str)]) -> Properties {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parse_properties_mixed_quoting() {
        assert_eq!(
            parse_properties(r#" id="42" foo=bar"#),
            props(&[("id", "42"), ("foo", "bar")])
        );
    }

    #[test]
    fn parse_properties_empty_input() {
        assert!(parse_properties("").is_empty());
    }

    #[rstest]
    #[case(" id=3", "3")]
    #[case(" id=1.5", "1.5")]
    #[case(" id='single quoted'", "single quoted")]
    #[case(r#" id="double quoted""#, "double quoted")]
    #[case(",id=comma-separated", "comma-separated")]
    #[case(r#" id="""#, "")]
    fn parse_properties_value_styles(#[case] input: &str, #[case] expected: &str) {
        let parsed = parse_properties(input);
        assert_eq!(parsed.get("id").map(String::as_str), Some(expected));
    }

    #[test]
    fn parse_properties_keeps_authored_order() {
        let parsed = parse_properties(" zeta=1 alpha=2 mid=3");
        let keys: Vec<_> = parsed.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn repeated_key_keeps_last_value() {
        let parsed = parse_properties(" id=1 id=2");
        assert_eq!(parsed, props(&[("id", "2")]));
    }

    #[test]
    fn match_wrapped_token() {
        let text = r#"Intro [glossary_term id="3"]public cloud[/glossary_term] outro"#;
        let token = match_shortcode("glossary_term", true, text).unwrap();

        assert_eq!(token.name, "glossary_term");
        assert!(token.wrapped);
        assert_eq!(token.id(), Some("3"));
        assert_eq!(token.content.as_deref(), Some("public cloud"));
        assert_eq!(
            token.original,
            r#"[glossary_term id="3"]public cloud[/glossary_term]"#
        );
        assert_eq!(&text[token.span.range()], token.original);
    }

    #[test]
    fn match_is_case_insensitive() {
        let token =
            match_shortcode("glossary_term", true, "[GLOSSARY_TERM id=7]x[/Glossary_Term]").unwrap();
        assert_eq!(token.id(), Some("7"));
        assert_eq!(token.content_str(), "x");
    }

    #[test]
    fn match_self_closing_token() {
        let token = match_shortcode("sitetree_link", false, "see [sitetree_link,id=12] here").unwrap();
        assert!(!token.wrapped);
        assert_eq!(token.content, None);
        assert_eq!(token.original, "[sitetree_link,id=12]");
    }

    #[test]
    fn content_may_span_lines() {
        let token =
            match_shortcode("glossary_term", true, "[glossary_term id=1]line one\nline two[/glossary_term]")
                .unwrap();
        assert_eq!(token.content_str(), "line one\nline two");
    }

    #[test]
    fn closing_tag_tolerates_whitespace() {
        let token = match_shortcode("glossary_term", true, "[glossary_term id=1]x[ / glossary_term ]");
        assert!(token.is_some());
    }

    #[test]
    fn first_closing_tag_wins() {
        let text = "[glossary_term id=1]outer [glossary_term id=2]inner[/glossary_term] tail[/glossary_term]";
        let token = match_shortcode("glossary_term", true, text).unwrap();
        assert_eq!(token.content_str(), "outer [glossary_term id=2]inner");
    }

    #[rstest]
    #[case("no shortcodes here")]
    #[case("[glossary_term id=1]never closed")]
    #[case("[glossary_term id=1 missing bracket")]
    #[case("[glossary_termx id=1]x[/glossary_term]")]
    fn unmatched_inputs_give_none(#[case] text: &str) {
        assert_eq!(match_shortcode("glossary_term", true, text), None);
    }

    #[test]
    fn find_at_skips_earlier_matches() {
        let matcher = ShortcodeMatcher::new("glossary_term", true).unwrap();
        let text = "[glossary_term id=1]a[/glossary_term] [glossary_term id=2]b[/glossary_term]";
        let first = matcher.find(text).unwrap();
        let second = matcher.find_at(text, first.span.end).unwrap();
        assert_eq!(second.id(), Some("2"));
        assert_eq!(&text[second.span.range()], second.original);
    }

    #[test]
    fn find_at_out_of_range_is_none() {
        let matcher = ShortcodeMatcher::new("glossary_term", true).unwrap();
        assert_eq!(matcher.find_at("short", 99), None);
    }

    #[test]
    fn replace_all_counts_occurrences() {
        let matcher = ShortcodeMatcher::new("glossary_term", true).unwrap();
        let text = "[glossary_term id=1]a[/glossary_term] and [glossary_term id=2]b[/glossary_term]";
        let (out, count) = matcher.replace_all(text, |t| format!("<{}>", t.content_str()));
        assert_eq!(out, "<a> and <b>");
        assert_eq!(count, 2);
    }

    #[test]
    fn replace_all_without_occurrences_is_identity() {
        let matcher = ShortcodeMatcher::new("glossary_term", true).unwrap();
        let (out, count) = matcher.replace_all("<p>plain</p>", |_| unreachable!());
        assert_eq!(out, "<p>plain</p>");
        assert_eq!(count, 0);
    }

    #[test]
    fn replace_all_converts_tags_completed_by_an_earlier_replacement() {
        let matcher = ShortcodeMatcher::new("glossary_term", true).unwrap();
        let text = "[glossary_term id=1][glossary_term id=2]x[/glossary_term] y [/glossary_term]";
        let (out, count) = matcher.replace_all(text, |t| format!("({})", t.content_str()));
        // The outer tag closes first, completing the inner one for the next pass
        assert_eq!(out, "((x) y )");
        assert_eq!(count, 2);
    }

    #[test]
    fn replace_all_leaves_unbalanced_tags_alone() {
        let matcher = ShortcodeMatcher::new("glossary_term", true).unwrap();
        let text = "[glossary_term id=1]a[/glossary_term] [/glossary_term] [glossary_term id=2]";
        let (out, count) = matcher.replace_all(text, |t| t.content_str().to_string());
        assert_eq!(out, "a [/glossary_term] [glossary_term id=2]");
        assert_eq!(count, 1);
    }

    #[rstest]
    #[case(true, "[glossary_term id=1]a[/glossary_term]")]
    #[case(false, "[glossary_term id=1]")]
    fn replace_all_stops_when_render_reinserts_the_tag(#[case] wrapped: bool, #[case] text: &str) {
        let matcher = ShortcodeMatcher::new("glossary_term", wrapped).unwrap();
        // Each replacement re-emits the shortcode it consumed
        let (out, count) = matcher.replace_all(text, |t| t.original.clone());
        assert_eq!(out, text);
        assert_eq!(count, 1);
    }
}
