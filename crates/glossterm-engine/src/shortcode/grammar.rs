/// Shortcode syntax, owned in one place.
///
/// The matcher assembles its patterns from these pieces; it never spells out
/// `[` or `=` itself. Every fragment is a plain regex string so the pieces can
/// be concatenated around an escaped tag name.
pub struct Grammar;

impl Grammar {
    /// Opening bracket that starts every tag.
    pub const OPEN: &'static str = r"\[";
    /// Closing bracket of the opening tag.
    pub const RIGHT_BRACKET: &'static str = r"\]";
    /// Optional whitespace before the closing bracket.
    pub const SPACE: &'static str = r"\s*";
    /// Every `key=value` pair of the opening tag, captured as one group.
    pub const ATTRS: &'static str = r#"((?:[,\s]+(?:[a-z0-9\-_]+)=(?:(?:[0-9]+\.[0-9]+)|(?:[a-z0-9\-_]+)|(?:'[^']*')|(?:"[^"]*")))*)"#;
    /// A single pair. Group 1 is the key; groups 2 to 5 hold the value as a
    /// decimal, a bare token, a single-quoted or a double-quoted string.
    ///
    /// The decimal form comes first: the bare token would otherwise stop at
    /// the `.` of `1.5`.
    pub const ATTR: &'static str =
        r#"(?i)[,\s]+([a-z0-9\-_]+)=(?:([0-9]+\.[0-9]+)|([a-z0-9\-_]+)|(?:'([^']*)')|(?:"([^"]*)"))"#;
    /// Inner content, shortest first, allowed to span lines.
    pub const CONTENT: &'static str = r"(?s:(.*?))";

    /// Builds the full pattern for `name`.
    ///
    /// Group 1 is the attribute list and, when `wrapped`, group 2 is the
    /// content. The name is escaped so it always matches literally.
    pub fn pattern(name: &str, wrapped: bool) -> String {
        let name = regex::escape(name);
        let mut pattern = format!(
            "(?i){}{name}{}{}{}",
            Self::OPEN,
            Self::ATTRS,
            Self::SPACE,
            Self::RIGHT_BRACKET
        );
        if wrapped {
            pattern.push_str(Self::CONTENT);
            pattern.push_str(&Self::close(&name));
        }
        pattern
    }

    /// Standalone pattern for the closing tag of `name`, case-insensitive.
    pub fn close_pattern(name: &str) -> String {
        format!("(?i){}", Self::close(&regex::escape(name)))
    }

    /// Closing tag pattern, tolerant of inner whitespace: `[ / name ]`.
    fn close(escaped_name: &str) -> String {
        format!(r"\[\s*/\s*{escaped_name}\s*\]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn patterns_compile() {
        assert!(Regex::new(&Grammar::pattern("glossary_term", true)).is_ok());
        assert!(Regex::new(&Grammar::pattern("glossary_term", false)).is_ok());
        assert!(Regex::new(Grammar::ATTR).is_ok());
    }

    #[test]
    fn decimal_value_is_not_cut_at_the_point() {
        let re = Regex::new(Grammar::ATTR).unwrap();
        let caps = re.captures(" id=1.5").unwrap();
        assert_eq!(caps.get(0).unwrap().as_str(), " id=1.5");
        assert_eq!(caps.get(2).unwrap().as_str(), "1.5");
    }

    #[test]
    fn close_pattern_matches_spaced_and_uppercase_tags() {
        let re = Regex::new(&Grammar::close_pattern("glossary_term")).unwrap();
        assert!(re.is_match("[/glossary_term]"));
        assert!(re.is_match("[ / GLOSSARY_TERM ]"));
        assert!(!re.is_match("[glossary_term]"));
    }

    #[test]
    fn name_is_matched_literally() {
        let re = Regex::new(&Grammar::pattern("a.b", false)).unwrap();
        assert!(re.is_match("[a.b]"));
        assert!(!re.is_match("[axb]"));
    }
}
