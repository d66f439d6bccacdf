use super::token::ShortcodeToken;

/// How attribute values are written out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SerializeMode {
    /// `[tag id="3"]`: space separated, double-quoted values with any `"`
    /// stripped.
    #[default]
    Normal,
    /// `[tag,id=3]`: comma separated, unquoted, and restricted to
    /// `[A-Za-z0-9-_.]`. Safe to place inside an HTML attribute.
    AttributeSafe,
}

impl SerializeMode {
    fn separator(self) -> char {
        match self {
            SerializeMode::Normal => ' ',
            SerializeMode::AttributeSafe => ',',
        }
    }

    fn quote(self) -> &'static str {
        match self {
            SerializeMode::Normal => "\"",
            SerializeMode::AttributeSafe => "",
        }
    }

    /// Strips whatever would break the shortcode in this mode.
    fn clean(self, value: &str) -> String {
        match self {
            SerializeMode::Normal => value.replace('"', ""),
            SerializeMode::AttributeSafe => value
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
                .collect(),
        }
    }
}

/// Turns a token back into shortcode text. `original` and `span` are ignored.
///
/// Properties with an empty value are left out entirely.
pub fn serialize(token: &ShortcodeToken, mode: SerializeMode) -> String {
    debug_assert!(!token.name.is_empty(), "shortcode token without a name");

    let mut attrs = String::new();
    for (key, value) in &token.properties {
        if value.is_empty() {
            continue;
        }
        attrs.push(mode.separator());
        attrs.push_str(key);
        attrs.push('=');
        attrs.push_str(mode.quote());
        attrs.push_str(&mode.clean(value));
        attrs.push_str(mode.quote());
    }

    let name = &token.name;
    if token.wrapped {
        format!("[{name}{attrs}]{}[/{name}]", token.content_str())
    } else {
        format!("[{name}{attrs}]")
    }
}
