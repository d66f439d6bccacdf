use std::borrow::Cow;

use super::token::Properties;

/// Escapes a single value the way a browser does when it round-trips text
/// through `textContent` and `innerHTML`: `&`, `<` and `>` become entities.
pub fn sanitize_value(value: &str) -> Cow<'_, str> {
    html_escape::encode_text(value)
}

/// HTML-escapes every value. Keys are left alone.
///
/// Applied to attribute values lifted out of editable markup before they are
/// written back into shortcode syntax.
pub fn sanitize_properties(properties: Properties) -> Properties {
    properties
        .into_iter()
        .map(|(key, value)| {
            let escaped = sanitize_value(&value).into_owned();
            (key, escaped)
        })
        .collect()
}
