//! # Shortcodes
//!
//! Bracket-delimited inline tokens such as
//! `[glossary_term id="3"]public cloud[/glossary_term]`, used as the storage
//! form of rich inline content.
//!
//! ## Modules
//!
//! - **`grammar`**: the tag syntax as regex fragments, in one place
//! - **`matcher`**: finds the next occurrence and parses its attributes
//! - **`serializer`**: writes a token back out, in normal or attribute-safe mode
//! - **`sanitize`**: HTML-escapes attribute values lifted out of markup
//! - **`token`** / **`span`**: the parsed token and its position
//!
//! ## Round-trip
//!
//! For any token with an alphanumeric `id` and content that doesn't contain
//! its own closing tag, matching the normal-mode serialization gives back the
//! same content and `id`.

pub mod grammar;
pub mod matcher;
pub mod sanitize;
pub mod serializer;
pub mod span;
pub mod token;

pub use matcher::{ShortcodeMatcher, match_shortcode, parse_properties};
pub use sanitize::{sanitize_properties, sanitize_value};
pub use serializer::{SerializeMode, serialize};
pub use span::Span;
pub use token::{Properties, ShortcodeToken};

/// Tag name of glossary shortcodes.
pub const GLOSSARY_TAG: &str = "glossary_term";
