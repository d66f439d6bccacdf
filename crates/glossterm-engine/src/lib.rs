pub mod editing;
pub mod io;
pub mod models;
pub mod render;
pub mod shortcode;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::{
    EditorSession, FetchTicket, InlineElement, PickerError, PickerOutcome, TermPicker,
    TransformError, load_transform, save_transform,
};
pub use io::IoError;
pub use models::*;
pub use render::{render_shortcodes, render_term};
pub use shortcode::{
    GLOSSARY_TAG, Properties, SerializeMode, ShortcodeMatcher, ShortcodeToken, Span,
    match_shortcode, parse_properties, sanitize_properties, serialize,
};
