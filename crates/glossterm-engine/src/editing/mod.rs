/*!
 * # Editing
 *
 * The editor-facing half of the shortcode round-trip.
 *
 * Content is stored as text with `[glossary_term id="3"]public cloud[/glossary_term]`
 * shortcodes, and edited as HTML where each mention is an inline
 * `<span data-shortcode="glossary_term" data-id="3">public cloud</span>`.
 *
 * ## Module Structure
 *
 * - **`transform`**: `load_transform` (stored → editable) and `save_transform`
 *   (editable → stored), both pure functions
 * - **`inline`**: `InlineElement`, the editable span's names and markup
 * - **`dom`**: html5ever parsing and splice-serialization used on save
 * - **`picker`**: `TermPicker`, the single-selection term dialog
 * - **`session`**: `EditorSession`, one editor instance wiring the above to
 *   UI events (load, select, fetch terms, confirm, save)
 *
 * ## Contract
 *
 * For stored text with well-formed glossary shortcodes,
 * `save_transform(load_transform(s)) == s`, and loading the saved text again
 * reproduces the same editable structure.
 */

pub mod dom;
pub mod inline;
pub mod picker;
pub mod session;
pub mod transform;

pub use inline::InlineElement;
pub use picker::{PickerError, PickerOutcome, TermPicker};
pub use session::{EditorSession, FetchTicket};
pub use transform::{TransformError, load_transform, save_transform};
