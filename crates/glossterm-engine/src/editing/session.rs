use crate::models::{TermOption, TermSourceError};
use crate::shortcode::Span;

use super::{
    picker::{PickerOutcome, TermPicker},
    transform::{TransformError, load_transform, save_transform},
};

/// Identifies one term-list request. Only the latest one is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// One editor instance: editable content, selection and picker state.
///
/// Single-threaded and event driven. Each method is one UI event; nothing
/// here blocks, and the term fetch is split into a begin/complete pair so a
/// late response can be recognised and dropped.
#[derive(Debug, Default)]
pub struct EditorSession {
    content: String,
    selection: Option<Span>,
    in_progress: bool,
    pending: Option<FetchTicket>,
    issued: u64,
    picker: Option<TermPicker>,
    alert: Option<String>,
}

impl EditorSession {
    /// Starts a session from stored text, running the load transform.
    pub fn from_stored(stored: &str) -> Self {
        Self {
            content: load_transform(stored),
            ..Self::default()
        }
    }

    /// Stored form of the current content, via the save transform.
    pub fn to_stored(&self) -> Result<String, TransformError> {
        save_transform(&self.content)
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn selection(&self) -> Option<Span> {
        self.selection
    }

    /// Selects a byte range of the editable content.
    ///
    /// Returns false, leaving the selection alone, if the range falls
    /// outside the content or splits a character.
    pub fn select(&mut self, span: Span) -> bool {
        let valid = span.start <= span.end
            && span.end <= self.content.len()
            && self.content.is_char_boundary(span.start)
            && self.content.is_char_boundary(span.end);
        if valid {
            self.selection = Some(span);
        }
        valid
    }

    /// Selects the first occurrence of `needle` in the editable content.
    pub fn select_text(&mut self, needle: &str) -> bool {
        if needle.is_empty() {
            return false;
        }
        match self.content.find(needle) {
            Some(start) => self.select(Span::new(start, start + needle.len())),
            None => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Currently selected markup, or an empty string.
    pub fn selected_text(&self) -> &str {
        self.selection
            .and_then(|span| self.content.get(span.range()))
            .unwrap_or_default()
    }

    /// True while a term fetch is outstanding.
    pub fn in_progress(&self) -> bool {
        self.in_progress
    }

    /// Starts fetching the term list: shows progress and hands out a ticket
    /// that the response must present. A newer request supersedes older ones.
    pub fn begin_term_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        let ticket = FetchTicket(self.issued);
        self.pending = Some(ticket);
        self.in_progress = true;
        log::debug!("term fetch {} started", ticket.0);
        ticket
    }

    /// The user walked away from the pending request. Its response, if it
    /// ever arrives, is ignored.
    pub fn abandon_term_fetch(&mut self) {
        if let Some(ticket) = self.pending.take() {
            log::debug!("term fetch {} abandoned", ticket.0);
        }
        self.in_progress = false;
    }

    /// Delivers the response for `ticket`.
    ///
    /// A stale ticket is ignored and false is returned. Otherwise progress
    /// stops and either the picker opens or an alert is raised; content is
    /// never touched here.
    pub fn complete_term_fetch(
        &mut self,
        ticket: FetchTicket,
        terms: Result<Vec<TermOption>, TermSourceError>,
    ) -> bool {
        if self.pending != Some(ticket) {
            log::debug!("ignoring late response for term fetch {}", ticket.0);
            return false;
        }
        self.pending = None;
        self.in_progress = false;

        match TermPicker::open(terms) {
            Ok(picker) => self.picker = Some(picker),
            Err(e) => {
                log::warn!("term picker not opened: {e}");
                self.alert = Some(e.to_string());
            }
        }
        true
    }

    pub fn picker(&self) -> Option<&TermPicker> {
        self.picker.as_ref()
    }

    pub fn picker_mut(&mut self) -> Option<&mut TermPicker> {
        self.picker.as_mut()
    }

    /// Closes the picker with its chosen term. Returns true if content changed.
    pub fn confirm_picker(&mut self) -> bool {
        match self.picker.take() {
            Some(picker) => {
                let outcome = picker.confirm(self.selected_text());
                self.apply(outcome)
            }
            None => false,
        }
    }

    pub fn cancel_picker(&mut self) {
        self.picker = None;
    }

    /// The blocking alert to show, if any. Reading it dismisses it.
    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    /// Applies a picker outcome to the content. Returns true if it changed.
    pub fn apply(&mut self, outcome: PickerOutcome) -> bool {
        let PickerOutcome::Insert(term) = outcome else {
            return false;
        };
        let Some(span) = self.selection.filter(|s| !s.is_empty()) else {
            return false;
        };

        let markup = term.to_markup();
        self.content.replace_range(span.range(), &markup);
        self.selection = None;
        log::debug!("inserted glossary term {} at {}", term.id, span.start);
        true
    }
}
