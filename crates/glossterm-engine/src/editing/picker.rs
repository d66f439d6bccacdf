use crate::models::{GlossaryTermRef, TermOption, TermSourceError};

#[derive(Debug, thiserror::Error)]
pub enum PickerError {
    #[error("{0}")]
    Fetch(#[from] TermSourceError),
}

/// What confirming or cancelling the picker asks the editor to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerOutcome {
    /// Wrap the current selection in an inline mention of this term.
    Insert(GlossaryTermRef),
    /// Leave the content as it is.
    Unchanged,
}

/// Single-selection list of glossary terms.
///
/// Only opens on a successful fetch, so it never shows a broken list.
#[derive(Debug, Clone)]
pub struct TermPicker {
    options: Vec<TermOption>,
    selected: Option<usize>,
}

impl TermPicker {
    /// Opens with the first term selected.
    pub fn open(terms: Result<Vec<TermOption>, TermSourceError>) -> Result<Self, PickerError> {
        let options = terms?;
        let selected = (!options.is_empty()).then_some(0);
        Ok(Self { options, selected })
    }

    pub fn options(&self) -> &[TermOption] {
        &self.options
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&TermOption> {
        self.selected.and_then(|i| self.options.get(i))
    }

    pub fn next(&mut self) {
        if self.options.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1) % self.options.len(),
            None => 0,
        });
    }

    pub fn previous(&mut self) {
        if self.options.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(0) | None => self.options.len() - 1,
            Some(i) => i - 1,
        });
    }

    /// Selects the option whose value is `value`. Returns false if absent.
    pub fn select_value(&mut self, value: &str) -> bool {
        match self.options.iter().position(|o| o.value == value) {
            Some(i) => {
                self.selected = Some(i);
                true
            }
            None => false,
        }
    }

    /// Confirms the chosen term against the editor's current selection.
    ///
    /// An empty selection, or no chosen term, changes nothing.
    pub fn confirm(&self, selection: &str) -> PickerOutcome {
        match self.selected() {
            Some(option) if !selection.is_empty() => {
                PickerOutcome::Insert(GlossaryTermRef::new(&option.value, selection))
            }
            _ => PickerOutcome::Unchanged,
        }
    }

    pub fn cancel(self) -> PickerOutcome {
        PickerOutcome::Unchanged
    }
}
