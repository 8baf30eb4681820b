// 🗂️ Application State
// All interaction state lives here and every action goes through a handler,
// so the front-end only renders and forwards keys.

use crate::mask::DateField;
use crate::store::{RecordStore, StoreError};
use crate::validation::validate_record;
use log::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Name,
    BirthDate,
    PaymentDate,
    Paid,
    Table,
}

impl Focus {
    pub fn next(&self) -> Self {
        match self {
            Focus::Name => Focus::BirthDate,
            Focus::BirthDate => Focus::PaymentDate,
            Focus::PaymentDate => Focus::Paid,
            Focus::Paid => Focus::Table,
            Focus::Table => Focus::Name,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Focus::Name => Focus::Table,
            Focus::BirthDate => Focus::Name,
            Focus::PaymentDate => Focus::BirthDate,
            Focus::Paid => Focus::PaymentDate,
            Focus::Table => Focus::Paid,
        }
    }

    pub fn is_form_field(&self) -> bool {
        *self != Focus::Table
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub name: String,
    pub birth_date: DateField,
    pub payment_date: DateField,
    pub paid: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A message the user has to acknowledge (the dialog box of a desktop form).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Info,
            title: "Success".to_string(),
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Warning,
            title: "Validation".to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Error,
            title: "Error".to_string(),
            message: message.into(),
        }
    }
}

pub struct AppState {
    pub form: FormState,
    pub focus: Focus,
    pub selected: Option<usize>,
    /// Index whose record is loaded in the form; submit updates it instead of adding.
    pub editing: Option<usize>,
    pub pending_delete: Option<usize>,
    pub notice: Option<Notice>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            form: FormState::default(),
            focus: Focus::Name,
            selected: None,
            editing: None,
            pending_delete: None,
            notice: None,
        }
    }

    /// Initial state for a store that was just opened; a load error becomes
    /// the first notice the user sees.
    pub fn with_load_error(load_error: Option<StoreError>) -> Self {
        let mut state = Self::new();
        if let Some(err) = load_error {
            state.notice = Some(Notice::error(err.to_string()));
        }
        state
    }

    pub fn submit_label(&self) -> &'static str {
        if self.editing.is_some() {
            "Save changes"
        } else {
            "Add"
        }
    }

    /// Edit and delete are only offered while a valid row is selected.
    pub fn selection_actions_enabled(&self, store: &RecordStore) -> bool {
        matches!(self.selected, Some(i) if i < store.len())
    }

    // ========================================================================
    // SELECTION
    // ========================================================================

    pub fn select(&mut self, index: Option<usize>, store: &RecordStore) {
        self.selected = index.filter(|i| *i < store.len());
    }

    pub fn select_next(&mut self, store: &RecordStore) {
        let len = store.len();
        if len == 0 {
            return;
        }
        let i = match self.selected {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.selected = Some(i);
    }

    pub fn select_previous(&mut self, store: &RecordStore) {
        let len = store.len();
        if len == 0 {
            return;
        }
        let i = match self.selected {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => len - 1,
        };
        self.selected = Some(i);
    }

    // ========================================================================
    // FORM INPUT
    // ========================================================================

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    pub fn type_char(&mut self, ch: char) {
        match self.focus {
            Focus::Name => self.form.name.push(ch),
            Focus::BirthDate => self.form.birth_date.insert_char(ch),
            Focus::PaymentDate => self.form.payment_date.insert_char(ch),
            Focus::Paid => {
                if ch == ' ' {
                    self.toggle_paid();
                }
            }
            Focus::Table => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            Focus::Name => {
                self.form.name.pop();
            }
            Focus::BirthDate => self.form.birth_date.backspace(),
            Focus::PaymentDate => self.form.payment_date.backspace(),
            Focus::Paid | Focus::Table => {}
        }
    }

    pub fn toggle_paid(&mut self) {
        self.form.paid = !self.form.paid;
    }

    pub fn clear_form(&mut self) {
        self.form.name.clear();
        self.form.birth_date.clear();
        self.form.payment_date.clear();
        self.form.paid = false;
        self.editing = None;
        self.selected = None;
    }

    // ========================================================================
    // ACTIONS
    // ========================================================================

    /// Add a new record, or save the one being edited.
    pub fn submit(&mut self, store: &mut RecordStore) {
        let record = match validate_record(
            &self.form.name,
            self.form.birth_date.text(),
            self.form.payment_date.text(),
            self.form.paid,
        ) {
            Ok(record) => record,
            Err(err) => {
                self.notice = Some(Notice::warning(err.to_string()));
                return;
            }
        };

        let (result, success) = match self.editing {
            Some(index) => (store.update(index, record), "Record updated successfully!"),
            None => (store.add(record), "Collaborator registered successfully!"),
        };

        match result {
            Ok(()) => self.notice = Some(Notice::info(success)),
            Err(err @ StoreError::OutOfRange { .. }) => {
                self.notice = Some(Notice::error(err.to_string()));
                return;
            }
            Err(err) => {
                warn!("event=submit_unsaved error=\"{}\"", err);
                self.notice = Some(Notice::error(err.to_string()));
            }
        }

        self.clear_form();
    }

    /// Copy the selected record into the form and switch to edit mode.
    pub fn edit_selected(&mut self, store: &RecordStore) {
        let Some(index) = self.selected else {
            return;
        };
        let Some(record) = store.get(index) else {
            return;
        };

        self.form.name = record.name.clone();
        self.form.birth_date.set_text(&record.birth_date);
        self.form.payment_date.set_text(&record.payment_date);
        self.form.paid = record.paid;
        self.editing = Some(index);
        self.focus = Focus::Name;
        info!("event=edit_started index={}", index);
    }

    pub fn request_delete(&mut self, store: &RecordStore) {
        if self.selection_actions_enabled(store) {
            self.pending_delete = self.selected;
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn confirm_delete(&mut self, store: &mut RecordStore) {
        let Some(index) = self.pending_delete.take() else {
            return;
        };

        if let Err(err) = store.delete(index) {
            self.notice = Some(Notice::error(err.to_string()));
        }
        self.clear_form();
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}
