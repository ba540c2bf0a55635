//! Add-book dialog as a short-lived state machine.
//!
//! `AddBookDialog::open` produces a dialog in the open state with empty fields.
//! `confirm` and `cancel` consume it: a rejected confirm hands the same dialog
//! back still open, anything else closes it for good. The next add starts from
//! a fresh `open()`.

use thiserror::Error;

use crate::models::Book;

/// Fields available within the dialog, in focus order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum DialogField {
    #[default]
    Title,
    Author,
    Pages,
    Read,
}

impl DialogField {
    pub fn label(self) -> &'static str {
        match self {
            DialogField::Title => "Title",
            DialogField::Author => "Author",
            DialogField::Pages => "Pages",
            DialogField::Read => "Read",
        }
    }

    fn next(self) -> Self {
        match self {
            DialogField::Title => DialogField::Author,
            DialogField::Author => DialogField::Pages,
            DialogField::Pages => DialogField::Read,
            DialogField::Read => DialogField::Title,
        }
    }

    fn previous(self) -> Self {
        match self {
            DialogField::Title => DialogField::Read,
            DialogField::Author => DialogField::Title,
            DialogField::Pages => DialogField::Author,
            DialogField::Read => DialogField::Pages,
        }
    }
}

/// Why a confirm was rejected. Never shown to the user.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{} is required", .0.label())]
    Missing(DialogField),
}

/// How a closed dialog ended.
#[derive(Debug, PartialEq, Eq)]
pub enum DialogOutcome {
    Accepted(Book),
    Cancelled,
}

/// Result of a confirm or cancel action.
#[derive(Debug)]
pub enum DialogStep {
    Open(AddBookDialog),
    Closed(DialogOutcome),
}

/// Open add-book dialog and its form state.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AddBookDialog {
    title: String,
    author: String,
    pages: String,
    read: bool,
    active: DialogField,
}

impl AddBookDialog {
    /// Open a dialog with every field at its default.
    pub fn open() -> Self {
        Self::default()
    }

    pub fn active(&self) -> DialogField {
        self.active
    }

    pub fn focus(&mut self, field: DialogField) {
        self.active = field;
    }

    pub fn focus_next(&mut self) {
        self.active = self.active.next();
    }

    pub fn focus_previous(&mut self) {
        self.active = self.active.previous();
    }

    /// Current text of a field. The read checkbox has no text.
    pub fn value(&self, field: DialogField) -> &str {
        match field {
            DialogField::Title => &self.title,
            DialogField::Author => &self.author,
            DialogField::Pages => &self.pages,
            DialogField::Read => "",
        }
    }

    pub fn value_len(&self, field: DialogField) -> usize {
        self.value(field).chars().count()
    }

    pub fn is_read(&self) -> bool {
        self.read
    }

    pub fn set_read(&mut self, read: bool) {
        self.read = read;
    }

    pub fn toggle_read(&mut self) {
        self.read = !self.read;
    }

    /// Append a character to the focused text field. Returns whether the
    /// character was taken.
    pub fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            DialogField::Title => self.title.push(ch),
            DialogField::Author => self.author.push(ch),
            DialogField::Pages => self.pages.push(ch),
            DialogField::Read => return false,
        }
        true
    }

    /// Remove the last character from the focused text field.
    pub fn backspace(&mut self) {
        match self.active {
            DialogField::Title => {
                self.title.pop();
            }
            DialogField::Author => {
                self.author.pop();
            }
            DialogField::Pages => {
                self.pages.pop();
            }
            DialogField::Read => {}
        }
    }

    /// Fill a text field wholesale.
    pub fn set_value(&mut self, field: DialogField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DialogField::Title => self.title = value,
            DialogField::Author => self.author = value,
            DialogField::Pages => self.pages = value,
            DialogField::Read => {}
        }
    }

    /// Title, author, and pages must all be non-empty. Pages is not parsed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        [DialogField::Title, DialogField::Author, DialogField::Pages]
            .into_iter()
            .find(|field| self.value(*field).is_empty())
            .map_or(Ok(()), |field| Err(ValidationError::Missing(field)))
    }

    /// Accept the form if it validates, otherwise stay open unchanged.
    pub fn confirm(self) -> DialogStep {
        match self.validate() {
            Ok(()) => DialogStep::Closed(DialogOutcome::Accepted(Book::new(
                self.title,
                self.author,
                self.pages,
                self.read,
            ))),
            Err(err) => {
                tracing::debug!(%err, "add book rejected");
                DialogStep::Open(self)
            }
        }
    }

    /// Close without producing a book.
    pub fn cancel(self) -> DialogStep {
        DialogStep::Closed(DialogOutcome::Cancelled)
    }
}
