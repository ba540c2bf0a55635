//! Projection of the library into display cards.
//!
//! Cards are rebuilt from scratch after every mutation. The positional index on
//! a card is only meaningful until the next rebuild; removal goes through the
//! `BookId` carried alongside it.

use crate::library::Library;
use crate::models::BookId;

/// The removal control attached to each card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveControl {
    /// Position of the card at render time.
    pub index: usize,
    /// Stable identity of the book the control removes.
    pub id: BookId,
}

impl RemoveControl {
    pub fn label(&self) -> String {
        format!("[ Remove #{} ]", self.index)
    }
}

/// One rendered display unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub author: String,
    pub pages_line: String,
    /// Read indicator. Cards never edit it.
    pub read: bool,
    pub remove: RemoveControl,
}

impl Card {
    pub fn read_line(&self) -> &'static str {
        if self.read {
            "[x] Read"
        } else {
            "[ ] Read"
        }
    }
}

/// Build one card per book, in library order.
pub fn render_cards(library: &Library) -> Vec<Card> {
    library
        .entries()
        .enumerate()
        .map(|(index, (id, book))| Card {
            title: book.title().to_string(),
            author: book.author().to_string(),
            pages_line: book.pages_line(),
            read: book.is_read(),
            remove: RemoveControl { index, id },
        })
        .collect()
}
