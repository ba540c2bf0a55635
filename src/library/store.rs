use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::models::{Book, BookId};

/// Ordered collection of books. Insertion order is display order.
///
/// Entries are keyed by a monotonically increasing [`BookId`], so iterating
/// the map yields books in the order they were added and removal by id does
/// not have to scan the list.
#[derive(Debug, Default)]
pub struct Library {
    entries: BTreeMap<BookId, Book>,
    next_id: u64,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a book to the end of the list and return its identity.
    pub fn add(&mut self, book: Book) -> BookId {
        let id = BookId(self.next_id);
        self.next_id += 1;
        info!(%id, %book, "added book");
        self.entries.insert(id, book);
        id
    }

    /// Remove the book currently at `index`. Out of range indices leave the
    /// library untouched.
    pub fn remove_at(&mut self, index: usize) -> Option<Book> {
        let Some(id) = self.entries.keys().nth(index).copied() else {
            debug!(index, len = self.len(), "ignored removal of missing index");
            return None;
        };
        self.remove(id)
    }

    /// Remove a book by identity. Unknown ids are a no-op.
    pub fn remove(&mut self, id: BookId) -> Option<Book> {
        let removed = self.entries.remove(&id);
        match &removed {
            Some(book) => info!(%id, %book, "removed book"),
            None => debug!(%id, "ignored removal of unknown book"),
        }
        removed
    }

    /// Mark a book as read. Returns `false` when the id is unknown.
    pub fn mark_read(&mut self, id: BookId) -> bool {
        match self.entries.get_mut(&id) {
            Some(book) => {
                book.mark_as_read();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.entries.get(&id)
    }

    /// Read-only view of the books in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (BookId, &Book)> + '_ {
        self.entries.iter().map(|(id, book)| (*id, book))
    }

    /// Books in insertion order.
    pub fn list(&self) -> Vec<&Book> {
        self.entries.values().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
