//! Domain models shared by the library store, the card renderer, and the
//! add-book dialog. These stay plain data holders; ownership of every `Book`
//! lives with the `Library` once it has been added.

use std::fmt;

/// Opaque identity handed out by the `Library` when a book is added. Ids only
/// ever increase within one library, so ordering by id is insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BookId(pub(crate) u64);

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single tracked book.
///
/// Title, author, and page count are fixed at construction. The read flag can
/// only move from unread to read through [`Book::mark_as_read`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    title: String,
    author: String,
    /// Page count exactly as entered. The dialog only checks that it is
    /// non-empty, so this is kept as text rather than parsed.
    pages: String,
    read: bool,
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        pages: impl Into<String>,
        read: bool,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            pages: pages.into(),
            read,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn pages(&self) -> &str {
        &self.pages
    }

    pub fn is_read(&self) -> bool {
        self.read
    }

    /// Flag the book as read. No inverse is exposed.
    pub fn mark_as_read(&mut self) {
        self.read = true;
    }

    /// `Pages: N` line shown on every card.
    pub fn pages_line(&self) -> String {
        format!("Pages: {}", self.pages)
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.title, self.author)
    }
}
