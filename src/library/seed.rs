use crate::models::Book;

use super::Library;

/// Books every fresh session starts with: title, author, pages, read.
pub const SEED_BOOKS: [(&str, &str, &str, bool); 3] = [
    ("The Hobbit", "J.R.R. Tolkien", "295", true),
    ("Dune", "Some Genius", "317", true),
    ("50 Shades of Gray", "Some Idiot", "69", false),
];

/// Build a library holding the seed books in their fixed order.
pub fn seed_library() -> Library {
    let mut library = Library::new();
    for (title, author, pages, read) in SEED_BOOKS {
        library.add(Book::new(title, author, pages, read));
    }
    library
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_three_books_in_order() {
        let library = seed_library();
        let titles: Vec<_> = library.list().iter().map(|b| b.title()).collect();
        assert_eq!(titles, ["The Hobbit", "Dune", "50 Shades of Gray"]);
        let last = library.list()[2];
        assert_eq!(last.author(), "Some Idiot");
        assert_eq!(last.pages(), "69");
        assert!(!last.is_read());
    }
}
