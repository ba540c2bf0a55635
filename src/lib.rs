//! Core library surface for the reading list TUI.
//!
//! The domain pieces (library store, card projection, add-book dialog) are
//! independent of the terminal so they can be driven directly from tests.
pub mod cards;
pub mod config;
pub mod dialog;
pub mod library;
pub mod models;
pub mod ui;

pub use cards::{render_cards, Card, RemoveControl};
pub use config::{init_logging, Config};
pub use dialog::{AddBookDialog, DialogField, DialogOutcome, DialogStep, ValidationError};
pub use library::{seed_library, Library};
pub use models::{Book, BookId};
pub use ui::{run_app, App};
