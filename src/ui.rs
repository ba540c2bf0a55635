//! Ratatui front-end: the card grid, the add-book dialog overlay, and the
//! terminal event loop that drives them.

mod app;
mod forms;
mod helpers;
mod terminal;

pub use app::App;
pub use terminal::run_app;
