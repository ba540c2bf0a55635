use std::mem;

use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use tracing::debug;

use crate::cards::{render_cards, Card, RemoveControl};
use crate::config::MAX_COLUMNS;
use crate::dialog::{AddBookDialog, DialogField, DialogOutcome, DialogStep};
use crate::library::Library;
use crate::models::Book;

use super::forms::{build_checkbox_line, build_field_line, field_prefix};
use super::helpers::{build_card_lines, centered_rect};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Text fields in the order they are drawn inside the dialog.
const TEXT_FIELDS: [DialogField; 3] = [DialogField::Title, DialogField::Author, DialogField::Pages];

/// What the keyboard is currently driving.
enum Mode {
    Normal,
    AddingBook(AddBookDialog),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Owns the library and wires dialog and removal events to it. Every mutation
/// is followed by a full rebuild of `cards`.
pub struct App {
    library: Library,
    cards: Vec<Card>,
    selected: usize,
    columns: usize,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(library: Library, columns: usize) -> Self {
        let mut app = Self {
            library,
            cards: Vec::new(),
            selected: 0,
            columns: columns.clamp(1, MAX_COLUMNS),
            mode: Mode::Normal,
            status: None,
        };
        app.refresh();
        app
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Cards from the most recent render.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn dialog(&self) -> Option<&AddBookDialog> {
        match &self.mode {
            Mode::AddingBook(dialog) => Some(dialog),
            Mode::Normal => None,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Feed one key press through the current mode. Returns `true` when the
    /// user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit),
            Mode::AddingBook(dialog) => self.handle_add_book(code, dialog),
        };

        exit
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
            }
            KeyCode::Left => self.move_horizontal(-1),
            KeyCode::Right => self.move_horizontal(1),
            KeyCode::Up => self.move_vertical(-1),
            KeyCode::Down => self.move_vertical(1),
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('+') => {
                self.clear_status();
                return Mode::AddingBook(AddBookDialog::open());
            }
            KeyCode::Char('-') | KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => {
                match self.cards.get(self.selected).map(|card| card.remove) {
                    Some(control) => self.activate_remove(control),
                    None => self.set_status("No book selected to remove.", StatusKind::Error),
                }
            }
            _ => {}
        }
        Mode::Normal
    }

    fn handle_add_book(&mut self, code: KeyCode, mut dialog: AddBookDialog) -> Mode {
        let step = match code {
            KeyCode::Esc => dialog.cancel(),
            KeyCode::Enter => dialog.confirm(),
            KeyCode::Tab | KeyCode::Down => {
                dialog.focus_next();
                DialogStep::Open(dialog)
            }
            KeyCode::BackTab | KeyCode::Up => {
                dialog.focus_previous();
                DialogStep::Open(dialog)
            }
            KeyCode::Backspace => {
                dialog.backspace();
                DialogStep::Open(dialog)
            }
            KeyCode::Char(' ') if dialog.active() == DialogField::Read => {
                dialog.toggle_read();
                DialogStep::Open(dialog)
            }
            KeyCode::Char(ch) => {
                dialog.push_char(ch);
                DialogStep::Open(dialog)
            }
            _ => DialogStep::Open(dialog),
        };

        match step {
            DialogStep::Open(dialog) => Mode::AddingBook(dialog),
            DialogStep::Closed(DialogOutcome::Accepted(book)) => {
                self.accept_book(book);
                Mode::Normal
            }
            DialogStep::Closed(DialogOutcome::Cancelled) => {
                debug!("add book cancelled");
                self.set_status("Add book cancelled.", StatusKind::Info);
                Mode::Normal
            }
        }
    }

    fn accept_book(&mut self, book: Book) {
        let message = format!("Added \"{}\".", book.title());
        self.library.add(book);
        self.refresh();
        self.selected = self.cards.len().saturating_sub(1);
        self.set_status(message, StatusKind::Info);
    }

    /// Act on a card's removal control, then re-render.
    fn activate_remove(&mut self, control: RemoveControl) {
        debug!(index = control.index, id = %control.id, "remove control activated");
        if let Some(book) = self.library.remove(control.id) {
            self.set_status(format!("Removed \"{}\".", book.title()), StatusKind::Info);
        }
        self.refresh();
    }

    /// Throw away the previous cards and rebuild them from the library.
    fn refresh(&mut self) {
        self.cards = render_cards(&self.library);
        if self.selected >= self.cards.len() {
            self.selected = self.cards.len().saturating_sub(1);
        }
        debug!(cards = self.cards.len(), "rendered cards");
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        if area.height > FOOTER_HEIGHT {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(FOOTER_HEIGHT)])
                .split(area);
            self.draw_card_grid(frame, chunks[0]);
            self.draw_footer(frame, chunks[1]);
        } else {
            // Too short for a footer.
            self.draw_card_grid(frame, area);
        }

        if let Mode::AddingBook(dialog) = &self.mode {
            self.draw_add_book_dialog(frame, area, dialog);
        }
    }

    fn draw_card_grid(&self, frame: &mut Frame, area: Rect) {
        if self.cards.is_empty() {
            let message = Paragraph::new("No books yet. Press 'a' to add one.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::NONE));
            frame.render_widget(message, area);
            return;
        }

        let rows = self.split_rows(area);
        for (row_idx, row_chunk) in rows.into_iter().enumerate() {
            let columns = self.split_columns(row_chunk);
            for (col_idx, column_chunk) in columns.into_iter().enumerate() {
                let card_index = row_idx * self.columns + col_idx;
                let Some(card) = self.cards.get(card_index) else {
                    continue;
                };
                let selected = card_index == self.selected;
                let mut block = Block::default()
                    .borders(Borders::ALL)
                    .title(card.title.clone());
                if selected {
                    block = block.style(Style::default().fg(Color::Yellow));
                }
                let inner_width = column_chunk.width.saturating_sub(2);
                let inner_height = column_chunk.height.saturating_sub(2);
                let lines = build_card_lines(card, inner_width, inner_height, selected);
                let widget = Paragraph::new(lines)
                    .alignment(Alignment::Left)
                    .block(block);
                frame.render_widget(widget, column_chunk);
            }
        }
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match &self.mode {
            Mode::AddingBook(_) => Line::from(vec![
                Span::styled("[Tab]", key_style),
                Span::raw(" Next Field   "),
                Span::styled("[Space]", key_style),
                Span::raw(" Toggle Read   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Confirm   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            Mode::Normal => Line::from(vec![
                Span::styled("[←↑↓→]", key_style),
                Span::raw(" Select   "),
                Span::styled("[a]", key_style),
                Span::raw(" Add Book   "),
                Span::styled("[-]", key_style),
                Span::raw(" Remove   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
        }
    }

    fn draw_add_book_dialog(&self, frame: &mut Frame, area: Rect, dialog: &AddBookDialog) {
        let popup_area = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add Book").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = TEXT_FIELDS
            .iter()
            .map(|field| build_field_line(dialog, *field))
            .collect();
        lines.push(build_checkbox_line(dialog));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Enter to confirm • Tab to switch • Esc to cancel",
            Style::default().fg(Color::Gray),
        )));

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let active = dialog.active();
        let row = match active {
            DialogField::Title => 0,
            DialogField::Author => 1,
            DialogField::Pages => 2,
            DialogField::Read => 3,
        };
        let offset = match active {
            DialogField::Read => 1,
            field => u16::try_from(dialog.value_len(field)).unwrap_or(u16::MAX),
        };
        let prefix = u16::try_from(field_prefix(active).len()).unwrap_or(u16::MAX);
        let right_edge = inner.x + inner.width.saturating_sub(1);
        let cursor_x = inner.x.saturating_add(prefix).saturating_add(offset).min(right_edge);
        let cursor_y = (inner.y + row).min(inner.y + inner.height.saturating_sub(1));
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    fn split_rows(&self, area: Rect) -> Vec<Rect> {
        let row_count = self.row_count().max(1) as u16;
        let percent = (100 / row_count).max(1);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Percentage(percent); row_count as usize])
            .split(area);
        chunks.iter().cloned().collect()
    }

    fn split_columns(&self, area: Rect) -> Vec<Rect> {
        let columns = u16::try_from(self.columns).unwrap_or(u16::MAX).max(1);
        let percent = (100 / columns).max(1);
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Percentage(percent); columns as usize])
            .split(area);
        chunks.iter().cloned().collect()
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    fn row_count(&self) -> usize {
        self.cards.len().div_ceil(self.columns)
    }

    fn move_horizontal(&mut self, offset: isize) {
        self.move_selection(offset);
    }

    fn move_vertical(&mut self, offset: isize) {
        self.move_selection(offset * self.columns as isize);
    }

    fn move_selection(&mut self, offset: isize) {
        let new_index = self.selected as isize + offset;
        if (0..self.cards.len() as isize).contains(&new_index) {
            self.selected = new_index as usize;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::library::seed_library;
    use clap::Parser;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn seeded_app() -> App {
        App::new(seed_library(), 3)
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(KeyCode::Char(ch));
        }
    }

    fn status_text(app: &App) -> Option<&str> {
        app.status.as_ref().map(|status| status.text.as_str())
    }

    fn titles(app: &App) -> Vec<&str> {
        app.cards().iter().map(|card| card.title.as_str()).collect()
    }

    fn screen_text(app: &App, width: u16, height: u16) -> String {
        let terminal = draw_to_backend(app, width, height);
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn draw_to_backend(app: &App, width: u16, height: u16) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        terminal
    }

    #[test]
    fn startup_renders_seed_books() {
        let app = seeded_app();
        assert_eq!(titles(&app), ["The Hobbit", "Dune", "50 Shades of Gray"]);
    }

    #[test]
    fn removing_dune_reindexes_the_rest() {
        let mut app = seeded_app();
        app.handle_key(KeyCode::Right);
        assert_eq!(app.selected(), 1);
        assert!(!app.handle_key(KeyCode::Char('-')));

        assert_eq!(titles(&app), ["The Hobbit", "50 Shades of Gray"]);
        let indices: Vec<_> = app.cards().iter().map(|c| c.remove.index).collect();
        assert_eq!(indices, [0, 1]);
        assert_eq!(app.library().len(), 2);
    }

    #[test]
    fn removing_the_last_card_keeps_selection_in_range() {
        let mut app = seeded_app();
        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Delete);
        assert_eq!(app.selected(), 1);
        app.handle_key(KeyCode::Char('d'));
        app.handle_key(KeyCode::Char('d'));
        assert!(app.cards().is_empty());
        app.handle_key(KeyCode::Char('d'));
        assert!(app.library().is_empty());
    }

    #[test]
    fn adding_a_book_through_the_dialog() {
        let mut app = seeded_app();
        app.handle_key(KeyCode::Char('a'));
        assert!(app.dialog().is_some());

        type_text(&mut app, "Foo");
        app.handle_key(KeyCode::Tab);
        type_text(&mut app, "Bar");
        app.handle_key(KeyCode::Tab);
        type_text(&mut app, "10");
        app.handle_key(KeyCode::Enter);

        assert!(app.dialog().is_none());
        assert_eq!(app.library().len(), 4);
        let last = app.library().list()[3];
        assert_eq!(last, &Book::new("Foo", "Bar", "10", false));
        assert_eq!(app.cards().len(), 4);
        assert_eq!(app.selected(), 3);
    }

    #[test]
    fn read_checkbox_toggles_with_space() {
        let mut app = App::new(Library::new(), 3);
        app.handle_key(KeyCode::Char('+'));
        type_text(&mut app, "A B");
        app.handle_key(KeyCode::Down);
        type_text(&mut app, "C");
        app.handle_key(KeyCode::Down);
        type_text(&mut app, "1");
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Char(' '));
        app.handle_key(KeyCode::Enter);

        let book = app.library().list()[0];
        assert_eq!(book.title(), "A B");
        assert!(book.is_read());
    }

    #[test]
    fn incomplete_dialog_stays_open_without_adding() {
        let mut app = seeded_app();
        app.handle_key(KeyCode::Char('a'));
        type_text(&mut app, "Foo");
        app.handle_key(KeyCode::Enter);

        let dialog = app.dialog().expect("dialog should still be open");
        assert_eq!(dialog.value(DialogField::Title), "Foo");
        assert_eq!(app.library().len(), 3);
        assert!(app.status.is_none());
    }

    #[test]
    fn cancel_leaves_the_library_alone() {
        let mut app = seeded_app();
        let before = app.cards().to_vec();
        app.handle_key(KeyCode::Char('a'));
        type_text(&mut app, "Foo");
        app.handle_key(KeyCode::Tab);
        type_text(&mut app, "Bar");
        app.handle_key(KeyCode::Tab);
        type_text(&mut app, "10");
        assert!(!app.handle_key(KeyCode::Esc));

        assert!(app.dialog().is_none());
        assert_eq!(app.cards(), &before[..]);

        app.handle_key(KeyCode::Char('a'));
        let reopened = app.dialog().unwrap();
        assert_eq!(reopened.value(DialogField::Title), "");
        assert!(!reopened.is_read());
    }

    #[test]
    fn quit_keys_only_work_outside_the_dialog() {
        let mut app = seeded_app();
        app.handle_key(KeyCode::Char('a'));
        assert!(!app.handle_key(KeyCode::Char('q')));
        assert_eq!(app.dialog().unwrap().value(DialogField::Title), "q");
        app.handle_key(KeyCode::Esc);
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn draws_cards_and_footer() {
        let app = seeded_app();
        let text = screen_text(&app, 90, 24);
        assert!(text.contains("The Hobbit"));
        assert!(text.contains("50 Shades of Gray"));
        assert!(text.contains("Pages: 317"));
        assert!(text.contains("[ Remove #2 ]"));
        assert!(text.contains("Add Book"));
    }

    #[test]
    fn draws_the_dialog_over_the_grid() {
        let mut app = seeded_app();
        app.handle_key(KeyCode::Char('a'));
        let text = screen_text(&app, 90, 24);
        assert!(text.contains("Title: <required>"));
        assert!(text.contains("Read: [ ]"));
    }

    #[test]
    fn empty_library_shows_hint() {
        let app = App::new(Library::new(), 3);
        let text = screen_text(&app, 60, 10);
        assert!(text.contains("No books yet."));
    }

    #[test]
    fn widest_parsed_grid_draws() {
        let config = Config::try_parse_from(["reading-list", "--columns", "12"]).unwrap();
        let app = App::new(seed_library(), config.columns);
        assert!(screen_text(&app, 240, 24).contains("Pages: 295"));

        let oversized = App::new(seed_library(), usize::MAX);
        assert_eq!(oversized.columns, MAX_COLUMNS);
        screen_text(&oversized, 90, 24);
    }

    #[test]
    fn long_title_keeps_the_cursor_inside_the_dialog() {
        let mut app = seeded_app();
        let mut dialog = AddBookDialog::open();
        dialog.set_value(DialogField::Title, "x".repeat(70_000));
        app.mode = Mode::AddingBook(dialog);

        let mut terminal = draw_to_backend(&app, 90, 24);
        let cursor = terminal.get_cursor_position().unwrap();
        let popup = centered_rect(60, 50, Rect::new(0, 0, 90, 24));
        assert!(cursor.x < popup.x + popup.width);
        assert!(cursor.y < popup.y + popup.height);
    }

    #[test]
    fn short_screens_skip_the_footer() {
        let app = seeded_app();
        let text = screen_text(&app, 90, 3);
        assert!(!text.contains("[q]"));
        assert!(screen_text(&app, 90, 24).contains("[q]"));
    }

    #[test]
    fn status_line_reports_each_action() {
        let mut app = seeded_app();
        app.handle_key(KeyCode::Char('-'));
        assert_eq!(status_text(&app), Some("Removed \"The Hobbit\"."));

        app.handle_key(KeyCode::Char('a'));
        assert_eq!(status_text(&app), None);
        app.handle_key(KeyCode::Esc);
        assert_eq!(status_text(&app), Some("Add book cancelled."));

        app.handle_key(KeyCode::Char('a'));
        type_text(&mut app, "Foo");
        app.handle_key(KeyCode::Tab);
        type_text(&mut app, "Bar");
        app.handle_key(KeyCode::Tab);
        type_text(&mut app, "10");
        app.handle_key(KeyCode::Enter);
        assert_eq!(status_text(&app), Some("Added \"Foo\"."));
    }

    #[test]
    fn removing_from_an_empty_grid_reports_an_error() {
        let mut app = App::new(Library::new(), 3);
        app.handle_key(KeyCode::Char('d'));
        assert_eq!(status_text(&app), Some("No book selected to remove."));
        assert!(matches!(
            app.status.as_ref().map(|status| &status.kind),
            Some(StatusKind::Error)
        ));
    }
}
