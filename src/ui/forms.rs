use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::dialog::{AddBookDialog, DialogField};

/// Render one text field of the add-book dialog.
pub(crate) fn build_field_line(dialog: &AddBookDialog, field: DialogField) -> Line<'static> {
    let value = dialog.value(field);
    let is_active = dialog.active() == field;

    let display = if value.is_empty() {
        "<required>".to_string()
    } else {
        value.to_string()
    };

    let style = if is_active {
        Style::default().fg(Color::Yellow)
    } else if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::raw(field_prefix(field)),
        Span::styled(display, style),
    ])
}

/// Render the "have read" checkbox.
pub(crate) fn build_checkbox_line(dialog: &AddBookDialog) -> Line<'static> {
    let mark = if dialog.is_read() { "[x]" } else { "[ ]" };
    let style = if dialog.active() == DialogField::Read {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::raw(field_prefix(DialogField::Read)),
        Span::styled(mark, style),
    ])
}

/// `Label: ` prefix shared by the line builders and cursor placement.
pub(crate) fn field_prefix(field: DialogField) -> String {
    format!("{}: ", field.label())
}
