use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::cards::Card;

/// Center `text` in a field `width` columns wide, truncating when it does not
/// fit.
pub(crate) fn centered_line(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let mut content: String = text.chars().take(width).collect();
    let padding = width.saturating_sub(content.chars().count());
    let left = padding / 2;
    content.insert_str(0, &" ".repeat(left));
    content.push_str(&" ".repeat(padding - left));
    content
}

/// Build the text shown inside a card: author, page count, read indicator,
/// then the removal control pinned to the bottom row.
pub(crate) fn build_card_lines(
    card: &Card,
    inner_width: u16,
    inner_height: u16,
    selected: bool,
) -> Vec<Line<'static>> {
    let width = inner_width as usize;
    let height = inner_height as usize;
    if width == 0 || height == 0 {
        return vec![Line::from("")];
    }

    let read_style = if card.read {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut lines = vec![
        Line::from(card.author.clone()),
        Line::from(card.pages_line.clone()),
        Line::from(Span::styled(card.read_line(), read_style)),
    ];
    lines.truncate(height.saturating_sub(1));

    while lines.len() + 1 < height {
        lines.push(Line::from(""));
    }

    let remove_style = if selected {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    lines.push(Line::from(Span::styled(
        centered_line(&card.remove.label(), width),
        remove_style,
    )));

    lines
}

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}
