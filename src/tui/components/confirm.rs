//! # Confirm Dialog
//!
//! Modal "are you sure?" overlay shown before a delete. While it is open it
//! takes every key: `y`/Enter confirms, `n`/Esc declines.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::core::state::PendingDelete;
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;

/// Maps a key to the user's answer, `None` for keys that answer nothing.
pub fn answer(event: &TuiEvent) -> Option<bool> {
    match event {
        TuiEvent::InputChar('y' | 'Y') | TuiEvent::Submit => Some(true),
        TuiEvent::InputChar('n' | 'N') | TuiEvent::Escape => Some(false),
        _ => None,
    }
}

pub struct ConfirmDialog<'a> {
    pub pending: &'a PendingDelete,
}

impl Component for ConfirmDialog<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(60, 30, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Delete book ")
            .title_bottom(Line::from(" y Delete  n Cancel ").centered())
            .padding(Padding::horizontal(1));

        let lines = vec![
            Line::from("Are you sure you want to delete this book?"),
            Line::from(""),
            Line::from(Span::styled(
                format!("{} \u{2013} {}", self.pending.book.title, self.pending.book.author),
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ];

        let body = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(body, overlay);
    }
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answers() {
        assert_eq!(answer(&TuiEvent::InputChar('y')), Some(true));
        assert_eq!(answer(&TuiEvent::Submit), Some(true));
        assert_eq!(answer(&TuiEvent::InputChar('n')), Some(false));
        assert_eq!(answer(&TuiEvent::Escape), Some(false));
        assert_eq!(answer(&TuiEvent::InputChar('d')), None);
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 40);
        let inner = centered_rect(60, 30, outer);
        assert!(inner.x > 0 && inner.y > 0);
        assert!(inner.right() < outer.right());
        assert!(inner.bottom() < outer.bottom());
    }
}
