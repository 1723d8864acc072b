//! # TitleBar Component
//!
//! Top status bar: which server we talk to, the current status message, and
//! the loading indicator.
//!
//! Stateless: it receives all data as props and renders a single line.
//!
//! 1. **Loading**: `"Shelf (guest@http://host) | Saving... | ⠋ loading"`
//! 2. **Status message**: `"Shelf (guest@http://host) | 4 books"`
//! 3. **Default**: `"Shelf (guest@http://host)"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Top status bar component.
pub struct TitleBar {
    /// `user@base_url`, or just the URL when anonymous
    pub server: String,
    /// Status message (e.g., "Loading...", "4 books")
    pub status_message: String,
    /// The page's `loading` indicator
    pub is_loading: bool,
    /// Animation frame counter for the spinner
    pub spinner_frame: usize,
}

impl TitleBar {
    pub fn new(server: String, status_message: String, is_loading: bool, spinner_frame: usize) -> Self {
        Self {
            server,
            status_message,
            is_loading,
            spinner_frame,
        }
    }

    fn text(&self) -> String {
        let mut text = format!("Shelf ({})", self.server);
        if !self.status_message.is_empty() {
            text.push_str(" | ");
            text.push_str(&self.status_message);
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::raw(self.text())];
        if self.is_loading {
            let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
            spans.push(Span::styled(
                format!(" | {} loading", spinner),
                Style::default().fg(Color::Yellow),
            ));
        }
        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_loading() {
        let mut title_bar = TitleBar::new(
            "guest@http://localhost:8080".to_string(),
            "Saving...".to_string(),
            true,
            0,
        );
        let text = rendered(&mut title_bar);
        assert!(text.contains("Shelf (guest@http://localhost:8080)"));
        assert!(text.contains("Saving..."));
        assert!(text.contains("loading"));
    }

    #[test]
    fn test_title_bar_idle_has_no_indicator() {
        let mut title_bar = TitleBar::new("http://h".to_string(), "4 books".to_string(), false, 3);
        let text = rendered(&mut title_bar);
        assert!(text.contains("4 books"));
        assert!(!text.contains("loading"));
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let title_bar = TitleBar::new("http://h".to_string(), String::new(), false, 0);
        assert_eq!(title_bar.text(), "Shelf (http://h)");
    }
}
