//! # BookList Component
//!
//! Paints the page's status sections side by side, one column per section,
//! and keeps a cursor over the rendered items.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `BookListState` lives in `TuiState` (cursor survives re-renders)
//! - `BookList` is created each frame with the borrowed page and state
//!
//! The list never looks at book data directly. It shows the text of each
//! rendered `li` and reports presses on "Edit"/"Delete" as clicks on those
//! controls' nodes; the section's dispatcher does the rest.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::api::Status;
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;
use crate::view::render::{DELETE_CLASS, EDIT_CLASS};
use crate::view::{NodePath, Page};

/// Events emitted by the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    /// A control was pressed: the section it lives in and the node path hit.
    Click { status: Status, target: NodePath },
    /// Move focus to the form.
    FocusForm,
}

/// Cursor over the page: which section column, which item in it.
#[derive(Debug, Default)]
pub struct BookListState {
    pub section: usize,
    pub item: usize,
    list_state: ListState,
}

impl BookListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the cursor inside the page after a re-render shrank it.
    pub fn clamp(&mut self, page: &Page) {
        if page.sections.is_empty() {
            self.section = 0;
            self.item = 0;
            return;
        }
        self.section = self.section.min(page.sections.len() - 1);
        let len = page.sections[self.section].items().len();
        self.item = self.item.min(len.saturating_sub(1));
    }

    fn selected_len(&self, page: &Page) -> usize {
        page.sections
            .get(self.section)
            .map(|s| s.items().len())
            .unwrap_or(0)
    }

    /// A click on `class` inside the selected item, if there is one.
    pub fn click(&self, page: &Page, class: &str) -> Option<ListEvent> {
        let section = page.sections.get(self.section)?;
        let target = section.control_path(self.item, class)?;
        Some(ListEvent::Click {
            status: section.status.clone(),
            target,
        })
    }

    pub fn handle_event(&mut self, event: &TuiEvent, page: &Page) -> Option<ListEvent> {
        match event {
            TuiEvent::CursorUp => {
                self.item = self.item.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown => {
                let len = self.selected_len(page);
                if self.item + 1 < len {
                    self.item += 1;
                }
                None
            }
            TuiEvent::CursorLeft => {
                self.section = self.section.saturating_sub(1);
                self.clamp(page);
                None
            }
            TuiEvent::CursorRight => {
                self.section += 1;
                self.clamp(page);
                None
            }
            TuiEvent::Submit | TuiEvent::InputChar('e') => self.click(page, EDIT_CLASS),
            TuiEvent::Delete | TuiEvent::InputChar('d') => self.click(page, DELETE_CLASS),
            TuiEvent::NextField | TuiEvent::InputChar('a') => Some(ListEvent::FocusForm),
            _ => None,
        }
    }
}

/// Transient render wrapper for the section columns.
pub struct BookList<'a> {
    pub page: &'a Page,
    pub state: &'a mut BookListState,
    pub focused: bool,
}

impl<'a> BookList<'a> {
    pub fn new(page: &'a Page, state: &'a mut BookListState, focused: bool) -> Self {
        Self {
            page,
            state,
            focused,
        }
    }
}

impl Component for BookList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.page.sections.is_empty() {
            let empty = Paragraph::new("No status sections configured.")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(empty, area);
            return;
        }

        let count = self.page.sections.len() as u32;
        let columns = Layout::horizontal(
            (0..count).map(|_| Constraint::Ratio(1, count)),
        )
        .split(area);

        for (index, (section, column)) in self.page.sections.iter().zip(columns.iter()).enumerate() {
            let is_current = self.focused && index == self.state.section;
            let border_style = if is_current {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!(" {} ({}) ", section.label, section.items().len()));

            let items: Vec<ListItem> = section
                .items()
                .iter()
                .map(|li| {
                    let info = li
                        .first_by_class("info")
                        .map(|e| e.text_content())
                        .unwrap_or_else(|| li.text_content());
                    ListItem::new(info)
                })
                .collect();

            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD));

            if is_current {
                self.state.list_state.select(Some(self.state.item));
                frame.render_stateful_widget(list, *column, &mut self.state.list_state);
            } else {
                frame.render_widget(list, *column);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_library, sample_sections};
    use crate::view::render;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn page() -> Page {
        render(&sample_sections(), &sample_library())
    }

    #[test]
    fn test_cursor_moves_within_and_across_sections() {
        let page = page();
        let mut state = BookListState::new();
        state.handle_event(&TuiEvent::CursorRight, &page);
        assert_eq!(state.section, 1);
        state.handle_event(&TuiEvent::CursorDown, &page);
        state.handle_event(&TuiEvent::CursorDown, &page);
        assert_eq!(state.item, 1, "stops at the last item");

        state.handle_event(&TuiEvent::CursorRight, &page);
        assert_eq!((state.section, state.item), (2, 0), "clamped to the shorter column");
        state.handle_event(&TuiEvent::CursorRight, &page);
        assert_eq!(state.section, 2);
    }

    #[test]
    fn test_edit_key_reports_click_on_edit_control() {
        let page = page();
        let mut state = BookListState::new();
        state.section = 1;
        state.item = 1;
        let Some(ListEvent::Click { status, target }) =
            state.handle_event(&TuiEvent::InputChar('e'), &page)
        else {
            panic!("expected a click");
        };
        assert_eq!(status, Status::new("next"));
        let section = page.section(&status).unwrap();
        assert!(section.element.node(&target).unwrap().has_class(EDIT_CLASS));
    }

    #[test]
    fn test_click_on_empty_section_is_none() {
        let page = render(&sample_sections(), &Default::default());
        let mut state = BookListState::new();
        assert_eq!(state.handle_event(&TuiEvent::InputChar('d'), &page), None);
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut state = BookListState::new();
        state.section = 1;
        state.item = 1;
        state.clamp(&render(&sample_sections(), &Default::default()));
        assert_eq!((state.section, state.item), (1, 0));
    }

    #[test]
    fn test_render_shows_rendered_item_text() {
        let page = page();
        let mut state = BookListState::new();
        let backend = TestBackend::new(120, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                BookList::new(&page, &mut state, true).render(f, f.area());
            })
            .unwrap();
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Reading Now (1)"));
        assert!(text.contains("Up Next (2)"));
        assert!(text.contains("1984"));
    }
}
