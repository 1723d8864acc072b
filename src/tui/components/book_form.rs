//! # BookForm Component
//!
//! The add/edit form: title, author, and the status radio group.
//!
//! ## State Management
//!
//! The field values live in core (`App::form`), because an edit click fills
//! them. This component only owns which field has focus, and turns keys into
//! [`FormEvent`]s carrying the new value for the parent to apply.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::api::Status;
use crate::core::form::{Form, FormField};
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;
use crate::view::SectionDef;

/// Width of the "Title:  " style labels, so values line up.
const LABEL_WIDTH: usize = 8;

/// Height the form needs: three fields + help line + borders.
pub const FORM_HEIGHT: u16 = 6;

/// High-level events emitted by the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// New text for a field
    Set(FormField, String),
    /// New radio selection
    Select(Option<Status>),
    Submit,
    /// Give focus back to the list
    Leave,
}

#[derive(Debug)]
pub struct BookFormState {
    pub focus: FormField,
}

impl Default for BookFormState {
    fn default() -> Self {
        Self {
            focus: FormField::Title,
        }
    }
}

impl BookFormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_event(
        &mut self,
        event: &TuiEvent,
        form: &Form,
        sections: &[SectionDef],
    ) -> Option<FormEvent> {
        match event {
            TuiEvent::NextField => {
                self.focus = self.focus.next();
                None
            }
            TuiEvent::PrevField => {
                self.focus = self.focus.prev();
                None
            }
            TuiEvent::Escape => Some(FormEvent::Leave),
            TuiEvent::Submit => Some(FormEvent::Submit),
            TuiEvent::CursorUp => {
                self.focus = self.focus.prev();
                None
            }
            TuiEvent::CursorDown => {
                self.focus = self.focus.next();
                None
            }
            _ if self.focus == FormField::Status => self.handle_radio(event, form, sections),
            _ => self.handle_text(event, form),
        }
    }

    fn handle_text(&self, event: &TuiEvent, form: &Form) -> Option<FormEvent> {
        let mut text = form.text(self.focus)?.to_string();
        match event {
            TuiEvent::InputChar(c) => text.push(*c),
            // Field values are single-line
            TuiEvent::Paste(pasted) => text.push_str(&pasted.replace(['\r', '\n'], " ")),
            TuiEvent::Backspace => {
                text.pop()?;
            }
            _ => return None,
        }
        Some(FormEvent::Set(self.focus, text))
    }

    fn handle_radio(
        &self,
        event: &TuiEvent,
        form: &Form,
        sections: &[SectionDef],
    ) -> Option<FormEvent> {
        if sections.is_empty() {
            return None;
        }
        let current = form
            .status
            .as_ref()
            .and_then(|s| sections.iter().position(|d| &d.status == s));
        let len = sections.len();
        let next = match (event, current) {
            (TuiEvent::CursorRight | TuiEvent::InputChar(' '), Some(i)) => (i + 1) % len,
            (TuiEvent::CursorLeft, Some(i)) => (i + len - 1) % len,
            (TuiEvent::CursorRight | TuiEvent::InputChar(' '), None) => 0,
            (TuiEvent::CursorLeft, None) => len - 1,
            (TuiEvent::Backspace, _) => return Some(FormEvent::Select(None)),
            _ => return None,
        };
        Some(FormEvent::Select(Some(sections[next].status.clone())))
    }
}

/// Transient render wrapper for the form.
pub struct BookForm<'a> {
    pub form: &'a Form,
    pub sections: &'a [SectionDef],
    /// Focused field, `None` when the list has focus
    pub focus: Option<FormField>,
}

impl BookForm<'_> {
    fn field_line(&self, field: FormField, value: &str) -> Line<'static> {
        let label_style = if self.focus == Some(field) {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        Line::from(vec![
            Span::styled(
                format!("{:<width$}", format!("{}:", field.label()), width = LABEL_WIDTH),
                label_style,
            ),
            Span::raw(value.to_string()),
        ])
    }

    fn radio_line(&self) -> Line<'static> {
        let mut line = self.field_line(FormField::Status, "");
        for def in self.sections {
            let checked = self.form.status.as_ref() == Some(&def.status);
            let mark = if checked { "(•)" } else { "( )" };
            let style = if checked {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            line.spans
                .push(Span::styled(format!("{} {}  ", mark, def.label), style));
        }
        line
    }
}

impl Component for BookForm<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = if self.form.is_editing() {
            format!(" Edit book #{} ", self.form.book_id)
        } else {
            " Add a book ".to_string()
        };

        let border_style = if self.form.error {
            Style::default().fg(Color::Red)
        } else if self.focus.is_some() {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let help = Line::from(Span::styled(
            "Enter Submit  Tab Next field  ←/→ Status  Esc List  Ctrl+N Clear",
            Style::default().fg(Color::DarkGray),
        ));

        let lines = vec![
            self.field_line(FormField::Title, &self.form.title),
            self.field_line(FormField::Author, &self.form.author),
            self.radio_line(),
            help,
        ];

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(title);
        frame.render_widget(Paragraph::new(lines).block(block), area);

        if let Some(field) = self.focus
            && let Some(text) = self.form.text(field)
        {
            let row = if field == FormField::Title { 0 } else { 1 };
            let x = area.x + 1 + (LABEL_WIDTH + text.width()) as u16;
            let max_x = area.x + area.width.saturating_sub(2);
            frame.set_cursor_position((x.min(max_x), area.y + 1 + row));
        }
    }
}
