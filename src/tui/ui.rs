use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::book_form::FORM_HEIGHT;
use crate::tui::components::{BannerView, BookForm, BookList, ConfirmDialog, TitleBar};
use crate::tui::{Focus, TuiState};

const LIST_HELP: &str = "↑↓←→ Move  e Edit  d Delete  a Add  Ctrl+R Refresh  Ctrl+L Logout  q Quit";
const FORM_HELP: &str = "Esc Back to list  Ctrl+R Refresh  Ctrl+L Logout  Ctrl+C Quit";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let area = frame.area();
    let banner_height = app
        .banner
        .as_ref()
        .map(|b| BannerView::height(b, area.width))
        .unwrap_or(0);
    let layout = Layout::vertical([
        Length(1),
        Length(banner_height),
        Min(3),
        Length(FORM_HEIGHT),
        Length(1),
    ]);
    let [title_area, banner_area, list_area, form_area, help_area] = layout.areas(area);

    TitleBar::new(
        tui.server.clone(),
        app.status_message.clone(),
        app.is_loading(),
        spinner_frame,
    )
    .render(frame, title_area);

    if let Some(ref banner) = app.banner {
        BannerView { banner }.render(frame, banner_area);
    }

    tui.book_list.clamp(&app.page);
    BookList::new(&app.page, &mut tui.book_list, tui.focus == Focus::List).render(frame, list_area);

    BookForm {
        form: &app.form,
        sections: &app.sections,
        focus: (tui.focus == Focus::Form).then_some(tui.book_form.focus),
    }
    .render(frame, form_area);

    let help = match tui.focus {
        Focus::List => LIST_HELP,
        Focus::Form => FORM_HELP,
    };
    frame.render_widget(
        Span::styled(help, Style::default().fg(Color::DarkGray)),
        help_area,
    );

    if let Some(ref pending) = app.pending_delete {
        ConfirmDialog { pending }.render(frame, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::Banner;
    use crate::core::state::PendingDelete;
    use crate::api::{Book, BookId};
    use crate::test_support::loaded_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(120, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                draw_ui(f, app, tui, 0);
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
    fn test_draw_ui() {
        let app = loaded_app();
        let mut tui = TuiState::new("guest@http://localhost:8080".to_string());
        let text = screen(&app, &mut tui);
        assert!(text.contains("Shelf (guest@http://localhost:8080)"));
        assert!(text.contains("To Kill a Mockingbird"));
        assert!(text.contains("Add a book"));
        assert!(!text.contains("Delete book"));
    }

    #[test]
    fn test_draw_ui_with_banner_and_confirm() {
        let mut app = loaded_app();
        app.banner = Some(Banner::error("server error (HTTP 500): boom"));
        app.pending_delete = Some(PendingDelete {
            id: BookId::new("4"),
            book: Book::new("The Great Gatsby", "F. Scott Fitzgerald"),
        });
        let mut tui = TuiState::new("http://h".to_string());
        let text = screen(&app, &mut tui);
        assert!(text.contains("HTTP 500"));
        assert!(text.contains("Delete book"));
    }
}
