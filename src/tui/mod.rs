//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, paints the page, and
//! translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Request Flow
//!
//! `update()` never performs I/O. When it returns `Effect::Send(request)`,
//! the loop spawns a tokio task that runs the request and sends the outcome
//! back as `Action::Completed` over an mpsc channel. Completions are applied
//! on this thread, between key events, so state is only ever touched here.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the spinner moves.
//! - **Idle**: sleeps up to 500ms, only redraws on events or completions.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::api::{BookApi, Request, perform};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::form::FormField;
use crate::core::state::App;
use crate::tui::components::confirm;
use crate::tui::components::{BookFormState, BookListState, FormEvent, ListEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which half of the screen receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Form,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    /// `user@base_url` for the title bar
    pub server: String,
    pub focus: Focus,
    pub book_list: BookListState,
    pub book_form: BookFormState,
}

impl TuiState {
    pub fn new(server: String) -> Self {
        Self {
            server,
            focus: Focus::List,
            book_list: BookListState::new(),
            book_form: BookFormState::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableBracketedPaste)?;
        info!("Terminal modes enabled (bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste);
    }
}

fn server_label(config: &ResolvedConfig) -> String {
    match config.credentials {
        Some(ref creds) => format!("{}@{}", creds.username, config.base_url),
        None => config.base_url.clone(),
    }
}

pub fn run(config: &ResolvedConfig, api: Arc<dyn BookApi>) -> std::io::Result<()> {
    let mut app = App::new(config.sections.clone());
    let mut tui = TuiState::new(server_label(config));

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for completions from request tasks
    let (tx, rx) = mpsc::channel();

    // Initial load
    if let Effect::Send(request) = update(&mut app, Action::Refresh) {
        spawn_request(api.clone(), request, tx.clone());
    }

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        let animating = app.is_loading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let Some(action) = route_event(&app, &mut tui, event) else {
                continue;
            };
            if apply(&mut app, &mut tui, action, &api, &tx) {
                break 'main;
            }
        }

        // Handle completions from request tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if apply(&mut app, &mut tui, action, &api, &tx) {
                break 'main;
            }
        }
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}

/// Runs one action through the reducer and carries out its effect.
/// Returns true when the app should quit.
fn apply(
    app: &mut App,
    tui: &mut TuiState,
    action: Action,
    api: &Arc<dyn BookApi>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    let effect = update(app, action);

    // An edit click loaded the form: move there, like scrolling to it
    if app.focus_form {
        app.focus_form = false;
        tui.focus = Focus::Form;
        tui.book_form.focus = FormField::Title;
    }

    match effect {
        Effect::Quit => true,
        Effect::Send(request) => {
            spawn_request(api.clone(), request, tx.clone());
            false
        }
        Effect::None => false,
    }
}

/// Translates a key into a core action, handling purely presentational keys
/// (cursor movement, focus changes) on the way.
fn route_event(app: &App, tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::ForceQuit => return Some(Action::Quit),
        TuiEvent::Resize => return None,
        _ => {}
    }

    // The confirmation prompt is modal
    if app.pending_delete.is_some() {
        return confirm::answer(&event).map(Action::ConfirmDelete);
    }

    match event {
        TuiEvent::Refresh => return Some(Action::Refresh),
        TuiEvent::ClearForm => return Some(Action::ResetForm),
        TuiEvent::Logout => return Some(Action::Logout),
        TuiEvent::Escape if app.banner.is_some() => return Some(Action::DismissBanner),
        _ => {}
    }

    match tui.focus {
        Focus::List => match event {
            TuiEvent::InputChar('q') => Some(Action::Quit),
            TuiEvent::InputChar('r') => Some(Action::Refresh),
            _ => match tui.book_list.handle_event(&event, &app.page)? {
                ListEvent::Click { status, target } => Some(Action::ListClick { status, target }),
                ListEvent::FocusForm => {
                    tui.focus = Focus::Form;
                    None
                }
            },
        },
        Focus::Form => match tui.book_form.handle_event(&event, &app.form, &app.sections)? {
            FormEvent::Set(field, text) => Some(Action::SetField(field, text)),
            FormEvent::Select(status) => Some(Action::SelectStatus(status)),
            FormEvent::Submit => Some(Action::Submit),
            FormEvent::Leave => {
                tui.focus = Focus::List;
                None
            }
        },
    }
}

fn spawn_request(api: Arc<dyn BookApi>, request: Request, tx: mpsc::Sender<Action>) {
    let op = request.operation();
    info!("Spawning request: {}", op);
    tokio::spawn(async move {
        let result = perform(api.as_ref(), &request).await;
        if let Err(ref e) = result {
            warn!("Request {} failed: {}", op, e);
        }
        if tx.send(Action::Completed { op, result }).is_err() {
            warn!("Failed to send completion: receiver dropped");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Status;
    use crate::core::state::Banner;
    use crate::test_support::loaded_app;

    fn tui() -> TuiState {
        TuiState::new("http://h".to_string())
    }

    #[test]
    fn test_list_keys_become_clicks() {
        let app = loaded_app();
        let mut tui = tui();
        let action = route_event(&app, &mut tui, TuiEvent::InputChar('d'));
        assert!(matches!(
            action,
            Some(Action::ListClick { ref status, .. }) if *status == Status::new("now")
        ));
    }

    #[test]
    fn test_confirm_prompt_is_modal() {
        let mut app = loaded_app();
        let mut tui = tui();
        let click = route_event(&app, &mut tui, TuiEvent::InputChar('d')).unwrap();
        update(&mut app, click);
        assert!(app.pending_delete.is_some());

        // Keys that would normally do something are swallowed
        assert_eq!(route_event(&app, &mut tui, TuiEvent::InputChar('q')), None);
        assert_eq!(route_event(&app, &mut tui, TuiEvent::Refresh), None);
        assert_eq!(
            route_event(&app, &mut tui, TuiEvent::Escape),
            Some(Action::ConfirmDelete(false))
        );
    }

    #[test]
    fn test_form_focus_and_typing() {
        let app = loaded_app();
        let mut tui = tui();
        assert_eq!(route_event(&app, &mut tui, TuiEvent::InputChar('a')), None);
        assert_eq!(tui.focus, Focus::Form);

        // 'q' types into the form instead of quitting
        assert_eq!(
            route_event(&app, &mut tui, TuiEvent::InputChar('q')),
            Some(Action::SetField(FormField::Title, "q".to_string()))
        );
        assert_eq!(route_event(&app, &mut tui, TuiEvent::Submit), Some(Action::Submit));

        assert_eq!(route_event(&app, &mut tui, TuiEvent::Escape), None);
        assert_eq!(tui.focus, Focus::List);
    }

    #[test]
    fn test_escape_dismisses_banner_first() {
        let mut app = loaded_app();
        app.banner = Some(Banner::notice("hi"));
        let mut tui = tui();
        tui.focus = Focus::Form;
        assert_eq!(
            route_event(&app, &mut tui, TuiEvent::Escape),
            Some(Action::DismissBanner)
        );
        assert_eq!(tui.focus, Focus::Form);
    }

    #[test]
    fn test_edit_click_moves_focus_to_form() {
        let mut app = loaded_app();
        let mut tui = tui();
        let (tx, _rx) = mpsc::channel();
        let api: Arc<dyn BookApi> = Arc::new(crate::test_support::NoopApi);

        let click = route_event(&app, &mut tui, TuiEvent::InputChar('e')).unwrap();
        assert!(!apply(&mut app, &mut tui, click, &api, &tx));
        assert_eq!(tui.focus, Focus::Form);
        assert!(!app.focus_form);
        assert_eq!(app.form.title, "To Kill a Mockingbird");
    }
}
