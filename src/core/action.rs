//! # Actions
//!
//! Everything that can happen in Shelf becomes an `Action`.
//! User presses Submit? That's `Action::Submit`.
//! Server responds? That's `Action::Completed { op, result }`.
//!
//! The `update()` function applies an action to the state and returns an
//! `Effect` describing the I/O the adapter should perform. No I/O here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! ## Request lifecycle
//!
//! ```text
//! Idle ─ Submit ─▶ Validating ─┬─ invalid ─▶ error style ─▶ Idle
//!                              └─ valid ───▶ Requesting(op)
//! Requesting(op) ─ Completed ─┬─ ok, mutation ─▶ [reset form] ─▶ Requesting(List)
//!                             ├─ ok, list ─────▶ re-render ─▶ Idle
//!                             └─ error ────────▶ banner ─▶ Idle
//! ```
//!
//! At most one request is outstanding. Triggers that would start a second one
//! are refused, and every completion clears the in-flight slot before anything
//! else happens, so the loading indicator can never be left on by a failure.

use log::{debug, info, warn};

use crate::api::{ApiError, Operation, Reply, Request, Status};
use crate::core::form::FormField;
use crate::core::state::{App, Banner, LOGOUT_NOTICE, PendingDelete};
use crate::view::{ListCommand, NodePath};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Re-fetch the library (startup, or the user asked).
    Refresh,
    /// Submit the form: create or update depending on the hidden id.
    Submit,
    /// A click somewhere inside a status section.
    ListClick { status: Status, target: NodePath },
    /// Answer to the delete confirmation prompt.
    ConfirmDelete(bool),
    /// A request finished.
    Completed {
        op: Operation,
        result: Result<Reply, ApiError>,
    },
    /// Replace the text of a form field.
    SetField(FormField, String),
    /// Check a status radio (or clear the group).
    SelectStatus(Option<Status>),
    ResetForm,
    Logout,
    DismissBanner,
    Quit,
}

/// I/O the adapter must perform after an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    Send(Request),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Refresh => {
            if refuse_if_busy(app) {
                return Effect::None;
            }
            begin(app, Request::List)
        }

        Action::Submit => {
            if refuse_if_busy(app) {
                return Effect::None;
            }
            match app.form.extract() {
                Ok(state) => {
                    app.submitted = Some(app.form.clone());
                    begin(app, state.into_request())
                }
                Err(e) => {
                    debug!("Form rejected: {}", e);
                    app.status_message = e.to_string();
                    Effect::None
                }
            }
        }

        Action::ListClick { status, target } => {
            let command = app
                .page
                .section(&status)
                .and_then(|section| section.dispatch_click(&target));
            match command {
                Some(ListCommand::Edit { id, book, status }) => {
                    info!("Editing book {}", id);
                    app.form.populate(&id, &book, &status);
                    app.status_message = format!("Editing \"{}\"", book.title);
                    app.focus_form = true;
                }
                Some(ListCommand::Delete { id, book }) => {
                    if !refuse_if_busy(app) {
                        debug!("Asking to confirm delete of book {}", id);
                        app.pending_delete = Some(PendingDelete { id, book });
                    }
                }
                None => debug!("Click in {} at {:?} hit no control", status, target),
            }
            Effect::None
        }

        Action::ConfirmDelete(confirmed) => {
            let Some(pending) = app.pending_delete.take() else {
                return Effect::None;
            };
            if !confirmed {
                app.status_message = String::from("Delete cancelled");
                return Effect::None;
            }
            if refuse_if_busy(app) {
                return Effect::None;
            }
            begin(app, Request::Delete(pending.id))
        }

        Action::Completed { op, result } => complete(app, op, result),

        Action::SetField(field, text) => {
            if let Some(slot) = app.form.text_mut(field) {
                *slot = text;
            }
            Effect::None
        }

        Action::SelectStatus(status) => {
            app.form.status = status;
            Effect::None
        }

        Action::ResetForm => {
            app.form.reset();
            app.status_message = String::from("Form cleared");
            Effect::None
        }

        Action::Logout => {
            app.banner = Some(Banner::notice(LOGOUT_NOTICE));
            Effect::None
        }

        Action::DismissBanner => {
            app.banner = None;
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}

/// Marks `request` as in flight and hands it to the adapter.
fn begin(app: &mut App, request: Request) -> Effect {
    let op = request.operation();
    info!("Starting {}", op);
    app.status_message = match op {
        Operation::List => String::from("Loading..."),
        Operation::Delete(_) => String::from("Deleting..."),
        Operation::Create | Operation::Update(_) => String::from("Saving..."),
    };
    app.in_flight = Some(op);
    Effect::Send(request)
}

/// Refuses a new request while one is outstanding. Returns true if refused.
fn refuse_if_busy(app: &mut App) -> bool {
    match &app.in_flight {
        Some(op) => {
            debug!("Refusing new request: {} still in flight", op);
            app.status_message = format!("Busy: {} in progress", op);
            true
        }
        None => false,
    }
}

/// The single completion path for every request.
fn complete(app: &mut App, op: Operation, result: Result<Reply, ApiError>) -> Effect {
    if app.in_flight.as_ref() != Some(&op) {
        warn!("Ignoring completion of {} (in flight: {:?})", op, app.in_flight);
        return Effect::None;
    }
    app.in_flight = None;
    let submitted = app.submitted.take();

    match result {
        Ok(Reply::Listed(library)) => {
            let count = library.len();
            app.set_library(library);
            app.status_message = format!("{} books", count);
            Effect::None
        }
        Ok(Reply::Done) => {
            info!("Finished {}", op);
            if matches!(op, Operation::Create | Operation::Update(_)) {
                // An edit click or typing while saving wins over the reset
                if submitted.as_ref() == Some(&app.form) {
                    app.form.reset();
                } else {
                    debug!("Form changed while {} was in flight, keeping it", op);
                }
            }
            if op.is_mutation() {
                begin(app, Request::List)
            } else {
                Effect::None
            }
        }
        Err(e) => {
            warn!("{} failed: {}", op, e);
            app.banner = Some(Banner::error(format!("Could not finish {}: {}", op, e)));
            app.status_message = String::from("Request failed");
            Effect::None
        }
    }
}
