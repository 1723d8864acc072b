//! # Application State
//!
//! Core state for Shelf. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── sections: Vec<SectionDef>     // status sections of the page template
//! ├── library: Library              // last successfully fetched library
//! ├── page: Page                    // render(sections, library), never edited in place
//! ├── form: Form                    // add/edit form fields
//! ├── in_flight: Option<Operation>  // the one request currently outstanding
//! ├── submitted: Option<Form>       // form as it was when the in-flight save was sent
//! ├── pending_delete: Option<..>    // delete awaiting confirmation
//! ├── banner: Option<Banner>        // dismissible error / notice
//! └── status_message: String        // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::api::{Book, BookId, Library, Operation};
use crate::core::form::Form;
use crate::view::{Page, SectionDef, render};

/// Shown when the user asks to log out.
pub const LOGOUT_NOTICE: &str = "Basic Auth credentials are cached by the connection and \
    cannot be cleared from here. Quitting Shelf is the only reliable way to log out.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Error,
    Notice,
}

/// A dismissible message above the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
}

impl Banner {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            text: text.into(),
        }
    }

    pub fn notice(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Notice,
            text: text.into(),
        }
    }
}

/// A delete the user has asked for but not yet confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: BookId,
    pub book: Book,
}

pub struct App {
    pub sections: Vec<SectionDef>,
    pub library: Library,
    pub page: Page,
    pub form: Form,
    pub in_flight: Option<Operation>,
    /// Form contents sent by the in-flight create/update. The form is only
    /// cleared on success if it still holds exactly this.
    pub submitted: Option<Form>,
    pub pending_delete: Option<PendingDelete>,
    pub banner: Option<Banner>,
    pub status_message: String,
    /// Set by an edit click; the front-end moves focus to the form and clears it.
    pub focus_form: bool,
}

impl App {
    pub fn new(sections: Vec<SectionDef>) -> Self {
        let library = Library::default();
        let page = render(&sections, &library);
        Self {
            sections,
            library,
            page,
            form: Form::new(),
            in_flight: None,
            submitted: None,
            pending_delete: None,
            banner: None,
            status_message: String::from("Welcome to Shelf!"),
            focus_form: false,
        }
    }

    /// The loading indicator: on exactly while a request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Replaces the library and re-renders the page from it.
    pub fn set_library(&mut self, library: Library) {
        self.page = render(&self.sections, &library);
        self.library = library;
    }
}
