//! # Book Form
//!
//! The add/edit form of the page: `title`, `author`, a hidden `id`, and a
//! `status` radio group. The form only validates presence; it knows nothing
//! about what the server will accept.

use std::fmt;

use crate::api::{Book, BookId, NewBook, Patch, Request, Status};

/// Fields the user can fill in. The hidden id is not one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Author,
    Status,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Title, FormField::Author, FormField::Status];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Author => "Author",
            FormField::Status => "Status",
        }
    }

    pub fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Author,
            FormField::Author => FormField::Status,
            FormField::Status => FormField::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Title => FormField::Status,
            FormField::Author => FormField::Title,
            FormField::Status => FormField::Author,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// A required field is empty. Reports the first one, in form order.
    Missing(FormField),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::Missing(field) => write!(f, "{} is required", field.label()),
        }
    }
}

impl std::error::Error for FormError {}

/// What a valid form submits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    /// Empty for a new book.
    pub book_id: BookId,
    pub book: Book,
    pub status: Status,
}

impl FormState {
    /// Create for a new book, two-op patch for an existing one.
    pub fn into_request(self) -> Request {
        if self.book_id.is_empty() {
            Request::Create(NewBook {
                book: self.book,
                status: self.status,
            })
        } else {
            Request::Update {
                id: self.book_id,
                patches: Patch::update(self.book, self.status),
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    pub title: String,
    pub author: String,
    /// Hidden `id` input; set only while editing an existing book.
    pub book_id: String,
    /// Checked radio of the status group, if any.
    pub status: Option<Status>,
    /// The form's `error` style.
    pub error: bool,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the fields, setting or clearing the error style.
    pub fn extract(&mut self) -> Result<FormState, FormError> {
        let missing = FormField::ALL.into_iter().find(|&field| self.is_blank(field));
        if let Some(field) = missing {
            self.error = true;
            return Err(FormError::Missing(field));
        }

        self.error = false;
        Ok(FormState {
            book_id: BookId::new(self.book_id.clone()),
            book: Book::new(self.title.clone(), self.author.clone()),
            status: self.status.clone().unwrap_or_default(),
        })
    }

    fn is_blank(&self, field: FormField) -> bool {
        match field {
            FormField::Title => self.title.is_empty(),
            FormField::Author => self.author.is_empty(),
            FormField::Status => self.status.as_ref().is_none_or(Status::is_empty),
        }
    }

    /// Clears every field (the hidden id included) and the error style.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Loads an existing book for editing.
    pub fn populate(&mut self, id: &BookId, book: &Book, status: &Status) {
        self.reset();
        self.book_id = id.to_string();
        self.title = book.title.clone();
        self.author = book.author.clone();
        self.status = Some(status.clone());
    }

    pub fn is_editing(&self) -> bool {
        !self.book_id.is_empty()
    }

    /// Mutable text of a text field; `None` for the radio group.
    pub fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Title => Some(&mut self.title),
            FormField::Author => Some(&mut self.author),
            FormField::Status => None,
        }
    }

    pub fn text(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::Title => Some(&self.title),
            FormField::Author => Some(&self.author),
            FormField::Status => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> Form {
        Form {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            book_id: String::new(),
            status: Some(Status::new("now")),
            error: false,
        }
    }

    #[test]
    fn test_extract_requires_every_field() {
        for field in FormField::ALL {
            let mut form = filled();
            match field {
                FormField::Title => form.title.clear(),
                FormField::Author => form.author.clear(),
                FormField::Status => form.status = None,
            }
            assert_eq!(form.extract(), Err(FormError::Missing(field)));
            assert!(form.error, "error style for missing {:?}", field);
        }
    }

    #[test]
    fn test_extract_clears_error_style() {
        let mut form = filled();
        form.error = true;
        let state = form.extract().unwrap();
        assert!(!form.error);
        assert_eq!(state.book, Book::new("Dune", "Herbert"));
        assert!(state.book_id.is_empty());
    }

    #[test]
    fn test_empty_id_becomes_create() {
        let request = filled().extract().unwrap().into_request();
        assert_eq!(
            request,
            Request::Create(NewBook {
                book: Book::new("Dune", "Herbert"),
                status: Status::new("now"),
            })
        );
    }

    #[test]
    fn test_id_becomes_two_step_update() {
        let mut form = filled();
        form.book_id = "7".to_string();
        let request = form.extract().unwrap().into_request();
        assert_eq!(
            request,
            Request::Update {
                id: BookId::new("7"),
                patches: vec![
                    Patch::Book(Book::new("Dune", "Herbert")),
                    Patch::Status(Status::new("now")),
                ],
            }
        );
    }

    #[test]
    fn test_reset_clears_hidden_id() {
        let mut form = Form::new();
        form.populate(&BookId::new("7"), &Book::new("T", "A"), &Status::new("done"));
        assert!(form.is_editing());
        form.reset();
        assert_eq!(form, Form::default());
    }

    #[test]
    fn test_field_cycle() {
        let mut field = FormField::Title;
        for _ in 0..3 {
            field = field.next();
        }
        assert_eq!(field, FormField::Title);
        assert_eq!(FormField::Title.prev(), FormField::Status);
    }
}
