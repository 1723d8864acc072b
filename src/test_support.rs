//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;

use crate::api::{ApiError, Book, BookApi, BookEntry, BookId, Library, NewBook, Patch, Status};
use crate::core::state::App;
use crate::view::SectionDef;

/// The stock now/next/done template.
pub fn sample_sections() -> Vec<SectionDef> {
    vec![
        SectionDef::new("now", "Reading Now"),
        SectionDef::new("next", "Up Next"),
        SectionDef::new("done", "Finished"),
    ]
}

pub fn entry(id: &str, title: &str, author: &str, status: &str) -> BookEntry {
    BookEntry {
        book_id: BookId::new(id),
        book: Book::new(title, author),
        status: Status::new(status),
    }
}

/// Four books: one reading, two queued, one finished.
pub fn sample_library() -> Library {
    let mut library = Library::default();
    library.shelves.insert(
        Status::new("now"),
        vec![entry("1", "To Kill a Mockingbird", "Harper Lee", "now")],
    );
    library.shelves.insert(
        Status::new("next"),
        vec![
            entry("2", "1984", "George Orwell", "next"),
            entry("3", "The Lord of the Rings", "J.R.R. Tolkien", "next"),
        ],
    );
    library.shelves.insert(
        Status::new("done"),
        vec![entry("4", "The Great Gatsby", "F. Scott Fitzgerald", "done")],
    );
    library
}

/// Creates a test App over the stock template with nothing loaded.
pub fn test_app() -> App {
    App::new(sample_sections())
}

/// Creates a test App with [`sample_library`] already rendered.
pub fn loaded_app() -> App {
    let mut app = test_app();
    app.set_library(sample_library());
    app
}

/// A server that accepts everything and stores nothing.
pub struct NoopApi;

#[async_trait]
impl BookApi for NoopApi {
    async fn list(&self) -> Result<Library, ApiError> {
        Ok(Library::default())
    }

    async fn create(&self, _book: &NewBook) -> Result<(), ApiError> {
        Ok(())
    }

    async fn update(&self, _id: &BookId, _patches: &[Patch]) -> Result<(), ApiError> {
        Ok(())
    }

    async fn delete(&self, _id: &BookId) -> Result<(), ApiError> {
        Ok(())
    }
}
