pub mod client;
pub mod request;
pub mod types;

pub use client::{ApiError, BookApi, Credentials, HttpBookApi};
pub use request::{Operation, Reply, Request, perform};
pub use types::{Book, BookEntry, BookId, Library, NewBook, Patch, Status};
