//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: top status line with the loading indicator
//! - `BannerView`: dismissible error / notice
//! - `ConfirmDialog`: delete confirmation overlay
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `BookList`: status columns with a cursor over rendered items
//! - `BookForm`: add/edit form with field focus
//!
//! Components receive external data as props, never by reaching into `App`.
//! State that must survive a frame (`BookListState`, `BookFormState`) lives in
//! `TuiState`; the render wrappers borrow it each frame.

pub mod banner;
pub mod book_form;
pub mod book_list;
pub mod confirm;
mod title_bar;

pub use banner::BannerView;
pub use book_form::{BookForm, BookFormState, FormEvent};
pub use book_list::{BookList, BookListState, ListEvent};
pub use confirm::ConfirmDialog;
pub use title_bar::TitleBar;
