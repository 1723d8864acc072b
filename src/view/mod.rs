//! # View
//!
//! The page as data. [`render`] projects a fetched library onto the status
//! sections of the template, and [`Section::dispatch_click`] turns a click
//! inside a section back into a [`ListCommand`]. Front-ends paint the page and
//! report clicks; they never build or read book nodes themselves.

pub mod delegate;
pub mod dom;
pub mod render;

pub use delegate::ListCommand;
pub use dom::{Element, NodePath};
pub use render::{Page, Section, SectionDef, render};
