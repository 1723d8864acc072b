//! Shelf library exports for testing

pub mod api;
pub mod core;
pub mod tui;
pub mod view;

#[cfg(test)]
pub mod test_support;
