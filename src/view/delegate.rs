//! Click delegation for status sections.
//!
//! Each section has one dispatcher instead of a handler per item: a click is
//! reported as a path inside the section, and the dispatcher walks up from the
//! target to find which control was hit and which item it belongs to. Since
//! handlers are never attached to items, re-rendering never needs rebinding.

use log::debug;

use super::render::{
    BOOK_AUTHOR_CLASS, BOOK_ID_CLASS, BOOK_TITLE_CLASS, DELETE_CLASS, EDIT_CLASS, Section,
};
use crate::api::{Book, BookId, Status};

/// What a click on a list control asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListCommand {
    /// Load the item into the form.
    Edit {
        id: BookId,
        book: Book,
        status: Status,
    },
    /// Ask to delete the item.
    Delete { id: BookId, book: Book },
}

#[derive(Clone, Copy)]
enum Control {
    Edit,
    Delete,
}

impl Section {
    /// Resolves a click at `target` (a path relative to the section element).
    ///
    /// Returns `None` for clicks that do not land on (or inside) an edit or
    /// delete control, or whose item has no readable id.
    pub fn dispatch_click(&self, target: &[usize]) -> Option<ListCommand> {
        let chain = self.element.ancestors(target);

        let control = chain.iter().find_map(|(_, node)| {
            if node.has_class(EDIT_CLASS) {
                Some(Control::Edit)
            } else if node.has_class(DELETE_CLASS) {
                Some(Control::Delete)
            } else {
                None
            }
        })?;
        let (_, item) = chain.iter().find(|(_, node)| node.tag == "li")?;

        let id = item
            .first_by_class(BOOK_ID_CLASS)
            .and_then(|input| input.value.clone())
            .filter(|v| !v.is_empty())
            .map(BookId::new)?;
        let read = |class: &str| {
            item.first_by_class(class)
                .map(|e| e.text_content())
                .unwrap_or_default()
        };
        let book = Book::new(read(BOOK_TITLE_CLASS), read(BOOK_AUTHOR_CLASS));

        debug!("Click in {} resolved to book {}", self.status, id);
        Some(match control {
            Control::Edit => ListCommand::Edit {
                id,
                book,
                status: self.status.clone(),
            },
            Control::Delete => ListCommand::Delete { id, book },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Library;
    use crate::test_support::{sample_library, sample_sections};
    use crate::view::render::render;
    use crate::view::dom::TEXT_TAG;

    fn next_section() -> Section {
        let page = render(&sample_sections(), &sample_library());
        page.section(&Status::new("next")).unwrap().clone()
    }

    #[test]
    fn test_edit_click_recovers_item_from_rendered_nodes() {
        let section = next_section();
        let path = section.control_path(1, EDIT_CLASS).unwrap();
        assert_eq!(
            section.dispatch_click(&path),
            Some(ListCommand::Edit {
                id: BookId::new("3"),
                book: Book::new("The Lord of the Rings", "J.R.R. Tolkien"),
                status: Status::new("next"),
            })
        );
    }

    #[test]
    fn test_click_on_text_inside_control_bubbles_up() {
        let section = next_section();
        let mut path = section.control_path(0, DELETE_CLASS).unwrap();
        path.push(0); // the "Delete" text node
        assert_eq!(section.element.node(&path).unwrap().tag, TEXT_TAG);
        assert_eq!(
            section.dispatch_click(&path),
            Some(ListCommand::Delete {
                id: BookId::new("2"),
                book: Book::new("1984", "George Orwell"),
            })
        );
    }

    #[test]
    fn test_click_outside_controls_is_ignored() {
        let section = next_section();
        let title = section.control_path(0, BOOK_TITLE_CLASS).unwrap();
        assert_eq!(section.dispatch_click(&title), None);
        assert_eq!(section.dispatch_click(&[]), None);
        assert_eq!(section.dispatch_click(&[7, 7, 7]), None);
    }

    #[test]
    fn test_dispatch_survives_rerender() {
        let defs = sample_sections();
        let before = render(&defs, &sample_library());
        let after = render(&defs, &Library::default());
        let stale = before
            .section(&Status::new("next"))
            .unwrap()
            .control_path(0, EDIT_CLASS)
            .unwrap();

        // Stale paths from the old page resolve to nothing on the new one
        assert_eq!(
            after.section(&Status::new("next")).unwrap().dispatch_click(&stale),
            None
        );
    }
}
