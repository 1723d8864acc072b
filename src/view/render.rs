//! Library → page projection.
//!
//! [`render`] is the only way a [`Page`] gets built: a fresh page with one
//! empty container per configured status, then one item per entry appended in
//! server order. Nothing from a previous page is reused, so the page is always
//! exactly the last fetched library.

use log::{debug, warn};

use super::dom::{Element, NodePath};
use crate::api::{BookEntry, Library, Status};

/// Class on the element carrying an item's id.
pub const BOOK_ID_CLASS: &str = "book-id";
pub const BOOK_TITLE_CLASS: &str = "book-title";
pub const BOOK_AUTHOR_CLASS: &str = "book-author";
pub const EDIT_CLASS: &str = "edit";
pub const DELETE_CLASS: &str = "delete";

/// One status section of the page template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionDef {
    pub status: Status,
    pub label: String,
}

impl SectionDef {
    pub fn new(status: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            status: Status::new(status),
            label: label.into(),
        }
    }
}

/// A rendered status container: `<div id="<status>-section"><h2/><ol/></div>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub status: Status,
    pub label: String,
    pub element: Element,
}

impl Section {
    fn empty(def: &SectionDef) -> Self {
        let element = Element::new("div")
            .with_id(def.status.section_id())
            .with_class("section")
            .with_child(Element::new("h2").with_text(def.label.clone()))
            .with_child(Element::new("ol"));
        Self {
            status: def.status.clone(),
            label: def.label.clone(),
            element,
        }
    }

    /// Path of the section's `ol`, relative to the section element.
    fn list_path(&self) -> Option<NodePath> {
        self.element.find_path(&|e: &Element| e.tag == "ol")
    }

    /// The rendered `li` items, in display order.
    pub fn items(&self) -> &[Element] {
        self.element
            .first_by_tag("ol")
            .map(|ol| ol.children.as_slice())
            .unwrap_or_default()
    }

    /// Path (relative to the section element) of the first node with `class`
    /// inside item `index`. This is what a click on that control targets.
    pub fn control_path(&self, index: usize, class: &str) -> Option<NodePath> {
        let mut path = self.list_path()?;
        let item = self.items().get(index)?;
        let inner = item.find_path(&|e: &Element| e.has_class(class))?;
        path.push(index);
        path.extend(inner);
        Some(path)
    }
}

/// The whole rendered list area of the page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Page {
    pub sections: Vec<Section>,
}

impl Page {
    pub fn section(&self, status: &Status) -> Option<&Section> {
        self.sections.iter().find(|s| &s.status == status)
    }

    fn section_by_id_mut(&mut self, id: &str) -> Option<&mut Section> {
        self.sections
            .iter_mut()
            .find(|s| s.element.id.as_deref() == Some(id))
    }

    /// Visible text of the page, one line per section. Handy for comparing renders.
    pub fn visible_text(&self) -> Vec<String> {
        self.sections
            .iter()
            .map(|s| s.element.text_content())
            .collect()
    }
}

/// Builds the page for `library` over the template's sections.
///
/// Entries under a status the template has no section for are skipped.
pub fn render(defs: &[SectionDef], library: &Library) -> Page {
    let mut page = Page {
        sections: defs.iter().map(Section::empty).collect(),
    };

    for (status, entries) in &library.shelves {
        let Some(section) = page.section_by_id_mut(&status.section_id()) else {
            warn!(
                "No section for status '{}', skipping {} books",
                status,
                entries.len()
            );
            continue;
        };
        let Some(list) = section.element.first_by_tag_mut("ol") else {
            continue;
        };
        for entry in entries {
            list.push(format_book(entry));
        }
    }

    debug!("Rendered {} books into {} sections", library.len(), page.sections.len());
    page
}

/// One list item for an entry.
///
/// ```text
/// li
/// └── div.book
///     ├── div.info:  span.book-title " – " span.book-author
///     └── div.ops:   span.edit " | " span.delete  input.book-id[hidden]
/// ```
///
/// Title and author are stored as-is so the edit flow can read them back.
pub fn format_book(entry: &BookEntry) -> Element {
    let info = Element::new("div")
        .with_class("info")
        .with_child(
            Element::new("span")
                .with_class(BOOK_TITLE_CLASS)
                .with_text(entry.book.title.clone()),
        )
        .with_child(Element::text_node(" \u{2013} "))
        .with_child(
            Element::new("span")
                .with_class(BOOK_AUTHOR_CLASS)
                .with_text(entry.book.author.clone()),
        );

    let ops = Element::new("div")
        .with_class("ops")
        .with_child(
            Element::new("span")
                .with_class(EDIT_CLASS)
                .with_class("link")
                .with_text("Edit"),
        )
        .with_child(Element::text_node(" | "))
        .with_child(
            Element::new("span")
                .with_class(DELETE_CLASS)
                .with_class("link")
                .with_text("Delete"),
        )
        .with_child(
            Element::new("input")
                .with_class(BOOK_ID_CLASS)
                .with_value(entry.book_id.as_str())
                .hidden(),
        );

    Element::new("li").with_child(
        Element::new("div")
            .with_class("book")
            .with_child(info)
            .with_child(ops),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{entry, sample_library, sample_sections};

    #[test]
    fn test_render_single_entry_scenario() {
        let library: Library = serde_json::from_str(
            r#"{"reading":[{"book_id":"3","book":{"title":"Dune","author":"Herbert"},"status":"reading"}]}"#,
        )
        .unwrap();
        let defs = vec![SectionDef::new("reading", "Reading")];

        let page = render(&defs, &library);
        let section = page.section(&Status::new("reading")).unwrap();
        assert_eq!(section.element.id.as_deref(), Some("reading-section"));

        let items = section.items();
        assert_eq!(items.len(), 1);
        let text = items[0].text_content();
        assert!(text.contains("Dune"));
        assert!(text.contains("Herbert"));

        let hidden = items[0].first_by_class(BOOK_ID_CLASS).unwrap();
        assert!(hidden.hidden);
        assert_eq!(hidden.value.as_deref(), Some("3"));
    }

    #[test]
    fn test_render_keeps_server_order() {
        let page = render(&sample_sections(), &sample_library());
        let next = page.section(&Status::new("next")).unwrap();
        let titles: Vec<String> = next
            .items()
            .iter()
            .map(|li| li.first_by_class(BOOK_TITLE_CLASS).unwrap().text_content())
            .collect();
        assert_eq!(titles, vec!["1984", "The Lord of the Rings"]);
    }

    #[test]
    fn test_render_is_idempotent() {
        let defs = sample_sections();
        let library = sample_library();
        let first = render(&defs, &library);
        let second = render(&defs, &library);
        assert_eq!(first, second);
        assert_eq!(first.visible_text(), second.visible_text());
    }

    #[test]
    fn test_render_replaces_previous_content() {
        let defs = sample_sections();
        let full = render(&defs, &sample_library());
        assert!(!full.section(&Status::new("done")).unwrap().items().is_empty());

        let emptied = render(&defs, &Library::default());
        for section in &emptied.sections {
            assert!(section.items().is_empty());
        }
    }

    #[test]
    fn test_render_skips_unknown_status() {
        let mut library = sample_library();
        library
            .shelves
            .insert(Status::new("abandoned"), vec![entry("99", "Ulysses", "Joyce", "abandoned")]);
        let page = render(&sample_sections(), &library);
        assert!(page.section(&Status::new("abandoned")).is_none());
        assert!(page.visible_text().iter().all(|t| !t.contains("Ulysses")));
    }

    #[test]
    fn test_format_book_is_lossless_for_markup_like_text() {
        let tricky = entry("5", "<b>Tom & Jerry</b>", "A. \"Quote\" O'Neil", "now");
        let li = format_book(&tricky);
        assert_eq!(
            li.first_by_class(BOOK_TITLE_CLASS).unwrap().text_content(),
            "<b>Tom & Jerry</b>"
        );
        assert_eq!(
            li.first_by_class(BOOK_AUTHOR_CLASS).unwrap().text_content(),
            "A. \"Quote\" O'Neil"
        );
    }

    #[test]
    fn test_control_path_targets_the_control() {
        let page = render(&sample_sections(), &sample_library());
        let next = page.section(&Status::new("next")).unwrap();
        let path = next.control_path(1, DELETE_CLASS).unwrap();
        let node = next.element.node(&path).unwrap();
        assert!(node.has_class(DELETE_CLASS));
        assert!(next.control_path(9, DELETE_CLASS).is_none());
    }
}
