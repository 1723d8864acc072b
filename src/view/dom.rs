//! A minimal document model.
//!
//! Just enough of a DOM to express the page contract: elements with a tag,
//! an optional id, classes, a text payload (for text nodes), a value (for
//! inputs), and children. Nodes are addressed by their child-index path from
//! a root, which is what click delegation walks.

/// Child-index path from a root element to a descendant. Empty = the root.
pub type NodePath = Vec<usize>;

/// Tag used for bare text nodes.
pub const TEXT_TAG: &str = "#text";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    /// Text payload; only set on text nodes.
    pub text: Option<String>,
    /// Form value; set on inputs.
    pub value: Option<String>,
    pub hidden: bool,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn text_node(text: impl Into<String>) -> Self {
        Self {
            tag: TEXT_TAG.to_string(),
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Shorthand for an element wrapping a single text node.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(Element::text_node(text))
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Concatenated text of this element and all descendants, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(ref text) = self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// The node at `path`, if the path is valid.
    pub fn node(&self, path: &[usize]) -> Option<&Element> {
        path.iter()
            .try_fold(self, |node, &index| node.children.get(index))
    }

    /// Depth-first search (self included) for the first node matching `pred`.
    pub fn find_path(&self, pred: &dyn Fn(&Element) -> bool) -> Option<NodePath> {
        if pred(self) {
            return Some(Vec::new());
        }
        self.children.iter().enumerate().find_map(|(i, child)| {
            child.find_path(pred).map(|mut rest| {
                rest.insert(0, i);
                rest
            })
        })
    }

    pub fn find(&self, pred: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        self.find_path(pred).and_then(|path| self.node(&path))
    }

    pub fn find_mut(&mut self, pred: &dyn Fn(&Element) -> bool) -> Option<&mut Element> {
        let path = self.find_path(pred)?;
        path.iter()
            .try_fold(self, |node, &index| node.children.get_mut(index))
    }

    pub fn first_by_class(&self, class: &str) -> Option<&Element> {
        self.find(&|e: &Element| e.has_class(class))
    }

    pub fn first_by_tag(&self, tag: &str) -> Option<&Element> {
        self.find(&|e: &Element| e.tag == tag)
    }

    pub fn first_by_tag_mut(&mut self, tag: &str) -> Option<&mut Element> {
        self.find_mut(&|e: &Element| e.tag == tag)
    }

    /// Nodes from the one at `path` up to (and including) the root,
    /// nearest first, each paired with its own path.
    pub fn ancestors<'a>(&'a self, path: &[usize]) -> Vec<(NodePath, &'a Element)> {
        (0..=path.len())
            .rev()
            .filter_map(|len| {
                let prefix = &path[..len];
                self.node(prefix).map(|node| (prefix.to_vec(), node))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::new("div")
            .with_id("root")
            .with_child(
                Element::new("span")
                    .with_class("greeting")
                    .with_text("Hello"),
            )
            .with_child(Element::text_node(", "))
            .with_child(
                Element::new("ol").with_child(
                    Element::new("li").with_child(
                        Element::new("input")
                            .with_class("book-id")
                            .with_value("7")
                            .hidden(),
                    ),
                ),
            )
    }

    #[test]
    fn test_text_content_is_document_order() {
        let root = sample().with_child(Element::text_node("world"));
        assert_eq!(root.text_content(), "Hello, world");
    }

    #[test]
    fn test_node_by_path() {
        let root = sample();
        let input = root.node(&[2, 0, 0]).unwrap();
        assert_eq!(input.value.as_deref(), Some("7"));
        assert!(input.hidden);
        assert!(root.node(&[2, 5]).is_none());
        assert_eq!(root.node(&[]).unwrap().id.as_deref(), Some("root"));
    }

    #[test]
    fn test_find_path_and_ancestors() {
        let root = sample();
        let path = root.find_path(&|e: &Element| e.has_class("book-id")).unwrap();
        assert_eq!(path, vec![2, 0, 0]);

        let tags: Vec<&str> = root
            .ancestors(&path)
            .into_iter()
            .map(|(_, e)| e.tag.as_str())
            .collect();
        assert_eq!(tags, vec!["input", "li", "ol", "div"]);
    }

    #[test]
    fn test_queries() {
        let mut root = sample();
        assert_eq!(root.first_by_class("greeting").unwrap().text_content(), "Hello");
        assert!(root.first_by_class("missing").is_none());

        root.first_by_tag_mut("ol").unwrap().push(Element::new("li"));
        assert_eq!(root.first_by_tag("ol").unwrap().children.len(), 2);
    }
}
