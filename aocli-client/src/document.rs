//! Owned document tree consumed by the text extraction passes
//!
//! The HTML parser produces a full DOM. Extraction only distinguishes a handful
//! of element kinds, so a parsed page is lowered into a small owned tree first:
//! elements keep their tag kind and ordered children, text keeps its raw string,
//! everything else (comments, doctypes, whitespace-only runs outside `<pre>`)
//! is dropped.

use scraper::{ElementRef, Html};

/// Element kinds that the extraction passes treat differently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// `<p>`
    Paragraph,
    /// `<br>`
    LineBreak,
    /// `<h1>`
    Heading1,
    /// `<h2>`
    Heading2,
    /// `<pre>`
    Preformatted,
    /// `<article>`
    Article,
    /// `<main>`
    Main,
    /// Any element without a formatting rule of its own
    Other,
}

const TAG_NAMES: [(&str, Tag); 7] = [
    ("p", Tag::Paragraph),
    ("br", Tag::LineBreak),
    ("h1", Tag::Heading1),
    ("h2", Tag::Heading2),
    ("pre", Tag::Preformatted),
    ("article", Tag::Article),
    ("main", Tag::Main),
];

impl Tag {
    /// Map an HTML element name (case-insensitive) to its tag kind
    pub fn from_name(name: &str) -> Self {
        TAG_NAMES
            .iter()
            .find(|(tag_name, _)| tag_name.eq_ignore_ascii_case(name))
            .map_or(Tag::Other, |&(_, tag)| tag)
    }

    /// Whether elements of this kind wrap a page's primary content
    pub fn is_content_root(self) -> bool {
        matches!(self, Tag::Article | Tag::Main)
    }
}

/// A node of a parsed HTML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with its children in document order
    Element { tag: Tag, children: Vec<Node> },
    /// A run of character data
    Text(String),
}

impl Node {
    /// Build an element node
    pub fn element(tag: Tag, children: impl IntoIterator<Item = Node>) -> Self {
        Node::Element {
            tag,
            children: children.into_iter().collect(),
        }
    }

    /// Build a text node
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// Parse a full HTML document and lower it, rooted at `<html>`
    ///
    /// html5ever recovers from any malformed markup, so this never fails; an
    /// empty input still yields the implied `<html><head></head><body></body>`.
    pub fn parse_document(html: &str) -> Self {
        let document = Html::parse_document(html);
        Self::from_element(document.root_element())
    }

    /// Lower a parsed element and its subtree
    ///
    /// The walk keeps its own stack of open elements, so arbitrarily deep markup
    /// lowers without growing the call stack. Whitespace-only text is dropped
    /// except under `<pre>`, where line breaks between inline elements matter.
    pub fn from_element(element: ElementRef<'_>) -> Self {
        let tag = Tag::from_name(element.value().name());
        let mut current = (tag, tag == Tag::Preformatted, Vec::new(), element.children());
        let mut ancestors = Vec::new();

        loop {
            match current.3.next() {
                Some(child) => match child.value() {
                    scraper::Node::Element(child_element) => {
                        let tag = Tag::from_name(child_element.name());
                        let in_pre = current.1 || tag == Tag::Preformatted;
                        let frame = (tag, in_pre, Vec::new(), child.children());
                        ancestors.push(std::mem::replace(&mut current, frame));
                    }
                    scraper::Node::Text(text) if current.1 || !text.trim().is_empty() => {
                        current.2.push(Node::Text(String::from(&**text)));
                    }
                    _ => {}
                },
                None => {
                    let node = Node::Element {
                        tag: current.0,
                        children: std::mem::take(&mut current.2),
                    };
                    match ancestors.pop() {
                        Some(parent) => {
                            current = parent;
                            current.2.push(node);
                        }
                        None => return node,
                    }
                }
            }
        }
    }
}

impl Drop for Node {
    // Unlinks descendants onto a flat list so deep trees drop without recursion
    fn drop(&mut self) {
        let Node::Element { children, .. } = self else {
            return;
        };
        let mut pending = std::mem::take(children);
        while let Some(mut node) = pending.pop() {
            if let Node::Element { children, .. } = &mut node {
                pending.append(children);
            }
        }
    }
}
