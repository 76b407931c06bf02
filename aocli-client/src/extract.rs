//! Plain-text rendering of document subtrees

use crate::document::{Node, Tag};

/// Render a node and its descendants as plain text
///
/// Child fragments are joined in document order with a single space, unless the
/// boundary already carries whitespace. Paragraphs, headings and preformatted
/// blocks are set apart with newlines; `<br>` always renders as one newline.
pub fn extract_text(node: &Node) -> String {
    let (tag, children) = match node {
        Node::Text(text) => return text.clone(),
        Node::Element { tag, children } => (*tag, children),
    };

    // (tag, text so far, children still to render) per open element
    let mut current = (tag, String::new(), children.iter());
    let mut ancestors = Vec::new();
    loop {
        match current.2.next() {
            Some(Node::Text(text)) => push_fragment(&mut current.1, text),
            Some(Node::Element { tag, children }) => {
                let frame = (*tag, String::new(), children.iter());
                ancestors.push(std::mem::replace(&mut current, frame));
            }
            None => {
                let fragment = apply_tag_rule(current.0, std::mem::take(&mut current.1));
                match ancestors.pop() {
                    Some(parent) => {
                        current = parent;
                        push_fragment(&mut current.1, &fragment);
                    }
                    None => return fragment,
                }
            }
        }
    }
}

fn push_fragment(text: &mut String, fragment: &str) {
    if fragment.is_empty() {
        return;
    }
    if needs_separator(text, fragment) {
        text.push(' ');
    }
    text.push_str(fragment);
}

fn needs_separator(text: &str, fragment: &str) -> bool {
    !text.is_empty()
        && !text.ends_with(char::is_whitespace)
        && !fragment.starts_with(char::is_whitespace)
}

fn apply_tag_rule(tag: Tag, text: String) -> String {
    match tag {
        Tag::LineBreak => "\n".to_string(),
        _ if text.is_empty() => text,
        Tag::Paragraph | Tag::Preformatted => format!("\n{text}\n"),
        Tag::Heading1 | Tag::Heading2 => format!("\n{text}\n\n"),
        Tag::Article | Tag::Main | Tag::Other => text,
    }
}
