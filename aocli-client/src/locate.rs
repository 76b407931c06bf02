//! Locating a page's primary content

use crate::document::Node;
use crate::extract::extract_text;

/// Substring that real puzzle text always carries (from its `--- Day N ---` heading)
const PROBLEM_MARKER: &str = "Day";

/// Find the text of the first `<article>` or `<main>` element with any content
///
/// The search is depth-first in document order and stops at the first match, so
/// when a page holds several content elements the earliest one wins.
pub fn find_main_content(root: &Node) -> Option<String> {
    find_content(root, &|_| true)
}

/// Find the text of the first `<article>` or `<main>` element that reads like a puzzle
///
/// Content elements whose text lacks the `Day` marker are skipped and the search
/// carries on through their descendants and later siblings.
pub fn find_problem_description(root: &Node) -> Option<String> {
    find_content(root, &|text| text.contains(PROBLEM_MARKER))
}

fn find_content(root: &Node, accept: &dyn Fn(&str) -> bool) -> Option<String> {
    let mut pending = vec![root];
    while let Some(node) = pending.pop() {
        let Node::Element { tag, children } = node else {
            continue;
        };

        if tag.is_content_root() {
            let text = extract_text(node);
            if !text.is_empty() && accept(&text) {
                return Some(text);
            }
        }

        // reversed so the first child is searched next
        pending.extend(children.iter().rev());
    }
    None
}
