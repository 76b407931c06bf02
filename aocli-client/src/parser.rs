//! HTML response parsing for the pages the client reads

use crate::document::Node;
use crate::locate::find_problem_description;
use crate::submission::{SubmissionResponse, classify};
use regex::Regex;
use std::sync::OnceLock;

/// Parser for AOC HTML responses with a cached user ID pattern
#[derive(Clone, Debug)]
pub(crate) struct ResponseParser {
    user_id_regex: OnceLock<Regex>,
}

impl ResponseParser {
    /// Create a new parser with uninitialized caches
    pub fn new() -> Self {
        Self {
            user_id_regex: OnceLock::new(),
        }
    }

    /// Get or compile the user ID regex
    fn user_id_regex(&self) -> &Regex {
        self.user_id_regex
            .get_or_init(|| Regex::new(r"\(anonymous user #(\d+)\)").unwrap())
    }

    /// Extract user ID from settings page HTML
    pub fn extract_user_id(&self, html: &str) -> Option<u64> {
        let regex = self.user_id_regex();
        let captures = regex.captures(html)?;
        let user_id_str = captures.get(1)?.as_str();
        user_id_str.parse::<u64>().ok()
    }

    /// Extract the puzzle text from a day page, `None` if no content qualifies
    pub fn parse_problem_page(&self, html: &str) -> Option<String> {
        find_problem_description(&Node::parse_document(html))
    }

    /// Classify the page returned for an answer submission
    pub fn parse_submission_response(&self, html: &str) -> SubmissionResponse {
        classify(html)
    }
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::SubmissionOutcome;
    use proptest::prelude::*;

    const DAY_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en-us">
<head>
<meta charset="utf-8"/>
<title>Day 4 - Advent of Code 2022</title>
</head><!--




Oh, hello!  Funny seeing you here.

-->
<body>
<header><div><h1 class="title-global"><a href="/">Advent of Code</a></h1></div></header>
<div id="sidebar">
<div id="sponsor"><div class="quiet">Our <a href="/2022/sponsors">sponsors</a> help make Advent of Code possible:</div></div>
</div>
<main>
<article class="day-desc"><h2>--- Day 4: Camp Cleanup ---</h2><p>Space needs to be cleared before the last supplies can be unloaded.</p>
<p>For example, consider the following list of section assignment pairs:</p>
<pre><code>2-4,6-8
2-3,4-5
</code></pre>
<p>In how many assignment pairs does one range <em>fully contain</em> the other?</p>
</article>
<p>Your puzzle answer was <code>448</code>.</p><article class="day-desc"><h2 id="part2">--- Part Two ---</h2><p>It seems like there is still quite a bit of duplicate work planned.</p>
</article>
<p>Both parts of this puzzle are complete! They provide two gold stars: **</p>
</main>
</body>
</html>"#;

    #[test]
    fn test_parse_problem_page() {
        let parser = ResponseParser::new();
        let problem = parser.parse_problem_page(DAY_PAGE).expect("problem text");

        assert!(problem.starts_with("\n--- Day 4: Camp Cleanup ---\n\n"));
        assert!(problem.contains("\n2-4,6-8\n2-3,4-5\n"));
        assert!(problem.contains("one range fully contain the other?"));
        assert!(problem.contains("Your puzzle answer was 448 ."));
        assert!(problem.contains("\n--- Part Two ---\n\n"));
        assert!(!problem.contains("sponsors"));
        assert!(!problem.contains("Funny seeing you here"));
    }

    #[test]
    fn test_parse_problem_page_without_puzzle() {
        let parser = ResponseParser::new();
        let html = r#"<html><body><main><p>Please don't repeatedly request this endpoint before it unlocks!</p></main></body></html>"#;
        assert_eq!(parser.parse_problem_page(html), None);
    }

    #[test]
    fn test_malformed_html() {
        let parser = ResponseParser::new();
        let html = r#"<html><body><main>That's not the right answer. Unclosed tag"#;
        // html5ever is lenient and still finds the main element
        let response = parser.parse_submission_response(html);
        assert_eq!(response.outcome, SubmissionOutcome::Incorrect);
    }

    #[test]
    fn test_empty_main_element() {
        let parser = ResponseParser::new();
        let html = r#"<html><body><main></main></body></html>"#;
        let response = parser.parse_submission_response(html);
        assert_eq!(response.outcome, SubmissionOutcome::Error);
    }

    // User ID extraction from settings page HTML
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(10))]

        #[test]
        fn prop_user_id_extraction(
            user_id in 100000u64..9999999u64,
            prefix in "[a-zA-Z0-9 .,!?\\n]{0,100}",
            suffix in "[a-zA-Z0-9 .,!?\\n]{0,100}",
        ) {
            let html = format!(
                r#"<html><body>{} (anonymous user #{}) {}</body></html>"#,
                prefix, user_id, suffix
            );

            let parser = ResponseParser::new();
            let result = parser.extract_user_id(&html);

            prop_assert_eq!(result, Some(user_id));
        }
    }

    // HTML without the user ID pattern yields None
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(10))]

        #[test]
        fn prop_user_id_extraction_missing_pattern(
            text_content in "[a-zA-Z0-9 .,!?\\n]{1,200}",
        ) {
            let html = format!(r#"<html><body>{}</body></html>"#, text_content);

            let parser = ResponseParser::new();
            prop_assert!(parser.extract_user_id(&html).is_none());
        }
    }
}
