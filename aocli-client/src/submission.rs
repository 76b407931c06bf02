//! Classification of answer-submission responses

use crate::document::Node;
use crate::locate::find_main_content;
use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;

/// Message reported when a response page carries no readable content
pub const FALLBACK_MESSAGE: &str =
    "Unable to parse server response. Please check the answer on the website.";

static THROTTLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"You have (.+?) left to wait\.").unwrap());

/// Outcome of an answer submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionOutcome {
    /// Answer was correct
    Correct,
    /// Answer was incorrect, without a hint
    Incorrect,
    /// Answer was incorrect and too high
    TooHigh,
    /// Answer was incorrect and too low
    TooLow,
    /// Submission was rate-limited
    RateLimited,
    /// The response could not be interpreted
    Error,
}

/// Substring rules in priority order; the first match decides the outcome.
///
/// Wrong answers also ask the user to wait before retrying, so the high/low
/// hints must be checked before the rate-limit rule.
const OUTCOME_RULES: [(&str, SubmissionOutcome); 5] = [
    ("That's the right answer", SubmissionOutcome::Correct),
    ("too high", SubmissionOutcome::TooHigh),
    ("too low", SubmissionOutcome::TooLow),
    ("wait", SubmissionOutcome::RateLimited),
    ("not the right answer", SubmissionOutcome::Incorrect),
];

/// Classified submission response with the server's full message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResponse {
    /// Outcome derived from the message
    pub outcome: SubmissionOutcome,
    /// Complete text of the response's main content
    pub message: String,
}

impl SubmissionResponse {
    /// Classify already-extracted response text
    ///
    /// An empty message is replaced by [`FALLBACK_MESSAGE`] with an
    /// [`SubmissionOutcome::Error`] outcome.
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.is_empty() {
            tracing::warn!("submission response had no readable content");
            return Self {
                outcome: SubmissionOutcome::Error,
                message: FALLBACK_MESSAGE.to_string(),
            };
        }

        Self {
            outcome: classify_message(&message),
            message,
        }
    }

    /// Remaining wait announced by a rate-limited response, if it parses
    pub fn wait_time(&self) -> Option<Duration> {
        let captures = THROTTLE_REGEX.captures(&self.message)?;
        let duration_str = captures.get(1)?.as_str();
        humantime::parse_duration(duration_str).ok()
    }
}

/// Apply the ordered substring rules to a response message
pub fn classify_message(message: &str) -> SubmissionOutcome {
    OUTCOME_RULES
        .iter()
        .find(|(needle, _)| message.contains(needle))
        .map_or(SubmissionOutcome::Error, |&(_, outcome)| outcome)
}

/// Classify the HTML page returned for an answer submission
pub fn classify(html: &str) -> SubmissionResponse {
    let root = Node::parse_document(html);
    SubmissionResponse::from_message(find_main_content(&root).unwrap_or_default())
}
