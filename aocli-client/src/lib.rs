//! AOC HTTP Client Library
//!
//! This library talks to the Advent of Code website and turns its pages into
//! plain text: puzzle input fetching, puzzle descriptions, and answer submission
//! with the server's verdict classified.
//!
//! # Features
//!
//! - Session validation to check if your AOC cookie is valid
//! - Puzzle input and puzzle description fetching for any year and day
//! - Answer submission classified as correct, too high, too low, rate-limited,
//!   incorrect or unreadable, with the server's full message
//! - HTML-to-text extraction over a small owned document tree
//! - Greedy word wrapping for terminal display
//! - Secure TLS using rustls (no OpenSSL dependencies)
//! - Blocking synchronous API
//!
//! # Example
//!
//! ```no_run
//! use aocli_client::{AocClient, SubmissionOutcome, wrap, DEFAULT_WIDTH};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AocClient::new()?;
//! let session = "your_session_cookie_here";
//!
//! let problem = client.get_problem(2024, 1, session)?;
//! print!("{}", wrap(&problem, DEFAULT_WIDTH));
//!
//! let response = client.submit_answer(2024, 1, 1, "42", session)?;
//! match response.outcome {
//!     SubmissionOutcome::Correct => println!("Correct!"),
//!     SubmissionOutcome::TooHigh | SubmissionOutcome::TooLow => println!("Close..."),
//!     _ => print!("{}", wrap(&response.message, DEFAULT_WIDTH)),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The extraction pieces work on any HTML without the client:
//!
//! ```
//! use aocli_client::{Node, SubmissionOutcome, classify, extract_text, find_main_content};
//!
//! let root = Node::parse_document("<article><p>Hello <b>world</b></p></article>");
//! assert_eq!(find_main_content(&root).as_deref(), Some("\nHello world\n"));
//! assert_eq!(extract_text(&root), "\nHello world\n");
//!
//! let response = classify("<main>That's not the right answer; your answer is too low.</main>");
//! assert_eq!(response.outcome, SubmissionOutcome::TooLow);
//! ```

mod client;
mod document;
mod error;
mod extract;
mod format;
mod locate;
mod parser;
mod submission;

pub use client::{AocClient, AocClientBuilder, SessionInfo};
pub use document::{Node, Tag};
pub use error::AocError;
pub use extract::extract_text;
pub use format::{DEFAULT_WIDTH, wrap};
pub use locate::{find_main_content, find_problem_description};
pub use submission::{
    FALLBACK_MESSAGE, SubmissionOutcome, SubmissionResponse, classify, classify_message,
};
