//! Basic usage example for the AOC HTTP client
//!
//! This example demonstrates how to:
//! - Create a client with default and custom settings
//! - Verify a session cookie
//! - Fetch puzzle input and the puzzle description
//! - Submit an answer and read the classified response
//!
//! Note: This example requires a valid AOC session cookie in `AOC_SESSION`.
//! You can get your session cookie from your browser's cookies after logging in to adventofcode.com

use aocli_client::{AocClient, DEFAULT_WIDTH, SubmissionOutcome, wrap};
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let session = std::env::var("AOC_SESSION")?;

    // A client with a custom HTTP configuration; redirects stay disabled
    let client = AocClient::builder()
        .client_builder(
            reqwest::blocking::Client::builder()
                .timeout(Duration::from_secs(30))
                .use_rustls_tls(),
        )
        .build()?;

    println!("Verifying session cookie...");
    let session_info = client.verify_session(&session)?;
    match session_info.user_id {
        Some(user_id) => println!("✓ Session is valid (User ID: {})", user_id),
        None => {
            println!("✗ Session is invalid");
            return Ok(());
        }
    }

    let (year, day) = (2023, 1);

    println!("\nFetching puzzle {} day {}...", year, day);
    let problem = client.get_problem(year, day, &session)?;
    print!("{}", wrap(&problem, DEFAULT_WIDTH));

    let input = client.get_input(year, day, &session)?;
    println!("\nInput length: {} bytes", input.len());

    // Submit an answer (this one is most likely wrong)
    let response = client.submit_answer(year, day, 1, "12345", &session)?;
    let label = match response.outcome {
        SubmissionOutcome::Correct => "✓ Correct",
        SubmissionOutcome::Incorrect => "✗ Incorrect",
        SubmissionOutcome::TooHigh => "✗ Too high",
        SubmissionOutcome::TooLow => "✗ Too low",
        SubmissionOutcome::RateLimited => "⏳ Rate limited",
        SubmissionOutcome::Error => "⚠ Unreadable response",
    };
    println!("\n{}", label);
    if let Some(wait) = response.wait_time() {
        println!("Wait time: {:?}", wait);
    }
    print!("{}", wrap(&response.message, DEFAULT_WIDTH));

    Ok(())
}
