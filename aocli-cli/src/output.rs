//! Output formatting for puzzles, submissions and fetch results

use crate::calendar::PuzzleDate;
use crate::error::CliError;
use aocli_client::{DEFAULT_WIDTH, SubmissionOutcome, SubmissionResponse, wrap};
use chrono::TimeDelta;
use std::time::Duration;

/// Heading that opens the second half of a puzzle page
pub const PART_TWO_MARKER: &str = "--- Part Two ---";

const SECTION_RULE_WIDTH: usize = 40;

/// Banner, then "Part One:" and (once unlocked) "Part Two:" sections
pub fn render_problem(problem: &str, day: u8) -> String {
    let rule = "=".repeat(DEFAULT_WIDTH);
    let mut out = format!("{rule}\n");
    match problem_title(problem) {
        Some(title) => out.push_str(&format!("--- Day {day}: {title} ---\n")),
        None => out.push_str(&format!("--- Day {day} ---\n")),
    }
    out.push_str(&rule);
    out.push_str("\n\n");

    match problem.split_once(PART_TWO_MARKER) {
        Some((part_one, part_two)) => {
            push_section(&mut out, "Part One:", strip_day_heading(part_one));
            out.push('\n');
            push_section(&mut out, "Part Two:", part_two);
        }
        None => push_section(&mut out, "Part One:", strip_day_heading(problem)),
    }
    out
}

/// Title between the first `": "` and the end of that line, without the
/// closing dashes of the heading
fn problem_title(problem: &str) -> Option<&str> {
    let (_, rest) = problem.split_once(": ")?;
    let line = rest.lines().next()?;
    let title = line.trim().trim_end_matches('-').trim_end();
    (!title.is_empty()).then_some(title)
}

/// Drop the `--- Day N: ... ---` heading already shown in the banner
fn strip_day_heading(text: &str) -> &str {
    let text = text.trim_start();
    if text.starts_with("--- Day") {
        text.split_once('\n').map_or("", |(_, rest)| rest)
    } else {
        text
    }
}

fn push_section(out: &mut String, label: &str, text: &str) {
    out.push_str(label);
    out.push('\n');
    out.push_str(&"-".repeat(SECTION_RULE_WIDTH));
    out.push('\n');
    out.push_str(&wrap(text, DEFAULT_WIDTH));
}

/// Outcome banner, the wrapped server message, and the wait time if any
pub fn render_submission(response: &SubmissionResponse) -> String {
    let mut out = "=".repeat(DEFAULT_WIDTH);
    out.push('\n');
    out.push_str(outcome_label(response.outcome));
    out.push('\n');
    out.push_str(&"-".repeat(DEFAULT_WIDTH));
    out.push('\n');
    out.push_str(&wrap(&response.message, DEFAULT_WIDTH));
    if response.outcome == SubmissionOutcome::RateLimited
        && let Some(wait) = response.wait_time()
    {
        out.push_str(&format!("Wait time: {}\n", format_wait(wait)));
    }
    out.push_str(&"=".repeat(DEFAULT_WIDTH));
    out.push('\n');
    out
}

/// Format a submission outcome for display
fn outcome_label(outcome: SubmissionOutcome) -> &'static str {
    match outcome {
        SubmissionOutcome::Correct => "✓ Correct Answer!",
        SubmissionOutcome::TooHigh => "⚠ Too High!",
        SubmissionOutcome::TooLow => "⚠ Too Low!",
        SubmissionOutcome::RateLimited => "⚠ Rate Limited!",
        SubmissionOutcome::Incorrect => "✗ Incorrect Answer!",
        SubmissionOutcome::Error => "⚠ Error!",
    }
}

/// One status line of a batch fetch
pub fn format_fetch_status(date: PuzzleDate, result: &Result<usize, CliError>) -> String {
    let prefix = format!("{}/day{:02}", date.year, date.day);
    match result {
        Ok(bytes) => format!("{}: ✓ {} bytes", prefix, bytes),
        Err(e) => format!("{}: ✗ Error - {}", prefix, e),
    }
}

/// Format a wait time as minutes and seconds
fn format_wait(d: Duration) -> String {
    let secs = d.as_secs();
    match (secs / 60, secs % 60) {
        (0, s) => format!("{}s", s),
        (m, 0) => format!("{}m", m),
        (m, s) => format!("{}m {}s", m, s),
    }
}

/// Format the age of a stored cookie
pub fn format_age(age: TimeDelta) -> String {
    let days = age.num_days();
    let hours = age.num_hours() % 24;
    if days > 0 {
        format!("{} day(s) {} hour(s)", days, hours)
    } else if age.num_hours() > 0 {
        format!("{} hour(s)", hours)
    } else {
        format!("{} minute(s)", age.num_minutes().max(0))
    }
}
