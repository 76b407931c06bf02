//! Command implementations
//!
//! Pages are read through the local caches first; the network is only used on
//! a cache miss, on `--refresh`, or to pick up a newly unlocked part two.

use crate::cache::PageCache;
use crate::calendar::{PuzzleDate, released_days};
use crate::config::{Config, SESSION_ENV, SessionSource, prompt_session};
use crate::error::CliError;
use crate::output::{
    PART_TWO_MARKER, format_age, format_fetch_status, render_problem, render_submission,
};
use aocli_client::AocClient;
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use itertools::Itertools;
use rayon::prelude::*;

/// Sessions usually stop being accepted after about a month
const COOKIE_LIFETIME_DAYS: i64 = 30;

/// Print the puzzle input
pub fn fetch(
    client: &AocClient,
    config: &Config,
    date: PuzzleDate,
    refresh: bool,
) -> Result<(), CliError> {
    let input = load_input(client, config, date, refresh)?;
    print!("{}", input);
    Ok(())
}

/// Fetch several inputs of one year in parallel, reporting each day in order
pub fn fetch_all(
    client: &AocClient,
    config: &Config,
    year: u16,
    days: Vec<u8>,
    refresh: bool,
    today: NaiveDate,
) -> Result<(), CliError> {
    let days: Vec<u8> = if days.is_empty() {
        released_days(year, today)
    } else {
        days.into_iter().sorted_unstable().dedup().collect()
    };

    if days.is_empty() {
        println!("No puzzles released for {} yet.", year);
        return Ok(());
    }

    tracing::info!(year, count = days.len(), "fetching inputs");
    let results: Vec<(PuzzleDate, Result<usize, CliError>)> = days
        .par_iter()
        .map(|&day| {
            let date = PuzzleDate { year, day };
            let result = date
                .ensure_available(today)
                .and_then(|date| load_input(client, config, date, refresh))
                .map(|input| input.len());
            (date, result)
        })
        .collect();

    for (date, result) in &results {
        println!("{}", format_fetch_status(*date, result));
    }

    let failed = results.iter().filter(|(_, r)| r.is_err()).count();
    if failed > 0 {
        return Err(CliError::BatchFetch {
            failed,
            total: results.len(),
        });
    }
    Ok(())
}

/// Show the puzzle description
pub fn view(
    client: &AocClient,
    config: &Config,
    date: PuzzleDate,
    refresh: bool,
) -> Result<(), CliError> {
    let problem = load_problem(client, config, date, refresh)?;
    print!("{}", render_problem(&problem, date.day));
    Ok(())
}

/// Submit an answer and show the verdict
pub fn submit(
    client: &AocClient,
    config: &Config,
    date: PuzzleDate,
    part: u8,
    answer: &str,
) -> Result<(), CliError> {
    let session = config.require_session()?;
    println!(
        "Submitting answer for Year {} Day {} Part {}...",
        date.year, date.day, part
    );

    let response = client.submit_answer(date.year, date.day, part, answer.trim(), session)?;
    print!("{}", render_submission(&response));
    Ok(())
}

/// Prompt for a new session cookie, verify it and store it
pub fn update_cookie(client: &AocClient, config: &Config) -> Result<(), CliError> {
    let session =
        prompt_session("Paste the value of the `session` cookie from adventofcode.com.")?;
    let user_id = store_session(client, config, &session, Utc::now())?;

    println!("Cookie updated successfully (user #{}).", user_id);
    if config.session_source == SessionSource::Environment {
        println!(
            "Note: {} is set and takes precedence over the stored cookie.",
            SESSION_ENV
        );
    }
    Ok(())
}

/// Report where the session comes from, its age, and whether it is accepted
pub fn cookie_status(client: &AocClient, config: &Config) -> Result<(), CliError> {
    for line in cookie_report(client, config, Utc::now())? {
        println!("{}", line);
    }
    Ok(())
}

/// Cached input, or fetched (and cached) when missing or refreshing
pub fn load_input(
    client: &AocClient,
    config: &Config,
    date: PuzzleDate,
    refresh: bool,
) -> Result<String, CliError> {
    let cache = PageCache::inputs(&config.cache_dir);
    if !refresh
        && let Some(input) = cache.get(date)?
        && !input.is_empty()
    {
        return Ok(input);
    }

    let session = config.require_session()?;
    let input = client.get_input(date.year, date.day, session)?;
    cache.put(date, &input)?;
    Ok(input)
}

/// Cached description, re-fetched while part two is still missing from it
pub fn load_problem(
    client: &AocClient,
    config: &Config,
    date: PuzzleDate,
    refresh: bool,
) -> Result<String, CliError> {
    let cache = PageCache::problems(&config.cache_dir);
    let cached = if refresh {
        None
    } else {
        cache.get(date)?.filter(|problem| !problem.is_empty())
    };

    let fetch = || -> Result<String, CliError> {
        let session = config.require_session()?;
        Ok(client.get_problem(date.year, date.day, session)?)
    };

    match cached {
        Some(problem) if problem.contains(PART_TWO_MARKER) => Ok(problem),
        Some(problem) => match fetch() {
            Ok(fresh) if fresh.contains(PART_TWO_MARKER) => {
                cache.put(date, &fresh)?;
                Ok(fresh)
            }
            Ok(_) => Ok(problem),
            Err(e) => {
                tracing::warn!(error = %e, "could not check for part two, showing cached text");
                Ok(problem)
            }
        },
        None => {
            let problem = fetch()?;
            cache.put(date, &problem)?;
            Ok(problem)
        }
    }
}

/// Verify `session` with the server and store it; returns the user id
pub fn store_session(
    client: &AocClient,
    config: &Config,
    session: &str,
    now: DateTime<Utc>,
) -> Result<u64, CliError> {
    let user_id = client
        .verify_session(session)?
        .user_id
        .ok_or(CliError::InvalidSession)?;
    config.cookie_store().save(session, now)?;
    Ok(user_id)
}

fn cookie_report(
    client: &AocClient,
    config: &Config,
    now: DateTime<Utc>,
) -> Result<Vec<String>, CliError> {
    let mut lines = Vec::new();
    match config.session_source {
        SessionSource::Missing => {
            lines.push("No session cookie configured.".to_string());
            lines.push(format!(
                "Set {} or run `aocli update-cookie`.",
                SESSION_ENV
            ));
            return Ok(lines);
        }
        SessionSource::Environment => {
            lines.push(format!("Session cookie: from {}", SESSION_ENV));
        }
        SessionSource::CookieFile => {
            let store = config.cookie_store();
            lines.push(format!(
                "Session cookie: stored in {}",
                store.cookie_path().display()
            ));
            if let Some(saved_at) = store.saved_at()? {
                let age = now - saved_at;
                lines.push(format!("Stored {} ago", format_age(age)));
                if age > TimeDelta::days(COOKIE_LIFETIME_DAYS) {
                    lines.push(format!(
                        "Note: sessions usually expire after about {} days.",
                        COOKIE_LIFETIME_DAYS
                    ));
                }
            }
        }
    }

    match client.verify_session(&config.session)?.user_id {
        Some(user_id) => lines.push(format!("Cookie is valid (user #{}).", user_id)),
        None => lines.push("Cookie is invalid or expired.".to_string()),
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookie::CookieStore;
    use tempfile::TempDir;
    use zeroize::Zeroizing;

    const DAY_ONE: PuzzleDate = PuzzleDate { year: 2023, day: 1 };

    const PART_ONE_PAGE: &str = r#"<html><body><main><article class="day-desc"><h2>--- Day 1: Trebuchet?! ---</h2><p>Something is wrong with global snow production.</p></article></main></body></html>"#;

    const BOTH_PARTS_PAGE: &str = r#"<html><body><main><article class="day-desc"><h2>--- Day 1: Trebuchet?! ---</h2><p>Something is wrong with global snow production.</p></article><p>Your puzzle answer was <code>142</code>.</p><article class="day-desc"><h2 id="part2">--- Part Two ---</h2><p>Some of the digits are spelled out.</p></article></main></body></html>"#;

    fn mock_client(server: &mockito::Server) -> AocClient {
        AocClient::builder()
            .base_url(server.url())
            .unwrap()
            .build()
            .unwrap()
    }

    fn test_config(temp: &TempDir, session: &str) -> Config {
        let session_source = if session.is_empty() {
            SessionSource::Missing
        } else {
            SessionSource::Environment
        };
        Config {
            cache_dir: temp.path().to_path_buf(),
            session: Zeroizing::new(session.to_string()),
            session_source,
        }
    }

    #[test]
    fn test_load_input_fetches_and_caches() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/2023/day/1/input")
            .match_header("cookie", "session=abc")
            .with_status(200)
            .with_body("1abc2\npqr3stu8vwx\n")
            .expect(1)
            .create();

        let temp = TempDir::new().unwrap();
        let config = test_config(&temp, "abc");
        let client = mock_client(&server);

        let first = load_input(&client, &config, DAY_ONE, false).unwrap();
        let second = load_input(&client, &config, DAY_ONE, false).unwrap();

        assert_eq!(first, "1abc2\npqr3stu8vwx\n");
        assert_eq!(second, first);
        assert!(PageCache::inputs(temp.path()).get(DAY_ONE).unwrap().is_some());
        mock.assert();
    }

    #[test]
    fn test_load_input_refresh_bypasses_cache() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/2023/day/1/input")
            .with_status(200)
            .with_body("fresh\n")
            .expect(1)
            .create();

        let temp = TempDir::new().unwrap();
        let config = test_config(&temp, "abc");
        PageCache::inputs(temp.path()).put(DAY_ONE, "stale\n").unwrap();

        let input = load_input(&mock_client(&server), &config, DAY_ONE, true).unwrap();

        assert_eq!(input, "fresh\n");
        assert_eq!(
            PageCache::inputs(temp.path()).get(DAY_ONE).unwrap().as_deref(),
            Some("fresh\n")
        );
        mock.assert();
    }

    #[test]
    fn test_cached_input_needs_no_session() {
        let server = mockito::Server::new();
        let temp = TempDir::new().unwrap();
        let config = test_config(&temp, "");
        PageCache::inputs(temp.path()).put(DAY_ONE, "cached\n").unwrap();

        let input = load_input(&mock_client(&server), &config, DAY_ONE, false).unwrap();
        assert_eq!(input, "cached\n");

        let missing = load_input(
            &mock_client(&server),
            &config,
            PuzzleDate { year: 2023, day: 2 },
            false,
        );
        assert!(matches!(missing, Err(CliError::MissingSession)));
    }

    #[test]
    fn test_load_problem_picks_up_part_two() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/2023/day/1")
            .with_status(200)
            .with_body(BOTH_PARTS_PAGE)
            .expect(1)
            .create();

        let temp = TempDir::new().unwrap();
        let config = test_config(&temp, "abc");
        let cache = PageCache::problems(temp.path());
        cache
            .put(DAY_ONE, "\n--- Day 1: Trebuchet?! ---\n\npart one only\n")
            .unwrap();

        let problem = load_problem(&mock_client(&server), &config, DAY_ONE, false).unwrap();

        assert!(problem.contains(PART_TWO_MARKER));
        assert!(problem.contains("Some of the digits are spelled out."));
        assert_eq!(cache.get(DAY_ONE).unwrap(), Some(problem));
        mock.assert();
    }

    #[test]
    fn test_load_problem_keeps_cache_while_part_two_locked() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/2023/day/1")
            .with_status(200)
            .with_body(PART_ONE_PAGE)
            .expect(1)
            .create();

        let temp = TempDir::new().unwrap();
        let config = test_config(&temp, "abc");
        let cached = "\n--- Day 1: Trebuchet?! ---\n\ncached copy\n";
        PageCache::problems(temp.path()).put(DAY_ONE, cached).unwrap();

        let problem = load_problem(&mock_client(&server), &config, DAY_ONE, false).unwrap();

        assert_eq!(problem, cached);
        mock.assert();
    }

    #[test]
    fn test_load_problem_falls_back_to_cache_on_error() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/2023/day/1")
            .with_status(500)
            .expect(1)
            .create();

        let temp = TempDir::new().unwrap();
        let config = test_config(&temp, "abc");
        PageCache::problems(temp.path())
            .put(DAY_ONE, "cached copy\n")
            .unwrap();

        let problem = load_problem(&mock_client(&server), &config, DAY_ONE, false).unwrap();

        assert_eq!(problem, "cached copy\n");
        mock.assert();
    }

    #[test]
    fn test_load_problem_complete_cache_skips_network() {
        let mut server = mockito::Server::new();
        let mock = server.mock("GET", "/2023/day/1").expect(0).create();

        let temp = TempDir::new().unwrap();
        let config = test_config(&temp, "abc");
        let cached = format!("part one\n{}\npart two\n", PART_TWO_MARKER);
        PageCache::problems(temp.path()).put(DAY_ONE, &cached).unwrap();

        let problem = load_problem(&mock_client(&server), &config, DAY_ONE, false).unwrap();

        assert_eq!(problem, cached);
        mock.assert();
    }

    #[test]
    fn test_load_problem_fetches_on_miss() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/2023/day/1")
            .with_status(200)
            .with_body(PART_ONE_PAGE)
            .expect(1)
            .create();

        let temp = TempDir::new().unwrap();
        let config = test_config(&temp, "abc");

        let problem = load_problem(&mock_client(&server), &config, DAY_ONE, false).unwrap();

        assert!(problem.starts_with("\n--- Day 1: Trebuchet?! ---\n"));
        assert!(PageCache::problems(temp.path()).get(DAY_ONE).unwrap().is_some());
        mock.assert();
    }

    #[test]
    fn test_fetch_all_reports_failures_after_all_days() {
        let mut server = mockito::Server::new();
        let ok_mocks: Vec<_> = [1, 2]
            .iter()
            .map(|day| {
                server
                    .mock("GET", format!("/2022/day/{}/input", day).as_str())
                    .with_status(200)
                    .with_body("data\n")
                    .expect(1)
                    .create()
            })
            .collect();
        let failing = server
            .mock("GET", "/2022/day/3/input")
            .with_status(404)
            .expect(1)
            .create();

        let temp = TempDir::new().unwrap();
        let config = test_config(&temp, "abc");
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let result = fetch_all(
            &mock_client(&server),
            &config,
            2022,
            vec![3, 1, 2, 1],
            false,
            today,
        );

        assert!(matches!(
            result,
            Err(CliError::BatchFetch {
                failed: 1,
                total: 3
            })
        ));
        let cache = PageCache::inputs(temp.path());
        assert!(cache.get(PuzzleDate { year: 2022, day: 1 }).unwrap().is_some());
        assert!(cache.get(PuzzleDate { year: 2022, day: 2 }).unwrap().is_some());
        assert!(cache.get(PuzzleDate { year: 2022, day: 3 }).unwrap().is_none());
        for mock in ok_mocks {
            mock.assert();
        }
        failing.assert();
    }

    #[test]
    fn test_fetch_all_rejects_unreleased_days() {
        let server = mockito::Server::new();
        let temp = TempDir::new().unwrap();
        let config = test_config(&temp, "abc");
        let today = NaiveDate::from_ymd_opt(2024, 12, 2).unwrap();
        PageCache::inputs(temp.path())
            .put(PuzzleDate { year: 2024, day: 1 }, "cached\n")
            .unwrap();

        let result = fetch_all(&mock_client(&server), &config, 2024, vec![1, 5], false, today);

        assert!(matches!(
            result,
            Err(CliError::BatchFetch {
                failed: 1,
                total: 2
            })
        ));
    }

    #[test]
    fn test_store_session() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/settings")
            .match_header("cookie", "session=new-session")
            .with_status(200)
            .with_body("<html><body>(anonymous user #424242)</body></html>")
            .create();

        let temp = TempDir::new().unwrap();
        let config = test_config(&temp, "");
        let now = Utc::now();

        let user_id = store_session(&mock_client(&server), &config, "new-session", now).unwrap();

        assert_eq!(user_id, 424242);
        let store = CookieStore::new(temp.path());
        assert_eq!(
            store.load().unwrap().as_deref().map(String::as_str),
            Some("new-session")
        );
        assert!(store.saved_at().unwrap().is_some());
        mock.assert();
    }

    #[test]
    fn test_store_session_rejected() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/settings")
            .with_status(302)
            .with_header("location", "/")
            .create();

        let temp = TempDir::new().unwrap();
        let config = test_config(&temp, "");

        let result = store_session(&mock_client(&server), &config, "bad", Utc::now());

        assert!(matches!(result, Err(CliError::InvalidSession)));
        assert!(CookieStore::new(temp.path()).load().unwrap().is_none());
    }

    #[test]
    fn test_cookie_report_missing() {
        let server = mockito::Server::new();
        let temp = TempDir::new().unwrap();

        let lines = cookie_report(&mock_client(&server), &test_config(&temp, ""), Utc::now()).unwrap();

        assert_eq!(lines[0], "No session cookie configured.");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_cookie_report_stored_and_old() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/settings")
            .with_status(200)
            .with_body("(anonymous user #7)")
            .create();

        let temp = TempDir::new().unwrap();
        let now = Utc::now();
        CookieStore::new(temp.path())
            .save("stored", now - TimeDelta::days(45))
            .unwrap();
        let config = Config {
            cache_dir: temp.path().to_path_buf(),
            session: Zeroizing::new("stored".to_string()),
            session_source: SessionSource::CookieFile,
        };

        let lines = cookie_report(&mock_client(&server), &config, now).unwrap();

        assert!(lines[0].starts_with("Session cookie: stored in"));
        assert_eq!(lines[1], "Stored 45 day(s) 0 hour(s) ago");
        assert!(lines[2].starts_with("Note: sessions usually expire"));
        assert_eq!(lines[3], "Cookie is valid (user #7).");
    }

    #[test]
    fn test_cookie_report_invalid_env_session() {
        let mut server = mockito::Server::new();
        let _mock = server.mock("GET", "/settings").with_status(302).create();

        let temp = TempDir::new().unwrap();
        let lines =
            cookie_report(&mock_client(&server), &test_config(&temp, "expired"), Utc::now()).unwrap();

        assert_eq!(
            lines,
            vec![
                format!("Session cookie: from {}", SESSION_ENV),
                "Cookie is invalid or expired.".to_string(),
            ]
        );
    }
}
