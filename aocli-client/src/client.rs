//! AOC HTTP client implementation

use crate::error::AocError;
use crate::parser::ResponseParser;
use crate::submission::SubmissionResponse;
use reqwest::header::HeaderValue;
use zeroize::Zeroize;

/// User agent sent with every request, as the site asks automated tools to identify themselves
const USER_AGENT: &str = concat!(
    "aocli/",
    env!("CARGO_PKG_VERSION"),
    " (command-line Advent of Code client)"
);

/// Result of session verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    /// User ID if session is valid, None otherwise
    pub user_id: Option<u64>,
}

/// The main AOC HTTP client
///
/// This client provides methods for interacting with the Advent of Code website:
/// session validation, input fetching, puzzle text retrieval and answer submission.
///
/// # Example
///
/// ```no_run
/// use aocli_client::AocClient;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = AocClient::new()?;
/// let session = "your_session_cookie";
///
/// let problem = client.get_problem(2024, 1, session)?;
/// print!("{}", aocli_client::wrap(&problem, 80));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct AocClient {
    client: reqwest::blocking::Client,
    base_url: reqwest::Url,
    parser: ResponseParser,
}

impl AocClient {
    /// Create a new AOC client with rustls-tls configuration and no redirect policy
    ///
    /// The client is configured to not follow redirects, which is necessary
    /// for session verification to work correctly.
    ///
    /// # Errors
    ///
    /// Returns `AocError::ClientInit` if the HTTP client cannot be initialized.
    pub fn new() -> Result<Self, AocError> {
        Self::builder().build()
    }

    /// Create a builder for configuring the AOC client
    pub fn builder() -> AocClientBuilder {
        AocClientBuilder::new()
    }

    /// Create a secure cookie header value from a session string
    ///
    /// The header is flagged sensitive and the temporary string is zeroized.
    fn create_cookie_header(session: &str) -> Result<HeaderValue, AocError> {
        let mut cookie_string = format!("session={}", session);
        let header_value = HeaderValue::from_bytes(cookie_string.as_bytes())
            .map_err(|_| AocError::ClientInit("Invalid session cookie format".to_string()));
        cookie_string.zeroize();

        let mut sensitive_header = header_value?;
        sensitive_header.set_sensitive(true);
        Ok(sensitive_header)
    }

    /// Build an absolute URL from path segments under the base URL
    fn url(&self, segments: &[&str]) -> Result<reqwest::Url, AocError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AocError::ClientInit("Cannot modify base URL path".to_string()))?
            .clear()
            .extend(segments);
        Ok(url)
    }

    /// GET a page and return its body, failing on non-success status
    fn get_page(&self, url: reqwest::Url, session: &str) -> Result<String, AocError> {
        let cookie_header = Self::create_cookie_header(session)?;
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(url)
            .header("Cookie", cookie_header)
            .send()?;

        let status = response.status();
        tracing::debug!(%status, "response received");
        if !status.is_success() {
            return Err(AocError::InvalidStatus { status });
        }

        response.text().map_err(|_| AocError::Encoding)
    }

    /// Verify if a session cookie is valid and retrieve user ID
    ///
    /// Sends a request to the settings page. A 2xx status means the session is
    /// valid and the user ID is read from the page; a redirect (3xx) or error
    /// status means the session is not accepted.
    ///
    /// # Returns
    ///
    /// * `Ok(SessionInfo { user_id: Some(id) })` - Session is valid with user ID
    /// * `Ok(SessionInfo { user_id: None })` - Session is invalid
    /// * `Err` - Network error or URL construction error occurred
    pub fn verify_session(&self, session: &str) -> Result<SessionInfo, AocError> {
        let cookie_header = Self::create_cookie_header(session)?;
        let url = self.url(&["settings"])?;
        tracing::debug!(%url, "verifying session");

        let response = self
            .client
            .get(url)
            .header("Cookie", cookie_header)
            .send()?;

        // 3xx redirect to the homepage means the session was rejected
        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "session rejected");
            return Ok(SessionInfo { user_id: None });
        }

        let html = response.text().map_err(|_| AocError::Encoding)?;
        let user_id = self.parser.extract_user_id(&html);

        Ok(SessionInfo { user_id })
    }

    /// Fetch puzzle input for a specific year and day
    ///
    /// # Errors
    ///
    /// * `AocError::Request` - Network error
    /// * `AocError::InvalidStatus` - HTTP error (e.g., 404 if puzzle not available)
    /// * `AocError::Encoding` - Response is not valid UTF-8
    pub fn get_input(&self, year: u16, day: u8, session: &str) -> Result<String, AocError> {
        let url = self.url(&[&year.to_string(), "day", &day.to_string(), "input"])?;
        self.get_page(url, session)
    }

    /// Fetch the puzzle description for a specific year and day as plain text
    ///
    /// The text covers both parts once part one is solved, and includes the
    /// answers already given.
    ///
    /// # Errors
    ///
    /// * `AocError::Request` - Network error
    /// * `AocError::InvalidStatus` - HTTP error
    /// * `AocError::Encoding` - Response is not valid UTF-8
    /// * `AocError::ProblemNotFound` - The page holds no puzzle description
    pub fn get_problem(&self, year: u16, day: u8, session: &str) -> Result<String, AocError> {
        let url = self.url(&[&year.to_string(), "day", &day.to_string()])?;
        let html = self.get_page(url, session)?;

        self.parser
            .parse_problem_page(&html)
            .ok_or(AocError::ProblemNotFound { year, day })
    }

    /// Submit an answer for a puzzle part
    ///
    /// Posts the answer and classifies the response page. An unreadable response
    /// is not an error: it comes back as `SubmissionOutcome::Error` with a
    /// fallback message.
    ///
    /// # Errors
    ///
    /// * `AocError::Request` - Network error
    /// * `AocError::InvalidStatus` - HTTP error
    /// * `AocError::Encoding` - Response is not valid UTF-8
    ///
    /// # Example
    ///
    /// ```no_run
    /// use aocli_client::{AocClient, SubmissionOutcome};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = AocClient::new()?;
    /// let response = client.submit_answer(2024, 1, 1, "42", "your_session_cookie")?;
    /// match response.outcome {
    ///     SubmissionOutcome::Correct => println!("Correct!"),
    ///     SubmissionOutcome::RateLimited => println!("Wait: {:?}", response.wait_time()),
    ///     _ => println!("{}", response.message),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn submit_answer(
        &self,
        year: u16,
        day: u8,
        part: u8,
        answer: &str,
        session: &str,
    ) -> Result<SubmissionResponse, AocError> {
        let cookie_header = Self::create_cookie_header(session)?;
        let url = self.url(&[&year.to_string(), "day", &day.to_string(), "answer"])?;
        tracing::debug!(%url, part, "submitting answer");

        let form = [("level", part.to_string()), ("answer", answer.to_string())];

        let response = self
            .client
            .post(url)
            .header("Cookie", cookie_header)
            .form(&form)
            .send()?;

        if !response.status().is_success() {
            return Err(AocError::InvalidStatus {
                status: response.status(),
            });
        }

        let html = response.text().map_err(|_| AocError::Encoding)?;
        let result = self.parser.parse_submission_response(&html);
        tracing::debug!(outcome = ?result.outcome, "submission classified");
        Ok(result)
    }
}

/// Builder for configuring an AOC HTTP client
///
/// Allows a custom base URL and HTTP client configuration while ensuring the
/// redirect policy is always set correctly for session verification.
///
/// # Example
///
/// ```no_run
/// use aocli_client::AocClient;
/// use std::time::Duration;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // Custom base URL for testing
/// let client = AocClient::builder()
///     .base_url("http://localhost:1234")?
///     .build()?;
///
/// // Custom timeout
/// let client = AocClient::builder()
///     .client_builder(
///         reqwest::blocking::Client::builder()
///             .timeout(Duration::from_secs(30))
///     )
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AocClientBuilder {
    base_url: Option<reqwest::Url>,
    client_builder: Option<reqwest::blocking::ClientBuilder>,
}

impl AocClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            base_url: None,
            client_builder: None,
        }
    }

    /// Set a custom base URL for the client
    ///
    /// Useful for testing with mock servers. The URL is validated here.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn base_url(mut self, url: impl reqwest::IntoUrl) -> Result<Self, AocError> {
        self.base_url = Some(url.into_url()?);
        Ok(self)
    }

    /// Set a custom HTTP client builder
    ///
    /// The redirect policy is always overridden to `Policy::none()` and the
    /// user agent to the client's own, whatever the builder was given.
    pub fn client_builder(mut self, builder: reqwest::blocking::ClientBuilder) -> Self {
        self.client_builder = Some(builder);
        self
    }

    /// Build the AOC client with the configured settings
    ///
    /// # Errors
    ///
    /// Returns `AocError::ClientInit` if the HTTP client cannot be initialized.
    pub fn build(self) -> Result<AocClient, AocError> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => reqwest::Url::parse("https://adventofcode.com")
                .map_err(|e| AocError::ClientInit(e.to_string()))?,
        };

        let builder = self
            .client_builder
            .unwrap_or_else(|| reqwest::blocking::Client::builder().use_rustls_tls());

        let client = builder
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AocError::ClientInit(e.to_string()))?;

        Ok(AocClient {
            client,
            base_url,
            parser: ResponseParser::new(),
        })
    }
}

impl Default for AocClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
