//! Content fetching from URLs, files, and stdin.
//!
//! The extraction engine never fetches anything itself. Callers hand it HTML
//! obtained through an [`HtmlSource`]; [`HttpFetcher`] is the stock
//! implementation and enforces the scheme check, the domain allow-list and
//! its own timeout before a request leaves the process.

use std::convert::Infallible;
use std::fs;
use std::future::Future;
use std::path::PathBuf;
use std::str::FromStr;

use url::Url;

use crate::{GleanError, Result};

/// Hosts a fetcher may contact.
///
/// An empty list allows every host. Otherwise a host is allowed when it
/// equals an entry or is a subdomain of one.
///
/// # Example
///
/// ```rust
/// use gleaner_core::fetch::AllowList;
///
/// let list: AllowList = "example.com, news.org".parse().unwrap();
/// assert!(list.allows("www.example.com"));
/// assert!(!list.allows("badexample.com"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    domains: Vec<String>,
}

impl AllowList {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let domains = domains
            .into_iter()
            .map(|d| d.as_ref().trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|d| !d.is_empty())
            .collect();
        Self { domains }
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    pub fn allows(&self, host: &str) -> bool {
        if self.domains.is_empty() {
            return true;
        }

        let host = host.trim_end_matches('.').to_ascii_lowercase();
        self.domains.iter().any(|domain| {
            host == *domain || host.strip_suffix(domain.as_str()).is_some_and(|prefix| prefix.ends_with('.'))
        })
    }
}

/// Parses a comma-separated list of domains.
impl FromStr for AllowList {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::new(s.split(',')))
    }
}

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
    pub max_redirects: usize,
    pub allowed_domains: AllowList,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            user_agent: "Mozilla/5.0 (compatible; Gleaner/0.1)".to_string(),
            max_redirects: 5,
            allowed_domains: AllowList::default(),
        }
    }
}

/// Anything that can turn a URL into raw HTML.
pub trait HtmlSource: Send + Sync + 'static {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Validates `url` and checks its host against `allowed`.
///
/// # Errors
///
/// [`GleanError::InvalidUrl`] for unparseable URLs and schemes other than
/// `http`/`https`, [`GleanError::DomainNotAllowed`] for hosts off the list.
pub fn validate_url(url: &str, allowed: &AllowList) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| GleanError::InvalidUrl(format!("{url}: {e}")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(GleanError::InvalidUrl(format!("unsupported scheme: {}", parsed.scheme())));
    }

    let host = parsed
        .host_str()
        .ok_or_else(|| GleanError::InvalidUrl(format!("{url}: missing host")))?;

    if !allowed.allows(host) {
        return Err(GleanError::DomainNotAllowed(host.to_string()));
    }

    Ok(parsed)
}

/// [`HtmlSource`] backed by a shared reqwest client.
#[cfg(feature = "fetch")]
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    config: FetchConfig,
}

#[cfg(feature = "fetch")]
impl HttpFetcher {
    /// Builds the client once; it is reused for every request.
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetches HTML content from a URL.
    ///
    /// Sends browser-like `Accept` headers and fails on non-success statuses.
    pub async fn fetch_url(&self, url: &str) -> Result<String> {
        let parsed = validate_url(url, &self.config.allowed_domains)?;

        let response = self
            .client
            .get(parsed)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GleanError::UpstreamStatus { status: status.as_u16() });
        }

        response.text().await.map_err(|e| self.classify(e))
    }

    fn classify(&self, err: reqwest::Error) -> GleanError {
        if err.is_timeout() { GleanError::Timeout { timeout: self.config.timeout } } else { GleanError::HttpError(err) }
    }
}

#[cfg(feature = "fetch")]
impl HtmlSource for HttpFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String>> + Send {
        self.fetch_url(url)
    }
}

/// Reads HTML content from a local file.
///
/// Callers should validate and sanitize the path when accepting user input.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(GleanError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(GleanError::from)
    }
}

/// Reads HTML content from standard input.
///
/// This function reads all available input from stdin until EOF.
/// Useful for piping content from other commands.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(GleanError::from)?;

    Ok(buffer)
}
