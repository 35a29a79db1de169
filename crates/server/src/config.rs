//! Command-line and environment configuration for the HTTP service.

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use gleaner_core::{AllowList, ExtractorConfig, FetchConfig};

/// Slack added on top of the fetch and extraction budgets for the whole request.
const REQUEST_SLACK_SECS: u64 = 15;

/// HTTP service extracting article content and news metadata from URLs
#[derive(Parser, Debug, Clone)]
#[command(name = "gleaner-server")]
#[command(version, about, long_about = None)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "GLEANER_BIND", default_value = "127.0.0.1:4000", value_name = "ADDR")]
    pub bind: SocketAddr,

    /// Comma-separated domains the service may fetch (empty: any)
    #[arg(long, env = "GLEANER_ALLOWED_DOMAINS", value_name = "LIST")]
    pub allowed_domains: Option<AllowList>,

    /// Upstream fetch timeout in seconds
    #[arg(long, env = "GLEANER_FETCH_TIMEOUT", default_value_t = 30, value_name = "SECS")]
    pub fetch_timeout: u64,

    /// Readability plan timeout in seconds
    #[arg(long, env = "GLEANER_EXTRACT_TIMEOUT", default_value_t = 30, value_name = "SECS")]
    pub extract_timeout: u64,

    /// User-Agent sent upstream
    #[arg(long, env = "GLEANER_USER_AGENT", value_name = "UA")]
    pub user_agent: Option<String>,
}

impl ServerConfig {
    pub fn fetch_config(&self) -> FetchConfig {
        let defaults = FetchConfig::default();
        FetchConfig {
            timeout: self.fetch_timeout,
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
            allowed_domains: self.allowed_domains.clone().unwrap_or_default(),
            ..defaults
        }
    }

    /// The cascade deadline keeps its default margin over the readability budget.
    pub fn extractor_config(&self) -> ExtractorConfig {
        let readability_timeout = Duration::from_secs(self.extract_timeout);
        let defaults = ExtractorConfig::default();
        let margin = defaults.deadline.saturating_sub(defaults.readability_timeout);

        ExtractorConfig::builder()
            .readability_timeout(readability_timeout)
            .deadline(readability_timeout + margin)
            .build()
    }

    /// Upper bound for one request: fetch, extraction deadline and some slack.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout + REQUEST_SLACK_SECS) + self.extractor_config().deadline
    }
}
