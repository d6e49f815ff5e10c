use crate::Error;
use std::time::Duration;
use url::Url;

/// The collection endpoint of version 1 of the measurement protocol.
pub const COLLECT_URL: &str = "https://www.google-analytics.com/collect";

/// The hit validation endpoint, which checks hits without recording them.
pub const DEBUG_URL: &str = "https://www.google-analytics.com/debug/collect";

#[derive(Clone, Debug, clap::Args)]
#[command(next_help_heading = "Universal Analytics configuration")]
pub struct TrackerConfig {
    /// Endpoint hits are sent to.
    #[arg(long = "collect-url", env = "UA_COLLECT_URL", default_value = COLLECT_URL)]
    pub collect_url: Url,

    /// Endpoint hits are validated against.
    #[arg(long = "debug-url", env = "UA_DEBUG_URL", default_value = DEBUG_URL)]
    pub debug_url: Url,

    /// Timeout of a single request.
    #[arg(long = "timeout", env = "UA_TIMEOUT", default_value = "30s")]
    pub timeout: humantime::Duration,
}

impl TrackerConfig {
    pub fn new(collect_url: Url, debug_url: Url) -> Self {
        Self {
            collect_url,
            debug_url,
            timeout: Duration::from_secs(30).into(),
        }
    }

    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        log::debug!("Building HTTP client, timeout: {}", self.timeout);
        Ok(reqwest::Client::builder().timeout(*self.timeout).build()?)
    }
}
