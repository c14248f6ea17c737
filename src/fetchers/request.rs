use log::debug;
use reqwest::Client;
use std::time::Duration;

use crate::ImportError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Recipe sites often refuse unknown agents, so requests look like a desktop browser
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub struct RequestFetcher {
    client: Client,
}

impl RequestFetcher {
    pub fn new(timeout: Option<Duration>) -> Result<Self, ImportError> {
        let client = Client::builder()
            .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
            .user_agent(BROWSER_USER_AGENT)
            .build()?;

        Ok(Self { client })
    }

    /// Page body; non-2xx statuses are errors
    pub async fn fetch(&self, url: &str) -> Result<String, ImportError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        debug!("Fetched {} ({})", url, response.status());
        Ok(response.text().await?)
    }
}
