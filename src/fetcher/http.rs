use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::app::{ForumError, Result};
use crate::fetcher::Transport;

pub const USER_AGENT: &str = "pcxforum-cli";

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a client with the fixed user agent. `ignore_ssl` disables TLS
    /// certificate verification for the whole session, not per call.
    pub fn new(ignore_ssl: bool) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .user_agent(USER_AGENT)
            .danger_accept_invalid_certs(ignore_ssl)
            .build()
            .expect("Failed to build HTTP client");

        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(false)
    }
}

fn require_ok(url: &str, status: StatusCode) -> Result<()> {
    if status != StatusCode::OK {
        return Err(ForumError::Fetch {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(())
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        require_ok(url, response.status())?;
        Ok(response.text().await?)
    }

    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<String> {
        let response = self.client.post(url).form(form).send().await?;
        require_ok(url, response.status())?;
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_ok_status_is_a_fetch_error() {
        let err = require_ok("https://example.com/x", StatusCode::NOT_FOUND).unwrap_err();
        match err {
            ForumError::Fetch { url, status } => {
                assert_eq!(url, "https://example.com/x");
                assert_eq!(status, 404);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_ok_status_passes() {
        assert!(require_ok("https://example.com/x", StatusCode::OK).is_ok());
    }
}
