use crate::rate_limiter::RateLimiter;
use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Basic-auth credentials sent with every request.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub api_key: String,
}

/// HTTP client with built-in rate limiting
pub struct RateLimitedClient {
    client: Client,
    rate_limiter: RateLimiter,
    credentials: Option<Credentials>,
}

impl RateLimitedClient {
    pub fn new(user_agent: &str, timeout_secs: u64, rate_limit_ms: u64) -> Result<Self> {
        let client = Self::build_client(user_agent, timeout_secs)?;
        let rate_limiter = RateLimiter::new(rate_limit_ms);

        Ok(Self {
            client,
            rate_limiter,
            credentials: None,
        })
    }

    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = Some(credentials);
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// GET `url` and decode the body as JSON; non-2xx statuses are errors.
    pub async fn get_json(&mut self, url: &str) -> Result<Value> {
        self.rate_limiter.wait().await;
        let response = self.send_get_request(url).await?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("GET {} returned status {}", url, status);
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to decode JSON from {}", url))
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }

    async fn send_get_request(&self, url: &str) -> Result<reqwest::Response> {
        let mut request = self.client.get(url);
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.username, Some(&credentials.api_key));
        }
        request
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))
    }
}
