use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local, SecondsFormat};
use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};

use super::mapping::{parse_events, ExternalEvent};
use super::ExternalEventSource;
use crate::models::settings::ExternalCalendarConfig;

/// Blocking HTTP client for the partner release feed.
pub struct HttpEventFetcher {
    client: Client,
    endpoint: String,
    max_response_bytes: usize,
}

impl HttpEventFetcher {
    pub fn new(endpoint: impl Into<String>, timeout: Duration, max_response_bytes: usize) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build external calendar HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            max_response_bytes,
        })
    }

    /// Build a fetcher from configuration; `None` when no endpoint is set.
    pub fn from_config(config: &ExternalCalendarConfig) -> Result<Option<Self>> {
        let Some(endpoint) = config.endpoint.as_deref() else {
            return Ok(None);
        };

        Self::new(
            endpoint.trim(),
            Duration::from_secs(config.timeout_secs),
            config.max_response_bytes,
        )
        .map(Some)
    }

    fn request_url(&self, time_min: DateTime<Local>) -> Result<Url> {
        let time_min = time_min.to_rfc3339_opts(SecondsFormat::Secs, false);
        Url::parse_with_params(&self.endpoint, &[("timeMin", time_min.as_str())])
            .context("Invalid external calendar endpoint")
    }

    fn fetch_once(&self, url: Url) -> Result<Vec<ExternalEvent>> {
        let response = self
            .client
            .get(url)
            .send()
            .context("Network error during external calendar fetch")?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(anyhow!("External calendar fetch failed with HTTP status {}", status));
        }

        if let Some(content_length) = response.content_length() {
            if content_length as usize > self.max_response_bytes {
                return Err(anyhow!(
                    "External calendar response too large ({} bytes > {} bytes)",
                    content_length,
                    self.max_response_bytes
                ));
            }
        }

        let bytes = response
            .bytes()
            .context("Failed to read external calendar response body")?;

        if bytes.len() > self.max_response_bytes {
            return Err(anyhow!(
                "External calendar response too large ({} bytes > {} bytes)",
                bytes.len(),
                self.max_response_bytes
            ));
        }

        parse_events(&bytes).context("External calendar response is not a JSON event list")
    }

    /// Strip everything but scheme and host so feed tokens never reach the log.
    pub(crate) fn redact_url(url: &str) -> String {
        match Url::parse(url) {
            Ok(parsed) => match parsed.host_str() {
                Some(host) => format!("{}://{}/***redacted***", parsed.scheme(), host),
                None => "***redacted-url***".to_string(),
            },
            Err(_) => "***redacted-url***".to_string(),
        }
    }
}

impl ExternalEventSource for HttpEventFetcher {
    fn fetch_events(&self, time_min: DateTime<Local>) -> Result<Vec<ExternalEvent>> {
        let url = self.request_url(time_min)?;
        log::debug!(
            "Fetching external calendar from {}",
            Self::redact_url(&self.endpoint)
        );

        self.fetch_once(url)
            .with_context(|| format!("Failed to fetch {}", Self::redact_url(&self.endpoint)))
    }
}
