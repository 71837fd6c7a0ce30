use async_trait::async_trait;
use reqwest::Client;
use shared::{Error, Result};
use std::time::Duration;
use tracing::{debug, error};
use waitlist::domain::{SegmentPage, SubscriberPayload};
use waitlist::ports::{SegmentListing, SubscriberUpsert};

/// Production Flodesk REST API root.
pub const DEFAULT_API_URL: &str = "https://api.flodesk.com/v1";

/// Bound on each API round-trip; the provider sits on the hot path of a
/// visitor-facing request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Flodesk REST client backing the segment listing and subscriber ports.
///
/// Authenticates with HTTP Basic auth: the API key as username, empty
/// password.
pub struct FlodeskClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl FlodeskClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_API_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::MissingCredential);
        }

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| Error::Internal(err.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl SegmentListing for FlodeskClient {
    async fn fetch_page(&self, page: u32, per_page: u32) -> Result<SegmentPage> {
        let url = format!(
            "{}/segments?page={}&per_page={}",
            self.base_url, page, per_page
        );
        debug!(%url, "fetching segment listing page");

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.api_key, Some(""))
            .send()
            .await
            .map_err(|err| Error::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ProviderStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|err| Error::Transport(err.to_string()))?;
        let value: serde_json::Value = serde_json::from_str(&body)
            .map_err(|err| Error::MalformedResponse(err.to_string()))?;

        // A valid JSON body that is not the expected page shape ends the
        // listing rather than failing the whole lookup
        Ok(serde_json::from_value(value).unwrap_or_default())
    }
}

#[async_trait]
impl SubscriberUpsert for FlodeskClient {
    async fn upsert(&self, subscriber: &SubscriberPayload) -> Result<()> {
        let url = format!("{}/subscribers", self.base_url);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.api_key, Some(""))
            .json(subscriber)
            .send()
            .await
            .map_err(|err| Error::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), %body, "Flodesk subscriber upsert failed");
            return Err(Error::ProviderStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
