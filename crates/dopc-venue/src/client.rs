//! HTTP client for the venue data service.
//!
//! Every venue exposes two documents under the configured base URL:
//! `/{slug}/static` (location) and `/{slug}/dynamic` (delivery pricing).
//! Non-2xx answers surface as [`VenueError::UnexpectedStatus`] carrying the
//! upstream status and body.

use std::time::Duration;

use dopc_core::{
    AppConfig, DeliveryPricingSpec, VenueLocation, VenueSource, VenueSourceError,
};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::VenueError;
use crate::retry::retry_with_backoff;
use crate::types::{DynamicVenueResponse, StaticVenueResponse};

#[derive(Debug, Clone, Copy)]
enum Document {
    Static,
    Dynamic,
}

impl Document {
    fn path_segment(self) -> &'static str {
        match self {
            Document::Static => "static",
            Document::Dynamic => "dynamic",
        }
    }

    fn context(self) -> &'static str {
        match self {
            Document::Static => "static venue data",
            Document::Dynamic => "dynamic venue data",
        }
    }
}

/// Client for the venue data service.
///
/// Construct with [`VenueClient::new`] (or [`VenueClient::from_app_config`])
/// and point it at a mock server in tests.
#[derive(Debug, Clone)]
pub struct VenueClient {
    client: Client,
    base_url: Url,
    /// Additional attempts after the first failure, for transient errors only.
    max_retries: u32,
    backoff_base_ms: u64,
}

impl VenueClient {
    /// Creates a client without retries.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`VenueError::InvalidBaseUrl`] if
    /// `base_url` cannot be used as a URL base.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, VenueError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(5)))
            .user_agent(user_agent)
            .build()?;

        let invalid = |reason: String| VenueError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason,
        };
        let parsed = Url::parse(base_url.trim_end_matches('/')).map_err(|e| invalid(e.to_string()))?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid("expected an http(s) URL".to_owned()));
        }

        Ok(Self {
            client,
            base_url: parsed,
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    /// Builds a client from the `DOPC_VENUE_*` settings.
    ///
    /// # Errors
    ///
    /// See [`VenueClient::new`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, VenueError> {
        Ok(Self::new(
            &config.venue_api_base_url,
            config.venue_request_timeout_secs,
            &config.venue_user_agent,
        )?
        .with_retries(config.venue_max_retries, config.venue_retry_backoff_base_ms))
    }

    /// Enables retrying transient failures with exponential back-off.
    #[must_use]
    pub fn with_retries(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Fetches `/{slug}/static`.
    ///
    /// # Errors
    ///
    /// - [`VenueError::UnexpectedStatus`] on a non-2xx answer.
    /// - [`VenueError::Http`] on network failure.
    /// - [`VenueError::Deserialize`] if required fields are missing.
    pub async fn fetch_static(&self, venue_slug: &str) -> Result<StaticVenueResponse, VenueError> {
        self.fetch_document(venue_slug, Document::Static).await
    }

    /// Fetches `/{slug}/dynamic`.
    ///
    /// # Errors
    ///
    /// Same as [`VenueClient::fetch_static`].
    pub async fn fetch_dynamic(
        &self,
        venue_slug: &str,
    ) -> Result<DynamicVenueResponse, VenueError> {
        self.fetch_document(venue_slug, Document::Dynamic).await
    }

    /// Builds `{base}/{slug}/{document}` with the slug percent-encoded as a
    /// single path segment.
    fn document_url(&self, venue_slug: &str, document: Document) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(venue_slug)
                .push(document.path_segment());
        }
        url
    }

    async fn fetch_document<T>(&self, venue_slug: &str, document: Document) -> Result<T, VenueError>
    where
        T: DeserializeOwned + Send,
    {
        let url = self.document_url(venue_slug, document);
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                tracing::debug!(%url, "fetching venue data");
                let response = self.client.get(url.clone()).send().await?;
                let status = response.status();

                if !status.is_success() {
                    let body = response.text().await.unwrap_or_default();
                    return Err(VenueError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                        body,
                    });
                }

                let body = response.text().await?;
                serde_json::from_str::<T>(&body).map_err(|e| VenueError::Deserialize {
                    context: document.context().to_owned(),
                    source: e,
                })
            }
        })
        .await
    }
}

impl VenueSource for VenueClient {
    async fn venue_location(&self, venue_slug: &str) -> Result<VenueLocation, VenueSourceError> {
        let payload = self.fetch_static(venue_slug).await?;
        Ok(payload.into_location()?)
    }

    async fn delivery_pricing(
        &self,
        venue_slug: &str,
    ) -> Result<DeliveryPricingSpec, VenueSourceError> {
        let payload = self.fetch_dynamic(venue_slug).await?;
        Ok(payload.into_pricing_spec()?)
    }
}
