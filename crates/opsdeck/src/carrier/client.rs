//! HTTP client for the carrier tracking API.
//!
//! One outbound POST per lookup, no retries and no caching. Any transport,
//! HTTP-status, or body-parse failure surfaces as a [`CarrierError`] and the
//! caller never partially applies a failed fetch.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use super::error::{CarrierError, Result};
use super::types::{TrackRequest, TrackResponse, TrackingEvent};

/// Production track endpoint.
pub const DEFAULT_TRACK_URL: &str = "https://trackapi.thailandpost.co.th/post/api/v1/track";

/// Default connect timeout for HTTP requests (10 seconds).
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default request timeout for HTTP requests (30 seconds).
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum length for error bodies carried in errors, to keep logs bounded.
const MAX_ERROR_BODY_LENGTH: usize = 200;

/// Truncates an error response body to a loggable length.
fn sanitize_error_body(body: &str) -> String {
    if body.len() > MAX_ERROR_BODY_LENGTH {
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated)", &body[..end])
    } else {
        body.to_string()
    }
}

/// The seam between the refresh pipeline and the carrier network call.
///
/// Implemented by [`CarrierClient`] in production and by scripted stubs in
/// tests.
#[async_trait]
pub trait TrackingProvider: Send + Sync {
    /// Looks up all tracking events for one tracking number.
    ///
    /// `token_override` replaces the configured default credential for this
    /// call only (per-owner tokens come from the settings table).
    async fn track(
        &self,
        tracking_number: &str,
        token_override: Option<&str>,
    ) -> Result<Vec<TrackingEvent>>;
}

/// Carrier tracking API client.
pub struct CarrierClient {
    client: Client,
    track_url: String,
    default_token: SecretString,
}

impl CarrierClient {
    /// Creates a client against the production endpoint.
    pub fn new(default_token: SecretString) -> Result<Self> {
        Self::with_track_url(DEFAULT_TRACK_URL.to_string(), default_token)
    }

    /// Creates a client against a custom endpoint (used by tests).
    pub fn with_track_url(track_url: String, default_token: SecretString) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            track_url,
            default_token,
        })
    }
}

#[async_trait]
impl TrackingProvider for CarrierClient {
    async fn track(
        &self,
        tracking_number: &str,
        token_override: Option<&str>,
    ) -> Result<Vec<TrackingEvent>> {
        let body = TrackRequest {
            status: "all",
            language: "EN",
            barcode: vec![tracking_number],
        };

        info!("Fetching tracking events for {}", tracking_number);

        let token = match token_override {
            Some(t) => t,
            None => self.default_token.expose_secret(),
        };

        let response = self
            .client
            .post(&self.track_url)
            .header("Authorization", token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(CarrierError::Status {
                status,
                body: sanitize_error_body(&body),
            });
        }

        let parsed: TrackResponse = response
            .json()
            .await
            .map_err(|e| CarrierError::Parse(e.to_string()))?;

        let events = parsed.events_for(tracking_number);
        debug!(
            "Carrier returned {} event(s) for {}",
            events.len(),
            tracking_number
        );

        Ok(events)
    }
}
