//! Metric fetch gateway.
//!
//! Every Compass tool is a binding of [`MetricGateway`] to one fixed endpoint
//! path. A call builds one JSON `POST`, sends it once and classifies the
//! outcome:
//!
//! - 2xx: the upstream body is returned untouched
//! - non-2xx: `{"status": <code>, "error": "HTTP Error", "details": <body>}`
//! - transport failure: `{"status": 500, "error": "Request Failed", "details": <cause>}`
//! - no token: `{"status": 401, "error": ...}` without touching the network
//!
//! Nothing is retried or cached.

mod error;

use error::{FetchError, MISSING_TOKEN_MESSAGE, MISSING_TOKEN_OR_ARGUMENT_MESSAGE};

use anyhow::{Context, Result};
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use std::sync::Arc;

use crate::config::ServerConfig;

pub const DEFAULT_DIRECTION: &str = "desc";
pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_SIZE: i64 = 10;

/// Caller-supplied query for one metric fetch.
///
/// Values are forwarded as given; dates, direction and paging are not
/// validated here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricRequest {
    pub label: String,
    pub begin_date: String,
    pub end_date: String,
    pub direction: String,
    pub page: i64,
    pub size: i64,
}

#[cfg(test)]
impl MetricRequest {
    pub fn new(
        label: impl Into<String>,
        begin_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            begin_date: begin_date.into(),
            end_date: end_date.into(),
            direction: DEFAULT_DIRECTION.to_string(),
            page: DEFAULT_PAGE,
            size: DEFAULT_SIZE,
        }
    }
}

/// Wire body. Field order is the order the upstream documents.
#[derive(Serialize)]
struct Payload<'a> {
    access_token: &'a str,
    label: &'a str,
    direction: &'a str,
    begin_date: &'a str,
    end_date: &'a str,
    page: i64,
    size: i64,
}

/// Shared HTTP gateway to the Compass API.
///
/// Cheap to clone: the client and configuration are reference counted.
#[derive(Debug, Clone)]
pub struct MetricGateway {
    client: reqwest::Client,
    config: Arc<ServerConfig>,
}

impl MetricGateway {
    pub fn new(config: Arc<ServerConfig>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            // A 3xx is an answer like any other non-2xx.
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, config })
    }

    /// Fetch `endpoint` using the configured token.
    pub async fn fetch(&self, endpoint: &str, request: &MetricRequest) -> String {
        let outcome = match self.config.access_token() {
            Some(token) => self.send(endpoint, request, token).await,
            None => Err(FetchError::MissingCredential {
                message: MISSING_TOKEN_MESSAGE,
            }),
        };
        finish(endpoint, outcome)
    }

    /// Fetch `endpoint`, preferring `explicit_token` over the configured one.
    pub async fn fetch_with_token(
        &self,
        endpoint: &str,
        request: &MetricRequest,
        explicit_token: Option<&str>,
    ) -> String {
        let token = explicit_token
            .filter(|token| !token.is_empty())
            .or_else(|| self.config.access_token());

        let outcome = match token {
            Some(token) => self.send(endpoint, request, token).await,
            None => Err(FetchError::MissingCredential {
                message: MISSING_TOKEN_OR_ARGUMENT_MESSAGE,
            }),
        };
        finish(endpoint, outcome)
    }

    async fn send(
        &self,
        endpoint: &str,
        request: &MetricRequest,
        token: &str,
    ) -> Result<String, FetchError> {
        let url = self.config.endpoint_url(endpoint);
        let payload = Payload {
            access_token: token,
            label: &request.label,
            direction: &request.direction,
            begin_date: &request.begin_date,
            end_date: &request.end_date,
            page: request.page,
            size: request.size,
        };

        log::debug!(
            "POST {url} (label={}, {}..{}, page={}, size={})",
            request.label,
            request.begin_date,
            request.end_date,
            request.page,
            request.size
        );

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .timeout(self.config.timeout())
            .json(&payload)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(&e))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(&e))?;
        let body = decode_body(endpoint, &bytes);

        if status.is_success() {
            log::debug!("{endpoint} answered {status} ({} bytes)", body.len());
            Ok(body)
        } else {
            Err(FetchError::UpstreamHttp {
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// Tool results are text, so invalid UTF-8 is replaced with U+FFFD.
fn decode_body(endpoint: &str, bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(e) => {
            log::warn!("{endpoint}: response body is not valid UTF-8 ({e}); invalid bytes replaced");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

fn finish(endpoint: &str, outcome: Result<String, FetchError>) -> String {
    match outcome {
        Ok(body) => body,
        Err(err) => {
            log::warn!("{endpoint}: {err}");
            err.to_envelope()
        }
    }
}
