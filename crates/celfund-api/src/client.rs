//! Typed HTTP client for the CelFund backend

use std::time::Duration;

use celfund_core::prelude::*;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::protocol::{
    parse_checkout_response, parse_match_response, CheckoutRequest, MatchOutcome, MatchRequest,
};
use crate::scraping::{
    CommandResponse, DuplicatesRemoved, SchedulerAction, SchedulerControl, ScrapingStats,
    ScrapingStatus, StartSessionRequest,
};

/// Default bound applied to every request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest body excerpt carried in an [`Error::Http`]
const BODY_EXCERPT_CHARS: usize = 200;

/// FastAPI error body (`HTTPException`)
#[derive(Debug, Deserialize)]
struct ErrorDetail {
    detail: String,
}

/// Client for the matching, checkout, and scraping endpoints.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl ApiClient {
    /// Build a client rooted at `base_url` (e.g. `http://localhost:8000`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| Error::config(format!("invalid API base URL {:?}: {}", base_url, e)))?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "API base URL must be http or https, got {:?}",
                base_url.scheme()
            )));
        }

        // Url::join replaces the last segment unless the path ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolve an endpoint path against the base URL
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::config(format!("invalid endpoint {:?}: {}", path, e)))
    }

    // ─────────────────────────────────────────────────────────
    // Funnel
    // ─────────────────────────────────────────────────────────

    /// `POST /api/match`
    pub async fn match_grants(&self, request: &MatchRequest) -> Result<MatchOutcome> {
        let url = self.endpoint("api/match")?;
        let (status, body) = self.send(self.http.post(url).json(request)).await?;

        match parse_match_response(&body) {
            Ok(outcome) if status.is_success() => Ok(outcome),
            Ok(_) => Err(http_error(status, &body)),
            Err(err @ Error::Rejected { .. }) => Err(err),
            Err(_) if !status.is_success() => Err(http_error(status, &body)),
            Err(err) => Err(err),
        }
    }

    /// `POST /api/create-checkout-session`, returning the redirect target
    pub async fn create_checkout_session(&self, email: &str) -> Result<Url> {
        let url = self.endpoint("api/create-checkout-session")?;
        let request = CheckoutRequest {
            email: email.to_string(),
        };
        let (status, body) = self.send(self.http.post(url).json(&request)).await?;

        match parse_checkout_response(&body) {
            Ok(url) if status.is_success() => Ok(url),
            Ok(_) => Err(http_error(status, &body)),
            Err(err @ Error::Rejected { .. }) => Err(err),
            Err(_) if !status.is_success() => Err(http_error(status, &body)),
            Err(err) => Err(err),
        }
    }

    // ─────────────────────────────────────────────────────────
    // Scraping dashboard
    // ─────────────────────────────────────────────────────────

    pub async fn scraping_status(&self) -> Result<ScrapingStatus> {
        let url = self.endpoint("api/scraping/status")?;
        self.fetch(self.http.get(url)).await
    }

    pub async fn scraping_stats(&self, days: u32) -> Result<ScrapingStats> {
        let url = self.endpoint("api/scraping/stats")?;
        self.fetch(self.http.get(url).query(&[("days", days)])).await
    }

    pub async fn start_session(&self, request: &StartSessionRequest) -> Result<CommandResponse> {
        let url = self.endpoint("api/scraping/session/start")?;
        self.fetch(self.http.post(url).json(request)).await
    }

    pub async fn stop_session(&self) -> Result<CommandResponse> {
        let url = self.endpoint("api/scraping/session/stop")?;
        self.fetch(self.http.post(url)).await
    }

    pub async fn control_scheduler(&self, action: SchedulerAction) -> Result<CommandResponse> {
        let url = self.endpoint("api/scraping/scheduler/control")?;
        self.fetch(self.http.post(url).json(&SchedulerControl { action }))
            .await
    }

    pub async fn remove_duplicates(&self) -> Result<DuplicatesRemoved> {
        let url = self.endpoint("api/scraping/grants/duplicates")?;
        self.fetch(self.http.delete(url)).await
    }

    // ─────────────────────────────────────────────────────────
    // Plumbing
    // ─────────────────────────────────────────────────────────

    /// Send a request and read the whole body, whatever the status
    async fn send(&self, request: RequestBuilder) -> Result<(StatusCode, String)> {
        let response = request.send().await.map_err(|e| self.map_reqwest(e))?;
        let status = response.status();
        debug!("{} {}", status.as_u16(), response.url());

        let body = response.text().await.map_err(|e| self.map_reqwest(e))?;
        Ok((status, body))
    }

    /// Send a request and decode a 2xx JSON body into `T`
    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let (status, body) = self.send(request).await?;
        if !status.is_success() {
            return Err(http_error(status, &body));
        }
        serde_json::from_str(&body).map_err(|e| Error::protocol(e.to_string()))
    }

    fn map_reqwest(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                secs: self.timeout.as_secs(),
            }
        } else {
            Error::transport(err.to_string())
        }
    }
}

/// Build an HTTP error, preferring a FastAPI `detail` message over raw body
fn http_error(status: StatusCode, body: &str) -> Error {
    let message = match serde_json::from_str::<ErrorDetail>(body) {
        Ok(detail) => detail.detail,
        Err(_) => body.chars().take(BODY_EXCERPT_CHARS).collect(),
    };
    Error::http(status.as_u16(), message)
}
