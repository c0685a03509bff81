//! Grant matching strategies
//!
//! The live strategy asks the backend; the mock strategy returns the static
//! catalogue after a simulated delay. Both sit behind [`GrantSource`](super::GrantSource).

use std::time::Duration;

use celfund_api::{ApiClient, MatchRequest};
use celfund_core::prelude::*;
use celfund_core::{mock_grants, GrantMatch, ValidForm};

use super::GrantSource;

/// Calls `POST /api/match`
#[derive(Debug, Clone)]
pub struct LiveGrantSource {
    client: ApiClient,
}

impl LiveGrantSource {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl GrantSource for LiveGrantSource {
    async fn find_matches(&self, form: &ValidForm) -> Result<Vec<GrantMatch>> {
        let outcome = self.client.match_grants(&MatchRequest::from(form)).await?;
        if let Some(id) = &outcome.submission_id {
            debug!("Backend stored submission {}", id);
        }
        Ok(outcome.grants)
    }
}

/// Static catalogue with simulated latency
#[derive(Debug, Clone)]
pub struct MockGrantSource {
    delay: Duration,
}

impl MockGrantSource {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl GrantSource for MockGrantSource {
    async fn find_matches(&self, form: &ValidForm) -> Result<Vec<GrantMatch>> {
        debug!(
            "Mock matching for focus={} after {:?}",
            form.focus_area, self.delay
        );
        tokio::time::sleep(self.delay).await;
        Ok(mock_grants())
    }
}

/// Grant source selected by `[matching] strategy`
#[derive(Debug, Clone)]
pub enum MatchStrategy {
    Live(LiveGrantSource),
    Mock(MockGrantSource),
}

impl GrantSource for MatchStrategy {
    async fn find_matches(&self, form: &ValidForm) -> Result<Vec<GrantMatch>> {
        match self {
            MatchStrategy::Live(source) => source.find_matches(form).await,
            MatchStrategy::Mock(source) => source.find_matches(form).await,
        }
    }
}
