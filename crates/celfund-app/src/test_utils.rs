//! Scriptable [`FunnelServices`] for engine and integration tests

use std::sync::{Arc, Mutex};
use std::time::Duration;

use celfund_api::{ScrapingStats, ScrapingStatus};
use celfund_core::prelude::*;
use celfund_core::{GrantMatch, ValidForm};
use url::Url;

use crate::dashboard_state::DashboardCommand;
use crate::navigator::{Navigator, RecordingNavigator};
use crate::services::FunnelServices;

/// Canned answers for every service call, with a log of what was called
#[derive(Debug, Clone)]
pub struct FakeServices {
    matches: std::result::Result<Vec<GrantMatch>, String>,
    match_delay: Duration,
    checkout: std::result::Result<Url, String>,
    status: Option<ScrapingStatus>,
    stats: Option<ScrapingStats>,
    navigator: RecordingNavigator,
    calls: Arc<Mutex<Vec<String>>>,
}

impl Default for FakeServices {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeServices {
    /// No grants, a working checkout, and no dashboard backend
    pub fn new() -> Self {
        let checkout = Url::parse("https://checkout.example.com/session/cs_test")
            .map_err(|e| e.to_string());
        Self {
            matches: Ok(Vec::new()),
            match_delay: Duration::ZERO,
            checkout,
            status: None,
            stats: None,
            navigator: RecordingNavigator::new(),
            calls: Arc::default(),
        }
    }

    pub fn with_matches(mut self, grants: Vec<GrantMatch>) -> Self {
        self.matches = Ok(grants);
        self
    }

    pub fn failing_matches(mut self, error: impl Into<String>) -> Self {
        self.matches = Err(error.into());
        self
    }

    pub fn with_match_delay(mut self, delay: Duration) -> Self {
        self.match_delay = delay;
        self
    }

    pub fn with_checkout_url(mut self, url: Url) -> Self {
        self.checkout = Ok(url);
        self
    }

    pub fn failing_checkout(mut self, error: impl Into<String>) -> Self {
        self.checkout = Err(error.into());
        self
    }

    pub fn with_status(mut self, status: ScrapingStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_stats(mut self, stats: ScrapingStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_navigator(mut self, navigator: RecordingNavigator) -> Self {
        self.navigator = navigator;
        self
    }

    /// Shares history with the navigator the services use
    pub fn navigator(&self) -> RecordingNavigator {
        self.navigator.clone()
    }

    /// Names of the calls made so far, oldest first
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// How many times `name` was called
    pub fn call_count(&self, name: &str) -> usize {
        self.calls().iter().filter(|call| *call == name).count()
    }

    fn record(&self, name: &str) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(name.to_string());
        }
    }
}

impl FunnelServices for FakeServices {
    async fn find_matches(&self, _form: &ValidForm) -> Result<Vec<GrantMatch>> {
        self.record("find_matches");
        if !self.match_delay.is_zero() {
            tokio::time::sleep(self.match_delay).await;
        }
        self.matches.clone().map_err(Error::transport)
    }

    async fn create_checkout_session(&self, _email: &str) -> Result<Url> {
        self.record("create_checkout_session");
        self.checkout.clone().map_err(Error::transport)
    }

    async fn scraping_status(&self) -> Result<ScrapingStatus> {
        self.record("scraping_status");
        self.status
            .clone()
            .ok_or_else(|| Error::transport("connection refused"))
    }

    async fn scraping_stats(&self, _days: u32) -> Result<ScrapingStats> {
        self.record("scraping_stats");
        self.stats
            .clone()
            .ok_or_else(|| Error::transport("connection refused"))
    }

    async fn run_dashboard_command(&self, command: DashboardCommand) -> Result<String> {
        self.record("run_dashboard_command");
        Ok(format!("{} done", command.label()))
    }

    fn navigate(&self, url: &Url) -> Result<()> {
        self.record("navigate");
        self.navigator.navigate(url)
    }
}
