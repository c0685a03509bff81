//! Configuration types for CelFund
//!
//! Every section is optional in the file; missing keys take the defaults
//! below.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Application settings (`celfund.toml`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub matching: MatchingSettings,

    #[serde(default)]
    pub upsell: UpsellSettings,

    #[serde(default)]
    pub dashboard: DashboardSettings,

    #[serde(default)]
    pub behavior: BehaviorSettings,
}

/// Backend connection
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Upper bound on every backend request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ApiSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Where grant matches and checkout sessions come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Call the backend
    #[default]
    Live,
    /// Static catalogue and a local test checkout URL
    Mock,
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::Live => write!(f, "live"),
            StrategyKind::Mock => write!(f, "mock"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MatchingSettings {
    #[serde(default)]
    pub strategy: StrategyKind,

    /// Simulated latency of the mock strategy
    #[serde(default = "default_mock_delay_ms")]
    pub mock_delay_ms: u64,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            mock_delay_ms: default_mock_delay_ms(),
        }
    }
}

impl MatchingSettings {
    pub fn mock_delay(&self) -> Duration {
        Duration::from_millis(self.mock_delay_ms)
    }
}

fn default_mock_delay_ms() -> u64 {
    2000
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UpsellSettings {
    /// Card interactions needed before the upgrade modal opens
    #[serde(default = "default_interaction_threshold")]
    pub interaction_threshold: u32,
}

impl Default for UpsellSettings {
    fn default() -> Self {
        Self {
            interaction_threshold: default_interaction_threshold(),
        }
    }
}

fn default_interaction_threshold() -> u32 {
    2
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DashboardSettings {
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Window for the statistics tab
    #[serde(default = "default_stats_days")]
    pub stats_days: u32,

    /// `grants_limit` sent when starting a manual session
    #[serde(default = "default_session_grants_limit")]
    pub session_grants_limit: u32,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            stats_days: default_stats_days(),
            session_grants_limit: default_session_grants_limit(),
        }
    }
}

impl DashboardSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }
}

fn default_poll_interval_secs() -> u64 {
    10
}

fn default_stats_days() -> u32 {
    7
}

fn default_session_grants_limit() -> u32 {
    20
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BehaviorSettings {
    /// Browser command for opening URLs. Empty = system default.
    #[serde(default)]
    pub browser: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.api.base_url, "http://localhost:8000");
        assert_eq!(settings.api.request_timeout(), Duration::from_secs(30));
        assert_eq!(settings.matching.strategy, StrategyKind::Live);
        assert_eq!(settings.matching.mock_delay_ms, 2000);
        assert_eq!(settings.upsell.interaction_threshold, 2);
        assert_eq!(settings.dashboard.poll_interval(), Duration::from_secs(10));
        assert_eq!(settings.dashboard.stats_days, 7);
        assert_eq!(settings.dashboard.session_grants_limit, 20);
        assert!(settings.behavior.browser.is_empty());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [matching]
            strategy = "mock"

            [api]
            base_url = "https://api.celfund.example"
            "#,
        )
        .unwrap();

        assert_eq!(settings.matching.strategy, StrategyKind::Mock);
        assert_eq!(settings.matching.mock_delay_ms, 2000);
        assert_eq!(settings.api.base_url, "https://api.celfund.example");
        assert_eq!(settings.api.request_timeout_secs, 30);
    }

    #[test]
    fn test_zero_intervals_are_clamped() {
        let settings: Settings = toml::from_str(
            r#"
            [api]
            request_timeout_secs = 0
            [dashboard]
            poll_interval_secs = 0
            "#,
        )
        .unwrap();
        assert_eq!(settings.api.request_timeout(), Duration::from_secs(1));
        assert_eq!(settings.dashboard.poll_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        let result: Result<Settings, _> = toml::from_str("[matching]\nstrategy = \"magic\"\n");
        assert!(result.is_err());
    }
}
