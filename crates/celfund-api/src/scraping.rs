//! Scraping-pipeline dashboard payloads
//!
//! The dashboard is a thin client: these types mirror the backend's JSON and
//! carry no behavior beyond a couple of display helpers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// First milestone tracked by the progress bars
pub const MILESTONE_GRANTS: u64 = 2_000;
/// Second milestone tracked by the progress bars
pub const TARGET_GRANTS: u64 = 5_000;

/// `GET /api/scraping/status`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScrapingStatus {
    pub system_status: SystemStatus,
    pub progress: ScrapingProgress,
    #[serde(default)]
    pub recent_sessions: Vec<RecentSession>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SystemStatus {
    pub scheduler_running: bool,
    pub session_active: bool,
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub last_session: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScrapingProgress {
    pub total_grants: u64,
    pub grants_today: u64,
    pub sessions_today: u64,
    pub estimated_days_to_2000: u64,
    pub estimated_days_to_5000: u64,
    /// Percentage over the last few sessions (0-100)
    pub success_rate: f64,
}

impl ScrapingProgress {
    /// Percent of the way to `target`, capped at 100
    pub fn percent_toward(&self, target: u64) -> f64 {
        progress_percent(self.total_grants, target)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecentSession {
    pub session_id: String,
    #[serde(default)]
    pub start_time: Option<String>,
    pub status: String,
    #[serde(default)]
    pub grants_scraped: u64,
}

/// `GET /api/scraping/stats?days=N`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScrapingStats {
    #[serde(default)]
    pub grants_by_day: Vec<DailyCount>,
    pub session_analytics: SessionAnalytics,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DailyCount {
    pub date: String,
    pub grants: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SessionAnalytics {
    pub total_sessions: u64,
    pub successful: u64,
    pub failed: u64,
    pub success_rate: f64,
    pub avg_grants_per_session: f64,
}

/// Body of `POST /api/scraping/session/start`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StartSessionRequest {
    pub grants_limit: u32,
    pub test_mode: bool,
}

impl StartSessionRequest {
    pub fn new(grants_limit: u32) -> Self {
        Self {
            grants_limit,
            test_mode: false,
        }
    }
}

/// Scheduler control verbs accepted by `POST /api/scraping/scheduler/control`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerAction {
    Start,
    Stop,
    Pause,
    Resume,
}

impl SchedulerAction {
    pub const ALL: [SchedulerAction; 4] = [
        SchedulerAction::Start,
        SchedulerAction::Stop,
        SchedulerAction::Pause,
        SchedulerAction::Resume,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SchedulerAction::Start => "start",
            SchedulerAction::Stop => "stop",
            SchedulerAction::Pause => "pause",
            SchedulerAction::Resume => "resume",
        }
    }
}

impl fmt::Display for SchedulerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct SchedulerControl {
    pub action: SchedulerAction,
}

/// Generic acknowledgement returned by session and scheduler commands
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommandResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl CommandResponse {
    /// Text suitable for a one-line notice
    pub fn summary(&self) -> String {
        match &self.message {
            Some(message) if !message.is_empty() => message.clone(),
            _ => self.status.replace('_', " "),
        }
    }
}

/// `DELETE /api/scraping/grants/duplicates`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DuplicatesRemoved {
    pub removed_count: u64,
    #[serde(default)]
    pub duplicate_groups_found: u64,
}

/// `min(current / target * 100, 100)`; a zero target counts as complete
pub fn progress_percent(current: u64, target: u64) -> f64 {
    if target == 0 {
        return 100.0;
    }
    (current as f64 / target as f64 * 100.0).min(100.0)
}
