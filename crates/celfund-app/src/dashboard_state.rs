//! Scraping dashboard view state

use celfund_api::{SchedulerAction, ScrapingStats, ScrapingStatus};
use chrono::{DateTime, Local};

/// Dashboard tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardTab {
    #[default]
    Overview,
    Control,
    Statistics,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 3] = [
        DashboardTab::Overview,
        DashboardTab::Control,
        DashboardTab::Statistics,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DashboardTab::Overview => "Overview",
            DashboardTab::Control => "Control",
            DashboardTab::Statistics => "Statistics",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            DashboardTab::Overview => 0,
            DashboardTab::Control => 1,
            DashboardTab::Statistics => 2,
        }
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// A control command issued from the Control tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardCommand {
    StartSession { grants_limit: u32 },
    StopSession,
    Scheduler(SchedulerAction),
    RemoveDuplicates,
}

impl DashboardCommand {
    /// Commands in the order the Control tab lists them
    pub fn controls(grants_limit: u32) -> Vec<DashboardCommand> {
        let mut controls = vec![
            DashboardCommand::StartSession { grants_limit },
            DashboardCommand::StopSession,
        ];
        controls.extend(SchedulerAction::ALL.map(DashboardCommand::Scheduler));
        controls.push(DashboardCommand::RemoveDuplicates);
        controls
    }

    pub fn label(&self) -> String {
        match self {
            DashboardCommand::StartSession { grants_limit } => {
                format!("Start session ({} grants)", grants_limit)
            }
            DashboardCommand::StopSession => "Stop session".to_string(),
            DashboardCommand::Scheduler(action) => match action {
                SchedulerAction::Start => "Start scheduler".to_string(),
                SchedulerAction::Stop => "Stop scheduler".to_string(),
                SchedulerAction::Pause => "Pause scheduler".to_string(),
                SchedulerAction::Resume => "Resume scheduler".to_string(),
            },
            DashboardCommand::RemoveDuplicates => "Remove duplicate grants".to_string(),
        }
    }

    /// Destructive commands ask y/n first
    pub fn needs_confirmation(&self) -> bool {
        matches!(self, DashboardCommand::RemoveDuplicates)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub tab: DashboardTab,
    pub status: Option<ScrapingStatus>,
    pub stats: Option<ScrapingStats>,
    /// First status fetch not answered yet
    pub loading: bool,
    /// Most recent fetch failure, cleared on the next success
    pub last_error: Option<String>,
    /// Outcome of the last command
    pub notice: Option<String>,
    /// Command awaiting y/n
    pub pending_confirm: Option<DashboardCommand>,
    pub command_in_flight: bool,
    /// Highlighted row on the Control tab
    pub selected_control: usize,
    pub last_updated: Option<DateTime<Local>>,
}

impl DashboardState {
    /// Reset transient state when the dashboard is (re)entered
    pub fn enter(&mut self) {
        self.loading = self.status.is_none();
        self.pending_confirm = None;
        self.notice = None;
    }

    pub fn select_next_control(&mut self, count: usize) {
        if count > 0 {
            self.selected_control = (self.selected_control + 1) % count;
        }
    }

    pub fn select_prev_control(&mut self, count: usize) {
        if count > 0 {
            self.selected_control = (self.selected_control + count - 1) % count;
        }
    }
}
