//! Application state (Model in TEA pattern)

use std::collections::BTreeSet;
use std::fmt;

use celfund_core::{FocusArea, FormField, FormState, GrantMatch};
use url::Url;

use crate::config::Settings;
use crate::dashboard_state::DashboardState;
use crate::upsell::{InteractionCounter, UpgradeModalState};

/// Identifies one asynchronous request so late completions can be discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle of the whole application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    /// Browser sent to checkout; the funnel is over
    Redirected,
    Quitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Landing,
    Dashboard,
}

/// Keyboard focus on the landing page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingFocus {
    Field(FormField),
    Submit,
    Results,
}

impl Default for LandingFocus {
    fn default() -> Self {
        LandingFocus::Field(FormField::ProjectSummary)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    /// Nothing submitted yet
    #[default]
    Idle,
    Loading { request_id: RequestId },
    /// Results are on screen
    Complete,
}

/// Where the displayed grants came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultSource {
    /// Returned by the active grant source
    Matched,
    /// Generated locally from templates
    #[default]
    Templates,
}

impl ResultSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultSource::Matched => "matched",
            ResultSource::Templates => "templates",
        }
    }
}

/// Qualifying actions on a result card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardInteraction {
    View,
    Copy,
    Save,
}

impl CardInteraction {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardInteraction::View => "view",
            CardInteraction::Copy => "copy",
            CardInteraction::Save => "save",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsState {
    pub grants: Vec<GrantMatch>,
    pub source: ResultSource,
    /// Focus area of the submission the results belong to
    pub focus_area: Option<FocusArea>,
    /// Highlighted card
    pub selected: usize,
    /// Ids of saved grants
    pub saved: BTreeSet<u32>,
}

impl ResultsState {
    pub fn selected_grant(&self) -> Option<&GrantMatch> {
        self.grants.get(self.selected)
    }

    pub fn is_saved(&self, grant_id: u32) -> bool {
        self.saved.contains(&grant_id)
    }

    pub fn select_next(&mut self) {
        if !self.grants.is_empty() {
            self.selected = (self.selected + 1) % self.grants.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.grants.is_empty() {
            self.selected = (self.selected + self.grants.len() - 1) % self.grants.len();
        }
    }

    /// Replace the displayed list.
    ///
    /// Ids are only unique within one list, so saved ids are cleared too.
    pub fn replace(&mut self, grants: Vec<GrantMatch>, source: ResultSource) {
        self.grants = grants;
        self.source = source;
        self.selected = 0;
        self.saved.clear();
    }
}

/// Complete application state
#[derive(Debug)]
pub struct AppState {
    pub phase: AppPhase,
    pub screen: Screen,

    // ─────────────────────────────────────────────────────────
    // Landing page
    // ─────────────────────────────────────────────────────────
    pub form: FormState,
    pub focus: LandingFocus,
    pub submission: SubmissionStatus,
    pub results: ResultsState,
    /// Why the last match fell back to templates
    pub last_match_error: Option<String>,

    // ─────────────────────────────────────────────────────────
    // Upgrade funnel
    // ─────────────────────────────────────────────────────────
    pub interactions: InteractionCounter,
    pub last_interaction: Option<CardInteraction>,
    pub upgrade: UpgradeModalState,
    pub last_checkout_error: Option<String>,
    /// Set once the browser has been sent to checkout
    pub redirected_to: Option<Url>,

    pub dashboard: DashboardState,

    /// One-line feedback ("Copied to clipboard", ...)
    pub notice: Option<String>,

    /// Frame counter for spinners
    pub tick: u64,

    pub settings: Settings,

    next_request_id: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            phase: AppPhase::default(),
            screen: Screen::default(),
            form: FormState::new(),
            focus: LandingFocus::default(),
            submission: SubmissionStatus::default(),
            results: ResultsState::default(),
            last_match_error: None,
            interactions: InteractionCounter::new(settings.upsell.interaction_threshold),
            last_interaction: None,
            upgrade: UpgradeModalState::default(),
            last_checkout_error: None,
            redirected_to: None,
            dashboard: DashboardState::default(),
            notice: None,
            tick: 0,
            settings,
            next_request_id: 0,
        }
    }

    /// Allocate a fresh id for an outgoing request
    pub fn next_request_id(&mut self) -> RequestId {
        self.next_request_id += 1;
        RequestId::new(self.next_request_id)
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    /// The run loop ends on quit or after the checkout redirect
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, AppPhase::Quitting | AppPhase::Redirected)
    }

    pub fn request_quit(&mut self) {
        self.phase = AppPhase::Quitting;
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.submission, SubmissionStatus::Loading { .. })
    }

    pub fn pending_match(&self) -> Option<RequestId> {
        match self.submission {
            SubmissionStatus::Loading { request_id } => Some(request_id),
            _ => None,
        }
    }

    pub fn results_visible(&self) -> bool {
        self.submission == SubmissionStatus::Complete
    }
}
