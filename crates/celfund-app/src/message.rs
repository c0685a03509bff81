//! Message types for the application (TEA pattern)

use celfund_api::{ScrapingStats, ScrapingStatus};
use celfund_core::{FocusArea, GrantMatch, OrganizationType};
use url::Url;

use crate::dashboard_state::{DashboardCommand, DashboardTab};
use crate::input_key::InputKey;
use crate::state::{CardInteraction, RequestId};

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Text pasted into the focused field
    Paste(String),

    /// Tick event for periodic updates (spinner frames)
    Tick,

    /// Request to quit
    Quit,

    // ─────────────────────────────────────────────────────────
    // Form
    // ─────────────────────────────────────────────────────────
    SetProjectSummary(String),
    SetOrganizationType(Option<OrganizationType>),
    SetFocusArea(Option<FocusArea>),
    SetEmail(String),

    /// Submit the form (no-op unless valid and idle)
    Submit,

    /// The grant source answered
    MatchSucceeded {
        request_id: RequestId,
        grants: Vec<GrantMatch>,
    },

    /// The grant source failed; templates stay on screen
    MatchFailed { request_id: RequestId, error: String },

    // ─────────────────────────────────────────────────────────
    // Result cards
    // ─────────────────────────────────────────────────────────
    SelectCard(usize),

    /// View, copy, or save a card; every kind counts toward the upsell
    CardInteraction {
        index: usize,
        kind: CardInteraction,
    },

    /// The browser could not be opened for a grant link
    NavigationFailed { url: String, error: String },

    // ─────────────────────────────────────────────────────────
    // Upgrade modal
    // ─────────────────────────────────────────────────────────
    ConfirmUpgrade,
    DismissUpgrade,

    CheckoutSessionCreated { request_id: RequestId, url: Url },

    /// Session creation or redirect failed; the modal goes back to idle
    CheckoutFailed { request_id: RequestId, error: String },

    /// The browser was sent to the checkout page
    CheckoutRedirected { request_id: RequestId, url: Url },

    // ─────────────────────────────────────────────────────────
    // Dashboard
    // ─────────────────────────────────────────────────────────
    ShowDashboard,
    ShowLanding,
    SelectDashboardTab(DashboardTab),
    RefreshDashboard,

    DashboardStatusLoaded { status: ScrapingStatus },
    DashboardStatusFailed { error: String },
    DashboardStatsLoaded { stats: ScrapingStats },
    DashboardStatsFailed { error: String },

    /// Run a control command (destructive ones ask for confirmation first)
    RunDashboardCommand(DashboardCommand),
    ConfirmDashboardCommand,
    CancelDashboardCommand,

    DashboardCommandCompleted {
        command: DashboardCommand,
        summary: String,
    },
    DashboardCommandFailed {
        command: DashboardCommand,
        error: String,
    },
}
