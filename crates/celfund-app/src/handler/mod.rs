//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `form`: Field edits, submission, and match completion
//! - `results`: Result-card interactions
//! - `upsell`: Upgrade modal and checkout
//! - `dashboard`: Scraping dashboard
//! - `keys`: Key event handlers per screen

pub(crate) mod dashboard;
pub(crate) mod form;
pub(crate) mod keys;
pub(crate) mod results;
pub(crate) mod update;
pub(crate) mod upsell;

#[cfg(test)]
mod tests;

use std::time::Duration;

use celfund_core::ValidForm;
use url::Url;

use crate::dashboard_state::DashboardCommand;
use crate::message::Message;
use crate::state::RequestId;

// Re-export main entry point
pub use update::update;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateAction {
    /// Ask the grant source for matches
    MatchGrants {
        request_id: RequestId,
        form: ValidForm,
    },

    /// Ask the checkout service for a redirect URL
    CreateCheckoutSession {
        request_id: RequestId,
        email: String,
    },

    /// Send the browser to checkout (answers with `CheckoutRedirected` or
    /// `CheckoutFailed`)
    OpenCheckout { request_id: RequestId, url: Url },

    /// Open a grant link without leaving the app
    OpenUrl { url: Url },

    /// Publish card text for the clipboard
    CopyToClipboard { grant_id: u32, text: String },

    /// Fetch status and stats once, then poll status
    EnterDashboard {
        stats_days: u32,
        poll_interval: Duration,
    },

    /// Stop the status poller
    LeaveDashboard,

    /// Fetch status and stats right now
    RefreshDashboard { stats_days: u32 },

    /// Run a control command, then refetch status
    RunDashboardCommand(DashboardCommand),
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
