//! Domain events emitted by the Engine for external consumers
//!
//! The headless runner turns these into NDJSON lines; the TUI ignores most of
//! them. Events are broadcast after each message processing cycle via
//! `Engine::subscribe()`.

use url::Url;

use crate::state::{AppPhase, CardInteraction, RequestId, ResultSource, Screen};

/// Domain events emitted by the Engine for external consumers.
///
/// Events are derived by diffing state before and after a message, so
/// subscribers see a consistent view of state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    // ─────────────────────────────────────────────────────────
    // Form & Matching
    // ─────────────────────────────────────────────────────────
    /// The derived `is_valid` flag flipped
    FormValidityChanged { valid: bool },

    /// A match request was issued
    MatchStarted { request_id: RequestId },

    /// The results section became visible
    ResultsShown {
        count: usize,
        source: ResultSource,
        /// Why templates are shown instead of matches
        fallback_reason: Option<String>,
    },

    // ─────────────────────────────────────────────────────────
    // Cards & Upsell
    // ─────────────────────────────────────────────────────────
    InteractionRecorded {
        count: u32,
        kind: Option<CardInteraction>,
    },

    UpgradeModalOpened { interactions: u32 },

    UpgradeModalDismissed,

    CheckoutStarted { request_id: RequestId },

    /// Checkout failed and the modal is idle again
    CheckoutFailed { reason: Option<String> },

    /// The browser was sent to checkout
    CheckoutRedirect { url: Url },

    /// Card text ready for the clipboard
    GrantCopied { grant_id: u32, text: String },

    GrantSaved { grant_id: u32 },

    // ─────────────────────────────────────────────────────────
    // Navigation & Lifecycle
    // ─────────────────────────────────────────────────────────
    ScreenChanged { screen: Screen },

    PhaseChanged {
        old_phase: AppPhase,
        new_phase: AppPhase,
    },

    /// Engine is shutting down
    Shutdown,
}

impl EngineEvent {
    /// Returns a short string label for this event type (for logging/debugging).
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::FormValidityChanged { .. } => "form_validity_changed",
            Self::MatchStarted { .. } => "match_started",
            Self::ResultsShown { .. } => "results_shown",
            Self::InteractionRecorded { .. } => "interaction_recorded",
            Self::UpgradeModalOpened { .. } => "upgrade_modal_opened",
            Self::UpgradeModalDismissed => "upgrade_modal_dismissed",
            Self::CheckoutStarted { .. } => "checkout_started",
            Self::CheckoutFailed { .. } => "checkout_failed",
            Self::CheckoutRedirect { .. } => "checkout_redirect",
            Self::GrantCopied { .. } => "grant_copied",
            Self::GrantSaved { .. } => "grant_saved",
            Self::ScreenChanged { .. } => "screen_changed",
            Self::PhaseChanged { .. } => "phase_changed",
            Self::Shutdown => "shutdown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_labels() {
        assert_eq!(EngineEvent::Shutdown.event_type(), "shutdown");
        assert_eq!(
            EngineEvent::ResultsShown {
                count: 3,
                source: ResultSource::Matched,
                fallback_reason: None,
            }
            .event_type(),
            "results_shown"
        );
        assert_eq!(
            EngineEvent::CheckoutRedirect {
                url: Url::parse("https://checkout.stripe.com/x").unwrap()
            }
            .event_type(),
            "checkout_redirect"
        );
    }

    #[test]
    fn test_events_are_cloneable() {
        let event = EngineEvent::GrantCopied {
            grant_id: 4,
            text: "Title\nFunder: F".into(),
        };
        assert_eq!(event.clone(), event);
    }
}
