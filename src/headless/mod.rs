//! Headless mode - JSON event output for scripted funnel runs
//!
//! Drives the same Engine as the TUI from command-line arguments and writes
//! structured events to stdout. This enables reliable parsing in test scripts
//! and smoke checks against a live backend.
//!
//! # Event Format
//!
//! Events are output as NDJSON (newline-delimited JSON), one event per line.
//! Each event has an "event" field indicating its type, along with
//! event-specific data and a millisecond `timestamp`.
//!
//! # Example Output
//!
//! ```json
//! {"event":"form_validated","valid":true,"issues":[],"timestamp":1704700001000}
//! {"event":"match_started","request_id":1,"timestamp":1704700001002}
//! {"event":"results_shown","count":10,"source":"templates","fallback_reason":"HTTP 503","timestamp":1704700001300}
//! ```

pub mod runner;

use celfund_app::EngineEvent;
use chrono::Utc;
use serde::Serialize;
use std::io::{self, Write};
use tracing::error;

/// Events emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// The form was filled from the command line
    FormValidated {
        valid: bool,
        issues: Vec<String>,
        timestamp: i64,
    },

    /// A match request was issued
    MatchStarted { request_id: u64, timestamp: i64 },

    /// Results are on screen
    ResultsShown {
        count: usize,
        source: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        fallback_reason: Option<String>,
        timestamp: i64,
    },

    /// A result card was viewed, copied, or saved
    InteractionRecorded {
        count: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        kind: Option<String>,
        timestamp: i64,
    },

    /// The interaction threshold was crossed
    UpgradeModalOpened { interactions: u32, timestamp: i64 },

    /// The browser was sent to checkout
    CheckoutRedirect { url: String, timestamp: i64 },

    /// Checkout could not be started; the modal is idle again
    CheckoutFailed {
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
        timestamp: i64,
    },

    /// Error occurred
    Error {
        message: String,
        fatal: bool,
        timestamp: i64,
    },
}

impl HeadlessEvent {
    /// Emit this event to stdout as JSON
    pub fn emit(&self) {
        let mut stdout = io::stdout().lock();
        self.write_to(&mut stdout);
    }

    /// Write this event as one NDJSON line and flush
    pub fn write_to<W: Write>(&self, out: &mut W) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        if let Err(e) = writeln!(out, "{}", json) {
            error!("Failed to write headless event: {}", e);
            return;
        }

        // Flush to ensure immediate output
        if let Err(e) = out.flush() {
            error!("Failed to flush headless output: {}", e);
        }
    }

    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    // ─────────────────────────────────────────────────────────
    // Convenience constructors
    // ─────────────────────────────────────────────────────────

    pub fn form_validated(valid: bool, issues: Vec<String>) -> Self {
        Self::FormValidated {
            valid,
            issues,
            timestamp: Self::now(),
        }
    }

    pub fn error(message: impl Into<String>, fatal: bool) -> Self {
        Self::Error {
            message: message.into(),
            fatal,
            timestamp: Self::now(),
        }
    }

    /// Translate an engine event, if headless mode reports it
    pub fn from_engine(event: &EngineEvent) -> Option<Self> {
        let timestamp = Self::now();
        let event = match event {
            EngineEvent::MatchStarted { request_id } => Self::MatchStarted {
                request_id: request_id.value(),
                timestamp,
            },
            EngineEvent::ResultsShown {
                count,
                source,
                fallback_reason,
            } => Self::ResultsShown {
                count: *count,
                source: source.as_str().to_string(),
                fallback_reason: fallback_reason.clone(),
                timestamp,
            },
            EngineEvent::InteractionRecorded { count, kind } => Self::InteractionRecorded {
                count: *count,
                kind: kind.map(|k| k.as_str().to_string()),
                timestamp,
            },
            EngineEvent::UpgradeModalOpened { interactions } => Self::UpgradeModalOpened {
                interactions: *interactions,
                timestamp,
            },
            EngineEvent::CheckoutRedirect { url } => Self::CheckoutRedirect {
                url: url.to_string(),
                timestamp,
            },
            EngineEvent::CheckoutFailed { reason } => Self::CheckoutFailed {
                reason: reason.clone(),
                timestamp,
            },
            _ => return None,
        };
        Some(event)
    }
}
