//! Headless mode runner - drives one funnel pass without the TUI
//!
//! Fills the form from command-line values, submits it, records card
//! interactions, and optionally confirms the upgrade. Every engine event
//! worth reporting is written to the output as NDJSON.

use std::io::{self, Write};
use std::time::Duration;

use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{info, warn};

use celfund_app::config::Settings;
use celfund_app::state::AppState;
use celfund_app::{CardInteraction, Engine, EngineEvent, FunnelServices, Message, ResultSource};
use celfund_core::prelude::*;
use celfund_core::{FocusArea, FormIssue, OrganizationType};

use super::HeadlessEvent;

/// Slack on top of the request timeout before a wait is abandoned
const WAIT_MARGIN: Duration = Duration::from_secs(5);

/// Form values and script steps taken from the command line
#[derive(Debug, Clone, Default)]
pub struct HeadlessOptions {
    pub summary: String,
    pub organization_type: String,
    pub focus_area: String,
    pub email: String,
    /// Save this many result cards, cycling through them
    pub interactions: u32,
    /// Confirm the upgrade once the modal is open
    pub checkout: bool,
}

/// What a headless run ended with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessReport {
    pub results: usize,
    pub source: ResultSource,
    pub interactions: u32,
    pub modal_opened: bool,
    pub redirected_to: Option<String>,
}

/// Run in headless mode, writing events to stdout
pub async fn run_headless<S>(
    settings: Settings,
    services: S,
    options: HeadlessOptions,
) -> Result<HeadlessReport>
where
    S: FunnelServices + Send + Sync + 'static,
{
    let mut stdout = io::stdout();
    run_headless_with(settings, services, options, &mut stdout).await
}

/// Run in headless mode, writing events to `out`
pub async fn run_headless_with<S, W>(
    settings: Settings,
    services: S,
    options: HeadlessOptions,
    out: &mut W,
) -> Result<HeadlessReport>
where
    S: FunnelServices + Send + Sync + 'static,
    W: Write,
{
    info!("═══════════════════════════════════════════════════════");
    info!("CelFund starting in HEADLESS mode");
    info!("API: {}", settings.api.base_url);
    info!("═══════════════════════════════════════════════════════");

    let organization_type = match options.organization_type.parse::<OrganizationType>() {
        Ok(value) => value,
        Err(e) => {
            HeadlessEvent::error(e.to_string(), true).write_to(out);
            return Err(e);
        }
    };
    let focus_area = match options.focus_area.parse::<FocusArea>() {
        Ok(value) => value,
        Err(e) => {
            HeadlessEvent::error(e.to_string(), true).write_to(out);
            return Err(e);
        }
    };

    let wait = settings.api.request_timeout() + WAIT_MARGIN;
    let mut engine = Engine::new(settings, services);
    let mut events = engine.subscribe();

    let result = drive(
        &mut engine,
        &mut events,
        out,
        wait,
        &options,
        organization_type,
        focus_area,
    )
    .await;

    engine.shutdown().await;
    info!("CelFund headless mode exiting");
    result
}

async fn drive<S, W>(
    engine: &mut Engine<S>,
    events: &mut broadcast::Receiver<EngineEvent>,
    out: &mut W,
    wait: Duration,
    options: &HeadlessOptions,
    organization_type: OrganizationType,
    focus_area: FocusArea,
) -> Result<HeadlessReport>
where
    S: FunnelServices + Send + Sync + 'static,
    W: Write,
{
    // Fill the form
    engine.process_message(Message::SetProjectSummary(options.summary.clone()));
    engine.process_message(Message::SetOrganizationType(Some(organization_type)));
    engine.process_message(Message::SetFocusArea(Some(focus_area)));
    engine.process_message(Message::SetEmail(options.email.clone()));
    forward_events(events, out);

    let issues: Vec<String> = engine
        .state
        .form
        .issues()
        .into_iter()
        .map(issue_code)
        .map(String::from)
        .collect();
    let valid = issues.is_empty();
    HeadlessEvent::form_validated(valid, issues.clone()).write_to(out);
    if !valid {
        let detail = issues.join(", ");
        HeadlessEvent::error(format!("Form is incomplete: {}", detail), true).write_to(out);
        return Err(Error::FormIncomplete { issues: detail });
    }

    // Submit and wait for the results section
    engine.process_message(Message::Submit);
    forward_events(events, out);
    if !pump_until(engine, events, out, wait, AppState::results_visible).await? {
        return Ok(report(&engine.state));
    }

    // Interact with the cards
    let cards = engine.state.results.grants.len();
    if cards > 0 {
        for i in 0..options.interactions as usize {
            engine.process_message(Message::CardInteraction {
                index: i % cards,
                kind: CardInteraction::Save,
            });
            forward_events(events, out);
        }
    }

    if options.checkout {
        if engine.state.upgrade.is_visible() {
            engine.process_message(Message::ConfirmUpgrade);
            forward_events(events, out);
            pump_until(engine, events, out, wait, |state: &AppState| {
                state.is_finished() || !state.upgrade.is_loading()
            })
            .await?;
        } else {
            warn!("Checkout requested but the upgrade modal never opened");
            HeadlessEvent::error("Upgrade modal is not open", false).write_to(out);
        }
    }

    Ok(report(&engine.state))
}

/// Process background messages until `done` holds.
///
/// Returns `Ok(false)` when a quit was requested first.
async fn pump_until<S, W, F>(
    engine: &mut Engine<S>,
    events: &mut broadcast::Receiver<EngineEvent>,
    out: &mut W,
    wait: Duration,
    done: F,
) -> Result<bool>
where
    S: FunnelServices + Send + Sync + 'static,
    W: Write,
    F: Fn(&AppState) -> bool,
{
    while !done(&engine.state) {
        if engine.should_quit() {
            info!("Quit requested");
            return Ok(false);
        }

        match tokio::time::timeout(wait, engine.next_message()).await {
            Ok(Some(msg)) => {
                engine.process_message(msg);
                forward_events(events, out);
            }
            Ok(None) => {
                info!("Message channel closed");
                return Ok(false);
            }
            Err(_) => {
                let err = Error::Timeout {
                    secs: wait.as_secs(),
                };
                HeadlessEvent::error(err.to_string(), true).write_to(out);
                return Err(err);
            }
        }
    }
    Ok(true)
}

/// Write every buffered engine event that headless mode reports
fn forward_events<W: Write>(events: &mut broadcast::Receiver<EngineEvent>, out: &mut W) {
    loop {
        match events.try_recv() {
            Ok(event) => {
                if let Some(event) = HeadlessEvent::from_engine(&event) {
                    event.write_to(out);
                }
            }
            Err(TryRecvError::Lagged(skipped)) => {
                warn!("Headless output skipped {} engine events", skipped);
            }
            Err(_) => break,
        }
    }
}

fn report(state: &AppState) -> HeadlessReport {
    HeadlessReport {
        results: state.results.grants.len(),
        source: state.results.source,
        interactions: state.interactions.count(),
        modal_opened: state.upgrade.is_visible() || state.redirected_to.is_some(),
        redirected_to: state.redirected_to.as_ref().map(|url| url.to_string()),
    }
}

fn issue_code(issue: FormIssue) -> &'static str {
    match issue {
        FormIssue::SummaryTooShort => "summary_too_short",
        FormIssue::OrganizationTypeMissing => "organization_type_missing",
        FormIssue::FocusAreaMissing => "focus_area_missing",
        FormIssue::EmailInvalid => "email_invalid",
    }
}
