//! Engine - shared orchestration state for TUI and headless runners
//!
//! The Engine owns the TEA state, the message channel, every background task,
//! the shutdown signal and the event broadcaster. Both runners drive the same
//! Engine; only the input source and the output differ.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, watch};
use tracing::info;
use url::Url;

use crate::actions::{ActionContext, TaskRegistry};
use crate::config::Settings;
use crate::engine_event::EngineEvent;
use crate::message::Message;
use crate::process;
use crate::services::FunnelServices;
use crate::signals;
use crate::state::{AppPhase, AppState, Screen, SubmissionStatus};
use crate::upsell::UpgradePhase;

/// Lightweight snapshot of state for change detection.
///
/// Captured before message processing, compared after to detect
/// what changed and emit appropriate EngineEvents.
#[derive(Debug, Clone, PartialEq)]
struct StateSnapshot {
    phase: AppPhase,
    screen: Screen,
    form_valid: bool,
    submission: SubmissionStatus,
    interactions: u32,
    upgrade: UpgradePhase,
    saved_count: usize,
    redirected: bool,
}

impl StateSnapshot {
    fn capture(state: &AppState) -> Self {
        Self {
            phase: state.phase,
            screen: state.screen,
            form_valid: state.form.is_valid(),
            submission: state.submission,
            interactions: state.interactions.count(),
            upgrade: state.upgrade.phase(),
            saved_count: state.results.saved.len(),
            redirected: state.redirected_to.is_some(),
        }
    }
}

/// Orchestration engine for the funnel.
///
/// Generic over the service layer so tests can script every backend answer.
pub struct Engine<S> {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources.
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    /// The frontend event loop drains messages from here.
    pub msg_rx: mpsc::Receiver<Message>,

    /// Sender for the shutdown signal. Send `true` to initiate shutdown.
    pub shutdown_tx: watch::Sender<bool>,

    /// Receiver for the shutdown signal. Clone for background tasks.
    pub shutdown_rx: watch::Receiver<bool>,

    /// Handles of every task spawned on behalf of an action
    tasks: TaskRegistry,

    /// Handed to each action
    ctx: ActionContext<S>,

    /// Event broadcaster for external consumers.
    /// Subscribers receive EngineEvents after each message processing cycle.
    event_tx: broadcast::Sender<EngineEvent>,
}

impl<S> Engine<S>
where
    S: FunnelServices + Send + Sync + 'static,
{
    /// Create a new Engine.
    ///
    /// Must be called inside a tokio runtime (the signal handler is spawned
    /// here).
    pub fn new(settings: Settings, services: S) -> Self {
        let request_timeout = settings.api.request_timeout();
        let state = AppState::with_settings(settings);

        let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (event_tx, _) = broadcast::channel(256);

        signals::spawn_signal_handler(msg_tx.clone(), shutdown_rx.clone());

        let ctx = ActionContext {
            services: Arc::new(services),
            msg_tx: msg_tx.clone(),
            shutdown_rx: shutdown_rx.clone(),
            event_tx: event_tx.clone(),
            request_timeout,
        };

        Self {
            state,
            msg_tx,
            msg_rx,
            shutdown_tx,
            shutdown_rx,
            tasks: TaskRegistry::default(),
            ctx,
            event_tx,
        }
    }

    /// Subscribe to engine events.
    ///
    /// If the subscriber falls behind (buffer full), older events are
    /// dropped. Use `broadcast::error::RecvError::Lagged` to detect this.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    /// Process a single message through the TEA update cycle.
    ///
    /// Emits EngineEvents based on state changes detected by comparing
    /// before/after snapshots.
    pub fn process_message(&mut self, msg: Message) {
        let pre = StateSnapshot::capture(&self.state);

        process::process_message(&mut self.state, msg, &self.ctx, &mut self.tasks);

        let post = StateSnapshot::capture(&self.state);
        if pre != post {
            self.emit_events(&pre, &post);
        }
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed. Used by the TUI runner
    /// which needs to drain all pending messages before rendering.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Wait for the next message from a background task or input source.
    ///
    /// Never returns `None` while the engine is alive: it holds a sender.
    pub async fn next_message(&mut self) -> Option<Message> {
        self.msg_rx.recv().await
    }

    /// Get a clone of the message sender for spawning input sources.
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    /// Get a clone of the shutdown receiver for background tasks.
    pub fn shutdown_receiver(&self) -> watch::Receiver<bool> {
        self.shutdown_rx.clone()
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Quit requested or the browser was sent to checkout
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Where the browser was sent, once the funnel has completed
    pub fn redirected_to(&self) -> Option<&Url> {
        self.state.redirected_to.as_ref()
    }

    pub fn services(&self) -> &S {
        &self.ctx.services
    }

    /// Whether the dashboard status poller is running
    pub fn is_polling(&self) -> bool {
        self.tasks.is_polling()
    }

    /// Number of background tasks still running
    pub fn active_tasks(&self) -> usize {
        self.tasks.active()
    }

    /// Initiate shutdown: signal background tasks, then wait for them.
    pub async fn shutdown(&mut self) {
        self.emit(EngineEvent::Shutdown);

        let _ = self.shutdown_tx.send(true);
        self.tasks.drain().await;

        info!("Engine shut down");
    }

    /// Emit EngineEvents based on state changes after processing.
    fn emit_events(&self, pre: &StateSnapshot, post: &StateSnapshot) {
        let state = &self.state;

        if pre.form_valid != post.form_valid {
            self.emit(EngineEvent::FormValidityChanged {
                valid: post.form_valid,
            });
        }

        // Match lifecycle
        match (pre.submission, post.submission) {
            (SubmissionStatus::Loading { .. }, SubmissionStatus::Loading { .. }) => {}
            (_, SubmissionStatus::Loading { request_id }) => {
                self.emit(EngineEvent::MatchStarted { request_id });
            }
            (SubmissionStatus::Loading { .. }, SubmissionStatus::Complete) => {
                self.emit(EngineEvent::ResultsShown {
                    count: state.results.grants.len(),
                    source: state.results.source,
                    fallback_reason: state.last_match_error.clone(),
                });
            }
            _ => {}
        }

        if post.interactions > pre.interactions {
            self.emit(EngineEvent::InteractionRecorded {
                count: post.interactions,
                kind: state.last_interaction,
            });
        }

        if post.saved_count > pre.saved_count {
            if let Some(grant) = state.results.selected_grant() {
                self.emit(EngineEvent::GrantSaved { grant_id: grant.id });
            }
        }

        // Upgrade modal
        match (pre.upgrade, post.upgrade) {
            (UpgradePhase::Hidden, UpgradePhase::Idle) => {
                self.emit(EngineEvent::UpgradeModalOpened {
                    interactions: post.interactions,
                });
            }
            (UpgradePhase::Idle, UpgradePhase::Hidden) => {
                self.emit(EngineEvent::UpgradeModalDismissed);
            }
            (UpgradePhase::Idle, UpgradePhase::Loading { request_id }) => {
                self.emit(EngineEvent::CheckoutStarted { request_id });
            }
            (UpgradePhase::Loading { .. }, UpgradePhase::Idle) => {
                self.emit(EngineEvent::CheckoutFailed {
                    reason: state.last_checkout_error.clone(),
                });
            }
            _ => {}
        }

        if !pre.redirected && post.redirected {
            if let Some(url) = &state.redirected_to {
                self.emit(EngineEvent::CheckoutRedirect { url: url.clone() });
            }
        }

        if pre.screen != post.screen {
            self.emit(EngineEvent::ScreenChanged {
                screen: post.screen,
            });
        }

        if pre.phase != post.phase {
            self.emit(EngineEvent::PhaseChanged {
                old_phase: pre.phase,
                new_phase: post.phase,
            });
        }
    }

    /// Emit a single EngineEvent to all subscribers.
    ///
    /// send() returns Err only if there are no receivers -- that's fine.
    fn emit(&self, event: EngineEvent) {
        let _ = self.event_tx.send(event);
    }
}
