//! Action handlers: UpdateAction dispatch and background task spawning
//!
//! Every task spawned here is registered in a [`TaskRegistry`] owned by the
//! engine and races the shutdown signal, so nothing reports back after
//! `Engine::shutdown()`.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use celfund_core::{Error, Result};

use crate::engine_event::EngineEvent;
use crate::message::Message;
use crate::services::FunnelServices;
use crate::UpdateAction;

/// How long shutdown waits for each task before aborting it
const TASK_DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Handles of background tasks, plus the dashboard poller
#[derive(Debug, Default)]
pub struct TaskRegistry {
    tasks: Vec<JoinHandle<()>>,
    poller: Option<JoinHandle<()>>,
}

impl TaskRegistry {
    fn track(&mut self, handle: JoinHandle<()>) {
        self.tasks.retain(|task| !task.is_finished());
        self.tasks.push(handle);
    }

    /// Install a new poller, aborting any previous one
    fn replace_poller(&mut self, handle: JoinHandle<()>) {
        if let Some(old) = self.poller.replace(handle) {
            old.abort();
        }
    }

    fn stop_poller(&mut self) {
        if let Some(poller) = self.poller.take() {
            debug!("Stopping dashboard poller");
            poller.abort();
        }
    }

    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(|p| !p.is_finished())
    }

    /// Number of tasks still running
    pub fn active(&self) -> usize {
        self.tasks.iter().filter(|task| !task.is_finished()).count()
    }

    /// Wait briefly for every task, then abort stragglers
    pub async fn drain(&mut self) {
        self.stop_poller();
        for mut handle in self.tasks.drain(..) {
            match tokio::time::timeout(TASK_DRAIN_TIMEOUT, &mut handle).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) if e.is_cancelled() => {}
                Ok(Err(e)) => warn!("Background task panicked: {}", e),
                Err(_) => {
                    warn!("Background task did not stop in time, aborting");
                    handle.abort();
                }
            }
        }
    }
}

/// Everything a spawned task needs to talk back to the engine
pub struct ActionContext<S> {
    pub services: Arc<S>,
    pub msg_tx: mpsc::Sender<Message>,
    pub shutdown_rx: watch::Receiver<bool>,
    pub event_tx: broadcast::Sender<EngineEvent>,
    /// Upper bound on every service call
    pub request_timeout: Duration,
}

impl<S> Clone for ActionContext<S> {
    fn clone(&self) -> Self {
        Self {
            services: self.services.clone(),
            msg_tx: self.msg_tx.clone(),
            shutdown_rx: self.shutdown_rx.clone(),
            event_tx: self.event_tx.clone(),
            request_timeout: self.request_timeout,
        }
    }
}

/// Execute an action by spawning a background task
pub fn handle_action<S>(action: UpdateAction, ctx: &ActionContext<S>, tasks: &mut TaskRegistry)
where
    S: FunnelServices + Send + Sync + 'static,
{
    match action {
        UpdateAction::MatchGrants { request_id, form } => {
            let c = ctx.clone();
            spawn_guarded(tasks, ctx, async move {
                let result = with_timeout(c.request_timeout, c.services.find_matches(&form)).await;
                let msg = match result {
                    Ok(grants) => Message::MatchSucceeded { request_id, grants },
                    Err(e) => Message::MatchFailed {
                        request_id,
                        error: e.to_string(),
                    },
                };
                let _ = c.msg_tx.send(msg).await;
            });
        }

        UpdateAction::CreateCheckoutSession { request_id, email } => {
            let c = ctx.clone();
            spawn_guarded(tasks, ctx, async move {
                let result = with_timeout(
                    c.request_timeout,
                    c.services.create_checkout_session(&email),
                )
                .await;
                let msg = match result {
                    Ok(url) => Message::CheckoutSessionCreated { request_id, url },
                    Err(e) => Message::CheckoutFailed {
                        request_id,
                        error: e.to_string(),
                    },
                };
                let _ = c.msg_tx.send(msg).await;
            });
        }

        UpdateAction::OpenCheckout { request_id, url } => {
            let c = ctx.clone();
            spawn_guarded(tasks, ctx, async move {
                let msg = match c.services.navigate(&url) {
                    Ok(()) => Message::CheckoutRedirected { request_id, url },
                    Err(e) => Message::CheckoutFailed {
                        request_id,
                        error: e.to_string(),
                    },
                };
                let _ = c.msg_tx.send(msg).await;
            });
        }

        UpdateAction::OpenUrl { url } => {
            let c = ctx.clone();
            spawn_guarded(tasks, ctx, async move {
                if let Err(e) = c.services.navigate(&url) {
                    let _ = c
                        .msg_tx
                        .send(Message::NavigationFailed {
                            url: url.to_string(),
                            error: e.to_string(),
                        })
                        .await;
                }
            });
        }

        UpdateAction::CopyToClipboard { grant_id, text } => {
            // send() only fails without subscribers
            let _ = ctx.event_tx.send(EngineEvent::GrantCopied { grant_id, text });
        }

        UpdateAction::EnterDashboard {
            stats_days,
            poll_interval,
        } => {
            info!("Polling scraping status every {:?}", poll_interval);
            let c = ctx.clone();
            let mut shutdown_rx = ctx.shutdown_rx.clone();
            let handle = tokio::spawn(async move {
                fetch_status(&c).await;
                fetch_stats(&c, stats_days).await;

                let mut interval = tokio::time::interval(poll_interval);
                interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
                // The first tick completes immediately
                interval.tick().await;

                loop {
                    tokio::select! {
                        _ = interval.tick() => fetch_status(&c).await,
                        _ = shutdown_rx.changed() => break,
                    }
                }
            });
            tasks.replace_poller(handle);
        }

        UpdateAction::LeaveDashboard => tasks.stop_poller(),

        UpdateAction::RefreshDashboard { stats_days } => {
            let c = ctx.clone();
            spawn_guarded(tasks, ctx, async move {
                fetch_status(&c).await;
                fetch_stats(&c, stats_days).await;
            });
        }

        UpdateAction::RunDashboardCommand(command) => {
            let c = ctx.clone();
            spawn_guarded(tasks, ctx, async move {
                let result = with_timeout(
                    c.request_timeout,
                    c.services.run_dashboard_command(command),
                )
                .await;
                let msg = match result {
                    Ok(summary) => Message::DashboardCommandCompleted { command, summary },
                    Err(e) => Message::DashboardCommandFailed {
                        command,
                        error: e.to_string(),
                    },
                };
                let _ = c.msg_tx.send(msg).await;
                fetch_status(&c).await;
            });
        }
    }
}

/// Spawn `fut`, dropping it if shutdown is signalled first
fn spawn_guarded<S, F>(tasks: &mut TaskRegistry, ctx: &ActionContext<S>, fut: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    let mut shutdown_rx = ctx.shutdown_rx.clone();
    let handle = tokio::spawn(async move {
        tokio::select! {
            _ = fut => {}
            _ = shutdown_rx.changed() => debug!("Task cancelled by shutdown"),
        }
    });
    tasks.track(handle);
}

/// Bound a service call; elapsing counts as a transport failure
async fn with_timeout<T>(limit: Duration, fut: impl Future<Output = Result<T>>) -> Result<T> {
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(Error::Timeout {
            secs: limit.as_secs(),
        }),
    }
}

async fn fetch_status<S: FunnelServices>(ctx: &ActionContext<S>) {
    let msg = match with_timeout(ctx.request_timeout, ctx.services.scraping_status()).await {
        Ok(status) => Message::DashboardStatusLoaded { status },
        Err(e) => Message::DashboardStatusFailed {
            error: e.to_string(),
        },
    };
    let _ = ctx.msg_tx.send(msg).await;
}

async fn fetch_stats<S: FunnelServices>(ctx: &ActionContext<S>, days: u32) {
    let msg = match with_timeout(ctx.request_timeout, ctx.services.scraping_stats(days)).await {
        Ok(stats) => Message::DashboardStatsLoaded { stats },
        Err(e) => Message::DashboardStatsFailed {
            error: e.to_string(),
        },
    };
    let _ = ctx.msg_tx.send(msg).await;
}
