//! Scraping dashboard handlers

use celfund_api::{ScrapingStats, ScrapingStatus};
use chrono::Local;
use tracing::{debug, info, warn};

use crate::dashboard_state::DashboardCommand;
use crate::state::{AppState, Screen};

use super::{UpdateAction, UpdateResult};

pub fn handle_show(state: &mut AppState) -> UpdateResult {
    if state.screen == Screen::Dashboard {
        return UpdateResult::none();
    }

    state.screen = Screen::Dashboard;
    state.dashboard.enter();

    let settings = &state.settings.dashboard;
    UpdateResult::action(UpdateAction::EnterDashboard {
        stats_days: settings.stats_days,
        poll_interval: settings.poll_interval(),
    })
}

pub fn handle_leave(state: &mut AppState) -> UpdateResult {
    if state.screen != Screen::Dashboard {
        return UpdateResult::none();
    }

    state.screen = Screen::Landing;
    state.dashboard.pending_confirm = None;
    UpdateResult::action(UpdateAction::LeaveDashboard)
}

pub fn handle_refresh(state: &mut AppState) -> UpdateResult {
    if state.screen != Screen::Dashboard {
        return UpdateResult::none();
    }
    UpdateResult::action(UpdateAction::RefreshDashboard {
        stats_days: state.settings.dashboard.stats_days,
    })
}

pub fn handle_status_loaded(state: &mut AppState, status: ScrapingStatus) -> UpdateResult {
    if state.screen != Screen::Dashboard {
        debug!("Discarding scraping status: dashboard closed");
        return UpdateResult::none();
    }

    state.dashboard.status = Some(status);
    state.dashboard.loading = false;
    state.dashboard.last_error = None;
    state.dashboard.last_updated = Some(Local::now());
    UpdateResult::none()
}

pub fn handle_status_failed(state: &mut AppState, error: String) -> UpdateResult {
    if state.screen != Screen::Dashboard {
        debug!("Discarding scraping status failure: {}", error);
        return UpdateResult::none();
    }

    warn!("Failed to fetch scraping status: {}", error);
    state.dashboard.loading = false;
    state.dashboard.last_error = Some(error);
    UpdateResult::none()
}

pub fn handle_stats_loaded(state: &mut AppState, stats: ScrapingStats) -> UpdateResult {
    if state.screen != Screen::Dashboard {
        return UpdateResult::none();
    }
    state.dashboard.stats = Some(stats);
    UpdateResult::none()
}

pub fn handle_stats_failed(state: &mut AppState, error: String) -> UpdateResult {
    if state.screen != Screen::Dashboard {
        return UpdateResult::none();
    }
    warn!("Failed to fetch scraping stats: {}", error);
    state.dashboard.last_error = Some(error);
    UpdateResult::none()
}

pub fn handle_run_command(state: &mut AppState, command: DashboardCommand) -> UpdateResult {
    if state.screen != Screen::Dashboard || state.dashboard.command_in_flight {
        return UpdateResult::none();
    }

    if command.needs_confirmation() {
        state.dashboard.pending_confirm = Some(command);
        return UpdateResult::none();
    }

    dispatch(state, command)
}

pub fn handle_confirm(state: &mut AppState) -> UpdateResult {
    match state.dashboard.pending_confirm.take() {
        Some(command) if !state.dashboard.command_in_flight => dispatch(state, command),
        _ => UpdateResult::none(),
    }
}

fn dispatch(state: &mut AppState, command: DashboardCommand) -> UpdateResult {
    info!("Dashboard command: {}", command.label());
    state.dashboard.command_in_flight = true;
    state.dashboard.notice = None;
    UpdateResult::action(UpdateAction::RunDashboardCommand(command))
}

pub fn handle_command_completed(
    state: &mut AppState,
    command: DashboardCommand,
    summary: String,
) -> UpdateResult {
    info!("{} -> {}", command.label(), summary);
    state.dashboard.command_in_flight = false;
    state.dashboard.notice = Some(summary);
    UpdateResult::none()
}

pub fn handle_command_failed(
    state: &mut AppState,
    command: DashboardCommand,
    error: String,
) -> UpdateResult {
    warn!("{} failed: {}", command.label(), error);
    state.dashboard.command_in_flight = false;
    state.dashboard.notice = Some(format!("{} failed: {}", command.label(), error));
    UpdateResult::none()
}
