//! Main update function - handles state transitions (TEA pattern)

use crate::message::Message;
use crate::state::AppState;

use super::{dashboard, form, keys, results, upsell, UpdateResult};

/// Process a message and update state.
///
/// Returns an optional follow-up message and an optional action for the
/// event loop. Nothing here blocks or performs IO.
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Key(key) => keys::handle_key(state, key),
        Message::Paste(text) => keys::handle_paste(state, &text),

        Message::Tick => {
            state.tick = state.tick.wrapping_add(1);
            UpdateResult::none()
        }

        Message::Quit => {
            state.request_quit();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Form
        // ─────────────────────────────────────────────────────────
        Message::SetProjectSummary(value) => {
            state.form.set_project_summary(value);
            UpdateResult::none()
        }
        Message::SetOrganizationType(value) => {
            state.form.set_organization_type(value);
            UpdateResult::none()
        }
        Message::SetFocusArea(value) => {
            state.form.set_focus_area(value);
            UpdateResult::none()
        }
        Message::SetEmail(value) => {
            state.form.set_email(value);
            UpdateResult::none()
        }
        Message::Submit => form::handle_submit(state),
        Message::MatchSucceeded { request_id, grants } => {
            form::handle_match_succeeded(state, request_id, grants)
        }
        Message::MatchFailed { request_id, error } => {
            form::handle_match_failed(state, request_id, error)
        }

        // ─────────────────────────────────────────────────────────
        // Result cards
        // ─────────────────────────────────────────────────────────
        Message::SelectCard(index) => {
            if index < state.results.grants.len() {
                state.results.selected = index;
            }
            UpdateResult::none()
        }
        Message::CardInteraction { index, kind } => {
            results::handle_card_interaction(state, index, kind)
        }
        Message::NavigationFailed { url, error } => {
            tracing::warn!("Could not open {}: {}", url, error);
            state.notice = Some("Could not open browser".to_string());
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Upgrade modal
        // ─────────────────────────────────────────────────────────
        Message::ConfirmUpgrade => upsell::handle_confirm(state),
        Message::DismissUpgrade => upsell::handle_dismiss(state),
        Message::CheckoutSessionCreated { request_id, url } => {
            upsell::handle_session_created(state, request_id, url)
        }
        Message::CheckoutFailed { request_id, error } => {
            upsell::handle_checkout_failed(state, request_id, error)
        }
        Message::CheckoutRedirected { request_id, url } => {
            upsell::handle_redirected(state, request_id, url)
        }

        // ─────────────────────────────────────────────────────────
        // Dashboard
        // ─────────────────────────────────────────────────────────
        Message::ShowDashboard => dashboard::handle_show(state),
        Message::ShowLanding => dashboard::handle_leave(state),
        Message::SelectDashboardTab(tab) => {
            state.dashboard.tab = tab;
            UpdateResult::none()
        }
        Message::RefreshDashboard => dashboard::handle_refresh(state),
        Message::DashboardStatusLoaded { status } => {
            dashboard::handle_status_loaded(state, status)
        }
        Message::DashboardStatusFailed { error } => {
            dashboard::handle_status_failed(state, error)
        }
        Message::DashboardStatsLoaded { stats } => dashboard::handle_stats_loaded(state, stats),
        Message::DashboardStatsFailed { error } => dashboard::handle_stats_failed(state, error),
        Message::RunDashboardCommand(command) => dashboard::handle_run_command(state, command),
        Message::ConfirmDashboardCommand => dashboard::handle_confirm(state),
        Message::CancelDashboardCommand => {
            state.dashboard.pending_confirm = None;
            UpdateResult::none()
        }
        Message::DashboardCommandCompleted { command, summary } => {
            dashboard::handle_command_completed(state, command, summary)
        }
        Message::DashboardCommandFailed { command, error } => {
            dashboard::handle_command_failed(state, command, error)
        }
    }
}
