//! Upgrade modal handlers

use tracing::{debug, info, warn};
use url::Url;

use crate::state::{AppPhase, AppState, RequestId};

use super::{UpdateAction, UpdateResult};

/// Idle -> Loading, requesting a checkout session
pub fn handle_confirm(state: &mut AppState) -> UpdateResult {
    if state.upgrade.is_loading() || !state.upgrade.is_visible() {
        return UpdateResult::none();
    }

    let request_id = state.next_request_id();
    state.upgrade.begin_checkout(request_id);
    state.last_checkout_error = None;

    info!("Creating checkout session {}", request_id);
    UpdateResult::action(UpdateAction::CreateCheckoutSession {
        request_id,
        email: state.upgrade.email().to_string(),
    })
}

pub fn handle_dismiss(state: &mut AppState) -> UpdateResult {
    if state.upgrade.dismiss() {
        info!("Upgrade modal dismissed");
    }
    UpdateResult::none()
}

/// Session created: stay loading until the browser has been sent away
pub fn handle_session_created(state: &mut AppState, request_id: RequestId, url: Url) -> UpdateResult {
    if !state.upgrade.is_pending(request_id) {
        debug!("Discarding stale checkout session {}", request_id);
        return UpdateResult::none();
    }

    UpdateResult::action(UpdateAction::OpenCheckout { request_id, url })
}

pub fn handle_checkout_failed(
    state: &mut AppState,
    request_id: RequestId,
    error: String,
) -> UpdateResult {
    if state.upgrade.checkout_failed(request_id) {
        warn!("Checkout {} failed: {}", request_id, error);
        state.last_checkout_error = Some(error);
    } else {
        debug!("Discarding stale checkout failure {}: {}", request_id, error);
    }
    UpdateResult::none()
}

/// Navigation to checkout is terminal for the funnel
pub fn handle_redirected(state: &mut AppState, request_id: RequestId, url: Url) -> UpdateResult {
    if !state.upgrade.redirected(request_id) {
        debug!("Discarding stale checkout redirect {}", request_id);
        return UpdateResult::none();
    }

    info!("Redirected to checkout: {}", url);
    state.redirected_to = Some(url);
    state.phase = AppPhase::Redirected;
    UpdateResult::none()
}
