//! Form submission and match completion handlers

use celfund_core::{fallback_grants, GrantMatch};
use chrono::Local;
use tracing::{debug, info, warn};

use crate::state::{AppState, LandingFocus, RequestId, ResultSource, SubmissionStatus};

use super::{UpdateAction, UpdateResult};

/// Handle a submit request.
///
/// Ignored while a request is in flight or while the form is invalid; in
/// both cases nothing in the state changes.
pub fn handle_submit(state: &mut AppState) -> UpdateResult {
    if let Some(pending) = state.pending_match() {
        debug!("Submit ignored: match {} still in flight", pending);
        return UpdateResult::none();
    }

    let Some(form) = state.form.validated() else {
        debug!("Submit ignored: form has issues {:?}", state.form.issues());
        return UpdateResult::none();
    };

    let request_id = state.next_request_id();

    // Templates are what stays on screen if the match fails
    let today = Local::now().date_naive();
    state.results.replace(
        fallback_grants(form.focus_area, form.organization_type, today),
        ResultSource::Templates,
    );
    state.results.focus_area = Some(form.focus_area);
    state.last_match_error = None;
    state.notice = None;
    state.submission = SubmissionStatus::Loading { request_id };

    info!(
        "Submitting match {} (focus={}, org={})",
        request_id, form.focus_area, form.organization_type
    );

    UpdateResult::action(UpdateAction::MatchGrants { request_id, form })
}

pub fn handle_match_succeeded(
    state: &mut AppState,
    request_id: RequestId,
    grants: Vec<GrantMatch>,
) -> UpdateResult {
    if state.pending_match() != Some(request_id) {
        debug!("Discarding stale match result {}", request_id);
        return UpdateResult::none();
    }

    if grants.is_empty() {
        info!("Match {} returned no grants, showing templates", request_id);
        state.last_match_error = Some("no grants returned".to_string());
    } else {
        info!("Match {} returned {} grants", request_id, grants.len());
        state.results.replace(grants, ResultSource::Matched);
    }

    reveal_results(state);
    UpdateResult::none()
}

pub fn handle_match_failed(
    state: &mut AppState,
    request_id: RequestId,
    error: String,
) -> UpdateResult {
    if state.pending_match() != Some(request_id) {
        debug!("Discarding stale match failure {}: {}", request_id, error);
        return UpdateResult::none();
    }

    warn!("Match {} failed, showing templates: {}", request_id, error);
    state.last_match_error = Some(error);

    reveal_results(state);
    UpdateResult::none()
}

fn reveal_results(state: &mut AppState) {
    state.submission = SubmissionStatus::Complete;
    state.focus = LandingFocus::Results;
}
