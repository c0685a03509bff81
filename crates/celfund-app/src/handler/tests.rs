//! Tests for handler module

use super::*;
use crate::dashboard_state::{DashboardCommand, DashboardTab};
use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{
    AppPhase, AppState, CardInteraction, LandingFocus, RequestId, ResultSource, Screen,
    SubmissionStatus,
};
use crate::upsell::UpgradePhase;
use celfund_core::{fallback_grants, Deadline, FocusArea, FormField, GrantMatch, OrganizationType};
use chrono::{Local, NaiveDate};

fn grant(id: u32, title: &str, url: Option<&str>) -> GrantMatch {
    GrantMatch {
        id,
        title: title.to_string(),
        funder: "Funder".to_string(),
        description: "Description".to_string(),
        deadline: Deadline::On(NaiveDate::from_ymd_opt(2025, 9, 15).unwrap()),
        amount: "$10,000 - $50,000".to_string(),
        url: url.map(str::to_string),
    }
}

fn filled_state() -> AppState {
    let mut state = AppState::new();
    update(
        &mut state,
        Message::SetProjectSummary("Building solar microgrids for rural schools".into()),
    );
    update(
        &mut state,
        Message::SetOrganizationType(Some(OrganizationType::Nonprofit)),
    );
    update(&mut state, Message::SetFocusArea(Some(FocusArea::Climate)));
    update(&mut state, Message::SetEmail("a@b.com".into()));
    state
}

/// Submit and return the request id of the match
fn submit(state: &mut AppState) -> RequestId {
    match update(state, Message::Submit).action {
        Some(UpdateAction::MatchGrants { request_id, .. }) => request_id,
        other => panic!("expected MatchGrants, got {:?}", other),
    }
}

/// A state with three matched grants on screen
fn state_with_results() -> AppState {
    let mut state = filled_state();
    let request_id = submit(&mut state);
    update(
        &mut state,
        Message::MatchSucceeded {
            request_id,
            grants: vec![
                grant(1, "A", Some("https://a.example.org")),
                grant(2, "B", None),
                grant(3, "C", Some("not a url")),
            ],
        },
    );
    state
}

fn interact(state: &mut AppState, index: usize, kind: CardInteraction) -> UpdateResult {
    update(state, Message::CardInteraction { index, kind })
}

// ─────────────────────────────────────────────────────────
// Lifecycle
// ─────────────────────────────────────────────────────────

#[test]
fn test_quit_message_sets_quitting_phase() {
    let mut state = AppState::new();
    update(&mut state, Message::Quit);
    assert_eq!(state.phase, AppPhase::Quitting);
    assert!(state.should_quit());
    assert!(state.is_finished());
}

#[test]
fn test_ctrl_c_requests_quit_everywhere() {
    let mut state = state_with_results();
    state.upgrade.open("a@b.com");
    let result = update(&mut state, Message::Key(InputKey::CharCtrl('c')));
    assert!(matches!(result.message, Some(Message::Quit)));
}

#[test]
fn test_tick_advances_frame_counter() {
    let mut state = AppState::new();
    update(&mut state, Message::Tick);
    update(&mut state, Message::Tick);
    assert_eq!(state.tick, 2);
}

// ─────────────────────────────────────────────────────────
// Form submission
// ─────────────────────────────────────────────────────────

#[test]
fn test_submit_invalid_form_changes_nothing() {
    let mut state = AppState::new();
    update(&mut state, Message::SetProjectSummary("too short".into()));
    update(&mut state, Message::SetEmail("a@b.com".into()));

    let result = update(&mut state, Message::Submit);

    assert!(result.action.is_none());
    assert!(result.message.is_none());
    assert_eq!(state.submission, SubmissionStatus::Idle);
    assert!(state.results.grants.is_empty());
}

#[test]
fn test_submit_valid_form_starts_loading() {
    let mut state = filled_state();
    assert!(state.form.is_valid());

    let result = update(&mut state, Message::Submit);

    match result.action {
        Some(UpdateAction::MatchGrants { request_id, form }) => {
            assert_eq!(state.pending_match(), Some(request_id));
            assert_eq!(form.focus_area, FocusArea::Climate);
            assert_eq!(form.organization_type, OrganizationType::Nonprofit);
            assert_eq!(form.email, "a@b.com");
        }
        other => panic!("expected MatchGrants, got {:?}", other),
    }
    assert!(state.is_submitting());
    // Templates are held until the match answers, but not shown yet
    assert_eq!(state.results.source, ResultSource::Templates);
    assert!(!state.results_visible());
}

#[test]
fn test_second_submit_while_loading_is_ignored() {
    let mut state = filled_state();
    let first = submit(&mut state);

    let result = update(&mut state, Message::Submit);

    assert!(result.action.is_none());
    assert_eq!(state.pending_match(), Some(first));
}

#[test]
fn test_match_success_shows_exact_grants_in_order() {
    let mut state = filled_state();
    let request_id = submit(&mut state);
    let grants = vec![grant(7, "Z", None), grant(3, "Y", None), grant(9, "X", None)];

    update(
        &mut state,
        Message::MatchSucceeded {
            request_id,
            grants: grants.clone(),
        },
    );

    assert!(state.results_visible());
    assert_eq!(state.results.grants, grants);
    assert_eq!(state.results.source, ResultSource::Matched);
    assert_eq!(state.focus, LandingFocus::Results);
    assert!(state.last_match_error.is_none());
}

#[test]
fn test_match_failure_shows_templates_for_submission() {
    let mut state = filled_state();
    let request_id = submit(&mut state);

    update(
        &mut state,
        Message::MatchFailed {
            request_id,
            error: "connection refused".into(),
        },
    );

    let expected = fallback_grants(
        FocusArea::Climate,
        OrganizationType::Nonprofit,
        Local::now().date_naive(),
    );
    let titles: Vec<_> = state.results.grants.iter().map(|g| &g.title).collect();
    let expected_titles: Vec<_> = expected.iter().map(|g| &g.title).collect();

    assert!(state.results_visible());
    assert_eq!(state.results.source, ResultSource::Templates);
    assert_eq!(titles, expected_titles);
    assert!(state.results.grants.len() <= 10);
    assert_eq!(state.last_match_error.as_deref(), Some("connection refused"));
}

#[test]
fn test_empty_match_falls_back_to_templates() {
    let mut state = filled_state();
    let request_id = submit(&mut state);

    update(
        &mut state,
        Message::MatchSucceeded {
            request_id,
            grants: Vec::new(),
        },
    );

    assert!(state.results_visible());
    assert_eq!(state.results.source, ResultSource::Templates);
    assert!(!state.results.grants.is_empty());
}

#[test]
fn test_stale_match_result_is_discarded() {
    let mut state = filled_state();
    let request_id = submit(&mut state);
    let stale = RequestId::new(request_id.value() + 100);

    update(
        &mut state,
        Message::MatchSucceeded {
            request_id: stale,
            grants: vec![grant(1, "Late", None)],
        },
    );

    assert!(state.is_submitting());
    assert_eq!(state.results.source, ResultSource::Templates);
}

// ─────────────────────────────────────────────────────────
// Result cards & upsell
// ─────────────────────────────────────────────────────────

#[test]
fn test_interactions_before_results_are_ignored() {
    let mut state = AppState::new();
    interact(&mut state, 0, CardInteraction::Save);
    assert_eq!(state.interactions.count(), 0);
}

#[test]
fn test_second_interaction_opens_modal_once() {
    let mut state = state_with_results();

    interact(&mut state, 0, CardInteraction::Save);
    assert!(!state.upgrade.is_visible());

    interact(&mut state, 1, CardInteraction::Save);
    assert_eq!(state.upgrade.phase(), UpgradePhase::Idle);
    assert_eq!(state.upgrade.email(), "a@b.com");

    update(&mut state, Message::DismissUpgrade);
    assert!(!state.upgrade.is_visible());

    for _ in 0..5 {
        interact(&mut state, 2, CardInteraction::Save);
    }
    assert!(!state.upgrade.is_visible());
    assert_eq!(state.interactions.count(), 7);
}

#[test]
fn test_view_with_link_opens_url() {
    let mut state = state_with_results();

    let result = interact(&mut state, 0, CardInteraction::View);

    match result.action {
        Some(UpdateAction::OpenUrl { url }) => assert_eq!(url.as_str(), "https://a.example.org/"),
        other => panic!("expected OpenUrl, got {:?}", other),
    }
    assert_eq!(state.last_interaction, Some(CardInteraction::View));
}

#[test]
fn test_view_without_usable_link_sets_notice() {
    let mut state = state_with_results();

    assert!(interact(&mut state, 1, CardInteraction::View).action.is_none());
    assert_eq!(
        state.notice.as_deref(),
        Some("No link available for this grant")
    );

    state.notice = None;
    assert!(interact(&mut state, 2, CardInteraction::View).action.is_none());
    assert!(state.notice.is_some());
    // Both still count
    assert_eq!(state.interactions.count(), 2);
}

#[test]
fn test_copy_produces_clipboard_action() {
    let mut state = state_with_results();

    let result = interact(&mut state, 1, CardInteraction::Copy);

    let expected = state.results.grants[1].clipboard_text();
    assert_eq!(
        result.action,
        Some(UpdateAction::CopyToClipboard {
            grant_id: 2,
            text: expected,
        })
    );
    assert_eq!(state.notice.as_deref(), Some("Copied to clipboard"));
}

#[test]
fn test_save_records_grant() {
    let mut state = state_with_results();
    interact(&mut state, 2, CardInteraction::Save);
    assert!(state.results.is_saved(3));
    assert_eq!(state.results.selected, 2);
    assert_eq!(state.notice.as_deref(), Some("Grant saved"));
}

#[test]
fn test_resubmit_clears_saved_grants() {
    let mut state = state_with_results();
    interact(&mut state, 0, CardInteraction::Save);
    assert!(state.results.is_saved(1));

    let request_id = submit(&mut state);
    update(
        &mut state,
        Message::MatchSucceeded {
            request_id,
            grants: vec![grant(1, "Totally different grant", None)],
        },
    );

    assert!(!state.results.is_saved(1));
    assert!(state.results.saved.is_empty());
}

#[test]
fn test_out_of_range_card_is_ignored() {
    let mut state = state_with_results();
    let result = interact(&mut state, 10, CardInteraction::Save);
    assert!(result.action.is_none());
    assert_eq!(state.interactions.count(), 0);
}

fn open_modal(state: &mut AppState) {
    interact(state, 0, CardInteraction::Save);
    interact(state, 0, CardInteraction::Save);
    assert!(state.upgrade.is_visible());
}

fn confirm(state: &mut AppState) -> RequestId {
    match update(state, Message::ConfirmUpgrade).action {
        Some(UpdateAction::CreateCheckoutSession { request_id, email }) => {
            assert_eq!(email, "a@b.com");
            request_id
        }
        other => panic!("expected CreateCheckoutSession, got {:?}", other),
    }
}

#[test]
fn test_confirm_requests_checkout_session() {
    let mut state = state_with_results();
    open_modal(&mut state);

    let request_id = confirm(&mut state);

    assert_eq!(state.upgrade.phase(), UpgradePhase::Loading { request_id });
    // A second confirm while loading does nothing
    assert!(update(&mut state, Message::ConfirmUpgrade).action.is_none());
}

#[test]
fn test_dismiss_while_loading_is_ignored() {
    let mut state = state_with_results();
    open_modal(&mut state);
    confirm(&mut state);

    update(&mut state, Message::DismissUpgrade);

    assert!(state.upgrade.is_loading());
}

#[test]
fn test_checkout_failure_returns_to_idle() {
    let mut state = state_with_results();
    open_modal(&mut state);
    let request_id = confirm(&mut state);

    update(
        &mut state,
        Message::CheckoutFailed {
            request_id,
            error: "stripe down".into(),
        },
    );

    assert_eq!(state.upgrade.phase(), UpgradePhase::Idle);
    assert!(state.upgrade.is_visible());
    assert_eq!(state.last_checkout_error.as_deref(), Some("stripe down"));
    assert_eq!(state.phase, AppPhase::Running);
}

#[test]
fn test_checkout_success_navigates_then_finishes() {
    let mut state = state_with_results();
    open_modal(&mut state);
    let request_id = confirm(&mut state);
    let url = url::Url::parse("https://checkout.stripe.com/c/pay/cs_test").unwrap();

    let result = update(
        &mut state,
        Message::CheckoutSessionCreated {
            request_id,
            url: url.clone(),
        },
    );
    assert_eq!(
        result.action,
        Some(UpdateAction::OpenCheckout {
            request_id,
            url: url.clone(),
        })
    );
    assert!(state.upgrade.is_loading());

    update(
        &mut state,
        Message::CheckoutRedirected {
            request_id,
            url: url.clone(),
        },
    );
    assert!(!state.upgrade.is_visible());
    assert_eq!(state.redirected_to, Some(url));
    assert_eq!(state.phase, AppPhase::Redirected);
    assert!(state.is_finished());
    assert!(!state.should_quit());
}

#[test]
fn test_stale_checkout_session_is_discarded() {
    let mut state = state_with_results();
    open_modal(&mut state);
    let request_id = confirm(&mut state);
    let url = url::Url::parse("https://checkout.stripe.com/old").unwrap();

    let result = update(
        &mut state,
        Message::CheckoutSessionCreated {
            request_id: RequestId::new(request_id.value() + 1),
            url,
        },
    );

    assert!(result.action.is_none());
    assert_eq!(state.upgrade.phase(), UpgradePhase::Loading { request_id });
}

#[test]
fn test_navigation_failure_sets_notice() {
    let mut state = state_with_results();
    update(
        &mut state,
        Message::NavigationFailed {
            url: "https://a.example.org".into(),
            error: "no opener".into(),
        },
    );
    assert_eq!(state.notice.as_deref(), Some("Could not open browser"));
}

// ─────────────────────────────────────────────────────────
// Keys
// ─────────────────────────────────────────────────────────

fn key(state: &mut AppState, key: InputKey) -> UpdateResult {
    update(state, Message::Key(key))
}

#[test]
fn test_typing_fills_focused_text_field() {
    let mut state = AppState::new();
    for c in "Solar".chars() {
        key(&mut state, InputKey::Char(c));
    }
    key(&mut state, InputKey::Backspace);
    assert_eq!(state.form.project_summary(), "Sola");
}

#[test]
fn test_tab_walks_fields_then_submit() {
    let mut state = AppState::new();
    let mut seen = vec![state.focus];
    for _ in 0..5 {
        key(&mut state, InputKey::Tab);
        seen.push(state.focus);
    }
    assert_eq!(
        seen,
        vec![
            LandingFocus::Field(FormField::ProjectSummary),
            LandingFocus::Field(FormField::OrganizationType),
            LandingFocus::Field(FormField::FocusArea),
            LandingFocus::Field(FormField::Email),
            LandingFocus::Submit,
            LandingFocus::Field(FormField::ProjectSummary),
        ]
    );
}

#[test]
fn test_focus_includes_results_once_visible() {
    let mut state = state_with_results();
    state.focus = LandingFocus::Submit;
    key(&mut state, InputKey::Tab);
    assert_eq!(state.focus, LandingFocus::Results);
    key(&mut state, InputKey::BackTab);
    assert_eq!(state.focus, LandingFocus::Submit);
}

#[test]
fn test_select_fields_cycle_with_arrows() {
    let mut state = AppState::new();
    state.focus = LandingFocus::Field(FormField::FocusArea);

    key(&mut state, InputKey::Right);
    let first = state.form.focus_area();
    assert!(first.is_some());

    key(&mut state, InputKey::Right);
    key(&mut state, InputKey::Left);
    assert_eq!(state.form.focus_area(), first);

    // Typing into a select does nothing
    key(&mut state, InputKey::Char('x'));
    assert_eq!(state.form.focus_area(), first);
}

#[test]
fn test_enter_on_submit_button_submits() {
    let mut state = filled_state();
    state.focus = LandingFocus::Submit;
    let result = key(&mut state, InputKey::Enter);
    assert!(matches!(result.message, Some(Message::Submit)));
}

#[test]
fn test_result_keys_map_to_interactions() {
    let mut state = state_with_results();
    assert_eq!(state.focus, LandingFocus::Results);

    key(&mut state, InputKey::Char('j'));
    assert_eq!(state.results.selected, 1);

    let result = key(&mut state, InputKey::Char('s'));
    assert!(matches!(
        result.message,
        Some(Message::CardInteraction {
            index: 1,
            kind: CardInteraction::Save
        })
    ));
    let result = key(&mut state, InputKey::Char('c'));
    assert!(matches!(
        result.message,
        Some(Message::CardInteraction {
            kind: CardInteraction::Copy,
            ..
        })
    ));
    let result = key(&mut state, InputKey::Enter);
    assert!(matches!(
        result.message,
        Some(Message::CardInteraction {
            kind: CardInteraction::View,
            ..
        })
    ));
}

#[test]
fn test_modal_captures_keys() {
    let mut state = state_with_results();
    open_modal(&mut state);

    // Result navigation is blocked while the modal is up
    assert!(key(&mut state, InputKey::Char('j')).message.is_none());
    assert!(matches!(
        key(&mut state, InputKey::Esc).message,
        Some(Message::DismissUpgrade)
    ));
    assert!(matches!(
        key(&mut state, InputKey::Enter).message,
        Some(Message::ConfirmUpgrade)
    ));
}

#[test]
fn test_modal_ignores_keys_while_loading() {
    let mut state = state_with_results();
    open_modal(&mut state);
    confirm(&mut state);

    assert!(key(&mut state, InputKey::Esc).message.is_none());
    assert!(key(&mut state, InputKey::Enter).message.is_none());
}

// ─────────────────────────────────────────────────────────
// Dashboard
// ─────────────────────────────────────────────────────────

fn dashboard_state() -> AppState {
    let mut state = AppState::new();
    let result = update(&mut state, Message::ShowDashboard);
    assert!(matches!(
        result.action,
        Some(UpdateAction::EnterDashboard { stats_days: 7, .. })
    ));
    state
}

#[test]
fn test_dashboard_toggle_keys() {
    let mut state = AppState::new();
    assert!(matches!(
        key(&mut state, InputKey::CharCtrl('d')).message,
        Some(Message::ShowDashboard)
    ));

    let mut state = dashboard_state();
    assert_eq!(state.screen, Screen::Dashboard);
    assert!(state.dashboard.loading);
    assert!(matches!(
        key(&mut state, InputKey::Esc).message,
        Some(Message::ShowLanding)
    ));

    let result = update(&mut state, Message::ShowLanding);
    assert_eq!(result.action, Some(UpdateAction::LeaveDashboard));
    assert_eq!(state.screen, Screen::Landing);
}

#[test]
fn test_dashboard_tab_keys() {
    let mut state = dashboard_state();
    assert!(matches!(
        key(&mut state, InputKey::Tab).message,
        Some(Message::SelectDashboardTab(DashboardTab::Control))
    ));
    assert!(matches!(
        key(&mut state, InputKey::Char('3')).message,
        Some(Message::SelectDashboardTab(DashboardTab::Statistics))
    ));
}

#[test]
fn test_refresh_requests_fetch() {
    let mut state = dashboard_state();
    let result = update(&mut state, Message::RefreshDashboard);
    assert_eq!(
        result.action,
        Some(UpdateAction::RefreshDashboard { stats_days: 7 })
    );

    update(&mut state, Message::ShowLanding);
    assert!(update(&mut state, Message::RefreshDashboard).action.is_none());
}

#[test]
fn test_control_tab_runs_selected_command() {
    let mut state = dashboard_state();
    update(&mut state, Message::SelectDashboardTab(DashboardTab::Control));

    key(&mut state, InputKey::Down);
    let result = key(&mut state, InputKey::Enter);

    assert!(matches!(
        result.message,
        Some(Message::RunDashboardCommand(DashboardCommand::StopSession))
    ));
}

#[test]
fn test_remove_duplicates_needs_confirmation() {
    let mut state = dashboard_state();

    let result = update(
        &mut state,
        Message::RunDashboardCommand(DashboardCommand::RemoveDuplicates),
    );
    assert!(result.action.is_none());
    assert_eq!(
        state.dashboard.pending_confirm,
        Some(DashboardCommand::RemoveDuplicates)
    );

    let result = key(&mut state, InputKey::Char('y'));
    assert!(matches!(result.message, Some(Message::ConfirmDashboardCommand)));

    let result = update(&mut state, Message::ConfirmDashboardCommand);
    assert_eq!(
        result.action,
        Some(UpdateAction::RunDashboardCommand(
            DashboardCommand::RemoveDuplicates
        ))
    );
    assert!(state.dashboard.command_in_flight);
    assert!(state.dashboard.pending_confirm.is_none());
}

#[test]
fn test_cancelled_confirmation_runs_nothing() {
    let mut state = dashboard_state();
    update(
        &mut state,
        Message::RunDashboardCommand(DashboardCommand::RemoveDuplicates),
    );

    update(&mut state, Message::CancelDashboardCommand);

    assert!(state.dashboard.pending_confirm.is_none());
    assert!(update(&mut state, Message::ConfirmDashboardCommand)
        .action
        .is_none());
}

#[test]
fn test_command_outcome_sets_notice() {
    let mut state = dashboard_state();
    update(
        &mut state,
        Message::RunDashboardCommand(DashboardCommand::StopSession),
    );

    // A second command waits for the first
    assert!(update(
        &mut state,
        Message::RunDashboardCommand(DashboardCommand::StopSession)
    )
    .action
    .is_none());

    update(
        &mut state,
        Message::DashboardCommandFailed {
            command: DashboardCommand::StopSession,
            error: "HTTP 500".into(),
        },
    );
    assert!(!state.dashboard.command_in_flight);
    assert_eq!(
        state.dashboard.notice.as_deref(),
        Some("Stop session failed: HTTP 500")
    );
}

#[test]
fn test_status_failure_is_recorded_not_fatal() {
    let mut state = dashboard_state();
    update(
        &mut state,
        Message::DashboardStatusFailed {
            error: "connection refused".into(),
        },
    );
    assert!(!state.dashboard.loading);
    assert_eq!(
        state.dashboard.last_error.as_deref(),
        Some("connection refused")
    );
    assert_eq!(state.phase, AppPhase::Running);
}

#[test]
fn test_status_after_leaving_is_discarded() {
    let mut state = dashboard_state();
    update(&mut state, Message::ShowLanding);

    update(
        &mut state,
        Message::DashboardStatusFailed {
            error: "late".into(),
        },
    );

    assert!(state.dashboard.last_error.is_none());
}

#[test]
fn test_paste_fills_focused_text_field() {
    let mut state = AppState::new();
    state.focus = LandingFocus::Field(FormField::Email);

    update(&mut state, Message::Paste("grants@example.org".into()));
    assert_eq!(state.form.email(), "grants@example.org");

    // Select fields ignore pasted text
    state.focus = LandingFocus::Field(FormField::FocusArea);
    update(&mut state, Message::Paste("climate".into()));
    assert_eq!(state.form.focus_area(), None);
}
