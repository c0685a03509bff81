//! Key event handlers for each screen

use celfund_core::FormField;

use crate::dashboard_state::{DashboardCommand, DashboardTab};
use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, CardInteraction, LandingFocus, Screen};

use super::UpdateResult;

/// Convert key events to state changes or follow-up messages
pub fn handle_key(state: &mut AppState, key: InputKey) -> UpdateResult {
    if matches!(key, InputKey::CharCtrl('c') | InputKey::CharCtrl('q')) {
        return UpdateResult::message(Message::Quit);
    }

    // The modal captures all input while visible
    if state.upgrade.is_visible() {
        return handle_key_upgrade_modal(state, key);
    }

    match state.screen {
        Screen::Landing => handle_key_landing(state, key),
        Screen::Dashboard => handle_key_dashboard(state, key),
    }
}

/// Insert pasted text into the focused text field, one char at a time
pub fn handle_paste(state: &mut AppState, text: &str) -> UpdateResult {
    if state.upgrade.is_visible() || state.screen != Screen::Landing {
        return UpdateResult::none();
    }
    if let LandingFocus::Field(field) = state.focus {
        if field.is_text() {
            text.chars()
                .filter(|c| !c.is_control())
                .for_each(|c| state.form.push_char(field, c));
        }
    }
    UpdateResult::none()
}

fn handle_key_upgrade_modal(state: &AppState, key: InputKey) -> UpdateResult {
    if state.upgrade.is_loading() {
        return UpdateResult::none();
    }
    match key {
        InputKey::Enter | InputKey::Char('u') | InputKey::Char('U') => {
            UpdateResult::message(Message::ConfirmUpgrade)
        }
        InputKey::Esc | InputKey::Char('n') | InputKey::Char('N') => {
            UpdateResult::message(Message::DismissUpgrade)
        }
        _ => UpdateResult::none(),
    }
}

// ─────────────────────────────────────────────────────────────────
// Landing page
// ─────────────────────────────────────────────────────────────────

fn handle_key_landing(state: &mut AppState, key: InputKey) -> UpdateResult {
    if matches!(key, InputKey::CharCtrl('d') | InputKey::F(2)) {
        return UpdateResult::message(Message::ShowDashboard);
    }

    match state.focus {
        LandingFocus::Field(field) => handle_key_field(state, field, key),
        LandingFocus::Submit => handle_key_submit(state, key),
        LandingFocus::Results => handle_key_results(state, key),
    }
}

fn handle_key_field(state: &mut AppState, field: FormField, key: InputKey) -> UpdateResult {
    match key {
        InputKey::Tab | InputKey::Down => focus_next(state),
        InputKey::BackTab | InputKey::Up => focus_prev(state),
        InputKey::Enter => focus_next(state),
        InputKey::Backspace => state.form.backspace(field),
        InputKey::Left if !field.is_text() => state.form.cycle_option(field, false),
        InputKey::Right if !field.is_text() => state.form.cycle_option(field, true),
        InputKey::Char(' ') if !field.is_text() => state.form.cycle_option(field, true),
        InputKey::Char(c) if field.is_text() => state.form.push_char(field, c),
        _ => {}
    }
    UpdateResult::none()
}

fn handle_key_submit(state: &mut AppState, key: InputKey) -> UpdateResult {
    match key {
        InputKey::Enter | InputKey::Char(' ') => return UpdateResult::message(Message::Submit),
        InputKey::Tab | InputKey::Down => focus_next(state),
        InputKey::BackTab | InputKey::Up => focus_prev(state),
        _ => {}
    }
    UpdateResult::none()
}

fn handle_key_results(state: &mut AppState, key: InputKey) -> UpdateResult {
    let index = state.results.selected;
    let interaction = |kind| Message::CardInteraction { index, kind };

    match key {
        InputKey::Down | InputKey::Right | InputKey::Char('j') => state.results.select_next(),
        InputKey::Up | InputKey::Left | InputKey::Char('k') => state.results.select_prev(),
        InputKey::Enter | InputKey::Char('v') => {
            return UpdateResult::message(interaction(CardInteraction::View))
        }
        InputKey::Char('c') => return UpdateResult::message(interaction(CardInteraction::Copy)),
        InputKey::Char('s') => return UpdateResult::message(interaction(CardInteraction::Save)),
        InputKey::Tab => focus_next(state),
        InputKey::BackTab | InputKey::Esc => focus_prev(state),
        InputKey::Char('q') => return UpdateResult::message(Message::Quit),
        _ => {}
    }
    UpdateResult::none()
}

/// Summary -> Org -> Focus -> Email -> Submit -> Results (when shown) -> Summary
fn focus_next(state: &mut AppState) {
    state.focus = match state.focus {
        LandingFocus::Field(field) => field
            .next()
            .map(LandingFocus::Field)
            .unwrap_or(LandingFocus::Submit),
        LandingFocus::Submit if state.results_visible() => LandingFocus::Results,
        LandingFocus::Submit | LandingFocus::Results => {
            LandingFocus::Field(FormField::ProjectSummary)
        }
    };
}

fn focus_prev(state: &mut AppState) {
    state.focus = match state.focus {
        LandingFocus::Field(field) => match field.prev() {
            Some(prev) => LandingFocus::Field(prev),
            None if state.results_visible() => LandingFocus::Results,
            None => LandingFocus::Submit,
        },
        LandingFocus::Submit => LandingFocus::Field(FormField::Email),
        LandingFocus::Results => LandingFocus::Submit,
    };
}

// ─────────────────────────────────────────────────────────────────
// Dashboard
// ─────────────────────────────────────────────────────────────────

fn handle_key_dashboard(state: &mut AppState, key: InputKey) -> UpdateResult {
    if state.dashboard.pending_confirm.is_some() {
        return match key {
            InputKey::Char('y') | InputKey::Char('Y') => {
                UpdateResult::message(Message::ConfirmDashboardCommand)
            }
            InputKey::Char('n') | InputKey::Char('N') | InputKey::Esc => {
                UpdateResult::message(Message::CancelDashboardCommand)
            }
            _ => UpdateResult::none(),
        };
    }

    let tab = state.dashboard.tab;
    match key {
        InputKey::Esc | InputKey::Char('b') | InputKey::F(2) | InputKey::CharCtrl('d') => {
            UpdateResult::message(Message::ShowLanding)
        }
        InputKey::Char('q') => UpdateResult::message(Message::Quit),
        InputKey::Char('r') => UpdateResult::message(Message::RefreshDashboard),
        InputKey::Tab | InputKey::Right => {
            UpdateResult::message(Message::SelectDashboardTab(tab.next()))
        }
        InputKey::BackTab | InputKey::Left => {
            UpdateResult::message(Message::SelectDashboardTab(tab.prev()))
        }
        InputKey::Char(c @ '1'..='3') => {
            let index = (c as usize) - ('1' as usize);
            UpdateResult::message(Message::SelectDashboardTab(DashboardTab::ALL[index]))
        }
        _ if tab == DashboardTab::Control => handle_key_controls(state, key),
        _ => UpdateResult::none(),
    }
}

fn handle_key_controls(state: &mut AppState, key: InputKey) -> UpdateResult {
    let controls = DashboardCommand::controls(state.settings.dashboard.session_grants_limit);
    match key {
        InputKey::Down | InputKey::Char('j') => {
            state.dashboard.select_next_control(controls.len());
            UpdateResult::none()
        }
        InputKey::Up | InputKey::Char('k') => {
            state.dashboard.select_prev_control(controls.len());
            UpdateResult::none()
        }
        InputKey::Enter => match controls.get(state.dashboard.selected_control) {
            Some(command) => UpdateResult::message(Message::RunDashboardCommand(*command)),
            None => UpdateResult::none(),
        },
        _ => UpdateResult::none(),
    }
}
