//! Main render/view function (View in TEA pattern)


use celfund_app::state::{AppState, Screen};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::theme::palette;
use crate::{layout, widgets};

/// Render the complete UI (View function in TEA)
///
/// Pure: reads the state and draws; overlays are drawn last so they sit on
/// top of the screen they belong to.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Fill entire terminal with deepest background color
    let bg_block = Block::default().style(Style::default().bg(palette::DEEPEST_BG));
    frame.render_widget(bg_block, area);

    let areas = layout::create(area);
    frame.render_widget(widgets::MainHeader::new(state.screen), areas.header);

    match state.screen {
        Screen::Landing => {
            let landing = layout::landing(areas.body);
            frame.render_widget(widgets::FormPanel::new(state), landing.form);
            frame.render_widget(widgets::GrantCards::new(state), landing.results);
        }
        Screen::Dashboard => {
            let dashboard = widgets::Dashboard::new(
                &state.dashboard,
                state.settings.dashboard.session_grants_limit,
                state.settings.dashboard.stats_days,
            )
            .tick(state.tick);
            frame.render_widget(dashboard, areas.body);
        }
    }

    frame.render_widget(widgets::StatusBar::new(state), areas.status);

    // Overlays
    if state.upgrade.is_visible() {
        frame.render_widget(widgets::UpgradeModal::new(&state.upgrade, state.tick), area);
    } else if let Some(command) = state.dashboard.pending_confirm {
        if state.screen == Screen::Dashboard {
            frame.render_widget(widgets::ConfirmDialog::new(command), area);
        }
    }
}
