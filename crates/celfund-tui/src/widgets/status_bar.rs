//! Status bar widget
//!
//! Phase indicator on the left, the latest notice in the middle, funnel
//! progress on the right.

use celfund_app::state::{AppState, Screen};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::styles;

/// Status bar widget showing application state
pub struct StatusBar<'a> {
    state: &'a AppState,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn is_busy(&self) -> bool {
        self.state.is_submitting()
            || self.state.upgrade.is_loading()
            || self.state.dashboard.command_in_flight
    }

    fn state_indicator(&self) -> Span<'static> {
        let (icon, label, style) = if self.is_busy() {
            styles::phase_indicator_busy()
        } else {
            styles::phase_indicator(&self.state.phase)
        };
        Span::styled(format!(" {} {} ", icon, label), style)
    }

    fn notice(&self) -> Option<Span<'static>> {
        let notice = match self.state.screen {
            Screen::Landing => self.state.notice.as_ref(),
            Screen::Dashboard => self
                .state
                .dashboard
                .notice
                .as_ref()
                .or(self.state.notice.as_ref()),
        }?;
        Some(Span::styled(notice.clone(), styles::accent()))
    }

    fn funnel_progress(&self) -> Line<'static> {
        let mut spans = Vec::new();
        let saved = self.state.results.saved.len();
        if saved > 0 {
            spans.push(Span::styled(format!("★ {} saved  ", saved), styles::status_yellow()));
        }
        if self.state.results_visible() {
            spans.push(Span::styled(
                format!("{} matches ", self.state.results.grants.len()),
                styles::text_muted(),
            ));
        }
        Line::from(spans)
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let mut left = vec![self.state_indicator()];
        if let Some(notice) = self.notice() {
            left.push(Span::styled("│ ", styles::text_muted()));
            left.push(notice);
        }
        Paragraph::new(Line::from(left)).render(area, buf);

        let right = self.funnel_progress();
        if right.width() > 0 {
            Paragraph::new(right)
                .alignment(Alignment::Right)
                .render(area, buf);
        }
    }
}
