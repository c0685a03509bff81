//! Upgrade modal
//!
//! Rendered over the whole screen while the modal is visible. In the loading
//! state the buttons are replaced by a spinner and input is ignored.

use celfund_app::upsell::UpgradeModalState;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::theme::{palette, styles};

use super::modal_overlay;
use super::spinner_frame;

const MODAL_WIDTH: u16 = 64;
const MODAL_HEIGHT: u16 = 19;

pub const FEATURES: [&str; 6] = [
    "20 additional matching grants",
    "Deadline tracking & reminders",
    "AI-powered proposal drafting",
    "Priority matching algorithm",
    "Export to PDF & Word",
    "Grant application templates",
];

pub struct UpgradeModal<'a> {
    modal: &'a UpgradeModalState,
    tick: u64,
}

impl<'a> UpgradeModal<'a> {
    pub fn new(modal: &'a UpgradeModalState, tick: u64) -> Self {
        Self { modal, tick }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                "Get instant access to more funding opportunities and premium features",
                styles::text_secondary(),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled(
                    "$39",
                    Style::default()
                        .fg(palette::UPGRADE)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("/month", styles::text_secondary()),
                Span::styled("  Cancel anytime, no questions asked", styles::text_muted()),
            ]),
            Line::default(),
        ];

        lines.extend(FEATURES.iter().map(|feature| {
            Line::from(vec![
                Span::styled("  ✓ ", styles::status_green()),
                Span::styled(*feature, styles::text_primary()),
            ])
        }));
        lines.push(Line::default());

        if self.modal.is_loading() {
            lines.push(Line::from(vec![
                Span::styled(format!("{} ", spinner_frame(self.tick)), styles::accent()),
                Span::styled("Opening secure checkout…", styles::text_secondary()),
            ]));
        } else {
            lines.push(Line::from(vec![
                Span::styled(" Upgrade Now ", styles::focused_selected()),
                Span::raw("   "),
                Span::styled(" Continue Free ", styles::text_secondary()),
            ]));
            lines.push(Line::default());
            lines.push(Line::from(vec![
                Span::styled("Enter", styles::keybinding()),
                Span::styled(" upgrade  ", styles::text_muted()),
                Span::styled("Esc", styles::keybinding()),
                Span::styled(" continue free", styles::text_muted()),
            ]));
        }

        if !self.modal.email().is_empty() {
            lines.push(Line::from(Span::styled(
                format!("Receipt goes to {}", self.modal.email()),
                styles::text_muted(),
            )));
        }
        lines
    }
}

impl Widget for UpgradeModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.modal.is_visible() {
            return;
        }

        let modal_area = modal_overlay::centered_rect(MODAL_WIDTH, MODAL_HEIGHT, area);
        modal_overlay::prepare_modal(buf, area, modal_area);

        let block = styles::modal_block(" ⚡ Unlock 20 More Grants ");
        let inner = block.inner(modal_area);
        block.render(modal_area, buf);

        Paragraph::new(self.lines())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use celfund_app::state::RequestId;

    #[test]
    fn test_hidden_modal_renders_nothing() {
        let modal = UpgradeModalState::default();
        let mut term = TestTerminal::new();
        term.render_widget(UpgradeModal::new(&modal, 0), term.area());

        assert!(!term.buffer_contains("Unlock"));
    }

    #[test]
    fn test_idle_modal_shows_offer_and_buttons() {
        let mut modal = UpgradeModalState::default();
        modal.open("a@b.com");
        let mut term = TestTerminal::new();
        term.render_widget(UpgradeModal::new(&modal, 0), term.area());

        assert!(term.buffer_contains("Unlock 20 More Grants"));
        assert!(term.buffer_contains("$39"));
        assert!(term.buffer_contains("Priority matching algorithm"));
        assert!(term.buffer_contains("Upgrade Now"));
        assert!(term.buffer_contains("Continue Free"));
    }

    #[test]
    fn test_loading_modal_hides_buttons() {
        let mut modal = UpgradeModalState::default();
        modal.open("a@b.com");
        modal.begin_checkout(RequestId::new(1));
        let mut term = TestTerminal::new();
        term.render_widget(UpgradeModal::new(&modal, 3), term.area());

        assert!(term.buffer_contains("Opening secure checkout"));
        assert!(!term.buffer_contains("Continue Free"));
    }
}
