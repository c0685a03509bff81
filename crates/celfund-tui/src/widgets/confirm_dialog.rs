//! y/n confirmation for destructive dashboard commands

use celfund_app::dashboard_state::DashboardCommand;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::theme::styles;

use super::modal_overlay;

pub struct ConfirmDialog {
    command: DashboardCommand,
}

impl ConfirmDialog {
    pub fn new(command: DashboardCommand) -> Self {
        Self { command }
    }
}

impl Widget for ConfirmDialog {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dialog = modal_overlay::centered_rect(48, 7, area);
        modal_overlay::prepare_modal(buf, area, dialog);

        let block = styles::modal_block(" Confirm ");
        let inner = block.inner(dialog);
        block.render(dialog, buf);

        let lines = vec![
            Line::from(Span::styled(
                format!("{}?", self.command.label()),
                styles::text_bright(),
            )),
            Line::from(Span::styled(
                "This cannot be undone.",
                styles::status_red(),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled("y", styles::keybinding()),
                Span::styled(" confirm   ", styles::text_secondary()),
                Span::styled("n", styles::keybinding()),
                Span::styled(" cancel", styles::text_secondary()),
            ]),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_confirm_dialog_names_command() {
        let mut term = TestTerminal::new();
        term.render_widget(
            ConfirmDialog::new(DashboardCommand::RemoveDuplicates),
            term.area(),
        );

        assert!(term.buffer_contains("Remove duplicate grants?"));
        assert!(term.buffer_contains("cannot be undone"));
        assert!(term.buffer_contains("confirm"));
    }
}
