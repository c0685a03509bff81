//! Header bar widget
//!
//! Shows the app title, the current screen, and the global keybindings.

use celfund_app::state::Screen;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::{palette, styles};

/// Main header showing app title, screen name, and keybindings
pub struct MainHeader {
    screen: Screen,
}

impl MainHeader {
    pub fn new(screen: Screen) -> Self {
        Self { screen }
    }

    fn screen_label(&self) -> &'static str {
        match self.screen {
            Screen::Landing => "Find grants",
            Screen::Dashboard => "Scraping dashboard",
        }
    }

    fn keybindings(&self) -> Vec<Span<'static>> {
        let pairs: &[(&str, &str)] = match self.screen {
            Screen::Landing => &[("Tab", "next"), ("F2", "dashboard"), ("^C", "quit")],
            Screen::Dashboard => &[("1-3", "tabs"), ("r", "refresh"), ("Esc", "back")],
        };

        let mut spans = Vec::new();
        for (i, (key, label)) in pairs.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", styles::text_muted()));
            }
            spans.push(Span::styled(*key, styles::keybinding()));
            spans.push(Span::styled(format!(" {}", label), styles::text_secondary()));
        }
        spans
    }
}

impl Widget for MainHeader {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let title = Line::from(vec![
            Span::styled("✦ CelFund", styles::accent_bold()),
            Span::styled(" │ ", styles::text_muted()),
            Span::styled(self.screen_label(), styles::text_primary()),
        ]);
        Paragraph::new(title).render(inner, buf);

        // Keybindings only when they fit beside the title
        let keys = Line::from(self.keybindings());
        if inner.width as usize > keys.width() + 32 {
            Paragraph::new(keys)
                .alignment(Alignment::Right)
                .render(inner, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_header_renders_title() {
        let mut term = TestTerminal::new();
        term.render_widget(MainHeader::new(Screen::Landing), term.area());

        assert!(term.buffer_contains("CelFund"));
        assert!(term.buffer_contains("Find grants"));
    }

    #[test]
    fn test_header_dashboard_keybindings() {
        let mut term = TestTerminal::new();
        term.render_widget(MainHeader::new(Screen::Dashboard), term.area());

        assert!(term.buffer_contains("Scraping dashboard"));
        assert!(term.buffer_contains("refresh"));
    }

    #[test]
    fn test_header_compact_hides_keybindings() {
        let mut term = TestTerminal::compact();
        term.render_widget(MainHeader::new(Screen::Landing), term.area());

        assert!(term.buffer_contains("CelFund"));
        assert!(!term.buffer_contains("dashboard"));
    }
}
