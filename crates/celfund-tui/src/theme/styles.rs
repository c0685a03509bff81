//! Semantic style builders.

use celfund_app::state::AppPhase;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

pub fn text_bright() -> Style {
    Style::default()
        .fg(palette::TEXT_BRIGHT)
        .add_modifier(Modifier::BOLD)
}

// --- Border styles ---
pub fn border_inactive() -> Style {
    Style::default().fg(palette::BORDER_DIM)
}

pub fn border_active() -> Style {
    Style::default().fg(palette::BORDER_ACTIVE)
}

// --- Accent styles ---
pub fn accent() -> Style {
    Style::default().fg(palette::ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

// --- Status styles ---
pub fn status_green() -> Style {
    Style::default().fg(palette::STATUS_GREEN)
}

pub fn status_red() -> Style {
    Style::default().fg(palette::STATUS_RED)
}

pub fn status_yellow() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

// --- Keybinding hint style ---
pub fn keybinding() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

/// "Black on Cyan" - used for focused+selected items across widgets
pub fn focused_selected() -> Style {
    Style::default()
        .fg(palette::CONTRAST_FG)
        .bg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// Primary button; dimmed when it cannot be pressed
pub fn button(enabled: bool, focused: bool) -> Style {
    match (enabled, focused) {
        (true, true) => focused_selected(),
        (true, false) => accent_bold(),
        (false, _) => text_muted(),
    }
}

// --- Block builders ---
pub fn glass_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            border_active()
        } else {
            border_inactive()
        })
}

pub fn modal_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_active())
        .style(Style::default().bg(palette::POPUP_BG))
}

// --- Phase indicator mapping ---

/// Returns `(icon_char, label, Style)` for the given AppPhase.
pub fn phase_indicator(phase: &AppPhase) -> (&'static str, &'static str, Style) {
    match phase {
        AppPhase::Running => ("●", "Ready", status_green().add_modifier(Modifier::BOLD)),
        AppPhase::Redirected => (
            "→",
            "Redirected",
            Style::default()
                .fg(palette::UPGRADE)
                .add_modifier(Modifier::BOLD),
        ),
        AppPhase::Quitting => ("○", "Quitting", text_muted()),
    }
}

/// Busy indicator shown while a request is in flight
pub fn phase_indicator_busy() -> (&'static str, &'static str, Style) {
    ("↻", "Working", status_yellow().add_modifier(Modifier::BOLD))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_indicator_labels() {
        assert_eq!(phase_indicator(&AppPhase::Running).1, "Ready");
        assert_eq!(phase_indicator(&AppPhase::Redirected).1, "Redirected");
        assert_eq!(phase_indicator(&AppPhase::Quitting).1, "Quitting");
    }

    #[test]
    fn test_disabled_button_is_muted() {
        assert_eq!(button(false, true), text_muted());
        assert_eq!(button(true, true), focused_selected());
    }
}
