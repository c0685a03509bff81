//! Widget components for the TUI

pub mod confirm_dialog;
pub mod dashboard;
pub mod form_panel;
pub mod grant_cards;
pub mod header;
pub mod modal_overlay;
pub mod status_bar;
pub mod upgrade_modal;

pub use confirm_dialog::ConfirmDialog;
pub use dashboard::Dashboard;
pub use form_panel::FormPanel;
pub use grant_cards::GrantCards;
pub use header::MainHeader;
pub use status_bar::StatusBar;
pub use upgrade_modal::UpgradeModal;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner glyph for the given tick
pub fn spinner_frame(tick: u64) -> &'static str {
    SPINNER_FRAMES[(tick % SPINNER_FRAMES.len() as u64) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_wraps() {
        assert_eq!(spinner_frame(0), spinner_frame(10));
        assert_ne!(spinner_frame(0), spinner_frame(1));
    }
}
