//! Screen layout definitions for the TUI

use ratatui::layout::{Constraint, Layout, Rect};

/// Below this width the landing page stacks form and results vertically
pub const SIDE_BY_SIDE_MIN_WIDTH: u16 = 100;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title bar (app name + screen name + keybindings)
    pub header: Rect,

    /// Landing page or dashboard
    pub body: Rect,

    /// One-line status and notices
    pub status: Rect,
}

/// Create the main screen layout
pub fn create(area: Rect) -> ScreenAreas {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Header (glass container)
        Constraint::Min(3),    // Body
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    ScreenAreas {
        header: chunks[0],
        body: chunks[1],
        status: chunks[2],
    }
}

/// Form and results areas of the landing page
#[derive(Debug, Clone, Copy)]
pub struct LandingAreas {
    pub form: Rect,
    pub results: Rect,
}

/// Split the landing body: side by side on wide terminals, stacked otherwise
pub fn landing(body: Rect) -> LandingAreas {
    if body.width >= SIDE_BY_SIDE_MIN_WIDTH {
        let chunks =
            Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
                .split(body);
        LandingAreas {
            form: chunks[0],
            results: chunks[1],
        }
    } else {
        // Form needs 4 fields + submit + borders
        let chunks = Layout::vertical([Constraint::Length(12), Constraint::Min(3)]).split(body);
        LandingAreas {
            form: chunks[0],
            results: chunks[1],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_layout() {
        let area = Rect::new(0, 0, 80, 24);
        let layout = create(area);

        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.body.y, 3);
        assert_eq!(layout.body.height, 20); // 24 - 3 - 1
        assert_eq!(layout.status.height, 1);
        assert_eq!(layout.status.y, 23);
    }

    #[test]
    fn test_create_layout_small_terminal() {
        let area = Rect::new(0, 0, 40, 8);
        let layout = create(area);

        assert_eq!(layout.header.height, 3);
        assert!(layout.body.height >= 3);
        assert_eq!(layout.status.height, 1);
    }

    #[test]
    fn test_landing_stacks_on_narrow_terminal() {
        let body = Rect::new(0, 3, 80, 20);
        let areas = landing(body);

        assert_eq!(areas.form.width, 80);
        assert_eq!(areas.form.height, 12);
        assert_eq!(areas.results.y, 15);
        assert_eq!(areas.results.height, 8);
    }

    #[test]
    fn test_landing_side_by_side_on_wide_terminal() {
        let body = Rect::new(0, 3, 120, 30);
        let areas = landing(body);

        assert_eq!(areas.form.height, 30);
        assert_eq!(areas.results.height, 30);
        assert_eq!(areas.form.width, 48);
        assert_eq!(areas.results.x, 48);
    }
}
