//! Shared modal overlay utilities.
//!
//! Centering, background dimming, and shadows for the upgrade modal and the
//! dashboard confirmation dialog.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Clear, Widget};

use crate::theme::palette;

/// Center a fixed-size rect within an area.
///
/// If the requested size exceeds the area, clamps to the area dimensions.
///
/// # Examples
/// ```
/// use ratatui::layout::Rect;
/// use celfund_tui::widgets::modal_overlay::centered_rect;
///
/// let area = Rect::new(0, 0, 80, 24);
/// let modal = centered_rect(40, 10, area);
/// assert_eq!(modal, Rect::new(20, 7, 40, 10));
/// ```
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

/// Dim all cells in the given area by overriding their styles.
pub fn dim_background(buf: &mut Buffer, area: Rect) {
    let dim_style = Style::default()
        .fg(palette::TEXT_MUTED)
        .bg(palette::DEEPEST_BG);

    let area = area.intersection(buf.area);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_style(dim_style);
            }
        }
    }
}

/// Render a 1-cell shadow offset to the right and bottom of a modal rect.
pub fn render_shadow(buf: &mut Buffer, modal_rect: Rect) {
    let shadow_style = Style::default().fg(palette::SHADOW).bg(palette::SHADOW);

    // Right edge
    let right_x = modal_rect.right();
    for y in modal_rect.y.saturating_add(1)..=modal_rect.bottom() {
        if let Some(cell) = buf.cell_mut((right_x, y)) {
            cell.set_char(' ');
            cell.set_style(shadow_style);
        }
    }

    // Bottom edge
    let bottom_y = modal_rect.bottom();
    for x in modal_rect.x.saturating_add(1)..=modal_rect.right() {
        if let Some(cell) = buf.cell_mut((x, bottom_y)) {
            cell.set_char(' ');
            cell.set_style(shadow_style);
        }
    }
}

/// Clear a rect and prepare it for modal content.
pub fn clear_area(buf: &mut Buffer, area: Rect) {
    Clear.render(area, buf);
}

/// Dim the whole buffer, then clear and shadow `modal_rect`
pub fn prepare_modal(buf: &mut Buffer, screen: Rect, modal_rect: Rect) {
    dim_background(buf, screen);
    render_shadow(buf, modal_rect);
    clear_area(buf, modal_rect);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_within_area() {
        let area = Rect::new(0, 0, 80, 24);
        let result = centered_rect(40, 10, area);
        assert_eq!(result, Rect::new(20, 7, 40, 10));
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 30, 8);
        let result = centered_rect(60, 20, area);
        assert_eq!(result, Rect::new(0, 0, 30, 8));
    }

    #[test]
    fn test_centered_rect_respects_offset() {
        let area = Rect::new(10, 5, 40, 10);
        let result = centered_rect(20, 4, area);
        assert_eq!(result, Rect::new(20, 8, 20, 4));
    }

    #[test]
    fn test_dim_background_styles_every_cell() {
        let area = Rect::new(0, 0, 6, 3);
        let mut buf = Buffer::empty(area);
        dim_background(&mut buf, area);

        for y in 0..3 {
            for x in 0..6 {
                assert_eq!(buf[(x, y)].fg, palette::TEXT_MUTED);
                assert_eq!(buf[(x, y)].bg, palette::DEEPEST_BG);
            }
        }
    }

    #[test]
    fn test_shadow_at_buffer_edge_does_not_panic() {
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        render_shadow(&mut buf, Rect::new(0, 0, 10, 5));
    }

    #[test]
    fn test_shadow_is_drawn_right_and_below() {
        let area = Rect::new(0, 0, 20, 10);
        let mut buf = Buffer::empty(area);
        buf[(15, 4)].set_char('x');
        buf[(8, 8)].set_char('x');

        render_shadow(&mut buf, Rect::new(5, 2, 10, 6));

        assert_eq!(buf[(15, 4)].symbol(), " ");
        assert_eq!(buf[(8, 8)].symbol(), " ");
    }
}
