//! Terminal rendering: the floating graph pane.
//!
//! The graph lives in a borderless pane drawn over the terminal. Inside the
//! pane, coordinates are virtual pixels (`window_config.width` ×
//! `window_config.height`), mapped onto cells by a Braille canvas.

pub mod graph;

pub use graph::render;

use ratatui::layout::Rect;

use crate::config::WindowConfig;

/// Virtual pixels per terminal cell column (typical terminal font metrics).
pub const PX_PER_COL: u32 = 8;
/// Virtual pixels per terminal cell row.
pub const PX_PER_ROW: u32 = 16;

/// Minimum pane size in cells so there is always something to draw into.
const MIN_PANE_WIDTH: u16 = 10;
const MIN_PANE_HEIGHT: u16 = 3;

/// The overlay pane in terminal cells, clamped to fit inside `area`.
pub fn pane_rect(window: &WindowConfig, origin: (u16, u16), area: Rect) -> Rect {
    let width = ((window.width / PX_PER_COL) as u16)
        .max(MIN_PANE_WIDTH)
        .min(area.width);
    let height = ((window.height / PX_PER_ROW) as u16)
        .max(MIN_PANE_HEIGHT)
        .min(area.height);

    let x = area.x + origin.0.min(area.width.saturating_sub(width));
    let y = area.y + origin.1.min(area.height.saturating_sub(height));
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pane_is_sized_from_virtual_pixels() {
        let window = WindowConfig::default(); // 800 x 200
        let area = Rect::new(0, 0, 200, 50);
        let pane = pane_rect(&window, (0, 0), area);
        assert_eq!((pane.width, pane.height), (100, 12));
    }

    #[test]
    fn pane_is_clamped_into_the_terminal() {
        let window = WindowConfig::default();
        let area = Rect::new(0, 0, 120, 20);

        // Dragged far past the edge: pinned to the bottom-right corner
        let pane = pane_rect(&window, (500, 500), area);
        assert_eq!(pane.x + pane.width, area.width);
        assert_eq!(pane.y + pane.height, area.height);

        // Terminal smaller than the pane: shrunk to fit
        let tiny = Rect::new(0, 0, 40, 5);
        let pane = pane_rect(&window, (0, 0), tiny);
        assert_eq!((pane.width, pane.height), (40, 5));
    }
}
