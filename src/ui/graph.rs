//! Graph rendering: per-target polylines, guide tick marks, and
//! latest-value labels on a Braille canvas.
//!
//! The mapping functions work in screen coordinates (y = 0 at the top, like
//! the configuration's text offset) and are flipped only when handed to the
//! canvas, whose y axis points up.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Context, Line as CanvasLine},
        Clear,
    },
    Frame,
};

use crate::app::App;
use crate::config::{ServerConfig, VisualConfig, WindowConfig};
use crate::data::SampleBuffer;

/// Vertical pixels reserved under the graph so zero-latency samples stay
/// visible above the bottom edge.
pub const BOTTOM_MARGIN: f64 = 20.0;

/// Gap between a right-anchored label and the newest point.
const LABEL_GAP: f64 = 5.0;

/// Horizontal spacing between consecutive samples.
pub fn spacing(max_points: usize, width: f64, padding_left: f64, padding_right: f64) -> f64 {
    (width - padding_left - padding_right) / (max_points as f64 - 1.0)
}

/// X of the i-th sample, oldest first: the oldest sits at `padding_left`,
/// the newest at `width - padding_right`.
pub fn sample_x(
    index: usize,
    max_points: usize,
    width: f64,
    padding_left: f64,
    padding_right: f64,
) -> f64 {
    let spacing = spacing(max_points, width, padding_left, padding_right);
    width - padding_right - (max_points - 1 - index) as f64 * spacing
}

/// Screen-space y of a sample under the current scale.
///
/// `value / current_max` stays in `[0, 1]` under the scale invariant, so the
/// result stays between `BOTTOM_MARGIN` and `height`.
pub fn sample_y(value: u64, current_max: f64, height: f64) -> f64 {
    height - (value as f64 / current_max) * (height - BOTTOM_MARGIN)
}

/// Label x, re-anchored to the left of the point when it would overrun the
/// right window edge.
pub fn label_x(anchor_x: f64, offset_x: f64, text_width: f64, width: f64) -> f64 {
    let x = anchor_x + offset_x;
    if x + text_width > width {
        anchor_x - text_width - LABEL_GAP
    } else {
        x
    }
}

/// Draw one frame: a pure function of the app state with only display
/// side effects.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let pane = super::pane_rect(&app.config.window_config, app.pane_origin, area);
    if pane.width < 2 || pane.height < 2 {
        return;
    }

    let window = &app.config.window_config;
    let visual = &app.config.visual_config;
    let width = f64::from(window.width);
    let height = f64::from(window.height);
    // One Braille dot in virtual pixels, used for thickness offsets
    let dot = height / (f64::from(pane.height) * 4.0);
    let current_max = app.scale.current_max();

    frame.render_widget(Clear, pane);

    let mut canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            if visual.show_guides {
                draw_guides(ctx, window, visual, current_max, dot);
            }
            for server in app.config.servers.iter().filter(|server| server.enabled) {
                if let Some(buffer) = app.samples.buffer(&server.address) {
                    draw_target(ctx, window, visual, server, buffer, current_max, dot, pane);
                }
            }
        });
    if !window.transparent {
        canvas = canvas.background_color(rgb(window.background_color));
    }
    frame.render_widget(canvas, pane);
}

/// Three short horizontal tick marks per guide level: left edge, center,
/// right edge. Recomputed from the current scale every frame.
fn draw_guides(
    ctx: &mut Context,
    window: &WindowConfig,
    visual: &VisualConfig,
    current_max: f64,
    dot: f64,
) {
    let width = f64::from(window.width);
    let height = f64::from(window.height);
    let color = rgb(visual.guide_lines_color);
    let half = f64::from(visual.guide_lines_length) / 2.0;
    let anchors = [
        f64::from(window.padding_left),
        width / 2.0,
        width - f64::from(window.padding_right),
    ];

    for &level in &visual.guide_levels {
        let y = height - sample_y(u64::from(level), current_max, height);
        for offset in 0..visual.guide_lines_thickness.max(1) {
            let dy = f64::from(offset) * dot;
            for &x in &anchors {
                ctx.draw(&CanvasLine {
                    x1: x - half,
                    y1: y + dy,
                    x2: x + half,
                    y2: y + dy,
                    color,
                });
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_target(
    ctx: &mut Context,
    window: &WindowConfig,
    visual: &VisualConfig,
    server: &ServerConfig,
    buffer: &SampleBuffer,
    current_max: f64,
    dot: f64,
    pane: Rect,
) {
    let width = f64::from(window.width);
    let height = f64::from(window.height);
    let color = rgb(server.color);

    let points: Vec<(f64, f64)> = buffer
        .values()
        .enumerate()
        .map(|(index, value)| {
            let x = sample_x(
                index,
                visual.max_points,
                width,
                f64::from(window.padding_left),
                f64::from(window.padding_right),
            );
            let y = height - sample_y(value, current_max, height);
            (x, y)
        })
        .collect();

    // Thickness as stacked one-dot polylines
    for offset in 0..u32::from(server.line_thickness.max(1)) {
        let dy = f64::from(offset) * dot;
        for pair in points.windows(2) {
            ctx.draw(&CanvasLine {
                x1: pair[0].0,
                y1: pair[0].1 + dy,
                x2: pair[1].0,
                y2: pair[1].1 + dy,
                color,
            });
        }
    }

    // Latest value next to the newest point, in the target's color
    if let Some(&(anchor_x, anchor_y)) = points.last() {
        let text = format!("{}ms", buffer.last_value());
        // One terminal cell per character, in virtual pixels
        let char_width = width / f64::from(pane.width);
        let text_width = text.chars().count() as f64 * char_width;
        let x = label_x(anchor_x, f64::from(visual.ping_text_offset.0), text_width, width);
        // The configured offset is in screen coordinates; canvas y points up
        let y = anchor_y - f64::from(visual.ping_text_offset.1);
        ctx.print(x, y, Span::styled(text, Style::default().fg(color)));
    }
}

fn rgb(color: [u8; 3]) -> Color {
    Color::Rgb(color[0], color[1], color[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_mapping_matches_the_reference() {
        // width 800, paddings 10, 5 points: oldest at 10, newest at 790
        assert_eq!(sample_x(0, 5, 800.0, 10.0, 10.0), 10.0);
        assert_eq!(sample_x(4, 5, 800.0, 10.0, 10.0), 790.0);
        assert_eq!(spacing(5, 800.0, 10.0, 10.0), 195.0);
    }

    #[test]
    fn samples_are_evenly_spaced() {
        let xs: Vec<f64> = (0..5).map(|i| sample_x(i, 5, 800.0, 10.0, 10.0)).collect();
        for pair in xs.windows(2) {
            assert_eq!(pair[1] - pair[0], 195.0);
        }
    }

    #[test]
    fn vertical_mapping_spans_margin_to_bottom() {
        // Zero latency sits on the bottom edge
        assert_eq!(sample_y(0, 240.0, 200.0), 200.0);
        // A sample at the scale maximum sits at the bottom margin
        assert_eq!(sample_y(240, 240.0, 200.0), BOTTOM_MARGIN);
        // Halfway in between
        assert_eq!(sample_y(120, 240.0, 200.0), 110.0);
    }

    #[test]
    fn label_reanchors_at_the_right_edge() {
        // Plenty of room: anchor plus offset
        assert_eq!(label_x(400.0, 10.0, 40.0, 800.0), 410.0);
        // Would overrun: flip to the left of the point
        assert_eq!(label_x(790.0, 10.0, 40.0, 800.0), 745.0);
    }
}
