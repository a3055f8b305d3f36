use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};

use crate::app::App;
use crate::ui;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event: quit keys only, everything else is ignored
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        _ => {}
    }
}

/// Handle a mouse event: left-dragging the pane moves it by the mouse delta
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, area: Rect) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let pane = ui::pane_rect(&app.config.window_config, app.pane_origin, area);
            if pane.contains(Position::new(mouse.column, mouse.row)) {
                app.begin_drag((
                    i32::from(pane.x) - i32::from(mouse.column),
                    i32::from(pane.y) - i32::from(mouse.row),
                ));
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            app.drag_to(mouse.column, mouse.row);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            app.end_drag();
        }
        _ => {}
    }
}
