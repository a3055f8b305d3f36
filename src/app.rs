//! Application state threaded through the event loop.
//!
//! The running flag and drag offset live here, mutated only by the dedicated
//! handlers; the render path reads everything immutably.

use crate::config::Config;
use crate::data::{SampleStore, ScaleState};
use crate::probe::Prober;

/// Main application state.
///
/// Owns the sample store and scale state exclusively; nothing is shared
/// across threads.
pub struct App {
    pub running: bool,
    pub config: Config,
    pub samples: SampleStore,
    pub scale: ScaleState,
    /// Top-left cell of the overlay pane, moved by dragging.
    pub pane_origin: (u16, u16),
    drag_offset: Option<(i32, i32)>,
    prober: Box<dyn Prober>,
}

impl App {
    pub fn new(config: Config, prober: Box<dyn Prober>) -> Self {
        let samples = SampleStore::new(&config.servers, config.visual_config.max_points);
        let scale = ScaleState::new(&config.visual_config.guide_levels);
        Self {
            running: true,
            config,
            samples,
            scale,
            pane_origin: (0, 0),
            drag_offset: None,
            prober,
        }
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Probe every enabled target once and apply the results as one round.
    ///
    /// All samples of a round land in the store before this returns, so a
    /// frame never renders a partially applied round.
    pub fn run_probe_round(&mut self) {
        let addresses: Vec<String> = self
            .config
            .servers
            .iter()
            .filter(|server| server.enabled)
            .map(|server| server.address.clone())
            .collect();
        if addresses.is_empty() {
            return;
        }

        let samples = self.prober.probe_round(&addresses);
        let round: Vec<(String, u64)> = addresses.into_iter().zip(samples).collect();
        self.samples.apply_round(&round);
    }

    /// Advance the vertical scale one frame.
    pub fn tick_scale(&mut self) {
        self.scale.tick(
            self.samples.global_max(),
            &self.config.visual_config.guide_levels,
            self.config.visual_config.scale_decay_rate,
        );
    }

    /// Start dragging the pane; `offset` is pane origin minus mouse position.
    pub fn begin_drag(&mut self, offset: (i32, i32)) {
        self.drag_offset = Some(offset);
    }

    /// Move the pane to follow the mouse while a drag is active.
    pub fn drag_to(&mut self, column: u16, row: u16) {
        if let Some((dx, dy)) = self.drag_offset {
            self.pane_origin = (
                (i32::from(column) + dx).max(0) as u16,
                (i32::from(row) + dy).max(0) as u16,
            );
        }
    }

    pub fn end_drag(&mut self) {
        self.drag_offset = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_offset.is_some()
    }

    pub fn prober_description(&self) -> &str {
        self.prober.description()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::probe::ScriptedProber;

    fn one_target_config(max_points: usize) -> Config {
        let mut config = Config::default();
        config.visual_config.max_points = max_points;
        config.servers = vec![ServerConfig {
            address: "1.1.1.1".to_string(),
            color: [255, 255, 0],
            line_thickness: 2,
            enabled: true,
        }];
        config
    }

    #[test]
    fn probe_round_fills_every_enabled_target() {
        let mut config = Config::default();
        config.visual_config.max_points = 4;
        config.servers.push(ServerConfig {
            address: "10.0.0.1".to_string(),
            color: [255, 0, 0],
            line_thickness: 1,
            enabled: false,
        });

        let prober = ScriptedProber::new(vec![vec![21, 42]]);
        let mut app = App::new(config, Box::new(prober));
        app.run_probe_round();

        assert_eq!(app.samples.buffer("1.1.1.1").unwrap().last_value(), 21);
        assert_eq!(app.samples.buffer("8.8.4.4").unwrap().last_value(), 42);
        // Disabled target never got a buffer, let alone a sample
        assert!(app.samples.buffer("10.0.0.1").is_none());
    }

    #[test]
    fn drag_moves_the_pane_by_mouse_delta() {
        let config = one_target_config(4);
        let mut app = App::new(config, Box::new(ScriptedProber::new(vec![])));

        app.begin_drag((-3, -1));
        app.drag_to(10, 5);
        assert_eq!(app.pane_origin, (7, 4));

        app.drag_to(2, 0);
        assert_eq!(app.pane_origin, (0, 0)); // clamped at the origin

        app.end_drag();
        app.drag_to(40, 40);
        assert_eq!(app.pane_origin, (0, 0)); // no drag active, no move
    }

    #[test]
    fn quit_stops_the_loop_state() {
        let config = one_target_config(4);
        let mut app = App::new(config, Box::new(ScriptedProber::new(vec![])));
        assert!(app.running);
        app.quit();
        assert!(!app.running);
    }

    /// The reference scenario: one target, three points, rounds 10/200/30.
    #[test]
    fn scale_follows_the_reference_scenario() {
        let config = one_target_config(3);
        let prober = ScriptedProber::new(vec![vec![10], vec![200], vec![30]]);
        let mut app = App::new(config, Box::new(prober));

        app.run_probe_round();
        app.tick_scale();
        let buffer = app.samples.buffer("1.1.1.1").unwrap();
        assert_eq!(buffer.values().collect::<Vec<_>>(), vec![0, 0, 10]);
        assert_eq!(app.scale.target_max(), 180.0); // floor: 150 * 1.2

        app.run_probe_round();
        app.tick_scale();
        let buffer = app.samples.buffer("1.1.1.1").unwrap();
        assert_eq!(buffer.values().collect::<Vec<_>>(), vec![0, 10, 200]);
        assert_eq!(app.scale.target_max(), 240.0);
        assert_eq!(app.scale.current_max(), 240.0); // snapped, no lag

        app.run_probe_round();
        app.tick_scale();
        let buffer = app.samples.buffer("1.1.1.1").unwrap();
        assert_eq!(buffer.values().collect::<Vec<_>>(), vec![10, 200, 30]);
        assert_eq!(app.scale.target_max(), 240.0); // 200 still in the window
        assert_eq!(app.scale.current_max(), 240.0); // target unchanged, no decay
    }
}
