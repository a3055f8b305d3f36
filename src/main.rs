// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};

mod app;
mod config;
mod data;
mod events;
mod probe;
mod ui;

use app::App;
use config::Config;
use probe::{PingProber, Prober};

#[derive(Parser, Debug)]
#[command(name = "pingwatch")]
#[command(about = "Live latency graph for a set of probed hosts")]
struct Args {
    /// Path to the configuration file (created with defaults if missing)
    #[arg(short, long, default_value = "pingwatch.json")]
    config: PathBuf,

    /// Probe timeout in seconds
    #[arg(short, long, default_value = "1.0")]
    timeout: f64,

    /// Write the default configuration file and exit
    #[arg(long)]
    write_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Probe diagnostics go to stderr, which is unusable once the alternate
    // screen is up; stay quiet unless explicitly asked for.
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(io::stderr)
            .init();
    }

    if args.write_config {
        if Config::write_default_if_missing(&args.config)? {
            println!("Created default config file: {}", args.config.display());
        } else {
            println!("Config file already exists: {}", args.config.display());
        }
        return Ok(());
    }

    // Fatal on a malformed or invalid document, before any rendering starts
    let config = Config::load(&args.config)?;
    let prober = PingProber::new(Duration::from_secs_f64(args.timeout))?;

    run_tui(config, Box::new(prober))
}

/// Run the TUI with the given configuration and prober
fn run_tui(config: Config, prober: Box<dyn Prober>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let mut app = App::new(config, prober);

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let frame_time = Duration::from_secs_f64(1.0 / f64::from(app.config.visual_config.fps.max(1)));
    let ping_interval = Duration::from_secs_f64(app.config.visual_config.ping_interval);
    let mut last_round: Option<Instant> = None;

    while app.running {
        // Probe when the interval has elapsed; the first round runs
        // immediately. Blocks for at most the probe timeout.
        if last_round.map_or(true, |at| at.elapsed() >= ping_interval) {
            app.run_probe_round();
            last_round = Some(Instant::now());
        }

        app.tick_scale();
        terminal.draw(|frame| ui::render(frame, app))?;

        // Spend the rest of the frame budget on input
        let deadline = Instant::now() + frame_time;
        loop {
            let budget = deadline.saturating_duration_since(Instant::now());
            let Some(event) = events::poll_event(budget)? else {
                break;
            };

            let size = terminal.size()?;
            let area = Rect::new(0, 0, size.width, size.height);
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse, area),
                Event::Resize(_, _) => {
                    // Pane is re-clamped on the next draw
                }
                _ => {}
            }

            if !app.running || budget.is_zero() {
                break;
            }
        }
    }

    Ok(())
}
