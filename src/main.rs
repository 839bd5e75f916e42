//! Gloomkeep - Entry Point
//!
//! Initializes logging and the terminal, generates the dungeon, and runs
//! the input/render loop.

use std::fs::OpenOptions;
use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use gloomkeep::game::Game;
use gloomkeep::ui::App;

/// Redraw cadence while idle; keeps the run clock ticking on screen
const TICK: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    // Log to a file so the TUI stays clean.
    if let Ok(log_file) = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("gloomkeep.log")
    {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .target(env_logger::Target::Pipe(Box::new(log_file)))
            .init();
    }

    let seed = std::env::args()
        .nth(1)
        .map(|s| s.parse::<u64>())
        .transpose()
        .context("seed must be a non-negative integer")?
        .unwrap_or_else(rand::random);

    log::info!("Starting Gloomkeep v{} (seed {})", env!("CARGO_PKG_VERSION"), seed);

    let game = Game::new(seed).context("dungeon generation failed")?;
    let mut app = App::new(game);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        log::error!("exited with error: {}", e);
        eprintln!("Error: {}", e);
    }

    log::info!("Gloomkeep shut down cleanly");
    result
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| app.draw(frame))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
