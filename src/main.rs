//! Action-sheet demo.
//!
//! Shows a list of items; Enter (or a click on the highlighted row) raises a
//! bottom sheet of actions for it.  Drag the sheet down, flick it away, tap
//! the dimmed background, or press Esc to dismiss it.  The last chosen
//! action is printed to stdout on exit.

mod app;
mod config;

use std::io::stderr;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
    view,
};
use crate::config::AppConfig;

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Draggable bottom action sheet demo")]
struct Cli {
    /// Items to list (defaults to a few sample files).
    items: Vec<String>,

    /// Start with the sheet presented.
    #[arg(long)]
    presented: bool,

    /// Keep the scrim fade from going below zero on long drags.
    #[arg(long)]
    clamp_dim: bool,

    /// Animation frame interval in milliseconds.
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Write the effective configuration to the config file and exit.
    #[arg(long)]
    write_config: bool,
}

fn sample_items() -> Vec<String> {
    [
        "README.md",
        "Cargo.toml",
        "holiday-photo.jpg",
        "quarterly-report.pdf",
        "notes.txt",
        "song.flac",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    // ── configuration ─────────────────────────────────────────
    let mut config = AppConfig::load();
    if cli.clamp_dim {
        config.clamp_dim_fade = true;
    }
    if let Some(ms) = cli.tick_ms {
        config.tick_ms = ms.clamp(5, 200);
    }
    if cli.write_config {
        let path = config.save()?;
        println!("{}", path.display());
        return Ok(());
    }

    let items = if cli.items.is_empty() {
        sample_items()
    } else {
        cli.items
    };
    let tick_rate = Duration::from_millis(config.tick_ms);
    let mut state = AppState::new(items, config, cli.presented);
    tracing::info!(presented = state.presented, "starting");

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let mut events = spawn_event_reader(tick_rate);
    let mut last_frame = Instant::now();

    // ── event loop ────────────────────────────────────────────
    loop {
        let now = Instant::now();
        state.sheet.tick(now - last_frame);
        last_frame = now;

        terminal.draw(|frame| {
            let area = frame.area();
            view::draw(&mut state, area, frame.buffer_mut());
        })?;

        let Some(event) = events.recv().await else {
            break;
        };
        match event {
            AppEvent::Key(k) => handler::handle_key(&mut state, k),
            AppEvent::Mouse(m, at) => handler::handle_mouse(&mut state, m, at),
            AppEvent::Resize(_, _) | AppEvent::Tick => {}
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Some(choice) = state.last_choice {
        println!("{choice}");
    }

    Ok(())
}
