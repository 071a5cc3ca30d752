use std::io::{self, Stdout, Write};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use ratatui::Terminal;
use ratatui::crossterm::event;
use ratatui::crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::CrosstermBackend;

use miru_core::{OrderField, SeriesStore, SqliteStore};

mod action;
mod app;
mod config_file;
mod input;
mod logging;
mod model;
mod theme;
mod view;

use app::App;
use config_file::ConfigFile;
use theme::Theme;

/// Utility for keeping track of watched TV episodes and movies.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None, after_help = view::help::key_map_text())]
struct Args {
    /// Use temporary in-memory database
    #[arg(short, long)]
    memory: bool,

    /// Path to a database [default: ~/.miru.db]
    #[arg(short, long)]
    database: Option<String>,

    /// Color theme
    #[arg(long, value_parser = ["classic", "modern"])]
    theme: Option<String>,

    /// Initial list ordering
    #[arg(long, value_parser = ["name", "seen", "episodes"])]
    order: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    // Held until exit so buffered log lines get flushed.
    let _log_guard = logging::init();
    let config = config_file::load_config();

    // Resolve config from CLI flags > config file > defaults
    let theme_name = args.theme.as_deref().or(config.theme()).unwrap_or("classic");
    let theme = Theme::by_name(theme_name)
        .with_context(|| format!("unknown theme {theme_name:?} (expected classic or modern)"))?;
    let order = match args.order.as_deref().or(config.order()) {
        Some(name) => OrderField::parse(name).with_context(|| {
            format!("unknown ordering {name:?} (expected name, seen or episodes)")
        })?,
        None => OrderField::default(),
    };

    // The store must be usable before the terminal is taken over.
    let store = open_store(&args, &config)?;
    let app = App::new(store, theme, order).context("failed to load series")?;

    run(app)
}

fn open_store(args: &Args, config: &ConfigFile) -> anyhow::Result<Box<dyn SeriesStore>> {
    if args.memory {
        return Ok(Box::new(SqliteStore::open_in_memory()?));
    }
    let path = match args.database.as_deref().or(config.database_path()) {
        Some(raw) => config_file::resolve_path(raw)
            .with_context(|| format!("cannot resolve database path {raw:?}"))?,
        None => std::path::absolute(config_file::default_database_path())?,
    };
    let store = SqliteStore::open(&path)
        .with_context(|| format!("cannot open database {}", path.display()))?;
    Ok(Box::new(store))
}

fn run(mut app: App) -> anyhow::Result<()> {
    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Install panic hook that restores terminal before printing panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    // Drain any stray input events (e.g. Enter keypress from launching the command)
    while event::poll(Duration::from_millis(50)).unwrap_or(false) {
        let _ = event::read();
    }

    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "event loop aborted");
    } else {
        tracing::info!("quit");
    }
    result
}

/// One event at a time: draw, block for input, apply it.
fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> anyhow::Result<()> {
    loop {
        if let Some(title) = app.take_pending_title() {
            let backend = terminal.backend_mut();
            write!(backend, "\x1b]2;{title}\x07")?;
            backend.flush()?;
        }

        terminal.draw(|f| app.view(f))?;

        let action = input::map_event(&event::read()?);
        if app.update(action)? {
            return Ok(());
        }
    }
}
