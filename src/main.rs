mod app;
mod config;
mod domain;
mod input;
mod notifications;
mod oracle;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, Subcommand};
use config::{config_file, ensure_data_dir, init_local_dir, load_config, log_file, save_config};
use crossterm::{
    event::{self, DisableFocusChange, EnableFocusChange, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{DayClock, DriftMonitor};
use oracle::{Broker, GeminiClient};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "twelve-days")]
#[command(about = "A calm, terminal-based twelve-day intentionality tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Pretend the local hour is this value (0-23) to preview other chapters
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=23))]
    hour: Option<u32>,

    /// Start with a pre-filled journey halfway through the twelve days
    #[arg(long)]
    demo: bool,

    /// Never contact the language model; use the built-in messages
    #[arg(long)]
    offline: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .twelve-days directory in the current directory
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let current_dir = std::env::current_dir().context("Could not determine current directory")?;
            let dir = init_local_dir(&current_dir)?;
            save_config(config_file(&dir), &config::AppConfig::default())?;
            println!("Initialized twelve-days directory: {}", dir.display());
            println!();
            println!("Edit {} to change the model or drift threshold.", config_file(&dir).display());
            Ok(())
        }
        None => run_tui(&cli),
    }
}

/// Send tracing output to the log file; the terminal belongs to the TUI
fn init_logging(path: &Path) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_ansi(false);

    let result = match std::fs::OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => builder.with_writer(Mutex::new(file)).try_init(),
        Err(_) => builder.with_writer(io::sink).try_init(),
    };
    if let Err(e) = result {
        eprintln!("Warning: could not initialise logging: {}", e);
    }
}

fn run_tui(cli: &Cli) -> Result<()> {
    let data_dir = ensure_data_dir()?;
    init_logging(&log_file(&data_dir));

    let config = load_config(config_file(&data_dir))?;
    tracing::info!(dir = %data_dir.display(), model = %config.model, "starting");

    let client = GeminiClient::from_config(&config, cli.offline)?;
    if !client.has_api_key() {
        tracing::warn!(env = %config.api_key_env, "no API key; using built-in messages");
    }
    let broker = Broker::new(Arc::new(client)).context("Failed to start message runtime")?;

    let mut app = App::new(
        broker,
        DayClock::new(cli.hour),
        DriftMonitor::new(config.drift_threshold()),
    );
    app.use_emoji = config.use_emoji;
    if cli.demo {
        app.seed_demo();
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableFocusChange, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!(error = %err, "exited with error");
    }
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let tick_rate = domain::tick_duration();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            match event::read()? {
                // Only process key press events (ignore key release)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if input::handle_key(app, key) {
                        tracing::info!("quit");
                        return Ok(());
                    }
                }
                Event::FocusLost => app.attention_lost(Instant::now()),
                Event::FocusGained => app.attention_regained(Instant::now()),
                _ => {}
            }
        }

        app.tick(Instant::now());
        app.poll_messages();
    }
}
