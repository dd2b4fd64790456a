mod app;
mod audio;
mod clock;
mod config;
mod domain;
mod input;
mod persistence;
mod report;
mod ticker;
mod timer;
mod ui;

use anyhow::{Context, Result};
use app::{AppState, History};
use audio::{AudioCue, SilentAudio, TerminalAudio};
use clap::{Parser, Subcommand};
use clock::{Clock, SystemClock};
use config::{load_config, write_default_config, Config};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use persistence::{config_file, ensure_data_dir, init_local_data_dir, log_file, DailyHistoryStore, FileStore, KeyValueStore};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::Path;
use std::rc::Rc;
use timer::Timer;

#[derive(Parser)]
#[command(name = "galaxy")]
#[command(about = "A terminal Pomodoro timer with named sessions and a same-day history log", long_about = None)]
struct Cli {
    /// Never ring the bell or send notifications
    #[arg(long, global = true)]
    quiet: bool,

    /// Start with sound muted
    #[arg(long, global = true)]
    muted: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .galaxy directory in the current directory
    Init,
    /// Print today's session history
    History,
    /// Clear today's session history
    Clear,
    /// Write a default config.toml to the galaxy directory
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Init) = cli.command {
        let data_dir = init_local_data_dir()?;
        println!("Initialized galaxy directory: {}", data_dir.display());
        println!();
        println!("Galaxy will now keep its history in this directory.");
        println!("Run 'galaxy' to start a session.");
        return Ok(());
    }

    let data_dir = ensure_data_dir()?;
    let config = load_config(config_file(&data_dir))?;
    init_logging(&data_dir, &config)?;

    let clock: Rc<dyn Clock> = Rc::new(SystemClock);
    let history = load_history(&data_dir, clock.clone())?;

    match cli.command {
        Some(Commands::History) => {
            print!("{}", report::render_history(history.date(), history.entries()));
            Ok(())
        }
        Some(Commands::Clear) => {
            let mut history = history;
            let count = history.len();
            history.clear()?;
            println!("Cleared {} session(s) from today's history.", count);
            Ok(())
        }
        Some(Commands::Config) => {
            let path = config_file(&data_dir);
            if write_default_config(&path)? {
                println!("Wrote default config: {}", path.display());
            } else {
                println!("Config already exists: {}", path.display());
            }
            Ok(())
        }
        Some(Commands::Init) | None => {
            let audio: Box<dyn AudioCue> = if cli.quiet {
                Box::new(SilentAudio)
            } else {
                Box::new(TerminalAudio::new(false))
            };
            let mut timer = Timer::new(clock, audio).with_default_label(config.default_session_name.clone());
            timer.set_muted(cli.muted || config.start_muted);

            log::info!("Using galaxy directory: {}", data_dir.display());
            run_tui(AppState::new(timer, history))
        }
    }
}

/// Send logs to galaxy.log; the terminal belongs to the UI
fn init_logging(data_dir: &Path, config: &Config) -> Result<()> {
    let path = log_file(data_dir);
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    env_logger::Builder::new()
        .filter_level(config.log_filter())
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}

fn load_history(data_dir: &Path, clock: Rc<dyn Clock>) -> Result<History> {
    let store: Box<dyn KeyValueStore> = Box::new(FileStore::new(data_dir)?);
    DailyHistoryStore::load(store, clock)
}

fn run_tui(mut app: AppState) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if app.timer.has_started() {
        log::info!("Quit with a session in progress; it was not recorded");
    }

    if let Err(err) = &result {
        log::error!("Exited with error: {:#}", err);
    }
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let tick_rate = ticker::tick_duration();
    let mut window_title = String::new();

    loop {
        // Mirror the countdown in the terminal title
        let title = app.timer.window_title();
        if title != window_title {
            execute!(terminal.backend_mut(), SetTitle(&title))?;
            window_title = title;
        }

        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key) {
                    return Ok(());
                }
            }
        }

        app.tick();
    }
}
