//! Hack or Snooze terminal client.
//!
//! Browse the story feed, log in, star stories, and post or delete your own,
//! from a vim-style terminal interface.
//!
//! # Headless Mode
//!
//! Run with `--headless` for a line-oriented interface suitable for scripts
//! and automated testing:
//!
//! ```bash
//! echo '#stories' | cargo run -p hns -- --headless
//! ```

mod app;
mod events;
mod form;
mod headless;
mod ui;

use std::fs::OpenOptions;
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use hns_core::{AppState, Client, ClientConfig, CredentialStore};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use app::App;
use events::{handle_event, EventResult};
use ui::render::render;

/// Log file written inside the data directory in TUI mode.
const LOG_FILE: &str = "hns.log";

/// Hack or Snooze terminal client
#[derive(Parser, Debug)]
#[command(name = "hns")]
#[command(about = "Terminal client for the Hack or Snooze story service", long_about = None)]
struct Cli {
    /// Service base URL
    #[arg(long, help = "Service base URL (overrides HNS_BASE_URL)")]
    base_url: Option<String>,

    /// Directory for credentials and logs
    #[arg(long, help = "Directory for credentials and logs (overrides HNS_DATA_DIR)")]
    data_dir: Option<PathBuf>,

    /// Line-oriented mode without the TUI
    #[arg(long, help = "Run in headless mode (commands on stdin, no TUI)")]
    headless: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(data_dir) = cli.data_dir {
        config = config.with_data_dir(data_dir);
    }

    init_logging(&config.data_dir()?, cli.headless)?;
    info!(base_url = %config.base_url, headless = cli.headless, "starting");

    let client = config.build_client()?;
    let store = config.credential_store()?;
    let state = load_state(client, store).await;

    if cli.headless {
        return headless::run_headless(state).await.map_err(|e| e.into());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, App::new(state)).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

/// Install the tracing subscriber.
///
/// The TUI owns the screen, so it logs to a file in the data directory;
/// headless mode logs to stderr. `RUST_LOG` overrides the `info` default.
fn init_logging(data_dir: &Path, headless: bool) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if headless {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr))
            .with(filter)
            .init();
    } else {
        std::fs::create_dir_all(data_dir)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(data_dir.join(LOG_FILE))?;
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
            .with(filter)
            .init();
    }
    Ok(())
}

/// Restore the previous session, falling back to an anonymous one.
///
/// A rejected stored token or an unreachable service must not keep the
/// client from starting; the user can still log in or refresh later. A
/// restored user is kept even when the feed cannot be loaded.
async fn load_state(client: Client, store: CredentialStore) -> AppState {
    let mut state = match AppState::restore_user(client.clone(), store.clone()).await {
        Ok(state) => state,
        Err(e) => {
            warn!(error = %e, "could not restore session, starting anonymous");
            AppState::new(client, store)
        }
    };
    if let Err(e) = state.refresh_stories().await {
        warn!(error = %e, "could not load stories");
    }
    state
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> io::Result<()> {
    loop {
        // Render
        terminal.draw(|f| render(f, &app))?;

        // Run a queued network action before reading more input
        if let Some(action) = app.take_pending_action() {
            app.set_status("Working...");
            terminal.draw(|f| render(f, &app))?;
            app.perform(action).await;
            continue;
        }

        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;
            if handle_event(&mut app, ev) == EventResult::Quit {
                return Ok(());
            }
        }
    }
}
