// TuneDeck - terminal playlist player
// Loads the saved playlist, opens the audio device and hands everything to the TUI loop

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use tunedeck::{
    audio::{AudioConfig, RodioPlayer},
    config::{Config, LoggingConfig},
    storage::FileBlobStore,
    ui::{App, TerminalManager},
    Controller,
};

#[derive(Parser)]
#[command(name = "tunedeck")]
#[command(about = "A terminal playlist player with trending picks and a persistent song list")]
struct Args {
    /// Enable developer logging (keeps stderr attached)
    #[arg(long)]
    dev: bool,

    /// Use this config file instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Resolve relative track paths against this directory
    #[arg(long)]
    library_root: Option<PathBuf>,
}

fn init_logging(logging: &LoggingConfig, dev: bool) -> Result<()> {
    std::fs::create_dir_all(&logging.directory).with_context(|| {
        format!("Failed to create log directory {}", logging.directory.display())
    })?;

    // Daily rotating file appender, the TUI owns stdout
    let file_appender = tracing_appender::rolling::daily(&logging.directory, "tunedeck.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    let subscriber = tracing_subscriber::fmt()
        .with_writer(file_writer)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_env_filter(filter)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    if dev {
        eprintln!("🔧 Dev mode: logging to {}", logging.directory.display());
    }

    // Keep the writer alive for the whole process
    std::mem::forget(guard);

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(root) = args.library_root {
        config.library_root = root;
    }

    init_logging(&config.logging, args.dev)?;
    info!("🎵 TuneDeck starting up");
    debug!("Library root: {}", config.library_root.display());

    // ALSA likes to print straight to stderr, which tears up the TUI
    if !args.dev {
        debug!("Redirecting stderr to suppress ALSA errors");
        if let Err(e) = redirect_stderr_to_null() {
            warn!("Could not redirect stderr: {}", e);
        }
    }

    let store = FileBlobStore::new(&config.data_dir).with_context(|| {
        format!("Failed to open storage directory {}", config.data_dir.display())
    })?;

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let mut player = RodioPlayer::new(AudioConfig::from(&config))
        .context("Failed to open audio output")?;
    player.set_event_sender(event_tx);

    let controller = Controller::new(&config, Box::new(store), player);
    let terminal = TerminalManager::new()?;

    let mut app = App::new(controller, terminal, event_rx, &config.ui);
    app.run().await?;

    info!("👋 TuneDeck shutting down");
    Ok(())
}

/// Redirect stderr to /dev/null to suppress ALSA error messages that interfere with the TUI
fn redirect_stderr_to_null() -> Result<()> {
    unsafe {
        let null_fd = libc::open(
            b"/dev/null\0".as_ptr() as *const libc::c_char,
            libc::O_WRONLY,
        );

        if null_fd == -1 {
            return Err(anyhow::anyhow!("Failed to open /dev/null"));
        }

        if libc::dup2(null_fd, libc::STDERR_FILENO) == -1 {
            libc::close(null_fd);
            return Err(anyhow::anyhow!("Failed to redirect stderr"));
        }

        libc::close(null_fd);
    }

    Ok(())
}
