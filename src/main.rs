mod app;
mod components;
mod config;
mod error;
mod event;
mod fs;
mod handler;
mod logging;
mod nav;
mod theme;
mod tui;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::{info, warn};

use crate::app::App;
use crate::config::{AppConfig, GeneralConfig, LogConfig, WatcherConfig};
use crate::event::{Event, EventHandler};
use crate::fs::provider::{FsProvider, ListingOptions};
use crate::fs::watcher::FsWatcher;
use crate::nav::{DirectoryProvider, Navigator};
use crate::tui::{install_panic_hook, Tui};

/// A keyboard-driven three-pane directory navigator.
#[derive(Parser, Debug)]
#[command(name = "triumf", version, about)]
struct Cli {
    /// Directory to start in (defaults to the configured start path, then home)
    path: Option<PathBuf>,

    /// Explicit config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Show hidden files
    #[arg(long)]
    show_hidden: bool,

    /// Disable filesystem watcher (auto-refresh)
    #[arg(long)]
    no_watcher: bool,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    /// Flags as a partial config; unset flags leave file values alone.
    fn overrides(&self) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                show_hidden: self.show_hidden.then_some(true),
                ..Default::default()
            },
            watcher: WatcherConfig {
                enabled: self.no_watcher.then_some(false),
                ..Default::default()
            },
            log: LogConfig {
                level: self.log_level.clone(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> error::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref(), Some(&cli.overrides()));
    logging::init(&config)?;

    let mut events = EventHandler::new(Duration::from_millis(100));
    let event_tx = events.sender();

    let options = ListingOptions {
        show_hidden: config.show_hidden(),
        dirs_first: config.dirs_first(),
    };
    let provider = FsProvider::new(event_tx.clone(), options);

    let requested = cli
        .path
        .clone()
        .or_else(|| config.start_path())
        .unwrap_or_else(|| provider.home_path());
    let start = requested.canonicalize().map_err(|_| {
        error::AppError::InvalidPath(format!("{} does not exist", requested.display()))
    })?;
    if !start.is_dir() {
        return Err(error::AppError::InvalidPath(format!(
            "{} is not a directory",
            start.display()
        )));
    }
    info!(start = %start.display(), "starting");

    let navigator = Navigator::with_start(provider, start);
    let theme = theme::resolve_theme(&config.theme);
    let mut app = App::new(navigator, theme, config.pane_ratios());

    if config.watcher_enabled() {
        match FsWatcher::new(Duration::from_millis(config.debounce_ms()), event_tx.clone()) {
            Ok(watcher) => app.watcher = Some(watcher),
            Err(e) => {
                warn!(error = %e, "filesystem watcher unavailable");
                app.set_error_message(format!("Watcher unavailable: {e}"));
            }
        }
    }

    install_panic_hook();
    let mut tui = Tui::new()?;

    loop {
        app.sync();
        tui.draw(|frame| ui::render(&app, frame))?;

        match events.next().await? {
            Event::Key(key) => handler::handle_key_event(&mut app, key),
            Event::Tick | Event::Resize(_, _) => {}
            Event::ListingCompleted { id, result } => app.handle_listing_completed(id, result),
            Event::FsChange(dirs) => app.handle_fs_change(dirs),
        }

        if app.should_quit {
            break;
        }
    }

    tui.restore()?;
    info!("exiting");
    Ok(())
}
