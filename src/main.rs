//! TUI Showcase - terminal widgets for tabular data and text entry.
//!
//! Runs an interactive demonstration of the data table and input field
//! widgets, plus a catalog of named widget presets.

mod app;
mod config;
mod error;
mod events;
mod logging;
mod sample;
mod stories;
mod terminal;
mod ui;

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info, warn};

use app::App;
use config::Settings;
use error::AppError;
use events::EventHandler;
use stories::{Component, StoryRegistry};
use terminal::TerminalGuard;
use ui::{init_theme, Theme};

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "tui-showcase", version, about)]
struct Cli {
    /// Open the story catalog at this story id (e.g. `input-field/invalid-state`).
    #[arg(long, value_name = "ID")]
    story: Option<String>,

    /// Print every story id and exit.
    #[arg(long)]
    list_stories: bool,

    /// Read settings from this file instead of the default location.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Theme to use, overriding the settings file ("dark" or "light").
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let registry = StoryRegistry::new();
    if cli.list_stories {
        print_stories(&registry);
        return Ok(());
    }
    if let Some(id) = cli.story.as_deref() {
        if registry.get(id).is_none() {
            anyhow::bail!("unknown story '{}', see --list-stories", id);
        }
    }

    if let Err(e) = logging::init() {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    let mut settings = load_settings(cli.config.as_deref());
    if let Some(name) = cli.theme {
        if Theme::from_name(&name).is_none() {
            anyhow::bail!("unknown theme '{}', expected 'dark' or 'light'", name);
        }
        settings.theme = name;
    }
    init_theme(settings.theme());

    let result = run(&settings, cli.story.as_deref());
    logging::shutdown();
    if let Err(e) = result {
        error!(error = %e, "Showcase exited with an error");
        eprintln!("{}", e.user_message());
        if let Some(dir) = logging::log_directory() {
            eprintln!("Logs are in {}", dir.display());
        }
        std::process::exit(1);
    }
    Ok(())
}

/// Load settings, falling back to defaults when the file is unusable.
fn load_settings(path: Option<&std::path::Path>) -> Settings {
    let loaded = match path {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    loaded.unwrap_or_else(|e| {
        let e = AppError::from(e);
        warn!(error = %e, "Failed to load settings, using defaults");
        eprintln!("Warning: {}", e.user_message());
        Settings::default()
    })
}

fn print_stories(registry: &StoryRegistry) {
    for component in Component::ALL {
        println!("{}:", component.display());
        for story in registry.for_component(component) {
            println!("  {:<32} {}", story.id, story.description);
        }
    }
}

/// Run the event loop until the app asks to quit.
fn run(settings: &Settings, story: Option<&str>) -> error::Result<()> {
    let mut guard = TerminalGuard::new()?;
    let events = EventHandler::with_tick_rate(settings.tick_rate_ms);
    let mut app = App::new(settings, story);
    info!(screen = ?app.screen(), "Event loop starting");

    while !app.should_quit() {
        guard.terminal().draw(|frame| app.view(frame))?;
        let event = events.next()?;
        app.update(event);
    }
    Ok(())
}
