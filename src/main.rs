mod app;
mod components;
mod config;
mod error;
mod event;
mod handler;
mod theme;
mod tree;
mod tui;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::app::App;
use crate::config::AppConfig;
use crate::event::{Event, EventHandler};
use crate::tree::{loader, SelectionController};
use crate::tui::{install_panic_hook, Tui};

/// A terminal-based browsable tree view with single/multi selection.
#[derive(Parser, Debug)]
#[command(name = "treeview_tui", version, about)]
struct Cli {
    /// JSON tree data file (defaults to a built-in sample tree)
    data: Option<PathBuf>,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Selection mode: single or multi
    #[arg(long)]
    mode: Option<String>,

    /// Which nodes may be selected: all, branch, leaf
    #[arg(long)]
    selectable: Option<String>,

    /// Color scheme: dark, light, custom
    #[arg(long)]
    theme: Option<String>,

    /// Disable mouse support
    #[arg(long)]
    no_mouse: bool,

    /// Disable icon glyphs (ASCII fallback)
    #[arg(long)]
    ascii: bool,
}

impl Cli {
    /// Partial config carrying only the flags that were actually given.
    fn overrides(&self) -> AppConfig {
        let mut overrides = AppConfig::default();
        overrides.selection.mode = self.mode.clone();
        overrides.selection.selectable = self.selectable.clone();
        overrides.theme.scheme = self.theme.clone();
        if self.no_mouse {
            overrides.general.mouse = Some(false);
        }
        if self.ascii {
            overrides.tree.use_icons = Some(false);
        }
        overrides
    }
}

#[tokio::main]
async fn main() -> error::Result<()> {
    let cli = Cli::parse();

    let overrides = cli.overrides();
    let config = AppConfig::load(cli.config.as_deref(), Some(&overrides));
    let theme = theme::resolve_theme(&config.theme);
    let use_icons = config.use_icons();

    let tree = match &cli.data {
        Some(path) => loader::from_file(path)?,
        None => loader::sample(),
    };
    let selection = SelectionController::new(config.select_mode(), config.selectable_type());

    install_panic_hook();

    let mut tui = Tui::new(config.mouse_enabled())?;
    let mut app = App::new(tree, selection);
    let mut events = EventHandler::new(Duration::from_millis(16));

    loop {
        tui.terminal_mut().draw(|frame| {
            ui::render(&mut app, frame, &theme, use_icons);
        })?;

        match events.next().await? {
            Event::Key(key) => handler::handle_key_event(&mut app, key),
            Event::Mouse(mouse) => handler::handle_mouse_event(&mut app, mouse),
            Event::Tick => app.clear_expired_status(),
            Event::Resize(_, _) => {}
        }

        if app.should_quit {
            break;
        }
    }

    tui.restore()?;
    Ok(())
}
