//! termdeck - a tabbed, split-pane terminal workspace
//!
//! Every command is a named action with one accelerator, declared once in the
//! action registry. Menus, key dispatch and the status bar hints all read from
//! that registry, so an accelerator can never mean two things.
//!
//! # Quick Start
//!
//! ```text
//! termdeck                 # Start with the default bindings
//! termdeck --print-menu    # Show the menu tree with accelerators
//! termdeck --check-keys    # Validate ~/.termdeck/config.toml keybindings
//! termdeck --write-config  # Write the config with every keybinding spelled out
//! ```
//!
//! # Default Keybindings (Ctrl on Linux/Windows, Cmd on macOS)
//!
//! | Key | Action |
//! |-----|--------|
//! | T | New tab |
//! | K/J | Previous/Next tab |
//! | W | Close tab |
//! | - | Split horizontally |
//! | \ | Split vertically |
//! | Alt+K/Alt+J | Previous/Next pane |
//! | D | Close pane |
//! | Q | Quit |

mod action;
mod app;
mod config;
mod menu;
mod ui;
mod wm;

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::action::{Action, ActionRegistry, Platform};
use crate::app::{App, Effect};
use crate::config::{Config, ConfigError};
use crate::ui::{KeyMapper, Renderer, TerminalHost, View};

/// Version string from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// What to do after argument parsing
#[derive(Debug, Default, PartialEq)]
struct Options {
    /// Print the menu tree and exit
    print_menu: bool,
    /// Print the resolved keybindings and exit
    check_keys: bool,
    /// Write the effective config, every binding spelled out, and exit
    write_config: bool,
    /// Explicit config file
    config: Option<PathBuf>,
}

fn print_version() {
    eprintln!("termdeck {}", VERSION);
}

fn print_help() {
    eprintln!("termdeck {} - tabbed, split-pane terminal workspace", VERSION);
    eprintln!();
    eprintln!("Usage: termdeck [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <PATH>       Use this config file instead of ~/.termdeck/config.toml");
    eprintln!("  --print-menu          Print the application menus and exit");
    eprintln!("  --check-keys          Validate and print the keybindings, then exit");
    eprintln!("  --write-config        Write the config file with every keybinding, then exit");
    eprintln!("  -v, --version         Show version");
    eprintln!("  -h, --help            Show this help");
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Options, String> {
    let mut options = Options::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                std::process::exit(0);
            }
            "--print-menu" => options.print_menu = true,
            "--check-keys" => options.check_keys = true,
            "--write-config" => options.write_config = true,
            "--config" => {
                let path = args.next().ok_or("Missing config path")?;
                options.config = Some(PathBuf::from(path));
            }
            arg => {
                return Err(format!("Unknown argument: {}. Use -h for help.", arg));
            }
        }
    }

    Ok(options)
}

/// Log to `~/.termdeck/termdeck.log`; RUST_LOG overrides the configured level
fn init_logging(level: &str) {
    let log_path = Config::data_dir()
        .map(|dir| dir.join("termdeck.log"))
        .unwrap_or_else(|| PathBuf::from("termdeck.log"));

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok();

    if let Some(file) = log_file {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}

fn load_config(options: &Options) -> anyhow::Result<Config> {
    match &options.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Config::load().context("loading config"),
    }
}

/// One line per action: group, label, accelerator
fn keybinding_table(registry: &ActionRegistry, platform: Platform) -> String {
    let mut out = String::new();
    for (action, accel) in registry.iter() {
        out.push_str(&format!(
            "{:<28} {:<28} {}\n",
            action.name(),
            action.qualified_label(),
            accel.display(platform)
        ));
    }
    out
}

fn main() -> anyhow::Result<()> {
    let options = match parse_args(env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    let config = load_config(&options)?;
    init_logging(&config.log_level);
    info!("termdeck {} starting...", VERSION);

    let platform = Platform::current();
    let registry = config.registry().context("building keybindings")?;
    let app = App::new(registry, config.workspace.clone());
    menu::check_accelerators(&app.menus(), platform).context("checking menu accelerators")?;

    if options.print_menu {
        print!("{}", menu::render_text(&app.menus(), platform));
        return Ok(());
    }
    if options.check_keys {
        print!("{}", keybinding_table(app.registry(), platform));
        return Ok(());
    }

    if options.write_config {
        let path = match options.config {
            Some(path) => path,
            None => Config::default_path().ok_or(ConfigError::NoHome)?,
        };
        config
            .with_explicit_keybindings(app.registry())
            .save(&path)
            .context("writing config")?;
        info!(path = %path.display(), "config written");
        println!("wrote {}", path.display());
        return Ok(());
    }

    run(app, platform)
}

/// Interactive main loop
fn run(mut app: App, platform: Platform) -> anyhow::Result<()> {
    let poll_timeout = Duration::from_millis(250);
    let mut renderer = Renderer::new();
    let mut host = TerminalHost::default();

    renderer.init()?;
    let platform = KeyMapper::input_platform(platform, renderer.keyboard_enhanced());
    info!(?platform, keyboard_enhanced = renderer.keyboard_enhanced(), "input ready");

    let hints = format!(
        "{} new tab | {} split | {} quit",
        app.registry().accelerator_for(Action::TabNew).display(platform),
        app.registry().accelerator_for(Action::PaneSplitHorizontally).display(platform),
        app.registry().accelerator_for(Action::AppQuit).display(platform),
    );
    let mut message: Option<String> = None;
    let mut redraw = true;

    loop {
        if redraw {
            let view = View {
                full_screen: host.full_screen,
                dev_tools: host.dev_tools,
                message: message.as_deref(),
                hints: &hints,
            };
            renderer.render(app.workspace(), &view)?;
            redraw = false;
        }

        if !event::poll(poll_timeout)? {
            continue;
        }

        match event::read()? {
            Event::Key(key_event) => {
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }
                let Some(chord) = KeyMapper::chord(&key_event, platform) else {
                    continue;
                };

                message = None;
                match app.handle_key(&chord, platform, &mut host) {
                    Some(Effect::CloseWindow) => {
                        info!("window closed");
                        break;
                    }
                    Some(effect) => debug!(?effect, %chord, "key handled"),
                    None => message = Some(format!("{} is not bound", chord.display(platform))),
                }

                if host.quit_requested {
                    break;
                }
                if host.reload_requested {
                    host.reload_requested = false;
                    app.reload();
                }
                if let Some(text) = host.take_message() {
                    message = Some(text);
                }
                redraw = true;
            }
            Event::Resize(cols, rows) => {
                debug!(cols, rows, "resize");
                redraw = true;
            }
            _ => {}
        }
    }

    renderer.cleanup()?;
    info!("termdeck exiting");
    Ok(())
}
