//! Entry point for the **tilerc** command-line tool.
//!
//! Loads the configuration (or the compiled-in defaults) and runs one
//! subcommand: validate it, list the key map, preview task-list labels,
//! test a window against the float rules, dump the effective JSON, or run
//! the autostart hook.

use clap::{Parser, Subcommand, ValueEnum};
use log::{error, info, warn};
use std::path::PathBuf;
use tilerc::bar::WindowState;
use tilerc::config::{Config, Severity};
use tilerc::keys::Binding;
use tilerc::label::LabelWidth;
use tilerc::layout::WindowProps;
use tilerc::traits::ProcessSpawner;

#[derive(Parser)]
#[command(name = "tilerc", version, about = "Tiling window manager configuration")]
struct Cli {
    /// Configuration file (default: $XDG_CONFIG_HOME/tilerc/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration
    Check,
    /// List every key binding
    Keys,
    /// Format window titles the way the task list does
    Label {
        /// Slot width in characters (default: the configured task list)
        #[arg(long)]
        width: Option<usize>,
        /// Window state, selects the marker in front of the title
        #[arg(long, value_enum, default_value_t = State::Normal)]
        state: State,
        /// Titles to format
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Report whether a window would start floating
    Float {
        /// WM_CLASS entry (repeatable)
        #[arg(long = "class")]
        wm_class: Vec<String>,
        #[arg(long, default_value = "")]
        title: String,
        /// Window type without prefix, e.g. `dialog`
        #[arg(long = "type", default_value = "")]
        wm_type: String,
    },
    /// Print the effective configuration as JSON (secrets omitted)
    Dump,
    /// Run the autostart hook
    Autostart,
}

#[derive(Clone, Copy, ValueEnum)]
enum State {
    Normal,
    Floating,
    Maximized,
    Minimized,
}

impl From<State> for WindowState {
    fn from(s: State) -> Self {
        match s {
            State::Normal => WindowState::Normal,
            State::Floating => WindowState::Floating,
            State::Maximized => WindowState::Maximized,
            State::Minimized => WindowState::Minimized,
        }
    }
}

/// Resolve the config directory (`$XDG_CONFIG_HOME/tilerc`).
fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("tilerc")
}

/// Load the config from `path`, or from the default location.  Only a
/// missing default file falls back to compiled-in defaults; any other
/// failure is fatal.
fn load_config(path: Option<PathBuf>) -> Result<Config, tilerc::config::ConfigError> {
    let config = match path {
        Some(p) => {
            let cfg = Config::load(&p)?;
            info!("loaded config from {}", p.display());
            cfg
        }
        None => Config::load_or_default(&config_dir().join("config.json"))?,
    };
    Ok(config)
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = match load_config(cli.config) {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let code = match cli.command {
        Commands::Check => run_check(&config),
        Commands::Keys => run_keys(&config),
        Commands::Label { width, state, text } => run_label(&config, width, state.into(), &text),
        Commands::Float {
            wm_class,
            title,
            wm_type,
        } => run_float(
            &config,
            &WindowProps {
                wm_class,
                title,
                wm_type,
            },
        ),
        Commands::Dump => run_dump(&config),
        Commands::Autostart => run_autostart(&config),
    };
    std::process::exit(code);
}

fn run_check(config: &Config) -> i32 {
    let mut config = config.clone();
    config.resolve_secrets();
    let problems = config.check();
    let mut errors = 0;
    for p in &problems {
        match p.severity() {
            Severity::Warning => warn!("{}", p),
            Severity::Error => {
                errors += 1;
                error!("{}", p);
            }
        }
        println!("{}", p);
    }
    if errors > 0 {
        println!("{} error(s), {} warning(s)", errors, problems.len() - errors);
        1
    } else {
        println!("config OK ({} warning(s))", problems.len());
        0
    }
}

fn run_keys(config: &Config) -> i32 {
    let keys = match config.resolved_keys() {
        Ok(k) => k,
        Err(e) => {
            error!("{}", e);
            return 1;
        }
    };
    for b in &keys {
        match b {
            Binding::Key(k) => println!("{:<20} {:<45} {}", k.combo().to_string(), k.action.to_string(), k.desc),
            Binding::Chord(c) => {
                println!("{:<20} {:<45} {}", c.combo().to_string(), "(chord)", c.desc);
                for k in &c.submappings {
                    println!("  {:<18} {:<45} {}", k.combo().to_string(), k.action.to_string(), k.desc);
                }
            }
        }
    }
    0
}

fn run_label(config: &Config, width: Option<usize>, state: WindowState, text: &[String]) -> i32 {
    let mut task_list = config.task_list();
    if let Some(w) = width {
        match LabelWidth::new(w) {
            Ok(w) => task_list.label_width = w,
            Err(e) => {
                error!("{}", e);
                return 2;
            }
        }
    }
    for t in text {
        println!("|{}|", task_list.entry_text(t, state));
    }
    0
}

fn run_float(config: &Config, window: &WindowProps) -> i32 {
    if config.floating.should_float(window) {
        println!("floating");
    } else {
        println!("tiled");
    }
    0
}

fn run_dump(config: &Config) -> i32 {
    match config.to_json() {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            error!("{}", e);
            1
        }
    }
}

fn run_autostart(config: &Config) -> i32 {
    match config.autostart.run(&ProcessSpawner) {
        Ok(Some(pid)) => {
            info!("autostart running as pid {}", pid);
            0
        }
        Ok(None) => 0,
        Err(e) => {
            error!("{}", e);
            1
        }
    }
}
