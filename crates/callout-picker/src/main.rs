//! Headless host harness for the callout picker.
//!
//! Stands in for the host application: loads the plugin against an in-memory
//! document, keeps the enabled flags in `<data_dir>/data.json`, and drives the
//! bridge commands from lines typed on stdin.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load HarnessConfig (TOML)      -- written with defaults on first run
//!  └─ PluginState::on_load()          -- loads flags, registers command/ribbon/tab
//!  └─ stdin loop
//!       ├─ /open, text, /pick N, /cancel  -> picker bridge commands
//!       ├─ /settings, /enable, /disable   -> settings bridge commands
//!       └─ /select, /range, /doc          -> BufferEditor
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use callout_core::Catalog;
use callout_picker::infrastructure::{
    host::{buffer_editor::BufferEditor, log::LogCommandRegistrar, log::LogNotifier},
    storage::{
        config::{config_file_path, load_or_init_config, HarnessConfig},
        plugin_data::FilePluginData,
    },
    ui_bridge::{self, CalloutDto, HostServices, PluginState},
};

#[derive(Debug, Parser)]
#[command(name = "callout-picker", about = "Headless host harness for the callout picker")]
struct Args {
    /// Harness config file (defaults to the platform config directory).
    #[arg(long, env = "CALLOUT_PICKER_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding the plugin data blob (`data.json`).
    #[arg(long, env = "CALLOUT_PICKER_DATA_DIR")]
    data_dir: Option<PathBuf>,
}

/// One line of harness input.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Open,
    Pick(usize),
    Cancel,
    Settings,
    Toggle(String, bool),
    Select(String),
    Range(usize, usize),
    Doc,
    Help,
    Quit,
    Query(String),
    Invalid(String),
}

impl Input {
    fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        let Some(command) = line.strip_prefix('/') else {
            return Input::Query(line.to_string());
        };
        let (name, arg) = command
            .split_once(' ')
            .map(|(n, a)| (n, a.trim()))
            .unwrap_or((command, ""));
        match name {
            "open" => Input::Open,
            "pick" => match arg.parse() {
                Ok(n) => Input::Pick(n),
                Err(_) => Input::Invalid(format!("/pick needs a number, got {arg:?}")),
            },
            "cancel" => Input::Cancel,
            "settings" => Input::Settings,
            "enable" if !arg.is_empty() => Input::Toggle(arg.to_string(), true),
            "disable" if !arg.is_empty() => Input::Toggle(arg.to_string(), false),
            "select" => Input::Select(arg.to_string()),
            "range" => match arg.split_once(' ').map(|(a, b)| (a.parse(), b.trim().parse())) {
                Some((Ok(start), Ok(end))) => Input::Range(start, end),
                _ => Input::Invalid(format!("/range needs two byte offsets, got {arg:?}")),
            },
            "doc" => Input::Doc,
            "help" => Input::Help,
            "quit" | "exit" => Input::Quit,
            _ => Input::Invalid(format!("unknown command /{name}")),
        }
    }
}

const HELP: &str = "\
/open               open the picker
<text>              set the picker query
/pick N             insert suggestion N and close the picker
/cancel             close the picker
/settings           list callout toggles
/enable ID          show callout ID in the picker
/disable ID         hide callout ID from the picker
/select TEXT        append TEXT to the document and select it
/range START END    select bytes START..END of the document
/doc                print the document
/quit               exit";

fn print_suggestions(found: &[CalloutDto]) {
    if found.is_empty() {
        println!("  (no results)");
    }
    for (i, c) in found.iter().enumerate() {
        println!("  {i:>2}  {}", c.identifier);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // The log level lives in the config file, so read it before the subscriber
    // exists and report any problem once logging is up.
    let config_path = args.config.clone().or_else(|| config_file_path().ok());
    let (mut config, config_problem) = match config_path.as_deref().map(load_or_init_config) {
        Some(Ok(cfg)) => (cfg, None),
        Some(Err(e)) => (HarnessConfig::default(), Some(e.to_string())),
        None => (
            HarnessConfig::default(),
            Some("no platform config directory".to_string()),
        ),
    };
    if let Some(dir) = args.data_dir {
        config.plugin.data_dir = Some(dir);
    }

    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.plugin.log_level)),
        )
        .init();

    if let Some(problem) = config_problem {
        warn!(problem = %problem, "using default harness config");
    }

    let data_dir = config
        .data_dir()
        .context("no plugin data directory; pass --data-dir")?;
    info!(data_dir = %data_dir.display(), "callout picker harness starting");

    let editor = Arc::new(BufferEditor::new());
    let registrar = LogCommandRegistrar::new();
    let state = PluginState::on_load(
        Catalog::builtin(),
        HostServices {
            data: Arc::new(FilePluginData::in_dir(&data_dir)),
            notifier: Arc::new(LogNotifier),
            editor: editor.clone(),
        },
        &registrar,
        &config.commands,
    );

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Input::parse(&line) {
            Input::Open => {
                let result = ui_bridge::open_picker(state.clone()).await;
                print_suggestions(&result.data.unwrap_or_default());
            }
            Input::Query(query) => {
                let result = ui_bridge::update_query(state.clone(), query).await;
                match result.data {
                    Some(found) => print_suggestions(&found),
                    None => println!("  {} (try /open)", result.error.unwrap_or_default()),
                }
            }
            Input::Pick(index) => {
                let result = ui_bridge::choose_suggestion(state.clone(), index).await;
                match result.data {
                    Some(chosen) => println!("  inserted {}", chosen.identifier),
                    None => println!("  {}", result.error.unwrap_or_default()),
                }
            }
            Input::Cancel => {
                ui_bridge::dismiss_picker(state.clone()).await;
            }
            Input::Settings => {
                if let Some(settings) = ui_bridge::get_settings(state.clone()).await.data {
                    println!("{}", settings.heading);
                    for t in settings.toggles {
                        let mark = if t.enabled { "x" } else { " " };
                        println!("  [{mark}] {}", t.label);
                    }
                }
            }
            Input::Toggle(identifier, enabled) => {
                let result = ui_bridge::set_callout_enabled(state.clone(), identifier, enabled).await;
                if let Some(e) = result.error {
                    println!("  {e}");
                }
            }
            Input::Select(text) => editor.append_and_select(&text),
            Input::Range(start, end) => {
                if let Err(e) = editor.select(start..end) {
                    println!("  {e}");
                }
            }
            Input::Doc => println!("{}", editor.contents()),
            Input::Help => println!("{HELP}"),
            Input::Invalid(message) => println!("  {message}"),
            Input::Quit => break,
        }
    }

    state.on_unload().await;
    info!("callout picker harness stopped");
    Ok(())
}
