//! CLI entry point for the showcase tool.
//!
//! Discovers showcase files, prints the generated virtual module, emits
//! parsed documentation, and keeps the module current while files change.
//!
//! # Usage
//!
//! ```bash
//! showcase [OPTIONS] <COMMAND>
//!
//! # List discovered showcases
//! showcase scan --config ./showcase.config.json
//!
//! # Print the virtual module source
//! showcase generate
//!
//! # Emit grouped documentation as JSON
//! showcase parse --output docs.json
//!
//! # Regenerate on every change, mirroring the module to disk
//! showcase watch --write .showcase/modules.js
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::io::Write;
use std::sync::{Arc, OnceLock};

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use color_eyre::eyre::{WrapErr, eyre};
use sc_core::{CONFIG_FILE_NAME, DiscoveredShowcase, ResolvedConfig, ShowcaseConfig};
use sc_scanner::{SourceLoader, discover, documentation, group_parsed, parse_all};
use sc_virtual::{HostSignals, VirtualModule, WatchCoordinator, generate};
use sc_watcher::{FileWatcher, ShowcaseFilter};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Discovers `*.showcase.tsx` / `*.showcase.jsx` files and serves them as a
/// single generated module.
#[derive(Parser)]
#[command(name = "showcase", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// Path to the configuration file.
    #[arg(short, long, global = true, env = "SHOWCASE_CONFIG", default_value = CONFIG_FILE_NAME)]
    config: Utf8PathBuf,

    /// Discovery root. Defaults to the directory containing the config file.
    #[arg(short, long, global = true, env = "SHOWCASE_ROOT")]
    root: Option<Utf8PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List discovered showcase files.
    Scan {
        /// Print a JSON array instead of one relative path per line.
        #[arg(long)]
        json: bool,
    },

    /// Print or write the generated virtual module.
    Generate {
        /// Output file (defaults to stdout).
        #[arg(short, long)]
        output: Option<Utf8PathBuf>,
    },

    /// Parse every showcase and emit documentation grouped by component.
    Parse {
        /// Output file (defaults to stdout).
        #[arg(short, long)]
        output: Option<Utf8PathBuf>,
    },

    /// Regenerate the virtual module whenever a showcase file changes.
    Watch {
        /// Mirror the module to this file after every regeneration.
        #[arg(short, long)]
        write: Option<Utf8PathBuf>,
    },
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects `RUST_LOG` if set. Otherwise uses `debug` with `--verbose` and
/// `info` by default, with `notify` and `mio` held at `warn`.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(format!("{level},mio=warn,notify=warn"))
    });

    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_ansi(use_ansi).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Loads and resolves the configuration named on the command line.
///
/// With `--root`, the file is still read for its options but patterns are
/// matched below the given directory instead of the file's parent.
fn build_config(config: &Utf8Path, root: Option<&Utf8Path>) -> color_eyre::Result<ResolvedConfig> {
    let Some(root) = root else {
        return Ok(ShowcaseConfig::load(config)?);
    };

    if !root.is_dir() {
        return Err(eyre!("Root is not a directory: {root}"));
    }
    let root = root
        .canonicalize_utf8()
        .wrap_err_with(|| format!("Failed to resolve root {root}"))?;

    Ok(ShowcaseConfig::load_raw(config)?.resolve(root)?)
}

// =============================================================================
// HOST INTEGRATION
// =============================================================================

/// Host side of the watch loop for a terminal session.
///
/// There is no bundler to notify, so signals are logged. With `--write`, the
/// module is mirrored to disk on every invalidation.
#[derive(Debug, Default)]
struct CliHost {
    module: OnceLock<Arc<VirtualModule>>,
    write: Option<Utf8PathBuf>,
}

impl CliHost {
    fn new(write: Option<Utf8PathBuf>) -> Self {
        Self {
            module: OnceLock::new(),
            write,
        }
    }

    /// Attaches the served module once the coordinator has created it.
    fn attach(&self, module: Arc<VirtualModule>) {
        let _ = self.module.set(module);
        self.mirror();
    }

    fn mirror(&self) {
        let (Some(target), Some(module)) = (&self.write, self.module.get()) else {
            return;
        };
        match write_output(target, &module.content()) {
            Ok(()) => info!(path = %target, version = module.version(), "Module written"),
            Err(error) => warn!(path = %target, error = %error, "Failed to write module"),
        }
    }
}

impl HostSignals for CliHost {
    fn invalidate(&self, id: &str) {
        info!(id, "Invalidate");
        self.mirror();
    }

    fn full_reload(&self) {
        info!("Full reload");
    }
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Prints every discovered showcase relative to the root.
fn run_scan(config: &ResolvedConfig, json: bool) -> color_eyre::Result<()> {
    let files = discover(config)?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    if json {
        writeln!(handle, "{}", scan_json(&files)?)?;
    } else {
        for file in &files {
            writeln!(handle, "{}", file.relative_path)?;
        }
    }

    Ok(())
}

fn scan_json(files: &[DiscoveredShowcase]) -> color_eyre::Result<String> {
    serde_json::to_string_pretty(files).wrap_err("Failed to serialize JSON")
}

/// Prints or writes the generated module.
fn run_generate(config: &ResolvedConfig, output: Option<&Utf8Path>) -> color_eyre::Result<()> {
    let files = discover(config)?;
    emit(&generate(&files), output)
}

/// Parses every showcase and emits grouped documentation.
fn run_parse(config: &ResolvedConfig, output: Option<&Utf8Path>) -> color_eyre::Result<()> {
    let mut content = parse_json(config)?;
    content.push('\n');
    emit(&content, output)
}

fn parse_json(config: &ResolvedConfig) -> color_eyre::Result<String> {
    let files = discover(config)?;
    let docs = documentation(group_parsed(parse_all(&SourceLoader, &files)));
    info!(files = files.len(), components = docs.len(), "Parsed showcases");
    serde_json::to_string_pretty(&docs).wrap_err("Failed to serialize JSON")
}

/// Runs the coordinator until Ctrl-C (or SIGTERM on Unix).
async fn run_watch(config: ResolvedConfig, write: Option<Utf8PathBuf>) -> color_eyre::Result<()> {
    let host = Arc::new(CliHost::new(write));
    let coordinator = WatchCoordinator::start(&config, Arc::clone(&host) as Arc<dyn HostSignals>).await?;
    host.attach(coordinator.module());

    if !config.watch.enabled {
        warn!("File watching is disabled in the configuration");
        return Ok(());
    }

    let watcher = FileWatcher::new(&config.root, &config.watch, ShowcaseFilter::default())?;
    let shutdown = CancellationToken::new();
    tokio::spawn(cancel_on_signal(shutdown.clone()));

    Arc::new(coordinator).run(watcher, shutdown).await?;
    info!("Stopped");
    Ok(())
}

async fn cancel_on_signal(shutdown: CancellationToken) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => info!("Received Ctrl-C, shutting down"),
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down"),
                }
            }
            Err(error) => {
                warn!(error = %error, "Cannot listen for SIGTERM");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        info!("Received Ctrl-C, shutting down");
    }

    shutdown.cancel();
}

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

fn emit(content: &str, output: Option<&Utf8Path>) -> color_eyre::Result<()> {
    if let Some(path) = output {
        write_output(path, content).wrap_err_with(|| format!("Failed to write {path}"))?;
        info!(path = %path, "Output written");
    } else {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        write!(handle, "{content}")?;
    }
    Ok(())
}

/// Writes `content` to `path`, creating parent directories.
fn write_output(path: &Utf8Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.no_color);

    let config = build_config(&cli.config, cli.root.as_deref())?;
    info!(root = %config.root, patterns = ?config.showcase_paths, "Configuration loaded");

    match cli.command {
        Commands::Scan { json } => run_scan(&config, json),
        Commands::Generate { output } => run_generate(&config, output.as_deref()),
        Commands::Parse { output } => run_parse(&config, output.as_deref()),
        Commands::Watch { write } => run_watch(config, write).await,
    }
}
