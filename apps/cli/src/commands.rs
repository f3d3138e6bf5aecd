//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use imsakia_core::{ConvertResult, ProgressReporter};
use imsakia_shared::{
    AppConfig, ConvertConfig, config_file_path, init_config, load_config, load_config_from,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// imsakia: turn a Ramadan schedule spreadsheet into JSON.
#[derive(Parser)]
#[command(
    name = "imsakia",
    version,
    about = "Convert a Ramadan prayer-time spreadsheet into a JSON array of days.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.imsakia/imsakia.toml.
    #[arg(long = "config", global = true, env = "IMSAKIA_CONFIG")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Convert the schedule workbook to JSON.
    Convert {
        /// Spreadsheet to read (xlsx, xlsm, xlsb, xls or ods).
        #[arg(short, long, env = "IMSAKIA_SOURCE")]
        source: Option<PathBuf>,

        /// JSON file to write. Its directory must exist.
        #[arg(short, long, env = "IMSAKIA_DEST")]
        dest: Option<PathBuf>,

        /// Rewrite times to 24-hour HH:MM and dates to YYYY-MM-DD.
        #[arg(long)]
        normalize: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "imsakia=info",
        1 => "imsakia=debug",
        _ => "imsakia=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config_file.as_deref();
    match cli.command {
        Command::Convert {
            source,
            dest,
            normalize,
        } => cmd_convert(config_path, source, dest, normalize),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(config_path),
        },
    }
}

/// Load the config file named on the command line, or the default one.
fn resolve_config(config_path: Option<&Path>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    Ok(config)
}

/// Merge config file values with CLI flags (flags win).
fn convert_config(
    app: &AppConfig,
    source: Option<PathBuf>,
    dest: Option<PathBuf>,
    normalize: bool,
) -> ConvertConfig {
    let mut config = ConvertConfig::from(app);
    if let Some(source) = source {
        config.source_path = source;
    }
    if let Some(dest) = dest {
        config.dest_path = dest;
    }
    config.normalize |= normalize;
    config
}

fn cmd_convert(
    config_path: Option<&Path>,
    source: Option<PathBuf>,
    dest: Option<PathBuf>,
    normalize: bool,
) -> Result<()> {
    let app = resolve_config(config_path)?;
    let config = convert_config(&app, source, dest, normalize);

    info!(
        source = %config.source_path.display(),
        dest = %config.dest_path.display(),
        normalize = config.normalize,
        "converting schedule"
    );

    let reporter = CliProgress::new()?;
    let result = imsakia_core::convert(&config, &reporter)
        .wrap_err_with(|| format!("conversion of {} failed", config.source_path.display()))?;

    println!("{}", success_message(&result));

    Ok(())
}

/// Line printed after a successful conversion.
fn success_message(result: &ConvertResult) -> String {
    let file_name = result
        .dest_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| result.dest_path.display().to_string());

    format!("Successfully created {file_name} with {} days.", result.count)
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Result<Self> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")?
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Ok(Self { spinner })
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn record_extracted(&self, current: usize, total: usize) {
        self.spinner.set_message(format!("Reading rows [{current}/{total}]"));
    }

    fn done(&self, _result: &ConvertResult) {
        self.spinner.finish_and_clear();
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let origin = match config_path {
        Some(path) => path.to_path_buf(),
        None => config_file_path()?,
    };
    let config = resolve_config(config_path)?;

    if origin.exists() {
        println!("# {}", origin.display());
    } else {
        println!("# defaults ({} not found)", origin.display());
    }
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
