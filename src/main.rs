// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;

use erashape::app_config::{self, parse_era_spec, Config};
use erashape::report::render_table;
use erashape::{Controller, ListPolicy};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for ListPolicy to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliListPolicy {
    Skip,
    Tag,
}

impl From<CliListPolicy> for ListPolicy {
    fn from(cli_policy: CliListPolicy) -> Self {
        match cli_policy {
            CliListPolicy::Skip => ListPolicy::Skip,
            CliListPolicy::Tag => ListPolicy::Tag,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for erashape
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// erashape - structural drift of MLB game data across eras
///
/// Samples one regular-season game per era from the MLB Stats API, infers the
/// field paths and value types of each live feed, and reports the fields that
/// differ between eras.
#[derive(Parser, Debug)]
#[command(name = "erashape")]
#[command(version)]
#[command(about = "Compare MLB game data structure across eras")]
#[command(long_about = "erashape samples one game per era from the MLB Stats API and lists the fields whose type or presence differs.

EXAMPLES:
    erashape                                    # Compare the configured eras
    erashape -e Statcast=2023 -e Old=1995       # Compare custom eras
    erashape --concurrent -o out/diff.csv       # Fetch eras at once, custom output
    erashape --list-policy tag                  # Also record empty and scalar lists
    erashape completions bash > erashape.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Era to compare as LABEL=YEAR; repeat to replace the configured eras
    #[arg(short, long = "era", value_name = "LABEL=YEAR")]
    eras: Vec<String>,

    /// CSV report path
    #[arg(short, long)]
    output: Option<String>,

    /// Stats API base URL
    #[arg(long, env = "ERASHAPE_BASE_URL")]
    base_url: Option<String>,

    /// Fetch all eras concurrently
    #[arg(long)]
    concurrent: bool,

    /// Treatment of empty and scalar arrays
    #[arg(long, value_enum)]
    list_policy: Option<CliListPolicy>,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn new() -> Self {
        CustomLogger { level: LevelFilter::Trace }
    }

    // @initializes: Global logger
    // The logger passes everything; `log::set_max_level` is the only filter,
    // so the level can be raised once the config is loaded.
    fn init(initial_level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger::new()))?;
        log::set_max_level(initial_level);
        Ok(())
    }

    // @returns: Emoji and ANSI color for log level
    fn decoration(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, color) = Self::decoration(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the config has been read
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "erashape", &mut std::io::stdout());
        return Ok(());
    }

    run_compare(cli).await
}

async fn run_compare(options: CommandLineOptions) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&options.config_path)?;
    apply_overrides(&mut config, &options)?;

    config.validate().context("Configuration validation failed")?;

    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let mut controller = Controller::with_config(config)?;
    if options.no_progress {
        controller = controller.without_progress();
    }

    let summary = controller.run().await?;

    if summary.differences.is_empty() {
        println!("\nNo fields differ between eras.");
    } else {
        println!("\nFields that differ between eras:");
        print!("{}", render_table(&summary.differences));
    }

    Ok(())
}

fn apply_overrides(config: &mut Config, options: &CommandLineOptions) -> Result<()> {
    if !options.eras.is_empty() {
        config.eras = options
            .eras
            .iter()
            .map(|spec| parse_era_spec(spec))
            .collect::<Result<Vec<_>, _>>()?;
    }

    if let Some(output) = &options.output {
        config.output_path = output.clone();
    }

    if let Some(base_url) = &options.base_url {
        config.api.base_url = base_url.clone();
    }

    if options.concurrent {
        config.concurrent = true;
    }

    if let Some(policy) = &options.list_policy {
        config.list_policy = policy.clone().into();
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    Ok(())
}
