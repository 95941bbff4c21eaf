// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use skillscribe::app_config::{self, Config, TranslationProvider};
use skillscribe::app_controller::{Controller, TranslateOptions};

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    #[value(name = "openai")]
    OpenAI,
    #[value(name = "deepl")]
    DeepL,
    #[value(name = "google")]
    Google,
    #[value(name = "ollama")]
    Ollama,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::OpenAI => TranslationProvider::OpenAI,
            CliTranslationProvider::DeepL => TranslationProvider::DeepL,
            CliTranslationProvider::Google => TranslationProvider::Google,
            CliTranslationProvider::Ollama => TranslationProvider::Ollama,
        }
    }
}

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

#[derive(Subcommand, Debug)]
enum Commands {
    /// Batch-translate description files using a translation provider (default command)
    Translate(TranslateArgs),

    /// Count and deduplicate skill records across the ranking lists
    Count(CountArgs),

    /// Generate shell completions for skillscribe
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Root directory holding the translation units
    #[arg(value_name = "ROOT_DIR")]
    root_dir: Option<PathBuf>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Limit the number of units to translate (0 = unlimited)
    #[arg(short, long, default_value_t = 0)]
    limit: usize,

    /// Skip the first N units of the sorted pending set
    #[arg(short, long, default_value_t = 0)]
    skip: usize,

    /// Number of concurrent workers
    #[arg(short, long, default_value_t = 3)]
    workers: usize,

    /// Only list the units that would be translated, without translating
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Force re-translation of units whose target file already exists
    #[arg(short, long)]
    force: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct CountArgs {
    /// Skills JSON document to count
    #[arg(value_name = "SKILLS_JSON", default_value = "data/skills.json")]
    input: PathBuf,
}

/// skillscribe - skills dataset toolbox
///
/// Batch-translates per-skill description files using pluggable translation
/// providers, and counts/deduplicates skill records across ranking lists.
#[derive(Parser, Debug)]
#[command(name = "skillscribe")]
#[command(version = "1.0.0")]
#[command(about = "Batch translation and counting for a skills dataset")]
#[command(long_about = "skillscribe walks a tree of per-skill directories, finds description \
files that have no target-language sibling yet, and translates them with the selected provider.

EXAMPLES:
    skillscribe translate --provider openai            # Translate everything pending
    skillscribe translate --provider openai --limit 100  # Only the first 100 units
    skillscribe translate --provider openai --skip 200   # Resume past the first 200
    skillscribe translate --provider google            # Free backend, serialized with retries
    skillscribe translate -n data/skills-md            # Dry run: list pending units only
    skillscribe count data/skills.json                 # Print skill list counters
    skillscribe completions bash > skillscribe.bash    # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.

SUPPORTED PROVIDERS:
    openai - OpenAI API (requires OPENAI_API_KEY)
    deepl  - DeepL API (requires DEEPL_API_KEY)
    google - Free Google web translate (rate limited, single worker)
    ollama - Local Ollama server (default model: qwen2.5:7b)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    translate: TranslateArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "skillscribe", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Count(args)) => {
            let controller = Controller::with_config(Config::default())?;
            controller.run_count(&args.input)?;
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            run_translate(cli.translate).await
        }
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter_for(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        // Override config with CLI options if provided
        if let Some(provider) = &options.provider {
            config.translation.provider = provider.clone().into();
        }

        if let Some(root_dir) = &options.root_dir {
            config.base_dir = root_dir.clone();
        }

        // Update log level in config if specified via command line
        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        config
    } else {
        // Create default configuration if not exists
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );

        let mut config = Config::default();

        if let Some(provider) = &options.provider {
            config.translation.provider = provider.clone().into();
        }

        if let Some(root_dir) = &options.root_dir {
            config.base_dir = root_dir.clone();
        }

        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        // Save default config
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Validate the configuration after loading and overriding; missing
    // credentials abort here, before any work starts
    config
        .validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter_for(&config.log_level));
    }

    if !config.base_dir.exists() {
        return Err(anyhow!(
            "Root directory does not exist: {:?}",
            config.base_dir
        ));
    }

    let controller = Controller::with_config(config)?;
    let translate_options = TranslateOptions {
        limit: options.limit,
        skip: options.skip,
        workers: options.workers,
        dry_run: options.dry_run,
        force: options.force,
    };

    controller.run_translate(&translate_options).await?;
    Ok(())
}

fn level_filter_for(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}
