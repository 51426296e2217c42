// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, error, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use blogcast::app_config::{Config, LogLevel};
use blogcast::errors::AppError;
use blogcast::providers::minimax::MiniMax;
use blogcast::Controller;

/// Config file picked up from the working directory when no --config is given
const DEFAULT_CONFIG_PATH: &str = "blogcast.json";

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for blogcast
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// blogcast - narrated audio for blog posts
///
/// Extracts the article text of a rendered blog post and turns it into an
/// MP3 narration with the MiniMax text-to-speech API.
#[derive(Parser, Debug)]
#[command(name = "blogcast")]
#[command(version)]
#[command(about = "Turn a blog post's HTML into an MP3 narration")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "blogcast extracts the title, date and paragraphs of a blog post and narrates them.

EXAMPLES:
    blogcast post.html post.mp3                     # Narrate a post
    blogcast -e post.html                           # Print the narration text only
    blogcast --voice Calm_narrator post.html a.mp3  # Use another voice
    blogcast --log-level debug post.html post.mp3   # Show extraction details
    blogcast completions bash > blogcast.bash       # Generate bash completions

CONFIGURATION:
    Settings are read from blogcast.json in the working directory when it exists,
    or from the file given with --config. The API key is read from the
    MINIMAX_API_KEY environment variable.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Rendered blog post to narrate
    #[arg(value_name = "INPUT_HTML")]
    input_path: Option<PathBuf>,

    /// Where to write the MP3 narration
    #[arg(value_name = "OUTPUT_MP3")]
    output_path: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    config_path: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Print the extracted narration text without synthesizing audio
    #[arg(short, long)]
    extract_only: bool,

    /// Narrator voice id
    #[arg(long)]
    voice: Option<String>,

    /// Speech model name
    #[arg(long)]
    model: Option<String>,

    /// Synthesis endpoint URL
    #[arg(long)]
    endpoint: Option<String>,
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

    // @returns: Emoji and ANSI color for log level
    fn decoration_for_level(level: Level) -> (&'static str, &'static str) {
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
            let (emoji, color) = Self::decoration_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
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
async fn main() {
    // Accept everything at the logger; the max level is tightened after loading config
    if let Err(e) = CustomLogger::init(LevelFilter::Trace) {
        eprintln!("Failed to initialize logger: {}", e);
    }
    log::set_max_level(LevelFilter::Info);

    // Argument errors exit with 1 like every other failure; help and version exit with 0
    let cli = match CommandLineOptions::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            error!("{}", e);
            e.exit_code()
        }
    };

    log::logger().flush();
    std::process::exit(exit_code);
}

async fn run(cli: CommandLineOptions) -> Result<(), AppError> {
    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "blogcast", &mut std::io::stdout());
        return Ok(());
    }

    let input_path = cli.input_path.clone()
        .ok_or_else(|| AppError::Usage("INPUT_HTML is required. Usage: blogcast <INPUT_HTML> <OUTPUT_MP3>".to_string()))?;

    let config = load_config(&cli)?;
    log::set_max_level(config.log_level.to_level_filter());
    debug!("Effective configuration: {:?}", config);

    let controller = Controller::with_config(config);

    if cli.extract_only {
        let text = controller.extract(&input_path)?;
        println!("{}", text);
        return Ok(());
    }

    let output_path = cli.output_path
        .ok_or_else(|| AppError::Usage("OUTPUT_MP3 is required. Usage: blogcast <INPUT_HTML> <OUTPUT_MP3>".to_string()))?;

    let api_key = controller.config().api_key_from_env();
    let synthesizer = MiniMax::new(controller.config().tts.clone());

    controller
        .run(&input_path, &output_path, api_key.as_deref(), &synthesizer)
        .await?;

    Ok(())
}

// Load the config file and apply command line overrides on top of it
fn load_config(cli: &CommandLineOptions) -> Result<Config, AppError> {
    let loaded = match &cli.config_path {
        Some(path) => Config::load(path),
        None => Config::load_or_default(Path::new(DEFAULT_CONFIG_PATH)),
    };
    let mut config = loaded.map_err(|e| AppError::Config(format!("{:#}", e)))?;

    if let Some(voice) = &cli.voice {
        config.tts.voice_id = voice.clone();
    }

    if let Some(model) = &cli.model {
        config.tts.model = model.clone();
    }

    if let Some(endpoint) = &cli.endpoint {
        config.tts.endpoint = endpoint.clone();
    }

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate()
        .map_err(|e| AppError::Config(format!("Configuration validation failed: {:#}", e)))?;

    Ok(config)
}
