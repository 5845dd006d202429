// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use submovies::app_config::{self, Config, TranslationProvider};
use submovies::app_controller::{Controller, OutputOptions};
use submovies::file_utils::FileManager;
use submovies::format_converter::{internal_srt_to_vtt, vtt_to_internal_srt};
use submovies::subtitle_processor::{detect_format, SubtitleCollection, SubtitleFormat};
use submovies::translation::CancelHandle;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Gemini,
    Mock,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Gemini => TranslationProvider::Gemini,
            CliTranslationProvider::Mock => TranslationProvider::Mock,
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

/// CLI Wrapper for SubtitleFormat to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliSubtitleFormat {
    Srt,
    Vtt,
}

impl From<CliSubtitleFormat> for SubtitleFormat {
    fn from(cli_format: CliSubtitleFormat) -> Self {
        match cli_format {
            CliSubtitleFormat::Srt => SubtitleFormat::Srt,
            CliSubtitleFormat::Vtt => SubtitleFormat::Vtt,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate subtitles (default command)
    Translate(TranslateArgs),

    /// Check whether a file is plausible SRT or WebVTT
    Validate {
        /// Subtitle file to check
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Convert a subtitle file between SRT and WebVTT
    Convert {
        /// Subtitle file to convert
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Target format
        #[arg(long, value_enum)]
        to: CliSubtitleFormat,

        /// Output file; prints to stdout when absent
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions for submovies
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
struct TranslateArgs {
    /// Input .srt/.vtt file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Output file name (extension follows the input format)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Target language code (e.g., 'fa', 'en', 'fr')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Tone of the translated dialogue (e.g., Neutral, Formal, Casual)
    #[arg(long)]
    tone: Option<String>,

    /// Creativity, 0.0 to 1.0
    #[arg(long)]
    temperature: Option<f32>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// Cues per request
    #[arg(long)]
    chunk_size: Option<usize>,

    /// API key for the provider
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Print the translation instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Print the original and translated text side by side
    #[arg(long)]
    compare: bool,
}

/// submovies - AI subtitle translation for SRT and WebVTT
#[derive(Parser, Debug)]
#[command(name = "submovies")]
#[command(version)]
#[command(about = "AI-powered SRT/WebVTT subtitle translation tool")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "submovies translates SRT and WebVTT subtitles with Google Gemini, keeping timings intact.

EXAMPLES:
    submovies -t fa movie.srt                   # Translate into Persian
    submovies -t fa --tone Formal talk.vtt      # VTT in, VTT out
    submovies -t de -o german movie.srt         # Writes german.srt
    submovies --stdout --compare movie.srt      # Print side by side, write nothing
    submovies -t es /subtitles/                 # Translate a whole directory
    submovies validate movie.srt                # Check the format
    submovies convert talk.vtt --to srt         # Convert without translating
    submovies completions bash > submovies.bash # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically. The API key may also come from GEMINI_API_KEY.")]
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
        // The filter inside the logger stays wide open; `set_max_level` does the gating
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI colour code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
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
            let level = record.level();

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                Self::get_color_for_level(level),
                now,
                Self::get_emoji_for_level(level),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the config or the command line says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "submovies", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Validate { file }) => run_validate(&file),
        Some(Commands::Convert { file, to, output }) => run_convert(&file, to.into(), output.as_deref()),
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => run_translate(cli.translate).await,
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    let input_path = options
        .input_path
        .clone()
        .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

    let config = load_config(&options)?;

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let controller = Controller::with_config(config)?;
    controller.check_connection().await?;

    let cancel = CancelHandle::new();
    let ctrl_c_handle = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Stopping after the current chunk…");
            ctrl_c_handle.cancel();
        }
    });

    let output_options = OutputOptions {
        output: options.output.clone(),
        force_overwrite: options.force_overwrite,
        to_stdout: options.stdout,
        compare: options.compare,
    };

    if input_path.is_file() {
        controller.run(input_path, &output_options, &cancel).await?;
    } else if input_path.is_dir() {
        controller.run_folder(input_path, &output_options, &cancel).await?;
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", input_path));
    }

    if cancel.is_cancelled() {
        warn!("Translation cancelled");
    }

    Ok(())
}

/// Load the config file (writing a default one if missing) and apply
/// command-line overrides on top.
fn load_config(options: &TranslateArgs) -> Result<Config> {
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        Config::from_file(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();
        config
            .save(config_path)
            .context(format!("Failed to write default config to file: {}", config_path))?;
        config
    };

    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }
    if let Some(model) = &options.model {
        config.translation.model = model.clone();
    }
    if let Some(api_key) = options.api_key.as_ref().filter(|key| !key.trim().is_empty()) {
        config.translation.api_key = api_key.clone();
    }
    if let Some(temperature) = options.temperature {
        config.translation.temperature = temperature;
    }
    if let Some(chunk_size) = options.chunk_size {
        config.translation.chunk_size = chunk_size;
    }
    if let Some(target_lang) = &options.target_language {
        config.target_language = target_lang.clone();
    }
    if let Some(tone) = &options.tone {
        config.tone = tone.clone();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    Ok(config)
}

fn run_validate(file: &Path) -> Result<()> {
    FileManager::detect_format_from_extension(file)?;
    let content = FileManager::read_to_string(file)?;

    let format = detect_format(&content)?;
    let collection = SubtitleCollection::parse(&content, format)?;

    info!(
        "{}: valid {} with {} cue(s)",
        file.display(),
        format.extension().to_uppercase(),
        collection.len()
    );
    Ok(())
}

fn run_convert(file: &Path, to: SubtitleFormat, output: Option<&Path>) -> Result<()> {
    FileManager::detect_format_from_extension(file)?;
    let content = FileManager::read_to_string(file)?;
    let from = detect_format(&content)?;

    let converted = match (from, to) {
        (SubtitleFormat::Vtt, SubtitleFormat::Srt) => vtt_to_internal_srt(&content)?,
        (SubtitleFormat::Srt, SubtitleFormat::Vtt) => internal_srt_to_vtt(&content),
        _ => {
            warn!("{} is already {}, copying unchanged", file.display(), to);
            content.trim().to_string()
        }
    };

    match output {
        Some(path) => {
            FileManager::write_to_file(path, &converted)?;
            info!("Success: {}", path.display());
        }
        None => println!("{}", converted),
    }

    Ok(())
}
