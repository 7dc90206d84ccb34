// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::{Read, Write};
use std::path::PathBuf;

use linguaflow::app_config::{self, Config, TranslationBackend};
use linguaflow::app_controller::Controller;
use linguaflow::dictionary::DictionaryEntry;
use linguaflow::grammar::{self, GrammarIssue};
use linguaflow::language_utils;

/// CLI Wrapper for TranslationBackend to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationBackend {
    #[value(name = "mymemory")]
    MyMemory,
    Static,
}

impl From<CliTranslationBackend> for TranslationBackend {
    fn from(cli_backend: CliTranslationBackend) -> Self {
        match cli_backend {
            CliTranslationBackend::MyMemory => TranslationBackend::MyMemory,
            CliTranslationBackend::Static => TranslationBackend::Static,
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
    /// Translate text (use '-' to read from stdin)
    Translate(TranslateArgs),

    /// Check grammar and spelling with LanguageTool
    Grammar {
        /// Text to check
        text: String,

        /// Language of the text (e.g. 'en-US', 'fr'); defaults to the config value
        #[arg(short = 'L', long)]
        language: Option<String>,

        /// Apply the first suggestion of every issue and print the result
        #[arg(long)]
        fix: bool,
    },

    /// Look up a word in the dictionary
    Define {
        /// Word to look up
        word: String,

        /// Query dictionaryapi.dev instead of the bundled dictionary
        #[arg(short, long)]
        remote: bool,
    },

    /// List language codes offered by default
    Languages,

    /// Generate shell completions for linguaflow
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Text to translate, or '-' for stdin
    #[arg(value_name = "TEXT", required_unless_present = "listen")]
    text: Option<String>,

    /// Take the text from speech recognition in the source language
    #[arg(long, conflicts_with = "text")]
    listen: bool,

    /// Source language code (e.g., 'en', 'es', 'fr', or 'auto')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Translation backend to use
    #[arg(short, long, value_enum)]
    backend: Option<CliTranslationBackend>,

    /// Read the translation aloud when speech is available
    #[arg(long)]
    speak: bool,
}

/// linguaflow - multilingual translation toolkit
///
/// Translates long text through free translation services, checks grammar
/// and looks words up in a dictionary.
#[derive(Parser, Debug)]
#[command(name = "linguaflow")]
#[command(version)]
#[command(about = "Multilingual translation toolkit")]
#[command(long_about = "linguaflow translates text through free web services, splitting long input into chunks the services accept.

EXAMPLES:
    linguaflow translate \"Hello world.\"              # Translate using default config
    linguaflow translate -s en -t hi \"Good morning\"  # English to Hindi
    cat notes.txt | linguaflow translate -t fr -      # Translate stdin
    linguaflow translate -b static \"Hello world\"     # Offline word tables
    linguaflow translate --listen -t es              # Translate what is heard
    linguaflow grammar \"This are wrong.\"             # Check grammar
    linguaflow define happy                          # Bundled dictionary
    linguaflow completions bash > linguaflow.bash    # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
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
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI color for level
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
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, color) = Self::decoration(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                color,
                now,
                emoji,
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
    // Info until the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "linguaflow", &mut std::io::stdout());
        return Ok(());
    }

    if let Commands::Languages = &cli.command {
        for code in language_utils::SUPPORTED_LANGUAGES {
            let name = language_utils::get_language_name(code).unwrap_or_default();
            println!("{:<4}{}", code, name);
        }
        return Ok(());
    }

    let mut config = Config::load_or_create(&cli.config_path)?;
    if let Some(log_level) = cli.log_level.clone() {
        config.log_level = log_level.into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    if let Commands::Translate(args) = &cli.command {
        if let Some(source) = &args.source_language {
            config.source_language = source.clone();
        }
        if let Some(target) = &args.target_language {
            config.target_language = target.clone();
        }
        if let Some(backend) = &args.backend {
            config.translation.backend = backend.clone().into();
        }
    }

    let controller = Controller::with_config(config).context("Configuration validation failed")?;

    match cli.command {
        Commands::Translate(args) => run_translate(&controller, args).await,
        Commands::Grammar { text, language, fix } => {
            run_grammar(&controller, &text, language.as_deref(), fix).await
        }
        Commands::Define { word, remote } => run_define(&controller, &word, remote).await,
        Commands::Languages | Commands::Completions { .. } => Ok(()),
    }
}

async fn run_translate(controller: &Controller, args: TranslateArgs) -> Result<()> {
    let config = controller.config();

    let text = match args.text {
        Some(text) if text == "-" => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read text from stdin")?;
            buffer
        }
        Some(text) => text,
        None => controller
            .listen(&config.source_language)
            .await
            .context("Failed to capture speech")?,
    };
    info!(
        "Translating from {} to {} with {}",
        language_utils::get_language_name(&config.source_language)?,
        language_utils::get_language_name(&config.target_language)?,
        config.translation.backend.display_name()
    );

    let outcome = controller
        .translate(&text, &config.source_language, &config.target_language)
        .await?;
    println!("{}", outcome.text);

    if args.speak {
        controller.speak(&outcome.text, &config.target_language).await?;
    }
    Ok(())
}

async fn run_grammar(
    controller: &Controller,
    text: &str,
    language: Option<&str>,
    fix: bool,
) -> Result<()> {
    let issues = controller.check_grammar(text, language).await?;
    if issues.is_empty() {
        info!("No issues found");
        println!("{}", text);
        return Ok(());
    }

    for issue in &issues {
        print_issue(issue);
    }

    if fix {
        println!("{}", grammar::apply_first_suggestions(text, &issues));
    } else {
        warn!("{} issue(s) found, use --fix to apply suggestions", issues.len());
    }
    Ok(())
}

fn print_issue(issue: &GrammarIssue) {
    let suggestions = if issue.replacements.is_empty() {
        "no suggestion".to_string()
    } else {
        issue.replacements.join(", ")
    };
    println!(
        "[{}..{}] {} ({})\n    {}",
        issue.offset,
        issue.offset + issue.length,
        issue.message,
        suggestions,
        issue.context
    );
}

async fn run_define(controller: &Controller, word: &str, remote: bool) -> Result<()> {
    let entries = controller.define(word, remote).await?;
    for entry in &entries {
        print_entry(entry);
    }
    Ok(())
}

fn print_entry(entry: &DictionaryEntry) {
    match &entry.phonetic {
        Some(phonetic) => println!("{} {}", entry.word, phonetic),
        None => println!("{}", entry.word),
    }
    for meaning in &entry.meanings {
        println!("  {}", meaning.part_of_speech);
        for (index, definition) in meaning.definitions.iter().enumerate() {
            println!("    {}. {}", index + 1, definition.definition);
            if let Some(example) = &definition.example {
                println!("       \"{}\"", example);
            }
            if !definition.synonyms.is_empty() {
                println!("       synonyms: {}", definition.synonyms.join(", "));
            }
            if !definition.antonyms.is_empty() {
                println!("       antonyms: {}", definition.antonyms.join(", "));
            }
        }
    }
}
