use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use typoscope::cli::output::{self, OutputFormat};
use typoscope::config::Overrides;
use typoscope::{dict, discover, Config, Dictionary, DictionaryStore, TypoEngine};

#[derive(Parser, Debug)]
#[command(name = "typoscope")]
#[command(version, about = "Find typos in code comments and text files", long_about = None)]
struct Cli {
    /// File or directory to scan
    #[arg(value_name = "TARGET")]
    target: Option<PathBuf>,

    /// Comment marker to look for (empty string scans the whole file)
    #[arg(short, long, allow_hyphen_values = true)]
    marker: Option<String>,

    /// File extension to look for when TARGET is a directory
    #[arg(short, long)]
    ext: Option<String>,

    /// Scan directories recursively
    #[arg(short, long)]
    recursive: bool,

    /// Generate suggestions for every typo
    #[arg(short, long)]
    suggest: bool,

    /// Fix typos in place with the most likely replacement
    #[arg(short, long)]
    fix: bool,

    /// Language/dictionary to use (e.g., en_US, de, fr)
    #[arg(short, long)]
    language: Option<String>,

    /// Word to exclude from checking (repeatable)
    #[arg(long, value_name = "WORD")]
    exclude_word: Vec<String>,

    /// File to exclude from checking (repeatable)
    #[arg(long, value_name = "FILE")]
    exclude_file: Vec<PathBuf>,

    /// Text file with words to exclude, one per line
    #[arg(long, value_name = "FILE")]
    exclude_word_file: Option<PathBuf>,

    /// Pattern to ignore (regex)
    #[arg(long)]
    ignore_pattern: Vec<String>,

    /// Directory holding installed dictionaries
    #[arg(long, env = "TYPOSCOPE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Directory holding personal word lists
    #[arg(long, env = "TYPOSCOPE_PERSONAL_DIR")]
    personal_dir: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Exit with code 0 even if typos are found
    #[arg(long)]
    no_fail: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Dictionary management
    Dict {
        #[command(subcommand)]
        action: DictCommands,
    },
}

#[derive(Subcommand, Debug)]
enum DictCommands {
    /// List installed dictionaries
    List,
    /// Install a dictionary from a word list file
    Build {
        /// Language code (e.g., en_US, en_GB, fr)
        language: String,
        /// Plain text word list, one word per line
        wordlist: PathBuf,
    },
    /// Show dictionary info
    Info {
        /// Language code
        language: String,
    },
    /// Add words to the personal dictionary
    Add {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Remove words from the dictionary
    Remove {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Register a preferred replacement for a misspelling
    Replace { old: String, new: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // Handle shell completion generation
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "typoscope", &mut io::stdout());
        return Ok(());
    }

    let config = Config::load(Overrides {
        language: cli.language.clone(),
        marker: cli.marker.clone(),
        extension: cli.ext.clone(),
        recursive: cli.recursive,
        suggestions: cli.suggest,
        exclude_words: cli.exclude_word.clone(),
        exclude_files: cli.exclude_file.clone(),
        exclude_word_file: cli.exclude_word_file.clone(),
        ignore_patterns: cli.ignore_pattern.clone(),
        data_dir: cli.data_dir.clone(),
        personal_dir: cli.personal_dir.clone(),
    })
    .context("Failed to load configuration")?;

    // Handle subcommands
    if let Some(command) = cli.command {
        return handle_command(command, &config);
    }

    let Some(target) = cli.target else {
        anyhow::bail!("No target specified. Use --help for usage information.");
    };

    let colored = !cli.no_color;
    let marker = config.resolve_marker()?;
    let mut engine = TypoEngine::from_config(&config)
        .with_context(|| format!("Failed to open the '{}' dictionary", config.language))?;

    let files = discover::find_files(&target, &config.extension, config.recursive)?;
    let suggestions = config.suggestions || cli.fix;
    let report = engine.find_typos(&files, &marker, suggestions)?;

    output::print_report(report, colored, cli.format)?;
    if cli.format == OutputFormat::Text {
        output::print_check_summary(report, colored);
    }
    let found = !report.record.is_empty();

    if cli.fix {
        let applied = engine.fix_typos()?;
        output::print_fix_summary(&applied, colored);
        return Ok(());
    }

    // Exit with appropriate code
    if found && !cli.no_fail {
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn handle_command(command: Commands, config: &Config) -> Result<()> {
    let store = DictionaryStore::from_config(config)?;

    match command {
        Commands::Dict { action } => match action {
            DictCommands::List => {
                dict::manager::list_dictionaries(&store)?;
            }
            DictCommands::Build { language, wordlist } => {
                dict::manager::build_dictionary(&store, &language, &wordlist)?;
            }
            DictCommands::Info { language } => {
                dict::manager::show_info(&store, &language)?;
            }
            DictCommands::Add { words } => {
                let mut dictionary = store.open(&config.language)?;
                dictionary.add(&words)?;
                println!("Added {} words to {}", words.len(), config.language);
            }
            DictCommands::Remove { words } => {
                let mut dictionary = store.open(&config.language)?;
                dictionary.remove(&words)?;
                println!("Removed {} words from {}", words.len(), config.language);
            }
            DictCommands::Replace { old, new } => {
                let mut dictionary = store.open(&config.language)?;
                dictionary.replace(&old, &new)?;
                println!("Stored {} → {} for {}", old, new, config.language);
            }
        },
    }
    Ok(())
}
