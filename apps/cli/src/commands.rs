//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use handbookgen_core::pipeline::{
    GenerateConfig, GenerateResult, ProgressReporter, SummaryOutput, generate,
};
use handbookgen_markdown::extract_title;
use handbookgen_shared::{AppConfig, ConflictPolicy, init_config, load_config};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// handbookgen — turn a Markdown docs tree into a handbook with a summary.
#[derive(Parser)]
#[command(
    name = "handbookgen",
    version,
    about = "Assemble Markdown documentation into a navigable handbook.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

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
    /// Assemble the handbook and its summary from a docs tree.
    Generate {
        /// Directory of Markdown sources (defaults to config docs_dir).
        #[arg(long)]
        docs_dir: Option<PathBuf>,

        /// Destination handbook directory (defaults to config handbook_dir).
        #[arg(long)]
        handbook_dir: Option<PathBuf>,

        /// Replace the handbook directory if it already exists.
        #[arg(long)]
        overwrite: bool,

        /// Prefix prepended to every summary link path.
        #[arg(long)]
        summary_prefix: Option<String>,

        /// Write the summary to this file (default: <handbook>/.SUMMARY.md).
        #[arg(long, conflicts_with = "summary_stdout")]
        summary_file: Option<PathBuf>,

        /// Print the summary to stdout instead of a file.
        #[arg(long)]
        summary_stdout: bool,

        /// Fail when two documents resolve to the same module path.
        #[arg(long)]
        strict: bool,

        /// Custom handlebars template for the summary page.
        #[arg(long)]
        template: Option<PathBuf>,
    },

    /// Print the extracted title of a single Markdown file.
    Title {
        /// Markdown file to inspect.
        file: PathBuf,
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

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("handbookgen={level}")));

    match cli.log_format {
        LogFormat::Text => fmt().with_env_filter(filter).with_target(false).init(),
        LogFormat::Json => fmt().json().with_env_filter(filter).init(),
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Generate {
            docs_dir,
            handbook_dir,
            overwrite,
            summary_prefix,
            summary_file,
            summary_stdout,
            strict,
            template,
        } => cmd_generate(GenerateArgs {
            docs_dir,
            handbook_dir,
            overwrite,
            summary_prefix,
            summary_file,
            summary_stdout,
            strict,
            template,
        }),
        Command::Title { file } => cmd_title(&file),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

/// Parsed `generate` flags, pre-merge with config file values.
struct GenerateArgs {
    docs_dir: Option<PathBuf>,
    handbook_dir: Option<PathBuf>,
    overwrite: bool,
    summary_prefix: Option<String>,
    summary_file: Option<PathBuf>,
    summary_stdout: bool,
    strict: bool,
    template: Option<PathBuf>,
}

fn cmd_generate(args: GenerateArgs) -> Result<()> {
    let config = load_config()?;

    let docs_dir = args
        .docs_dir
        .unwrap_or_else(|| PathBuf::from(&config.defaults.docs_dir));
    let handbook_dir = args
        .handbook_dir
        .unwrap_or_else(|| PathBuf::from(&config.defaults.handbook_dir));
    let summary_prefix = args
        .summary_prefix
        .unwrap_or_else(|| config.defaults.summary_prefix.clone());

    let output = if args.summary_stdout {
        SummaryOutput::Stdout
    } else {
        let path = args
            .summary_file
            .unwrap_or_else(|| handbook_dir.join(".SUMMARY.md"));
        SummaryOutput::File(path)
    };

    let generate_config = GenerateConfig {
        docs_dir,
        handbook_dir,
        overwrite: args.overwrite,
        summary_prefix,
        reference_title: config.defaults.reference_title.clone(),
        output,
        on_conflict: if args.strict {
            ConflictPolicy::Error
        } else {
            ConflictPolicy::Overwrite
        },
        template: args.template,
    };

    info!(
        docs = %generate_config.docs_dir.display(),
        handbook = %generate_config.handbook_dir.display(),
        "generating handbook"
    );

    // Keep the terminal quiet when the summary itself goes to stdout.
    let result = if matches!(generate_config.output, SummaryOutput::Stdout) {
        generate(&generate_config, &handbookgen_core::pipeline::SilentProgress)?
    } else {
        let reporter = CliProgress::new();
        generate(&generate_config, &reporter)?
    };

    if let Some(path) = &result.summary_path {
        println!();
        println!("  Handbook generated!");
        println!("  Files:   {}", result.file_count);
        println!("  Summary: {}", path.display());
        println!("  Time:    {:.1}s", result.elapsed.as_secs_f64());
        println!();
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
            spinner.set_style(style);
        }
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn done(&self, _result: &GenerateResult) {
        self.spinner.finish_and_clear();
    }
}

// ---------------------------------------------------------------------------
// title / config
// ---------------------------------------------------------------------------

fn cmd_title(file: &PathBuf) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .map_err(|e| eyre!("cannot read '{}': {e}", file.display()))?;
    let title = extract_title(&text)?;
    println!("{title}");
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
