//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for council results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every provider response plus the consensus
    Full,
    /// Best response and consensus line only
    Summary,
    /// JSON output
    Json,
}

impl From<OutputFormat> for council_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => council_domain::OutputFormat::Full,
            OutputFormat::Summary => council_domain::OutputFormat::Summary,
            OutputFormat::Json => council_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for ai-council
#[derive(Parser, Debug)]
#[command(name = "ai-council")]
#[command(author, version, about = "AI Council - Ask several AI providers and aggregate a consensus")]
#[command(long_about = r#"
AI Council sends one request to every enabled provider at the same time,
waits for all of them and reports the best answer together with the mean
confidence and an agreement label (low / medium / high).

Providers are simulated; their models, confidences, latency and failures
come from configuration.

Configuration files are loaded from (in priority order):
1. COUNCIL_* environment variables
2. --config <path>     Explicit config file
3. ./council.toml      Project-level config
4. ~/.config/ai-council/config.toml   Global config

Example:
  ai-council generate "binary search in rust"
  ai-council analyze --file src/main.rs -o full
  ai-council --disable grok ask "What is ownership?"
  ai-council chat
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Disable a provider for this run (can be specified multiple times)
    #[arg(long, value_name = "PROVIDER", global = true)]
    pub disable: Vec<String>,

    /// Per-provider timeout in milliseconds (must be positive)
    #[arg(
        long,
        value_name = "MS",
        global = true,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_ms: Option<u64>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Ask the council to generate code
    Generate {
        /// What to generate
        #[arg(required = true)]
        prompt: Vec<String>,
    },

    /// Ask the council to review code
    Analyze {
        /// Code to analyze
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        code: Vec<String>,

        /// Read the code from a file
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },

    /// Ask the council a question
    Ask {
        #[arg(required = true)]
        question: Vec<String>,
    },

    /// Show providers and recent operations
    Status,

    /// Start the interactive chat (default)
    Chat,
}
