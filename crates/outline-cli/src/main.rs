mod cmd;
mod input;
mod locate;
mod output;

use clap::{Parser, Subcommand};
use cmd::{config::ConfigSubcommand, normalize::NormalizeArgs};
use outline_core::LevelPolicy;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "outline",
    about = "Normalize AI-generated article outlines into a consistent heading tree",
    version,
    propagate_version = true
)]
struct Cli {
    /// Config file (default: ./.outline.yaml when present)
    #[arg(long, global = true, env = "OUTLINE_CONFIG")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Log repairs and decisions to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a raw outline object (prints `null` for non-object input)
    Normalize(NormalizeArgs),

    /// Rebuild a raw sections array into a heading forest
    Sections {
        /// Input file (default: stdin)
        file: Option<PathBuf>,
        /// Level of root sections (1-6)
        #[arg(long)]
        top_level: Option<i64>,
        /// Level correction policy: clamp or preserve
        #[arg(long)]
        policy: Option<LevelPolicy>,
    },

    /// Check a normalized outline for structural violations
    Check {
        /// Input file (default: stdin)
        file: Option<PathBuf>,
    },

    /// Normalize and print an outline as an indented heading table
    Tree {
        /// Input file (default: stdin)
        file: Option<PathBuf>,
        /// Level correction policy: clamp or preserve
        #[arg(long)]
        policy: Option<LevelPolicy>,
    },

    /// Show, validate, or create the normalizer config
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();

    let result = match cli.command {
        Commands::Normalize(args) => cmd::normalize::run(config, args),
        Commands::Sections {
            file,
            top_level,
            policy,
        } => cmd::sections::run(config, file.as_deref(), top_level, policy),
        Commands::Check { file } => cmd::check::run(file.as_deref(), cli.json),
        Commands::Tree { file, policy } => cmd::tree::run(config, file.as_deref(), policy, cli.json),
        Commands::Config { subcommand } => cmd::config::run(config, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
