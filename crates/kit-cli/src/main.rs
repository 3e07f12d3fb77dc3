mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "kit",
    about = "Spec-driven development scaffolding: SPEC → PLAN → TASKS → implement → reflect",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .kit.yaml or .git/)
    #[arg(long, global = true, env = "KIT_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Enable debug logging
    #[arg(long, global = true, short = 'v')]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize kit in the current project
    Init,

    /// Create a feature (if needed) and its SPEC.md
    Spec {
        /// Feature slug, name, or directory (e.g. "user-auth" or "0001-user-auth")
        feature: String,
        /// Skip git branch creation
        #[arg(long)]
        no_branch: bool,
    },

    /// Create a feature with SPEC.md, PLAN.md, TASKS.md and ANALYSIS.md in one step
    Scaffold {
        feature: String,
        /// Create and switch to the feature's git branch
        #[arg(long)]
        create_branch: bool,
    },

    /// Create PLAN.md for a feature
    Plan {
        feature: String,
        /// Create even if SPEC.md is missing
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Create TASKS.md for a feature
    Tasks {
        feature: String,
        /// Create even if PLAN.md is missing
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Create the optional ANALYSIS.md scratchpad for a feature
    Analyze { feature: String },

    /// List features with their inferred phase
    List,

    /// Show status of the active feature (or the one named)
    Status { feature: Option<String> },

    /// Validate feature documents
    Check {
        feature: Option<String>,
        /// Check every feature
        #[arg(long)]
        all: bool,
    },

    /// Mark a feature complete by appending the completion marker to TASKS.md
    Complete {
        feature: String,
        /// Mark complete even if tasks are unchecked
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Regenerate docs/PROJECT_PROGRESS_SUMMARY.md
    Rollup,
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

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root, cli.json),
        Commands::Spec { feature, no_branch } => {
            cmd::spec::run(&root, &feature, no_branch, cli.json)
        }
        Commands::Scaffold { feature, create_branch } => {
            cmd::scaffold::run(&root, &feature, create_branch, cli.json)
        }
        Commands::Plan { feature, force } => cmd::document::plan(&root, &feature, force, cli.json),
        Commands::Tasks { feature, force } => {
            cmd::document::tasks(&root, &feature, force, cli.json)
        }
        Commands::Analyze { feature } => cmd::document::analyze(&root, &feature, cli.json),
        Commands::List => cmd::list::run(&root, cli.json),
        Commands::Status { feature } => cmd::status::run(&root, feature.as_deref(), cli.json),
        Commands::Check { feature, all } => {
            cmd::check::run(&root, feature.as_deref(), all, cli.json)
        }
        Commands::Complete { feature, force } => {
            cmd::complete::run(&root, &feature, force, cli.json)
        }
        Commands::Rollup => cmd::rollup::run(&root, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
