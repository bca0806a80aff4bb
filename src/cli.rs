use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Facerig blendshape retargeting.
#[derive(Parser)]
#[command(
    name = "facerig",
    version,
    about = "Rule-based facial blendshape retargeting"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Retarget recorded frames through the solver and optional rig stage.
    Run(RunArgs),
    /// Classify blendshape names against the naming convention.
    Classify(ClassifyArgs),
    /// Summarise a compiled rule set.
    Inspect(InspectArgs),
}

/// Arguments for the `run` subcommand.
#[derive(clap::Args)]
pub struct RunArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "facerig.toml")]
    pub config: PathBuf,

    /// Override input frames JSON path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override output JSON path from config. Without either, writes to stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `classify` subcommand.
#[derive(clap::Args)]
pub struct ClassifyArgs {
    /// JSON file holding an array of blendshape names.
    #[arg(short, long)]
    pub names: PathBuf,

    /// Fail if any name is unclassified or unresolved.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `inspect` subcommand.
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "facerig.toml")]
    pub config: PathBuf,
}
