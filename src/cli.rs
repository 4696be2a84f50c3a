use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "kira-qpcr",
    version,
    about = "Relative qPCR quantification (delta-Cq / delta-delta-Cq)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    Run(RunArgs),
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[arg(long, help = "Cq table (.tsv/.csv, optionally .gz) with sample, target, cq columns")]
    pub input: PathBuf,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(
        long = "control",
        required = true,
        num_args = 1..,
        help = "Internal control target (repeatable)"
    )]
    pub controls: Vec<String>,

    #[arg(long, help = "Calibrator sample; without it the run stops at delta-Cq")]
    pub calibrator: Option<String>,

    #[arg(long, default_value_t = false, help = "Drop NaN replicates instead of propagating them")]
    pub skip_nan: bool,

    #[arg(long, default_value_t = 0, help = "Number of threads (0 = auto)")]
    pub threads: usize,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long, default_value_t = false)]
    pub no_tsv: bool,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[arg(long, help = "Cq table (.tsv/.csv, optionally .gz)")]
    pub input: PathBuf,

    #[arg(long = "control", required = true, num_args = 1..)]
    pub controls: Vec<String>,

    #[arg(long)]
    pub calibrator: Option<String>,
}
