use std::path::PathBuf;

use clap::Parser;
use nnetpack_model::DEFAULT_SEED;

#[derive(Parser, Debug)]
#[command(
    name = "nnet2f32",
    version,
    about = "Write the reference network to a flat f32 file and verify it"
)]
pub struct Cli {
    /// Output model file (truncated if it exists)
    pub path: PathBuf,

    /// Log level (RUST_LOG)
    #[arg(long, default_value = "info")]
    pub log: String,

    /// Seed for the reference weights
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Use the small test network instead of the full-size one
    #[arg(long)]
    pub tiny: bool,

    /// Print the layout of the file and exit without writing it
    #[arg(long)]
    pub layout: bool,
}
