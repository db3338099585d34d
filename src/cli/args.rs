use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "minithumb")]
#[command(version, about = "Deterministic thumbnail generator", long_about = None)]
pub struct CliArgs {
    /// Input image files or directories
    #[arg(required = true)]
    pub input: Vec<PathBuf>,

    /// Size descriptor: 100s (square), 200w, 100h, 100w50h (box), full
    #[arg(short, long, value_name = "SPEC")]
    pub size: String,

    /// Output directory for thumbnails
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Sampling strategy
    #[arg(long, value_enum, default_value_t = ScaleFilter::Box)]
    pub filter: ScaleFilter,

    /// Appended to the output file stem
    #[arg(long, default_value = "_thumb")]
    pub suffix: String,

    /// Write a JSON manifest of generated thumbnails
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Sampling strategy
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum ScaleFilter {
    /// Exact-area box averaging (anti-aliased, deterministic)
    #[default]
    #[value(name = "box")]
    Box,
    /// Nearest neighbor (no averaging, best for pixel art)
    #[value(name = "nearest")]
    Nearest,
}
