//! CLI argument definitions.

use super::validators::{parse_duration, parse_rate, parse_technique};
use crate::preprocess::Technique;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Time-stretch and pitch-shift augmentation for audio datasets.
#[derive(Debug, Parser)]
#[command(name = "augment")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Input files or directories to augment.
    pub inputs: Vec<PathBuf>,

    /// Augmentation options.
    #[command(flatten)]
    pub augment: AugmentArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for augmenting files.
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct AugmentArgs {
    /// Technique (none, time_stretch, pitch_shift, pitch_then_time, time_then_pitch).
    #[arg(short, long, value_parser = parse_technique, env = "AUGMENT_TECHNIQUE")]
    pub technique: Option<Technique>,

    /// Time-stretch rate (>1 speeds up, <1 slows down).
    #[arg(short, long, value_parser = parse_rate, env = "AUGMENT_RATE")]
    pub rate: Option<f64>,

    /// Pitch shift in semitones.
    #[arg(short = 'p', long, allow_hyphen_values = true, env = "AUGMENT_STEPS")]
    pub steps: Option<i32>,

    /// Target sample rate in Hz.
    #[arg(short = 's', long, value_parser = clap::value_parser!(u32).range(1..), env = "AUGMENT_SAMPLE_RATE")]
    pub sample_rate: Option<u32>,

    /// Clip duration in seconds.
    #[arg(short, long, value_parser = parse_duration, env = "AUGMENT_DURATION")]
    pub duration: Option<f64>,

    /// Skip peak normalization.
    #[arg(long)]
    pub no_normalize: bool,

    /// Output directory (default: same as input).
    #[arg(short, long, env = "AUGMENT_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Overwrite existing outputs.
    #[arg(long)]
    pub force: bool,

    /// Stop on first error.
    #[arg(long)]
    pub fail_fast: bool,

    /// Only log warnings and errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
