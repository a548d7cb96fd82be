//! audio-augment - time-stretch and pitch-shift augmentation for audio datasets.
//!
//! The core type is [`AudioPreprocessor`], which loads audio clips at a fixed
//! sample rate and length, applies one of the [`Technique`] recipes and
//! peak-normalizes the result. Signal processing is delegated to a
//! [`DspBackend`]; [`StandardBackend`] is used unless another is injected.
//!
//! ```no_run
//! use audio_augment::{AudioPreprocessor, Technique};
//! use std::path::Path;
//!
//! let pre = AudioPreprocessor::new(44_100)?;
//! let clip = pre.load_audio(Path::new("dog_bark.wav"), 2.0)?;
//! let shifted = pre.apply_preprocessing(clip, Technique::PitchThenTime, 1.1, 2)?;
//! let normalized = pre.normalize_audio(shifted);
//! # Ok::<(), audio_augment::Error>(())
//! ```

#![warn(missing_docs)]

pub mod audio;
pub mod cli;
pub mod config;
pub mod constants;
pub mod dsp;
pub mod error;
pub mod pipeline;
pub mod preprocess;

use clap::Parser;
use cli::{AugmentArgs, Cli, Command};
use config::{Config, config_file_path, load_default_config, save_default_config};
use pipeline::{
    ProcessCheck, ProcessOptions, collect_input_files, output_dir_for, process_file,
    should_process,
};
use std::path::PathBuf;
use tracing::{error, info, warn};

pub use dsp::{DspBackend, StandardBackend};
pub use error::{Error, Result};
pub use preprocess::{AudioPreprocessor, AugmentParams, Technique, normalize_audio};

/// Main entry point for the `augment` CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.augment.verbose, cli.augment.quiet);

    if let Some(command) = cli.command {
        return handle_command(command);
    }

    if cli.inputs.is_empty() {
        return Err(Error::NoValidAudioFiles);
    }

    let config = load_default_config()?;
    augment_files(&cli.inputs, &cli.augment, &config)
}

/// Augment input files with the given options.
fn augment_files(inputs: &[PathBuf], args: &AugmentArgs, config: &Config) -> Result<()> {
    use std::time::Instant;

    let total_start = Instant::now();

    let files = collect_input_files(inputs)?;
    if files.is_empty() {
        return Err(Error::NoValidAudioFiles);
    }

    info!("Found {} audio file(s) to process", files.len());

    // CLI flags override config defaults
    let defaults = &config.defaults;
    let sample_rate = args.sample_rate.unwrap_or(defaults.sample_rate);
    let base = defaults.augment_params();
    let options = ProcessOptions {
        duration: args.duration.unwrap_or(defaults.duration),
        params: AugmentParams {
            technique: args.technique.unwrap_or(base.technique),
            time_stretch_rate: args.rate.unwrap_or(base.time_stretch_rate),
            pitch_shift_steps: args.steps.unwrap_or(base.pitch_shift_steps),
        },
        normalize: defaults.normalize && !args.no_normalize,
    };

    info!(
        "Technique {} (rate {}, steps {}), {} Hz, {:.2}s clips{}",
        options.params.technique,
        options.params.time_stretch_rate,
        options.params.pitch_shift_steps,
        sample_rate,
        options.duration,
        if options.normalize { ", normalized" } else { "" }
    );

    let preprocessor = AudioPreprocessor::new(sample_rate)?;

    let mut processed = 0;
    let mut skipped = 0;
    let mut errors = 0;

    for file in &files {
        let file_output_dir = output_dir_for(file, args.output_dir.as_deref());

        if should_process(file, &file_output_dir, options.params.technique, args.force)
            == ProcessCheck::SkipExists
        {
            info!("Skipping (output exists): {}", file.display());
            skipped += 1;
            continue;
        }

        match process_file(file, &file_output_dir, &preprocessor, &options) {
            Ok(_) => processed += 1,
            Err(e) => {
                error!("Failed to process {}: {}", file.display(), e);
                errors += 1;
                if args.fail_fast {
                    return Err(e);
                }
            }
        }
    }

    info!(
        "Complete: {} processed, {} skipped, {} errors in {:.2}s",
        processed,
        skipped,
        errors,
        total_start.elapsed().as_secs_f64()
    );

    if errors > 0 {
        warn!("{} file(s) had errors", errors);
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

#[allow(clippy::print_stdout)]
fn handle_command(command: Command) -> Result<()> {
    use cli::ConfigAction;

    let Command::Config { action } = command;
    match action {
        ConfigAction::Init => {
            let path = config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let saved_path = save_default_config(&Config::default())?;
                println!("Created configuration file: {}", saved_path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_default_config()?;
            println!("{config:#?}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}
