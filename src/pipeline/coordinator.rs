//! Input discovery and output naming.

use crate::constants::{AUDIO_EXTENSIONS, OUTPUT_EXTENSION};
use crate::error::Result;
use crate::preprocess::Technique;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Result of checking whether a file should be processed.
#[derive(Debug, PartialEq, Eq)]
pub enum ProcessCheck {
    /// File should be processed.
    Process,
    /// Skip - output already exists.
    SkipExists,
}

/// Determine the output directory for a file.
pub fn output_dir_for(input: &Path, explicit_output_dir: Option<&Path>) -> PathBuf {
    explicit_output_dir.map_or_else(
        || {
            input
                .parent()
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
        },
        Path::to_path_buf,
    )
}

/// Get the augmented output path: `<output_dir>/<stem>.<technique>.wav`.
pub fn output_path_for(input: &Path, output_dir: &Path, technique: Technique) -> PathBuf {
    // Use to_string_lossy() to handle non-UTF-8 filenames gracefully
    let stem = input.file_stem().map_or_else(
        || std::borrow::Cow::Borrowed("output"),
        |s| s.to_string_lossy(),
    );

    output_dir.join(format!("{stem}.{technique}.{OUTPUT_EXTENSION}"))
}

/// Check if a file should be processed.
pub fn should_process(
    input: &Path,
    output_dir: &Path,
    technique: Technique,
    force: bool,
) -> ProcessCheck {
    if !force && output_path_for(input, output_dir, technique).exists() {
        return ProcessCheck::SkipExists;
    }
    ProcessCheck::Process
}

/// Collect input files from paths (files and directories).
///
/// Directories are scanned recursively; previously augmented outputs found
/// there are ignored. Explicitly named files are always kept if they have an
/// audio extension.
pub fn collect_input_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            if is_audio_file(path) {
                files.push(path.clone());
            } else {
                warn!("Skipping non-audio file: {}", path.display());
            }
        } else if path.is_dir() {
            collect_audio_files_recursive(path, &mut files)?;
        } else {
            warn!("Skipping non-existent path: {}", path.display());
        }
    }

    files.sort();
    Ok(files)
}

/// Recursively collect audio files from a directory.
fn collect_audio_files_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();

        if path.is_dir() {
            collect_audio_files_recursive(&path, files)?;
        } else if is_audio_file(&path) && !is_augmented_output(&path) {
            files.push(path);
        }
    }

    Ok(())
}

/// Check if a file is a supported audio format.
fn is_audio_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| {
        // Compare extension directly as OsStr to handle non-UTF-8 filenames
        AUDIO_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(OsStr::new(known)))
    })
}

/// Check if a file looks like an output of [`output_path_for`].
fn is_augmented_output(path: &Path) -> bool {
    let is_output_ext = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(OsStr::new(OUTPUT_EXTENSION)));

    is_output_ext
        && path
            .file_stem()
            .map(Path::new)
            .and_then(Path::extension)
            .and_then(OsStr::to_str)
            .is_some_and(|suffix| {
                Technique::ALL
                    .iter()
                    .any(|technique| technique.as_str() == suffix)
            })
}
