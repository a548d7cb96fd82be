//! CLI argument parsing.

mod args;
mod validators;

pub use args::{AugmentArgs, Cli, Command, ConfigAction};
