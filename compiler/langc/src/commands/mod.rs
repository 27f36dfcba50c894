//! `lang` subcommands.

mod parse;
mod run;

pub use parse::parse_file;
pub use run::{exit_code, run_file};

use std::path::Path;

use crate::CliError;

/// Read a script, classifying the failure for the user.
pub fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|error| CliError::from_io(path.to_path_buf(), error))
}
