//! `lang run` option parsing.

use std::path::PathBuf;
use std::time::Duration;

use crate::CliError;

/// Options of `lang run`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub path: PathBuf,
    /// Everything after the script path, bound to `&LANG_ARGS`.
    pub arguments: Vec<String>,
    /// Raise the stop flag after this long.
    pub timeout: Option<Duration>,
    pub max_depth: Option<usize>,
}

/// Parse `[options] <file.lang> [args...]`. Options must come before the
/// script path; the rest of the line belongs to the script.
pub fn parse_run_options(args: &[String]) -> Result<RunOptions, CliError> {
    let mut options = RunOptions::default();
    let mut rest = args.iter();
    let mut path = None;

    for arg in rest.by_ref() {
        if let Some(value) = arg.strip_prefix("--timeout=") {
            let millis = value.parse::<u64>().map_err(|_| CliError::InvalidOption {
                option: "--timeout",
                value: value.to_string(),
            })?;
            options.timeout = Some(Duration::from_millis(millis));
        } else if let Some(value) = arg.strip_prefix("--max-depth=") {
            let depth = value
                .parse::<usize>()
                .ok()
                .filter(|&depth| depth > 0)
                .ok_or_else(|| CliError::InvalidOption {
                    option: "--max-depth",
                    value: value.to_string(),
                })?;
            options.max_depth = Some(depth);
        } else if arg.starts_with("--") {
            return Err(CliError::UnknownOption(arg.clone()));
        } else {
            path = Some(PathBuf::from(arg));
            break;
        }
    }

    options.path = path.ok_or(CliError::MissingPath)?;
    options.arguments = rest.cloned().collect();
    Ok(options)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn options_before_path() {
        let options =
            parse_run_options(&args(&["--timeout=250", "--max-depth=64", "main.lang", "a", "--b"]))
                .unwrap();
        assert_eq!(
            options,
            RunOptions {
                path: PathBuf::from("main.lang"),
                arguments: args(&["a", "--b"]),
                timeout: Some(Duration::from_millis(250)),
                max_depth: Some(64),
            }
        );
    }

    #[test]
    fn missing_path() {
        assert!(matches!(
            parse_run_options(&args(&["--timeout=5"])),
            Err(CliError::MissingPath)
        ));
    }

    #[test]
    fn invalid_values() {
        assert!(matches!(
            parse_run_options(&args(&["--timeout=soon", "x.lang"])),
            Err(CliError::InvalidOption { option: "--timeout", .. })
        ));
        assert!(matches!(
            parse_run_options(&args(&["--max-depth=0", "x.lang"])),
            Err(CliError::InvalidOption { option: "--max-depth", .. })
        ));
        assert!(matches!(
            parse_run_options(&args(&["--verbose", "x.lang"])),
            Err(CliError::UnknownOption(_))
        ));
    }
}
