//! Lang command line host.
//!
//! `lang run <file.lang> [options] [args...]` runs a script with the
//! filesystem source loader and stdout printing; `lang parse` dumps the AST.

pub mod commands;
mod error;
mod options;

pub use error::CliError;
pub use options::{parse_run_options, RunOptions};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=lang_eval=debug` or
/// `RUST_LOG=lang_parse=trace`; spans render as an indented tree on stderr.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}
