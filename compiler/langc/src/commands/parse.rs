//! The `parse` command: show the AST of a script.

use std::fmt::Write;
use std::path::Path;

use lang_ir::Node;

use super::read_file;
use crate::CliError;

/// Render the top-level statements of a script as indented trees,
/// followed by a summary line.
pub fn parse_file(path: &Path) -> Result<String, CliError> {
    let source = read_file(path)?;
    let nodes = lang_parse::parse(&source);

    let mut out = String::new();
    for node in &nodes {
        // Writing to a String cannot fail.
        let _ = write!(out, "{node}");
    }
    let errors = nodes
        .iter()
        .filter(|node| matches!(node, Node::ParsingError(_)))
        .count();
    let _ = writeln!(out, "{} statement(s), {errors} parse error(s)", nodes.len());
    Ok(out)
}
