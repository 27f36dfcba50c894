//! Line assembly: physical source lines to logical lines.
//!
//! - `#` starts a comment unless escaped (`\#`) or inside `{{{ … }}}`
//! - a trailing unescaped `\` joins the next line
//! - `{{{ … }}}` may span lines; the newlines are kept in the logical line
//! - a function header whose parameter list is still open (`fp.f = (`) is
//!   joined with the following lines until its parentheses balance

use tracing::trace;

/// One logical line and the physical line it starts on (1-based).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogicalLine {
    pub number: usize,
    pub text: String,
}

/// Scan state carried across physical lines.
#[derive(Default)]
struct Assembler {
    lines: Vec<LogicalLine>,
    current: String,
    start: usize,
    in_raw: bool,
}

impl Assembler {
    /// Append one physical line. Returns `true` if the logical line
    /// continues on the next physical line.
    fn push(&mut self, number: usize, line: &str) -> bool {
        if self.current.is_empty() && !self.in_raw {
            self.start = number;
        }
        let mut rest = line;
        let mut out = String::with_capacity(line.len());
        while !rest.is_empty() {
            if self.in_raw {
                match rest.find("}}}") {
                    Some(end) => {
                        out.push_str(&rest[..end + 3]);
                        rest = &rest[end + 3..];
                        self.in_raw = false;
                    }
                    None => {
                        out.push_str(rest);
                        rest = "";
                    }
                }
                continue;
            }
            if let Some(after) = rest.strip_prefix("{{{") {
                out.push_str("{{{");
                rest = after;
                self.in_raw = true;
                continue;
            }
            let mut chars = rest.chars();
            let Some(c) = chars.next() else { break };
            match c {
                '#' => break,
                '\\' => {
                    out.push('\\');
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                _ => out.push(c),
            }
            rest = chars.as_str();
        }

        self.current.push_str(&out);
        if self.in_raw {
            self.current.push('\n');
            return true;
        }
        if ends_with_continuation(&self.current) {
            self.current.pop();
            return true;
        }
        false
    }

    fn finish_line(&mut self) {
        let text = std::mem::take(&mut self.current);
        if !text.trim().is_empty() {
            self.lines.push(LogicalLine {
                number: self.start,
                text,
            });
        }
    }
}

/// A trailing `\` that is not itself escaped.
fn ends_with_continuation(text: &str) -> bool {
    let trailing = text.chars().rev().take_while(|&c| c == '\\').count();
    trailing % 2 == 1
}

/// Whether `text` opens a function definition whose parameter list is not
/// closed yet.
fn is_open_function_header(text: &str) -> bool {
    let trimmed = text.trim_start();
    let is_header = trimmed.starts_with("function ")
        || (trimmed.starts_with("fp.") && trimmed.contains(" = ("));
    is_header && paren_balance(trimmed) > 0
}

fn paren_balance(text: &str) -> i64 {
    let mut balance = 0i64;
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '(' => balance += 1,
            ')' => balance -= 1,
            _ => {}
        }
    }
    balance
}

/// Split `source` into logical lines.
pub fn assemble_lines(source: &str) -> Vec<LogicalLine> {
    let mut assembler = Assembler::default();
    let mut physical = source
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .peekable();

    while let Some((number, line)) = physical.next() {
        let mut continues = assembler.push(number, line);
        while continues {
            let Some((number, line)) = physical.next() else {
                break;
            };
            let line = if assembler.in_raw { line } else { line.trim_start() };
            continues = assembler.push(number, line);
        }

        while is_open_function_header(&assembler.current) {
            let Some((number, line)) = physical.next() else {
                break;
            };
            trace!(line = number, "joining function header line");
            let mut continues = assembler.push(number, line.trim());
            while continues {
                let Some((number, line)) = physical.next() else {
                    break;
                };
                continues = assembler.push(number, line.trim_start());
            }
        }

        assembler.finish_line();
    }
    assembler.lines
}
