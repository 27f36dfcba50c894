//! Character-level helpers shared by the statement and expression parsers.
//!
//! A position is *top level* when it is outside `{{{ … }}}`, not the
//! target of a `\` escape, and not nested inside `(…)` or `[…]`.

/// Byte offsets of every top-level character in `text`.
///
/// Opening and closing brackets that enter or leave depth 0 are included.
pub(crate) fn top_level_chars(text: &str) -> Vec<(usize, char)> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut i = 0;
    while i < text.len() {
        let rest = &text[i..];
        if let Some(raw) = rest.strip_prefix("{{{") {
            i += match raw.find("}}}") {
                Some(end) => 3 + end + 3,
                None => rest.len(),
            };
            continue;
        }
        let mut chars = rest.chars();
        let Some(c) = chars.next() else { break };
        match c {
            '\\' => {
                i += 1 + chars.next().map_or(0, char::len_utf8);
                continue;
            }
            '(' | '[' => {
                if depth == 0 {
                    out.push((i, c));
                }
                depth += 1;
            }
            ')' | ']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    out.push((i, c));
                }
            }
            _ if depth == 0 => out.push((i, c)),
            _ => {}
        }
        i += c.len_utf8();
    }
    out
}

/// Offset of the bracket closing the one at `open`, counting only brackets
/// of the same kind.
pub(crate) fn find_matching(text: &str, open: usize) -> Option<usize> {
    let open_char = text[open..].chars().next()?;
    let close_char = match open_char {
        '(' => ')',
        '[' => ']',
        _ => return None,
    };
    let mut depth = 0usize;
    let mut i = open;
    while i < text.len() {
        let rest = &text[i..];
        if let Some(raw) = rest.strip_prefix("{{{") {
            i += 3 + raw.find("}}}")? + 3;
            continue;
        }
        let mut chars = rest.chars();
        let c = chars.next()?;
        if c == '\\' {
            i += 1 + chars.next().map_or(0, char::len_utf8);
            continue;
        }
        if c == open_char {
            depth += 1;
        } else if c == close_char {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
        i += c.len_utf8();
    }
    None
}

/// Split at top-level commas. Each part keeps its surrounding whitespace.
pub(crate) fn split_top_level_commas(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for (i, c) in top_level_chars(text) {
        if c == ',' {
            parts.push(&text[start..i]);
            start = i + 1;
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Whitespace-delimited words at top level, as byte ranges.
///
/// Whitespace inside brackets or raw text does not split a word.
pub(crate) fn top_level_words(text: &str) -> Vec<(usize, usize)> {
    let breaks: Vec<usize> = top_level_chars(text)
        .into_iter()
        .filter(|&(_, c)| c.is_whitespace())
        .map(|(i, _)| i)
        .collect();
    let mut words = Vec::new();
    let mut start = None;
    for (i, _) in text.char_indices() {
        if breaks.binary_search(&i).is_ok() {
            if let Some(s) = start.take() {
                words.push((s, i));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        words.push((s, text.len()));
    }
    words
}

pub(crate) fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Length in bytes of the identifier run at the start of `text`.
pub(crate) fn identifier_len(text: &str) -> usize {
    text.find(|c: char| !is_identifier_char(c)).unwrap_or(text.len())
}

/// `$name`, `&name`, `fp.name`, or a dereference `$*name`/`$**name`.
pub(crate) fn is_variable_name(text: &str) -> bool {
    let rest = if let Some(rest) = text.strip_prefix('$') {
        rest.trim_start_matches('*')
    } else if let Some(rest) = text.strip_prefix('&') {
        rest
    } else if let Some(rest) = text.strip_prefix("fp.") {
        rest
    } else {
        return false;
    };
    !rest.is_empty() && rest.chars().all(is_identifier_char)
}
