//! Template scanner.
//!
//! A small hand-written state machine over the template bytes. Handles:
//! - Literal text segments
//! - Piped placeholders: `{path..stage()..ns.stage(a,b)}`
//! - Simple placeholders: `{anything but a closing brace}`
//! - Escaping: a `{` directly after `\` never opens a simple placeholder;
//!   the piped form is still recognized there and the backslash stays literal
//!
//! All structural characters are ASCII, so byte offsets found here are always
//! valid char boundaries for slicing.

use super::ast::{Placeholder, Segment, Stage, Template};

const OPEN: u8 = b'{';
const CLOSE: u8 = b'}';
const ESCAPE: u8 = b'\\';
const STAGE_DELIMITER: &str = "..";

/// Parse a template string into segments.
///
/// Never fails: anything that is not a placeholder is literal text.
pub fn parse_template(input: &str) -> Template {
    let bytes = input.as_bytes();
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut pos = 0;
    // First `}` after the last search position; reused until passed.
    let mut next_close: Option<usize> = None;

    while pos < bytes.len() {
        if bytes[pos] == OPEN {
            let close = match next_close {
                Some(close) if close > pos => close,
                _ => match input[pos + 1..].find(char::from(CLOSE)) {
                    Some(offset) => pos + 1 + offset,
                    // No `}` left: nothing from here on can be a placeholder.
                    None => break,
                },
            };
            next_close = Some(close);
            if let Some(placeholder) = placeholder_at(input, pos, close, is_escaped(bytes, pos)) {
                if literal_start < pos {
                    segments.push(Segment::Literal(input[literal_start..pos].to_string()));
                }
                segments.push(Segment::Placeholder(placeholder));
                pos = close + 1;
                literal_start = pos;
                continue;
            }
        }
        pos += 1;
    }

    if literal_start < bytes.len() {
        segments.push(Segment::Literal(input[literal_start..].to_string()));
    }

    Template {
        segments: merge_literals(segments),
    }
}

/// Merge adjacent Literal segments into single segments.
fn merge_literals(segments: Vec<Segment>) -> Vec<Segment> {
    let mut result = Vec::with_capacity(segments.len());

    for segment in segments {
        match segment {
            Segment::Literal(text) => {
                if let Some(Segment::Literal(prev)) = result.last_mut() {
                    prev.push_str(&text);
                } else {
                    result.push(Segment::Literal(text));
                }
            }
            other @ Segment::Placeholder(_) => result.push(other),
        }
    }

    result
}

/// A brace preceded by a backslash is escaped.
fn is_escaped(bytes: &[u8], pos: usize) -> bool {
    pos > 0 && bytes[pos - 1] == ESCAPE
}

/// Try to read a placeholder spanning `open..=close`.
///
/// Both forms end at the first `}` after the opening brace. An `escaped`
/// brace only admits the piped form.
fn placeholder_at(input: &str, open: usize, close: usize, escaped: bool) -> Option<Placeholder> {
    let content = &input[open + 1..close];
    if content.is_empty() {
        return None;
    }

    let source = input[open..=close].to_string();
    match piped_form(content) {
        Some((path, pipeline)) => Some(Placeholder {
            source,
            path,
            pipeline,
        }),
        None if escaped => None,
        None => Some(Placeholder {
            source,
            path: content.split('.').map(str::to_string).collect(),
            pipeline: Vec::new(),
        }),
    }
}

/// Match `path(..stage)+` against the full placeholder content.
///
/// The path is one or more word runs joined by single dots. The chain starts
/// at the first `..` and may only contain word characters and `.(),#-`.
fn piped_form(content: &str) -> Option<(Vec<String>, Vec<Stage>)> {
    let bytes = content.as_bytes();
    let mut path = Vec::new();
    let mut pos = 0;

    loop {
        let start = pos;
        while pos < bytes.len() && is_word(bytes[pos]) {
            pos += 1;
        }
        if pos == start {
            return None;
        }
        path.push(content[start..pos].to_string());

        if content[pos..].starts_with(STAGE_DELIMITER) {
            break;
        }
        if pos + 1 < bytes.len() && bytes[pos] == b'.' && is_word(bytes[pos + 1]) {
            pos += 1;
            continue;
        }
        return None;
    }

    let chain = &content[pos..];
    if chain.len() <= STAGE_DELIMITER.len() || !chain.bytes().all(is_chain_char) {
        return None;
    }

    let pipeline = chain
        .split(STAGE_DELIMITER)
        .filter(|raw| !raw.is_empty())
        .map(parse_stage)
        .collect();
    Some((path, pipeline))
}

/// Parse one raw stage such as `currency(EUR)` or `Math.round`.
///
/// The name is everything before the first `(`. The argument text runs to a
/// trailing `)`; empty parentheses mean no arguments. Arguments are split on
/// `,` and trimmed, never coerced.
pub fn parse_stage(raw: &str) -> Stage {
    let Some((name, rest)) = raw.split_once('(') else {
        return Stage {
            name: raw.to_string(),
            args: Vec::new(),
        };
    };

    let arg_text = rest.strip_suffix(')').unwrap_or(rest);
    let args = if arg_text.trim().is_empty() {
        Vec::new()
    } else {
        arg_text.split(',').map(|arg| arg.trim().to_string()).collect()
    };

    Stage {
        name: name.to_string(),
        args,
    }
}

/// ASCII word character (`[A-Za-z0-9_]`).
fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Characters allowed in a pipeline chain.
fn is_chain_char(b: u8) -> bool {
    is_word(b) || matches!(b, b'.' | b'(' | b')' | b',' | b'#' | b'-')
}
