//! Reader for the restricted object-literal dialect used by `devices.js`.
//!
//! The source is a JavaScript file of the shape
//! `var devices = [ {manufacturer: "Acme", model: 'X1', gyro: True,}, ... ];`.
//! Two steps turn it into strict JSON text:
//!
//! 1. [`extract_array`] locates the first `var <ident> = [` and scans to the
//!    matching `]`, skipping brackets inside string literals.
//! 2. [`to_strict_json`] walks the array token by token: bare keys get double
//!    quotes, single-quoted strings become JSON strings, `True`/`False` are
//!    lowercased and trailing commas before `}`/`]` are dropped. String
//!    contents are copied untouched, and whitespace is kept so line numbers
//!    survive into JSON parse errors.

use std::fmt;

/// Why no array could be extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// No `var <ident> = [` in the text.
    NoDeclaration,
    /// The array opened at this byte offset is never closed.
    Unterminated { open_at: usize },
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::NoDeclaration => write!(f, "no array assignment found"),
            ExtractError::Unterminated { open_at } => {
                write!(f, "array opened at byte {open_at} is never closed")
            }
        }
    }
}

/// A token-level problem in the array text, at a byte offset of that text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralError {
    pub message: String,
    pub offset: usize,
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Word characters of an unquoted token: identifiers and number literals.
fn is_word_char(c: char) -> bool {
    is_ident_char(c) || matches!(c, '.' | '+' | '-')
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Find the array assigned by the first `var <ident> = [...]` declaration.
///
/// Returns the byte offset of the opening `[` and the array text including
/// both brackets.
pub fn extract_array(text: &str) -> Result<(usize, &str), ExtractError> {
    let mut search_from = 0;
    while let Some(found) = text[search_from..].find("var") {
        let at = search_from + found;
        search_from = at + 3;

        let preceded_ok = text[..at]
            .chars()
            .next_back()
            .map_or(true, |c| !is_ident_char(c));
        if !preceded_ok {
            continue;
        }
        let Some(open) = declaration_array_start(text, at + 3) else {
            continue;
        };
        let close = matching_bracket(text, open)
            .ok_or(ExtractError::Unterminated { open_at: open })?;
        return Ok((open, &text[open..=close]));
    }
    Err(ExtractError::NoDeclaration)
}

/// After the `var` keyword, expect `<ws>+ ident <ws>* = <ws>* [`.
fn declaration_array_start(text: &str, after_var: usize) -> Option<usize> {
    let rest = &text[after_var..];
    let trimmed = rest.trim_start();
    if trimmed.len() == rest.len() {
        // `var` must be followed by whitespace.
        return None;
    }
    let ident_len = trimmed
        .char_indices()
        .find(|&(_, c)| !is_ident_char(c))
        .map_or(trimmed.len(), |(i, _)| i);
    if ident_len == 0 {
        return None;
    }
    let after_ident = trimmed[ident_len..].trim_start();
    let after_eq = after_ident.strip_prefix('=')?.trim_start();
    if !after_eq.starts_with('[') {
        return None;
    }
    Some(text.len() - after_eq.len())
}

/// Byte offset of the `]` matching the `[` at `open`.
fn matching_bracket(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in text[open..].char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Repair
// ---------------------------------------------------------------------------

/// Rewrite the object-literal array into strict JSON text.
pub fn to_strict_json(src: &str) -> Result<String, LiteralError> {
    let mut out = String::with_capacity(src.len() + src.len() / 4);
    let mut chars = src.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '"' | '\'' => {
                let end = copy_string(src, i, c, &mut out)?;
                while chars.peek().is_some_and(|&(j, _)| j <= end) {
                    chars.next();
                }
            }
            ',' => {
                if !closer_follows(&src[i + 1..]) {
                    out.push(',');
                }
            }
            '{' | '}' | '[' | ']' | ':' => out.push(c),
            c if c.is_whitespace() => out.push(c),
            c if is_word_char(c) => {
                let mut end = i + c.len_utf8();
                while let Some(&(j, d)) = chars.peek() {
                    if !is_word_char(d) {
                        break;
                    }
                    end = j + d.len_utf8();
                    chars.next();
                }
                emit_word(&src[i..end], colon_follows(&src[end..]), i, &mut out)?;
            }
            other => {
                return Err(LiteralError {
                    message: format!("unexpected character '{other}'"),
                    offset: i,
                })
            }
        }
    }
    Ok(out)
}

fn next_significant(rest: &str) -> Option<char> {
    rest.chars().find(|c| !c.is_whitespace())
}

fn closer_follows(rest: &str) -> bool {
    matches!(next_significant(rest), Some('}') | Some(']'))
}

fn colon_follows(rest: &str) -> bool {
    next_significant(rest) == Some(':')
}

/// Emit one unquoted token: a key, a boolean, `null` or a number.
fn emit_word(word: &str, is_key: bool, offset: usize, out: &mut String) -> Result<(), LiteralError> {
    if is_key {
        if !word.chars().all(is_ident_char) {
            return Err(LiteralError {
                message: format!("invalid bare key '{word}'"),
                offset,
            });
        }
        out.push('"');
        out.push_str(word);
        out.push('"');
        return Ok(());
    }
    match word {
        "true" | "True" => out.push_str("true"),
        "false" | "False" => out.push_str("false"),
        "null" => out.push_str("null"),
        w if w.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '-' | '+' | '.')) => {
            // Left for the JSON parser to validate.
            out.push_str(w.strip_prefix('+').unwrap_or(w));
        }
        w => {
            return Err(LiteralError {
                message: format!("unexpected identifier '{w}' in value position"),
                offset,
            })
        }
    }
    Ok(())
}

/// Copy the string literal starting at `start` as a JSON string.
///
/// Returns the byte offset of the closing quote.
fn copy_string(src: &str, start: usize, quote: char, out: &mut String) -> Result<usize, LiteralError> {
    out.push('"');
    let mut escaped = false;
    for (j, c) in src[start + 1..].char_indices() {
        let at = start + 1 + j;
        if escaped {
            escaped = false;
            if c == '\'' {
                // `\'` is valid JS but not JSON.
                out.push('\'');
            } else {
                out.push('\\');
                out.push(c);
            }
            continue;
        }
        match c {
            '\\' => escaped = true,
            c if c == quote => {
                out.push('"');
                return Ok(at);
            }
            '"' => out.push_str("\\\""),
            '\n' | '\r' => {
                return Err(LiteralError {
                    message: "line break inside string literal".to_string(),
                    offset: at,
                })
            }
            // JSON strings may not hold raw C0 controls such as a tab.
            c if c < '\u{20}' => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    Err(LiteralError {
        message: "unterminated string literal".to_string(),
        offset: start,
    })
}

/// 1-based line and column of byte offset `at` in `text`.
pub fn line_column(text: &str, at: usize) -> (usize, usize) {
    let at = at.min(text.len());
    let before = &text[..at];
    let line = before.matches('\n').count() + 1;
    let column = match before.rfind('\n') {
        Some(nl) => before[nl + 1..].chars().count() + 1,
        None => before.chars().count() + 1,
    };
    (line, column)
}

/// Byte offset of the 1-based `line`/`column` position, as reported by `serde_json`.
pub fn offset_of(text: &str, line: usize, column: usize) -> usize {
    let line_start = if line <= 1 {
        0
    } else {
        text.match_indices('\n')
            .nth(line - 2)
            .map_or(text.len(), |(i, _)| i + 1)
    };
    text[line_start..]
        .char_indices()
        .nth(column.saturating_sub(1))
        .map_or(text.len(), |(i, _)| line_start + i)
}
