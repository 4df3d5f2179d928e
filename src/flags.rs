//! Delimiter tokenizer and flag inspection for raw pattern strings.
//!
//! A raw pattern looks like `/body/flags`. The first non-whitespace character
//! is the delimiter; bracket delimiters (`(`, `[`, `{`, `<`) close with their
//! counterpart and may nest inside the body. Everything after the closing
//! delimiter is the flags segment.

use crate::error::{RegexError, Result};

/// Emulate all-occurrence matching in `exec`, `replace` and `filter`.
pub const GLOBAL: char = 'g';
pub const CASE_INSENSITIVE: char = 'i';

/// A raw pattern split at its delimiters. All slices borrow the raw string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Delimited<'a> {
    pub body: &'a str,
    pub flags: &'a str,
    /// Byte offset of `flags` within the raw string.
    pub flags_at: usize,
}

pub(crate) fn closing_delimiter(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        '{' => '}',
        '<' => '>',
        c => c,
    }
}

/// Scans `raw` once, locating the body and the flags tail.
pub(crate) fn split_delimited(raw: &str) -> Result<Delimited<'_>> {
    let start = raw.len() - raw.trim_start().len();
    let open = raw[start..].chars().next().ok_or(RegexError::EmptyPattern)?;
    if open.is_alphanumeric() || open == '\\' || open == '\0' {
        return Err(RegexError::InvalidDelimiter(open));
    }

    let close = closing_delimiter(open);
    let body_at = start + open.len_utf8();
    let mut depth = 1usize;
    let mut escaped = false;

    for (i, c) in raw[body_at..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                let end = body_at + i;
                let flags_at = end + close.len_utf8();
                return Ok(Delimited {
                    body: &raw[body_at..end],
                    flags: &raw[flags_at..],
                    flags_at,
                });
            }
        } else if c == open {
            // only reachable for bracket pairs, where open != close
            depth += 1;
        }
    }

    Err(RegexError::MissingEndDelimiter(close))
}

/// The flags after the closing delimiter, or `None` if the delimiters can't be found.
pub fn flags_of(pattern: &str) -> Option<&str> {
    split_delimited(pattern).ok().map(|d| d.flags)
}

pub fn has_flag(pattern: &str, flag: char) -> bool {
    flags_of(pattern).is_some_and(|flags| flags.contains(flag))
}

/// Removes every `flag` from the flags segment; the body is never touched.
pub fn without_flag(pattern: &str, flag: char) -> String {
    match split_delimited(pattern) {
        Ok(d) if d.flags.contains(flag) => {
            let mut out = String::with_capacity(pattern.len());
            out.push_str(&pattern[..d.flags_at]);
            out.extend(d.flags.chars().filter(|&c| c != flag));
            out
        }
        _ => pattern.to_owned(),
    }
}
