use std::fmt;

use crate::error::{RegexError, Result};
use crate::flags::{self, GLOBAL, split_delimited};

/// A delimited pattern such as `/(test)/gi`. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Pattern {
    raw: String,
}

impl Pattern {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// See [`flags::flags_of`].
    pub fn flags(&self) -> Option<&str> {
        flags::flags_of(&self.raw)
    }

    pub fn has_flag(&self, flag: char) -> bool {
        flags::has_flag(&self.raw, flag)
    }

    pub fn without_flag(&self, flag: char) -> Pattern {
        Pattern::new(flags::without_flag(&self.raw, flag))
    }

    pub fn is_global(&self) -> bool {
        self.has_flag(GLOBAL)
    }

    /// Translates the delimited form into a source string the engine compiles.
    ///
    /// Modifiers map onto inline groups: `i m s x U` become `(?imsxU)`, `A`
    /// anchors at the start of the subject, and `u D S` are accepted and ignored.
    ///
    /// Unlike PCRE, `$` without `m` only matches at the very end of the
    /// subject, never before a trailing newline: `D` is always in effect.
    pub(crate) fn engine_source(&self) -> Result<String> {
        let d = split_delimited(&self.raw)?;

        let mut inline = String::new();
        let mut anchored = false;
        for c in d.flags.chars() {
            match c {
                'i' | 'm' | 's' | 'x' | 'U' => {
                    if !inline.contains(c) {
                        inline.push(c);
                    }
                }
                'A' => anchored = true,
                'u' | 'D' | 'S' => {}
                c if c.is_whitespace() => {}
                other => return Err(RegexError::UnknownModifier(other)),
            }
        }

        let mut source = String::with_capacity(d.body.len() + inline.len() + 8);
        if !inline.is_empty() {
            source.push_str("(?");
            source.push_str(&inline);
            source.push(')');
        }
        if anchored {
            source.push_str(r"\A(?:");
            source.push_str(d.body);
            // a trailing `#` comment in extended mode would swallow the paren
            if inline.contains('x') {
                source.push('\n');
            }
            source.push(')');
        } else {
            source.push_str(d.body);
        }
        Ok(source)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for Pattern {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Pattern {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl AsRef<str> for Pattern {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}
