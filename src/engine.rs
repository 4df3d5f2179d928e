//! The pattern engine: every actual match, replace, split and grep goes through here.
//!
//! [`NativeEngine`] compiles delimited patterns with the configured regex crate and
//! keeps them in an LRU cache. The status of the latest operation is process-wide
//! and read back with [`last_error`].

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, LazyLock, Mutex, PoisonError};

use tracing::warn;

use crate::config::RegexConfig;
use crate::error::{ErrorCode, Result};
use crate::flags::closing_delimiter;
use crate::pattern::Pattern;
use crate::pattern_cache::PatternCache;
use crate::re::{self, Captures, Compiled, EngineError};
use crate::replacement::Replacement;

/// Captured strings of one match; index 0 is the full match.
pub type MatchResult = Vec<String>;

static LAST_ERROR: AtomicU8 = AtomicU8::new(ErrorCode::NoError as u8);

/// Status of the most recent engine operation anywhere in the process.
pub fn last_error() -> ErrorCode {
    ErrorCode::from_u8(LAST_ERROR.load(Ordering::SeqCst))
}

fn set_last_error(code: ErrorCode) {
    LAST_ERROR.store(code as u8, Ordering::SeqCst);
}

/// Operations the facade delegates to.
///
/// Compile failures come back as `Err`. Failures while matching do not: they
/// are recorded for [`PatternEngine::last_error_code`] and the call returns its
/// "no result" value instead.
pub trait PatternEngine {
    fn single_match(&self, pattern: &Pattern, subject: &str) -> Result<Option<MatchResult>>;

    /// One entry per occurrence, every group present; `None` when nothing matched.
    fn find_all(&self, pattern: &Pattern, subject: &str) -> Result<Option<Vec<MatchResult>>>;

    /// Replaces every occurrence in one pass; an unmatched subject comes back unchanged.
    fn replace_all(
        &self,
        pattern: &Pattern,
        replacement: &Replacement<'_>,
        subject: &str,
    ) -> Result<String>;

    /// Like `replace_all`, but `None` when the subject did not match.
    fn filter_if_matched(
        &self,
        pattern: &Pattern,
        replacement: &Replacement<'_>,
        subject: &str,
    ) -> Result<Option<String>>;

    fn split_on(&self, pattern: &Pattern, subject: &str) -> Result<Vec<String>>;

    fn grep_matching<I, S>(&self, pattern: &Pattern, subjects: I) -> Result<BTreeMap<usize, String>>
    where
        I: IntoIterator<Item = S>,
        S: ToString;

    fn quote_literal(&self, text: &str, delimiter: Option<char>) -> String {
        quote(text, delimiter)
    }

    fn last_error_code(&self) -> ErrorCode {
        last_error()
    }
}

/// Characters with meaning in a pattern body.
const META: &[char] = &[
    '.', '\\', '+', '*', '?', '[', '^', ']', '$', '(', ')', '{', '}', '=', '!', '|', ':', '-', '#',
    '&', '~',
];

/// Escapes every metacharacter in `text`, and both sides of `delimiter`.
///
/// Delimiters that can't take a backslash escape (`<` and `>` are word
/// boundaries as `\<` and `\>`, and non-ASCII characters aren't escapable)
/// are written as `\x{..}`, which the tokenizer steps over.
pub fn quote(text: &str, delimiter: Option<char>) -> String {
    let delimiters = delimiter.map(|open| (open, closing_delimiter(open)));
    let mut out = String::with_capacity(text.len() + text.len() / 2);
    for c in text.chars() {
        let is_delimiter = delimiters.is_some_and(|(open, close)| c == open || c == close);
        let backslashable = c.is_ascii_punctuation() && !matches!(c, '<' | '>');
        if c == '\0' {
            out.push_str(r"\x00");
        } else if is_delimiter && !backslashable {
            out.push_str(&format!(r"\x{{{:X}}}", c as u32));
        } else {
            if META.contains(&c) || is_delimiter {
                out.push('\\');
            }
            out.push(c);
        }
    }
    out
}

#[derive(Clone, Copy)]
enum Unmatched {
    /// Drop unmatched groups at the end, as a single match reports them.
    Trim,
    /// Keep every group, as find-all reports them.
    Keep,
}

fn groups(caps: &Captures<'_>, unmatched: Unmatched) -> MatchResult {
    let mut out: MatchResult = (0..caps.len())
        .map(|i| caps.get(i).map(|m| m.as_str().to_owned()).unwrap_or_default())
        .collect();
    if let Unmatched::Trim = unmatched {
        let participating = (0..caps.len())
            .rev()
            .find(|&i| caps.get(i).is_some())
            .map_or(0, |i| i + 1);
        out.truncate(participating);
    }
    out
}

pub struct NativeEngine {
    config: RegexConfig,
    cache: Mutex<PatternCache>,
}

impl Default for NativeEngine {
    fn default() -> Self {
        Self::with_config(RegexConfig::default())
    }
}

impl NativeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RegexConfig) -> Self {
        let cache = Mutex::new(PatternCache::new(config.cache_size));
        Self { config, cache }
    }

    /// The engine behind [`crate::Regex::new`].
    pub fn shared() -> Arc<NativeEngine> {
        static SHARED: LazyLock<Arc<NativeEngine>> =
            LazyLock::new(|| Arc::new(NativeEngine::new()));
        Arc::clone(&SHARED)
    }

    pub fn config(&self) -> &RegexConfig {
        &self.config
    }

    /// Resets the status and fetches the compiled program; compile failures set `Internal`.
    fn prepare(&self, pattern: &Pattern) -> Result<Arc<Compiled>> {
        set_last_error(ErrorCode::NoError);
        let compiled = self
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_compile(pattern, &self.config);
        if compiled.is_err() {
            set_last_error(ErrorCode::Internal);
        }
        compiled
    }

    fn runtime_failure(&self, pattern: &Pattern, e: &EngineError) {
        let code = re::runtime_code(e);
        warn!(pattern = %pattern, code = ?code, error = %e, "pattern engine runtime error");
        set_last_error(code);
    }

    /// Shared body of replace and filter: the output and the number of matches,
    /// or `None` when matching failed.
    fn substitute(
        &self,
        pattern: &Pattern,
        replacement: &Replacement<'_>,
        subject: &str,
    ) -> Result<Option<(String, usize)>> {
        let re = self.prepare(pattern)?;
        let mut out = String::with_capacity(subject.len());
        let mut last = 0;
        let mut count = 0;

        for caps in re::captures_iter(&re, subject) {
            let caps = match caps {
                Ok(caps) => caps,
                Err(e) => {
                    self.runtime_failure(pattern, &e);
                    return Ok(None);
                }
            };
            let Some(whole) = caps.get(0) else {
                continue;
            };
            out.push_str(&subject[last..whole.start()]);
            replacement.render(&groups(&caps, Unmatched::Trim), &mut out);
            last = whole.end();
            count += 1;
        }
        out.push_str(&subject[last..]);
        Ok(Some((out, count)))
    }
}

impl PatternEngine for NativeEngine {
    fn single_match(&self, pattern: &Pattern, subject: &str) -> Result<Option<MatchResult>> {
        let re = self.prepare(pattern)?;
        match re::captures(&re, subject) {
            Ok(caps) => Ok(caps.map(|c| groups(&c, Unmatched::Trim))),
            Err(e) => {
                self.runtime_failure(pattern, &e);
                Ok(None)
            }
        }
    }

    fn find_all(&self, pattern: &Pattern, subject: &str) -> Result<Option<Vec<MatchResult>>> {
        let re = self.prepare(pattern)?;
        let mut found = Vec::new();
        for caps in re::captures_iter(&re, subject) {
            match caps {
                Ok(caps) => found.push(groups(&caps, Unmatched::Keep)),
                Err(e) => {
                    self.runtime_failure(pattern, &e);
                    return Ok(None);
                }
            }
        }
        Ok((!found.is_empty()).then_some(found))
    }

    fn replace_all(
        &self,
        pattern: &Pattern,
        replacement: &Replacement<'_>,
        subject: &str,
    ) -> Result<String> {
        Ok(self
            .substitute(pattern, replacement, subject)?
            .map_or_else(|| subject.to_owned(), |(out, _)| out))
    }

    fn filter_if_matched(
        &self,
        pattern: &Pattern,
        replacement: &Replacement<'_>,
        subject: &str,
    ) -> Result<Option<String>> {
        Ok(self
            .substitute(pattern, replacement, subject)?
            .and_then(|(out, count)| (count > 0).then_some(out)))
    }

    fn split_on(&self, pattern: &Pattern, subject: &str) -> Result<Vec<String>> {
        let re = self.prepare(pattern)?;
        let mut pieces = Vec::new();
        let mut last = 0;
        for caps in re::captures_iter(&re, subject) {
            let caps = match caps {
                Ok(caps) => caps,
                Err(e) => {
                    self.runtime_failure(pattern, &e);
                    return Ok(Vec::new());
                }
            };
            if let Some(m) = caps.get(0) {
                pieces.push(subject[last..m.start()].to_owned());
                last = m.end();
            }
        }
        pieces.push(subject[last..].to_owned());
        Ok(pieces)
    }

    fn grep_matching<I, S>(&self, pattern: &Pattern, subjects: I) -> Result<BTreeMap<usize, String>>
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        let re = self.prepare(pattern)?;
        let mut kept = BTreeMap::new();
        for (i, subject) in subjects.into_iter().enumerate() {
            let subject = subject.to_string();
            match re::is_match(&re, &subject) {
                Ok(true) => {
                    kept.insert(i, subject);
                }
                Ok(false) => {}
                Err(e) => {
                    self.runtime_failure(pattern, &e);
                    return Ok(BTreeMap::new());
                }
            }
        }
        Ok(kept)
    }
}
