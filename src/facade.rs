//! `Regex`: one delimited pattern behind a uniform set of operations.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::engine::{self, MatchResult, NativeEngine, PatternEngine};
use crate::error::{ErrorCode, Result};
use crate::flags::GLOBAL;
use crate::pattern::Pattern;
use crate::replacement::Replacement;

/// What `exec` found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matches {
    /// First match of a non-global pattern: full match, then each group.
    One(MatchResult),
    /// Every match of a global pattern, grouped by capture: `[0]` holds each
    /// full match, `[1]` group 1 of each match, and so on.
    All(Vec<Vec<String>>),
}

/// Regrouping from per-occurrence to per-capture order.
fn by_group(occurrences: Vec<MatchResult>) -> Vec<Vec<String>> {
    let width = occurrences.iter().map(Vec::len).max().unwrap_or(0);
    let mut out: Vec<Vec<String>> = (0..width)
        .map(|_| Vec::with_capacity(occurrences.len()))
        .collect();
    for occurrence in occurrences {
        let mut groups = occurrence.into_iter();
        for column in out.iter_mut() {
            column.push(groups.next().unwrap_or_default());
        }
    }
    out
}

/// A delimited regular expression, e.g. `Regex::new("/(test)/g")`.
///
/// The `g` flag makes `exec`, `replace` and `filter` work through every
/// occurrence. Every other operation hands the pattern to the engine as is.
pub struct Regex<E = NativeEngine> {
    pattern: Pattern,
    engine: Arc<E>,
}

impl Regex {
    /// Uses the process-wide [`NativeEngine`].
    pub fn new(pattern: impl Into<Pattern>) -> Self {
        Self::with_engine(pattern, NativeEngine::shared())
    }

    /// Escapes `literal` so it can be embedded in a pattern body.
    pub fn quote(literal: &str, delimiter: Option<char>) -> String {
        engine::quote(literal, delimiter)
    }

    /// Status of the most recent engine operation in this process.
    pub fn last_error() -> ErrorCode {
        engine::last_error()
    }
}

impl<E: PatternEngine> Regex<E> {
    pub fn with_engine(pattern: impl Into<Pattern>, engine: Arc<E>) -> Self {
        Self {
            pattern: pattern.into(),
            engine,
        }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn is_global(&self) -> bool {
        self.pattern.is_global()
    }

    pub fn test(&self, subject: &str) -> Result<bool> {
        Ok(self.exec(subject)?.is_some())
    }

    pub fn exec(&self, subject: &str) -> Result<Option<Matches>> {
        if !self.is_global() {
            return Ok(self
                .engine
                .single_match(&self.pattern, subject)?
                .map(Matches::One));
        }
        let stripped = self.pattern.without_flag(GLOBAL);
        Ok(self
            .engine
            .find_all(&stripped, subject)?
            .filter(|found| !found.is_empty())
            .map(|found| Matches::All(by_group(found))))
    }

    /// Replaces matches in `subject`; an unmatched subject comes back unchanged.
    ///
    /// Without `g` this is one engine pass over every occurrence. With `g`,
    /// each occurrence is rendered on its own and folded into the subject in
    /// textual order, each step feeding the next.
    pub fn replace<'r>(
        &self,
        subject: &str,
        replacement: impl Into<Replacement<'r>>,
    ) -> Result<String> {
        let replacement = replacement.into();
        if !self.is_global() {
            return self
                .engine
                .replace_all(&self.pattern, &replacement, subject);
        }

        let stripped = self.pattern.without_flag(GLOBAL);
        let occurrences = self.occurrences(&stripped, subject)?;
        trace!(pattern = %self.pattern, occurrences = occurrences.len(), "global replace");

        let mut folded = subject.to_owned();
        for occurrence in &occurrences {
            let rendered = self.engine.replace_all(&stripped, &replacement, occurrence)?;
            folded = self
                .engine
                .replace_all(&stripped, &Replacement::verbatim(rendered), &folded)?;
        }
        Ok(folded)
    }

    /// Like [`Regex::replace`], but `None` when nothing matched.
    ///
    /// With `g`, a fold step whose input no longer matches ends the fold with `None`.
    pub fn filter<'r>(
        &self,
        subject: &str,
        replacement: impl Into<Replacement<'r>>,
    ) -> Result<Option<String>> {
        let replacement = replacement.into();
        if !self.is_global() {
            return self
                .engine
                .filter_if_matched(&self.pattern, &replacement, subject);
        }

        let stripped = self.pattern.without_flag(GLOBAL);
        let occurrences = self.occurrences(&stripped, subject)?;
        trace!(pattern = %self.pattern, occurrences = occurrences.len(), "global filter");
        if occurrences.is_empty() {
            return Ok(None);
        }

        let mut folded = subject.to_owned();
        for occurrence in &occurrences {
            let rendered = self
                .engine
                .filter_if_matched(&stripped, &replacement, occurrence)?
                .unwrap_or_default();
            match self
                .engine
                .filter_if_matched(&stripped, &Replacement::verbatim(rendered), &folded)?
            {
                Some(next) => folded = next,
                None => return Ok(None),
            }
        }
        Ok(Some(folded))
    }

    pub fn split(&self, subject: &str) -> Result<Vec<String>> {
        self.engine.split_on(&self.pattern, subject)
    }

    /// The subjects that match, keyed by their position in the input.
    pub fn grep<I, S>(&self, subjects: I) -> Result<BTreeMap<usize, String>>
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.engine.grep_matching(&self.pattern, subjects)
    }

    fn occurrences(&self, stripped: &Pattern, subject: &str) -> Result<Vec<String>> {
        Ok(self
            .engine
            .find_all(stripped, subject)?
            .unwrap_or_default()
            .into_iter()
            .filter_map(|groups| groups.into_iter().next())
            .collect())
    }
}

impl<E> Clone for Regex<E> {
    fn clone(&self) -> Self {
        Self {
            pattern: self.pattern.clone(),
            engine: Arc::clone(&self.engine),
        }
    }
}

impl<E> fmt::Debug for Regex<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Regex")
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}

impl<E> fmt::Display for Regex<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.pattern, f)
    }
}

impl From<&str> for Regex {
    fn from(pattern: &str) -> Self {
        Regex::new(pattern)
    }
}

#[cfg(feature = "serde")]
impl<E> serde::Serialize for Regex<E> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.pattern, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Regex {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <Pattern as serde::Deserialize>::deserialize(deserializer).map(Regex::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn regroups_occurrences_by_capture() {
        let found = vec![strings(&["ab", "a"]), strings(&["cd", "c"])];
        assert_eq!(
            by_group(found),
            vec![strings(&["ab", "cd"]), strings(&["a", "c"])]
        );
        assert!(by_group(Vec::new()).is_empty());
    }

    #[test]
    fn displays_and_clones_pattern() {
        let re = Regex::new("/a/gi");
        assert_eq!(re.to_string(), "/a/gi");
        assert!(re.is_global());
        let copy = re.clone();
        assert_eq!(copy.pattern(), re.pattern());
    }
}
