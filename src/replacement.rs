//! Replacement values and PCRE-style template expansion.
//!
//! Templates refer to groups with `$n`, `\n` or `${n}`, where `n` is one or
//! two digits. `\\` and `\$` produce a literal backslash and dollar sign, and
//! references to groups that did not take part in the match expand to nothing.

use std::borrow::Cow;
use std::fmt;

pub enum Replacement<'a> {
    /// Text with back-references, expanded per match.
    Template(Cow<'a, str>),
    /// Called once per match with that match's groups (index 0 is the full match).
    Callback(Box<dyn Fn(&[String]) -> String + 'a>),
    /// Inserted as-is, without back-reference expansion.
    Verbatim(Cow<'a, str>),
}

impl<'a> Replacement<'a> {
    pub fn template(text: impl Into<Cow<'a, str>>) -> Self {
        Self::Template(text.into())
    }

    pub fn callback<F>(f: F) -> Self
    where
        F: Fn(&[String]) -> String + 'a,
    {
        Self::Callback(Box::new(f))
    }

    pub fn verbatim(text: impl Into<Cow<'a, str>>) -> Self {
        Self::Verbatim(text.into())
    }

    /// Appends the replacement for one match to `dst`.
    pub(crate) fn render(&self, groups: &[String], dst: &mut String) {
        match self {
            Self::Template(t) => expand(t, groups, dst),
            Self::Callback(f) => dst.push_str(&f(groups)),
            Self::Verbatim(v) => dst.push_str(v),
        }
    }
}

impl fmt::Debug for Replacement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template(t) => f.debug_tuple("Template").field(t).finish(),
            Self::Callback(_) => f.write_str("Callback(..)"),
            Self::Verbatim(v) => f.debug_tuple("Verbatim").field(v).finish(),
        }
    }
}

impl<'a> From<&'a str> for Replacement<'a> {
    fn from(text: &'a str) -> Self {
        Self::Template(Cow::Borrowed(text))
    }
}

impl From<String> for Replacement<'_> {
    fn from(text: String) -> Self {
        Self::Template(Cow::Owned(text))
    }
}

/// Parses a group reference at the start of `rest`, which begins with `$` or `\`.
/// Returns the group number and the number of bytes consumed.
fn backref(rest: &[u8]) -> Option<(usize, usize)> {
    let braced = rest.first() == Some(&b'$') && rest.get(1) == Some(&b'{');
    let mut i = if braced { 2 } else { 1 };

    let first = *rest.get(i).filter(|b| b.is_ascii_digit())?;
    let mut group = usize::from(first - b'0');
    i += 1;

    if let Some(&d) = rest.get(i).filter(|b| b.is_ascii_digit()) {
        group = group * 10 + usize::from(d - b'0');
        i += 1;
    }

    if braced {
        if rest.get(i) != Some(&b'}') {
            return None;
        }
        i += 1;
    }
    Some((group, i))
}

pub(crate) fn expand(template: &str, groups: &[String], dst: &mut String) {
    let bytes = template.as_bytes();
    let mut i = 0;
    let mut literal_from = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b != b'\\' && b != b'$' {
            i += 1;
            continue;
        }

        if b == b'\\' && matches!(bytes.get(i + 1), Some(b'\\' | b'$')) {
            dst.push_str(&template[literal_from..i]);
            dst.push(char::from(bytes[i + 1]));
            i += 2;
            literal_from = i;
            continue;
        }

        match backref(&bytes[i..]) {
            Some((group, consumed)) => {
                dst.push_str(&template[literal_from..i]);
                if let Some(text) = groups.get(group) {
                    dst.push_str(text);
                }
                i += consumed;
                literal_from = i;
            }
            None => i += 1,
        }
    }
    dst.push_str(&template[literal_from..]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(template: &str, groups: &[&str]) -> String {
        let groups: Vec<String> = groups.iter().map(|s| s.to_string()).collect();
        let mut out = String::new();
        expand(template, &groups, &mut out);
        out
    }

    #[test]
    fn digits_end_the_reference() {
        assert_eq!(run("yes$1true", &["testsomestring", "some"]), "yessometrue");
        assert_eq!(run("thatworks$1", &["x", "goes"]), "thatworksgoes");
    }

    #[test]
    fn all_reference_forms() {
        let g = ["ab", "a", "b"];
        assert_eq!(run(r"\2\1", &g), "ba");
        assert_eq!(run("${2}0", &g), "b0");
        assert_eq!(run("$0!", &g), "ab!");
        assert_eq!(run("$12", &g), "");
    }

    #[test]
    fn missing_groups_expand_to_nothing() {
        assert_eq!(run("<$3>", &["a"]), "<>");
        assert_eq!(run("<${9}>", &["a"]), "<>");
    }

    #[test]
    fn escapes_and_stray_markers_are_literal() {
        assert_eq!(run(r"\$1", &["a", "b"]), "$1");
        assert_eq!(run(r"a\\b", &["a"]), r"a\b");
        assert_eq!(run("cost: $", &["a"]), "cost: $");
        assert_eq!(run("${1", &["a", "b"]), "${1");
        assert_eq!(run("$x", &["a"]), "$x");
        assert_eq!(run("trailing\\", &["a"]), "trailing\\");
    }

    #[test]
    fn multibyte_text_is_preserved() {
        assert_eq!(run("→$1←", &["x", "東京"]), "→東京←");
    }

    #[test]
    fn verbatim_skips_expansion() {
        let mut out = String::new();
        Replacement::verbatim("$1").render(&["a".into(), "b".into()], &mut out);
        assert_eq!(out, "$1");
    }

    #[test]
    fn callback_receives_groups() {
        let r = Replacement::callback(|g: &[String]| g[1].to_uppercase());
        let mut out = String::new();
        r.render(&["ab".into(), "b".into()], &mut out);
        assert_eq!(out, "B");
    }
}
