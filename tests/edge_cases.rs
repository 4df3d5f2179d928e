use regex_facade::flags::{GLOBAL, flags_of, has_flag, without_flag};
use regex_facade::{Matches, Regex, RegexError};

fn strings(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn empty_subject() {
    let re = Regex::new(r"/(\d+)/");
    assert_eq!(re.exec("").unwrap(), None);
    assert_eq!(re.replace("", "x").unwrap(), "");
    assert_eq!(re.filter("", "x").unwrap(), None);
    assert_eq!(re.split("").unwrap(), strings(&[""]));
}

#[test]
fn empty_body_matches_everywhere() {
    let re = Regex::new("//");
    assert_eq!(re.exec("abc").unwrap(), Some(Matches::One(strings(&[""]))));
    assert_eq!(re.replace("ab", "-").unwrap(), "-a-b-");
    assert_eq!(re.split("ab").unwrap(), strings(&["", "a", "b", ""]));

    let global = Regex::new("//g");
    assert_eq!(
        global.exec("ab").unwrap(),
        Some(Matches::All(vec![strings(&["", "", ""])]))
    );
}

#[test]
fn body_characters_never_count_as_flags() {
    let re = Regex::new("/g/");
    assert!(!re.is_global());
    assert_eq!(re.exec("ggg").unwrap(), Some(Matches::One(strings(&["g"]))));

    let escaped = r"/a\/g/";
    assert_eq!(flags_of(escaped), Some(""));
    assert!(!has_flag(escaped, GLOBAL));
    assert!(Regex::new(escaped).test("xa/gx").unwrap());
}

#[test]
fn global_flag_is_stripped_wherever_it_sits() {
    for raw in ["/(a)/g", "/(a)/gi", "/(a)/ig", "/(a)/igg"] {
        let re = Regex::new(raw);
        assert!(re.is_global(), "{raw}");
        assert!(!has_flag(&without_flag(raw, GLOBAL), GLOBAL), "{raw}");
        assert_eq!(
            re.exec("aa").unwrap(),
            Some(Matches::All(vec![strings(&["a", "a"]), strings(&["a", "a"])])),
            "{raw}"
        );
    }
}

#[test]
fn unmatched_groups_by_mode() {
    let single = Regex::new("/(a)|(b)/");
    assert_eq!(
        single.exec("b").unwrap(),
        Some(Matches::One(strings(&["b", "", "b"])))
    );
    assert_eq!(
        single.exec("a").unwrap(),
        Some(Matches::One(strings(&["a", "a"])))
    );

    let global = Regex::new("/(a)|(b)/g");
    assert_eq!(
        global.exec("ab").unwrap(),
        Some(Matches::All(vec![
            strings(&["a", "b"]),
            strings(&["a", ""]),
            strings(&["", "b"]),
        ]))
    );
}

#[test]
fn malformed_patterns_fail_to_compile() {
    let err = Regex::new("/(unclosed/").test("x").unwrap_err();
    assert!(matches!(err, RegexError::InvalidPattern(_)));
    assert!(err.to_string().contains("invalid regex pattern"));

    assert!(matches!(
        Regex::new("no delimiters").exec("x"),
        Err(RegexError::InvalidDelimiter('n'))
    ));
    assert!(matches!(
        Regex::new("/open").replace("x", "y"),
        Err(RegexError::MissingEndDelimiter('/'))
    ));
    assert!(matches!(
        Regex::new("/a/q").split("a"),
        Err(RegexError::UnknownModifier('q'))
    ));
    assert!(matches!(
        Regex::new("   ").filter("a", "b"),
        Err(RegexError::EmptyPattern)
    ));
}

#[test]
fn global_flag_is_not_an_engine_modifier() {
    // split and grep hand the pattern over untouched
    let re = Regex::new("/,/g");
    assert!(matches!(re.split("a,b"), Err(RegexError::UnknownModifier('g'))));
    assert!(matches!(re.grep(["a,b"]), Err(RegexError::UnknownModifier('g'))));
}

#[test]
fn modifiers_change_matching() {
    assert!(Regex::new("/^b$/m").test("a\nb\nc").unwrap());
    assert!(!Regex::new("/^b$/").test("a\nb\nc").unwrap());

    assert!(Regex::new("/a.c/s").test("a\nc").unwrap());
    assert!(!Regex::new("/a.c/").test("a\nc").unwrap());

    assert!(Regex::new("/a b c # letters/x").test("abc").unwrap());

    assert_eq!(
        Regex::new("/a+/U").exec("aaa").unwrap(),
        Some(Matches::One(strings(&["a"])))
    );

    assert!(Regex::new("/b/A").test("bc").unwrap());
    assert!(!Regex::new("/b/A").test("abc").unwrap());
}

#[test]
fn dollar_never_matches_before_a_trailing_newline() {
    assert!(Regex::new("/c$/").test("abc").unwrap());
    assert!(!Regex::new("/c$/").test("abc\n").unwrap());
    assert!(!Regex::new("/c$/D").test("abc\n").unwrap());
    assert!(Regex::new("/c$/m").test("abc\n").unwrap());
}

#[test]
fn callback_sees_trimmed_groups() {
    let re = Regex::new("/(a)(x)?/");
    let seen = re
        .replace(
            "a",
            regex_facade::Replacement::callback(|m: &[String]| m.len().to_string()),
        )
        .unwrap();
    assert_eq!(seen, "2");
}

#[test]
fn replacement_escapes_follow_pcre() {
    let re = Regex::new("/(b)/");
    assert_eq!(re.replace("abc", r"\$1").unwrap(), "a$1c");
    assert_eq!(re.replace("abc", r"\\").unwrap(), r"a\c");
    assert_eq!(re.replace("abc", "${1}1").unwrap(), "ab1c");
    assert_eq!(re.replace("abc", r"[\1]").unwrap(), "a[b]c");
    assert_eq!(re.replace("abc", "$5").unwrap(), "ac");
}
