//! regex-facade
//!
//! A consistent interface over delimited regular expressions such as
//! `/here(goes)the[regex]/i`. The `g` flag turns `exec`, `replace` and
//! `filter` into all-occurrence operations.
//!
//! ```
//! use regex_facade::{Matches, Regex};
//!
//! let re = Regex::new("/(test)/g");
//! let found = re.exec("testtest").unwrap();
//! assert_eq!(
//!     found,
//!     Some(Matches::All(vec![
//!         vec!["test".to_string(), "test".to_string()],
//!         vec!["test".to_string(), "test".to_string()],
//!     ]))
//! );
//! ```

mod config;
pub mod engine;
pub mod error;
pub mod facade;
pub mod flags;
pub mod pattern;
pub mod pattern_cache;
pub mod re;
pub mod replacement;

pub use config::RegexConfig;
pub use engine::{MatchResult, NativeEngine, PatternEngine};
pub use error::{ErrorCode, RegexError, Result};
pub use facade::{Matches, Regex};
pub use pattern::Pattern;
pub use replacement::Replacement;
