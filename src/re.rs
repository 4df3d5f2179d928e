#[cfg(feature = "fancy-regex")]
pub use fancy_regex as engine;
#[cfg(not(feature = "fancy-regex"))]
pub use regex as engine;

use crate::config::RegexConfig;
use crate::error::ErrorCode;

pub type Compiled = engine::Regex;

#[cfg(feature = "fancy-regex")]
pub type Captures<'a> = fancy_regex::Captures<'a>;
#[cfg(not(feature = "fancy-regex"))]
pub type Captures<'a> = regex::Captures<'a>;

#[cfg(feature = "fancy-regex")]
pub type EngineError = fancy_regex::Error;
#[cfg(not(feature = "fancy-regex"))]
pub type EngineError = regex::Error;

pub fn compile(source: &str, cfg: &RegexConfig) -> Result<Compiled, Box<EngineError>> {
    let mut builder = engine::RegexBuilder::new(source);
    #[cfg(feature = "fancy-regex")]
    {
        if let Some(n) = cfg.backtrack_limit {
            builder.backtrack_limit(n);
        }
        if let Some(n) = cfg.size_limit {
            builder.delegate_size_limit(n);
        }
    }
    #[cfg(not(feature = "fancy-regex"))]
    {
        if let Some(n) = cfg.size_limit {
            builder.size_limit(n);
        }
    }
    builder.build().map_err(Box::new)
}

/// Always return `Result<Option<Captures>>` so callers handle both engines uniformly.
#[inline]
pub fn captures<'a>(
    re: &'a Compiled,
    s: &'a str,
) -> Result<Option<Captures<'a>>, Box<EngineError>> {
    #[cfg(feature = "fancy-regex")]
    {
        re.captures(s).map_err(Box::new)
    }
    #[cfg(not(feature = "fancy-regex"))]
    {
        Ok(re.captures(s))
    }
}

/// Successive non-overlapping matches; the `regex` engine never yields `Err`.
pub fn captures_iter<'a>(
    re: &'a Compiled,
    s: &'a str,
) -> impl Iterator<Item = Result<Captures<'a>, Box<EngineError>>> + 'a {
    #[cfg(feature = "fancy-regex")]
    {
        re.captures_iter(s).map(|c| c.map_err(Box::new))
    }
    #[cfg(not(feature = "fancy-regex"))]
    {
        re.captures_iter(s).map(Ok)
    }
}

#[inline]
pub fn is_match(re: &Compiled, s: &str) -> Result<bool, Box<EngineError>> {
    #[cfg(feature = "fancy-regex")]
    {
        re.is_match(s).map_err(Box::new)
    }
    #[cfg(not(feature = "fancy-regex"))]
    {
        Ok(re.is_match(s))
    }
}

/// Maps an error raised while matching (not compiling) to its status code.
pub fn runtime_code(e: &EngineError) -> ErrorCode {
    #[cfg(feature = "fancy-regex")]
    {
        use fancy_regex::RuntimeError;
        match e {
            fancy_regex::Error::RuntimeError(RuntimeError::BacktrackLimitExceeded) => {
                ErrorCode::BacktrackLimit
            }
            fancy_regex::Error::RuntimeError(RuntimeError::StackOverflow) => {
                ErrorCode::RecursionLimit
            }
            _ => ErrorCode::Internal,
        }
    }
    #[cfg(not(feature = "fancy-regex"))]
    {
        let _ = e;
        ErrorCode::Internal
    }
}
