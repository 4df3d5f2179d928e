use crate::re::EngineError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RegexError>;

#[derive(Debug, Error)]
pub enum RegexError {
    #[error("regex: invalid regex pattern: {0}")]
    InvalidPattern(#[from] Box<EngineError>),

    #[error("regex: empty pattern")]
    EmptyPattern,

    #[error("regex: delimiter must not be alphanumeric, backslash or NUL, got {0:?}")]
    InvalidDelimiter(char),

    #[error("regex: no ending delimiter {0:?} found")]
    MissingEndDelimiter(char),

    #[error("regex: unknown modifier {0:?}")]
    UnknownModifier(char),
}

impl From<EngineError> for RegexError {
    fn from(e: EngineError) -> Self {
        Self::InvalidPattern(Box::new(e))
    }
}

/// Status of the most recent engine operation, numbered like the PCRE codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ErrorCode {
    #[default]
    NoError = 0,
    Internal = 1,
    BacktrackLimit = 2,
    RecursionLimit = 3,
    BadUtf8 = 4,
    BadUtf8Offset = 5,
}

impl ErrorCode {
    pub(crate) fn from_u8(v: u8) -> Self {
        match v {
            0 => Self::NoError,
            2 => Self::BacktrackLimit,
            3 => Self::RecursionLimit,
            4 => Self::BadUtf8,
            5 => Self::BadUtf8Offset,
            _ => Self::Internal,
        }
    }

    pub fn is_error(self) -> bool {
        self != Self::NoError
    }
}
