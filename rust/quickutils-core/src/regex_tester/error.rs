//! Pattern compile errors
//!
//! Every variant collapses to its display string at the engine boundary;
//! callers only ever see `MatchResult::error`.

/// Why a `(pattern, flags)` pair could not be compiled
#[derive(Debug, Clone, PartialEq)]
pub enum PatternError {
    UnknownFlag { flags: String, flag: char },
    DuplicateFlag { flags: String, flag: char },
    ConflictingFlags { flags: String },
    /// Parser diagnostic from the regex library, kept verbatim
    Syntax(String),
    TooLarge(usize),
}

impl std::fmt::Display for PatternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternError::UnknownFlag { flags, flag } => {
                write!(f, "Invalid flags '{}': unknown flag '{}'", flags, flag)
            }
            PatternError::DuplicateFlag { flags, flag } => {
                write!(f, "Invalid flags '{}': flag '{}' appears more than once", flags, flag)
            }
            PatternError::ConflictingFlags { flags } => {
                write!(f, "Invalid flags '{}': 'u' and 'v' cannot be combined", flags)
            }
            PatternError::Syntax(msg) => f.write_str(msg),
            PatternError::TooLarge(limit) => {
                write!(f, "Compiled regex exceeds the size limit of {} bytes", limit)
            }
        }
    }
}

impl std::error::Error for PatternError {}

impl From<regex::Error> for PatternError {
    fn from(err: regex::Error) -> Self {
        match err {
            regex::Error::CompiledTooBig(limit) => PatternError::TooLarge(limit),
            other => PatternError::Syntax(other.to_string()),
        }
    }
}
