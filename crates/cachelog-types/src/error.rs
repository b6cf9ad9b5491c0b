use std::fmt;

/// Result type for cachelog-types operations
pub type Result<T> = std::result::Result<T, ParseError>;

/// Ways a raw log line can fail to match the expected record layout
#[derive(Debug)]
pub enum ParseError {
    /// Fewer space-separated fields than the fixed layout requires
    TooFewFields { found: usize },
    /// A leading timestamp field did not match `%Y-%m-%dT%H:%M:%SZ`
    BadTimestamp {
        value: String,
        source: chrono::ParseError,
    },
    /// The line has no `|` delimiter
    MissingPipe,
    /// The line has no `out=` marker
    MissingOutMarker,
    /// A trailing field did not start with the expected prefix
    MissingToken { expected: &'static str },
    /// A trailing field's value was not an integer
    BadInteger {
        field: &'static str,
        value: String,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::TooFewFields { found } => {
                write!(f, "expected at least 5 space-separated fields, found {}", found)
            }
            ParseError::BadTimestamp { value, source } => {
                write!(f, "invalid timestamp '{}': {}", value, source)
            }
            ParseError::MissingPipe => write!(f, "missing '|' delimiter"),
            ParseError::MissingOutMarker => write!(f, "missing 'out=' marker"),
            ParseError::MissingToken { expected } => {
                write!(f, "missing '{}' token", expected)
            }
            ParseError::BadInteger { field, value } => {
                write!(f, "invalid integer in '{}' field: '{}'", field, value)
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::BadTimestamp { source, .. } => Some(source),
            _ => None,
        }
    }
}
