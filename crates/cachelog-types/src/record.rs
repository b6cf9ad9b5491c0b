use crate::error::{ParseError, Result};
use chrono::{DateTime, NaiveDateTime, Utc};

/// Timestamp layout the proxy writes: UTC, second resolution, literal `Z`
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// One request as recorded in the access log.
///
/// A well-formed line looks like:
///
/// ```text
/// 2024-01-01T00:00:00Z 2024-01-01T00:00:01Z |<stdin...> out=100 err=5 exit=0
/// ```
///
/// The first two fields are the request's start and end timestamps, the last
/// three are the stdout length, stderr length, and exit code of the proxied
/// command.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Byte-offset span between the `|` delimiter and the `out=` marker.
    /// This is an offset delta, not a decoded payload length; it includes
    /// whatever separates the stdin field from the trailing tokens.
    pub stdin_len: i64,
    pub stdout_len: i64,
    pub stderr_len: i64,
    pub exit_code: i64,
}

impl LogRecord {
    /// Parse one raw log line.
    ///
    /// Field layout is fixed: the timestamps are positional from the front,
    /// the `out=`/`err=`/`exit=` tokens positional from the back, and the
    /// stdin span is located by the first `|` and first `out=` in the line.
    pub fn parse(line: &str) -> Result<LogRecord> {
        let parts: Vec<&str> = line.split(' ').collect();
        if parts.len() < 5 {
            return Err(ParseError::TooFewFields { found: parts.len() });
        }

        let start_time = parse_timestamp(parts[0])?;
        let end_time = parse_timestamp(parts[1])?;

        let pipe_at = line.find('|').ok_or(ParseError::MissingPipe)?;
        let out_at = line.find("out=").ok_or(ParseError::MissingOutMarker)?;

        let stdout_len = parse_tagged_int(parts[parts.len() - 3], "out=")?;
        let stderr_len = parse_tagged_int(parts[parts.len() - 2], "err=")?;
        let exit_code = parse_tagged_int(parts[parts.len() - 1], "exit=")?;

        Ok(LogRecord {
            start_time,
            end_time,
            stdin_len: out_at as i64 - pipe_at as i64,
            stdout_len,
            stderr_len,
            exit_code,
        })
    }

    /// Wall-clock span of the request in whole seconds.
    pub fn duration_seconds(&self) -> f64 {
        (self.end_time - self.start_time).num_seconds() as f64
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|source| ParseError::BadTimestamp {
            value: value.to_string(),
            source,
        })
}

fn parse_tagged_int(token: &str, prefix: &'static str) -> Result<i64> {
    let digits = token
        .strip_prefix(prefix)
        .ok_or(ParseError::MissingToken { expected: prefix })?;
    digits.parse().map_err(|_| ParseError::BadInteger {
        field: prefix,
        value: token.to_string(),
    })
}
