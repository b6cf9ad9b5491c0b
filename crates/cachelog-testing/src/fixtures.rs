use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Temporary directory of log files for scanner and CLI tests.
///
/// The directory and its contents are removed when the fixture is dropped.
pub struct LogDir {
    temp: TempDir,
}

impl LogDir {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        LogDir {
            temp: TempDir::new().expect("failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Write a log file with one entry per line and a trailing newline.
    pub fn write_log<S: AsRef<str>>(&self, name: &str, lines: &[S]) {
        let mut body = String::new();
        for line in lines {
            body.push_str(line.as_ref());
            body.push('\n');
        }
        fs::write(self.temp.path().join(name), body).expect("failed to write log file");
    }
}

/// Build one well-formed request-log line.
pub fn request_line(start: &str, end: &str, stdin: &str, out: i64, err: i64, exit: i64) -> String {
    format!("{start} {end} |{stdin} out={out} err={err} exit={exit}")
}
