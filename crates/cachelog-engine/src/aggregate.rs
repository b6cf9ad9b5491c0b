use crate::report::Report;
use cachelog_types::LogRecord;
use std::collections::BTreeSet;

/// Relative stdout deviation from the file baseline above which a file is
/// flagged as varying.
const VARIATION_THRESHOLD: f64 = 0.1;

/// Knobs that affect which records are counted.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    /// Records whose stdin span exceeds this are counted as filtered
    /// instead of accepted. `None` disables filtering.
    pub stdin_limit: Option<i64>,
}

/// Per-file fold state.
///
/// The first accepted record in a file becomes its baseline: the reference
/// point for the cache hit/miss classification and the stdout-variation
/// check of every later record in the same file.
#[derive(Debug)]
pub struct FileState {
    name: String,
    baseline: Option<LogRecord>,
}

impl FileState {
    pub fn new(name: impl Into<String>) -> Self {
        FileState {
            name: name.into(),
            baseline: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Running totals for one scan.
///
/// An explicit value threaded through the fold; merging happens only here,
/// never through shared state. Line order within a file is significant
/// (baseline selection, hit/miss), so callers must fold records in the
/// order they were read.
#[derive(Debug)]
pub struct Aggregate {
    options: ScanOptions,
    total_requests: u64,
    filtered_requests: u64,
    exit_nonzeroes: u64,
    cache_hits: u64,
    cache_misses: u64,
    largest_stdout: i64,
    longest_duration: f64,
    stderr_lens: BTreeSet<i64>,
    stdout_variations: BTreeSet<String>,
}

impl Aggregate {
    pub fn new(options: ScanOptions) -> Self {
        Aggregate {
            options,
            total_requests: 0,
            filtered_requests: 0,
            exit_nonzeroes: 0,
            cache_hits: 0,
            cache_misses: 0,
            largest_stdout: 0,
            longest_duration: 0.0,
            stderr_lens: BTreeSet::new(),
            stdout_variations: BTreeSet::new(),
        }
    }

    /// Fold one record into the totals.
    ///
    /// Only zero-exit records are considered requests. The first accepted
    /// record of a file is stored as the baseline and contributes nothing
    /// beyond `total_requests`; every later accepted record is classified
    /// against it and feeds the extrema, the stderr set, and the
    /// variation set.
    pub fn fold(&mut self, file: &mut FileState, record: &LogRecord) {
        if record.exit_code != 0 {
            self.exit_nonzeroes += 1;
            return;
        }

        if let Some(limit) = self.options.stdin_limit {
            if record.stdin_len > limit {
                self.filtered_requests += 1;
                return;
            }
        }

        self.total_requests += 1;

        let Some(baseline) = &file.baseline else {
            file.baseline = Some(record.clone());
            return;
        };

        // A request that starts after the baseline finished never overlapped
        // the underlying work, so the cached result must have been reused.
        if record.start_time > baseline.end_time {
            self.cache_hits += 1;
        } else {
            self.cache_misses += 1;
        }

        if record.stdout_len > self.largest_stdout {
            self.largest_stdout = record.stdout_len;
        }
        let duration = record.duration_seconds();
        if duration > self.longest_duration {
            self.longest_duration = duration;
        }

        self.stderr_lens.insert(record.stderr_len);

        if deviates(baseline.stdout_len, record.stdout_len) {
            self.stdout_variations.insert(file.name.clone());
        }
    }

    pub fn finish(self) -> Report {
        Report {
            stdin_limit: self.options.stdin_limit,
            total_requests: self.total_requests,
            filtered_requests: self.filtered_requests,
            exit_nonzeroes: self.exit_nonzeroes,
            cache_hits: self.cache_hits,
            cache_misses: self.cache_misses,
            largest_stdout: self.largest_stdout,
            longest_duration: self.longest_duration,
            stderr_lens: self.stderr_lens.into_iter().collect(),
            stdout_variations: self.stdout_variations.into_iter().collect(),
        }
    }
}

/// Relative stdout deviation check against the file baseline.
///
/// A zero-length baseline makes the relative deviation unbounded, so any
/// differing stdout length counts as a variation in that case.
fn deviates(baseline: i64, current: i64) -> bool {
    if baseline == 0 {
        return current != 0;
    }
    (current - baseline).abs() as f64 / baseline as f64 > VARIATION_THRESHOLD
}
