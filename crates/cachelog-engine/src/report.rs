use std::fmt;

/// Final totals of one scan, ready to print.
///
/// The line order and spelling of the rendered report are fixed; operators
/// diff these reports between runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// The configured stdin limit, when filtering was enabled.
    pub stdin_limit: Option<i64>,
    pub total_requests: u64,
    pub filtered_requests: u64,
    pub exit_nonzeroes: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub largest_stdout: i64,
    pub longest_duration: f64,
    /// Distinct stderr lengths, ascending.
    pub stderr_lens: Vec<i64>,
    /// Files whose stdout length strayed from their baseline, sorted by name.
    pub stdout_variations: Vec<String>,
}

/// Render `n` out of `total` as a percentage with one decimal place.
///
/// A zero denominator (no requests at all) renders as `0.0%` rather than
/// faulting.
pub fn percent(n: u64, total: u64) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", n as f64 * 100.0 / total as f64)
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(limit) = self.stdin_limit {
            writeln!(f, "stdin_limit {}", limit)?;
            writeln!(
                f,
                "filtered_requests {} {}",
                self.filtered_requests,
                percent(
                    self.filtered_requests,
                    self.total_requests + self.filtered_requests
                )
            )?;
        }
        writeln!(f, "total_requests {}", self.total_requests)?;
        writeln!(
            f,
            "cache_hits {} {}",
            self.cache_hits,
            percent(self.cache_hits, self.total_requests)
        )?;
        writeln!(
            f,
            "cache_misses {} {}",
            self.cache_misses,
            percent(self.cache_misses, self.total_requests)
        )?;
        writeln!(
            f,
            "exit_nonzeroes {} {}",
            self.exit_nonzeroes,
            percent(
                self.exit_nonzeroes,
                self.total_requests + self.filtered_requests + self.exit_nonzeroes
            )
        )?;
        writeln!(f, "largest_stdout {}", self.largest_stdout)?;
        writeln!(f, "longest_duration {:.1}", self.longest_duration)?;
        writeln!(f, "stderr patterns {}", join(&self.stderr_lens))?;
        write!(f, "stdout_variations {}", self.stdout_variations.join(" "))
    }
}

fn join(values: &[i64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_to_one_decimal() {
        assert_eq!(percent(1, 3), "33.3%");
        assert_eq!(percent(0, 5), "0.0%");
        assert_eq!(percent(1, 6), "16.7%");
        assert_eq!(percent(5, 5), "100.0%");
    }

    #[test]
    fn percent_of_zero_total_is_zero() {
        assert_eq!(percent(0, 0), "0.0%");
    }

    #[test]
    fn limit_lines_render_only_when_configured() {
        let mut report = Report {
            stdin_limit: None,
            total_requests: 1,
            filtered_requests: 0,
            exit_nonzeroes: 0,
            cache_hits: 0,
            cache_misses: 0,
            largest_stdout: 0,
            longest_duration: 0.0,
            stderr_lens: vec![],
            stdout_variations: vec![],
        };
        assert!(!report.to_string().contains("stdin_limit"));

        report.stdin_limit = Some(42);
        report.filtered_requests = 1;
        let rendered = report.to_string();
        assert!(rendered.starts_with("stdin_limit 42\nfiltered_requests 1 50.0%\n"));
    }
}
