use anyhow::{Context, Result};
use cachelog_engine::{Aggregate, FileState, Report, ScanOptions};
use cachelog_types::LogRecord;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Scan every log file in `dir` (non-recursive) and fold it into one report.
///
/// Files are visited in filename order and lines strictly in file order;
/// the first accepted record of each file becomes that file's baseline, so
/// reordering would change the hit/miss classification. Any unreadable or
/// malformed line aborts the scan before a report is produced.
pub fn scan_dir(dir: &Path, options: ScanOptions) -> Result<Report> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory {}", dir.display()))?
    {
        let entry = entry?;
        // Follows symlinks; only non-files (subdirectories and the like)
        // are skipped.
        if entry.path().is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();

    let mut agg = Aggregate::new(options);
    for name in &names {
        scan_file(&mut agg, dir, name)?;
    }
    Ok(agg.finish())
}

fn scan_file(agg: &mut Aggregate, dir: &Path, name: &str) -> Result<()> {
    let path = dir.join(name);
    let file = File::open(&path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut state = FileState::new(name);
    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read {}", path.display()))?;
        let line = line.trim_end();
        // A blank line marks the end of the useful portion of a file;
        // anything after it is ignored.
        if line.is_empty() {
            break;
        }
        let record = LogRecord::parse(line)
            .with_context(|| format!("malformed line {} in {}", index + 1, path.display()))?;
        agg.fold(&mut state, &record);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cachelog_testing::LogDir;

    #[test]
    fn folds_all_files_in_name_order() {
        let dir = LogDir::new();
        dir.write_log(
            "a.log",
            &[
                "2024-03-05T10:00:00Z 2024-03-05T10:00:02Z |abc out=100 err=0 exit=0",
                "2024-03-05T10:00:03Z 2024-03-05T10:00:04Z |abc out=100 err=0 exit=0",
            ],
        );
        dir.write_log(
            "b.log",
            &["2024-03-05T11:00:00Z 2024-03-05T11:00:01Z |abc out=50 err=2 exit=0"],
        );

        let report = scan_dir(dir.path(), ScanOptions::default()).unwrap();
        assert_eq!(report.total_requests, 3);
        assert_eq!(report.cache_hits, 1);
        assert_eq!(report.stderr_lens, vec![0]);
    }

    #[test]
    fn blank_line_stops_the_file() {
        let dir = LogDir::new();
        dir.write_log(
            "a.log",
            &[
                "2024-03-05T10:00:00Z 2024-03-05T10:00:02Z |abc out=100 err=0 exit=0",
                "",
                "this is not a log line at all",
            ],
        );

        let report = scan_dir(dir.path(), ScanOptions::default()).unwrap();
        assert_eq!(report.total_requests, 1);
    }

    #[test]
    fn malformed_line_aborts_with_location() {
        let dir = LogDir::new();
        dir.write_log(
            "bad.log",
            &[
                "2024-03-05T10:00:00Z 2024-03-05T10:00:02Z |abc out=100 err=0 exit=0",
                "2024-03-05T10:00:03Z garbage |abc out=100 err=0 exit=0",
            ],
        );

        let err = scan_dir(dir.path(), ScanOptions::default()).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("line 2"), "unexpected error: {message}");
        assert!(message.contains("bad.log"), "unexpected error: {message}");
    }

    #[test]
    fn subdirectories_are_skipped() {
        let dir = LogDir::new();
        dir.write_log(
            "a.log",
            &["2024-03-05T10:00:00Z 2024-03-05T10:00:01Z |abc out=1 err=0 exit=0"],
        );
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let report = scan_dir(dir.path(), ScanOptions::default()).unwrap();
        assert_eq!(report.total_requests, 1);
    }

    #[test]
    fn empty_directory_yields_zero_report() {
        let dir = LogDir::new();
        let report = scan_dir(dir.path(), ScanOptions::default()).unwrap();
        assert_eq!(report.total_requests, 0);
        assert_eq!(report.exit_nonzeroes, 0);
    }
}
