//! Append-only run log (`cron.log`).

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render one log line, trailing newline included.
pub fn format_line(at: &DateTime<Local>, exit_code: i32) -> String {
    format!("[{}] Exit code: {exit_code}\n", at.format(TIMESTAMP_FORMAT))
}

/// Append `line` to the log at `path`, creating the file if absent.
///
/// The line goes out in a single `write_all` on an `O_APPEND` handle, so
/// concurrent runs interleave whole lines. The parent directory is not created.
pub fn append_line(path: &Path, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log {}", path.display()))?;
    file.write_all(line.as_bytes())
        .with_context(|| format!("append log {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs;

    #[test]
    fn line_has_timestamp_and_exit_code() {
        let at = Local
            .with_ymd_and_hms(2025, 3, 4, 5, 6, 7)
            .single()
            .expect("unambiguous local time");
        assert_eq!(format_line(&at, 1), "[2025-03-04 05:06:07] Exit code: 1\n");
    }

    #[test]
    fn creates_missing_log() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("cron.log");
        append_line(&path, "[t] Exit code: 0\n").expect("append");
        assert_eq!(fs::read_to_string(&path).expect("read"), "[t] Exit code: 0\n");
    }

    #[test]
    fn appends_after_existing_entries() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("cron.log");
        fs::write(&path, "[old] Exit code: 0\n").expect("seed");

        append_line(&path, "[new] Exit code: 2\n").expect("append");
        assert_eq!(
            fs::read_to_string(&path).expect("read"),
            "[old] Exit code: 0\n[new] Exit code: 2\n"
        );
    }

    #[test]
    fn missing_parent_dir_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("no-such-dir").join("cron.log");
        assert!(append_line(&path, "[t] Exit code: 0\n").is_err());
    }
}
