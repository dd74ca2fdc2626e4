use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};

use crate::config::Config;
use crate::error::ShellError;

/// ~/.local/share/ushell, if HOME is set.
fn data_dir() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    Some(PathBuf::from(home).join(".local/share/ushell"))
}

/// Install the diagnostic logger writing to ~/.local/share/ushell/ushell.log.
/// Best-effort: failures are silently ignored (logging must never block the shell).
pub fn init(config: &Config) {
    let level = config
        .settings
        .log_level
        .parse::<LevelFilter>()
        .unwrap_or(LevelFilter::Warn);
    if level == LevelFilter::Off {
        return;
    }
    let Some(dir) = data_dir() else {
        return;
    };
    let _ = std::fs::create_dir_all(&dir);
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("ushell.log"))
    else {
        return;
    };
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let _ = WriteLogger::init(level, log_config, file);
}

/// Append a history record to ~/.local/share/ushell/history.log.
/// Best-effort, like [`init`].
pub fn log_command(line: &str, result: &Result<(), ShellError>) {
    let Some(dir) = data_dir() else {
        return;
    };
    let _ = std::fs::create_dir_all(&dir);
    let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("history.log"))
    else {
        return;
    };
    let _ = writeln!(file, "{}", history_record(&timestamp_now(), line, result));
}

/// One tab-separated history line: timestamp, status, command, message.
fn history_record(ts: &str, line: &str, result: &Result<(), ShellError>) -> String {
    let (status, message) = match result {
        Ok(()) => ("ok", String::new()),
        Err(e) => ("error", e.to_string().replace('\n', "; ")),
    };
    let line: String = line.chars().take(200).collect();
    format!("{ts}\t{status}\t{line}\t{message}")
}

/// Simple UTC timestamp without external deps.
fn timestamp_now() -> String {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format_timestamp(secs)
}

fn format_timestamp(secs: u64) -> String {
    let rem = secs % 86400;
    let (h, m, s) = (rem / 3600, (rem % 3600) / 60, rem % 60);
    let (year, month, day) = civil_from_days(secs / 86400);
    format!("{year:04}-{month:02}-{day:02}T{h:02}:{m:02}:{s:02}Z")
}

/// Days since the Unix epoch to a (year, month, day) civil date.
fn civil_from_days(days: u64) -> (u64, u64, u64) {
    let z = days + 719_468;
    let era = z / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + u64::from(month <= 2);
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_start() {
        assert_eq!(format_timestamp(0), "1970-01-01T00:00:00Z");
    }

    #[test]
    fn leap_day() {
        // 2024-02-29 12:34:56 UTC
        assert_eq!(format_timestamp(1_709_210_096), "2024-02-29T12:34:56Z");
    }

    #[test]
    fn record_ok() {
        let rec = history_record("T", "echo hi", &Ok(()));
        assert_eq!(rec, "T\tok\techo hi\t");
    }

    #[test]
    fn record_error() {
        let err = Err(ShellError::UnknownApp("frob".into()));
        let rec = history_record("T", "frob x", &err);
        assert_eq!(rec, "T\terror\tfrob x\tfrob: unknown application");
    }
}
