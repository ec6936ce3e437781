use super::Notifier;
use std::path::{Path, PathBuf};

mod reporting;

/// Keeps every message so tests can assert on what the user would see.
#[derive(Debug, Default)]
struct RecordingNotifier {
    errors: Vec<String>,
    warnings: Vec<String>,
    infos: Vec<String>,
    successes: Vec<String>,
}

impl Notifier for RecordingNotifier {
    fn error(&mut self, message: &str) {
        self.errors.push(message.to_owned());
    }

    fn warning(&mut self, message: &str) {
        self.warnings.push(message.to_owned());
    }

    fn info(&mut self, message: &str) {
        self.infos.push(message.to_owned());
    }

    fn success(&mut self, message: &str) {
        self.successes.push(message.to_owned());
    }
}

fn write_csv(dir: &Path, name: &str, contents: &str) -> anyhow::Result<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, contents)?;
    Ok(path)
}

/// Epoch milliseconds for a wall-clock time.
fn millis(y: i32, m: u32, d: u32, h: u32, min: u32) -> i64 {
    chrono::NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, 0))
        .unwrap()
        .and_utc()
        .timestamp_millis()
}
