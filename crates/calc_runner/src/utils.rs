use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing::{debug, info};

/// Directory under the workspace root that collects saved reports
pub const RUNS_DIR: &str = ".calc_runs";

/// Saved reports kept besides `latest.json`
const KEEP_RUNS: usize = 50;

pub fn find_project_root() -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let mut dir = cwd.clone();
    loop {
        if dir.join("Cargo.toml").exists() {
            return Ok(dir);
        }
        if !dir.pop() {
            return Ok(cwd);
        }
    }
}

/// Write `json` as `<timestamp>.json` and `latest.json`, returning the
/// timestamped path.
pub fn save_report(timestamp: &str, json: &str) -> Result<PathBuf> {
    let runs_dir = find_project_root()?.join(RUNS_DIR);
    fs::create_dir_all(&runs_dir)
        .with_context(|| format!("failed to create {}", runs_dir.display()))?;

    let path = runs_dir.join(format!("{}.json", timestamp));
    fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
    fs::write(runs_dir.join("latest.json"), json).context("failed to write latest.json")?;

    cleanup_old_runs(&runs_dir, KEEP_RUNS)?;
    info!(path = %path.display(), "saved report");
    Ok(path)
}

fn cleanup_old_runs(dir: &Path, keep: usize) -> Result<()> {
    let mut files: Vec<_> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_name().to_string_lossy() != "latest.json"
                && e.path().extension().is_some_and(|x| x == "json")
        })
        .collect();

    if files.len() <= keep {
        return Ok(());
    }

    // Timestamps sort chronologically
    files.sort_by_key(|e| e.file_name());

    let to_remove = files.len() - keep;
    for entry in files.into_iter().take(to_remove) {
        debug!(path = %entry.path().display(), "removing old report");
        let _ = fs::remove_file(entry.path());
    }
    Ok(())
}

/// Unix seconds (for file names) and an ISO-8601 UTC rendering.
pub fn get_timestamps() -> Result<(String, String)> {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before the Unix epoch")?
        .as_secs();
    Ok((secs.to_string(), iso_utc(secs)))
}

fn iso_utc(secs: u64) -> String {
    let days = (secs / 86400) as i64;
    let time_of_day = secs % 86400;
    let (year, month, day) = civil_from_days(days);
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        year,
        month,
        day,
        time_of_day / 3600,
        (time_of_day % 3600) / 60,
        time_of_day % 60
    )
}

/// Proleptic Gregorian date of a day count since 1970-01-01
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}
