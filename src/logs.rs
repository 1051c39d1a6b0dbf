//! # Log Reader
//!
//! Locates OpenClaw log sources and yields their lines.
//!
//! Two physical layouts exist: one `.ndjson`/`.jsonl` file per calendar day
//! under `<root>/logs`, and one `.jsonl` file per session under
//! `<root>/agents/main/sessions`. A missing file reads as empty and a file
//! that cannot be opened is skipped; a single bad source never fails the
//! run.

use chrono::NaiveDate;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Relative location of the per-session logs under the OpenClaw root.
pub const SESSIONS_SUBDIR: &str = "agents/main/sessions";

/// Resolve the per-day log for `date`. Tries the ndjson name, then jsonl,
/// then the temp-directory fallback some builds write to. When nothing
/// exists the primary candidate is returned and reads as zero lines.
pub fn day_log_path(root: &Path, date: NaiveDate) -> PathBuf {
    let stamp = date.format("%Y-%m-%d");
    let candidates = [
        root.join("logs").join(format!("openclaw-{stamp}.ndjson")),
        root.join("logs").join(format!("openclaw-{stamp}.jsonl")),
        PathBuf::from("/tmp/openclaw").join(format!("openclaw-{stamp}.log")),
    ];
    candidates
        .iter()
        .find(|p| p.exists())
        .cloned()
        .unwrap_or_else(|| candidates[0].clone())
}

/// All per-session `.jsonl` files under `dir`, lexically sorted so repeated
/// runs see the same record order. A missing directory yields nothing.
pub fn session_log_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("jsonl"))
        .collect();
    files.sort();
    files
}

/// Lazy line iterator over one file. Unreadable files and undecodable
/// lines are skipped rather than surfaced.
pub fn read_lines(path: &Path) -> impl Iterator<Item = String> + use<> {
    File::open(path)
        .ok()
        .map(BufReader::new)
        .into_iter()
        .flat_map(|reader| reader.lines().filter_map(Result::ok))
}
