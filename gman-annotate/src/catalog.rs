//! Installed-program catalog: the names a program list is built from.

use std::cmp::Ordering;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Directories scanned when none are configured.
pub const DEFAULT_DIRS: &[&str] = &["/bin", "/usr/bin", "/usr/local/bin", "/sbin", "/usr/sbin"];

pub fn default_dirs() -> Vec<PathBuf> {
    DEFAULT_DIRS.iter().map(PathBuf::from).collect()
}

/// File names found directly inside `dirs`, sorted and de-duplicated
/// without regard to case. Missing or unreadable directories are skipped.
pub fn scan(dirs: &[PathBuf]) -> Vec<String> {
    let mut names = Vec::new();
    for dir in dirs {
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "skipping missing program directory");
            continue;
        }
        match fs::read_dir(dir) {
            Ok(entries) => names.extend(
                entries
                    .flatten()
                    .filter(|entry| !entry.path().is_dir())
                    .filter_map(|entry| entry.file_name().into_string().ok()),
            ),
            Err(e) => warn!(dir = %dir.display(), error = %e, "cannot read program directory"),
        }
    }
    names.sort_by(|a, b| compare_ignore_case(a, b));
    names.dedup_by(|a, b| compare_ignore_case(a, b) == Ordering::Equal);
    debug!(programs = names.len(), "program catalog loaded");
    names
}

/// Names containing `query`, compared lower-cased. A blank query keeps all.
pub fn filter<'a>(names: &'a [String], query: &str) -> Vec<&'a str> {
    let query = query.trim().to_lowercase();
    names
        .iter()
        .map(String::as_str)
        .filter(|name| query.is_empty() || name.to_lowercase().contains(&query))
        .collect()
}

fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
