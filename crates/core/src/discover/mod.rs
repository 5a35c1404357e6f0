//! Bounded file discovery and candidate classification.
//!
//! Walks one run directory breadth-first, pruning well-known non-informative
//! directories, and stops once the file cap is reached (remaining files are
//! silently not considered). Candidates are classified by filename heuristics
//! into timeseries, summary, config, and image candidates.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

/// Directories pruned from descent: version control, caches, dependencies.
const IGNORED_DIR_NAMES: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "__pycache__",
    ".mypy_cache",
    ".pytest_cache",
    ".ruff_cache",
    "node_modules",
    ".venv",
    "venv",
    ".idea",
    ".vscode",
];

const IMAGE_EXTS: &[&str] = &["png", "jpg", "jpeg", "gif", "svg"];

/// Directory names that mark images as probably meaningful.
const IMAGE_DIR_HINTS: &[&str] = &["plots", "figures", "images", "rollouts", "media", "videos"];

const TIMESERIES_NAME_TOKENS: &[&str] = &["metrics", "history", "progress"];
const SUMMARY_NAME_TOKENS: &[&str] = &["summary", "results", "eval"];

/// Exact basenames accepted as config candidates.
const CONFIG_BASENAMES: &[&str] = &[
    "config.json",
    "args.json",
    "hparams.json",
    "params.json",
    "run_config.json",
    "config.toml",
    "args.toml",
    "hparams.toml",
    "params.toml",
    "run_config.toml",
];

const PREFERRED_TIMESERIES: &[&str] = &["metrics.jsonl", "metrics.csv", "history.csv", "progress.csv"];
const PREFERRED_SUMMARY: &[&str] = &["summary.json", "results.json", "eval.json"];
const PREFERRED_CONFIG: &[&str] = &[
    "config.json",
    "args.json",
    "hparams.json",
    "params.json",
    "config.toml",
    "args.toml",
    "params.toml",
];

/// The chosen candidate of each kind for one run directory.
#[derive(Debug, Clone, Default)]
pub struct RunFiles {
    pub timeseries: Option<PathBuf>,
    pub summary: Option<PathBuf>,
    pub config: Option<PathBuf>,
    /// Image candidates, best first, uncapped.
    pub images: Vec<PathBuf>,
}

/// Enumerate files breadth-first under `root`, bounded by `max_files`.
///
/// Unreadable directories are skipped; entries are visited in name order per
/// directory so the walk is deterministic.
pub fn scan_files(root: &Path, max_files: usize) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut queue: VecDeque<PathBuf> = VecDeque::new();
    queue.push_back(root.to_path_buf());

    while let Some(dir) = queue.pop_front() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };
        let mut entries: Vec<fs::DirEntry> = entries.flatten().collect();
        entries.sort_by_key(fs::DirEntry::file_name);

        for entry in entries {
            let file_type = match entry.file_type() {
                Ok(t) => t,
                Err(_) => continue,
            };
            if file_type.is_dir() {
                let name = entry.file_name();
                let name = name.to_string_lossy();
                if IGNORED_DIR_NAMES.contains(&name.as_ref()) {
                    tracing::debug!(dir = %name, "pruned directory from discovery");
                    continue;
                }
                queue.push_back(entry.path());
            } else if file_type.is_file() {
                if files.len() >= max_files {
                    tracing::debug!(max_files, "file discovery cap reached");
                    return files;
                }
                files.push(entry.path());
            }
        }
    }
    files
}

/// Classify discovered files into the per-kind chosen candidates.
pub fn classify_files(root: &Path, files: &[PathBuf]) -> RunFiles {
    let mut timeseries = Vec::new();
    let mut summary = Vec::new();
    let mut config = Vec::new();

    for path in files {
        let name = lower_name(path);
        if (name.ends_with(".jsonl") || name.ends_with(".csv"))
            && TIMESERIES_NAME_TOKENS.iter().any(|t| name.contains(t))
        {
            timeseries.push(path.clone());
        } else if name.ends_with(".json") && SUMMARY_NAME_TOKENS.iter().any(|t| name.contains(t)) {
            summary.push(path.clone());
        }
        if CONFIG_BASENAMES.contains(&name.as_str()) {
            config.push(path.clone());
        }
    }

    RunFiles {
        timeseries: prefer(root, timeseries, PREFERRED_TIMESERIES),
        summary: prefer(root, summary, PREFERRED_SUMMARY),
        config: prefer(root, config, PREFERRED_CONFIG),
        images: rank_images(files),
    }
}

/// Pick one candidate: exact preferred name first, otherwise shallowest path,
/// then smallest file.
fn prefer(root: &Path, candidates: Vec<PathBuf>, preferred_names: &[&str]) -> Option<PathBuf> {
    if candidates.is_empty() {
        return None;
    }
    for preferred in preferred_names {
        if let Some(hit) = candidates.iter().find(|p| lower_name(p) == *preferred) {
            return Some(hit.clone());
        }
    }
    candidates
        .into_iter()
        .min_by_key(|p| (path_depth(root, p), file_size(p)))
}

/// Rank image candidates: likely-visual subdirectories first, then descending
/// file size as a tie-break signal of "probably meaningful".
pub fn rank_images(files: &[PathBuf]) -> Vec<PathBuf> {
    let mut candidates: Vec<(i32, u64, &PathBuf)> = Vec::new();
    for path in files {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if !IMAGE_EXTS.contains(&ext.as_str()) {
            continue;
        }
        let size = match fs::metadata(path) {
            Ok(meta) => meta.len(),
            Err(_) => continue,
        };
        let in_visual_dir = path.components().any(|part| {
            let part = part.as_os_str().to_string_lossy().to_lowercase();
            IMAGE_DIR_HINTS.contains(&part.as_str())
        });
        let priority = if in_visual_dir { -2 } else { 0 };
        candidates.push((priority, size, path));
    }
    candidates.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)).then(a.2.cmp(b.2)));
    candidates.into_iter().map(|(_, _, p)| p.clone()).collect()
}

fn lower_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

fn path_depth(root: &Path, path: &Path) -> usize {
    path.strip_prefix(root)
        .map(|rel| rel.components().count())
        .unwrap_or(usize::MAX)
}

fn file_size(path: &Path) -> u64 {
    fs::metadata(path).map(|m| m.len()).unwrap_or(u64::MAX)
}
