// src/snapshot/mod.rs
//! Snapshot generation module
//!
//! Generates human-readable markdown snapshots of the decision journal.
//! Snapshots are derived views; the store slot stays the source of truth.

mod decision_log;
mod readme;
pub mod utils;

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::entity::DecisionLog;
use crate::Result;

pub use self::utils::{format_date, format_timestamp, slugify};

pub const LOGS_DIR: &str = "logs";

/// Statistics about generated snapshot
#[derive(Debug, Default)]
pub struct SnapshotStats {
    pub total: usize,
    pub active: usize,
    pub limit: usize,
    pub files_generated: Vec<String>,
}

/// Result of generating a single snapshot file
pub struct GeneratedFile {
    pub relative_path: String,
}

/// Generate markdown snapshots for a collection of logs
///
/// This will:
/// 1. Clear the existing snapshot directory
/// 2. Write one file per log, numbered in insertion order
/// 3. Generate an index README.md
pub fn generate_snapshot(
    logs: &[DecisionLog],
    limit: usize,
    snapshot_dir: &Path,
    now: DateTime<Utc>,
) -> Result<SnapshotStats> {
    let mut stats = SnapshotStats {
        total: logs.len(),
        limit,
        active: logs.iter().filter(|log| log.is_active()).count(),
        ..SnapshotStats::default()
    };

    utils::clear_snapshot_dir(snapshot_dir)?;
    std::fs::create_dir_all(snapshot_dir.join(LOGS_DIR))?;

    let files = decision_log::generate(logs, snapshot_dir)?;
    stats.files_generated.extend(files.into_iter().map(|f| f.relative_path));

    // README last so it can use the final stats
    readme::generate(logs, snapshot_dir, &stats, now)?;
    stats.files_generated.push("README.md".to_string());

    Ok(stats)
}

/// Generate YAML frontmatter block
pub fn yaml_frontmatter<T: serde::Serialize>(data: &T) -> Result<String> {
    let yaml = serde_yaml::to_string(data)?;
    Ok(format!("---\n{}---\n", yaml))
}
