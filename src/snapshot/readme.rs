// src/snapshot/readme.rs
//! README index generation for snapshot

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::entity::{DecisionLog, LogStatus};
use crate::Result;

use super::utils::{format_date, format_timestamp, log_filename, write_snapshot_file};
use super::{SnapshotStats, LOGS_DIR};

fn status_section(logs: &[DecisionLog], status: LogStatus) -> String {
    let entries: Vec<(usize, &DecisionLog)> = logs
        .iter()
        .enumerate()
        .filter(|(_, log)| log.status == status)
        .collect();

    if entries.is_empty() {
        return String::new();
    }

    let mut section = format!("### {} ({})\n\n", status, entries.len());
    for (idx, log) in entries {
        section.push_str(&format!(
            "- [{}]({}/{}) - gut {}%, updated {}\n",
            log.title,
            LOGS_DIR,
            log_filename(idx + 1, log),
            log.gut_feeling,
            format_date(&log.updated_at)
        ));
    }
    section.push('\n');
    section
}

pub fn generate(
    logs: &[DecisionLog],
    snapshot_dir: &Path,
    stats: &SnapshotStats,
    now: DateTime<Utc>,
) -> Result<()> {
    let mut content = String::from("# Decision Journal\n\n");

    content.push_str(&format!(
        "{} decision logs, {} of {} active slots used.\n\n",
        stats.total,
        stats.active,
        stats.limit
    ));

    if logs.is_empty() {
        content.push_str("_No decisions logged yet._\n\n");
    } else {
        for status in LogStatus::ALL {
            content.push_str(&status_section(logs, status));
        }
    }

    content.push_str(&format!("---\n_Generated {}_\n", format_timestamp(&now)));

    write_snapshot_file(&snapshot_dir.join("README.md"), &content)
}
