// src/snapshot/utils.rs
//! Helpers shared by the snapshot writers

use std::fs;
use std::path::Path;

use crate::entity::DecisionLog;
use crate::Result;

const MAX_SLUG_LEN: usize = 60;

/// Convert a title to a URL-safe slug
///
/// ASCII alphanumerics are kept (lowercased); every other run of characters
/// becomes a single hyphen. The slug is capped at 60 characters so file names
/// stay within filesystem limits.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(c.to_ascii_lowercase());
            pending_hyphen = false;
        } else {
            pending_hyphen = true;
        }
    }

    // Slug is pure ASCII, so byte truncation is safe
    slug.truncate(MAX_SLUG_LEN);
    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.is_empty() {
        slug.push_str("untitled");
    }
    slug
}

/// File name of a log's snapshot: `{position:03}-{slug}.md`, position 1-based
pub fn log_filename(position: usize, log: &DecisionLog) -> String {
    format!("{:03}-{}.md", position, slugify(&log.title))
}

pub fn clear_snapshot_dir(snapshot_dir: &Path) -> Result<()> {
    if snapshot_dir.exists() {
        fs::remove_dir_all(snapshot_dir)?;
    }
    Ok(())
}

/// Write content to a file, creating parent directories if needed
pub fn write_snapshot_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

pub fn format_date(dt: &chrono::DateTime<chrono::Utc>) -> String {
    dt.format("%Y-%m-%d").to_string()
}

pub fn format_timestamp(dt: &chrono::DateTime<chrono::Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Job offer"), "job-offer");
        assert_eq!(slugify("Should I move to Berlin?"), "should-i-move-to-berlin");
    }

    #[test]
    fn test_slugify_collapses_and_trims() {
        assert_eq!(slugify("  --Buy   a house!!  "), "buy-a-house");
        assert_eq!(slugify("Café au lait"), "caf-au-lait");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify(""), "untitled");
        assert_eq!(slugify("???"), "untitled");
        assert_eq!(slugify("日本語"), "untitled");
    }

    #[test]
    fn test_format_helpers() {
        use chrono::TimeZone;
        let dt = chrono::Utc.with_ymd_and_hms(2024, 2, 29, 13, 5, 9).unwrap();
        assert_eq!(format_date(&dt), "2024-02-29");
        assert_eq!(format_timestamp(&dt), "2024-02-29 13:05:09 UTC");
    }

    #[test]
    fn test_slugify_caps_long_titles() {
        let slug = slugify(&"a".repeat(300));
        assert_eq!(slug.len(), MAX_SLUG_LEN);

        // A cut landing on a separator leaves no trailing hyphen
        let title = format!("{} tail", "b".repeat(MAX_SLUG_LEN));
        assert_eq!(slugify(&title), "b".repeat(MAX_SLUG_LEN));
        let title = format!("{} {}", "c".repeat(MAX_SLUG_LEN - 1), "d".repeat(10));
        assert_eq!(slugify(&title), "c".repeat(MAX_SLUG_LEN - 1));
    }
}
