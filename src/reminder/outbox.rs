use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use super::{Capability, Reminder, ReminderError, ReminderScheduler};

pub const REMINDERS_FILE: &str = "reminders.json";

/// File-backed reminder queue used by the CLI in place of a device
/// notification service. Reminders are kept sorted by fire time.
pub struct ReminderOutbox {
    path: PathBuf,
}

impl ReminderOutbox {
    pub fn new(resolve_dir: &Path) -> Self {
        Self {
            path: resolve_dir.join(REMINDERS_FILE),
        }
    }

    pub fn list(&self) -> Result<Vec<Reminder>, ReminderError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ReminderError::Schedule(e.to_string())),
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&raw).map_err(|e| ReminderError::Schedule(e.to_string()))
    }

    /// Reminders whose fire time has passed
    pub fn due(&self, now: DateTime<Utc>) -> Result<Vec<Reminder>, ReminderError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|r| r.fire_at <= now)
            .collect())
    }
}

impl ReminderScheduler for ReminderOutbox {
    fn capability(&self) -> Capability {
        let Some(dir) = self.path.parent() else {
            return Capability::Unavailable;
        };
        match fs::metadata(dir) {
            Ok(meta) if meta.permissions().readonly() => Capability::PermissionDenied,
            Ok(meta) if meta.is_dir() => Capability::Available,
            _ => Capability::Unavailable,
        }
    }

    fn schedule(&mut self, reminder: &Reminder) -> Result<(), ReminderError> {
        let mut reminders = self.list()?;
        if reminders.contains(reminder) {
            return Ok(());
        }
        reminders.push(reminder.clone());
        reminders.sort_by_key(|r| r.fire_at);

        let json = serde_json::to_string_pretty(&reminders)
            .map_err(|e| ReminderError::Schedule(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| ReminderError::Schedule(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    fn reminder(body: &str, fire_at: DateTime<Utc>) -> Reminder {
        Reminder {
            title: "Decision Reminder".to_string(),
            body: body.to_string(),
            fire_at,
        }
    }

    #[test]
    fn test_empty_outbox() {
        let tmp = TempDir::new().unwrap();
        let outbox = ReminderOutbox::new(tmp.path());
        assert!(outbox.list().unwrap().is_empty());
        assert_eq!(outbox.capability(), Capability::Available);
    }

    #[test]
    fn test_missing_directory_is_unavailable() {
        let tmp = TempDir::new().unwrap();
        let outbox = ReminderOutbox::new(&tmp.path().join("nope"));
        assert_eq!(outbox.capability(), Capability::Unavailable);
    }

    #[test]
    fn test_schedule_keeps_reminders_sorted_and_unique() {
        let tmp = TempDir::new().unwrap();
        let mut outbox = ReminderOutbox::new(tmp.path());
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        outbox.schedule(&reminder("later", base + Duration::days(7))).unwrap();
        outbox.schedule(&reminder("sooner", base + Duration::days(1))).unwrap();
        outbox.schedule(&reminder("sooner", base + Duration::days(1))).unwrap();

        let listed = outbox.list().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].body, "sooner");
        assert_eq!(listed[1].body, "later");

        let due = outbox.due(base + Duration::days(2)).unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].body, "sooner");
    }

    #[test]
    fn test_corrupt_outbox_reports_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(REMINDERS_FILE), "not json").unwrap();
        let outbox = ReminderOutbox::new(tmp.path());
        assert!(outbox.list().is_err());
    }
}
