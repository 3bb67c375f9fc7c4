//! Review reminders for pending decisions.
//!
//! Scheduling is delegated to a [`ReminderScheduler`], the stand-in for a
//! device notification service. Failures stay on this side of the seam: they
//! are logged and reported as a [`ReminderOutcome`], never as a store error.

mod outbox;

pub use outbox::{ReminderOutbox, REMINDERS_FILE};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entity::{DecisionLog, LogStatus};

pub const REMINDER_TITLE: &str = "Decision Reminder";
pub const DEFAULT_REMINDER_DAYS: i64 = 7;
pub const MAX_REMINDER_DAYS: i64 = 3650;

/// Whether a device capability can be used right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Available,
    Unavailable,
    PermissionDenied,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capability::Available => write!(f, "available"),
            Capability::Unavailable => write!(f, "unavailable"),
            Capability::PermissionDenied => write!(f, "permission denied"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub title: String,
    pub body: String,
    pub fire_at: DateTime<Utc>,
}

#[derive(Error, Debug)]
pub enum ReminderError {
    #[error("Notifications are {0}")]
    NotPermitted(Capability),

    #[error("Reminder delay must be between 1 and {max} days (got {0})", max = MAX_REMINDER_DAYS)]
    InvalidDelay(i64),

    #[error("Failed to schedule reminder: {0}")]
    Schedule(String),
}

pub trait ReminderScheduler {
    fn capability(&self) -> Capability;

    fn schedule(&mut self, reminder: &Reminder) -> Result<(), ReminderError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderOutcome {
    Scheduled(Reminder),
    Skipped(String),
    Failed(String),
}

/// The review reminder for `log`, or `None` once a decision has been made
///
/// `days` must lie in `1..=MAX_REMINDER_DAYS`.
pub fn review_reminder(
    log: &DecisionLog,
    now: DateTime<Utc>,
    days: i64,
) -> Result<Option<Reminder>, ReminderError> {
    if log.status != LogStatus::Pending {
        return Ok(None);
    }
    if !(1..=MAX_REMINDER_DAYS).contains(&days) {
        return Err(ReminderError::InvalidDelay(days));
    }
    let fire_at = Duration::try_days(days)
        .and_then(|delay| now.checked_add_signed(delay))
        .ok_or(ReminderError::InvalidDelay(days))?;

    Ok(Some(Reminder {
        title: REMINDER_TITLE.to_string(),
        body: format!("Don't forget to review your decision: {}", log.title),
        fire_at,
    }))
}

pub fn schedule_review_reminder<R: ReminderScheduler + ?Sized>(
    scheduler: &mut R,
    log: &DecisionLog,
    now: DateTime<Utc>,
    days: i64,
) -> ReminderOutcome {
    let reminder = match review_reminder(log, now, days) {
        Ok(Some(reminder)) => reminder,
        Ok(None) => {
            return ReminderOutcome::Skipped(format!(
                "reminders are only set for pending decisions (status is {})",
                log.status
            ));
        }
        Err(e) => {
            tracing::warn!(id = %log.id, error = %e, "rejected review reminder");
            return ReminderOutcome::Failed(e.to_string());
        }
    };

    match scheduler.capability() {
        Capability::Available => {}
        Capability::Unavailable => {
            return ReminderOutcome::Skipped("notifications are unavailable".to_string());
        }
        Capability::PermissionDenied => {
            tracing::warn!(id = %log.id, "notification permission denied");
            return ReminderOutcome::Failed(
                ReminderError::NotPermitted(Capability::PermissionDenied).to_string(),
            );
        }
    }

    match scheduler.schedule(&reminder) {
        Ok(()) => {
            tracing::debug!(id = %log.id, fire_at = %reminder.fire_at, "scheduled review reminder");
            ReminderOutcome::Scheduled(reminder)
        }
        Err(e) => {
            tracing::warn!(id = %log.id, error = %e, "failed to schedule review reminder");
            ReminderOutcome::Failed(e.to_string())
        }
    }
}
