//! Warnings surfaced alongside command output.
//!
//! These never block an operation; they tell the user the free tier is
//! running out, or that stored data could not be restored.

use crate::error::StoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// One active slot left before new logs are refused.
    QuotaNearlyReached { active: usize, limit: usize },
    /// No new logs can be created until one is marked as reviewing its outcome.
    QuotaReached { active: usize, limit: usize },
    /// The stored collection could not be restored and the store started empty.
    StoredDataDiscarded { reason: String },
    /// A copy of the unreadable data was kept under another slot key.
    StoredDataPreserved { backup: String },
}

/// Quota warnings for `active` logs against `limit`
pub fn check_quota(active: usize, limit: usize) -> Vec<Warning> {
    let mut warnings = Vec::new();

    if active >= limit {
        warnings.push(Warning::QuotaReached { active, limit });
    } else if active + 1 == limit {
        warnings.push(Warning::QuotaNearlyReached { active, limit });
    }

    warnings
}

pub fn from_load_error(err: &StoreError) -> Warning {
    Warning::StoredDataDiscarded {
        reason: err.to_string(),
    }
}

/// Format a warning for display.
pub fn format_warning(warning: &Warning) -> String {
    match warning {
        Warning::QuotaNearlyReached { active, limit } => {
            format!(
                "Warning: {} of {} active decision logs used - one left on the free tier",
                active, limit
            )
        }
        Warning::QuotaReached { active, limit } => {
            format!(
                "Warning: {} of {} active decision logs used - mark a decision as \
                 'reviewing-outcome' to free a slot",
                active, limit
            )
        }
        Warning::StoredDataDiscarded { reason } => {
            format!("Warning: stored decision logs could not be loaded ({})", reason)
        }
        Warning::StoredDataPreserved { backup } => {
            format!("Warning: a copy of the unreadable data was kept as '{}'", backup)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_warnings_with_room() {
        assert!(check_quota(0, 3).is_empty());
        assert!(check_quota(1, 3).is_empty());
    }

    #[test]
    fn test_nearly_reached() {
        let warnings = check_quota(2, 3);
        assert_eq!(warnings, vec![Warning::QuotaNearlyReached { active: 2, limit: 3 }]);
    }

    #[test]
    fn test_reached_and_overflow() {
        assert_eq!(check_quota(3, 3), vec![Warning::QuotaReached { active: 3, limit: 3 }]);
        match &check_quota(5, 3)[0] {
            Warning::QuotaReached { active, .. } => assert_eq!(*active, 5),
            _ => panic!("Expected QuotaReached warning"),
        }
    }

    #[test]
    fn test_format_quota_reached() {
        let msg = format_warning(&Warning::QuotaReached { active: 3, limit: 3 });
        assert!(msg.contains("3 of 3"));
        assert!(msg.contains("reviewing-outcome"));
    }

    #[test]
    fn test_load_error_warning() {
        let err = StoreError::DeserializationFailure("expected value at line 1".to_string());
        let msg = format_warning(&from_load_error(&err));
        assert!(msg.contains("could not be loaded"));
        assert!(msg.contains("expected value at line 1"));

        let msg = format_warning(&Warning::StoredDataPreserved {
            backup: "resolve_decision_logs.bak".to_string(),
        });
        assert!(msg.contains("'resolve_decision_logs.bak'"));
    }
}
