use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{KeyFactor, LogId, LogStatus};
use crate::error::StoreError;

pub const MAX_GUT_FEELING: u8 = 100;

/// A single recorded decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionLog {
    pub id: LogId,
    pub title: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub gut_feeling: u8,
    pub key_factors: Vec<KeyFactor>,
    pub status: LogStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DecisionLog {
    pub(crate) fn from_input(id: LogId, input: NewDecisionLog, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: input.title,
            pros: input.pros,
            cons: input.cons,
            gut_feeling: input.gut_feeling,
            key_factors: KeyFactor::dedup(input.key_factors),
            status: input.status,
            reflection: input.reflection,
            outcome: input.outcome,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Merge a partial update over this log and refresh `updated_at`
    pub(crate) fn apply(&mut self, update: DecisionLogUpdate, now: DateTime<Utc>) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(pros) = update.pros {
            self.pros = pros;
        }
        if let Some(cons) = update.cons {
            self.cons = cons;
        }
        if let Some(gut_feeling) = update.gut_feeling {
            self.gut_feeling = gut_feeling;
        }
        if let Some(key_factors) = update.key_factors {
            self.key_factors = KeyFactor::dedup(key_factors);
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(reflection) = update.reflection {
            self.reflection = reflection;
        }
        if let Some(outcome) = update.outcome {
            self.outcome = outcome;
        }
        self.updated_at = now;
    }
}

/// Input for creating a decision log; the store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewDecisionLog {
    pub title: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub gut_feeling: u8,
    pub key_factors: Vec<KeyFactor>,
    pub status: LogStatus,
    pub reflection: Option<String>,
    pub outcome: Option<String>,
}

impl NewDecisionLog {
    pub fn new(title: impl Into<String>, key_factors: Vec<KeyFactor>) -> Self {
        Self {
            title: title.into(),
            gut_feeling: 50,
            key_factors,
            ..Self::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<(), StoreError> {
        validate_title(&self.title)?;
        validate_lines("pros", &self.pros)?;
        validate_lines("cons", &self.cons)?;
        validate_gut_feeling(self.gut_feeling)?;
        validate_key_factors(&self.key_factors)
    }
}

/// Partial update payload
///
/// `reflection` and `outcome` use `Some(None)` to clear and
/// `Some(Some(text))` to set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecisionLogUpdate {
    pub title: Option<String>,
    pub pros: Option<Vec<String>>,
    pub cons: Option<Vec<String>>,
    pub gut_feeling: Option<u8>,
    pub key_factors: Option<Vec<KeyFactor>>,
    pub status: Option<LogStatus>,
    pub reflection: Option<Option<String>>,
    pub outcome: Option<Option<String>>,
}

impl DecisionLogUpdate {
    pub fn status(status: LogStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<(), StoreError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(pros) = &self.pros {
            validate_lines("pros", pros)?;
        }
        if let Some(cons) = &self.cons {
            validate_lines("cons", cons)?;
        }
        if let Some(gut_feeling) = self.gut_feeling {
            validate_gut_feeling(gut_feeling)?;
        }
        if let Some(key_factors) = &self.key_factors {
            validate_key_factors(key_factors)?;
        }
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<(), StoreError> {
    if title.trim().is_empty() {
        return Err(StoreError::InvalidInput {
            field: "title",
            message: "must not be empty".to_string(),
        });
    }
    Ok(())
}

fn validate_lines(field: &'static str, lines: &[String]) -> Result<(), StoreError> {
    if let Some(pos) = lines.iter().position(|line| line.trim().is_empty()) {
        return Err(StoreError::InvalidInput {
            field,
            message: format!("line {} is empty", pos + 1),
        });
    }
    Ok(())
}

fn validate_gut_feeling(value: u8) -> Result<(), StoreError> {
    if value > MAX_GUT_FEELING {
        return Err(StoreError::InvalidInput {
            field: "gutFeeling",
            message: format!("{} is outside 0..={}", value, MAX_GUT_FEELING),
        });
    }
    Ok(())
}

fn validate_key_factors(factors: &[KeyFactor]) -> Result<(), StoreError> {
    if factors.is_empty() {
        return Err(StoreError::InvalidInput {
            field: "keyFactors",
            message: "at least one key factor is required".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn sample_log() -> DecisionLog {
        let mut input = NewDecisionLog::new("Job offer", vec![KeyFactor::Career]);
        input.pros = vec!["pay".to_string()];
        input.cons = vec!["commute".to_string()];
        input.gut_feeling = 70;
        DecisionLog::from_input(LogId::from("abc"), input, at(1_700_000_000))
    }

    #[test]
    fn test_serializes_with_original_field_names() {
        let log = sample_log();
        let json = serde_json::to_value(&log).unwrap();

        assert_eq!(json["gutFeeling"], 70);
        assert_eq!(json["keyFactors"][0], "Career");
        assert_eq!(json["status"], "Pending");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("reflection").is_none());
        assert!(json.get("outcome").is_none());
    }

    #[test]
    fn test_deserializes_browser_written_document() {
        let raw = r#"{
            "id": "1700000000000abc123xyz",
            "title": "Move cities",
            "pros": ["sunshine"],
            "cons": [],
            "gutFeeling": 35,
            "keyFactors": ["Family", "Personal Growth"],
            "status": "Reviewing Outcome",
            "reflection": "Went with it",
            "createdAt": "2024-03-01T10:00:00.000Z",
            "updatedAt": "2024-04-01T10:00:00.000Z"
        }"#;
        let log: DecisionLog = serde_json::from_str(raw).unwrap();

        assert_eq!(log.status, LogStatus::ReviewingOutcome);
        assert_eq!(log.key_factors, vec![KeyFactor::Family, KeyFactor::PersonalGrowth]);
        assert_eq!(log.reflection.as_deref(), Some("Went with it"));
        assert!(log.outcome.is_none());
    }

    #[test]
    fn test_apply_merges_only_present_fields() {
        let mut log = sample_log();
        let before = log.clone();

        log.apply(DecisionLogUpdate::status(LogStatus::DecisionMade), at(1_700_000_100));

        assert_eq!(log.status, LogStatus::DecisionMade);
        assert_eq!(log.updated_at, at(1_700_000_100));
        assert_eq!(log.created_at, before.created_at);
        assert_eq!(log.title, before.title);
        assert_eq!(log.pros, before.pros);
    }

    #[test]
    fn test_apply_clears_reflection() {
        let mut log = sample_log();
        log.reflection = Some("thoughts".to_string());

        let update = DecisionLogUpdate {
            reflection: Some(None),
            ..Default::default()
        };
        log.apply(update, at(1_700_000_100));

        assert!(log.reflection.is_none());
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        let mut input = NewDecisionLog::new("  ", vec![KeyFactor::Career]);
        assert!(matches!(
            input.validate(),
            Err(StoreError::InvalidInput { field: "title", .. })
        ));

        input.title = "Ok".to_string();
        input.gut_feeling = 101;
        assert!(matches!(
            input.validate(),
            Err(StoreError::InvalidInput { field: "gutFeeling", .. })
        ));

        input.gut_feeling = 100;
        input.key_factors.clear();
        assert!(matches!(
            input.validate(),
            Err(StoreError::InvalidInput { field: "keyFactors", .. })
        ));

        input.key_factors = vec![KeyFactor::Health];
        input.cons = vec!["fine".to_string(), " ".to_string()];
        assert!(matches!(
            input.validate(),
            Err(StoreError::InvalidInput { field: "cons", .. })
        ));
    }

    #[test]
    fn test_update_validation_ignores_absent_fields() {
        assert!(DecisionLogUpdate::default().validate().is_ok());
        let update = DecisionLogUpdate {
            key_factors: Some(vec![]),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }
}
