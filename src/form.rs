//! Presentation-side handling of raw decision-log input.
//!
//! A [`LogDraft`] holds what the user typed: pros and cons as free text with
//! one item per line, reflection and outcome possibly blank. Validating a
//! draft yields the clean input the store accepts.

use std::collections::BTreeMap;

use crate::entity::{
    DecisionLog, DecisionLogUpdate, KeyFactor, LogStatus, NewDecisionLog, MAX_GUT_FEELING,
};

/// Split newline-delimited text into trimmed, non-empty lines
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// User-facing text shown when the free tier is exhausted
pub fn quota_message(limit: usize) -> String {
    format!(
        "Free tier limit reached. You can only have {} active decision logs. \
         Please upgrade to Resolve+ for unlimited logs.",
        limit
    )
}

/// Field-keyed validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: BTreeMap<&'static str, String>,
}

impl FormErrors {
    fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<&str> = self.iter().map(|(_, message)| message).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl From<FormErrors> for crate::error::ResolveError {
    fn from(errors: FormErrors) -> Self {
        crate::error::ResolveError::Validation(errors.to_string())
    }
}

/// Raw, unvalidated form state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogDraft {
    pub title: String,
    pub pros: String,
    pub cons: String,
    pub gut_feeling: u8,
    pub key_factors: Vec<KeyFactor>,
    pub status: LogStatus,
    pub reflection: String,
    pub outcome: String,
}

impl Default for LogDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            pros: String::new(),
            cons: String::new(),
            gut_feeling: 50,
            key_factors: Vec::new(),
            status: LogStatus::Pending,
            reflection: String::new(),
            outcome: String::new(),
        }
    }
}

impl LogDraft {
    /// Pre-fill a draft for editing an existing log
    pub fn from_log(log: &DecisionLog) -> Self {
        Self {
            title: log.title.clone(),
            pros: log.pros.join("\n"),
            cons: log.cons.join("\n"),
            gut_feeling: log.gut_feeling,
            key_factors: log.key_factors.clone(),
            status: log.status,
            reflection: log.reflection.clone().unwrap_or_default(),
            outcome: log.outcome.clone().unwrap_or_default(),
        }
    }

    /// Reflection and outcome only make sense once a decision has been made
    pub fn shows_reflection_fields(&self) -> bool {
        self.status != LogStatus::Pending
    }

    pub fn toggle_key_factor(&mut self, factor: KeyFactor, checked: bool) {
        if checked {
            if !self.key_factors.contains(&factor) {
                self.key_factors.push(factor);
            }
        } else {
            self.key_factors.retain(|f| *f != factor);
        }
    }

    pub fn check(&self) -> FormErrors {
        let mut errors = FormErrors::default();

        if self.title.trim().is_empty() {
            errors.add("title", "Decision title is required");
        }
        if self.pros.trim().is_empty() && self.cons.trim().is_empty() {
            errors.add("proscons", "Please add at least one pro or con");
        }
        if self.key_factors.is_empty() {
            errors.add("keyFactors", "Please select at least one key factor");
        }
        if self.gut_feeling > MAX_GUT_FEELING {
            errors.add("gutFeeling", "Gut feeling must be between 0 and 100");
        }

        errors
    }

    /// Validate and convert into store input for a new log
    pub fn validate(&self) -> Result<NewDecisionLog, FormErrors> {
        let errors = self.check();
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewDecisionLog {
            title: self.title.trim().to_string(),
            pros: split_lines(&self.pros),
            cons: split_lines(&self.cons),
            gut_feeling: self.gut_feeling,
            key_factors: self.key_factors.clone(),
            status: self.status,
            reflection: non_blank(&self.reflection),
            outcome: non_blank(&self.outcome),
        })
    }

    /// Validate and convert into a full replacement update for an existing log
    pub fn into_update(self) -> Result<DecisionLogUpdate, FormErrors> {
        let input = self.validate()?;
        Ok(DecisionLogUpdate {
            title: Some(input.title),
            pros: Some(input.pros),
            cons: Some(input.cons),
            gut_feeling: Some(input.gut_feeling),
            key_factors: Some(input.key_factors),
            status: Some(input.status),
            reflection: Some(input.reflection),
            outcome: Some(input.outcome),
        })
    }
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
