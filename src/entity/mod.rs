mod decision_log;
mod key_factor;
mod status;

pub use decision_log::{DecisionLog, DecisionLogUpdate, NewDecisionLog, MAX_GUT_FEELING};
pub use key_factor::KeyFactor;
pub use status::LogStatus;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier of a decision log.
///
/// New ids are UUID v4 strings; ids read back from older data keep whatever
/// shape they were written with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogId(String);

impl LogId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First seven characters, for display
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(7) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl From<&str> for LogId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for LogId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for LogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
