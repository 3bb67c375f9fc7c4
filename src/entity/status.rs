use serde::{Deserialize, Serialize};

/// Life-cycle stage of a decision log.
///
/// Stages are ordered (Pending, DecisionMade, ReviewingOutcome) but the user
/// may move between them freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum LogStatus {
    #[default]
    Pending,
    #[serde(rename = "Decision Made")]
    DecisionMade,
    #[serde(rename = "Reviewing Outcome")]
    ReviewingOutcome,
}

impl LogStatus {
    pub const ALL: [LogStatus; 3] = [
        LogStatus::Pending,
        LogStatus::DecisionMade,
        LogStatus::ReviewingOutcome,
    ];

    /// Whether a log in this stage counts toward the free-tier quota
    pub fn is_active(self) -> bool {
        self != LogStatus::ReviewingOutcome
    }
}

impl std::fmt::Display for LogStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogStatus::Pending => write!(f, "Pending"),
            LogStatus::DecisionMade => write!(f, "Decision Made"),
            LogStatus::ReviewingOutcome => write!(f, "Reviewing Outcome"),
        }
    }
}

impl std::str::FromStr for LogStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "pending" => Ok(LogStatus::Pending),
            "decision_made" | "decisionmade" | "made" => Ok(LogStatus::DecisionMade),
            "reviewing_outcome" | "reviewingoutcome" | "reviewing" => {
                Ok(LogStatus::ReviewingOutcome)
            }
            _ => Err(format!(
                "Invalid status: {} (expected pending, decision-made or reviewing-outcome)",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_variants() {
        assert_eq!("pending".parse::<LogStatus>().unwrap(), LogStatus::Pending);
        assert_eq!("Decision Made".parse::<LogStatus>().unwrap(), LogStatus::DecisionMade);
        assert_eq!("decision-made".parse::<LogStatus>().unwrap(), LogStatus::DecisionMade);
        assert_eq!("made".parse::<LogStatus>().unwrap(), LogStatus::DecisionMade);
        assert_eq!(
            "reviewing_outcome".parse::<LogStatus>().unwrap(),
            LogStatus::ReviewingOutcome
        );
        assert!("done".parse::<LogStatus>().is_err());
    }

    #[test]
    fn test_status_wire_literals() {
        assert_eq!(
            serde_json::to_string(&LogStatus::ReviewingOutcome).unwrap(),
            "\"Reviewing Outcome\""
        );
        let parsed: LogStatus = serde_json::from_str("\"Decision Made\"").unwrap();
        assert_eq!(parsed, LogStatus::DecisionMade);
    }

    #[test]
    fn test_only_reviewing_outcome_is_inactive() {
        assert!(LogStatus::Pending.is_active());
        assert!(LogStatus::DecisionMade.is_active());
        assert!(!LogStatus::ReviewingOutcome.is_active());
    }
}
