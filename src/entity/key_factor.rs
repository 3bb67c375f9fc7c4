use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum KeyFactor {
    Career,
    Finance,
    Relationship,
    Health,
    Education,
    Family,
    #[serde(rename = "Personal Growth")]
    PersonalGrowth,
}

impl KeyFactor {
    pub const ALL: [KeyFactor; 7] = [
        KeyFactor::Career,
        KeyFactor::Finance,
        KeyFactor::Relationship,
        KeyFactor::Health,
        KeyFactor::Education,
        KeyFactor::Family,
        KeyFactor::PersonalGrowth,
    ];

    /// Drop repeated factors, keeping the first occurrence of each
    pub fn dedup(factors: Vec<KeyFactor>) -> Vec<KeyFactor> {
        let mut unique = Vec::with_capacity(factors.len());
        for factor in factors {
            if !unique.contains(&factor) {
                unique.push(factor);
            }
        }
        unique
    }
}

impl std::fmt::Display for KeyFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyFactor::Career => write!(f, "Career"),
            KeyFactor::Finance => write!(f, "Finance"),
            KeyFactor::Relationship => write!(f, "Relationship"),
            KeyFactor::Health => write!(f, "Health"),
            KeyFactor::Education => write!(f, "Education"),
            KeyFactor::Family => write!(f, "Family"),
            KeyFactor::PersonalGrowth => write!(f, "Personal Growth"),
        }
    }
}

impl std::str::FromStr for KeyFactor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "career" => Ok(KeyFactor::Career),
            "finance" => Ok(KeyFactor::Finance),
            "relationship" => Ok(KeyFactor::Relationship),
            "health" => Ok(KeyFactor::Health),
            "education" => Ok(KeyFactor::Education),
            "family" => Ok(KeyFactor::Family),
            "personal_growth" | "personalgrowth" | "growth" => Ok(KeyFactor::PersonalGrowth),
            _ => Err(format!("Invalid key factor: {}", s)),
        }
    }
}
