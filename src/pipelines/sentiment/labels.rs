use std::{fmt::Display, str::FromStr};

/// The label reported in place of a sentiment when the model is unavailable
pub static ERROR_LABEL: &str = "Error";

/// The three sentiment classes, in the model's class-id order
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Sentiment {
    /// Class id 0
    Negative,

    /// Class id 1
    Neutral,

    /// Class id 2
    Positive,
}

impl Sentiment {
    /// All classes in class-id order
    pub const ALL: [Sentiment; 3] = [Sentiment::Negative, Sentiment::Neutral, Sentiment::Positive];

    /// Map a class id to its sentiment
    pub fn from_id(id: usize) -> Option<Self> {
        Self::ALL.get(id).copied()
    }

    /// The class id of this sentiment
    pub fn id(&self) -> usize {
        match self {
            Sentiment::Negative => 0,
            Sentiment::Neutral => 1,
            Sentiment::Positive => 2,
        }
    }

    /// The display label
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
            Sentiment::Positive => "Positive",
        }
    }
}

impl Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = LabelError;

    /// Accepts class ids ("2", or "2.0" as written by float columns) and class names in English
    /// or Indonesian, ignoring case and surrounding whitespace
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_lowercase();

        let sentiment = match normalized.as_str() {
            "negative" | "negatif" => Some(Sentiment::Negative),
            "neutral" | "netral" => Some(Sentiment::Neutral),
            "positive" | "positif" => Some(Sentiment::Positive),
            other => other
                .parse::<f64>()
                .ok()
                .filter(|id| id.fract() == 0.0 && *id >= 0.0)
                .and_then(|id| Sentiment::from_id(id as usize)),
        };

        sentiment.ok_or_else(|| LabelError::Unknown(value.to_string()))
    }
}

/// Label Error
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum LabelError {
    /// The value names no known sentiment
    #[error("no sentiment found for {0:?}")]
    Unknown(String),
}
