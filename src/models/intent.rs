use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Lunch,
}

impl TimeOfDay {
    /// Start and end hour of the window, end exclusive.
    pub fn hours(&self) -> (u32, u32) {
        match self {
            TimeOfDay::Morning => (9, 12),
            TimeOfDay::Afternoon => (12, 17),
            TimeOfDay::Evening => (17, 20),
            TimeOfDay::Lunch => (12, 13),
        }
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (start, end) = self.hours();
        write!(f, "{start:02}:00-{end:02}:00")
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    #[default]
    Normal,
    High,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    #[default]
    Neutral,
    Positive,
}

/// What a single free-text request asked for. Every field may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingIntent {
    pub service: Option<String>,
    pub preferred_time: Option<TimeOfDay>,
    pub date_preference: Option<NaiveDate>,
    pub urgency: Urgency,
    pub sentiment: Sentiment,
}
