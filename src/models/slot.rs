use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A bookable start time. Whether it is taken is decided by the ledger.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Slot(NaiveDateTime);

impl Slot {
    pub fn new(starts_at: NaiveDateTime) -> Self {
        Self(starts_at)
    }

    pub fn starts_at(&self) -> NaiveDateTime {
        self.0
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    pub fn time(&self) -> NaiveTime {
        self.0.time()
    }

    /// Long form used in confirmations, e.g. "Tuesday, June 17, 2025 at 09:00".
    pub fn to_human_readable(&self) -> String {
        self.0.format("%A, %B %d, %Y at %H:%M").to_string()
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M"))
    }
}
