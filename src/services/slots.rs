use chrono::{Datelike, Days, Duration, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::Slot;

const MAX_HORIZON_DAYS: u32 = 366;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotCalendarConfig {
    pub horizon_days: u32,
    pub day_start_hour: u32,
    pub day_end_hour: u32,
    pub granularity_minutes: u32,
    /// Minimum notice between "now" and the earliest bookable slot.
    pub lead_time_minutes: u32,
}

impl Default for SlotCalendarConfig {
    fn default() -> Self {
        Self {
            horizon_days: 7,
            day_start_hour: 9,
            day_end_hour: 17,
            granularity_minutes: 30,
            lead_time_minutes: 60,
        }
    }
}

impl SlotCalendarConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.horizon_days == 0 || self.horizon_days > MAX_HORIZON_DAYS {
            anyhow::bail!(
                "horizon_days must be between 1 and {MAX_HORIZON_DAYS}, got {}",
                self.horizon_days
            );
        }
        if self.granularity_minutes == 0 {
            anyhow::bail!("granularity_minutes must be positive");
        }
        if self.day_end_hour > 24 {
            anyhow::bail!("day_end_hour out of range: {}", self.day_end_hour);
        }
        if self.day_start_hour >= self.day_end_hour {
            anyhow::bail!(
                "day_start_hour ({}) must be before day_end_hour ({})",
                self.day_start_hour,
                self.day_end_hour
            );
        }
        let window_minutes = (self.day_end_hour - self.day_start_hour) * 60;
        if self.granularity_minutes > window_minutes {
            anyhow::bail!(
                "granularity_minutes ({}) exceeds the daily window of {window_minutes} minutes",
                self.granularity_minutes
            );
        }
        Ok(())
    }
}

/// Produces the bookable start times for the coming horizon.
#[derive(Debug, Clone)]
pub struct SlotCalendar {
    config: SlotCalendarConfig,
}

impl SlotCalendar {
    pub fn new(config: SlotCalendarConfig) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SlotCalendarConfig {
        &self.config
    }

    /// Every grid mark inside the daily window on weekdays, starting with
    /// `now`'s date, that lies strictly after `now + lead_time`.
    pub fn generate(&self, now: NaiveDateTime) -> Vec<Slot> {
        let cutoff = now + Duration::minutes(i64::from(self.config.lead_time_minutes));
        let day_start = self.config.day_start_hour * 60;
        let day_end = self.config.day_end_hour * 60;

        let mut slots = Vec::new();
        for offset in 0..self.config.horizon_days {
            let Some(date) = now.date().checked_add_days(Days::new(u64::from(offset))) else {
                break;
            };
            if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                continue;
            }

            let mut minute = day_start;
            while minute < day_end {
                if let Some(time) = NaiveTime::from_hms_opt(minute / 60, minute % 60, 0) {
                    let starts_at = date.and_time(time);
                    if starts_at > cutoff {
                        slots.push(Slot::new(starts_at));
                    }
                }
                minute += self.config.granularity_minutes;
            }
        }

        slots.sort();
        slots.dedup();
        slots
    }
}
