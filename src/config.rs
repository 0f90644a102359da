use std::env;

use crate::services::slots::SlotCalendarConfig;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub admin_token: String,
    pub business_name: String,
    pub catalog_path: Option<String>,
    pub slots: SlotCalendarConfig,
    pub max_suggestions: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = SlotCalendarConfig::default();
        Self {
            port: parse_env("PORT").unwrap_or(3000),
            admin_token: env::var("ADMIN_TOKEN").unwrap_or_else(|_| "changeme".to_string()),
            business_name: env::var("BUSINESS_NAME").unwrap_or_else(|_| "Booking".to_string()),
            catalog_path: env::var("CATALOG_PATH").ok().filter(|p| !p.is_empty()),
            slots: SlotCalendarConfig {
                horizon_days: parse_env("SLOT_HORIZON_DAYS").unwrap_or(defaults.horizon_days),
                day_start_hour: parse_env("DAY_START_HOUR").unwrap_or(defaults.day_start_hour),
                day_end_hour: parse_env("DAY_END_HOUR").unwrap_or(defaults.day_end_hour),
                granularity_minutes: parse_env("SLOT_GRANULARITY_MINUTES")
                    .unwrap_or(defaults.granularity_minutes),
                lead_time_minutes: parse_env("BOOKING_LEAD_MINUTES")
                    .unwrap_or(defaults.lead_time_minutes),
            },
            max_suggestions: parse_env("MAX_SUGGESTIONS").unwrap_or(6),
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
