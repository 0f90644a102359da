use std::sync::Arc;

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::models::{BookingIntent, Sentiment, TimeOfDay, Urgency};
use crate::services::catalog::ServiceCatalog;
use crate::services::clock::Clock;

const TIME_PHRASES: &[(&str, TimeOfDay)] = &[
    ("morning", TimeOfDay::Morning),
    ("afternoon", TimeOfDay::Afternoon),
    ("evening", TimeOfDay::Evening),
    ("lunch", TimeOfDay::Lunch),
];

#[derive(Debug, Clone, Copy)]
enum DatePhrase {
    Tomorrow,
    Next(Weekday),
    NextWeek,
}

const DATE_PHRASES: &[(&str, DatePhrase)] = &[
    ("tomorrow", DatePhrase::Tomorrow),
    ("monday", DatePhrase::Next(Weekday::Mon)),
    ("tuesday", DatePhrase::Next(Weekday::Tue)),
    ("wednesday", DatePhrase::Next(Weekday::Wed)),
    ("thursday", DatePhrase::Next(Weekday::Thu)),
    ("friday", DatePhrase::Next(Weekday::Fri)),
    ("next week", DatePhrase::NextWeek),
];

const URGENCY_WORDS: &[&str] = &["urgent", "asap", "emergency", "quick", "soon"];
const POLITE_WORDS: &[&str] = &["please", "thank", "appreciate", "would like"];

impl DatePhrase {
    fn resolve(self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            DatePhrase::Tomorrow => today.checked_add_days(Days::new(1)),
            DatePhrase::Next(weekday) => today.checked_add_days(Days::new(days_until(today, weekday))),
            DatePhrase::NextWeek => today.checked_add_days(Days::new(7)),
        }
    }
}

/// Days until the next occurrence of `weekday`, never zero: asking for
/// "monday" on a Monday means the following week.
fn days_until(today: NaiveDate, weekday: Weekday) -> u64 {
    let target = i64::from(weekday.num_days_from_monday());
    let current = i64::from(today.weekday().num_days_from_monday());
    let ahead = target - current;
    if ahead <= 0 {
        (ahead + 7) as u64
    } else {
        ahead as u64
    }
}

/// Keyword matcher that turns a free-text request into a [`BookingIntent`].
///
/// Matching is literal substring search on the lowercased text. When several
/// phrases of one table match, the one appearing first in the text wins;
/// phrases starting at the same position fall back to table order.
pub struct IntentParser {
    services: Vec<String>,
    clock: Arc<dyn Clock>,
}

impl IntentParser {
    pub fn new(catalog: &ServiceCatalog, clock: Arc<dyn Clock>) -> Self {
        Self {
            services: catalog.names().into_iter().map(str::to_string).collect(),
            clock,
        }
    }

    pub fn parse(&self, text: &str) -> BookingIntent {
        self.parse_on(text, self.clock.now().date())
    }

    /// Same as [`parse`](Self::parse) with relative dates resolved against `today`.
    pub fn parse_on(&self, text: &str, today: NaiveDate) -> BookingIntent {
        let text = text.to_lowercase();

        let intent = BookingIntent {
            service: self.detect_service(&text),
            preferred_time: earliest_match(&text, TIME_PHRASES).copied(),
            date_preference: earliest_match(&text, DATE_PHRASES).and_then(|p| p.resolve(today)),
            urgency: if contains_any(&text, URGENCY_WORDS) {
                Urgency::High
            } else {
                Urgency::Normal
            },
            sentiment: if contains_any(&text, POLITE_WORDS) {
                Sentiment::Positive
            } else {
                Sentiment::Neutral
            },
        };

        tracing::debug!(?intent, "parsed booking intent");
        intent
    }

    fn detect_service(&self, text: &str) -> Option<String> {
        let exact = self
            .services
            .iter()
            .filter_map(|name| text.find(name.as_str()).map(|pos| (pos, name)))
            .min_by_key(|(pos, _)| *pos);

        // Multi-word names also match on any single word, e.g. "therapy"
        // for "physical therapy".
        let partial = || {
            self.services
                .iter()
                .filter_map(|name| {
                    name.split_whitespace()
                        .filter_map(|word| text.find(word))
                        .min()
                        .map(|pos| (pos, name))
                })
                .min_by_key(|(pos, _)| *pos)
        };

        exact.or_else(partial).map(|(_, name)| name.clone())
    }
}

fn earliest_match<'a, T>(text: &str, table: &'a [(&str, T)]) -> Option<&'a T> {
    table
        .iter()
        .filter_map(|(phrase, value)| text.find(phrase).map(|pos| (pos, value)))
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, value)| value)
}

fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text.contains(w))
}
