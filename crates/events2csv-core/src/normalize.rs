//! Hourly normalization of raw events.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use tracing::info;

use crate::error::{PipelineError, Result};
use crate::types::{HourBucket, NormalizedEvent, RawEvent};

pub const TIMESTAMP_FIELD: &str = "event_timestamp";
pub const EVENT_TYPE_FIELD: &str = "event_type";

// `%#z` takes `Z`, `+hh`, `+hhmm` and `+hh:mm`.
const OFFSET_LAYOUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M%#z",
];

// Offset-less layouts, read as UTC.
const NAIVE_LAYOUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Map every raw event to its hour bucket and type.
///
/// Fails on the first invalid event; nothing is returned for the rest.
pub fn normalize_events(events: &[RawEvent]) -> Result<Vec<NormalizedEvent>> {
    let normalized = events
        .iter()
        .map(normalize_event)
        .collect::<Result<Vec<_>>>()?;

    info!("Normalized {} events into hourly buckets", normalized.len());
    Ok(normalized)
}

pub fn normalize_event(event: &RawEvent) -> Result<NormalizedEvent> {
    let raw_timestamp = match event.get(TIMESTAMP_FIELD) {
        Some(Value::String(ts)) => ts,
        Some(_) => return Err(invalid(event, "event_timestamp is not a string")),
        None => return Err(invalid(event, "missing event_timestamp")),
    };

    let timestamp = parse_timestamp(raw_timestamp).ok_or_else(|| {
        invalid(
            event,
            format!("invalid timestamp format: {:?}", raw_timestamp),
        )
    })?;

    let event_type = match event.get(EVENT_TYPE_FIELD) {
        Some(Value::String(event_type)) => event_type.clone(),
        Some(_) => return Err(invalid(event, "event_type is not a string")),
        None => return Err(invalid(event, "missing event_type")),
    };

    Ok(NormalizedEvent {
        hour: HourBucket::truncate(timestamp),
        event_type,
    })
}

/// Parse an ISO-8601 timestamp and convert it to UTC.
///
/// Accepts `Z` or a numeric offset, an offset-less date-time (taken as UTC),
/// or a bare date (midnight UTC). Seconds are optional. Surrounding
/// whitespace is not accepted.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    // chrono skips whitespace before numeric fields
    if raw.starts_with(char::is_whitespace) || raw.ends_with(char::is_whitespace) {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for layout in OFFSET_LAYOUTS {
        if let Ok(dt) = DateTime::parse_from_str(raw, layout) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for layout in NAIVE_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, layout) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn invalid(event: &RawEvent, reason: impl Into<String>) -> PipelineError {
    PipelineError::Validation {
        path: event.origin.path.to_string(),
        position: event.origin.position,
        reason: reason.into(),
        record: Value::Object(event.fields.clone()).to_string(),
    }
}
