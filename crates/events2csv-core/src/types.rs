//! Records flowing between pipeline stages.

use chrono::{DateTime, NaiveTime, SecondsFormat, TimeDelta, Timelike, Utc};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Handle to a file in the object store.
///
/// Only the name and modification time are consumed; the content is fetched
/// separately through [`crate::ObjectSource::read`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub path: String,
    /// `None` when the backend cannot report a modification time.
    pub last_modified: Option<DateTime<Utc>>,
}

impl StoredObject {
    pub fn new(path: impl Into<String>, last_modified: DateTime<Utc>) -> Self {
        Self {
            path: path.into(),
            last_modified: Some(last_modified),
        }
    }
}

/// Where a raw event came from: its file and zero-based position in that file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOrigin {
    pub path: Arc<str>,
    pub position: usize,
}

/// One element of an input file's top-level JSON array.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEvent {
    pub origin: EventOrigin,
    pub fields: Map<String, Value>,
}

impl RawEvent {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

/// A UTC instant truncated to the start of its hour.
///
/// The only way to build one is [`HourBucket::truncate`], so minutes, seconds
/// and sub-second components are always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HourBucket(DateTime<Utc>);

impl HourBucket {
    pub fn truncate(instant: DateTime<Utc>) -> Self {
        // Rebuilt from calendar fields: valid for every representable year,
        // and a leap second (23:59:60) stays in hour 23.
        let midnight = instant.date_naive().and_time(NaiveTime::MIN);
        Self((midnight + TimeDelta::hours(i64::from(instant.hour()))).and_utc())
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// ISO-8601 rendering with an explicit offset, e.g. `2024-03-01T13:00:00+00:00`.
    pub fn to_iso8601(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Secs, false)
    }
}

impl std::fmt::Display for HourBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedEvent {
    pub hour: HourBucket,
    pub event_type: String,
}

/// Composite grouping key for aggregation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AggregateKey {
    pub hour: HourBucket,
    pub event_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateRecord {
    pub hour: HourBucket,
    pub event_type: String,
    pub total_events: u64,
}

/// Result of writing one hour's summary document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenPartition {
    pub hour: HourBucket,
    pub path: String,
    pub rows: usize,
    pub bytes: usize,
}
