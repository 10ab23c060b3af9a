//! Partition path generation for hourly summaries
//!
//! Generates one path per hour bucket:
//! summaries/{year}/{month}/{day}/hour={hour}/summary.csv

use chrono::{Datelike, Timelike};
use std::collections::BTreeMap;

use crate::types::{AggregateRecord, HourBucket};

/// Root directory of every summary document
pub const SUMMARY_ROOT: &str = "summaries";

/// File name of each hour's summary document
pub const SUMMARY_FILE_NAME: &str = "summary.csv";

/// Generate the output path for an hour bucket
///
/// Format: `summaries/{YYYY}/{MM}/{DD}/hour={HH}/summary.csv`, all fields
/// zero-padded UTC calendar values.
pub fn partition_path(hour: HourBucket) -> String {
    let dt = hour.as_datetime();
    format!(
        "{}/{:04}/{:02}/{:02}/hour={:02}/{}",
        SUMMARY_ROOT,
        dt.year(),
        dt.month(),
        dt.day(),
        dt.hour(),
        SUMMARY_FILE_NAME
    )
}

/// Group aggregate records by hour
///
/// Hours iterate in ascending order and rows inside each hour are sorted by
/// event type, so the same input always yields the same documents.
pub fn group_by_hour(records: Vec<AggregateRecord>) -> BTreeMap<HourBucket, Vec<AggregateRecord>> {
    let mut by_hour: BTreeMap<HourBucket, Vec<AggregateRecord>> = BTreeMap::new();

    for record in records {
        by_hour.entry(record.hour).or_default().push(record);
    }

    for rows in by_hour.values_mut() {
        rows.sort_by(|a, b| a.event_type.cmp(&b.event_type));
    }

    by_hour
}
