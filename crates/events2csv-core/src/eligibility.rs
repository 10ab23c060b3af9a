//! Input file selection.
//!
//! A file qualifies when its name ends in `.json` and it was last modified
//! strictly before the lookback cutoff. Younger files may still be written
//! by the upstream producer.

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, info};

use crate::types::StoredObject;

/// Case-sensitive suffix an input file must carry.
pub const EVENT_FILE_SUFFIX: &str = ".json";

/// Compute `now - lookback_hours`.
///
/// Saturates at the earliest representable instant, which makes nothing
/// eligible, instead of overflowing.
pub fn lookback_cutoff(now: DateTime<Utc>, lookback_hours: u64) -> DateTime<Utc> {
    i64::try_from(lookback_hours)
        .ok()
        .and_then(TimeDelta::try_hours)
        .and_then(|lookback| now.checked_sub_signed(lookback))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Keep the objects that are safe to process, preserving input order.
pub fn select_eligible(objects: Vec<StoredObject>, cutoff: DateTime<Utc>) -> Vec<StoredObject> {
    info!("Filtering files updated before: {}", cutoff);

    let eligible: Vec<StoredObject> = objects
        .into_iter()
        .filter(|object| {
            if !object.path.ends_with(EVENT_FILE_SUFFIX) {
                return false;
            }

            debug!(
                path = %object.path,
                last_modified = ?object.last_modified,
                "Found candidate file"
            );

            match object.last_modified {
                Some(modified) => modified < cutoff,
                None => {
                    debug!(path = %object.path, "Skipping file without modification time");
                    false
                }
            }
        })
        .collect();

    info!("Total eligible files: {}", eligible.len());
    eligible
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 2, 12, 0, 0).unwrap()
    }

    fn object(path: &str, hours_ago: i64) -> StoredObject {
        StoredObject::new(path, now() - TimeDelta::hours(hours_ago))
    }

    #[test]
    fn cutoff_subtracts_lookback() {
        assert_eq!(
            lookback_cutoff(now(), 24),
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
        );
        assert_eq!(lookback_cutoff(now(), 0), now());
    }

    #[test]
    fn cutoff_saturates_on_huge_lookback() {
        assert_eq!(lookback_cutoff(now(), u64::MAX), DateTime::<Utc>::MIN_UTC);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(select_eligible(Vec::new(), now()).is_empty());
    }

    #[test]
    fn keeps_old_json_files_only() {
        let cutoff = lookback_cutoff(now(), 24);
        let objects = vec![
            object("events/old.json", 30),
            object("events/new.json", 2),
            object("events/old.txt", 30),
            object("events/OLD.JSON", 30),
            object("events/archive.json.gz", 30),
        ];

        let eligible = select_eligible(objects, cutoff);
        let paths: Vec<&str> = eligible.iter().map(|o| o.path.as_str()).collect();
        assert_eq!(paths, vec!["events/old.json"]);
    }

    #[test]
    fn file_exactly_at_cutoff_is_excluded() {
        let cutoff = lookback_cutoff(now(), 24);
        let at_cutoff = StoredObject::new("events/edge.json", cutoff);
        let just_before = StoredObject::new("events/before.json", cutoff - TimeDelta::seconds(1));

        let eligible = select_eligible(vec![at_cutoff, just_before.clone()], cutoff);
        assert_eq!(eligible, vec![just_before]);
    }

    #[test]
    fn file_without_modification_time_is_excluded() {
        let unknown = StoredObject {
            path: "events/unknown.json".to_string(),
            last_modified: None,
        };
        assert!(select_eligible(vec![unknown], now()).is_empty());
    }

    #[test]
    fn preserves_listing_order() {
        let objects = vec![
            object("events/c.json", 48),
            object("events/a.json", 30),
            object("events/b.json", 72),
        ];
        let eligible = select_eligible(objects.clone(), lookback_cutoff(now(), 24));
        assert_eq!(eligible, objects);
    }
}
