//! Counting normalized events per (hour, event type).

use std::collections::BTreeMap;
use tracing::info;

use crate::types::{AggregateKey, AggregateRecord, NormalizedEvent};

/// Count events sharing the same hour and event type.
///
/// Records come out ordered by hour then event type. Callers should not rely
/// on that; the writer regroups on its own.
pub fn aggregate_events(events: &[NormalizedEvent]) -> Vec<AggregateRecord> {
    let mut counts: BTreeMap<AggregateKey, u64> = BTreeMap::new();

    for event in events {
        let key = AggregateKey {
            hour: event.hour,
            event_type: event.event_type.clone(),
        };
        let total = counts.entry(key).or_insert(0);
        *total = total.saturating_add(1);
    }

    let results: Vec<AggregateRecord> = counts
        .into_iter()
        .map(|(key, total_events)| AggregateRecord {
            hour: key.hour,
            event_type: key.event_type,
            total_events,
        })
        .collect();

    info!("Aggregated into {} hourly records", results.len());
    results
}
