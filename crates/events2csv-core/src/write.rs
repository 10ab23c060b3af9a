//! Writes hourly CSV summaries to the output store.

use tracing::{debug, info};

use crate::encoding::encode_csv;
use crate::error::Result;
use crate::partition::{group_by_hour, partition_path};
use crate::store::{ObjectSink, CSV_CONTENT_TYPE};
use crate::types::{AggregateRecord, WrittenPartition};

/// Write one CSV document per distinct hour.
///
/// Each hour is an independent upsert. Writing stops at the first failure and
/// hours already written stay in place.
pub async fn write_summaries(
    sink: &dyn ObjectSink,
    records: Vec<AggregateRecord>,
) -> Result<Vec<WrittenPartition>> {
    let mut written = Vec::new();

    for (hour, rows) in group_by_hour(records) {
        let path = partition_path(hour);
        info!("Writing CSV for hour {} to {}", hour, path);

        let document = encode_csv(&rows).into_bytes();
        let bytes = document.len();
        sink.write(&path, document, CSV_CONTENT_TYPE).await?;

        debug!(path = %path, rows = rows.len(), bytes, "Summary written");
        written.push(WrittenPartition {
            hour,
            path,
            rows: rows.len(),
            bytes,
        });
    }

    info!("Finished writing {} CSV summaries", written.len());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::testing::MemoryStore;
    use crate::types::HourBucket;
    use chrono::{TimeZone, Utc};

    fn record(h: u32, event_type: &str, total_events: u64) -> AggregateRecord {
        AggregateRecord {
            hour: HourBucket::truncate(Utc.with_ymd_and_hms(2024, 3, 1, h, 0, 0).unwrap()),
            event_type: event_type.to_string(),
            total_events,
        }
    }

    #[tokio::test]
    async fn one_document_per_hour() {
        let store = MemoryStore::new();
        let written = write_summaries(&store, vec![record(13, "click", 5), record(14, "click", 2)])
            .await
            .unwrap();

        let paths: Vec<&str> = written.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "summaries/2024/03/01/hour=13/summary.csv",
                "summaries/2024/03/01/hour=14/summary.csv",
            ]
        );

        let hour_13 = store.content("summaries/2024/03/01/hour=13/summary.csv").unwrap();
        assert_eq!(
            hour_13,
            "hour,event_type,total_events\r\n2024-03-01T13:00:00+00:00,click,5\r\n"
        );
        let hour_14 = store.content("summaries/2024/03/01/hour=14/summary.csv").unwrap();
        assert_eq!(hour_14.lines().count(), 2);
        assert_eq!(
            store.content_type("summaries/2024/03/01/hour=14/summary.csv").as_deref(),
            Some("text/csv")
        );
    }

    #[tokio::test]
    async fn no_records_writes_nothing() {
        let store = MemoryStore::new();
        assert!(write_summaries(&store, Vec::new()).await.unwrap().is_empty());
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn rewriting_produces_identical_documents() {
        let store = MemoryStore::new();
        let records = vec![record(13, "view", 2), record(13, "click", 3)];
        let mut reversed = records.clone();
        reversed.reverse();

        write_summaries(&store, records).await.unwrap();
        let first = store.content("summaries/2024/03/01/hour=13/summary.csv");
        write_summaries(&store, reversed).await.unwrap();
        let second = store.content("summaries/2024/03/01/hour=13/summary.csv");

        assert_eq!(first, second);
        assert_eq!(store.write_count(), 2);
    }

    #[tokio::test]
    async fn failure_keeps_earlier_hours() {
        let store = MemoryStore::new();
        store.fail_writes_to("summaries/2024/03/01/hour=14/summary.csv");

        let err = write_summaries(
            &store,
            vec![record(13, "click", 1), record(14, "click", 1), record(15, "click", 1)],
        )
        .await
        .unwrap_err();

        assert_eq!(err.code(), ErrorCode::E006Storage);
        assert!(store.content("summaries/2024/03/01/hour=13/summary.csv").is_some());
        assert!(store.content("summaries/2024/03/01/hour=15/summary.csv").is_none());
    }
}
