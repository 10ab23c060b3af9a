//! Core of the hourly event summary job.
//!
//! Four in-memory stages feed a partitioned writer:
//! eligibility filter -> event parser -> normalizer -> aggregator -> writer.
//! Storage is reached only through [`ObjectSource`] and [`ObjectSink`].

mod aggregate;
mod eligibility;
mod encoding;
mod error;
mod normalize;
mod parse;
mod partition;
mod store;
mod types;
mod write;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use aggregate::aggregate_events;
pub use eligibility::{lookback_cutoff, select_eligible, EVENT_FILE_SUFFIX};
pub use encoding::{encode_csv, CSV_HEADER};
pub use error::{ErrorCode, PipelineError, Result};
pub use normalize::{
    normalize_event, normalize_events, parse_timestamp, EVENT_TYPE_FIELD, TIMESTAMP_FIELD,
};
pub use parse::{parse_event_file, read_events};
pub use partition::{group_by_hour, partition_path, SUMMARY_FILE_NAME, SUMMARY_ROOT};
pub use store::{ObjectSink, ObjectSource, CSV_CONTENT_TYPE};
pub use types::{
    AggregateKey, AggregateRecord, EventOrigin, HourBucket, NormalizedEvent, RawEvent,
    StoredObject, WrittenPartition,
};
pub use write::write_summaries;
