//! One summarization run: list, filter, parse, normalize, aggregate, write.

use chrono::{DateTime, Utc};
use events2csv_core::{
    aggregate_events, lookback_cutoff, normalize_events, read_events, select_eligible,
    write_summaries, ObjectSink, ObjectSource, Result, WrittenPartition,
};
use tracing::info;

/// Explicit inputs of a run. `now` is passed in rather than read from the
/// clock so a run can be replayed against a fixed instant.
#[derive(Debug, Clone)]
pub struct JobParams {
    pub input_prefix: String,
    pub lookback_hours: u64,
    pub now: DateTime<Utc>,
}

/// What a completed run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobSummary {
    pub objects_listed: usize,
    pub files_processed: usize,
    pub events_processed: usize,
    pub aggregates: usize,
    pub partitions: Vec<WrittenPartition>,
}

/// Run the whole batch pass.
///
/// Any error aborts the run. Hours written before a failing write stay written.
pub async fn run_job(
    source: &dyn ObjectSource,
    sink: &dyn ObjectSink,
    params: &JobParams,
) -> Result<JobSummary> {
    let listed = source.list(&params.input_prefix).await?;
    let objects_listed = listed.len();

    let cutoff = lookback_cutoff(params.now, params.lookback_hours);
    let eligible = select_eligible(listed, cutoff);
    info!("Job finished file discovery phase");

    if eligible.is_empty() {
        info!("No eligible files to process. Exiting job.");
        return Ok(JobSummary {
            objects_listed,
            ..JobSummary::default()
        });
    }

    let events = read_events(source, &eligible).await?;
    info!("Job finished JSON parsing phase");

    let normalized = normalize_events(&events)?;
    info!("Job finished event normalization phase");

    let aggregated = aggregate_events(&normalized);
    for record in &aggregated {
        info!(
            "Hour={} | Type={} | Count={}",
            record.hour, record.event_type, record.total_events
        );
    }
    info!("Job finished aggregation phase");

    let aggregates = aggregated.len();
    let partitions = write_summaries(sink, aggregated).await?;
    info!("Job finished CSV writing phase");

    Ok(JobSummary {
        objects_listed,
        files_processed: eligible.len(),
        events_processed: events.len(),
        aggregates,
        partitions,
    })
}
