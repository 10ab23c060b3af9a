//! Event file decoding.
//!
//! Each input file holds a single JSON array of event objects. Files are read
//! in the order given and their events concatenated in file order.

use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

use crate::error::{PipelineError, Result};
use crate::store::ObjectSource;
use crate::types::{EventOrigin, RawEvent, StoredObject};

/// Decode one file's bytes into raw events.
pub fn parse_event_file(path: &str, data: &[u8]) -> Result<Vec<RawEvent>> {
    let content = std::str::from_utf8(data).map_err(|source| {
        error!("Failed to decode file {} as UTF-8", path);
        PipelineError::Decoding {
            path: path.to_string(),
            source,
        }
    })?;

    let value: Value = serde_json::from_str(content).map_err(|source| {
        error!("Invalid JSON in file {}", path);
        PipelineError::Parse {
            path: path.to_string(),
            source,
        }
    })?;

    let elements = match value {
        Value::Array(elements) => elements,
        other => {
            return Err(PipelineError::schema(
                path,
                format!("expected a JSON array, found {}", json_kind(&other)),
            ))
        }
    };

    let shared_path: Arc<str> = Arc::from(path);
    elements
        .into_iter()
        .enumerate()
        .map(|(position, element)| match element {
            Value::Object(fields) => Ok(RawEvent {
                origin: EventOrigin {
                    path: Arc::clone(&shared_path),
                    position,
                },
                fields,
            }),
            other => Err(PipelineError::schema(
                path,
                format!(
                    "element #{} is {}, expected an object",
                    position,
                    json_kind(&other)
                ),
            )),
        })
        .collect()
}

/// Read every object from the store and parse its events.
///
/// One read per file. The first failure aborts the whole batch.
pub async fn read_events(
    source: &dyn ObjectSource,
    objects: &[StoredObject],
) -> Result<Vec<RawEvent>> {
    let mut all_events = Vec::new();

    for object in objects {
        info!("Downloading file: {}", object.path);
        let data = source.read(object).await?;

        let events = parse_event_file(&object.path, &data)?;
        info!("Parsed {} events from {}", events.len(), object.path);
        all_events.extend(events);
    }

    info!("Total events parsed across all files: {}", all_events.len());
    Ok(all_events)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
