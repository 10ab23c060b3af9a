//! CSV serialization of one hour's summary rows.
//!
//! Records end with CRLF and a field is quoted only when it contains the
//! delimiter, a double quote, or a line break.

use std::borrow::Cow;

use crate::types::AggregateRecord;

pub const CSV_HEADER: [&str; 3] = ["hour", "event_type", "total_events"];

const DELIMITER: char = ',';
const QUOTE: char = '"';
const RECORD_TERMINATOR: &str = "\r\n";

/// Render the header plus one row per record, in the order given.
pub fn encode_csv(rows: &[AggregateRecord]) -> String {
    let mut out = String::new();
    write_record(&mut out, CSV_HEADER);

    for row in rows {
        let total = row.total_events.to_string();
        write_record(
            &mut out,
            [
                row.hour.to_iso8601().as_str(),
                row.event_type.as_str(),
                total.as_str(),
            ],
        );
    }

    out
}

fn write_record<'a>(out: &mut String, fields: impl IntoIterator<Item = &'a str>) {
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(DELIMITER);
        }
        out.push_str(&escape_field(field));
    }
    out.push_str(RECORD_TERMINATOR);
}

fn escape_field(field: &str) -> Cow<'_, str> {
    let needs_quotes = field
        .chars()
        .any(|c| c == DELIMITER || c == QUOTE || c == '\r' || c == '\n');

    if needs_quotes {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
