//! events2csv: roll raw JSON event files up into hourly CSV summaries.
//!
//! The pipeline stages live in `events2csv-core`; this crate wires them to
//! configuration, logging and OpenDAL storage.

mod init;
mod job;

pub use init::{init_stores, init_tracing, Stores};
pub use job::{run_job, JobParams, JobSummary};
