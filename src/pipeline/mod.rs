//! Pipeline entry points for job board operations.
//!
//! - `run_load`: Read the store and build normalized, classified jobs
//! - `run_ingest`: Merge scraped batches and replace the store

pub mod ingest;
pub mod load;

pub use ingest::{IngestOptions, IngestReport, RecordDiff, SourceDrop, run_ingest};
pub use load::{build_job, build_jobs, run_load};
