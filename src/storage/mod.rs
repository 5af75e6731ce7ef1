//! Storage abstractions for the aggregated job collection.
//!
//! The collection is a single flat JSON array of raw records, written by the
//! ingest step and read on every query.
//!
//! ## Directory Structure
//!
//! ```text
//! storage/
//! ├── config.toml           # Configuration
//! └── scraped_jobs.json     # Aggregated raw records
//! ```

pub mod local;
#[cfg(feature = "remote")]
pub mod remote;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::RawJob;

// Re-export for convenience
pub use local::LocalStorage;
#[cfg(feature = "remote")]
pub use remote::HttpStorage;

/// Metadata about a storage write operation.
#[derive(Debug, Clone)]
pub struct WriteMetadata {
    /// Number of records written
    pub count: usize,
    /// Where the records were written
    pub location: String,
    /// Timestamp of the write
    pub timestamp: DateTime<Utc>,
}

/// Trait for job collection backends.
#[async_trait]
pub trait JobStorage: Send + Sync {
    /// Read the whole raw record collection.
    ///
    /// Returns `Ok(None)` when the collection does not exist yet and an error
    /// when it exists but cannot be read or is not a JSON array of objects.
    async fn read_records(&self) -> Result<Option<Vec<RawJob>>>;

    /// Replace the record collection.
    async fn write_records(&self, records: &[RawJob]) -> Result<WriteMetadata>;

    /// Human-readable location of the collection.
    fn location(&self) -> String;
}
