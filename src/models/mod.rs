// src/models/mod.rs

//! Domain models for the job board.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod job;
mod query;

// Re-export all public types
pub use config::{
    ClassifierConfig, Config, DisplayConfig, HttpConfig, IngestConfig, KeywordRule, QueryConfig,
    StorageConfig,
};
pub use job::{Arrangement, Job, JobType, RawJob};
pub use query::{DEFAULT_PAGE_SIZE, Facets, JobFilter, JobPage, PageRequest, SortOrder};
