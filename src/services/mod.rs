//! Service layer for the job board.
//!
//! This module contains the business logic for:
//! - Text cleanup (`normalizer`)
//! - Arrangement and job type detection (`Classifier`)
//! - Posting date parsing (`dates`)
//! - Filtering, sorting and pagination (`query`)
//! - Filter option extraction (`facets`)

mod classifier;
pub mod dates;
pub mod facets;
pub mod normalizer;
pub mod query;

pub use classifier::Classifier;
pub use dates::parse_date;
pub use facets::{facets, source_counts};
pub use normalizer::{clean, truncate_words};
pub use query::{find_job, query};
