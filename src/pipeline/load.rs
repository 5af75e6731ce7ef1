// src/pipeline/load.rs

//! Record loading: raw store contents to normalized, classified jobs.

use crate::models::{Job, RawJob};
use crate::services::normalizer::raw_text;
use crate::services::{Classifier, clean, parse_date};
use crate::storage::JobStorage;

/// Keys the loader derives itself; raw values under these names are dropped.
const DERIVED_KEYS: &[&str] = &["id", "arrangement", "job_type", "parsed_date"];

/// Load and normalize every job in the store.
///
/// A missing store, an unreadable one, or malformed content all yield an
/// empty list; the failure is only logged.
pub async fn run_load(storage: &dyn JobStorage, classifier: &Classifier) -> Vec<Job> {
    match storage.read_records().await {
        Ok(Some(records)) => {
            let jobs = build_jobs(records, classifier);
            log::debug!("Loaded {} jobs from {}", jobs.len(), storage.location());
            jobs
        }
        Ok(None) => {
            log::warn!("No job collection found at {}", storage.location());
            Vec::new()
        }
        Err(e) => {
            log::warn!("Failed to load jobs from {}: {}", storage.location(), e);
            Vec::new()
        }
    }
}

/// Normalize raw records in order, assigning ids by position.
pub fn build_jobs(records: Vec<RawJob>, classifier: &Classifier) -> Vec<Job> {
    records
        .into_iter()
        .enumerate()
        .map(|(id, raw)| build_job(id, raw, classifier))
        .collect()
}

/// Normalize one raw record.
pub fn build_job(id: usize, mut raw: RawJob, classifier: &Classifier) -> Job {
    let mut cleaned = |key: &str| raw.remove(key).map(|value| clean(Some(&value)));

    let mut job = Job::new(id);
    job.title = cleaned("title");
    job.company = cleaned("company");
    job.location = cleaned("location");
    job.description = cleaned("description");
    job.job_description = cleaned("job_description");
    job.salary = cleaned("salary");
    job.category = cleaned("category");
    job.kind = cleaned("type");

    job.source = raw.remove("source").as_ref().map(raw_text);
    job.posted_date = raw.remove("posted_date").as_ref().map(raw_text);
    job.date = raw.remove("date").as_ref().map(raw_text);

    for key in DERIVED_KEYS {
        raw.remove(*key);
    }
    job.extra = raw;

    job.arrangement = classifier.detect_arrangement(&job);
    job.job_type = classifier.detect_job_type(&job);
    job.parsed_date = parse_date(&job);
    job
}
