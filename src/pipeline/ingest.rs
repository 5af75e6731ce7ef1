//! Store refresh: merge scraped batches and replace the job store.
//!
//! Batches are concatenated in the order given and duplicates are dropped by
//! fingerprint (first occurrence wins). Before the store is replaced, record
//! counts are compared per source: a scraper that breaks usually shows up as
//! its source shrinking or vanishing while the others look normal.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::{AppError, Result};
use crate::models::{IngestConfig, RawJob};
use crate::services::facets::count_sources;
use crate::services::normalizer::raw_text;
use crate::storage::{JobStorage, WriteMetadata};

/// Options for a single ingest run.
#[derive(Debug, Clone, Copy, Default)]
pub struct IngestOptions {
    /// Write even when a source shrank or the new set is empty
    pub force: bool,
}

/// Fingerprint-level comparison between the store and the new record set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecordDiff {
    /// In the new set but not in the store
    pub added: usize,
    /// In the store but not in the new set
    pub removed: usize,
    /// In both
    pub kept: usize,
}

impl RecordDiff {
    /// Compare two record sets by fingerprint.
    pub fn calculate(previous: &[RawJob], current: &[RawJob]) -> Self {
        let prev: HashSet<String> = previous.iter().map(fingerprint).collect();
        let curr: HashSet<String> = current.iter().map(fingerprint).collect();

        Self {
            added: curr.difference(&prev).count(),
            removed: prev.difference(&curr).count(),
            kept: curr.intersection(&prev).count(),
        }
    }

    /// Check if there are any changes.
    pub fn has_changes(&self) -> bool {
        self.added > 0 || self.removed > 0
    }
}

/// A source whose record count fell past the allowed drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceDrop {
    pub source: String,
    pub previous: usize,
    pub current: usize,
}

impl fmt::Display for SourceDrop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} -> {})", self.source, self.previous, self.current)
    }
}

/// Outcome of a successful ingest.
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    /// Records written to the store
    pub written: usize,
    /// Records dropped as duplicates of an earlier one
    pub duplicates_dropped: usize,
    /// Records in the store before the write
    pub previous_count: usize,
    /// Change against the previous store
    pub diff: RecordDiff,
    /// Sources that shrank past the threshold (only non-empty when forced)
    pub shrunk_sources: Vec<SourceDrop>,
    /// Whether the write overrode a failed shrink check
    pub forced: bool,
    /// Written records per source
    pub by_source: BTreeMap<String, usize>,
    /// Where the records went
    pub location: String,
}

/// Identity of a raw record for duplicate detection.
///
/// Built from the source and url, or from source, title and company when the
/// record has no url. Values are trimmed and lowercased before hashing.
pub fn fingerprint(record: &RawJob) -> String {
    let source = field(record, "source");
    let url = field(record, "url");

    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    if url.is_empty() {
        for key in ["title", "company"] {
            hasher.update(b"\x1f");
            hasher.update(field(record, key).as_bytes());
        }
    } else {
        hasher.update(b"\x1e");
        hasher.update(url.as_bytes());
    }
    hex::encode(hasher.finalize())
}

fn field(record: &RawJob, key: &str) -> String {
    match record.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.trim().to_lowercase(),
        Some(other) => other.to_string().to_lowercase(),
    }
}

/// Concatenate batches in order, keeping the first record per fingerprint.
///
/// Returns the merged records and the number of duplicates dropped.
pub fn merge_batches(batches: Vec<Vec<RawJob>>) -> (Vec<RawJob>, usize) {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    let mut dropped = 0;

    for record in batches.into_iter().flatten() {
        if seen.insert(fingerprint(&record)) {
            merged.push(record);
        } else {
            dropped += 1;
        }
    }
    (merged, dropped)
}

/// Raw record counts per source, labelled the way loaded jobs are.
pub fn count_by_source(records: &[RawJob]) -> BTreeMap<String, usize> {
    let sources: Vec<Option<String>> = records
        .iter()
        .map(|record| record.get("source").map(raw_text))
        .collect();
    count_sources(sources.iter().map(Option::as_deref))
}

/// Sources that lost more than `max_drop_percent` of their stored records.
///
/// Sources stored with fewer than `min_baseline` records are not checked. A
/// source missing from the new set counts as zero.
pub fn shrunk_sources(
    previous: &BTreeMap<String, usize>,
    current: &BTreeMap<String, usize>,
    config: &IngestConfig,
) -> Vec<SourceDrop> {
    let allowed = usize::from(config.max_drop_percent);

    previous
        .iter()
        .filter(|&(_, &before)| before >= config.min_baseline)
        .filter_map(|(source, &before)| {
            let after = current.get(source).copied().unwrap_or(0);
            let lost = before.saturating_sub(after);
            (lost * 100 > before * allowed).then(|| SourceDrop {
                source: source.clone(),
                previous: before,
                current: after,
            })
        })
        .collect()
}

fn check_refresh(
    previous_count: usize,
    current_count: usize,
    drops: &[SourceDrop],
    config: &IngestConfig,
) -> Result<()> {
    if current_count == 0 && previous_count > 0 {
        return Err(AppError::EmptyIngest(previous_count));
    }
    if !drops.is_empty() {
        return Err(AppError::SourcesShrank {
            threshold_percent: config.max_drop_percent,
            sources: drops.iter().map(ToString::to_string).collect(),
        });
    }
    Ok(())
}

/// Merge `batches` and replace the store contents with the result.
///
/// Fails without writing when the new set is empty or a source shrank past
/// the configured drop, unless `options.force` is set. A store that cannot
/// be read is an error too, but `force` treats it as empty so a corrupt
/// store can be replaced.
pub async fn run_ingest(
    storage: &dyn JobStorage,
    batches: Vec<Vec<RawJob>>,
    config: &IngestConfig,
    options: IngestOptions,
) -> Result<IngestReport> {
    let (records, duplicates_dropped) = merge_batches(batches);
    log::info!(
        "Merged {} records ({} duplicates dropped)",
        records.len(),
        duplicates_dropped
    );

    let previous = match storage.read_records().await {
        Ok(previous) => previous.unwrap_or_default(),
        Err(e) if options.force => {
            log::warn!(
                "Ignoring unreadable store at {}: {}",
                storage.location(),
                e
            );
            Vec::new()
        }
        Err(e) => return Err(e),
    };

    let diff = RecordDiff::calculate(&previous, &records);
    log::info!(
        "Diff: +{} -{} ={} against {} stored records",
        diff.added,
        diff.removed,
        diff.kept,
        previous.len()
    );

    let by_source = count_by_source(&records);
    let shrunk = shrunk_sources(&count_by_source(&previous), &by_source, config);
    let forced = match check_refresh(previous.len(), records.len(), &shrunk, config) {
        Ok(()) => false,
        Err(e) if options.force => {
            log::warn!("Forcing write: {}", e);
            true
        }
        Err(e) => {
            log::error!("Refusing to replace {}: {}", storage.location(), e);
            return Err(e);
        }
    };

    let WriteMetadata {
        count, location, ..
    } = storage.write_records(&records).await?;

    for (source, n) in &by_source {
        log::info!("  {}: {} jobs", source, n);
    }

    Ok(IngestReport {
        written: count,
        duplicates_dropped,
        previous_count: previous.len(),
        diff,
        shrunk_sources: shrunk,
        forced,
        by_source,
        location,
    })
}
