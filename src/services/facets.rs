//! Filter option extraction.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::{Facets, Job};

/// Label used for jobs that carry no source.
pub const UNKNOWN_SOURCE: &str = "Unknown";

/// Distinct sources and categories over the full, unfiltered job list.
///
/// Categories are drawn from both `category` and `type`. Both lists are
/// sorted ascending and never contain empty strings.
pub fn facets(jobs: &[Job]) -> Facets {
    let mut sources = BTreeSet::new();
    let mut categories = BTreeSet::new();

    for job in jobs {
        insert_non_empty(&mut sources, &job.source);
        insert_non_empty(&mut categories, &job.category);
        insert_non_empty(&mut categories, &job.kind);
    }

    Facets {
        sources: sources.into_iter().collect(),
        categories: categories.into_iter().collect(),
    }
}

fn insert_non_empty(set: &mut BTreeSet<String>, value: &Option<String>) {
    if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
        set.insert(value.to_string());
    }
}

/// Number of jobs per source, with missing sources counted as `Unknown`.
pub fn source_counts(jobs: &[Job]) -> BTreeMap<String, usize> {
    count_sources(jobs.iter().map(|job| job.source.as_deref()))
}

/// Tally source names, counting missing or empty ones as `Unknown`.
pub fn count_sources<'a>(
    sources: impl IntoIterator<Item = Option<&'a str>>,
) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for source in sources {
        let label = source.filter(|s| !s.is_empty()).unwrap_or(UNKNOWN_SOURCE);
        *counts.entry(label.to_string()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: usize, source: Option<&str>, category: Option<&str>, kind: Option<&str>) -> Job {
        let mut job = Job::new(id);
        job.source = source.map(String::from);
        job.category = category.map(String::from);
        job.kind = kind.map(String::from);
        job
    }

    #[test]
    fn test_facets_sorted_distinct() {
        let jobs = vec![
            job(0, Some("RemoteOK"), Some("Dev"), None),
            job(1, Some("Guru"), Some(""), Some("Full Time")),
            job(2, Some("RemoteOK"), Some("Design"), Some("Dev")),
            job(3, None, None, None),
            job(4, Some(""), Some("Admin"), None),
        ];

        let facets = facets(&jobs);
        assert_eq!(facets.sources, vec!["Guru", "RemoteOK"]);
        assert_eq!(facets.categories, vec!["Admin", "Design", "Dev", "Full Time"]);
    }

    #[test]
    fn test_facets_empty() {
        assert_eq!(facets(&[]), Facets::default());
    }

    #[test]
    fn test_source_counts() {
        let jobs = vec![
            job(0, Some("Guru"), None, None),
            job(1, Some("Guru"), None, None),
            job(2, None, None, None),
            job(3, Some("Indeed"), None, None),
        ];

        let counts = source_counts(&jobs);
        assert_eq!(counts.get("Guru"), Some(&2));
        assert_eq!(counts.get("Indeed"), Some(&1));
        assert_eq!(counts.get(UNKNOWN_SOURCE), Some(&1));
    }
}
