//! Query parameters and results.

use serde::{Deserialize, Serialize};

use super::Job;

/// Page size used when no configuration overrides it.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Filters applied to a job listing.
///
/// Every field is optional and an empty string counts as "not set", so the
/// struct can be deserialized straight from a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JobFilter {
    /// Exact match on `source`
    #[serde(default)]
    pub source: Option<String>,

    /// Exact match on `category` or `type`
    #[serde(default)]
    pub category: Option<String>,

    /// Exact match on the derived arrangement tag
    #[serde(default)]
    pub arrangement: Option<String>,

    /// Exact match on the derived job type tag
    #[serde(default)]
    pub job_type: Option<String>,

    /// Case-insensitive substring of title, description or job_description
    #[serde(default)]
    pub search: Option<String>,
}

impl JobFilter {
    pub fn source(&self) -> Option<&str> {
        active(&self.source)
    }

    pub fn category(&self) -> Option<&str> {
        active(&self.category)
    }

    pub fn arrangement(&self) -> Option<&str> {
        active(&self.arrangement)
    }

    pub fn job_type(&self) -> Option<&str> {
        active(&self.job_type)
    }

    pub fn search(&self) -> Option<&str> {
        active(&self.search)
    }

    /// True when no filter is active.
    pub fn is_empty(&self) -> bool {
        self.source().is_none()
            && self.category().is_none()
            && self.arrangement().is_none()
            && self.job_type().is_none()
            && self.search().is_none()
    }
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Result ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Keep load order
    #[default]
    Unspecified,
    /// Most recent posting first
    Newest,
    /// Oldest posting first
    Oldest,
}

impl SortOrder {
    /// Parse a request parameter. Unknown values keep load order.
    pub fn from_param(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "newest" => SortOrder::Newest,
            "oldest" => SortOrder::Oldest,
            _ => SortOrder::Unspecified,
        }
    }
}

/// Requested page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number; clamped by the query engine
    pub page: usize,
    pub page_size: usize,
}

impl PageRequest {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page,
            page_size: page_size.max(1),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// One page of a filtered, sorted listing.
#[derive(Debug, Clone, Serialize)]
pub struct JobPage<'a> {
    /// Records in the unfiltered load
    pub total: usize,
    /// Records matching the filter, before pagination
    pub filtered: usize,
    /// Page actually returned, after clamping
    pub page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub jobs: Vec<&'a Job>,
}

impl JobPage<'_> {
    /// Ids of the jobs on this page, in order.
    pub fn ids(&self) -> Vec<usize> {
        self.jobs.iter().map(|job| job.id).collect()
    }
}

/// Distinct filter values present in a load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub sources: Vec<String>,
    pub categories: Vec<String>,
}
