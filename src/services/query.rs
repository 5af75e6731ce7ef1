//! Filtering, sorting and pagination over a loaded job list.

use crate::error::{AppError, Result};
use crate::models::{Job, JobFilter, JobPage, PageRequest, SortOrder};

/// Check whether a job satisfies every active filter.
pub fn matches(job: &Job, filter: &JobFilter) -> bool {
    let search = filter.search().map(str::to_lowercase);
    matches_lowered(job, filter, search.as_deref())
}

/// `matches` with the search needle already lowercased.
fn matches_lowered(job: &Job, filter: &JobFilter, search: Option<&str>) -> bool {
    fn text(field: &Option<String>) -> &str {
        field.as_deref().unwrap_or_default()
    }

    if let Some(source) = filter.source() {
        if text(&job.source) != source {
            return false;
        }
    }
    if let Some(category) = filter.category() {
        if text(&job.category) != category && text(&job.kind) != category {
            return false;
        }
    }
    if let Some(arrangement) = filter.arrangement() {
        if job.arrangement_tag() != arrangement {
            return false;
        }
    }
    if let Some(job_type) = filter.job_type() {
        if job.job_type_tag() != job_type {
            return false;
        }
    }
    if let Some(needle) = search {
        let hit = [&job.title, &job.description, &job.job_description]
            .into_iter()
            .any(|field| text(field).to_lowercase().contains(needle));
        if !hit {
            return false;
        }
    }
    true
}

/// Filter, sort and paginate `jobs`.
///
/// The requested page is clamped into `[1, total_pages]`, and there is always
/// at least one (possibly empty) page.
pub fn query<'a>(
    jobs: &'a [Job],
    filter: &JobFilter,
    sort: SortOrder,
    page: PageRequest,
) -> JobPage<'a> {
    let search = filter.search().map(str::to_lowercase);
    let mut filtered: Vec<&Job> = jobs
        .iter()
        .filter(|job| matches_lowered(job, filter, search.as_deref()))
        .collect();

    // `sort_by` is stable; jobs without a date compare as the earliest
    match sort {
        SortOrder::Newest => filtered.sort_by(|a, b| b.parsed_date.cmp(&a.parsed_date)),
        SortOrder::Oldest => filtered.sort_by(|a, b| a.parsed_date.cmp(&b.parsed_date)),
        SortOrder::Unspecified => {}
    }

    let page_size = page.page_size.max(1);
    let filtered_count = filtered.len();
    let total_pages = filtered_count.div_ceil(page_size).max(1);
    let current = page.page.clamp(1, total_pages);

    let start = ((current - 1) * page_size).min(filtered_count);
    let end = (start + page_size).min(filtered_count);

    log::debug!(
        "Query matched {}/{} jobs, page {}/{}",
        filtered_count,
        jobs.len(),
        current,
        total_pages
    );

    JobPage {
        total: jobs.len(),
        filtered: filtered_count,
        page: current,
        total_pages,
        page_size,
        jobs: filtered[start..end].to_vec(),
    }
}

/// Look up a single job by id.
pub fn find_job(jobs: &[Job], id: usize) -> Result<&Job> {
    jobs.iter()
        .find(|job| job.id == id)
        .ok_or(AppError::JobNotFound(id))
}
