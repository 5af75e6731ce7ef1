//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

use super::{Arrangement, JobType};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Job store location
    #[serde(default)]
    pub storage: StorageConfig,

    /// Listing behavior
    #[serde(default)]
    pub query: QueryConfig,

    /// Remote store client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Refresh safety settings
    #[serde(default)]
    pub ingest: IngestConfig,

    /// Keyword rules for arrangement and job type detection
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Console output
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.storage.jobs_file.trim().is_empty() {
            return Err(AppError::validation("storage.jobs_file is empty"));
        }
        if self.query.page_size == 0 {
            return Err(AppError::validation("query.page_size must be > 0"));
        }
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.ingest.max_drop_percent > 100 {
            return Err(AppError::validation(
                "ingest.max_drop_percent must be <= 100",
            ));
        }
        validate_rules("classifier.arrangement", &self.classifier.arrangement)?;
        validate_rules("classifier.job_type", &self.classifier.job_type)?;
        Ok(())
    }
}

fn validate_rules<T>(section: &str, rules: &[KeywordRule<T>]) -> Result<()> {
    if rules.is_empty() {
        return Err(AppError::validation(format!("{section} has no rules")));
    }
    for (i, rule) in rules.iter().enumerate() {
        if rule.keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(AppError::validation(format!(
                "{section}[{i}] has no keywords"
            )));
        }
    }
    Ok(())
}

/// Where the aggregated job collection lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// File name of the record collection, relative to the storage directory
    #[serde(default = "defaults::jobs_file")]
    pub jobs_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            jobs_file: defaults::jobs_file(),
        }
    }
}

/// Listing behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Jobs per page
    #[serde(default = "defaults::page_size")]
    pub page_size: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            page_size: defaults::page_size(),
        }
    }
}

/// HTTP client settings for remote stores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Ingest (store refresh) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Maximum allowed drop in a source's record count, in percent
    #[serde(default = "defaults::max_drop_percent")]
    pub max_drop_percent: u8,

    /// Sources with fewer stored records than this are never guarded
    #[serde(default = "defaults::min_baseline")]
    pub min_baseline: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_drop_percent: defaults::max_drop_percent(),
            min_baseline: defaults::min_baseline(),
        }
    }
}

/// Ordered keyword rules. The first rule with a matching keyword wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default = "defaults::arrangement_rules")]
    pub arrangement: Vec<KeywordRule<Arrangement>>,

    #[serde(default = "defaults::job_type_rules")]
    pub job_type: Vec<KeywordRule<JobType>>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            arrangement: defaults::arrangement_rules(),
            job_type: defaults::job_type_rules(),
        }
    }
}

/// Mapping from a set of keywords to a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule<T> {
    pub tag: T,
    pub keywords: Vec<String>,
}

impl<T> KeywordRule<T> {
    pub fn new(tag: T, keywords: &[&str]) -> Self {
        Self {
            tag,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Console output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Template for one job in `list` output (see `Job::format`)
    #[serde(default = "defaults::line_template")]
    pub line_template: String,

    /// Words of description shown under each listed job
    #[serde(default = "defaults::excerpt_words")]
    pub excerpt_words: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            line_template: defaults::line_template(),
            excerpt_words: defaults::excerpt_words(),
        }
    }
}

mod defaults {
    use super::{Arrangement, JobType, KeywordRule};
    use crate::models::DEFAULT_PAGE_SIZE;

    // Storage defaults
    pub fn jobs_file() -> String {
        "scraped_jobs.json".into()
    }

    // Query defaults
    pub fn page_size() -> usize {
        DEFAULT_PAGE_SIZE
    }

    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; jobboard/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Ingest defaults
    pub fn max_drop_percent() -> u8 {
        20
    }
    pub fn min_baseline() -> usize {
        10
    }

    // Classifier defaults
    pub fn arrangement_rules() -> Vec<KeywordRule<Arrangement>> {
        vec![
            KeywordRule::new(
                Arrangement::Remote,
                &[
                    "remote",
                    "work from home",
                    "wfh",
                    "anywhere",
                    "telecommute",
                    "distributed",
                ],
            ),
            KeywordRule::new(Arrangement::Hybrid, &["hybrid"]),
            KeywordRule::new(
                Arrangement::Onsite,
                &["on-site", "onsite", "on site", "in-office", "in office"],
            ),
        ]
    }

    pub fn job_type_rules() -> Vec<KeywordRule<JobType>> {
        vec![
            KeywordRule::new(
                JobType::FullTime,
                &["full-time", "full time", "fulltime", "permanent"],
            ),
            KeywordRule::new(JobType::PartTime, &["part-time", "part time", "parttime"]),
            KeywordRule::new(
                JobType::Contract,
                &["contract", "temporary", "fixed-term", "fixed term"],
            ),
            KeywordRule::new(
                JobType::Freelance,
                &["freelance", "project-based", "per project"],
            ),
        ]
    }

    // Display defaults
    pub fn line_template() -> String {
        "#{id} {title} | {company} | {location} | {source}".into()
    }
    pub fn excerpt_words() -> usize {
        30
    }
}
