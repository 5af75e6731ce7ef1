//! Job record data structure.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// A record as produced by a scraper: an untyped JSON object.
pub type RawJob = Map<String, Value>;

/// Inferred work arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Arrangement {
    Remote,
    Hybrid,
    Onsite,
}

impl AsRef<str> for Arrangement {
    fn as_ref(&self) -> &str {
        match self {
            Arrangement::Remote => "remote",
            Arrangement::Hybrid => "hybrid",
            Arrangement::Onsite => "onsite",
        }
    }
}

/// Inferred employment type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Freelance,
}

impl AsRef<str> for JobType {
    fn as_ref(&self) -> &str {
        match self {
            JobType::FullTime => "full-time",
            JobType::PartTime => "part-time",
            JobType::Contract => "contract",
            JobType::Freelance => "freelance",
        }
    }
}

/// A normalized job posting.
///
/// Text fields are `None` when the raw record did not carry them at all and
/// `Some("")` when it carried a null or empty value, so serializing a job
/// keeps the shape of the record it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Job {
    /// Ordinal position in the load (0-based)
    pub id: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Secondary description some boards provide
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Free-text type label from the board (e.g. "Full Time")
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Origin site name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Posting date as supplied by the board
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted_date: Option<String>,

    /// Alternate date field used by some boards
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Fields passed through untouched (url, tags, ...)
    #[serde(flatten)]
    pub extra: RawJob,

    #[serde(serialize_with = "tag_or_empty")]
    pub arrangement: Option<Arrangement>,

    #[serde(serialize_with = "tag_or_empty")]
    pub job_type: Option<JobType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed_date: Option<NaiveDateTime>,
}

impl Job {
    /// Create an empty job with the given id.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            title: None,
            company: None,
            location: None,
            description: None,
            job_description: None,
            salary: None,
            category: None,
            kind: None,
            source: None,
            posted_date: None,
            date: None,
            extra: RawJob::new(),
            arrangement: None,
            job_type: None,
            parsed_date: None,
        }
    }

    /// Derived arrangement tag, `""` when none was detected.
    pub fn arrangement_tag(&self) -> &str {
        self.arrangement.as_ref().map_or("", AsRef::as_ref)
    }

    /// Derived job type tag, `""` when none was detected.
    pub fn job_type_tag(&self) -> &str {
        self.job_type.as_ref().map_or("", AsRef::as_ref)
    }

    /// Link to the original posting, if the board supplied one.
    pub fn url(&self) -> Option<&str> {
        self.extra.get("url").and_then(Value::as_str)
    }

    /// Format job for display using a template.
    ///
    /// Supported placeholders:
    /// - `{id}`, `{title}`, `{company}`, `{location}`, `{source}`
    /// - `{salary}`, `{category}`, `{type}`, `{posted_date}`
    /// - `{arrangement}`, `{job_type}`, `{url}`
    pub fn format(&self, template: &str) -> String {
        let text = |field: &Option<String>| field.as_deref().unwrap_or_default().to_string();

        template
            .replace("{id}", &self.id.to_string())
            .replace("{title}", &text(&self.title))
            .replace("{company}", &text(&self.company))
            .replace("{location}", &text(&self.location))
            .replace("{source}", &text(&self.source))
            .replace("{salary}", &text(&self.salary))
            .replace("{category}", &text(&self.category))
            .replace("{type}", &text(&self.kind))
            .replace("{posted_date}", &text(&self.posted_date))
            .replace("{arrangement}", self.arrangement_tag())
            .replace("{job_type}", self.job_type_tag())
            .replace("{url}", self.url().unwrap_or_default())
    }
}

fn tag_or_empty<T, S>(tag: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: AsRef<str>,
    S: Serializer,
{
    serializer.serialize_str(tag.as_ref().map_or("", AsRef::as_ref))
}
