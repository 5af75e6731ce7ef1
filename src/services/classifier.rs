//! Keyword-based job classification.
//!
//! Infers the work arrangement and employment type of a job from its free
//! text fields using ordered keyword rules.

use crate::models::{Arrangement, ClassifierConfig, Job, JobType, KeywordRule};

/// Service for detecting arrangement and job type tags.
#[derive(Debug, Clone)]
pub struct Classifier {
    arrangement: Vec<KeywordRule<Arrangement>>,
    job_type: Vec<KeywordRule<JobType>>,
}

impl Classifier {
    /// Create a classifier from configured rules. Keywords are lowercased.
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            arrangement: lowercase_rules(&config.arrangement),
            job_type: lowercase_rules(&config.job_type),
        }
    }

    /// Detect the work arrangement from location, title, category and type.
    pub fn detect_arrangement(&self, job: &Job) -> Option<Arrangement> {
        let haystack = haystack(&[&job.location, &job.title, &job.category, &job.kind]);
        first_match(&self.arrangement, &haystack)
    }

    /// Detect the employment type from category, type and title.
    pub fn detect_job_type(&self, job: &Job) -> Option<JobType> {
        let haystack = haystack(&[&job.category, &job.kind, &job.title]);
        first_match(&self.job_type, &haystack)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default())
    }
}

fn lowercase_rules<T: Copy>(rules: &[KeywordRule<T>]) -> Vec<KeywordRule<T>> {
    rules
        .iter()
        .map(|rule| KeywordRule {
            tag: rule.tag,
            keywords: rule
                .keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        })
        .collect()
}

fn haystack(fields: &[&Option<String>]) -> String {
    fields
        .iter()
        .map(|field| field.as_deref().unwrap_or_default())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn first_match<T: Copy>(rules: &[KeywordRule<T>], haystack: &str) -> Option<T> {
    rules.iter().find_map(|rule| {
        rule.keywords
            .iter()
            .any(|keyword| haystack.contains(keyword.as_str()))
            .then_some(rule.tag)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(location: &str, title: &str, category: &str, kind: &str) -> Job {
        let text = |s: &str| (!s.is_empty()).then(|| s.to_string());
        let mut job = Job::new(0);
        job.location = text(location);
        job.title = text(title);
        job.category = text(category);
        job.kind = text(kind);
        job
    }

    #[test]
    fn test_detect_remote_from_location() {
        let classifier = Classifier::default();
        let job = job("Remote - US", "Engineer II", "", "");
        assert_eq!(classifier.detect_arrangement(&job), Some(Arrangement::Remote));
    }

    #[test]
    fn test_rule_order_is_priority() {
        let classifier = Classifier::default();
        let both = job("Hybrid or Remote", "On-site lead", "", "");
        assert_eq!(classifier.detect_arrangement(&both), Some(Arrangement::Remote));

        let hybrid = job("Berlin (hybrid)", "On-site lead", "", "");
        assert_eq!(classifier.detect_arrangement(&hybrid), Some(Arrangement::Hybrid));
    }

    #[test]
    fn test_detect_job_type() {
        let classifier = Classifier::default();
        assert_eq!(
            classifier.detect_job_type(&job("", "Designer", "", "Full Time")),
            Some(JobType::FullTime)
        );
        assert_eq!(
            classifier.detect_job_type(&job("", "Part-time VA", "Admin", "")),
            Some(JobType::PartTime)
        );
        assert_eq!(
            classifier.detect_job_type(&job("", "Logo design", "Freelance", "")),
            Some(JobType::Freelance)
        );
    }

    #[test]
    fn test_job_type_ignores_location() {
        let classifier = Classifier::default();
        let job = job("Full time office", "Writer", "", "");
        assert_eq!(classifier.detect_job_type(&job), None);
    }

    #[test]
    fn test_no_match_is_none() {
        let classifier = Classifier::default();
        let job = job("Manila", "Accountant", "Finance", "");
        assert_eq!(classifier.detect_arrangement(&job), None);
        assert_eq!(classifier.detect_job_type(&job), None);
    }

    #[test]
    fn test_fields_do_not_fuse() {
        let classifier = Classifier::default();
        // "re" + "mote" must not read as "remote"
        let job = job("re", "mote", "", "");
        assert_eq!(classifier.detect_arrangement(&job), None);
    }

    #[test]
    fn test_custom_rules_are_lowercased() {
        let config = ClassifierConfig {
            arrangement: vec![KeywordRule::new(Arrangement::Onsite, &["  HQ Only "])],
            job_type: vec![KeywordRule::new(JobType::Contract, &["B2B"])],
        };
        let classifier = Classifier::new(&config);
        let job = job("hq only", "", "b2b", "");
        assert_eq!(classifier.detect_arrangement(&job), Some(Arrangement::Onsite));
        assert_eq!(classifier.detect_job_type(&job), Some(JobType::Contract));
    }
}
