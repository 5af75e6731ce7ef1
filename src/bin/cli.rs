//! jobboard CLI
//!
//! Browse the aggregated job store and refresh it from scraped batches.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jobboard::{
    error::Result,
    models::{Config, Job, JobFilter, PageRequest, SortOrder},
    pipeline::{self, IngestOptions},
    services::{self, Classifier},
    storage::{JobStorage, LocalStorage},
};

/// jobboard - Aggregated Job Postings
#[derive(Parser, Debug)]
#[command(
    name = "jobboard",
    version,
    about = "Browse and refresh aggregated job postings"
)]
struct Cli {
    /// Path to storage directory containing config and the job store
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Read the job store from a URL instead of the storage directory
    #[cfg(feature = "remote")]
    #[arg(long, value_name = "URL")]
    remote: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List jobs with optional filters
    List {
        /// Only jobs from this source (exact match)
        #[arg(long)]
        source: Option<String>,

        /// Only jobs whose category or type equals this value
        #[arg(long)]
        category: Option<String>,

        /// remote, hybrid or onsite
        #[arg(long)]
        arrangement: Option<String>,

        /// full-time, part-time, contract or freelance
        #[arg(long)]
        job_type: Option<String>,

        /// Case-insensitive text search over title and descriptions
        #[arg(long)]
        search: Option<String>,

        /// newest or oldest (default: store order)
        #[arg(long, default_value = "")]
        sort: String,

        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single job by id
    Show {
        id: usize,

        /// Print the job as JSON
        #[arg(long)]
        json: bool,
    },

    /// List available sources and categories
    Facets,

    /// Merge scraped batch files into the job store
    Ingest {
        /// JSON files, each an array of raw job records
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Write even if a source lost too many records
        #[arg(long)]
        force: bool,
    },

    /// Validate configuration
    Validate,

    /// Show job store info
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Pick the job store backend from the command line.
fn open_storage(cli: &Cli, config: &Config) -> Result<Box<dyn JobStorage>> {
    #[cfg(feature = "remote")]
    if let Some(url) = &cli.remote {
        let storage = jobboard::storage::HttpStorage::from_config(&config.http, url)?;
        return Ok(Box::new(storage));
    }

    Ok(Box::new(LocalStorage::with_jobs_file(
        &cli.storage_dir,
        config.storage.jobs_file.as_str(),
    )))
}

fn print_job_line(job: &Job, config: &Config) {
    println!("{}", job.format(&config.display.line_template));

    let text = job
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .or(job.job_description.as_deref())
        .unwrap_or_default();
    if !text.is_empty() {
        println!(
            "    {}",
            services::truncate_words(text, config.display.excerpt_words)
        );
    }
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.storage_dir.join("config.toml");
    let config = Config::load_or_default(&config_path);
    log::debug!("Loaded configuration from {}", cli.storage_dir.display());

    let storage = open_storage(&cli, &config)?;
    let classifier = Classifier::new(&config.classifier);

    match cli.command {
        Command::List {
            source,
            category,
            arrangement,
            job_type,
            search,
            sort,
            page,
            json,
        } => {
            let jobs = pipeline::run_load(storage.as_ref(), &classifier).await;
            let filter = JobFilter {
                source,
                category,
                arrangement,
                job_type,
                search,
            };
            let request = PageRequest::new(page, config.query.page_size);
            let result = services::query(&jobs, &filter, SortOrder::from_param(&sort), request);

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                for job in &result.jobs {
                    print_job_line(job, &config);
                }
                println!(
                    "Page {} of {} ({} matching, {} total)",
                    result.page, result.total_pages, result.filtered, result.total
                );
            }
        }

        Command::Show { id, json } => {
            let jobs = pipeline::run_load(storage.as_ref(), &classifier).await;
            let job = services::find_job(&jobs, id)?;

            if json {
                println!("{}", serde_json::to_string_pretty(job)?);
            } else {
                println!("{}", job.format(&config.display.line_template));
                for (label, value) in [
                    ("Salary", job.salary.as_deref()),
                    ("Category", job.category.as_deref()),
                    ("Type", job.kind.as_deref()),
                    ("Arrangement", Some(job.arrangement_tag())),
                    ("Job type", Some(job.job_type_tag())),
                    ("Posted", job.posted_date.as_deref()),
                    ("URL", job.url()),
                ] {
                    if let Some(value) = value.filter(|v| !v.is_empty()) {
                        println!("{label}: {value}");
                    }
                }
                for text in [&job.description, &job.job_description].into_iter().flatten() {
                    if !text.is_empty() {
                        println!();
                        println!("{text}");
                    }
                }
            }
        }

        Command::Facets => {
            let jobs = pipeline::run_load(storage.as_ref(), &classifier).await;
            let facets = services::facets(&jobs);
            println!("Sources: {}", facets.sources.join(", "));
            println!("Categories: {}", facets.categories.join(", "));
        }

        Command::Ingest { files, force } => {
            let mut batches = Vec::with_capacity(files.len());
            for path in &files {
                let batch = LocalStorage::read_batch(path).await?;
                log::info!("Read {} records from {}", batch.len(), path.display());
                batches.push(batch);
            }

            let report = pipeline::run_ingest(
                storage.as_ref(),
                batches,
                &config.ingest,
                IngestOptions { force },
            )
            .await?;

            log::info!(
                "Saved {} jobs to {} (+{} -{}, {} duplicates dropped)",
                report.written,
                report.location,
                report.diff.added,
                report.diff.removed,
                report.duplicates_dropped
            );
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
        }

        Command::Info => {
            log::info!("Job store: {}", storage.location());
            match storage.read_records().await {
                Ok(Some(records)) => {
                    let jobs = pipeline::build_jobs(records, &classifier);
                    log::info!("Records: {}", jobs.len());
                    for (source, count) in services::source_counts(&jobs) {
                        log::info!("  {}: {}", source, count);
                    }
                }
                Ok(None) => log::info!("No job store found yet."),
                Err(e) => log::warn!("Job store is unreadable: {}", e),
            }
        }
    }

    Ok(())
}
