//! Read-only HTTP storage implementation.
//!
//! Reads a job collection published as a JSON document, e.g. the output of a
//! scheduled refresh uploaded to a static file host.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{HttpConfig, RawJob};
use crate::storage::{JobStorage, WriteMetadata};

/// Create a configured asynchronous HTTP client.
pub fn create_client(config: &HttpConfig) -> Result<Client> {
    let client = Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// HTTP storage backend. Writes are rejected.
#[derive(Debug, Clone)]
pub struct HttpStorage {
    client: Client,
    url: Url,
}

impl HttpStorage {
    /// Create storage reading from `url`.
    pub fn new(client: Client, url: &str) -> Result<Self> {
        let url = Url::parse(url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::config(format!(
                "Unsupported URL scheme for job store: {}",
                url.scheme()
            )));
        }
        Ok(Self { client, url })
    }

    /// Create storage with a client built from configuration.
    pub fn from_config(config: &HttpConfig, url: &str) -> Result<Self> {
        Self::new(create_client(config)?, url)
    }
}

#[async_trait]
impl JobStorage for HttpStorage {
    async fn read_records(&self) -> Result<Option<Vec<RawJob>>> {
        let response = self.client.get(self.url.clone()).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            log::warn!("No job collection published at {}", self.url);
            return Ok(None);
        }

        let bytes = response.error_for_status()?.bytes().await?;
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    async fn write_records(&self, _records: &[RawJob]) -> Result<WriteMetadata> {
        Err(AppError::ReadOnly(self.location()))
    }

    fn location(&self) -> String {
        self.url.to_string()
    }
}
