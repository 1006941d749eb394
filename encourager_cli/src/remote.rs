//! HTTP client for the verse lookup service.

use async_trait::async_trait;
use encourager_core::{Error, Language, Result, VersePayload, VerseSource};
use reqwest::Client;
use std::time::Duration;

/// Verse source backed by `GET /api/verse/random`
pub struct HttpVerseSource {
    client: Client,
    base_url: String,
}

impl HttpVerseSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl VerseSource for HttpVerseSource {
    async fn fetch(&self, language: Language, index: Option<i64>) -> Result<VersePayload> {
        let url = format!("{}/api/verse/random", self.base_url);

        let mut query = vec![("lang", language.code().to_string())];
        if let Some(index) = index {
            query.push(("index", index.to_string()));
        }

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| Error::LookupUnreachable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::LookupUnreachable(format!(
                "{} returned status {}",
                url,
                response.status()
            )));
        }

        let verse = response
            .json::<VersePayload>()
            .await
            .map_err(|e| Error::LookupUnreachable(format!("invalid response body: {}", e)))?;

        tracing::debug!("Fetched {} verse {} from {}", language, verse.index, url);
        Ok(verse)
    }
}
