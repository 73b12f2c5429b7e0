//! `OmdbClient` - OMDb API client implementation.

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::LocalOmdbApi;
use super::error::LookupError;
use super::types::{MovieDetail, OmdbEnvelope, OmdbSearchResponse, SearchPage, SearchResult};

/// Default base URL for the OMDb API.
pub const OMDB_BASE_URL: &str = "https://www.omdbapi.com/";

/// OMDb API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct OmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// API key sent as the `apikey` query parameter.
    api_key: String,
}

/// Builder for `OmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct OmdbClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    user_agent: Option<String>,
}

impl OmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            user_agent: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_key` is not set or empty.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<OmdbClient> {
        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .context("api_key is required")?;
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(OMDB_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(OmdbClient {
            http_client,
            base_url,
            api_key,
        })
    }
}

/// Converts a reqwest error, dropping the request URL that carries `apikey`.
fn transport_error(e: reqwest::Error) -> LookupError {
    LookupError::Transport(e.without_url().to_string())
}

impl OmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> OmdbClientBuilder {
        OmdbClientBuilder::new()
    }

    /// Sends a GET request with the API key and the given query params,
    /// returning the raw body of a successful HTTP response.
    #[instrument(skip_all)]
    async fn get_body(&self, query: &[(&str, String)]) -> Result<String, LookupError> {
        let request = self
            .http_client
            .get(self.base_url.clone())
            .query(&[("apikey", self.api_key.as_str())])
            .query(query)
            .build()
            .map_err(transport_error)?;

        tracing::debug!(?query, "OMDb API request");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| {
                LookupError::Transport(format!("failed to read response body: {}", e.without_url()))
            })?;

        if !status.is_success() {
            let message = serde_json::from_str::<OmdbEnvelope>(&body)
                .ok()
                .and_then(|envelope| envelope.error)
                .unwrap_or(body);
            return Err(LookupError::Http {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }
}

impl LocalOmdbApi for OmdbClient {
    #[instrument(skip_all, fields(query = %query, page = page))]
    async fn search(&self, query: &str, page: u32) -> Result<SearchPage, LookupError> {
        let params = [("s", String::from(query)), ("page", page.to_string())];
        let body = self.get_body(&params).await?;

        let response: OmdbSearchResponse =
            serde_json::from_str(&body).map_err(|e| LookupError::Decode(e.to_string()))?;

        if !response.is_success() {
            let message = response
                .error
                .unwrap_or_else(|| String::from("unknown error"));
            return Err(LookupError::Service(message));
        }

        let total_results = response
            .total_results
            .as_deref()
            .ok_or_else(|| LookupError::Decode(String::from("missing totalResults")))?
            .trim()
            .parse::<u32>()
            .map_err(|e| LookupError::Decode(format!("invalid totalResults: {e}")))?;

        let results: Vec<SearchResult> = response
            .search
            .into_iter()
            .map(SearchResult::from)
            .collect();

        tracing::debug!(
            fetched = results.len(),
            total_results,
            "OMDb search completed"
        );

        Ok(SearchPage {
            results,
            total_results,
        })
    }

    #[instrument(skip_all, fields(id = %id))]
    async fn detail(&self, id: &str) -> Result<MovieDetail, LookupError> {
        let params = [("i", String::from(id))];
        let body = self.get_body(&params).await?;

        if let Ok(envelope) = serde_json::from_str::<OmdbEnvelope>(&body)
            && let Some(message) = envelope.failure_message()
        {
            tracing::warn!(id, error = message, "OMDb detail lookup reported a failure");
        }

        let mut detail: MovieDetail =
            serde_json::from_str(&body).map_err(|e| LookupError::Decode(e.to_string()))?;
        if detail.id.is_empty() {
            detail.id = String::from(id);
        }
        Ok(detail)
    }
}
