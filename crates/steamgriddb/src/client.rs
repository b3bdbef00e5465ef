//! SteamGridDB API client.
//!
//! Async HTTP client using `reqwest` with Bearer token authentication.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use crate::types::{ApiResponse, ArtworkMatch, ImageData, ImageFilters, SearchResult};

const DEFAULT_BASE_URL: &str = "https://www.steamgriddb.com/api/v2";

/// Errors from the SteamGridDB client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid API key")]
    InvalidKey,
}

/// SteamGridDB API client.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Creates a new client with the given API key.
    pub fn new(api_key: &str) -> Result<Self, Error> {
        if api_key.trim().is_empty() {
            return Err(Error::InvalidKey);
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|_| Error::InvalidKey)?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Points the client at a different API root.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Performs an authenticated GET request.
    async fn get(&self, endpoint: &str, params: &[(String, String)]) -> Result<Vec<u8>, Error> {
        let url = format!("{}{}", self.base_url, endpoint);
        let resp = self.http.get(&url).query(params).send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp.bytes().await?.to_vec())
    }

    /// Searches for games by name.
    pub async fn search(&self, term: &str) -> Result<Vec<SearchResult>, Error> {
        let encoded = utf8_percent_encode(term, NON_ALPHANUMERIC).to_string();
        let body = self
            .get(&format!("/search/autocomplete/{encoded}"), &[])
            .await?;
        let resp: ApiResponse<Vec<SearchResult>> = serde_json::from_slice(&body)?;
        Ok(resp.data)
    }

    /// Returns grid images for a game.
    pub async fn get_grids(
        &self,
        game_id: i32,
        filters: Option<&ImageFilters>,
    ) -> Result<Vec<ImageData>, Error> {
        let params = build_params(filters);
        let body = self.get(&format!("/grids/game/{game_id}"), &params).await?;
        let resp: ApiResponse<Vec<ImageData>> = serde_json::from_slice(&body)?;
        Ok(resp.data)
    }

    /// Resolves a game name to its canonical title and cover art.
    ///
    /// Returns `Ok(None)` when the search has no results. A game without
    /// grids still matches, with no image.
    pub async fn lookup(&self, name: &str) -> Result<Option<ArtworkMatch>, Error> {
        let results = self.search(name).await?;
        let Some(best) = best_match(&results, name) else {
            tracing::debug!(name, "no SteamGridDB match");
            return Ok(None);
        };

        let grids = self
            .get_grids(best.id, Some(&ImageFilters::cover_art()))
            .await?;
        let image_ref = grids
            .into_iter()
            .map(|g| g.url)
            .find(|url| !url.is_empty());

        tracing::debug!(
            name,
            game_id = best.id,
            matched = %best.name,
            has_image = image_ref.is_some(),
            "SteamGridDB match"
        );

        Ok(Some(ArtworkMatch {
            display_name: best.name.clone(),
            image_ref,
        }))
    }
}

/// Picks the most plausible search result for `name`.
///
/// Exact (case-insensitive) title matches beat everything else; within each
/// group verified entries win, then API order.
fn best_match<'a>(results: &'a [SearchResult], name: &str) -> Option<&'a SearchResult> {
    let name = name.trim();
    let exact: Vec<&SearchResult> = results
        .iter()
        .filter(|r| r.name.trim().eq_ignore_ascii_case(name))
        .collect();

    let pool: Vec<&SearchResult> = if exact.is_empty() {
        results.iter().collect()
    } else {
        exact
    };

    pool.iter()
        .find(|r| r.verified)
        .or_else(|| pool.first())
        .copied()
}

/// Builds query parameters from filters.
fn build_params(filters: Option<&ImageFilters>) -> Vec<(String, String)> {
    let mut params = Vec::new();

    if let Some(f) = filters {
        if !f.dimension.is_empty() {
            params.push(("dimensions".into(), f.dimension.clone()));
        }
        if !f.mime_type.is_empty() {
            params.push(("mimes".into(), f.mime_type.clone()));
        }
        if f.static_only {
            params.push(("types".into(), "static".into()));
        }
        params.push((
            "nsfw".into(),
            if f.allow_nsfw { "any" } else { "false" }.into(),
        ));
        params.push((
            "humor".into(),
            if f.allow_humor { "any" } else { "false" }.into(),
        ));
    }

    params
}
