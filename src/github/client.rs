use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::pagination::next_page_url;
use super::repo::GitHubRepo;
use super::types::{ApiResponse, Release};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Releases requested per page.
const PER_PAGE: &str = "100";

/// Upper bound on followed `next` links, in case a server keeps linking forward.
pub const MAX_PAGES: usize = 50;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GetReleases: Send + Sync {
    async fn get_releases(&self, repo: &GitHubRepo) -> Result<Vec<Release>>;
    fn api_url(&self) -> &str;
}

pub struct GitHub {
    pub client: Client,
    pub api_url: String,
}

impl GitHub {
    #[tracing::instrument(skip(client, api_url))]
    pub fn new(client: Client, api_url: Option<String>) -> Self {
        let api_url = api_url
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self { client, api_url }
    }
}

#[async_trait]
impl GetReleases for GitHub {
    #[tracing::instrument(skip(self, repo))]
    async fn get_releases(&self, repo: &GitHubRepo) -> Result<Vec<Release>> {
        GitHub::fetch_releases(repo, &self.client, &self.api_url).await
    }

    #[tracing::instrument(skip(self))]
    fn api_url(&self) -> &str {
        &self.api_url
    }
}

impl GitHub {
    /// Lists every release of `repo`, following `rel="next"` links until the
    /// last page. Releases are returned in request order.
    #[tracing::instrument(skip(client, api_url))]
    pub async fn fetch_releases(
        repo: &GitHubRepo,
        client: &Client,
        api_url: &str,
    ) -> Result<Vec<Release>> {
        let first_url = format!("{}{}", api_url, repo.releases_path());
        debug!("Fetching releases from {}...", first_url);

        let mut response: ApiResponse<Vec<Release>> = GitHub::fetch_page(
            client
                .get(&first_url)
                .query(&[("per_page", PER_PAGE)]),
        )
        .await?;

        let mut releases = Vec::new();
        let mut pages = 1;

        loop {
            let next = next_page_url(&response);
            releases.append(&mut response.result);

            let Some(next) = next else {
                break;
            };

            if pages >= MAX_PAGES {
                warn!(
                    "Stopped listing releases of {} after {} pages",
                    repo, MAX_PAGES
                );
                break;
            }

            debug!("Fetching releases page {} from {}...", pages + 1, next);
            response = GitHub::fetch_page(client.get(&next)).await?;
            pages += 1;
        }

        debug!("Found {} releases of {} in {} pages", releases.len(), repo, pages);
        Ok(releases)
    }

    async fn fetch_page<T: DeserializeOwned>(
        request: reqwest::RequestBuilder,
    ) -> Result<ApiResponse<T>> {
        let response = request
            .send()
            .await
            .context("Failed to send request to GitHub API")?
            .error_for_status()?;

        let status_code = response.status().as_u16();
        let headers = response.headers().clone();
        let result = response
            .json::<T>()
            .await
            .context("Failed to parse JSON response from GitHub API")?;

        Ok(ApiResponse {
            status_code,
            result,
            headers,
        })
    }
}
