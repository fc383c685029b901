use anyhow::Result;
use log::debug;
use reqwest::{
    Client,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};

use crate::cache::HostOrigin;
use crate::github::{DEFAULT_API_URL, GitHub};
use crate::runtime::{Runtime, non_empty_env};

pub const SERVER_URL_ENV: &str = "GITHUB_SERVER_URL";
pub const API_URL_ENV: &str = "GITHUB_API_URL";
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

const USER_AGENT: &str = "setup-py";

/// Settings taken from the runner environment, with CLI overrides applied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub server_url: Option<String>,
    pub api_url: Option<String>,
    pub token: Option<String>,
}

impl Config {
    #[tracing::instrument(skip(runtime))]
    pub fn from_runtime<R: Runtime + ?Sized>(runtime: &R) -> Self {
        Self {
            server_url: non_empty_env(runtime, SERVER_URL_ENV),
            api_url: non_empty_env(runtime, API_URL_ENV),
            token: non_empty_env(runtime, TOKEN_ENV),
        }
    }

    /// Replaces values with the ones given explicitly on the command line.
    pub fn with_overrides(mut self, server_url: Option<String>, api_url: Option<String>) -> Self {
        if server_url.is_some() {
            self.server_url = server_url;
        }
        if api_url.is_some() {
            self.api_url = api_url;
        }
        self
    }

    pub fn host_origin(&self) -> HostOrigin {
        HostOrigin::from_server_url(self.server_url.as_deref())
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    /// HTTP client with the user agent and, when a token is configured, a
    /// bearer `Authorization` header.
    pub fn http_client(&self) -> Result<Client> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &self.token {
            let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token))?;
            auth_value.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth_value);
            debug!("Using {} for authentication", TOKEN_ENV);
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;
        Ok(client)
    }

    pub fn github(&self) -> Result<GitHub> {
        Ok(GitHub::new(self.http_client()?, self.api_url.clone()))
    }
}
