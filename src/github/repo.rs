use anyhow::{Result, anyhow};
use std::str::FromStr;

/// GraalPy releases live here.
pub const GRAALPY_REPO: &str = "oracle/graalpython";

#[derive(Debug, PartialEq, Clone)]
pub struct GitHubRepo {
    pub owner: String,
    pub repo: String,
}

impl std::fmt::Display for GitHubRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl FromStr for GitHubRepo {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                Ok(GitHubRepo {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                })
            }
            _ => Err(anyhow!(
                "Invalid repository format '{}'. Expected 'owner/repo'.",
                s
            )),
        }
    }
}

impl GitHubRepo {
    /// Path of the releases listing, relative to the API root.
    pub fn releases_path(&self) -> String {
        format!("/repos/{}/{}/releases", self.owner, self.repo)
    }
}
