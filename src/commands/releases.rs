use anyhow::Result;
use log::{debug, info};
use std::io::Write;

use crate::{
    github::{GetReleases, GitHubRepo},
    version::{VersionResolver, validate_version},
};

/// List the releases of a repository, or resolve a version spec against them
#[tracing::instrument(skip(github, out))]
pub async fn releases<G: GetReleases, W: Write>(
    github: &G,
    repo_str: &str,
    version: Option<&str>,
    include_prerelease: bool,
    out: &mut W,
) -> Result<()> {
    let repo = repo_str.parse::<GitHubRepo>()?;

    if let Some(spec) = version {
        if spec != "latest" && !validate_version(spec) {
            anyhow::bail!("Invalid version '{}'.", spec);
        }
    }

    debug!("Listing releases of {} from {}", repo, github.api_url());
    let releases = github.get_releases(&repo).await?;
    info!("Found {} releases of {}", releases.len(), repo);

    match version {
        Some(spec) => {
            let Some(release) = VersionResolver::resolve(&releases, spec, include_prerelease)
            else {
                anyhow::bail!("No release of {} matches version '{}'.", repo, spec);
            };
            info!("Resolved {} to {}", spec, release.tag_name);
            writeln!(out, "{}", release.tag_name)?;
        }
        None => {
            for release in releases
                .iter()
                .filter(|r| !r.draft && (include_prerelease || !r.prerelease))
            {
                writeln!(out, "{}", release.tag_name)?;
            }
        }
    }
    Ok(())
}
