use anyhow::{Context, Result};
use log::{debug, warn};
use std::io::Write;
use std::path::Path;

use crate::{runtime::Runtime, version::get_versions_from_file};

/// Print the version specifiers found in a version file
#[tracing::instrument(skip(runtime, out))]
pub fn version_file<R: Runtime, W: Write>(
    runtime: &R,
    path: &Path,
    json: bool,
    out: &mut W,
) -> Result<()> {
    if !runtime.exists(path) {
        anyhow::bail!("Version file {} does not exist.", path.display());
    }

    let versions = get_versions_from_file(runtime, path)?;
    debug!("Resolved {} version(s) from {}", versions.len(), path.display());
    if versions.is_empty() {
        warn!("No version specifier found in {}", path.display());
    }

    if json {
        let rendered = serde_json::to_string(&versions).context("Failed to encode versions")?;
        writeln!(out, "{}", rendered)?;
    } else {
        for version in &versions {
            writeln!(out, "{}", version)?;
        }
    }
    Ok(())
}
