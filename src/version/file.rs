//! Reading version specifiers out of version files.
//!
//! Supported inputs:
//!
//! - plain files such as `.python-version` (one specifier per line)
//! - `pyproject.toml` and other `*.toml` manifests
//! - `Pipfile`
//! - asdf `.tool-versions`
//!
//! Malformed manifests and missing fields both yield an empty list. Only
//! file system errors are returned as `Err`; invalid UTF-8 is decoded lossily.

use anyhow::Result;
use log::{debug, info};
use std::path::Path;
use toml::{Table, Value};

use crate::runtime::Runtime;

/// Tool name looked up in `.tool-versions`.
const TOOL_VERSIONS_TOOL: &str = "python";

/// pyproject keys, in priority order.
const PYPROJECT_KEYS: &[&[&str]] = &[
    &["project", "requires-python"],
    &["tool", "poetry", "dependencies", "python"],
];

/// Pipfile keys, in priority order.
const PIPFILE_KEYS: &[&[&str]] = &[
    &["requires", "python_full_version"],
    &["requires", "python_version"],
];

/// Version file formats, detected from the file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionFileFormat {
    Plain,
    PyProject,
    Pipfile,
    ToolVersions,
}

impl VersionFileFormat {
    pub fn detect(path: &Path) -> Self {
        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        match file_name {
            "Pipfile" => VersionFileFormat::Pipfile,
            ".tool-versions" => VersionFileFormat::ToolVersions,
            _ if path.extension().is_some_and(|ext| ext == "toml") => {
                VersionFileFormat::PyProject
            }
            _ => VersionFileFormat::Plain,
        }
    }
}

/// Resolve version specifiers from any supported version file.
///
/// The format is picked by [`VersionFileFormat::detect`]; callers that already
/// know the format can call the specific extractor instead.
#[tracing::instrument(skip(runtime))]
pub fn get_versions_from_file<R: Runtime + ?Sized>(
    runtime: &R,
    path: &Path,
) -> Result<Vec<String>> {
    let format = VersionFileFormat::detect(path);
    debug!("Detected {:?} format for {}", format, path.display());

    match format {
        VersionFileFormat::Plain => get_versions_from_plain_file(runtime, path),
        VersionFileFormat::PyProject => get_version_from_toml_file(runtime, path),
        VersionFileFormat::Pipfile => get_version_from_pipfile(runtime, path),
        VersionFileFormat::ToolVersions => get_versions_from_tool_versions(runtime, path),
    }
}

/// One specifier per line. Comment lines (`#`) and blank lines are skipped,
/// and anything after the first `/` is dropped so pyenv entries like
/// `3.10/envs/virtualenv` resolve to `3.10`.
#[tracing::instrument(skip(runtime))]
pub fn get_versions_from_plain_file<R: Runtime + ?Sized>(
    runtime: &R,
    path: &Path,
) -> Result<Vec<String>> {
    debug!("Trying to resolve versions from {}", path.display());
    let content = read_lossy(runtime, path)?;

    let versions = parse_plain(&content);
    info!("Resolved {} as {}", path.display(), versions.join(", "));
    Ok(versions)
}

/// `project.requires-python`, falling back to `tool.poetry.dependencies.python`.
#[tracing::instrument(skip(runtime))]
pub fn get_version_from_toml_file<R: Runtime + ?Sized>(
    runtime: &R,
    path: &Path,
) -> Result<Vec<String>> {
    debug!("Trying to resolve version from {}", path.display());
    let content = read_lossy(runtime, path)?;

    let versions = match parse_table(&content, path) {
        Some(table) => lookup_first(&table, PYPROJECT_KEYS),
        None => Vec::new(),
    };

    info!("Extracted {:?} from {}", versions, path.display());
    Ok(versions)
}

/// `requires.python_full_version`, falling back to `requires.python_version`.
#[tracing::instrument(skip(runtime))]
pub fn get_version_from_pipfile<R: Runtime + ?Sized>(
    runtime: &R,
    path: &Path,
) -> Result<Vec<String>> {
    debug!("Trying to resolve version from {}", path.display());
    let content = read_lossy(runtime, path)?;

    let versions = match parse_table(&content, path) {
        Some(table) => lookup_first(&table, PIPFILE_KEYS),
        None => Vec::new(),
    };

    info!("Extracted {:?} from {}", versions, path.display());
    Ok(versions)
}

/// Every version listed on `python` lines of an asdf `.tool-versions` file.
#[tracing::instrument(skip(runtime))]
pub fn get_versions_from_tool_versions<R: Runtime + ?Sized>(
    runtime: &R,
    path: &Path,
) -> Result<Vec<String>> {
    debug!("Trying to resolve versions from {}", path.display());
    let content = read_lossy(runtime, path)?;

    let versions: Vec<String> = split_lines(&content)
        .filter_map(|line| {
            let line = strip_comment(line).trim();
            let mut tokens = line.split_whitespace();
            (tokens.next() == Some(TOOL_VERSIONS_TOOL)).then_some(tokens)
        })
        .flatten()
        .map(str::to_string)
        .collect();

    info!("Resolved {} as {}", path.display(), versions.join(", "));
    Ok(versions)
}

fn read_lossy<R: Runtime + ?Sized>(runtime: &R, path: &Path) -> Result<String> {
    let bytes = runtime.read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn parse_plain(content: &str) -> Vec<String> {
    split_lines(content)
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let version = line.split('/').next().unwrap_or(line).trim();
            (!version.is_empty()).then(|| version.to_string())
        })
        .collect()
}

/// Splits on `\r\n`, `\r` and `\n`.
fn split_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .split('\n')
        .flat_map(|line| line.split('\r'))
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_table(content: &str, path: &Path) -> Option<Table> {
    match content.parse::<Table>() {
        Ok(table) => Some(table),
        Err(e) => {
            debug!("Ignoring malformed TOML in {}: {}", path.display(), e);
            None
        }
    }
}

/// Returns the first string found among `key_paths`, in priority order.
fn lookup_first(table: &Table, key_paths: &[&[&str]]) -> Vec<String> {
    key_paths
        .iter()
        .find_map(|keys| lookup_str(table, keys))
        .map(|v| vec![v.to_string()])
        .unwrap_or_default()
}

fn lookup_str<'a>(table: &'a Table, keys: &[&str]) -> Option<&'a str> {
    let (last, parents) = keys.split_last()?;
    let mut current = table;
    for key in parents {
        current = current.get(*key)?.as_table()?;
    }
    match current.get(*last)? {
        Value::String(s) => Some(s.as_str()),
        _ => None,
    }
}
