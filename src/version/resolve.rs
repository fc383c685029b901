//! Version alias resolution against a list of releases.
//!
//! Release tags are normalized before matching: a `v` prefix or a product
//! prefix such as `graal-` / `vm-` is stripped, so `graal-24.1.0` is compared
//! as `24.1.0`.

use std::cmp::Ordering;

use crate::github::Release;

/// Spec values that match any release.
const LATEST_ALIASES: &[&str] = &["latest", "x", "X", "*"];

/// A parsed version or version spec: numeric segments, with `None` for a
/// wildcard, plus an optional pre-release suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ParsedVersion {
    segments: Vec<Option<u64>>,
    pre: Option<String>,
}

impl ParsedVersion {
    fn parse(input: &str) -> Option<Self> {
        let core = normalize_tag(input)?;
        let core = core.split('+').next().unwrap_or(core);
        let (numbers, pre) = match core.split_once('-') {
            Some((numbers, pre)) if !pre.is_empty() => (numbers, Some(pre.to_string())),
            Some(_) => return None,
            None => (core, None),
        };

        let segments = numbers
            .split('.')
            .map(|seg| match seg {
                "x" | "X" | "*" => Some(None),
                _ => seg.parse::<u64>().ok().map(Some),
            })
            .collect::<Option<Vec<_>>>()?;

        Some(ParsedVersion { segments, pre })
    }

    /// True when every segment of `self` (a spec) matches `version`.
    fn matches(&self, version: &ParsedVersion) -> bool {
        if self.segments.len() > version.segments.len() {
            return false;
        }
        let segments_match = self
            .segments
            .iter()
            .zip(&version.segments)
            .all(|(spec, actual)| spec.is_none() || spec == actual);

        segments_match
            && match &self.pre {
                Some(pre) => version.pre.as_deref() == Some(pre.as_str()),
                None => true,
            }
    }

    fn compare(&self, other: &ParsedVersion) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        for i in 0..len {
            let a = self.segments.get(i).copied().flatten().unwrap_or(0);
            let b = other.segments.get(i).copied().flatten().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        // A release sorts after its own pre-releases.
        match (&self.pre, &other.pre) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.cmp(b),
        }
    }
}

/// Strips `v` and product prefixes, returning the part starting at the first
/// digit or wildcard.
fn normalize_tag(tag: &str) -> Option<&str> {
    let tag = tag.trim();
    let tag = tag.strip_prefix('=').unwrap_or(tag);
    let tag = match tag.strip_prefix('v') {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_digit()) => rest,
        _ => tag,
    };
    let start = tag.find(|c: char| c.is_ascii_digit() || c == 'x' || c == 'X' || c == '*')?;
    if start > 0 && !tag[..start].ends_with('-') {
        return None;
    }
    Some(&tag[start..])
}

/// Version resolver - pure functions over slices of releases.
pub struct VersionResolver;

impl VersionResolver {
    /// Picks the highest release matching `spec`.
    ///
    /// Drafts are never selected. Pre-releases are only considered when
    /// `include_prerelease` is set or `spec` carries a pre-release suffix.
    pub fn resolve<'a>(
        releases: &'a [Release],
        spec: &str,
        include_prerelease: bool,
    ) -> Option<&'a Release> {
        let spec = spec.trim();
        let parsed_spec = if LATEST_ALIASES.contains(&spec) {
            None
        } else {
            Some(ParsedVersion::parse(spec)?)
        };
        let allow_pre = include_prerelease
            || parsed_spec.as_ref().is_some_and(|s| s.pre.is_some());

        releases
            .iter()
            .filter(|r| !r.draft && (allow_pre || !r.prerelease))
            .filter_map(|r| ParsedVersion::parse(&r.tag_name).map(|v| (r, v)))
            .filter(|(_, v)| parsed_spec.as_ref().is_none_or(|s| s.matches(v)))
            .max_by(|(_, a), (_, b)| a.compare(b))
            .map(|(r, _)| r)
    }
}
