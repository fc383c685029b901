//! Syntax checks for user-supplied version inputs.

use regex::Regex;
use std::sync::LazyLock;

/// PyPy only accepts a bare `major.minor` Python version.
static PYPY_PYTHON_VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.[0-9]+$").unwrap());

/// Dotted version with up to three numeric-or-wildcard segments, an optional
/// `v`/`=` prefix and optional pre-release/build suffixes.
static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[v=]?(?:[0-9]+|[xX*])(?:\.(?:[0-9]+|[xX*])){0,2}(?:-[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*)?(?:\+[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*)?$",
    )
    .unwrap()
});

pub const NIGHTLY: &str = "nightly";

pub fn is_nightly_keyword(input: &str) -> bool {
    input == NIGHTLY
}

/// Returns true when `input` is a `major.minor` pair such as `3.10`.
///
/// Wildcards (`3.x`), patch segments (`3.6.1`) and bare majors (`3`) are
/// rejected.
pub fn validate_pypy_version_format(input: &str) -> bool {
    PYPY_PYTHON_VERSION_REGEX.is_match(input)
}

/// Returns true when `input` is a usable PyPy/GraalPy version spec.
///
/// Accepts `nightly`, plain versions (`3`, `3.6`, `v7.3.3`), wildcard
/// segments (`x`, `v7.x`, `v7.3.x`) and pre-release tags (`v7.3.3-rc.1`).
pub fn validate_version(input: &str) -> bool {
    is_nightly_keyword(input) || VERSION_REGEX.is_match(input)
}
