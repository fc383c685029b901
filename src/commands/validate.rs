use anyhow::Result;
use std::io::Write;

use crate::version::{validate_pypy_version_format, validate_version};

/// Check a version input, failing when it is not accepted
///
/// With `pypy_python` set the input is checked as the Python version part of
/// a PyPy spec, which must be `major.minor`.
pub fn validate<W: Write>(version: &str, pypy_python: bool, out: &mut W) -> Result<()> {
    let valid = if pypy_python {
        validate_pypy_version_format(version)
    } else {
        validate_version(version)
    };

    if !valid {
        if pypy_python {
            anyhow::bail!(
                "Invalid Python version '{}'. PyPy expects a 'major.minor' version such as '3.10'.",
                version
            );
        }
        anyhow::bail!(
            "Invalid version '{}'. Expected a version such as 'v7.3.3', '7.x' or 'nightly'.",
            version
        );
    }

    writeln!(out, "{}", version)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts() {
        let mut out = Vec::new();
        validate("v7.3.x", false, &mut out).unwrap();
        validate("3.10", true, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "v7.3.x\n3.10\n");
    }

    #[test]
    fn test_validate_rejects() {
        let mut out = Vec::new();
        let err = validate("v7.3.b", false, &mut out).unwrap_err();
        assert!(err.to_string().contains("Invalid version 'v7.3.b'"));

        let err = validate("3.x", true, &mut out).unwrap_err();
        assert!(err.to_string().contains("major.minor"));
        assert!(out.is_empty());
    }
}
