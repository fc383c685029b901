//! Runtime abstraction for system operations.
//!
//! Everything that touches the process environment or the file system goes
//! through [`Runtime`], so parsers and the cache gate can be tested with a
//! mock instead of mutating process-wide state.
//!
//! # Structure
//!
//! - `env` - Environment variables
//! - `fs` - File system reads

mod env;
mod fs;

use anyhow::Result;
use std::env as std_env;
use std::path::Path;

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // Environment
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError>;

    // File System
    fn read(&self, path: &Path) -> Result<Vec<u8>>;
    fn exists(&self, path: &Path) -> bool;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError> {
        self.env_var_impl(key)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.read_impl(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.exists_impl(path)
    }
}

/// Reads an environment variable, treating unset and empty the same way.
pub fn non_empty_env<R: Runtime + ?Sized>(runtime: &R, key: &str) -> Option<String> {
    runtime
        .env_var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    #[test]
    fn test_non_empty_env_present() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_env_var()
            .with(eq("GITHUB_SERVER_URL"))
            .returning(|_| Ok("https://github.com".to_string()));

        assert_eq!(
            non_empty_env(&runtime, "GITHUB_SERVER_URL"),
            Some("https://github.com".to_string())
        );
    }

    #[test]
    fn test_non_empty_env_blank_is_none() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_env_var()
            .with(eq("ACTIONS_CACHE_URL"))
            .returning(|_| Ok("   ".to_string()));

        assert_eq!(non_empty_env(&runtime, "ACTIONS_CACHE_URL"), None);
    }

    #[test]
    fn test_non_empty_env_missing_is_none() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_env_var()
            .returning(|_| Err(std_env::VarError::NotPresent));

        assert_eq!(non_empty_env(&runtime, "GITHUB_TOKEN"), None);
    }
}
