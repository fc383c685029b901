//! Cache availability checks.
//!
//! Whether the dependency cache can be used depends on the runner being able
//! to reach the Actions cache service. When it cannot, the warning shown to
//! the user depends on where the workflow runs: GitHub Enterprise Server
//! only gained the cache service in 3.5, so there the admin has to enable it.

use log::debug;
use url::Url;

use crate::actions::Annotations;
use crate::runtime::{Runtime, non_empty_env};

pub const DEFAULT_SERVER_URL: &str = "https://github.com";

pub const GHES_CACHE_WARNING: &str = "Caching is only supported on GHES version >= 3.5. If you are on a version >= 3.5, please check with your GHES admin if the Actions cache service is enabled or not.";

pub const CACHE_UNREACHABLE_WARNING: &str =
    "The runner was not able to contact the cache service. Caching will be skipped";

/// Environment variables that carry the cache service endpoint.
const CACHE_SERVICE_ENV_VARS: &[&str] = &["ACTIONS_CACHE_URL", "ACTIONS_RESULTS_URL"];

/// Where the workflow is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOrigin {
    /// A self-hosted GitHub Enterprise Server instance.
    EnterpriseServer,
    /// github.com.
    PublicCloud,
}

impl HostOrigin {
    /// Classifies the server URL (`GITHUB_SERVER_URL`); unset means github.com.
    ///
    /// Only the exact `github.com` host is public cloud. Any other host,
    /// including GHE.com tenants, is treated as an Enterprise Server.
    pub fn from_server_url(server_url: Option<&str>) -> Self {
        let server_url = server_url.unwrap_or(DEFAULT_SERVER_URL);

        let host = match Url::parse(server_url) {
            Ok(url) => url.host_str().map(|h| h.to_ascii_lowercase()),
            Err(e) => {
                debug!("Could not parse server URL {:?}: {}", server_url, e);
                None
            }
        };

        match host.as_deref() {
            Some("github.com") => HostOrigin::PublicCloud,
            _ => HostOrigin::EnterpriseServer,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait CacheProbe: Send + Sync {
    /// Whether the cache service is configured for this job.
    fn is_feature_available(&self) -> bool;
}

/// Probes the runner environment for a cache service endpoint.
pub struct EnvCacheProbe<R: Runtime> {
    runtime: R,
}

impl<R: Runtime> EnvCacheProbe<R> {
    pub fn new(runtime: R) -> Self {
        Self { runtime }
    }
}

impl<R: Runtime> CacheProbe for EnvCacheProbe<R> {
    #[tracing::instrument(skip(self))]
    fn is_feature_available(&self) -> bool {
        CACHE_SERVICE_ENV_VARS
            .iter()
            .any(|key| non_empty_env(&self.runtime, key).is_some())
    }
}

/// Returns true when cache operations should be attempted.
///
/// When the probe reports the service as unavailable, a warning matching the
/// host origin is emitted and false is returned.
#[tracing::instrument(skip(probe, annotations))]
pub fn is_cache_feature_available<P, A>(probe: &P, origin: HostOrigin, annotations: &A) -> bool
where
    P: CacheProbe + ?Sized,
    A: Annotations + ?Sized,
{
    if probe.is_feature_available() {
        return true;
    }

    match origin {
        HostOrigin::EnterpriseServer => annotations.warning(GHES_CACHE_WARNING),
        HostOrigin::PublicCloud => annotations.warning(CACHE_UNREACHABLE_WARNING),
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::MockAnnotations;
    use crate::runtime::MockRuntime;
    use mockall::predicate::eq;

    fn probe_returning(available: bool) -> MockCacheProbe {
        let mut probe = MockCacheProbe::new();
        probe.expect_is_feature_available().return_const(available);
        probe
    }

    #[test]
    fn test_cache_disabled_on_ghes() {
        let probe = probe_returning(false);
        let mut annotations = MockAnnotations::new();
        annotations
            .expect_warning()
            .with(eq(GHES_CACHE_WARNING))
            .times(1)
            .return_const(());

        let origin = HostOrigin::from_server_url(Some("http://example.com"));
        assert!(!is_cache_feature_available(&probe, origin, &annotations));
    }

    #[test]
    fn test_cache_disabled_on_dotcom() {
        let probe = probe_returning(false);
        let mut annotations = MockAnnotations::new();
        annotations
            .expect_warning()
            .with(eq(CACHE_UNREACHABLE_WARNING))
            .times(1)
            .return_const(());

        let origin = HostOrigin::from_server_url(Some("http://github.com"));
        assert!(!is_cache_feature_available(&probe, origin, &annotations));
    }

    #[test]
    fn test_cache_enabled() {
        let probe = probe_returning(true);
        let mut annotations = MockAnnotations::new();
        annotations.expect_warning().never();

        assert!(is_cache_feature_available(
            &probe,
            HostOrigin::EnterpriseServer,
            &annotations
        ));
        assert!(is_cache_feature_available(
            &probe,
            HostOrigin::PublicCloud,
            &annotations
        ));
    }

    #[test]
    fn test_host_origin_from_server_url() {
        assert_eq!(HostOrigin::from_server_url(None), HostOrigin::PublicCloud);
        assert_eq!(
            HostOrigin::from_server_url(Some("https://GitHub.com")),
            HostOrigin::PublicCloud
        );
        assert_eq!(
            HostOrigin::from_server_url(Some("https://octocorp.ghe.com")),
            HostOrigin::EnterpriseServer
        );
        assert_eq!(
            HostOrigin::from_server_url(Some("http://github.localhost")),
            HostOrigin::EnterpriseServer
        );
        assert_eq!(
            HostOrigin::from_server_url(Some("https://github.example.com")),
            HostOrigin::EnterpriseServer
        );
        assert_eq!(
            HostOrigin::from_server_url(Some("https://github.com.evil.example")),
            HostOrigin::EnterpriseServer
        );
        assert_eq!(
            HostOrigin::from_server_url(Some("not a url")),
            HostOrigin::EnterpriseServer
        );
    }

    #[test]
    fn test_env_cache_probe_with_cache_url() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_env_var()
            .with(eq("ACTIONS_CACHE_URL"))
            .returning(|_| Ok("https://artifactcache.actions.githubusercontent.com/".to_string()));

        let probe = EnvCacheProbe::new(runtime);
        assert!(probe.is_feature_available());
    }

    #[test]
    fn test_env_cache_probe_with_results_url() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_env_var()
            .with(eq("ACTIONS_CACHE_URL"))
            .returning(|_| Err(std::env::VarError::NotPresent));
        runtime
            .expect_env_var()
            .with(eq("ACTIONS_RESULTS_URL"))
            .returning(|_| Ok("https://results-receiver.actions.githubusercontent.com/".to_string()));

        let probe = EnvCacheProbe::new(runtime);
        assert!(probe.is_feature_available());
    }

    #[test]
    fn test_env_cache_probe_unavailable() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_env_var()
            .returning(|_| Err(std::env::VarError::NotPresent));

        let probe = EnvCacheProbe::new(runtime);
        assert!(!probe.is_feature_available());
    }
}
