use anyhow::Result;
use log::debug;
use std::io::Write;

use crate::{
    actions::Annotations,
    cache::{CacheProbe, is_cache_feature_available},
    config::Config,
};

/// Print whether the cache can be used on this runner
#[tracing::instrument(skip(probe, annotations, out))]
pub fn cache_status<P, A, W>(
    probe: &P,
    config: &Config,
    annotations: &A,
    out: &mut W,
) -> Result<()>
where
    P: CacheProbe,
    A: Annotations,
    W: Write,
{
    let origin = config.host_origin();
    debug!("Host origin: {:?}", origin);

    let available = is_cache_feature_available(probe, origin, annotations);
    writeln!(out, "{}", available)?;
    Ok(())
}
