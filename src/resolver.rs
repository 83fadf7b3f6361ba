//! Hostname resolution through the blocking OS resolver.

use std::net::{IpAddr, ToSocketAddrs};
use std::str::FromStr;

use crate::config::NetConfig;
use crate::error::NetError;

/// Resolves a hostname to one address using the OS resolver. The first
/// address the resolver returns wins; no retry, no cache. IP literals
/// short-circuit without a resolver call.
pub fn resolve_hostname(hostname: &str) -> Result<IpAddr, NetError> {
    if let Ok(ip) = IpAddr::from_str(hostname) {
        return Ok(ip);
    }

    let mut addrs = (hostname, NetConfig::RESOLVER_PROBE_PORT)
        .to_socket_addrs()
        .map_err(|err| NetError::ResolutionFailed {
            hostname: hostname.to_string(),
            source: Some(err),
        })?;

    addrs
        .next()
        .map(|addr| addr.ip())
        .ok_or_else(|| NetError::ResolutionFailed {
            hostname: hostname.to_string(),
            source: None,
        })
}

/// The machine's own hostname, with a fixed fallback when it cannot be read.
pub fn local_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .unwrap_or_else(|| NetConfig::UNKNOWN_HOSTNAME.to_string())
}
