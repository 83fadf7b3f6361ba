use std::io;

use thiserror::Error;

/// Errors produced while decoding socket addresses or resolving hostnames.
#[derive(Debug, Error)]
pub enum NetError {
    /// The sockaddr buffer declared an address family other than IPv4/IPv6.
    #[error("unsupported address family {0}")]
    UnsupportedFamily(u16),

    /// The sockaddr buffer is shorter than its declared layout requires.
    #[error("malformed sockaddr buffer: {len} bytes, need at least {need}")]
    MalformedBuffer { len: usize, need: usize },

    /// The OS resolver returned no address for the hostname, or the call failed.
    #[error("failed to resolve hostname '{hostname}'")]
    ResolutionFailed {
        hostname: String,
        #[source]
        source: Option<io::Error>,
    },
}
