//! Platform seam for interface enumeration, keeping the decode logic pure.

#[cfg(unix)]
mod unix;

#[cfg(unix)]
pub(crate) use unix::list_raw_interface_addresses;

/// One interface/address pair as reported by the OS, before decoding.
#[derive(Debug, Clone)]
pub(crate) struct RawInterfaceAddress {
    pub name: String,
    pub is_active: bool,
    pub is_loopback: bool,
    pub sockaddr: Vec<u8>,
}
