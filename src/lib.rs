//! Host-networking utilities: discover the device's own IP address, enumerate
//! the active network interfaces, resolve hostnames, and decode raw OS
//! sockaddr buffers.
//!
//! ```
//! use hostnet::AddressPreference;
//!
//! if let Some(address) = hostnet::ip_address(AddressPreference::PreferIpv4) {
//!     println!("my address: {address}");
//! }
//! ```
//!
//! Every call queries the OS afresh and builds a new result; there is no
//! cache and no shared state, so concurrent callers do not interfere.

mod backend;
mod config;
mod error;
mod interfaces;
mod resolver;
mod sockaddr;

use std::collections::BTreeMap;

pub use config::NetConfig;
pub use error::NetError;
pub use interfaces::{list_interfaces, AddressPreference, AddressTable, InterfaceAddress};
pub use resolver::{local_hostname, resolve_hostname};
pub use sockaddr::{decode_address, decode_family, decode_port, AddressFamily};

/// The device's preferred textual address: the first active non-loopback
/// address of the preferred family, falling back to the other family.
/// `None` is the normal outcome on a host with no qualifying interface.
pub fn ip_address(preference: AddressPreference) -> Option<String> {
    list_interfaces()
        .preferred(preference)
        .map(|address| address.to_string())
}

/// All active interfaces and their textual addresses, keyed by interface
/// name. An interface with several addresses keeps all of them.
pub fn ip_addresses() -> BTreeMap<String, Vec<String>> {
    list_interfaces().by_interface()
}

/// Resolves a hostname to one textual IP address via the OS resolver.
pub fn ip_address_of_hostname(hostname: &str) -> Result<String, NetError> {
    resolver::resolve_hostname(hostname).map(|address| address.to_string())
}

/// Extracts the textual IP address from a raw sockaddr buffer.
pub fn ip_address_from_sockaddr(data: &[u8]) -> Result<String, NetError> {
    sockaddr::decode_address(data).map(|address| address.to_string())
}

/// Extracts the port number from a raw sockaddr buffer, converting from
/// network byte order.
pub fn port_from_sockaddr(data: &[u8]) -> Result<u16, NetError> {
    sockaddr::decode_port(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::IpAddr;

    #[test]
    fn every_reported_address_is_syntactically_valid() {
        for (name, addresses) in ip_addresses() {
            assert!(!name.is_empty());
            for address in addresses {
                address.parse::<IpAddr>().expect("invalid textual address");
            }
        }
    }

    #[test]
    fn preferred_address_is_never_loopback() {
        if let Some(address) = ip_address(AddressPreference::PreferIpv4) {
            let parsed: IpAddr = address.parse().unwrap();
            assert!(!parsed.is_loopback());
        }
    }
}
