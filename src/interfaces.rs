//! Enumerating the host's network interfaces and picking a preferred address.

use std::collections::BTreeMap;
use std::net::IpAddr;

use serde::Serialize;

use crate::backend::RawInterfaceAddress;
use crate::sockaddr;

/// Which address family wins when both are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressPreference {
    PreferIpv4,
    PreferIpv6,
}

/// One decoded interface address.
#[derive(Debug, Clone, Serialize)]
pub struct InterfaceAddress {
    pub interface_name: String,
    pub address: IpAddr,
    pub is_loopback: bool,
    pub is_active: bool,
}

/// Decoded interface addresses, kept in OS enumeration order.
///
/// That order serves as the first-discovered-wins tie-break in `preferred`;
/// it is whatever the OS reported and is not guaranteed stable across OS
/// versions.
#[derive(Debug, Default, Clone, Serialize)]
pub struct AddressTable {
    entries: Vec<InterfaceAddress>,
}

impl AddressTable {
    /// Decodes raw OS records into table entries. Entries with unsupported
    /// families or truncated buffers are skipped, never fatal; inactive
    /// interfaces are dropped. Loopback entries stay in the table.
    #[cfg_attr(not(unix), allow(dead_code))]
    fn assemble(records: Vec<RawInterfaceAddress>) -> Self {
        let mut entries = Vec::with_capacity(records.len());
        for record in records {
            if !record.is_active {
                continue;
            }
            let address = match sockaddr::decode_address(&record.sockaddr) {
                Ok(address) => address,
                Err(err) => {
                    log::debug!("skipping address on '{}': {}", record.name, err);
                    continue;
                }
            };
            entries.push(InterfaceAddress {
                interface_name: record.name,
                address,
                is_loopback: record.is_loopback,
                is_active: true,
            });
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[InterfaceAddress] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Interface name to textual addresses. An interface keeps every address
    /// the OS reported for it, in enumeration order.
    pub fn by_interface(&self) -> BTreeMap<String, Vec<String>> {
        let mut table: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for entry in &self.entries {
            table
                .entry(entry.interface_name.clone())
                .or_default()
                .push(entry.address.to_string());
        }
        table
    }

    /// First non-loopback address of the preferred family, falling back to
    /// the first of the other family. `None` means no qualifying address
    /// exists, the normal outcome on an offline host.
    pub fn preferred(&self, preference: AddressPreference) -> Option<IpAddr> {
        let want_v4 = preference == AddressPreference::PreferIpv4;
        let candidates = || {
            self.entries
                .iter()
                .filter(|entry| entry.is_active && !entry.is_loopback)
        };
        candidates()
            .find(|entry| entry.address.is_ipv4() == want_v4)
            .or_else(|| candidates().find(|entry| entry.address.is_ipv4() != want_v4))
            .map(|entry| entry.address)
    }
}

/// Queries the OS interface list and builds a fresh table. Never fails
/// outright: an enumeration error degrades to an empty table with a warning.
pub fn list_interfaces() -> AddressTable {
    match query_os() {
        Ok(table) => table,
        Err(err) => {
            log::warn!("interface enumeration failed: {}", err);
            AddressTable::default()
        }
    }
}

#[cfg(unix)]
fn query_os() -> std::io::Result<AddressTable> {
    let records = crate::backend::list_raw_interface_addresses()?;
    Ok(AddressTable::assemble(records))
}

#[cfg(not(unix))]
fn query_os() -> std::io::Result<AddressTable> {
    // if-addrs hands back already-decoded addresses and only reports
    // operational adapters, so everything it returns counts as active.
    let entries = if_addrs::get_if_addrs()?
        .into_iter()
        .map(|iface| InterfaceAddress {
            is_loopback: iface.is_loopback(),
            address: iface.ip(),
            is_active: true,
            interface_name: iface.name,
        })
        .collect();
    Ok(AddressTable { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sockaddr::testutil::{sockaddr_v4, sockaddr_v6, write_family};

    fn record(name: &str, sockaddr: Vec<u8>, is_active: bool, is_loopback: bool) -> RawInterfaceAddress {
        RawInterfaceAddress {
            name: name.to_string(),
            is_active,
            is_loopback,
            sockaddr,
        }
    }

    fn sample_records() -> Vec<RawInterfaceAddress> {
        vec![
            record("lo", sockaddr_v4([127, 0, 0, 1], 0), true, true),
            record("eth0", sockaddr_v4([192, 168, 1, 7], 0), true, false),
            record("eth0", sockaddr_v6(v6_octets(), 0), true, false),
            record("wlan0", sockaddr_v4([10, 0, 0, 9], 0), false, false),
        ]
    }

    fn v6_octets() -> [u8; 16] {
        let mut octets = [0u8; 16];
        octets[0] = 0xfe;
        octets[1] = 0x80;
        octets[15] = 0x01;
        octets
    }

    #[test]
    fn inactive_interfaces_are_dropped() {
        let table = AddressTable::assemble(sample_records());
        assert!(table.entries().iter().all(|entry| entry.is_active));
        assert!(!table.by_interface().contains_key("wlan0"));
    }

    #[test]
    fn loopback_stays_in_the_full_table() {
        let table = AddressTable::assemble(sample_records());
        assert_eq!(table.by_interface()["lo"], vec!["127.0.0.1"]);
    }

    #[test]
    fn interface_keeps_all_of_its_addresses() {
        let table = AddressTable::assemble(sample_records());
        assert_eq!(table.by_interface()["eth0"], vec!["192.168.1.7", "fe80::1"]);
    }

    #[test]
    fn unsupported_family_is_skipped_not_fatal() {
        let mut packet = vec![0u8; 16];
        write_family(&mut packet, 42);
        let records = vec![
            record("eth0", packet, true, false),
            record("eth0", sockaddr_v4([192, 168, 1, 7], 0), true, false),
        ];
        let table = AddressTable::assemble(records);
        assert_eq!(table.by_interface()["eth0"], vec!["192.168.1.7"]);
    }

    #[test]
    fn preferred_excludes_loopback() {
        let records = vec![record("lo", sockaddr_v4([127, 0, 0, 1], 0), true, true)];
        let table = AddressTable::assemble(records);
        assert_eq!(table.preferred(AddressPreference::PreferIpv4), None);
    }

    #[test]
    fn preferred_picks_requested_family_first() {
        let table = AddressTable::assemble(sample_records());
        assert_eq!(
            table.preferred(AddressPreference::PreferIpv4).unwrap().to_string(),
            "192.168.1.7"
        );
        assert_eq!(
            table.preferred(AddressPreference::PreferIpv6).unwrap().to_string(),
            "fe80::1"
        );
    }

    #[test]
    fn preferred_falls_back_to_other_family() {
        let records = vec![record("eth0", sockaddr_v4([192, 168, 1, 7], 0), true, false)];
        let table = AddressTable::assemble(records);
        assert_eq!(
            table.preferred(AddressPreference::PreferIpv6).unwrap().to_string(),
            "192.168.1.7"
        );
    }

    #[test]
    fn first_discovered_interface_wins_the_tie_break() {
        let records = vec![
            record("eth0", sockaddr_v4([192, 168, 1, 7], 0), true, false),
            record("eth1", sockaddr_v4([192, 168, 1, 8], 0), true, false),
        ];
        let table = AddressTable::assemble(records);
        assert_eq!(
            table.preferred(AddressPreference::PreferIpv4).unwrap().to_string(),
            "192.168.1.7"
        );
    }

    #[test]
    fn empty_records_give_an_empty_table() {
        let table = AddressTable::assemble(Vec::new());
        assert!(table.is_empty());
        assert_eq!(table.preferred(AddressPreference::PreferIpv4), None);
    }

    #[test]
    fn live_enumeration_only_reports_active_entries() {
        let table = list_interfaces();
        assert!(table.entries().iter().all(|entry| entry.is_active));
    }
}
