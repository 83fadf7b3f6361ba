//! `getifaddrs`-based enumeration of raw interface addresses.

use std::ffi::CStr;
use std::io;
use std::mem;
use std::ptr;
use std::slice;

use super::RawInterfaceAddress;

const ACTIVE_FLAGS: libc::c_int = libc::IFF_UP | libc::IFF_RUNNING;

/// Walks the OS interface list and copies out each entry's raw sockaddr
/// bytes together with the flags the enumerator filters on.
pub(crate) fn list_raw_interface_addresses() -> io::Result<Vec<RawInterfaceAddress>> {
    let mut ifap: *mut libc::ifaddrs = ptr::null_mut();
    if unsafe { libc::getifaddrs(&mut ifap) } != 0 {
        return Err(io::Error::last_os_error());
    }

    let mut records = Vec::new();
    let mut cursor = ifap;
    while !cursor.is_null() {
        let ifa = unsafe { &*cursor };
        cursor = ifa.ifa_next;

        // Entries without an address (e.g. packet-level placeholders) carry
        // nothing to decode.
        if ifa.ifa_addr.is_null() {
            continue;
        }

        let name = unsafe { CStr::from_ptr(ifa.ifa_name) }
            .to_string_lossy()
            .into_owned();
        let flags = ifa.ifa_flags as libc::c_int;
        let family = unsafe { (*ifa.ifa_addr).sa_family };
        let len = sockaddr_span(family);
        let sockaddr = unsafe { slice::from_raw_parts(ifa.ifa_addr as *const u8, len) }.to_vec();

        records.push(RawInterfaceAddress {
            name,
            is_active: flags & ACTIVE_FLAGS == ACTIVE_FLAGS,
            is_loopback: flags & libc::IFF_LOOPBACK != 0,
            sockaddr,
        });
    }

    unsafe { libc::freeifaddrs(ifap) };
    Ok(records)
}

/// Bytes to copy for one entry. Unknown families keep only the common header
/// so the decoder can classify them and the enumerator can skip them.
fn sockaddr_span(family: libc::sa_family_t) -> usize {
    match libc::c_int::from(family) {
        libc::AF_INET => mem::size_of::<libc::sockaddr_in>(),
        libc::AF_INET6 => mem::size_of::<libc::sockaddr_in6>(),
        _ => mem::size_of::<libc::sockaddr>(),
    }
}
