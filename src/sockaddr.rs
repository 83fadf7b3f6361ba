//! Pure decoding of raw OS sockaddr buffers into addresses and ports.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::ops::Range;

use crate::error::NetError;

#[cfg(unix)]
const AF_INET: u16 = libc::AF_INET as u16;
#[cfg(unix)]
const AF_INET6: u16 = libc::AF_INET6 as u16;
#[cfg(not(unix))]
const AF_INET: u16 = 2;
#[cfg(not(unix))]
const AF_INET6: u16 = 23;

/// BSD-derived systems prefix the sockaddr with a one-byte length field,
/// leaving a one-byte family at offset 1. Elsewhere the family is a
/// native-endian u16 at offset 0.
const LEN_PREFIXED_SOCKADDR: bool = cfg!(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd",
    target_os = "dragonfly",
));

const FAMILY_LEN: usize = 2;
const PORT_RANGE: Range<usize> = 2..4;
const V4_ADDR_RANGE: Range<usize> = 4..8;
const V6_ADDR_RANGE: Range<usize> = 8..24;

/// Address family carried by a sockaddr buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFamily {
    V4,
    V6,
}

/// Reads the family discriminant at its fixed offset.
pub fn decode_family(buf: &[u8]) -> Result<AddressFamily, NetError> {
    if buf.len() < FAMILY_LEN {
        return Err(NetError::MalformedBuffer {
            len: buf.len(),
            need: FAMILY_LEN,
        });
    }
    let raw = if LEN_PREFIXED_SOCKADDR {
        u16::from(buf[1])
    } else {
        u16::from_ne_bytes([buf[0], buf[1]])
    };
    match raw {
        AF_INET => Ok(AddressFamily::V4),
        AF_INET6 => Ok(AddressFamily::V6),
        other => Err(NetError::UnsupportedFamily(other)),
    }
}

/// Decodes the embedded numeric address. IPv4 buffers yield the 4 address
/// bytes, IPv6 buffers the 16; textual rendering via `Display` gives the
/// canonical dotted-decimal or compressed colon-hex form.
pub fn decode_address(buf: &[u8]) -> Result<IpAddr, NetError> {
    match decode_family(buf)? {
        AddressFamily::V4 => {
            let octets: [u8; 4] = field(buf, V4_ADDR_RANGE)?;
            Ok(IpAddr::V4(Ipv4Addr::from(octets)))
        }
        AddressFamily::V6 => {
            let octets: [u8; 16] = field(buf, V6_ADDR_RANGE)?;
            Ok(IpAddr::V6(Ipv6Addr::from(octets)))
        }
    }
}

/// Decodes the 16-bit port, which sits at the same offset for both inet
/// families and is always stored in network byte order.
pub fn decode_port(buf: &[u8]) -> Result<u16, NetError> {
    let bytes: [u8; 2] = field(buf, PORT_RANGE)?;
    Ok(u16::from_be_bytes(bytes))
}

fn field<const N: usize>(buf: &[u8], range: Range<usize>) -> Result<[u8; N], NetError> {
    let need = range.end;
    let bytes = buf.get(range).ok_or(NetError::MalformedBuffer {
        len: buf.len(),
        need,
    })?;
    // The range length always equals N for the fixed layouts above.
    Ok(bytes.try_into().unwrap())
}
