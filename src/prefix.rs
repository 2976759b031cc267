//! CIDR text parsing (external contract)
//!
//! Parses CIDR strings into the `(network_bytes, prefix_len, broadcast_bytes)`
//! triple the mutator consumes. The grammar itself is not this crate's
//! concern — it is delegated to `ipnet`, a well-tested CIDR parser — only
//! the semantic output matters to the trie.

use crate::error::{Result, TrieError};

/// A parsed CIDR prefix: network address bytes (host bits zeroed), prefix
/// length, and broadcast address bytes (host bits set).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPrefix {
    /// Network address, 4 bytes for IPv4 or 16 bytes for IPv6.
    pub network: Vec<u8>,
    /// Prefix length in `[0, 8 * network.len()]`.
    pub prefix_len: u8,
    /// Broadcast address, same length as `network`.
    pub broadcast: Vec<u8>,
}

/// Parse a CIDR string such as `"192.168.1.0/24"` or `"2001:db8::/32"`.
///
/// A bare address without a `/prefix_len` is treated as a host route
/// (`/32` for IPv4, `/128` for IPv6), matching common CIDR-list
/// conventions.
pub fn parse(cidr: &str) -> Result<ParsedPrefix> {
    use ipnet::IpNet;
    use std::net::IpAddr;

    let net: IpNet = if let Ok(net) = cidr.parse::<IpNet>() {
        net
    } else if let Ok(addr) = cidr.parse::<IpAddr>() {
        let host_bits = match addr {
            IpAddr::V4(_) => 32,
            IpAddr::V6(_) => 128,
        };
        IpNet::new(addr, host_bits).map_err(|e| TrieError::InvalidPrefix(e.to_string()))?
    } else {
        return Err(TrieError::InvalidPrefix(cidr.to_string()));
    };

    let (network, broadcast) = match net {
        IpNet::V4(v4) => (
            v4.network().octets().to_vec(),
            v4.broadcast().octets().to_vec(),
        ),
        IpNet::V6(v6) => (
            v6.network().octets().to_vec(),
            v6.broadcast().octets().to_vec(),
        ),
    };

    Ok(ParsedPrefix {
        network,
        prefix_len: net.prefix_len(),
        broadcast,
    })
}
