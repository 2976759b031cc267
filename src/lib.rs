//! cidrtrie - Byte-indexed prefix trie for IP allow/block list matching
//!
//! `cidrtrie` stores CIDR prefixes (IPv4 and IPv6, freely mixed) in a
//! byte-indexed trie and answers "is this address inside any stored
//! prefix?" without identifying which prefix matched. It is built for
//! allow-lists and block-lists: update rarely, query constantly.
//!
//! # Quick Start
//!
//! ```rust
//! use cidrtrie::CidrMatcher;
//!
//! let matcher = CidrMatcher::new();
//! matcher.insert("10.0.0.0/8")?;
//! matcher.insert("2001:db8::/32")?;
//!
//! assert!(matcher.contains("10.1.2.3")?);
//! assert!(!matcher.contains("172.16.0.1")?);
//!
//! matcher.remove("10.0.0.0/8")?;
//! assert!(!matcher.contains("10.1.2.3")?);
//! # Ok::<(), cidrtrie::TrieError>(())
//! ```
//!
//! # Key properties
//!
//! - **Longest-terminated-prefix membership**: a query stops at the
//!   shallowest terminal node on its path; it reports whether an address
//!   matches, not which prefix matched.
//! - **Partial-byte expansion**: a prefix length that doesn't land on a
//!   byte boundary (e.g. `/12`) expands into every terminal child at the
//!   next full byte, so descent never needs bit-level masking at query
//!   time.
//! - **Bounded lookup cache**: membership results are cached on canonical
//!   address bytes and invalidated wholesale on any mutation.
//! - **Mixed-family tree**: IPv4 and IPv6 prefixes share one trie; a
//!   4-byte address can never match inside a 16-byte-rooted subtree
//!   because descent simply runs out of matching children.
//!
//! # Architecture
//!
//! ```text
//! CidrMatcher (RwLock<Trie, LookupCache, EngineConfig>)
//!       │
//!       ├─ insert/remove/clear  -> Trie (byte-indexed HashMap per node)
//!       ├─ contains             -> Trie::contains, cached by address bytes
//!       └─ dump/load            -> MessagePack envelope (rmp-serde)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Address normalization: text, raw bytes, integers, and `IpAddr` into
/// canonical byte sequences.
pub mod address;
/// Bounded LRU caches for lookup results and parsed CIDR text.
pub mod cache;
/// Engine configuration and the process-wide default.
pub mod config;
/// Concurrency envelope and the public `CidrMatcher` API.
pub mod engine;
/// Error types for cidrtrie operations.
pub mod error;
/// Trie node representation.
pub mod node;
/// CIDR text parsing via `ipnet`.
pub mod prefix;
/// Compact MessagePack serialization of a trie and its configuration.
pub mod serialization;
/// The byte-indexed prefix trie itself: insertion, removal, membership.
pub mod trie;

pub use crate::address::AddressInput;
pub use crate::config::{get_default_config, set_default_config, EngineConfig};
pub use crate::engine::CidrMatcher;
pub use crate::error::{Result, TrieError};
pub use crate::prefix::ParsedPrefix;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
