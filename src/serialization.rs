//! Compact binary serialization
//!
//! Encodes the trie as a self-describing MessagePack map: a `root` node
//! tuple plus configuration metadata under a `config` key. Loaders
//! tolerate the `config` key's absence for backward compatibility with
//! envelopes that omit it.

use crate::config::EngineConfig;
use crate::error::{Result, TrieError};
use crate::trie::Trie;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
struct Envelope {
    root: Trie,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    config: Option<EngineConfig>,
}

// `EngineConfig` lives in `config.rs` without deriving Serialize/Deserialize
// since most of the crate never needs it serialized; this is the one call
// site that does, so we encode it as a plain tuple instead of requiring the
// derive crate-wide.
impl Serialize for EngineConfig {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        (self.cache_capacity, self.batch_log_interval_denom).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EngineConfig {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let (cache_capacity, batch_log_interval_denom) =
            <(usize, usize)>::deserialize(deserializer)?;
        Ok(EngineConfig {
            cache_capacity,
            batch_log_interval_denom,
        })
    }
}

/// Serialize a trie plus its configuration to compact MessagePack bytes.
pub fn dump(trie: &Trie, config: &EngineConfig) -> Vec<u8> {
    let envelope = Envelope {
        root: trie.clone(),
        config: Some(*config),
    };
    // `to_vec_named` encodes the envelope as a MessagePack map keyed by
    // field name (`root`, `config`), matching the self-describing format
    // the load side expects; it only fails on types that can't be
    // represented in MessagePack, which `Envelope` has none of.
    rmp_serde::to_vec_named(&envelope).expect("trie envelope is always MessagePack-representable")
}

/// Deserialize a trie and its configuration (if present) from bytes
/// produced by [`dump`]. Missing `config` keys default to
/// [`EngineConfig::default`], so older envelopes remain loadable.
pub fn load(bytes: &[u8]) -> Result<(Trie, EngineConfig)> {
    let envelope: Envelope = rmp_serde::from_slice(bytes)
        .map_err(|e| TrieError::InvalidSerialization(e.to_string()))?;
    let config = envelope.config.unwrap_or_default();
    Ok((envelope.root, config))
}
