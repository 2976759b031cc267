//! Trie node representation
//!
//! One node per reached byte position along some stored prefix. The
//! children container is lazily allocated and boxed so a leaf node (the
//! common case at trie depth) costs one machine word beyond the terminal
//! flag and metadata — an absent `Option` is the "no children" state,
//! checkable in O(1) without touching a heap allocation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single node in the byte-indexed prefix trie.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrieNode {
    /// Set iff some stored prefix ends at this node.
    pub terminal: bool,
    /// Network address of the prefix that marked this node terminal.
    /// Diagnostic only — the matcher never reads it.
    pub range_start: Option<Vec<u8>>,
    /// Broadcast address of the prefix that marked this node terminal.
    pub range_end: Option<Vec<u8>>,
    /// Child nodes keyed by byte value, absent when this node is a leaf.
    pub children: Option<Box<HashMap<u8, TrieNode>>>,
}

impl TrieNode {
    /// A fresh, non-terminal, childless node.
    pub fn new() -> Self {
        Self::default()
    }

    /// True if this node has no children (the container itself need not
    /// be allocated for this to hold).
    pub fn is_leaf(&self) -> bool {
        self.children.as_ref().map_or(true, |c| c.is_empty())
    }

    /// Look up a child by byte value.
    pub fn get_child(&self, byte: u8) -> Option<&TrieNode> {
        self.children.as_ref().and_then(|c| c.get(&byte))
    }

    /// Get or create the child at `byte`, allocating the children
    /// container on first use.
    pub fn child_or_insert(&mut self, byte: u8) -> &mut TrieNode {
        self.children
            .get_or_insert_with(|| Box::new(HashMap::new()))
            .entry(byte)
            .or_insert_with(TrieNode::new)
    }

    /// Mark this node terminal, recording the prefix's network/broadcast
    /// address bytes.
    pub fn mark_terminal(&mut self, network: &[u8], broadcast: &[u8]) {
        self.terminal = true;
        self.range_start = Some(network.to_vec());
        self.range_end = Some(broadcast.to_vec());
    }

    /// Clear the terminal flag and its associated metadata.
    pub fn clear_terminal(&mut self) {
        self.terminal = false;
        self.range_start = None;
        self.range_end = None;
    }

    /// Remove the child at `byte` if present. Returns true if the child
    /// existed and was removed. Empties the children container back to
    /// `None` when the last child is removed.
    pub fn remove_child(&mut self, byte: u8) -> bool {
        let Some(children) = self.children.as_mut() else {
            return false;
        };
        let removed = children.remove(&byte).is_some();
        if children.is_empty() {
            self.children = None;
        }
        removed
    }
}
