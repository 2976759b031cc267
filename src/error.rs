/// Error types for the cidrtrie library
use std::fmt;

/// Result type alias for cidrtrie operations
pub type Result<T> = std::result::Result<T, TrieError>;

/// Main error type for trie operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrieError {
    /// CIDR text failed to parse, or its prefix length is out of range
    InvalidPrefix(String),

    /// Address text failed both IPv4 and IPv6 parsing
    InvalidAddress(String),

    /// The address input was of a kind the normalizer does not accept
    UnsupportedInput(String),

    /// Encoded bytes failed to decode into a well-formed trie
    InvalidSerialization(String),
}

impl fmt::Display for TrieError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrieError::InvalidPrefix(msg) => write!(f, "invalid prefix: {}", msg),
            TrieError::InvalidAddress(msg) => write!(f, "invalid address: {}", msg),
            TrieError::UnsupportedInput(msg) => write!(f, "unsupported input: {}", msg),
            TrieError::InvalidSerialization(msg) => write!(f, "invalid serialization: {}", msg),
        }
    }
}

impl std::error::Error for TrieError {}

impl From<&str> for TrieError {
    fn from(msg: &str) -> Self {
        TrieError::UnsupportedInput(msg.to_string())
    }
}
