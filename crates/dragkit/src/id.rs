//! Stable identifiers for draggable items and drop targets.

use std::fmt;

/// A stable identifier for an interactive element (draggable or drop target).
///
/// Ids are hashed from string keys so callers can name elements the way they
/// name widgets ("tray-slot-2", "grid") while the engine stores a `u64`.
///
/// # Example
/// ```
/// use dragkit::InteractionId;
///
/// let grid = InteractionId::new("grid");
/// assert_eq!(grid, InteractionId::new("grid"));
/// assert_ne!(grid, InteractionId::new("tray"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InteractionId(u64);

impl InteractionId {
    /// Create an id from a string key.
    ///
    /// Uses FNV-1a hash for fast, consistent hashing.
    pub fn new(key: &str) -> Self {
        Self(Self::hash_str(key))
    }

    /// Create an id from a raw u64 (for generated ids).
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw u64 value.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// FNV-1a hash implementation for consistent string hashing.
    fn hash_str(s: &str) -> u64 {
        const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
        const FNV_PRIME: u64 = 0x100000001b3;

        let mut hash = FNV_OFFSET_BASIS;
        for byte in s.as_bytes() {
            hash ^= *byte as u64;
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        hash
    }
}

impl fmt::Display for InteractionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InteractionId(0x{:016x})", self.0)
    }
}

impl From<&str> for InteractionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for InteractionId {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_key_same_id() {
        assert_eq!(InteractionId::new("a"), InteractionId::new("a"));
    }

    #[test]
    fn test_distinct_keys_distinct_ids() {
        assert_ne!(InteractionId::new("a"), InteractionId::new("b"));
    }

    #[test]
    fn test_from_raw_roundtrip() {
        let id = InteractionId::from_raw(42);
        assert_eq!(id.as_u64(), 42);
    }
}
