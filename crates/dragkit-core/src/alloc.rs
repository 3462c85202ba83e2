//! Optimized collection types for dragkit.
//!
//! Re-exports hash collections backed by AHash, which is measurably faster
//! than the std SipHash default for the small keys (ids, kind tags) the
//! engine stores.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};
