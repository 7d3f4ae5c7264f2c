//! Fast hash set type alias.
//!
//! Discovery deduplicates every matched path through a set, so the hasher
//! sits on a hot path. The alias uses the Fx hash from `rustc-hash`, which
//! is considerably faster than SipHash for short string and path keys. The
//! keys are author-controlled file paths, so DoS resistance is not needed.
//!
//! # Examples
//!
//! ```
//! use sc_core::{FxHashSet, fx_hash_set_with_capacity};
//!
//! let mut seen: FxHashSet<&str> = fx_hash_set_with_capacity(4);
//! assert!(seen.insert("src/Button.showcase.tsx"));
//! assert!(!seen.insert("src/Button.showcase.tsx"));
//! ```

/// A [`HashSet`](std::collections::HashSet) using the Fx hash algorithm.
pub type FxHashSet<V> = rustc_hash::FxHashSet<V>;

/// Creates a new [`FxHashSet`] with room for `capacity` elements.
#[inline]
#[must_use]
pub fn fx_hash_set_with_capacity<V>(capacity: usize) -> FxHashSet<V> {
    FxHashSet::with_capacity_and_hasher(capacity, rustc_hash::FxBuildHasher)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_deduplicates() {
        let mut set: FxHashSet<String> = fx_hash_set_with_capacity(8);
        set.insert("a".to_owned());
        set.insert("a".to_owned());
        set.insert("b".to_owned());
        assert_eq!(set.len(), 2);
    }
}
