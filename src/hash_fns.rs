use std::{io::Cursor, num::NonZeroU32};

use tracing::{debug, trace};

use crate::error::{BloomError, Result};

/// Base seed used by [`HashFns::new`].
pub const DEFAULT_BASE_SEED: u32 = 0x9747_b28c;

/// A fixed set of independent, seeded 32-bit hash functions.
///
/// Every function is MurmurHash3 (x86, 32-bit) with its own seed. Seeds are
/// derived from a base seed plus the function's position, so no two functions
/// of one set share a seed. Hashing is a pure function of `(seed, key)`, which
/// means a set can be shared between any number of filters and threads.
///
/// Function counts and function positions are both `u32`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashFns {
    /// One seed per hash function, in derivation order.
    seeds: Vec<u32>,
}

impl HashFns {
    /// Creates `count` hash functions seeded from [`DEFAULT_BASE_SEED`].
    pub fn new(count: u32) -> Self {
        Self::with_base_seed(count, DEFAULT_BASE_SEED)
    }

    /// Creates `count` hash functions with seeds `base_seed, base_seed + 1, ...`.
    ///
    /// A `count` of zero is accepted. Such a set derives no indices at all.
    pub fn with_base_seed(count: u32, base_seed: u32) -> Self {
        let seeds = (0..count).map(|i| base_seed.wrapping_add(i)).collect();

        debug!(count, base_seed, "created hash function set");

        Self { seeds }
    }

    /// Returns the number of hash functions in the set.
    pub fn len(&self) -> u32 {
        // Construction takes a `u32` count, so this never truncates.
        self.seeds.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    /// Returns the per-function seeds in derivation order.
    pub fn seeds(&self) -> &[u32] {
        &self.seeds
    }

    /// Computes the digest of hash function `index` for `key`.
    ///
    /// Returns `None` when `index` is outside the set.
    pub fn hash<K: AsRef<[u8]> + ?Sized>(&self, index: u32, key: &K) -> Option<u32> {
        self.seeds
            .get(index as usize)
            .map(|&seed| murmur3_32(seed, key.as_ref()))
    }

    /// Derives one index in `[0, modulus)` per hash function, in function order.
    ///
    /// # Errors
    ///
    /// Returns [`BloomError::ZeroModulus`] when `modulus` is zero.
    pub fn indices<K: AsRef<[u8]> + ?Sized>(&self, key: &K, modulus: u32) -> Result<Vec<u32>> {
        let modulus = NonZeroU32::new(modulus).ok_or(BloomError::ZeroModulus)?;

        Ok(self.index_iter(key.as_ref(), modulus).collect())
    }

    /// Lazily derives the indices of `key`. Used by the filter so that queries
    /// can stop at the first unset bit.
    pub(crate) fn index_iter<'a>(
        &'a self,
        key: &'a [u8],
        modulus: NonZeroU32,
    ) -> impl Iterator<Item = u32> + 'a {
        self.seeds.iter().map(move |&seed| {
            let index = murmur3_32(seed, key) % modulus.get();
            trace!(seed, index, "derived bit index");
            index
        })
    }
}

/// MurmurHash3, x86 32-bit variant, of `key` with the given seed.
pub fn murmur3_32(seed: u32, key: &[u8]) -> u32 {
    match murmur3::murmur3_32(&mut Cursor::new(key), seed) {
        Ok(hash) => hash,
        // A cursor over a byte slice never returns an I/O error.
        Err(err) => unreachable!("reading key from memory failed: {err}"),
    }
}
