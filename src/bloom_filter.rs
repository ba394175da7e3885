use std::{fmt, num::NonZeroU32};

use bit_vec::BitVec;
use tracing::debug;

use crate::{
    error::{BloomError, Result},
    hash_fns::HashFns,
};

/// A Bloom filter is a space-efficient probabilistic data structure used to test
/// whether an element is a member of a set.
///
/// The filter does not own its hash functions. The same [`HashFns`] must be passed
/// to every [`add`](BloomFilter::add) and [`exists`](BloomFilter::exists) call for
/// the answers to be meaningful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BloomFilter {
    /// The array of bits, packed eight to a byte.
    bits: BitVec<u8>,
    /// The number of bits in the filter.
    size: NonZeroU32,
}

impl BloomFilter {
    /// Creates an empty Bloom filter of `size` bits.
    ///
    /// # Errors
    ///
    /// Returns [`BloomError::ZeroSize`] when `size` is zero.
    pub fn new(size: u32) -> Result<Self> {
        let size = NonZeroU32::new(size).ok_or(BloomError::ZeroSize)?;

        let mut bits = BitVec::<u8>::default();
        bits.grow(size.get() as usize, false);

        debug!(
            size = size.get(),
            bytes = bits.storage().len(),
            "created bloom filter"
        );

        Ok(Self { bits, size })
    }

    /// Creates a filter and a matching hash function set sized for `num_elements`
    /// keys at the given false positive rate.
    ///
    /// # Arguments
    ///
    /// * `num_elements` - The expected number of elements to be inserted.
    /// * `false_positive_rate` - The desired false positive rate (e.g., 0.001 for 0.1%).
    ///
    /// # Errors
    ///
    /// Returns [`BloomError::ZeroCapacity`] if `num_elements` is zero, or
    /// [`BloomError::InvalidFalsePositiveRate`] if the rate is not within (0, 1).
    pub fn with_rate(num_elements: usize, false_positive_rate: f64) -> Result<(Self, HashFns)> {
        let num_bits = optimal_num_bits(num_elements, false_positive_rate)?;
        let num_hashes = optimal_num_hashes(num_bits, num_elements)?;

        Ok((Self::new(num_bits)?, HashFns::new(num_hashes)))
    }

    /// Inserts a key into the Bloom filter.
    ///
    /// Setting a bit that is already set is a no-op, so inserting the same key
    /// twice leaves the filter unchanged.
    pub fn add<K: AsRef<[u8]> + ?Sized>(&mut self, key: &K, hash_fns: &HashFns) {
        for index in hash_fns.index_iter(key.as_ref(), self.size) {
            self.bits.set(index as usize, true);
        }
    }

    /// Checks if a key is possibly present in the Bloom filter.
    ///
    /// # Returns
    ///
    /// * `true` if the key is possibly present in the Bloom filter.
    /// * `false` if the key is definitely not present in the Bloom filter.
    pub fn exists<K: AsRef<[u8]> + ?Sized>(&self, key: &K, hash_fns: &HashFns) -> bool {
        hash_fns
            .index_iter(key.as_ref(), self.size)
            .all(|index| self.bits[index as usize])
    }

    /// Returns the number of bits in the filter.
    pub fn size(&self) -> u32 {
        self.size.get()
    }

    /// Returns the packed bit storage, `ceil(size / 8)` bytes long.
    ///
    /// Bit `i` is stored in byte `i / 8` at position `i % 8`, least significant first.
    pub fn as_bytes(&self) -> &[u8] {
        self.bits.storage()
    }

    /// Returns the number of bits currently set.
    pub fn count_ones(&self) -> u64 {
        self.bits
            .storage()
            .iter()
            .map(|byte| u64::from(byte.count_ones()))
            .sum()
    }

    /// Returns the fraction of bits currently set.
    pub fn fill_ratio(&self) -> f64 {
        self.count_ones() as f64 / f64::from(self.size.get())
    }

    /// Prints the packed bit storage to stdout.
    pub fn print(&self) {
        println!("{}", self);
    }
}

impl fmt::Display for BloomFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, byte) in self.as_bytes().iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", byte)?;
        }
        write!(f, "]")
    }
}

/// Calculates the optimal number of bits for the Bloom filter based on the desired
/// false positive rate and the expected number of elements.
///
/// `m = ceil(-n * ln(p) / ln(2)^2)`, saturating at `u32::MAX`.
pub fn optimal_num_bits(num_elements: usize, false_positive_rate: f64) -> Result<u32> {
    if num_elements == 0 {
        return Err(BloomError::ZeroCapacity);
    }
    if !(false_positive_rate > 0.0 && false_positive_rate < 1.0) {
        return Err(BloomError::InvalidFalsePositiveRate(false_positive_rate));
    }

    let num_bits_float =
        (-((num_elements as f64) * false_positive_rate.ln()) / (2.0_f64.ln().powi(2))).ceil();

    Ok((num_bits_float as u32).max(1))
}

/// Calculates the optimal number of hash functions for the Bloom filter based on
/// the number of bits and the expected number of elements.
///
/// `k = ceil((m / n) * ln(2))`, never less than one.
pub fn optimal_num_hashes(num_bits: u32, num_elements: usize) -> Result<u32> {
    if num_elements == 0 {
        return Err(BloomError::ZeroCapacity);
    }

    let num_hashes_float = (f64::from(num_bits) / num_elements as f64) * 2.0_f64.ln();

    Ok((num_hashes_float.ceil() as u32).max(1))
}

/// Estimates the false positive rate of a filter with `num_bits` bits and
/// `num_hashes` hash functions after `num_elements` insertions.
///
/// `p = (1 - e^(-k * n / m))^k`
pub fn estimated_false_positive_rate(num_bits: u32, num_hashes: u32, num_elements: usize) -> f64 {
    if num_bits == 0 {
        return 1.0;
    }

    let k = f64::from(num_hashes);
    let exponent = -k * num_elements as f64 / f64::from(num_bits);

    (1.0 - exponent.exp()).powf(k)
}
