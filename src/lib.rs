//! Bloom Filter Library
//!
//! This library provides a fixed-size Bloom filter for probabilistic set membership.
//! A query answers either "definitely absent" or "possibly present", trading a bounded
//! false positive rate for a very small, constant-size memory footprint.
//!
//! # Modules
//!
//! - `hash_fns`: A set of independent, seeded MurmurHash3 functions used to derive bit indices.
//! - `bloom_filter`: The bit array with `add` and `exists`, plus sizing helpers.
//! - `simulation`: Measures the false positive rate of a filter with random keys.
//! - `error`: Errors raised while configuring a filter.
//!
//! # Usage
//!
//! Add this library as a dependency in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! bloomset = "0.1.0"
//! ```
//!
//! # Examples
//!
//! The hash function set is not owned by the filter. Pass the same set to every call:
//!
//! ```rust
//! use bloomset::{BloomFilter, HashFns};
//!
//! fn main() -> bloomset::Result<()> {
//!     let hash_fns = HashFns::new(5);
//!     let mut bloom = BloomFilter::new(800)?;
//!
//!     bloom.add("alpha", &hash_fns);
//!
//!     assert!(bloom.exists("alpha", &hash_fns));
//!     Ok(())
//! }
//! ```
//!
//! A filter of zero bits is rejected:
//!
//! ```rust
//! use bloomset::{BloomError, BloomFilter};
//!
//! assert_eq!(BloomFilter::new(0), Err(BloomError::ZeroSize));
//! ```
//!
//! # Testing
//!
//! Run the unit and integration tests with `cargo test`:
//!
//! ```bash
//! $ cargo test
//! ```

/// Bit array and membership operations.
pub mod bloom_filter;
pub mod error;
/// Seeded hash functions.
pub mod hash_fns;
pub mod simulation;

pub use bloom_filter::{
    estimated_false_positive_rate, optimal_num_bits, optimal_num_hashes, BloomFilter,
};
pub use error::{BloomError, Result};
pub use hash_fns::{murmur3_32, HashFns, DEFAULT_BASE_SEED};

/// Property tests for `bloom_filter` module.
#[cfg(test)]
mod bloom_filter_tests;
