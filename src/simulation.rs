//! False positive simulation.
//!
//! Inserts a batch of random keys into a filter, probes it with a second batch of
//! random keys and tallies the answers against a ground-truth set kept here. The
//! filter itself never knows which keys were really inserted.

use std::collections::HashSet;

use rand::{distributions::Alphanumeric, Rng};
use tracing::{debug, info};

use crate::{
    bloom_filter::{estimated_false_positive_rate, BloomFilter},
    error::Result,
    hash_fns::{HashFns, DEFAULT_BASE_SEED},
};

/// Number of keys inserted, and probed, when none is given.
pub const DEFAULT_NUM_KEYS: usize = 50_000;

/// Length of the generated keys when none is given.
pub const DEFAULT_KEY_LENGTH: usize = 8;

/// Parameters of one simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Number of bits in the filter.
    pub filter_size: u32,
    /// Number of hash functions.
    pub num_hashes: u32,
    /// Number of random keys to insert. The same number of keys is probed.
    pub num_keys: usize,
    /// Length of every generated key.
    pub key_length: usize,
    /// Base seed of the hash function set.
    pub base_seed: u32,
}

impl SimulationConfig {
    pub fn new(filter_size: u32, num_hashes: u32) -> Self {
        Self {
            filter_size,
            num_hashes,
            num_keys: DEFAULT_NUM_KEYS,
            key_length: DEFAULT_KEY_LENGTH,
            base_seed: DEFAULT_BASE_SEED,
        }
    }
}

/// Outcome of a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub filter_size: u32,
    pub num_hashes: u32,
    /// Number of insertions performed.
    pub existing_keys: usize,
    /// Number of distinct keys among the insertions.
    pub distinct_keys: usize,
    /// Number of probes performed.
    pub probed_keys: usize,
    /// Probes whose key was never inserted.
    pub non_existent_keys: usize,
    /// Probes reported present although never inserted.
    pub false_positives: usize,
    /// Probes reported absent although inserted. Always zero for a correct filter.
    pub false_negatives: usize,
    /// Fraction of filter bits set after the insertions.
    pub fill_ratio: f64,
    /// `(1 - e^(-kn/m))^k` for the distinct keys inserted.
    pub estimated_rate: f64,
}

impl Statistics {
    /// Observed false positive rate over the probes that were never inserted.
    pub fn observed_rate(&self) -> f64 {
        if self.non_existent_keys == 0 {
            return 0.0;
        }

        self.false_positives as f64 / self.non_existent_keys as f64
    }
}

/// Generates a random alphanumeric key of `length` characters.
pub fn random_key<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Runs one simulation and returns the populated filter with its statistics.
///
/// # Errors
///
/// Fails only when the configuration describes an invalid filter.
pub fn run<R: Rng + ?Sized>(
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<(BloomFilter, Statistics)> {
    let mut bloom = BloomFilter::new(config.filter_size)?;
    let hash_fns = HashFns::with_base_seed(config.num_hashes, config.base_seed);

    let keys: Vec<String> = (0..config.num_keys)
        .map(|_| random_key(rng, config.key_length))
        .collect();
    let existing: HashSet<&str> = keys.iter().map(String::as_str).collect();

    for key in &keys {
        bloom.add(key, &hash_fns);
    }

    debug!(
        inserted = keys.len(),
        distinct = existing.len(),
        fill_ratio = bloom.fill_ratio(),
        "inserted keys"
    );

    let mut non_existent_keys = 0;
    let mut false_positives = 0;
    let mut false_negatives = 0;

    for _ in 0..config.num_keys {
        let probe = random_key(rng, config.key_length);
        let present = bloom.exists(&probe, &hash_fns);

        if existing.contains(probe.as_str()) {
            if !present {
                false_negatives += 1;
            }
        } else {
            non_existent_keys += 1;
            if present {
                false_positives += 1;
            }
        }
    }

    let stats = Statistics {
        filter_size: config.filter_size,
        num_hashes: config.num_hashes,
        existing_keys: keys.len(),
        distinct_keys: existing.len(),
        probed_keys: config.num_keys,
        non_existent_keys,
        false_positives,
        false_negatives,
        fill_ratio: bloom.fill_ratio(),
        estimated_rate: estimated_false_positive_rate(
            config.filter_size,
            config.num_hashes,
            existing.len(),
        ),
    };

    info!(
        false_positives,
        non_existent_keys,
        observed = stats.observed_rate(),
        estimated = stats.estimated_rate,
        "simulation finished"
    );

    Ok((bloom, stats))
}
