use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while configuring a Bloom filter or its hash functions.
///
/// Only construction can fail. Once a [`BloomFilter`](crate::BloomFilter) exists,
/// inserting and querying keys are infallible.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum BloomError {
    #[error("bloom filter size must be at least one bit")]
    #[diagnostic(
        code(bloomset::zero_size),
        help("pass a filter size greater than zero")
    )]
    ZeroSize,

    #[error("cannot reduce hash digests modulo zero")]
    #[diagnostic(code(bloomset::zero_modulus))]
    ZeroModulus,

    #[error("expected number of elements must be greater than zero")]
    #[diagnostic(code(bloomset::zero_capacity))]
    ZeroCapacity,

    #[error("false positive rate must be between 0 and 1, got {0}")]
    #[diagnostic(
        code(bloomset::invalid_false_positive_rate),
        help("use a rate such as 0.01 for 1%")
    )]
    InvalidFalsePositiveRate(f64),
}

pub type Result<T> = std::result::Result<T, BloomError>;
