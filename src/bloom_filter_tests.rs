use crate::{hash_fns::HashFns, BloomFilter};

use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_keys(rng: &mut StdRng, count: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|_| {
            let len = rng.gen_range(0..24);
            (0..len).map(|_| rng.gen::<u8>()).collect()
        })
        .collect()
}

#[test]
fn test_no_false_negatives() {
    let mut rng = StdRng::seed_from_u64(1);
    let hash_fns = HashFns::new(4);
    let mut bloom = BloomFilter::new(2048).unwrap();

    let keys = random_keys(&mut rng, 500);
    for key in &keys {
        bloom.add(key, &hash_fns);
    }

    // Heavily overload the filter afterwards; earlier keys must still be found.
    for key in random_keys(&mut rng, 5000) {
        bloom.add(&key, &hash_fns);
    }

    for key in &keys {
        assert!(bloom.exists(key, &hash_fns), "false negative for {:?}", key);
    }
}

#[test]
fn test_monotonicity() {
    let mut rng = StdRng::seed_from_u64(2);
    let hash_fns = HashFns::new(3);
    let mut bloom = BloomFilter::new(512).unwrap();

    let mut present = Vec::new();
    for key in random_keys(&mut rng, 300) {
        bloom.add(&key, &hash_fns);
        present.push(key);

        // Everything reported present so far stays present.
        assert!(present.iter().all(|key| bloom.exists(key, &hash_fns)));
    }
}

#[test]
fn test_bits_never_clear() {
    let mut rng = StdRng::seed_from_u64(3);
    let hash_fns = HashFns::new(6);
    let mut bloom = BloomFilter::new(333).unwrap();

    for key in random_keys(&mut rng, 200) {
        let before = bloom.as_bytes().to_vec();
        bloom.add(&key, &hash_fns);

        for (old, new) in before.iter().zip(bloom.as_bytes()) {
            assert_eq!(old & new, *old);
        }
    }
}

#[test]
fn test_add_is_idempotent() {
    let hash_fns = HashFns::new(5);
    let mut once = BloomFilter::new(800).unwrap();
    let mut twice = BloomFilter::new(800).unwrap();

    once.add("delta", &hash_fns);
    twice.add("delta", &hash_fns);
    twice.add("delta", &hash_fns);

    assert_eq!(once, twice);
    assert_eq!(once.as_bytes(), twice.as_bytes());
}

#[test]
fn test_empty_filter_reports_absent() {
    let mut rng = StdRng::seed_from_u64(4);
    let hash_fns = HashFns::new(5);
    let bloom = BloomFilter::new(800).unwrap();

    for key in random_keys(&mut rng, 1000) {
        assert!(!bloom.exists(&key, &hash_fns));
    }
    assert!(!bloom.exists("", &hash_fns));
}

#[test]
fn test_set_bits_bounded_by_hash_count() {
    let hash_fns = HashFns::new(5);
    let mut bloom = BloomFilter::new(10_000).unwrap();

    bloom.add("epsilon", &hash_fns);

    let ones = bloom.count_ones();
    assert!((1..=5).contains(&ones), "unexpected set bit count {}", ones);
}

#[test]
fn test_different_hash_sets_disagree() {
    let inserted_with = HashFns::with_base_seed(5, 1);
    let queried_with = HashFns::with_base_seed(5, 1_000);
    let mut bloom = BloomFilter::new(100_000).unwrap();

    bloom.add("zeta", &inserted_with);

    assert!(bloom.exists("zeta", &inserted_with));
    assert!(!bloom.exists("zeta", &queried_with));
}

#[test]
fn test_byte_and_str_keys_agree() {
    let hash_fns = HashFns::new(4);
    let mut bloom = BloomFilter::new(256).unwrap();

    bloom.add("eta", &hash_fns);

    assert!(bloom.exists(b"eta", &hash_fns));
    assert!(bloom.exists(&String::from("eta"), &hash_fns));
    assert!(bloom.exists(&b"eta".to_vec(), &hash_fns));
}
