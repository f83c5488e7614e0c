//! Fuzz target for key generation.
//!
//! Checks that keygen never panics, emits fixed-size artifacts, and is
//! deterministic in the seed.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use prism_ml_dsa::{keygen_from_seed, ParamSet};

#[derive(Debug, Arbitrary)]
struct KeygenInput {
    seed: [u8; 32],
    variant: u8,
}

fuzz_target!(|input: KeygenInput| {
    let set = match input.variant % 3 {
        0 => ParamSet::MlDsa44,
        1 => ParamSet::MlDsa65,
        _ => ParamSet::MlDsa87,
    };

    let (sk, pk) = keygen_from_seed(set, &input.seed).unwrap();
    assert_eq!(sk.len(), set.secret_key_len());
    assert_eq!(pk.len(), set.public_key_len());

    let (sk2, pk2) = keygen_from_seed(set, &input.seed).unwrap();
    assert_eq!(sk, sk2, "keygen must be deterministic in the seed");
    assert_eq!(pk, pk2, "keygen must be deterministic in the seed");
});
