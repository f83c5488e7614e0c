//! Fuzz target for signing.
//!
//! Checks that signing never panics, respects the context limit, emits
//! fixed-size signatures, and is deterministic for a fixed hedge.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use prism_ml_dsa::{keygen_from_seed, sign_with_set, verify_with_set, ParamSet};

#[derive(Debug, Arbitrary)]
struct SignInput {
    seed: [u8; 32],
    rnd: [u8; 32],
    message: Vec<u8>,
    ctx: Vec<u8>,
    variant: u8,
}

fuzz_target!(|input: SignInput| {
    if input.message.len() > 10_000 {
        return;
    }

    let set = match input.variant % 3 {
        0 => ParamSet::MlDsa44,
        1 => ParamSet::MlDsa65,
        _ => ParamSet::MlDsa87,
    };

    let (sk, pk) = keygen_from_seed(set, &input.seed).unwrap();

    let result = sign_with_set(set, &sk, &input.message, &input.ctx, Some(&input.rnd));
    if input.ctx.len() > 255 {
        assert!(result.is_err(), "over-long context must be refused");
        return;
    }

    let sig = result.expect("signing with a well-formed key must succeed");
    assert_eq!(sig.len(), set.signature_len());

    let sig2 = sign_with_set(set, &sk, &input.message, &input.ctx, Some(&input.rnd))
        .expect("second signing must succeed");
    assert_eq!(sig, sig2, "signing must be deterministic for a fixed hedge");

    assert!(verify_with_set(set, &pk, &input.message, &sig, &input.ctx));
});
