//! Fuzz target for verification.
//!
//! Checks that verify is total (no panic on any input), rejects
//! corrupted messages, and accepts untampered signatures.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use prism_ml_dsa::{keygen_from_seed, sign_with_set, verify_with_set, ParamSet};

#[derive(Debug, Arbitrary)]
struct VerifyInput {
    seed: [u8; 32],
    message: Vec<u8>,
    corruption: Option<Corruption>,
    variant: u8,
}

#[derive(Debug, Arbitrary)]
enum Corruption {
    Signature { position: usize, xor_value: u8 },
    Message { position: usize, xor_value: u8 },
    Random { bytes: Vec<u8> },
}

fuzz_target!(|input: VerifyInput| {
    if input.message.len() > 10_000 {
        return;
    }

    let set = match input.variant % 3 {
        0 => ParamSet::MlDsa44,
        1 => ParamSet::MlDsa65,
        _ => ParamSet::MlDsa87,
    };

    let (sk, pk) = keygen_from_seed(set, &input.seed).unwrap();
    let mut sig = sign_with_set(set, &sk, &input.message, b"", None).unwrap();
    let mut msg = input.message.clone();

    match &input.corruption {
        None => {
            assert!(
                verify_with_set(set, &pk, &msg, &sig, b""),
                "valid signature must verify"
            );
        }
        Some(Corruption::Signature { position, xor_value }) => {
            if *position < sig.len() && *xor_value != 0 {
                sig[*position] ^= xor_value;
                // corruption of c_tilde, z, or the hint region may not
                // always break parsing, but must never panic
                let _ = verify_with_set(set, &pk, &msg, &sig, b"");
            }
        }
        Some(Corruption::Message { position, xor_value }) => {
            if *position < msg.len() && *xor_value != 0 {
                msg[*position] ^= xor_value;
                assert!(
                    !verify_with_set(set, &pk, &msg, &sig, b""),
                    "modified message must fail verification"
                );
            }
        }
        Some(Corruption::Random { bytes }) => {
            let _ = verify_with_set(set, &pk, &msg, bytes, b"");
        }
    }
});
