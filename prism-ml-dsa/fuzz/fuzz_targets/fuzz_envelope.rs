//! Fuzz target for COSE_Sign1 envelope decoding.
//!
//! Checks that unwrap is total over arbitrary bytes and that wrap/unwrap
//! round-trips whatever it accepts.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // arbitrary bytes must never panic the decoder
    if let Ok((alg, payload, signature)) = prism_cose::unwrap(data) {
        // anything accepted must re-encode to an envelope that decodes
        // to the same parts
        let rewrapped = prism_cose::wrap(alg, &[], &payload, &signature).unwrap();
        let (alg2, payload2, signature2) = prism_cose::unwrap(&rewrapped).unwrap();
        assert_eq!(alg, alg2);
        assert_eq!(payload, payload2);
        assert_eq!(signature, signature2);
    }
});
