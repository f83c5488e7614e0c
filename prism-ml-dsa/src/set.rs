//! Runtime parameter-set selection.
//!
//! The typed per-set modules are the primary interface; this module adds a
//! byte-oriented surface keyed on a [`ParamSet`] value for callers that
//! pick the set at runtime (envelope decoding, key stores, CLIs built on
//! top of the library).

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use prism_core::{Error, Result};

/// The three standardized ML-DSA parameter sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamSet {
    /// ML-DSA-44: security category 2.
    MlDsa44,
    /// ML-DSA-65: security category 3.
    MlDsa65,
    /// ML-DSA-87: security category 5.
    MlDsa87,
}

impl ParamSet {
    /// Canonical name, e.g. `"ML-DSA-65"`.
    pub const fn name(self) -> &'static str {
        match self {
            ParamSet::MlDsa44 => "ML-DSA-44",
            ParamSet::MlDsa65 => "ML-DSA-65",
            ParamSet::MlDsa87 => "ML-DSA-87",
        }
    }

    /// Encoded public-key size in bytes.
    pub const fn public_key_len(self) -> usize {
        match self {
            ParamSet::MlDsa44 => 1312,
            ParamSet::MlDsa65 => 1952,
            ParamSet::MlDsa87 => 2592,
        }
    }

    /// Encoded secret-key size in bytes.
    pub const fn secret_key_len(self) -> usize {
        match self {
            ParamSet::MlDsa44 => 2560,
            ParamSet::MlDsa65 => 4032,
            ParamSet::MlDsa87 => 4896,
        }
    }

    /// Encoded signature size in bytes.
    pub const fn signature_len(self) -> usize {
        match self {
            ParamSet::MlDsa44 => 2420,
            ParamSet::MlDsa65 => 3309,
            ParamSet::MlDsa87 => 4627,
        }
    }
}

impl core::fmt::Display for ParamSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

macro_rules! dispatch {
    ($set:expr, $p:ident, $body:expr, $fallback:expr) => {
        match $set {
            #[cfg(feature = "ml-dsa-44")]
            ParamSet::MlDsa44 => {
                use crate::params::ml_dsa_44 as $p;
                $body
            }
            #[cfg(feature = "ml-dsa-65")]
            ParamSet::MlDsa65 => {
                use crate::params::ml_dsa_65 as $p;
                $body
            }
            #[cfg(feature = "ml-dsa-87")]
            ParamSet::MlDsa87 => {
                use crate::params::ml_dsa_87 as $p;
                $body
            }
            #[allow(unreachable_patterns)]
            _ => $fallback,
        }
    };
}

/// Deterministic key generation for a runtime-selected set.
///
/// Returns `(sk, pk)` as encoded byte strings.
///
/// # Errors
///
/// [`Error::UnsupportedParameterSet`] when the set's feature is disabled.
pub fn keygen_from_seed(set: ParamSet, xi: &[u8; 32]) -> Result<(Vec<u8>, Vec<u8>)> {
    dispatch!(
        set,
        p,
        Ok(crate::sign::ml_dsa_keygen::<{ p::K }, { p::L }, { p::ETA }>(xi)),
        Err(Error::UnsupportedParameterSet)
    )
}

/// Sign for a runtime-selected set.
///
/// `rnd: None` selects the deterministic variant (all-zero hedge);
/// `rnd: Some(r)` mixes the provided 32 bytes in.
///
/// # Errors
///
/// [`Error::ContextTooLong`], key decode errors,
/// [`Error::RejectionExhausted`], or
/// [`Error::UnsupportedParameterSet`] when the set's feature is disabled.
pub fn sign(
    set: ParamSet,
    sk: &[u8],
    message: &[u8],
    ctx: &[u8],
    rnd: Option<&[u8; 32]>,
) -> Result<Vec<u8>> {
    if ctx.len() > 255 {
        return Err(Error::ContextTooLong { actual: ctx.len() });
    }
    let rnd = rnd.copied().unwrap_or([0u8; 32]);

    dispatch!(
        set,
        p,
        crate::sign::ml_dsa_sign::<
            { p::K },
            { p::L },
            { p::ETA },
            { p::BETA },
            { p::GAMMA1 },
            { p::GAMMA2 },
            { p::TAU },
            { p::OMEGA },
            { p::C_TILDE_BYTES },
        >(sk, message, Some(ctx), &rnd),
        Err(Error::UnsupportedParameterSet)
    )
}

/// Verify for a runtime-selected set.
///
/// Total over untrusted input: malformed keys, signatures, and contexts
/// (including a disabled parameter set) all return `false`.
#[must_use]
pub fn verify(set: ParamSet, pk: &[u8], message: &[u8], sig: &[u8], ctx: &[u8]) -> bool {
    dispatch!(
        set,
        p,
        crate::sign::ml_dsa_verify::<
            { p::K },
            { p::L },
            { p::BETA },
            { p::GAMMA1 },
            { p::GAMMA2 },
            { p::TAU },
            { p::OMEGA },
            { p::C_TILDE_BYTES },
        >(pk, message, Some(ctx), sig),
        false
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_table() {
        for (set, pk, sk, sig) in [
            (ParamSet::MlDsa44, 1312, 2560, 2420),
            (ParamSet::MlDsa65, 1952, 4032, 3309),
            (ParamSet::MlDsa87, 2592, 4896, 4627),
        ] {
            assert_eq!(set.public_key_len(), pk);
            assert_eq!(set.secret_key_len(), sk);
            assert_eq!(set.signature_len(), sig);
        }
    }

    #[cfg(all(feature = "ml-dsa-44", feature = "ml-dsa-65", feature = "ml-dsa-87"))]
    #[test]
    fn test_dispatch_roundtrip_all_sets() {
        let xi = [11u8; 32];
        for set in [ParamSet::MlDsa44, ParamSet::MlDsa65, ParamSet::MlDsa87] {
            let (sk, pk) = keygen_from_seed(set, &xi).unwrap();
            assert_eq!(sk.len(), set.secret_key_len());
            assert_eq!(pk.len(), set.public_key_len());

            let sig = sign(set, &sk, b"dispatch", b"", None).unwrap();
            assert_eq!(sig.len(), set.signature_len());
            assert!(verify(set, &pk, b"dispatch", &sig, b""));
            assert!(!verify(set, &pk, b"dispatcx", &sig, b""));
        }
    }

    #[test]
    fn test_sign_ctx_limit() {
        let r = sign(ParamSet::MlDsa44, &[0u8; 2560], b"m", &[0u8; 300], None);
        assert!(matches!(r, Err(Error::ContextTooLong { actual: 300 })));
    }

    #[test]
    fn test_verify_total_on_garbage() {
        assert!(!verify(ParamSet::MlDsa44, &[1u8; 7], b"m", &[2u8; 9], b""));
        assert!(!verify(ParamSet::MlDsa87, &[0u8; 2592], b"m", &[0u8; 4627], b""));
    }
}
