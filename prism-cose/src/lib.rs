//! COSE_Sign1 envelope framing for ML-DSA signatures.
//!
//! An envelope is the four-element CBOR array
//! `[protected_bstr, unprotected_map, payload_bstr, signature_bstr]`.
//! The protected header is a CBOR map serialized to bytes and wrapped as a
//! byte string; the one header this crate understands is label 1 (`alg`).
//! The unprotected position always encodes as an empty map; on decode any
//! well-formed integer-keyed map is accepted there and ignored, since its
//! contents are not authenticated.
//!
//! Well-formed envelopes survive a decode/encode round trip byte-exactly:
//! only definite-length, shortest-form CBOR is produced or accepted.
//!
//! Algorithm identifiers follow the IANA COSE registrations for ML-DSA;
//! [`unwrap`] refuses identifiers outside that table.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

pub mod cbor;

use cbor::Cursor;
use prism_core::{Error, Result};
use prism_ml_dsa::ParamSet;

/// COSE algorithm identifier for ML-DSA-44 (IANA registered).
pub const ALG_ML_DSA_44: i64 = -48;
/// COSE algorithm identifier for ML-DSA-65 (IANA registered).
pub const ALG_ML_DSA_65: i64 = -49;
/// COSE algorithm identifier for ML-DSA-87 (IANA registered).
pub const ALG_ML_DSA_87: i64 = -50;

/// The `alg` header label.
const LABEL_ALG: i64 = 1;

/// Map a registered algorithm identifier to its parameter set.
///
/// # Errors
///
/// [`Error::UnknownCoseAlgorithm`] for anything outside the table.
pub fn param_set_for_alg(alg: i64) -> Result<ParamSet> {
    match alg {
        ALG_ML_DSA_44 => Ok(ParamSet::MlDsa44),
        ALG_ML_DSA_65 => Ok(ParamSet::MlDsa65),
        ALG_ML_DSA_87 => Ok(ParamSet::MlDsa87),
        _ => Err(Error::UnknownCoseAlgorithm { alg }),
    }
}

/// The registered algorithm identifier for a parameter set.
#[must_use]
pub const fn alg_for_param_set(set: ParamSet) -> i64 {
    match set {
        ParamSet::MlDsa44 => ALG_ML_DSA_44,
        ParamSet::MlDsa65 => ALG_ML_DSA_65,
        ParamSet::MlDsa87 => ALG_ML_DSA_87,
    }
}

/// A decoded COSE_Sign1 envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoseSign1 {
    /// Serialized protected-header map (the bytes inside the bstr).
    pub protected: Vec<u8>,
    /// Message payload.
    pub payload: Vec<u8>,
    /// Detached signature bytes.
    pub signature: Vec<u8>,
}

impl CoseSign1 {
    /// Encode as the four-element CBOR array.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            16 + self.protected.len() + self.payload.len() + self.signature.len(),
        );
        cbor::write_array_header(&mut out, 4);
        cbor::write_bstr(&mut out, &self.protected);
        cbor::write_map_header(&mut out, 0);
        cbor::write_bstr(&mut out, &self.payload);
        cbor::write_bstr(&mut out, &self.signature);
        out
    }

    /// Decode a four-element CBOR array, consuming the whole input.
    ///
    /// # Errors
    ///
    /// [`Error::CoseDecode`] for any structural deviation: wrong element
    /// count, non-bstr positions, unsupported map contents, or trailing
    /// bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut cur = Cursor::new(bytes);

        if cur.read_array_header()? != 4 {
            return Err(Error::CoseDecode);
        }

        let protected = cur.read_bstr()?.to_vec();

        // unprotected: a map whose entries are ignored
        let pairs = cur.read_map_header()?;
        for _ in 0..pairs {
            cur.read_int()?;
            cur.skip_value()?;
        }

        let payload = cur.read_bstr()?.to_vec();
        let signature = cur.read_bstr()?.to_vec();

        if !cur.is_at_end() {
            return Err(Error::CoseDecode);
        }

        Ok(Self {
            protected,
            payload,
            signature,
        })
    }

    /// Parse the protected header and return the `alg` value.
    ///
    /// # Errors
    ///
    /// [`Error::CoseDecode`] when the header is not a well-formed map or
    /// carries no `alg` entry.
    pub fn algorithm(&self) -> Result<i64> {
        let mut cur = Cursor::new(&self.protected);
        let pairs = cur.read_map_header()?;

        let mut alg = None;
        for _ in 0..pairs {
            let label = cur.read_int()?;
            if label == LABEL_ALG {
                if alg.is_some() {
                    return Err(Error::CoseDecode);
                }
                alg = Some(cur.read_int()?);
            } else {
                cur.skip_value()?;
            }
        }
        if !cur.is_at_end() {
            return Err(Error::CoseDecode);
        }

        alg.ok_or(Error::CoseDecode)
    }
}

/// Build a COSE_Sign1 envelope around a detached ML-DSA signature.
///
/// The protected map carries `{1: alg}` followed by `extra_protected`
/// pairs in the order given (labels must not collide with 1); values are
/// wrapped as byte strings. The unprotected position is an empty map.
///
/// # Errors
///
/// [`Error::CoseDecode`] when an extra label collides with the `alg`
/// label.
pub fn wrap(
    alg: i64,
    extra_protected: &[(i64, &[u8])],
    payload: &[u8],
    signature: &[u8],
) -> Result<Vec<u8>> {
    let mut protected = Vec::new();
    cbor::write_map_header(&mut protected, 1 + extra_protected.len() as u64);
    cbor::write_int(&mut protected, LABEL_ALG);
    cbor::write_int(&mut protected, alg);
    for &(label, value) in extra_protected {
        if label == LABEL_ALG {
            return Err(Error::CoseDecode);
        }
        cbor::write_int(&mut protected, label);
        cbor::write_bstr(&mut protected, value);
    }

    let envelope = CoseSign1 {
        protected,
        payload: payload.to_vec(),
        signature: signature.to_vec(),
    };
    Ok(envelope.encode())
}

/// Open a COSE_Sign1 envelope, returning `(alg, payload, signature)`.
///
/// The algorithm identifier must be one of the registered ML-DSA values;
/// everything else is refused. The signature itself is *not* verified
/// here; hand the parts to the engine for that.
///
/// # Errors
///
/// [`Error::CoseDecode`] on malformed CBOR,
/// [`Error::UnknownCoseAlgorithm`] on an unregistered identifier.
pub fn unwrap(bytes: &[u8]) -> Result<(i64, Vec<u8>, Vec<u8>)> {
    let envelope = CoseSign1::decode(bytes)?;
    let alg = envelope.algorithm()?;
    // refuse anything our registry does not name
    let _ = param_set_for_alg(alg)?;
    Ok((alg, envelope.payload, envelope.signature))
}
