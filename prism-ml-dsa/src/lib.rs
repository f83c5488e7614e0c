//! ML-DSA (FIPS 204) Implementation
//!
//! This crate provides a pure Rust implementation of the ML-DSA digital
//! signature algorithm as specified in FIPS 204, together with a bijective
//! "color pixel" byte view of polynomial vectors used for visualization
//! and storage framing.
//!
//! # Supported Parameter Sets
//!
//! | Variant | Security Level | Public Key | Signature |
//! |---------|----------------|------------|-----------|
//! | ML-DSA-44 | Level 2 | 1,312 bytes | 2,420 bytes |
//! | ML-DSA-65 | Level 3 | 1,952 bytes | 3,309 bytes |
//! | ML-DSA-87 | Level 5 | 2,592 bytes | 4,627 bytes |
//!
//! Signing is pure ML-DSA with context binding; the pre-hashed
//! (HashML-DSA) variant is not implemented, and there is no way to pass a
//! message digest in place of the message through this API.
//!
//! # Example
//!
//! ```ignore
//! use prism_ml_dsa::MlDsa65;
//! use prism_core::Signer;
//!
//! let mut rng = rand::rng();
//! let (sk, pk) = MlDsa65::keygen(&mut rng)?;
//!
//! let message = b"Hello, post-quantum world!";
//! let signature = MlDsa65::sign(&sk, message, b"")?;
//!
//! assert!(MlDsa65::verify(&pk, message, &signature, b"").is_ok());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(
    clippy::many_single_char_names,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::module_name_repetitions
)]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod hash;
mod ntt;
mod packing;
mod reduce;
mod rounding;
mod sample;
mod types;

pub mod color;
pub mod params;
pub mod poly;
pub mod polyvec;
pub mod sign;

mod set;

#[cfg(feature = "ml-dsa-44")]
mod ml_dsa_44;
#[cfg(feature = "ml-dsa-65")]
mod ml_dsa_65;
#[cfg(feature = "ml-dsa-87")]
mod ml_dsa_87;

#[cfg(feature = "ml-dsa-44")]
pub use ml_dsa_44::MlDsa44;
#[cfg(feature = "ml-dsa-65")]
pub use ml_dsa_65::MlDsa65;
#[cfg(feature = "ml-dsa-87")]
pub use ml_dsa_87::MlDsa87;

pub use set::{keygen_from_seed, sign as sign_with_set, verify as verify_with_set, ParamSet};

// Re-export variant modules for access to the concrete key types.
/// ML-DSA-44 (NIST Security Level 2) key and signature types.
#[cfg(feature = "ml-dsa-44")]
pub mod dsa44 {
    pub use crate::ml_dsa_44::*;
}

/// ML-DSA-65 (NIST Security Level 3) key and signature types.
#[cfg(feature = "ml-dsa-65")]
pub mod dsa65 {
    pub use crate::ml_dsa_65::*;
}

/// ML-DSA-87 (NIST Security Level 5) key and signature types.
#[cfg(feature = "ml-dsa-87")]
pub mod dsa87 {
    pub use crate::ml_dsa_87::*;
}

pub use prism_core::{Error, Result, Signer};
