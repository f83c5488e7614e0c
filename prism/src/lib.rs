//! # Prism
//!
//! A post-quantum signature library implementing ML-DSA (FIPS 204) at the
//! three standardized parameter sets, with COSE_Sign1 envelope framing
//! and a bijective color-pixel view of polynomial vectors.
//!
//! ## Features
//!
//! - `std` (default): standard library support
//! - `ml-dsa-44` / `ml-dsa-65` / `ml-dsa-87` (all default): parameter sets
//!
//! ## Example
//!
//! ```ignore
//! use prism::ml_dsa::MlDsa65;
//! use prism::traits::Signer;
//!
//! let mut rng = rand::rng();
//! let (sk, pk) = MlDsa65::keygen(&mut rng)?;
//!
//! let message = b"Hello, post-quantum world!";
//! let signature = MlDsa65::sign(&sk, message, b"")?;
//! MlDsa65::verify(&pk, message, &signature, b"")?;
//!
//! // wrap the detached signature in a COSE_Sign1 envelope
//! let envelope = prism::cose::wrap(
//!     prism::cose::ALG_ML_DSA_65,
//!     &[],
//!     message,
//!     signature.as_bytes(),
//! )?;
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub use prism_core::{Error, Result};

/// Core traits for signature primitives.
pub mod traits {
    pub use prism_core::Signer;
}

/// ML-DSA (FIPS 204) signatures and the color codec.
pub mod ml_dsa {
    pub use prism_core::Signer;
    pub use prism_ml_dsa::*;
}

/// COSE_Sign1 envelope framing.
pub mod cose {
    pub use prism_cose::*;
}
