//! # Prism Core
//!
//! Core traits and utilities for the Prism post-quantum signature library.
//!
//! This crate provides:
//! - Common error types shared by the signature engine, the color codec,
//!   and the COSE envelope layer
//! - The [`Signer`] trait implemented by every ML-DSA parameter set
//! - Re-exports of `zeroize` and `subtle` so downstream crates agree on
//!   versions for secret wiping and constant-time operations

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod traits;

pub use error::{Error, Result};
pub use traits::Signer;

/// Re-export of `zeroize` for convenience.
pub use zeroize::{Zeroize, ZeroizeOnDrop};

/// Re-export of `subtle` for constant-time operations.
pub use subtle;
