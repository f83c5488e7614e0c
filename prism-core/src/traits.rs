//! Cryptographic primitive traits.

use crate::Result;
use rand_core::CryptoRng;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Digital signature trait with context binding.
///
/// Implemented by each ML-DSA parameter set marker. Messages are signed
/// together with an application context string of at most 255 bytes which
/// both signer and verifier must supply; an empty slice is the common case.
///
/// Signatures are *pure*: the message itself is passed to the signer.
/// Pre-hashed inputs are refused rather than silently accepted; there is
/// no way to mark a message as already hashed through this interface.
///
/// # Example
///
/// ```ignore
/// use prism_core::Signer;
///
/// let (sk, pk) = MySigner::keygen(&mut rng)?;
/// let sig = MySigner::sign(&sk, message, b"")?;
/// MySigner::verify(&pk, message, &sig, b"")?;
/// ```
pub trait Signer {
    /// Signing key (private key).
    type SigningKey: Zeroize + ZeroizeOnDrop;

    /// Verification key (public key).
    type VerificationKey: Clone;

    /// Signature produced by signing.
    type Signature: Clone;

    /// Size of the signing key in bytes.
    const SIGNING_KEY_SIZE: usize;

    /// Size of the verification key in bytes.
    const VERIFICATION_KEY_SIZE: usize;

    /// Size of the signature in bytes.
    const SIGNATURE_SIZE: usize;

    /// Generate a new key pair from the provided random number generator.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::RandomSourceFailure`] if the generator fails.
    fn keygen(rng: &mut impl CryptoRng) -> Result<(Self::SigningKey, Self::VerificationKey)>;

    /// Derive a key pair deterministically from a 32-byte seed.
    ///
    /// Two calls with the same seed produce byte-identical keys. Intended
    /// for test vectors and for callers that manage seed storage themselves;
    /// the seed must come from a cryptographically secure source.
    fn keygen_from_seed(xi: &[u8; 32]) -> (Self::SigningKey, Self::VerificationKey);

    /// Sign a message deterministically.
    ///
    /// Two calls with the same key, message, and context produce
    /// byte-identical signatures.
    ///
    /// # Errors
    ///
    /// [`crate::Error::ContextTooLong`] if `ctx` exceeds 255 bytes,
    /// [`crate::Error::MalformedKey`] on an undecodable signing key,
    /// [`crate::Error::RejectionExhausted`] if the internal sampling loop
    /// passes its safety bound.
    fn sign(sk: &Self::SigningKey, message: &[u8], ctx: &[u8]) -> Result<Self::Signature>;

    /// Sign a message in hedged mode, mixing 32 fresh random bytes into
    /// the signature derivation.
    ///
    /// # Errors
    ///
    /// As [`Signer::sign`], plus [`crate::Error::RandomSourceFailure`] if
    /// the generator fails.
    fn sign_randomized(
        sk: &Self::SigningKey,
        message: &[u8],
        ctx: &[u8],
        rng: &mut impl CryptoRng,
    ) -> Result<Self::Signature>;

    /// Verify a signature over a message and context.
    ///
    /// Never panics on untrusted input: every malformed-input condition is
    /// reported as [`crate::Error::VerificationFailed`].
    fn verify(
        pk: &Self::VerificationKey,
        message: &[u8],
        signature: &Self::Signature,
        ctx: &[u8],
    ) -> Result<()>;
}
