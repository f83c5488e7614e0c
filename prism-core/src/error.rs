//! Error types for Prism cryptographic operations.

use core::fmt;

/// Result type alias using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur during cryptographic operations.
///
/// Verification over untrusted input never surfaces decode detail: the
/// verify path folds every malformed-input condition into
/// [`Error::VerificationFailed`]. The remaining variants are reserved for
/// trusted-input paths (key generation, signing, envelope construction)
/// where the caller can act on the reason. No variant carries key material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Parameter set not recognized.
    UnsupportedParameterSet,

    /// Encoded key has the wrong length.
    InvalidKeyLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// Encoded key has the right length but out-of-range coefficients.
    MalformedKey,

    /// Encoded signature has the wrong length.
    InvalidSignatureLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// Context string longer than 255 bytes.
    ContextTooLong {
        /// Actual context length provided.
        actual: usize,
    },

    /// The signing rejection loop passed its safety bound.
    ///
    /// Cryptographically improbable with a well-formed key; indicates a
    /// corrupted secret key or an implementation fault.
    RejectionExhausted,

    /// The random source collaborator failed to produce bytes.
    RandomSourceFailure,

    /// Signature verification failed.
    VerificationFailed,

    /// Color buffer has the wrong length for the requested dimensions.
    InvalidColorBuffer {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// Malformed COSE_Sign1 envelope.
    CoseDecode,

    /// COSE algorithm identifier not in the registry.
    UnknownCoseAlgorithm {
        /// The identifier found in the protected header.
        alg: i64,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedParameterSet => write!(f, "unsupported parameter set"),
            Error::InvalidKeyLength { expected, actual } => {
                write!(f, "invalid key length: expected {expected}, got {actual}")
            }
            Error::MalformedKey => write!(f, "encoded key has out-of-range coefficients"),
            Error::InvalidSignatureLength { expected, actual } => {
                write!(
                    f,
                    "invalid signature length: expected {expected}, got {actual}"
                )
            }
            Error::ContextTooLong { actual } => {
                write!(f, "context too long: {actual} bytes, limit is 255")
            }
            Error::RejectionExhausted => write!(f, "signing rejection loop exhausted"),
            Error::RandomSourceFailure => write!(f, "random source failed"),
            Error::VerificationFailed => write!(f, "signature verification failed"),
            Error::InvalidColorBuffer { expected, actual } => {
                write!(
                    f,
                    "invalid color buffer length: expected {expected}, got {actual}"
                )
            }
            Error::CoseDecode => write!(f, "malformed COSE_Sign1 envelope"),
            Error::UnknownCoseAlgorithm { alg } => {
                write!(f, "unknown COSE algorithm identifier {alg}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
