//! Key and signature wrapper macros.
//!
//! Each parameter-set module calls [`define_dsa_types!`] to generate its
//! fixed-size `SigningKey`, `VerificationKey`, and `Signature` wrappers.
//! The signing key zeroizes on drop; the other two are public data.

/// Generate the key and signature types for one ML-DSA parameter set.
macro_rules! define_dsa_types {
    (
        sk_size: $sk_size:expr,
        pk_size: $pk_size:expr,
        sig_size: $sig_size:expr
    ) => {
        /// Signing key (secret key). Wiped on drop.
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct SigningKey {
            bytes: [u8; $sk_size],
        }

        impl SigningKey {
            /// Create from encoded bytes.
            ///
            /// # Errors
            ///
            /// [`Error::InvalidKeyLength`] when `bytes` is not exactly the
            /// encoded secret-key size.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
                if bytes.len() != $sk_size {
                    return Err(Error::InvalidKeyLength {
                        expected: $sk_size,
                        actual: bytes.len(),
                    });
                }
                let mut key = [0u8; $sk_size];
                key.copy_from_slice(bytes);
                Ok(Self { bytes: key })
            }

            /// The encoded bytes.
            pub fn as_bytes(&self) -> &[u8; $sk_size] {
                &self.bytes
            }
        }

        /// Verification key (public key).
        #[derive(Clone)]
        pub struct VerificationKey {
            bytes: [u8; $pk_size],
        }

        impl VerificationKey {
            /// Create from encoded bytes.
            ///
            /// # Errors
            ///
            /// [`Error::InvalidKeyLength`] when `bytes` is not exactly the
            /// encoded public-key size.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
                if bytes.len() != $pk_size {
                    return Err(Error::InvalidKeyLength {
                        expected: $pk_size,
                        actual: bytes.len(),
                    });
                }
                let mut key = [0u8; $pk_size];
                key.copy_from_slice(bytes);
                Ok(Self { bytes: key })
            }

            /// The encoded bytes.
            pub fn as_bytes(&self) -> &[u8; $pk_size] {
                &self.bytes
            }
        }

        /// Detached signature.
        #[derive(Clone)]
        pub struct Signature {
            bytes: [u8; $sig_size],
        }

        impl Signature {
            /// Create from encoded bytes.
            ///
            /// # Errors
            ///
            /// [`Error::InvalidSignatureLength`] when `bytes` is not
            /// exactly the signature size.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
                if bytes.len() != $sig_size {
                    return Err(Error::InvalidSignatureLength {
                        expected: $sig_size,
                        actual: bytes.len(),
                    });
                }
                let mut sig = [0u8; $sig_size];
                sig.copy_from_slice(bytes);
                Ok(Self { bytes: sig })
            }

            /// The encoded bytes.
            pub fn as_bytes(&self) -> &[u8; $sig_size] {
                &self.bytes
            }
        }
    };
}

pub(crate) use define_dsa_types;
