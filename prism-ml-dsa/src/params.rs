//! ML-DSA parameter sets
//!
//! Defines constants for ML-DSA-44, ML-DSA-65, and ML-DSA-87.
//!
//! The matrix A has K rows and L columns. The two dimensions are equal only
//! for ML-DSA-44, so every function in this crate takes them as separate
//! parameters; conflating them passes that one set and silently breaks the
//! other two.

use crate::reduce::Q;

/// Common parameters shared across all ML-DSA variants.
pub mod common {
    use super::Q;

    /// Ring dimension
    pub const N: usize = 256;

    /// Modulus q = 8380417 = 2^23 - 2^13 + 1
    pub const Q_VAL: i32 = Q;

    /// d parameter for Power2Round (13)
    pub const D: usize = 13;

    /// Seed size in bytes
    pub const SEED_BYTES: usize = 32;

    /// Collision-resistant hash output size in bytes (tr, mu, rho'')
    pub const CRH_BYTES: usize = 64;

    /// Context strings are limited to 255 bytes.
    pub const CTX_MAX: usize = 255;
}

/// ML-DSA-44 parameters (NIST Level 2)
#[cfg(feature = "ml-dsa-44")]
pub mod ml_dsa_44 {
    pub use super::common::*;

    /// Number of rows in matrix A
    pub const K: usize = 4;
    /// Number of columns in matrix A
    pub const L: usize = 4;
    /// Secret coefficient bound
    pub const ETA: usize = 2;
    /// Number of +/-1 coefficients in the challenge
    pub const TAU: usize = 39;
    /// Rejection bound offset (TAU * ETA)
    pub const BETA: i32 = 78;
    /// Masking range for y
    pub const GAMMA1: i32 = 1 << 17;
    /// Low-order rounding range
    pub const GAMMA2: i32 = (Q_VAL - 1) / 88; // 95232
    /// Maximum number of hint ones
    pub const OMEGA: usize = 80;

    /// Commitment hash size (lambda/4 where lambda = 128)
    pub const C_TILDE_BYTES: usize = 32;

    /// Public key size in bytes
    pub const PK_BYTES: usize = 1312;
    /// Secret key size in bytes
    pub const SK_BYTES: usize = 2560;
    /// Signature size in bytes
    pub const SIG_BYTES: usize = 2420;

    /// Encoded polynomial size (t1, 10 bits)
    pub const POLY_T1_PACKED_BYTES: usize = 320;
    /// Encoded polynomial size (t0, 13 bits)
    pub const POLY_T0_PACKED_BYTES: usize = 416;
    /// Encoded polynomial size (eta = 2, 3 bits)
    pub const POLY_ETA_PACKED_BYTES: usize = 96;
    /// Encoded polynomial size (z, gamma1 = 2^17, 18 bits)
    pub const POLY_Z_PACKED_BYTES: usize = 576;
    /// Encoded polynomial size (w1, gamma2 = (q-1)/88, 6 bits)
    pub const POLY_W1_PACKED_BYTES: usize = 192;
}

/// ML-DSA-65 parameters (NIST Level 3)
#[cfg(feature = "ml-dsa-65")]
pub mod ml_dsa_65 {
    pub use super::common::*;

    /// Number of rows in matrix A
    pub const K: usize = 6;
    /// Number of columns in matrix A
    pub const L: usize = 5;
    /// Secret coefficient bound
    pub const ETA: usize = 4;
    /// Number of +/-1 coefficients in the challenge
    pub const TAU: usize = 49;
    /// Rejection bound offset (TAU * ETA)
    pub const BETA: i32 = 196;
    /// Masking range for y
    pub const GAMMA1: i32 = 1 << 19;
    /// Low-order rounding range
    pub const GAMMA2: i32 = (Q_VAL - 1) / 32; // 261888
    /// Maximum number of hint ones
    pub const OMEGA: usize = 55;

    /// Commitment hash size (lambda/4 where lambda = 192)
    pub const C_TILDE_BYTES: usize = 48;

    /// Public key size in bytes
    pub const PK_BYTES: usize = 1952;
    /// Secret key size in bytes
    pub const SK_BYTES: usize = 4032;
    /// Signature size in bytes
    pub const SIG_BYTES: usize = 3309;

    /// Encoded polynomial size (t1, 10 bits)
    pub const POLY_T1_PACKED_BYTES: usize = 320;
    /// Encoded polynomial size (t0, 13 bits)
    pub const POLY_T0_PACKED_BYTES: usize = 416;
    /// Encoded polynomial size (eta = 4, 4 bits)
    pub const POLY_ETA_PACKED_BYTES: usize = 128;
    /// Encoded polynomial size (z, gamma1 = 2^19, 20 bits)
    pub const POLY_Z_PACKED_BYTES: usize = 640;
    /// Encoded polynomial size (w1, gamma2 = (q-1)/32, 4 bits)
    pub const POLY_W1_PACKED_BYTES: usize = 128;
}

/// ML-DSA-87 parameters (NIST Level 5)
#[cfg(feature = "ml-dsa-87")]
pub mod ml_dsa_87 {
    pub use super::common::*;

    /// Number of rows in matrix A
    pub const K: usize = 8;
    /// Number of columns in matrix A
    pub const L: usize = 7;
    /// Secret coefficient bound
    pub const ETA: usize = 2;
    /// Number of +/-1 coefficients in the challenge
    pub const TAU: usize = 60;
    /// Rejection bound offset (TAU * ETA)
    pub const BETA: i32 = 120;
    /// Masking range for y
    pub const GAMMA1: i32 = 1 << 19;
    /// Low-order rounding range
    pub const GAMMA2: i32 = (Q_VAL - 1) / 32; // 261888
    /// Maximum number of hint ones
    pub const OMEGA: usize = 75;

    /// Commitment hash size (lambda/4 where lambda = 256)
    pub const C_TILDE_BYTES: usize = 64;

    /// Public key size in bytes
    pub const PK_BYTES: usize = 2592;
    /// Secret key size in bytes
    pub const SK_BYTES: usize = 4896;
    /// Signature size in bytes
    pub const SIG_BYTES: usize = 4627;

    /// Encoded polynomial size (t1, 10 bits)
    pub const POLY_T1_PACKED_BYTES: usize = 320;
    /// Encoded polynomial size (t0, 13 bits)
    pub const POLY_T0_PACKED_BYTES: usize = 416;
    /// Encoded polynomial size (eta = 2, 3 bits)
    pub const POLY_ETA_PACKED_BYTES: usize = 96;
    /// Encoded polynomial size (z, gamma1 = 2^19, 20 bits)
    pub const POLY_Z_PACKED_BYTES: usize = 640;
    /// Encoded polynomial size (w1, gamma2 = (q-1)/32, 4 bits)
    pub const POLY_W1_PACKED_BYTES: usize = 128;
}

#[cfg(test)]
mod tests {
    #[cfg(feature = "ml-dsa-44")]
    #[test]
    fn sizes_44_consistent() {
        use super::ml_dsa_44::*;
        assert_eq!(PK_BYTES, SEED_BYTES + K * POLY_T1_PACKED_BYTES);
        assert_eq!(
            SK_BYTES,
            2 * SEED_BYTES
                + CRH_BYTES
                + (K + L) * POLY_ETA_PACKED_BYTES
                + K * POLY_T0_PACKED_BYTES
        );
        assert_eq!(SIG_BYTES, C_TILDE_BYTES + L * POLY_Z_PACKED_BYTES + OMEGA + K);
    }

    #[cfg(feature = "ml-dsa-65")]
    #[test]
    fn sizes_65_consistent() {
        use super::ml_dsa_65::*;
        assert_eq!(PK_BYTES, SEED_BYTES + K * POLY_T1_PACKED_BYTES);
        assert_eq!(
            SK_BYTES,
            2 * SEED_BYTES
                + CRH_BYTES
                + (K + L) * POLY_ETA_PACKED_BYTES
                + K * POLY_T0_PACKED_BYTES
        );
        assert_eq!(SIG_BYTES, C_TILDE_BYTES + L * POLY_Z_PACKED_BYTES + OMEGA + K);
    }

    #[cfg(feature = "ml-dsa-87")]
    #[test]
    fn sizes_87_consistent() {
        use super::ml_dsa_87::*;
        assert_eq!(PK_BYTES, SEED_BYTES + K * POLY_T1_PACKED_BYTES);
        assert_eq!(
            SK_BYTES,
            2 * SEED_BYTES
                + CRH_BYTES
                + (K + L) * POLY_ETA_PACKED_BYTES
                + K * POLY_T0_PACKED_BYTES
        );
        assert_eq!(SIG_BYTES, C_TILDE_BYTES + L * POLY_Z_PACKED_BYTES + OMEGA + K);
    }
}
