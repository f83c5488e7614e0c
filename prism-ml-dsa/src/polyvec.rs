//! Polynomial vector and matrix operations for ML-DSA
//!
//! Vectors come in two lengths: K (rows of A, the public-key side) and L
//! (columns of A, the masking side). They are distinct const parameters
//! everywhere.

use crate::ntt::pointwise_acc;
use crate::poly::Poly;
use subtle::Choice;
use zeroize::Zeroize;

/// Polynomial vector with K elements.
#[derive(Clone, Zeroize)]
pub struct PolyVecK<const K: usize> {
    /// The component polynomials.
    pub polys: [Poly; K],
}

impl<const K: usize> Default for PolyVecK<K> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const K: usize> PolyVecK<K> {
    /// Create a zero vector.
    pub fn zero() -> Self {
        Self {
            polys: core::array::from_fn(|_| Poly::zero()),
        }
    }

    /// Forward NTT on all polynomials.
    pub fn ntt(&mut self) {
        for p in &mut self.polys {
            p.ntt();
        }
    }

    /// Inverse NTT on all polynomials.
    pub fn inv_ntt(&mut self) {
        for p in &mut self.polys {
            p.inv_ntt();
        }
    }

    /// Add two vectors.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let mut r = Self::zero();
        for i in 0..K {
            r.polys[i] = self.polys[i].add(&other.polys[i]);
        }
        r
    }

    /// Add in place.
    pub fn add_assign(&mut self, other: &Self) {
        for i in 0..K {
            self.polys[i].add_assign(&other.polys[i]);
        }
    }

    /// Subtract two vectors.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        let mut r = Self::zero();
        for i in 0..K {
            r.polys[i] = self.polys[i].sub(&other.polys[i]);
        }
        r
    }

    /// Partially reduce all coefficients.
    pub fn reduce(&mut self) {
        for p in &mut self.polys {
            p.reduce();
        }
    }

    /// Fully reduce all coefficients to [0, q).
    pub fn freeze(&mut self) {
        for p in &mut self.polys {
            p.freeze();
        }
    }

    /// Conditionally add q to negative coefficients.
    pub fn caddq(&mut self) {
        for p in &mut self.polys {
            p.caddq();
        }
    }

    /// Constant-time infinity-norm check over the whole vector: no early
    /// return, one `Choice` accumulated across every coefficient.
    pub fn check_norm(&self, bound: i32) -> bool {
        let mut pass = Choice::from(1u8);
        for p in &self.polys {
            pass &= p.check_norm_ct(bound);
        }
        bool::from(pass)
    }
}

/// Polynomial vector with L elements.
#[derive(Clone, Zeroize)]
pub struct PolyVecL<const L: usize> {
    /// The component polynomials.
    pub polys: [Poly; L],
}

impl<const L: usize> Default for PolyVecL<L> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const L: usize> PolyVecL<L> {
    /// Create a zero vector.
    pub fn zero() -> Self {
        Self {
            polys: core::array::from_fn(|_| Poly::zero()),
        }
    }

    /// Forward NTT on all polynomials.
    pub fn ntt(&mut self) {
        for p in &mut self.polys {
            p.ntt();
        }
    }

    /// Inverse NTT on all polynomials.
    pub fn inv_ntt(&mut self) {
        for p in &mut self.polys {
            p.inv_ntt();
        }
    }

    /// Add two vectors.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let mut r = Self::zero();
        for i in 0..L {
            r.polys[i] = self.polys[i].add(&other.polys[i]);
        }
        r
    }

    /// Partially reduce all coefficients.
    pub fn reduce(&mut self) {
        for p in &mut self.polys {
            p.reduce();
        }
    }

    /// Fully reduce all coefficients to [0, q).
    pub fn freeze(&mut self) {
        for p in &mut self.polys {
            p.freeze();
        }
    }

    /// Conditionally add q to negative coefficients.
    pub fn caddq(&mut self) {
        for p in &mut self.polys {
            p.caddq();
        }
    }

    /// Constant-time infinity-norm check over the whole vector.
    pub fn check_norm(&self, bound: i32) -> bool {
        let mut pass = Choice::from(1u8);
        for p in &self.polys {
            pass &= p.check_norm_ct(bound);
        }
        bool::from(pass)
    }
}

/// Matrix A (K rows, L columns) in the NTT domain.
///
/// A is derived from rho per operation and never persisted.
pub struct Matrix<const K: usize, const L: usize> {
    /// Rows of the matrix, each an L-vector.
    pub rows: [PolyVecL<L>; K],
}

impl<const K: usize, const L: usize> Matrix<K, L> {
    /// Create a zero matrix.
    pub fn zero() -> Self {
        Self {
            rows: core::array::from_fn(|_| PolyVecL::zero()),
        }
    }

    /// Matrix-vector multiplication t = A * s in the NTT domain.
    ///
    /// Both A and s must be in NTT representation; t is returned in NTT
    /// representation with each coefficient an R^(-1)-scaled accumulation.
    pub fn mul_vec(&self, s: &PolyVecL<L>) -> PolyVecK<K> {
        let mut t = PolyVecK::zero();

        for i in 0..K {
            for j in 0..L {
                pointwise_acc(
                    &mut t.polys[i].coeffs,
                    &self.rows[i].polys[j].coeffs,
                    &s.polys[j].coeffs,
                );
            }
        }

        t
    }
}
