//! High/low-bits decomposition for ML-DSA.
//!
//! Power2Round splits against 2^13; Decompose splits against
//! alpha = 2 * gamma2 with the wrap-to-zero corner case on the high part.
//! MakeHint/UseHint carry one bit per coefficient that lets the verifier
//! recover high bits from its perturbed recomputation.

use crate::reduce::{Q, Q_HALF};
use subtle::{ConditionallySelectable, ConstantTimeEq};

/// D parameter for Power2Round (always 13 in ML-DSA)
pub const D: u32 = 13;

/// Power2Round: split r = r1 * 2^d + r0 with r0 in (-2^(d-1), 2^(d-1)].
///
/// Input must be canonical [0, q).
#[inline]
pub fn power2round(r: i32) -> (i32, i32) {
    debug_assert!((0..Q).contains(&r));
    let r1 = (r + (1 << (D - 1)) - 1) >> D;
    let r0 = r - (r1 << D);
    (r1, r0)
}

/// Decompose: split r = r1 * alpha + r0 with r0 in (-alpha/2, alpha/2]
/// and alpha = 2 * gamma2, wrapping r1 to 0 at the top of the range.
///
/// Input must be canonical [0, q). Branchless; the multiply-shift
/// constants approximate division by alpha / 128:
/// - gamma2 = (q-1)/32 (m = 16 buckets): x/4096 ≈ (x * 1025) >> 22
/// - gamma2 = (q-1)/88 (m = 44 buckets): x/1488 ≈ (x * 11275) >> 24,
///   with the r1 = 44 boundary folded to 0 by the sign-mask XOR
#[inline]
pub fn decompose(r: i32, gamma2: i32) -> (i32, i32) {
    debug_assert!((0..Q).contains(&r));
    debug_assert!(gamma2 == 95_232 || gamma2 == 261_888);
    let alpha = 2 * gamma2;

    let mut r1 = (r + 127) >> 7;
    if gamma2 == 261_888 {
        r1 = (r1 * 1025 + (1 << 21)) >> 22;
        r1 &= 15;
    } else {
        r1 = (r1 * 11_275 + (1 << 23)) >> 24;
        r1 ^= ((43 - r1) >> 31) & r1;
    }

    let mut r0 = r - r1 * alpha;
    // center r0: values above (q-1)/2 represent negatives
    r0 -= ((Q_HALF - r0) >> 31) & Q;

    (r1, r0)
}

/// High part of [`decompose`].
#[inline]
pub fn highbits(r: i32, gamma2: i32) -> i32 {
    decompose(r, gamma2).0
}

/// Low part of [`decompose`].
#[inline]
pub fn lowbits(r: i32, gamma2: i32) -> i32 {
    decompose(r, gamma2).1
}

/// MakeHint: 1 if HighBits(r) != HighBits(r + z), else 0.
///
/// Both arguments must be canonical [0, q). Constant time: the comparison
/// goes through `subtle` rather than a data-dependent branch.
#[inline]
pub fn make_hint(z: i32, r: i32, gamma2: i32) -> i32 {
    use crate::reduce::freeze;

    let h0 = highbits(r, gamma2);
    let h1 = highbits(freeze(r + z), gamma2);

    let equal = (h0 as u32).ct_eq(&(h1 as u32));
    i32::conditional_select(&1, &0, equal)
}

/// UseHint: recover the high part of r + z from r and the hint bit.
///
/// hint = 0 returns HighBits(r); hint = 1 steps the high part up or down
/// by one bucket (mod m) according to the sign of the low part.
#[inline]
pub fn use_hint(hint: i32, r: i32, gamma2: i32) -> i32 {
    let (r1, r0) = decompose(r, gamma2);

    if hint == 0 {
        return r1;
    }

    // m = (q-1) / (2 * gamma2) buckets of high-bits values
    let m = if gamma2 == 261_888 { 16 } else { 44 };

    if r0 > 0 {
        if r1 == m - 1 {
            0
        } else {
            r1 + 1
        }
    } else if r1 == 0 {
        m - 1
    } else {
        r1 - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_POINTS: [i32; 12] = [
        0,
        1,
        100,
        1000,
        4096,
        4097,
        8191,
        8192,
        Q / 2,
        Q - 2,
        Q - 1,
        190_463,
    ];

    #[test]
    fn test_power2round_identity() {
        for r in SAMPLE_POINTS {
            let (r1, r0) = power2round(r);
            assert_eq!(r1 * (1 << D) + r0, r, "identity failed for r={r}");
        }
    }

    #[test]
    fn test_power2round_r0_range() {
        let bound = 1 << (D - 1);
        for r in SAMPLE_POINTS {
            let (_, r0) = power2round(r);
            assert!(r0 > -bound && r0 <= bound, "r0={r0} out of range for r={r}");
        }
    }

    #[test]
    fn test_decompose_identity_both_gammas() {
        for gamma2 in [95_232, 261_888] {
            let alpha = 2 * gamma2;
            let m = (Q - 1) / alpha;
            for r in SAMPLE_POINTS {
                let (r1, r0) = decompose(r, gamma2);
                assert!((0..m).contains(&r1), "r1={r1} out of range (gamma2={gamma2})");
                assert!(
                    r0 > -gamma2 && r0 <= gamma2,
                    "r0={r0} out of range for r={r} (gamma2={gamma2})"
                );
                // r1*alpha + r0 ≡ r (mod q); equality may be off by q at the wrap
                let diff = i64::from(r) - (i64::from(r1) * i64::from(alpha) + i64::from(r0));
                assert_eq!(diff.rem_euclid(i64::from(Q)), 0, "decompose({r}) broken");
            }
        }
    }

    /// The top of the range wraps: r1 must come back to 0, compensated in r0.
    #[test]
    fn test_decompose_wrap_corner() {
        for gamma2 in [95_232, 261_888] {
            let (r1, r0) = decompose(Q - 1, gamma2);
            assert_eq!(r1, 0, "high part must wrap to 0 at q-1 (gamma2={gamma2})");
            assert!(r0 <= 0, "wrapped low part should be non-positive, got {r0}");
        }
    }

    #[test]
    fn test_highbits_lowbits_project_decompose() {
        let gamma2 = 261_888;
        for r in SAMPLE_POINTS {
            let (r1, r0) = decompose(r, gamma2);
            assert_eq!(highbits(r, gamma2), r1);
            assert_eq!(lowbits(r, gamma2), r0);
        }
    }

    #[test]
    fn test_make_hint_zero_when_unchanged() {
        let gamma2 = 261_888;
        for r in SAMPLE_POINTS {
            assert_eq!(make_hint(0, r, gamma2), 0);
        }
    }

    /// UseHint(MakeHint(z, r), r) = HighBits(r + z) for small z.
    #[test]
    fn test_hint_roundtrip() {
        use crate::reduce::freeze;
        for gamma2 in [95_232, 261_888] {
            for r in SAMPLE_POINTS {
                for z in [-300, -1, 0, 1, 300, gamma2 - 1] {
                    let z_canon = freeze(z);
                    let h = make_hint(z_canon, r, gamma2);
                    let recovered = use_hint(h, r, gamma2);
                    let expected = highbits(freeze(r + z), gamma2);
                    assert_eq!(
                        recovered, expected,
                        "hint roundtrip failed: r={r} z={z} gamma2={gamma2}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_use_hint_without_hint_is_highbits() {
        let gamma2 = 95_232;
        for r in SAMPLE_POINTS {
            assert_eq!(use_hint(0, r, gamma2), highbits(r, gamma2));
        }
    }
}
