//! Modular arithmetic for the ring Z_q with q = 8380417 = 2^23 - 2^13 + 1.
//!
//! Two representations are used and every crossing point is one of the
//! functions below:
//!
//! - **signed interior**: the NTT and the rejection loop work on `i32`
//!   representatives with |value| a small multiple of q; [`reduce32`]
//!   brings them back near the centered range between transform stages.
//! - **unsigned canonical** `[0, q)`: everything that leaves the engine
//!   (packing, decompose, the color codec) is first normalized with
//!   [`caddq`] or [`freeze`].
//!
//! Products go through Montgomery reduction with R = 2^32; the inverse NTT
//! folds the stray R^-1 factors back in (see `ntt.rs`), so inputs and
//! outputs of the transform pair stay in the standard domain.

/// The prime modulus q = 8380417
pub const Q: i32 = 8_380_417;

/// (q - 1) / 2, the upper end of the centered range
pub const Q_HALF: i32 = (Q - 1) / 2;

/// q^(-1) mod 2^32, used by Montgomery reduction
pub const QINV: i32 = 58_728_449;

/// 2^32 mod q (Montgomery R)
pub const MONT_R: i32 = 4_193_792;

/// (2^32)^2 mod q, used to enter the Montgomery domain
pub const MONT_R2: i64 = 2_365_951;

/// Montgomery reduction: compute a * R^(-1) mod q where R = 2^32.
///
/// Input: |a| < q * 2^31. Output: r ≡ a * R^(-1) (mod q) with |r| < q.
#[inline]
pub const fn montgomery_reduce(a: i64) -> i32 {
    // t = (a mod 2^32) * QINV mod 2^32, via wrapping i32 multiplication
    let t = (a as i32).wrapping_mul(QINV);
    // (a - t*q) is divisible by 2^32
    ((a - (t as i64) * (Q as i64)) >> 32) as i32
}

/// Montgomery multiplication: compute a * b * R^(-1) mod q.
#[inline]
pub const fn montgomery_mul(a: i32, b: i32) -> i32 {
    montgomery_reduce((a as i64) * (b as i64))
}

/// Convert to Montgomery form: a * R mod q.
#[inline]
pub const fn to_mont(a: i32) -> i32 {
    montgomery_reduce((a as i64) * MONT_R2)
}

/// Partial reduction to a centered representative.
///
/// Input: |a| <= 2^31 - 2^22. Output: r ≡ a (mod q) with
/// -6283009 < r <= 6283008.
#[inline]
pub const fn reduce32(a: i32) -> i32 {
    let t = (a + (1 << 22)) >> 23;
    a - t * Q
}

/// Conditionally add q: maps (-q, q) to [0, q) without a branch.
#[inline]
pub const fn caddq(a: i32) -> i32 {
    a + (Q & (a >> 31))
}

/// Full reduction to canonical [0, q-1].
///
/// Accepts any |a| <= 2^31 - 2^22.
#[inline]
pub const fn freeze(a: i32) -> i32 {
    caddq(reduce32(a))
}
