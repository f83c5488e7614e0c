//! Core ML-DSA algorithms: key generation, signing, verification.
//!
//! The functions here are generic over the parameter-set constants and
//! operate on encoded byte strings; the per-set modules wrap them in
//! fixed-size key types. Signing input is trusted (errors propagate),
//! verification input is not (every malformed input folds to `false`).

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use prism_core::{Error, Result};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::hash::{
    derive_rho_second, hash_pk, message_representative, shake256_into, Shake128Xof,
};
use crate::packing::{
    check_hint_encoding, eta_in_range, pack_eta2, pack_eta4, pack_t0, pack_t1, pack_w1,
    pack_z_17, pack_z_19, unpack_eta2, unpack_eta4, unpack_t0, unpack_t1, unpack_z_17,
    unpack_z_19,
};
use crate::poly::{Poly, N};
use crate::polyvec::{Matrix, PolyVecK, PolyVecL};
use crate::reduce::{freeze, Q};
use crate::rounding::{highbits, lowbits, make_hint, power2round, use_hint, D};
use crate::sample::{sample_eta, sample_in_ball, sample_mask, sample_ntt};

/// Attempt bound for the rejection loop. Each attempt advances kappa by L;
/// reaching the bound with no accepted signature indicates a corrupted key
/// or an implementation fault, not bad luck.
const MAX_SIGN_ATTEMPTS: u16 = 1000;

// ---------------------------------------------------------------------------
// Small helpers
// ---------------------------------------------------------------------------

#[inline]
fn eta_packed_bytes(eta: usize) -> usize {
    if eta == 2 {
        96
    } else {
        128
    }
}

#[inline]
fn gamma1_bits(gamma1: i32) -> u32 {
    if gamma1 == (1 << 17) {
        17
    } else {
        19
    }
}

#[inline]
fn z_packed_bytes(gamma1: i32) -> usize {
    if gamma1 == (1 << 17) {
        576
    } else {
        640
    }
}

#[inline]
fn w1_packed_bytes(gamma2: i32) -> usize {
    if gamma2 == 261_888 {
        128
    } else {
        192
    }
}

/// Apply a validated hint encoding to w', recovering w1' = UseHint(h, w').
///
/// `h` must already have passed [`check_hint_encoding`]; positions are
/// strictly increasing within each row, so each column index matches at
/// most once.
fn apply_hints<const K: usize, const OMEGA: usize>(
    w_prime: &PolyVecK<K>,
    h: &[u8],
    gamma2: i32,
) -> PolyVecK<K> {
    let mut w1_prime = PolyVecK::<K>::zero();
    let mut hint_idx = 0;
    for i in 0..K {
        let end = h[OMEGA + i] as usize;
        for j in 0..N {
            let hint_val = if hint_idx < end && h[hint_idx] as usize == j {
                hint_idx += 1;
                1
            } else {
                0
            };
            w1_prime.polys[i].coeffs[j] =
                use_hint(hint_val, freeze(w_prime.polys[i].coeffs[j]), gamma2);
        }
        debug_assert_eq!(hint_idx, end, "hint index drift at row {i}");
    }
    w1_prime
}

/// Encode the w1 vector for the commitment hash (4 or 6 bits per
/// coefficient depending on gamma2).
fn encode_w1<const K: usize>(w1: &PolyVecK<K>, gamma2: i32) -> Vec<u8> {
    let w1_bytes = w1_packed_bytes(gamma2);
    let mut out = vec![0u8; K * w1_bytes];
    for i in 0..K {
        pack_w1(&w1.polys[i], gamma2, &mut out[i * w1_bytes..(i + 1) * w1_bytes]);
    }
    out
}

/// Parse the z vector out of a length-checked signature.
fn parse_z<const L: usize>(sig: &[u8], c_tilde_bytes: usize, gamma1: i32) -> PolyVecL<L> {
    let z_bytes = z_packed_bytes(gamma1);
    debug_assert!(sig.len() >= c_tilde_bytes + L * z_bytes);

    let mut z = PolyVecL::<L>::zero();
    for i in 0..L {
        let chunk = &sig[c_tilde_bytes + i * z_bytes..c_tilde_bytes + (i + 1) * z_bytes];
        match gamma1_bits(gamma1) {
            17 => unpack_z_17(chunk, &mut z.polys[i]),
            _ => unpack_z_19(chunk, &mut z.polys[i]),
        }
    }
    z
}

/// Compute the hint vector for a signature attempt.
///
/// The hint marks coefficients where adding c*t0 to w - c*s2 moves the
/// high bits, which is exactly the perturbation the verifier will see.
/// Writes the canonical encoding into `h` (length OMEGA + K); returns
/// `None` when more than OMEGA hints are needed and the attempt must be
/// rejected.
fn compute_hints<const K: usize, const OMEGA: usize>(
    w: &PolyVecK<K>,
    cs2: &PolyVecK<K>,
    ct0: &PolyVecK<K>,
    gamma2: i32,
    h: &mut [u8],
) -> Option<()> {
    debug_assert_eq!(h.len(), OMEGA + K);
    h.fill(0);
    let mut hint_count = 0;

    for i in 0..K {
        for j in 0..N {
            // what the verifier can compute directly: w - c*s2
            let wm = freeze(w.polys[i].coeffs[j] - cs2.polys[i].coeffs[j]);
            let ct0_j = freeze(ct0.polys[i].coeffs[j]);

            let hint = make_hint(ct0_j, wm, gamma2);
            if hint != 0 {
                if hint_count >= OMEGA {
                    return None;
                }
                h[hint_count] = j as u8;
                hint_count += 1;
            }
        }
        h[OMEGA + i] = hint_count as u8;
    }

    Some(())
}

/// Assemble the signature: c_tilde || packed z || hint encoding.
///
/// z is centered one polynomial at a time so only a single 1 KB scratch
/// polynomial ever holds secret-derived data, then wiped.
fn encode_signature<const K: usize, const L: usize, const OMEGA: usize>(
    c_tilde: &[u8],
    z: &PolyVecL<L>,
    h: &[u8],
    gamma1: i32,
) -> Vec<u8> {
    let z_bytes = z_packed_bytes(gamma1);
    debug_assert_eq!(h.len(), OMEGA + K);

    let mut sig = Vec::with_capacity(c_tilde.len() + L * z_bytes + OMEGA + K);
    sig.extend_from_slice(c_tilde);

    let mut z_buf = [0u8; 640];
    let mut centered = Poly::zero();
    for i in 0..L {
        for j in 0..N {
            let mut c = z.polys[i].coeffs[j];
            if c > (Q - 1) / 2 {
                c -= Q;
            }
            centered.coeffs[j] = c;
        }
        match gamma1_bits(gamma1) {
            17 => pack_z_17(&centered, &mut z_buf[..z_bytes]),
            _ => pack_z_19(&centered, &mut z_buf[..z_bytes]),
        }
        sig.extend_from_slice(&z_buf[..z_bytes]);
    }

    centered.zeroize();
    z_buf.zeroize();

    sig.extend_from_slice(h);
    sig
}

// ---------------------------------------------------------------------------
// Seed expansion
// ---------------------------------------------------------------------------

/// Expand matrix A from rho, directly in the NTT domain.
///
/// Entry (i, j) comes from its own SHAKE128 stream over rho and the two
/// index bytes, so the matrix is reproducible bit-exact from rho alone.
pub fn expand_a<const K: usize, const L: usize>(rho: &[u8; 32]) -> Matrix<K, L> {
    let mut a = Matrix::<K, L>::zero();

    for i in 0..K {
        for j in 0..L {
            let mut xof = Shake128Xof::for_matrix_entry(rho, i as u8, j as u8);
            a.rows[i].polys[j] = sample_ntt(&mut xof);
        }
    }

    a
}

/// Expand the secret vectors s1 (length L) and s2 (length K) from rho',
/// with a running 16-bit nonce: s1 uses 0..L, s2 continues at L.
pub fn expand_s<const K: usize, const L: usize, const ETA: usize>(
    rho_prime: &[u8],
) -> (PolyVecL<L>, PolyVecK<K>) {
    let mut s1 = PolyVecL::<L>::zero();
    let mut s2 = PolyVecK::<K>::zero();

    for i in 0..L {
        s1.polys[i] = sample_eta::<ETA>(rho_prime, i as u16);
    }
    for i in 0..K {
        s2.polys[i] = sample_eta::<ETA>(rho_prime, (L + i) as u16);
    }

    (s1, s2)
}

// ---------------------------------------------------------------------------
// Key generation
// ---------------------------------------------------------------------------

/// ML-DSA key generation from a 32-byte seed.
///
/// Returns `(sk, pk)` with
/// sk = rho || K || tr || s1 || s2 || t0 and pk = rho || t1.
/// Deterministic: identical seeds give byte-identical keys.
pub fn ml_dsa_keygen<const K: usize, const L: usize, const ETA: usize>(
    xi: &[u8; 32],
) -> (Vec<u8>, Vec<u8>) {
    // (rho, rho', K) = SHAKE256(xi || k || l, 128); the dimension bytes
    // separate the three parameter sets at the root of the derivation
    let mut seed_input = [0u8; 34];
    seed_input[..32].copy_from_slice(xi);
    seed_input[32] = K as u8;
    seed_input[33] = L as u8;

    let mut expanded = [0u8; 128];
    shake256_into(&[&seed_input], &mut expanded);

    let mut rho = [0u8; 32];
    let mut rho_prime = [0u8; 64];
    let mut key_k = [0u8; 32];
    rho.copy_from_slice(&expanded[0..32]);
    rho_prime.copy_from_slice(&expanded[32..96]);
    key_k.copy_from_slice(&expanded[96..128]);

    let a = expand_a::<K, L>(&rho);
    let (mut s1, mut s2) = expand_s::<K, L, ETA>(&rho_prime);

    // t = A * NTT(s1) + s2, back in coefficient form and normalized
    let mut s1_hat = s1.clone();
    s1_hat.ntt();

    let mut t = a.mul_vec(&s1_hat);
    t.reduce();
    t.inv_ntt();
    t.caddq();
    t.add_assign(&s2);
    t.caddq();

    // (t1, t0) = Power2Round(t)
    let mut t1 = PolyVecK::<K>::zero();
    let mut t0 = PolyVecK::<K>::zero();
    for i in 0..K {
        for j in 0..N {
            let (hi, lo) = power2round(t.polys[i].coeffs[j]);
            t1.polys[i].coeffs[j] = hi;
            t0.polys[i].coeffs[j] = lo;
        }
    }

    // pk = rho || t1
    let mut pk = Vec::with_capacity(32 + K * 320);
    pk.extend_from_slice(&rho);
    for i in 0..K {
        let mut buf = [0u8; 320];
        pack_t1(&t1.polys[i], &mut buf);
        pk.extend_from_slice(&buf);
    }

    let tr = hash_pk(&pk);

    // sk = rho || K || tr || s1 || s2 || t0
    let eta_bytes = eta_packed_bytes(ETA);
    let mut sk = Vec::with_capacity(128 + (K + L) * eta_bytes + K * 416);
    sk.extend_from_slice(&rho);
    sk.extend_from_slice(&key_k);
    sk.extend_from_slice(&tr);

    let mut eta_buf = [0u8; 128];
    for i in 0..L {
        if ETA == 2 {
            pack_eta2(&s1.polys[i], &mut eta_buf[..eta_bytes]);
        } else {
            pack_eta4(&s1.polys[i], &mut eta_buf[..eta_bytes]);
        }
        sk.extend_from_slice(&eta_buf[..eta_bytes]);
    }
    for i in 0..K {
        if ETA == 2 {
            pack_eta2(&s2.polys[i], &mut eta_buf[..eta_bytes]);
        } else {
            pack_eta4(&s2.polys[i], &mut eta_buf[..eta_bytes]);
        }
        sk.extend_from_slice(&eta_buf[..eta_bytes]);
    }
    eta_buf.zeroize();

    for i in 0..K {
        let mut buf = [0u8; 416];
        pack_t0(&t0.polys[i], &mut buf);
        sk.extend_from_slice(&buf);
        buf.zeroize();
    }

    seed_input.zeroize();
    expanded.zeroize();
    rho_prime.zeroize();
    key_k.zeroize();
    s1.zeroize();
    s2.zeroize();
    s1_hat.zeroize();
    t0.zeroize();

    (sk, pk)
}

// ---------------------------------------------------------------------------
// Secret key parsing
// ---------------------------------------------------------------------------

struct ExpandedSecretKey<const K: usize, const L: usize> {
    rho: [u8; 32],
    key_k: [u8; 32],
    tr: [u8; 64],
    s1: PolyVecL<L>,
    s2: PolyVecK<K>,
    t0: PolyVecK<K>,
}

impl<const K: usize, const L: usize> Zeroize for ExpandedSecretKey<K, L> {
    fn zeroize(&mut self) {
        self.key_k.zeroize();
        self.s1.zeroize();
        self.s2.zeroize();
        self.t0.zeroize();
    }
}

/// Decode an encoded secret key, rejecting wrong lengths and
/// out-of-range s1/s2 coefficients.
fn parse_sk<const K: usize, const L: usize, const ETA: usize>(
    sk: &[u8],
) -> Result<ExpandedSecretKey<K, L>> {
    let eta_bytes = eta_packed_bytes(ETA);
    let expected = 128 + (K + L) * eta_bytes + K * 416;
    if sk.len() != expected {
        return Err(Error::InvalidKeyLength {
            expected,
            actual: sk.len(),
        });
    }

    let mut rho = [0u8; 32];
    let mut key_k = [0u8; 32];
    let mut tr = [0u8; 64];
    rho.copy_from_slice(&sk[0..32]);
    key_k.copy_from_slice(&sk[32..64]);
    tr.copy_from_slice(&sk[64..128]);

    let s1_start = 128;
    let s2_start = s1_start + L * eta_bytes;
    let t0_start = s2_start + K * eta_bytes;

    let mut s1 = PolyVecL::<L>::zero();
    for i in 0..L {
        let chunk = &sk[s1_start + i * eta_bytes..s1_start + (i + 1) * eta_bytes];
        if ETA == 2 {
            unpack_eta2(chunk, &mut s1.polys[i]);
        } else {
            unpack_eta4(chunk, &mut s1.polys[i]);
        }
        if !eta_in_range(&s1.polys[i], ETA as i32) {
            return Err(Error::MalformedKey);
        }
    }

    let mut s2 = PolyVecK::<K>::zero();
    for i in 0..K {
        let chunk = &sk[s2_start + i * eta_bytes..s2_start + (i + 1) * eta_bytes];
        if ETA == 2 {
            unpack_eta2(chunk, &mut s2.polys[i]);
        } else {
            unpack_eta4(chunk, &mut s2.polys[i]);
        }
        if !eta_in_range(&s2.polys[i], ETA as i32) {
            return Err(Error::MalformedKey);
        }
    }

    let mut t0 = PolyVecK::<K>::zero();
    for i in 0..K {
        unpack_t0(&sk[t0_start + i * 416..t0_start + (i + 1) * 416], &mut t0.polys[i]);
    }

    Ok(ExpandedSecretKey {
        rho,
        key_k,
        tr,
        s1,
        s2,
        t0,
    })
}

// ---------------------------------------------------------------------------
// Signing
// ---------------------------------------------------------------------------

/// ML-DSA signing.
///
/// `ctx: Some(c)` signs in pure mode with the context bound into the
/// message representative; `ctx: None` treats `message` as an already
/// domain-separated M' (the internal interface used by test vectors).
/// `rnd` is the 32-byte hedging input; all-zero gives the deterministic
/// variant. Identical inputs produce byte-identical signatures.
///
/// # Errors
///
/// [`Error::ContextTooLong`] when `ctx` exceeds 255 bytes,
/// [`Error::InvalidKeyLength`] / [`Error::MalformedKey`] on an
/// undecodable secret key, [`Error::RejectionExhausted`] if no attempt
/// within the safety bound passes the norm gates.
#[allow(clippy::too_many_lines)]
pub fn ml_dsa_sign<
    const K: usize,
    const L: usize,
    const ETA: usize,
    const BETA: i32,
    const GAMMA1: i32,
    const GAMMA2: i32,
    const TAU: usize,
    const OMEGA: usize,
    const C_TILDE_BYTES: usize,
>(
    sk: &[u8],
    message: &[u8],
    ctx: Option<&[u8]>,
    rnd: &[u8; 32],
) -> Result<Vec<u8>> {
    if let Some(c) = ctx {
        if c.len() > 255 {
            return Err(Error::ContextTooLong { actual: c.len() });
        }
    }

    let mut esk = parse_sk::<K, L, ETA>(sk)?;

    let a = expand_a::<K, L>(&esk.rho);

    let mu = message_representative(&esk.tr, ctx, message);
    let mut rho_second = derive_rho_second(&esk.key_k, rnd, &mu);

    // transform the secrets once; every attempt reuses them
    let mut s1_hat = esk.s1.clone();
    s1_hat.ntt();
    let mut s2_hat = esk.s2.clone();
    s2_hat.ntt();
    let mut t0_hat = esk.t0.clone();
    t0_hat.ntt();

    let mut h = vec![0u8; OMEGA + K];
    let mut kappa: u16 = 0;

    for _attempt in 0..MAX_SIGN_ATTEMPTS {
        // y with fresh nonces; kappa advances by L whether or not the
        // attempt survives
        let mut y = PolyVecL::<L>::zero();
        for i in 0..L {
            y.polys[i] = sample_mask(&rho_second, kappa + i as u16, gamma1_bits(GAMMA1));
        }
        kappa += L as u16;

        // w = InvNTT(A * NTT(y)), normalized to [0, q)
        let mut y_hat = y.clone();
        y_hat.ntt();
        let mut w = a.mul_vec(&y_hat);
        w.reduce();
        w.inv_ntt();
        w.caddq();

        let mut w1 = PolyVecK::<K>::zero();
        for i in 0..K {
            for j in 0..N {
                w1.polys[i].coeffs[j] = highbits(w.polys[i].coeffs[j], GAMMA2);
            }
        }

        // c_tilde = H(mu || w1Encode(w1), lambda/4)
        let w1_encoded = encode_w1::<K>(&w1, GAMMA2);
        let mut c_tilde = [0u8; 64];
        shake256_into(&[&mu, &w1_encoded], &mut c_tilde[..C_TILDE_BYTES]);
        let c_tilde = &c_tilde[..C_TILDE_BYTES];

        let c = sample_in_ball(c_tilde, TAU);
        let mut c_hat = c.clone();
        c_hat.ntt();

        // z = y + InvNTT(c_hat ∘ s1_hat)
        let mut z = PolyVecL::<L>::zero();
        for i in 0..L {
            let mut cs1 = c_hat.pointwise_mul(&s1_hat.polys[i]);
            cs1.reduce();
            cs1.inv_ntt();
            cs1.caddq();
            z.polys[i] = y.polys[i].add(&cs1);
            cs1.zeroize();
        }
        z.reduce();

        if !z.check_norm(GAMMA1 - BETA) {
            y.zeroize();
            y_hat.zeroize();
            w.zeroize();
            z.zeroize();
            continue;
        }

        // r0 = LowBits(w - InvNTT(c_hat ∘ s2_hat))
        let mut cs2 = PolyVecK::<K>::zero();
        for i in 0..K {
            cs2.polys[i] = c_hat.pointwise_mul(&s2_hat.polys[i]);
        }
        cs2.reduce();
        cs2.inv_ntt();
        cs2.caddq();

        let mut r0 = PolyVecK::<K>::zero();
        for i in 0..K {
            for j in 0..N {
                let wmcs2 = w.polys[i].coeffs[j] - cs2.polys[i].coeffs[j];
                r0.polys[i].coeffs[j] = lowbits(freeze(wmcs2), GAMMA2);
            }
        }

        if !r0.check_norm(GAMMA2 - BETA) {
            y.zeroize();
            y_hat.zeroize();
            w.zeroize();
            z.zeroize();
            cs2.zeroize();
            r0.zeroize();
            continue;
        }

        // ct0 = InvNTT(c_hat ∘ t0_hat)
        let mut ct0 = PolyVecK::<K>::zero();
        for i in 0..K {
            ct0.polys[i] = c_hat.pointwise_mul(&t0_hat.polys[i]);
        }
        ct0.reduce();
        ct0.inv_ntt();
        ct0.caddq();

        let hints_ok = ct0.check_norm(GAMMA2)
            && compute_hints::<K, OMEGA>(&w, &cs2, &ct0, GAMMA2, &mut h).is_some();
        if !hints_ok {
            y.zeroize();
            y_hat.zeroize();
            w.zeroize();
            z.zeroize();
            cs2.zeroize();
            r0.zeroize();
            ct0.zeroize();
            continue;
        }

        let sig = encode_signature::<K, L, OMEGA>(c_tilde, &z, &h, GAMMA1);

        // y must not outlive the attempt: together with (c, z) it reveals s1
        y.zeroize();
        y_hat.zeroize();
        w.zeroize();
        z.zeroize();
        cs2.zeroize();
        r0.zeroize();
        ct0.zeroize();

        rho_second.zeroize();
        s1_hat.zeroize();
        s2_hat.zeroize();
        t0_hat.zeroize();
        esk.zeroize();

        return Ok(sig);
    }

    rho_second.zeroize();
    s1_hat.zeroize();
    s2_hat.zeroize();
    t0_hat.zeroize();
    esk.zeroize();

    Err(Error::RejectionExhausted)
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// ML-DSA verification.
///
/// Total over untrusted input: wrong lengths, out-of-range values,
/// non-canonical hint encodings, and hash mismatches all return `false`;
/// no input can cause a panic. The final commitment-hash comparison is
/// constant time.
pub fn ml_dsa_verify<
    const K: usize,
    const L: usize,
    const BETA: i32,
    const GAMMA1: i32,
    const GAMMA2: i32,
    const TAU: usize,
    const OMEGA: usize,
    const C_TILDE_BYTES: usize,
>(
    pk: &[u8],
    message: &[u8],
    ctx: Option<&[u8]>,
    sig: &[u8],
) -> bool {
    let z_bytes = z_packed_bytes(GAMMA1);
    if sig.len() != C_TILDE_BYTES + L * z_bytes + OMEGA + K {
        return false;
    }
    if pk.len() != 32 + K * 320 {
        return false;
    }
    if let Some(c) = ctx {
        if c.len() > 255 {
            return false;
        }
    }

    let rho: [u8; 32] = match pk[0..32].try_into() {
        Ok(r) => r,
        Err(_) => return false,
    };
    let mut t1 = PolyVecK::<K>::zero();
    for i in 0..K {
        unpack_t1(&pk[32 + i * 320..32 + (i + 1) * 320], &mut t1.polys[i]);
    }

    let c_tilde = &sig[0..C_TILDE_BYTES];
    let z = parse_z::<L>(sig, C_TILDE_BYTES, GAMMA1);
    let h = &sig[C_TILDE_BYTES + L * z_bytes..];

    if !z.check_norm(GAMMA1 - BETA) {
        return false;
    }
    if check_hint_encoding::<K, OMEGA>(h).is_none() {
        return false;
    }

    let tr = hash_pk(pk);
    let mu = message_representative(&tr, ctx, message);

    let a = expand_a::<K, L>(&rho);
    let c = sample_in_ball(c_tilde, TAU);
    let mut c_hat = c.clone();
    c_hat.ntt();

    let mut z_hat = z.clone();
    z_hat.ntt();

    // w' = InvNTT(A * NTT(z) - c_hat ∘ NTT(t1 * 2^d))
    let mut t1_scaled = t1;
    for p in &mut t1_scaled.polys {
        p.shift_left(D);
    }
    t1_scaled.ntt();

    let mut az = a.mul_vec(&z_hat);
    az.reduce();

    let mut ct1 = PolyVecK::<K>::zero();
    for i in 0..K {
        ct1.polys[i] = c_hat.pointwise_mul(&t1_scaled.polys[i]);
    }
    ct1.reduce();

    let mut w_prime = az.sub(&ct1);
    w_prime.reduce();
    w_prime.inv_ntt();
    w_prime.caddq();

    let w1_prime = apply_hints::<K, OMEGA>(&w_prime, h, GAMMA2);
    let w1_encoded = encode_w1::<K>(&w1_prime, GAMMA2);

    let mut c_tilde_prime = [0u8; 64];
    shake256_into(&[&mu, &w1_encoded], &mut c_tilde_prime[..C_TILDE_BYTES]);

    c_tilde.ct_eq(&c_tilde_prime[..C_TILDE_BYTES]).into()
}
