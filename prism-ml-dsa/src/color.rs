//! Color-pixel view of polynomial data.
//!
//! A bijective relabeling of coefficients as 4-channel RGBA pixels: each
//! coefficient becomes one 4-byte big-endian word, (R, G, B, A) from most
//! to least significant byte. Decoding inverts the byte order and reduces
//! modulo the supplied modulus. No cryptographic property depends on this
//! view; it exists for visualization and storage framing, and its only
//! contract is the exact byte layout and strict length validation.
//!
//! Coefficients are frozen to [0, modulus) before encoding, so for inputs
//! already in range the round trip is coefficient-exact.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use prism_core::{Error, Result};

use crate::poly::{Poly, N};

/// Bytes per encoded coefficient (one RGBA pixel).
pub const PIXEL_BYTES: usize = 4;

/// Encode one polynomial as 256 RGBA pixels (1024 bytes).
///
/// Every coefficient is reduced into [0, modulus) first; with the ML-DSA
/// modulus the reduced value occupies 23 bits, so the R channel's top bit
/// is always clear.
pub fn encode_poly_colors(poly: &Poly, modulus: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(N * PIXEL_BYTES);
    encode_into(poly, modulus, &mut out);
    out
}

/// Decode 1024 bytes of RGBA pixels back into a polynomial.
///
/// # Errors
///
/// [`Error::InvalidColorBuffer`] unless the input is exactly
/// 256 * 4 bytes.
pub fn decode_poly_colors(bytes: &[u8], modulus: u32) -> Result<Poly> {
    if bytes.len() != N * PIXEL_BYTES {
        return Err(Error::InvalidColorBuffer {
            expected: N * PIXEL_BYTES,
            actual: bytes.len(),
        });
    }
    let mut poly = Poly::zero();
    decode_chunk(bytes, modulus, &mut poly);
    Ok(poly)
}

/// Encode a sequence of polynomials (for a key or signature vector,
/// the s1-then-s2 concatenation of k + l polynomials) as pixels.
pub fn encode_vec_colors(polys: &[Poly], modulus: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(polys.len() * N * PIXEL_BYTES);
    for poly in polys {
        encode_into(poly, modulus, &mut out);
    }
    out
}

/// Decode pixels into a vector of k + l polynomials.
///
/// # Errors
///
/// [`Error::InvalidColorBuffer`] unless the input is exactly
/// (k + l) * 256 * 4 bytes. A buffer that is not even a multiple of 4
/// fails the same way: the expected length never is one.
pub fn decode_vec_colors(bytes: &[u8], k: usize, l: usize, modulus: u32) -> Result<Vec<Poly>> {
    let expected = (k + l) * N * PIXEL_BYTES;
    if bytes.len() != expected {
        return Err(Error::InvalidColorBuffer {
            expected,
            actual: bytes.len(),
        });
    }

    let mut polys = Vec::with_capacity(k + l);
    for chunk in bytes.chunks_exact(N * PIXEL_BYTES) {
        let mut poly = Poly::zero();
        decode_chunk(chunk, modulus, &mut poly);
        polys.push(poly);
    }
    Ok(polys)
}

fn encode_into(poly: &Poly, modulus: u32, out: &mut Vec<u8>) {
    debug_assert!(modulus > 0);
    for &c in &poly.coeffs {
        let reduced = (crate::reduce::freeze(c) as u32) % modulus;
        debug_assert!(reduced < (1 << 23), "coefficient exceeds 23 bits");
        out.extend_from_slice(&reduced.to_be_bytes());
    }
}

fn decode_chunk(bytes: &[u8], modulus: u32, poly: &mut Poly) {
    debug_assert_eq!(bytes.len(), N * PIXEL_BYTES);
    debug_assert!(modulus > 0);
    for (i, px) in bytes.chunks_exact(PIXEL_BYTES).enumerate() {
        let word = u32::from_be_bytes([px[0], px[1], px[2], px[3]]);
        poly.coeffs[i] = (word % modulus) as i32;
    }
}
