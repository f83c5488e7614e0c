//! XOF plumbing for ML-DSA.
//!
//! SHAKE128 drives matrix expansion, SHAKE256 everything else. The
//! wrappers expose absorb-then-squeeze streaming: once created, a reader
//! produces the same byte stream no matter how callers chunk their
//! requests, which the deterministic samplers rely on.

use sha3::{
    digest::{ExtendableOutput, Update, XofReader},
    Shake128, Shake256,
};

/// SHAKE256 XOF stream for sampling and hashing.
pub struct Shake256Xof {
    reader: sha3::Shake256Reader,
}

impl Shake256Xof {
    /// Absorb `data` and switch to squeezing.
    pub fn from_data(data: &[u8]) -> Self {
        let mut hasher = Shake256::default();
        hasher.update(data);
        Self {
            reader: hasher.finalize_xof(),
        }
    }

    /// Absorb several segments (equivalent to their concatenation) and
    /// switch to squeezing.
    pub fn from_parts(parts: &[&[u8]]) -> Self {
        let mut hasher = Shake256::default();
        for part in parts {
            hasher.update(part);
        }
        Self {
            reader: hasher.finalize_xof(),
        }
    }

    /// Squeeze the next `out.len()` bytes of the stream.
    pub fn squeeze(&mut self, out: &mut [u8]) {
        self.reader.read(out);
    }
}

/// SHAKE128 XOF stream for matrix expansion.
pub struct Shake128Xof {
    reader: sha3::Shake128Reader,
}

impl Shake128Xof {
    /// Absorb rho and the (row, col) domain bytes for entry A[row][col].
    /// The column byte is absorbed first.
    pub fn for_matrix_entry(rho: &[u8; 32], row: u8, col: u8) -> Self {
        let mut hasher = Shake128::default();
        hasher.update(rho);
        hasher.update(&[col, row]);
        Self {
            reader: hasher.finalize_xof(),
        }
    }

    /// Squeeze the next `out.len()` bytes of the stream.
    pub fn squeeze(&mut self, out: &mut [u8]) {
        self.reader.read(out);
    }
}

/// SHAKE256 over the concatenation of `parts`, filling `out`.
pub fn shake256_into(parts: &[&[u8]], out: &mut [u8]) {
    let mut hasher = Shake256::default();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize_xof().read(out);
}

/// tr = SHAKE256(pk, 64), the public-key binding hash stored in the
/// secret key.
pub fn hash_pk(pk: &[u8]) -> [u8; 64] {
    let mut tr = [0u8; 64];
    shake256_into(&[pk], &mut tr);
    tr
}

/// Message representative mu.
///
/// With `ctx: Some(c)` this is the pure-mode binding
/// mu = SHAKE256(tr || 0x00 || |c| || c || M, 64); the 0x00 domain byte
/// marks the un-prehashed variant and the length byte makes the context
/// prefix-free. `ctx: None` hashes the message bytes as given
/// (mu = SHAKE256(tr || M, 64)) for callers that supply an already
/// domain-separated M', such as the ACVP internal interface.
///
/// Callers must enforce |c| <= 255 before building the Some variant.
pub fn message_representative(tr: &[u8; 64], ctx: Option<&[u8]>, message: &[u8]) -> [u8; 64] {
    let mut mu = [0u8; 64];
    match ctx {
        Some(c) => {
            debug_assert!(c.len() <= 255);
            shake256_into(&[tr, &[0u8, c.len() as u8], c, message], &mut mu);
        }
        None => shake256_into(&[tr, message], &mut mu),
    }
    mu
}

/// rho'' = SHAKE256(K || rnd || mu, 64), the per-signature sampling seed.
pub fn derive_rho_second(key: &[u8], rnd: &[u8; 32], mu: &[u8; 64]) -> [u8; 64] {
    let mut rho_second = [0u8; 64];
    shake256_into(&[key, rnd, mu], &mut rho_second);
    rho_second
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shake256_deterministic() {
        let mut out1 = [0u8; 32];
        let mut out2 = [0u8; 32];
        shake256_into(&[b"test input"], &mut out1);
        shake256_into(&[b"test input"], &mut out2);
        assert_eq!(out1, out2);
    }

    #[test]
    fn test_parts_equal_concatenation() {
        let mut split = [0u8; 48];
        let mut joined = [0u8; 48];
        shake256_into(&[b"ab", b"", b"cd"], &mut split);
        shake256_into(&[b"abcd"], &mut joined);
        assert_eq!(split, joined);
    }

    #[test]
    fn test_squeeze_chunking_invariant() {
        let mut whole = Shake256Xof::from_data(b"stream");
        let mut chunked = Shake256Xof::from_data(b"stream");

        let mut a = [0u8; 100];
        whole.squeeze(&mut a);

        let mut b = [0u8; 100];
        chunked.squeeze(&mut b[..7]);
        chunked.squeeze(&mut b[7..64]);
        chunked.squeeze(&mut b[64..]);

        assert_eq!(a, b);
    }

    #[test]
    fn test_matrix_entry_domain_separation() {
        let rho = [0u8; 32];
        let mut xof1 = Shake128Xof::for_matrix_entry(&rho, 0, 0);
        let mut xof2 = Shake128Xof::for_matrix_entry(&rho, 0, 1);
        let mut xof3 = Shake128Xof::for_matrix_entry(&rho, 1, 0);

        let mut out1 = [0u8; 32];
        let mut out2 = [0u8; 32];
        let mut out3 = [0u8; 32];
        xof1.squeeze(&mut out1);
        xof2.squeeze(&mut out2);
        xof3.squeeze(&mut out3);

        assert_ne!(out1, out2);
        assert_ne!(out1, out3);
        assert_ne!(out2, out3);
    }

    #[test]
    fn test_mu_ctx_binding() {
        let tr = [7u8; 64];
        let with_empty = message_representative(&tr, Some(b""), b"msg");
        let with_ctx = message_representative(&tr, Some(b"app"), b"msg");
        let raw = message_representative(&tr, None, b"msg");

        assert_ne!(with_empty, with_ctx);
        assert_ne!(with_empty, raw);
    }
}
