//! ML-DSA-87 (NIST Level 5) implementation

use crate::params::ml_dsa_87::*;
use crate::sign::{ml_dsa_keygen, ml_dsa_sign, ml_dsa_verify};
use crate::types::define_dsa_types;
use prism_core::{Error, Result, Signer};
use rand_core::CryptoRng;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// ML-DSA-87 algorithm marker.
pub struct MlDsa87;

define_dsa_types! {
    sk_size: SK_BYTES,
    pk_size: PK_BYTES,
    sig_size: SIG_BYTES
}

impl Signer for MlDsa87 {
    type SigningKey = SigningKey;
    type VerificationKey = VerificationKey;
    type Signature = Signature;

    const SIGNING_KEY_SIZE: usize = SK_BYTES;
    const VERIFICATION_KEY_SIZE: usize = PK_BYTES;
    const SIGNATURE_SIZE: usize = SIG_BYTES;

    fn keygen(rng: &mut impl CryptoRng) -> Result<(Self::SigningKey, Self::VerificationKey)> {
        let mut xi = [0u8; 32];
        rng.fill_bytes(&mut xi);
        let keys = Self::keygen_from_seed(&xi);
        xi.zeroize();
        Ok(keys)
    }

    fn keygen_from_seed(xi: &[u8; 32]) -> (Self::SigningKey, Self::VerificationKey) {
        let (sk_bytes, pk_bytes) = ml_dsa_keygen::<K, L, ETA>(xi);
        let sk_bytes = Zeroizing::new(sk_bytes);

        let sk = SigningKey::from_bytes(&sk_bytes).expect("keygen emits the fixed size");
        let pk = VerificationKey::from_bytes(&pk_bytes).expect("keygen emits the fixed size");
        (sk, pk)
    }

    fn sign(sk: &Self::SigningKey, message: &[u8], ctx: &[u8]) -> Result<Self::Signature> {
        sign_with_rnd(sk, message, ctx, &[0u8; 32])
    }

    fn sign_randomized(
        sk: &Self::SigningKey,
        message: &[u8],
        ctx: &[u8],
        rng: &mut impl CryptoRng,
    ) -> Result<Self::Signature> {
        let mut rnd = [0u8; 32];
        rng.fill_bytes(&mut rnd);
        let sig = sign_with_rnd(sk, message, ctx, &rnd);
        rnd.zeroize();
        sig
    }

    fn verify(
        pk: &Self::VerificationKey,
        message: &[u8],
        signature: &Self::Signature,
        ctx: &[u8],
    ) -> Result<()> {
        let valid = ml_dsa_verify::<K, L, BETA, GAMMA1, GAMMA2, TAU, OMEGA, C_TILDE_BYTES>(
            pk.as_bytes(),
            message,
            Some(ctx),
            signature.as_bytes(),
        );

        if valid {
            Ok(())
        } else {
            Err(Error::VerificationFailed)
        }
    }
}

fn sign_with_rnd(
    sk: &SigningKey,
    message: &[u8],
    ctx: &[u8],
    rnd: &[u8; 32],
) -> Result<Signature> {
    if ctx.len() > CTX_MAX {
        return Err(Error::ContextTooLong { actual: ctx.len() });
    }

    let sig_bytes = ml_dsa_sign::<K, L, ETA, BETA, GAMMA1, GAMMA2, TAU, OMEGA, C_TILDE_BYTES>(
        sk.as_bytes(),
        message,
        Some(ctx),
        rnd,
    )?;

    Signature::from_bytes(&sig_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_sizes() {
        assert_eq!(MlDsa87::SIGNING_KEY_SIZE, 4896);
        assert_eq!(MlDsa87::VERIFICATION_KEY_SIZE, 2592);
        assert_eq!(MlDsa87::SIGNATURE_SIZE, 4627);
    }

    #[test]
    fn test_roundtrip() {
        let mut rng = rand::rng();
        let (sk, pk) = MlDsa87::keygen(&mut rng).unwrap();

        let message = b"Hello, ML-DSA-87!";
        let signature = MlDsa87::sign(&sk, message, b"").unwrap();

        assert!(MlDsa87::verify(&pk, message, &signature, b"").is_ok());
        assert!(MlDsa87::verify(&pk, b"other message", &signature, b"").is_err());
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let (sk, pk) = MlDsa87::keygen_from_seed(&[4u8; 32]);

        let message = b"tamper target";
        let signature = MlDsa87::sign(&sk, message, b"").unwrap();

        let mut bytes = *signature.as_bytes();
        bytes[100] ^= 0x01;
        let tampered = Signature::from_bytes(&bytes).unwrap();

        assert!(MlDsa87::verify(&pk, message, &tampered, b"").is_err());
    }
}
