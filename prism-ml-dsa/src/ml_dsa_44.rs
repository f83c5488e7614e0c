//! ML-DSA-44 (NIST Level 2) implementation

use crate::params::ml_dsa_44::*;
use crate::sign::{ml_dsa_keygen, ml_dsa_sign, ml_dsa_verify};
use crate::types::define_dsa_types;
use prism_core::{Error, Result, Signer};
use rand_core::CryptoRng;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// ML-DSA-44 algorithm marker.
pub struct MlDsa44;

define_dsa_types! {
    sk_size: SK_BYTES,
    pk_size: PK_BYTES,
    sig_size: SIG_BYTES
}

impl Signer for MlDsa44 {
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
        assert_eq!(MlDsa44::SIGNING_KEY_SIZE, 2560);
        assert_eq!(MlDsa44::VERIFICATION_KEY_SIZE, 1312);
        assert_eq!(MlDsa44::SIGNATURE_SIZE, 2420);
    }

    #[test]
    fn test_keygen_from_seed_deterministic() {
        let (sk1, pk1) = MlDsa44::keygen_from_seed(&[1u8; 32]);
        let (sk2, pk2) = MlDsa44::keygen_from_seed(&[1u8; 32]);
        assert_eq!(sk1.as_bytes()[..], sk2.as_bytes()[..]);
        assert_eq!(pk1.as_bytes()[..], pk2.as_bytes()[..]);
    }

    #[test]
    fn test_roundtrip() {
        let mut rng = rand::rng();
        let (sk, pk) = MlDsa44::keygen(&mut rng).unwrap();

        let message = b"Hello, ML-DSA-44!";
        let signature = MlDsa44::sign(&sk, message, b"").unwrap();

        assert!(MlDsa44::verify(&pk, message, &signature, b"").is_ok());
        assert!(MlDsa44::verify(&pk, b"other message", &signature, b"").is_err());
    }

    #[test]
    fn test_context_binding() {
        let (sk, pk) = MlDsa44::keygen_from_seed(&[2u8; 32]);

        let message = b"payload";
        let signature = MlDsa44::sign(&sk, message, b"app").unwrap();

        assert!(MlDsa44::verify(&pk, message, &signature, b"app").is_ok());
        assert!(MlDsa44::verify(&pk, message, &signature, b"").is_err());
        assert!(MlDsa44::verify(&pk, message, &signature, b"app2").is_err());
    }

    #[test]
    fn test_ctx_too_long() {
        let (sk, _pk) = MlDsa44::keygen_from_seed(&[3u8; 32]);
        let ctx = [0u8; 256];
        assert!(matches!(
            MlDsa44::sign(&sk, b"m", &ctx),
            Err(Error::ContextTooLong { actual: 256 })
        ));
    }

    #[test]
    fn test_randomized_signatures_verify() {
        let mut rng = rand::rng();
        let (sk, pk) = MlDsa44::keygen(&mut rng).unwrap();

        let message = b"hedged";
        let sig1 = MlDsa44::sign_randomized(&sk, message, b"", &mut rng).unwrap();
        let sig2 = MlDsa44::sign_randomized(&sk, message, b"", &mut rng).unwrap();

        assert!(MlDsa44::verify(&pk, message, &sig1, b"").is_ok());
        assert!(MlDsa44::verify(&pk, message, &sig2, b"").is_ok());
    }
}
