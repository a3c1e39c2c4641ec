//! Per-algorithm signer recovery.
//!
//! A [`SignatureScheme`] knows how big its payload is and how to recover
//! the signing address from it. It never returns an error: a payload that
//! cannot be recovered simply yields `None`, which the verifier reports as
//! a failed (but well-formed) verification.

use alloy_primitives::{Address, B256};
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};

use crate::codec::Bitstream;
use crate::error::MultihashError;
use crate::multihash::algorithm::{SignAlgorithm, ECDSA_PAYLOAD_LEN};

/// `v` values accepted by `ecrecover`
const V_BASE: u8 = 27;

/// A pluggable verification algorithm keyed by its wire tag.
pub trait SignatureScheme: Send + Sync {
    /// Wire tag in the first byte of the blob
    fn algorithm(&self) -> u8;

    /// Name used in errors and logs
    fn name(&self) -> &'static str;

    /// Exact payload length this scheme accepts
    fn payload_len(&self) -> usize;

    /// Recover the signer of `hash` from `payload`.
    ///
    /// `payload.len()` has already been checked against [`Self::payload_len`].
    fn recover(&self, hash: &B256, payload: &[u8]) -> Option<Address>;
}

/// secp256k1 recovery over a `v ‖ r ‖ s` payload.
#[derive(Debug, Clone, Copy)]
pub struct EcdsaScheme {
    algorithm: SignAlgorithm,
}

impl EcdsaScheme {
    /// Scheme for a built-in algorithm
    pub fn new(algorithm: SignAlgorithm) -> Self {
        Self { algorithm }
    }
}

impl SignatureScheme for EcdsaScheme {
    fn algorithm(&self) -> u8 {
        self.algorithm.to_u8()
    }

    fn name(&self) -> &'static str {
        self.algorithm.name()
    }

    fn payload_len(&self) -> usize {
        ECDSA_PAYLOAD_LEN
    }

    fn recover(&self, hash: &B256, payload: &[u8]) -> Option<Address> {
        ecrecover(&self.algorithm.prehash(hash), payload)
    }
}

/// Recover an address the way the EVM `ecrecover` precompile does.
///
/// `payload` is `v(1) ‖ r(32) ‖ s(32)` with `v` in `{27, 28}`. High-`s`
/// signatures are accepted: `s` is normalized and the recovery parity flipped.
pub fn ecrecover(prehash: &B256, payload: &[u8]) -> Option<Address> {
    let (&v, rs) = payload.split_first()?;
    if rs.len() != ECDSA_PAYLOAD_LEN - 1 {
        return None;
    }
    let parity = match v {
        27 | 28 => v - V_BASE,
        _ => return None,
    };

    let signature = Signature::from_slice(rs).ok()?;
    let (signature, parity) = match signature.normalize_s() {
        Some(normalized) => (normalized, parity ^ 1),
        None => (signature, parity),
    };
    let recovery_id = RecoveryId::from_byte(parity)?;

    let key = VerifyingKey::recover_from_prehash(prehash.as_slice(), &signature, recovery_id).ok()?;
    Some(Address::from_public_key(&key))
}

/// Sign `hash` and frame the result as a multihash blob.
///
/// # Example
///
/// ```
/// use alloy_primitives::{Address, B256};
/// use k256::ecdsa::SigningKey;
/// use fee_burner::multihash::{sign, verify_signature, SignAlgorithm};
///
/// let key = SigningKey::from_slice(&[7u8; 32]).unwrap();
/// let signer = Address::from_private_key(&key);
/// let hash = B256::repeat_byte(0xa1);
///
/// let blob = sign(SignAlgorithm::Ethereum, &hash, &key).unwrap();
/// assert_eq!(blob.len(), 67);
/// assert_eq!(verify_signature(&signer, &hash, &blob), Ok(true));
/// ```
pub fn sign(
    algorithm: SignAlgorithm,
    hash: &B256,
    key: &SigningKey,
) -> Result<Vec<u8>, MultihashError> {
    let prehash = algorithm.prehash(hash);
    let (signature, recovery_id) = key
        .sign_prehash_recoverable(prehash.as_slice())
        .map_err(|e| MultihashError::SigningFailed(e.to_string()))?;

    let mut stream = Bitstream::new();
    stream
        .add_number(u128::from(algorithm.to_u8()), 1)?
        .add_number(ECDSA_PAYLOAD_LEN as u128, 1)?
        .add_number(u128::from(V_BASE + recovery_id.to_byte()), 1)?
        .add_bytes(&signature.to_bytes());
    Ok(stream.into_bytes())
}
