//! Integration tests for multihash signature verification.
//!
//! Keys come from a seeded RNG so every run signs with the same accounts.

use alloy_primitives::{Address, B256};
use fee_burner::multihash::{sign, verify_signature, MultihashVerifier, SignAlgorithm};
use fee_burner::{Bitstream, MultihashError};
use k256::ecdsa::SigningKey;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Two deterministic signing accounts
fn accounts() -> (SigningKey, SigningKey) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    (SigningKey::random(&mut rng), SigningKey::random(&mut rng))
}

fn address_of(key: &SigningKey) -> Address {
    Address::from_private_key(key)
}

fn hash1() -> B256 {
    B256::repeat_byte(0xa1)
}

fn hash2() -> B256 {
    B256::repeat_byte(0xb2)
}

// ============================================================================
// GENERAL
// ============================================================================

#[test]
fn test_unknown_signature_type_is_not_valid() {
    let (key1, _) = accounts();
    let mut sig = Bitstream::new();
    sig.add_number(111, 1)
        .unwrap()
        .add_number(48, 1)
        .unwrap()
        .add_number(123, 24)
        .unwrap()
        .add_number(456, 24)
        .unwrap();

    let result = verify_signature(&address_of(&key1), &hash1(), sig.as_bytes());
    assert_eq!(result, Ok(false));
}

#[test]
fn test_truncated_multihash_is_error() {
    let (key1, _) = accounts();
    let mut sig = Bitstream::new();
    sig.add_number(1, 1).unwrap();

    let result = verify_signature(&address_of(&key1), &hash1(), sig.as_bytes());
    assert_eq!(result, Err(MultihashError::TooShort { len: 1 }));
}

#[test]
fn test_incorrect_length_is_error() {
    let (key1, _) = accounts();
    let mut sig = Bitstream::new();
    sig.add_number(111, 1)
        .unwrap()
        .add_number(24 + 2, 1)
        .unwrap()
        .add_number(123, 24)
        .unwrap();

    let result = verify_signature(&address_of(&key1), &hash1(), sig.as_bytes());
    assert_eq!(result, Err(MultihashError::LengthMismatch { declared: 26, actual: 24 }));
}

#[test]
fn test_header_with_missing_payload_is_error() {
    let signer = Address::repeat_byte(0x11);
    assert!(verify_signature(&signer, &hash1(), &[0x00, 0x01]).is_err());
    assert!(verify_signature(&signer, &hash1(), &[]).is_err());
}

// ============================================================================
// STANDARD ETHEREUM SIGNING
// ============================================================================

#[test]
fn test_verify_signed_data() {
    let (key1, _) = accounts();
    let blob = sign(SignAlgorithm::Ethereum, &hash1(), &key1).unwrap();

    assert_eq!(verify_signature(&address_of(&key1), &hash1(), &blob), Ok(true));
}

#[test]
fn test_wrongly_signed_data_is_not_valid() {
    let (key1, key2) = accounts();

    // Different hash
    let blob = sign(SignAlgorithm::Ethereum, &hash2(), &key1).unwrap();
    assert_eq!(verify_signature(&address_of(&key1), &hash1(), &blob), Ok(false));

    // Different signer
    let blob = sign(SignAlgorithm::Ethereum, &hash1(), &key1).unwrap();
    assert_eq!(verify_signature(&address_of(&key2), &hash1(), &blob), Ok(false));
}

#[test]
fn test_zero_signer_is_error() {
    let (key1, _) = accounts();
    let blob = sign(SignAlgorithm::Ethereum, &hash1(), &key1).unwrap();

    assert_eq!(
        verify_signature(&Address::ZERO, &hash1(), &blob),
        Err(MultihashError::InvalidSigner)
    );
}

#[test]
fn test_incorrect_signature_data_length_is_error() {
    let (key1, _) = accounts();
    let blob = sign(SignAlgorithm::Ethereum, &hash1(), &key1).unwrap();

    // Re-frame the 65-byte payload with a declared length of 66
    let mut reframed = Bitstream::new();
    reframed
        .add_number(u128::from(SignAlgorithm::Ethereum.to_u8()), 1)
        .unwrap()
        .add_number(65 + 1, 1)
        .unwrap()
        .add_bytes(&blob[2..]);

    let result = verify_signature(&address_of(&key1), &hash1(), reframed.as_bytes());
    assert_eq!(result, Err(MultihashError::LengthMismatch { declared: 66, actual: 65 }));
}

#[test]
fn test_consistent_frame_with_wrong_payload_size_is_error() {
    let (key1, _) = accounts();
    let blob = sign(SignAlgorithm::Ethereum, &hash1(), &key1).unwrap();

    // Drop the last payload byte and declare 64
    let mut short = vec![0x00, 64];
    short.extend_from_slice(&blob[2..66]);

    assert!(matches!(
        verify_signature(&address_of(&key1), &hash1(), &short),
        Err(MultihashError::BadPayloadLength { expected: 65, actual: 64, .. })
    ));
}

#[test]
fn test_trailing_byte_is_error() {
    let (key1, _) = accounts();
    let mut blob = sign(SignAlgorithm::Ethereum, &hash1(), &key1).unwrap();
    blob.push(0x00);

    assert!(verify_signature(&address_of(&key1), &hash1(), &blob).is_err());
}

#[test]
fn test_corrupted_signature_is_not_valid() {
    let (key1, _) = accounts();
    let mut blob = sign(SignAlgorithm::Ethereum, &hash1(), &key1).unwrap();

    // Invalid recovery byte
    blob[2] = 29;
    assert_eq!(verify_signature(&address_of(&key1), &hash1(), &blob), Ok(false));

    // Zero r
    let mut blob = sign(SignAlgorithm::Ethereum, &hash1(), &key1).unwrap();
    blob[3..35].fill(0);
    assert_eq!(verify_signature(&address_of(&key1), &hash1(), &blob), Ok(false));
}

// ============================================================================
// EIP-712 SIGNING
// ============================================================================

#[test]
fn test_eip712_signed_data() {
    let (key1, key2) = accounts();
    let blob = sign(SignAlgorithm::Eip712, &hash1(), &key1).unwrap();

    assert_eq!(blob[0], 1);
    assert_eq!(verify_signature(&address_of(&key1), &hash1(), &blob), Ok(true));
    assert_eq!(verify_signature(&address_of(&key2), &hash1(), &blob), Ok(false));
    assert_eq!(verify_signature(&address_of(&key1), &hash2(), &blob), Ok(false));
}

#[test]
fn test_algorithms_are_not_interchangeable() {
    let (key1, _) = accounts();
    let mut blob = sign(SignAlgorithm::Ethereum, &hash1(), &key1).unwrap();

    // Same payload relabelled as EIP-712 recovers a different key
    blob[0] = SignAlgorithm::Eip712.to_u8();
    assert_eq!(verify_signature(&address_of(&key1), &hash1(), &blob), Ok(false));
}

#[test]
fn test_verifier_without_schemes_rejects_everything() {
    let (key1, _) = accounts();
    let blob = sign(SignAlgorithm::Ethereum, &hash1(), &key1).unwrap();
    let verifier = MultihashVerifier::empty();

    assert_eq!(verifier.verify_signature(&address_of(&key1), &hash1(), &blob), Ok(false));
}

#[test]
fn test_many_accounts_verify() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let verifier = MultihashVerifier::default();

    for i in 0..32u8 {
        let key = SigningKey::random(&mut rng);
        let hash = B256::repeat_byte(i);
        let algorithm = if i % 2 == 0 { SignAlgorithm::Ethereum } else { SignAlgorithm::Eip712 };
        let blob = sign(algorithm, &hash, &key).unwrap();

        assert_eq!(verifier.verify_signature(&address_of(&key), &hash, &blob), Ok(true));
    }
}
