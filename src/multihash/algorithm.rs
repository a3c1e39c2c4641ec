//! Algorithm tags carried in the first byte of a multihash blob.

use alloy_primitives::{eip191_hash_message, B256};

/// Size of a `v ‖ r ‖ s` ECDSA payload
pub const ECDSA_PAYLOAD_LEN: usize = 65;

/// Built-in signing algorithms.
///
/// Represented as u8 on the wire:
/// - Ethereum = 0
/// - EIP712 = 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignAlgorithm {
    /// `personal_sign`: the hash is wrapped in the EIP-191 prefix before recovery
    Ethereum,
    /// The hash is already an EIP-712 typed-data digest
    Eip712,
}

impl SignAlgorithm {
    /// Convert to the wire tag
    pub fn to_u8(self) -> u8 {
        match self {
            SignAlgorithm::Ethereum => 0,
            SignAlgorithm::Eip712 => 1,
        }
    }

    /// Convert from the wire tag
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(SignAlgorithm::Ethereum),
            1 => Some(SignAlgorithm::Eip712),
            _ => None,
        }
    }

    /// Human-readable name used in errors and logs
    pub fn name(self) -> &'static str {
        match self {
            SignAlgorithm::Ethereum => "Ethereum",
            SignAlgorithm::Eip712 => "EIP712",
        }
    }

    /// Digest that is actually signed for a given message hash
    ///
    /// ```
    /// use alloy_primitives::B256;
    /// use fee_burner::multihash::SignAlgorithm;
    ///
    /// let hash = B256::repeat_byte(0xa1);
    /// assert_eq!(SignAlgorithm::Eip712.prehash(&hash), hash);
    /// assert_ne!(SignAlgorithm::Ethereum.prehash(&hash), hash);
    /// ```
    pub fn prehash(self, hash: &B256) -> B256 {
        match self {
            SignAlgorithm::Ethereum => eip191_hash_message(hash.as_slice()),
            SignAlgorithm::Eip712 => *hash,
        }
    }
}
