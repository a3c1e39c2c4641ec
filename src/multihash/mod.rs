//! Multihash signature verification.
//!
//! ## Wire Format
//!
//! ```text
//! [algorithm:1][length:1][payload:length]
//! ```
//!
//! No padding, no trailing bytes. The payload of both built-in algorithms is
//! `v(1) ‖ r(32) ‖ s(32)`.
//!
//! ## Outcomes
//!
//! | Input | Result |
//! |-------|--------|
//! | fewer than 2 bytes | `Err(TooShort)` |
//! | length byte disagrees with remaining bytes | `Err(LengthMismatch)` |
//! | zero signer address | `Err(InvalidSigner)` |
//! | unknown algorithm tag | `Ok(false)` |
//! | known tag, wrong payload size | `Err(BadPayloadLength)` |
//! | recovery fails or recovers another signer | `Ok(false)` |
//! | recovered signer matches | `Ok(true)` |
//!
//! ## Example
//!
//! ```
//! use alloy_primitives::{Address, B256};
//! use fee_burner::multihash::verify_signature;
//!
//! let signer = Address::repeat_byte(0x11);
//! let hash = B256::repeat_byte(0xa1);
//!
//! // Unknown tag 111 with a consistent 48-byte payload
//! let mut blob = vec![0x6f, 0x30];
//! blob.extend_from_slice(&[0u8; 48]);
//! assert_eq!(verify_signature(&signer, &hash, &blob), Ok(false));
//!
//! // Declares one payload byte but carries none
//! assert!(verify_signature(&signer, &hash, &[0x00, 0x01]).is_err());
//! ```

pub mod algorithm;
pub mod scheme;

use std::collections::HashMap;

use alloy_primitives::{Address, B256};
use once_cell::sync::Lazy;
use tracing::debug;

use crate::codec::BitReader;
use crate::error::MultihashError;

pub use algorithm::{SignAlgorithm, ECDSA_PAYLOAD_LEN};
pub use scheme::{ecrecover, sign, EcdsaScheme, SignatureScheme};

/// Header size: algorithm tag plus length byte
pub const HEADER_LEN: usize = 2;

// ============================================================================
// Frame
// ============================================================================

/// A structurally valid multihash blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Multihash<'a> {
    /// Algorithm tag
    pub algorithm: u8,
    /// Signature payload, exactly as long as the header declared
    pub payload: &'a [u8],
}

impl<'a> Multihash<'a> {
    /// Split a blob into tag and payload.
    ///
    /// # Errors
    ///
    /// * [`MultihashError::TooShort`] if the header cannot be read
    /// * [`MultihashError::LengthMismatch`] if the length byte is wrong
    pub fn parse(blob: &'a [u8]) -> Result<Self, MultihashError> {
        if blob.len() < HEADER_LEN {
            return Err(MultihashError::TooShort { len: blob.len() });
        }

        let reader = BitReader::new(blob);
        let algorithm = reader.extract_u8(0)?;
        let declared = usize::from(reader.extract_u8(1)?);
        let actual = blob.len() - HEADER_LEN;
        if declared != actual {
            return Err(MultihashError::LengthMismatch { declared, actual });
        }

        Ok(Self {
            algorithm,
            payload: reader.extract_bytes(HEADER_LEN, declared)?,
        })
    }
}

// ============================================================================
// Verifier
// ============================================================================

/// Dispatches multihash blobs to registered signature schemes.
pub struct MultihashVerifier {
    schemes: HashMap<u8, Box<dyn SignatureScheme>>,
}

impl std::fmt::Debug for MultihashVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut tags: Vec<_> = self.schemes.keys().copied().collect();
        tags.sort_unstable();
        f.debug_struct("MultihashVerifier").field("algorithms", &tags).finish()
    }
}

impl Default for MultihashVerifier {
    /// Verifier with the Ethereum and EIP-712 schemes registered
    fn default() -> Self {
        let mut verifier = Self::empty();
        verifier.register(Box::new(EcdsaScheme::new(SignAlgorithm::Ethereum)));
        verifier.register(Box::new(EcdsaScheme::new(SignAlgorithm::Eip712)));
        verifier
    }
}

impl MultihashVerifier {
    /// Verifier with no schemes; every tag is unknown
    pub fn empty() -> Self {
        Self {
            schemes: HashMap::new(),
        }
    }

    /// Register a scheme, returning the one it replaced
    pub fn register(&mut self, scheme: Box<dyn SignatureScheme>) -> Option<Box<dyn SignatureScheme>> {
        self.schemes.insert(scheme.algorithm(), scheme)
    }

    /// Check if a tag has a registered scheme
    pub fn supports(&self, algorithm: u8) -> bool {
        self.schemes.contains_key(&algorithm)
    }

    /// Verify that `signer` signed `hash`.
    ///
    /// Returns `Ok(false)` for unknown algorithms and for signatures that do
    /// not verify. Returns `Err` only for structurally malformed input.
    pub fn verify_signature(
        &self,
        signer: &Address,
        hash: &B256,
        blob: &[u8],
    ) -> Result<bool, MultihashError> {
        let multihash = Multihash::parse(blob)?;

        if signer.is_zero() {
            return Err(MultihashError::InvalidSigner);
        }

        let Some(scheme) = self.schemes.get(&multihash.algorithm) else {
            debug!(algorithm = multihash.algorithm, "unsupported multihash algorithm");
            return Ok(false);
        };

        if multihash.payload.len() != scheme.payload_len() {
            return Err(MultihashError::BadPayloadLength {
                algorithm: scheme.name(),
                expected: scheme.payload_len(),
                actual: multihash.payload.len(),
            });
        }

        let valid = scheme
            .recover(hash, multihash.payload)
            .is_some_and(|recovered| recovered == *signer);
        if !valid {
            debug!(algorithm = scheme.name(), %signer, "signature did not verify");
        }
        Ok(valid)
    }
}

// Built once, shared by every caller of the free functions
static DEFAULT_VERIFIER: Lazy<MultihashVerifier> = Lazy::new(MultihashVerifier::default);

/// Process-wide verifier with the built-in schemes
pub fn default_verifier() -> &'static MultihashVerifier {
    &DEFAULT_VERIFIER
}

/// Verify a blob against the built-in schemes.
///
/// See [`MultihashVerifier::verify_signature`].
pub fn verify_signature(signer: &Address, hash: &B256, blob: &[u8]) -> Result<bool, MultihashError> {
    default_verifier().verify_signature(signer, hash, blob)
}

// ============================================================================
// Unit Tests
// ============================================================================
