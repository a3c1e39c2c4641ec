//! Big-endian bitstream writer and reader.
//!
//! ## Field Layout
//!
//! Fields are written back to back with no implicit padding. A field of
//! width `w` holds its value in the low-order bytes, big-endian, with the
//! remaining high-order bytes zero:
//!
//! ```text
//! add_number(456, 4)  ->  00 00 01 c8
//! add_number(1, 24)   ->  00 .. 00 01   (23 zero bytes, then 0x01)
//! ```
//!
//! Values that do not fit their declared width are rejected, never truncated.

use alloy_primitives::{Address, B256};

use crate::error::BitstreamError;

/// Width of a `u128` in bytes
const U128_BYTES: usize = 16;

// ============================================================================
// Writer
// ============================================================================

/// Growing byte buffer of big-endian fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bitstream {
    data: Vec<u8>,
}

impl Bitstream {
    /// Create an empty bitstream
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Parse a hex string, with or without a `0x` prefix
    ///
    /// # Example
    ///
    /// ```
    /// use fee_burner::codec::Bitstream;
    ///
    /// let stream = Bitstream::from_hex("0x0001").unwrap();
    /// assert_eq!(stream.as_bytes(), &[0x00, 0x01]);
    /// ```
    pub fn from_hex(s: &str) -> Result<Self, BitstreamError> {
        Ok(Self { data: decode_hex(s)? })
    }

    /// Append `value` as a big-endian field of exactly `width` bytes.
    ///
    /// # Arguments
    ///
    /// * `value` - Number to encode
    /// * `width` - Field width in bytes (may exceed 16, high bytes are zero)
    ///
    /// # Errors
    ///
    /// * [`BitstreamError::ZeroWidth`] if `width == 0`
    /// * [`BitstreamError::ValueOverflow`] if `value` needs more than `width` bytes
    ///
    /// # Example
    ///
    /// ```
    /// use fee_burner::codec::Bitstream;
    ///
    /// let mut stream = Bitstream::new();
    /// stream.add_number(456, 4).unwrap();
    /// assert_eq!(stream.get_data(), "0x000001c8");
    ///
    /// assert!(stream.add_number(256, 1).is_err());
    /// ```
    pub fn add_number(&mut self, value: u128, width: usize) -> Result<&mut Self, BitstreamError> {
        if width == 0 {
            return Err(BitstreamError::ZeroWidth);
        }
        if width < U128_BYTES && value >> (width * 8) != 0 {
            return Err(BitstreamError::ValueOverflow { value, width });
        }

        let bytes = value.to_be_bytes();
        if width > U128_BYTES {
            self.data.resize(self.data.len() + (width - U128_BYTES), 0);
            self.data.extend_from_slice(&bytes);
        } else {
            self.data.extend_from_slice(&bytes[U128_BYTES - width..]);
        }
        Ok(self)
    }

    /// Append `value` as a 32-byte big-endian word
    pub fn add_word(&mut self, value: u128) -> &mut Self {
        self.data.extend_from_slice(&[0u8; 32 - U128_BYTES]);
        self.data.extend_from_slice(&value.to_be_bytes());
        self
    }

    /// Append a 20-byte address
    pub fn add_address(&mut self, address: &Address) -> &mut Self {
        self.data.extend_from_slice(address.as_slice());
        self
    }

    /// Append a 32-byte word
    pub fn add_bytes32(&mut self, word: &B256) -> &mut Self {
        self.data.extend_from_slice(word.as_slice());
        self
    }

    /// Append raw bytes
    pub fn add_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.data.extend_from_slice(bytes);
        self
    }

    /// Append bytes given as hex, with or without a `0x` prefix
    pub fn add_hex(&mut self, s: &str) -> Result<&mut Self, BitstreamError> {
        let bytes = decode_hex(s)?;
        self.data.extend_from_slice(&bytes);
        Ok(self)
    }

    /// Accumulated bytes as a `0x`-prefixed lowercase hex string
    pub fn get_data(&self) -> String {
        format!("0x{}", hex::encode(&self.data))
    }

    /// Accumulated bytes
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the stream, returning its bytes
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Number of bytes written
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if nothing has been written
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Reader over the accumulated bytes
    #[inline]
    pub fn reader(&self) -> BitReader<'_> {
        BitReader::new(&self.data)
    }
}

// ============================================================================
// Reader
// ============================================================================

/// Extracts fixed-width fields from a borrowed byte slice.
#[derive(Debug, Clone, Copy)]
pub struct BitReader<'a> {
    data: &'a [u8],
}

impl<'a> BitReader<'a> {
    /// Read from `data`
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Total bytes available
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if there is nothing to read
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow `len` bytes starting at `offset`
    pub fn extract_bytes(&self, offset: usize, len: usize) -> Result<&'a [u8], BitstreamError> {
        let end = offset
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or(BitstreamError::OutOfBounds {
                offset,
                len,
                available: self.data.len(),
            })?;
        Ok(&self.data[offset..end])
    }

    /// Read a big-endian unsigned field of `width` bytes.
    ///
    /// Fields wider than 16 bytes are accepted as long as the excess
    /// high-order bytes are zero.
    pub fn extract_uint(&self, offset: usize, width: usize) -> Result<u128, BitstreamError> {
        if width == 0 {
            return Err(BitstreamError::ZeroWidth);
        }
        let bytes = self.extract_bytes(offset, width)?;
        let (high, low) = bytes.split_at(width.saturating_sub(U128_BYTES));
        if high.iter().any(|b| *b != 0) {
            return Err(BitstreamError::ValueOverflow {
                value: u128::MAX,
                width,
            });
        }
        Ok(low.iter().fold(0u128, |acc, b| (acc << 8) | u128::from(*b)))
    }

    /// Read a single byte
    #[inline]
    pub fn extract_u8(&self, offset: usize) -> Result<u8, BitstreamError> {
        Ok(self.extract_bytes(offset, 1)?[0])
    }

    /// Read a 20-byte address
    pub fn extract_address(&self, offset: usize) -> Result<Address, BitstreamError> {
        Ok(Address::from_slice(self.extract_bytes(offset, 20)?))
    }

    /// Read a 32-byte word
    pub fn extract_bytes32(&self, offset: usize) -> Result<B256, BitstreamError> {
        Ok(B256::from_slice(self.extract_bytes(offset, 32)?))
    }
}

fn decode_hex(s: &str) -> Result<Vec<u8>, BitstreamError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    hex::decode(digits).map_err(|e| BitstreamError::InvalidHex(e.to_string()))
}

// ============================================================================
// Unit Tests
// ============================================================================
