//! Binary field codec.
//!
//! [`Bitstream`] appends big-endian fixed-width fields into a growing
//! buffer and exposes the result as a `0x`-prefixed hex string.
//! [`BitReader`] extracts fields back out at caller-specified offsets.
//!
//! ## Example
//!
//! ```
//! use fee_burner::codec::Bitstream;
//!
//! let mut stream = Bitstream::new();
//! stream.add_number(111, 1).unwrap();
//! stream.add_number(48, 1).unwrap();
//!
//! assert_eq!(stream.get_data(), "0x6f30");
//! assert_eq!(stream.reader().extract_u8(1).unwrap(), 48);
//! ```

pub mod bitstream;

pub use bitstream::{BitReader, Bitstream};
