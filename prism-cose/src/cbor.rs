//! Definite-length CBOR, restricted to what COSE_Sign1 needs.
//!
//! Encoders append to a `Vec<u8>`; decoding runs over a borrowing cursor.
//! Only unsigned/negative integers, byte strings, text strings, arrays,
//! and maps are understood, all with definite lengths. Indefinite-length
//! items, tags, floats, and simple values are rejected, which keeps
//! well-formed envelopes byte-exact under a decode/encode round trip.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use prism_core::{Error, Result};

/// CBOR major types (shifted into the top 3 bits of the initial byte).
pub mod major {
    /// Unsigned integer.
    pub const UNSIGNED: u8 = 0;
    /// Negative integer, encoded as -1 - n.
    pub const NEGATIVE: u8 = 1;
    /// Byte string.
    pub const BYTES: u8 = 2;
    /// Text string.
    pub const TEXT: u8 = 3;
    /// Array.
    pub const ARRAY: u8 = 4;
    /// Map.
    pub const MAP: u8 = 5;
}

/// Append a major type with its argument in the shortest definite form.
pub fn write_type_and_arg(out: &mut Vec<u8>, major: u8, arg: u64) {
    let mt = major << 5;
    if arg < 24 {
        out.push(mt | arg as u8);
    } else if arg <= 0xFF {
        out.push(mt | 24);
        out.push(arg as u8);
    } else if arg <= 0xFFFF {
        out.push(mt | 25);
        out.extend_from_slice(&(arg as u16).to_be_bytes());
    } else if arg <= 0xFFFF_FFFF {
        out.push(mt | 26);
        out.extend_from_slice(&(arg as u32).to_be_bytes());
    } else {
        out.push(mt | 27);
        out.extend_from_slice(&arg.to_be_bytes());
    }
}

/// Append a signed integer (major type 0 or 1).
pub fn write_int(out: &mut Vec<u8>, value: i64) {
    if value >= 0 {
        write_type_and_arg(out, major::UNSIGNED, value as u64);
    } else {
        write_type_and_arg(out, major::NEGATIVE, (-1 - value) as u64);
    }
}

/// Append a byte string.
pub fn write_bstr(out: &mut Vec<u8>, data: &[u8]) {
    write_type_and_arg(out, major::BYTES, data.len() as u64);
    out.extend_from_slice(data);
}

/// Append an array header for `len` following items.
pub fn write_array_header(out: &mut Vec<u8>, len: u64) {
    write_type_and_arg(out, major::ARRAY, len);
}

/// Append a map header for `len` following key/value pairs.
pub fn write_map_header(out: &mut Vec<u8>, len: u64) {
    write_type_and_arg(out, major::MAP, len);
}

/// Borrowing decode cursor. Every read either advances past a complete,
/// well-formed item or fails with [`Error::CoseDecode`].
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Start decoding at the beginning of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// True when every input byte has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.pos == self.data.len()
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(n).ok_or(Error::CoseDecode)?;
        if end > self.data.len() {
            return Err(Error::CoseDecode);
        }
        let s = &self.data[self.pos..end];
        self.pos = end;
        Ok(s)
    }

    /// Read an initial byte plus its argument. Rejects the indefinite
    /// form and reserved additional-info values.
    pub fn read_header(&mut self) -> Result<(u8, u64)> {
        let initial = self.take(1)?[0];
        let major = initial >> 5;
        let info = initial & 0x1F;

        let arg = match info {
            0..=23 => u64::from(info),
            24 => u64::from(self.take(1)?[0]),
            25 => {
                let b = self.take(2)?;
                u64::from(u16::from_be_bytes([b[0], b[1]]))
            }
            26 => {
                let b = self.take(4)?;
                u64::from(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
            }
            27 => {
                let b = self.take(8)?;
                u64::from_be_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]])
            }
            _ => return Err(Error::CoseDecode),
        };

        Ok((major, arg))
    }

    /// Read a signed integer (major type 0 or 1).
    pub fn read_int(&mut self) -> Result<i64> {
        let (major, arg) = self.read_header()?;
        match major {
            major::UNSIGNED => i64::try_from(arg).map_err(|_| Error::CoseDecode),
            major::NEGATIVE => {
                let n = i64::try_from(arg).map_err(|_| Error::CoseDecode)?;
                n.checked_neg()
                    .and_then(|v| v.checked_sub(1))
                    .ok_or(Error::CoseDecode)
            }
            _ => Err(Error::CoseDecode),
        }
    }

    /// Read a byte string and return its contents.
    pub fn read_bstr(&mut self) -> Result<&'a [u8]> {
        let (major, len) = self.read_header()?;
        if major != major::BYTES {
            return Err(Error::CoseDecode);
        }
        let len = usize::try_from(len).map_err(|_| Error::CoseDecode)?;
        self.take(len)
    }

    /// Read an array header and return the element count.
    pub fn read_array_header(&mut self) -> Result<u64> {
        let (major, len) = self.read_header()?;
        if major != major::ARRAY {
            return Err(Error::CoseDecode);
        }
        Ok(len)
    }

    /// Read a map header and return the pair count.
    pub fn read_map_header(&mut self) -> Result<u64> {
        let (major, len) = self.read_header()?;
        if major != major::MAP {
            return Err(Error::CoseDecode);
        }
        Ok(len)
    }

    /// Skip one complete data item of the supported subset (integers,
    /// byte strings, text strings).
    pub fn skip_value(&mut self) -> Result<()> {
        let (major, arg) = self.read_header()?;
        match major {
            major::UNSIGNED | major::NEGATIVE => Ok(()),
            major::BYTES | major::TEXT => {
                let len = usize::try_from(arg).map_err(|_| Error::CoseDecode)?;
                self.take(len).map(|_| ())
            }
            _ => Err(Error::CoseDecode),
        }
    }
}
