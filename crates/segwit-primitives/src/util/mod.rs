//! Wire-format codec for Bitcoin protocol binary data.
//!
//! Provides little-endian integer encoding, VarInt encoding/decoding, and
//! `WireReader`/`WireWriter` cursor types used throughout transaction
//! serialization and sighash preimage construction.

use crate::PrimitivesError;

// ---------------------------------------------------------------------------
// Little-endian integers
// ---------------------------------------------------------------------------

/// Encode a non-negative integer into `length` bytes, least-significant
/// byte first.
///
/// # Arguments
/// * `value` - The integer to encode.
/// * `length` - The exact number of output bytes.
///
/// # Returns
/// `Ok(Vec<u8>)` of exactly `length` bytes, or `ValueOverflow` if `value`
/// does not fit.
pub fn int_to_le(value: u64, length: usize) -> Result<Vec<u8>, PrimitivesError> {
    if length < 8 && value >> (8 * length as u32) != 0 {
        return Err(PrimitivesError::ValueOverflow { value, length });
    }
    let le = value.to_le_bytes();
    let mut out = vec![0u8; length];
    let n = length.min(8);
    out[..n].copy_from_slice(&le[..n]);
    Ok(out)
}

/// Decode a little-endian byte slice into a u64.
///
/// Inverse of `int_to_le` for slices of up to 8 significant bytes.
///
/// # Arguments
/// * `bytes` - Little-endian bytes; trailing bytes beyond the 8th must be zero.
///
/// # Returns
/// The decoded integer, or `ValueOverflow` if the value exceeds u64 range.
pub fn int_from_le(bytes: &[u8]) -> Result<u64, PrimitivesError> {
    if bytes.len() > 8 && bytes[8..].iter().any(|&b| b != 0) {
        return Err(PrimitivesError::ValueOverflow {
            value: u64::MAX,
            length: bytes.len(),
        });
    }
    let mut buf = [0u8; 8];
    let n = bytes.len().min(8);
    buf[..n].copy_from_slice(&bytes[..n]);
    Ok(u64::from_le_bytes(buf))
}

// ---------------------------------------------------------------------------
// VarInt
// ---------------------------------------------------------------------------

/// A Bitcoin protocol variable-length integer.
///
/// VarInt is used in transaction data to indicate the number of upcoming
/// fields or the length of an upcoming field. The encoding uses 1, 3, 5, or
/// 9 bytes depending on the magnitude of the value:
///
/// | Range                  | Encoding              |
/// |------------------------|-----------------------|
/// | `< 0xfd`               | value as 1 byte       |
/// | `<= 0xffff`            | `0xfd` + 2 bytes LE   |
/// | `<= 0xffffffff`        | `0xfe` + 4 bytes LE   |
/// | otherwise              | `0xff` + 8 bytes LE   |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarInt(pub u64);

impl VarInt {
    /// Decode a VarInt from a byte slice.
    ///
    /// # Arguments
    /// * `data` - Byte slice starting with a VarInt encoding.
    ///
    /// # Returns
    /// A tuple of `(VarInt, bytes_consumed)`, or `UnexpectedEof` if `data`
    /// is truncated.
    pub fn from_bytes(data: &[u8]) -> Result<(Self, usize), PrimitivesError> {
        let first = *data.first().ok_or(PrimitivesError::UnexpectedEof)?;
        match first {
            0xff => {
                if data.len() < 9 {
                    return Err(PrimitivesError::UnexpectedEof);
                }
                let mut buf = [0u8; 8];
                buf.copy_from_slice(&data[1..9]);
                Ok((VarInt(u64::from_le_bytes(buf)), 9))
            }
            0xfe => {
                if data.len() < 5 {
                    return Err(PrimitivesError::UnexpectedEof);
                }
                let val = u32::from_le_bytes([data[1], data[2], data[3], data[4]]) as u64;
                Ok((VarInt(val), 5))
            }
            0xfd => {
                if data.len() < 3 {
                    return Err(PrimitivesError::UnexpectedEof);
                }
                let val = u16::from_le_bytes([data[1], data[2]]) as u64;
                Ok((VarInt(val), 3))
            }
            b => Ok((VarInt(b as u64), 1)),
        }
    }

    /// Return the wire-format byte length of this VarInt.
    ///
    /// # Returns
    /// 1, 3, 5, or 9 depending on the value.
    pub fn length(&self) -> usize {
        if self.0 < 0xfd {
            1
        } else if self.0 <= 0xffff {
            3
        } else if self.0 <= 0xffff_ffff {
            5
        } else {
            9
        }
    }

    /// Encode the VarInt into a new byte vector.
    ///
    /// # Returns
    /// A `Vec<u8>` of 1, 3, 5, or 9 bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let v = self.0;
        let mut out = Vec::with_capacity(self.length());
        if v < 0xfd {
            out.push(v as u8);
        } else if v <= 0xffff {
            out.push(0xfd);
            out.extend_from_slice(&(v as u16).to_le_bytes());
        } else if v <= 0xffff_ffff {
            out.push(0xfe);
            out.extend_from_slice(&(v as u32).to_le_bytes());
        } else {
            out.push(0xff);
            out.extend_from_slice(&v.to_le_bytes());
        }
        out
    }

    /// Return the underlying u64 value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for VarInt {
    fn from(v: u64) -> Self {
        VarInt(v)
    }
}

impl From<usize> for VarInt {
    fn from(v: usize) -> Self {
        VarInt(v as u64)
    }
}

// ---------------------------------------------------------------------------
// WireReader
// ---------------------------------------------------------------------------

/// A cursor-based reader for Bitcoin protocol binary data.
///
/// Wraps a byte slice and maintains a read position, providing methods
/// to read fixed-size integers and VarInt values in little-endian order.
pub struct WireReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    /// Create a new reader positioned at the start of the given slice.
    pub fn new(data: &'a [u8]) -> Self {
        WireReader { data, pos: 0 }
    }

    /// Read `n` bytes and advance the position.
    ///
    /// # Returns
    /// A byte slice of length `n`, or `UnexpectedEof` if insufficient data
    /// remains.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], PrimitivesError> {
        // pos <= len always holds, so the subtraction cannot underflow and
        // the comparison cannot overflow on hostile length fields.
        if n > self.data.len() - self.pos {
            return Err(PrimitivesError::UnexpectedEof);
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read a single byte and advance the position.
    pub fn read_u8(&mut self) -> Result<u8, PrimitivesError> {
        let bytes = self.read_bytes(1)?;
        Ok(bytes[0])
    }

    /// Read a little-endian u16 and advance the position by 2 bytes.
    pub fn read_u16_le(&mut self) -> Result<u16, PrimitivesError> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Read a little-endian u32 and advance the position by 4 bytes.
    pub fn read_u32_le(&mut self) -> Result<u32, PrimitivesError> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a little-endian u64 and advance the position by 8 bytes.
    pub fn read_u64_le(&mut self) -> Result<u64, PrimitivesError> {
        let bytes = self.read_bytes(8)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(buf))
    }

    /// Read a VarInt and advance the position accordingly.
    pub fn read_varint(&mut self) -> Result<VarInt, PrimitivesError> {
        let first = self.read_u8()?;
        match first {
            0xff => Ok(VarInt(self.read_u64_le()?)),
            0xfe => Ok(VarInt(self.read_u32_le()? as u64)),
            0xfd => Ok(VarInt(self.read_u16_le()? as u64)),
            b => Ok(VarInt(b as u64)),
        }
    }

    /// Peek at the next byte without advancing the position.
    ///
    /// # Returns
    /// The next byte, or `UnexpectedEof` if no data remains.
    pub fn peek_u8(&self) -> Result<u8, PrimitivesError> {
        self.data
            .get(self.pos)
            .copied()
            .ok_or(PrimitivesError::UnexpectedEof)
    }

    /// Return the number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

// ---------------------------------------------------------------------------
// WireWriter
// ---------------------------------------------------------------------------

/// A buffer-based writer for Bitcoin protocol binary data.
///
/// Wraps a `Vec<u8>` and provides methods to append fixed-size integers
/// and VarInt values in little-endian order.
pub struct WireWriter {
    buf: Vec<u8>,
}

impl WireWriter {
    /// Create a new empty writer.
    pub fn new() -> Self {
        WireWriter { buf: Vec::new() }
    }

    /// Create a new writer with a pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        WireWriter {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Append raw bytes to the buffer.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append a single byte to the buffer.
    pub fn write_u8(&mut self, val: u8) {
        self.buf.push(val);
    }

    /// Append a little-endian u16 (2 bytes) to the buffer.
    pub fn write_u16_le(&mut self, val: u16) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a little-endian u32 (4 bytes) to the buffer.
    pub fn write_u32_le(&mut self, val: u32) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a little-endian u64 (8 bytes) to the buffer.
    pub fn write_u64_le(&mut self, val: u64) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a VarInt to the buffer.
    pub fn write_varint(&mut self, varint: VarInt) {
        self.buf.extend_from_slice(&varint.to_bytes());
    }

    /// Consume the writer and return the accumulated bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Return a reference to the current buffer contents.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Return the current length of the buffer.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl Default for WireWriter {
    fn default() -> Self {
        Self::new()
    }
}
