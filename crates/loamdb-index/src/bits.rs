//! Module: bits
//! Responsibility: MSB-first bit-level writing and reading for the key codec.
//! Does not own: tag assignment, payload layout, or key framing.
//! Boundary: the only place that touches sub-byte positions; payloads are
//! always read and written on byte boundaries.

use thiserror::Error as ThisError;

///
/// BitIoError
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum BitIoError {
    #[error("unexpected end of input at byte {offset}: wanted {wanted} more bytes")]
    UnexpectedEnd { offset: usize, wanted: usize },
}

///
/// BitWriter
///
/// Append-only bit sink. Bits fill each byte from the most significant bit
/// down; `align` zero-fills the rest of a partial byte. Byte payloads must be
/// written on a byte boundary.
///

#[derive(Clone, Debug, Default)]
pub struct BitWriter {
    buf: Vec<u8>,
    bit_len: usize,
}

impl BitWriter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            bit_len: 0,
        }
    }

    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            buf: Vec::with_capacity(bytes),
            bit_len: 0,
        }
    }

    /// Bytes written so far, counting a trailing partial byte.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.buf.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[must_use]
    pub const fn is_aligned(&self) -> bool {
        self.bit_len % 8 == 0
    }

    pub fn write_bit(&mut self, bit: bool) {
        let slot = self.bit_len % 8;
        if slot == 0 {
            self.buf.push(0);
        }
        if bit && let Some(last) = self.buf.last_mut() {
            *last |= 0x80 >> slot;
        }
        self.bit_len += 1;
    }

    /// Write the low `count` bits of `value`, most significant first.
    pub fn write_bits(&mut self, value: u8, count: usize) {
        debug_assert!(count <= 8, "bit group wider than one byte");
        debug_assert!(
            count == 8 || value < (1 << count),
            "value does not fit in {count} bits"
        );
        for shift in (0..count).rev() {
            self.write_bit(value >> shift & 1 != 0);
        }
    }

    /// Zero-fill up to the next byte boundary.
    pub const fn align(&mut self) {
        self.bit_len = self.bit_len.next_multiple_of(8);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        debug_assert!(self.is_aligned(), "byte payload written off a boundary");
        self.buf.extend_from_slice(bytes);
        self.bit_len += bytes.len() * 8;
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

///
/// BitReader
///
/// Borrowing cursor over encoded bytes. Byte reads hand back slices of the
/// input, so aligned payloads decode without copying.
///

#[derive(Clone, Copy, Debug)]
pub struct BitReader<'a> {
    buf: &'a [u8],
    bit_pos: usize,
}

impl<'a> BitReader<'a> {
    #[must_use]
    pub const fn new(buf: &'a [u8]) -> Self {
        Self { buf, bit_pos: 0 }
    }

    /// Start reading at `byte_offset`, for buffers holding several records.
    #[must_use]
    pub const fn starting_at(buf: &'a [u8], byte_offset: usize) -> Self {
        Self {
            buf,
            bit_pos: byte_offset * 8,
        }
    }

    /// Current byte offset. Meaningful on a byte boundary or for error
    /// reporting; a partial byte counts as consumed.
    #[must_use]
    pub const fn byte_pos(&self) -> usize {
        self.bit_pos.div_ceil(8)
    }

    /// Byte holding the next unread bit.
    #[must_use]
    pub const fn current_byte(&self) -> usize {
        self.bit_pos / 8
    }

    #[must_use]
    pub const fn is_aligned(&self) -> bool {
        self.bit_pos % 8 == 0
    }

    #[must_use]
    pub const fn remaining_bytes(&self) -> usize {
        self.buf.len().saturating_sub(self.byte_pos())
    }

    pub fn read_bit(&mut self) -> Result<bool, BitIoError> {
        let byte = self.bit_pos / 8;
        if byte >= self.buf.len() {
            return Err(BitIoError::UnexpectedEnd {
                offset: byte,
                wanted: 1,
            });
        }
        let bit = self.buf[byte] & (0x80 >> (self.bit_pos % 8)) != 0;
        self.bit_pos += 1;

        Ok(bit)
    }

    /// Read `count` bits, most significant first, into the low bits of a byte.
    pub fn read_bits(&mut self, count: usize) -> Result<u8, BitIoError> {
        debug_assert!(count <= 8, "bit group wider than one byte");
        let mut value = 0u8;
        for _ in 0..count {
            value = (value << 1) | u8::from(self.read_bit()?);
        }

        Ok(value)
    }

    /// Skip forward to the next byte boundary.
    pub const fn align(&mut self) {
        self.bit_pos = self.bit_pos.next_multiple_of(8);
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], BitIoError> {
        debug_assert!(self.is_aligned(), "byte payload read off a boundary");
        let start = self.bit_pos / 8;
        let end = start
            .checked_add(len)
            .ok_or(BitIoError::UnexpectedEnd {
                offset: start,
                wanted: len,
            })?;
        if end > self.buf.len() {
            return Err(BitIoError::UnexpectedEnd {
                offset: start,
                wanted: end - self.buf.len(),
            });
        }
        self.bit_pos = end * 8;

        Ok(&self.buf[start..end])
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], BitIoError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);

        Ok(out)
    }

    /// Skip `len` payload bytes without touching them.
    pub fn skip_bytes(&mut self, len: usize) -> Result<(), BitIoError> {
        self.read_bytes(len).map(|_| ())
    }
}

///
/// TESTS
///
