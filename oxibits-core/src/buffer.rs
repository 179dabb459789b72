//! The growable, bit-addressable buffer.
//!
//! A [`BitBuffer`] owns a byte vector and a cursor pair marking which bits of
//! that storage are active. Data is appended at the end cursor and consumed
//! or hidden at the begin cursor. Bits hidden with [`BitBuffer::advance`]
//! keep their storage until [`BitBuffer::recalibrate`] or
//! [`BitBuffer::reset`], so [`BitBuffer::rewind`] can bring them back.
//!
//! # Bit Ordering
//!
//! Bytes are split LSB-first: the first bit appended from a byte is its
//! least significant bit, and multi-bit reads reassemble values the same way.
//!
//! ```
//! use oxibits_core::BitBuffer;
//!
//! let mut buf = BitBuffer::new();
//! buf.write_byte(0x0F);
//! assert_eq!(buf.bits(), 8);
//! assert_eq!(buf.to_string(), "11110000");
//! assert_eq!(buf.read_byte(0).unwrap(), 0x0F);
//! ```

use crate::config::BitBufferConfig;
use crate::cursor::{BitCursor, bytes_for, decode_end, encode_end, low_mask};
use crate::error::{BitBufferError, Result};

/// Largest value handled by a single multi-bit peek, poke or read.
pub const MAX_BITS_PER_CALL: u8 = 32;

/// A growable buffer addressed at single-bit granularity.
#[derive(Clone)]
pub struct BitBuffer {
    /// Backing bytes, possibly longer than the active window.
    pub(crate) storage: Vec<u8>,
    /// Byte holding the first active bit.
    pub(crate) begin_byte: usize,
    /// Offset of the first active bit within `begin_byte` (0-7).
    pub(crate) begin_bit: u8,
    /// One past the byte holding the last active bit.
    pub(crate) end_byte: usize,
    /// Bits in use in byte `end_byte - 1` (1-8, 0 when nothing was written).
    pub(crate) end_bit_count: u8,
    /// Earliest begin position reachable by `rewind`.
    pub(crate) rewind: BitCursor,
    pub(crate) config: BitBufferConfig,
}

impl BitBuffer {
    /// Create an empty buffer. No storage is allocated.
    pub fn new() -> Self {
        Self::from_config(BitBufferConfig::DEFAULT)
    }

    /// Create an empty buffer with a custom configuration.
    pub fn with_config(config: BitBufferConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: BitBufferConfig) -> Self {
        Self {
            storage: Vec::with_capacity(config.initial_capacity),
            begin_byte: 0,
            begin_bit: 0,
            end_byte: 0,
            end_bit_count: 0,
            rewind: BitCursor::ORIGIN,
            config,
        }
    }

    /// An empty buffer sharing this buffer's configuration.
    pub(crate) fn empty_like(&self) -> Self {
        Self::from_config(self.config)
    }

    /// Get the buffer configuration.
    pub fn config(&self) -> &BitBufferConfig {
        &self.config
    }

    /// Number of active bits.
    pub fn bits(&self) -> usize {
        self.end_index() - self.begin_index()
    }

    /// Check if there are no active bits.
    pub fn is_empty(&self) -> bool {
        self.bits() == 0
    }

    /// Number of bits currently hidden by `advance` and recoverable by `rewind`.
    pub fn offset(&self) -> usize {
        self.begin_index() - self.rewind.bit_index()
    }

    /// Number of storage bytes held, including inert history and tail bytes.
    pub fn storage_len(&self) -> usize {
        self.storage.len()
    }

    /// Position of the first active bit in storage.
    pub fn begin_cursor(&self) -> BitCursor {
        BitCursor {
            byte: self.begin_byte,
            bit: self.begin_bit,
        }
    }

    /// End of the active window as `(end_byte, end_bit_count)`.
    pub fn end_cursor(&self) -> (usize, u8) {
        (self.end_byte, self.end_bit_count)
    }

    /// Earliest position `rewind` can restore.
    pub fn rewind_boundary(&self) -> BitCursor {
        self.rewind
    }

    // ------------------------------------------------------------------
    // Cursor arithmetic
    // ------------------------------------------------------------------

    #[inline]
    pub(crate) fn begin_index(&self) -> usize {
        self.begin_cursor().bit_index()
    }

    #[inline]
    pub(crate) fn end_index(&self) -> usize {
        decode_end(self.end_byte, self.end_bit_count)
    }

    #[inline]
    pub(crate) fn set_begin(&mut self, index: usize) {
        debug_assert!(index <= self.end_index());
        let cursor = BitCursor::from_bit_index(index);
        self.begin_byte = cursor.byte;
        self.begin_bit = cursor.bit;
    }

    #[inline]
    pub(crate) fn set_end(&mut self, index: usize) {
        debug_assert!(index >= self.begin_index());
        let (byte, count) = encode_end(index);
        self.end_byte = byte;
        self.end_bit_count = count;
    }

    /// Return to the canonical empty state, dropping storage and history.
    pub(crate) fn clear_state(&mut self) {
        self.storage = Vec::new();
        self.begin_byte = 0;
        self.begin_bit = 0;
        self.end_byte = 0;
        self.end_bit_count = 0;
        self.rewind = BitCursor::ORIGIN;
    }

    /// Validate a single-bit position inside the active window.
    #[inline]
    pub(crate) fn check_index(&self, index: usize) -> Result<()> {
        let len = self.bits();
        if index >= len {
            return Err(BitBufferError::invalid_index(index, len));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Raw storage access (absolute bit indices)
    // ------------------------------------------------------------------

    /// Make sure storage covers every bit below `end`.
    #[inline]
    fn reserve_bits(&mut self, end: usize) {
        let needed = bytes_for(end);
        if self.storage.len() < needed {
            self.storage.resize(needed, 0);
        }
    }

    #[inline]
    pub(crate) fn get_abs(&self, index: usize) -> bool {
        let cursor = BitCursor::from_bit_index(index);
        self.storage[cursor.byte] & cursor.mask() != 0
    }

    #[inline]
    pub(crate) fn set_abs(&mut self, index: usize, value: bool) {
        let cursor = BitCursor::from_bit_index(index);
        let byte = &mut self.storage[cursor.byte];
        if value {
            *byte |= cursor.mask();
        } else {
            *byte &= !cursor.mask();
        }
    }

    /// Read `count` (0-32) bits starting at an absolute index, LSB-first.
    pub(crate) fn load(&self, index: usize, count: u8) -> u32 {
        debug_assert!(count <= MAX_BITS_PER_CALL);

        let mut value = 0u32;
        let mut filled = 0u8;
        let mut cursor = BitCursor::from_bit_index(index);

        while filled < count {
            let take = (8 - cursor.bit).min(count - filled);
            let chunk = u32::from(self.storage[cursor.byte] >> cursor.bit) & low_mask(take);
            value |= chunk << filled;
            filled += take;
            cursor = BitCursor {
                byte: cursor.byte + 1,
                bit: 0,
            };
        }

        value
    }

    /// Overwrite `count` (0-32) bits starting at an absolute index.
    pub(crate) fn store(&mut self, index: usize, value: u32, count: u8) {
        debug_assert!(count <= MAX_BITS_PER_CALL);

        let mut written = 0u8;
        let mut cursor = BitCursor::from_bit_index(index);

        while written < count {
            let take = (8 - cursor.bit).min(count - written);
            let mask = (low_mask(take) as u8) << cursor.bit;
            let bits = (((value >> written) & low_mask(take)) as u8) << cursor.bit;
            let byte = &mut self.storage[cursor.byte];
            *byte = (*byte & !mask) | bits;
            written += take;
            cursor = BitCursor {
                byte: cursor.byte + 1,
                bit: 0,
            };
        }
    }

    /// Move `len` bits from absolute index `src` to `dst`.
    ///
    /// Overlapping ranges are handled in either direction.
    pub(crate) fn move_bits(&mut self, src: usize, dst: usize, len: usize) {
        if src == dst || len == 0 {
            return;
        }

        let step = MAX_BITS_PER_CALL as usize;
        if dst < src {
            let mut done = 0;
            while done < len {
                let count = (len - done).min(step) as u8;
                let value = self.load(src + done, count);
                self.store(dst + done, value, count);
                done += count as usize;
            }
        } else {
            let mut remaining = len;
            while remaining > 0 {
                let count = remaining.min(step) as u8;
                remaining -= count as usize;
                let value = self.load(src + remaining, count);
                self.store(dst + remaining, value, count);
            }
        }
    }

    /// Set `len` bits from absolute index `start` to `value`.
    pub(crate) fn fill(&mut self, start: usize, len: usize, value: bool) {
        let pattern = if value { u32::MAX } else { 0 };
        let step = MAX_BITS_PER_CALL as usize;
        let mut done = 0;
        while done < len {
            let count = (len - done).min(step) as u8;
            self.store(start + done, pattern, count);
            done += count as usize;
        }
    }

    /// Append `count` (0-32) bits of `value`, LSB-first.
    pub(crate) fn append_bits(&mut self, value: u32, count: u8) {
        let end = self.end_index();
        self.reserve_bits(end + count as usize);
        self.store(end, value, count);
        self.set_end(end + count as usize);
    }

    /// Append `len` active bits of `source` starting at window offset `from`.
    pub(crate) fn append_from(&mut self, source: &BitBuffer, from: usize, len: usize) {
        let base = source.begin_index() + from;
        self.reserve_bits(self.end_index() + len);

        let step = MAX_BITS_PER_CALL as usize;
        let mut done = 0;
        while done < len {
            let count = (len - done).min(step) as u8;
            self.append_bits(source.load(base + done, count), count);
            done += count as usize;
        }
    }

    // ------------------------------------------------------------------
    // Appending
    // ------------------------------------------------------------------

    /// Append a single bit.
    pub fn write_bit(&mut self, bit: bool) {
        let end = self.end_index();
        self.reserve_bits(end + 1);
        self.set_abs(end, bit);
        self.set_end(end + 1);
    }

    /// Append the 8 bits of `byte`, least significant bit first.
    pub fn write_byte(&mut self, byte: u8) {
        self.append_bits(u32::from(byte), 8);
    }

    /// Append each byte of `bytes` in order. Returns the number of bytes written.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> usize {
        if bytes.is_empty() {
            return 0;
        }

        let end = self.end_index();
        if end % 8 == 0 {
            // Byte-aligned tail: copy straight into storage.
            let start = end / 8;
            self.storage.truncate(start);
            self.storage.extend_from_slice(bytes);
            self.set_end(end + bytes.len() * 8);
        } else {
            self.reserve_bits(end + bytes.len() * 8);
            for &byte in bytes {
                self.append_bits(u32::from(byte), 8);
            }
        }

        bytes.len()
    }

    /// Append the UTF-8 bytes of `s`. Returns the number of bytes written.
    pub fn write_str(&mut self, s: &str) -> usize {
        self.write_bytes(s.as_bytes())
    }

    /// Append the low `count` bits of `value`, least significant bit first.
    ///
    /// # Arguments
    ///
    /// * `value` - The bits to write (LSB-first)
    /// * `count` - Number of bits to write (0-32)
    pub fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        check_count(count)?;
        self.append_bits(value, count);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Peeking
    // ------------------------------------------------------------------

    /// Value of the active bit at `index`; `false` when out of range.
    pub fn bit(&self, index: usize) -> bool {
        if index >= self.bits() {
            return false;
        }
        self.get_abs(self.begin_index() + index)
    }

    /// Peek at `count` bits starting at active offset `index`.
    ///
    /// # Returns
    ///
    /// The bits as a u32, with the bit at `index` in the LSB position.
    pub fn peek_bits(&self, index: usize, count: u8) -> Result<u32> {
        check_count(count)?;
        let len = self.bits();
        match index.checked_add(count as usize) {
            Some(end) if end <= len => Ok(self.load(self.begin_index() + index, count)),
            _ => Err(BitBufferError::invalid_index(index, len)),
        }
    }

    /// Read 8 bits starting at active offset `index` without consuming them.
    pub fn read_byte(&self, index: usize) -> Result<u8> {
        Ok(self.peek_bits(index, 8)? as u8)
    }

    /// Read 32 bits starting at active offset `index` without consuming them.
    pub fn read_int(&self, index: usize) -> Result<u32> {
        self.peek_bits(index, 32)
    }

    // ------------------------------------------------------------------
    // Consuming
    // ------------------------------------------------------------------

    /// Copy the first `count` whole bytes of the window without consuming them.
    pub(crate) fn peek_front_bytes(&self, count: usize) -> Vec<u8> {
        let begin = self.begin_index();
        (0..count)
            .map(|i| self.load(begin + i * 8, 8) as u8)
            .collect()
    }

    /// Drop `count` bits from the front for good.
    pub(crate) fn consume(&mut self, count: usize) {
        let begin = self.begin_index() + count;
        self.set_begin(begin);
        if self.is_empty() {
            self.clear_state();
        } else {
            self.rewind = self.begin_cursor();
        }
    }

    /// Remove whole bytes from the front into `dest`.
    ///
    /// Copies `min(dest.len(), bits() / 8)` bytes. Trailing bits that do not
    /// complete a byte stay active.
    ///
    /// # Errors
    ///
    /// Returns [`BitBufferError::Exhausted`] if the buffer has no active bits.
    pub fn read_bytes(&mut self, dest: &mut [u8]) -> Result<usize> {
        if self.is_empty() {
            return Err(BitBufferError::Exhausted);
        }

        let count = dest.len().min(self.bits() / 8);
        let begin = self.begin_index();
        for (i, slot) in dest.iter_mut().take(count).enumerate() {
            *slot = self.load(begin + i * 8, 8) as u8;
        }

        if count > 0 {
            self.consume(count * 8);
        }
        Ok(count)
    }

    /// Remove `count` (0-32) bits from the front and return them LSB-first.
    pub fn read_bits(&mut self, count: u8) -> Result<u32> {
        check_count(count)?;
        if count == 0 {
            return Ok(0);
        }
        if self.bits() < count as usize {
            return Err(BitBufferError::Exhausted);
        }

        let value = self.load(self.begin_index(), count);
        self.consume(count as usize);
        Ok(value)
    }

    // ------------------------------------------------------------------
    // Windowing
    // ------------------------------------------------------------------

    /// Hide up to `count` bits at the front. Returns the number hidden.
    pub fn advance(&mut self, count: usize) -> usize {
        let applied = count.min(self.bits());
        self.set_begin(self.begin_index() + applied);
        applied
    }

    /// Restore up to `count` previously hidden bits. Returns the number restored.
    pub fn rewind(&mut self, count: usize) -> usize {
        let applied = count.min(self.offset());
        self.set_begin(self.begin_index() - applied);
        applied
    }

    /// Forget everything hidden before the begin cursor.
    ///
    /// The rewind boundary moves to the current begin cursor. With
    /// compaction enabled, storage before the begin byte and past the end
    /// byte is released.
    pub fn recalibrate(&mut self) {
        if self.is_empty() {
            if !self.storage.is_empty() {
                tracing::trace!(released = self.storage.len(), "recalibrated to empty");
            }
            self.clear_state();
            return;
        }

        if self.config.compact_on_recalibrate {
            let drained = self.begin_byte;
            self.storage.truncate(self.end_byte);
            if drained > 0 {
                self.storage.drain(..drained);
                self.begin_byte = 0;
                self.end_byte -= drained;
                tracing::trace!(drained, remaining = self.storage.len(), "compacted storage");
            }
        }

        self.rewind = self.begin_cursor();
    }

    /// Clear the buffer, discarding all storage and history.
    pub fn reset(&mut self) {
        tracing::trace!(
            bits = self.bits(),
            storage = self.storage.len(),
            "reset bit buffer"
        );
        self.clear_state();
    }

    // ------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------

    /// Copy the active window out as bytes, LSB-first.
    ///
    /// A trailing partial byte is zero-padded in the returned vector only;
    /// the buffer is not modified.
    pub fn to_bytes(&self) -> Vec<u8> {
        let len = self.bits();
        let begin = self.begin_index();

        if begin % 8 == 0 {
            let start = begin / 8;
            let mut out = self.storage[start..start + bytes_for(len)].to_vec();
            let tail = (len % 8) as u8;
            if tail != 0 {
                if let Some(last) = out.last_mut() {
                    *last &= low_mask(tail) as u8;
                }
            }
            return out;
        }

        let mut out = Vec::with_capacity(bytes_for(len));
        let mut done = 0;
        while done < len {
            let count = (len - done).min(8) as u8;
            out.push(self.load(begin + done, count) as u8);
            done += count as usize;
        }
        out
    }

    /// Iterate over the active bits, front to back.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            buffer: self,
            front: self.begin_index(),
            back: self.end_index(),
        }
    }
}

fn check_count(count: u8) -> Result<()> {
    if count > MAX_BITS_PER_CALL {
        return Err(BitBufferError::invalid_argument(format!(
            "bit count {} exceeds {}",
            count, MAX_BITS_PER_CALL
        )));
    }
    Ok(())
}

impl Default for BitBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for BitBuffer {
    fn eq(&self, other: &Self) -> bool {
        let len = self.bits();
        if len != other.bits() {
            return false;
        }

        let (a, b) = (self.begin_index(), other.begin_index());
        let step = MAX_BITS_PER_CALL as usize;
        let mut done = 0;
        while done < len {
            let count = (len - done).min(step) as u8;
            if self.load(a + done, count) != other.load(b + done, count) {
                return false;
            }
            done += count as usize;
        }
        true
    }
}

impl Eq for BitBuffer {}

impl From<&[u8]> for BitBuffer {
    fn from(bytes: &[u8]) -> Self {
        let mut buffer = Self::new();
        buffer.write_bytes(bytes);
        buffer
    }
}

impl From<Vec<u8>> for BitBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        let bits = bytes.len() * 8;
        let mut buffer = Self::new();
        buffer.storage = bytes;
        buffer.set_end(bits);
        buffer
    }
}

impl FromIterator<bool> for BitBuffer {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut buffer = Self::new();
        buffer.extend(iter);
        buffer
    }
}

impl Extend<bool> for BitBuffer {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        for bit in iter {
            self.write_bit(bit);
        }
    }
}

impl Extend<u8> for BitBuffer {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        for byte in iter {
            self.write_byte(byte);
        }
    }
}

/// Iterator over the active bits of a [`BitBuffer`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    buffer: &'a BitBuffer,
    front: usize,
    back: usize,
}

impl Iterator for Iter<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.front >= self.back {
            return None;
        }
        let bit = self.buffer.get_abs(self.front);
        self.front += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<bool> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.buffer.get_abs(self.back))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a BitBuffer {
    type Item = bool;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
