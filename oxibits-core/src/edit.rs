//! In-place edits, removal, copying and joining.

use crate::buffer::{BitBuffer, MAX_BITS_PER_CALL};
use crate::error::{BitBufferError, Result};

impl BitBuffer {
    /// Overwrite the active bit at `index`.
    pub fn set_bit(&mut self, index: usize, value: bool) -> Result<()> {
        self.check_index(index)?;
        self.set_abs(self.begin_index() + index, value);
        Ok(())
    }

    /// Overwrite bits starting at active offset `index` with `bytes`, LSB-first.
    ///
    /// Bits that would land past the end of the active window are dropped.
    ///
    /// # Returns
    ///
    /// The number of bits actually written.
    pub fn set_bytes(&mut self, index: usize, bytes: &[u8]) -> Result<usize> {
        self.check_index(index)?;

        let count = (bytes.len() * 8).min(self.bits() - index);
        let base = self.begin_index() + index;
        for (i, &byte) in bytes.iter().enumerate() {
            let offset = i * 8;
            if offset >= count {
                break;
            }
            let width = (count - offset).min(8) as u8;
            self.store(base + offset, u32::from(byte), width);
        }

        Ok(count)
    }

    /// Delete the active bit at `index`, shifting later bits down by one.
    pub fn remove_bit(&mut self, index: usize) -> Result<()> {
        self.remove_bits(index, 1).map(|_| ())
    }

    /// Delete up to `count` bits starting at `index`.
    ///
    /// Later bits move down to close the gap. A count reaching past the end
    /// is clamped; removing every active bit leaves the buffer empty with no
    /// rewind history.
    ///
    /// # Returns
    ///
    /// The number of bits removed.
    pub fn remove_bits(&mut self, index: usize, count: usize) -> Result<usize> {
        self.check_index(index)?;

        let len = self.bits();
        let removed = count.min(len - index);
        if removed == 0 {
            return Ok(0);
        }

        let start = self.begin_index() + index;
        let tail = len - index - removed;
        self.move_bits(start + removed, start, tail);
        self.set_end(self.end_index() - removed);

        if self.is_empty() {
            self.clear_state();
        }
        Ok(removed)
    }

    /// Deep copy of the first `min(count, bits())` active bits.
    ///
    /// The copy shares no storage or history with `self`.
    pub fn copy(&self, count: usize) -> BitBuffer {
        let mut out = self.empty_like();
        out.append_from(self, 0, count.min(self.bits()));
        out
    }

    /// Move all of `other`'s active bits onto the end of `self`.
    ///
    /// `other` is reset afterwards. Borrow rules keep a buffer from being
    /// joined to itself:
    ///
    /// ```compile_fail
    /// use oxibits_core::BitBuffer;
    ///
    /// let mut buf = BitBuffer::new();
    /// buf.join(&mut buf);
    /// ```
    ///
    /// # Returns
    ///
    /// The number of bits appended.
    pub fn join(&mut self, other: &mut BitBuffer) -> usize {
        let len = other.bits();
        self.append_from(other, 0, len);
        other.reset();
        len
    }

    /// Append `count` copies of the active window.
    ///
    /// # Errors
    ///
    /// Returns [`BitBufferError::InvalidArgument`] if the result would not
    /// fit in addressable memory.
    pub fn repeat(&mut self, count: usize) -> Result<()> {
        let len = self.bits();
        if len == 0 || count == 0 {
            return Ok(());
        }

        let total = len
            .checked_mul(count.saturating_add(1))
            .and_then(|bits| bits.checked_add(self.begin_index()))
            .ok_or_else(|| BitBufferError::invalid_argument("repeat count overflows"))?;
        if total / 8 >= isize::MAX as usize {
            return Err(BitBufferError::invalid_argument("repeat count overflows"));
        }

        let source = self.copy(len);
        let step = MAX_BITS_PER_CALL as usize;
        for _ in 0..count {
            let mut done = 0;
            while done < len {
                let width = (len - done).min(step) as u8;
                self.append_bits(source.load(done, width), width);
                done += width as usize;
            }
        }
        Ok(())
    }
}
