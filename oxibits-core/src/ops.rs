//! Bitwise combination and shifting of the active window.
//!
//! Binary operations combine the overlapping prefix of two operands: the
//! first `min(left, right)` bits are updated and everything past the shorter
//! operand is left as it was. Bits hidden by `advance` are never touched.

use crate::buffer::{BitBuffer, MAX_BITS_PER_CALL};
use crate::error::Result;

/// A binary boolean operator applied bit by bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitOp {
    /// Logical AND.
    And,
    /// Logical OR.
    Or,
    /// Logical XOR.
    Xor,
}

impl BitOp {
    /// Apply the operator to every bit of two words.
    #[inline]
    pub fn apply(self, left: u32, right: u32) -> u32 {
        match self {
            BitOp::And => left & right,
            BitOp::Or => left | right,
            BitOp::Xor => left ^ right,
        }
    }

    #[inline]
    fn apply_bit(self, left: bool, right: bool) -> bool {
        match self {
            BitOp::And => left & right,
            BitOp::Or => left | right,
            BitOp::Xor => left ^ right,
        }
    }
}

impl BitBuffer {
    /// Combine the bit at `index` with `value` in place.
    pub fn apply_bit(&mut self, op: BitOp, index: usize, value: bool) -> Result<()> {
        self.check_index(index)?;
        let abs = self.begin_index() + index;
        let current = self.get_abs(abs);
        self.set_abs(abs, op.apply_bit(current, value));
        Ok(())
    }

    /// Combine the front of the window with `bytes`, LSB-first.
    ///
    /// # Returns
    ///
    /// The number of bits combined.
    pub fn apply_bytes(&mut self, op: BitOp, bytes: &[u8]) -> usize {
        let count = (bytes.len() * 8).min(self.bits());
        let base = self.begin_index();

        for (i, &byte) in bytes.iter().enumerate() {
            let offset = i * 8;
            if offset >= count {
                break;
            }
            let width = (count - offset).min(8) as u8;
            let current = self.load(base + offset, width);
            self.store(base + offset, op.apply(current, u32::from(byte)), width);
        }

        count
    }

    /// Combine the front of the window with the active bits of `other`.
    ///
    /// # Returns
    ///
    /// The number of bits combined.
    pub fn apply_buffer(&mut self, op: BitOp, other: &BitBuffer) -> usize {
        let count = self.bits().min(other.bits());
        let (base, other_base) = (self.begin_index(), other.begin_index());

        let step = MAX_BITS_PER_CALL as usize;
        let mut done = 0;
        while done < count {
            let width = (count - done).min(step) as u8;
            let current = self.load(base + done, width);
            let right = other.load(other_base + done, width);
            self.store(base + done, op.apply(current, right), width);
            done += width as usize;
        }

        count
    }

    /// AND the bit at `index` with `value`.
    pub fn and_bit(&mut self, index: usize, value: bool) -> Result<()> {
        self.apply_bit(BitOp::And, index, value)
    }

    /// OR the bit at `index` with `value`.
    pub fn or_bit(&mut self, index: usize, value: bool) -> Result<()> {
        self.apply_bit(BitOp::Or, index, value)
    }

    /// XOR the bit at `index` with `value`.
    pub fn xor_bit(&mut self, index: usize, value: bool) -> Result<()> {
        self.apply_bit(BitOp::Xor, index, value)
    }

    /// Flip the bit at `index`.
    pub fn not_bit(&mut self, index: usize) -> Result<()> {
        self.apply_bit(BitOp::Xor, index, true)
    }

    /// Flip the first `min(count, bits())` bits. Returns the number flipped.
    pub fn not_bits(&mut self, count: usize) -> usize {
        let count = count.min(self.bits());
        let base = self.begin_index();

        let step = MAX_BITS_PER_CALL as usize;
        let mut done = 0;
        while done < count {
            let width = (count - done).min(step) as u8;
            let current = self.load(base + done, width);
            self.store(base + done, !current, width);
            done += width as usize;
        }

        count
    }

    /// AND the front of the window with `bytes`.
    pub fn and_bytes(&mut self, bytes: &[u8]) -> usize {
        self.apply_bytes(BitOp::And, bytes)
    }

    /// OR the front of the window with `bytes`.
    pub fn or_bytes(&mut self, bytes: &[u8]) -> usize {
        self.apply_bytes(BitOp::Or, bytes)
    }

    /// XOR the front of the window with `bytes`.
    pub fn xor_bytes(&mut self, bytes: &[u8]) -> usize {
        self.apply_bytes(BitOp::Xor, bytes)
    }

    /// AND the front of the window with `other`'s active bits.
    pub fn and_buffer(&mut self, other: &BitBuffer) -> usize {
        self.apply_buffer(BitOp::And, other)
    }

    /// OR the front of the window with `other`'s active bits.
    pub fn or_buffer(&mut self, other: &BitBuffer) -> usize {
        self.apply_buffer(BitOp::Or, other)
    }

    /// XOR the front of the window with `other`'s active bits.
    pub fn xor_buffer(&mut self, other: &BitBuffer) -> usize {
        self.apply_buffer(BitOp::Xor, other)
    }

    /// Shift every active bit `count` positions toward the end of the window.
    ///
    /// This is `<<` on the LSB-first value: bit `i` moves to `i + count`, the
    /// last `count` bits fall off and the first `count` bits become zero.
    pub fn shift_left(&mut self, count: usize) {
        let len = self.bits();
        let base = self.begin_index();
        let count = count.min(len);

        self.move_bits(base, base + count, len - count);
        self.fill(base, count, false);
    }

    /// Shift every active bit `count` positions toward the front of the window.
    ///
    /// This is `>>` on the LSB-first value: bit `i + count` moves to `i`, the
    /// first `count` bits fall off and the last `count` bits become zero.
    pub fn shift_right(&mut self, count: usize) {
        let len = self.bits();
        let base = self.begin_index();
        let count = count.min(len);

        self.move_bits(base + count, base, len - count);
        self.fill(base + len - count, count, false);
    }
}
