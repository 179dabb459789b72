//! Bit position arithmetic.
//!
//! Every peek, poke, shift and removal in the buffer addresses storage
//! through the helpers here, so the LSB-first convention lives in one place:
//! absolute bit index `i` is bit `i % 8` (counting from the least significant
//! bit) of byte `i / 8`.

/// A position inside the backing storage, split into byte and bit offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct BitCursor {
    /// Index of the storage byte.
    pub byte: usize,
    /// Bit within that byte, 0 = least significant (0-7).
    pub bit: u8,
}

impl BitCursor {
    /// The first bit of storage.
    pub const ORIGIN: Self = Self { byte: 0, bit: 0 };

    /// Map an absolute bit index to a cursor.
    #[inline]
    pub fn from_bit_index(index: usize) -> Self {
        Self {
            byte: index / 8,
            bit: (index % 8) as u8,
        }
    }

    /// Map this cursor back to an absolute bit index.
    #[inline]
    pub fn bit_index(self) -> usize {
        self.byte * 8 + self.bit as usize
    }

    /// Single-bit mask selecting this cursor's bit within its byte.
    #[inline]
    pub fn mask(self) -> u8 {
        1 << self.bit
    }
}

/// Encode an exclusive absolute end index as `(end_byte, end_bit_count)`.
///
/// `end_byte` is one past the last byte that holds active bits and
/// `end_bit_count` (1-8) is how many low bits of byte `end_byte - 1` are in
/// use. Index 0 encodes as `(0, 0)`.
#[inline]
pub fn encode_end(index: usize) -> (usize, u8) {
    if index == 0 {
        (0, 0)
    } else {
        let used = index % 8;
        if used == 0 {
            (index / 8, 8)
        } else {
            (index / 8 + 1, used as u8)
        }
    }
}

/// Inverse of [`encode_end`].
#[inline]
pub fn decode_end(end_byte: usize, end_bit_count: u8) -> usize {
    if end_byte == 0 {
        0
    } else {
        (end_byte - 1) * 8 + end_bit_count as usize
    }
}

/// Mask with the low `count` bits set (`count` up to 32).
#[inline]
pub fn low_mask(count: u8) -> u32 {
    debug_assert!(count <= 32);
    if count >= 32 {
        u32::MAX
    } else {
        (1u32 << count).wrapping_sub(1)
    }
}

/// Number of bytes needed to hold `bits` bits.
#[inline]
pub fn bytes_for(bits: usize) -> usize {
    bits.div_ceil(8)
}
