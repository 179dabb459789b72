//! Text rendering of the active window.
//!
//! Bits print in append order, one character per bit, so a byte `0xF0`
//! renders as `"00001111"`. The grouped form puts a single space between
//! each 8-bit cluster. An empty window renders as `"<empty>"`.

use std::fmt;

use crate::buffer::BitBuffer;

/// Placeholder text for a window with no active bits.
const EMPTY: &str = "<empty>";

impl BitBuffer {
    /// View that renders the bits grouped into bytes.
    ///
    /// ```
    /// use oxibits_core::BitBuffer;
    ///
    /// let buf = BitBuffer::from(&[0x0F, 0x01][..]);
    /// assert_eq!(buf.grouped().to_string(), "11110000 10000000");
    /// assert_eq!(format!("{:#}", buf), "11110000 10000000");
    /// ```
    pub fn grouped(&self) -> Grouped<'_> {
        Grouped(self)
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, grouped: bool) -> fmt::Result {
        if self.is_empty() {
            return f.write_str(EMPTY);
        }

        for (i, bit) in self.iter().enumerate() {
            if grouped && i > 0 && i % 8 == 0 {
                f.write_str(" ")?;
            }
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Display for BitBuffer {
    /// `{}` prints the plain bit string, `{:#}` the grouped one.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, f.alternate())
    }
}

impl fmt::Debug for BitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitBuffer")
            .field("begin_byte", &self.begin_byte)
            .field("begin_bit", &self.begin_bit)
            .field("end_byte", &self.end_byte)
            .field("end_bit_count", &self.end_bit_count)
            .field("rewind", &self.rewind)
            .field("storage_len", &self.storage.len())
            .field("bits", &format_args!("{:#}", self))
            .finish()
    }
}

/// Grouped rendering of a [`BitBuffer`], see [`BitBuffer::grouped`].
#[derive(Clone, Copy)]
pub struct Grouped<'a>(&'a BitBuffer);

impl fmt::Display for Grouped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.render(f, true)
    }
}
