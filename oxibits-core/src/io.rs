//! Byte stream integration.
//!
//! `BitBuffer` implements [`std::io::Write`] (append) and [`std::io::Read`]
//! (consume whole bytes from the front), and can be filled from or drained
//! into any byte stream. Only whole bytes cross the boundary: a trailing
//! partial byte stays active in the buffer.

use std::io::{self, ErrorKind, Read, Write};

use crate::buffer::BitBuffer;
use crate::error::{BitBufferError, Result};

impl BitBuffer {
    /// Append every byte `source` yields until it reports end of input.
    ///
    /// Interrupted reads are retried. End of input is a normal completion;
    /// any other read error is returned as [`BitBufferError::Io`], with the
    /// bytes pulled before the failure left in the buffer.
    ///
    /// # Returns
    ///
    /// The number of bytes appended.
    ///
    /// # Example
    ///
    /// ```
    /// use oxibits_core::BitBuffer;
    /// use std::io::Cursor;
    ///
    /// let mut buf = BitBuffer::new();
    /// let read = buf.read_from(Cursor::new(vec![0x01, 0x02, 0x03])).unwrap();
    /// assert_eq!(read, 3);
    /// assert_eq!(buf.bits(), 24);
    /// ```
    pub fn read_from<R: Read>(&mut self, mut source: R) -> Result<usize> {
        let mut chunk = vec![0u8; self.config.read_chunk_size];
        let mut total = 0;

        loop {
            match source.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => {
                    self.write_bytes(&chunk[..n]);
                    total += n;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    tracing::debug!(pulled = total, error = %e, "byte source failed");
                    return Err(e.into());
                }
            }
        }

        tracing::trace!(
            pulled = total,
            chunk = self.config.read_chunk_size,
            "filled from byte source"
        );
        Ok(total)
    }

    /// Drain every whole byte from the front into `sink`.
    ///
    /// Bytes are only consumed once `sink` has accepted all of them; if the
    /// write fails the buffer is left as it was.
    ///
    /// # Returns
    ///
    /// The number of bytes written to `sink`.
    pub fn write_to<W: Write>(&mut self, mut sink: W) -> Result<usize> {
        let count = self.bits() / 8;
        if count == 0 {
            return Ok(0);
        }

        let bytes = self.peek_front_bytes(count);
        sink.write_all(&bytes)?;
        self.consume(count * 8);
        Ok(count)
    }
}

impl Write for BitBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.write_bytes(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Read for BitBuffer {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.read_bytes(buf) {
            Ok(n) => Ok(n),
            Err(BitBufferError::Exhausted) => Ok(0),
            Err(e) => Err(e.into()),
        }
    }
}
