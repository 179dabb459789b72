//! Async I/O support for filling and draining bit buffers.
//!
//! Mirrors [`BitBuffer::read_from`] and [`BitBuffer::write_to`] for Tokio
//! byte streams.
//!
//! # Example
//!
//! ```rust,ignore
//! use oxibits_core::BitBuffer;
//! use tokio::io::AsyncRead;
//!
//! async fn fill<R: AsyncRead + Unpin>(source: &mut R) -> oxibits_core::Result<BitBuffer> {
//!     let mut buf = BitBuffer::new();
//!     buf.read_from_async(source).await?;
//!     Ok(buf)
//! }
//! ```
//!
//! # Feature Flag
//!
//! This module is only available when the `async-io` feature is enabled:
//!
//! ```toml
//! [dependencies]
//! oxibits-core = { version = "0.1.0", features = ["async-io"] }
//! ```

use std::io::ErrorKind;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::buffer::BitBuffer;
use crate::error::Result;

impl BitBuffer {
    /// Append every byte `source` yields until it reports end of input.
    ///
    /// Same contract as [`BitBuffer::read_from`]: end of input completes
    /// normally, other errors surface as [`BitBufferError::Io`](crate::BitBufferError::Io).
    ///
    /// # Returns
    ///
    /// The number of bytes appended.
    pub async fn read_from_async<R>(&mut self, source: &mut R) -> Result<usize>
    where
        R: AsyncRead + Unpin,
    {
        let mut chunk = vec![0u8; self.config.read_chunk_size];
        let mut total = 0;

        loop {
            match source.read(&mut chunk).await {
                Ok(0) => break,
                Ok(n) => {
                    self.write_bytes(&chunk[..n]);
                    total += n;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    tracing::debug!(pulled = total, error = %e, "async byte source failed");
                    return Err(e.into());
                }
            }
        }

        tracing::trace!(pulled = total, "filled from async byte source");
        Ok(total)
    }

    /// Drain every whole byte from the front into `sink` and flush it.
    ///
    /// Bytes are only consumed after the write and flush succeed.
    ///
    /// # Returns
    ///
    /// The number of bytes written to `sink`.
    pub async fn write_to_async<W>(&mut self, sink: &mut W) -> Result<usize>
    where
        W: AsyncWrite + Unpin,
    {
        let count = self.bits() / 8;
        if count == 0 {
            return Ok(0);
        }

        let bytes = self.peek_front_bytes(count);
        sink.write_all(&bytes).await?;
        sink.flush().await?;
        self.consume(count * 8);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    /// Async sink that rejects every write.
    struct BrokenSink;

    impl AsyncWrite for BrokenSink {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            Poll::Ready(Err(io::Error::from(ErrorKind::BrokenPipe)))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn test_write_to_async_failing_sink_keeps_bytes() {
        let mut buf = BitBuffer::from(&[0xAA, 0xBB][..]);
        let before = buf.clone();

        let err = buf.write_to_async(&mut BrokenSink).await.unwrap_err();
        match err {
            crate::BitBufferError::Io(e) => assert_eq!(e.kind(), ErrorKind::BrokenPipe),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(buf.bits(), 16);
        assert_eq!(buf, before);
    }

    #[tokio::test]
    async fn test_read_from_async() {
        let data: Vec<u8> = (0..=255).collect();
        let mut source = &data[..];

        let mut buf = BitBuffer::new();
        let read = buf.read_from_async(&mut source).await.unwrap();
        assert_eq!(read, 256);
        assert_eq!(buf.bits(), 256 * 8);
        assert_eq!(buf.read_byte(8 * 200).unwrap(), 200);
    }

    #[tokio::test]
    async fn test_write_to_async() {
        let mut buf = BitBuffer::from(&b"async"[..]);
        buf.write_bit(true);

        let mut out: Vec<u8> = Vec::new();
        let written = buf.write_to_async(&mut out).await.unwrap();
        assert_eq!(written, 5);
        assert_eq!(out, b"async");
        assert_eq!(buf.bits(), 1);
        assert!(buf.bit(0));
    }
}
