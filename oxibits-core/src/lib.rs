//! # OxiBits Core
//!
//! A growable, bit-addressable buffer for the OxiBits library.
//!
//! [`BitBuffer`] stores bits packed LSB-first into bytes and lets callers
//! append, peek, consume, edit and combine data one bit at a time:
//!
//! - [`buffer`]: the buffer type, appending, peeking, consuming and windowing
//! - [`cursor`]: bit index to (byte, offset) mapping
//! - [`config`]: allocation, streaming and compaction settings
//! - [`ops`]: AND/OR/XOR/NOT and shifts over the active window
//! - [`error`]: Error types
//!
//! ## Windowing
//!
//! ```text
//!   rewind boundary     begin cursor                 end cursor
//!          │                 │                            │
//!          ▼                 ▼                            ▼
//!   ┌──────┬─────────────────┬────────────────────────────┬──────┐
//!   │ gone │ hidden (advance)│        active window       │ tail │
//!   └──────┴─────────────────┴────────────────────────────┴──────┘
//!           ◄─── rewind ────   ──── advance ───►
//! ```
//!
//! `advance` hides bits at the front, `rewind` restores them, `recalibrate`
//! forgets everything before the begin cursor and `reset` discards it all.
//!
//! ## Example
//!
//! ```rust
//! use oxibits_core::BitBuffer;
//!
//! let mut buf = BitBuffer::new();
//! buf.write_bytes(&[0xFF, 0xEE, 0xDD]);
//! let before = buf.to_string();
//!
//! assert_eq!(buf.advance(10), 10);
//! assert_eq!(buf.bits(), 14);
//! assert_eq!(buf.rewind(10), 10);
//! assert_eq!(buf.to_string(), before);
//!
//! buf.and_bytes(&[0x0F]);
//! assert_eq!(buf.read_byte(0).unwrap(), 0x0F);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

#[cfg(feature = "async-io")]
pub mod async_io;
pub mod buffer;
pub mod config;
pub mod cursor;
mod edit;
pub mod error;
mod io;
pub mod ops;
mod render;

// Re-exports for convenience
pub use buffer::{BitBuffer, Iter, MAX_BITS_PER_CALL};
pub use config::BitBufferConfig;
pub use cursor::BitCursor;
pub use error::{BitBufferError, Result};
pub use ops::BitOp;
pub use render::Grouped;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::buffer::BitBuffer;
    pub use crate::config::BitBufferConfig;
    pub use crate::error::{BitBufferError, Result};
    pub use crate::ops::BitOp;
}
