//! # SMSG Codec - CDR Record Wire Format
//!
//! Decoder and encoder for the SMSG telecom record format: call-detail
//! records stored as self-delimiting, length-prefixed text entries, one
//! record per line, millions of lines per file. This crate is the codec
//! only - file iteration, batching, and host bindings live with the caller.
//!
//! ## Wire Format
//!
//! ```text
//! record    := header entry* terminator? '\n'?
//! header    := 4-hex-tag(bit 0x8000 set) decimal-length? ' ' payload
//! entry     := 4-hex-tag decimal-length ' ' value
//! terminator:= "0000" "0" ' '
//! ```
//!
//! Lengths count bytes, not characters; values are raw UTF-8 with no
//! escaping. Bytes after a terminator are ignored, a missing terminator is
//! fine, and one trailing newline is dropped. Tags are emitted as uppercase
//! hex and accepted in either case.
//!
//! ## API Surface
//!
//! - [`decode`] / [`encode`] - one-shot conversions
//! - [`Decoder`] - reusable, stateless decode handle
//! - [`Encoder`] - reusable serializer with chainable
//!   [`set_include_terminator`](Encoder::set_include_terminator) /
//!   [`set_include_newline`](Encoder::set_include_newline) configuration and
//!   an amortized output buffer
//! - [`EntryScanner`] - low-level entry tokenizer for callers that want one
//!   tag without building a whole [`Record`]
//!
//! ## Quick Start
//!
//! ```
//! use smsg_codec::{decode, encode};
//!
//! // Decode one CDR line, patch a tag, write it back
//! let mut record = decode(b"9001 10004 ABCD15033 40400000 \n")?;
//! record.set_tag(0x1503, "999");
//! let rewritten = encode(&record)?;
//! assert_eq!(rewritten, b"9001 10004 ABCD15033 99900000 \n");
//! # Ok::<(), smsg_codec::SmsgError>(())
//! ```
//!
//! ## Concurrency
//!
//! Every call is a synchronous, self-contained transformation of one
//! in-memory buffer. [`Decoder`] is stateless and freely shareable; an
//! [`Encoder`]'s buffer confines it to one caller at a time, which `&mut
//! self` already enforces. Batch workloads run one encoder/decoder pair per
//! worker thread.

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod record;
pub mod scanner;

pub use decoder::{decode, Decoder};
pub use encoder::{encode, Encoder};
pub use error::{SmsgError, SmsgResult};
pub use record::Record;
pub use scanner::{EntryScanner, ScannedEntry};

/// Reserved header marker bit: set on the first entry's tag, never on a
/// regular tag
pub const HEADER_MARKER: u16 = 0x8000;

/// Largest regular tag / record type value
pub const TAG_MAX: u16 = 0x7FFF;

/// Values larger than 10 MiB are not supported in either direction
pub const MAX_VALUE_LEN: usize = 10 * 1024 * 1024;
