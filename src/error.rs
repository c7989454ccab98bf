//! Record-level errors for SMSG parse and encode operations
//!
//! Every failure the codec can produce is a variant here, with enough context
//! (byte offsets, declared vs. available sizes) to pin down the exact spot in
//! a multi-megabyte CDR file where a record went bad. All failures are
//! definitive: the codec never retries and never recovers part of a record.

use thiserror::Error;

/// Parse/encode errors with positional context
///
/// Offsets are byte positions within the single record buffer handed to the
/// codec, not within any enclosing file. Batch drivers that track line
/// numbers can combine the two to report an absolute location.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SmsgError {
    #[error("incomplete header: need at least {need} bytes, got {got}")]
    IncompleteHeader { need: usize, got: usize },

    #[error("first entry tag {tag:#06X} lacks the header marker bit")]
    MissingHeaderMarker { tag: u16 },

    #[error("invalid hex digit {byte:#04x} in tag field at offset {offset}")]
    InvalidTag { offset: usize, byte: u8 },

    #[error("invalid byte {byte:#04x} in length field at offset {offset}")]
    InvalidLength { offset: usize, byte: u8 },

    #[error("truncated entry at offset {offset}")]
    TruncatedEntry { offset: usize },

    #[error("truncated value at offset {offset}: declared {declared} bytes, {available} available")]
    TruncatedValue {
        offset: usize,
        declared: usize,
        available: usize,
    },

    #[error("value length {size} exceeds maximum {max} bytes")]
    ValueTooLong { size: usize, max: usize },

    #[error("invalid UTF-8 in value at offset {offset}")]
    InvalidUtf8 {
        offset: usize,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("header marker bit on non-header tag {tag:#06X} at offset {offset}")]
    UnexpectedHeaderMarker { offset: usize, tag: u16 },

    #[error("tag {tag:#06X} out of range: the top bit is reserved for the header marker")]
    TagOutOfRange { tag: u16 },
}

/// Result type for codec operations
pub type SmsgResult<T> = std::result::Result<T, SmsgError>;
