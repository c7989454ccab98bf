//! # SMSG Decoder - Record Assembly
//!
//! ## Purpose
//!
//! Drives the [`EntryScanner`] over one complete record's bytes and assembles
//! a [`Record`], enforcing the rules the scanner deliberately leaves out: the
//! first entry must carry the header marker, a terminator stops the record
//! with everything after it discarded unread, a stray marker bit mid-record
//! is rejected, and one trailing newline is silently dropped.
//!
//! ## Integration Points
//!
//! - **Input**: one record's raw bytes - batch drivers split files into lines
//!   and hand each line here independently
//! - **Output**: an owned [`Record`]; every value is validated UTF-8
//! - **Errors**: one [`SmsgError`] per grammar violation, rejecting the
//!   record as a whole
//!
//! ## Examples
//!
//! ```
//! use smsg_codec::decode;
//!
//! let record = decode(b"9001 10004 ABCD20001 X00000 \n")?;
//! assert_eq!(record.record_type, 0x1001);
//! assert_eq!(record.tag(0x1000), Some("ABCD"));
//! assert_eq!(record.tag(0x2000), Some("X"));
//! # Ok::<(), smsg_codec::SmsgError>(())
//! ```

use crate::error::{SmsgError, SmsgResult};
use crate::record::Record;
use crate::scanner::{EntryScanner, ScannedEntry};
use crate::HEADER_MARKER;
use tracing::trace;

/// A header entry needs its 4-byte tag plus at least one length/separator byte
const MIN_HEADER_LEN: usize = 5;

/// Reusable decoder handle
///
/// Holds no parse state between calls: the scanner borrows each input buffer
/// and every `decode` call is a fresh, self-contained parse, so one decoder
/// can serve any number of records and is safe to share across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder;

impl Decoder {
    /// Create a decoder
    pub fn new() -> Self {
        Self
    }

    /// Decode one complete record from `data`.
    ///
    /// Bytes after a well-formed terminator entry are ignored without being
    /// validated; absence of a terminator is not an error. A single trailing
    /// `\n` after the last consumed entry is accepted and dropped.
    pub fn decode(&self, data: &[u8]) -> SmsgResult<Record> {
        if data.len() < MIN_HEADER_LEN {
            return Err(SmsgError::IncompleteHeader {
                need: MIN_HEADER_LEN,
                got: data.len(),
            });
        }

        let mut scanner = EntryScanner::new(data);

        // The length check above guarantees the first scan cannot yield None.
        let (record_type, type_value) = match scanner.next_entry()? {
            Some(ScannedEntry::Header {
                record_type,
                value,
                offset,
            }) => {
                let type_value = if value.is_empty() {
                    None
                } else {
                    Some(utf8_value(value, offset)?.to_owned())
                };
                (record_type, type_value)
            }
            Some(ScannedEntry::Tag { tag, .. }) => {
                return Err(SmsgError::MissingHeaderMarker { tag });
            }
            Some(ScannedEntry::Terminator { .. }) | None => {
                return Err(SmsgError::MissingHeaderMarker { tag: 0 });
            }
        };

        let mut record = Record {
            record_type,
            type_value,
            tags: Default::default(),
        };

        loop {
            if scanner.remaining() == b"\n" {
                break;
            }
            match scanner.next_entry()? {
                None | Some(ScannedEntry::Terminator { .. }) => break,
                Some(ScannedEntry::Tag { tag, value, offset }) => {
                    // Repeated tag: later value wins, position is kept
                    record.tags.insert(tag, utf8_value(value, offset)?.to_owned());
                }
                Some(ScannedEntry::Header {
                    record_type,
                    offset,
                    ..
                }) => {
                    return Err(SmsgError::UnexpectedHeaderMarker {
                        offset,
                        tag: HEADER_MARKER | record_type,
                    });
                }
            }
        }

        trace!(
            record_type = record.record_type,
            tags = record.tag_count(),
            "decoded record"
        );
        Ok(record)
    }
}

/// Decode one record with a throwaway [`Decoder`]
pub fn decode(data: &[u8]) -> SmsgResult<Record> {
    Decoder::new().decode(data)
}

fn utf8_value(value: &[u8], offset: usize) -> SmsgResult<&str> {
    std::str::from_utf8(value).map_err(|source| SmsgError::InvalidUtf8 { offset, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_basic() {
        let record = decode(b"9001 10004 ABCD20001 X00000 ").unwrap();
        assert_eq!(record.record_type, 0x1001);
        assert_eq!(record.type_value, None);
        assert_eq!(record.tag(0x1000), Some("ABCD"));
        assert_eq!(record.tag(0x2000), Some("X"));
        assert_eq!(record.tag_count(), 2);
    }

    #[test]
    fn test_decode_trailing_newline() {
        let plain = decode(b"9001 10004 ABCD20001 X00000 ").unwrap();
        let with_newline = decode(b"9001 10004 ABCD20001 X00000 \n").unwrap();
        assert_eq!(plain, with_newline);
    }

    #[test]
    fn test_decode_stops_at_terminator() {
        let expected = decode(b"9001 10004 ABCD20001 X00000 ").unwrap();
        // Anything after the terminator is ignored, even malformed bytes
        let record = decode(b"9001 10004 ABCD20001 X00000 11111 x\n").unwrap();
        assert_eq!(record, expected);
        let record = decode(b"9001 10004 ABCD20001 X00000 not entries at all").unwrap();
        assert_eq!(record, expected);
    }

    #[test]
    fn test_decode_without_terminator() {
        let record = decode(b"9001 10004 ABCD20001 X").unwrap();
        assert_eq!(record.record_type, 0x1001);
        assert_eq!(record.type_value, None);
        assert_eq!(record.tag(0x1000), Some("ABCD"));
        assert_eq!(record.tag(0x2000), Some("X"));

        let with_newline = decode(b"9001 10004 ABCD20001 X\n").unwrap();
        assert_eq!(record, with_newline);
    }

    #[test]
    fn test_decode_unicode_lengths_are_bytes() {
        // 😀 is 4 bytes, æå is 4 bytes: lengths count bytes, not characters
        let data = "9001 100010 Hello 😀7FFF4 æå00000 ".as_bytes();
        let record = decode(data).unwrap();
        assert_eq!(record.record_type, 0x1001);
        assert_eq!(record.tag(0x1000), Some("Hello 😀"));
        assert_eq!(record.tag(0x7FFF), Some("æå"));
    }

    #[test]
    fn test_decode_header_payload_not_recursed() {
        // The header payload is itself tag/length/value-shaped but stays opaque
        let record = decode(b"90019 55553 12300000 ").unwrap();
        assert_eq!(record.record_type, 0x1001);
        assert_eq!(record.type_value.as_deref(), Some("55553 123"));
        assert_eq!(record.tag_count(), 0);
    }

    #[test]
    fn test_decode_short_input_is_incomplete_header() {
        let inputs: [&[u8]; 3] = [b"", b"\n", b"9001"];
        for input in inputs {
            assert_eq!(
                decode(input).unwrap_err(),
                SmsgError::IncompleteHeader {
                    need: 5,
                    got: input.len(),
                },
                "input {input:?}"
            );
        }
    }

    #[test]
    fn test_decode_truncated_value() {
        assert_eq!(
            decode(b"9001 10012 x").unwrap_err(),
            SmsgError::TruncatedValue {
                offset: 11,
                declared: 2,
                available: 1,
            }
        );
    }

    #[test]
    fn test_decode_invalid_length() {
        assert_eq!(
            decode(b"9001 1001a xxxxxxxxxx").unwrap_err(),
            SmsgError::InvalidLength {
                offset: 9,
                byte: b'a',
            }
        );
    }

    #[test]
    fn test_decode_missing_header_marker() {
        assert_eq!(
            decode(b"1001 10004 ABCD").unwrap_err(),
            SmsgError::MissingHeaderMarker { tag: 0x1001 }
        );
        // A leading terminator has no marker either
        assert_eq!(
            decode(b"00000 10004 ABCD").unwrap_err(),
            SmsgError::MissingHeaderMarker { tag: 0 }
        );
    }

    #[test]
    fn test_decode_stray_marker_mid_record() {
        assert_eq!(
            decode(b"9001 10004 ABCD90021 Y").unwrap_err(),
            SmsgError::UnexpectedHeaderMarker {
                offset: 15,
                tag: 0x9002,
            }
        );
    }

    #[test]
    fn test_decode_repeated_tag_last_wins() {
        let record = decode(b"9001 10004 ABCD20001 X10002 EF").unwrap();
        assert_eq!(record.tag(0x1000), Some("EF"));
        assert_eq!(record.tag_count(), 2);
        // First occurrence keeps its position
        let order: Vec<u16> = record.tags.keys().copied().collect();
        assert_eq!(order, vec![0x1000, 0x2000]);
    }

    #[test]
    fn test_decode_invalid_utf8_value() {
        let err = decode(b"9001 10002 \xFF\xFE").unwrap_err();
        assert!(matches!(err, SmsgError::InvalidUtf8 { offset: 5, .. }), "{err:?}");
    }

    #[test]
    fn test_decode_invalid_utf8_type_value() {
        let err = decode(b"90012 \xC0\xC0").unwrap_err();
        assert!(matches!(err, SmsgError::InvalidUtf8 { offset: 0, .. }), "{err:?}");
    }

    #[test]
    fn test_decode_header_only() {
        let record = decode(b"9001 ").unwrap();
        assert_eq!(record.record_type, 0x1001);
        assert_eq!(record.type_value, None);
        assert_eq!(record.tag_count(), 0);
    }

    #[test]
    fn test_decode_double_trailing_newline_rejected() {
        // Only a single trailing newline is tolerated
        assert_eq!(
            decode(b"9001 10004 ABCD\n\n").unwrap_err(),
            SmsgError::TruncatedEntry { offset: 15 }
        );
    }

    #[test]
    fn test_decode_elided_length_terminator() {
        // The terminator may elide its length digits like any other entry;
        // with or without trailing noise the record decodes the same
        let short = decode(b"900010 5000010 X00000 ").unwrap();
        let long = decode(b"900010 5000010 X00000 11111 y").unwrap();
        assert_eq!(short, long);
        assert_eq!(short.record_type, 0x1000);
        assert_eq!(short.type_value.as_deref(), Some("5000010 X0"));
        assert_eq!(short.tag_count(), 0);
    }

    #[test]
    fn test_decode_undeclared_multibyte_length_fails() {
        // 😀 is 4 bytes; declaring length 1 splits the codepoint
        let err = decode("9001 10001 😀".as_bytes()).unwrap_err();
        assert!(matches!(err, SmsgError::InvalidUtf8 { offset: 5, .. }), "{err:?}");
    }

    #[test]
    fn test_decode_elided_length_on_regular_entry() {
        // Mid-record elision means an empty value, as the original parser
        // treated it
        let record = decode(b"9001 2000 10004 ABCD").unwrap();
        assert_eq!(record.tag(0x2000), Some(""));
        assert_eq!(record.tag(0x1000), Some("ABCD"));
    }

    #[test]
    fn test_decoder_reuse_no_state_leak() {
        let decoder = Decoder::new();
        assert!(decoder.decode(b"9001 10012 x").is_err());
        let record = decoder.decode(b"9001 10004 ABCD00000 ").unwrap();
        assert_eq!(record.tag(0x1000), Some("ABCD"));
    }
}
