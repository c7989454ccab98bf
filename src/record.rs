//! In-memory representation of one SMSG record
//!
//! A [`Record`] is what the decoder produces and the encoder consumes: a
//! 15-bit type code, an optional opaque header payload, and an
//! insertion-ordered tag map. The codec itself never mutates a record; the
//! intended workflow is decode → edit one or more tags → re-encode, so the
//! editing helpers here are the primary API between the two directions.

use indexmap::IndexMap;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// One decoded SMSG record
///
/// `tags` preserves wire order: iteration yields entries in the order they
/// appeared in the record, and re-encoding writes them back in that order.
/// When the same tag occurs twice on the wire the later value wins but the
/// tag keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Record {
    /// 15-bit record type code (the header tag with its marker bit cleared)
    #[cfg_attr(feature = "serialization", serde(rename = "type"))]
    pub record_type: u16,

    /// Opaque payload of the header entry, present only when the header
    /// declared a nonzero length. The content is tag/length/value-shaped but
    /// is never recursively parsed. `Some("")` is unrepresentable on the
    /// wire: a zero-length header payload always decodes to `None`, and
    /// encodes back as an elided length.
    #[cfg_attr(
        feature = "serialization",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub type_value: Option<String>,

    /// Tag → value map in wire order
    pub tags: IndexMap<u16, String>,
}

impl Record {
    /// Create an empty record of the given type
    pub fn new(record_type: u16) -> Self {
        Self {
            record_type,
            type_value: None,
            tags: IndexMap::new(),
        }
    }

    /// Create a record carrying an opaque header payload
    pub fn with_type_value(record_type: u16, type_value: impl Into<String>) -> Self {
        Self {
            record_type,
            type_value: Some(type_value.into()),
            tags: IndexMap::new(),
        }
    }

    /// Set a tag value, returning the previous value if the tag was present.
    ///
    /// An existing tag keeps its position in the record; a new tag is
    /// appended at the end, matching where a fresh entry would land on the
    /// wire.
    pub fn set_tag(&mut self, tag: u16, value: impl Into<String>) -> Option<String> {
        self.tags.insert(tag, value.into())
    }

    /// Look up a tag value
    pub fn tag(&self, tag: u16) -> Option<&str> {
        self.tags.get(&tag).map(String::as_str)
    }

    /// Remove a tag, preserving the order of the remaining tags
    pub fn remove_tag(&mut self, tag: u16) -> Option<String> {
        self.tags.shift_remove(&tag)
    }

    /// Number of regular tags (the header entry is not counted)
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }
}
