use std::fmt;

use thiserror::Error;

use crate::model::Tag;

pub type Result<T> = std::result::Result<T, DicomError>;

/// Header field that was being read when the buffer ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    Group,
    Element,
    Vr,
    Reserved,
    Length,
}

impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HeaderField::Group => "group",
            HeaderField::Element => "element",
            HeaderField::Vr => "vr",
            HeaderField::Reserved => "reserved bytes",
            HeaderField::Length => "length",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum DicomError {
    #[error("attempt to read {requested} bytes at position {position} beyond buffer of size {size}")]
    BufferOverread {
        position: usize,
        requested: usize,
        size: usize,
    },

    #[error("position {position} is outside buffer of size {size}")]
    PositionOutOfRange { position: usize, size: usize },

    #[error("truncated element header while reading {field}")]
    TruncatedHeader {
        field: HeaderField,
        #[source]
        source: Box<DicomError>,
    },

    #[error("value of {tag} ({length} bytes at offset {data_offset}) exceeds buffer of size {size}")]
    ValueOutOfRange {
        tag: Tag,
        data_offset: usize,
        length: u32,
        size: usize,
    },

    #[error("element {tag} at offset {data_offset} has undefined length")]
    UndefinedLength { tag: Tag, data_offset: usize },

    #[error("missing DICM prefix, found {found:?}")]
    MissingDicmPrefix { found: String },

    #[error("invalid tag: {0}")]
    InvalidTag(String),

    #[error("unsupported transfer syntax: {0}")]
    UnsupportedTransferSyntax(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DicomError {
    /// True when the error comes from running out of bytes, at any depth.
    pub fn is_truncation(&self) -> bool {
        match self {
            DicomError::BufferOverread { .. } => true,
            DicomError::TruncatedHeader { .. } => true,
            _ => false,
        }
    }
}
