use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::DicomError;

/// Length value reserved for elements whose end is marked by a delimiter.
pub const UNDEFINED_LENGTH: u32 = 0xFFFF_FFFF;

lazy_static! {
    static ref CANONICAL_TAG: Regex = Regex::new(r"^[xX]([0-9a-fA-F]{4})([0-9a-fA-F]{4})$").unwrap();
    static ref COMMA_TAG: Regex =
        Regex::new(r"^\(?([0-9a-fA-F]{4}),\s*([0-9a-fA-F]{4})\)?$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag {
    pub group: u16,
    pub element: u16,
}

impl Tag {
    pub const fn new(group: u16, element: u16) -> Self {
        Self { group, element }
    }

    /// `x` followed by the group and element words as lowercase hex.
    pub fn canonical(&self) -> String {
        format!("x{:04x}{:04x}", self.group, self.element)
    }

    /// `GGGG,EEEE` in uppercase, the form used for human output.
    pub fn comma_form(&self) -> String {
        format!("{:04X},{:04X}", self.group, self.element)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:04X},{:04X})", self.group, self.element)
    }
}

impl From<(u16, u16)> for Tag {
    fn from((group, element): (u16, u16)) -> Self {
        Tag::new(group, element)
    }
}

impl FromStr for Tag {
    type Err = DicomError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        let captures = CANONICAL_TAG
            .captures(text)
            .or_else(|| COMMA_TAG.captures(text))
            .ok_or_else(|| DicomError::InvalidTag(text.to_string()))?;

        // both patterns guarantee exactly four hex digits per group
        let parse = |index: usize| {
            u16::from_str_radix(&captures[index], 16)
                .map_err(|_| DicomError::InvalidTag(text.to_string()))
        };

        Ok(Tag::new(parse(1)?, parse(2)?))
    }
}

/// Header of one explicit VR data element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHeader {
    pub tag: Tag,
    pub vr: String,
    pub length: u32,
    /// Absolute offset of the first value byte.
    pub data_offset: usize,
}

impl ElementHeader {
    pub fn has_undefined_length(&self) -> bool {
        self.length == UNDEFINED_LENGTH
    }

    /// Offset just past the value, `None` on overflow.
    pub fn value_end(&self) -> Option<usize> {
        self.data_offset.checked_add(self.length as usize)
    }
}
