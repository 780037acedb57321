use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;

use crate::byte_order::Endianness;

pub const EXPLICIT_VR_LITTLE_ENDIAN: &str = "1.2.840.10008.1.2.1";
pub const DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN: &str = "1.2.840.10008.1.2.1.99";
pub const EXPLICIT_VR_BIG_ENDIAN: &str = "1.2.840.10008.1.2.2";
pub const IMPLICIT_VR_LITTLE_ENDIAN: &str = "1.2.840.10008.1.2";

lazy_static! {
    // VRs whose header carries 2 reserved bytes and a 4-byte length
    static ref EXTENDED_LENGTH_VRS: HashSet<&'static str> = [
        "OB", "OD", "OF", "OL", "OV", "OW", "SQ", "SV", "UC", "UN", "UR", "UT", "UV",
    ]
    .into_iter()
    .collect();
    static ref VR_DESCRIPTIONS: HashMap<&'static str, &'static str> = vr_mapping().into_iter().collect();
}

fn vr_mapping() -> Vec<(&'static str, &'static str)> {
    vec![
        ("AE", "Application Entity"),
        ("AS", "Age String"),
        ("AT", "Attribute Tag"),
        ("CS", "Code String"),
        ("DA", "Date"),
        ("DS", "Decimal String"),
        ("DT", "Date Time"),
        ("FL", "Floating Point Single"),
        ("FD", "Floating Point Double"),
        ("IS", "Integer String"),
        ("LO", "Long String"),
        ("LT", "Long Text"),
        ("OB", "Other Byte String"),
        ("OD", "Other Double String"),
        ("OF", "Other Float String"),
        ("OL", "Other Long"),
        ("OV", "Other 64-bit Very Long"),
        ("OW", "Other Word String"),
        ("PN", "Person Name"),
        ("SH", "Short String"),
        ("SL", "Signed Long"),
        ("SQ", "Sequence of Items"),
        ("SS", "Signed Short"),
        ("ST", "Short Text"),
        ("SV", "Signed 64-bit Very Long"),
        ("TM", "Time"),
        ("UC", "Unlimited Characters"),
        ("UI", "Unique Identifier (UID)"),
        ("UL", "Unsigned Long"),
        ("UN", "Unknown"),
        ("UR", "Universal Resource Identifier"),
        ("US", "Unsigned Short"),
        ("UT", "Unlimited Text"),
        ("UV", "Unsigned 64-bit Very Long"),
    ]
}

/// Whether the VR uses 2 reserved bytes and a 4-byte length.
///
/// Unknown codes are not extended.
pub fn is_extended_length_vr(vr: &str) -> bool {
    EXTENDED_LENGTH_VRS.contains(vr)
}

pub fn vr_description(vr: &str) -> Option<&'static str> {
    VR_DESCRIPTIONS.get(vr).copied()
}

/// Byte order of the dataset for an explicit VR transfer syntax.
///
/// `None` for implicit VR little endian, which this crate cannot read.
pub fn endianness_for_transfer_syntax(uid: &str) -> Option<Endianness> {
    let uid = uid.trim_end_matches(['\0', ' ']);
    match uid {
        IMPLICIT_VR_LITTLE_ENDIAN => None,
        EXPLICIT_VR_BIG_ENDIAN => Some(Endianness::Big),
        EXPLICIT_VR_LITTLE_ENDIAN | DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN => Some(Endianness::Little),
        // encapsulated pixel data syntaxes are all explicit little endian
        _ => Some(Endianness::Little),
    }
}

pub fn to_hex_string(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| format!("{:02X}", byte))
        .collect::<Vec<String>>()
        .join(" ")
}
