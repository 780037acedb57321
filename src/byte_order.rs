//! Byte-order strategies used by [`ByteStream`](crate::ByteStream).
//!
//! A strategy only knows how to combine raw bytes into integers. It carries no
//! state, so one value can be shared by any number of cursors.

/// Combines raw bytes into multi-byte values for one byte order.
pub trait ByteArrayParser: Copy {
    fn read_uint16(&self, bytes: [u8; 2]) -> u16;

    fn read_uint32(&self, bytes: [u8; 4]) -> u32;

    fn read_int16(&self, bytes: [u8; 2]) -> i16 {
        self.read_uint16(bytes) as i16
    }

    fn read_int32(&self, bytes: [u8; 4]) -> i32 {
        self.read_uint32(bytes) as i32
    }

    fn read_float(&self, bytes: [u8; 4]) -> f32 {
        f32::from_bits(self.read_uint32(bytes))
    }

    fn read_double(&self, bytes: [u8; 8]) -> f64 {
        let first = [bytes[0], bytes[1], bytes[2], bytes[3]];
        let second = [bytes[4], bytes[5], bytes[6], bytes[7]];
        let bits = if self.is_little_endian() {
            (self.read_uint32(second) as u64) << 32 | self.read_uint32(first) as u64
        } else {
            (self.read_uint32(first) as u64) << 32 | self.read_uint32(second) as u64
        };
        f64::from_bits(bits)
    }

    fn is_little_endian(&self) -> bool;
}

/// Byte 0 is the least significant.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LittleEndianByteArrayParser;

impl ByteArrayParser for LittleEndianByteArrayParser {
    fn read_uint16(&self, bytes: [u8; 2]) -> u16 {
        bytes[0] as u16 | (bytes[1] as u16) << 8
    }

    fn read_uint32(&self, bytes: [u8; 4]) -> u32 {
        bytes[0] as u32 | (bytes[1] as u32) << 8 | (bytes[2] as u32) << 16 | (bytes[3] as u32) << 24
    }

    fn is_little_endian(&self) -> bool {
        true
    }
}

/// Byte 0 is the most significant.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BigEndianByteArrayParser;

impl ByteArrayParser for BigEndianByteArrayParser {
    fn read_uint16(&self, bytes: [u8; 2]) -> u16 {
        (bytes[0] as u16) << 8 | bytes[1] as u16
    }

    fn read_uint32(&self, bytes: [u8; 4]) -> u32 {
        (bytes[0] as u32) << 24 | (bytes[1] as u32) << 16 | (bytes[2] as u32) << 8 | bytes[3] as u32
    }

    fn is_little_endian(&self) -> bool {
        false
    }
}

/// Byte order picked at runtime, e.g. from a transfer syntax UID.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    #[default]
    Little,
    Big,
}

impl ByteArrayParser for Endianness {
    fn read_uint16(&self, bytes: [u8; 2]) -> u16 {
        match self {
            Endianness::Little => LittleEndianByteArrayParser.read_uint16(bytes),
            Endianness::Big => BigEndianByteArrayParser.read_uint16(bytes),
        }
    }

    fn read_uint32(&self, bytes: [u8; 4]) -> u32 {
        match self {
            Endianness::Little => LittleEndianByteArrayParser.read_uint32(bytes),
            Endianness::Big => BigEndianByteArrayParser.read_uint32(bytes),
        }
    }

    fn is_little_endian(&self) -> bool {
        matches!(self, Endianness::Little)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn little_endian_puts_first_byte_lowest() {
        let parser = LittleEndianByteArrayParser;
        assert_eq!(parser.read_uint16([0x01, 0x02]), 0x0201);
        assert_eq!(parser.read_uint32([0x04, 0x03, 0x02, 0x01]), 16_909_060);
    }

    #[test]
    fn big_endian_puts_first_byte_highest() {
        let parser = BigEndianByteArrayParser;
        assert_eq!(parser.read_uint16([0x01, 0x02]), 0x0102);
        assert_eq!(parser.read_uint32([0x01, 0x02, 0x03, 0x04]), 16_909_060);
    }

    #[test]
    fn signed_and_float_reads_follow_the_order() {
        assert_eq!(LittleEndianByteArrayParser.read_int16([0xFE, 0xFF]), -2);
        assert_eq!(BigEndianByteArrayParser.read_int32([0xFF, 0xFF, 0xFF, 0xFD]), -3);
        assert_eq!(
            LittleEndianByteArrayParser.read_float(1.5f32.to_le_bytes()),
            1.5
        );
        assert_eq!(
            BigEndianByteArrayParser.read_double((-2.25f64).to_be_bytes()),
            -2.25
        );
        assert_eq!(
            LittleEndianByteArrayParser.read_double(1234.5f64.to_le_bytes()),
            1234.5
        );
    }

    #[test]
    fn runtime_endianness_matches_static_parsers() {
        let bytes = [0xAB, 0xCD, 0xEF, 0x01];
        assert_eq!(
            Endianness::Little.read_uint32(bytes),
            LittleEndianByteArrayParser.read_uint32(bytes)
        );
        assert_eq!(
            Endianness::Big.read_uint32(bytes),
            BigEndianByteArrayParser.read_uint32(bytes)
        );
    }
}
