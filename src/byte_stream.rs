use crate::byte_order::ByteArrayParser;
use crate::error::{DicomError, Result};

/// Forward reading cursor over a borrowed byte buffer.
///
/// Every read is bounds checked and advances the position by the number of
/// bytes consumed. A failed read leaves the position where it was.
#[derive(Debug, Clone)]
pub struct ByteStream<'a, P: ByteArrayParser> {
    parser: P,
    bytes: &'a [u8],
    position: usize,
}

impl<'a, P: ByteArrayParser> ByteStream<'a, P> {
    pub fn new(parser: P, bytes: &'a [u8]) -> Self {
        Self {
            parser,
            bytes,
            position: 0,
        }
    }

    pub fn with_position(parser: P, bytes: &'a [u8], position: usize) -> Result<Self> {
        let mut stream = Self::new(parser, bytes);
        stream.seek(position)?;
        Ok(stream)
    }

    pub fn parser(&self) -> P {
        self.parser
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.bytes.len()
    }

    /// Moves to an absolute position. The end of the buffer is a valid target.
    pub fn seek(&mut self, position: usize) -> Result<()> {
        if position > self.bytes.len() {
            return Err(DicomError::PositionOutOfRange {
                position,
                size: self.bytes.len(),
            });
        }
        self.position = position;
        Ok(())
    }

    /// Moves forward by `count` bytes without reading them.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        let target = self
            .position
            .checked_add(count)
            .ok_or(DicomError::PositionOutOfRange {
                position: usize::MAX,
                size: self.bytes.len(),
            })?;
        self.seek(target)
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let overread = DicomError::BufferOverread {
            position: self.position,
            requested: count,
            size: self.bytes.len(),
        };
        let end = match self.position.checked_add(count) {
            Some(end) if end <= self.bytes.len() => end,
            _ => return Err(overread),
        };
        let bytes = &self.bytes[self.position..end];
        self.position = end;
        Ok(bytes)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.read_bytes(N)?);
        Ok(array)
    }

    pub fn read_uint8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_uint16(&mut self) -> Result<u16> {
        let bytes = self.read_array()?;
        Ok(self.parser.read_uint16(bytes))
    }

    pub fn read_uint32(&mut self) -> Result<u32> {
        let bytes = self.read_array()?;
        Ok(self.parser.read_uint32(bytes))
    }

    /// Decodes the next two bytes without consuming them.
    pub fn peek_uint16(&self) -> Result<u16> {
        self.clone().read_uint16()
    }

    pub fn read_int16(&mut self) -> Result<i16> {
        let bytes = self.read_array()?;
        Ok(self.parser.read_int16(bytes))
    }

    pub fn read_int32(&mut self) -> Result<i32> {
        let bytes = self.read_array()?;
        Ok(self.parser.read_int32(bytes))
    }

    pub fn read_float(&mut self) -> Result<f32> {
        let bytes = self.read_array()?;
        Ok(self.parser.read_float(bytes))
    }

    pub fn read_double(&mut self) -> Result<f64> {
        let bytes = self.read_array()?;
        Ok(self.parser.read_double(bytes))
    }

    /// Reads `length` single-byte characters.
    ///
    /// The string stops at the first NUL, but the cursor always moves past
    /// all `length` bytes.
    pub fn read_fixed_string(&mut self, length: usize) -> Result<String> {
        let bytes = self.read_bytes(length)?;
        Ok(bytes
            .iter()
            .take_while(|byte| **byte != 0)
            .map(|byte| *byte as char)
            .collect())
    }

    /// Splits off the next `count` bytes as an independent stream.
    ///
    /// Positions in the returned stream are relative to its own start.
    pub fn read_byte_stream(&mut self, count: usize) -> Result<ByteStream<'a, P>> {
        let bytes = self.read_bytes(count)?;
        Ok(ByteStream::new(self.parser, bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::byte_order::{BigEndianByteArrayParser, LittleEndianByteArrayParser};

    #[test]
    fn reads_advance_the_position() {
        let bytes = [0x01, 0x02, 0x04, 0x03, 0x02, 0x01, b'S', b'T'];
        let mut stream = ByteStream::new(LittleEndianByteArrayParser, &bytes);

        assert_eq!(stream.read_uint16().unwrap(), 513);
        assert_eq!(stream.position(), 2);
        assert_eq!(stream.read_uint32().unwrap(), 16_909_060);
        assert_eq!(stream.position(), 6);
        assert_eq!(stream.read_fixed_string(2).unwrap(), "ST");
        assert!(stream.is_at_end());
    }

    #[test]
    fn big_endian_stream_reads_most_significant_first() {
        let bytes = [0x01, 0x02, 0x01, 0x02, 0x03, 0x04];
        let mut stream = ByteStream::new(BigEndianByteArrayParser, &bytes);

        assert_eq!(stream.read_uint16().unwrap(), 0x0102);
        assert_eq!(stream.read_uint32().unwrap(), 0x01020304);
    }

    #[test]
    fn overread_fails_without_moving() {
        let bytes = [0x01, 0x02, 0x03];
        let mut stream = ByteStream::new(LittleEndianByteArrayParser, &bytes);
        stream.skip(2).unwrap();

        let err = stream.read_uint16().unwrap_err();
        assert!(matches!(
            err,
            DicomError::BufferOverread {
                position: 2,
                requested: 2,
                size: 3
            }
        ));
        assert_eq!(stream.position(), 2);
        assert!(stream.read_uint32().is_err());
        assert_eq!(stream.read_uint8().unwrap(), 0x03);
    }

    #[test]
    fn peek_leaves_the_position_alone() {
        let bytes = [0x02, 0x00, 0x10];
        let mut stream = ByteStream::new(LittleEndianByteArrayParser, &bytes);

        assert_eq!(stream.peek_uint16().unwrap(), 2);
        assert_eq!(stream.position(), 0);
        stream.skip(2).unwrap();
        assert!(stream.peek_uint16().is_err());
        assert_eq!(stream.read_uint8().unwrap(), 0x10);
    }

    #[test]
    fn fixed_string_stops_at_nul_but_consumes_everything() {
        let bytes = *b"1.2\0\0\0XY";
        let mut stream = ByteStream::new(LittleEndianByteArrayParser, &bytes);

        assert_eq!(stream.read_fixed_string(6).unwrap(), "1.2");
        assert_eq!(stream.position(), 6);
        assert_eq!(stream.read_fixed_string(2).unwrap(), "XY");
    }

    #[test]
    fn fixed_string_maps_high_bytes_one_to_one() {
        let bytes = [0xE9, 0x41];
        let mut stream = ByteStream::new(LittleEndianByteArrayParser, &bytes);

        let text = stream.read_fixed_string(2).unwrap();
        assert_eq!(text, "\u{e9}A");
        assert_eq!(text.chars().count(), 2);
    }

    #[test]
    fn seek_and_skip_are_bounds_checked() {
        let bytes = [0u8; 4];
        let mut stream = ByteStream::new(LittleEndianByteArrayParser, &bytes);

        stream.seek(4).unwrap();
        assert!(stream.is_at_end());
        assert!(matches!(
            stream.seek(5),
            Err(DicomError::PositionOutOfRange { position: 5, size: 4 })
        ));
        stream.seek(1).unwrap();
        assert!(stream.skip(4).is_err());
        assert_eq!(stream.position(), 1);
        assert!(stream.skip(usize::MAX).is_err());
        stream.skip(3).unwrap();
        assert_eq!(stream.remaining(), 0);
    }

    #[test]
    fn with_position_rejects_positions_past_the_end() {
        let bytes = [0u8; 2];
        assert!(ByteStream::with_position(LittleEndianByteArrayParser, &bytes, 3).is_err());
        let stream = ByteStream::with_position(LittleEndianByteArrayParser, &bytes, 2).unwrap();
        assert_eq!(stream.position(), 2);
    }

    #[test]
    fn sub_stream_has_its_own_positions() {
        let bytes = [0xAA, 0x01, 0x00, 0x02, 0x00, 0xBB];
        let mut stream = ByteStream::new(LittleEndianByteArrayParser, &bytes);
        stream.skip(1).unwrap();

        let mut sub = stream.read_byte_stream(4).unwrap();
        assert_eq!(stream.position(), 5);
        assert_eq!(sub.size(), 4);
        assert_eq!(sub.read_uint16().unwrap(), 1);
        assert_eq!(sub.read_uint16().unwrap(), 2);
        assert!(sub.read_uint8().is_err());
        assert_eq!(stream.read_uint8().unwrap(), 0xBB);
    }
}
