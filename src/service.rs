use log::{debug, trace, warn};

use crate::byte_order::{ByteArrayParser, Endianness};
use crate::byte_stream::ByteStream;
use crate::error::{DicomError, HeaderField, Result};
use crate::model::{ElementHeader, Tag};
use crate::util;

pub const PREAMBLE_LENGTH: usize = 128;
pub const DICM_PREFIX: &str = "DICM";
pub const META_GROUP: u16 = 0x0002;
pub const TRANSFER_SYNTAX_UID: Tag = Tag::new(0x0002, 0x0010);

fn truncated(field: HeaderField) -> impl FnOnce(DicomError) -> DicomError {
    move |source| DicomError::TruncatedHeader {
        field,
        source: Box::new(source),
    }
}

pub fn read_tag<P: ByteArrayParser>(stream: &mut ByteStream<'_, P>) -> Result<Tag> {
    let group = stream.read_uint16().map_err(truncated(HeaderField::Group))?;
    let element = stream.read_uint16().map_err(truncated(HeaderField::Element))?;

    Ok(Tag::new(group, element))
}

/// Reads one explicit VR element header and leaves the stream on its value.
pub fn read_dicom_element_explicit<P: ByteArrayParser>(
    stream: &mut ByteStream<'_, P>,
) -> Result<ElementHeader> {
    let tag = read_tag(stream)?;

    // the VR is kept verbatim, even when one of its bytes is NUL
    let vr = stream
        .read_bytes(2)
        .map_err(truncated(HeaderField::Vr))?
        .iter()
        .map(|byte| *byte as char)
        .collect::<String>();

    let length = if util::is_extended_length_vr(&vr) {
        debug!("{} {} uses a 4-byte length", tag, vr);

        stream
            .read_bytes(2)
            .map_err(truncated(HeaderField::Reserved))?;
        stream.read_uint32().map_err(truncated(HeaderField::Length))?
    } else {
        stream.read_uint16().map_err(truncated(HeaderField::Length))? as u32
    };

    let header = ElementHeader {
        tag,
        vr,
        length,
        data_offset: stream.position(),
    };

    trace!(
        "{} vr={} length={} data_offset={}",
        header.tag,
        header.vr,
        header.length,
        header.data_offset
    );

    Ok(header)
}

/// Reads the 128-byte preamble and the `DICM` prefix of a Part 10 file.
pub fn read_part10_prelude<P: ByteArrayParser>(stream: &mut ByteStream<'_, P>) -> Result<()> {
    stream.read_bytes(PREAMBLE_LENGTH)?;

    let prefix = stream.read_bytes(DICM_PREFIX.len())?;
    if prefix != DICM_PREFIX.as_bytes() {
        return Err(DicomError::MissingDicmPrefix {
            found: String::from_utf8_lossy(prefix).into_owned(),
        });
    }

    Ok(())
}

/// Walks a flat run of explicit VR headers, skipping each value.
///
/// Ends cleanly at the exact end of the buffer. After the first error the
/// iterator is exhausted.
pub struct ElementHeaders<'s, 'a, P: ByteArrayParser> {
    stream: &'s mut ByteStream<'a, P>,
    done: bool,
}

impl<'s, 'a, P: ByteArrayParser> ElementHeaders<'s, 'a, P> {
    pub fn new(stream: &'s mut ByteStream<'a, P>) -> Self {
        Self {
            stream,
            done: false,
        }
    }

    /// Group number of the next header, without consuming it.
    pub fn peek_group(&self) -> Option<u16> {
        self.stream.peek_uint16().ok()
    }

    fn next_header(&mut self) -> Result<ElementHeader> {
        let header = read_dicom_element_explicit(&mut *self.stream)?;

        if header.has_undefined_length() {
            warn!(
                "stopping at {}: undefined length at offset {}",
                header.tag, header.data_offset
            );
            return Err(DicomError::UndefinedLength {
                tag: header.tag,
                data_offset: header.data_offset,
            });
        }

        let value_out_of_range = DicomError::ValueOutOfRange {
            tag: header.tag,
            data_offset: header.data_offset,
            length: header.length,
            size: self.stream.size(),
        };
        match header.value_end() {
            Some(end) if end <= self.stream.size() => self.stream.seek(end)?,
            _ => return Err(value_out_of_range),
        }

        Ok(header)
    }
}

impl<P: ByteArrayParser> Iterator for ElementHeaders<'_, '_, P> {
    type Item = Result<ElementHeader>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.stream.is_at_end() {
            return None;
        }

        let result = self.next_header();
        if result.is_err() {
            self.done = true;
        }
        Some(result)
    }
}

/// The file meta group and where the dataset after it begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetStart {
    pub meta_headers: Vec<ElementHeader>,
    pub transfer_syntax: Option<String>,
    pub endianness: Endianness,
    /// Absolute offset of the first dataset header.
    pub offset: usize,
}

/// Reads the optional Part 10 prelude and the file meta group.
///
/// The meta group is always little endian and may be absent. The dataset
/// byte order is `forced` when given, otherwise the one named by the transfer
/// syntax, otherwise little endian.
pub fn read_file_meta(
    bytes: &[u8],
    has_preamble: bool,
    forced: Option<Endianness>,
) -> Result<DatasetStart> {
    let mut stream = ByteStream::new(Endianness::Little, bytes);
    if has_preamble {
        read_part10_prelude(&mut stream)?;
    }

    let mut meta_headers = Vec::new();
    let mut transfer_syntax = None;

    let mut headers = ElementHeaders::new(&mut stream);
    while headers.peek_group() == Some(META_GROUP) {
        let header = match headers.next() {
            Some(result) => result?,
            None => break,
        };

        if header.tag == TRANSFER_SYNTAX_UID {
            let mut value = ByteStream::with_position(Endianness::Little, bytes, header.data_offset)?;
            transfer_syntax = Some(value.read_fixed_string(header.length as usize)?);
        }
        meta_headers.push(header);
    }

    let offset = stream.position();
    let endianness = match (forced, transfer_syntax.as_deref()) {
        (Some(endianness), _) => endianness,
        (None, Some(uid)) => util::endianness_for_transfer_syntax(uid)
            .ok_or_else(|| DicomError::UnsupportedTransferSyntax(uid.to_string()))?,
        (None, None) => Endianness::Little,
    };

    debug!(
        "{} meta headers, dataset at offset {} is {:?} endian",
        meta_headers.len(),
        offset,
        endianness
    );

    Ok(DatasetStart {
        meta_headers,
        transfer_syntax,
        endianness,
        offset,
    })
}
