//! Reader for explicit VR DICOM data element headers.
//!
//! ```
//! use dicom_header_reader::{read_dicom_element_explicit, ByteStream, LittleEndianByteArrayParser};
//!
//! let bytes = [0x10, 0x00, 0x10, 0x00, b'P', b'N', 0x04, 0x00, b'D', b'O', b'E', b' '];
//! let mut stream = ByteStream::new(LittleEndianByteArrayParser, &bytes);
//! let header = read_dicom_element_explicit(&mut stream).unwrap();
//!
//! assert_eq!(header.tag.canonical(), "x00100010");
//! assert_eq!(header.vr, "PN");
//! assert_eq!(header.length, 4);
//! assert_eq!(header.data_offset, 8);
//! ```

pub mod byte_order;
pub mod byte_stream;
pub mod error;
pub mod model;
pub mod service;
pub mod util;

pub use byte_order::{BigEndianByteArrayParser, ByteArrayParser, Endianness, LittleEndianByteArrayParser};
pub use byte_stream::ByteStream;
pub use error::{DicomError, HeaderField, Result};
pub use model::{ElementHeader, Tag, UNDEFINED_LENGTH};
pub use service::{
    read_dicom_element_explicit, read_file_meta, read_part10_prelude, read_tag, DatasetStart,
    ElementHeaders,
};
