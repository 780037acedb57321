use std::path::PathBuf;

use clap::Parser;
use log::{debug, info, trace};

use dicom_header_reader::{
    read_file_meta, util, ByteStream, DicomError, ElementHeader, ElementHeaders, Endianness,
};

pub type CommonError = Box<dyn std::error::Error>;
pub type CommonResult<T> = std::result::Result<T, CommonError>;

const VALUE_PREVIEW_LENGTH: usize = 16;

/// Lists the explicit VR element headers of a DICOM file.
#[derive(Debug, Parser)]
#[command(name = "dicom-headers", version)]
struct Args {
    /// File to read
    file: PathBuf,

    /// The file has no 128-byte preamble and DICM prefix
    #[arg(long)]
    no_preamble: bool,

    /// Read the dataset as big endian regardless of the transfer syntax
    #[arg(long)]
    big_endian: bool,

    /// Stop after this many headers
    #[arg(long)]
    limit: Option<usize>,
}

fn print_header(bytes: &[u8], header: &ElementHeader) {
    println!(
        "{}  {:<2}  {:>10}  {:>10}  {}",
        header.tag.comma_form(),
        header.vr,
        header.length,
        header.data_offset,
        util::vr_description(&header.vr).unwrap_or("unknown")
    );

    let preview_end = header
        .value_end()
        .unwrap_or(header.data_offset)
        .min(header.data_offset + VALUE_PREVIEW_LENGTH)
        .min(bytes.len());
    trace!("{}", util::to_hex_string(&bytes[header.data_offset..preview_end]));
}

fn main() -> CommonResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let file_content = std::fs::read(&args.file).map_err(DicomError::from)?;
    info!("{}: {} bytes", args.file.display(), file_content.len());

    let forced = args.big_endian.then_some(Endianness::Big);
    let dataset = read_file_meta(&file_content, !args.no_preamble, forced)?;
    if let Some(uid) = &dataset.transfer_syntax {
        info!("transfer syntax {} ({:?} endian)", uid, dataset.endianness);
    }

    let limit = args.limit.unwrap_or(usize::MAX);
    let mut count = 0;

    for header in dataset.meta_headers.iter().take(limit) {
        print_header(&file_content, header);
        count += 1;
    }

    debug!("dataset starts at offset {}", dataset.offset);
    let mut stream = ByteStream::with_position(dataset.endianness, &file_content, dataset.offset)?;

    for result in ElementHeaders::new(&mut stream).take(limit - count) {
        match result {
            Ok(header) => {
                print_header(&file_content, &header);
                count += 1;
            }
            // already logged by the walker, nothing after it can be located
            Err(DicomError::UndefinedLength { .. }) => break,
            Err(err) => return Err(err.into()),
        }
    }

    info!("{} headers", count);

    Ok(())
}
