//! gzip single-stream compression via flate2.
//!
//! Six operations, paired by transport: bytes in/out, file paths, and
//! caller-supplied streams. Stream variants take `&mut` and flush on
//! completion but never close what the caller owns; internally opened
//! files are buffered and dropped here.

use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use super::{ArchiveError, require_file};

/// Compress a byte slice into a gzip member.
pub fn compress_bytes(data: &[u8], level: u32) -> Result<Vec<u8>, ArchiveError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::new(level));
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Decompress a gzip member (or concatenated members) into bytes.
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>, ArchiveError> {
    let mut decoder = MultiGzDecoder::new(data);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)?;
    Ok(out)
}

/// Compress `src` to `dest` on disk.
pub fn compress_file(src: &Path, dest: &Path, level: u32) -> Result<(), ArchiveError> {
    require_file(src)?;
    let mut reader = BufReader::new(File::open(src)?);
    let mut encoder = GzEncoder::new(
        BufWriter::new(File::create(dest)?),
        Compression::new(level),
    );
    io::copy(&mut reader, &mut encoder)?;
    encoder.finish()?.flush()?;
    Ok(())
}

/// Decompress the gzip file `src` to `dest` on disk.
pub fn decompress_file(src: &Path, dest: &Path) -> Result<(), ArchiveError> {
    require_file(src)?;
    let mut decoder = MultiGzDecoder::new(BufReader::new(File::open(src)?));
    let mut writer = BufWriter::new(File::create(dest)?);
    io::copy(&mut decoder, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Compress everything from `reader` into `writer`.
pub fn copy_compress<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    level: u32,
) -> Result<u64, ArchiveError> {
    let mut encoder = GzEncoder::new(writer, Compression::new(level));
    let written = io::copy(reader, &mut encoder)?;
    encoder.finish()?.flush()?;
    Ok(written)
}

/// Decompress everything from `reader` into `writer`.
pub fn copy_decompress<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
) -> Result<u64, ArchiveError> {
    let mut decoder = MultiGzDecoder::new(reader);
    let read = io::copy(&mut decoder, writer)?;
    writer.flush()?;
    Ok(read)
}
