//! xz single-stream compression via xz2 (liblzma).
//!
//! Mirrors the [`gzip`](super::gzip) surface: bytes, files, and
//! caller-supplied streams. `level` is the liblzma preset (0-9).

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use xz2::read::XzDecoder;
use xz2::write::XzEncoder;

use super::{ArchiveError, require_file};

/// Compress a byte slice into an xz stream.
pub fn compress_bytes(data: &[u8], level: u32) -> Result<Vec<u8>, ArchiveError> {
    let mut encoder = XzEncoder::new(Vec::new(), level);
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Decompress an xz stream into bytes.
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>, ArchiveError> {
    let mut decoder = XzDecoder::new(data);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)?;
    Ok(out)
}

/// Compress `src` to `dest` on disk.
pub fn compress_file(src: &Path, dest: &Path, level: u32) -> Result<(), ArchiveError> {
    require_file(src)?;
    let mut reader = BufReader::new(File::open(src)?);
    let mut encoder = XzEncoder::new(BufWriter::new(File::create(dest)?), level);
    io::copy(&mut reader, &mut encoder)?;
    encoder.finish()?.flush()?;
    Ok(())
}

/// Decompress the xz file `src` to `dest` on disk.
pub fn decompress_file(src: &Path, dest: &Path) -> Result<(), ArchiveError> {
    require_file(src)?;
    let mut decoder = XzDecoder::new(BufReader::new(File::open(src)?));
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
    let mut encoder = XzEncoder::new(writer, level);
    let written = io::copy(reader, &mut encoder)?;
    encoder.finish()?.flush()?;
    Ok(written)
}

/// Decompress everything from `reader` into `writer`.
pub fn copy_decompress<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
) -> Result<u64, ArchiveError> {
    let mut decoder = XzDecoder::new(reader);
    let read = io::copy(&mut decoder, writer)?;
    writer.flush()?;
    Ok(read)
}
