//! tar container archiving, plain and gzipped.
//!
//! The gzipped variants compose `tar::Builder` directly over a
//! `flate2::write::GzEncoder` (and `MultiGzDecoder` on the way back), so a
//! `.tar.gz` is produced as one streaming pipe. No intermediate `.tar` file
//! is ever written, which also means a crash mid-write leaves nothing behind
//! but the incomplete destination itself.

use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tar::{Archive, Builder};

use super::{ArchiveError, require_file, require_source};

/// Archive the contents of `src_dir` into the tar file `dest`.
pub fn archive_dir(src_dir: &Path, dest: &Path) -> Result<(), ArchiveError> {
    require_source(src_dir)?;
    let mut builder = Builder::new(BufWriter::new(File::create(dest)?));
    builder.append_dir_all(".", src_dir)?;
    builder.into_inner()?.flush()?;
    Ok(())
}

/// Archive a single file into the tar file `dest`.
pub fn archive_file(src: &Path, dest: &Path) -> Result<(), ArchiveError> {
    require_file(src)?;
    let name = src
        .file_name()
        .ok_or_else(|| ArchiveError::InvalidEntryPath(src.display().to_string()))?;
    let mut builder = Builder::new(BufWriter::new(File::create(dest)?));
    builder.append_path_with_name(src, name)?;
    builder.into_inner()?.flush()?;
    Ok(())
}

/// Extract the tar file `src` into `dest_dir`.
///
/// `tar::Archive::unpack` already refuses entries that would escape the
/// destination directory.
pub fn extract(src: &Path, dest_dir: &Path) -> Result<(), ArchiveError> {
    require_file(src)?;
    fs::create_dir_all(dest_dir)?;
    let mut archive = Archive::new(BufReader::new(File::open(src)?));
    archive.unpack(dest_dir)?;
    Ok(())
}

/// Archive the contents of `src_dir` into the gzipped tar file `dest`.
pub fn archive_dir_gz(src_dir: &Path, dest: &Path, level: u32) -> Result<(), ArchiveError> {
    require_source(src_dir)?;
    let encoder = GzEncoder::new(
        BufWriter::new(File::create(dest)?),
        Compression::new(level),
    );
    let mut builder = Builder::new(encoder);
    builder.append_dir_all(".", src_dir)?;
    builder.into_inner()?.finish()?.flush()?;
    Ok(())
}

/// Archive a single file into the gzipped tar file `dest`.
pub fn archive_file_gz(src: &Path, dest: &Path, level: u32) -> Result<(), ArchiveError> {
    require_file(src)?;
    let name = src
        .file_name()
        .ok_or_else(|| ArchiveError::InvalidEntryPath(src.display().to_string()))?;
    let encoder = GzEncoder::new(
        BufWriter::new(File::create(dest)?),
        Compression::new(level),
    );
    let mut builder = Builder::new(encoder);
    builder.append_path_with_name(src, name)?;
    builder.into_inner()?.finish()?.flush()?;
    Ok(())
}

/// Extract the gzipped tar file `src` into `dest_dir`.
pub fn extract_gz(src: &Path, dest_dir: &Path) -> Result<(), ArchiveError> {
    require_file(src)?;
    fs::create_dir_all(dest_dir)?;
    let decoder = MultiGzDecoder::new(BufReader::new(File::open(src)?));
    let mut archive = Archive::new(decoder);
    archive.unpack(dest_dir)?;
    Ok(())
}
