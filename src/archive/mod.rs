//! Archive compression and extraction.
//!
//! | Module | Role |
//! |--------|------|
//! | [`format`] | [`ArchiveFormat`] enum: extension dispatch + magic-byte sniffing |
//! | [`gzip`] | gzip single-stream wrappers (bytes, files, streams) |
//! | [`xz`] | xz single-stream wrappers, same surface as gzip |
//! | [`zip`] | zip tree archiving, extraction with escape guard, listing |
//! | [`tar`] | tar and streaming tar.gz archiving/extraction |
//! | [`sevenz`] | 7z archiving/extraction |
//!
//! The entry points [`compress`] and [`extract`] dispatch on file extension.
//! `extract` additionally sniffs the source's leading bytes and refuses a
//! file whose content does not match what its extension claims, so a
//! mislabeled archive errors up front instead of failing halfway through a
//! decode.
//!
//! Everything here is synchronous, single-attempt, blocking I/O on the
//! calling thread. There is no retry policy; callers decide how to recover.

pub mod format;
pub mod gzip;
pub mod sevenz;
pub mod tar;
pub mod xz;
pub mod zip;

pub use format::ArchiveFormat;
pub use zip::ZipEntry;

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default compression level for leveled codecs (gzip, xz, tar.gz).
pub const DEFAULT_LEVEL: u32 = 6;

/// Bytes read from a file head for content sniffing. Covers the first tar
/// header block, whose magic sits at offset 257.
const SNIFF_LEN: usize = 512;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("unsupported archive extension: {0}")]
    UnsupportedExtension(String),
    #[error("content does not match extension: expected {expected}, found {found}")]
    FormatMismatch { expected: ArchiveFormat, found: String },
    #[error("source not found: {0}")]
    SourceNotFound(PathBuf),
    #[error("not a regular file: {0}")]
    NotARegularFile(PathBuf),
    #[error("entry path escapes destination: {0}")]
    InvalidEntryPath(String),
    #[error("zip error: {0}")]
    Zip(#[from] ::zip::result::ZipError),
    #[error("7z error: {0}")]
    SevenZ(#[from] sevenz_rust::Error),
}

/// Compress `src` to `dest`, choosing the format from `dest`'s extension.
///
/// Single-stream formats (gzip, xz) require `src` to be a file; container
/// formats accept a file or a directory. Uses [`DEFAULT_LEVEL`] for leveled
/// codecs; call [`compress_with_level`] to pick one.
pub fn compress(src: &Path, dest: &Path) -> Result<(), ArchiveError> {
    compress_with_level(src, dest, DEFAULT_LEVEL)
}

/// [`compress`] with an explicit compression level (0-9) where the format
/// supports one. Zip and 7z use their codecs' defaults.
pub fn compress_with_level(src: &Path, dest: &Path, level: u32) -> Result<(), ArchiveError> {
    let format = format_for(dest)?;
    require_source(src)?;

    match format {
        ArchiveFormat::Gzip => gzip::compress_file(src, dest, level),
        ArchiveFormat::Xz => xz::compress_file(src, dest, level),
        ArchiveFormat::Zip => {
            if src.is_dir() {
                zip::archive_dir(src, dest)
            } else {
                zip::archive_file(src, dest)
            }
        }
        ArchiveFormat::Tar => {
            if src.is_dir() {
                tar::archive_dir(src, dest)
            } else {
                tar::archive_file(src, dest)
            }
        }
        ArchiveFormat::TarGz => {
            if src.is_dir() {
                tar::archive_dir_gz(src, dest, level)
            } else {
                tar::archive_file_gz(src, dest, level)
            }
        }
        ArchiveFormat::SevenZ => sevenz::compress(src, dest),
    }
}

/// Extract `src` to `dest`, choosing the format from `src`'s extension and
/// verifying the content matches it first.
///
/// For single-stream formats `dest` names the output file; for container
/// formats it names the output directory.
pub fn extract(src: &Path, dest: &Path) -> Result<(), ArchiveError> {
    let format = format_for(src)?;
    require_file(src)?;
    verify_content(src, format)?;

    match format {
        ArchiveFormat::Gzip => gzip::decompress_file(src, dest),
        ArchiveFormat::Xz => xz::decompress_file(src, dest),
        ArchiveFormat::Zip => zip::extract(src, dest),
        ArchiveFormat::Tar => tar::extract(src, dest),
        ArchiveFormat::TarGz => tar::extract_gz(src, dest),
        ArchiveFormat::SevenZ => sevenz::extract(src, dest),
    }
}

fn format_for(path: &Path) -> Result<ArchiveFormat, ArchiveError> {
    ArchiveFormat::from_path(path).ok_or_else(|| {
        ArchiveError::UnsupportedExtension(
            path.extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_default(),
        )
    })
}

/// Sniff the head of `src` and reject a format/extension mismatch.
fn verify_content(src: &Path, expected: ArchiveFormat) -> Result<(), ArchiveError> {
    let mut head = vec![0u8; SNIFF_LEN];
    let mut file = File::open(src)?;
    let read = read_up_to(&mut file, &mut head)?;
    head.truncate(read);

    match ArchiveFormat::sniff(&head) {
        Some(found) if expected.accepts_sniffed(found) => Ok(()),
        Some(found) => Err(ArchiveError::FormatMismatch {
            expected,
            found: found.to_string(),
        }),
        None => Err(ArchiveError::FormatMismatch {
            expected,
            found: "unrecognized content".to_string(),
        }),
    }
}

/// Read until the buffer is full or EOF; a short file is not an error here.
fn read_up_to(reader: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}

/// Eager existence check for any source path.
pub(crate) fn require_source(src: &Path) -> Result<(), ArchiveError> {
    if src.exists() {
        Ok(())
    } else {
        Err(ArchiveError::SourceNotFound(src.to_path_buf()))
    }
}

/// Eager check for sources that must be regular files.
pub(crate) fn require_file(src: &Path) -> Result<(), ArchiveError> {
    if src.is_file() {
        Ok(())
    } else if src.exists() {
        Err(ArchiveError::NotARegularFile(src.to_path_buf()))
    } else {
        Err(ArchiveError::SourceNotFound(src.to_path_buf()))
    }
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    use std::path::{Path, PathBuf};

    /// Build a small mixed tree: top-level file, nested binary file, empty dir.
    pub fn sample_tree(parent: &Path) -> PathBuf {
        let root = parent.join("tree");
        std::fs::create_dir_all(root.join("nested")).unwrap();
        std::fs::create_dir_all(root.join("empty")).unwrap();
        std::fs::write(root.join("alpha.txt"), b"alpha contents\n").unwrap();
        std::fs::write(
            root.join("nested/beta.bin"),
            (0u8..=255).collect::<Vec<_>>(),
        )
        .unwrap();
        root
    }

    /// Assert both trees contain the same files with identical bytes.
    /// Compares files only; empty-directory handling varies per format and
    /// is asserted where a format guarantees it.
    pub fn assert_trees_equal(expected: &Path, actual: &Path) {
        let collect = |root: &Path| -> Vec<PathBuf> {
            let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
                .into_iter()
                .map(|e| e.unwrap())
                .filter(|e| e.file_type().is_file())
                .map(|e| e.path().strip_prefix(root).unwrap().to_path_buf())
                .collect();
            files.sort();
            files
        };

        let expected_files = collect(expected);
        assert_eq!(expected_files, collect(actual), "file sets differ");
        for rel in expected_files {
            assert_eq!(
                std::fs::read(expected.join(&rel)).unwrap(),
                std::fs::read(actual.join(&rel)).unwrap(),
                "contents differ for {}",
                rel.display()
            );
        }
    }
}
