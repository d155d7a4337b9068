//! zip container archiving via the zip crate.
//!
//! Directory trees are walked with walkdir and stored with forward-slash
//! relative names, so archives extract identically across platforms. Empty
//! directories are preserved as directory entries.
//!
//! Extraction resolves every entry through `enclosed_name`; an entry whose
//! path would escape the destination (`../`, absolute paths) aborts with
//! [`ArchiveError::InvalidEntryPath`] instead of being written.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::Path;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::{ArchiveError, require_file, require_source};

/// One entry in a zip archive, as reported by [`list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipEntry {
    pub name: String,
    pub size: u64,
    pub compressed_size: u64,
    pub is_dir: bool,
}

fn deflated() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
}

/// Archive the contents of `src_dir` into the zip file `dest`.
pub fn archive_dir(src_dir: &Path, dest: &Path) -> Result<(), ArchiveError> {
    require_source(src_dir)?;
    let mut writer = ZipWriter::new(BufWriter::new(File::create(dest)?));
    let options = deflated();

    for entry in WalkDir::new(src_dir).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        let rel = entry
            .path()
            .strip_prefix(src_dir)
            .map_err(|_| ArchiveError::InvalidEntryPath(entry.path().display().to_string()))?;
        let name = entry_name(rel)?;

        if entry.file_type().is_dir() {
            writer.add_directory(name, options)?;
        } else {
            writer.start_file(name, options)?;
            let mut file = BufReader::new(File::open(entry.path())?);
            io::copy(&mut file, &mut writer)?;
        }
    }

    writer.finish()?;
    Ok(())
}

/// Archive a single file into the zip file `dest`.
pub fn archive_file(src: &Path, dest: &Path) -> Result<(), ArchiveError> {
    require_file(src)?;
    let name = file_name(src)?;
    let mut writer = ZipWriter::new(BufWriter::new(File::create(dest)?));
    writer.start_file(name, deflated())?;
    let mut file = BufReader::new(File::open(src)?);
    io::copy(&mut file, &mut writer)?;
    writer.finish()?;
    Ok(())
}

/// Extract every entry of the zip file `src` into `dest_dir`.
pub fn extract(src: &Path, dest_dir: &Path) -> Result<(), ArchiveError> {
    require_file(src)?;
    let mut archive = ZipArchive::new(BufReader::new(File::open(src)?))?;
    fs::create_dir_all(dest_dir)?;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let rel = entry
            .enclosed_name()
            .ok_or_else(|| ArchiveError::InvalidEntryPath(entry.name().to_string()))?;
        let target = dest_dir.join(rel);

        if entry.is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut out = BufWriter::new(File::create(&target)?);
            io::copy(&mut entry, &mut out)?;
        }
    }
    Ok(())
}

/// List the entries of the zip file `src` without extracting anything.
pub fn list(src: &Path) -> Result<Vec<ZipEntry>, ArchiveError> {
    require_file(src)?;
    let mut archive = ZipArchive::new(BufReader::new(File::open(src)?))?;
    let mut entries = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let entry = archive.by_index(index)?;
        entries.push(ZipEntry {
            name: entry.name().to_string(),
            size: entry.size(),
            compressed_size: entry.compressed_size(),
            is_dir: entry.is_dir(),
        });
    }
    Ok(entries)
}

/// Forward-slash entry name for a relative path.
fn entry_name(rel: &Path) -> Result<String, ArchiveError> {
    let mut parts = Vec::new();
    for component in rel.components() {
        let part = component
            .as_os_str()
            .to_str()
            .ok_or_else(|| ArchiveError::InvalidEntryPath(rel.display().to_string()))?;
        parts.push(part);
    }
    Ok(parts.join("/"))
}

fn file_name(path: &Path) -> Result<String, ArchiveError> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| ArchiveError::InvalidEntryPath(path.display().to_string()))
}
