//! 7z container archiving via sevenz-rust.
//!
//! The thinnest wrapper in the module: sevenz-rust already exposes
//! whole-tree path helpers, so this file only adds the eager source checks
//! shared with the other formats.

use std::path::Path;

use super::{ArchiveError, require_file, require_source};

/// Archive `src` (file or directory) into the 7z file `dest`.
pub fn compress(src: &Path, dest: &Path) -> Result<(), ArchiveError> {
    require_source(src)?;
    sevenz_rust::compress_to_path(src, dest)?;
    Ok(())
}

/// Extract the 7z file `src` into `dest_dir`.
pub fn extract(src: &Path, dest_dir: &Path) -> Result<(), ArchiveError> {
    require_file(src)?;
    sevenz_rust::decompress_file(src, dest_dir)?;
    Ok(())
}
