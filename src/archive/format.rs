//! Archive format identification.
//!
//! Two independent signals identify a format:
//! - **Extension dispatch** ([`ArchiveFormat::from_path`]) decides which
//!   codec a destination or source path asks for. The `tar.gz` double
//!   extension and its `tgz` shorthand both map to [`ArchiveFormat::TarGz`].
//! - **Content sniffing** ([`ArchiveFormat::sniff`]) reads magic bytes and
//!   never trusts the filename. [`extract`](super::extract) cross-checks the
//!   two so a mislabeled file fails loudly instead of feeding garbage to a
//!   decoder.

use std::fmt;
use std::path::Path;

/// A supported archive or compression format.
///
/// Single-stream formats (`Gzip`, `Xz`) compress exactly one file.
/// Container formats (`Zip`, `Tar`, `TarGz`, `SevenZ`) hold a directory tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Gzip,
    Xz,
    Zip,
    Tar,
    TarGz,
    SevenZ,
}

/// Offset of the `ustar` magic within a tar header block.
const TAR_MAGIC_OFFSET: usize = 257;

impl ArchiveFormat {
    /// Determine the format a path's extension asks for.
    ///
    /// Extensions are compared case-insensitively. Returns `None` for
    /// unknown or missing extensions; the dispatch layer turns that into
    /// an unsupported-extension error.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "gz" | "gzip" => {
                // foo.tar.gz asks for the combined pipe, foo.gz for plain gzip
                if has_tar_stem(path) {
                    Some(Self::TarGz)
                } else {
                    Some(Self::Gzip)
                }
            }
            "tgz" => Some(Self::TarGz),
            "xz" => Some(Self::Xz),
            "zip" => Some(Self::Zip),
            "tar" => Some(Self::Tar),
            "7z" => Some(Self::SevenZ),
            _ => None,
        }
    }

    /// Identify a format from leading file content.
    ///
    /// A gzip member does not reveal what it wraps, so a gzipped tar sniffs
    /// as `Gzip`; callers treating `TarGz` paths accept that answer. Plain
    /// tar has no leading magic at all, only `ustar` at offset 257, which is
    /// why the buffer should cover at least the first header block.
    pub fn sniff(data: &[u8]) -> Option<Self> {
        match data {
            [0x1F, 0x8B, ..] => Some(Self::Gzip),
            [0xFD, b'7', b'z', b'X', b'Z', 0x00, ..] => Some(Self::Xz),
            [b'P', b'K', 0x03, 0x04, ..] | [b'P', b'K', 0x05, 0x06, ..] => Some(Self::Zip),
            [b'7', b'z', 0xBC, 0xAF, 0x27, 0x1C, ..] => Some(Self::SevenZ),
            _ if data.len() > TAR_MAGIC_OFFSET + 5
                && &data[TAR_MAGIC_OFFSET..TAR_MAGIC_OFFSET + 5] == b"ustar" =>
            {
                Some(Self::Tar)
            }
            _ => None,
        }
    }

    /// Canonical file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Gzip => "gz",
            Self::Xz => "xz",
            Self::Zip => "zip",
            Self::Tar => "tar",
            Self::TarGz => "tar.gz",
            Self::SevenZ => "7z",
        }
    }

    /// Whether this format holds a directory tree rather than a single stream.
    pub fn is_container(self) -> bool {
        !matches!(self, Self::Gzip | Self::Xz)
    }

    /// The sniffed answer compatible with this extension-derived format.
    ///
    /// `TarGz` is the one case where the two signals legitimately disagree.
    pub(crate) fn accepts_sniffed(self, sniffed: Self) -> bool {
        sniffed == self || (self == Self::TarGz && sniffed == Self::Gzip)
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Gzip => "gzip",
            Self::Xz => "xz",
            Self::Zip => "zip",
            Self::Tar => "tar",
            Self::TarGz => "tar.gz",
            Self::SevenZ => "7z",
        };
        f.write_str(name)
    }
}

/// True when the path stem itself ends in `.tar` (e.g. `backup.tar.gz`).
fn has_tar_stem(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|s| s.to_lowercase().ends_with(".tar"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_dispatch_basic_formats() {
        assert_eq!(
            ArchiveFormat::from_path(Path::new("a.gz")),
            Some(ArchiveFormat::Gzip)
        );
        assert_eq!(
            ArchiveFormat::from_path(Path::new("a.xz")),
            Some(ArchiveFormat::Xz)
        );
        assert_eq!(
            ArchiveFormat::from_path(Path::new("a.zip")),
            Some(ArchiveFormat::Zip)
        );
        assert_eq!(
            ArchiveFormat::from_path(Path::new("a.tar")),
            Some(ArchiveFormat::Tar)
        );
        assert_eq!(
            ArchiveFormat::from_path(Path::new("a.7z")),
            Some(ArchiveFormat::SevenZ)
        );
    }

    #[test]
    fn extension_dispatch_tar_gz_variants() {
        assert_eq!(
            ArchiveFormat::from_path(Path::new("backup.tar.gz")),
            Some(ArchiveFormat::TarGz)
        );
        assert_eq!(
            ArchiveFormat::from_path(Path::new("backup.tgz")),
            Some(ArchiveFormat::TarGz)
        );
        // plain .gz without a .tar stem stays gzip
        assert_eq!(
            ArchiveFormat::from_path(Path::new("notes.txt.gz")),
            Some(ArchiveFormat::Gzip)
        );
    }

    #[test]
    fn extension_dispatch_is_case_insensitive() {
        assert_eq!(
            ArchiveFormat::from_path(Path::new("A.ZIP")),
            Some(ArchiveFormat::Zip)
        );
        assert_eq!(
            ArchiveFormat::from_path(Path::new("B.TAR.GZ")),
            Some(ArchiveFormat::TarGz)
        );
    }

    #[test]
    fn unknown_and_missing_extensions_rejected() {
        assert_eq!(ArchiveFormat::from_path(Path::new("a.rar")), None);
        assert_eq!(ArchiveFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn sniff_magic_bytes() {
        assert_eq!(
            ArchiveFormat::sniff(&[0x1F, 0x8B, 0x08, 0x00]),
            Some(ArchiveFormat::Gzip)
        );
        assert_eq!(
            ArchiveFormat::sniff(&[0xFD, b'7', b'z', b'X', b'Z', 0x00]),
            Some(ArchiveFormat::Xz)
        );
        assert_eq!(
            ArchiveFormat::sniff(b"PK\x03\x04rest"),
            Some(ArchiveFormat::Zip)
        );
        assert_eq!(
            ArchiveFormat::sniff(&[b'7', b'z', 0xBC, 0xAF, 0x27, 0x1C]),
            Some(ArchiveFormat::SevenZ)
        );
        assert_eq!(ArchiveFormat::sniff(b"plain text"), None);
    }

    #[test]
    fn sniff_tar_ustar_magic() {
        let mut block = vec![0u8; 512];
        block[TAR_MAGIC_OFFSET..TAR_MAGIC_OFFSET + 5].copy_from_slice(b"ustar");
        assert_eq!(ArchiveFormat::sniff(&block), Some(ArchiveFormat::Tar));
    }

    #[test]
    fn tar_gz_accepts_gzip_sniff() {
        assert!(ArchiveFormat::TarGz.accepts_sniffed(ArchiveFormat::Gzip));
        assert!(!ArchiveFormat::Zip.accepts_sniffed(ArchiveFormat::Gzip));
        assert!(ArchiveFormat::Zip.accepts_sniffed(ArchiveFormat::Zip));
    }

    #[test]
    fn container_classification() {
        assert!(!ArchiveFormat::Gzip.is_container());
        assert!(!ArchiveFormat::Xz.is_container());
        assert!(ArchiveFormat::Zip.is_container());
        assert!(ArchiveFormat::TarGz.is_container());
    }
}
