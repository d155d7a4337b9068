//! # packmule
//!
//! A file toolkit: archive compression, image editing with EXIF handling,
//! and RSA key-pairs. Every operation is a thin, validated layer over a
//! mature ecosystem crate; packmule's job is input checking, format
//! dispatch, and resource lifecycle, not codec work.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`archive`] | Compress/extract dispatch over gzip, xz, zip, tar, tar.gz, 7z |
//! | [`imaging`] | Image editor (resize/rotate/filter/watermark), EXIF orientation, format sniffing, thumbnails |
//! | [`keys`] | RSA key-pair generation, PKCS#8/SPKI import/export, encrypt/sign |
//! | [`config`] | Optional `config.toml` defaults for the CLI |
//!
//! # Design Decisions
//!
//! ## Content Over Extension
//!
//! Extensions choose which codec a caller is asking for; content bytes
//! decide whether the file really is one. [`archive::extract`] sniffs magic
//! bytes and refuses a mislabeled file up front, and
//! [`imaging::detect_format`] identifies images the same way.
//!
//! ## Streaming tar.gz
//!
//! `.tar.gz` archives are produced by writing the tar stream straight into
//! a gzip encoder. There is no intermediate `.tar` file, so there is
//! nothing to clean up (or orphan) if the process dies mid-write.
//!
//! ## Errors Stay Close to Their Cause
//!
//! Each module has its own thiserror enum. Precondition failures (missing
//! sources, bad parameters) get dedicated variants raised before any I/O;
//! underlying I/O and codec errors pass through via `#[from]` without
//! translation. Nothing retries.
//!
//! ## Synchronous by Design
//!
//! All operations are blocking calls on the calling thread. The only
//! stateful type, [`imaging::ImageEditor`], is an owned value with no
//! interior mutability; use one instance per thread. Batch parallelism
//! lives in the CLI (rayon), not the library.

pub mod archive;
pub mod config;
pub mod imaging;
pub mod keys;

#[cfg(test)]
pub(crate) mod test_helpers;
