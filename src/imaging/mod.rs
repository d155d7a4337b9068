//! Image editing and identification.
//!
//! | Module | Role |
//! |--------|------|
//! | [`metadata`] | Content-based format sniffing, dimensions, EXIF orientation |
//! | [`orientation`] | EXIF orientation values and their correction table |
//! | [`editor`] | [`ImageEditor`] — chainable transforms over a decoded image |
//! | [`filters`] | Grayscale, blur, median, Otsu binarization building blocks |
//! | [`watermark`] | Image and text watermark options and placement |
//! | [`thumbnail`] | Fixed-aspect thumbnail generation with EXIF correction |
//!
//! The editor is a plain owned value with no interior mutability; confine
//! one instance to one thread and it is as safe as any other local.

pub mod editor;
pub mod filters;
pub mod metadata;
pub mod orientation;
pub mod thumbnail;
pub mod watermark;

pub use editor::ImageEditor;
pub use metadata::{ImageSize, detect_format, mime_type, read_size, size_from_bytes};
pub use orientation::Orientation;
pub use thumbnail::{ThumbnailSpec, create_thumbnail};
pub use watermark::{Anchor, ImageWatermark, TextWatermark};

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImagingError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("content is not a recognized image format")]
    UnrecognizedContent,
    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Quality for lossy encoding (1-100). Out-of-range values clamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "u8")]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

impl From<u8> for Quality {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}
