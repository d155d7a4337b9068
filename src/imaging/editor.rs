//! Chainable image editing.
//!
//! [`ImageEditor`] owns a decoded image and applies transforms by value, so
//! edits chain without copies:
//!
//! ```no_run
//! use packmule::imaging::ImageEditor;
//! # fn main() -> Result<(), packmule::imaging::ImagingError> {
//! ImageEditor::open("photo.jpg".as_ref())?
//!     .correct_orientation()
//!     .resize(1400, 1400)
//!     .grayscale()
//!     .save("photo-bw.jpg".as_ref())?;
//! # Ok(())
//! # }
//! ```
//!
//! The editor remembers the EXIF orientation found at load time;
//! [`correct_orientation`](ImageEditor::correct_orientation) applies the
//! rotate/flip table and clears it. Fallible transforms (those validating a
//! parameter or decoding auxiliary data) return `Result`; the rest return
//! `Self` directly.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use imageproc::geometric_transformations::{Interpolation, rotate_about_center};
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use super::metadata::{self, ImageSize};
use super::orientation::Orientation;
use super::watermark::{ImageWatermark, TextWatermark, apply_image, apply_text};
use super::{ImagingError, Quality, filters};

pub struct ImageEditor {
    image: DynamicImage,
    orientation: Option<Orientation>,
}

impl ImageEditor {
    /// Decode an image file. The EXIF orientation, when present, is
    /// remembered for [`correct_orientation`](Self::correct_orientation).
    pub fn open(path: &Path) -> Result<Self, ImagingError> {
        let image = image::open(path)?;
        Ok(Self {
            image,
            orientation: metadata::read_orientation(path),
        })
    }

    /// Decode in-memory image bytes, sniffing the format from content.
    pub fn from_bytes(data: &[u8]) -> Result<Self, ImagingError> {
        let image = image::load_from_memory(data)?;
        Ok(Self {
            image,
            orientation: metadata::orientation_from_bytes(data),
        })
    }

    /// Wrap an already-decoded image. No orientation is tracked.
    pub fn from_image(image: DynamicImage) -> Self {
        Self {
            image,
            orientation: None,
        }
    }

    /// Current dimensions plus any still-pending EXIF orientation.
    pub fn size(&self) -> ImageSize {
        ImageSize {
            width: self.image.width(),
            height: self.image.height(),
            orientation: self.orientation,
        }
    }

    /// Resize to fit within `width` x `height`, preserving aspect ratio.
    pub fn resize(mut self, width: u32, height: u32) -> Self {
        self.image = self.image.resize(width, height, FilterType::Lanczos3);
        self
    }

    /// Resize to exactly `width` x `height`, ignoring aspect ratio.
    pub fn resize_exact(mut self, width: u32, height: u32) -> Self {
        self.image = self.image.resize_exact(width, height, FilterType::Lanczos3);
        self
    }

    /// Scale both axes by a positive factor.
    pub fn scale(mut self, factor: f32) -> Result<Self, ImagingError> {
        if !(factor > 0.0) {
            return Err(ImagingError::InvalidParameter(format!(
                "scale factor must be positive, got {factor}"
            )));
        }
        let width = ((self.image.width() as f32 * factor).round() as u32).max(1);
        let height = ((self.image.height() as f32 * factor).round() as u32).max(1);
        self.image = self.image.resize_exact(width, height, FilterType::Lanczos3);
        Ok(self)
    }

    pub fn rotate90(mut self) -> Self {
        self.image = self.image.rotate90();
        self
    }

    pub fn rotate180(mut self) -> Self {
        self.image = self.image.rotate180();
        self
    }

    pub fn rotate270(mut self) -> Self {
        self.image = self.image.rotate270();
        self
    }

    /// Rotate by an arbitrary angle (degrees, clockwise) about the center.
    /// The canvas keeps its size; uncovered corners become transparent.
    pub fn rotate(mut self, degrees: f32) -> Self {
        let radians = degrees.to_radians();
        let rotated = rotate_about_center(
            &self.image.to_rgba8(),
            radians,
            Interpolation::Bilinear,
            image::Rgba([0, 0, 0, 0]),
        );
        self.image = DynamicImage::ImageRgba8(rotated);
        self
    }

    pub fn flip_horizontal(mut self) -> Self {
        self.image = self.image.fliph();
        self
    }

    pub fn flip_vertical(mut self) -> Self {
        self.image = self.image.flipv();
        self
    }

    pub fn grayscale(mut self) -> Self {
        self.image = filters::grayscale(self.image);
        self
    }

    pub fn blur(mut self, sigma: f32) -> Result<Self, ImagingError> {
        self.image = filters::gaussian_blur(self.image, sigma)?;
        Ok(self)
    }

    pub fn median_filter(mut self, radius: u32) -> Result<Self, ImagingError> {
        self.image = filters::median(self.image, radius)?;
        Ok(self)
    }

    /// Otsu-threshold binarization to pure black and white.
    pub fn binarize(mut self) -> Self {
        self.image = filters::binarize(self.image);
        self
    }

    pub fn unsharpen(mut self, sigma: f32, threshold: i32) -> Result<Self, ImagingError> {
        self.image = filters::unsharpen(self.image, sigma, threshold)?;
        Ok(self)
    }

    pub fn watermark(mut self, mark: &ImageWatermark) -> Self {
        self.image = apply_image(self.image, mark);
        self
    }

    pub fn watermark_text(mut self, mark: &TextWatermark) -> Result<Self, ImagingError> {
        self.image = apply_text(self.image, mark)?;
        Ok(self)
    }

    /// Apply the pending EXIF orientation so the pixels display upright,
    /// then clear it. A no-op when no orientation was recorded.
    pub fn correct_orientation(mut self) -> Self {
        if let Some(orientation) = self.orientation.take() {
            self.image = orientation.correct(self.image);
        }
        self
    }

    pub fn into_image(self) -> DynamicImage {
        self.image
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Encode to `path`, choosing the format from its extension, at default
    /// quality for lossy formats.
    pub fn save(&self, path: &Path) -> Result<(), ImagingError> {
        self.save_with_quality(path, Quality::default())
    }

    /// Encode to `path` with an explicit lossy quality. Quality currently
    /// affects JPEG only; other formats encode at their codec defaults.
    pub fn save_with_quality(&self, path: &Path, quality: Quality) -> Result<(), ImagingError> {
        let format = ImageFormat::from_path(path).map_err(|_| {
            ImagingError::UnsupportedFormat(
                path.extension()
                    .map(|e| e.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            )
        })?;

        match format {
            ImageFormat::Jpeg => {
                let writer = BufWriter::new(File::create(path)?);
                let encoder = JpegEncoder::new_with_quality(writer, quality.value());
                // JPEG has no alpha channel
                self.image.to_rgb8().write_with_encoder(encoder)?;
                Ok(())
            }
            _ => {
                self.image.save_with_format(path, format)?;
                Ok(())
            }
        }
    }

    /// Encode into a caller-supplied stream. The stream is flushed but
    /// stays open; the caller owns it.
    pub fn write_to<W: Write + Seek>(
        &self,
        writer: &mut W,
        format: ImageFormat,
    ) -> Result<(), ImagingError> {
        if format == ImageFormat::Jpeg {
            let encoder = JpegEncoder::new_with_quality(&mut *writer, Quality::default().value());
            self.image.to_rgb8().write_with_encoder(encoder)?;
        } else {
            self.image.write_to(&mut *writer, format)?;
        }
        writer.flush()?;
        Ok(())
    }
}
