//! Image identification: format sniffing, dimensions, EXIF orientation.
//!
//! Formats are always detected from content bytes, never from the file
//! extension. Dimension reads go through the image crate's header parsers,
//! so no full decode happens. EXIF extraction is delegated to kamadak-exif
//! and is strictly best-effort: images without EXIF (or with EXIF this
//! parser cannot read) report `orientation: None` rather than an error.

use image::{ImageFormat, ImageReader};
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;

use super::ImagingError;
use super::orientation::Orientation;

/// Dimensions of an image, plus its EXIF orientation when one is recorded.
///
/// `width` and `height` are the stored pixel dimensions; call [`oriented`]
/// for the dimensions after orientation correction.
///
/// [`oriented`]: ImageSize::oriented
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Result<Self, ImagingError> {
        if width == 0 || height == 0 {
            return Err(ImagingError::InvalidParameter(format!(
                "zero image dimension: {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            orientation: None,
        })
    }

    pub fn with_orientation(mut self, orientation: Option<Orientation>) -> Self {
        self.orientation = orientation;
        self
    }

    /// The size as displayed after orientation correction: transposing
    /// orientations (EXIF 5-8) swap the axes.
    pub fn oriented(self) -> (u32, u32) {
        match self.orientation {
            Some(o) if o.swaps_axes() => (self.height, self.width),
            _ => (self.width, self.height),
        }
    }
}

/// Sniff the image format from leading content bytes.
pub fn detect_format(data: &[u8]) -> Result<ImageFormat, ImagingError> {
    image::guess_format(data).map_err(|_| ImagingError::UnrecognizedContent)
}

/// MIME type of the sniffed format, e.g. `image/jpeg`.
pub fn mime_type(data: &[u8]) -> Result<&'static str, ImagingError> {
    Ok(detect_format(data)?.to_mime_type())
}

/// Read dimensions and EXIF orientation from an image file.
pub fn read_size(path: &Path) -> Result<ImageSize, ImagingError> {
    let (width, height) = image::image_dimensions(path)?;
    Ok(ImageSize::new(width, height)?.with_orientation(read_orientation(path)))
}

/// Read dimensions and EXIF orientation from in-memory image bytes.
pub fn size_from_bytes(data: &[u8]) -> Result<ImageSize, ImagingError> {
    let (width, height) = ImageReader::new(Cursor::new(data))
        .with_guessed_format()?
        .into_dimensions()?;
    Ok(ImageSize::new(width, height)?.with_orientation(orientation_from_bytes(data)))
}

/// EXIF orientation of an image file, if the file records one.
pub fn read_orientation(path: &Path) -> Option<Orientation> {
    let file = File::open(path).ok()?;
    orientation_from_reader(&mut BufReader::new(file))
}

/// EXIF orientation of in-memory image bytes, if present.
pub fn orientation_from_bytes(data: &[u8]) -> Option<Orientation> {
    orientation_from_reader(&mut BufReader::new(Cursor::new(data)))
}

fn orientation_from_reader<R: std::io::BufRead + std::io::Seek>(
    reader: &mut R,
) -> Option<Orientation> {
    let exif = exif::Reader::new().read_from_container(reader).ok()?;
    let field = exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)?;
    Orientation::from_exif(field.value.get_uint(0)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{png_bytes, write_jpeg};

    #[test]
    fn detects_jpeg_and_png_from_content() {
        let tmp = tempfile::TempDir::new().unwrap();
        // a JPEG mislabeled as .png still sniffs as JPEG
        let path = tmp.path().join("lying.png");
        write_jpeg(&path, 32, 16);
        let data = std::fs::read(&path).unwrap();
        assert_eq!(detect_format(&data).unwrap(), ImageFormat::Jpeg);
        assert_eq!(mime_type(&data).unwrap(), "image/jpeg");

        assert_eq!(
            detect_format(&png_bytes(8, 8)).unwrap(),
            ImageFormat::Png
        );
    }

    #[test]
    fn garbage_content_is_unrecognized() {
        assert!(matches!(
            detect_format(b"not an image at all"),
            Err(ImagingError::UnrecognizedContent)
        ));
    }

    #[test]
    fn read_size_reports_dimensions_without_orientation() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("plain.jpg");
        write_jpeg(&path, 200, 150);

        let size = read_size(&path).unwrap();
        assert_eq!((size.width, size.height), (200, 150));
        // synthetic JPEG carries no EXIF segment
        assert_eq!(size.orientation, None);
        assert_eq!(size.oriented(), (200, 150));
    }

    #[test]
    fn size_from_bytes_matches_file_read() {
        let data = png_bytes(64, 48);
        let size = size_from_bytes(&data).unwrap();
        assert_eq!((size.width, size.height), (64, 48));
    }

    #[test]
    fn oriented_swaps_axes_for_transposing_values() {
        let size = ImageSize::new(40, 30)
            .unwrap()
            .with_orientation(Orientation::from_exif(6));
        assert_eq!(size.oriented(), (30, 40));

        let size = ImageSize::new(40, 30)
            .unwrap()
            .with_orientation(Orientation::from_exif(3));
        assert_eq!(size.oriented(), (40, 30));
    }

    #[test]
    fn zero_dimension_rejected() {
        assert!(matches!(
            ImageSize::new(0, 10),
            Err(ImagingError::InvalidParameter(_))
        ));
    }
}
