//! Shared test utilities: synthetic image fixtures.
//!
//! Real camera files are too heavy to vendor, so tests build their own:
//! gradient JPEGs/PNGs from `image`, and JPEGs with a hand-spliced EXIF
//! APP1 segment for orientation tests.

use image::{ImageEncoder, RgbImage};
use std::path::Path;

/// Encode a small gradient JPEG into memory.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut out = Vec::new();
    image::codecs::jpeg::JpegEncoder::new(&mut out)
        .write_image(
            img.as_raw(),
            width,
            height,
            image::ExtendedColorType::Rgb8,
        )
        .unwrap();
    out
}

/// Encode a small gradient PNG into memory.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 64])
    });
    let mut out = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut out, image::ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

/// Write a gradient JPEG to disk.
pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    std::fs::write(path, jpeg_bytes(width, height)).unwrap();
}

/// Write a gradient JPEG carrying an EXIF orientation tag.
///
/// Splices a minimal APP1 segment (TIFF header + one-entry IFD0 holding
/// tag 0x0112) right after the SOI marker of a plain encoded JPEG.
pub fn jpeg_with_orientation(path: &Path, width: u32, height: u32, orientation: u8) {
    let plain = jpeg_bytes(width, height);
    assert_eq!(&plain[..2], &[0xFF, 0xD8], "encoder must emit SOI first");

    // little-endian TIFF: header, IFD0 with one SHORT entry, no next IFD
    let mut tiff = Vec::new();
    tiff.extend_from_slice(&[0x49, 0x49, 0x2A, 0x00]); // "II", 42
    tiff.extend_from_slice(&8u32.to_le_bytes()); // IFD0 offset
    tiff.extend_from_slice(&1u16.to_le_bytes()); // entry count
    tiff.extend_from_slice(&0x0112u16.to_le_bytes()); // Orientation
    tiff.extend_from_slice(&3u16.to_le_bytes()); // type SHORT
    tiff.extend_from_slice(&1u32.to_le_bytes()); // count
    tiff.extend_from_slice(&[orientation, 0, 0, 0]); // value, padded
    tiff.extend_from_slice(&0u32.to_le_bytes()); // next IFD offset

    let payload_len = 6 + tiff.len(); // "Exif\0\0" prefix
    let mut out = Vec::with_capacity(plain.len() + payload_len + 4);
    out.extend_from_slice(&[0xFF, 0xD8]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&((payload_len + 2) as u16).to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(&tiff);
    out.extend_from_slice(&plain[2..]);

    std::fs::write(path, out).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::metadata;

    #[test]
    fn spliced_exif_reads_back() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("oriented.jpg");
        jpeg_with_orientation(&path, 20, 10, 6);

        let size = metadata::read_size(&path).unwrap();
        assert_eq!((size.width, size.height), (20, 10));
        assert_eq!(
            size.orientation.map(|o| o.exif_value()),
            Some(6)
        );
    }

    #[test]
    fn spliced_jpeg_still_decodes() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("oriented.jpg");
        jpeg_with_orientation(&path, 20, 10, 3);
        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (20, 10));
    }
}
