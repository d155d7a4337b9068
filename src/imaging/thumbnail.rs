//! Fixed-aspect thumbnail generation.
//!
//! A thumbnail is defined by its aspect ratio and the length of its short
//! edge; the source image is EXIF-corrected, fill-resized to cover the
//! target box, center-cropped to it, then optionally sharpened. Quality
//! applies to lossy destinations.

use image::imageops::FilterType;
use std::path::Path;

use super::editor::ImageEditor;
use super::metadata::ImageSize;
use super::{ImagingError, Quality};

/// Unsharp-mask settings for thumbnail crispness.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Sharpen {
    pub sigma: f32,
    pub threshold: i32,
}

impl Sharpen {
    /// Light sharpening; enough to recover edge contrast lost to downscaling.
    pub fn light() -> Self {
        Self {
            sigma: 0.5,
            threshold: 0,
        }
    }
}

/// What to generate: aspect, short-edge length, quality, sharpening.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbnailSpec {
    /// Target aspect ratio as (width, height).
    pub aspect: (u32, u32),
    /// Length of the shorter edge, in pixels.
    pub short_edge: u32,
    pub quality: Quality,
    pub sharpen: Option<Sharpen>,
}

impl Default for ThumbnailSpec {
    fn default() -> Self {
        Self {
            aspect: (1, 1),
            short_edge: 256,
            quality: Quality::default(),
            sharpen: Some(Sharpen::light()),
        }
    }
}

impl ThumbnailSpec {
    /// Final crop dimensions: the short edge is the smaller aspect side.
    pub fn crop_dimensions(&self) -> (u32, u32) {
        let (aw, ah) = self.aspect;
        if aw <= ah {
            let w = self.short_edge;
            (w, (w as f64 * ah as f64 / aw as f64).round() as u32)
        } else {
            let h = self.short_edge;
            ((h as f64 * aw as f64 / ah as f64).round() as u32, h)
        }
    }

    fn validate(&self) -> Result<(), ImagingError> {
        if self.aspect.0 == 0 || self.aspect.1 == 0 {
            return Err(ImagingError::InvalidParameter(format!(
                "zero aspect component: {}:{}",
                self.aspect.0, self.aspect.1
            )));
        }
        if self.short_edge == 0 {
            return Err(ImagingError::InvalidParameter(
                "short edge must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Generate a thumbnail of `src` at `dest`.
///
/// The source's EXIF orientation is corrected before cropping, so portrait
/// phone shots crop as portraits. Returns the written dimensions.
pub fn create_thumbnail(
    src: &Path,
    dest: &Path,
    spec: &ThumbnailSpec,
) -> Result<ImageSize, ImagingError> {
    spec.validate()?;
    let (crop_w, crop_h) = spec.crop_dimensions();

    let image = ImageEditor::open(src)?
        .correct_orientation()
        .into_image()
        .resize_to_fill(crop_w, crop_h, FilterType::Lanczos3);

    let mut editor = ImageEditor::from_image(image);
    if let Some(sharpen) = spec.sharpen {
        editor = editor.unsharpen(sharpen.sigma, sharpen.threshold)?;
    }
    editor.save_with_quality(dest, spec.quality)?;
    ImageSize::new(crop_w, crop_h)
}
