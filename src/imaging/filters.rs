//! Pixel filter building blocks used by the editor.
//!
//! All of these delegate to the image/imageproc crates; the only logic here
//! is parameter validation and the Otsu threshold selection feeding the
//! binarization.

use image::DynamicImage;
use imageproc::contrast::{ThresholdType, otsu_level, threshold};

use super::ImagingError;

/// Luma conversion. Output is a single-channel image.
pub fn grayscale(image: DynamicImage) -> DynamicImage {
    DynamicImage::ImageLuma8(image.to_luma8())
}

/// Gaussian blur with the given sigma. Sigma must be positive.
pub fn gaussian_blur(image: DynamicImage, sigma: f32) -> Result<DynamicImage, ImagingError> {
    if !(sigma > 0.0) {
        return Err(ImagingError::InvalidParameter(format!(
            "blur sigma must be positive, got {sigma}"
        )));
    }
    Ok(image.blur(sigma))
}

/// Median filter over a square window of the given radius.
///
/// A radius of `r` spans a `(2r+1)x(2r+1)` window. Radius zero is rejected
/// because it would be an expensive no-op.
pub fn median(image: DynamicImage, radius: u32) -> Result<DynamicImage, ImagingError> {
    if radius == 0 {
        return Err(ImagingError::InvalidParameter(
            "median radius must be at least 1".to_string(),
        ));
    }
    let filtered = imageproc::filter::median_filter(&image.to_rgba8(), radius, radius);
    Ok(DynamicImage::ImageRgba8(filtered))
}

/// Binarize via Otsu's method: pick the threshold that minimizes intra-class
/// variance of the luma histogram, then map pixels to pure black/white.
pub fn binarize(image: DynamicImage) -> DynamicImage {
    let gray = image.to_luma8();
    let level = otsu_level(&gray);
    DynamicImage::ImageLuma8(threshold(&gray, level, ThresholdType::Binary))
}

/// Unsharp mask: sharpen edges whose contrast exceeds `threshold`.
pub fn unsharpen(image: DynamicImage, sigma: f32, threshold: i32) -> Result<DynamicImage, ImagingError> {
    if !(sigma > 0.0) {
        return Err(ImagingError::InvalidParameter(format!(
            "unsharpen sigma must be positive, got {sigma}"
        )));
    }
    Ok(image.unsharpen(sigma, threshold))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    /// Half black, half white, with a little noise on the boundary.
    fn bimodal() -> DynamicImage {
        let img = RgbImage::from_fn(40, 40, |x, _| {
            if x < 20 { Rgb([10, 10, 10]) } else { Rgb([240, 240, 240]) }
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn grayscale_produces_single_channel() {
        let out = grayscale(bimodal());
        assert!(matches!(out, DynamicImage::ImageLuma8(_)));
        assert_eq!((out.width(), out.height()), (40, 40));
    }

    #[test]
    fn binarize_splits_bimodal_image_to_extremes() {
        let out = binarize(bimodal()).to_luma8();
        assert_eq!(out.get_pixel(0, 0).0, [0]);
        assert_eq!(out.get_pixel(39, 0).0, [255]);
        // every pixel lands on one of the two poles
        assert!(out.pixels().all(|p| p.0 == [0] || p.0 == [255]));
    }

    #[test]
    fn median_removes_isolated_speck() {
        let mut img = RgbImage::from_pixel(15, 15, Rgb([200, 200, 200]));
        img.put_pixel(7, 7, Rgb([0, 0, 0]));
        let out = median(DynamicImage::ImageRgb8(img), 1).unwrap().to_rgb8();
        assert_eq!(out.get_pixel(7, 7).0, [200, 200, 200]);
    }

    #[test]
    fn blur_preserves_dimensions() {
        let out = gaussian_blur(bimodal(), 1.5).unwrap();
        assert_eq!((out.width(), out.height()), (40, 40));
    }

    #[test]
    fn invalid_parameters_rejected() {
        assert!(gaussian_blur(bimodal(), 0.0).is_err());
        assert!(gaussian_blur(bimodal(), -1.0).is_err());
        assert!(median(bimodal(), 0).is_err());
        assert!(unsharpen(bimodal(), 0.0, 2).is_err());
    }
}
