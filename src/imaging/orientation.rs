//! EXIF orientation handling.
//!
//! The orientation tag (values 1-8) records how a camera was held so a
//! viewer can display the pixels upright. Correction is a fixed table of at
//! most two rotate/flip operations per value; orientations 5-8 also swap
//! the image's reported width and height.
//!
//! | Value | Correction |
//! |-------|------------|
//! | 1 | none |
//! | 2 | flip horizontal |
//! | 3 | rotate 180° |
//! | 4 | flip vertical |
//! | 5 | flip vertical, then rotate 90° CW |
//! | 6 | rotate 90° CW |
//! | 7 | flip horizontal, then rotate 90° CW |
//! | 8 | rotate 270° CW |

use image::DynamicImage;

/// An EXIF orientation value (1-8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(into = "u8")]
pub enum Orientation {
    Normal,
    FlipHorizontal,
    Rotate180,
    FlipVertical,
    Transpose,
    Rotate90,
    Transverse,
    Rotate270,
}

impl Orientation {
    /// Map a raw EXIF tag value to an orientation. Values outside 1-8 are
    /// undefined by the standard and yield `None`.
    pub fn from_exif(value: u32) -> Option<Self> {
        match value {
            1 => Some(Self::Normal),
            2 => Some(Self::FlipHorizontal),
            3 => Some(Self::Rotate180),
            4 => Some(Self::FlipVertical),
            5 => Some(Self::Transpose),
            6 => Some(Self::Rotate90),
            7 => Some(Self::Transverse),
            8 => Some(Self::Rotate270),
            _ => None,
        }
    }

    /// The raw EXIF tag value.
    pub fn exif_value(self) -> u8 {
        match self {
            Self::Normal => 1,
            Self::FlipHorizontal => 2,
            Self::Rotate180 => 3,
            Self::FlipVertical => 4,
            Self::Transpose => 5,
            Self::Rotate90 => 6,
            Self::Transverse => 7,
            Self::Rotate270 => 8,
        }
    }

    /// Whether correcting this orientation swaps width and height.
    pub fn swaps_axes(self) -> bool {
        self.exif_value() >= 5
    }

    /// Apply the correction sequence so the pixels display upright.
    pub fn correct(self, image: DynamicImage) -> DynamicImage {
        match self {
            Self::Normal => image,
            Self::FlipHorizontal => image.fliph(),
            Self::Rotate180 => image.rotate180(),
            Self::FlipVertical => image.flipv(),
            Self::Transpose => image.flipv().rotate90(),
            Self::Rotate90 => image.rotate90(),
            Self::Transverse => image.fliph().rotate90(),
            Self::Rotate270 => image.rotate270(),
        }
    }
}

impl From<Orientation> for u8 {
    fn from(value: Orientation) -> Self {
        value.exif_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn landscape() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::new(40, 30))
    }

    #[test]
    fn from_exif_covers_defined_range() {
        for value in 1..=8 {
            let o = Orientation::from_exif(value).unwrap();
            assert_eq!(o.exif_value() as u32, value);
        }
        assert_eq!(Orientation::from_exif(0), None);
        assert_eq!(Orientation::from_exif(9), None);
    }

    #[test]
    fn corrected_dimensions_match_expected_for_all_eight_values() {
        // orientations 1-4 keep 40x30, 5-8 swap to 30x40
        for value in 1..=8u32 {
            let o = Orientation::from_exif(value).unwrap();
            let corrected = o.correct(landscape());
            let expected = if o.swaps_axes() { (30, 40) } else { (40, 30) };
            assert_eq!(
                (corrected.width(), corrected.height()),
                expected,
                "orientation {value}"
            );
        }
    }

    #[test]
    fn axis_swap_tracks_the_transposing_values() {
        for value in 1..=4 {
            assert!(!Orientation::from_exif(value).unwrap().swaps_axes());
        }
        for value in 5..=8 {
            assert!(Orientation::from_exif(value).unwrap().swaps_axes());
        }
    }

    #[test]
    fn correction_moves_the_marked_pixel_where_expected() {
        // mark the top-left pixel, rotate 90 CW puts it top-right
        let mut img = RgbImage::new(4, 2);
        img.put_pixel(0, 0, image::Rgb([255, 0, 0]));
        let corrected = Orientation::Rotate90.correct(DynamicImage::ImageRgb8(img));
        let rgb = corrected.to_rgb8();
        assert_eq!(rgb.get_pixel(rgb.width() - 1, 0).0, [255, 0, 0]);
    }
}
