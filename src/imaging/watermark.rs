//! Watermark options and placement.
//!
//! Two kinds: an image overlay ([`ImageWatermark`]) and rendered text
//! ([`TextWatermark`], caller supplies TTF/OTF bytes). Both place their
//! mark by [`Anchor`] + margin and blend with a clamped opacity. An overlay
//! larger than the base image is scaled down to fit before placement.

use ab_glyph::{FontRef, PxScale};
use image::imageops::FilterType;
use image::{DynamicImage, Rgba, RgbaImage, imageops};
use imageproc::drawing::{draw_text_mut, text_size};
use std::path::Path;

use super::ImagingError;

/// Nine-position placement grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    #[default]
    BottomRight,
}

impl Anchor {
    /// Top-left coordinate for an overlay of `overlay` size on a `base`
    /// canvas, keeping `margin` pixels off the touched edges. Centered axes
    /// ignore the margin. Oversized overlays clamp to the origin.
    pub(crate) fn position(self, base: (u32, u32), overlay: (u32, u32), margin: u32) -> (i64, i64) {
        let (bw, bh) = (base.0 as i64, base.1 as i64);
        let (ow, oh) = (overlay.0 as i64, overlay.1 as i64);
        let m = margin as i64;

        let x = match self {
            Self::TopLeft | Self::CenterLeft | Self::BottomLeft => m,
            Self::TopCenter | Self::Center | Self::BottomCenter => (bw - ow) / 2,
            Self::TopRight | Self::CenterRight | Self::BottomRight => bw - ow - m,
        };
        let y = match self {
            Self::TopLeft | Self::TopCenter | Self::TopRight => m,
            Self::CenterLeft | Self::Center | Self::CenterRight => (bh - oh) / 2,
            Self::BottomLeft | Self::BottomCenter | Self::BottomRight => bh - oh - m,
        };
        (x.max(0), y.max(0))
    }
}

/// An image overlay watermark.
#[derive(Debug, Clone)]
pub struct ImageWatermark {
    overlay: DynamicImage,
    anchor: Anchor,
    margin: u32,
    opacity: f32,
}

impl ImageWatermark {
    pub fn new(overlay: DynamicImage) -> Self {
        Self {
            overlay,
            anchor: Anchor::default(),
            margin: 16,
            opacity: 1.0,
        }
    }

    /// Load the overlay from an image file.
    pub fn open(path: &Path) -> Result<Self, ImagingError> {
        Ok(Self::new(image::open(path)?))
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    /// Opacity in 0.0-1.0; values outside clamp.
    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }
}

/// A rendered-text watermark. `font_data` holds raw TTF/OTF bytes.
#[derive(Debug, Clone)]
pub struct TextWatermark {
    text: String,
    font_data: Vec<u8>,
    height: f32,
    color: Rgba<u8>,
    anchor: Anchor,
    margin: u32,
    opacity: f32,
}

impl TextWatermark {
    pub fn new(text: impl Into<String>, font_data: Vec<u8>) -> Self {
        Self {
            text: text.into(),
            font_data,
            height: 24.0,
            color: Rgba([255, 255, 255, 255]),
            anchor: Anchor::default(),
            margin: 16,
            opacity: 1.0,
        }
    }

    /// Glyph height in pixels.
    pub fn height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    pub fn color(mut self, color: Rgba<u8>) -> Self {
        self.color = color;
        self
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    /// Opacity in 0.0-1.0; values outside clamp.
    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }
}

/// Blend an image watermark onto `base`.
pub(crate) fn apply_image(base: DynamicImage, mark: &ImageWatermark) -> DynamicImage {
    let mut canvas = base.into_rgba8();
    let mut overlay = mark.overlay.to_rgba8();

    if overlay.width() > canvas.width() || overlay.height() > canvas.height() {
        overlay = DynamicImage::ImageRgba8(overlay)
            .resize(canvas.width(), canvas.height(), FilterType::Lanczos3)
            .into_rgba8();
    }

    fade(&mut overlay, mark.opacity);
    let at = mark.anchor.position(
        canvas.dimensions(),
        overlay.dimensions(),
        mark.margin,
    );
    imageops::overlay(&mut canvas, &overlay, at.0, at.1);
    DynamicImage::ImageRgba8(canvas)
}

/// Render and blend a text watermark onto `base`.
pub(crate) fn apply_text(
    base: DynamicImage,
    mark: &TextWatermark,
) -> Result<DynamicImage, ImagingError> {
    if mark.text.trim().is_empty() {
        return Err(ImagingError::InvalidParameter(
            "watermark text is empty".to_string(),
        ));
    }
    let font = FontRef::try_from_slice(&mark.font_data)
        .map_err(|_| ImagingError::InvalidParameter("unreadable font data".to_string()))?;
    let scale = PxScale::from(mark.height);

    let measured = text_size(scale, &font, &mark.text);
    let (text_w, text_h) = (measured.0 as u32, measured.1 as u32);
    if text_w == 0 || text_h == 0 {
        return Err(ImagingError::InvalidParameter(
            "watermark text renders to nothing at this size".to_string(),
        ));
    }

    let mut layer = RgbaImage::new(text_w, text_h);
    draw_text_mut(&mut layer, mark.color, 0, 0, scale, &font, &mark.text);
    fade(&mut layer, mark.opacity);

    let mut canvas = base.into_rgba8();
    let at = mark
        .anchor
        .position(canvas.dimensions(), layer.dimensions(), mark.margin);
    imageops::overlay(&mut canvas, &layer, at.0, at.1);
    Ok(DynamicImage::ImageRgba8(canvas))
}

/// Scale the alpha channel by `opacity`.
fn fade(image: &mut RgbaImage, opacity: f32) {
    if opacity >= 1.0 {
        return;
    }
    for pixel in image.pixels_mut() {
        pixel.0[3] = (f32::from(pixel.0[3]) * opacity).round() as u8;
    }
}
