//! Decode output.

use imgref::ImgVec;
use rgb::{Rgb, Rgba};

use crate::{ImageFormat, ImageInfo, PixelBuffer};

/// Output from a decode operation.
///
/// Carries everything an image-loading host needs: the packed bytes,
/// dimensions, whether there is alpha, and the row stride.
pub struct DecodeOutput {
    pixels: PixelBuffer,
    info: ImageInfo,
}

impl DecodeOutput {
    /// Create a new decode output.
    pub fn new(pixels: PixelBuffer, info: ImageInfo) -> Self {
        Self { pixels, info }
    }

    /// Borrow the pixel buffer.
    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    /// Take the pixel buffer, consuming this output.
    pub fn into_pixels(self) -> PixelBuffer {
        self.pixels
    }

    /// Packed 8-bit samples, `row_stride()` bytes per row.
    pub fn bytes(&self) -> &[u8] {
        self.pixels.as_bytes()
    }

    /// Convert to RGB8, consuming this output.
    pub fn into_rgb8(self) -> ImgVec<Rgb<u8>> {
        self.pixels.to_rgb8()
    }

    /// Convert to RGBA8, consuming this output.
    pub fn into_rgba8(self) -> ImgVec<Rgba<u8>> {
        self.pixels.to_rgba8()
    }

    /// Image metadata.
    pub fn info(&self) -> &ImageInfo {
        &self.info
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Whether the pixels carry alpha (four channels).
    pub fn has_alpha(&self) -> bool {
        self.pixels.has_alpha()
    }

    /// Bytes per row.
    pub fn row_stride(&self) -> usize {
        self.pixels.row_stride()
    }

    /// The detected format.
    pub fn format(&self) -> ImageFormat {
        self.info.format
    }
}

impl core::fmt::Debug for DecodeOutput {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DecodeOutput")
            .field("pixels", &self.pixels)
            .field("info", &self.info)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn decode_output_accessors() {
        let pixels = PixelBuffer::from_vec(vec![1, 2, 3, 4, 5, 6], 2, 1, 3).unwrap();
        let info = ImageInfo::new(2, 1, ImageFormat::Ktx).with_channel_count(3);
        let output = DecodeOutput::new(pixels, info);
        assert_eq!(output.width(), 2);
        assert_eq!(output.height(), 1);
        assert!(!output.has_alpha());
        assert_eq!(output.row_stride(), 6);
        assert_eq!(output.bytes(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(output.format(), ImageFormat::Ktx);
        assert_eq!(output.info().channel_count, 3);

        let img = output.into_rgba8();
        assert_eq!(img.buf()[1].a, 255);
    }

    #[test]
    fn into_rgb8_from_rgba() {
        let pixels = PixelBuffer::from_vec(vec![9, 8, 7, 6], 1, 1, 4).unwrap();
        let info = ImageInfo::new(1, 1, ImageFormat::Ktx)
            .with_alpha(true)
            .with_channel_count(4);
        let output = DecodeOutput::new(pixels, info);
        assert!(output.has_alpha());
        assert_eq!(output.into_rgb8().buf()[0], Rgb { r: 9, g: 8, b: 7 });
    }
}
