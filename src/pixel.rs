//! Decoded 8-bit pixel buffer.
//!
//! Pixels are stored as a flat, tightly packed byte buffer (no row padding)
//! with 3 or 4 channels in R, G, B(, A) order. Typed views go through
//! `imgref::ImgVec` with pixels from the `rgb` crate.

use alloc::vec::Vec;
use imgref::ImgVec;
use rgb::{Rgb, Rgba};

/// Row-major 8-bit RGB or RGBA pixels.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
}

impl PixelBuffer {
    /// Wrap an existing buffer.
    ///
    /// Returns `None` unless `channels` is 3 or 4 and `data` holds exactly
    /// `width × height × channels` bytes.
    pub fn from_vec(data: Vec<u8>, width: u32, height: u32, channels: u8) -> Option<Self> {
        if !matches!(channels, 3 | 4) {
            return None;
        }
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(usize::from(channels))?;
        if data.len() != expected {
            return None;
        }
        Some(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channels per pixel (3 or 4).
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Whether the fourth channel is alpha.
    pub fn has_alpha(&self) -> bool {
        self.channels == 4
    }

    /// Bytes per row (`width × channels`).
    pub fn row_stride(&self) -> usize {
        self.width as usize * usize::from(self.channels)
    }

    /// Borrow the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Take the raw bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// One row of raw bytes.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let stride = self.row_stride();
        let start = y as usize * stride;
        Some(&self.data[start..start + stride])
    }

    /// Copy to RGB8. RGBA input drops alpha.
    pub fn to_rgb8(&self) -> ImgVec<Rgb<u8>> {
        let c = usize::from(self.channels);
        let rgb: Vec<Rgb<u8>> = self
            .data
            .chunks_exact(c)
            .map(|p| Rgb {
                r: p[0],
                g: p[1],
                b: p[2],
            })
            .collect();
        ImgVec::new(rgb, self.width as usize, self.height as usize)
    }

    /// Copy to RGBA8. RGB input gets A=255.
    pub fn to_rgba8(&self) -> ImgVec<Rgba<u8>> {
        let c = usize::from(self.channels);
        let rgba: Vec<Rgba<u8>> = self
            .data
            .chunks_exact(c)
            .map(|p| Rgba {
                r: p[0],
                g: p[1],
                b: p[2],
                a: if c == 4 { p[3] } else { 255 },
            })
            .collect();
        ImgVec::new(rgba, self.width as usize, self.height as usize)
    }
}

impl AsRef<[u8]> for PixelBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl core::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &self.channels)
            .field("len", &self.data.len())
            .finish()
    }
}
