//! Image metadata reported by probing and decoding.

use crate::ImageFormat;

/// Metadata obtained from [`probe_header`](crate::Decoding::probe_header) or
/// attached to a [`DecodeOutput`](crate::DecodeOutput).
///
/// `channel_count` and `has_alpha` describe the 8-bit output, not the
/// texture: a two-channel texture decodes to three output channels.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct ImageInfo {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Detected image format.
    pub format: ImageFormat,
    /// Whether the output has an alpha channel.
    pub has_alpha: bool,
    /// Output channels per pixel (3 or 4).
    pub channel_count: u8,
    /// Channels per pixel in the texture (1-4), if known.
    pub source_channels: Option<u8>,
    /// Bits per source sample (8, 16, 32 or 64), if known.
    pub bit_depth: Option<u8>,
    /// Raw `glFormat` from the header.
    pub gl_format: u32,
    /// Raw `glType` from the header.
    pub gl_type: u32,
    /// Mip levels stored in the file. Only the base level is decoded.
    pub mip_levels: u32,
}

impl ImageInfo {
    /// Create a new `ImageInfo` with the given dimensions and format.
    ///
    /// Defaults to three output channels without alpha.
    pub fn new(width: u32, height: u32, format: ImageFormat) -> Self {
        Self {
            width,
            height,
            format,
            has_alpha: false,
            channel_count: 3,
            source_channels: None,
            bit_depth: None,
            gl_format: 0,
            gl_type: 0,
            mip_levels: 1,
        }
    }

    /// Set whether the output has alpha.
    pub fn with_alpha(mut self, has_alpha: bool) -> Self {
        self.has_alpha = has_alpha;
        self
    }

    /// Set the output channel count.
    pub fn with_channel_count(mut self, channel_count: u8) -> Self {
        self.channel_count = channel_count;
        self
    }

    /// Set the source channel count.
    pub fn with_source_channels(mut self, channels: u8) -> Self {
        self.source_channels = Some(channels);
        self
    }

    /// Set the bits per source sample.
    pub fn with_bit_depth(mut self, bit_depth: u8) -> Self {
        self.bit_depth = Some(bit_depth);
        self
    }

    /// Set the raw GL tags.
    pub fn with_gl(mut self, gl_format: u32, gl_type: u32) -> Self {
        self.gl_format = gl_format;
        self.gl_type = gl_type;
        self
    }

    /// Set the stored mip level count.
    pub fn with_mip_levels(mut self, levels: u32) -> Self {
        self.mip_levels = levels;
        self
    }

    /// Bytes per output row (`width × channel_count`), saturating.
    pub fn row_stride(&self) -> usize {
        (self.width as usize).saturating_mul(usize::from(self.channel_count))
    }

    /// Size of the decoded 8-bit buffer in bytes, saturating at `u64::MAX`
    /// so an absurd header still trips a memory limit.
    pub fn output_bytes(&self) -> u64 {
        u64::from(self.width)
            .saturating_mul(u64::from(self.height))
            .saturating_mul(u64::from(self.channel_count))
    }
}
