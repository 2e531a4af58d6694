//! Source texture to 8-bit RGB/RGBA conversion.
//!
//! Each source pixel is decoded channel by channel into a zeroed 4-byte
//! scratch pixel, BGR layouts are swapped into RGB order, and the first
//! three or four bytes are appended to the output. One- and two-channel
//! sources therefore come out with green and/or blue at zero; luminance is
//! not replicated.

use alloc::vec::Vec;
use enough::Stop;

use crate::error::{DecodeError, DecodeResult};
use crate::gl::{PixelLayout, SampleType};
use crate::pixel::PixelBuffer;
use crate::sample::{ByteOrder, decode_sample};

/// A borrowed uncompressed 2D image with its pixel format.
///
/// Samples are read tightly packed: rows are `width × channels × sample
/// width` bytes with no alignment padding.
#[derive(Clone, Copy, Debug)]
pub struct SourceImage<'a> {
    pub width: u32,
    pub height: u32,
    pub layout: PixelLayout,
    pub sample_type: SampleType,
    pub byte_order: ByteOrder,
    /// Sample bytes, starting at the first pixel.
    pub data: &'a [u8],
}

impl<'a> SourceImage<'a> {
    /// Bytes per source pixel.
    pub fn pixel_stride(&self) -> usize {
        self.layout.channels() * self.sample_type.byte_width()
    }

    /// Bytes per source row, or `None` if it does not fit in `usize`.
    pub fn row_stride(&self) -> Option<usize> {
        (self.width as usize).checked_mul(self.pixel_stride())
    }

    /// Output channels: 4 for four-channel sources, otherwise 3.
    pub fn output_channels(&self) -> u8 {
        if self.layout.channels() == 4 { 4 } else { 3 }
    }

    /// Source bytes the conversion reads, or `None` on overflow.
    pub fn required_bytes(&self) -> Option<usize> {
        self.row_stride()?.checked_mul(self.height as usize)
    }
}

/// Convert `src` to a packed 8-bit buffer.
///
/// `stop` is checked before each row.
pub fn convert(src: &SourceImage<'_>, stop: &dyn Stop) -> DecodeResult<PixelBuffer> {
    let sample_width = src.sample_type.byte_width();
    let dst_channels = src.output_channels();

    let (Some(row_stride), Some(needed)) = (src.row_stride(), src.required_bytes()) else {
        return Err(DecodeError::OutOfMemory { bytes: usize::MAX });
    };
    if src.data.len() < needed {
        return Err(DecodeError::Truncated {
            needed,
            available: src.data.len(),
        });
    }

    let dst_len = (src.width as usize)
        .checked_mul(src.height as usize)
        .and_then(|n| n.checked_mul(usize::from(dst_channels)))
        .ok_or(DecodeError::OutOfMemory { bytes: usize::MAX })?;
    let mut dst = Vec::new();
    dst.try_reserve_exact(dst_len)
        .map_err(|_| DecodeError::OutOfMemory { bytes: dst_len })?;

    let swap = src.layout.is_bgr();
    let dst_channels = usize::from(dst_channels);
    let row_stride = row_stride.max(1);
    let pixel_stride = src.pixel_stride();

    for row in src.data[..needed].chunks_exact(row_stride) {
        stop.check().map_err(DecodeError::Stopped)?;
        for pixel in row.chunks_exact(pixel_stride) {
            let mut scratch = [0u8; 4];
            for (slot, sample) in scratch.iter_mut().zip(pixel.chunks_exact(sample_width)) {
                *slot = decode_sample(sample, src.sample_type, src.byte_order);
            }
            if swap {
                scratch.swap(0, 2);
            }
            dst.extend_from_slice(&scratch[..dst_channels]);
        }
    }

    PixelBuffer::from_vec(dst, src.width, src.height, dst_channels as u8)
        .ok_or(DecodeError::OutOfMemory { bytes: dst_len })
}
