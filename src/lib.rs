//! KTX 1.1 texture decoder producing 8-bit RGB/RGBA images.
//!
//! Uncompressed, non-array, non-cubemap 2D textures are decoded from their
//! base mip level:
//!
//! - [`KtxDecoderConfig`] / [`KtxDecodeJob`] implement [`Decoding`] / [`DecodingJob`]
//! - [`IncrementalLoader`] buffers chunks and reports through [`LoadCallbacks`]
//! - [`DecodeOutput`] carries a packed [`PixelBuffer`] plus [`ImageInfo`]
//! - [`ImageFormat`] / [`FormatInfo`] handle detection by magic bytes, MIME type and extension
//! - [`ResourceLimits`] caps file size, dimensions and output memory
//! - [`container`] exposes the raw container reader, [`gl`] the GL format tags
//!
//! Any texture with fewer than four channels decodes to RGB with the missing
//! channels set to zero. Four-channel textures decode to RGBA. Every sample
//! type is normalized to 8 bits.

#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

mod capabilities;
pub mod container;
mod convert;
mod decoder;
mod error;
mod format;
pub mod gl;
mod info;
mod limits;
mod loader;
mod output;
mod pixel;
mod sample;
mod traits;

pub use capabilities::CodecCapabilities;
pub use convert::{SourceImage, convert};
pub use decoder::{KtxDecodeJob, KtxDecoderConfig};
pub use error::{DecodeError, DecodeResult, KtxError};
pub use format::{FormatInfo, ImageFormat, SignaturePattern};
pub use info::ImageInfo;
pub use limits::{LimitExceeded, ResourceLimits};
pub use loader::{IncrementalLoader, LoadCallbacks};
pub use output::DecodeOutput;
pub use pixel::PixelBuffer;
pub use sample::{ByteOrder, decode_sample, half_to_f32};
pub use traits::{Decoding, DecodingJob};

// Re-exports for users.
pub use enough::{Stop, StopReason, Unstoppable};
pub use imgref::{Img, ImgRef, ImgVec};
pub use rgb;
pub use rgb::{Rgb, Rgba};
