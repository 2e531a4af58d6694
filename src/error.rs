//! Error types for container parsing and decoding.

use enough::StopReason;
use thiserror::Error;

use crate::limits::LimitExceeded;

/// Result alias for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Structural problems in a KTX 1.1 file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum KtxError {
    /// The file does not start with the KTX 1.1 identifier.
    #[error("missing KTX 1.1 file identifier")]
    BadSignature,

    /// The file ends inside the 64-byte header.
    #[error("file too short for a KTX header ({len} bytes)")]
    TooShort { len: usize },

    /// The endianness field holds neither byte order's reference value.
    #[error("invalid endianness marker {0:#010x}")]
    BadEndianness(u32),

    /// A header field is inconsistent.
    #[error("invalid KTX header: {0}")]
    InvalidHeader(&'static str),

    /// `bytesOfKeyValueData` runs past the end of the file.
    #[error("key/value data of {declared} bytes exceeds the {available} bytes after the header")]
    KeyValueOverflow { declared: u32, available: usize },

    #[error("mip level {level} out of range ({levels} levels)")]
    LevelOutOfRange { level: u32, levels: u32 },

    #[error("array layer {layer} out of range ({layers} layers)")]
    LayerOutOfRange { layer: u32, layers: u32 },

    #[error("cube face {face} out of range ({faces} faces)")]
    FaceOutOfRange { face: u32, faces: u32 },

    /// Image data starting at `offset` does not fit in the file.
    #[error("image data truncated at offset {offset}")]
    Truncated { offset: usize },
}

/// Errors from [`KtxDecoderConfig`](crate::KtxDecoderConfig) and friends.
///
/// Every variant is fatal to the current decode; no partial image is ever
/// returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// The container could not be parsed.
    #[error("failed to read file: {0}")]
    Malformed(#[source] KtxError),

    /// Only 2-dimensional textures can be decoded.
    #[error("only 2-dimensional textures are supported (got {0}D)")]
    UnsupportedDimensions(u8),

    #[error("compressed textures are not supported")]
    Compressed,

    #[error("cubemaps are not supported")]
    Cubemap,

    #[error("array textures are not supported")]
    ArrayTexture,

    /// The first image could not be located in the level chain.
    #[error("unable to find image: {0}")]
    ImageNotFound(#[source] KtxError),

    /// `glFormat` or `glType` has no channel count / sample width.
    #[error("unsupported image format (glFormat {gl_format:#x}, glType {gl_type:#x})")]
    UnsupportedPixelFormat { gl_format: u32, gl_type: u32 },

    /// The image holds fewer bytes than width × height × pixel size.
    #[error("image data too short: need {needed} bytes, have {available}")]
    Truncated { needed: usize, available: usize },

    /// The destination buffer could not be allocated.
    #[error("failed to decode image: could not allocate {bytes} bytes")]
    OutOfMemory { bytes: usize },

    #[error(transparent)]
    Limit(#[from] LimitExceeded),

    /// The stop token fired.
    #[error("decode stopped: {0:?}")]
    Stopped(StopReason),
}
