//! OpenGL format and type tags as stored in a KTX header.
//!
//! KTX 1.1 describes uncompressed pixels with the `glFormat` / `glType` pair
//! that would be passed to `glTexImage2D`. [`PixelLayout`] covers the formats
//! this crate can read, [`SampleType`] the per-channel encodings.
//!
//! [`channel_count()`] and [`byte_width()`] are the raw lookups the decoder
//! runs before anything is allocated. `None` means the tag is unsupported.

/// `GL_BYTE`
pub const GL_BYTE: u32 = 0x1400;
/// `GL_UNSIGNED_BYTE`
pub const GL_UNSIGNED_BYTE: u32 = 0x1401;
/// `GL_SHORT`
pub const GL_SHORT: u32 = 0x1402;
/// `GL_UNSIGNED_SHORT`
pub const GL_UNSIGNED_SHORT: u32 = 0x1403;
/// `GL_INT`
pub const GL_INT: u32 = 0x1404;
/// `GL_UNSIGNED_INT`
pub const GL_UNSIGNED_INT: u32 = 0x1405;
/// `GL_FLOAT`
pub const GL_FLOAT: u32 = 0x1406;
/// `GL_DOUBLE`
pub const GL_DOUBLE: u32 = 0x140A;
/// `GL_HALF_FLOAT`
pub const GL_HALF_FLOAT: u32 = 0x140B;
/// `GL_FIXED`
pub const GL_FIXED: u32 = 0x140C;

/// `GL_STENCIL_INDEX`
pub const GL_STENCIL_INDEX: u32 = 0x1901;
/// `GL_DEPTH_COMPONENT`
pub const GL_DEPTH_COMPONENT: u32 = 0x1902;
/// `GL_RED`
pub const GL_RED: u32 = 0x1903;
/// `GL_RGB`
pub const GL_RGB: u32 = 0x1907;
/// `GL_RGBA`
pub const GL_RGBA: u32 = 0x1908;
/// `GL_BGR`
pub const GL_BGR: u32 = 0x80E0;
/// `GL_BGRA`
pub const GL_BGRA: u32 = 0x80E1;
/// `GL_RG`
pub const GL_RG: u32 = 0x8227;

/// Channel layout of an uncompressed texture (`glFormat`).
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    Red,
    StencilIndex,
    DepthComponent,
    Rg,
    Rgb,
    Bgr,
    Rgba,
    Bgra,
}

impl PixelLayout {
    /// Map a `glFormat` value. Returns `None` for anything unsupported.
    pub fn from_gl(gl_format: u32) -> Option<Self> {
        match gl_format {
            GL_RED => Some(PixelLayout::Red),
            GL_STENCIL_INDEX => Some(PixelLayout::StencilIndex),
            GL_DEPTH_COMPONENT => Some(PixelLayout::DepthComponent),
            GL_RG => Some(PixelLayout::Rg),
            GL_RGB => Some(PixelLayout::Rgb),
            GL_BGR => Some(PixelLayout::Bgr),
            GL_RGBA => Some(PixelLayout::Rgba),
            GL_BGRA => Some(PixelLayout::Bgra),
            _ => None,
        }
    }

    /// The `glFormat` value for this layout.
    pub fn to_gl(self) -> u32 {
        match self {
            PixelLayout::Red => GL_RED,
            PixelLayout::StencilIndex => GL_STENCIL_INDEX,
            PixelLayout::DepthComponent => GL_DEPTH_COMPONENT,
            PixelLayout::Rg => GL_RG,
            PixelLayout::Rgb => GL_RGB,
            PixelLayout::Bgr => GL_BGR,
            PixelLayout::Rgba => GL_RGBA,
            PixelLayout::Bgra => GL_BGRA,
        }
    }

    /// Number of channels per pixel (1-4).
    pub fn channels(self) -> usize {
        match self {
            PixelLayout::Red | PixelLayout::StencilIndex | PixelLayout::DepthComponent => 1,
            PixelLayout::Rg => 2,
            PixelLayout::Rgb | PixelLayout::Bgr => 3,
            PixelLayout::Rgba | PixelLayout::Bgra => 4,
        }
    }

    /// Whether red and blue are stored swapped.
    pub fn is_bgr(self) -> bool {
        matches!(self, PixelLayout::Bgr | PixelLayout::Bgra)
    }
}

/// Storage of one channel sample (`glType`).
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SampleType {
    I8,
    U8,
    I16,
    U16,
    F16,
    I32,
    U32,
    F32,
    F64,
    /// 16.16 fixed point. Classified as 4 bytes wide, but always decodes to 0.
    Fixed,
}

impl SampleType {
    /// Map a `glType` value. Returns `None` for anything unsupported,
    /// including the packed types (`GL_UNSIGNED_SHORT_5_6_5` etc.).
    pub fn from_gl(gl_type: u32) -> Option<Self> {
        match gl_type {
            GL_BYTE => Some(SampleType::I8),
            GL_UNSIGNED_BYTE => Some(SampleType::U8),
            GL_SHORT => Some(SampleType::I16),
            GL_UNSIGNED_SHORT => Some(SampleType::U16),
            GL_HALF_FLOAT => Some(SampleType::F16),
            GL_INT => Some(SampleType::I32),
            GL_UNSIGNED_INT => Some(SampleType::U32),
            GL_FLOAT => Some(SampleType::F32),
            GL_DOUBLE => Some(SampleType::F64),
            GL_FIXED => Some(SampleType::Fixed),
            _ => None,
        }
    }

    /// The `glType` value for this sample type.
    pub fn to_gl(self) -> u32 {
        match self {
            SampleType::I8 => GL_BYTE,
            SampleType::U8 => GL_UNSIGNED_BYTE,
            SampleType::I16 => GL_SHORT,
            SampleType::U16 => GL_UNSIGNED_SHORT,
            SampleType::F16 => GL_HALF_FLOAT,
            SampleType::I32 => GL_INT,
            SampleType::U32 => GL_UNSIGNED_INT,
            SampleType::F32 => GL_FLOAT,
            SampleType::F64 => GL_DOUBLE,
            SampleType::Fixed => GL_FIXED,
        }
    }

    /// Bytes per sample (1, 2, 4 or 8).
    pub fn byte_width(self) -> usize {
        match self {
            SampleType::I8 | SampleType::U8 => 1,
            SampleType::I16 | SampleType::U16 | SampleType::F16 => 2,
            SampleType::I32 | SampleType::U32 | SampleType::F32 | SampleType::Fixed => 4,
            SampleType::F64 => 8,
        }
    }
}

/// Channel count for a raw `glFormat`, or `None` if unsupported.
pub fn channel_count(gl_format: u32) -> Option<usize> {
    PixelLayout::from_gl(gl_format).map(PixelLayout::channels)
}

/// Sample width in bytes for a raw `glType`, or `None` if unsupported.
pub fn byte_width(gl_type: u32) -> Option<usize> {
    SampleType::from_gl(gl_type).map(SampleType::byte_width)
}
