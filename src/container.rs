//! Minimal KTX 1.1 container reader.
//!
//! Parses the 64-byte header, validates it, and locates image data inside
//! the mip level chain. Pixel data is borrowed from the input, never copied.
//!
//! Layout after the header:
//!
//! ```text
//! bytesOfKeyValueData   key/value pairs, each u32 length + data, 4-byte padded
//! for each mip level:
//!     u32 imageSize
//!     for each array element, face, z slice: pixel rows
//!     cube padding (non-array cubemaps, per face) and mip padding to 4 bytes
//! ```
//!
//! All header words are stored in the writer's byte order; the endianness
//! field tells which one that was.

use crate::error::KtxError;
use crate::sample::ByteOrder;

/// The 12-byte KTX 1.1 file identifier.
pub const KTX_SIGNATURE: [u8; 12] = [
    0xAB, 0x4B, 0x54, 0x58, 0x20, 0x31, 0x31, 0xBB, 0x0D, 0x0A, 0x1A, 0x0A,
];

/// Size of the fixed header, identifier included.
pub const HEADER_LEN: usize = 64;

const ENDIAN_REF: u32 = 0x0403_0201;
const ENDIAN_REF_SWAPPED: u32 = 0x0102_0304;

/// Decoded KTX 1.1 header fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KtxHeader {
    pub byte_order: ByteOrder,
    pub gl_type: u32,
    pub gl_type_size: u32,
    pub gl_format: u32,
    pub gl_internal_format: u32,
    pub gl_base_internal_format: u32,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub pixel_depth: u32,
    pub array_elements: u32,
    pub faces: u32,
    pub mip_levels: u32,
    pub key_value_bytes: u32,
}

impl KtxHeader {
    /// Parse and validate the fixed header at the start of `data`.
    pub fn parse(data: &[u8]) -> Result<Self, KtxError> {
        if data.len() < KTX_SIGNATURE.len() || data[..KTX_SIGNATURE.len()] != KTX_SIGNATURE {
            return Err(KtxError::BadSignature);
        }
        if data.len() < HEADER_LEN {
            return Err(KtxError::TooShort { len: data.len() });
        }

        let marker = u32::from_le_bytes(word(data, 12));
        let byte_order = match marker {
            ENDIAN_REF => ByteOrder::Little,
            ENDIAN_REF_SWAPPED => ByteOrder::Big,
            other => return Err(KtxError::BadEndianness(other)),
        };
        let field = |index: usize| byte_order.u32(word(data, 16 + index * 4));

        let header = Self {
            byte_order,
            gl_type: field(0),
            gl_type_size: field(1),
            gl_format: field(2),
            gl_internal_format: field(3),
            gl_base_internal_format: field(4),
            pixel_width: field(5),
            pixel_height: field(6),
            pixel_depth: field(7),
            array_elements: field(8),
            faces: field(9),
            mip_levels: field(10),
            key_value_bytes: field(11),
        };
        header.validate()?;
        Ok(header)
    }

    fn validate(&self) -> Result<(), KtxError> {
        // Compressed textures carry glType == glFormat == 0.
        if (self.gl_type == 0) != (self.gl_format == 0) {
            return Err(KtxError::InvalidHeader(
                "glType and glFormat must both be zero or both be set",
            ));
        }
        if self.gl_type == 0 && self.gl_type_size != 1 {
            return Err(KtxError::InvalidHeader(
                "glTypeSize must be 1 for compressed textures",
            ));
        }
        if !matches!(self.gl_type_size, 1 | 2 | 4 | 8) {
            return Err(KtxError::InvalidHeader("glTypeSize must be 1, 2, 4 or 8"));
        }
        if self.pixel_width == 0 {
            return Err(KtxError::InvalidHeader("pixelWidth must be non-zero"));
        }
        if self.pixel_depth > 0 && self.pixel_height == 0 {
            return Err(KtxError::InvalidHeader(
                "3D textures need a non-zero pixelHeight",
            ));
        }
        match self.faces {
            1 => {}
            6 => {
                if self.pixel_depth != 0 {
                    return Err(KtxError::InvalidHeader("cubemaps cannot be 3D"));
                }
                if self.pixel_width != self.pixel_height {
                    return Err(KtxError::InvalidHeader("cubemap faces must be square"));
                }
            }
            _ => return Err(KtxError::InvalidHeader("numberOfFaces must be 1 or 6")),
        }
        let largest = self
            .pixel_width
            .max(self.pixel_height)
            .max(self.pixel_depth);
        let max_levels = u32::BITS - largest.leading_zeros();
        if self.mip_levels > max_levels {
            return Err(KtxError::InvalidHeader(
                "more mip levels than the base size allows",
            ));
        }
        Ok(())
    }

    /// 1, 2 or 3.
    pub fn num_dimensions(&self) -> u8 {
        if self.pixel_depth > 0 {
            3
        } else if self.pixel_height > 0 {
            2
        } else {
            1
        }
    }

    pub fn is_compressed(&self) -> bool {
        self.gl_type == 0
    }

    pub fn is_cubemap(&self) -> bool {
        self.faces == 6
    }

    pub fn is_array(&self) -> bool {
        self.array_elements > 0
    }

    /// Mip levels stored in the file. A header value of 0 means one level
    /// with the rest left for the loader to generate.
    pub fn num_levels(&self) -> u32 {
        self.mip_levels.max(1)
    }

    /// Array layers stored per level (at least 1).
    pub fn num_layers(&self) -> u32 {
        self.array_elements.max(1)
    }
}

/// A parsed KTX file borrowing its bytes.
#[derive(Clone, Copy, Debug)]
pub struct KtxTexture<'a> {
    header: KtxHeader,
    data: &'a [u8],
}

impl<'a> KtxTexture<'a> {
    /// Parse the header and check that the key/value block fits.
    ///
    /// Image data is located lazily by [`image_offset()`](Self::image_offset).
    pub fn parse(data: &'a [u8]) -> Result<Self, KtxError> {
        let header = KtxHeader::parse(data)?;
        let kvd_end = HEADER_LEN as u64 + u64::from(header.key_value_bytes);
        if kvd_end > data.len() as u64 {
            return Err(KtxError::KeyValueOverflow {
                declared: header.key_value_bytes,
                available: data.len() - HEADER_LEN,
            });
        }
        log::debug!(
            "ktx: {}x{}x{} glFormat={:#x} glType={:#x} levels={} faces={} layers={} {:?}",
            header.pixel_width,
            header.pixel_height,
            header.pixel_depth,
            header.gl_format,
            header.gl_type,
            header.mip_levels,
            header.faces,
            header.array_elements,
            header.byte_order,
        );
        Ok(Self { header, data })
    }

    pub fn header(&self) -> &KtxHeader {
        &self.header
    }

    /// The whole file.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn base_width(&self) -> u32 {
        self.header.pixel_width
    }

    /// Base height; 1-D textures report 1.
    pub fn base_height(&self) -> u32 {
        self.header.pixel_height.max(1)
    }

    /// Iterate the key/value metadata block.
    pub fn key_values(&self) -> KeyValues<'a> {
        let end = HEADER_LEN + self.header.key_value_bytes as usize;
        KeyValues {
            rest: &self.data[HEADER_LEN..end],
            order: self.header.byte_order,
        }
    }

    /// The `imageSize` word and the offset just past it, for each level up
    /// to and including `level`.
    fn level_start(&self, level: u32) -> Result<(usize, u32), KtxError> {
        if level >= self.header.num_levels() {
            return Err(KtxError::LevelOutOfRange {
                level,
                levels: self.header.num_levels(),
            });
        }
        let non_array_cube = self.header.is_cubemap() && !self.header.is_array();
        let mut pos = HEADER_LEN + self.header.key_value_bytes as usize;
        let mut current = 0;
        loop {
            let size_end = pos.checked_add(4).ok_or(KtxError::Truncated { offset: pos })?;
            if size_end > self.data.len() {
                return Err(KtxError::Truncated { offset: pos });
            }
            let image_size = self.header.byte_order.u32(word(self.data, pos));
            log::trace!("ktx: level {current} imageSize={image_size} at {pos}");
            if current == level {
                return Ok((size_end, image_size));
            }
            let faces = if non_array_cube { 6 } else { 1 };
            pos = pad4(image_size as usize)
                .and_then(|padded| padded.checked_mul(faces))
                .and_then(|level_bytes| size_end.checked_add(level_bytes))
                .ok_or(KtxError::Truncated { offset: size_end })?;
            current += 1;
        }
    }

    /// Absolute byte offset of one image (level, array layer, cube face).
    ///
    /// Fails if the indices are out of range or the image does not fit in
    /// the file.
    pub fn image_offset(&self, level: u32, layer: u32, face: u32) -> Result<usize, KtxError> {
        Ok(self.image_range(level, layer, face)?.0)
    }

    /// Bytes of one image, as declared by the level's `imageSize`.
    pub fn image_data(&self, level: u32, layer: u32, face: u32) -> Result<&'a [u8], KtxError> {
        let (offset, len) = self.image_range(level, layer, face)?;
        Ok(&self.data[offset..offset + len])
    }

    fn image_range(&self, level: u32, layer: u32, face: u32) -> Result<(usize, usize), KtxError> {
        let layers = self.header.num_layers();
        if layer >= layers {
            return Err(KtxError::LayerOutOfRange { layer, layers });
        }
        if face >= self.header.faces {
            return Err(KtxError::FaceOutOfRange {
                face,
                faces: self.header.faces,
            });
        }
        let (start, image_size) = self.level_start(level)?;
        let image_size = image_size as usize;
        let (skip, len) = if self.header.is_cubemap() && !self.header.is_array() {
            // imageSize is per face here.
            let skip = pad4(image_size).and_then(|p| p.checked_mul(face as usize));
            (skip, image_size)
        } else {
            let images = layers as usize * self.header.faces as usize;
            let per_image = image_size / images;
            let index = layer as usize * self.header.faces as usize + face as usize;
            (per_image.checked_mul(index), per_image)
        };
        let Some(offset) = skip.and_then(|skip| start.checked_add(skip)) else {
            return Err(KtxError::Truncated { offset: start });
        };
        match offset.checked_add(len) {
            Some(end) if end <= self.data.len() => Ok((offset, len)),
            _ => Err(KtxError::Truncated { offset }),
        }
    }
}

/// Iterator over `(key, value)` metadata pairs.
///
/// Keys are UTF-8 up to the first NUL; entries with a malformed length or
/// a non-UTF-8 key end the iteration.
#[derive(Clone, Debug)]
pub struct KeyValues<'a> {
    rest: &'a [u8],
    order: ByteOrder,
}

impl<'a> Iterator for KeyValues<'a> {
    type Item = (&'a str, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.len() < 4 {
            return None;
        }
        let len = self.order.u32(word(self.rest, 0)) as usize;
        let body = self.rest.get(4..4usize.checked_add(len)?)?;
        self.rest = pad4(len)
            .and_then(|padded| self.rest.get(4 + padded..))
            .unwrap_or(&[]);

        let nul = body.iter().position(|&b| b == 0)?;
        let key = core::str::from_utf8(&body[..nul]).ok()?;
        Some((key, &body[nul + 1..]))
    }
}

#[inline]
fn word(data: &[u8], offset: usize) -> [u8; 4] {
    let mut out = [0u8; 4];
    out.copy_from_slice(&data[offset..offset + 4]);
    out
}

/// `n` rounded up to a multiple of 4, `None` on overflow.
#[inline]
fn pad4(n: usize) -> Option<usize> {
    n.checked_next_multiple_of(4)
}
