//! Per-sample normalization to 8 bits.
//!
//! Every supported [`SampleType`] maps to a `u8` intensity. The integer paths
//! divide by a fixed scale and clamp only from below; the float paths clamp
//! to `[0, 1]` before scaling by 255. Signed integers do not use their signed
//! range: `i8` is doubled, `i16` divided by 128, `i32` by 8421504, so
//! negative samples become 0 and the positive half spans the output.

use crate::gl::SampleType;

/// Byte order of multi-byte samples, taken from the KTX endianness field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    #[default]
    Little,
    Big,
}

impl ByteOrder {
    /// Byte order of the machine running this code.
    pub const NATIVE: Self = if cfg!(target_endian = "big") {
        ByteOrder::Big
    } else {
        ByteOrder::Little
    };

    #[inline]
    pub(crate) fn u16(self, b: [u8; 2]) -> u16 {
        match self {
            ByteOrder::Little => u16::from_le_bytes(b),
            ByteOrder::Big => u16::from_be_bytes(b),
        }
    }

    #[inline]
    pub(crate) fn u32(self, b: [u8; 4]) -> u32 {
        match self {
            ByteOrder::Little => u32::from_le_bytes(b),
            ByteOrder::Big => u32::from_be_bytes(b),
        }
    }

    #[inline]
    pub(crate) fn u64(self, b: [u8; 8]) -> u64 {
        match self {
            ByteOrder::Little => u64::from_le_bytes(b),
            ByteOrder::Big => u64::from_be_bytes(b),
        }
    }
}

/// Convert IEEE-754 binary16 bits to an `f32`.
///
/// Shifts exponent and mantissa into single-precision position and rebiases
/// the exponent. Inf/NaN get a second exponent adjust so they stay at the
/// all-ones exponent; zero and subnormals are renormalized by subtracting
/// the float whose bits are `113 << 23`.
pub fn half_to_f32(h: u16) -> f32 {
    const MAGIC: u32 = 113 << 23;
    // Exponent mask after the shift.
    const SHIFTED_EXP: u32 = 0x7c00 << 13;

    let h = u32::from(h);
    let mut o = (h & 0x7fff) << 13;
    let exp = SHIFTED_EXP & o;
    o += (127 - 15) << 23;

    if exp == SHIFTED_EXP {
        o += (128 - 16) << 23;
    } else if exp == 0 {
        o += 1 << 23;
        o = (f32::from_bits(o) - f32::from_bits(MAGIC)).to_bits();
    }

    o |= (h & 0x8000) << 16;
    f32::from_bits(o)
}

/// Decode one sample to an 8-bit intensity.
///
/// `bytes` must hold at least `sample_type.byte_width()` bytes; only that
/// prefix is read.
///
/// # Panics
///
/// If `bytes` is shorter than the sample width.
#[inline]
pub fn decode_sample(bytes: &[u8], sample_type: SampleType, order: ByteOrder) -> u8 {
    match sample_type {
        SampleType::I8 => (i32::from(bytes[0] as i8) * 2).max(0) as u8,
        SampleType::U8 => bytes[0],
        SampleType::I16 => {
            let v = order.u16(take(bytes)) as i16;
            (i32::from(v) / 128).max(0) as u8
        }
        SampleType::U16 => (order.u16(take(bytes)) / 257) as u8,
        SampleType::F16 => unit_to_u8(f64::from(half_to_f32(order.u16(take(bytes))))),
        SampleType::I32 => {
            let v = order.u32(take(bytes)) as i32;
            (v / 8_421_504).max(0) as u8
        }
        SampleType::U32 => (order.u32(take(bytes)) / 16_843_009) as u8,
        SampleType::F32 => unit_to_u8(f64::from(f32::from_bits(order.u32(take(bytes))))),
        SampleType::F64 => unit_to_u8(f64::from_bits(order.u64(take(bytes)))),
        SampleType::Fixed => 0,
    }
}

#[inline]
fn take<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[..N]);
    out
}

/// Clamp to `[0, 1]`, scale to 255, truncate. NaN maps to 0.
#[inline]
fn unit_to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0) as u8
}
