//! End-to-end decoding of in-memory KTX files through the public API.

use rstest::rstest;
use zenktx::gl::*;
use zenktx::{
    DecodeError, DecodeOutput, Decoding, DecodingJob, ImageFormat, IncrementalLoader,
    KtxDecoderConfig, LimitExceeded, LoadCallbacks, ResourceLimits, Rgb, Rgba,
};

const IDENTIFIER: [u8; 12] = [
    0xAB, 0x4B, 0x54, 0x58, 0x20, 0x31, 0x31, 0xBB, 0x0D, 0x0A, 0x1A, 0x0A,
];

/// Writes a single-level KTX file.
struct Ktx {
    big_endian: bool,
    gl_type: u32,
    gl_type_size: u32,
    gl_format: u32,
    width: u32,
    height: u32,
    faces: u32,
    array_elements: u32,
    pixels: Vec<u8>,
}

impl Ktx {
    fn new(gl_format: u32, gl_type: u32, gl_type_size: u32, width: u32, height: u32) -> Self {
        Self {
            big_endian: false,
            gl_type,
            gl_type_size,
            gl_format,
            width,
            height,
            faces: 1,
            array_elements: 0,
            pixels: Vec::new(),
        }
    }

    fn pixels(mut self, pixels: &[u8]) -> Self {
        self.pixels = pixels.to_vec();
        self
    }

    fn word(&self, v: u32) -> [u8; 4] {
        if self.big_endian {
            v.to_be_bytes()
        } else {
            v.to_le_bytes()
        }
    }

    fn build(&self) -> Vec<u8> {
        let mut out = IDENTIFIER.to_vec();
        for v in [
            0x0403_0201,
            self.gl_type,
            self.gl_type_size,
            self.gl_format,
            self.gl_format,
            self.gl_format,
            self.width,
            self.height,
            0,
            self.array_elements,
            self.faces,
            1,
            0,
            self.pixels.len() as u32,
        ] {
            out.extend_from_slice(&self.word(v));
        }
        out.extend_from_slice(&self.pixels);
        while out.len() % 4 != 0 {
            out.push(0);
        }
        out
    }
}

fn decode(file: &[u8]) -> Result<DecodeOutput, DecodeError> {
    KtxDecoderConfig::new().decode(file)
}

#[test]
fn rgba8_round_trips_exactly() {
    let pixels: Vec<u8> = (0..=255).collect();
    let file = Ktx::new(GL_RGBA, GL_UNSIGNED_BYTE, 1, 8, 8).pixels(&pixels).build();
    let out = decode(&file).unwrap();
    assert!(out.has_alpha());
    assert_eq!(out.row_stride(), 32);
    assert_eq!(out.bytes(), &pixels[..]);
}

#[test]
fn rgb_output_has_no_alpha() {
    let file = Ktx::new(GL_RGB, GL_UNSIGNED_BYTE, 1, 2, 2)
        .pixels(&(0..12).collect::<Vec<u8>>())
        .build();
    let out = decode(&file).unwrap();
    assert!(!out.has_alpha());
    assert_eq!(out.row_stride(), 6);
    let img = out.into_rgb8();
    assert_eq!(img.width(), 2);
    assert_eq!(img.buf()[3], Rgb { r: 9, g: 10, b: 11 });
}

#[test]
fn red_texture_leaves_green_and_blue_at_zero() {
    let file = Ktx::new(GL_RED, GL_UNSIGNED_BYTE, 1, 2, 1).pixels(&[10, 20]).build();
    assert_eq!(decode(&file).unwrap().bytes(), &[10, 0, 0, 20, 0, 0]);
}

#[test]
fn bgra_is_swapped() {
    let file = Ktx::new(GL_BGRA, GL_UNSIGNED_BYTE, 1, 1, 1).pixels(&[30, 40, 50, 60]).build();
    let img = decode(&file).unwrap().into_rgba8();
    assert_eq!(img.buf()[0], Rgba { r: 50, g: 40, b: 30, a: 60 });
}

#[rstest]
#[case::u16(GL_UNSIGNED_SHORT, 2, 65535u64, 255)]
#[case::i16(GL_SHORT, 2, 0x7FFF, 255)]
#[case::u32(GL_UNSIGNED_INT, 4, 0xFFFF_FFFF, 255)]
#[case::i32(GL_INT, 4, 8421504 * 100, 100)]
#[case::half(GL_HALF_FLOAT, 2, 0x3800, 127)]
#[case::float(GL_FLOAT, 4, 0x3F80_0000, 255)]
#[case::double(GL_DOUBLE, 8, 0x3FE0_0000_0000_0000, 127)]
#[case::fixed(GL_FIXED, 4, 0x0001_0000, 0)]
fn wide_samples_in_either_byte_order(
    #[case] gl_type: u32,
    #[case] size: u32,
    #[case] bits: u64,
    #[case] expected: u8,
    #[values(false, true)] big_endian: bool,
) {
    let bytes = if big_endian {
        bits.to_be_bytes()[8 - size as usize..].to_vec()
    } else {
        bits.to_le_bytes()[..size as usize].to_vec()
    };
    let mut ktx = Ktx::new(GL_RED, gl_type, size, 1, 1).pixels(&bytes);
    ktx.big_endian = big_endian;
    let out = decode(&ktx.build()).unwrap();
    assert_eq!(out.bytes(), &[expected, 0, 0]);
}

#[test]
fn negative_signed_samples_clamp_to_zero() {
    let file = Ktx::new(GL_RG, GL_BYTE, 1, 1, 1).pixels(&[0x80, 0x7F]).build();
    assert_eq!(decode(&file).unwrap().bytes(), &[0, 254, 0]);
}

#[test]
fn detection_requires_identifier() {
    let file = Ktx::new(GL_RGB, GL_UNSIGNED_BYTE, 1, 1, 1).pixels(&[1, 2, 3]).build();
    assert_eq!(ImageFormat::detect(&file), Some(ImageFormat::Ktx));

    let mut bad = file.clone();
    bad[0] = 0;
    assert_eq!(ImageFormat::detect(&bad), None);
    assert!(matches!(decode(&bad), Err(DecodeError::Malformed(_))));
}

#[test]
fn format_registration() {
    let info = ImageFormat::Ktx.info();
    assert_eq!(info.name, "ktx");
    assert_eq!(info.description, "The KTX image format");
    assert_eq!(ImageFormat::Ktx.mime_type(), "image/ktx");
    assert_eq!(ImageFormat::from_extension("KTX"), Some(ImageFormat::Ktx));
    assert_eq!(ImageFormat::from_extension("ktx2"), None);
}

#[test]
fn compressed_texture_is_rejected() {
    let file = Ktx::new(0, 0, 1, 4, 4).pixels(&[0u8; 8]).build();
    assert!(matches!(decode(&file), Err(DecodeError::Compressed)));
}

#[test]
fn cubemap_is_rejected() {
    let mut ktx = Ktx::new(GL_RGBA, GL_UNSIGNED_BYTE, 1, 1, 1).pixels(&[0u8; 4]);
    ktx.faces = 6;
    assert!(matches!(decode(&ktx.build()), Err(DecodeError::Cubemap)));
}

#[test]
fn array_texture_is_rejected() {
    let mut ktx = Ktx::new(GL_RGBA, GL_UNSIGNED_BYTE, 1, 1, 1).pixels(&[0u8; 8]);
    ktx.array_elements = 2;
    assert!(matches!(decode(&ktx.build()), Err(DecodeError::ArrayTexture)));
}

#[test]
fn luminance_format_is_unsupported() {
    // GL_LUMINANCE_ALPHA
    let file = Ktx::new(0x190A, GL_UNSIGNED_BYTE, 1, 1, 1).pixels(&[0u8; 2]).build();
    assert!(matches!(
        decode(&file),
        Err(DecodeError::UnsupportedPixelFormat { gl_format: 0x190A, .. })
    ));
}

#[test]
fn truncated_file_fails_cleanly() {
    let file = Ktx::new(GL_RGBA, GL_UNSIGNED_BYTE, 1, 4, 4).pixels(&[7u8; 64]).build();
    for len in [0, 12, 63, 64, 67, 68, 100] {
        assert!(decode(&file[..len]).is_err(), "len {len}");
    }
}

#[test]
fn probe_agrees_with_decode() {
    let file = Ktx::new(GL_BGR, GL_UNSIGNED_SHORT, 2, 3, 2).pixels(&[0u8; 36]).build();
    let config = KtxDecoderConfig::new();
    let info = config.probe_header(&file).unwrap();
    let out = config.decode(&file).unwrap();
    assert_eq!(&info, out.info());
    assert_eq!(info.channel_count, 3);
    assert_eq!(info.bit_depth, Some(16));
}

#[test]
fn limits_are_checked_before_decoding() {
    let file = Ktx::new(GL_RGB, GL_UNSIGNED_BYTE, 1, 10, 10).pixels(&[0u8; 300]).build();
    let config = KtxDecoderConfig::new().with_limits(ResourceLimits::none().with_max_height(9));
    assert!(matches!(
        config.probe_header(&file),
        Err(DecodeError::Limit(LimitExceeded::Height { actual: 10, max: 9 }))
    ));
    assert!(config.job().with_limits(ResourceLimits::none()).decode(&file).is_ok());
}

#[test]
fn incremental_loader_matches_one_shot() {
    struct Keep(Option<DecodeOutput>);
    impl LoadCallbacks for Keep {
        fn prepared(&mut self, output: DecodeOutput) {
            self.0 = Some(output);
        }
    }

    let samples: Vec<u8> = [
        0.0f32, 0.25, 0.5, 1.0, 2.0, -1.0, 0.75, 0.1, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0,
    ]
    .iter()
    .flat_map(|v| v.to_le_bytes())
    .collect();
    let file = Ktx::new(GL_RGBA, GL_FLOAT, 4, 2, 2).pixels(&samples).build();

    let mut loader = IncrementalLoader::new(KtxDecoderConfig::new(), Keep(None));
    for chunk in file.chunks(5) {
        loader.load_increment(chunk).unwrap();
    }
    let streamed = loader.finish().unwrap().0.unwrap();
    let direct = decode(&file).unwrap();
    assert_eq!(streamed.bytes(), direct.bytes());
    assert_eq!(
        direct.bytes(),
        &[0, 63, 127, 255, 255, 0, 191, 25, 0, 0, 0, 0, 255, 255, 255, 255]
    );
}

#[test]
fn oversized_header_hits_memory_limit() {
    let file = Ktx::new(GL_RGBA, GL_UNSIGNED_BYTE, 1, 0x8000_0000, 0x8000_0000)
        .pixels(&[0u8; 4])
        .build();
    let config = KtxDecoderConfig::new().with_limits(ResourceLimits::none().with_max_memory(1 << 40));
    assert!(matches!(
        config.probe_header(&file),
        Err(DecodeError::Limit(LimitExceeded::Memory { .. }))
    ));

    let mut loader = IncrementalLoader::new(config, NoCallbacks);
    loader.load_increment(&file).unwrap();
    assert!(matches!(
        loader.finish(),
        Err(DecodeError::Limit(LimitExceeded::Memory { .. }))
    ));
}

struct NoCallbacks;

impl LoadCallbacks for NoCallbacks {
    fn prepared(&mut self, _: DecodeOutput) {
        panic!("oversized image must not decode");
    }
}
