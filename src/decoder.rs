//! KTX 1.1 decoder.
//!
//! ```
//! use zenktx::{Decoding, KtxDecoderConfig, ResourceLimits};
//!
//! # fn run(data: &[u8]) -> Result<(), zenktx::DecodeError> {
//! let config = KtxDecoderConfig::new()
//!     .with_limits(ResourceLimits::none().with_max_pixels(64 * 1024 * 1024));
//! let output = config.decode(data)?;
//! println!("{}x{} alpha={}", output.width(), output.height(), output.has_alpha());
//! # Ok(())
//! # }
//! ```

use crate::container::KtxTexture;
use crate::convert::{SourceImage, convert};
use crate::error::{DecodeError, DecodeResult};
use crate::gl::{PixelLayout, SampleType};
use crate::{
    CodecCapabilities, DecodeOutput, Decoding, DecodingJob, ImageFormat, ImageInfo,
    ResourceLimits, Stop, Unstoppable,
};

static CAPABILITIES: CodecCapabilities = CodecCapabilities::new()
    .with_decode_cancel(true)
    .with_cheap_probe(true)
    .with_big_endian(true)
    .with_enforces_max_pixels(true)
    .with_enforces_max_memory(true)
    .with_enforces_max_file_size(true);

/// Reusable decoder configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KtxDecoderConfig {
    limits: ResourceLimits,
}

impl KtxDecoderConfig {
    /// A decoder without resource limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// The configured limits.
    pub fn limits(&self) -> &ResourceLimits {
        &self.limits
    }
}

impl Decoding for KtxDecoderConfig {
    type Error = DecodeError;
    type Job<'a> = KtxDecodeJob<'a>;

    fn capabilities() -> &'static CodecCapabilities {
        &CAPABILITIES
    }

    fn with_limits(mut self, limits: ResourceLimits) -> Self {
        self.limits = limits;
        self
    }

    fn job(&self) -> KtxDecodeJob<'_> {
        KtxDecodeJob {
            limits: self.limits,
            stop: &Unstoppable,
        }
    }

    fn probe_header(&self, data: &[u8]) -> DecodeResult<ImageInfo> {
        Ok(prepare(data, &self.limits)?.info)
    }
}

/// One decode operation.
pub struct KtxDecodeJob<'a> {
    limits: ResourceLimits,
    stop: &'a dyn Stop,
}

impl<'a> DecodingJob<'a> for KtxDecodeJob<'a> {
    type Error = DecodeError;

    fn with_stop(mut self, stop: &'a dyn Stop) -> Self {
        self.stop = stop;
        self
    }

    fn with_limits(mut self, limits: ResourceLimits) -> Self {
        self.limits = limits;
        self
    }

    fn decode(self, data: &[u8]) -> DecodeResult<DecodeOutput> {
        prepare(data, &self.limits)?.decode(self.stop)
    }
}

/// A validated texture ready for conversion.
pub(crate) struct Prepared<'a> {
    source: SourceImage<'a>,
    pub(crate) info: ImageInfo,
}

impl Prepared<'_> {
    /// Convert the base image.
    pub(crate) fn decode(self, stop: &dyn Stop) -> DecodeResult<DecodeOutput> {
        let pixels = convert(&self.source, stop)?;
        log::debug!(
            "ktx: decoded {}x{} to {} channels",
            pixels.width(),
            pixels.height(),
            pixels.channels()
        );
        Ok(DecodeOutput::new(pixels, self.info))
    }
}

/// Everything up to the conversion: parse, reject unsupported variants,
/// locate the base image, classify the pixel format, check limits.
pub(crate) fn prepare<'a>(data: &'a [u8], limits: &ResourceLimits) -> DecodeResult<Prepared<'a>> {
    limits.check_file_size(data.len() as u64)?;

    let texture = KtxTexture::parse(data).map_err(DecodeError::Malformed)?;
    let header = *texture.header();

    let dimensions = header.num_dimensions();
    if dimensions != 2 {
        return Err(DecodeError::UnsupportedDimensions(dimensions));
    }
    if header.is_compressed() {
        return Err(DecodeError::Compressed);
    }
    if header.is_cubemap() {
        return Err(DecodeError::Cubemap);
    }
    if header.is_array() {
        return Err(DecodeError::ArrayTexture);
    }

    let image = texture
        .image_data(0, 0, 0)
        .map_err(DecodeError::ImageNotFound)?;

    let (Some(layout), Some(sample_type)) = (
        PixelLayout::from_gl(header.gl_format),
        SampleType::from_gl(header.gl_type),
    ) else {
        return Err(DecodeError::UnsupportedPixelFormat {
            gl_format: header.gl_format,
            gl_type: header.gl_type,
        });
    };

    if header.gl_type_size as usize != sample_type.byte_width() {
        log::warn!(
            "ktx: glTypeSize {} does not match glType {:#x}; using {} bytes",
            header.gl_type_size,
            header.gl_type,
            sample_type.byte_width()
        );
    }
    if header.num_levels() > 1 {
        log::warn!(
            "ktx: decoding base level only; {} further mip levels ignored",
            header.num_levels() - 1
        );
    }

    let source = SourceImage {
        width: texture.base_width(),
        height: texture.base_height(),
        layout,
        sample_type,
        byte_order: header.byte_order,
        data: image,
    };
    if let Some(stride) = source.row_stride()
        && source.height > 1
        && stride % 4 != 0
    {
        log::warn!("ktx: {stride}-byte rows are not 4-byte aligned; reading them without padding");
    }

    let channels = source.output_channels();
    let info = ImageInfo::new(source.width, source.height, ImageFormat::Ktx)
        .with_alpha(channels == 4)
        .with_channel_count(channels)
        .with_source_channels(layout.channels() as u8)
        .with_bit_depth((sample_type.byte_width() * 8) as u8)
        .with_gl(header.gl_format, header.gl_type)
        .with_mip_levels(header.num_levels());
    limits.check_image_info(&info)?;
    if source.required_bytes().is_none() {
        return Err(DecodeError::OutOfMemory { bytes: usize::MAX });
    }

    Ok(Prepared { source, info })
}
