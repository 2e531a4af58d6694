//! Caller-supplied caps on what a decode may consume.
//!
//! Every check runs after the header is parsed and before the destination
//! buffer is allocated, so an oversized texture costs a header read and
//! nothing more.

use thiserror::Error;

use crate::ImageInfo;

/// Caps on input size, image dimensions and output memory.
///
/// `None` leaves a resource uncapped.
///
/// ```
/// use zenktx::ResourceLimits;
///
/// let limits = ResourceLimits::none()
///     .with_max_pixels(16_000_000)
///     .with_max_memory(64 * 1024 * 1024);
/// assert!(limits.check_dimensions(4000, 4000).is_ok());
/// assert!(limits.check_dimensions(4001, 4000).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct ResourceLimits {
    /// Width × height.
    pub max_pixels: Option<u64>,
    /// Size of the 8-bit output buffer.
    pub max_memory_bytes: Option<u64>,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    /// Size of the whole KTX file, header included.
    pub max_file_size: Option<u64>,
}

/// `Err(exceeded(actual, max))` when `actual` is over `limit`.
fn cap<T: PartialOrd + Copy>(
    limit: Option<T>,
    actual: T,
    exceeded: impl FnOnce(T, T) -> LimitExceeded,
) -> Result<(), LimitExceeded> {
    match limit {
        Some(max) if actual > max => Err(exceeded(actual, max)),
        _ => Ok(()),
    }
}

impl ResourceLimits {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_max_pixels(mut self, pixels: u64) -> Self {
        self.max_pixels = Some(pixels);
        self
    }

    /// Cap the decoded buffer, in bytes.
    pub fn with_max_memory(mut self, bytes: u64) -> Self {
        self.max_memory_bytes = Some(bytes);
        self
    }

    pub fn with_max_width(mut self, width: u32) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn with_max_height(mut self, height: u32) -> Self {
        self.max_height = Some(height);
        self
    }

    /// Cap the input, in bytes.
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = Some(bytes);
        self
    }

    /// Whether anything is capped.
    pub fn has_any(&self) -> bool {
        *self != Self::none()
    }

    /// Width first, then height, then pixel count.
    pub fn check_dimensions(&self, width: u32, height: u32) -> Result<(), LimitExceeded> {
        cap(self.max_width, width, |actual, max| LimitExceeded::Width {
            actual,
            max,
        })?;
        cap(self.max_height, height, |actual, max| LimitExceeded::Height {
            actual,
            max,
        })?;
        cap(
            self.max_pixels,
            u64::from(width) * u64::from(height),
            |actual, max| LimitExceeded::Pixels { actual, max },
        )
    }

    pub fn check_memory(&self, bytes: u64) -> Result<(), LimitExceeded> {
        cap(self.max_memory_bytes, bytes, |actual, max| {
            LimitExceeded::Memory { actual, max }
        })
    }

    pub fn check_file_size(&self, bytes: u64) -> Result<(), LimitExceeded> {
        cap(self.max_file_size, bytes, |actual, max| {
            LimitExceeded::FileSize { actual, max }
        })
    }

    /// Dimensions, then the output buffer size `info` implies.
    pub fn check_image_info(&self, info: &ImageInfo) -> Result<(), LimitExceeded> {
        self.check_dimensions(info.width, info.height)?;
        self.check_memory(info.output_bytes())
    }
}

/// A [`ResourceLimits`] cap was hit. Carries the offending value and the cap.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LimitExceeded {
    #[error("width {actual} exceeds limit {max}")]
    Width { actual: u32, max: u32 },

    #[error("height {actual} exceeds limit {max}")]
    Height { actual: u32, max: u32 },

    #[error("pixel count {actual} exceeds limit {max}")]
    Pixels { actual: u64, max: u64 },

    /// Output buffer size in bytes.
    #[error("memory {actual} bytes exceeds limit {max}")]
    Memory { actual: u64, max: u64 },

    #[error("file size {actual} bytes exceeds limit {max}")]
    FileSize { actual: u64, max: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ImageFormat;
    use rstest::rstest;

    #[test]
    fn none_caps_nothing() {
        let limits = ResourceLimits::none();
        assert!(!limits.has_any());
        assert!(limits.check_dimensions(u32::MAX, u32::MAX).is_ok());
        assert!(limits.check_memory(u64::MAX).is_ok());
        assert!(limits.check_file_size(u64::MAX).is_ok());
    }

    #[test]
    fn builder_sets_fields() {
        let limits = ResourceLimits::none()
            .with_max_pixels(1_000_000)
            .with_max_file_size(4096);
        assert!(limits.has_any());
        assert_eq!(limits.max_pixels, Some(1_000_000));
        assert_eq!(limits.max_file_size, Some(4096));
        assert_eq!(limits.max_memory_bytes, None);
    }

    #[rstest]
    #[case(1921, 10, Some(LimitExceeded::Width { actual: 1921, max: 1920 }))]
    #[case(10, 1081, Some(LimitExceeded::Height { actual: 1081, max: 1080 }))]
    #[case(1921, 1081, Some(LimitExceeded::Width { actual: 1921, max: 1920 }))]
    #[case(1001, 1000, Some(LimitExceeded::Pixels { actual: 1_001_000, max: 1_000_000 }))]
    #[case(1000, 1000, None)]
    fn dimensions_report_first_violation(
        #[case] width: u32,
        #[case] height: u32,
        #[case] expected: Option<LimitExceeded>,
    ) {
        let limits = ResourceLimits::none()
            .with_max_width(1920)
            .with_max_height(1080)
            .with_max_pixels(1_000_000);
        assert_eq!(limits.check_dimensions(width, height).err(), expected);
    }

    #[test]
    fn caps_are_inclusive() {
        let limits = ResourceLimits::none()
            .with_max_memory(1024)
            .with_max_file_size(64);
        assert!(limits.check_memory(1024).is_ok());
        assert_eq!(
            limits.check_memory(1025),
            Err(LimitExceeded::Memory {
                actual: 1025,
                max: 1024
            })
        );
        assert!(limits.check_file_size(64).is_ok());
        assert!(limits.check_file_size(65).is_err());
    }

    #[test]
    fn image_info_is_checked_by_output_size() {
        let limits = ResourceLimits::none().with_max_memory(1000);

        // 16×16×3 = 768
        let rgb = ImageInfo::new(16, 16, ImageFormat::Ktx).with_channel_count(3);
        assert!(limits.check_image_info(&rgb).is_ok());

        // 16×16×4 = 1024
        let rgba = ImageInfo::new(16, 16, ImageFormat::Ktx)
            .with_alpha(true)
            .with_channel_count(4);
        assert_eq!(
            limits.check_image_info(&rgba),
            Err(LimitExceeded::Memory {
                actual: 1024,
                max: 1000
            })
        );
    }

    #[test]
    fn messages() {
        use alloc::string::ToString;
        assert_eq!(
            LimitExceeded::Width {
                actual: 5000,
                max: 4096
            }
            .to_string(),
            "width 5000 exceeds limit 4096"
        );
        assert_eq!(
            LimitExceeded::FileSize { actual: 10, max: 8 }.to_string(),
            "file size 10 bytes exceeds limit 8"
        );
    }
}
