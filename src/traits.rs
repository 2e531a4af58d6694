//! Decoder traits.
//!
//! A reusable config type implements [`Decoding`]; each operation runs
//! through a short-lived [`DecodingJob`] that can borrow a stop token.

use crate::{CodecCapabilities, DecodeOutput, ImageInfo, ResourceLimits, Stop};

/// A decoder configuration.
///
/// Configs own no borrowed state, so one can live in a host's format
/// registry and serve many threads.
pub trait Decoding: Sized + Clone + Send + Sync {
    type Error: core::error::Error + Send + Sync + 'static;

    /// Job type returned by [`job()`](Decoding::job).
    type Job<'a>: DecodingJob<'a, Error = Self::Error>
    where
        Self: 'a;

    fn capabilities() -> &'static CodecCapabilities;

    /// Replace the resource limits.
    fn with_limits(self, limits: ResourceLimits) -> Self;

    /// Start a single decode using this config's limits.
    fn job(&self) -> Self::Job<'_>;

    /// Validate a file and report what decoding it would produce.
    ///
    /// Rejects exactly what [`decode`](Decoding::decode) rejects before
    /// any pixel is converted.
    fn probe_header(&self, data: &[u8]) -> Result<ImageInfo, Self::Error>;

    /// Decode with a default job: no stop token, config limits.
    fn decode(&self, data: &[u8]) -> Result<DecodeOutput, Self::Error> {
        self.job().decode(data)
    }
}

/// A single decode, consumed by [`decode`](DecodingJob::decode).
pub trait DecodingJob<'a>: Sized {
    type Error: core::error::Error + Send + Sync + 'static;

    /// Poll `stop` while converting; a fired token aborts the decode.
    fn with_stop(self, stop: &'a dyn Stop) -> Self;

    /// Use `limits` instead of the config's.
    fn with_limits(self, limits: ResourceLimits) -> Self;

    fn decode(self, data: &[u8]) -> Result<DecodeOutput, Self::Error>;
}
