//! Incremental loading for hosts that feed bytes as they arrive.
//!
//! [`IncrementalLoader`] buffers chunks until the caller calls
//! [`finish`](IncrementalLoader::finish), then decodes the whole file in one
//! pass and hands the result to [`LoadCallbacks`]. KTX places the image data
//! after a variable-size key/value block, so nothing useful happens before
//! the last chunk is in.
//!
//! ```
//! use zenktx::{DecodeOutput, IncrementalLoader, KtxDecoderConfig, LoadCallbacks};
//!
//! #[derive(Default)]
//! struct Collect(Option<DecodeOutput>);
//!
//! impl LoadCallbacks for Collect {
//!     fn prepared(&mut self, output: DecodeOutput) {
//!         self.0 = Some(output);
//!     }
//! }
//!
//! # fn run(chunks: &[&[u8]]) -> Result<(), zenktx::DecodeError> {
//! let mut loader = IncrementalLoader::new(KtxDecoderConfig::new(), Collect::default());
//! for chunk in chunks {
//!     loader.load_increment(chunk)?;
//! }
//! let image = loader.finish()?.0;
//! # let _ = image;
//! # Ok(())
//! # }
//! ```

use alloc::vec::Vec;

use crate::decoder::prepare;
use crate::error::{DecodeError, DecodeResult};
use crate::{DecodeOutput, KtxDecoderConfig, Unstoppable};

/// Receives the results of an [`IncrementalLoader`].
pub trait LoadCallbacks {
    /// Called once the header has been validated, before decoding.
    ///
    /// The loader never scales, so any size written back is ignored.
    fn size(&mut self, width: &mut u32, height: &mut u32) {
        let _ = (width, height);
    }

    /// Called with the decoded image.
    fn prepared(&mut self, output: DecodeOutput);
}

/// Accumulates a KTX file chunk by chunk and decodes it on
/// [`finish`](Self::finish).
pub struct IncrementalLoader<C: LoadCallbacks> {
    config: KtxDecoderConfig,
    callbacks: C,
    buffer: Vec<u8>,
}

impl<C: LoadCallbacks> IncrementalLoader<C> {
    pub fn new(config: KtxDecoderConfig, callbacks: C) -> Self {
        Self {
            config,
            callbacks,
            buffer: Vec::new(),
        }
    }

    /// Bytes received so far.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Append a chunk.
    ///
    /// Fails as soon as the accumulated size passes
    /// [`max_file_size`](crate::ResourceLimits::max_file_size).
    pub fn load_increment(&mut self, chunk: &[u8]) -> DecodeResult<()> {
        self.config
            .limits()
            .check_file_size(self.buffer.len() as u64 + chunk.len() as u64)?;
        self.buffer
            .try_reserve(chunk.len())
            .map_err(|_| DecodeError::OutOfMemory { bytes: chunk.len() })?;
        self.buffer.extend_from_slice(chunk);
        log::trace!("ktx: buffered {} bytes", self.buffer.len());
        Ok(())
    }

    /// Decode everything received and return the callbacks.
    pub fn finish(mut self) -> DecodeResult<C> {
        let data = core::mem::take(&mut self.buffer);
        let prepared = prepare(&data, self.config.limits())?;
        let info = &prepared.info;

        let (mut width, mut height) = (info.width, info.height);
        self.callbacks.size(&mut width, &mut height);
        if (width, height) != (info.width, info.height) {
            log::debug!(
                "ktx: requested size {width}x{height} ignored; decoding at {}x{}",
                info.width,
                info.height
            );
        }

        let output = prepared.decode(&Unstoppable)?;
        drop(data);
        self.callbacks.prepared(output);
        Ok(self.callbacks)
    }
}
