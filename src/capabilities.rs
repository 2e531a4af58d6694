//! What the decoder can and cannot do, as a static descriptor.
//!
//! Hosts that pick a decoder per file can read this before calling
//! anything: which texture variants are refused up front, whether
//! cancellation works, which [`ResourceLimits`](crate::ResourceLimits)
//! fields are honored.

/// Static description of a decoder's support.
///
/// Returned by [`Decoding::capabilities()`](crate::Decoding::capabilities).
/// Fields stay private so flags can be added later.
///
/// ```
/// use zenktx::CodecCapabilities;
///
/// static CAPS: CodecCapabilities = CodecCapabilities::new()
///     .with_decode_cancel(true)
///     .with_big_endian(true);
///
/// assert!(CAPS.big_endian());
/// assert!(!CAPS.cubemaps());
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct CodecCapabilities {
    decode_cancel: bool,
    cheap_probe: bool,
    big_endian: bool,
    compressed: bool,
    cubemaps: bool,
    array_textures: bool,
    all_mip_levels: bool,
    high_bit_depth: bool,
    enforces_max_pixels: bool,
    enforces_max_memory: bool,
    enforces_max_file_size: bool,
}

impl Default for CodecCapabilities {
    fn default() -> Self {
        Self::new()
    }
}

impl CodecCapabilities {
    /// Nothing supported.
    pub const fn new() -> Self {
        Self {
            decode_cancel: false,
            cheap_probe: false,
            big_endian: false,
            compressed: false,
            cubemaps: false,
            array_textures: false,
            all_mip_levels: false,
            high_bit_depth: false,
            enforces_max_pixels: false,
            enforces_max_memory: false,
            enforces_max_file_size: false,
        }
    }

    /// A stop token passed to `with_stop` is polled during conversion.
    pub const fn decode_cancel(&self) -> bool {
        self.decode_cancel
    }

    /// `probe_header` reads the header and level table only.
    pub const fn cheap_probe(&self) -> bool {
        self.cheap_probe
    }

    /// Files written on big-endian machines decode.
    pub const fn big_endian(&self) -> bool {
        self.big_endian
    }

    /// Block-compressed textures (`glType == 0`) decode.
    pub const fn compressed(&self) -> bool {
        self.compressed
    }

    pub const fn cubemaps(&self) -> bool {
        self.cubemaps
    }

    pub const fn array_textures(&self) -> bool {
        self.array_textures
    }

    /// Levels below the base mip level are decoded too.
    pub const fn all_mip_levels(&self) -> bool {
        self.all_mip_levels
    }

    /// Samples wider than 8 bits survive without narrowing.
    pub const fn high_bit_depth(&self) -> bool {
        self.high_bit_depth
    }

    pub const fn enforces_max_pixels(&self) -> bool {
        self.enforces_max_pixels
    }

    pub const fn enforces_max_memory(&self) -> bool {
        self.enforces_max_memory
    }

    pub const fn enforces_max_file_size(&self) -> bool {
        self.enforces_max_file_size
    }

    pub const fn with_decode_cancel(mut self, v: bool) -> Self {
        self.decode_cancel = v;
        self
    }

    pub const fn with_cheap_probe(mut self, v: bool) -> Self {
        self.cheap_probe = v;
        self
    }

    pub const fn with_big_endian(mut self, v: bool) -> Self {
        self.big_endian = v;
        self
    }

    pub const fn with_compressed(mut self, v: bool) -> Self {
        self.compressed = v;
        self
    }

    pub const fn with_cubemaps(mut self, v: bool) -> Self {
        self.cubemaps = v;
        self
    }

    pub const fn with_array_textures(mut self, v: bool) -> Self {
        self.array_textures = v;
        self
    }

    pub const fn with_all_mip_levels(mut self, v: bool) -> Self {
        self.all_mip_levels = v;
        self
    }

    pub const fn with_high_bit_depth(mut self, v: bool) -> Self {
        self.high_bit_depth = v;
        self
    }

    pub const fn with_enforces_max_pixels(mut self, v: bool) -> Self {
        self.enforces_max_pixels = v;
        self
    }

    pub const fn with_enforces_max_memory(mut self, v: bool) -> Self {
        self.enforces_max_memory = v;
        self
    }

    pub const fn with_enforces_max_file_size(mut self, v: bool) -> Self {
        self.enforces_max_file_size = v;
        self
    }
}

impl core::fmt::Debug for CodecCapabilities {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut d = f.debug_struct("CodecCapabilities");
        for (name, on) in [
            ("decode_cancel", self.decode_cancel),
            ("cheap_probe", self.cheap_probe),
            ("big_endian", self.big_endian),
            ("compressed", self.compressed),
            ("cubemaps", self.cubemaps),
            ("array_textures", self.array_textures),
            ("all_mip_levels", self.all_mip_levels),
            ("high_bit_depth", self.high_bit_depth),
            ("enforces_max_pixels", self.enforces_max_pixels),
            ("enforces_max_memory", self.enforces_max_memory),
            ("enforces_max_file_size", self.enforces_max_file_size),
        ] {
            d.field(name, &on);
        }
        d.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_supports_nothing() {
        let caps = CodecCapabilities::default();
        assert_eq!(caps, CodecCapabilities::new());
        assert!(!caps.decode_cancel());
        assert!(!caps.big_endian());
        assert!(!caps.compressed());
        assert!(!caps.cubemaps());
        assert!(!caps.array_textures());
        assert!(!caps.all_mip_levels());
        assert!(!caps.enforces_max_file_size());
    }

    #[test]
    fn builders_are_usable_in_statics() {
        static CAPS: CodecCapabilities = CodecCapabilities::new()
            .with_cubemaps(true)
            .with_enforces_max_memory(true);
        assert!(CAPS.cubemaps());
        assert!(CAPS.enforces_max_memory());
        assert!(!CAPS.enforces_max_pixels());
        assert!(!CAPS.array_textures());
    }

    #[test]
    fn debug_names_every_flag() {
        let s = alloc::format!("{:?}", CodecCapabilities::new().with_high_bit_depth(true));
        assert!(s.contains("high_bit_depth: true"));
        assert!(s.contains("compressed: false"));
        assert!(s.contains("enforces_max_file_size: false"));
    }
}
